//! 帧分配策略
//!
//! 缺页时的物理帧分配通过 trait 抽象，便于替换真实的空闲帧
//! 分配器（free-list、位图等）而不触及翻译算法。

/// 缺页时为页号分配物理帧的策略
pub trait FrameAllocator {
    /// 为发生缺页的页号分配一个帧号
    fn allocate(&mut self, page: u64) -> u64;
}

/// 参考策略的固定偏移
pub const DEFAULT_FRAME_OFFSET: u64 = 4;

/// 确定性的"玩具"分配策略：`frame = page + offset`。
///
/// 不是真实的空闲帧分配器：不回收、不检测冲突，仅因页号互不相同
/// 而保证帧号互不相同，对地址空间大小也不设上限。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOffsetAllocator {
    offset: u64,
}

impl FixedOffsetAllocator {
    /// 指定偏移的分配器
    pub fn new(offset: u64) -> Self {
        Self { offset }
    }
}

impl Default for FixedOffsetAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_OFFSET)
    }
}

impl FrameAllocator for FixedOffsetAllocator {
    fn allocate(&mut self, page: u64) -> u64 {
        page + self.offset
    }
}
