//! vm-paging: 分页地址翻译模拟器
//!
//! TLB 缓存（FIFO 替换）+ 页表 + 按需帧分配的教学模拟器，
//! 维护命中/未命中计数并计算有效内存访问时间（EMAT）。

pub mod engine;
pub mod frame_alloc;
pub mod metrics;
pub mod page_table;
pub mod tlb;

pub use engine::{
    EngineConfig, PagingError, TranslationEngine, TranslationLevel, TranslationOutcome,
    DEFAULT_TLB_CAPACITY,
};
pub use frame_alloc::{FixedOffsetAllocator, FrameAllocator, DEFAULT_FRAME_OFFSET};
pub use metrics::{MetricsReport, TranslationStats};
pub use page_table::PageTable;
pub use tlb::{TlbCache, TlbEntry};

// ============================================================================
// 常量
// ============================================================================

/// 页大小：4KB
pub const PAGE_SIZE: u64 = 4096;
/// 页偏移位数
pub const PAGE_SHIFT: u64 = 12;
/// 页内偏移掩码
pub const OFFSET_MASK: u64 = PAGE_SIZE - 1;
/// TLB 访问时间（纳秒）
pub const TLB_ACCESS_NS: u64 = 10;
/// 内存访问时间（纳秒）
pub const MEM_ACCESS_NS: u64 = 100;
