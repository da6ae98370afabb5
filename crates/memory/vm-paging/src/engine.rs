//! 地址翻译引擎
//!
//! 单次翻译的编排：先查 TLB，未命中回退页表，缺页时按需分配帧，
//! 更新两级结构并维护计数器。引擎实例独占持有全部状态。

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::frame_alloc::{FixedOffsetAllocator, FrameAllocator};
use crate::metrics::{MetricsReport, TranslationStats};
use crate::page_table::PageTable;
use crate::tlb::TlbCache;
use crate::{OFFSET_MASK, PAGE_SHIFT};

/// 默认 TLB 容量
pub const DEFAULT_TLB_CAPACITY: usize = 16;

/// 引擎配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// TLB 容量（正整数）
    pub tlb_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tlb_capacity: DEFAULT_TLB_CAPACITY,
        }
    }
}

/// 分页模拟器错误
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingError {
    #[error("invalid TLB capacity: {0} (must be positive)")]
    InvalidTlbCapacity(usize),
}

/// 单次翻译在各级结构上的结果分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TranslationLevel {
    /// TLB 命中
    TlbHit,
    /// TLB 未命中，页表命中
    PageTableHit,
    /// 两级都未命中（缺页）
    PageFault,
}

/// 结构化的翻译结果记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TranslationOutcome {
    /// 输入的虚拟地址
    pub virtual_address: u64,
    /// 页号（`virtual_address / PAGE_SIZE`）
    pub page: u64,
    /// 页内偏移（`virtual_address % PAGE_SIZE`）
    pub offset: u64,
    /// 解析出的帧号
    pub frame: u64,
    /// 物理地址（`frame * PAGE_SIZE + offset`）
    pub physical_address: u64,
    /// 命中级别
    pub level: TranslationLevel,
    /// 本次 TLB 插入导致被驱逐的页号（如有）
    pub evicted_page: Option<u64>,
}

/// 翻译引擎：持有页表、TLB、帧分配策略与计数器
pub struct TranslationEngine<A = FixedOffsetAllocator> {
    page_table: PageTable,
    tlb: TlbCache,
    allocator: A,
    stats: TranslationStats,
}

impl TranslationEngine<FixedOffsetAllocator> {
    /// 用给定配置和参考分配策略（`frame = page + 4`）构造引擎
    pub fn new(config: EngineConfig) -> Result<Self, PagingError> {
        Self::with_allocator(config, FixedOffsetAllocator::default())
    }

    /// 指定 TLB 容量的便捷构造
    pub fn with_capacity(tlb_capacity: usize) -> Result<Self, PagingError> {
        Self::new(EngineConfig { tlb_capacity })
    }
}

impl<A: FrameAllocator> TranslationEngine<A> {
    /// 使用自定义帧分配策略构造引擎
    pub fn with_allocator(config: EngineConfig, allocator: A) -> Result<Self, PagingError> {
        if config.tlb_capacity == 0 {
            return Err(PagingError::InvalidTlbCapacity(0));
        }
        Ok(Self {
            page_table: PageTable::new(),
            tlb: TlbCache::new(config.tlb_capacity),
            allocator,
            stats: TranslationStats::default(),
        })
    }

    /// 翻译一个虚拟地址，返回结构化结果记录。
    ///
    /// 任何地址都被接受，不做越界检查（参考实现的既有限制）。
    /// 物理地址与页号/偏移一样按移位方式组合，对极大地址按
    /// 64 位环绕，不会因算术溢出而 panic。
    pub fn translate(&mut self, virtual_address: u64) -> TranslationOutcome {
        self.stats.total_accesses += 1;
        let page = virtual_address >> PAGE_SHIFT;
        let offset = virtual_address & OFFSET_MASK;

        let (frame, level, evicted_page) = if let Some(frame) = self.tlb.lookup(page) {
            self.stats.tlb_hits += 1;
            (frame, TranslationLevel::TlbHit, None)
        } else {
            self.stats.tlb_misses += 1;
            match self.page_table.lookup(page) {
                Some(frame) => {
                    self.stats.page_table_hits += 1;
                    let evicted = self.tlb.insert(page, frame);
                    (frame, TranslationLevel::PageTableHit, evicted)
                }
                None => {
                    self.stats.page_table_misses += 1;
                    let frame = self.allocator.allocate(page);
                    trace!("page fault: page {page} -> new frame {frame}");
                    self.page_table.insert(page, frame);
                    let evicted = self.tlb.insert(page, frame);
                    (frame, TranslationLevel::PageFault, evicted)
                }
            }
        };

        let physical_address = (frame << PAGE_SHIFT) | offset;
        debug!("VA {virtual_address:#x}: {level:?} -> PA {physical_address:#x}");
        TranslationOutcome {
            virtual_address,
            page,
            offset,
            frame,
            physical_address,
            level,
            evicted_page,
        }
    }

    /// 页表只读访问（显示/调试用，无副作用）
    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    /// TLB 只读访问（显示/调试用，无副作用）
    pub fn tlb(&self) -> &TlbCache {
        &self.tlb
    }

    /// 当前计数器快照
    pub fn stats(&self) -> TranslationStats {
        self.stats
    }

    /// 由当前计数器导出指标报告
    pub fn report(&self) -> MetricsReport {
        self.stats.report()
    }
}
