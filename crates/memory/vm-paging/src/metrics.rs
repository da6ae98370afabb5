//! 翻译统计与指标报告
//!
//! 由计数器导出命中/未命中比率与有效内存访问时间（EMAT）。

use std::fmt;

use serde::Serialize;

use crate::{MEM_ACCESS_NS, TLB_ACCESS_NS};

/// 翻译计数器，由引擎实例独占持有（无进程级全局状态）
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TranslationStats {
    /// TLB 命中数
    pub tlb_hits: u64,
    /// TLB 未命中数
    pub tlb_misses: u64,
    /// 页表命中数（TLB 未命中后）
    pub page_table_hits: u64,
    /// 页表未命中数（缺页）
    pub page_table_misses: u64,
    /// 总访问数
    pub total_accesses: u64,
}

impl TranslationStats {
    /// 由计数器导出指标报告。
    ///
    /// `total_accesses == 0` 时所有比率与 EMAT 定义为 0.0，
    /// 避免未定义的除零结果。
    pub fn report(&self) -> MetricsReport {
        if self.total_accesses == 0 {
            return MetricsReport {
                stats: *self,
                tlb_hit_ratio: 0.0,
                tlb_miss_ratio: 0.0,
                page_table_hit_ratio: 0.0,
                page_table_miss_ratio: 0.0,
                emat_ns: 0.0,
            };
        }
        let total = self.total_accesses as f64;
        let tlb_hit_ratio = self.tlb_hits as f64 / total;
        let tlb_miss_ratio = self.tlb_misses as f64 / total;
        // EMAT：命中付出 TLB + 一次内存访问，未命中付出 TLB + 两次内存访问
        let emat_ns = tlb_hit_ratio * (TLB_ACCESS_NS + MEM_ACCESS_NS) as f64
            + tlb_miss_ratio * (TLB_ACCESS_NS + 2 * MEM_ACCESS_NS) as f64;
        MetricsReport {
            stats: *self,
            tlb_hit_ratio,
            tlb_miss_ratio,
            page_table_hit_ratio: self.page_table_hits as f64 / total,
            page_table_miss_ratio: self.page_table_misses as f64 / total,
            emat_ns,
        }
    }
}

/// 指标报告：四个比率加 EMAT
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsReport {
    /// 原始计数器
    pub stats: TranslationStats,
    pub tlb_hit_ratio: f64,
    pub tlb_miss_ratio: f64,
    pub page_table_hit_ratio: f64,
    pub page_table_miss_ratio: f64,
    /// 有效内存访问时间（纳秒）
    pub emat_ns: f64,
}

impl fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TLB Hits: {}", self.stats.tlb_hits)?;
        writeln!(f, "TLB Misses: {}", self.stats.tlb_misses)?;
        writeln!(f, "Page Table Hits: {}", self.stats.page_table_hits)?;
        writeln!(f, "Page Table Misses: {}", self.stats.page_table_misses)?;
        writeln!(f, "TLB Hit Ratio: {:.6}", self.tlb_hit_ratio)?;
        writeln!(f, "TLB Miss Ratio: {:.6}", self.tlb_miss_ratio)?;
        writeln!(f, "Page Table Hit Ratio: {:.6}", self.page_table_hit_ratio)?;
        writeln!(f, "Page Table Miss Ratio: {:.6}", self.page_table_miss_ratio)?;
        writeln!(f, "----------------------------------------")?;
        writeln!(
            f,
            "Effective Memory Access Time (EMAT): {:.3} ns",
            self.emat_ns
        )
    }
}
