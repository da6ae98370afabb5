//! 软件 TLB (Translation Lookaside Buffer)
//!
//! 固定容量的页号 -> 帧号缓存，FIFO 替换。查找不刷新新近度
//! （FIFO 而非 LRU）。重复插入已缓存的页号会在插入顺序记录中
//! 追加重复项，与参考实现一致；驱逐时跳过失效记录，保证容量上界。

use std::collections::{HashMap, VecDeque};

use log::trace;
use serde::Serialize;

/// TLB 条目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TlbEntry {
    /// 页号
    pub page: u64,
    /// 帧号
    pub frame: u64,
}

/// 固定容量的 FIFO TLB 缓存
#[derive(Debug)]
pub struct TlbCache {
    /// 当前活跃条目
    entries: HashMap<u64, TlbEntry>,
    /// 插入顺序记录，队首为最早插入（驱逐候选），可能含重复页号
    fifo: VecDeque<u64>,
    /// 容量，构造后不变
    capacity: usize,
}

impl TlbCache {
    /// 创建指定容量的 TLB；容量必须为正（引擎配置负责校验）
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            entries: HashMap::with_capacity(capacity),
            fifo: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// 查找页号对应的帧号（纯读取，不改变驱逐顺序）
    pub fn lookup(&self, page: u64) -> Option<u64> {
        self.entries.get(&page).map(|entry| entry.frame)
    }

    /// 插入映射，必要时先按 FIFO 驱逐最早插入的条目。
    ///
    /// 返回被驱逐的页号（如有）。失效的顺序记录（对应条目已被更早的
    /// 驱逐移除）不计为驱逐，继续尝试下一条记录。已缓存页号的重复
    /// 插入同样在记录尾部追加一项。
    pub fn insert(&mut self, page: u64, frame: u64) -> Option<u64> {
        let mut evicted = None;
        while self.entries.len() >= self.capacity {
            let Some(victim) = self.fifo.pop_front() else {
                break;
            };
            if self.entries.remove(&victim).is_some() {
                trace!("TLB evict: page {victim} (FIFO)");
                evicted = Some(victim);
            }
        }
        self.entries.insert(page, TlbEntry { page, frame });
        self.fifo.push_back(page);
        evicted
    }

    /// 页号是否在缓存中
    pub fn contains(&self, page: u64) -> bool {
        self.entries.contains_key(&page)
    }

    /// 当前活跃条目数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 缓存是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 配置的容量
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 遍历当前条目（顺序不确定）
    pub fn entries(&self) -> impl Iterator<Item = TlbEntry> + '_ {
        self.entries.values().copied()
    }

    /// 按页号排序的快照，用于稳定的显示输出
    pub fn sorted_entries(&self) -> Vec<TlbEntry> {
        let mut entries: Vec<_> = self.entries().collect();
        entries.sort_unstable_by_key(|entry| entry.page);
        entries
    }

    /// 插入顺序记录（含重复项），仅用于显示/调试
    pub fn fifo_order(&self) -> impl Iterator<Item = u64> + '_ {
        self.fifo.iter().copied()
    }
}
