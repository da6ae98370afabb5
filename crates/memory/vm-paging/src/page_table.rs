//! 页表实现
//!
//! 无界的页号 -> 帧号映射，TLB 未命中后的权威（慢速）翻译来源。
//! 页表项在首次缺页时创建，之后不再删除。

use rustc_hash::FxHashMap;

/// 页表：页号到帧号的无界映射
#[derive(Debug, Default)]
pub struct PageTable {
    entries: FxHashMap<u64, u64>,
}

impl PageTable {
    /// 创建空页表
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// 查找页号对应的帧号（纯读取，无副作用）
    pub fn lookup(&self, page: u64) -> Option<u64> {
        self.entries.get(&page).copied()
    }

    /// 插入页表项；对已存在的页号无条件覆盖
    pub fn insert(&mut self, page: u64, frame: u64) {
        self.entries.insert(page, frame);
    }

    /// 页号是否已有映射
    pub fn contains(&self, page: u64) -> bool {
        self.entries.contains_key(&page)
    }

    /// 当前条目数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 页表是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 遍历页表项（顺序不确定）
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.entries.iter().map(|(&page, &frame)| (page, frame))
    }

    /// 按页号排序的快照，用于稳定的显示输出
    pub fn sorted_entries(&self) -> Vec<(u64, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by_key(|&(page, _)| page);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_missing_page() {
        let table = PageTable::new();
        assert_eq!(table.lookup(0), None);
        assert!(table.is_empty());
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut table = PageTable::new();
        table.insert(3, 7);
        assert_eq!(table.lookup(3), Some(7));
        assert!(table.contains(3));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut table = PageTable::new();
        table.insert(3, 7);
        table.insert(3, 9);
        assert_eq!(table.lookup(3), Some(9));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_sorted_entries() {
        let mut table = PageTable::new();
        table.insert(9, 13);
        table.insert(1, 5);
        table.insert(4, 8);
        assert_eq!(table.sorted_entries(), vec![(1, 5), (4, 8), (9, 13)]);
    }
}
