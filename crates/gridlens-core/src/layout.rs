//! Locked ("sticky") column layout.
//!
//! Locked columns are pinned to the left edge during horizontal scrolling and
//! stack in ascending index order, one slot each, regardless of the order in
//! which they were locked.

use indexmap::IndexSet;

/// Default slot width for a locked column, in terminal cells.
pub const DEFAULT_SLOT_WIDTH: u32 = 20;

/// Widest slot accepted from configuration.
pub const MAX_SLOT_WIDTH: u32 = 200;

/// Insertion-ordered set of locked column indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockedColumns {
    indices: IndexSet<usize>,
}

impl LockedColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock an unlocked column or unlock a locked one. Returns the new state.
    ///
    /// Locking is O(1); unlocking is O(n) since removal keeps insertion order.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.indices.shift_remove(&index) {
            false
        } else {
            self.indices.insert(index);
            true
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Indices in the order they were locked.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Indices in ascending order, i.e. left-to-right stacking order.
    pub fn sorted(&self) -> Vec<usize> {
        let mut sorted: Vec<usize> = self.iter().collect();
        sorted.sort_unstable();
        sorted
    }

    /// Offset of every locked column for one render pass, left to right.
    pub fn offsets(&self, slot_width: u32) -> Vec<(usize, u32)> {
        self.sorted()
            .into_iter()
            .enumerate()
            .map(|(slot, index)| (index, slot_width.saturating_mul(slot as u32)))
            .collect()
    }

    /// Drop indices that fall outside a column list of `column_count` columns.
    pub fn retain_valid(&mut self, column_count: usize) {
        self.indices.retain(|&i| i < column_count);
    }
}

/// Horizontal offset of a locked column, `None` for unlocked columns.
///
/// `slot_width × (number of locked columns with a smaller index)`, saturating
/// at `u32::MAX`.
pub fn offset_for(column_index: usize, locked: &LockedColumns, slot_width: u32) -> Option<u32> {
    if !locked.contains(column_index) {
        return None;
    }
    let before = locked.iter().filter(|&i| i < column_index).count() as u32;
    Some(slot_width.saturating_mul(before))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locked(indices: &[usize]) -> LockedColumns {
        let mut set = LockedColumns::new();
        for &i in indices {
            set.toggle(i);
        }
        set
    }

    #[test]
    fn test_unlocked_column_has_no_offset() {
        let set = locked(&[0, 3]);
        assert_eq!(offset_for(1, &set, 200), None);
        assert_eq!(offset_for(0, &set, 200), Some(0));
        assert_eq!(offset_for(3, &set, 200), Some(200));
    }

    #[test]
    fn test_locking_order_does_not_matter() {
        let forward = locked(&[2, 5, 7]);
        let backward = locked(&[7, 5, 2]);
        for i in 0..10 {
            assert_eq!(offset_for(i, &forward, 20), offset_for(i, &backward, 20));
        }
        assert_eq!(forward.offsets(20), backward.offsets(20));
        assert_eq!(forward.offsets(20), vec![(2, 0), (5, 20), (7, 40)]);
    }

    #[test]
    fn test_offsets_monotonic() {
        let set = locked(&[9, 1, 4, 6, 0]);
        let offsets: Vec<u32> = (0..12).filter_map(|i| offset_for(i, &set, 15)).collect();
        assert_eq!(offsets.len(), 5);
        assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_toggle_keeps_insertion_order() {
        let mut set = locked(&[4, 1, 3]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![4, 1, 3]);
        assert!(!set.toggle(1));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![4, 3]);
        assert!(set.toggle(1));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![4, 3, 1]);
        assert_eq!(set.sorted(), vec![1, 3, 4]);
    }

    #[test]
    fn test_huge_slot_width_saturates() {
        let set = locked(&[0, 1, 2]);
        assert_eq!(offset_for(2, &set, 3_000_000_000), Some(u32::MAX));
        assert_eq!(
            set.offsets(3_000_000_000),
            vec![(0, 0), (1, 3_000_000_000), (2, u32::MAX)]
        );
    }

    #[test]
    fn test_retain_valid() {
        let mut set = locked(&[0, 5, 2]);
        set.retain_valid(3);
        assert_eq!(set.sorted(), vec![0, 2]);
    }
}
