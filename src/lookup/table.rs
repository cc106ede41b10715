//! Open-addressing vertex lookup table.
//!
//! # Algorithm
//!
//! Keys hash to `id % capacity`; collisions probe linearly to the next slot.
//! Removed entries leave a tombstone so probe chains stay intact. The table
//! keeps at most half of its slots in use (live entries plus tombstones),
//! which guarantees an empty slot ends every probe sequence. Crossing that
//! load factor rehashes into a larger table and drops the tombstones.
//!
//! # Complexity
//!
//! O(1) amortized insert, resolve, and remove.

use crate::models::VertexIndex;

const MIN_CAPACITY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Slot {
    Empty,
    Tombstone,
    Occupied { id: usize, index: VertexIndex },
}

/// Maps external vertex ids to arena indices.
///
/// # Examples
///
/// ```
/// use u_tsp::lookup::VertexTable;
///
/// let mut table = VertexTable::with_capacity(4);
/// table.insert(17, 0);
/// table.insert(3, 1);
/// assert_eq!(table.resolve(17), Some(0));
/// assert_eq!(table.resolve(99), None);
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct VertexTable {
    slots: Vec<Slot>,
    len: usize,
    tombstones: usize,
}

impl VertexTable {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a table sized for `expected` vertices (twice as many slots).
    pub fn with_capacity(expected: usize) -> Self {
        let capacity = (expected * 2).max(MIN_CAPACITY);
        Self {
            slots: vec![Slot::Empty; capacity],
            len: 0,
            tombstones: 0,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn home(&self, id: usize) -> usize {
        id % self.slots.len()
    }

    /// Inserts or replaces the mapping for `id`, returning the previous index.
    pub fn insert(&mut self, id: usize, index: VertexIndex) -> Option<VertexIndex> {
        if (self.len + self.tombstones + 1) * 2 > self.slots.len() {
            self.rehash((self.len + 1) * 4);
        }

        let capacity = self.slots.len();
        let mut pos = self.home(id);
        let mut first_tombstone = None;

        for _ in 0..capacity {
            match self.slots[pos] {
                Slot::Empty => {
                    let target = match first_tombstone {
                        Some(t) => {
                            self.tombstones -= 1;
                            t
                        }
                        None => pos,
                    };
                    self.slots[target] = Slot::Occupied { id, index };
                    self.len += 1;
                    return None;
                }
                Slot::Tombstone => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(pos);
                    }
                }
                Slot::Occupied { id: existing, index: old } if existing == id => {
                    self.slots[pos] = Slot::Occupied { id, index };
                    return Some(old);
                }
                Slot::Occupied { .. } => {}
            }
            pos = (pos + 1) % capacity;
        }

        // Only reachable when every free slot is a tombstone.
        if let Some(target) = first_tombstone {
            self.slots[target] = Slot::Occupied { id, index };
            self.tombstones -= 1;
            self.len += 1;
            return None;
        }
        self.rehash((self.len + 1) * 4);
        self.insert(id, index)
    }

    /// Resolves `id` to its arena index, or `None` if it was never inserted.
    pub fn resolve(&self, id: usize) -> Option<VertexIndex> {
        self.find_slot(id).and_then(|pos| match self.slots[pos] {
            Slot::Occupied { index, .. } => Some(index),
            _ => None,
        })
    }

    /// Returns `true` if `id` is present.
    pub fn contains(&self, id: usize) -> bool {
        self.find_slot(id).is_some()
    }

    /// Removes `id`, leaving a tombstone. Returns the removed index.
    pub fn remove(&mut self, id: usize) -> Option<VertexIndex> {
        let pos = self.find_slot(id)?;
        let removed = match self.slots[pos] {
            Slot::Occupied { index, .. } => index,
            _ => return None,
        };
        self.slots[pos] = Slot::Tombstone;
        self.len -= 1;
        self.tombstones += 1;
        Some(removed)
    }

    /// Iterates over live `(id, index)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, VertexIndex)> + '_ {
        self.slots.iter().filter_map(|slot| match *slot {
            Slot::Occupied { id, index } => Some((id, index)),
            _ => None,
        })
    }

    fn find_slot(&self, id: usize) -> Option<usize> {
        let capacity = self.slots.len();
        let mut pos = self.home(id);
        for _ in 0..capacity {
            match self.slots[pos] {
                Slot::Empty => return None,
                Slot::Occupied { id: existing, .. } if existing == id => return Some(pos),
                _ => {}
            }
            pos = (pos + 1) % capacity;
        }
        None
    }

    fn rehash(&mut self, min_capacity: usize) {
        let capacity = min_capacity.max(MIN_CAPACITY);
        let old = std::mem::replace(&mut self.slots, vec![Slot::Empty; capacity]);
        self.len = 0;
        self.tombstones = 0;
        for slot in old {
            if let Slot::Occupied { id, index } = slot {
                let mut pos = self.home(id);
                while self.slots[pos] != Slot::Empty {
                    pos = (pos + 1) % capacity;
                }
                self.slots[pos] = Slot::Occupied { id, index };
                self.len += 1;
            }
        }
    }
}

impl Default for VertexTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    #[test]
    fn test_resolve_missing() {
        let table = VertexTable::new();
        assert_eq!(table.resolve(0), None);
        assert!(table.is_empty());
    }

    #[test]
    fn test_insert_and_resolve() {
        let mut table = VertexTable::with_capacity(5);
        assert_eq!(table.capacity(), 10);
        for id in 0..5 {
            assert_eq!(table.insert(id, id * 10), None);
        }
        for id in 0..5 {
            assert_eq!(table.resolve(id), Some(id * 10));
        }
        assert_eq!(table.resolve(5), None);
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_insert_replaces() {
        let mut table = VertexTable::new();
        table.insert(7, 1);
        assert_eq!(table.insert(7, 2), Some(1));
        assert_eq!(table.resolve(7), Some(2));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_colliding_ids_probe_linearly() {
        let mut table = VertexTable::with_capacity(4); // 8 slots
        table.insert(1, 100);
        table.insert(9, 101);
        table.insert(17, 102);
        assert_eq!(table.resolve(1), Some(100));
        assert_eq!(table.resolve(9), Some(101));
        assert_eq!(table.resolve(17), Some(102));
        assert_eq!(table.resolve(25), None);
    }

    #[test]
    fn test_remove_keeps_probe_chain() {
        let mut table = VertexTable::with_capacity(4);
        table.insert(1, 100);
        table.insert(9, 101);
        table.insert(17, 102);
        assert_eq!(table.remove(9), Some(101));
        assert_eq!(table.resolve(9), None);
        // 17 sits behind the tombstone and must still be found
        assert_eq!(table.resolve(17), Some(102));
        assert_eq!(table.len(), 2);
        assert_eq!(table.remove(9), None);
    }

    #[test]
    fn test_reinsert_after_remove() {
        let mut table = VertexTable::with_capacity(4);
        table.insert(1, 100);
        table.insert(9, 101);
        table.remove(1);
        table.insert(1, 200);
        assert_eq!(table.resolve(1), Some(200));
        assert_eq!(table.resolve(9), Some(101));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_grows_past_initial_capacity() {
        let mut table = VertexTable::with_capacity(2);
        for id in 0..1000 {
            table.insert(id * 7, id);
        }
        assert_eq!(table.len(), 1000);
        assert!(table.capacity() >= 2000);
        for id in 0..1000 {
            assert_eq!(table.resolve(id * 7), Some(id));
        }
    }

    #[test]
    fn test_iter_returns_live_entries() {
        let mut table = VertexTable::new();
        table.insert(3, 0);
        table.insert(4, 1);
        table.insert(5, 2);
        table.remove(4);
        let mut entries: Vec<_> = table.iter().collect();
        entries.sort();
        assert_eq!(entries, vec![(3, 0), (5, 2)]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(usize, usize),
        Remove(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..64, 0usize..1000).prop_map(|(id, idx)| Op::Insert(id, idx)),
            (0usize..64).prop_map(Op::Remove),
        ]
    }

    proptest! {
        /// Property: the table behaves like a map under any insert/remove sequence.
        #[test]
        fn prop_matches_hashmap(ops in proptest::collection::vec(op_strategy(), 0..200)) {
            let mut table = VertexTable::with_capacity(4);
            let mut model = HashMap::new();
            for op in ops {
                match op {
                    Op::Insert(id, idx) => {
                        prop_assert_eq!(table.insert(id, idx), model.insert(id, idx));
                    }
                    Op::Remove(id) => {
                        prop_assert_eq!(table.remove(id), model.remove(&id));
                    }
                }
                prop_assert_eq!(table.len(), model.len());
            }
            for id in 0..64 {
                prop_assert_eq!(table.resolve(id), model.get(&id).copied());
            }
        }
    }
}
