//! Array-backed binary min-heap used to rank LOD increment/decrement candidates.
//!
//! The optimizer builds two of these over the same registered-object set each
//! pass: one keyed by current value (root = best decrement candidate) and one
//! keyed by negated post-increment value (root = best increment candidate).
//! Payloads are indices into the optimizer's registration vector, never
//! references to the objects themselves.

/// One heap slot: a sort key and the registration index it ranks.
#[derive(Clone, Copy, Debug)]
struct HeapEntry {
    key: f32,
    object: u32,
}

/// A 1-indexed complete-binary-tree min-heap over `f32` keys.
///
/// Supports exactly the operations the optimizer needs: O(n) bottom-up
/// construction, O(1) peek, O(log n) re-key of the root, and O(n) re-key of
/// an arbitrary object (linear slot scan plus a sift). Arbitrary deletion is
/// never required since the algorithm only consumes from the root. Ties
/// break by sift order.
pub(crate) struct LodHeap {
    /// Slot 0 is an unused placeholder so parent/child arithmetic stays
    /// `slot / 2` and `slot * 2`.
    entries: Vec<HeapEntry>,
}

impl LodHeap {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity + 1),
        }
    }

    /// Discard any previous contents and heapify `keys` bottom-up.
    /// The i-th key is tagged with registration index i.
    pub fn rebuild(&mut self, keys: impl Iterator<Item = f32>) {
        self.entries.clear();
        self.entries.push(HeapEntry {
            key: 0.0,
            object: u32::MAX,
        });
        for (i, key) in keys.enumerate() {
            self.entries.push(HeapEntry {
                key,
                object: i as u32,
            });
        }
        for slot in (1..=self.len() / 2).rev() {
            self.sift_down(slot);
        }
    }

    fn len(&self) -> usize {
        self.entries.len() - 1
    }

    /// Key and registration index of the root entry.
    pub fn top(&self) -> (f32, u32) {
        debug_assert!(self.len() > 0, "top() on an empty heap");
        let root = &self.entries[1];
        (root.key, root.object)
    }

    /// Re-key the root entry in place and restore heap order.
    pub fn change_key_top(&mut self, key: f32) {
        self.entries[1].key = key;
        self.sift_down(1);
    }

    /// Re-key the entry for `object`, sifting up or down depending on
    /// whether the key shrank or grew. Locating the slot is a linear scan.
    pub fn change_key(&mut self, object: u32, key: f32) {
        let slot = self
            .entries
            .iter()
            .position(|e| e.object == object)
            .expect("object not present in heap");
        let old = self.entries[slot].key;
        self.entries[slot].key = key;
        if key < old {
            self.sift_up(slot);
        } else {
            self.sift_down(slot);
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.len();
        loop {
            let left = slot * 2;
            if left > len {
                return;
            }
            let mut child = left;
            if left + 1 <= len && self.entries[left + 1].key < self.entries[left].key {
                child = left + 1;
            }
            if self.entries[child].key < self.entries[slot].key {
                self.entries.swap(slot, child);
                slot = child;
            } else {
                return;
            }
        }
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 1 {
            let parent = slot / 2;
            if self.entries[slot].key < self.entries[parent].key {
                self.entries.swap(slot, parent);
                slot = parent;
            } else {
                return;
            }
        }
    }
}
