//! Greedy per-frame LOD optimization against a frame cost budget.

use tracing::trace;

use crate::heap::LodHeap;
use crate::object::{AT_MAX_LOD, AT_MIN_LOD, LodObject, MAX_OBJECT_COST};

/// Per-pass LOD optimizer.
///
/// Construct one before scene traversal, register every visible multi-LOD
/// object with [`add_object`](Self::add_object) (and fixed costs for
/// non-adaptive objects with [`add_cost`](Self::add_cost)), then run
/// [`optimize`](Self::optimize) once against the frame budget. The optimizer
/// borrows the registered objects for the duration of the pass and never owns
/// them; [`optimize`](Self::optimize) releases all registrations when it
/// returns.
///
/// Not reentrant: a pass mutates registered objects in place and must run on
/// the single update thread that owns the scene.
pub struct LodOptimizer<'scene> {
    objects: Vec<&'scene mut dyn LodObject>,
    total_cost: f32,
    dec_heap: LodHeap,
    inc_heap: LodHeap,
}

impl<'scene> LodOptimizer<'scene> {
    /// Create an optimizer with no registered objects.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an optimizer sized for an expected candidate count, so a frame
    /// with that many registrations performs no mid-pass reallocation.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: Vec::with_capacity(capacity),
            total_cost: 0.0,
            dec_heap: LodHeap::with_capacity(capacity),
            inc_heap: LodHeap::with_capacity(capacity),
        }
    }

    /// Register an object for this pass and charge its current cost against
    /// the running total.
    pub fn add_object(&mut self, object: &'scene mut dyn LodObject) {
        let cost = object.cost();
        debug_assert!(
            (0.0..MAX_OBJECT_COST).contains(&cost),
            "object cost {cost} outside [0, {MAX_OBJECT_COST}); corrupt content data"
        );
        self.total_cost += cost;
        self.objects.push(object);
    }

    /// Charge a fixed cost for an object that does not participate in LOD
    /// reshuffling (e.g. single-level geometry) but still consumes budget.
    pub fn add_cost(&mut self, cost: f32) {
        debug_assert!(
            (0.0..MAX_OBJECT_COST).contains(&cost),
            "fixed cost {cost} outside [0, {MAX_OBJECT_COST}); corrupt content data"
        );
        self.total_cost += cost;
    }

    /// Running total of all registered costs.
    pub fn total_cost(&self) -> f32 {
        self.total_cost
    }

    /// Number of objects registered for this pass.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Run one optimization pass against `max_cost`, mutating registered
    /// objects' LOD levels in place, and return the final total cost.
    ///
    /// Grows the best increment candidate while under budget, shrinks the
    /// worst decrement candidate while over budget, and terminates when
    /// every object is maxed, the shrink floor is reached, or a single
    /// object starts oscillating between grow and shrink. All registrations
    /// are released before returning.
    pub fn optimize(&mut self, max_cost: f32) -> f32 {
        if self.objects.is_empty() {
            let total = self.total_cost;
            self.clear();
            return total;
        }

        // Decrement heap: min-heap on current value, root = lowest-value
        // object; floor-sitting objects report AT_MIN_LOD (f32::MAX) and
        // sink. Increment heap: min-heap on negated post-increment value,
        // root = highest-marginal-value object; maxed objects sink the same
        // way.
        self.dec_heap.rebuild(self.objects.iter().map(|o| o.value()));
        self.inc_heap
            .rebuild(self.objects.iter().map(|o| -o.post_increment_value()));

        let mut last_grown: Option<u32> = None;
        let mut grows = 0u32;
        let mut shrinks = 0u32;

        loop {
            if self.total_cost <= max_cost {
                let (key, index) = self.inc_heap.top();
                if key == -AT_MAX_LOD {
                    // Even the best increment candidate is already maxed.
                    break;
                }
                let object = &mut self.objects[index as usize];
                let old_cost = object.cost();
                object.increment();
                self.total_cost += object.cost() - old_cost;
                let new_inc_key = -object.post_increment_value();
                let new_dec_key = object.value();
                self.inc_heap.change_key_top(new_inc_key);
                self.dec_heap.change_key(index, new_dec_key);
                last_grown = Some(index);
                grows += 1;
                continue;
            }

            let (key, index) = self.dec_heap.top();
            if key == AT_MIN_LOD {
                // Every object is already at its floor; the pass ends over
                // budget at the achievable minimum.
                break;
            }
            let object = &mut self.objects[index as usize];
            let old_cost = object.cost();
            object.decrement();
            self.total_cost += object.cost() - old_cost;
            let new_dec_key = object.value();
            let new_inc_key = -object.post_increment_value();
            self.dec_heap.change_key_top(new_dec_key);
            self.inc_heap.change_key(index, new_inc_key);
            shrinks += 1;
            if last_grown == Some(index) {
                // Shrinking what the previous grow step just grew means the
                // budget sits exactly on this object's transition boundary.
                break;
            }
        }

        let total = self.total_cost;
        trace!(
            objects = self.objects.len(),
            grows,
            shrinks,
            total_cost = total,
            max_cost,
            "LOD pass complete"
        );
        self.clear();
        total
    }

    /// Release every registration and reset the cost accounting. Registered
    /// objects themselves are untouched; only the optimizer's transient
    /// borrows are dropped.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.total_cost = 0.0;
    }
}

impl Default for LodOptimizer<'_> {
    fn default() -> Self {
        Self::new()
    }
}
