//! Capability contract for objects that can trade rendering cost for detail.

/// Value reported by an object that cannot be reduced any further.
///
/// Ranks last in the decrement ordering (which prefers the lowest current
/// value), so an un-shrinkable object sinks in the decrement heap and the
/// shrink phase only ends once every candidate reports it.
pub const AT_MIN_LOD: f32 = f32::MAX;

/// Post-increment value reported by an object already at its highest level.
///
/// Ranks last in the increment ordering (which prefers the highest marginal
/// value), so a maxed object never wins an increment slot and the grow phase
/// ends once every candidate reports it.
pub const AT_MAX_LOD: f32 = f32::MIN;

/// Upper sanity bound on a single object's reported cost. A cost at or above
/// this indicates corrupt content data, not a legitimately expensive object.
pub const MAX_OBJECT_COST: f32 = 1.0e6;

/// An object with several discrete detail representations that the
/// [`LodOptimizer`](crate::LodOptimizer) may move between.
///
/// The contract is exactly five operations. `cost`/`value` describe the
/// object at its *current* level; `post_increment_value` ranks the object
/// as an increment candidate without mutating it. The optimizer never calls
/// `increment` on an object whose `post_increment_value` is [`AT_MAX_LOD`],
/// nor `decrement` on one whose `value` is [`AT_MIN_LOD`], but both must
/// still be no-ops at their respective extremes.
pub trait LodObject {
    /// Cost of rendering the object at its current level. Must lie in
    /// `[0, MAX_OBJECT_COST)`.
    fn cost(&self) -> f32;

    /// Benefit of rendering at the current level, or [`AT_MIN_LOD`] when the
    /// object is already at its lowest admissible level.
    fn value(&self) -> f32;

    /// The value the object would report immediately after one `increment`,
    /// or [`AT_MAX_LOD`] when it is already at its highest level.
    fn post_increment_value(&self) -> f32;

    /// Raise detail one level, refreshing reported cost and value.
    fn increment(&mut self);

    /// Lower detail one level, refreshing reported cost and value.
    fn decrement(&mut self);
}
