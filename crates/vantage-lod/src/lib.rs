//! Predictive level-of-detail optimization: per-frame, budget-constrained
//! selection of a discrete quality level for every registered object.
//!
//! Each frame the scene traversal registers every visible multi-LOD object
//! with a [`LodOptimizer`], which then greedily grows the object with the
//! highest marginal value while the frame's cost budget allows, and greedily
//! shrinks the object with the lowest current value while over budget
//! (the Funkhouser-Sequin adaptive-display algorithm).

mod heap;
mod object;
mod optimizer;

pub use object::{AT_MAX_LOD, AT_MIN_LOD, LodObject, MAX_OBJECT_COST};
pub use optimizer::LodOptimizer;
