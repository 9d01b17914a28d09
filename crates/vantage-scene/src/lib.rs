//! Scene-side LOD model: per-level cost/value computation for hierarchical
//! multi-detail objects, plus screen-area projection helpers.

mod model;
mod projection;


pub use model::{LodLevel, LodModel};
pub use projection::projected_screen_area;
