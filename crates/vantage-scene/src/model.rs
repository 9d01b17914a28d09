//! Hierarchical multi-LOD model and its per-level cost/value computation.

use vantage_lod::{AT_MAX_LOD, AT_MIN_LOD, LodObject};

/// Floor applied to a level's fixed cost so the benefit-per-cost division
/// never sees zero. A zero-polygon level keeps this epsilon cost and a zero
/// benefit factor; see the note on [`LodModel::prepare_lod`].
const MIN_NON_PIXEL_COST: f32 = 1.0e-6;

/// Authoring-time description of one discrete detail level.
///
/// Levels are ordered coarsest first; higher indices carry more detail.
#[derive(Clone, Copy, Debug)]
pub struct LodLevel {
    /// Triangle count of this level's geometry.
    pub polygon_count: u32,
    /// Largest normalized projected size at which this level may still be
    /// the active representation. An object appearing larger than this is
    /// forbidden from using the level regardless of the cost budget.
    pub max_screen_size: f32,
    /// Cost per unit of covered screen area (fill-rate proxy). Zero for
    /// ordinary polygon-bound geometry.
    pub pixel_cost_per_area: f32,
}

impl LodLevel {
    /// A polygon-bound level with no per-pixel cost term.
    pub fn new(polygon_count: u32, max_screen_size: f32) -> Self {
        Self {
            polygon_count,
            max_screen_size,
            pixel_cost_per_area: 0.0,
        }
    }
}

/// Static per-level factors, recomputed only when geometry changes.
#[derive(Clone, Copy, Debug)]
struct LevelFactors {
    non_pixel_cost: f32,
    pixel_cost_per_area: f32,
    benefit_factor: f32,
    max_screen_size: f32,
}

impl LevelFactors {
    fn from_level(level: &LodLevel) -> Self {
        let polys = level.polygon_count as f32;
        let benefit_factor = if level.polygon_count == 0 {
            0.0
        } else {
            1.0 - 0.5 / (polys * polys)
        };
        Self {
            non_pixel_cost: polys.max(MIN_NON_PIXEL_COST),
            pixel_cost_per_area: level.pixel_cost_per_area,
            benefit_factor,
            max_screen_size: level.max_screen_size,
        }
    }
}

/// A scene object with several discrete detail representations, optionally
/// carrying attached sub-models that inherit its LOD bias.
///
/// Each frame the scene traversal calls [`prepare_lod`](Self::prepare_lod)
/// with the object's normalized projected size, which refreshes the
/// per-level cost and value arrays, then registers the model with the
/// optimizer. The optimizer drives the current level through the
/// [`LodObject`] contract; the renderer draws whatever
/// [`current_level`](Self::current_level) reports after the pass.
pub struct LodModel {
    name: String,
    factors: Vec<LevelFactors>,
    /// Per-level rendering cost for this frame's screen area.
    cost: Vec<f32>,
    /// Per-level value, with one extra slot so the post-increment lookup at
    /// the top level lands on `AT_MAX_LOD`.
    value: Vec<f32>,
    cur_lod: usize,
    /// Lowest admissible level at this frame's screen area.
    min_lod: usize,
    lod_bias: f32,
    /// Bumped on every level switch so containers can invalidate cached
    /// bounds and submeshes for the active representation.
    switch_serial: u64,
    attachments: Vec<LodModel>,
}

impl LodModel {
    /// Build a model from its level descriptions, coarsest level first.
    ///
    /// # Panics
    ///
    /// Panics if `levels` is empty.
    pub fn new(name: impl Into<String>, levels: &[LodLevel]) -> Self {
        assert!(!levels.is_empty(), "a LOD model needs at least one level");
        let factors: Vec<LevelFactors> = levels.iter().map(LevelFactors::from_level).collect();
        let count = factors.len();
        let mut model = Self {
            name: name.into(),
            factors,
            cost: vec![0.0; count],
            value: vec![0.0; count + 1],
            cur_lod: 0,
            min_lod: 0,
            lod_bias: 1.0,
            switch_serial: 0,
            attachments: Vec::new(),
        };
        model.prepare_lod(0.0);
        model
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level_count(&self) -> usize {
        self.factors.len()
    }

    /// Index of the currently active detail level.
    pub fn current_level(&self) -> usize {
        self.cur_lod
    }

    /// Lowest level the current screen-size clamp admits.
    pub fn min_level(&self) -> usize {
        self.min_lod
    }

    pub fn lod_bias(&self) -> f32 {
        self.lod_bias
    }

    /// Set the benefit bias and propagate it to every attached sub-model.
    /// Negative inputs clamp to zero (a zero bias disables growth entirely).
    pub fn set_lod_bias(&mut self, bias: f32) {
        let bias = bias.max(0.0);
        self.lod_bias = bias;
        for child in &mut self.attachments {
            child.set_lod_bias(bias);
        }
    }

    /// Attach a sub-model. The child inherits this model's current bias and
    /// any future bias changes.
    pub fn attach(&mut self, mut child: LodModel) {
        child.set_lod_bias(self.lod_bias);
        self.attachments.push(child);
    }

    pub fn attachments(&self) -> &[LodModel] {
        &self.attachments
    }

    pub fn attachments_mut(&mut self) -> &mut [LodModel] {
        &mut self.attachments
    }

    /// Serial number incremented on every level switch; containment
    /// structures compare it against a cached copy to detect representation
    /// changes.
    pub fn switch_serial(&self) -> u64 {
        self.switch_serial
    }

    /// Refresh the per-level cost/value arrays for this frame's normalized
    /// projected size and return the lowest admissible level.
    ///
    /// Costs are `non_pixel_cost + pixel_cost_per_area * screen_area`. The
    /// clamp walk disallows every level whose `max_screen_size` the object
    /// has outgrown, plus the first level that clears the clamp, so the
    /// minimum admissible level always reports `AT_MIN_LOD` and the shrink
    /// phase stops there. Levels above the floor score benefit-per-unit-cost
    /// scaled by screen area and bias. If the current level sits below the
    /// new floor it is forced up, independent of any cost budget.
    ///
    /// A zero-polygon level keeps an epsilon cost rather than being treated
    /// as unconditionally free; with its zero benefit factor it can never
    /// outscore real geometry.
    pub fn prepare_lod(&mut self, screen_area: f32) -> usize {
        let count = self.factors.len();
        for (i, factors) in self.factors.iter().enumerate() {
            self.cost[i] = factors.non_pixel_cost + factors.pixel_cost_per_area * screen_area;
        }

        let mut lod = 0;
        while lod + 1 < count && self.factors[lod].max_screen_size < screen_area {
            self.value[lod] = AT_MIN_LOD;
            lod += 1;
        }
        self.value[lod] = AT_MIN_LOD;
        self.min_lod = lod;

        for i in (self.min_lod + 1)..count {
            self.value[i] =
                self.factors[i].benefit_factor * screen_area * self.lod_bias / self.cost[i];
        }
        self.value[count] = AT_MAX_LOD;

        if self.cur_lod < self.min_lod {
            self.cur_lod = self.min_lod;
            self.switch_serial += 1;
        }
        self.min_lod
    }
}

impl LodObject for LodModel {
    fn cost(&self) -> f32 {
        self.cost[self.cur_lod]
    }

    fn value(&self) -> f32 {
        self.value[self.cur_lod]
    }

    fn post_increment_value(&self) -> f32 {
        self.value[self.cur_lod + 1]
    }

    fn increment(&mut self) {
        if self.cur_lod + 1 < self.factors.len() {
            self.cur_lod += 1;
            self.switch_serial += 1;
        }
    }

    fn decrement(&mut self) {
        // The clamp floor, not level 0, is the hard lower bound.
        if self.cur_lod > self.min_lod {
            self.cur_lod -= 1;
            self.switch_serial += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_level_model() -> LodModel {
        LodModel::new(
            "crate_3lod",
            &[
                LodLevel::new(50, 0.02),
                LodLevel::new(400, 0.15),
                LodLevel::new(2500, 1.0),
            ],
        )
    }

    /// At a tiny screen size only the coarsest level is clamped (the
    /// guaranteed floor); everything above scores a real value.
    #[test]
    fn test_small_object_keeps_coarse_floor() {
        let mut model = three_level_model();
        let min = model.prepare_lod(0.01);
        assert_eq!(min, 0);
        assert_eq!(model.value(), AT_MIN_LOD);
        assert!(model.post_increment_value() > 0.0);
    }

    /// A large on-screen object outgrows its coarse levels: the floor rises
    /// and the current level is forced up with it, budget notwithstanding.
    #[test]
    fn test_large_object_forced_off_coarse_levels() {
        let mut model = three_level_model();
        let min = model.prepare_lod(0.5);
        assert_eq!(min, 2);
        assert_eq!(model.current_level(), 2);
        assert_eq!(model.value(), AT_MIN_LOD);
        assert_eq!(model.post_increment_value(), AT_MAX_LOD);
    }

    /// The clamp floor grows monotonically with screen area: a shrinking
    /// object is never forced to a higher minimum than a larger one.
    #[test]
    fn test_clamp_floor_monotone_in_screen_area() {
        let mut model = three_level_model();
        let mut prev_min = 0;
        for area in [0.001, 0.01, 0.05, 0.1, 0.2, 0.5, 0.9] {
            let min = model.prepare_lod(area);
            assert!(
                min >= prev_min,
                "floor regressed from {prev_min} to {min} at area {area}"
            );
            prev_min = min;
        }
    }

    /// Costs track the per-level polygon counts, with the per-area term
    /// folded in when present.
    #[test]
    fn test_cost_model() {
        let mut model = LodModel::new(
            "billboard",
            &[LodLevel {
                polygon_count: 2,
                max_screen_size: 1.0,
                pixel_cost_per_area: 100.0,
            }],
        );
        model.prepare_lod(0.25);
        assert_eq!(model.cost(), 2.0 + 100.0 * 0.25);
    }

    /// A zero-polygon level keeps an epsilon cost and a zero benefit factor,
    /// so it never wins value comparisons against real geometry.
    #[test]
    fn test_zero_polygon_level_is_inert() {
        let mut model = LodModel::new(
            "null_lowest",
            &[LodLevel::new(0, 0.5), LodLevel::new(100, 1.0)],
        );
        model.prepare_lod(0.1);
        assert!(model.cost() > 0.0);
        assert!(model.cost() <= MIN_NON_PIXEL_COST);
        // Floor level reports the sentinel, and the real level above it
        // carries a positive value.
        assert_eq!(model.value(), AT_MIN_LOD);
        assert!(model.post_increment_value() > 0.0);
    }

    /// Value scales linearly with the bias knob.
    #[test]
    fn test_bias_scales_value() {
        let mut model = three_level_model();
        model.prepare_lod(0.1);
        model.increment();
        let baseline = model.value();
        assert!(baseline > 0.0);

        model.set_lod_bias(2.0);
        model.prepare_lod(0.1);
        assert!((model.value() - baseline * 2.0).abs() < 1.0e-6);
    }

    /// Bias propagates through the attachment hierarchy.
    #[test]
    fn test_bias_propagates_to_attachments() {
        let mut rig = three_level_model();
        let mut arm = three_level_model();
        arm.attach(three_level_model());
        rig.attach(arm);

        rig.set_lod_bias(0.5);
        assert_eq!(rig.attachments()[0].lod_bias(), 0.5);
        assert_eq!(rig.attachments()[0].attachments()[0].lod_bias(), 0.5);
    }

    /// Increment at the top and decrement at the floor are no-ops.
    #[test]
    fn test_idempotent_at_extremes() {
        let mut model = three_level_model();
        model.prepare_lod(0.1);
        assert_eq!(model.min_level(), 1);
        assert_eq!(model.current_level(), 1);

        let serial = model.switch_serial();
        model.decrement();
        assert_eq!(model.current_level(), 1);
        assert_eq!(model.switch_serial(), serial);

        model.increment();
        assert_eq!(model.current_level(), 2);
        assert_eq!(model.post_increment_value(), AT_MAX_LOD);
        let serial = model.switch_serial();
        model.increment();
        assert_eq!(model.current_level(), 2);
        assert_eq!(model.switch_serial(), serial);
    }

    /// Level switches bump the serial so containers see the change.
    #[test]
    fn test_switch_serial_tracks_changes() {
        let mut model = three_level_model();
        model.prepare_lod(0.01);
        let before = model.switch_serial();
        model.increment();
        model.increment();
        model.decrement();
        assert_eq!(model.switch_serial(), before + 3);
    }

    /// A single-level model is both the floor and the ceiling.
    #[test]
    fn test_single_level_model() {
        let mut model = LodModel::new("prop", &[LodLevel::new(120, 1.0)]);
        model.prepare_lod(0.3);
        assert_eq!(model.value(), AT_MIN_LOD);
        assert_eq!(model.post_increment_value(), AT_MAX_LOD);
        assert_eq!(model.cost(), 120.0);
    }
}
