//! Demo binary that drives the predictive LOD optimizer over a synthetic scene.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p vantage-demo` for the default 500-object scene.
//! Run with `cargo run -p vantage-demo -- --budget 50000 --objects 2000` to
//! stress a tighter budget.

use clap::Parser;
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use tracing::{debug, info};
use vantage_config::{CliArgs, Config, ConfigError};
use vantage_lod::LodOptimizer;
use vantage_scene::{LodLevel, LodModel, projected_screen_area};

/// A placed scene object: a multi-LOD model plus the bounding sphere the
/// screen-area projection uses.
struct SceneObject {
    model: LodModel,
    center: Vec3,
    radius: f32,
}

/// Per-level screen-size ceilings shared by every generated object. An
/// object larger than `LEVEL_CEILINGS[i]` on screen is forbidden from
/// rendering at level `i`.
const LEVEL_CEILINGS: [f32; 4] = [0.005, 0.05, 0.4, 1.0];

/// Scatter `count` objects in a cube of the given half-extent, each with two
/// to four detail levels whose polygon counts grow roughly 4x per level.
fn build_scene(count: u32, extent: f32, lod_bias: f32, seed: u64) -> Vec<SceneObject> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    let mut scene = Vec::with_capacity(count as usize);

    for id in 0..count {
        let level_count = rng.gen_range(2..=4usize);
        let base_polys = rng.gen_range(20..200u32);
        let levels: Vec<LodLevel> = (0..level_count)
            .map(|i| LodLevel::new(base_polys * 4u32.pow(i as u32), LEVEL_CEILINGS[i]))
            .collect();

        let mut model = LodModel::new(format!("object_{id}"), &levels);
        model.set_lod_bias(lod_bias);

        scene.push(SceneObject {
            model,
            center: Vec3::new(
                rng.gen_range(-extent..=extent),
                rng.gen_range(-extent..=extent),
                rng.gen_range(-extent..=extent),
            ),
            radius: rng.gen_range(0.5..6.0),
        });
    }

    scene
}

/// Camera position for the given frame: a slow orbit around the scene
/// center so object screen sizes change continuously.
fn camera_position(frame: u32, extent: f32) -> Vec3 {
    let angle = frame as f32 * 0.02;
    let orbit_radius = extent * 1.2;
    Vec3::new(
        angle.cos() * orbit_radius,
        extent * 0.3,
        angle.sin() * orbit_radius,
    )
}

fn main() -> Result<(), ConfigError> {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .or_else(|| dirs::config_dir().map(|d| d.join("vantage")))
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(&args);

    vantage_log::init_logging(
        Some(&config_dir.join("logs")),
        cfg!(debug_assertions),
        Some(&config),
    );

    info!(
        objects = config.scene.object_count,
        budget = config.lod.frame_budget,
        bias = config.lod.lod_bias,
        seed = config.scene.seed,
        "starting synthetic LOD run"
    );

    let fov_y = config.lod.fov_y_degrees.to_radians();
    let mut scene = build_scene(
        config.scene.object_count,
        config.scene.world_extent_m,
        config.lod.lod_bias,
        config.scene.seed,
    );

    // A fixed cost standing in for single-LOD geometry (terrain, props) that
    // consumes budget without participating in reshuffling.
    let fixed_cost = config.lod.frame_budget * 0.05;

    for frame in 0..config.scene.frame_count {
        let camera = camera_position(frame, config.scene.world_extent_m);

        let mut optimizer = LodOptimizer::with_capacity(scene.len());
        optimizer.add_cost(fixed_cost);
        for object in &mut scene {
            let area = projected_screen_area(
                object.center,
                object.radius,
                camera,
                fov_y,
                config.lod.aspect,
            );
            object.model.prepare_lod(area);
            optimizer.add_object(&mut object.model);
        }

        let total = optimizer.optimize(config.lod.frame_budget);
        drop(optimizer);

        info!(
            frame,
            total_cost = total,
            budget = config.lod.frame_budget,
            over_budget = total > config.lod.frame_budget,
            "frame complete"
        );

        if config.debug.log_lod_histogram {
            let mut histogram = [0u32; LEVEL_CEILINGS.len()];
            for object in &scene {
                histogram[object.model.current_level()] += 1;
            }
            debug!(?histogram, "active LOD levels");
        }
    }

    Ok(())
}
