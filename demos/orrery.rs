//! Headless run of the built-in solar system.
//!
//! Usage: `cargo run --example orrery [config.json] [frames]`
//! Set `RUST_LOG=debug` for per-body registration output.

use glam::Vec3;
use orrery::{Orrery, OrreryConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut config = OrreryConfig::default();
    let mut frames: u64 = 3600;
    for arg in std::env::args().skip(1) {
        if arg.ends_with(".json") {
            config = OrreryConfig::from_path(&arg)?;
        } else {
            frames = arg.parse()?;
        }
    }

    let mut orrery = Orrery::new(&config)?;
    orrery.resize(1280, 720);
    orrery.translate_camera(Vec3::new(0.0, 10.0, 40.0));

    let mut last = None;
    for _ in 0..frames {
        last = Some(orrery.update());
    }

    let Some(frame) = last else {
        log::warn!("No frames requested");
        return Ok(());
    };

    log::info!("After {} frames:", frame.index);
    for item in &frame.draws {
        let name = orrery
            .scene
            .get_node(item.node)
            .map_or("?", |n| n.name());
        let position = item.model.transform_point3(Vec3::ZERO);
        log::info!("  {name:<16} ({:>7.2}, {:>7.2}, {:>7.2})", position.x, position.y, position.z);
    }
    for light in &frame.lights {
        log::info!(
            "  light at {:?}, color {:?}, intensity {}",
            light.position,
            light.color,
            light.intensity
        );
    }
    Ok(())
}
