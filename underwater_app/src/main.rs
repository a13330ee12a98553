//! Headless underwater reef
//!
//! Usage: `underwater [scene.toml|scene.ron] [population.toml|population.ron]`
//!
//! Runs the configured number of fixed-step frames along the camera tour.
//! A scripted key sequence pauses a third of the way in and resets the
//! scene at two thirds, the same as pressing `P` and `R` in a window.

use reef_engine::config::{Config, SceneConfig};
use reef_engine::foundation::time::FrameClock;
use reef_engine::render::HeadlessProvider;
use reef_engine::scene::Scene;
use underwater_app::camera_tour::reef_tour;
use underwater_app::{Command, Driver, PopulationConfig, UnderwaterPopulator};

/// Frames the scripted pause lasts
const PAUSE_FRAMES: u32 = 60;

fn script(frame_count: u32) -> Vec<(u32, char)> {
    let pause_at = frame_count / 3;
    vec![
        (pause_at, 'p'),
        (pause_at + PAUSE_FRAMES, 'p'),
        (frame_count * 2 / 3, 'r'),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
    log::info!("Starting underwater reef");

    let args: Vec<String> = std::env::args().collect();
    let scene_config = SceneConfig::load_or_default(args.get(1).map(String::as_str))?;
    scene_config.validate()?;
    let population = PopulationConfig::load_or_default(args.get(2).map(String::as_str))?;
    population.validate()?;

    let frame_count = scene_config.frame_count;
    let clock = FrameClock::fixed_step(scene_config.fixed_timestep);
    let mut scene = Scene::new(scene_config, Box::new(HeadlessProvider::new()));
    scene.camera_mut().set_path(reef_tour());

    let mut driver = Driver::new(scene, UnderwaterPopulator::new(population), clock)?;
    log::info!("Running {} frames", frame_count);

    let script = script(frame_count);
    let mut spawned = 0;
    let mut expired = 0;
    let mut peak = driver.scene().len();

    for frame in 0..frame_count {
        for (_, key) in script.iter().filter(|(at, _)| *at == frame) {
            if let Some(command) = Command::from_key(*key) {
                driver.handle(command)?;
            }
        }

        let report = driver.frame();
        spawned += report.update.spawned;
        expired += report.update.expired;
        peak = peak.max(driver.scene().len());

        if report.render.failed > 0 || report.render.leaked_state > 0 {
            log::warn!(
                "Frame {}: {} failed renders, {} leaked states",
                frame,
                report.render.failed,
                report.render.leaked_state
            );
        }
        if frame % 60 == 0 {
            let camera = driver.scene().camera().position;
            log::debug!(
                "t={:.2}s camera=({:.1}, {:.1}, {:.1}) entities={} draws={}",
                driver.scene().time(),
                camera.x,
                camera.y,
                camera.z,
                driver.scene().len(),
                report.draws
            );
        }
    }

    log::info!(
        "Finished: {} entities live (peak {}), {} spawned, {} expired, {:.2}s of animation",
        driver.scene().len(),
        peak,
        spawned,
        expired,
        driver.clock().total_time()
    );
    Ok(())
}
