//! Headless frame driver
//!
//! Stands in for the window loop. Key presses arrive through
//! [`Driver::handle`]; each frame ticks the clock, updates the scene and
//! renders into a [`RecordingBackend`].

use reef_engine::config::ConfigError;
use reef_engine::foundation::time::FrameClock;
use reef_engine::render::RecordingBackend;
use reef_engine::scene::{RenderStats, Scene, SceneError, UpdateStats};

use crate::population::UnderwaterPopulator;

/// App-level failures
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// A config file could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The scene could not be populated
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Keyboard commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `P`: freeze or resume animation
    TogglePause,
    /// `R`: rebuild the scene and rewind the camera
    Reset,
}

impl Command {
    /// Map a key to its command
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'p' => Some(Self::TogglePause),
            'r' => Some(Self::Reset),
            _ => None,
        }
    }
}

/// What happened in one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Delta fed to the scene
    pub dt: f32,
    /// Update pass counters
    pub update: UpdateStats,
    /// Render pass counters
    pub render: RenderStats,
    /// Draw calls issued
    pub draws: usize,
}

/// Owns the scene, its populator, the clock and the backend
pub struct Driver {
    scene: Scene,
    populator: UnderwaterPopulator,
    clock: FrameClock,
    backend: RecordingBackend,
}

impl Driver {
    /// Populate `scene` and prepare to drive it with `clock`
    pub fn new(mut scene: Scene, mut populator: UnderwaterPopulator, clock: FrameClock) -> Result<Self, AppError> {
        scene.populate(&mut populator)?;
        Ok(Self {
            scene,
            populator,
            clock,
            backend: RecordingBackend::new(),
        })
    }

    /// Apply a command before the next frame
    pub fn handle(&mut self, command: Command) -> Result<(), AppError> {
        match command {
            Command::TogglePause => {
                self.clock.toggle_pause();
            }
            Command::Reset => {
                log::info!("Resetting scene at frame {}", self.scene.frame());
                self.scene.reset(&mut self.populator)?;
            }
        }
        Ok(())
    }

    /// Run one frame
    pub fn frame(&mut self) -> FrameReport {
        let dt = self.clock.tick();
        let update = self.scene.update(dt);

        self.backend.clear();
        let render = self.scene.render(&mut self.backend);
        let draws = self.backend.draws().len();

        log::trace!(
            "Frame {}: {} updated, {} spawned, {} draws",
            self.scene.frame(),
            update.updated,
            update.spawned,
            draws
        );
        FrameReport {
            dt,
            update,
            render,
            draws,
        }
    }

    /// The driven scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the scene
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The frame clock
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Draws recorded by the last frame
    pub fn backend(&self) -> &RecordingBackend {
        &self.backend
    }
}
