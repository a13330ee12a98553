//! # Render Backend Seam
//!
//! The scene issues [`DrawCommand`]s against a [`RenderBackend`] through a
//! [`RenderContext`]. The backend owns the global pipeline state (blending,
//! face culling) that entities may toggle while drawing. The convention every
//! entity must restore before returning is [`RenderState::OPAQUE`].

use super::lighting::{DirectionalLight, Fog, PointLight, SpotLight};
use super::resources::{MeshHandle, ShaderHandle, TextureHandle, VisualResources};
use crate::foundation::math::{Mat4, Vec3, Vec4};

/// Global rendering toggles shared by all draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    /// Alpha blending enabled
    pub blending: bool,
    /// Back-face culling enabled
    pub face_culling: bool,
}

impl RenderState {
    /// State opaque geometry expects: culling on, blending off
    pub const OPAQUE: Self = Self {
        blending: false,
        face_culling: true,
    };

    /// Alpha blended, single-sided
    pub const BLENDED: Self = Self {
        blending: true,
        face_culling: true,
    };

    /// Opaque but visible from both sides
    pub const TWO_SIDED: Self = Self {
        blending: false,
        face_culling: false,
    };

    /// Alpha blended and visible from both sides
    pub const BLENDED_TWO_SIDED: Self = Self {
        blending: true,
        face_culling: false,
    };
}

impl Default for RenderState {
    fn default() -> Self {
        Self::OPAQUE
    }
}

/// Rendering errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The backend rejected a draw
    #[error("draw failed: {0}")]
    DrawFailed(String),

    /// A handle was not known to the backend
    #[error("unknown mesh handle {0:?}")]
    UnknownMesh(MeshHandle),
}

/// Read-only per-frame environment passed to every entity's render
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    /// Camera view matrix
    pub view: Mat4,
    /// Camera projection matrix
    pub projection: Mat4,
    /// Camera world position
    pub camera_position: Vec3,
    /// Sun
    pub sun: DirectionalLight,
    /// Point light
    pub point: PointLight,
    /// Spotlight
    pub spot: SpotLight,
    /// Fog
    pub fog: Fog,
    /// Global elapsed time in seconds
    pub time: f32,
}

/// One draw call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Geometry
    pub mesh: MeshHandle,
    /// Optional texture
    pub texture: Option<TextureHandle>,
    /// Shader program
    pub shader: ShaderHandle,
    /// Model (world) matrix
    pub model: Mat4,
    /// RGBA tint; alpha is used when blending
    pub color: Vec4,
}

impl DrawCommand {
    /// Draw `resources` with the given world matrix and a white tint
    pub fn new(resources: &VisualResources, model: Mat4) -> Self {
        Self {
            mesh: resources.mesh,
            texture: resources.texture,
            shader: resources.shader,
            model,
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
        }
    }

    /// Builder pattern: set RGB tint
    pub fn with_rgb(mut self, rgb: Vec3) -> Self {
        self.color.x = rgb.x;
        self.color.y = rgb.y;
        self.color.z = rgb.z;
        self
    }

    /// Builder pattern: set alpha
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.color.w = alpha;
        self
    }
}

/// Graphics layer the scene draws through
pub trait RenderBackend {
    /// Apply global pipeline toggles
    fn set_render_state(&mut self, state: RenderState);

    /// Currently applied toggles
    fn render_state(&self) -> RenderState;

    /// Submit one draw with the frame's environment
    fn draw(&mut self, command: &DrawCommand, frame: &FrameSnapshot) -> Result<(), RenderError>;
}

/// Scoped access to the backend for one entity's render
pub struct RenderContext<'a> {
    backend: &'a mut dyn RenderBackend,
    frame: &'a FrameSnapshot,
}

impl<'a> RenderContext<'a> {
    /// Wrap a backend and snapshot
    pub fn new(backend: &'a mut dyn RenderBackend, frame: &'a FrameSnapshot) -> Self {
        Self { backend, frame }
    }

    /// Environment for this frame
    pub fn frame(&self) -> &FrameSnapshot {
        self.frame
    }

    /// Submit a draw under the current state
    pub fn draw(&mut self, command: &DrawCommand) -> Result<(), RenderError> {
        self.backend.draw(command, self.frame)
    }

    /// Currently applied toggles
    pub fn state(&self) -> RenderState {
        self.backend.render_state()
    }

    /// Apply toggles directly; the caller is responsible for restoring them
    pub fn set_state(&mut self, state: RenderState) {
        self.backend.set_render_state(state);
    }

    /// Run `f` under `state`, restoring the previous state afterwards even on error
    pub fn with_state<R>(
        &mut self,
        state: RenderState,
        f: impl FnOnce(&mut Self) -> Result<R, RenderError>,
    ) -> Result<R, RenderError> {
        let previous = self.backend.render_state();
        self.backend.set_render_state(state);
        let result = f(self);
        self.backend.set_render_state(previous);
        result
    }
}

/// One draw captured by [`RecordingBackend`]
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    /// The submitted command
    pub command: DrawCommand,
    /// State in effect when it was submitted
    pub state: RenderState,
}

/// Backend that records draws instead of rasterizing
///
/// Used by the headless driver and by tests to observe render order and
/// state changes.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    state: RenderState,
    draws: Vec<DrawRecord>,
    state_changes: usize,
    failing_meshes: Vec<MeshHandle>,
}

impl RecordingBackend {
    /// Create an empty recorder in the opaque state
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: reject draws of `mesh`
    pub fn with_failing_mesh(mut self, mesh: MeshHandle) -> Self {
        self.failing_meshes.push(mesh);
        self
    }

    /// Draws recorded since the last [`RecordingBackend::clear`]
    pub fn draws(&self) -> &[DrawRecord] {
        &self.draws
    }

    /// Number of state changes applied
    pub fn state_changes(&self) -> usize {
        self.state_changes
    }

    /// Forget recorded draws
    pub fn clear(&mut self) {
        self.draws.clear();
        self.state_changes = 0;
    }
}

impl RenderBackend for RecordingBackend {
    fn set_render_state(&mut self, state: RenderState) {
        if state != self.state {
            self.state_changes += 1;
        }
        self.state = state;
    }

    fn render_state(&self) -> RenderState {
        self.state
    }

    fn draw(&mut self, command: &DrawCommand, _frame: &FrameSnapshot) -> Result<(), RenderError> {
        if self.failing_meshes.contains(&command.mesh) {
            return Err(RenderError::UnknownMesh(command.mesh));
        }
        self.draws.push(DrawRecord {
            command: command.clone(),
            state: self.state,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvironmentConfig;
    use crate::render::lighting::Environment;

    fn snapshot() -> FrameSnapshot {
        let environment = Environment::new(EnvironmentConfig::default());
        FrameSnapshot {
            view: Mat4::identity(),
            projection: Mat4::identity(),
            camera_position: Vec3::zeros(),
            sun: environment.sun,
            point: environment.point,
            spot: environment.spot,
            fog: environment.fog,
            time: 0.0,
        }
    }

    fn resources() -> VisualResources {
        VisualResources {
            mesh: MeshHandle(1),
            texture: None,
            shader: ShaderHandle(2),
        }
    }

    #[test]
    fn test_with_state_restores_previous() {
        let frame = snapshot();
        let mut backend = RecordingBackend::new();
        let mut ctx = RenderContext::new(&mut backend, &frame);

        ctx.with_state(RenderState::BLENDED_TWO_SIDED, |ctx| {
            ctx.draw(&DrawCommand::new(&resources(), Mat4::identity()).with_alpha(0.5))
        })
        .expect("draw");
        assert_eq!(ctx.state(), RenderState::OPAQUE);

        assert_eq!(backend.draws().len(), 1);
        assert_eq!(backend.draws()[0].state, RenderState::BLENDED_TWO_SIDED);
        assert_eq!(backend.draws()[0].command.color.w, 0.5);
    }

    #[test]
    fn test_with_state_restores_on_error() {
        let frame = snapshot();
        let mut backend = RecordingBackend::new().with_failing_mesh(MeshHandle(1));
        let mut ctx = RenderContext::new(&mut backend, &frame);

        let result = ctx.with_state(RenderState::BLENDED, |ctx| {
            ctx.draw(&DrawCommand::new(&resources(), Mat4::identity()))
        });
        assert_eq!(result, Err(RenderError::UnknownMesh(MeshHandle(1))));
        assert_eq!(ctx.state(), RenderState::OPAQUE);
        assert!(backend.draws().is_empty());
    }
}
