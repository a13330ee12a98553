//! Rendering-side types
//!
//! Camera and its keyframe animation, the time-driven light and fog
//! environment, the resource cache, the backend seam and the per-frame
//! render queue. GPU work itself lives behind [`RenderBackend`] and
//! [`ResourceProvider`].

pub mod backend;
pub mod camera;
pub mod camera_path;
pub mod lighting;
pub mod render_queue;
pub mod resources;

pub use backend::{
    DrawCommand, DrawRecord, FrameSnapshot, RecordingBackend, RenderBackend, RenderContext, RenderError,
    RenderState,
};
pub use camera::Camera;
pub use camera_path::{CameraPath, CameraPathError, CameraPose, Keyframe, PlaybackState};
pub use lighting::{DirectionalLight, Environment, Fog, PointLight, SpotLight};
pub use render_queue::{RenderItem, RenderQueue};
pub use resources::{
    HeadlessProvider, MeshHandle, ResourceCache, ResourceError, ResourceKind, ResourceProvider, ShaderHandle,
    TextureHandle, VisualResources,
};
