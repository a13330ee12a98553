//! # Visual Resource Cache
//!
//! Meshes, textures and shaders are loaded by an external
//! [`ResourceProvider`]; the scene only holds the opaque handles it returns.
//! [`ResourceCache`] memoises handles by logical name so that every entity of
//! a kind shares one upload, and drops them all together on reset.

use std::collections::HashMap;
use std::fmt;

/// Opaque mesh handle issued by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// Opaque texture handle issued by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Opaque shader program handle issued by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Kind of resource, used in error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Mesh geometry
    Mesh,
    /// Texture image
    Texture,
    /// Shader program
    Shader,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Mesh => write!(f, "mesh"),
            ResourceKind::Texture => write!(f, "texture"),
            ResourceKind::Shader => write!(f, "shader"),
        }
    }
}

/// Resource loading errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ResourceError {
    /// The provider could not load the named resource
    #[error("failed to load {kind} '{name}': {reason}")]
    LoadFailed {
        /// What was requested
        kind: ResourceKind,
        /// Logical name
        name: String,
        /// Provider-specific reason
        reason: String,
    },
}

/// Loads GPU resources by logical name
///
/// Implemented by the graphics layer; the scene never interprets the data
/// behind a handle.
pub trait ResourceProvider {
    /// Load a mesh
    fn load_mesh(&mut self, name: &str) -> Result<MeshHandle, ResourceError>;

    /// Load a texture
    fn load_texture(&mut self, name: &str) -> Result<TextureHandle, ResourceError>;

    /// Load a shader program
    fn load_shader(&mut self, name: &str) -> Result<ShaderHandle, ResourceError>;
}

/// Handles one entity kind draws with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualResources {
    /// Geometry
    pub mesh: MeshHandle,
    /// Optional surface texture
    pub texture: Option<TextureHandle>,
    /// Shader program
    pub shader: ShaderHandle,
}

/// Name-keyed memo of provider handles
pub struct ResourceCache {
    provider: Box<dyn ResourceProvider>,
    meshes: HashMap<String, MeshHandle>,
    textures: HashMap<String, TextureHandle>,
    shaders: HashMap<String, ShaderHandle>,
    provider_loads: usize,
}

impl fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceCache")
            .field("meshes", &self.meshes.len())
            .field("textures", &self.textures.len())
            .field("shaders", &self.shaders.len())
            .field("provider_loads", &self.provider_loads)
            .finish()
    }
}

impl ResourceCache {
    /// Create an empty cache over a provider
    pub fn new(provider: Box<dyn ResourceProvider>) -> Self {
        Self {
            provider,
            meshes: HashMap::new(),
            textures: HashMap::new(),
            shaders: HashMap::new(),
            provider_loads: 0,
        }
    }

    /// Mesh handle for `name`, loading it on first use
    pub fn mesh(&mut self, name: &str) -> Result<MeshHandle, ResourceError> {
        if let Some(handle) = self.meshes.get(name) {
            return Ok(*handle);
        }
        let handle = self.provider.load_mesh(name)?;
        self.provider_loads += 1;
        log::debug!("Loaded mesh '{}' as {:?}", name, handle);
        self.meshes.insert(name.to_string(), handle);
        Ok(handle)
    }

    /// Texture handle for `name`, loading it on first use
    pub fn texture(&mut self, name: &str) -> Result<TextureHandle, ResourceError> {
        if let Some(handle) = self.textures.get(name) {
            return Ok(*handle);
        }
        let handle = self.provider.load_texture(name)?;
        self.provider_loads += 1;
        log::debug!("Loaded texture '{}' as {:?}", name, handle);
        self.textures.insert(name.to_string(), handle);
        Ok(handle)
    }

    /// Shader handle for `name`, loading it on first use
    pub fn shader(&mut self, name: &str) -> Result<ShaderHandle, ResourceError> {
        if let Some(handle) = self.shaders.get(name) {
            return Ok(*handle);
        }
        let handle = self.provider.load_shader(name)?;
        self.provider_loads += 1;
        log::debug!("Loaded shader '{}' as {:?}", name, handle);
        self.shaders.insert(name.to_string(), handle);
        Ok(handle)
    }

    /// Resolve a mesh, optional texture and shader in one call
    pub fn visual(&mut self, mesh: &str, texture: Option<&str>, shader: &str) -> Result<VisualResources, ResourceError> {
        Ok(VisualResources {
            mesh: self.mesh(mesh)?,
            texture: texture.map(|name| self.texture(name)).transpose()?,
            shader: self.shader(shader)?,
        })
    }

    /// Number of cached handles
    pub fn len(&self) -> usize {
        self.meshes.len() + self.textures.len() + self.shaders.len()
    }

    /// Whether nothing is cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total provider requests made through this cache
    pub fn provider_loads(&self) -> usize {
        self.provider_loads
    }

    /// Forget every handle; the next request reloads through the provider
    pub fn clear(&mut self) {
        log::debug!("Clearing resource cache ({} handles)", self.len());
        self.meshes.clear();
        self.textures.clear();
        self.shaders.clear();
    }
}

/// Provider that issues sequential handles without touching a GPU
///
/// Used for headless runs and tests. Names listed with
/// [`HeadlessProvider::with_missing`] fail to load.
#[derive(Debug, Default)]
pub struct HeadlessProvider {
    next: u32,
    missing: Vec<String>,
}

impl HeadlessProvider {
    /// Create a provider where every load succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: make `name` fail to load
    pub fn with_missing(mut self, name: &str) -> Self {
        self.missing.push(name.to_string());
        self
    }

    fn issue(&mut self, kind: ResourceKind, name: &str) -> Result<u32, ResourceError> {
        if self.missing.iter().any(|m| m == name) {
            return Err(ResourceError::LoadFailed {
                kind,
                name: name.to_string(),
                reason: "not found".to_string(),
            });
        }
        self.next += 1;
        Ok(self.next)
    }
}

impl ResourceProvider for HeadlessProvider {
    fn load_mesh(&mut self, name: &str) -> Result<MeshHandle, ResourceError> {
        self.issue(ResourceKind::Mesh, name).map(MeshHandle)
    }

    fn load_texture(&mut self, name: &str) -> Result<TextureHandle, ResourceError> {
        self.issue(ResourceKind::Texture, name).map(TextureHandle)
    }

    fn load_shader(&mut self, name: &str) -> Result<ShaderHandle, ResourceError> {
        self.issue(ResourceKind::Shader, name).map(ShaderHandle)
    }
}
