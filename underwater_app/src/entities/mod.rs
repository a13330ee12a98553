//! Concrete underwater entities
//!
//! Every entity owns a [`Node`](reef_engine::scene::Node) and the
//! [`VisualResources`] it draws with. Resources are resolved once by the
//! population and handed in at construction.

pub mod bubble;
pub mod bubble_generator;
pub mod fish;
pub mod fish1;
pub mod fish_fin;
pub mod ground;
pub mod jellyfish;
pub mod rock;
pub mod seaweed;
pub mod skybox;
pub mod water_surface;

pub use bubble::Bubble;
pub use bubble_generator::{BubbleFactory, BubbleGenerator};
pub use fish::Fish;
pub use fish1::Fish1;
pub use fish_fin::FishFin;
pub use ground::Ground;
pub use jellyfish::Jellyfish;
pub use rock::Rock;
pub use seaweed::Seaweed;
pub use skybox::Skybox;
pub use water_surface::WaterSurface;

use reef_engine::render::{ResourceCache, ResourceError, VisualResources};

/// Lit, fogged shader shared by most entities
pub const UNDERWATER_SHADER: &str = "underwater";

/// Mesh, texture and shader names for one kind of entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    /// Mesh file
    pub mesh: &'static str,
    /// Diffuse texture, if any
    pub texture: Option<&'static str>,
    /// Shader program
    pub shader: &'static str,
}

impl Asset {
    /// Resolve through the scene's resource cache
    pub fn load(&self, cache: &mut ResourceCache) -> Result<VisualResources, ResourceError> {
        cache.visual(self.mesh, self.texture, self.shader)
    }
}

/// Asset names used by the underwater scene
#[allow(missing_docs)]
pub mod assets {
    use super::{Asset, UNDERWATER_SHADER};

    pub const FISH: Asset = Asset {
        mesh: "fish2/13007_Blue-Green_Reef_Chromis_v2_l3.obj",
        texture: Some("fish2/13004_Bicolor_Blenny_v1_diff.bmp"),
        shader: UNDERWATER_SHADER,
    };

    pub const FISH1: Asset = Asset {
        mesh: "fish1/fish.obj",
        texture: Some("fish1/fish_24bit.bmp"),
        shader: UNDERWATER_SHADER,
    };

    pub const FIN: Asset = Asset {
        mesh: "fish2/13007_Blue-Green_Reef_Chromis_v2_l3.obj",
        texture: Some("fish2/13004_Bicolor_Blenny_v1_diff.bmp"),
        shader: UNDERWATER_SHADER,
    };

    pub const JELLYFISH: Asset = Asset {
        mesh: "jellyfish/21443_Jellyfish_V1.obj",
        texture: Some("jellyfish/watercol_05_05_22_01.bmp"),
        shader: UNDERWATER_SHADER,
    };

    pub const BUBBLE: Asset = Asset {
        mesh: "bubble/sphere.obj",
        texture: Some("ground/ground.bmp"),
        shader: UNDERWATER_SHADER,
    };

    pub const SEAWEED: Asset = Asset {
        mesh: "seaweed/maya2sketchfab.obj",
        texture: Some("seaweed/abstract-solid-shining-yellow-gradient-studio-wall-room-background.bmp"),
        shader: UNDERWATER_SHADER,
    };

    pub const ROCK: Asset = Asset {
        mesh: "rock/Rock1_noplane.obj",
        texture: Some("rock/Rock-Texture-Surface.bmp"),
        shader: UNDERWATER_SHADER,
    };

    pub const GROUND: Asset = Asset {
        mesh: "ground/quad.obj",
        texture: Some("sand/natural-yellow-sand-beach-background.bmp"),
        shader: UNDERWATER_SHADER,
    };

    pub const WATER_SURFACE: Asset = Asset {
        mesh: "ground/quad.obj",
        texture: Some("ground/ground.bmp"),
        shader: "water",
    };

    pub const SKYBOX: Asset = Asset {
        mesh: "skybox/cube",
        texture: None,
        shader: "skybox",
    };
}

#[cfg(test)]
pub(crate) mod test_support {
    use reef_engine::config::SceneConfig;
    use reef_engine::render::{HeadlessProvider, MeshHandle, ShaderHandle, VisualResources};
    use reef_engine::scene::Scene;

    pub fn scene() -> Scene {
        Scene::new(SceneConfig::default(), Box::new(HeadlessProvider::new()))
    }

    pub fn visual(mesh: u32) -> VisualResources {
        VisualResources {
            mesh: MeshHandle(mesh),
            texture: None,
            shader: ShaderHandle(0),
        }
    }
}
