//! Configuration system
//!
//! A [`Config`] type loads and saves itself as TOML or RON depending on the
//! file extension. Scene settings live in [`settings`].

use std::path::Path;

pub use serde::{Deserialize, Serialize};

pub mod settings;

pub use settings::{
    CameraConfig, EnvironmentConfig, FogConfig, LightAnimationConfig, SceneConfig, SpawnerConfig,
};

/// On-disk encodings, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl ConfigFormat {
    /// Format for `path`, or `UnsupportedFormat` for any other extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn decode<T: for<'de> Deserialize<'de>>(self, text: &str) -> Result<T, ConfigError> {
        match self {
            Self::Toml => toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string())),
            Self::Ron => ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    fn encode<T: Serialize>(self, value: &T) -> Result<String, ConfigError> {
        match self {
            Self::Toml => toml::to_string_pretty(value).map_err(|e| ConfigError::Serialize(e.to_string())),
            Self::Ron => ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }
}

/// A settings type stored as TOML or RON
///
/// Missing fields fall back to `Default` when the type is `#[serde(default)]`.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Read and decode `path`; the extension is checked before any I/O
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let text = std::fs::read_to_string(path)?;
        format.decode(&text)
    }

    /// Encode and write to `path`
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = ConfigFormat::from_path(path)?.encode(self)?;
        std::fs::write(path, text)?;
        log::debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Load from `path` when given, otherwise fall back to defaults
    fn load_or_default(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                log::info!("Loading configuration from {}", path);
                Self::load_from_file(path)
            }
            None => Ok(Self::default()),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The file could not be read or written
    #[error("Config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The text is not valid for the format or the type
    #[error("Malformed config: {0}")]
    Parse(String),

    /// The value could not be encoded
    #[error("Config encoding failed: {0}")]
    Serialize(String),

    /// The path has neither a `.toml` nor a `.ron` extension
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A value is outside its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
