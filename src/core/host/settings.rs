//=========================================================================
// Host Settings
//=========================================================================
//
// Immutable configuration fixed at host construction and shared with
// every scene (including the background transition context) through an
// `Arc<HostSettings>`.
//
// Architecture:
// ```text
//     HostSettingsBuilder ──build()──> HostSettings ──Arc──> SceneHost
//         ├─ with_title()                                   ├─> Scene::load/destroy
//         ├─ with_size()                                    └─> FrameContext
//         ├─ with_frame_rate() / with_vsync()
//         ├─ with_clear_color()
//         └─ with_tunable()
// ```
//
// With the `config` feature the same settings can be read from TOML.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::str::FromStr;

use log::warn;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::Color;

//=== FrameRate ===========================================================

/// Frame-rate governance: a fixed cap or display synchronisation, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum FrameRate {
    /// Limit presentation to this many frames per second.
    Capped(u32),

    /// Follow the display refresh.
    #[cfg_attr(feature = "config", serde(rename = "vsync"))]
    VSync,
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::Capped(60)
    }
}

//=== Tunables ============================================================

/// Scene-specific key/value settings forwarded untouched by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize))]
#[cfg_attr(feature = "config", serde(transparent))]
pub struct Tunables(BTreeMap<String, String>);

impl Tunables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.insert(key.into(), value.to_string());
    }

    /// Returns the raw string for `key`.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Parses `key` as `T`.
    ///
    /// Returns `None` if the key is absent or does not parse; parse failures
    /// are logged so a typo in a settings file does not go unnoticed.
    pub fn get<T: FromStr>(&self, key: &str) -> Option<T> {
        let raw = self.raw(key)?;
        match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(target: "host", "Tunable {:?} has unparsable value {:?}", key, raw);
                None
            }
        }
    }

    /// Like [`get`](Self::get), falling back to `default`.
    pub fn get_or<T: FromStr>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

//=== SettingsError =======================================================

/// Values a builder would have rejected, found in hand-built or loaded settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("surface size must be positive, got {width}x{height}")]
    ZeroSize { width: u32, height: u32 },

    #[error("frame rate cap must be positive")]
    ZeroFrameRate,
}

//=== HostSettings ========================================================

/// Shared, immutable host configuration.
///
/// # Default Values
///
/// - **Title**: "Tandem Engine"
/// - **Size**: 800x600
/// - **Frame rate**: capped at 60
/// - **Clear colour**: (35, 5, 15, 255)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct HostSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub frame_rate: FrameRate,
    pub clear_color: Color,
    pub tunables: Tunables,
}

impl HostSettings {
    pub const DEFAULT_CLEAR: Color = Color::rgba(35, 5, 15, 255);

    /// Starts a builder from the default settings.
    pub fn builder() -> HostSettingsBuilder {
        HostSettingsBuilder::new()
    }

    /// Returns `true` when presentation follows the display refresh.
    pub fn vsync(&self) -> bool {
        matches!(self.frame_rate, FrameRate::VSync)
    }

    /// Checks values a builder would have rejected.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width == 0 || self.height == 0 {
            return Err(SettingsError::ZeroSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.frame_rate == FrameRate::Capped(0) {
            return Err(SettingsError::ZeroFrameRate);
        }
        Ok(())
    }
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            title: "Tandem Engine".to_string(),
            width: 800,
            height: 600,
            frame_rate: FrameRate::default(),
            clear_color: Self::DEFAULT_CLEAR,
            tunables: Tunables::new(),
        }
    }
}

//=== HostSettingsBuilder =================================================

/// Fluent builder for [`HostSettings`].
///
/// ```
/// use tandem_engine::core::host::{FrameRate, HostSettings};
///
/// let settings = HostSettings::builder()
///     .with_title("Court")
///     .with_size(1024, 768)
///     .with_frame_rate(120)
///     .with_tunable("friction", 0.05)
///     .build();
///
/// assert_eq!(settings.frame_rate, FrameRate::Capped(120));
/// assert_eq!(settings.tunables.get::<f32>("friction"), Some(0.05));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HostSettingsBuilder {
    settings: HostSettings,
}

impl HostSettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.settings.title = title.into();
        self
    }

    /// Sets the surface dimensions in pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Surface size must be positive, got {}x{}", width, height);
        self.settings.width = width;
        self.settings.height = height;
        self
    }

    /// Caps presentation at `fps`, replacing any vsync setting.
    ///
    /// # Panics
    ///
    /// Panics if `fps == 0`.
    pub fn with_frame_rate(mut self, fps: u32) -> Self {
        assert!(fps > 0, "Frame rate must be positive, got {}", fps);
        self.settings.frame_rate = FrameRate::Capped(fps);
        self
    }

    /// Enables vsync, replacing any frame-rate cap.
    pub fn with_vsync(mut self) -> Self {
        self.settings.frame_rate = FrameRate::VSync;
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.settings.clear_color = color;
        self
    }

    /// Adds a scene tunable. The host never interprets it.
    pub fn with_tunable(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.settings.tunables.insert(key, value);
        self
    }

    pub fn build(self) -> HostSettings {
        self.settings
    }
}

//=== TOML Loading ========================================================

#[cfg(feature = "config")]
mod file {
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    use serde::de::{Deserialize, Deserializer, Error as _};
    use thiserror::Error;

    use super::{HostSettings, SettingsError, Tunables};

    /// Errors raised while reading settings from TOML.
    #[derive(Debug, Error)]
    pub enum ConfigError {
        #[error("failed to read settings file {}: {source}", .path.display())]
        Io {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },

        #[error("failed to parse settings: {0}")]
        Parse(#[from] toml::de::Error),

        #[error("invalid settings: {0}")]
        Invalid(#[from] SettingsError),
    }

    /// Accepts any scalar and keeps its textual form; arrays and tables are
    /// rejected.
    impl<'de> Deserialize<'de> for Tunables {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let table = BTreeMap::<String, toml::Value>::deserialize(deserializer)?;
            let mut tunables = Tunables::new();

            for (key, value) in table {
                let raw = match value {
                    toml::Value::String(text) => text,
                    toml::Value::Integer(number) => number.to_string(),
                    toml::Value::Float(number) => number.to_string(),
                    toml::Value::Boolean(flag) => flag.to_string(),
                    toml::Value::Datetime(stamp) => stamp.to_string(),
                    other => {
                        return Err(D::Error::custom(format!(
                            "tunable {:?} must be a scalar, got {}",
                            key,
                            other.type_str()
                        )));
                    }
                };
                tunables.0.insert(key, raw);
            }
            Ok(tunables)
        }
    }

    impl HostSettings {
        /// Parses settings from TOML; missing fields take their defaults.
        ///
        /// ```toml
        /// title = "Court"
        /// width = 1024
        /// height = 768
        /// frame_rate = { capped = 120 }   # or: frame_rate = "vsync"
        /// clear_color = { r = 0, g = 0, b = 0, a = 255 }
        ///
        /// [tunables]
        /// friction = 0.05
        /// greeting = "hello"
        /// ```
        pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
            let settings: HostSettings = toml::from_str(source)?;
            settings.validate()?;
            Ok(settings)
        }

        pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
            let path = path.as_ref();
            let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml_str(&source)
        }
    }
}

#[cfg(feature = "config")]
pub use file::ConfigError;

//=========================================================================
// Unit Tests
//=========================================================================
