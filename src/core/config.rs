//=========================================================================
// Configuration
//=========================================================================
//
// Loads `config.toml` into a validated `AppConfig`.
//
// Pipeline:
//   file ──toml──► RawConfig (all optional) ──env overrides──► validate
//                                                                 ↓
//                                                            AppConfig
//
// `[screen]` width, height and title are required; every other section
// falls back to defaults. Env vars win over the file.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, LevelFilter};
use serde::Deserialize;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::logging::{LogTarget, LoggingConfig};

//=== Constants ===========================================================

/// Env var naming the config file.
pub const CONFIG_PATH_ENV: &str = "AETHERIC_CONFIG";

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

//=== ConfigError =========================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("missing required config key '{0}'")]
    Missing(&'static str),

    #[error("invalid value for '{key}': {message}")]
    Invalid { key: &'static str, message: String },
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }
}

//=== AppConfig ===========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Ticks per second.
    pub tps: f64,
    /// Image drawn behind every scene, scaled to the surface.
    pub background: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetsConfig {
    pub dir: PathBuf,
    pub default_font_size: u32,
}

/// Resource names used by the bundled scenes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenesConfig {
    pub menu_font: String,
    pub image: String,
}

/// Validated application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub screen: ScreenConfig,
    pub engine: EngineConfig,
    pub assets: AssetsConfig,
    pub scenes: ScenesConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads the file named by `AETHERIC_CONFIG` (default `config.toml`)
    /// and applies environment overrides.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Self::load(path)
    }

    /// Loads `path` and applies environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::parse(&content, |key| std::env::var(key).ok())?;
        debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Parses TOML text, applying overrides from `env` before validation.
    ///
    /// `env` maps a variable name to its value; pass `|_| None` for none.
    pub fn parse<F>(content: &str, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut raw: RawConfig = toml::from_str(content)?;
        raw.merge_with_env(env)?;
        raw.validate()
    }
}

//=== Raw Sections ========================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    screen: RawScreen,
    engine: RawEngine,
    assets: RawAssets,
    scenes: RawScenes,
    logging: RawLogging,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawScreen {
    width: Option<u32>,
    height: Option<u32>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawEngine {
    tps: f64,
    background: String,
}

impl Default for RawEngine {
    fn default() -> Self {
        Self {
            tps: 60.0,
            background: "background".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawAssets {
    dir: PathBuf,
    default_font_size: u32,
}

impl Default for RawAssets {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("assets"),
            default_font_size: 24,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawScenes {
    menu_font: String,
    image: String,
}

impl Default for RawScenes {
    fn default() -> Self {
        Self {
            menu_font: "gameon".into(),
            image: "default".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawLogging {
    target: String,
    level: String,
    file: PathBuf,
    queue_capacity: usize,
}

impl Default for RawLogging {
    fn default() -> Self {
        let defaults = LoggingConfig::default();
        Self {
            target: "file".into(),
            level: defaults.level.to_string(),
            file: defaults.file,
            queue_capacity: defaults.queue_capacity,
        }
    }
}

impl RawConfig {
    fn merge_with_env<F>(&mut self, env: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = env("AETHERIC_SCREEN_WIDTH") {
            self.screen.width = Some(parse_env("screen.width", &val)?);
        }
        if let Some(val) = env("AETHERIC_SCREEN_HEIGHT") {
            self.screen.height = Some(parse_env("screen.height", &val)?);
        }
        if let Some(val) = env("AETHERIC_SCREEN_TITLE") {
            self.screen.title = Some(val);
        }
        if let Some(val) = env("AETHERIC_ASSETS_DIR") {
            self.assets.dir = PathBuf::from(val);
        }
        if let Some(val) = env("AETHERIC_LOG_LEVEL") {
            self.logging.level = val;
        }
        Ok(())
    }

    fn validate(self) -> Result<AppConfig, ConfigError> {
        let width = self.screen.width.ok_or(ConfigError::Missing("screen.width"))?;
        let height = self.screen.height.ok_or(ConfigError::Missing("screen.height"))?;
        let title = self.screen.title.ok_or(ConfigError::Missing("screen.title"))?;

        if width == 0 || height == 0 {
            return Err(ConfigError::invalid(
                "screen",
                format!("size must be non-zero, got {}x{}", width, height),
            ));
        }

        if !(self.engine.tps.is_finite() && self.engine.tps > 0.0) {
            return Err(ConfigError::invalid(
                "engine.tps",
                format!("must be positive, got {}", self.engine.tps),
            ));
        }

        if self.assets.default_font_size == 0 {
            return Err(ConfigError::invalid("assets.default_font_size", "must be positive"));
        }

        let target: LogTarget = self
            .logging
            .target
            .parse()
            .map_err(|e| ConfigError::invalid("logging.target", e))?;
        let level: LevelFilter = self
            .logging
            .level
            .parse()
            .map_err(|_| ConfigError::invalid("logging.level", format!("unknown level '{}'", self.logging.level)))?;

        if self.logging.queue_capacity == 0 {
            return Err(ConfigError::invalid("logging.queue_capacity", "must be positive"));
        }

        Ok(AppConfig {
            screen: ScreenConfig {
                width,
                height,
                title,
            },
            engine: EngineConfig {
                tps: self.engine.tps,
                background: self.engine.background,
            },
            assets: AssetsConfig {
                dir: self.assets.dir,
                default_font_size: self.assets.default_font_size,
            },
            scenes: ScenesConfig {
                menu_font: self.scenes.menu_font,
                image: self.scenes.image,
            },
            logging: LoggingConfig {
                target,
                level,
                file: self.logging.file,
                queue_capacity: self.logging.queue_capacity,
            },
        })
    }
}

fn parse_env<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::invalid(key, format!("'{}': {}", value, e)))
}

//=========================================================================
// Unit Tests
//=========================================================================
