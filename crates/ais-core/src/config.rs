//! Configuration types for ais.
//!
//! [`Config::load`] layers, lowest priority first: the embedded defaults, an
//! optional TOML file, then `AIS_`-prefixed environment variables
//! (`AIS_PAGING__PAGE_SIZE=50`). [`Config::defaults`] returns the embedded
//! defaults without touching the filesystem or environment (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[server]
bind = "127.0.0.1:5000"

[registry]
path = "data/addresses.json"

[paging]
page_size = 100

[geometry]
srid = 4326

[engine]
scripts_dir = "scripts"
script_ext  = "sh"
interpreter = "sh"
"#;

/// Config file read when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "ais.toml";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level service configuration. Shared read-only across requests.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub geometry: GeometryConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "127.0.0.1:5000".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

/// `[registry]` section: where the address records live.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_registry_path")]
    pub path: PathBuf,
}

fn default_registry_path() -> PathBuf { PathBuf::from("data/addresses.json") }

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { path: default_registry_path() }
    }
}

/// `[paging]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PagingConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize { 100 }

impl Default for PagingConfig {
    fn default() -> Self {
        Self { page_size: default_page_size() }
    }
}

/// `[geometry]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct GeometryConfig {
    /// Spatial reference of rendered geometries.
    #[serde(default = "default_srid")]
    pub srid: u32,
}

fn default_srid() -> u32 { crate::serialize::DEFAULT_SRID }

impl Default for GeometryConfig {
    fn default() -> Self {
        Self { srid: default_srid() }
    }
}

/// `[engine]` section: maintenance scripts run by `ais engine run`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_scripts_dir")]
    pub scripts_dir: PathBuf,
    #[serde(default = "default_script_ext")]
    pub script_ext: String,
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
}

fn default_scripts_dir() -> PathBuf { PathBuf::from("scripts") }
fn default_script_ext() -> String { "sh".to_string() }
fn default_interpreter() -> String { "sh".to_string() }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scripts_dir: default_scripts_dir(),
            script_ext: default_script_ext(),
            interpreter: default_interpreter(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load configuration layered over the built-in defaults. `path` is
    /// required to exist when given; otherwise [`DEFAULT_CONFIG_FILE`] is
    /// read if present.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("AIS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(cfg.normalised())
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    fn normalised(mut self) -> Self {
        self.paging.page_size = self.paging.page_size.max(1);
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
