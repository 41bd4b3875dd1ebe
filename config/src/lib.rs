//! Witgen Configuration
//!
//! Shared configuration crate for the witness generator.
//!
//! Handles loading configuration from:
//! 1. WITGEN_CONFIG env var (explicit path)
//! 2. ./witgen.toml (current directory)
//! 3. ~/.witgen/config.toml (user home)
//!
//! Environment variables take precedence over TOML config.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::{env, fs};

/// Global config instance for convenience access
pub static GLOBAL_CONFIG: OnceLock<WitgenConfig> = OnceLock::new();

const LOCAL_CONFIG_FILE_NAME: &str = "witgen.toml";
const CONFIG_FILE_NAME: &str = "config.toml";
const CONFIG_DIR_NAME: &str = ".witgen";

const DEFAULT_ALLOW_MISSING_INPUTS: bool = false;

// ============================================================================
// Config Structs
// ============================================================================

/// Root configuration structure (matches TOML layout)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WitgenConfig {
    #[serde(default)]
    pub encoder: EncoderConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// Witness encoder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Skip parameters with no input instead of failing
    #[serde(default = "default_allow_missing_inputs")]
    pub allow_missing_inputs: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            allow_missing_inputs: DEFAULT_ALLOW_MISSING_INPUTS,
        }
    }
}

fn default_allow_missing_inputs() -> bool {
    DEFAULT_ALLOW_MISSING_INPUTS
}

/// Circuit registry configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Directory that named manifests are resolved against
    #[serde(default)]
    pub manifest_dir: Option<String>,
}

impl RegistryConfig {
    pub fn manifest_dir(&self) -> Option<&Path> {
        self.manifest_dir.as_deref().map(Path::new)
    }
}

// ============================================================================
// Environment Variable Helpers
// ============================================================================

/// Set Option<String> from env var if present
fn env_option_string(key: &str, field: &mut Option<String>) {
    if let Ok(v) = env::var(key) {
        *field = Some(v);
    }
}

/// Check if env var is set to a truthy value ("1" or "true")
fn env_bool(key: &str) -> Option<bool> {
    env::var(key).ok().map(|v| parse_bool(&v))
}

fn parse_bool(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true")
}

// ============================================================================
// Implementation
// ============================================================================

impl WitgenConfig {
    /// Load configuration from config file with env var overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_file() {
            Some(path) => {
                log::info!("Loading config from: {}", path.display());
                Self::read(&path)?
            }
            None => {
                log::info!("No config file found, using defaults and environment variables");
                Self::default()
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file path
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::read(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse a TOML document without consulting the environment
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse witgen config")
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Find the config file path
    fn find_config_file() -> Option<PathBuf> {
        // 1. Check WITGEN_CONFIG env var
        if let Ok(path) = env::var("WITGEN_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check ./witgen.toml
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE_NAME);
        if local_path.exists() {
            return Some(local_path);
        }

        // 3. Check ~/.witgen/config.toml
        Self::default_config_path().filter(|p| p.exists())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Some(v) = env_bool("WITGEN_ALLOW_MISSING_INPUTS") {
            self.encoder.allow_missing_inputs = v;
        }
        env_option_string("WITGEN_MANIFEST_DIR", &mut self.registry.manifest_dir);
    }

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Generate a sample config file
    pub fn generate_sample() -> String {
        let mut sample = Self::default();
        sample.registry.manifest_dir = Some("./target".into());
        toml::to_string_pretty(&sample).unwrap_or_default()
    }

    /// Get the global config instance, initializing it if necessary.
    ///
    /// Falls back to defaults if loading fails.
    pub fn global() -> &'static WitgenConfig {
        GLOBAL_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                log::warn!("Failed to load config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Try to get the global config instance.
    ///
    /// Returns `None` if config hasn't been initialized yet.
    pub fn try_global() -> Option<&'static WitgenConfig> {
        GLOBAL_CONFIG.get()
    }

    /// Initialize the global config with a specific instance.
    ///
    /// Returns `Err(config)` if already initialized.
    pub fn set_global(config: WitgenConfig) -> Result<(), WitgenConfig> {
        GLOBAL_CONFIG.set(config)
    }
}

/// Shorthand for `WitgenConfig::global()`.
#[inline]
pub fn global_config() -> &'static WitgenConfig {
    WitgenConfig::global()
}

// ============================================================================
// Tests
// ============================================================================
