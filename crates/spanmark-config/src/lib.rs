//! Spanmark Config
//!
//! This crate handles configuration loading and management
//! for spanmark, supporting TOML configuration files.
//!
//! # Overview
//!
//! Configuration is loaded from platform-specific locations:
//! - Linux: `~/.config/spanmark/config.toml`
//! - macOS: `~/Library/Application Support/spanmark/config.toml`
//! - Windows: `%APPDATA%\spanmark\config.toml`
//!
//! # Example
//!
//! ```no_run
//! use spanmark_config::Config;
//!
//! // Load config with defaults
//! let config = Config::load().unwrap();
//!
//! // Or load with an override file
//! let config = Config::load_with_override(Some("./custom.toml")).unwrap();
//! ```

mod features;
mod output;

pub use features::FeaturesConfig;
pub use output::{OutputConfig, OutputFormat};

use serde::{Deserialize, Serialize};
use spanmark_core::{Result, SpanmarkError};
use std::path::{Path, PathBuf};

/// Default TOML configuration string.
const DEFAULT_TOML: &str = r#"[features]
Strikethrough = true
Footnotes     = true
Citations     = true
Formulas      = true
Autolinks     = true
Html          = true
Images        = true
Links         = true

[output]
Format      = "tree"
Diagnostics = true
Spans       = false
"#;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Which inline constructs are recognized
    #[serde(default)]
    pub features: FeaturesConfig,

    /// How results are printed
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        // Parse the default TOML to ensure consistency
        toml::from_str(DEFAULT_TOML).expect("Default TOML should be valid")
    }
}

fn parse_toml(content: &str, context: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| SpanmarkError::Config(format!("{}: {}", context, e)))
}

impl Config {
    /// Returns the default TOML configuration string.
    ///
    /// # Example
    ///
    /// ```
    /// use spanmark_config::Config;
    /// let toml = Config::default_toml();
    /// assert!(toml.contains("[features]"));
    /// assert!(toml.contains("[output]"));
    /// ```
    pub fn default_toml() -> &'static str {
        DEFAULT_TOML
    }

    /// Returns the platform-specific configuration file path.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns the platform-specific configuration directory.
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "spanmark")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Ensures the config file exists, creating it with defaults if not.
    ///
    /// # Returns
    ///
    /// The path to the config file.
    pub fn ensure_config_file() -> Result<PathBuf> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| SpanmarkError::Config("Could not determine config directory".into()))?;
        Self::ensure_config_file_in(&config_dir)
    }

    /// Like [`Config::ensure_config_file`], inside a given directory.
    pub fn ensure_config_file_in(config_dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(config_dir)?;

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_TOML)?;
        }

        Ok(config_path)
    }

    /// Load configuration from the default platform-specific path.
    ///
    /// If no config file exists, returns the default configuration.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        parse_toml(&content, &format!("Parse error in {}", path.display()))
    }

    /// Load configuration with an optional override file or string.
    ///
    /// 1. Load the base config from the default location
    /// 2. If an override is provided:
    ///    - If it's a path to an existing file, load and merge it
    ///    - Otherwise, treat it as a TOML string and parse it
    ///
    /// # Example
    ///
    /// ```no_run
    /// use spanmark_config::Config;
    ///
    /// // Load with inline TOML override
    /// let config = Config::load_with_override(Some("[features]\nLinks = false")).unwrap();
    /// ```
    pub fn load_with_override(override_config: Option<&str>) -> Result<Self> {
        let mut config = Self::load()?;
        if let Some(override_str) = override_config {
            config.apply_override(override_str)?;
        }
        Ok(config)
    }

    /// Merge an override given as a file path or an inline TOML string.
    pub fn apply_override(&mut self, override_str: &str) -> Result<()> {
        let override_path = Path::new(override_str);

        let override_toml = if override_path.is_file() {
            std::fs::read_to_string(override_path)?
        } else {
            override_str.to_string()
        };

        let other = parse_toml(&override_toml, "Override parse error")?;
        self.merge(&other);
        Ok(())
    }

    /// Merge another config into this one.
    ///
    /// Values from `other` take precedence over values in `self`.
    ///
    /// # Example
    ///
    /// ```
    /// use spanmark_config::Config;
    ///
    /// let mut base = Config::default();
    /// let override_config: Config = toml::from_str(r#"
    ///     [features]
    ///     Links = false
    /// "#).unwrap();
    ///
    /// base.merge(&override_config);
    /// assert!(!base.features.links);
    /// ```
    pub fn merge(&mut self, other: &Config) {
        self.features.merge(&other.features);
        self.output.merge(&other.output);
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| SpanmarkError::Config(format!("Serialization error: {}", e)))?;
        std::fs::write(path, toml_string)?;
        Ok(())
    }
}
