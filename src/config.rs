//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/exprchain/exprchain.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `EXPRCHAIN_*` prefix

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::{ExprResult, Operator, RenderStyle};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("environment override {key}: {message}")]
    Env { key: String, message: String },

    #[error("serialize settings: {0}")]
    Serialize(String),
}

/// How a built tree is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Parenthesized infix, e.g. `((A && B) || C)`
    #[default]
    Infix,
    /// One node per line
    Tree,
    /// JSON document of the node structure
    Json,
}

/// Infix rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderSettings {
    pub and_symbol: String,
    pub or_symbol: String,
    /// Wrap the outermost group in parentheses
    pub parenthesize_root: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            and_symbol: Operator::And.symbol().into(),
            or_symbol: Operator::Or.symbol().into(),
            parenthesize_root: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub color: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit from base).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub render: RawRenderSettings,
    pub output: RawOutputSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderSettings {
    pub and_symbol: Option<String>,
    pub or_symbol: Option<String>,
    pub parenthesize_root: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawOutputSettings {
    pub format: Option<OutputFormat>,
    pub color: Option<bool>,
}

/// Unified configuration for exprchain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub render: RenderSettings,
    pub output: OutputSettings,
}

/// Get the XDG config directory for exprchain.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "exprchain").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("exprchain.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Environment variable backing a dotted settings key, e.g. `output.color` →
/// `EXPRCHAIN_OUTPUT__COLOR`.
fn env_key(path: &str) -> String {
    format!("EXPRCHAIN_{}", path.replace('.', "__").to_uppercase())
}

/// `None` when the variable is unset; a malformed value is an error.
fn env_value<V>(result: Result<V, ConfigError>, path: &str) -> Result<Option<V>, SettingsError> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(SettingsError::Env {
            key: env_key(path),
            message: e.to_string(),
        }),
    }
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins where it is `Some`.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            render: RenderSettings {
                and_symbol: overlay
                    .render
                    .and_symbol
                    .clone()
                    .unwrap_or_else(|| self.render.and_symbol.clone()),
                or_symbol: overlay
                    .render
                    .or_symbol
                    .clone()
                    .unwrap_or_else(|| self.render.or_symbol.clone()),
                parenthesize_root: overlay
                    .render
                    .parenthesize_root
                    .unwrap_or(self.render.parenthesize_root),
            },
            output: OutputSettings {
                format: overlay.output.format.unwrap_or(self.output.format),
                color: overlay.output.color.unwrap_or(self.output.color),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional file layered over the global config; unlike the
    ///   global file it must exist
    pub fn load(config_file: Option<&Path>) -> Result<Self, SettingsError> {
        let global = global_config_path().filter(|path| path.exists());
        let current = Self::load_files(global.as_deref(), config_file)?;
        Self::apply_env_overrides(current)
    }

    /// Defaults merged with the given files, in order. No environment overrides.
    #[instrument(level = "debug")]
    pub fn load_files(
        global: Option<&Path>,
        config_file: Option<&Path>,
    ) -> Result<Self, SettingsError> {
        let mut current = Self::default();

        for path in [global, config_file].into_iter().flatten() {
            debug!(path = %path.display(), "merging config file");
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        Ok(current)
    }

    /// Apply EXPRCHAIN_* environment variables as explicit overrides.
    ///
    /// Keys use `__` between section and field, e.g. `EXPRCHAIN_RENDER__AND_SYMBOL`.
    pub fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("EXPRCHAIN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| SettingsError::Env {
                key: "EXPRCHAIN_*".into(),
                message: e.to_string(),
            })?;

        if let Some(val) = env_value(config.get_string("render.and_symbol"), "render.and_symbol")? {
            settings.render.and_symbol = val;
        }
        if let Some(val) = env_value(config.get_string("render.or_symbol"), "render.or_symbol")? {
            settings.render.or_symbol = val;
        }
        if let Some(val) = env_value(
            config.get_bool("render.parenthesize_root"),
            "render.parenthesize_root",
        )? {
            settings.render.parenthesize_root = val;
        }
        if let Some(val) = env_value(config.get_string("output.format"), "output.format")? {
            settings.output.format =
                OutputFormat::from_str(&val, true).map_err(|message| SettingsError::Env {
                    key: env_key("output.format"),
                    message,
                })?;
        }
        if let Some(val) = env_value(config.get_bool("output.color"), "output.color")? {
            settings.output.color = val;
        }

        Ok(settings)
    }

    /// Render style described by these settings.
    pub fn style(&self) -> ExprResult<RenderStyle> {
        RenderStyle::new(
            self.render.and_symbol.as_str(),
            self.render.or_symbol.as_str(),
            self.render.parenthesize_root,
        )
    }

    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Serialize(e.to_string()))
    }
}
