//! quantum.toml handling

use anyhow::{Context, Result};
use quantum_theme::{
    Breakpoint, InitScriptOptions, StylesheetOptions, DEFAULT_STORAGE_KEY, DEFAULT_THEME_ATTRIBUTE,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "quantum.toml";

/// Top-level project configuration (quantum.toml)
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct QuantumConfig {
    #[serde(default)]
    pub tokens: TokensConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub breakpoints: BreakpointsConfig,
}

/// Where the semantic token table comes from
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct TokensConfig {
    /// JSON or TOML token tree, relative to the config file. The built-in
    /// quantum table is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Generated artifacts
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Stylesheet destination; stdout when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub pretty_json: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            css: None,
            pretty_json: true,
        }
    }
}

/// Theme runtime settings shared by the init script and the host
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct RuntimeConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_attribute")]
    pub attribute: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_attribute() -> String {
    DEFAULT_THEME_ATTRIBUTE.to_string()
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            attribute: default_attribute(),
        }
    }
}

/// Media query thresholds in px
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct BreakpointsConfig {
    #[serde(default = "default_tablet")]
    pub tablet: u32,
    #[serde(default = "default_desktop")]
    pub desktop: u32,
}

fn default_tablet() -> u32 {
    Breakpoint::Tablet.min_width()
}

fn default_desktop() -> u32 {
    Breakpoint::Desktop.min_width()
}

impl Default for BreakpointsConfig {
    fn default() -> Self {
        Self {
            tablet: default_tablet(),
            desktop: default_desktop(),
        }
    }
}

impl QuantumConfig {
    /// Load configuration from a directory (looks for quantum.toml)
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = config_path(path);

        if !config_path.exists() {
            anyhow::bail!(
                "No {CONFIG_FILE} found in {}. Run `quantum init` to create one.",
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let mut config: QuantumConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        let base = config_path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(base);
        Ok(config)
    }

    /// Like [`load_from_dir`](Self::load_from_dir), falling back to defaults
    /// when there is no config file
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if config_path(path).exists() {
            Self::load_from_dir(path)
        } else {
            tracing::debug!("no {CONFIG_FILE} in {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Configuration written by `quantum init`
    pub fn new() -> Self {
        Self {
            output: OutputConfig {
                css: Some(PathBuf::from("dist/quantum.css")),
                pretty_json: true,
            },
            ..Self::default()
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn stylesheet_options(&self) -> StylesheetOptions {
        StylesheetOptions {
            attribute: self.runtime.attribute.clone(),
            tablet_min_width: self.breakpoints.tablet,
            desktop_min_width: self.breakpoints.desktop,
        }
    }

    pub fn init_script_options(&self) -> InitScriptOptions {
        InitScriptOptions {
            storage_key: self.runtime.storage_key.clone(),
            attribute: self.runtime.attribute.clone(),
            ..InitScriptOptions::default()
        }
    }

    fn resolve_paths(&mut self, base: &Path) {
        if let Some(path) = self.tokens.path.as_mut() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        if let Some(path) = self.output.css.as_mut() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

fn config_path(path: &Path) -> PathBuf {
    if path.is_file() {
        path.to_path_buf()
    } else {
        path.join(CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_uses_defaults() {
        let config: QuantumConfig = toml::from_str("").unwrap();
        assert_eq!(config, QuantumConfig::default());
        assert_eq!(config.runtime.storage_key, "quantum-theme");
        assert_eq!(config.breakpoints.tablet, 768);
        assert_eq!(config.breakpoints.desktop, 1024);
        assert!(config.output.pretty_json);
    }

    #[test]
    fn partial_sections_keep_field_defaults() {
        let config: QuantumConfig = toml::from_str(
            r#"
            [runtime]
            storage_key = "app-theme"

            [breakpoints]
            desktop = 1280
            "#,
        )
        .unwrap();

        assert_eq!(config.runtime.storage_key, "app-theme");
        assert_eq!(config.runtime.attribute, "data-theme");
        assert_eq!(config.breakpoints.tablet, 768);
        assert_eq!(config.stylesheet_options().desktop_min_width, 1280);
        assert_eq!(config.init_script_options().storage_key, "app-theme");
    }

    #[test]
    fn init_config_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let config = QuantumConfig::new();
        fs::write(dir.path().join(CONFIG_FILE), config.to_toml().unwrap()).unwrap();

        let loaded = QuantumConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(loaded.output.css, Some(dir.path().join("dist/quantum.css")));
        assert_eq!(loaded.runtime, config.runtime);
    }

    #[test]
    fn relative_token_path_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[tokens]\npath = \"tokens/app.json\"\n",
        )
        .unwrap();

        let loaded = QuantumConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(loaded.tokens.path, Some(dir.path().join("tokens/app.json")));
    }

    #[test]
    fn missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = QuantumConfig::load_from_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("quantum init"));
        assert_eq!(QuantumConfig::load_or_default(dir.path()).unwrap(), QuantumConfig::default());
    }
}
