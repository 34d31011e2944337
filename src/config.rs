use crate::core::models::{Encapsulation, ModuleFormat, TransformInput};
use crate::utils::Logger;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "soku-style.config.json";

/// Project-wide transform defaults (soku-style.config.json)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    /// Style mode applied when a component doesn't name one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// none | scoped | shadow (default: none)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encapsulation: Option<Encapsulation>,

    /// Keep original selectors as comments when scoping (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_original_selector: Option<bool>,

    /// esm | cjs (default: esm)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<ModuleFormat>,

    /// Ask the optimizer for source maps (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_map: Option<bool>,

    /// Vendor-prefix during optimization (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoprefixer: Option<bool>,
}

/// Per-component values that override the config file
#[derive(Debug, Clone, Default)]
pub struct ComponentStyle {
    pub tag: Option<String>,
    pub mode: Option<String>,
    pub encapsulation: Option<Encapsulation>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load soku-style.config.json from `root`, `None` when there isn't one
    pub fn load_from_file(root: &Path) -> Result<Option<StyleConfig>> {
        let config_path = root.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            Logger::debug(&format!("No {} found, using defaults", CONFIG_FILE_NAME));
            return Ok(None);
        }

        Logger::debug(&format!("Loading config from {}", config_path.display()));

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: StyleConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(Some(config))
    }

    /// Build a transform input from file defaults plus component values
    /// (component wins).
    pub fn merge(
        file_config: Option<StyleConfig>,
        file: PathBuf,
        css: String,
        component: ComponentStyle,
    ) -> TransformInput {
        let base = file_config.unwrap_or_default();

        TransformInput {
            file,
            input: css,
            tag: component.tag,
            mode: component.mode.or(base.mode),
            encapsulation: component
                .encapsulation
                .or(base.encapsulation)
                .unwrap_or_default(),
            comment_original_selector: base.comment_original_selector.unwrap_or(false),
            module: base.module.unwrap_or_default(),
            source_map: base.source_map.unwrap_or(false),
            autoprefixer: base.autoprefixer.unwrap_or(true),
        }
    }

    pub fn generate_example() -> String {
        let example = StyleConfig {
            mode: None,
            encapsulation: Some(Encapsulation::Shadow),
            comment_original_selector: Some(false),
            module: Some(ModuleFormat::Esm),
            source_map: Some(false),
            autoprefixer: Some(true),
        };
        serde_json::to_string_pretty(&example).unwrap_or_else(|_| {
            r#"{
  "encapsulation": "shadow",
  "commentOriginalSelector": false,
  "module": "esm",
  "sourceMap": false,
  "autoprefixer": true
}"#
            .to_string()
        })
    }
}
