use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{canvas, export, text};

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct IconConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RenderConfig {
    #[serde(default = "default_canvas_size")]
    pub canvas_size: u32,
    #[serde(default = "default_text")]
    pub text: String,
    #[serde(default = "default_font_path")]
    pub font_path: PathBuf,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

fn default_canvas_size() -> u32 {
    canvas::DEFAULT_EDGE
}

fn default_text() -> String {
    text::DEFAULT_CONTENT.to_string()
}

fn default_font_path() -> PathBuf {
    PathBuf::from(text::DEFAULT_FONT_PATH)
}

fn default_font_size() -> f32 {
    text::DEFAULT_FONT_SIZE
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            canvas_size: default_canvas_size(),
            text: default_text(),
            font_path: default_font_path(),
            font_size: default_font_size(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExportConfig {
    #[serde(default = "default_icons_dir")]
    pub icons_dir: PathBuf,
    #[serde(default = "default_iconset_dir")]
    pub iconset_dir: PathBuf,
    #[serde(default = "default_sizes")]
    pub sizes: Vec<u32>,
    #[serde(default = "default_retina_max_size")]
    pub retina_max_size: u32,
}

fn default_icons_dir() -> PathBuf {
    PathBuf::from(export::DEFAULT_ICONS_DIR)
}

fn default_iconset_dir() -> PathBuf {
    PathBuf::from(export::DEFAULT_ICONSET_DIR)
}

fn default_sizes() -> Vec<u32> {
    export::DEFAULT_SIZES.to_vec()
}

fn default_retina_max_size() -> u32 {
    export::DEFAULT_RETINA_MAX
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            icons_dir: default_icons_dir(),
            iconset_dir: default_iconset_dir(),
            sizes: default_sizes(),
            retina_max_size: default_retina_max_size(),
        }
    }
}

impl IconConfig {
    /// Read, parse and validate a YAML settings file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&contents)?;
        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: IconConfig = serde_yaml::from_str(contents)
            .context("Failed to parse config file")?;

        // Validate configuration after loading
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let render = &self.render;
        if render.canvas_size == 0 {
            bail!("canvas_size must be greater than 0");
        }
        if render.canvas_size > canvas::MAX_EDGE {
            bail!("canvas_size must be <= {}", canvas::MAX_EDGE);
        }
        if render.text.trim().is_empty() {
            bail!("text cannot be empty");
        }
        if !render.font_size.is_finite() || render.font_size <= 0.0 {
            bail!("font_size must be a positive number");
        }

        let output = &self.export;
        if output.icons_dir.as_os_str().is_empty() {
            bail!("icons_dir cannot be empty");
        }
        if output.iconset_dir.as_os_str().is_empty() {
            bail!("iconset_dir cannot be empty");
        }
        if output.sizes.is_empty() {
            bail!("sizes must list at least one size");
        }
        for &size in &output.sizes {
            if size == 0 || size > export::MAX_SIZE {
                bail!("size {} out of range (1..={})", size, export::MAX_SIZE);
            }
        }

        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .context("Failed to create config directory")?;
        }

        let yaml = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }
}
