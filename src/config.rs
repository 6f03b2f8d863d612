//! Gallery configuration module.
//!
//! Handles loading, merging and validating an optional `grid.toml` placed at the
//! document root. Stock defaults reproduce the standard layout, so most sites
//! never need the file at all:
//!
//! ```text
//! site/
//! ├── grid.toml                  # Optional overrides
//! ├── index.html                 # Target document (markers live here)
//! ├── product-blue-vase.html     # Optional detail page for blue-vase.jpg
//! └── public/
//!     └── etsy_photos/
//!         ├── blue-vase.jpg
//!         └── Sunset View.png
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! public_dir = "public"        # Public assets directory (relative to root)
//! photos_dir = "etsy_photos"   # Image directory (relative to public_dir)
//! document = "index.html"      # Target document (relative to root)
//!
//! [markers]
//! start = "<!-- GRID:START -->"
//! end = "<!-- GRID:END -->"
//!
//! [images]
//! extensions = ["jpg", "jpeg", "png", "webp", "gif"]
//!
//! [detail_pages]
//! prefix = "product-"          # Detail page = <prefix><slug>.html at the root
//! clean_urls = true            # Link to /<prefix><slug> without .html
//!
//! [ci]
//! env_var = "CI"               # Non-empty value = fail when no images
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::fs::FileSystem;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the optional config file at the document root.
pub const CONFIG_FILENAME: &str = "grid.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `grid.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Public assets directory, relative to the document root.
    pub public_dir: String,
    /// Image directory, relative to `public_dir`.
    pub photos_dir: String,
    /// Target document, relative to the document root.
    pub document: String,
    pub markers: MarkersConfig,
    pub images: ImagesConfig,
    pub detail_pages: DetailPagesConfig,
    pub ci: CiConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            public_dir: "public".to_string(),
            photos_dir: "etsy_photos".to_string(),
            document: "index.html".to_string(),
            markers: MarkersConfig::default(),
            images: ImagesConfig::default(),
            detail_pages: DetailPagesConfig::default(),
            ci: CiConfig::default(),
        }
    }
}

impl GridConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("public_dir", &self.public_dir),
            ("photos_dir", &self.photos_dir),
            ("document", &self.document),
            ("ci.env_var", &self.ci.env_var),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.markers.start.is_empty() || self.markers.end.is_empty() {
            return Err(ConfigError::Validation(
                "markers.start and markers.end must not be empty".into(),
            ));
        }
        if self.markers.start == self.markers.end {
            return Err(ConfigError::Validation(
                "markers.start and markers.end must differ".into(),
            ));
        }
        if self.images.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "images.extensions must not be empty".into(),
            ));
        }
        if self.images.extensions.iter().any(|e| e.starts_with('.')) {
            return Err(ConfigError::Validation(
                "images.extensions are written without a leading dot".into(),
            ));
        }
        Ok(())
    }

    pub fn public_path(&self, root: &Path) -> PathBuf {
        root.join(&self.public_dir)
    }

    pub fn photos_path(&self, root: &Path) -> PathBuf {
        self.public_path(root).join(&self.photos_dir)
    }

    pub fn document_path(&self, root: &Path) -> PathBuf {
        root.join(&self.document)
    }

    /// Site-absolute URL prefix of the image directory, e.g. `/public/etsy_photos`.
    pub fn photos_url(&self) -> String {
        format!(
            "/{}/{}",
            self.public_dir.trim_matches('/'),
            self.photos_dir.trim_matches('/')
        )
    }
}

/// Start/end comments delimiting the generated region of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkersConfig {
    pub start: String,
    pub end: String,
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            start: "<!-- GRID:START -->".to_string(),
            end: "<!-- GRID:END -->".to_string(),
        }
    }
}

/// Image eligibility settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Allowed extensions, compared case-insensitively.
    pub extensions: Vec<String>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            extensions: ["jpg", "jpeg", "png", "webp", "gif"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ImagesConfig {
    pub fn allows(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}

/// Per-image detail page settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetailPagesConfig {
    /// Detail pages are named `<prefix><slug>.html`.
    pub prefix: String,
    /// Omit `.html` from generated links (the host resolves clean URLs).
    pub clean_urls: bool,
}

impl Default for DetailPagesConfig {
    fn default() -> Self {
        Self {
            prefix: "product-".to_string(),
            clean_urls: true,
        }
    }
}

impl DetailPagesConfig {
    /// Filename of the detail page for a slug.
    pub fn filename(&self, slug: &str) -> String {
        format!("{}{}.html", self.prefix, slug)
    }

    /// Site-absolute link to the detail page for a slug.
    pub fn href(&self, slug: &str) -> String {
        if self.clean_urls {
            format!("/{}{}", self.prefix, slug)
        } else {
            format!("/{}", self.filename(slug))
        }
    }
}

/// Continuous-integration signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CiConfig {
    /// Environment variable that marks a CI run when set to a non-empty value.
    pub env_var: String,
}

impl Default for CiConfig {
    fn default() -> Self {
        Self {
            env_var: "CI".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(GridConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `grid.toml` from the document root as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(
    fs: &dyn FileSystem,
    root: &Path,
) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !fs.exists(&config_path) {
        return Ok(None);
    }
    let content = fs.read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GridConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GridConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `grid.toml` at the document root, falling back to defaults.
pub fn load_config(fs: &dyn FileSystem, root: &Path) -> Result<GridConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(fs, root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `grid.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# grid-inject configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Public assets directory, relative to the document root.
public_dir = "public"

# Image directory, relative to public_dir. Created on first run.
photos_dir = "etsy_photos"

# Document that receives the gallery grid, relative to the document root.
document = "index.html"

# ---------------------------------------------------------------------------
# Markers
# ---------------------------------------------------------------------------
# Everything between these two comments is owned by grid-inject and is
# rewritten on every run. Content outside them is never touched.
[markers]
start = "<!-- GRID:START -->"
end = "<!-- GRID:END -->"

# ---------------------------------------------------------------------------
# Images
# ---------------------------------------------------------------------------
[images]
# Eligible extensions, compared case-insensitively, without the dot.
extensions = ["jpg", "jpeg", "png", "webp", "gif"]

# ---------------------------------------------------------------------------
# Detail pages
# ---------------------------------------------------------------------------
# A card links to <prefix><slug>.html when that file exists at the root.
[detail_pages]
prefix = "product-"

# Link to /<prefix><slug> instead of /<prefix><slug>.html.
clean_urls = true

# ---------------------------------------------------------------------------
# Continuous integration
# ---------------------------------------------------------------------------
# When this variable is set to a non-empty value, an empty image directory
# fails the run instead of injecting the placeholder.
[ci]
env_var = "CI"
"##
}
