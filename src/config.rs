//! Markup configuration module.
//!
//! Handles loading, validating, and merging a `config.toml` that controls how
//! `<img>` elements are emitted. Stock defaults are overridden by whatever the
//! user file specifies.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [srcset]
//! widths = [352, 832, 1200, 1920, 2560]  # Candidate widths for srcset
//!
//! [markup]
//! loading = "lazy"     # lazy | eager
//! decoding = "async"   # async | sync | auto
//! sizes = "100vw"      # sizes attribute emitted alongside srcset
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! [markup]
//! loading = "eager"
//! ```
//!
//! Unknown keys are rejected to catch typos early. The CDN hostname
//! allow-list is fixed and not configurable here.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    /// Responsive `srcset` candidates.
    pub srcset: SrcsetConfig,
    /// `<img>` attribute defaults.
    pub markup: MarkupConfig,
}

impl ImageConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.srcset.widths.is_empty() {
            return Err(ConfigError::Validation(
                "srcset.widths must not be empty".into(),
            ));
        }
        if self.srcset.widths.contains(&0) {
            return Err(ConfigError::Validation(
                "srcset.widths values must be non-zero".into(),
            ));
        }
        if self.markup.sizes.trim().is_empty() {
            return Err(ConfigError::Validation(
                "markup.sizes must not be blank".into(),
            ));
        }
        Ok(())
    }
}

/// Responsive image candidate settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SrcsetConfig {
    /// Pixel widths offered in `srcset`, smallest first.
    pub widths: Vec<u32>,
}

impl Default for SrcsetConfig {
    fn default() -> Self {
        Self {
            widths: vec![352, 832, 1200, 1920, 2560],
        }
    }
}

/// `<img>` attributes not derived from the image itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkupConfig {
    pub loading: Loading,
    pub decoding: Decoding,
    /// Value of the `sizes` attribute, only emitted together with `srcset`.
    pub sizes: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            loading: Loading::Lazy,
            decoding: Decoding::Async,
            sizes: "100vw".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Loading {
    Lazy,
    Eager,
}

impl Loading {
    pub fn as_str(self) -> &'static str {
        match self {
            Loading::Lazy => "lazy",
            Loading::Eager => "eager",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decoding {
    Async,
    Sync,
    Auto,
}

impl Decoding {
    pub fn as_str(self) -> &'static str {
        match self {
            Decoding::Async => "async",
            Decoding::Sync => "sync",
            Decoding::Auto => "auto",
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ImageConfig::default())
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

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<ImageConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ImageConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file.
///
/// `None` yields the validated stock defaults. A path that does not exist is
/// an IO error: a config file the user named explicitly must be there.
pub fn load_config(path: Option<&Path>) -> Result<ImageConfig, ConfigError> {
    let overlay = match path {
        Some(p) => {
            let content = fs::read_to_string(p)?;
            tracing::debug!(path = %p.display(), "loaded config");
            Some(toml::from_str::<toml::Value>(&content)?)
        }
        None => None,
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# storefront-image configuration
# ==============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Responsive images
# ---------------------------------------------------------------------------
[srcset]
# Candidate widths offered in srcset for CDN-hosted images.
# Widths above the image's intrinsic width are skipped.
widths = [352, 832, 1200, 1920, 2560]

# ---------------------------------------------------------------------------
# <img> attributes
# ---------------------------------------------------------------------------
[markup]
# lazy | eager
loading = "lazy"

# async | sync | auto
decoding = "async"

# sizes attribute emitted alongside srcset.
sizes = "100vw"
"##
}
