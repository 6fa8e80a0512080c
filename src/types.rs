//! Shared types passed between the resolver, the URL rewriter, and the
//! markup/batch layers.
//!
//! Image metadata comes from the storefront API, which uses camelCase field
//! names (`altText`). Both spellings are accepted on input.

use serde::{Deserialize, Serialize};

/// An image as recorded by the storefront API.
///
/// Only `url` is guaranteed. The intrinsic `width`/`height` are present when
/// the origin system recorded them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, alias = "altText", skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    /// Intrinsic width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Intrinsic height in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ImageSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Builder-style helper for the intrinsic dimensions.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// A partial width/height pair supplied by a caller or a layout.
///
/// `Some(0)` is an explicit zero, not "absent".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizingHint {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl SizingHint {
    pub fn new(width: Option<u32>, height: Option<u32>) -> Self {
        Self { width, height }
    }

    pub fn width(width: u32) -> Self {
        Self::new(Some(width), None)
    }

    pub fn height(height: u32) -> Self {
        Self::new(None, Some(height))
    }

    /// True when at least one axis is present.
    pub fn is_set(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }
}

/// A request to size an image URL on the CDN.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CdnRewriteRequest {
    pub source_url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Opaque crop region token (`"center"`, `"top"`, ...), passed through unscaled.
    pub crop: Option<String>,
    /// Pixel-density multiplier folded into width and height. Absent means 1.
    pub scale: Option<f64>,
}

impl CdnRewriteRequest {
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            ..Self::default()
        }
    }

    /// True when any of width, height, crop or scale was supplied.
    pub fn has_sizing(&self) -> bool {
        self.width.is_some() || self.height.is_some() || self.crop.is_some() || self.scale.is_some()
    }
}

/// Explicit sizing options handed to the image component by the caller.
///
/// These are the highest-priority dimensions and also drive the CDN rewrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoaderOptions {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub crop: Option<String>,
    #[serde(default)]
    pub scale: Option<f64>,
}

impl LoaderOptions {
    pub fn as_hint(&self) -> SizingHint {
        SizingHint::new(self.width, self.height)
    }

    pub fn to_request(&self, source_url: &str) -> CdnRewriteRequest {
        CdnRewriteRequest {
            source_url: source_url.to_string(),
            width: self.width,
            height: self.height,
            crop: self.crop.clone(),
            scale: self.scale,
        }
    }
}

/// Final display dimensions. `None` means "omit the attribute".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDimensions {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ResolvedDimensions {
    pub fn new(width: Option<u32>, height: Option<u32>) -> Self {
        Self { width, height }
    }
}
