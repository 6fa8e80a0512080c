//! Batch resolution over a JSON manifest of images.
//!
//! A manifest is a JSON array where each entry carries the storefront image
//! plus the same optional sizing inputs a single `<img>` would get:
//!
//! ```json
//! [
//!   {
//!     "image": {"url": "https://cdn.shopify.com/a.png", "width": 400, "height": 200},
//!     "loader_options": {"width": 100, "crop": "center", "scale": 2},
//!     "element_props": {"height": 80}
//!   }
//! ]
//! ```
//!
//! Every entry is resolved independently, so the work is spread over the
//! rayon thread pool. Output order matches input order.

use crate::cdn::{self, LoaderError};
use crate::dimensions;
use crate::types::{ImageSource, LoaderOptions, SizingHint};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("entry {index} ({url}): {source}")]
    Loader {
        index: usize,
        url: String,
        #[source]
        source: LoaderError,
    },
}

/// One image to resolve.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BatchEntry {
    pub image: ImageSource,
    #[serde(default, alias = "loaderOptions", skip_serializing_if = "Option::is_none")]
    pub loader_options: Option<LoaderOptions>,
    #[serde(default, alias = "elementProps", skip_serializing_if = "Option::is_none")]
    pub element_props: Option<SizingHint>,
}

/// A resolved image: the URL to request and the attributes to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedImage {
    /// The original image URL.
    pub url: String,
    /// The URL to put in `src` (rewritten for the CDN when applicable).
    pub src: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

/// Resolve a single manifest entry.
pub fn resolve_entry(entry: &BatchEntry) -> Result<ResolvedImage, LoaderError> {
    let image = &entry.image;
    let src = match &entry.loader_options {
        Some(opts) => cdn::rewrite(&opts.to_request(&image.url))?,
        None => {
            // Still reject malformed URLs even when no rewrite is requested.
            url::Url::parse(&image.url)?;
            image.url.clone()
        }
    };

    let loader_hint = entry.loader_options.as_ref().map(LoaderOptions::as_hint);
    let dims = dimensions::resolve(image, loader_hint.as_ref(), entry.element_props.as_ref());

    Ok(ResolvedImage {
        url: image.url.clone(),
        src,
        width: dims.width,
        height: dims.height,
        alt_text: image.alt_text.clone(),
    })
}

/// Resolve every entry in parallel.
///
/// Stops at the first failing entry and reports its position.
pub fn resolve_entries(entries: &[BatchEntry]) -> Result<Vec<ResolvedImage>, ManifestError> {
    let resolved = entries
        .par_iter()
        .enumerate()
        .map(|(index, entry)| {
            resolve_entry(entry).map_err(|source| ManifestError::Loader {
                index,
                url: entry.image.url.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(count = resolved.len(), "resolved manifest entries");
    Ok(resolved)
}

/// Parse a manifest from its JSON text.
pub fn parse_manifest(json: &str) -> Result<Vec<BatchEntry>, ManifestError> {
    Ok(serde_json::from_str(json)?)
}

/// Read a manifest file and resolve all of its entries.
pub fn resolve_manifest(path: &Path) -> Result<Vec<ResolvedImage>, ManifestError> {
    let content = std::fs::read_to_string(path)?;
    let entries = parse_manifest(&content)?;
    tracing::debug!(path = %path.display(), entries = entries.len(), "read manifest");
    resolve_entries(&entries)
}
