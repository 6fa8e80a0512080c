//! Display dimension resolution for storefront images.
//!
//! Width and height come from the first source that has either axis set, in
//! this order:
//!
//! 1. The caller's explicit override (loader options)
//! 2. A layout-supplied hint (element props)
//! 3. The image's intrinsic width/height
//!
//! When the winning hint sets only one axis, the other is derived from the
//! image's intrinsic aspect ratio. A lower-priority hint is never used to fill
//! the gap. Without a usable aspect ratio the missing axis stays `None`, which
//! callers render as "omit the attribute".
//!
//! ```text
//! intrinsic 400x200, override {width: 100}  → 100x50
//! intrinsic 400x200, override {height: 50}  → 100x50
//! intrinsic unknown, override {width: 80}   → 80x(none)
//! intrinsic 300x150, no hints               → 300x150
//! ```

use crate::imaging::{height_for_width, ratio_of, width_for_height};
use crate::types::{ImageSource, ResolvedDimensions, SizingHint};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DimensionError {
    #[error("invalid intrinsic {axis} {value}: must be positive to compute an aspect ratio")]
    InvalidDimension { axis: &'static str, value: u32 },
}

/// Intrinsic aspect ratio (width / height) of an image.
///
/// `Ok(None)` when either dimension is unknown. A recorded dimension of zero
/// is an [`DimensionError::InvalidDimension`].
pub fn aspect_ratio(image: &ImageSource) -> Result<Option<f64>, DimensionError> {
    let (Some(width), Some(height)) = (image.width, image.height) else {
        return Ok(None);
    };
    if width == 0 {
        return Err(DimensionError::InvalidDimension {
            axis: "width",
            value: width,
        });
    }
    if height == 0 {
        return Err(DimensionError::InvalidDimension {
            axis: "height",
            value: height,
        });
    }
    Ok(ratio_of(width, height))
}

/// Resolve the display width/height of an image.
///
/// `primary` outranks `secondary`, which outranks the image's own size.
/// Never fails: an invalid intrinsic size only disables aspect-ratio backfill.
pub fn resolve(
    image: &ImageSource,
    primary: Option<&SizingHint>,
    secondary: Option<&SizingHint>,
) -> ResolvedDimensions {
    let ratio = aspect_ratio(image).unwrap_or_else(|e| {
        tracing::warn!(url = %image.url, "{e}, skipping aspect ratio");
        None
    });

    let winner = [primary, secondary]
        .into_iter()
        .flatten()
        .find(|hint| hint.is_set());

    match winner {
        Some(hint) => {
            tracing::debug!(url = %image.url, ?hint, "dimensions from sizing hint");
            fill_from_ratio(hint, ratio)
        }
        None => ResolvedDimensions::new(image.width, image.height),
    }
}

/// Complete a hint's missing axis from the aspect ratio, if there is one.
///
/// A derived axis too large for `u32` is left `None`, same as having no ratio.
fn fill_from_ratio(hint: &SizingHint, ratio: Option<f64>) -> ResolvedDimensions {
    match (hint.width, hint.height, ratio) {
        (Some(w), None, Some(r)) => ResolvedDimensions::new(Some(w), height_for_width(w, r)),
        (None, Some(h), Some(r)) => ResolvedDimensions::new(width_for_height(h, r), Some(h)),
        (width, height, _) => ResolvedDimensions::new(width, height),
    }
}
