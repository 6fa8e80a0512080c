//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or URLs.
//!
//! Math is done in `f64`. Results that do not fit a `u32` pixel count come
//! back as `None` rather than being clamped.

/// Round an `f64` pixel value, or `None` if it is not representable as `u32`.
fn to_pixels(value: f64) -> Option<u32> {
    let rounded = value.round();
    if !rounded.is_finite() || rounded < 0.0 || rounded > u32::MAX as f64 {
        return None;
    }
    Some(rounded as u32)
}

/// Multiply a pixel dimension by a density scale, rounding to the nearest pixel.
///
/// # Examples
/// ```
/// # use storefront_image::imaging::calculations::scale_dimension;
/// assert_eq!(scale_dimension(100, 2.0), Some(200));
/// assert_eq!(scale_dimension(33, 1.5), Some(50));
/// assert_eq!(scale_dimension(100, 1e9), None);
/// ```
pub fn scale_dimension(value: u32, scale: f64) -> Option<u32> {
    to_pixels(value as f64 * scale)
}

/// Aspect ratio (width / height) of a pair of dimensions.
///
/// Returns `None` if either side is zero, since no meaningful ratio exists.
pub fn ratio_of(width: u32, height: u32) -> Option<f64> {
    if width == 0 || height == 0 {
        return None;
    }
    Some(width as f64 / height as f64)
}

/// Height that keeps `ratio` for the given width.
///
/// # Examples
/// ```
/// # use storefront_image::imaging::calculations::height_for_width;
/// // 2:1 landscape, 100px wide → 50px tall
/// assert_eq!(height_for_width(100, 2.0), Some(50));
/// ```
pub fn height_for_width(width: u32, ratio: f64) -> Option<u32> {
    to_pixels(width as f64 / ratio)
}

/// Width that keeps `ratio` for the given height.
///
/// # Examples
/// ```
/// # use storefront_image::imaging::calculations::width_for_height;
/// // 2:1 landscape, 50px tall → 100px wide
/// assert_eq!(width_for_height(50, 2.0), Some(100));
/// ```
pub fn width_for_height(height: u32, ratio: f64) -> Option<u32> {
    to_pixels(height as f64 * ratio)
}

/// Pick the `srcset` widths worth offering for an image.
///
/// Widths larger than the intrinsic width are dropped since the CDN would only
/// upscale them. If every candidate exceeds the intrinsic width, the intrinsic
/// width is returned as the only entry. With no known intrinsic width all
/// candidates are kept. Order follows `candidates`.
pub fn responsive_widths(intrinsic_width: Option<u32>, candidates: &[u32]) -> Vec<u32> {
    let Some(max) = intrinsic_width else {
        return candidates.to_vec();
    };

    let widths: Vec<u32> = candidates.iter().copied().filter(|&w| w <= max).collect();

    if widths.is_empty() && max > 0 {
        return vec![max];
    }
    widths
}
