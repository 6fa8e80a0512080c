//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure — no I/O, no side effects.
//!
//! Missing dimensions print as `-` so scripts can tell "unknown" apart from a
//! literal zero.
//!
//! ```text
//! $ storefront-image dimensions --intrinsic-width 400 --intrinsic-height 200 --width 100
//! width: 100
//! height: 50
//! ```

use crate::manifest::ResolvedImage;
use crate::types::ResolvedDimensions;

fn dimension(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub fn format_dimensions(dims: &ResolvedDimensions) -> Vec<String> {
    vec![
        format!("width: {}", dimension(dims.width)),
        format!("height: {}", dimension(dims.height)),
    ]
}

pub fn print_dimensions(dims: &ResolvedDimensions) {
    for line in format_dimensions(dims) {
        println!("{}", line);
    }
}

/// One line per resolved image: `WxH src`, with the original URL indented
/// underneath when it was rewritten.
///
/// ```text
/// 100x50 https://cdn.shopify.com/a.png?width=200
///     Source: https://cdn.shopify.com/a.png
/// -x- https://example.com/b.png
/// ```
pub fn format_batch(images: &[ResolvedImage]) -> Vec<String> {
    let mut lines = Vec::with_capacity(images.len());
    for image in images {
        lines.push(format!(
            "{}x{} {}",
            dimension(image.width),
            dimension(image.height),
            image.src
        ));
        if image.src != image.url {
            lines.push(format!("    Source: {}", image.url));
        }
    }
    lines.push(format!("Resolved {} images", images.len()));
    lines
}

pub fn print_batch(images: &[ResolvedImage]) {
    for line in format_batch(images) {
        println!("{}", line);
    }
}
