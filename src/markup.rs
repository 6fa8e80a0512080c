//! `<img>` element rendering.
//!
//! Combines the two pure operations into the markup a storefront page emits:
//!
//! - `src` comes from [`cdn::rewrite`] with the caller's loader options.
//! - `width`/`height` come from [`dimensions::resolve`], loader options first,
//!   then element props, then the image's intrinsic size. A dimension that
//!   cannot be determined is left off the element entirely, never rendered as `0`.
//! - `srcset` is only offered for CDN-hosted images, one candidate per
//!   configured width the image can actually serve. Candidates keep the shape
//!   of the resolved `width`/`height`, so a cropped `src` and its `srcset`
//!   agree.
//!
//! ```text
//! <img src="https://cdn.shopify.com/a.png?width=100" alt="Shoe"
//!      width="100" height="50" loading="lazy" decoding="async"
//!      srcset="https://cdn.shopify.com/a.png?width=352&height=176 352w, ..."
//!      sizes="100vw">
//! ```
//!
//! HTML escaping is handled by maud.

use crate::cdn::{self, LoaderError};
use crate::config::MarkupConfig;
use crate::dimensions::{self, aspect_ratio};
use crate::imaging::{height_for_width, ratio_of, responsive_widths};
use crate::types::{CdnRewriteRequest, ImageSource, LoaderOptions, ResolvedDimensions, SizingHint};
use maud::{Markup, html};
use url::Url;

/// Render an `<img>` element for a storefront image.
///
/// `srcset_widths` are the candidate widths from config; they are ignored for
/// images that are not served by the CDN.
pub fn render_image(
    image: &ImageSource,
    loader: Option<&LoaderOptions>,
    element: Option<&SizingHint>,
    srcset_widths: &[u32],
    config: &MarkupConfig,
) -> Result<Markup, LoaderError> {
    let src = match loader {
        Some(opts) => cdn::rewrite(&opts.to_request(&image.url))?,
        None => image.url.clone(),
    };
    let loader_hint = loader.map(LoaderOptions::as_hint);
    let dims = dimensions::resolve(image, loader_hint.as_ref(), element);

    let srcset = build_srcset(image, loader, &dims, srcset_widths)?;
    let sizes = srcset.as_ref().map(|_| config.sizes.as_str());
    let alt = image.alt_text.as_deref().unwrap_or("");

    Ok(html! {
        img src=(src)
            alt=(alt)
            width=[dims.width]
            height=[dims.height]
            loading=(config.loading.as_str())
            decoding=(config.decoding.as_str())
            srcset=[srcset]
            sizes=[sizes];
    })
}

/// Build the `srcset` attribute value, or `None` for non-CDN images.
///
/// Each candidate keeps the loader's crop token. Heights follow the ratio of
/// the resolved `dims` when both axes are known, falling back to the intrinsic
/// aspect ratio. Scale is not applied since each candidate is already a
/// physical width.
pub fn build_srcset(
    image: &ImageSource,
    loader: Option<&LoaderOptions>,
    dims: &ResolvedDimensions,
    widths: &[u32],
) -> Result<Option<String>, LoaderError> {
    let url = Url::parse(&image.url)?;
    if !cdn::is_cdn_hosted(&url) {
        return Ok(None);
    }

    let ratio = dims
        .width
        .zip(dims.height)
        .and_then(|(w, h)| ratio_of(w, h))
        .or_else(|| aspect_ratio(image).ok().flatten());
    let crop = loader.and_then(|opts| opts.crop.clone());

    let candidates = responsive_widths(image.width, widths)
        .into_iter()
        .map(|width| {
            let request = CdnRewriteRequest {
                width: Some(width),
                height: ratio.and_then(|r| height_for_width(width, r)),
                crop: crop.clone(),
                ..CdnRewriteRequest::new(image.url.as_str())
            };
            cdn::add_size_parameters(url.clone(), &request).map(|src| format!("{src} {width}w"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if candidates.is_empty() {
        return Ok(None);
    }
    Ok(Some(candidates.join(", ")))
}
