//! CDN detection and resize-parameter rewriting for image URLs.
//!
//! The storefront's image CDN resizes on the fly when `width`, `height` and
//! `crop` query parameters are present. This module decides whether a URL is
//! served by that CDN and, if the caller asked for a size, appends the
//! parameters.
//!
//! ## Host Matching
//!
//! A URL is CDN-hosted when its hostname *ends with* one of
//! [`cdn_hostnames`], so any subdomain of a listed domain matches. Hosts are
//! compared after URL parsing, which lowercases and percent-decodes them:
//!
//! ```text
//! cdn.shopify.com            → match
//! images.cdn.shopify.com     → match (suffix)
//! store.spin.dev             → match (local development)
//! CDN.Shopify.com            → match (normalized to cdn.shopify.com)
//! example.com                → no match, URL returned untouched
//! ```
//!
//! ## Parameter Order
//!
//! Parameters are appended as `width`, `height`, `crop`, each only when
//! supplied. `scale` is never sent to the CDN; it is folded into width and
//! height instead. Existing query parameters are kept, and a same-named
//! parameter already on the URL is not overwritten.

use crate::imaging::scale_dimension;
use crate::types::CdnRewriteRequest;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, PartialEq)]
pub enum LoaderError {
    #[error("invalid image URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid scale {0}: must be a finite positive number")]
    InvalidScale(f64),
    #[error("{axis} {value} at scale {scale} does not fit in a pixel count")]
    DimensionOverflow {
        axis: &'static str,
        value: u32,
        scale: f64,
    },
}

/// Production image CDN domains.
pub const PRODUCTION_CDN_HOSTNAMES: &[&str] = &[
    "cdn.shopify.com",
    "cdn.shopifycdn.net",
    "shopify-assets.shopifycdn.com",
    "shopify-assets.shopifycdn.net",
];

/// Local development domains that proxy the CDN.
pub const LOCAL_CDN_HOSTNAMES: &[&str] = &["spin.dev"];

/// Every domain whose images accept resize parameters: production first,
/// then local.
pub fn cdn_hostnames() -> impl Iterator<Item = &'static str> {
    PRODUCTION_CDN_HOSTNAMES
        .iter()
        .chain(LOCAL_CDN_HOSTNAMES)
        .copied()
}

/// Suffix match of a hostname against [`cdn_hostnames`].
pub fn is_cdn_hostname(hostname: &str) -> bool {
    cdn_hostnames().any(|allowed| hostname.ends_with(allowed))
}

/// Whether a parsed URL is served by the image CDN.
///
/// URLs without a host (`data:`, `mailto:`) never match.
pub fn is_cdn_hosted(url: &Url) -> bool {
    url.host_str().is_some_and(is_cdn_hostname)
}

/// Rewrite an image URL so the CDN serves it at the requested size.
///
/// Returns `source_url` verbatim when the host is not a CDN host or when the
/// request carries no sizing parameters at all.
///
/// # Errors
/// - [`LoaderError::InvalidUrl`] if `source_url` is not an absolute URL.
/// - [`LoaderError::InvalidScale`] if a scale is given but not positive.
/// - [`LoaderError::DimensionOverflow`] if a scaled size exceeds `u32::MAX`.
pub fn rewrite(request: &CdnRewriteRequest) -> Result<String, LoaderError> {
    let url = Url::parse(&request.source_url)?;

    if !is_cdn_hosted(&url) {
        tracing::debug!(url = %request.source_url, "not a CDN host, leaving URL as is");
        return Ok(request.source_url.clone());
    }
    if !request.has_sizing() {
        return Ok(request.source_url.clone());
    }

    add_size_parameters(url, request)
}

/// Append `width`, `height` and `crop` to a CDN URL.
///
/// Width and height are multiplied by `scale` (default 1) and rounded.
/// No host check is performed; use [`rewrite`] for the guarded version.
pub fn add_size_parameters(mut url: Url, request: &CdnRewriteRequest) -> Result<String, LoaderError> {
    let scale = match request.scale {
        Some(s) if !s.is_finite() || s <= 0.0 => return Err(LoaderError::InvalidScale(s)),
        Some(s) => s,
        None => 1.0,
    };

    let scaled = |axis: &'static str, value: u32| {
        scale_dimension(value, scale).ok_or(LoaderError::DimensionOverflow { axis, value, scale })
    };

    let mut params: Vec<(&str, String)> = Vec::with_capacity(3);
    if let Some(width) = request.width {
        params.push(("width", scaled("width", width)?.to_string()));
    }
    if let Some(height) = request.height {
        params.push(("height", scaled("height", height)?.to_string()));
    }
    if let Some(crop) = &request.crop {
        params.push(("crop", crop.clone()));
    }

    // An empty serializer would still leave a trailing `?` behind.
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str) -> CdnRewriteRequest {
        CdnRewriteRequest::new(url)
    }

    fn query_pairs(url: &str) -> Vec<(String, String)> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    // =========================================================================
    // Host matching
    // =========================================================================

    #[test]
    fn every_listed_hostname_matches() {
        for host in PRODUCTION_CDN_HOSTNAMES.iter().chain(LOCAL_CDN_HOSTNAMES) {
            assert!(is_cdn_hostname(host), "{host} should match");
        }
    }

    #[test]
    fn combined_list_is_production_then_local() {
        let all: Vec<&str> = cdn_hostnames().collect();
        let expected: Vec<&str> = [PRODUCTION_CDN_HOSTNAMES, LOCAL_CDN_HOSTNAMES].concat();
        assert_eq!(all, expected);
    }

    #[test]
    fn subdomain_matches_by_suffix() {
        assert!(is_cdn_hostname("images.cdn.shopify.com"));
        assert!(is_cdn_hostname("my-store.spin.dev"));
    }

    #[test]
    fn unrelated_host_does_not_match() {
        assert!(!is_cdn_hostname("example.com"));
        assert!(!is_cdn_hostname("cdn.shopify.com.example.com"));
    }

    #[test]
    fn mixed_case_host_is_normalized_before_matching() {
        let url = Url::parse("https://CDN.Shopify.COM/a.png").unwrap();
        assert_eq!(url.host_str(), Some("cdn.shopify.com"));
        assert!(is_cdn_hosted(&url));
    }

    #[test]
    fn percent_encoded_host_is_decoded_before_matching() {
        let url = Url::parse("https://cdn%2Eshopify.com/a.png").unwrap();
        assert_eq!(url.host_str(), Some("cdn.shopify.com"));
        assert!(is_cdn_hosted(&url));
    }

    #[test]
    fn data_url_is_not_cdn_hosted() {
        let url = Url::parse("data:image/png;base64,AAAA").unwrap();
        assert!(!is_cdn_hosted(&url));
    }

    // =========================================================================
    // rewrite
    // =========================================================================

    #[test]
    fn no_sizing_returns_input_verbatim() {
        let src = "https://cdn.shopify.com/s/files/a.png?v=123";
        assert_eq!(rewrite(&request(src)).unwrap(), src);
    }

    #[test]
    fn non_cdn_host_returns_input_verbatim() {
        let src = "https://example.com/a.png";
        let req = CdnRewriteRequest {
            width: Some(100),
            crop: Some("center".into()),
            ..request(src)
        };
        assert_eq!(rewrite(&req).unwrap(), src);
    }

    #[test]
    fn width_and_height_appended_in_order() {
        let req = CdnRewriteRequest {
            width: Some(100),
            height: Some(50),
            ..request("https://cdn.shopify.com/a.png")
        };
        assert_eq!(
            rewrite(&req).unwrap(),
            "https://cdn.shopify.com/a.png?width=100&height=50"
        );
    }

    #[test]
    fn scale_is_folded_not_appended() {
        let req = CdnRewriteRequest {
            width: Some(100),
            height: Some(50),
            scale: Some(2.0),
            ..request("https://cdn.shopify.com/a.png")
        };
        let out = rewrite(&req).unwrap();
        assert_eq!(
            query_pairs(&out),
            vec![
                ("width".to_string(), "200".to_string()),
                ("height".to_string(), "100".to_string()),
            ]
        );
    }

    #[test]
    fn crop_is_not_scaled() {
        let req = CdnRewriteRequest {
            crop: Some("center".into()),
            scale: Some(3.0),
            ..request("https://cdn.shopify.com/a.png")
        };
        assert_eq!(rewrite(&req).unwrap(), "https://cdn.shopify.com/a.png?crop=center");
    }

    #[test]
    fn scale_alone_rewrites_without_params() {
        // Scale counts as sizing, but has nothing to fold into.
        let req = CdnRewriteRequest {
            scale: Some(2.0),
            ..request("https://cdn.shopify.com/a.png")
        };
        assert_eq!(rewrite(&req).unwrap(), "https://cdn.shopify.com/a.png");
    }

    #[test]
    fn mixed_case_host_is_rewritten_with_normalized_host() {
        let req = CdnRewriteRequest {
            width: Some(100),
            ..request("https://CDN.Shopify.com/a.png")
        };
        assert_eq!(rewrite(&req).unwrap(), "https://cdn.shopify.com/a.png?width=100");
    }

    #[test]
    fn zero_width_is_explicit() {
        let req = CdnRewriteRequest {
            width: Some(0),
            ..request("https://cdn.shopify.com/a.png")
        };
        assert_eq!(rewrite(&req).unwrap(), "https://cdn.shopify.com/a.png?width=0");
    }

    #[test]
    fn existing_params_are_kept_and_not_overwritten() {
        let req = CdnRewriteRequest {
            width: Some(300),
            ..request("https://cdn.shopify.com/a.png?v=1&width=10")
        };
        assert_eq!(
            rewrite(&req).unwrap(),
            "https://cdn.shopify.com/a.png?v=1&width=10&width=300"
        );
    }

    #[test]
    fn fractional_scale_rounds() {
        let req = CdnRewriteRequest {
            width: Some(101),
            scale: Some(1.5),
            ..request("https://cdn.shopify.com/a.png")
        };
        // 151.5 → 152
        assert_eq!(rewrite(&req).unwrap(), "https://cdn.shopify.com/a.png?width=152");
    }

    #[test]
    fn relative_url_is_invalid() {
        let err = rewrite(&request("/images/a.png")).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidUrl(_)));
    }

    #[test]
    fn non_positive_scale_is_rejected() {
        let req = CdnRewriteRequest {
            width: Some(100),
            scale: Some(0.0),
            ..request("https://cdn.shopify.com/a.png")
        };
        assert_eq!(rewrite(&req).unwrap_err(), LoaderError::InvalidScale(0.0));
    }

    #[test]
    fn nan_scale_is_rejected() {
        let req = CdnRewriteRequest {
            scale: Some(f64::NAN),
            ..request("https://cdn.shopify.com/a.png")
        };
        assert!(matches!(rewrite(&req), Err(LoaderError::InvalidScale(_))));
    }

    #[test]
    fn scaled_width_past_u32_is_rejected() {
        let req = CdnRewriteRequest {
            width: Some(100),
            scale: Some(1e9),
            ..request("https://cdn.shopify.com/a.png")
        };
        assert_eq!(
            rewrite(&req).unwrap_err(),
            LoaderError::DimensionOverflow {
                axis: "width",
                value: 100,
                scale: 1e9
            }
        );
    }

    #[test]
    fn scaled_height_past_u32_is_rejected() {
        let req = CdnRewriteRequest {
            width: Some(1),
            height: Some(u32::MAX),
            scale: Some(2.0),
            ..request("https://cdn.shopify.com/a.png")
        };
        assert!(matches!(
            rewrite(&req),
            Err(LoaderError::DimensionOverflow { axis: "height", .. })
        ));
    }

    #[test]
    fn crop_token_is_form_encoded() {
        let req = CdnRewriteRequest {
            crop: Some("top left".into()),
            ..request("https://cdn.shopify.com/a.png")
        };
        assert_eq!(
            rewrite(&req).unwrap(),
            "https://cdn.shopify.com/a.png?crop=top+left"
        );
    }
}
