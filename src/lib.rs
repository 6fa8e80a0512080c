//! # Storefront Image
//!
//! Image URL and dimension resolution for storefront pages. Product and
//! collection images come from the storefront API as a URL plus, usually, an
//! intrinsic width and height. Before a page can emit an `<img>`, two things
//! have to be decided:
//!
//! ```text
//! 1. Which URL    image.url + loader options  →  CDN URL with ?width=&height=&crop=
//! 2. Which size   loader > element > intrinsic →  width/height attributes
//! ```
//!
//! Both are pure functions with no shared state; the only shared data is the
//! fixed CDN hostname allow-list.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`cdn`] | CDN host detection and resize-parameter rewriting |
//! | [`dimensions`] | Priority-ordered width/height resolution with aspect-ratio backfill |
//! | [`imaging`] | Pure dimension math (scaling, ratios, srcset candidates) |
//! | [`markup`] | `<img>` rendering with Maud |
//! | [`manifest`] | Parallel batch resolution of a JSON image manifest |
//! | [`config`] | `config.toml` loading, validation, and merging |
//! | [`types`] | Shared input/output types |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Scale Is Folded, Never Sent
//!
//! The CDN accepts a `scale` parameter, but it is never appended. Width and
//! height are multiplied by the scale before being written, so a 2x request
//! for a 100px slot asks for 200px.
//!
//! ## Zero Is a Value
//!
//! Every optional dimension is an `Option<u32>`. `Some(0)` is an explicit
//! zero-size request and is honored; only `None` means "not provided".
//!
//! ## Missing Means Omit
//!
//! A dimension that cannot be determined resolves to `None`. Renderers leave
//! the attribute off rather than writing `0` or failing the page.

pub mod cdn;
pub mod config;
pub mod dimensions;
pub mod imaging;
pub mod manifest;
pub mod markup;
pub mod output;
pub mod types;

pub use cdn::{LoaderError, rewrite};
pub use dimensions::{DimensionError, resolve};
pub use types::{CdnRewriteRequest, ImageSource, LoaderOptions, ResolvedDimensions, SizingHint};
