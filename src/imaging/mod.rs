//! Dimension math shared by the resolver and the markup layer.
//!
//! | Concern | Function |
//! |---|---|
//! | **Density scaling** | [`scale_dimension`] |
//! | **Aspect ratio** | [`ratio_of`] |
//! | **Axis backfill** | [`height_for_width`], [`width_for_height`] |
//! | **srcset candidates** | [`responsive_widths`] |
//!
//! Nothing here touches URLs or I/O; see [`crate::cdn`] and
//! [`crate::dimensions`] for the operations built on top.

pub mod calculations;

pub use calculations::{
    height_for_width, ratio_of, responsive_widths, scale_dimension, width_for_height,
};
