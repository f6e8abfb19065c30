//! Core library for planning texture atlas layouts.
//!
//! Given a set of source rectangles, the planner searches for a single
//! enclosing atlas that holds them all without overlap, under a dimension
//! restriction (`Any`, `Pow2`, `Pow2Square`), a reserved border and optional
//! 90 degree rotation.
//!
//! - Engines: MaxRects (BSSF/BLSF/BL/CP/BAF) and Guillotine (choice + split
//!   heuristics, optional free-list merge), both usable standalone through
//!   the [`packer::BinPacker`] trait.
//! - Planner: [`TextureBinPacker::try_process`] examines the input, picks a
//!   uniform-grid fast path or the general MaxRects search, and returns the
//!   first viable layout.
//!
//! Quick example:
//! ```
//! use atlas_packer_core::prelude::*;
//!
//! let packer = TextureBinPacker::new(AtlasConfig::default())?;
//! let images = vec![
//!     SourceImage { key: "grass", rect: Rect::new(0, 0, 64, 64) },
//!     SourceImage { key: "dirt", rect: Rect::new(0, 0, 32, 48) },
//! ];
//! let result = packer.try_process(&images)?;
//! println!("atlas: {}x{}", result.size.w, result.size.h);
//! # Ok::<(), atlas_packer_core::AtlasError>(())
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod packer;
pub mod planner;
pub mod sizing;

#[cfg(debug_assertions)]
mod invariant;

pub use config::*;
pub use error::*;
pub use model::*;
pub use planner::*;

/// Convenience prelude for common types and functions.
pub mod prelude {
    pub use crate::config::{
        AtlasConfig, AtlasConfigBuilder, GuillotineChoice, GuillotineSplit, MaxRectsHeuristic,
        SizeRestriction,
    };
    pub use crate::error::AtlasError;
    pub use crate::model::{
        PackResult, Placement, Point, Rect, Size, SourceImage, Thickness,
    };
    pub use crate::packer::{
        guillotine::GuillotineEngine, maxrects::MaxRectsEngine, BatchPlacement, BinPacker, Placed,
    };
    pub use crate::planner::TextureBinPacker;
}
