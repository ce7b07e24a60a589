//! Core types for voxel density heatmap selection.
//!
//! This crate provides the foundational types for rendering 3D density
//! heatmaps under a render budget: point-like objects are binned into a
//! regular voxel grid upstream, and a selection engine (the
//! `heatmap-select` crate) decides which populated voxels are actually
//! drawn.
//!
//! # Overview
//!
//! The domain is organized into several conceptual areas:
//!
//! - **Coordinates**: Discrete grid positions ([`VoxelCoord`]) and populated
//!   cells carrying an occupancy count ([`Voxel`])
//! - **Grid extent**: Dimensions of the 3D index space ([`GridDims`])
//! - **Configuration**: Strategy selection and tuning knobs
//!   ([`SelectorConfig`], [`CoverageParams`], [`HybridParams`])
//! - **Results**: Selected voxels with per-strategy statistics
//!   ([`Selection`], [`SelectionOutcome`], [`SelectionSnapshot`])
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero rendering dependencies**. It can be
//! used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Any 3D engine that consumes the selected voxel list
//!
//! # Example
//!
//! ```
//! use heatmap_types::{GridDims, SelectorConfig, StrategyKind, Voxel, VoxelCoord};
//!
//! // A populated voxel: grid cell (3, 4, 0) holding 12 source points
//! let voxel = Voxel::new(VoxelCoord::new(3, 4, 0), 12.0);
//! assert_eq!(voxel.coord.key(), "3,4,0");
//!
//! // The extent of the index space
//! let grid = GridDims::new(64, 32, 16);
//! assert_eq!(grid.clamped_x(), 64);
//!
//! // Configure selection: hybrid strategy, always keep the 10 densest cells
//! let config = SelectorConfig::default()
//!     .with_strategy(StrategyKind::Hybrid)
//!     .with_highlight_top_n(10);
//! assert_eq!(config.strategy, StrategyKind::Hybrid);
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization/deserialization for all types

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod grid;
pub mod selection;
pub mod voxel;

// Re-export main types at crate root for convenience
pub use config::{
    BinSelectionMode, CoverageBins, CoverageParams, HybridParams, SelectorConfig, StrategyKind,
};
pub use error::{SelectionError, SelectionResult};
pub use grid::GridDims;
pub use selection::{
    AppliedStrategy, CoverageStats, DensityRange, DensityStats, HybridStats, Selection,
    SelectionOutcome, SelectionSnapshot, StrategyStats,
};
pub use voxel::{Voxel, VoxelCoord};
