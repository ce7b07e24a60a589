//! Voxel selection and render-budget engine for 3D density heatmaps.
//!
//! Given a fully populated voxel set (each voxel carrying a 3D grid
//! coordinate and an occupancy count) and a hard ceiling on how many
//! voxels may actually be drawn, this crate decides *which* voxels make
//! the cut. Three competing goals are reconciled under the budget:
//! preserving the highest-density hot-spots, preserving spatial
//! representativeness so sparse regions stay visible, and honoring a
//! caller-supplied "always show" set.
//!
//! # Overview
//!
//! Three strategies with different trade-offs:
//!
//! - **Density** ([`density_select`]): rank purely by occupancy count.
//!   Strict about its input contract; the canonical fallback.
//! - **Coverage** ([`coverage_select`]): stratified sampling across a 2D
//!   spatial bin grid, guaranteeing geographic spread. Tolerant of
//!   malformed grids and counts at the data boundary.
//! - **Hybrid** ([`hybrid_select`]): composes the two under a
//!   configurable coverage/density budget split.
//!
//! The [`VoxelSelector`] orchestrator validates inputs, computes the
//! "top N densest" force-include set, dispatches to the configured
//! strategy, and falls back to density on failure so the caller always
//! receives a usable, budget-respecting result.
//!
//! # Quick Start
//!
//! ```
//! use heatmap_select::VoxelSelector;
//! use heatmap_types::{GridDims, SelectorConfig, StrategyKind, Voxel, VoxelCoord};
//!
//! let voxels: Vec<Voxel> = (0..100)
//!     .map(|i| Voxel::new(VoxelCoord::new(i % 10, i / 10, 0), f64::from(i)))
//!     .collect();
//! let grid = GridDims::new(10, 10, 1);
//!
//! let mut selector = VoxelSelector::new(
//!     SelectorConfig::default()
//!         .with_strategy(StrategyKind::Hybrid)
//!         .with_highlight_top_n(5),
//! );
//!
//! let outcome = selector.select_voxels(&voxels, 20, grid);
//! assert_eq!(outcome.voxels.len(), 20);
//! assert_eq!(outcome.snapshot.clipped_non_empty, 80);
//!
//! // The 5 densest voxels survive regardless of strategy
//! assert!(outcome.voxels.iter().any(|v| v.count == 99.0));
//! ```
//!
//! # Strategy Selection
//!
//! | Strategy | Best For | Trade-offs |
//! |----------|----------|------------|
//! | Density  | Hot-spot analysis | Sparse regions may vanish entirely |
//! | Coverage | Geographic overviews | Hot-spots compete with empty-ish bins |
//! | Hybrid   | General rendering | One more knob to tune |
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization/deserialization for all result types

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod coverage;
pub mod density;
pub mod hybrid;
pub mod selector;

// Re-export main entry points at crate root for convenience
pub use coverage::{coverage_select, coverage_select_with_rng};
pub use density::density_select;
pub use hybrid::{hybrid_select, hybrid_select_with_rng};
pub use selector::VoxelSelector;
