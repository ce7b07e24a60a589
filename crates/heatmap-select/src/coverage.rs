//! Coverage (stratified sampling) selection.
//!
//! Guarantees spatial representativeness: candidates are partitioned into
//! a `bins × bins` grid of X/Y spatial bins and picked round-robin across
//! the bins, so sparse regions survive selection instead of losing every
//! slot to a handful of dense hot-spots.
//!
//! This is the data-boundary layer of the engine: degenerate grids, empty
//! inputs, and non-finite counts are clamped or tolerated, never errors.

// Bin indices are tiny and non-negative after clamping
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::collections::{BTreeMap, HashSet};

use rand::Rng;
use tracing::debug;

use heatmap_types::{
    BinSelectionMode, CoverageParams, CoverageStats, GridDims, Selection, StrategyStats, Voxel,
    VoxelCoord,
};

/// Selects up to `budget` voxels via stratified spatial sampling, using a
/// thread-local random source for [`BinSelectionMode::Random`].
///
/// See [`coverage_select_with_rng`] for the full algorithm description and
/// a deterministic entry point.
#[must_use]
pub fn coverage_select(
    voxels: &[Voxel],
    budget: usize,
    grid: GridDims,
    force_include: &HashSet<VoxelCoord>,
    params: &CoverageParams,
) -> Selection {
    coverage_select_with_rng(voxels, budget, grid, force_include, params, &mut rand::thread_rng())
}

/// Selects up to `budget` voxels via stratified spatial sampling.
///
/// Forced voxels claim their slots first (in input order). The remaining
/// candidates are partitioned into a `bins × bins` grid of spatial bins by
/// normalized X/Y position; bins are then visited round-robin in sorted
/// key order, each visit pulling one voxel per
/// [`BinSelectionMode`]. Bins that still hold candidates keep receiving
/// visits, so when the budget is tighter than the bin count the early bins
/// are over-represented rather than some bins being skipped entirely.
///
/// Every visit removes one candidate and exhausted bins are deleted, so
/// the loop terminates after at most one pull per candidate.
///
/// The input is never mutated. Degenerate grid dimensions are clamped to
/// ≥ 1, a zero `budget` selects nothing, and non-finite counts are
/// ordered by IEEE total ordering rather than rejected; none of these
/// conditions error.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use heatmap_select::coverage_select;
/// use heatmap_types::{CoverageParams, GridDims, Voxel, VoxelCoord};
///
/// // Two clusters in opposite corners of a 4x4 grid
/// let voxels = vec![
///     Voxel::new(VoxelCoord::new(0, 0, 0), 50.0),
///     Voxel::new(VoxelCoord::new(0, 1, 0), 40.0),
///     Voxel::new(VoxelCoord::new(3, 3, 0), 2.0),
///     Voxel::new(VoxelCoord::new(3, 2, 0), 1.0),
/// ];
/// let grid = GridDims::new(4, 4, 1);
///
/// let selection = coverage_select(&voxels, 2, grid, &HashSet::new(), &CoverageParams::default());
///
/// // One voxel from each corner, despite the density gap
/// assert_eq!(selection.voxels.len(), 2);
/// assert!(selection.voxels.iter().any(|v| v.coord.x == 0));
/// assert!(selection.voxels.iter().any(|v| v.coord.x == 3));
/// ```
#[must_use]
pub fn coverage_select_with_rng<R: Rng>(
    voxels: &[Voxel],
    budget: usize,
    grid: GridDims,
    force_include: &HashSet<VoxelCoord>,
    params: &CoverageParams,
    rng: &mut R,
) -> Selection {
    let mut selected: Vec<Voxel> = Vec::with_capacity(budget.min(voxels.len()));
    let mut chosen: HashSet<VoxelCoord> = HashSet::new();

    // Forced voxels first, in input order.
    if !force_include.is_empty() {
        for v in voxels {
            if selected.len() >= budget {
                break;
            }
            if force_include.contains(&v.coord) && chosen.insert(v.coord) {
                selected.push(*v);
            }
        }
    }

    let remaining = budget.saturating_sub(selected.len());
    let mut bins_xy = 0;
    let mut total_bins = 0;

    if remaining > 0 {
        bins_xy = params.bins.resolve(remaining);

        // BTreeMap keeps the round-robin visit order deterministic.
        let mut bins: BTreeMap<(u32, u32), Vec<Voxel>> = BTreeMap::new();
        for v in voxels {
            if chosen.contains(&v.coord) {
                continue;
            }
            bins.entry(bin_key(v.coord, grid, bins_xy)).or_default().push(*v);
        }
        total_bins = bins.len();

        while selected.len() < budget && !bins.is_empty() {
            let keys: Vec<(u32, u32)> = bins.keys().copied().collect();
            for key in keys {
                if selected.len() >= budget {
                    break;
                }
                let Some(bucket) = bins.get_mut(&key) else {
                    continue;
                };
                let idx = pick_index(bucket, params.mode, rng);
                let v = bucket.remove(idx);
                chosen.insert(v.coord);
                selected.push(v);
                if bucket.is_empty() {
                    bins.remove(&key);
                }
            }
        }
    }

    let total_selected = selected.len();
    let selection_ratio = if total_selected > 0 { 1.0 } else { 0.0 };
    debug!(
        selected = total_selected,
        bins_xy, total_bins, "coverage selection complete"
    );

    Selection {
        voxels: selected,
        stats: StrategyStats::Coverage(CoverageStats {
            total_selected,
            selection_ratio,
            bins_xy,
            total_bins,
        }),
    }
}

/// Maps a voxel's X/Y position into the 2D bin grid.
fn bin_key(coord: VoxelCoord, grid: GridDims, bins_xy: u32) -> (u32, u32) {
    (
        bin_axis(coord.x, grid.clamped_x(), bins_xy),
        bin_axis(coord.y, grid.clamped_y(), bins_xy),
    )
}

fn bin_axis(position: i32, extent: u32, bins: u32) -> u32 {
    let normalized = f64::from(position) / f64::from(extent);
    let index = (normalized * f64::from(bins)).floor();
    // clamp covers out-of-grid and negative coordinates
    index.clamp(0.0, f64::from(bins - 1)) as u32
}

/// Picks which candidate leaves the bin on this visit.
fn pick_index<R: Rng>(bucket: &[Voxel], mode: BinSelectionMode, rng: &mut R) -> usize {
    match mode {
        BinSelectionMode::Highest => {
            let mut best = 0;
            for (i, v) in bucket.iter().enumerate().skip(1) {
                if v.count.total_cmp(&bucket[best].count).is_gt() {
                    best = i;
                }
            }
            best
        }
        BinSelectionMode::Median => {
            let mut order: Vec<usize> = (0..bucket.len()).collect();
            order.sort_by(|&i, &j| bucket[i].count.total_cmp(&bucket[j].count));
            order[order.len() / 2]
        }
        BinSelectionMode::Random => rng.gen_range(0..bucket.len()),
    }
}
