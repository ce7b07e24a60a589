//! Hybrid selection: coverage and density under a budget split.
//!
//! Composes the other two strategies rather than reimplementing their
//! math: a configurable fraction of the remaining budget goes to a
//! coverage phase, the rest to a density phase. Each phase runs against
//! the still-unselected pool, so results never double-count and the
//! density phase absorbs any budget the coverage phase left unused.

#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use heatmap_types::{
    GridDims, HybridParams, HybridStats, Selection, SelectionResult, StrategyStats, Voxel,
    VoxelCoord,
};

use crate::coverage::coverage_select_with_rng;
use crate::density::density_select;

/// Selects up to `budget` voxels under a coverage/density budget split,
/// using a thread-local random source when the coverage phase needs one.
///
/// See [`hybrid_select_with_rng`] for the full algorithm description and a
/// deterministic entry point.
///
/// # Errors
///
/// Propagates [`SelectionError::NonFiniteCount`] from the strict density
/// phase.
///
/// [`SelectionError::NonFiniteCount`]: heatmap_types::SelectionError::NonFiniteCount
pub fn hybrid_select(
    voxels: &[Voxel],
    budget: usize,
    grid: GridDims,
    force_include: &HashSet<VoxelCoord>,
    params: &HybridParams,
) -> SelectionResult<Selection> {
    hybrid_select_with_rng(voxels, budget, grid, force_include, params, &mut rand::thread_rng())
}

/// Selects up to `budget` voxels under a coverage/density budget split.
///
/// Forced voxels claim their slots first (in input order); forcing happens
/// exactly once, so both phases run with an empty force set. The
/// remaining budget is split as
/// `coverage_count = floor(remaining * coverage_ratio)`; the coverage
/// phase runs first over the unselected pool, then the density phase
/// takes whatever budget is still unused. The ratio is clamped to
/// `[0, 1]`.
///
/// # Errors
///
/// Propagates [`SelectionError::NonFiniteCount`] from the strict density
/// phase. The coverage phase never fails.
///
/// [`SelectionError::NonFiniteCount`]: heatmap_types::SelectionError::NonFiniteCount
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use heatmap_select::hybrid_select;
/// use heatmap_types::{GridDims, HybridParams, StrategyStats, Voxel, VoxelCoord};
///
/// let voxels: Vec<Voxel> = (0..10)
///     .map(|i| Voxel::new(VoxelCoord::new(i, i, 0), f64::from(i)))
///     .collect();
/// let grid = GridDims::new(10, 10, 1);
///
/// let params = HybridParams::default().with_coverage_ratio(0.5);
/// let selection = hybrid_select(&voxels, 4, grid, &HashSet::new(), &params).unwrap();
///
/// assert_eq!(selection.voxels.len(), 4);
/// match selection.stats {
///     StrategyStats::Hybrid(s) => {
///         assert_eq!(s.coverage_selected + s.density_selected, 4);
///     }
///     _ => unreachable!(),
/// }
/// ```
pub fn hybrid_select_with_rng<R: Rng>(
    voxels: &[Voxel],
    budget: usize,
    grid: GridDims,
    force_include: &HashSet<VoxelCoord>,
    params: &HybridParams,
    rng: &mut R,
) -> SelectionResult<Selection> {
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
    let target_coverage_ratio = params.coverage_ratio.clamp(0.0, 1.0);
    let coverage_count = (remaining as f64 * target_coverage_ratio).floor() as usize;

    let no_force = HashSet::new();
    let mut coverage_selected = 0;

    if coverage_count > 0 {
        let pool: Vec<Voxel> = voxels
            .iter()
            .filter(|v| !chosen.contains(&v.coord))
            .copied()
            .collect();
        let phase =
            coverage_select_with_rng(&pool, coverage_count, grid, &no_force, &params.coverage, rng);
        for v in phase.voxels {
            if chosen.insert(v.coord) {
                selected.push(v);
                coverage_selected += 1;
            }
        }
    }

    // The density phase absorbs whatever the coverage phase left unused.
    let density_budget = budget.saturating_sub(selected.len());
    let mut density_selected = 0;

    if density_budget > 0 {
        let pool: Vec<Voxel> = voxels
            .iter()
            .filter(|v| !chosen.contains(&v.coord))
            .copied()
            .collect();
        let phase = density_select(&pool, density_budget, &no_force)?;
        for v in phase.voxels {
            if chosen.insert(v.coord) {
                selected.push(v);
                density_selected += 1;
            }
        }
    }

    let total_selected = selected.len();
    let coverage_ratio = if total_selected > 0 {
        coverage_selected as f64 / total_selected as f64
    } else {
        0.0
    };
    debug!(
        selected = total_selected,
        coverage = coverage_selected,
        density = density_selected,
        "hybrid selection complete"
    );

    Ok(Selection {
        voxels: selected,
        stats: StrategyStats::Hybrid(HybridStats {
            total_selected,
            coverage_selected,
            density_selected,
            coverage_ratio,
            target_coverage_ratio,
            selection_ratio: if total_selected > 0 { 1.0 } else { 0.0 },
        }),
    })
}
