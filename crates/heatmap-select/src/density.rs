//! Density-ranked selection.
//!
//! Ranks candidates purely by occupancy count, descending. This is the
//! strict-validation layer of the engine: a non-finite count is a caller
//! bug and fails loudly, unlike the coverage strategy which clamps at the
//! data boundary.

use std::collections::HashSet;

use tracing::debug;

use heatmap_types::{
    DensityRange, DensityStats, Selection, SelectionError, SelectionResult, StrategyStats, Voxel,
    VoxelCoord,
};

/// Selects up to `budget` voxels by descending occupancy count.
///
/// The input is never mutated. Forced voxels claim their slots first so
/// they are never dropped merely because they rank lower by density; the
/// remaining budget is filled with the next-highest counts. The returned
/// list is in descending count order, with ties keeping their input
/// relative order (the sort is stable, so results are reproducible).
///
/// A zero `budget` selects nothing and is not an error.
///
/// # Errors
///
/// Returns [`SelectionError::NonFiniteCount`] when any candidate carries a
/// NaN or infinite count. Occupancy tallies are finite by construction, so
/// this indicates a bug upstream rather than a data condition.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use heatmap_select::density_select;
/// use heatmap_types::{Voxel, VoxelCoord};
///
/// let voxels: Vec<Voxel> = [10.0, 5.0, 15.0, 8.0, 12.0]
///     .iter()
///     .enumerate()
///     .map(|(i, &c)| Voxel::new(VoxelCoord::new(i as i32, 0, 0), c))
///     .collect();
///
/// let selection = density_select(&voxels, 3, &HashSet::new()).unwrap();
/// let counts: Vec<f64> = selection.voxels.iter().map(|v| v.count).collect();
/// assert_eq!(counts, vec![15.0, 12.0, 10.0]);
/// ```
pub fn density_select(
    voxels: &[Voxel],
    budget: usize,
    force_include: &HashSet<VoxelCoord>,
) -> SelectionResult<Selection> {
    if let Some(bad) = voxels.iter().find(|v| !v.count.is_finite()) {
        return Err(SelectionError::NonFiniteCount {
            coord: bad.coord,
            count: bad.count,
        });
    }

    let total_voxels = voxels.len();
    let cap = budget.min(total_voxels);

    let mut ranked: Vec<&Voxel> = voxels.iter().collect();
    // Stable sort, descending; ties keep input order. total_cmp is total
    // over all finite values (non-finite already rejected above).
    ranked.sort_by(|a, b| b.count.total_cmp(&a.count));

    let mut selected: Vec<Voxel> = Vec::with_capacity(cap);
    let mut chosen: HashSet<VoxelCoord> = HashSet::with_capacity(cap);
    let mut force_included_count = 0;

    // Pass 1: forced voxels, in density order.
    if !force_include.is_empty() {
        for v in &ranked {
            if selected.len() >= budget {
                break;
            }
            if force_include.contains(&v.coord) && chosen.insert(v.coord) {
                selected.push(**v);
                force_included_count += 1;
            }
        }
    }

    // Pass 2: fill the remaining budget with the next-highest counts.
    for v in &ranked {
        if selected.len() >= budget {
            break;
        }
        if chosen.insert(v.coord) {
            selected.push(**v);
        }
    }

    // Forced low-density voxels were placed ahead of denser unforced ones;
    // restore the global descending-count order.
    selected.sort_by(|a, b| b.count.total_cmp(&a.count));

    let density_range = match (selected.first(), selected.last()) {
        (Some(first), Some(last)) => Some(DensityRange {
            max: first.count,
            min: last.count,
        }),
        _ => None,
    };

    let selected_count = selected.len();
    debug!(
        total = total_voxels,
        selected = selected_count,
        forced = force_included_count,
        "density selection complete"
    );

    Ok(Selection {
        voxels: selected,
        stats: StrategyStats::Density(DensityStats {
            total_voxels,
            selected_count,
            clipped_count: total_voxels.saturating_sub(selected_count),
            force_included_count,
            density_range,
        }),
    })
}
