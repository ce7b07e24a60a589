//! The `VoxelSelector` orchestrator.
//!
//! Validates inputs, computes the "top N densest" force-include set,
//! dispatches to the configured strategy, and recovers from strategy
//! failure so the rendering layer always receives a usable,
//! budget-respecting result.

use std::collections::HashSet;

use rand::Rng;
use tracing::{info, warn};

use heatmap_types::{
    AppliedStrategy, DensityStats, GridDims, Selection, SelectionOutcome, SelectionResult,
    SelectionSnapshot, SelectorConfig, StrategyKind, StrategyStats, Voxel, VoxelCoord,
};

use crate::coverage::coverage_select_with_rng;
use crate::density::density_select;
use crate::hybrid::hybrid_select_with_rng;

/// Orchestrates voxel selection under a render budget.
///
/// Owns a [`SelectorConfig`] and a single snapshot of the most recent
/// selection's statistics. Each call to [`select_voxels`] is an
/// independent, synchronous computation; the snapshot is overwritten on
/// every call (last-write-wins, no history), and `&mut self` keeps that
/// write free of data races.
///
/// [`select_voxels`]: VoxelSelector::select_voxels
///
/// # Example
///
/// ```
/// use heatmap_select::VoxelSelector;
/// use heatmap_types::{GridDims, SelectorConfig, StrategyKind, Voxel, VoxelCoord};
///
/// let voxels = vec![
///     Voxel::new(VoxelCoord::new(0, 0, 0), 10.0),
///     Voxel::new(VoxelCoord::new(1, 0, 0), 5.0),
///     Voxel::new(VoxelCoord::new(2, 0, 0), 15.0),
/// ];
///
/// let mut selector = VoxelSelector::default();
/// let outcome = selector.select_voxels(&voxels, 2, GridDims::new(3, 1, 1));
///
/// assert_eq!(outcome.voxels.len(), 2);
/// assert_eq!(outcome.snapshot.clipped_non_empty, 1);
/// assert_eq!(selector.last_selection_stats(), Some(&outcome.snapshot));
/// ```
#[derive(Debug, Clone, Default)]
pub struct VoxelSelector {
    config: SelectorConfig,
    last_snapshot: Option<SelectionSnapshot>,
}

impl VoxelSelector {
    /// Creates a selector with the given configuration.
    #[must_use]
    pub const fn new(config: SelectorConfig) -> Self {
        Self {
            config,
            last_snapshot: None,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Statistics of the most recent [`select_voxels`] call, or `None`
    /// before any call.
    ///
    /// [`select_voxels`]: VoxelSelector::select_voxels
    #[must_use]
    pub fn last_selection_stats(&self) -> Option<&SelectionSnapshot> {
        self.last_snapshot.as_ref()
    }

    /// Selects up to `budget` voxels for rendering, using a thread-local
    /// random source where the configuration calls for sampling.
    ///
    /// See [`select_voxels_with_rng`] for the full behavior description
    /// and a deterministic entry point.
    ///
    /// [`select_voxels_with_rng`]: VoxelSelector::select_voxels_with_rng
    pub fn select_voxels(
        &mut self,
        voxels: &[Voxel],
        budget: usize,
        grid: GridDims,
    ) -> SelectionOutcome {
        self.select_voxels_with_rng(voxels, budget, grid, &mut rand::thread_rng())
    }

    /// Selects up to `budget` voxels for rendering.
    ///
    /// Empty input or a zero budget short-circuits to a well-formed empty
    /// outcome (strategy `"none"`) without invoking any strategy. When
    /// `highlight_top_n > 0`, the N densest voxels are computed here and
    /// forced into the result regardless of the active strategy.
    ///
    /// This method never fails: if the configured strategy errors, the
    /// condition is logged and the density strategy is retried as a safe
    /// fallback; if even that fails (non-finite counts), the malformed
    /// voxels are dropped and density runs on the remainder. The
    /// degraded path is marked in the returned snapshot, so callers can
    /// surface a degraded-mode notice without crashing the
    /// visualization.
    pub fn select_voxels_with_rng<R: Rng>(
        &mut self,
        voxels: &[Voxel],
        budget: usize,
        grid: GridDims,
        rng: &mut R,
    ) -> SelectionOutcome {
        let total_count = voxels.len();

        if total_count == 0 || budget == 0 {
            let snapshot = SelectionSnapshot {
                strategy: AppliedStrategy::None,
                selected_count: 0,
                total_count,
                clipped_non_empty: total_count,
                coverage_ratio: None,
                degraded: false,
            };
            self.last_snapshot = Some(snapshot.clone());
            return SelectionOutcome {
                voxels: Vec::new(),
                snapshot,
                stats: None,
            };
        }

        let force_include = self.top_n_force_set(voxels);
        let kind = self.config.strategy;

        let (selection, strategy, degraded) =
            match self.run_strategy(kind, voxels, budget, grid, &force_include, rng) {
                Ok(selection) => (selection, AppliedStrategy::from(kind), false),
                Err(err) => {
                    warn!(
                        strategy = kind.name(),
                        error = %err,
                        "strategy failed, falling back to density"
                    );
                    let selection = Self::fallback_density(voxels, budget, &force_include);
                    (selection, AppliedStrategy::Density, true)
                }
            };

        let coverage_ratio = match &selection.stats {
            StrategyStats::Coverage(s) => Some(s.selection_ratio),
            StrategyStats::Hybrid(s) => Some(s.coverage_ratio),
            StrategyStats::Density(_) => None,
        };

        let selected_count = selection.voxels.len();
        let snapshot = SelectionSnapshot {
            strategy,
            selected_count,
            total_count,
            clipped_non_empty: total_count.saturating_sub(selected_count),
            coverage_ratio,
            degraded,
        };
        info!(
            strategy = strategy.name(),
            selected = selected_count,
            total = total_count,
            degraded,
            "voxel selection complete"
        );
        self.last_snapshot = Some(snapshot.clone());

        SelectionOutcome {
            voxels: selection.voxels,
            snapshot,
            stats: Some(selection.stats),
        }
    }

    /// The `highlight_top_n` densest voxels, independent of strategy.
    fn top_n_force_set(&self, voxels: &[Voxel]) -> HashSet<VoxelCoord> {
        let n = self.config.highlight_top_n;
        if n == 0 {
            return HashSet::new();
        }
        let mut ranked: Vec<&Voxel> = voxels.iter().collect();
        // total_cmp keeps the ranking deterministic even for NaN counts
        ranked.sort_by(|a, b| b.count.total_cmp(&a.count));
        ranked.iter().take(n).map(|v| v.coord).collect()
    }

    fn run_strategy<R: Rng>(
        &self,
        kind: StrategyKind,
        voxels: &[Voxel],
        budget: usize,
        grid: GridDims,
        force_include: &HashSet<VoxelCoord>,
        rng: &mut R,
    ) -> SelectionResult<Selection> {
        match kind {
            StrategyKind::Density => density_select(voxels, budget, force_include),
            StrategyKind::Coverage => Ok(coverage_select_with_rng(
                voxels,
                budget,
                grid,
                force_include,
                &self.config.coverage,
                rng,
            )),
            StrategyKind::Hybrid => hybrid_select_with_rng(
                voxels,
                budget,
                grid,
                force_include,
                &self.config.hybrid_params(),
                rng,
            ),
        }
    }

    /// Last-resort recovery: retry density, dropping malformed voxels if
    /// the strict layer still rejects the input.
    fn fallback_density(
        voxels: &[Voxel],
        budget: usize,
        force_include: &HashSet<VoxelCoord>,
    ) -> Selection {
        match density_select(voxels, budget, force_include) {
            Ok(selection) => selection,
            Err(err) => {
                warn!(error = %err, "density fallback rejected input, dropping malformed voxels");
                let sane: Vec<Voxel> = voxels
                    .iter()
                    .filter(|v| v.count.is_finite())
                    .copied()
                    .collect();
                // Finite counts only, so this cannot fail again
                density_select(&sane, budget, force_include).unwrap_or_else(|_| Selection {
                    voxels: Vec::new(),
                    stats: StrategyStats::Density(DensityStats {
                        total_voxels: 0,
                        selected_count: 0,
                        clipped_count: 0,
                        force_included_count: 0,
                        density_range: None,
                    }),
                })
            }
        }
    }
}
