//! Selection results and statistics.
//!
//! A strategy produces a [`Selection`]: the voxels that made the cut plus
//! strategy-specific statistics ([`StrategyStats`]). The orchestrator wraps
//! that in a [`SelectionOutcome`], whose [`SelectionSnapshot`] is the
//! caller-facing diagnostic surface (e.g. "12,000 of 45,000 non-empty
//! voxels shown").

// Voxel counts don't overflow f64 precision in practice
#![allow(clippy::cast_precision_loss)]

use crate::voxel::Voxel;

/// Occupancy-count range over a selected set.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DensityRange {
    /// Highest count among the selected voxels.
    pub max: f64,
    /// Lowest count among the selected voxels.
    pub min: f64,
}

/// Statistics produced by the density strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DensityStats {
    /// Number of candidate voxels offered to the strategy.
    pub total_voxels: usize,
    /// Number of voxels selected.
    pub selected_count: usize,
    /// Candidates that did not fit the budget.
    pub clipped_count: usize,
    /// Selected voxels that came from the force-include set.
    pub force_included_count: usize,
    /// Count range over the selected set; `None` when nothing was selected.
    pub density_range: Option<DensityRange>,
}

/// Statistics produced by the coverage strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageStats {
    /// Number of voxels selected.
    pub total_selected: usize,
    /// 1.0 when anything was selected, otherwise 0.0.
    pub selection_ratio: f64,
    /// Bins per axis used for the spatial partition; 0 when the budget was
    /// exhausted before binning.
    pub bins_xy: u32,
    /// Number of non-empty bins in the partition.
    pub total_bins: usize,
}

/// Statistics produced by the hybrid strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HybridStats {
    /// Number of voxels selected overall (forced + both phases).
    pub total_selected: usize,
    /// Voxels contributed by the coverage phase.
    pub coverage_selected: usize,
    /// Voxels contributed by the density phase.
    pub density_selected: usize,
    /// Actual coverage share: `coverage_selected / total_selected`
    /// (0.0 when nothing was selected).
    pub coverage_ratio: f64,
    /// The configured coverage share, after clamping.
    pub target_coverage_ratio: f64,
    /// 1.0 when anything was selected, otherwise 0.0.
    pub selection_ratio: f64,
}

/// Strategy-specific statistics attached to a [`Selection`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategyStats {
    /// Produced by the density strategy.
    Density(DensityStats),
    /// Produced by the coverage strategy.
    Coverage(CoverageStats),
    /// Produced by the hybrid strategy.
    Hybrid(HybridStats),
}

impl StrategyStats {
    /// Stable name of the strategy that produced these statistics.
    #[must_use]
    pub const fn strategy_name(&self) -> &'static str {
        match self {
            Self::Density(_) => "density",
            Self::Coverage(_) => "coverage",
            Self::Hybrid(_) => "hybrid",
        }
    }

    /// Number of voxels the strategy selected.
    #[must_use]
    pub const fn selected_count(&self) -> usize {
        match self {
            Self::Density(s) => s.selected_count,
            Self::Coverage(s) => s.total_selected,
            Self::Hybrid(s) => s.total_selected,
        }
    }
}

/// The output of a single strategy run.
///
/// `voxels` never exceeds the caller's budget or the candidate set, and
/// contains no duplicate coordinates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    /// The voxels that made the cut.
    pub voxels: Vec<Voxel>,
    /// Strategy-specific statistics.
    pub stats: StrategyStats,
}

/// The strategy that actually produced an outcome.
///
/// Distinct from the configured strategy in two cases: empty or
/// zero-budget inputs short-circuit to [`AppliedStrategy::None`] without
/// invoking any strategy, and a failed strategy falls back to density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppliedStrategy {
    /// No strategy ran (empty input or zero budget).
    #[default]
    None,
    /// The density strategy produced the result.
    Density,
    /// The coverage strategy produced the result.
    Coverage,
    /// The hybrid strategy produced the result.
    Hybrid,
}

impl AppliedStrategy {
    /// Stable identifier used in statistics and logging.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Density => "density",
            Self::Coverage => "coverage",
            Self::Hybrid => "hybrid",
        }
    }
}

impl std::fmt::Display for AppliedStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<crate::config::StrategyKind> for AppliedStrategy {
    fn from(kind: crate::config::StrategyKind) -> Self {
        use crate::config::StrategyKind;
        match kind {
            StrategyKind::Density => Self::Density,
            StrategyKind::Coverage => Self::Coverage,
            StrategyKind::Hybrid => Self::Hybrid,
        }
    }
}

/// Caller-facing statistics for the most recent selection.
///
/// Overwritten on every `select_voxels` call (last-write-wins, no
/// history).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionSnapshot {
    /// The strategy that produced the result.
    pub strategy: AppliedStrategy,
    /// Number of voxels selected for rendering.
    pub selected_count: usize,
    /// Number of non-empty voxels offered for selection.
    pub total_count: usize,
    /// Non-empty voxels that will not be drawn.
    pub clipped_non_empty: usize,
    /// Coverage ratio reported by the strategy, when it has one.
    pub coverage_ratio: Option<f64>,
    /// `true` when the configured strategy failed and the density
    /// fallback produced the result.
    pub degraded: bool,
}

impl SelectionSnapshot {
    /// Fraction of the non-empty voxels that made the cut.
    #[must_use]
    pub fn selection_fraction(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            self.selected_count as f64 / self.total_count as f64
        }
    }
}

impl std::fmt::Display for SelectionSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} of {} non-empty voxels shown ({} clipped)",
            self.strategy, self.selected_count, self.total_count, self.clipped_non_empty
        )?;
        if self.degraded {
            write!(f, " [degraded]")?;
        }
        Ok(())
    }
}

/// The orchestrator's result: selected voxels plus diagnostics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionOutcome {
    /// The voxels to hand to the renderer.
    pub voxels: Vec<Voxel>,
    /// Caller-facing statistics.
    pub snapshot: SelectionSnapshot,
    /// Strategy-level statistics; `None` when no strategy ran.
    pub stats: Option<StrategyStats>,
}
