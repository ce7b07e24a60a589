//! Configuration types for voxel selection.
//!
//! This module defines the strategy-selection and tuning knobs consumed by
//! the selection engine. All configuration is plain data with builder-style
//! `with_*` methods; constructors clamp out-of-range values instead of
//! erroring, so a config is always usable.
//!
//! # Example
//!
//! ```
//! use heatmap_types::{BinSelectionMode, CoverageBins, SelectorConfig, StrategyKind};
//!
//! let config = SelectorConfig::default()
//!     .with_strategy(StrategyKind::Hybrid)
//!     .with_highlight_top_n(20)
//!     .with_min_coverage_ratio(0.4);
//!
//! assert_eq!(config.coverage.bins, CoverageBins::Auto);
//! assert_eq!(config.coverage.mode, BinSelectionMode::Highest);
//! ```

/// The selection algorithm applied when the render budget is tighter than
/// the populated voxel set.
///
/// # Example
///
/// ```
/// use heatmap_types::StrategyKind;
///
/// // Pure density ranking: keeps the hottest cells, may ignore sparse regions
/// let s = StrategyKind::Density;
///
/// // Stratified spatial sampling: guarantees geographic spread
/// let s = StrategyKind::Coverage;
///
/// // A configurable split between the two
/// let s = StrategyKind::Hybrid;
/// assert_eq!(s.name(), "hybrid");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategyKind {
    /// Rank voxels purely by occupancy count, descending.
    #[default]
    Density,

    /// Stratified sampling across a 2D bin grid for spatial
    /// representativeness.
    Coverage,

    /// Coverage and density composed under a configurable budget split.
    Hybrid,
}

impl StrategyKind {
    /// Stable identifier used in statistics and logging.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Density => "density",
            Self::Coverage => "coverage",
            Self::Hybrid => "hybrid",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How the coverage strategy pulls a voxel out of a spatial bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinSelectionMode {
    /// Pick the voxel with the highest count (deterministic).
    #[default]
    Highest,

    /// Sort the bin by count and pick the middle element (deterministic).
    Median,

    /// Pick a uniformly random voxel (non-deterministic by design).
    Random,
}

/// Number of bins per axis for the coverage strategy's 2D partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoverageBins {
    /// Derive the bin count from the remaining budget, targeting roughly
    /// four represented voxels per bin, bounded to `[2, 20]`.
    #[default]
    Auto,

    /// Caller-fixed bin count per axis (clamped to at least 1).
    Fixed(u32),
}

impl CoverageBins {
    /// Resolves the bins-per-axis count for a given remaining budget.
    ///
    /// # Example
    ///
    /// ```
    /// use heatmap_types::CoverageBins;
    ///
    /// // ceil(sqrt(100 / 4)) = 5
    /// assert_eq!(CoverageBins::Auto.resolve(100), 5);
    /// // Bounded below by 2 and above by 20
    /// assert_eq!(CoverageBins::Auto.resolve(1), 2);
    /// assert_eq!(CoverageBins::Auto.resolve(100_000), 20);
    /// // Fixed counts are clamped to at least 1
    /// assert_eq!(CoverageBins::Fixed(0).resolve(100), 1);
    /// assert_eq!(CoverageBins::Fixed(8).resolve(100), 8);
    /// ```
    #[must_use]
    pub fn resolve(self, remaining_budget: usize) -> u32 {
        match self {
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                clippy::cast_precision_loss
            )]
            Self::Auto => {
                let target = (remaining_budget as f64 / 4.0).sqrt().ceil();
                (target as u32).clamp(2, 20)
            }
            Self::Fixed(n) => n.max(1),
        }
    }
}

/// Tuning for the coverage (stratified sampling) strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageParams {
    /// Bins per axis for the 2D spatial partition.
    pub bins: CoverageBins,
    /// How a representative voxel is pulled from each bin.
    pub mode: BinSelectionMode,
}

impl CoverageParams {
    /// Sets the bin resolution.
    #[must_use]
    pub const fn with_bins(mut self, bins: CoverageBins) -> Self {
        self.bins = bins;
        self
    }

    /// Shorthand for a fixed bins-per-axis count.
    #[must_use]
    pub const fn with_fixed_bins(mut self, bins_xy: u32) -> Self {
        self.bins = CoverageBins::Fixed(bins_xy);
        self
    }

    /// Sets the bin selection mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: BinSelectionMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Tuning for the hybrid strategy's coverage/density split.
///
/// # Example
///
/// ```
/// use heatmap_types::HybridParams;
///
/// let params = HybridParams::default();
/// assert_eq!(params.coverage_ratio, 0.3);
///
/// // Out-of-range ratios are clamped
/// let params = HybridParams::default().with_coverage_ratio(1.7);
/// assert_eq!(params.coverage_ratio, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HybridParams {
    /// Fraction of the remaining budget given to the coverage phase,
    /// in `[0, 1]`.
    pub coverage_ratio: f64,
    /// Tuning for the internal coverage phase.
    pub coverage: CoverageParams,
}

impl Default for HybridParams {
    fn default() -> Self {
        Self {
            coverage_ratio: 0.3,
            coverage: CoverageParams::default(),
        }
    }
}

impl HybridParams {
    /// Sets the coverage ratio, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_coverage_ratio(mut self, ratio: f64) -> Self {
        self.coverage_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the internal coverage tuning.
    #[must_use]
    pub const fn with_coverage(mut self, coverage: CoverageParams) -> Self {
        self.coverage = coverage;
        self
    }
}

/// Configuration for the `VoxelSelector` orchestrator in `heatmap-select`.
///
/// # Example
///
/// ```
/// use heatmap_types::{SelectorConfig, StrategyKind};
///
/// let config = SelectorConfig::default();
/// assert_eq!(config.strategy, StrategyKind::Density);
/// assert_eq!(config.highlight_top_n, 0);
/// assert_eq!(config.min_coverage_ratio, 0.2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectorConfig {
    /// The strategy applied when the budget is exceeded.
    pub strategy: StrategyKind,
    /// Number of densest voxels guaranteed to survive selection,
    /// independent of the active strategy. Zero disables the guarantee.
    pub highlight_top_n: usize,
    /// Coverage ratio handed to the hybrid strategy, in `[0, 1]`.
    pub min_coverage_ratio: f64,
    /// Coverage tuning shared by the coverage and hybrid strategies.
    pub coverage: CoverageParams,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Density,
            highlight_top_n: 0,
            min_coverage_ratio: 0.2,
            coverage: CoverageParams::default(),
        }
    }
}

impl SelectorConfig {
    /// Sets the active strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the number of densest voxels that must always be shown.
    #[must_use]
    pub const fn with_highlight_top_n(mut self, n: usize) -> Self {
        self.highlight_top_n = n;
        self
    }

    /// Sets the hybrid coverage ratio, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_min_coverage_ratio(mut self, ratio: f64) -> Self {
        self.min_coverage_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the coverage tuning.
    #[must_use]
    pub const fn with_coverage(mut self, coverage: CoverageParams) -> Self {
        self.coverage = coverage;
        self
    }

    /// The hybrid parameters implied by this configuration.
    #[must_use]
    pub const fn hybrid_params(&self) -> HybridParams {
        HybridParams {
            coverage_ratio: self.min_coverage_ratio,
            coverage: self.coverage,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_names() {
        assert_eq!(StrategyKind::Density.name(), "density");
        assert_eq!(StrategyKind::Coverage.name(), "coverage");
        assert_eq!(StrategyKind::Hybrid.name(), "hybrid");
        assert_eq!(format!("{}", StrategyKind::Hybrid), "hybrid");
    }

    #[test]
    fn test_auto_bins_targets_four_per_bin() {
        assert_eq!(CoverageBins::Auto.resolve(16), 2);
        assert_eq!(CoverageBins::Auto.resolve(64), 4);
        assert_eq!(CoverageBins::Auto.resolve(100), 5);
    }

    #[test]
    fn test_auto_bins_bounds() {
        assert_eq!(CoverageBins::Auto.resolve(0), 2);
        assert_eq!(CoverageBins::Auto.resolve(1), 2);
        assert_eq!(CoverageBins::Auto.resolve(1_000_000), 20);
    }

    #[test]
    fn test_fixed_bins_clamped() {
        assert_eq!(CoverageBins::Fixed(0).resolve(50), 1);
        assert_eq!(CoverageBins::Fixed(7).resolve(50), 7);
    }

    #[test]
    fn test_hybrid_ratio_clamped() {
        assert_eq!(HybridParams::default().with_coverage_ratio(-0.5).coverage_ratio, 0.0);
        assert_eq!(HybridParams::default().with_coverage_ratio(2.0).coverage_ratio, 1.0);
        assert_eq!(HybridParams::default().with_coverage_ratio(0.6).coverage_ratio, 0.6);
    }

    #[test]
    fn test_selector_defaults() {
        let config = SelectorConfig::default();
        assert_eq!(config.strategy, StrategyKind::Density);
        assert_eq!(config.highlight_top_n, 0);
        assert_eq!(config.min_coverage_ratio, 0.2);
        assert_eq!(config.coverage, CoverageParams::default());
    }

    #[test]
    fn test_selector_builders() {
        let config = SelectorConfig::default()
            .with_strategy(StrategyKind::Coverage)
            .with_highlight_top_n(5)
            .with_min_coverage_ratio(9.0)
            .with_coverage(CoverageParams::default().with_fixed_bins(6));
        assert_eq!(config.strategy, StrategyKind::Coverage);
        assert_eq!(config.highlight_top_n, 5);
        assert_eq!(config.min_coverage_ratio, 1.0);
        assert_eq!(config.coverage.bins, CoverageBins::Fixed(6));
    }

    #[test]
    fn test_hybrid_params_from_config() {
        let config = SelectorConfig::default().with_min_coverage_ratio(0.4);
        let hybrid = config.hybrid_params();
        assert_eq!(hybrid.coverage_ratio, 0.4);
        assert_eq!(hybrid.coverage, config.coverage);
    }
}
