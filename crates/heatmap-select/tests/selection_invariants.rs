//! Invariant and regression tests for the selection engine.
//!
//! These exercise the cross-strategy guarantees every caller relies on,
//! organized in tiers of increasing integration depth:
//!
//! - Tier 1: Invariants that hold for every strategy on every input
//! - Tier 2: Strategy-specific behavior (density ordering, coverage
//!   spread, hybrid splits)
//! - Tier 3: Orchestrator behavior (top-N guarantee, fallback, statistics)
//! - Tier 4: Performance envelope at realistic voxel counts

// Allow test-specific patterns
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_possible_truncation)]

use std::collections::HashSet;
use std::time::{Duration, Instant};

use heatmap_select::{coverage_select, density_select, hybrid_select, VoxelSelector};
use heatmap_types::{
    AppliedStrategy, CoverageParams, GridDims, HybridParams, SelectorConfig, StrategyKind,
    StrategyStats, Voxel, VoxelCoord,
};

fn voxel(x: i32, y: i32, z: i32, count: f64) -> Voxel {
    Voxel::new(VoxelCoord::new(x, y, z), count)
}

/// A deterministic spread of `n` voxels with unique coordinates over a
/// 32x32x4 grid and pseudo-random counts.
fn spread_voxels(n: i32) -> Vec<Voxel> {
    (0..n)
        .map(|i| {
            let x = i % 32;
            let y = (i / 32) % 32;
            let z = i / 1024;
            voxel(x, y, z, f64::from((i * 31) % 997 + 1))
        })
        .collect()
}

fn spread_grid() -> GridDims {
    GridDims::new(32, 32, 4)
}

fn no_force() -> HashSet<VoxelCoord> {
    HashSet::new()
}

fn coord_set(voxels: &[Voxel]) -> HashSet<VoxelCoord> {
    voxels.iter().map(|v| v.coord).collect()
}

/// Runs every strategy against the same input and yields the results.
fn all_strategies(voxels: &[Voxel], budget: usize, force: &HashSet<VoxelCoord>) -> Vec<Vec<Voxel>> {
    let grid = spread_grid();
    vec![
        density_select(voxels, budget, force).unwrap().voxels,
        coverage_select(voxels, budget, grid, force, &CoverageParams::default()).voxels,
        hybrid_select(voxels, budget, grid, force, &HybridParams::default())
            .unwrap()
            .voxels,
    ]
}

// =============================================================================
// TIER 1: Invariants for every strategy
// =============================================================================

mod tier1_invariants {
    use super::*;

    #[test]
    fn budget_invariant() {
        let voxels = spread_voxels(100);
        for budget in [0, 1, 17, 99, 100, 500] {
            for selected in all_strategies(&voxels, budget, &no_force()) {
                assert!(selected.len() <= budget);
                assert!(selected.len() <= voxels.len());
            }
        }
    }

    #[test]
    fn force_include_invariant() {
        let voxels = spread_voxels(50);
        // v2 and v4 by input position, regardless of their density rank
        let force: HashSet<VoxelCoord> = [voxels[2].coord, voxels[4].coord].into_iter().collect();
        for selected in all_strategies(&voxels, 10, &force) {
            let coords = coord_set(&selected);
            assert!(coords.contains(&voxels[2].coord));
            assert!(coords.contains(&voxels[4].coord));
        }
    }

    #[test]
    fn no_duplicate_coordinates() {
        let voxels = spread_voxels(80);
        let force: HashSet<VoxelCoord> = voxels[..5].iter().map(|v| v.coord).collect();
        for selected in all_strategies(&voxels, 40, &force) {
            assert_eq!(coord_set(&selected).len(), selected.len());
        }
    }

    #[test]
    fn full_budget_passthrough() {
        let voxels = spread_voxels(60);
        for selected in all_strategies(&voxels, 60, &no_force()) {
            assert_eq!(selected.len(), 60);
            assert_eq!(coord_set(&selected), coord_set(&voxels));
        }
        for selected in all_strategies(&voxels, 1000, &no_force()) {
            assert_eq!(selected.len(), 60);
        }
    }

    #[test]
    fn zero_budget_selects_nothing() {
        let voxels = spread_voxels(30);
        for selected in all_strategies(&voxels, 0, &no_force()) {
            assert!(selected.is_empty());
        }
    }

    #[test]
    fn idempotence_for_non_random_modes() {
        let voxels = spread_voxels(120);
        let grid = spread_grid();

        // Density: order included
        let a = density_select(&voxels, 50, &no_force()).unwrap();
        let b = density_select(&voxels, 50, &no_force()).unwrap();
        assert_eq!(a.voxels, b.voxels);

        // Coverage and hybrid: set equality
        let a = coverage_select(&voxels, 50, grid, &no_force(), &CoverageParams::default());
        let b = coverage_select(&voxels, 50, grid, &no_force(), &CoverageParams::default());
        assert_eq!(coord_set(&a.voxels), coord_set(&b.voxels));

        let a = hybrid_select(&voxels, 50, grid, &no_force(), &HybridParams::default()).unwrap();
        let b = hybrid_select(&voxels, 50, grid, &no_force(), &HybridParams::default()).unwrap();
        assert_eq!(coord_set(&a.voxels), coord_set(&b.voxels));
    }

    #[test]
    fn inputs_are_never_mutated() {
        let voxels = spread_voxels(40);
        let before = voxels.clone();
        let _ = all_strategies(&voxels, 15, &no_force());
        assert_eq!(voxels, before);
    }
}

// =============================================================================
// TIER 2: Strategy-specific behavior
// =============================================================================

mod tier2_strategies {
    use super::*;

    #[test]
    fn density_descending_order() {
        let voxels = spread_voxels(200);
        let selection = density_select(&voxels, 75, &no_force()).unwrap();
        for pair in selection.voxels.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn density_concrete_scenario() {
        let counts = [10.0, 5.0, 15.0, 8.0, 12.0];
        let voxels: Vec<Voxel> = counts
            .iter()
            .enumerate()
            .map(|(i, &c)| voxel(i as i32, 0, 0, c))
            .collect();
        let selection = density_select(&voxels, 3, &no_force()).unwrap();
        let selected: Vec<f64> = selection.voxels.iter().map(|v| v.count).collect();
        assert_eq!(selected, vec![15.0, 12.0, 10.0]);
    }

    #[test]
    fn coverage_spans_far_corners() {
        // Voxels split across two far corners of a 4x4 grid
        let voxels = vec![
            voxel(0, 0, 0, 90.0),
            voxel(0, 1, 0, 80.0),
            voxel(1, 0, 0, 70.0),
            voxel(3, 3, 0, 3.0),
            voxel(2, 3, 0, 2.0),
            voxel(3, 2, 0, 1.0),
        ];
        let grid = GridDims::new(4, 4, 1);
        let selection = coverage_select(&voxels, 2, grid, &no_force(), &CoverageParams::default());

        assert_eq!(selection.voxels.len(), 2);
        let low_corner = selection.voxels.iter().any(|v| v.coord.x <= 1 && v.coord.y <= 1);
        let high_corner = selection.voxels.iter().any(|v| v.coord.x >= 2 && v.coord.y >= 2);
        assert!(low_corner && high_corner, "selection must span both corners");
    }

    #[test]
    fn coverage_tolerates_degenerate_grid() {
        let voxels = spread_voxels(20);
        let selection =
            coverage_select(&voxels, 8, GridDims::new(0, 0, 0), &no_force(), &CoverageParams::default());
        assert_eq!(selection.voxels.len(), 8);
    }

    #[test]
    fn hybrid_extremes() {
        let voxels = spread_voxels(10);
        let grid = spread_grid();

        let pure_density = HybridParams::default().with_coverage_ratio(0.0);
        let selection = hybrid_select(&voxels, 4, grid, &no_force(), &pure_density).unwrap();
        match selection.stats {
            StrategyStats::Hybrid(s) => {
                assert_eq!(s.coverage_selected, 0);
                assert!(s.density_selected > 0);
            }
            _ => unreachable!(),
        }

        let pure_coverage = HybridParams::default().with_coverage_ratio(1.0);
        let selection = hybrid_select(&voxels, 4, grid, &no_force(), &pure_coverage).unwrap();
        match selection.stats {
            StrategyStats::Hybrid(s) => {
                assert_eq!(s.density_selected, 0);
                assert!(s.coverage_selected > 0);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn hybrid_phases_partition_the_result() {
        let voxels = spread_voxels(100);
        let selection =
            hybrid_select(&voxels, 30, spread_grid(), &no_force(), &HybridParams::default())
                .unwrap();
        match selection.stats {
            StrategyStats::Hybrid(s) => {
                assert_eq!(s.coverage_selected + s.density_selected, s.total_selected);
                assert_eq!(s.total_selected, selection.voxels.len());
            }
            _ => unreachable!(),
        }
    }
}

// =============================================================================
// TIER 3: Orchestrator behavior
// =============================================================================

mod tier3_selector {
    use super::*;

    #[test]
    fn top_n_guarantee_holds_for_every_strategy() {
        let mut voxels = spread_voxels(80);
        // Plant three extreme hot-spots at known cells
        voxels[10].count = 100_000.0;
        voxels[40].count = 90_000.0;
        voxels[70].count = 80_000.0;
        let hot: HashSet<VoxelCoord> =
            [voxels[10].coord, voxels[40].coord, voxels[70].coord].into_iter().collect();

        for kind in [StrategyKind::Density, StrategyKind::Coverage, StrategyKind::Hybrid] {
            let mut selector = VoxelSelector::new(
                SelectorConfig::default()
                    .with_strategy(kind)
                    .with_highlight_top_n(3),
            );
            let outcome = selector.select_voxels(&voxels, 10, spread_grid());
            let coords = coord_set(&outcome.voxels);
            assert!(
                hot.iter().all(|c| coords.contains(c)),
                "top-3 hot-spots must survive {} selection",
                kind.name()
            );
        }
    }

    #[test]
    fn fallback_keeps_result_usable() {
        let mut voxels = spread_voxels(30);
        voxels[5].count = f64::NAN;
        voxels[6].count = f64::INFINITY;

        let mut selector = VoxelSelector::new(
            SelectorConfig::default()
                .with_strategy(StrategyKind::Hybrid)
                .with_min_coverage_ratio(0.0),
        );
        let outcome = selector.select_voxels(&voxels, 12, spread_grid());

        assert!(outcome.snapshot.degraded);
        assert_eq!(outcome.snapshot.strategy, AppliedStrategy::Density);
        assert!(outcome.voxels.len() <= 12);
        assert!(!outcome.voxels.is_empty());
        assert_eq!(coord_set(&outcome.voxels).len(), outcome.voxels.len());
    }

    #[test]
    fn malformed_counts_under_coverage_never_escape() {
        let mut voxels = spread_voxels(30);
        voxels[0].count = f64::NAN;

        let mut selector =
            VoxelSelector::new(SelectorConfig::default().with_strategy(StrategyKind::Coverage));
        let outcome = selector.select_voxels(&voxels, 10, spread_grid());

        assert!(outcome.voxels.len() <= 10);
        assert!(outcome.voxels.len() <= voxels.len());
    }

    #[test]
    fn snapshot_reports_clipping_for_diagnostics() {
        let mut selector = VoxelSelector::default();
        let outcome = selector.select_voxels(&spread_voxels(900), 120, spread_grid());
        let snap = &outcome.snapshot;
        assert_eq!(snap.selected_count + snap.clipped_non_empty, snap.total_count);
        let shown = format!("{snap}");
        assert!(shown.contains("of"));
    }

    #[test]
    fn empty_and_zero_budget_report_none() {
        let mut selector = VoxelSelector::default();
        assert_eq!(
            selector.select_voxels(&[], 5, spread_grid()).snapshot.strategy,
            AppliedStrategy::None
        );
        assert_eq!(
            selector
                .select_voxels(&spread_voxels(5), 0, spread_grid())
                .snapshot
                .strategy,
            AppliedStrategy::None
        );
        assert_eq!(selector.last_selection_stats().unwrap().strategy, AppliedStrategy::None);
    }
}

// =============================================================================
// TIER 4: Performance envelope
// =============================================================================

mod tier4_performance {
    use super::*;

    #[test]
    fn coverage_resolves_1000_voxels_quickly() {
        let voxels = spread_voxels(1000);
        let start = Instant::now();
        let selection =
            coverage_select(&voxels, 250, spread_grid(), &no_force(), &CoverageParams::default());
        assert!(!selection.voxels.is_empty());
        assert!(
            start.elapsed() < Duration::from_secs(1),
            "coverage on 1000 voxels took {:?}",
            start.elapsed()
        );
    }

    #[test]
    fn hybrid_resolves_1000_voxels_quickly() {
        let voxels = spread_voxels(1000);
        let start = Instant::now();
        let selection =
            hybrid_select(&voxels, 250, spread_grid(), &no_force(), &HybridParams::default())
                .unwrap();
        assert!(!selection.voxels.is_empty());
        assert!(
            start.elapsed() < Duration::from_secs(2),
            "hybrid on 1000 voxels took {:?}",
            start.elapsed()
        );
    }
}
