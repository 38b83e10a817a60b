//! Integration tests for the RelaxSim library

use approx::assert_abs_diff_eq;
use ndarray::s;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use relaxsim::engine::operations::relax_band;
use relaxsim::prelude::*;

/// Deterministic pseudo-random grid for equivalence scenarios
fn random_grid(rows: usize, cols: usize, seed: u64) -> GridArray {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = GridArray::zeros((rows, cols));
    for cell in grid.data.iter_mut() {
        *cell = rng.random::<f64>();
    }
    grid
}

#[test]
fn test_uniform_boundary_pulls_interior_to_boundary_value() {
    // 4x4 grid (2x2 interior), border fixed at 1.0, interior starting at
    // 0.0, one worker: the interior fixed point is uniformly 1.0
    let grid = bordered_grid(4, 4, 1.0, 0.0);
    let params = RelaxationParams {
        workers: 1,
        threshold: 1e-5,
        max_iterations: 10_000,
    };

    let result = solve(grid, &params).unwrap();

    assert!(result.converged);
    for i in 1..3 {
        for j in 1..3 {
            assert_abs_diff_eq!(result.grid.data[[i, j]], 1.0, epsilon = 1e-4);
        }
    }
}

#[test]
fn test_fixed_point_grid_terminates_within_one_iteration() {
    // a linear ramp is already at the discrete fixed point
    let mut grid = GridArray::zeros((10, 8));
    for ((i, _j), cell) in grid.data.indexed_iter_mut() {
        *cell = 3.0 * i as f64;
    }

    let result = solve(
        grid,
        &RelaxationParams {
            workers: 4,
            ..Default::default()
        },
    )
    .unwrap();

    assert!(result.converged);
    assert_eq!(result.iterations, 1);
    assert_eq!(result.max_delta, 0.0);
}

#[test]
fn test_boundary_rows_and_columns_are_bit_identical() {
    let grid = random_grid(10, 10, 7);
    let before = grid.clone();

    let result = solve(
        grid,
        &RelaxationParams {
            workers: 3,
            ..Default::default()
        },
    )
    .unwrap();
    let after = result.grid;

    for j in 0..10 {
        assert_eq!(after.data[[0, j]], before.data[[0, j]]);
        assert_eq!(after.data[[9, j]], before.data[[9, j]]);
    }
    for i in 0..10 {
        assert_eq!(after.data[[i, 0]], before.data[[i, 0]]);
        assert_eq!(after.data[[i, 9]], before.data[[i, 9]]);
    }
}

#[test]
fn test_single_and_multi_worker_solves_agree() {
    // 16 interior rows, evenly divisible across 4 workers
    let grid = random_grid(18, 18, 42);

    let single = solve(
        grid.clone(),
        &RelaxationParams {
            workers: 1,
            ..Default::default()
        },
    )
    .unwrap();
    let multi = solve(
        grid,
        &RelaxationParams {
            workers: 4,
            ..Default::default()
        },
    )
    .unwrap();

    assert!(single.converged);
    assert!(multi.converged);
    assert!(single.grid.max_abs_diff(&multi.grid) < 1e-5);
}

#[test]
fn test_more_workers_than_interior_rows_still_terminates() {
    // 4 interior rows across 8 workers: half the bands are empty, and an
    // empty band must still join every rendezvous round
    let grid = bordered_grid(6, 6, 1.0, 0.0);
    let result = solve(
        grid,
        &RelaxationParams {
            workers: 8,
            ..Default::default()
        },
    )
    .unwrap();

    assert!(result.converged);
    assert_abs_diff_eq!(result.grid.data[[3, 3]], 1.0, epsilon = 1e-3);
}

#[test]
fn test_grid_without_interior_converges_immediately() {
    let grid = bordered_grid(2, 2, 5.0, 5.0);
    let result = solve(
        grid,
        &RelaxationParams {
            workers: 2,
            ..Default::default()
        },
    )
    .unwrap();

    assert!(result.converged);
    assert_eq!(result.iterations, 1);
    assert_eq!(result.grid.data[[1, 1]], 5.0);
}

#[test]
fn test_convergence_is_stable_near_the_fixed_point() {
    // once the solve reports convergence, one more sweep changes nothing
    // above the threshold
    let grid = bordered_grid(8, 8, 2.0, 0.0);
    let params = RelaxationParams {
        workers: 2,
        threshold: 1e-5,
        max_iterations: 100_000,
    };

    let result = solve(grid, &params).unwrap();
    assert!(result.converged);

    let relaxed = result.grid;
    let mut scratch = relaxed.clone();
    let band = 1..7;
    let delta = relax_band(
        relaxed.view(),
        scratch.data.slice_mut(s![band.clone(), ..]),
        band,
    );
    assert!(delta < params.threshold);
}

#[test]
fn test_parse_solve_write_pipeline() {
    // the full external interface: text in, text out with ten decimals
    let input = "1 1 1 1\n1 0 0 1\n1 0 0 1\n1 1 1 1\n";
    let grid = parse_grid(input.as_bytes(), 4, 4).unwrap();

    let result = solve(
        grid,
        &RelaxationParams {
            workers: 2,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(result.converged);

    let mut out = Vec::new();
    write_grid(&mut out, &result.grid).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(text.lines().count(), 4);
    assert!(text.starts_with("1.0000000000 "));
    for line in text.lines() {
        assert_eq!(line.split_whitespace().count(), 4);
    }
}
