//! ZDT two-objective test problems (Zitzler, Deb & Thiele).
//!
//! Shared scheme: `f1` depends only on the first gene, a distance function
//! `g` aggregates the remaining genes, and `f2 = g * h(f1, g)` with a
//! variant-specific shape function `h`. The natural domain is `[0, 1]^n`
//! except ZDT4, whose tail genes live in `[-5, 5]`.
//!
//! The caller guarantees `n >= 2` and `dim == 2`.

use std::f64::consts::PI;

/// Mean of the tail genes `x2..xn`.
fn tail_mean(genes: &[f64]) -> f64 {
    let tail = &genes[1..];
    tail.iter().sum::<f64>() / tail.len() as f64
}

/// ZDT1: convex Pareto front.
pub(super) fn zdt1(genes: &[f64]) -> Vec<f64> {
    let f1 = genes[0];
    let g = 1.0 + 9.0 * tail_mean(genes);
    let h = 1.0 - (f1 / g).sqrt();
    vec![f1, g * h]
}

/// ZDT2: non-convex front.
pub(super) fn zdt2(genes: &[f64]) -> Vec<f64> {
    let f1 = genes[0];
    let g = 1.0 + 9.0 * tail_mean(genes);
    let h = 1.0 - (f1 / g).powi(2);
    vec![f1, g * h]
}

/// ZDT3: disconnected front; `f2` dips below zero on parts of the front.
pub(super) fn zdt3(genes: &[f64]) -> Vec<f64> {
    let f1 = genes[0];
    let g = 1.0 + 9.0 * tail_mean(genes);
    let ratio = f1 / g;
    let h = 1.0 - ratio.sqrt() - ratio * (10.0 * PI * f1).sin();
    vec![f1, g * h]
}

/// ZDT4: multi-modal with many deceptive local fronts (Rastrigin tail).
pub(super) fn zdt4(genes: &[f64]) -> Vec<f64> {
    let f1 = genes[0];
    let tail = &genes[1..];
    let g = 1.0
        + 10.0 * tail.len() as f64
        + tail
            .iter()
            .map(|&x| x * x - 10.0 * (4.0 * PI * x).cos())
            .sum::<f64>();
    let h = 1.0 - (f1 / g).sqrt();
    vec![f1, g * h]
}

/// ZDT6: biased, non-uniform density along a non-convex front.
pub(super) fn zdt6(genes: &[f64]) -> Vec<f64> {
    let x1 = genes[0];
    let f1 = 1.0 - (-4.0 * x1).exp() * (6.0 * PI * x1).sin().powi(6);
    let g = 1.0 + 9.0 * tail_mean(genes).powf(0.25);
    let h = 1.0 - (f1 / g).powi(2);
    vec![f1, g * h]
}

// ============================================================================
// Tests
// ============================================================================
