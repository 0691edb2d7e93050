//! DTLZ1–DTLZ7 scalable test problems (Deb, Thiele, Laumanns & Zitzler).
//!
//! All seven share one decomposition: the first `dim - 1` genes are
//! *position* variables placing the solution on the Pareto front, and the
//! remaining `k = n - dim + 1` genes are *distance* variables feeding a
//! scalar `g` that measures distance from the front. Objective `i` is a
//! product of position-derived terms scaled by `1 + g` (or the equivalent
//! per-variant form). The natural domain is `[0, 1]^n`.
//!
//! Instance-shape checks (`n >= dim`, `dim >= 2`) are done by the caller
//! in the dispatch layer; these functions assume a well-formed input.

use std::f64::consts::{FRAC_PI_2, PI};

/// Splits the decision vector into position and distance genes.
fn split(genes: &[f64], dim: usize) -> (&[f64], &[f64]) {
    genes.split_at(dim - 1)
}

/// Multi-modal Rastrigin-style distance function used by DTLZ1 and DTLZ3.
fn g_rastrigin(xm: &[f64]) -> f64 {
    let k = xm.len() as f64;
    let sum: f64 = xm
        .iter()
        .map(|&x| (x - 0.5).powi(2) - (20.0 * PI * (x - 0.5)).cos())
        .sum();
    100.0 * (k + sum)
}

/// Unimodal quadratic distance function used by DTLZ2, DTLZ4 and DTLZ5.
fn g_quadratic(xm: &[f64]) -> f64 {
    xm.iter().map(|&x| (x - 0.5).powi(2)).sum()
}

/// Objective vector on the spherical front: products of cosines of the
/// angle vector `theta`, scaled by `scale`.
fn concave(theta: &[f64], scale: f64, dim: usize) -> Vec<f64> {
    (0..dim)
        .map(|i| {
            let mut f = scale;
            for &t in &theta[..dim - 1 - i] {
                f *= t.cos();
            }
            if i > 0 {
                f *= theta[dim - 1 - i].sin();
            }
            f
        })
        .collect()
}

/// Angle mapping of DTLZ5/DTLZ6: only the first position gene spans the
/// full quarter-circle; later angles are squeezed toward `pi/4` as `g`
/// grows, degenerating the front into a curve.
fn degenerate_theta(xp: &[f64], g: f64) -> Vec<f64> {
    let squeeze = PI / (4.0 * (1.0 + g));
    xp.iter()
        .enumerate()
        .map(|(j, &x)| {
            if j == 0 {
                x * FRAC_PI_2
            } else {
                squeeze * (1.0 + 2.0 * g * x)
            }
        })
        .collect()
}

/// DTLZ1: linear Pareto front `sum(f) = 0.5`, multi-modal `g`.
pub(super) fn dtlz1(genes: &[f64], dim: usize) -> Vec<f64> {
    let (xp, xm) = split(genes, dim);
    let g = g_rastrigin(xm);
    (0..dim)
        .map(|i| {
            let mut f = 0.5 * (1.0 + g);
            for &x in &xp[..dim - 1 - i] {
                f *= x;
            }
            if i > 0 {
                f *= 1.0 - xp[dim - 1 - i];
            }
            f
        })
        .collect()
}

/// DTLZ2: spherical Pareto front, unimodal `g`.
pub(super) fn dtlz2(genes: &[f64], dim: usize) -> Vec<f64> {
    let (xp, xm) = split(genes, dim);
    let g = g_quadratic(xm);
    let theta: Vec<f64> = xp.iter().map(|&x| x * FRAC_PI_2).collect();
    concave(&theta, 1.0 + g, dim)
}

/// DTLZ3: DTLZ2's front with the multi-modal `g` of DTLZ1.
pub(super) fn dtlz3(genes: &[f64], dim: usize) -> Vec<f64> {
    let (xp, xm) = split(genes, dim);
    let g = g_rastrigin(xm);
    let theta: Vec<f64> = xp.iter().map(|&x| x * FRAC_PI_2).collect();
    concave(&theta, 1.0 + g, dim)
}

/// DTLZ4: DTLZ2 with position genes raised to a large power, biasing
/// solutions toward the objective axes.
pub(super) fn dtlz4(genes: &[f64], dim: usize) -> Vec<f64> {
    const ALPHA: f64 = 100.0;
    let (xp, xm) = split(genes, dim);
    let g = g_quadratic(xm);
    let theta: Vec<f64> = xp.iter().map(|&x| x.powf(ALPHA) * FRAC_PI_2).collect();
    concave(&theta, 1.0 + g, dim)
}

/// DTLZ5: degenerate front (a curve embedded in `dim`-space).
pub(super) fn dtlz5(genes: &[f64], dim: usize) -> Vec<f64> {
    let (xp, xm) = split(genes, dim);
    let g = g_quadratic(xm);
    let theta = degenerate_theta(xp, g);
    concave(&theta, 1.0 + g, dim)
}

/// DTLZ6: DTLZ5 with a biased distance function that makes the front hard
/// to reach.
pub(super) fn dtlz6(genes: &[f64], dim: usize) -> Vec<f64> {
    let (xp, xm) = split(genes, dim);
    let g: f64 = xm.iter().map(|&x| x.abs().powf(0.1)).sum();
    let theta = degenerate_theta(xp, g);
    concave(&theta, 1.0 + g, dim)
}

/// DTLZ7: disconnected front; the first `dim - 1` objectives are the
/// position genes themselves.
pub(super) fn dtlz7(genes: &[f64], dim: usize) -> Vec<f64> {
    let (xp, xm) = split(genes, dim);
    let k = xm.len() as f64;
    let g = 1.0 + 9.0 / k * xm.iter().sum::<f64>();

    let mut f: Vec<f64> = xp.to_vec();
    let h = dim as f64
        - f.iter()
            .map(|&fi| fi / (1.0 + g) * (1.0 + (3.0 * PI * fi).sin()))
            .sum::<f64>();
    f.push((1.0 + g) * h);
    f
}

// ============================================================================
// Tests
// ============================================================================
