//! Closed-form benchmarks outside the DTLZ/ZDT families.
//!
//! - SPHERE: rotating-index multi-objective sphere model; objective `i`
//!   is minimal at the `i`-th unit vector
//! - KUR: Kursawe's function, disconnected non-convex front
//! - QV: Quagliarella & Vicini's Rastrigin-based bi-objective problem
//! - COMET: the comet-shaped constrained-front problem of Deb et al.,
//!   three objectives over three decision variables
//!
//! The caller has already checked instance shapes; these functions assume
//! well-formed input.

/// SPHERE: `f_i = (x_i - 1)^2 + sum_{j != i} x_j^2`, expressed by rotating
/// the gene index so every objective sees the whole vector.
pub(super) fn sphere(genes: &[f64], dim: usize) -> Vec<f64> {
    let n = genes.len();
    (0..dim)
        .map(|i| {
            (0..n)
                .map(|j| {
                    let x = genes[(i + j) % n];
                    if j == 0 {
                        (x - 1.0) * (x - 1.0)
                    } else {
                        x * x
                    }
                })
                .sum()
        })
        .collect()
}

/// KUR: pairwise-coupled exponential term vs. oscillating power term.
pub(super) fn kur(genes: &[f64]) -> Vec<f64> {
    let f1 = genes
        .windows(2)
        .map(|w| -10.0 * (-0.2 * (w[0] * w[0] + w[1] * w[1]).sqrt()).exp())
        .sum();
    let f2 = genes
        .iter()
        .map(|&x| x.abs().powf(0.8) + 5.0 * x.sin().powi(3))
        .sum();
    vec![f1, f2]
}

/// QV: fourth root of mean Rastrigin terms, the second objective shifted
/// by 1.5.
pub(super) fn qv(genes: &[f64]) -> Vec<f64> {
    let n = genes.len() as f64;
    let rastrigin_mean = |shift: f64| -> f64 {
        genes
            .iter()
            .map(|&x| {
                let y = x - shift;
                y * y - 10.0 * (2.0 * std::f64::consts::PI * y).cos() + 10.0
            })
            .sum::<f64>()
            / n
    };
    vec![
        rastrigin_mean(0.0).powf(0.25),
        rastrigin_mean(1.5).powf(0.25),
    ]
}

/// COMET: three objectives over `(x1, x2, x3)`; `x3` acts as the distance
/// variable `g`. Uses only the first three genes.
pub(super) fn comet(genes: &[f64]) -> Vec<f64> {
    let (x1, x2, g) = (genes[0], genes[1], genes[2]);
    let core = x1.powi(3) * x2.powi(2) - 10.0 * x1;
    vec![
        (1.0 + g) * (core - 4.0 * x2),
        (1.0 + g) * (core + 4.0 * x2),
        3.0 * (1.0 + g) * x1 * x1,
    ]
}

// ============================================================================
// Tests
// ============================================================================
