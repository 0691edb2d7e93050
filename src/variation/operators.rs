//! Crossover and mutation primitives.
//!
//! All operators draw from the run's [`RandomSource`] so a fixed seed
//! reproduces the exact offspring stream. Preconditions (equal lengths,
//! probabilities in `[0, 1]`, ordered bounds) are asserted here; the
//! configuration layer validates them up front with proper errors, so a
//! trip through these asserts is a caller bug.

use crate::random::RandomSource;

/// Genes closer than this are treated as identical by SBX; the spread
/// formula divides by their distance.
const SBX_EPS: f64 = 1e-14;

fn assert_pair(p1: &[f64], p2: &[f64]) {
    assert!(!p1.is_empty(), "parents must have at least one gene");
    assert_eq!(p1.len(), p2.len(), "parents must have equal length");
}

fn assert_probability(p: f64, what: &str) {
    assert!(
        (0.0..=1.0).contains(&p),
        "{what} must lie in [0, 1], got {p}"
    );
}

fn assert_bounds(bounds: &[(f64, f64)], n: usize) {
    assert_eq!(bounds.len(), n, "one bounds pair per gene");
    assert!(
        bounds.iter().all(|(lo, hi)| lo <= hi),
        "every lower bound must not exceed its upper bound"
    );
}

/// Uniform crossover: for each gene index independently, swap the two
/// parents' values with probability `swap_probability`.
///
/// Returns the two offspring; with `swap_probability == 0.0` both are
/// exact copies of their parents.
///
/// # Panics
/// Panics if the parents are empty, have different lengths, or
/// `swap_probability` is outside `[0, 1]`.
pub fn uniform_crossover(
    p1: &[f64],
    p2: &[f64],
    swap_probability: f64,
    rng: &mut RandomSource,
) -> (Vec<f64>, Vec<f64>) {
    assert_pair(p1, p2);
    assert_probability(swap_probability, "swap probability");

    let mut c1 = p1.to_vec();
    let mut c2 = p2.to_vec();
    for i in 0..c1.len() {
        if rng.drand(1.0) < swap_probability {
            std::mem::swap(&mut c1[i], &mut c2[i]);
        }
    }
    (c1, c2)
}

/// Simulated binary crossover.
///
/// For each gene index, with probability `probability`, the two offspring
/// values are drawn from the SBX spread-factor distribution around the
/// parents, parameterized by the distribution index `eta` (larger `eta`
/// keeps offspring closer to the parents) and contracted by the gene's
/// bounds. Genes not selected, and genes whose parent values coincide,
/// pass through unchanged. All offspring values are clipped to bounds.
///
/// # Panics
/// Panics if the parents are empty or of different lengths, `bounds` does
/// not match the gene count or is unordered, `probability` is outside
/// `[0, 1]`, or `eta` is negative.
pub fn sbx_crossover(
    p1: &[f64],
    p2: &[f64],
    bounds: &[(f64, f64)],
    probability: f64,
    eta: f64,
    rng: &mut RandomSource,
) -> (Vec<f64>, Vec<f64>) {
    assert_pair(p1, p2);
    assert_bounds(bounds, p1.len());
    assert_probability(probability, "crossover probability");
    assert!(eta >= 0.0, "distribution index must be non-negative");

    let mut c1 = p1.to_vec();
    let mut c2 = p2.to_vec();

    for i in 0..c1.len() {
        if rng.drand(1.0) >= probability {
            continue;
        }
        let (lower, upper) = bounds[i];
        let (y1, y2) = (p1[i], p2[i]);
        if (y1 - y2).abs() <= SBX_EPS || lower == upper {
            continue;
        }
        let (ya, yb) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
        let u = rng.drand(1.0);

        let lo_child = spread_child(ya, yb, lower, upper, eta, u, Side::Lower);
        let hi_child = spread_child(ya, yb, lower, upper, eta, u, Side::Upper);

        // Child orientation follows the parents; an extra coin flip keeps
        // the operator symmetric in its arguments.
        let (a, b) = if rng.drand(1.0) < 0.5 {
            (hi_child, lo_child)
        } else {
            (lo_child, hi_child)
        };
        if y1 < y2 {
            c1[i] = a;
            c2[i] = b;
        } else {
            c1[i] = b;
            c2[i] = a;
        }
    }
    (c1, c2)
}

enum Side {
    Lower,
    Upper,
}

/// One SBX offspring value for the ordered parent pair `(ya, yb)`.
///
/// The spread factor `betaq` follows Deb & Agrawal's bounded formulation:
/// the raw distribution is contracted by `alpha` so the offspring density
/// integrates to one inside `[lower, upper]`.
fn spread_child(ya: f64, yb: f64, lower: f64, upper: f64, eta: f64, u: f64, side: Side) -> f64 {
    let dist = yb - ya;
    let beta = match side {
        Side::Lower => 1.0 + 2.0 * (ya - lower) / dist,
        Side::Upper => 1.0 + 2.0 * (upper - yb) / dist,
    };
    let alpha = 2.0 - beta.powf(-(eta + 1.0));
    let betaq = if u <= 1.0 / alpha {
        (u * alpha).powf(1.0 / (eta + 1.0))
    } else {
        (1.0 / (2.0 - u * alpha)).powf(1.0 / (eta + 1.0))
    };
    let value = match side {
        Side::Lower => 0.5 * ((ya + yb) - betaq * dist),
        Side::Upper => 0.5 * ((ya + yb) + betaq * dist),
    };
    value.clamp(lower, upper)
}

/// Polynomial mutation.
///
/// For each gene independently, with probability `probability`, perturbs
/// the value with the bounded polynomial distribution of index `eta`.
/// Unselected genes are untouched; results are clipped to bounds. Returns
/// the mutated copy; the input stays unchanged.
///
/// # Panics
/// Panics if `genes` is empty, `bounds` does not match the gene count or
/// is unordered, `probability` is outside `[0, 1]`, or `eta` is negative.
pub fn polynomial_mutation(
    genes: &[f64],
    bounds: &[(f64, f64)],
    probability: f64,
    eta: f64,
    rng: &mut RandomSource,
) -> Vec<f64> {
    assert!(!genes.is_empty(), "individual must have at least one gene");
    assert_bounds(bounds, genes.len());
    assert_probability(probability, "mutation probability");
    assert!(eta >= 0.0, "distribution index must be non-negative");

    let mut out = genes.to_vec();
    for (i, y) in out.iter_mut().enumerate() {
        if rng.drand(1.0) >= probability {
            continue;
        }
        let (lower, upper) = bounds[i];
        let range = upper - lower;
        if range <= 0.0 {
            continue;
        }
        let u = rng.drand(1.0);
        let mut_pow = 1.0 / (eta + 1.0);
        let deltaq = if u < 0.5 {
            let delta = (*y - lower) / range;
            let xy = 1.0 - delta;
            let val = 2.0 * u + (1.0 - 2.0 * u) * xy.powf(eta + 1.0);
            val.powf(mut_pow) - 1.0
        } else {
            let delta = (upper - *y) / range;
            let xy = 1.0 - delta;
            let val = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * xy.powf(eta + 1.0);
            1.0 - val.powf(mut_pow)
        };
        *y = (*y + deltaq * range).clamp(lower, upper);
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
