//! Recombination strategy selection.

use super::operators::{sbx_crossover, uniform_crossover};
use crate::random::RandomSource;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Recombination operator for a run, chosen once at configuration time.
///
/// # Examples
///
/// ```
/// use pisa_variator::variation::Crossover;
///
/// // SBX with the usual distribution index
/// let sbx = Crossover::Sbx { probability: 1.0, eta: 15.0 };
///
/// // Plain uniform gene swapping
/// let uniform = Crossover::Uniform { swap_probability: 0.5 };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Crossover {
    /// Per-gene value swap with probability `swap_probability`.
    Uniform { swap_probability: f64 },

    /// Simulated binary crossover: per-gene recombination probability and
    /// distribution index `eta` (larger = offspring closer to parents).
    Sbx { probability: f64, eta: f64 },
}

impl Default for Crossover {
    fn default() -> Self {
        // PISA's DTLZ variator defaults.
        Crossover::Sbx {
            probability: 1.0,
            eta: 15.0,
        }
    }
}

impl Crossover {
    /// Produces two offspring from two parents.
    ///
    /// Parents are immutable; bounds are only consulted by SBX.
    pub fn recombine(
        &self,
        p1: &[f64],
        p2: &[f64],
        bounds: &[(f64, f64)],
        rng: &mut RandomSource,
    ) -> (Vec<f64>, Vec<f64>) {
        match *self {
            Crossover::Uniform { swap_probability } => {
                uniform_crossover(p1, p2, swap_probability, rng)
            }
            Crossover::Sbx { probability, eta } => {
                sbx_crossover(p1, p2, bounds, probability, eta, rng)
            }
        }
    }

    /// Checks operator parameters, returning a description of the first
    /// violation found.
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            Crossover::Uniform { swap_probability } => {
                if !(0.0..=1.0).contains(&swap_probability) {
                    return Err(format!(
                        "uniform swap probability must lie in [0, 1], got {swap_probability}"
                    ));
                }
            }
            Crossover::Sbx { probability, eta } => {
                if !(0.0..=1.0).contains(&probability) {
                    return Err(format!(
                        "SBX probability must lie in [0, 1], got {probability}"
                    ));
                }
                if !eta.is_finite() || eta < 0.0 {
                    return Err(format!(
                        "SBX distribution index must be non-negative, got {eta}"
                    ));
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
