//! Multi-objective benchmark functions.
//!
//! A closed family of analytic test problems mapping a decision vector to
//! an objective vector. One variant is selected per run from configuration;
//! evaluation is deterministic and side-effect-free. Following the PISA
//! convention, **all objectives are minimized** — naturally-maximized
//! criteria are already expressed in minimization form.
//!
//! # Families
//!
//! - [`dtlz`]: DTLZ1–DTLZ7, scalable many-objective problems sharing a
//!   position/distance decomposition of the decision vector
//! - [`zdt`]: ZDT1/2/3/4/6, two-objective problems sharing the
//!   `f1 / g / h` scheme
//! - [`classic`]: SPHERE, KUR, QV, COMET closed-form problems
//!
//! # References
//!
//! - Deb, Thiele, Laumanns & Zitzler (2002), "Scalable Multi-Objective
//!   Optimization Test Problems"
//! - Zitzler, Deb & Thiele (2000), "Comparison of Multiobjective
//!   Evolutionary Algorithms: Empirical Results"

mod classic;
mod dtlz;
mod zdt;

use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Error raised when a decision vector violates a benchmark's
/// preconditions. The benchmark functions themselves are total over
/// well-formed input and never fail numerically.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EvalError {
    #[error("decision vector is empty")]
    EmptyDecisionVector,

    #[error("gene {index} is not finite")]
    NonFiniteGene { index: usize },

    #[error("{benchmark} needs at least {needed} decision variables, got {got}")]
    TooFewGenes {
        benchmark: Benchmark,
        needed: usize,
        got: usize,
    },

    #[error("{benchmark} is defined for {required} objectives, got {got}")]
    WrongObjectiveCount {
        benchmark: Benchmark,
        required: usize,
        got: usize,
    },

    #[error("{benchmark} needs at least 2 objectives, got {got}")]
    TooFewObjectives { benchmark: Benchmark, got: usize },
}

/// The benchmark variant used for a run.
///
/// Resolved once from configuration; the closed enum makes the variant set
/// explicit and keeps dispatch static.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Benchmark {
    Dtlz1,
    Dtlz2,
    Dtlz3,
    Dtlz4,
    Dtlz5,
    Dtlz6,
    Dtlz7,
    Zdt1,
    Zdt2,
    Zdt3,
    Zdt4,
    Zdt6,
    Sphere,
    Kur,
    Qv,
    Comet,
}

impl std::fmt::Display for Benchmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse error for [`Benchmark::from_str`].
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("unknown benchmark function: {0}")]
pub struct UnknownBenchmark(pub String);

impl FromStr for Benchmark {
    type Err = UnknownBenchmark;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DTLZ1" => Ok(Self::Dtlz1),
            "DTLZ2" => Ok(Self::Dtlz2),
            "DTLZ3" => Ok(Self::Dtlz3),
            "DTLZ4" => Ok(Self::Dtlz4),
            "DTLZ5" => Ok(Self::Dtlz5),
            "DTLZ6" => Ok(Self::Dtlz6),
            "DTLZ7" => Ok(Self::Dtlz7),
            "ZDT1" => Ok(Self::Zdt1),
            "ZDT2" => Ok(Self::Zdt2),
            "ZDT3" => Ok(Self::Zdt3),
            "ZDT4" => Ok(Self::Zdt4),
            "ZDT6" => Ok(Self::Zdt6),
            "SPHERE" => Ok(Self::Sphere),
            "KUR" => Ok(Self::Kur),
            "QV" => Ok(Self::Qv),
            "COMET" => Ok(Self::Comet),
            _ => Err(UnknownBenchmark(s.to_string())),
        }
    }
}

impl Benchmark {
    /// Canonical upper-case name, matching the PISA parameter-file tokens.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dtlz1 => "DTLZ1",
            Self::Dtlz2 => "DTLZ2",
            Self::Dtlz3 => "DTLZ3",
            Self::Dtlz4 => "DTLZ4",
            Self::Dtlz5 => "DTLZ5",
            Self::Dtlz6 => "DTLZ6",
            Self::Dtlz7 => "DTLZ7",
            Self::Zdt1 => "ZDT1",
            Self::Zdt2 => "ZDT2",
            Self::Zdt3 => "ZDT3",
            Self::Zdt4 => "ZDT4",
            Self::Zdt6 => "ZDT6",
            Self::Sphere => "SPHERE",
            Self::Kur => "KUR",
            Self::Qv => "QV",
            Self::Comet => "COMET",
        }
    }

    /// All supported variants, in declaration order.
    pub fn all() -> &'static [Benchmark] {
        &[
            Self::Dtlz1,
            Self::Dtlz2,
            Self::Dtlz3,
            Self::Dtlz4,
            Self::Dtlz5,
            Self::Dtlz6,
            Self::Dtlz7,
            Self::Zdt1,
            Self::Zdt2,
            Self::Zdt3,
            Self::Zdt4,
            Self::Zdt6,
            Self::Sphere,
            Self::Kur,
            Self::Qv,
            Self::Comet,
        ]
    }

    /// Checks that `dim` objectives over `n` decision variables are a
    /// well-formed instance of this benchmark.
    pub fn check_instance(&self, n: usize, dim: usize) -> Result<(), EvalError> {
        if n == 0 {
            return Err(EvalError::EmptyDecisionVector);
        }
        match self {
            Self::Dtlz1
            | Self::Dtlz2
            | Self::Dtlz3
            | Self::Dtlz4
            | Self::Dtlz5
            | Self::Dtlz6
            | Self::Dtlz7 => {
                // Needs dim-1 position genes plus at least one distance gene.
                if dim < 2 {
                    return Err(EvalError::TooFewObjectives {
                        benchmark: *self,
                        got: dim,
                    });
                }
                if n < dim {
                    return Err(EvalError::TooFewGenes {
                        benchmark: *self,
                        needed: dim,
                        got: n,
                    });
                }
            }
            Self::Zdt1 | Self::Zdt2 | Self::Zdt3 | Self::Zdt4 | Self::Zdt6 => {
                if dim != 2 {
                    return Err(EvalError::WrongObjectiveCount {
                        benchmark: *self,
                        required: 2,
                        got: dim,
                    });
                }
                if n < 2 {
                    return Err(EvalError::TooFewGenes {
                        benchmark: *self,
                        needed: 2,
                        got: n,
                    });
                }
            }
            Self::Sphere => {
                if dim < 2 {
                    return Err(EvalError::TooFewObjectives {
                        benchmark: *self,
                        got: dim,
                    });
                }
                if n < dim {
                    return Err(EvalError::TooFewGenes {
                        benchmark: *self,
                        needed: dim,
                        got: n,
                    });
                }
            }
            Self::Kur => {
                if dim != 2 {
                    return Err(EvalError::WrongObjectiveCount {
                        benchmark: *self,
                        required: 2,
                        got: dim,
                    });
                }
                if n < 2 {
                    return Err(EvalError::TooFewGenes {
                        benchmark: *self,
                        needed: 2,
                        got: n,
                    });
                }
            }
            Self::Qv => {
                if dim != 2 {
                    return Err(EvalError::WrongObjectiveCount {
                        benchmark: *self,
                        required: 2,
                        got: dim,
                    });
                }
            }
            Self::Comet => {
                if dim != 3 {
                    return Err(EvalError::WrongObjectiveCount {
                        benchmark: *self,
                        required: 3,
                        got: dim,
                    });
                }
                if n < 3 {
                    return Err(EvalError::TooFewGenes {
                        benchmark: *self,
                        needed: 3,
                        got: n,
                    });
                }
            }
        }
        Ok(())
    }

    /// Evaluates the decision vector `genes` into a `dim`-component
    /// objective vector.
    ///
    /// Deterministic and side-effect-free. Fails only on precondition
    /// violations: incompatible instance shape or a non-finite gene.
    pub fn evaluate(&self, genes: &[f64], dim: usize) -> Result<Vec<f64>, EvalError> {
        self.check_instance(genes.len(), dim)?;
        if let Some(index) = genes.iter().position(|g| !g.is_finite()) {
            return Err(EvalError::NonFiniteGene { index });
        }

        let f = match self {
            Self::Dtlz1 => dtlz::dtlz1(genes, dim),
            Self::Dtlz2 => dtlz::dtlz2(genes, dim),
            Self::Dtlz3 => dtlz::dtlz3(genes, dim),
            Self::Dtlz4 => dtlz::dtlz4(genes, dim),
            Self::Dtlz5 => dtlz::dtlz5(genes, dim),
            Self::Dtlz6 => dtlz::dtlz6(genes, dim),
            Self::Dtlz7 => dtlz::dtlz7(genes, dim),
            Self::Zdt1 => zdt::zdt1(genes),
            Self::Zdt2 => zdt::zdt2(genes),
            Self::Zdt3 => zdt::zdt3(genes),
            Self::Zdt4 => zdt::zdt4(genes),
            Self::Zdt6 => zdt::zdt6(genes),
            Self::Sphere => classic::sphere(genes, dim),
            Self::Kur => classic::kur(genes),
            Self::Qv => classic::qv(genes),
            Self::Comet => classic::comet(genes),
        };

        debug_assert_eq!(f.len(), dim);
        debug_assert!(f.iter().all(|v| v.is_finite()));
        Ok(f)
    }

    /// Natural decision-space box of this benchmark, used when the
    /// parameter file does not supply explicit bounds.
    pub fn default_bounds(&self, n: usize) -> Vec<(f64, f64)> {
        match self {
            Self::Dtlz1
            | Self::Dtlz2
            | Self::Dtlz3
            | Self::Dtlz4
            | Self::Dtlz5
            | Self::Dtlz6
            | Self::Dtlz7
            | Self::Zdt1
            | Self::Zdt2
            | Self::Zdt3
            | Self::Zdt6 => vec![(0.0, 1.0); n],
            // First variable in [0,1], the rest in [-5,5].
            Self::Zdt4 => {
                let mut bounds = vec![(-5.0, 5.0); n];
                bounds[0] = (0.0, 1.0);
                bounds
            }
            Self::Sphere | Self::Kur | Self::Qv => vec![(-5.0, 5.0); n],
            Self::Comet => {
                let mut bounds = vec![(0.0, 1.0); n];
                bounds[0] = (1.0, 3.5);
                if n > 1 {
                    bounds[1] = (-2.0, 2.0);
                }
                bounds
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Parsing and naming ----

    #[test]
    fn test_name_round_trip() {
        for &b in Benchmark::all() {
            assert_eq!(b.name().parse::<Benchmark>().unwrap(), b);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("dtlz2".parse::<Benchmark>().unwrap(), Benchmark::Dtlz2);
        assert_eq!("zdt3".parse::<Benchmark>().unwrap(), Benchmark::Zdt3);
        assert_eq!("Sphere".parse::<Benchmark>().unwrap(), Benchmark::Sphere);
    }

    #[test]
    fn test_parse_unknown_fails() {
        assert!("DTLZ8".parse::<Benchmark>().is_err());
        assert!("".parse::<Benchmark>().is_err());
    }

    // ---- Instance checks ----

    #[test]
    fn test_dtlz_needs_n_at_least_dim() {
        let err = Benchmark::Dtlz2.evaluate(&[0.5, 0.5], 3).unwrap_err();
        assert!(matches!(err, EvalError::TooFewGenes { .. }));
    }

    #[test]
    fn test_zdt_needs_two_objectives() {
        let err = Benchmark::Zdt1.evaluate(&[0.5; 10], 3).unwrap_err();
        assert!(matches!(err, EvalError::WrongObjectiveCount { .. }));
    }

    #[test]
    fn test_comet_needs_three_objectives() {
        let err = Benchmark::Comet.evaluate(&[1.5, 0.0, 0.5], 2).unwrap_err();
        assert!(matches!(err, EvalError::WrongObjectiveCount { .. }));
    }

    #[test]
    fn test_empty_vector_rejected() {
        let err = Benchmark::Sphere.evaluate(&[], 2).unwrap_err();
        assert_eq!(err, EvalError::EmptyDecisionVector);
    }

    #[test]
    fn test_non_finite_gene_rejected() {
        let err = Benchmark::Zdt1
            .evaluate(&[0.5, f64::NAN, 0.5], 2)
            .unwrap_err();
        assert_eq!(err, EvalError::NonFiniteGene { index: 1 });
    }

    // ---- Dispatch sanity ----

    #[test]
    fn test_all_variants_evaluate_on_canonical_instance() {
        for &b in Benchmark::all() {
            let (n, dim) = match b {
                Benchmark::Comet => (3, 3),
                Benchmark::Kur | Benchmark::Qv => (3, 2),
                Benchmark::Sphere => (4, 2),
                Benchmark::Zdt1
                | Benchmark::Zdt2
                | Benchmark::Zdt3
                | Benchmark::Zdt4
                | Benchmark::Zdt6 => (10, 2),
                _ => (12, 3),
            };
            let bounds = b.default_bounds(n);
            // Midpoint of the natural domain is always a valid input.
            let genes: Vec<f64> = bounds.iter().map(|(lo, hi)| 0.5 * (lo + hi)).collect();
            let f = b.evaluate(&genes, dim).unwrap_or_else(|e| {
                panic!("{b} failed on canonical instance: {e}");
            });
            assert_eq!(f.len(), dim, "{b} objective count");
            assert!(f.iter().all(|v| v.is_finite()), "{b} produced {f:?}");
        }
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let genes = [0.3, 0.7, 0.1, 0.9, 0.5, 0.5, 0.5, 0.2, 0.8, 0.4, 0.6, 0.5];
        for &b in &[Benchmark::Dtlz1, Benchmark::Dtlz4, Benchmark::Dtlz7] {
            let a = b.evaluate(&genes, 3).unwrap();
            let c = b.evaluate(&genes, 3).unwrap();
            assert_eq!(a, c);
        }
    }

    // ---- Default bounds ----

    #[test]
    fn test_zdt4_bounds_are_mixed() {
        let bounds = Benchmark::Zdt4.default_bounds(5);
        assert_eq!(bounds[0], (0.0, 1.0));
        assert_eq!(bounds[1], (-5.0, 5.0));
        assert_eq!(bounds.len(), 5);
    }

    #[test]
    fn test_comet_bounds_per_variable() {
        let bounds = Benchmark::Comet.default_bounds(3);
        assert_eq!(bounds, vec![(1.0, 3.5), (-2.0, 2.0), (0.0, 1.0)]);
    }

    #[test]
    fn test_bounds_are_ordered() {
        for &b in Benchmark::all() {
            for (lo, hi) in b.default_bounds(6) {
                assert!(lo <= hi, "{b}: {lo} > {hi}");
            }
        }
    }
}
