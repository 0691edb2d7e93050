//! Variator run configuration.
//!
//! [`VariatorConfig`] carries everything a run needs: population shape
//! (`alpha`, `mu`, `lambda`), problem shape (`n`, `dim`, benchmark,
//! bounds) and operator parameters. Built either programmatically with
//! the `with_*` setters or from a PISA-style `key value` parameter file.

use std::path::Path;

use crate::benchmark::Benchmark;
use crate::variation::Crossover;

use super::error::StatusCode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration failure: unreadable/malformed parameter file or an
/// invalid parameter combination.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("parameter file line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("parameter file is missing required key '{0}'")]
    MissingKey(&'static str),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }

    /// File-shaped failures report status 2, semantic ones status 1.
    pub fn status(&self) -> StatusCode {
        match self {
            ConfigError::Io(_) | ConfigError::Parse { .. } | ConfigError::MissingKey(_) => {
                StatusCode::FileReadError
            }
            ConfigError::Invalid(_) => StatusCode::UnspecifiedError,
        }
    }
}

/// Parameters of one variator run.
///
/// # Defaults
///
/// ```
/// use pisa_variator::benchmark::Benchmark;
/// use pisa_variator::variator::VariatorConfig;
///
/// let config = VariatorConfig::new(Benchmark::Dtlz2, 12, 3);
/// assert_eq!(config.alpha, 20);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder
///
/// ```
/// use pisa_variator::benchmark::Benchmark;
/// use pisa_variator::variation::Crossover;
/// use pisa_variator::variator::VariatorConfig;
///
/// let config = VariatorConfig::new(Benchmark::Zdt1, 30, 2)
///     .with_alpha(100)
///     .with_mu(50)
///     .with_lambda(50)
///     .with_crossover(Crossover::Uniform { swap_probability: 0.5 })
///     .with_seed(42);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VariatorConfig {
    /// Initial population size created in state 0.
    pub alpha: usize,

    /// Parents read from the selected set per generation.
    pub mu: usize,

    /// Children produced per generation.
    pub lambda: usize,

    /// Decision-variable count.
    pub n: usize,

    /// Objective count.
    pub dim: usize,

    /// Benchmark objective function for this run.
    pub benchmark: Benchmark,

    /// Per-gene decision bounds; `None` uses the benchmark's natural
    /// domain.
    pub bounds: Option<Vec<(f64, f64)>>,

    /// Recombination operator.
    pub crossover: Crossover,

    /// Per-gene polynomial-mutation probability. The PISA convention is
    /// `1/n`.
    pub mutation_probability: f64,

    /// Polynomial-mutation distribution index.
    pub mutation_eta: f64,

    /// Generation budget consulted by `is_finished`.
    pub max_generations: usize,

    /// Random seed; `None` draws one from process entropy (run is then
    /// not reproducible).
    pub seed: Option<u64>,
}

impl VariatorConfig {
    /// Creates a configuration with PISA-style defaults for the given
    /// problem shape.
    pub fn new(benchmark: Benchmark, n: usize, dim: usize) -> Self {
        Self {
            alpha: 20,
            mu: 10,
            lambda: 10,
            n,
            dim,
            benchmark,
            bounds: None,
            crossover: Crossover::default(),
            mutation_probability: if n > 0 { 1.0 / n as f64 } else { 0.0 },
            mutation_eta: 20.0,
            max_generations: 100,
            seed: None,
        }
    }

    /// Sets the initial population size.
    pub fn with_alpha(mut self, alpha: usize) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the number of parents consumed per generation.
    pub fn with_mu(mut self, mu: usize) -> Self {
        self.mu = mu;
        self
    }

    /// Sets the number of children produced per generation.
    pub fn with_lambda(mut self, lambda: usize) -> Self {
        self.lambda = lambda;
        self
    }

    /// Sets explicit per-gene bounds (overrides the benchmark's natural
    /// domain).
    pub fn with_bounds(mut self, bounds: Vec<(f64, f64)>) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Sets the recombination operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the per-gene mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }

    /// Sets the mutation distribution index.
    pub fn with_mutation_eta(mut self, eta: f64) -> Self {
        self.mutation_eta = eta;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, g: usize) -> Self {
        self.max_generations = g;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The bounds in effect: explicit ones, or the benchmark's natural
    /// domain.
    pub fn resolved_bounds(&self) -> Vec<(f64, f64)> {
        self.bounds
            .clone()
            .unwrap_or_else(|| self.benchmark.default_bounds(self.n))
    }

    /// Validates the full parameter combination.
    ///
    /// Unlike the operators' panics, this reports problems as errors so
    /// the driver can surface status 1 for an invalid configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| Err(ConfigError::Invalid(reason));

        if self.alpha == 0 {
            return invalid("alpha must be at least 1".into());
        }
        if self.mu == 0 {
            return invalid("mu must be at least 1".into());
        }
        if self.lambda == 0 {
            return invalid("lambda must be at least 1".into());
        }
        if self.n == 0 {
            return invalid("decision vector must have at least one gene".into());
        }
        if self.dim == 0 {
            return invalid("objective count must be at least 1".into());
        }
        if self.max_generations == 0 {
            return invalid("max_generations must be at least 1".into());
        }
        self.crossover.validate().map_err(ConfigError::Invalid)?;
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return invalid(format!(
                "mutation probability must lie in [0, 1], got {}",
                self.mutation_probability
            ));
        }
        if !self.mutation_eta.is_finite() || self.mutation_eta < 0.0 {
            return invalid(format!(
                "mutation distribution index must be non-negative, got {}",
                self.mutation_eta
            ));
        }
        if let Some(bounds) = &self.bounds {
            if bounds.len() != self.n {
                return invalid(format!(
                    "bounds cover {} genes but n = {}",
                    bounds.len(),
                    self.n
                ));
            }
            for (i, (lo, hi)) in bounds.iter().enumerate() {
                if !lo.is_finite() || !hi.is_finite() || lo > hi {
                    return invalid(format!("gene {i} bounds [{lo}, {hi}] are not ordered"));
                }
            }
        }
        self.benchmark
            .check_instance(self.n, self.dim)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(())
    }

    /// Reads a configuration from a PISA-style parameter file.
    ///
    /// One `key value` pair per line; blank lines and `#` comments are
    /// skipped. Required keys: `benchmark`, `n`, `dim`. Recognized
    /// optional keys: `alpha`, `mu`, `lambda`, `seed`, `max_generations`,
    /// `crossover` (`sbx` | `uniform`), `crossover_probability`,
    /// `crossover_eta`, `swap_probability`, `mutation_probability`,
    /// `mutation_eta`.
    pub fn from_param_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_param_str(&text)
    }

    /// Parses parameter-file contents; see [`from_param_file`].
    ///
    /// [`from_param_file`]: VariatorConfig::from_param_file
    pub fn from_param_str(text: &str) -> Result<Self, ConfigError> {
        let mut benchmark: Option<Benchmark> = None;
        let mut n: Option<usize> = None;
        let mut dim: Option<usize> = None;

        let mut alpha = None;
        let mut mu = None;
        let mut lambda = None;
        let mut seed = None;
        let mut max_generations = None;
        let mut crossover_kind: Option<String> = None;
        let mut crossover_probability = None;
        let mut crossover_eta = None;
        let mut swap_probability = None;
        let mut mutation_probability = None;
        let mut mutation_eta = None;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let mut parts = line.split_whitespace();
            let key = parts.next().unwrap_or("");
            let value = parts
                .next()
                .ok_or_else(|| ConfigError::parse(line_no, format!("key '{key}' has no value")))?;
            if parts.next().is_some() {
                return Err(ConfigError::parse(
                    line_no,
                    format!("trailing tokens after '{key} {value}'"),
                ));
            }

            let bad_value = |what: &str| {
                ConfigError::parse(line_no, format!("'{value}' is not a valid {what} for '{key}'"))
            };

            match key {
                "benchmark" => {
                    benchmark =
                        Some(value.parse().map_err(|_| bad_value("benchmark name"))?);
                }
                "n" | "number_decision_variables" => {
                    n = Some(value.parse().map_err(|_| bad_value("integer"))?);
                }
                "dim" | "number_objectives" => {
                    dim = Some(value.parse().map_err(|_| bad_value("integer"))?);
                }
                "alpha" => alpha = Some(value.parse().map_err(|_| bad_value("integer"))?),
                "mu" => mu = Some(value.parse().map_err(|_| bad_value("integer"))?),
                "lambda" => lambda = Some(value.parse().map_err(|_| bad_value("integer"))?),
                "seed" => seed = Some(value.parse().map_err(|_| bad_value("integer"))?),
                "max_generations" | "maxgen" => {
                    max_generations = Some(value.parse().map_err(|_| bad_value("integer"))?);
                }
                "crossover" => crossover_kind = Some(value.to_ascii_lowercase()),
                "crossover_probability" => {
                    crossover_probability =
                        Some(value.parse().map_err(|_| bad_value("number"))?);
                }
                "crossover_eta" => {
                    crossover_eta = Some(value.parse().map_err(|_| bad_value("number"))?);
                }
                "swap_probability" => {
                    swap_probability = Some(value.parse().map_err(|_| bad_value("number"))?);
                }
                "mutation_probability" => {
                    mutation_probability =
                        Some(value.parse().map_err(|_| bad_value("number"))?);
                }
                "mutation_eta" => {
                    mutation_eta = Some(value.parse().map_err(|_| bad_value("number"))?);
                }
                _ => {
                    return Err(ConfigError::parse(
                        line_no,
                        format!("unknown parameter '{key}'"),
                    ));
                }
            }
        }

        let benchmark = benchmark.ok_or(ConfigError::MissingKey("benchmark"))?;
        let n = n.ok_or(ConfigError::MissingKey("n"))?;
        let dim = dim.ok_or(ConfigError::MissingKey("dim"))?;

        let mut config = Self::new(benchmark, n, dim);
        if let Some(v) = alpha {
            config.alpha = v;
        }
        if let Some(v) = mu {
            config.mu = v;
        }
        if let Some(v) = lambda {
            config.lambda = v;
        }
        if let Some(v) = seed {
            config.seed = Some(v);
        }
        if let Some(v) = max_generations {
            config.max_generations = v;
        }
        config.crossover = match crossover_kind.as_deref() {
            None | Some("sbx") => {
                let default = match Crossover::default() {
                    Crossover::Sbx { probability, eta } => (probability, eta),
                    Crossover::Uniform { .. } => unreachable!("default crossover is SBX"),
                };
                Crossover::Sbx {
                    probability: crossover_probability.unwrap_or(default.0),
                    eta: crossover_eta.unwrap_or(default.1),
                }
            }
            Some("uniform") => Crossover::Uniform {
                swap_probability: swap_probability.unwrap_or(0.5),
            },
            Some(other) => {
                return Err(ConfigError::Invalid(format!(
                    "unknown crossover operator '{other}'"
                )));
            }
        };
        if let Some(v) = mutation_probability {
            config.mutation_probability = v;
        }
        if let Some(v) = mutation_eta {
            config.mutation_eta = v;
        }

        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================
