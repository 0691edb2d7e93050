//! Genetic variation operators for real-valued decision vectors.
//!
//! Crossover and mutation act on gene slices plus per-gene bounds and
//! return newly-owned offspring; parents are immutable inputs, so reusing
//! the same parent across pairs can never alias.
//!
//! # Operators
//!
//! - [`uniform_crossover`]: per-gene value swap with fixed probability
//! - [`sbx_crossover`]: simulated binary crossover (Deb & Agrawal, 1995),
//!   bounds-aware spread factor, offspring clipped to bounds
//! - [`polynomial_mutation`]: bounded polynomial perturbation
//!   (Deb & Goyal, 1996)
//!
//! [`Crossover`] selects between the two recombination operators at
//! configuration time.
//!
//! # References
//!
//! - Deb & Agrawal (1995), "Simulated Binary Crossover for Continuous
//!   Search Space"
//! - Deb & Goyal (1996), "A Combined Genetic Adaptive Search (GeneAS)
//!   for Engineering Design"

mod crossover;
mod operators;

pub use crossover::Crossover;
pub use operators::{polynomial_mutation, sbx_crossover, uniform_crossover};
