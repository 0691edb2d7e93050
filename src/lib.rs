//! PISA-style cooperative variator for multi-objective evolutionary
//! optimization.
//!
//! A variator is one half of a cooperatively-synchronized optimization
//! loop: it creates candidate solutions and applies genetic variation,
//! while a separate *selector* process decides which individuals survive.
//! The two sides communicate only through numbered protocol states and a
//! narrow hand-off interface, never through shared internals.
//!
//! This crate covers the variator side:
//!
//! - **State machine** ([`variator`]): the PISA protocol states
//!   (initialize, variate, terminate, reset, and the selector
//!   synchronization points), driven externally one transition at a time.
//! - **Population model** ([`population`]): an id-keyed store owning all
//!   individuals of a run; identities are never reused.
//! - **Variation operators** ([`variation`]): uniform crossover,
//!   simulated binary crossover, and polynomial mutation over bounded
//!   real-valued decision vectors.
//! - **Benchmark family** ([`benchmark`]): DTLZ1–7, ZDT1/2/3/4/6,
//!   SPHERE, KUR, QV and COMET objective functions, all minimized.
//! - **Random source** ([`random`]): a single seeded generator per run,
//!   making whole runs reproducible.
//!
//! # Example
//!
//! ```
//! use pisa_variator::benchmark::Benchmark;
//! use pisa_variator::variator::{InMemoryHandoff, Variator, VariatorConfig, VariatorState};
//!
//! let config = VariatorConfig::new(Benchmark::Dtlz2, 12, 3)
//!     .with_alpha(10)
//!     .with_mu(4)
//!     .with_lambda(4)
//!     .with_seed(42);
//! let mut variator = Variator::new(config, InMemoryHandoff::new()).unwrap();
//!
//! // State 0: create and publish the initial population.
//! assert_eq!(variator.step(VariatorState::Initialize).code(), 0);
//!
//! // The selector picks parents; here we stage them by hand.
//! let parents: Vec<_> = variator.handoff().initial[..4].iter().map(|r| r.id).collect();
//! variator.handoff_mut().set_selected(parents);
//!
//! // State 2: variate and publish the children.
//! assert_eq!(variator.step(VariatorState::Variate).code(), 0);
//! assert_eq!(variator.handoff().variated.len(), 4);
//! ```

pub mod benchmark;
pub mod population;
pub mod random;
pub mod variation;
pub mod variator;
