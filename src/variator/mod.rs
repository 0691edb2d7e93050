//! The cooperative variator: protocol state machine, configuration, and
//! the hand-off seam to the selector collaborator.
//!
//! # Key Types
//!
//! - [`VariatorConfig`]: run parameters (population shape, operators,
//!   benchmark, bounds), built programmatically or from a parameter file
//! - [`Variator`]: owns the population and executes state transitions
//! - [`VariatorState`]: the closed set of protocol states (0, 2, 4, 7,
//!   8, 11)
//! - [`SelectorHandoff`]: the `read_sel` / `read_arc` / `write_ini` /
//!   `write_var` collaborator interface; [`InMemoryHandoff`] is the
//!   loopback implementation
//! - [`StatusCode`]: the `{0, 1, 2}` codes reported to the driving loop
//!
//! # Protocol
//!
//! The outer driver polls the shared state and calls
//! [`Variator::step`] (or the typed [`Variator::transition`]) with the
//! observed state, consulting [`Variator::is_finished`] between cycles.
//! The variator never advances on its own.

mod config;
mod error;
mod handoff;
mod machine;

pub use config::{ConfigError, VariatorConfig};
pub use error::{StatusCode, VariatorError};
pub use handoff::{HandoffError, InMemoryHandoff, OffspringRecord, SelectorHandoff};
pub use machine::{Variator, VariatorState};
