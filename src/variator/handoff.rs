//! Hand-off seam between the variator and its selector collaborator.
//!
//! The PISA protocol exchanges four pieces of data per cooperative cycle:
//! the selected parent identities (`sel`), the identities the selector
//! still references (`arc`), and the variator's two outputs — the initial
//! population (`ini`) and the freshly variated children (`var`). The wire
//! format and transport are owned by surrounding code; this module only
//! fixes the interface, and the variator treats each call as an atomic,
//! already-synchronized operation.

use crate::population::Id;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Failure at the hand-off boundary. Always reported upward as a
/// file-read status; the variator never retries.
#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    #[error("hand-off read failed: {0}")]
    Read(String),

    #[error("hand-off write failed: {0}")]
    Write(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HandoffError {
    pub fn read(reason: impl Into<String>) -> Self {
        Self::Read(reason.into())
    }

    pub fn write(reason: impl Into<String>) -> Self {
        Self::Write(reason.into())
    }
}

/// Identity plus full decision/objective data for one individual, as
/// handed to the selector after creation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OffspringRecord {
    pub id: Id,
    pub genes: Vec<f64>,
    pub objectives: Vec<f64>,
}

/// The collaborator interface the state machine drives.
///
/// Implementations wrap whatever transport the deployment uses (PISA's
/// polling files, a channel, a test buffer). Each method corresponds to
/// one of the classic `read_sel` / `read_arc` / `write_ini` / `write_var`
/// operations.
pub trait SelectorHandoff {
    /// Identities of the `mu` parents chosen by the selector for this
    /// generation.
    fn read_selected(&mut self) -> Result<Vec<Id>, HandoffError>;

    /// Identities the selector still references, or `None` when no
    /// archive information is available this round (pruning is skipped).
    fn read_archive(&mut self) -> Result<Option<Vec<Id>>, HandoffError>;

    /// Publishes the initial population created in state 0.
    fn write_initial(&mut self, individuals: &[OffspringRecord]) -> Result<(), HandoffError>;

    /// Publishes the children created in state 2.
    fn write_variated(&mut self, individuals: &[OffspringRecord]) -> Result<(), HandoffError>;
}

/// Loopback hand-off for tests and in-process drivers.
///
/// The driver stages the selector's side with [`set_selected`] /
/// [`set_archive`]; the variator's writes land in [`initial`] and
/// [`variated`] (last write wins, mirroring PISA's overwritten files).
///
/// [`set_selected`]: InMemoryHandoff::set_selected
/// [`set_archive`]: InMemoryHandoff::set_archive
/// [`initial`]: InMemoryHandoff::initial
/// [`variated`]: InMemoryHandoff::variated
#[derive(Debug, Default)]
pub struct InMemoryHandoff {
    selected: Option<Vec<Id>>,
    archive: Option<Vec<Id>>,
    /// Initial population published by state 0.
    pub initial: Vec<OffspringRecord>,
    /// Children published by the most recent state 2.
    pub variated: Vec<OffspringRecord>,
}

impl InMemoryHandoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages the selected parents for the next `read_selected` call.
    /// Each staging is consumed by exactly one read, like a rewritten
    /// `sel` file.
    pub fn set_selected(&mut self, ids: Vec<Id>) {
        self.selected = Some(ids);
    }

    /// Stages the archive for the next `read_archive` call.
    pub fn set_archive(&mut self, ids: Vec<Id>) {
        self.archive = Some(ids);
    }
}

impl SelectorHandoff for InMemoryHandoff {
    fn read_selected(&mut self) -> Result<Vec<Id>, HandoffError> {
        self.selected
            .take()
            .ok_or_else(|| HandoffError::read("no selected set staged"))
    }

    fn read_archive(&mut self) -> Result<Option<Vec<Id>>, HandoffError> {
        Ok(self.archive.take())
    }

    fn write_initial(&mut self, individuals: &[OffspringRecord]) -> Result<(), HandoffError> {
        self.initial = individuals.to_vec();
        Ok(())
    }

    fn write_variated(&mut self, individuals: &[OffspringRecord]) -> Result<(), HandoffError> {
        self.variated = individuals.to_vec();
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_is_consumed_once() {
        let mut handoff = InMemoryHandoff::new();
        handoff.set_selected(vec![Id(1), Id(2)]);

        assert_eq!(handoff.read_selected().unwrap(), vec![Id(1), Id(2)]);
        assert!(handoff.read_selected().is_err(), "second read must fail");
    }

    #[test]
    fn test_missing_archive_is_none() {
        let mut handoff = InMemoryHandoff::new();
        assert_eq!(handoff.read_archive().unwrap(), None);

        handoff.set_archive(vec![Id(3)]);
        assert_eq!(handoff.read_archive().unwrap(), Some(vec![Id(3)]));
        assert_eq!(handoff.read_archive().unwrap(), None);
    }

    #[test]
    fn test_writes_replace_previous_contents() {
        let mut handoff = InMemoryHandoff::new();
        let rec = |id: u32| OffspringRecord {
            id: Id(id),
            genes: vec![0.0],
            objectives: vec![1.0],
        };

        handoff.write_variated(&[rec(1), rec(2)]).unwrap();
        handoff.write_variated(&[rec(3)]).unwrap();
        assert_eq!(handoff.variated.len(), 1);
        assert_eq!(handoff.variated[0].id, Id(3));
    }
}
