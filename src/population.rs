//! Individual and population data model.
//!
//! The [`Population`] exclusively owns every [`Individual`] created during a
//! run, keyed by a process-lifetime-unique [`Id`]. Identities are handed out
//! by a monotonically increasing counter and are never reused, even after
//! removal — a removed id stays invalid for the rest of the run.
//!
//! Objective vectors are optional by construction: an individual carries
//! `None` until an evaluator writes its objectives, so "read before
//! evaluation" cannot happen silently.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identity of an individual, unique for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Id(pub u32);

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A candidate solution: a real-valued decision vector plus, once
/// evaluated, its objective vector.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Individual {
    /// Decision-variable vector (`n` genes).
    pub genes: Vec<f64>,

    /// Objective vector (`dim` values), `None` until evaluated.
    pub objectives: Option<Vec<f64>>,
}

impl Individual {
    /// Creates an unevaluated individual from a decision vector.
    pub fn new(genes: Vec<f64>) -> Self {
        Self {
            genes,
            objectives: None,
        }
    }

    /// Number of decision variables.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// True if the decision vector is empty.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// True once an evaluator has written the objective vector.
    pub fn is_evaluated(&self) -> bool {
        self.objectives.is_some()
    }
}

/// Id-keyed store owning all individuals of a run.
///
/// Append-only except for explicit removal (archive pruning) and full
/// teardown. The id counter survives [`clear`](Population::clear), so a
/// reset run never reissues an old identity.
#[derive(Debug, Default, Clone)]
pub struct Population {
    members: HashMap<Id, Individual>,
    next_id: u32,
}

impl Population {
    /// Creates an empty population.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an individual and returns its freshly allocated identity.
    pub fn insert(&mut self, individual: Individual) -> Id {
        let id = Id(self.next_id);
        self.next_id += 1;
        self.members.insert(id, individual);
        id
    }

    /// Looks up an individual by identity.
    pub fn get(&self, id: Id) -> Option<&Individual> {
        self.members.get(&id)
    }

    /// Mutable lookup, used by evaluation to write objective vectors.
    pub fn get_mut(&mut self, id: Id) -> Option<&mut Individual> {
        self.members.get_mut(&id)
    }

    /// Removes one individual. Its identity is permanently invalid
    /// afterwards.
    pub fn remove(&mut self, id: Id) -> Option<Individual> {
        self.members.remove(&id)
    }

    /// Keeps only the individuals whose ids appear in `keep`; everything
    /// else is dropped. This is the archive-pruning primitive.
    pub fn retain_ids(&mut self, keep: &[Id]) {
        let keep: std::collections::HashSet<Id> = keep.iter().copied().collect();
        self.members.retain(|id, _| keep.contains(id));
    }

    /// Number of live individuals.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if no individuals are held.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// True if `id` refers to a live individual.
    pub fn contains(&self, id: Id) -> bool {
        self.members.contains_key(&id)
    }

    /// Iterates over all live identities (unordered).
    pub fn ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.members.keys().copied()
    }

    /// Iterates over `(id, individual)` pairs (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (Id, &Individual)> {
        self.members.iter().map(|(id, ind)| (*id, ind))
    }

    /// Drops every individual while keeping the identity counter, so
    /// subsequent inserts still get fresh ids.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Objective value `i` of the individual with identity `id`, or `-1.0`
    /// when no such individual exists.
    ///
    /// This is the read-only lookup the selector collaborator uses without
    /// owning the population. The PISA contract reserves `-1` for "unknown
    /// identity" only.
    ///
    /// # Panics
    /// Panics if the individual exists but has not been evaluated, or if
    /// `i` is out of range for its objective vector — both are contract
    /// violations on the caller's side, not signalled through the `-1`
    /// sentinel.
    pub fn objective_value(&self, id: Id, i: usize) -> f64 {
        match self.members.get(&id) {
            None => -1.0,
            Some(ind) => {
                let objectives = ind
                    .objectives
                    .as_ref()
                    .unwrap_or_else(|| panic!("individual {id} read before evaluation"));
                assert!(
                    i < objectives.len(),
                    "objective index {i} out of range (dim = {})",
                    objectives.len()
                );
                objectives[i]
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
