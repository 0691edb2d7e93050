//! The variator state machine.
//!
//! The variator is the passive half of a cooperative optimization loop:
//! an external driver polls the shared state and calls one transition at
//! a time. State numbers follow the PISA protocol; `7`, `8` and `11` are
//! synchronization points with the selector and carry no variator work
//! beyond reset bookkeeping.

use tracing::debug;

use crate::population::{Id, Individual, Population};
use crate::random::RandomSource;
use crate::variation::polynomial_mutation;

use super::config::{ConfigError, VariatorConfig};
use super::error::{StatusCode, VariatorError};
use super::handoff::{OffspringRecord, SelectorHandoff};

/// Protocol states of the variator, with their PISA state numbers.
///
/// The closed enum replaces the raw integers of the original protocol so
/// an out-of-protocol state cannot be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariatorState {
    /// State 0: create and publish the initial population.
    Initialize,
    /// State 2: read parents, variate, publish children.
    Variate,
    /// State 4: terminal teardown; nothing is valid afterwards.
    Terminate,
    /// State 7: the selector finished; nothing to do.
    SelectorTerminated,
    /// State 8: reset and get ready to re-enter state 0.
    Reset,
    /// State 11: the selector reset; nothing to do.
    SelectorReset,
}

impl VariatorState {
    /// The PISA protocol number of this state.
    pub fn code(&self) -> u32 {
        match self {
            Self::Initialize => 0,
            Self::Variate => 2,
            Self::Terminate => 4,
            Self::SelectorTerminated => 7,
            Self::Reset => 8,
            Self::SelectorReset => 11,
        }
    }

    /// Parses a PISA state number into a variator state; numbers assigned
    /// to the selector (or out of protocol) return `None`.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Initialize),
            2 => Some(Self::Variate),
            4 => Some(Self::Terminate),
            7 => Some(Self::SelectorTerminated),
            8 => Some(Self::Reset),
            11 => Some(Self::SelectorReset),
            _ => None,
        }
    }
}

/// Prints the protocol number, matching the PISA state files.
impl std::fmt::Display for VariatorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The variator: population owner, operator host, and protocol endpoint.
///
/// Generic over the hand-off implementation so tests and in-process
/// drivers can substitute the transport.
///
/// # Usage
///
/// ```
/// use pisa_variator::benchmark::Benchmark;
/// use pisa_variator::variator::{InMemoryHandoff, Variator, VariatorConfig, VariatorState};
///
/// let config = VariatorConfig::new(Benchmark::Dtlz2, 12, 3)
///     .with_alpha(10)
///     .with_seed(42);
/// let mut variator = Variator::new(config, InMemoryHandoff::new()).unwrap();
///
/// assert_eq!(variator.step(VariatorState::Initialize).code(), 0);
/// assert_eq!(variator.handoff().initial.len(), 10);
/// ```
pub struct Variator<H: SelectorHandoff> {
    config: VariatorConfig,
    bounds: Vec<(f64, f64)>,
    population: Population,
    rng: RandomSource,
    handoff: H,
    generation: usize,
    initialized: bool,
    terminated: bool,
}

impl<H: SelectorHandoff> Variator<H> {
    /// Creates a variator for a validated configuration.
    pub fn new(config: VariatorConfig, handoff: H) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let bounds = config.resolved_bounds();
        Ok(Self {
            config,
            bounds,
            population: Population::new(),
            rng: RandomSource::new(seed),
            handoff,
            generation: 0,
            initialized: false,
            terminated: false,
        })
    }

    /// Creates a variator from a PISA-style parameter file.
    pub fn from_param_file(
        path: impl AsRef<std::path::Path>,
        handoff: H,
    ) -> Result<Self, ConfigError> {
        let config = VariatorConfig::from_param_file(path)?;
        Self::new(config, handoff)
    }

    /// Executes one protocol state transition.
    ///
    /// Errors are surfaced immediately and never retried; after a failed
    /// transition the run is considered halted unless the driver decides
    /// otherwise.
    pub fn transition(&mut self, state: VariatorState) -> Result<(), VariatorError> {
        if self.terminated {
            return Err(VariatorError::InvalidTransition {
                state: state.code(),
                reason: "variator already terminated (state 4)",
            });
        }
        debug!(state = state.code(), generation = self.generation, "entering state");
        match state {
            VariatorState::Initialize => self.state_initialize(),
            VariatorState::Variate => self.state_variate(),
            VariatorState::Terminate => {
                self.state_terminate();
                Ok(())
            }
            VariatorState::Reset => {
                self.state_reset();
                Ok(())
            }
            VariatorState::SelectorTerminated | VariatorState::SelectorReset => Ok(()),
        }
    }

    /// Numeric-code wrapper around [`transition`](Variator::transition)
    /// for drivers speaking the raw PISA protocol.
    pub fn step(&mut self, state: VariatorState) -> StatusCode {
        match self.transition(state) {
            Ok(()) => StatusCode::Success,
            Err(e) => {
                debug!(state = state.code(), error = %e, "state transition failed");
                e.status()
            }
        }
    }

    /// Whether the configured termination criterion is met.
    ///
    /// A stateless predicate for the driving loop; the state functions
    /// never consult it themselves.
    pub fn is_finished(&self) -> bool {
        self.generation >= self.config.max_generations
    }

    /// Objective value `i` of individual `id`, or `-1.0` for an unknown
    /// identity. See [`Population::objective_value`] for the full
    /// contract.
    pub fn get_objective_value(&self, id: Id, i: usize) -> f64 {
        self.population.objective_value(id, i)
    }

    /// The population owned by this variator.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Completed variation cycles since the last initialize/reset.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The run configuration.
    pub fn config(&self) -> &VariatorConfig {
        &self.config
    }

    /// The hand-off endpoint (tests and in-process drivers stage selector
    /// data through it).
    pub fn handoff(&self) -> &H {
        &self.handoff
    }

    /// Mutable hand-off access.
    pub fn handoff_mut(&mut self) -> &mut H {
        &mut self.handoff
    }

    // ---- state bodies -----------------------------------------------------

    /// State 0: sample `alpha` decision vectors uniformly within bounds,
    /// evaluate them, and publish the initial population.
    fn state_initialize(&mut self) -> Result<(), VariatorError> {
        if self.initialized {
            return Err(VariatorError::InvalidTransition {
                state: VariatorState::Initialize.code(),
                reason: "population already initialized; reset (state 8) first",
            });
        }

        let genes: Vec<Vec<f64>> = (0..self.config.alpha)
            .map(|_| {
                self.bounds
                    .iter()
                    .map(|&(lo, hi)| self.rng.in_bounds(lo, hi))
                    .collect()
            })
            .collect();
        let objectives = self.evaluate_all(&genes)?;

        let records = self.insert_all(genes, objectives);
        self.handoff.write_initial(&records)?;
        self.initialized = true;
        self.generation = 0;
        debug!(alpha = records.len(), "initial population published");
        Ok(())
    }

    /// State 2: prune to the selector's archive, read `mu` parents,
    /// produce `lambda` children by crossover + mutation, evaluate and
    /// publish them.
    fn state_variate(&mut self) -> Result<(), VariatorError> {
        if !self.initialized {
            return Err(VariatorError::InvalidTransition {
                state: VariatorState::Variate.code(),
                reason: "no population; initialize (state 0) first",
            });
        }

        if let Some(keep) = self.handoff.read_archive()? {
            let before = self.population.len();
            self.population.retain_ids(&keep);
            debug!(
                pruned = before - self.population.len(),
                remaining = self.population.len(),
                "archive pruning"
            );
        }

        let parents = self.handoff.read_selected()?;
        if parents.len() != self.config.mu {
            return Err(VariatorError::WrongParentCount {
                expected: self.config.mu,
                got: parents.len(),
            });
        }
        let parent_genes: Vec<Vec<f64>> = parents
            .iter()
            .map(|&id| {
                self.population
                    .get(id)
                    .map(|ind| ind.genes.clone())
                    .ok_or(VariatorError::UnknownParent(id))
            })
            .collect::<Result<_, _>>()?;

        let child_genes = self.make_offspring(&parent_genes);
        debug_assert_eq!(child_genes.len(), self.config.lambda);
        let objectives = self.evaluate_all(&child_genes)?;

        let records = self.insert_all(child_genes, objectives);
        self.handoff.write_variated(&records)?;
        self.generation += 1;
        debug!(
            lambda = records.len(),
            generation = self.generation,
            "children published"
        );
        Ok(())
    }

    /// State 4: full teardown. The variator refuses all further
    /// transitions.
    fn state_terminate(&mut self) {
        self.population.clear();
        self.initialized = false;
        self.terminated = true;
        debug!("variator terminated");
    }

    /// State 8: drop all individuals and get ready to re-enter state 0.
    /// The identity counter is not rewound — identities are unique for
    /// the whole run, across resets.
    fn state_reset(&mut self) {
        self.population.clear();
        self.initialized = false;
        self.generation = 0;
        debug!("variator reset");
    }

    // ---- helpers ----------------------------------------------------------

    /// Produces exactly `lambda` children from the `mu` parents by cyclic
    /// pairing: pair `j` recombines parents `2j mod mu` and
    /// `(2j + 1) mod mu`; when `lambda` is odd the final pair contributes
    /// only its first child.
    fn make_offspring(&mut self, parents: &[Vec<f64>]) -> Vec<Vec<f64>> {
        let mu = parents.len();
        let lambda = self.config.lambda;
        let mut children = Vec::with_capacity(lambda);

        let mut pair = 0usize;
        while children.len() < lambda {
            let p1 = &parents[(2 * pair) % mu];
            let p2 = &parents[(2 * pair + 1) % mu];
            let (c1, c2) = self
                .config
                .crossover
                .recombine(p1, p2, &self.bounds, &mut self.rng);
            children.push(c1);
            if children.len() < lambda {
                children.push(c2);
            }
            pair += 1;
        }

        children
            .into_iter()
            .map(|c| {
                polynomial_mutation(
                    &c,
                    &self.bounds,
                    self.config.mutation_probability,
                    self.config.mutation_eta,
                    &mut self.rng,
                )
            })
            .collect()
    }

    /// Evaluates a batch of decision vectors with the configured
    /// benchmark. Independent individuals, so with the `parallel` feature
    /// the batch fans out over rayon.
    fn evaluate_all(
        &self,
        genes: &[Vec<f64>],
    ) -> Result<Vec<Vec<f64>>, crate::benchmark::EvalError> {
        let benchmark = self.config.benchmark;
        let dim = self.config.dim;

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            genes
                .par_iter()
                .map(|g| benchmark.evaluate(g, dim))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            genes.iter().map(|g| benchmark.evaluate(g, dim)).collect()
        }
    }

    /// Inserts evaluated individuals into the population and builds their
    /// hand-off records.
    fn insert_all(
        &mut self,
        genes: Vec<Vec<f64>>,
        objectives: Vec<Vec<f64>>,
    ) -> Vec<OffspringRecord> {
        genes
            .into_iter()
            .zip(objectives)
            .map(|(g, f)| {
                let record_genes = g.clone();
                let record_objectives = f.clone();
                let id = self.population.insert(Individual {
                    genes: g,
                    objectives: Some(f),
                });
                OffspringRecord {
                    id,
                    genes: record_genes,
                    objectives: record_objectives,
                }
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::Benchmark;
    use crate::variator::handoff::{HandoffError, InMemoryHandoff};

    fn dtlz2_variator(alpha: usize, mu: usize, lambda: usize) -> Variator<InMemoryHandoff> {
        let config = VariatorConfig::new(Benchmark::Dtlz2, 12, 3)
            .with_alpha(alpha)
            .with_mu(mu)
            .with_lambda(lambda)
            .with_seed(42);
        Variator::new(config, InMemoryHandoff::new()).unwrap()
    }

    // ---- State codes ----

    #[test]
    fn test_state_codes_round_trip() {
        for state in [
            VariatorState::Initialize,
            VariatorState::Variate,
            VariatorState::Terminate,
            VariatorState::SelectorTerminated,
            VariatorState::Reset,
            VariatorState::SelectorReset,
        ] {
            assert_eq!(VariatorState::from_code(state.code()), Some(state));
        }
    }

    #[test]
    fn test_selector_states_are_not_variator_states() {
        // 1, 3, 5, 6, 9, 10 belong to the selector side of the protocol.
        for code in [1, 3, 5, 6, 9, 10, 12, 99] {
            assert_eq!(VariatorState::from_code(code), None);
        }
    }

    // ---- State 0 ----

    #[test]
    fn test_initialize_creates_alpha_individuals() {
        let mut v = dtlz2_variator(10, 4, 4);
        v.transition(VariatorState::Initialize).unwrap();

        assert_eq!(v.population().len(), 10);
        assert_eq!(v.handoff().initial.len(), 10);
        for record in &v.handoff().initial {
            assert_eq!(record.genes.len(), 12);
            assert_eq!(record.objectives.len(), 3);
            assert!(record.genes.iter().all(|g| (0.0..=1.0).contains(g)));
        }
    }

    #[test]
    fn test_initialize_twice_without_reset_fails() {
        let mut v = dtlz2_variator(5, 2, 2);
        v.transition(VariatorState::Initialize).unwrap();
        let err = v.transition(VariatorState::Initialize).unwrap_err();
        assert!(matches!(err, VariatorError::InvalidTransition { state: 0, .. }));
        assert_eq!(err.status(), StatusCode::UnspecifiedError);
    }

    #[test]
    fn test_initialize_respects_explicit_bounds() {
        let config = VariatorConfig::new(Benchmark::Dtlz2, 12, 3)
            .with_alpha(20)
            .with_bounds(vec![(0.2, 0.4); 12])
            .with_seed(7);
        let mut v = Variator::new(config, InMemoryHandoff::new()).unwrap();
        v.transition(VariatorState::Initialize).unwrap();
        for record in &v.handoff().initial {
            assert!(record.genes.iter().all(|g| (0.2..=0.4).contains(g)));
        }
    }

    // ---- State 2 ----

    fn stage_parents(v: &mut Variator<InMemoryHandoff>, count: usize) -> Vec<Id> {
        let ids: Vec<Id> = v.handoff().initial[..count].iter().map(|r| r.id).collect();
        v.handoff_mut().set_selected(ids.clone());
        ids
    }

    #[test]
    fn test_variate_produces_exactly_lambda_children() {
        let mut v = dtlz2_variator(10, 4, 7);
        v.transition(VariatorState::Initialize).unwrap();
        stage_parents(&mut v, 4);

        v.transition(VariatorState::Variate).unwrap();

        assert_eq!(v.handoff().variated.len(), 7);
        assert_eq!(v.population().len(), 17);
        assert_eq!(v.generation(), 1);
        for record in &v.handoff().variated {
            assert_eq!(record.genes.len(), 12);
            assert_eq!(record.objectives.len(), 3);
            assert!(record.genes.iter().all(|g| (0.0..=1.0).contains(g)));
        }
    }

    #[test]
    fn test_variate_two_parents_two_children() {
        let mut v = dtlz2_variator(10, 2, 2);
        v.transition(VariatorState::Initialize).unwrap();
        let parents = stage_parents(&mut v, 2);

        v.transition(VariatorState::Variate).unwrap();

        let children: Vec<Id> = v.handoff().variated.iter().map(|r| r.id).collect();
        assert_eq!(children.len(), 2);
        for id in &children {
            assert!(!parents.contains(id), "child id reuses a parent id");
            let ind = v.population().get(*id).unwrap();
            assert!(ind.is_evaluated());
        }
    }

    #[test]
    fn test_variate_before_initialize_fails() {
        let mut v = dtlz2_variator(10, 4, 4);
        v.handoff_mut().set_selected(vec![]);
        let err = v.transition(VariatorState::Variate).unwrap_err();
        assert!(matches!(err, VariatorError::InvalidTransition { state: 2, .. }));
    }

    #[test]
    fn test_variate_wrong_parent_count_fails() {
        let mut v = dtlz2_variator(10, 4, 4);
        v.transition(VariatorState::Initialize).unwrap();
        stage_parents(&mut v, 2); // mu is 4

        let err = v.transition(VariatorState::Variate).unwrap_err();
        assert!(matches!(
            err,
            VariatorError::WrongParentCount { expected: 4, got: 2 }
        ));
    }

    #[test]
    fn test_variate_unknown_parent_fails() {
        let mut v = dtlz2_variator(10, 2, 2);
        v.transition(VariatorState::Initialize).unwrap();
        v.handoff_mut().set_selected(vec![Id(9999), Id(9998)]);

        let err = v.transition(VariatorState::Variate).unwrap_err();
        assert!(matches!(err, VariatorError::UnknownParent(_)));
        assert_eq!(err.status(), StatusCode::UnspecifiedError);
    }

    #[test]
    fn test_variate_missing_selected_set_is_file_read() {
        let mut v = dtlz2_variator(10, 4, 4);
        v.transition(VariatorState::Initialize).unwrap();
        // Nothing staged: the sel read fails like a missing file.
        assert_eq!(
            v.step(VariatorState::Variate),
            StatusCode::FileReadError
        );
    }

    #[test]
    fn test_archive_pruning_drops_unreferenced() {
        let mut v = dtlz2_variator(10, 2, 2);
        v.transition(VariatorState::Initialize).unwrap();
        let keep: Vec<Id> = v.handoff().initial[..3].iter().map(|r| r.id).collect();

        v.handoff_mut().set_archive(keep.clone());
        v.handoff_mut().set_selected(keep[..2].to_vec());
        v.transition(VariatorState::Variate).unwrap();

        // 3 kept + 2 children.
        assert_eq!(v.population().len(), 5);
        let dropped = v.handoff().initial[4].id;
        assert_eq!(v.get_objective_value(dropped, 0), -1.0);
    }

    #[test]
    fn test_mu_not_equal_lambda_cyclic_pairing() {
        // mu = 3, lambda = 8: pairing wraps over the parent list.
        let mut v = dtlz2_variator(10, 3, 8);
        v.transition(VariatorState::Initialize).unwrap();
        stage_parents(&mut v, 3);
        v.transition(VariatorState::Variate).unwrap();
        assert_eq!(v.handoff().variated.len(), 8);
    }

    // ---- States 4, 7, 8, 11 ----

    #[test]
    fn test_terminate_releases_everything() {
        let mut v = dtlz2_variator(10, 4, 4);
        v.transition(VariatorState::Initialize).unwrap();
        v.transition(VariatorState::Terminate).unwrap();

        assert!(v.population().is_empty());
        let err = v.transition(VariatorState::Initialize).unwrap_err();
        assert!(matches!(err, VariatorError::InvalidTransition { .. }));
        // Even the no-op states are invalid after teardown.
        assert_eq!(
            v.step(VariatorState::SelectorTerminated),
            StatusCode::UnspecifiedError
        );
    }

    #[test]
    fn test_selector_sync_states_are_noops() {
        let mut v = dtlz2_variator(10, 4, 4);
        assert_eq!(v.step(VariatorState::SelectorTerminated), StatusCode::Success);
        assert_eq!(v.step(VariatorState::SelectorReset), StatusCode::Success);
        assert!(v.population().is_empty());
    }

    #[test]
    fn test_reset_allows_reinitialize_with_fresh_ids() {
        let mut v = dtlz2_variator(5, 2, 2);
        v.transition(VariatorState::Initialize).unwrap();
        let first_ids: Vec<Id> = v.handoff().initial.iter().map(|r| r.id).collect();

        v.transition(VariatorState::Reset).unwrap();
        assert!(v.population().is_empty());
        assert_eq!(v.generation(), 0);

        v.transition(VariatorState::Initialize).unwrap();
        for record in &v.handoff().initial {
            assert!(
                !first_ids.contains(&record.id),
                "identity {} reissued after reset",
                record.id
            );
        }
    }

    // ---- is_finished ----

    #[test]
    fn test_is_finished_after_generation_budget() {
        let config = VariatorConfig::new(Benchmark::Dtlz2, 12, 3)
            .with_alpha(6)
            .with_mu(2)
            .with_lambda(2)
            .with_max_generations(3)
            .with_seed(42);
        let mut v = Variator::new(config, InMemoryHandoff::new()).unwrap();
        v.transition(VariatorState::Initialize).unwrap();

        for gen in 0..3 {
            assert!(!v.is_finished(), "finished too early at generation {gen}");
            stage_parents(&mut v, 2);
            v.transition(VariatorState::Variate).unwrap();
        }
        assert!(v.is_finished());
    }

    // ---- Determinism ----

    #[test]
    fn test_same_seed_reproduces_run_exactly() {
        let run = || {
            let mut v = dtlz2_variator(8, 4, 4);
            v.transition(VariatorState::Initialize).unwrap();
            stage_parents(&mut v, 4);
            v.transition(VariatorState::Variate).unwrap();
            (
                v.handoff().initial.clone(),
                v.handoff().variated.clone(),
            )
        };

        let (ini_a, var_a) = run();
        let (ini_b, var_b) = run();
        assert_eq!(ini_a, ini_b);
        assert_eq!(var_a, var_b);
    }

    // ---- objective lookup ----

    #[test]
    fn test_get_objective_value_contract() {
        let mut v = dtlz2_variator(5, 2, 2);
        v.transition(VariatorState::Initialize).unwrap();

        let record = &v.handoff().initial[0];
        assert_eq!(
            v.get_objective_value(record.id, 1),
            record.objectives[1]
        );
        assert_eq!(v.get_objective_value(Id(4242), 0), -1.0);
    }

    // ---- Failing hand-off propagates as status 2 ----

    struct BrokenHandoff;

    impl SelectorHandoff for BrokenHandoff {
        fn read_selected(&mut self) -> Result<Vec<Id>, HandoffError> {
            Err(HandoffError::read("sel file locked"))
        }
        fn read_archive(&mut self) -> Result<Option<Vec<Id>>, HandoffError> {
            Ok(None)
        }
        fn write_initial(&mut self, _: &[OffspringRecord]) -> Result<(), HandoffError> {
            Err(HandoffError::write("ini file not writable"))
        }
        fn write_variated(&mut self, _: &[OffspringRecord]) -> Result<(), HandoffError> {
            Err(HandoffError::write("var file not writable"))
        }
    }

    #[test]
    fn test_handoff_failure_is_file_read_status() {
        let config = VariatorConfig::new(Benchmark::Zdt1, 30, 2)
            .with_alpha(4)
            .with_seed(1);
        let mut v = Variator::new(config, BrokenHandoff).unwrap();
        assert_eq!(v.step(VariatorState::Initialize), StatusCode::FileReadError);
    }
}
