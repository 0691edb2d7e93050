//! Property-based and end-to-end checks of the variator core.

use proptest::prelude::*;

use pisa_variator::benchmark::Benchmark;
use pisa_variator::random::RandomSource;
use pisa_variator::variation::{polynomial_mutation, sbx_crossover, uniform_crossover};
use pisa_variator::variator::{InMemoryHandoff, Variator, VariatorConfig, VariatorState};

// ===========================================================================
// Operator bound invariants
// ===========================================================================

proptest! {
    /// SBX offspring never leave the per-gene bounds, whatever the
    /// distribution index or seed.
    #[test]
    fn sbx_respects_bounds(
        seed in any::<u64>(),
        eta in 0.0f64..200.0,
        genes1 in prop::collection::vec(0.0f64..=1.0, 1..20),
    ) {
        let n = genes1.len();
        let genes2: Vec<f64> = genes1.iter().map(|g| 1.0 - g).collect();
        let bounds = vec![(0.0, 1.0); n];
        let mut rng = RandomSource::new(seed);

        let (c1, c2) = sbx_crossover(&genes1, &genes2, &bounds, 1.0, eta, &mut rng);
        for v in c1.iter().chain(&c2) {
            prop_assert!((0.0..=1.0).contains(v), "offspring gene {v} out of bounds");
        }
    }

    /// Polynomial mutation never leaves the per-gene bounds, even with
    /// extreme distribution indices and asymmetric boxes.
    #[test]
    fn mutation_respects_bounds(
        seed in any::<u64>(),
        eta in 0.0f64..200.0,
        genes in prop::collection::vec(-3.0f64..=7.0, 1..20),
    ) {
        let bounds = vec![(-3.0, 7.0); genes.len()];
        let mut rng = RandomSource::new(seed);

        let out = polynomial_mutation(&genes, &bounds, 1.0, eta, &mut rng);
        for v in &out {
            prop_assert!((-3.0..=7.0).contains(v), "mutated gene {v} out of bounds");
        }
    }

    /// Uniform crossover with swap probability zero is the identity.
    #[test]
    fn uniform_zero_swap_is_identity(
        seed in any::<u64>(),
        genes1 in prop::collection::vec(-10.0f64..10.0, 1..20),
    ) {
        let genes2: Vec<f64> = genes1.iter().map(|g| g + 0.5).collect();
        let mut rng = RandomSource::new(seed);
        let (c1, c2) = uniform_crossover(&genes1, &genes2, 0.0, &mut rng);
        prop_assert_eq!(c1, genes1);
        prop_assert_eq!(c2, genes2);
    }

    /// DTLZ objectives are non-negative everywhere on the unit box.
    #[test]
    fn dtlz_non_negative(
        genes in prop::collection::vec(0.0f64..=1.0, 7..15),
        which in 0usize..7,
    ) {
        let b = [
            Benchmark::Dtlz1, Benchmark::Dtlz2, Benchmark::Dtlz3, Benchmark::Dtlz4,
            Benchmark::Dtlz5, Benchmark::Dtlz6, Benchmark::Dtlz7,
        ][which];
        let f = b.evaluate(&genes, 3).unwrap();
        for v in &f {
            prop_assert!(*v >= -1e-9, "{b} produced negative objective {v}");
        }
    }

    /// ZDT objectives (ZDT3's oscillating front excluded) are
    /// non-negative on the natural domain.
    #[test]
    fn zdt_non_negative(
        genes in prop::collection::vec(0.0f64..=1.0, 2..31),
        which in 0usize..3,
    ) {
        let b = [Benchmark::Zdt1, Benchmark::Zdt2, Benchmark::Zdt6][which];
        let f = b.evaluate(&genes, 2).unwrap();
        for v in &f {
            prop_assert!(*v >= -1e-9, "{b} produced negative objective {v}");
        }
    }
}

// ===========================================================================
// State-machine scenarios
// ===========================================================================

/// DTLZ2 with dim = 3, n = 12, alpha = 10. State 0 yields
/// 10 individuals whose genes sit in [0, 1] and whose 3 objectives are
/// finite; with distance genes pinned at 0.5 the objective vector lies on
/// the unit sphere, each component within [0, 1].
#[test]
fn dtlz2_end_to_end_initialization() {
    let config = VariatorConfig::new(Benchmark::Dtlz2, 12, 3)
        .with_alpha(10)
        .with_mu(4)
        .with_lambda(4)
        .with_seed(4711);
    let mut v = Variator::new(config, InMemoryHandoff::new()).unwrap();

    assert_eq!(v.step(VariatorState::Initialize).code(), 0);
    assert_eq!(v.handoff().initial.len(), 10);
    for record in &v.handoff().initial {
        assert_eq!(record.genes.len(), 12);
        assert_eq!(record.objectives.len(), 3);
        assert!(record.genes.iter().all(|g| (0.0..=1.0).contains(g)));
        assert!(record.objectives.iter().all(|f| f.is_finite()));
    }

    // Zero-distance individuals land exactly on the front.
    for position in [[0.1, 0.9], [0.5, 0.5], [0.0, 1.0]] {
        let mut genes = vec![0.5; 12];
        genes[0] = position[0];
        genes[1] = position[1];
        let f = Benchmark::Dtlz2.evaluate(&genes, 3).unwrap();
        assert!(f.iter().all(|v| (0.0..=1.0).contains(v)), "{f:?}");
        let norm: f64 = f.iter().map(|v| v * v).sum();
        assert!((norm - 1.0).abs() < 1e-9);
    }
}

/// variate with mu = 2, lambda = 2 produces exactly two fresh,
/// fully-evaluated identities.
#[test]
fn variate_two_from_two() {
    let config = VariatorConfig::new(Benchmark::Zdt1, 30, 2)
        .with_alpha(6)
        .with_mu(2)
        .with_lambda(2)
        .with_seed(9);
    let mut v = Variator::new(config, InMemoryHandoff::new()).unwrap();
    v.transition(VariatorState::Initialize).unwrap();

    let parents: Vec<_> = v.handoff().initial[..2].iter().map(|r| r.id).collect();
    v.handoff_mut().set_selected(parents.clone());
    v.transition(VariatorState::Variate).unwrap();

    let children = &v.handoff().variated;
    assert_eq!(children.len(), 2);
    for record in children {
        assert!(!parents.contains(&record.id));
        assert_eq!(record.objectives.len(), 2);
        assert_eq!(v.get_objective_value(record.id, 0), record.objectives[0]);
    }
}

/// A full cooperative cycle is reproducible bit-for-bit given a seed.
#[test]
fn full_cycle_is_deterministic() {
    let run = |seed: u64| {
        let config = VariatorConfig::new(Benchmark::Dtlz7, 12, 3)
            .with_alpha(8)
            .with_mu(4)
            .with_lambda(6)
            .with_seed(seed);
        let mut v = Variator::new(config, InMemoryHandoff::new()).unwrap();
        v.transition(VariatorState::Initialize).unwrap();
        for _ in 0..3 {
            let parents: Vec<_> = v
                .handoff()
                .variated
                .iter()
                .chain(&v.handoff().initial)
                .take(4)
                .map(|r| r.id)
                .collect();
            v.handoff_mut().set_selected(parents);
            v.transition(VariatorState::Variate).unwrap();
        }
        v.handoff().variated.clone()
    };

    assert_eq!(run(31337), run(31337));
    assert_ne!(run(31337), run(31338), "different seeds should diverge");
}
