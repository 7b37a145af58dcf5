//! Property tests over seeds and action sequences.

use proptest::prelude::*;
use tread_core::{Action, ActionMode, SimulatorError, StepResult};
use tread_sim::{create_simulator, create_simulator_with, Simulator, SimulatorConfig};
use tread_sparse::SparseModel;
use tread_test_utils::{labeled_mdp, pomdp, two_state_chain, unlabeled_mdp};

const MODELS: [fn() -> SparseModel; 4] = [two_state_chain, labeled_mdp, unlabeled_mdp, pomdp];

/// Drive `sim` by choosing `picks[i] % n` at each step.
fn drive(sim: &mut dyn Simulator, picks: &[usize]) -> Result<Vec<StepResult>, SimulatorError> {
    let mut out = vec![sim.restart()?];
    for &p in picks {
        let n = sim.nr_available_actions();
        out.push(sim.step(Some(Action::Index(p % n)))?);
    }
    Ok(out)
}

proptest! {
    #[test]
    fn equal_seeds_give_equal_runs(
        which in 0..MODELS.len(),
        seed in any::<u64>(),
        picks in prop::collection::vec(0usize..8, 0..40),
    ) {
        let model = MODELS[which]();
        let mut a = create_simulator(&model, Some(seed)).unwrap();
        let mut b = create_simulator(&model, Some(seed)).unwrap();
        prop_assert_eq!(drive(a.as_mut(), &picks).unwrap(), drive(b.as_mut(), &picks).unwrap());
    }

    #[test]
    fn restart_is_always_the_same(
        which in 0..MODELS.len(),
        seed in any::<u64>(),
        picks in prop::collection::vec(0usize..8, 0..20),
    ) {
        let model = MODELS[which]();
        let mut sim = create_simulator(&model, Some(seed)).unwrap();
        let first = sim.restart().unwrap();
        drive(sim.as_mut(), &picks).unwrap();
        prop_assert_eq!(sim.restart().unwrap(), first);
    }

    #[test]
    fn listed_actions_match_the_count(
        which in 0..MODELS.len(),
        seed in any::<u64>(),
        picks in prop::collection::vec(0usize..8, 0..20),
    ) {
        let model = MODELS[which]();
        let mut sim = create_simulator(&model, Some(seed)).unwrap();
        for p in picks {
            let listed: Vec<Action> = sim.available_actions().unwrap().collect();
            prop_assert_eq!(listed.len(), sim.nr_available_actions());
            prop_assert!(!listed.is_empty());
            sim.step(Some(listed[p % listed.len()].clone())).unwrap();
        }
    }

    #[test]
    fn named_listing_matches_the_count(
        seed in any::<u64>(),
        picks in prop::collection::vec(0usize..8, 0..20),
    ) {
        let model = labeled_mdp();
        let config = SimulatorConfig::default()
            .seed(seed)
            .action_mode(ActionMode::GlobalNames);
        let mut sim = create_simulator_with(&model, &config).unwrap();
        for p in picks {
            let listed: Vec<Action> = sim.available_actions().unwrap().collect();
            prop_assert_eq!(listed.len(), sim.nr_available_actions());
            let pick = listed[p % listed.len()].clone();
            prop_assert!(pick.as_name().is_some());
            sim.step(Some(pick)).unwrap();
        }
    }

    #[test]
    fn omitted_action_on_a_chain_is_action_zero(
        seed in any::<u64>(),
        len in 1usize..10,
    ) {
        let model = two_state_chain();
        let mut omitted = create_simulator(&model, Some(seed)).unwrap();
        let mut explicit = create_simulator(&model, Some(seed)).unwrap();
        for _ in 0..len {
            prop_assert_eq!(
                omitted.step(None).unwrap(),
                explicit.step(Some(Action::Index(0))).unwrap()
            );
        }
    }

    #[test]
    fn out_of_range_index_never_moves(
        which in 0..MODELS.len(),
        seed in any::<u64>(),
        extra in 0usize..5,
    ) {
        let model = MODELS[which]();
        let mut sim = create_simulator(&model, Some(seed)).unwrap();
        let before = sim.current_state();
        let n = sim.nr_available_actions();
        let err = sim.step(Some(Action::Index(n + extra))).unwrap_err();
        prop_assert_eq!(err, SimulatorError::InvalidAction { action: n + extra, available: n });
        prop_assert_eq!(sim.current_state(), before);
    }
}
