//! End-to-end simulator scenarios through the public factory.

use serde_json::json;
use tread_core::{
    Action, ActionMode, Observation, ObservationId, ObservationMode, SimulatorError, StateId,
    StepResult,
};
use tread_sim::{create_simulator, create_simulator_with, Simulator, SimulatorConfig};
use tread_test_utils::{labeled_mdp, pomdp, two_state_chain, unlabeled_mdp, CHAIN_REWARDS};

// ── Helpers ─────────────────────────────────────────────────────

fn state(s: usize, reward: f64) -> StepResult {
    StepResult::new(Observation::State(StateId(s)), reward)
}

fn actions(sim: &dyn Simulator) -> Vec<Action> {
    sim.available_actions().unwrap().collect()
}

// ── Chains ──────────────────────────────────────────────────────

#[test]
fn chain_walks_to_its_sink() {
    let model = two_state_chain();
    let mut sim = create_simulator(&model, Some(0)).unwrap();

    assert_eq!(sim.restart().unwrap(), state(0, 0.0));
    assert!(!sim.is_done());
    assert_eq!(sim.step(None).unwrap(), state(1, CHAIN_REWARDS[0]));
    assert!(sim.is_done());
    assert_eq!(sim.step(None).unwrap(), state(1, CHAIN_REWARDS[1]));
    assert!(sim.is_done());
    assert_eq!(sim.restart().unwrap(), state(0, 0.0));
    assert!(!sim.is_done());
}

#[test]
fn chain_in_program_level_mode_reports_valuations() {
    let model = two_state_chain();
    let config = SimulatorConfig::default()
        .seed(0)
        .observation_mode(ObservationMode::ProgramLevel);
    let mut sim = create_simulator_with(&model, &config).unwrap();
    let r = sim.restart().unwrap();
    assert_eq!(r.observation, Observation::Valuation(json!({"pos": 0})));
    let r = sim.step(None).unwrap();
    assert_eq!(r.observation, Observation::Valuation(json!({"pos": 1})));
}

// ── Action addressing ───────────────────────────────────────────

#[test]
fn named_and_indexed_addressing_agree() {
    let model = labeled_mdp();
    let mut by_index = create_simulator(&model, Some(21)).unwrap();
    let mut by_name = create_simulator_with(
        &model,
        &SimulatorConfig::default()
            .seed(21)
            .action_mode(ActionMode::GlobalNames),
    )
    .unwrap();

    for i in 0..10 {
        let names = actions(by_name.as_ref());
        let indices = actions(by_index.as_ref());
        assert_eq!(names.len(), indices.len());
        let pick = (i + 1) % names.len();
        let a = by_index.step(Some(indices[pick].clone())).unwrap();
        let b = by_name.step(Some(names[pick].clone())).unwrap();
        assert_eq!(a, b);
        assert_eq!(by_index.current_state(), by_name.current_state());
    }
}

#[test]
fn index_mode_lists_offsets() {
    let model = labeled_mdp();
    let sim = create_simulator(&model, Some(1)).unwrap();
    assert_eq!(
        actions(sim.as_ref()),
        vec![Action::Index(0), Action::Index(1), Action::Index(2)]
    );
}

#[test]
fn rejected_calls_leave_the_simulator_untouched() {
    let model = labeled_mdp();
    let mut sim = create_simulator(&model, Some(4)).unwrap();

    assert!(sim.step(None).is_err());
    assert!(sim.step(Some(Action::Index(9))).is_err());
    assert!(sim.step(Some(Action::from("north"))).is_err());
    assert_eq!(sim.current_state(), StateId(0));

    sim.set_action_mode(ActionMode::GlobalNames).unwrap();
    assert!(sim.step(Some(Action::from("nowhere"))).is_err());
    assert!(sim.step(Some(Action::Index(0))).is_err());
    assert_eq!(sim.current_state(), StateId(0));

    let r = sim.step(Some(Action::from("north"))).unwrap();
    assert_eq!(r, state(1, 1.0));
}

// ── Mode validation ─────────────────────────────────────────────

#[test]
fn failed_mode_changes_keep_the_previous_mode() {
    let model = unlabeled_mdp();
    let mut sim = create_simulator(&model, Some(0)).unwrap();

    let err = sim.set_action_mode(ActionMode::GlobalNames).unwrap_err();
    assert!(matches!(err, SimulatorError::Configuration { .. }));
    assert_eq!(sim.action_mode(), ActionMode::Index);

    let err = sim
        .set_observation_mode(ObservationMode::ProgramLevel)
        .unwrap_err();
    assert!(matches!(err, SimulatorError::Configuration { .. }));
    assert_eq!(sim.observation_mode(), ObservationMode::StateLevel);

    let err = sim.set_full_observability(false).unwrap_err();
    assert!(matches!(err, SimulatorError::Configuration { .. }));
    assert!(sim.full_observability());

    assert!(!err.is_fatal());
    assert_eq!(sim.restart().unwrap(), state(0, 0.0));
}

// ── POMDPs ──────────────────────────────────────────────────────

#[test]
fn pomdp_hides_states_behind_classes() {
    let model = pomdp();
    let mut sim = create_simulator(&model, Some(8)).unwrap();
    assert!(!sim.full_observability());

    let r = sim.restart().unwrap();
    assert_eq!(r.observation, Observation::Class(ObservationId(0)));

    // Both successors of action 0 share class 1.
    let r = sim.step(Some(Action::Index(0))).unwrap();
    assert_eq!(r.observation, Observation::Class(ObservationId(1)));
    assert_eq!(sim.nr_available_actions(), 2);
}

#[test]
fn pomdp_can_be_fully_observed() {
    let model = pomdp();
    let config = SimulatorConfig::default()
        .seed(8)
        .full_observability(true)
        .observation_mode(ObservationMode::ProgramLevel);
    let mut sim = create_simulator_with(&model, &config).unwrap();
    let r = sim.step(Some(Action::Index(1))).unwrap();
    assert_eq!(r, StepResult::new(Observation::Valuation(json!({"s": 0})), 0.0));
}

#[test]
fn partial_program_level_config_is_not_implemented() {
    let model = pomdp();
    let config = SimulatorConfig::default().observation_mode(ObservationMode::ProgramLevel);
    let err = create_simulator_with(&model, &config).err().unwrap();
    assert!(matches!(err, SimulatorError::NotImplemented { .. }));
}

// ── Random rollouts ─────────────────────────────────────────────

#[test]
fn random_rollout_terminates() {
    let model = labeled_mdp();
    let mut sim = create_simulator(&model, Some(99)).unwrap();
    let mut steps = 0;
    while !sim.is_done() && steps < 1_000 {
        let r = sim.random_step().unwrap();
        assert!(r.reward >= 1.0);
        steps += 1;
    }
    assert!(sim.is_done());
    assert_eq!(sim.current_state(), StateId(3));
}
