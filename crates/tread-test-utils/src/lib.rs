//! Test utilities and mock collaborators for Tread development.
//!
//! Provides small fixture models in [`fixtures`] and three mocks:
//!
//! - [`RepresentationOverride`] reports a different storage representation
//!   for an otherwise ordinary model, for exercising backend selection.
//! - [`DroppingModel`] loses parts of its metadata on request, after a
//!   simulator has already validated its modes against them.
//! - [`FailingEngine`] wraps a real engine and starts reporting failure
//!   after a configurable number of successful steps.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    labeled_mdp, multi_label_mdp, pomdp, two_state_chain, unlabeled_mdp, CHAIN_REWARDS,
};

use std::cell::{Cell, RefCell};

use tread_core::{
    ChoiceIndex, ChoiceLabeling, Model, ModelType, ObservationId, Representation, StateId,
    StateValuations, SteppingEngine, TransitionSystem,
};

/// Wraps a model and reports `representation` instead of its own.
pub struct RepresentationOverride<M> {
    pub inner: M,
    pub representation: Representation,
}

impl<M> RepresentationOverride<M> {
    pub fn new(inner: M, representation: Representation) -> Self {
        Self {
            inner,
            representation,
        }
    }
}

impl<M: Model> Model for RepresentationOverride<M> {
    fn representation(&self) -> Representation {
        self.representation
    }

    fn model_type(&self) -> ModelType {
        self.inner.model_type()
    }

    fn nr_states(&self) -> usize {
        self.inner.nr_states()
    }

    fn nr_available_actions(&self, state: StateId) -> usize {
        self.inner.nr_available_actions(state)
    }

    fn choice_index(&self, state: StateId, offset: usize) -> ChoiceIndex {
        self.inner.choice_index(state, offset)
    }

    fn choice_labeling(&self) -> Option<&ChoiceLabeling> {
        self.inner.choice_labeling()
    }

    fn state_valuations(&self) -> Option<&StateValuations> {
        self.inner.state_valuations()
    }

    fn observation(&self, state: StateId) -> Option<ObservationId> {
        self.inner.observation(state)
    }

    fn is_sink_state(&self, state: StateId) -> bool {
        self.inner.is_sink_state(state)
    }

    fn as_transition_system(&self) -> Option<&dyn TransitionSystem> {
        self.inner.as_transition_system()
    }
}

impl<M: TransitionSystem> TransitionSystem for RepresentationOverride<M> {
    fn initial_state(&self) -> StateId {
        self.inner.initial_state()
    }

    fn choice_row(&self, choice: ChoiceIndex) -> &[(StateId, f64)] {
        self.inner.choice_row(choice)
    }

    fn nr_reward_models(&self) -> usize {
        self.inner.nr_reward_models()
    }

    fn state_reward(&self, reward_model: usize, state: StateId) -> f64 {
        self.inner.state_reward(reward_model, state)
    }

    fn choice_reward(&self, reward_model: usize, choice: ChoiceIndex) -> f64 {
        self.inner.choice_reward(reward_model, choice)
    }
}

/// Delegates to `inner` until told to drop part of its metadata.
///
/// Mode setters validate against a model once; this mock lets a test take
/// the metadata away afterwards and see what the simulator does when it
/// needs it again.
pub struct DroppingModel<M> {
    pub inner: M,
    labeling: Cell<bool>,
    transitions: Cell<bool>,
    hidden: RefCell<Vec<StateId>>,
}

impl<M> DroppingModel<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            labeling: Cell::new(true),
            transitions: Cell::new(true),
            hidden: RefCell::new(Vec::new()),
        }
    }

    /// From now on, report no choice labeling.
    pub fn drop_labeling(&self) {
        self.labeling.set(false);
    }

    /// From now on, report no observation class for `state`.
    pub fn drop_observation(&self, state: StateId) {
        self.hidden.borrow_mut().push(state);
    }

    /// From now on, expose no transition structure.
    pub fn drop_transitions(&self) {
        self.transitions.set(false);
    }
}

impl<M: TransitionSystem> Model for DroppingModel<M> {
    fn representation(&self) -> Representation {
        self.inner.representation()
    }

    fn model_type(&self) -> ModelType {
        self.inner.model_type()
    }

    fn nr_states(&self) -> usize {
        self.inner.nr_states()
    }

    fn nr_available_actions(&self, state: StateId) -> usize {
        self.inner.nr_available_actions(state)
    }

    fn choice_index(&self, state: StateId, offset: usize) -> ChoiceIndex {
        self.inner.choice_index(state, offset)
    }

    fn choice_labeling(&self) -> Option<&ChoiceLabeling> {
        self.inner.choice_labeling().filter(|_| self.labeling.get())
    }

    fn state_valuations(&self) -> Option<&StateValuations> {
        self.inner.state_valuations()
    }

    fn observation(&self, state: StateId) -> Option<ObservationId> {
        if self.hidden.borrow().contains(&state) {
            return None;
        }
        self.inner.observation(state)
    }

    fn is_sink_state(&self, state: StateId) -> bool {
        self.inner.is_sink_state(state)
    }

    fn as_transition_system(&self) -> Option<&dyn TransitionSystem> {
        if self.transitions.get() {
            Some(self)
        } else {
            None
        }
    }
}

impl<M: TransitionSystem> TransitionSystem for DroppingModel<M> {
    fn initial_state(&self) -> StateId {
        self.inner.initial_state()
    }

    fn choice_row(&self, choice: ChoiceIndex) -> &[(StateId, f64)] {
        self.inner.choice_row(choice)
    }

    fn nr_reward_models(&self) -> usize {
        self.inner.nr_reward_models()
    }

    fn state_reward(&self, reward_model: usize, state: StateId) -> f64 {
        self.inner.state_reward(reward_model, state)
    }

    fn choice_reward(&self, reward_model: usize, choice: ChoiceIndex) -> f64 {
        self.inner.choice_reward(reward_model, choice)
    }
}

/// Delegates to `inner` but fails every step after `succeed_count`
/// successful ones.
///
/// Useful for testing how a simulator handles an engine that breaks its
/// contract on a validated action.
pub struct FailingEngine<E> {
    pub inner: E,
    pub succeed_count: usize,
    calls: usize,
    seeds: Vec<u64>,
}

impl<E> FailingEngine<E> {
    /// Wrap `inner`; the first `succeed_count` steps succeed.
    pub fn new(inner: E, succeed_count: usize) -> Self {
        Self {
            inner,
            succeed_count,
            calls: 0,
            seeds: Vec::new(),
        }
    }

    /// How many times `step()` or `random_step()` has been called.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Every seed passed to `set_seed()`, in order.
    pub fn seeds(&self) -> &[u64] {
        &self.seeds
    }

    fn admit(&mut self) -> bool {
        self.calls += 1;
        self.calls <= self.succeed_count
    }
}

impl<E: SteppingEngine> SteppingEngine for FailingEngine<E> {
    fn set_seed(&mut self, seed: u64) {
        self.seeds.push(seed);
        self.inner.set_seed(seed);
    }

    fn current_state(&self) -> StateId {
        self.inner.current_state()
    }

    fn step(&mut self, offset: usize) -> bool {
        self.admit() && self.inner.step(offset)
    }

    fn random_step(&mut self) -> bool {
        self.admit() && self.inner.random_step()
    }

    fn reset_to_initial_state(&mut self) {
        self.inner.reset_to_initial_state();
    }

    fn last_reward(&self) -> f64 {
        self.inner.last_reward()
    }
}
