//! The simulator contract.

use std::ops::Range;

use tread_core::{
    Action, ActionMode, ObservationMode, SimulatorError, StateId, StepResult,
};

/// The actions available at the current state.
///
/// In [`ActionMode::Index`] this is the lazy range `0..n`; in
/// [`ActionMode::GlobalNames`] it is the resolved label of each choice.
/// Computed fresh on every call, since the state changes between steps.
#[derive(Clone, Debug)]
pub enum AvailableActions {
    /// Offsets `0..n`.
    Indices(Range<usize>),
    /// One label per choice, in offset order.
    Names(std::vec::IntoIter<String>),
}

impl Iterator for AvailableActions {
    type Item = Action;

    fn next(&mut self) -> Option<Action> {
        match self {
            Self::Indices(range) => range.next().map(Action::Index),
            Self::Names(names) => names.next().map(Action::Name),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Indices(range) => range.size_hint(),
            Self::Names(names) => names.size_hint(),
        }
    }
}

impl ExactSizeIterator for AvailableActions {}

/// A stateful, single-owner simulator over one model.
///
/// All operations are synchronous. A rejected call (any error that is not
/// [`fatal`](SimulatorError::is_fatal)) leaves the simulator exactly as it
/// was: validation always happens before the engine or a mode is touched.
///
/// The one exception is a model whose metadata cannot describe a state the
/// engine has already moved to (for example a missing observation class).
/// That error is returned as is, and the simulator is faulted afterwards.
///
/// The simulator is not internally synchronized; share it across threads
/// only behind external locking.
pub trait Simulator {
    /// Actions available at the current state, addressed per the action
    /// mode.
    ///
    /// # Errors
    ///
    /// - [`SimulatorError::Configuration`] if named addressing is active
    ///   but the model has no choice labeling.
    /// - [`SimulatorError::UnsupportedModel`] if a choice carries more than
    ///   one label.
    fn available_actions(&self) -> Result<AvailableActions, SimulatorError>;

    /// Number of actions at the current state; always 1 for deterministic
    /// models.
    fn nr_available_actions(&self) -> usize;

    /// Take `action` (or the only action, if `None`) and report the result.
    ///
    /// # Errors
    ///
    /// - [`SimulatorError::AmbiguousAction`] if `action` is `None` but the
    ///   current state offers more than one choice.
    /// - [`SimulatorError::InvalidAction`] if an index is out of range.
    /// - [`SimulatorError::UnknownAction`] if a name matches no choice.
    /// - [`SimulatorError::InvalidActionType`] if the action's shape does
    ///   not fit the action mode.
    /// - [`SimulatorError::EngineInvariant`] if the engine rejects the
    ///   validated action. Fatal.
    fn step(&mut self, action: Option<Action>) -> Result<StepResult, SimulatorError>;

    /// Take a uniformly random action and report the result.
    fn random_step(&mut self) -> Result<StepResult, SimulatorError>;

    /// Return to the initial state and report it.
    ///
    /// The reward is whatever the engine reports for a reset; no action is
    /// consumed.
    fn restart(&mut self) -> Result<StepResult, SimulatorError>;

    /// Whether the current state is a sink.
    fn is_done(&self) -> bool;

    /// Select how states are reported.
    ///
    /// Program-level reporting requires state valuations and full
    /// observability. On error the previous mode stays in effect.
    fn set_observation_mode(&mut self, mode: ObservationMode) -> Result<(), SimulatorError>;

    /// Select how actions are addressed.
    ///
    /// Named addressing requires a choice labeling. On error the previous
    /// mode stays in effect.
    fn set_action_mode(&mut self, mode: ActionMode) -> Result<(), SimulatorError>;

    /// Override whether exact states (rather than observation classes) are
    /// revealed.
    ///
    /// Turning full observability off requires a POMDP and state-level
    /// reporting. On error the previous setting stays in effect.
    fn set_full_observability(&mut self, value: bool) -> Result<(), SimulatorError>;

    /// The active observation mode.
    fn observation_mode(&self) -> ObservationMode;

    /// The active action mode.
    fn action_mode(&self) -> ActionMode;

    /// Whether exact states are revealed.
    fn full_observability(&self) -> bool;

    /// The seed the engine was seeded with at construction.
    fn seed(&self) -> u64;

    /// The engine's current state, regardless of observability.
    fn current_state(&self) -> StateId;
}
