//! The model collaborator: a read-only view of an already-built model.
//!
//! A simulator never builds or analyses models. It only asks the questions
//! in [`Model`] about the state the engine is in. Engines that sample
//! explicit transitions additionally need [`TransitionSystem`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::id::{ChoiceIndex, ObservationId, StateId};
use crate::labeling::ChoiceLabeling;
use crate::valuation::StateValuations;

/// How a model is stored.
///
/// Simulator backends are selected by switching on this tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Representation {
    /// Explicit state space with a sparse transition matrix.
    Sparse,
    /// Decision-diagram based (symbolic) state space.
    Symbolic,
    /// Symbolic state space with explicit numerical parts.
    Hybrid,
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sparse => write!(f, "sparse"),
            Self::Symbolic => write!(f, "symbolic"),
            Self::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// The discrete-time model classes a simulator can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelType {
    /// Discrete-time Markov chain: one distribution per state.
    Dtmc,
    /// Markov decision process: one or more choices per state.
    Mdp,
    /// Partially observable MDP: an MDP whose states are grouped into
    /// observation classes.
    Pomdp,
}

impl ModelType {
    /// Whether states may offer more than one choice.
    pub fn is_nondeterministic(self) -> bool {
        matches!(self, Self::Mdp | Self::Pomdp)
    }

    /// Whether states are only revealed through observation classes.
    pub fn is_partially_observable(self) -> bool {
        matches!(self, Self::Pomdp)
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dtmc => write!(f, "DTMC"),
            Self::Mdp => write!(f, "MDP"),
            Self::Pomdp => write!(f, "POMDP"),
        }
    }
}

/// Read-only model metadata queried by a simulator.
///
/// All state arguments are expected to be in range; implementations may
/// return defaults (zero actions, `None`, `false`) for out-of-range states.
pub trait Model {
    /// How the model is stored.
    fn representation(&self) -> Representation;

    /// The model class.
    fn model_type(&self) -> ModelType;

    /// Number of states.
    fn nr_states(&self) -> usize;

    /// Whether states may offer more than one choice.
    fn is_nondeterministic(&self) -> bool {
        self.model_type().is_nondeterministic()
    }

    /// Whether the model is a POMDP.
    fn is_partially_observable(&self) -> bool {
        self.model_type().is_partially_observable()
    }

    /// Number of choices available at `state`.
    fn nr_available_actions(&self, state: StateId) -> usize;

    /// Global index of the choice at `offset` within `state`.
    fn choice_index(&self, state: StateId, offset: usize) -> ChoiceIndex;

    /// The choice labeling, if the model carries one.
    fn choice_labeling(&self) -> Option<&ChoiceLabeling>;

    /// The state valuations, if the model carries them.
    fn state_valuations(&self) -> Option<&StateValuations>;

    /// Observation class of `state`. `None` unless the model is a POMDP.
    fn observation(&self, state: StateId) -> Option<ObservationId>;

    /// Whether `state` has no meaningful outgoing transitions.
    fn is_sink_state(&self, state: StateId) -> bool;

    /// The explicit transition structure, for models that have one.
    ///
    /// Explicit-state ([`Representation::Sparse`]) models should return
    /// `Some(self)`; simulator backends that sample transitions find it
    /// through this accessor.
    fn as_transition_system(&self) -> Option<&dyn TransitionSystem> {
        None
    }
}

/// Explicit transition structure needed to sample successors.
pub trait TransitionSystem: Model {
    /// The state an engine resets to.
    fn initial_state(&self) -> StateId;

    /// Distribution of choice `choice` as `(successor, probability)` pairs.
    fn choice_row(&self, choice: ChoiceIndex) -> &[(StateId, f64)];

    /// Number of reward models.
    fn nr_reward_models(&self) -> usize;

    /// Reward for being in `state` under reward model `reward_model`.
    fn state_reward(&self, reward_model: usize, state: StateId) -> f64;

    /// Reward for taking `choice` under reward model `reward_model`.
    fn choice_reward(&self, reward_model: usize, choice: ChoiceIndex) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_type_shape() {
        assert!(!ModelType::Dtmc.is_nondeterministic());
        assert!(ModelType::Mdp.is_nondeterministic());
        assert!(ModelType::Pomdp.is_nondeterministic());
        assert!(ModelType::Pomdp.is_partially_observable());
        assert!(!ModelType::Mdp.is_partially_observable());
    }
}
