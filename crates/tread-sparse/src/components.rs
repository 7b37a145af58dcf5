//! The parts a [`SparseModel`](crate::SparseModel) is assembled from.

use indexmap::IndexMap;
use tread_core::{ChoiceLabeling, ObservationId, StateId, StateValuations};

use crate::error::ModelError;
use crate::matrix::SparseMatrix;

/// Label marking the states an engine may reset to.
pub const INITIAL_LABEL: &str = "init";

/// Associates states with atomic-proposition labels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateLabeling {
    nr_states: usize,
    labels: IndexMap<String, Vec<StateId>>,
}

impl StateLabeling {
    /// An empty labeling over `nr_states` states.
    pub fn new(nr_states: usize) -> Self {
        Self {
            nr_states,
            labels: IndexMap::new(),
        }
    }

    /// Number of states covered.
    pub fn nr_states(&self) -> usize {
        self.nr_states
    }

    /// Declare `label` without attaching it to any state.
    pub fn add_label(&mut self, label: &str) {
        self.labels.entry(label.to_string()).or_default();
    }

    /// Attach `label` to `state`, declaring the label if needed.
    pub fn add_label_to_state(&mut self, label: &str, state: StateId) -> Result<(), ModelError> {
        if state.0 >= self.nr_states {
            return Err(ModelError::LabelOutOfRange {
                label: label.to_string(),
                state,
                nr_states: self.nr_states,
            });
        }
        let states = self.labels.entry(label.to_string()).or_default();
        if let Err(pos) = states.binary_search(&state) {
            states.insert(pos, state);
        }
        Ok(())
    }

    /// States carrying `label`, in ascending order.
    pub fn states_with_label(&self, label: &str) -> &[StateId] {
        self.labels.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `state` carries `label`.
    pub fn has_label(&self, state: StateId, label: &str) -> bool {
        self.states_with_label(label).binary_search(&state).is_ok()
    }

    /// Labels carried by `state`, in declaration order.
    pub fn labels_of_state(&self, state: StateId) -> Vec<&str> {
        self.labels
            .iter()
            .filter(|(_, states)| states.binary_search(&state).is_ok())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// All declared labels.
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }
}

/// Rewards attached to states and/or choices.
///
/// A reward model with neither vector is valid and always yields zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RewardModel {
    /// Reward for entering each state, indexed by state.
    pub state_rewards: Option<Vec<f64>>,
    /// Reward for taking each choice, indexed by global choice index.
    pub state_action_rewards: Option<Vec<f64>>,
}

impl RewardModel {
    /// Rewards earned on arrival in a state.
    pub fn with_state_rewards(rewards: Vec<f64>) -> Self {
        Self {
            state_rewards: Some(rewards),
            state_action_rewards: None,
        }
    }

    /// Rewards earned when a choice is taken.
    pub fn with_state_action_rewards(rewards: Vec<f64>) -> Self {
        Self {
            state_rewards: None,
            state_action_rewards: Some(rewards),
        }
    }

    /// Reward of `state`, zero if the model has no state rewards.
    pub fn state_reward(&self, state: StateId) -> f64 {
        self.state_rewards
            .as_ref()
            .and_then(|r| r.get(state.0).copied())
            .unwrap_or(0.0)
    }

    /// Reward of `choice`, zero if the model has no state-action rewards.
    pub fn state_action_reward(&self, choice: usize) -> f64 {
        self.state_action_rewards
            .as_ref()
            .and_then(|r| r.get(choice).copied())
            .unwrap_or(0.0)
    }

    pub(crate) fn validate(
        &self,
        name: &str,
        nr_states: usize,
        nr_choices: usize,
    ) -> Result<(), ModelError> {
        for (component, values, expected) in [
            ("state rewards", &self.state_rewards, nr_states),
            ("state-action rewards", &self.state_action_rewards, nr_choices),
        ] {
            let Some(values) = values else { continue };
            if values.len() != expected {
                return Err(ModelError::LengthMismatch {
                    component,
                    expected,
                    got: values.len(),
                });
            }
            if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite())
            {
                return Err(ModelError::NonFiniteReward {
                    reward_model: name.to_string(),
                    index,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Everything needed to assemble a [`SparseModel`](crate::SparseModel).
#[derive(Clone, Debug)]
pub struct ModelComponents {
    /// The transition matrix.
    pub transition_matrix: SparseMatrix,
    /// The state labeling; must mark at least one state [`INITIAL_LABEL`].
    pub state_labeling: StateLabeling,
    /// Named reward models. The first one is the engine's primary reward.
    pub reward_models: IndexMap<String, RewardModel>,
    /// Labels for each choice.
    pub choice_labeling: Option<ChoiceLabeling>,
    /// Variable valuation of each state.
    pub state_valuations: Option<StateValuations>,
    /// Observation class of each state (POMDP only).
    pub observability_classes: Option<Vec<ObservationId>>,
}

impl ModelComponents {
    /// Components with just a matrix and a labeling.
    pub fn new(transition_matrix: SparseMatrix, state_labeling: StateLabeling) -> Self {
        Self {
            transition_matrix,
            state_labeling,
            reward_models: IndexMap::new(),
            choice_labeling: None,
            state_valuations: None,
            observability_classes: None,
        }
    }

    /// Add a named reward model.
    pub fn with_reward_model(mut self, name: impl Into<String>, reward_model: RewardModel) -> Self {
        self.reward_models.insert(name.into(), reward_model);
        self
    }

    /// Attach a choice labeling.
    pub fn with_choice_labeling(mut self, labeling: ChoiceLabeling) -> Self {
        self.choice_labeling = Some(labeling);
        self
    }

    /// Attach state valuations.
    pub fn with_state_valuations(mut self, valuations: StateValuations) -> Self {
        self.state_valuations = Some(valuations);
        self
    }

    /// Attach observation classes.
    pub fn with_observability_classes(mut self, classes: Vec<ObservationId>) -> Self {
        self.observability_classes = Some(classes);
        self
    }
}
