//! Validated explicit-state model.

use std::collections::HashMap;

use indexmap::IndexMap;
use tread_core::{
    ChoiceIndex, ChoiceLabeling, Model, ModelType, ObservationId, Representation, StateId,
    StateValuations, TransitionSystem,
};

use crate::components::{ModelComponents, RewardModel, StateLabeling, INITIAL_LABEL};
use crate::error::ModelError;
use crate::matrix::SparseMatrix;

/// An explicit-state DTMC, MDP, or POMDP.
///
/// Immutable once built. Construct with [`SparseModel::new`], which checks
/// that all components agree with the transition matrix.
#[derive(Clone, Debug)]
pub struct SparseModel {
    model_type: ModelType,
    matrix: SparseMatrix,
    state_labeling: StateLabeling,
    reward_models: IndexMap<String, RewardModel>,
    choice_labeling: Option<ChoiceLabeling>,
    state_valuations: Option<StateValuations>,
    observations: Option<Vec<ObservationId>>,
    initial_state: StateId,
}

impl SparseModel {
    /// Assemble a model of type `model_type` from `components`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if:
    /// - the labeling, rewards, choice labeling, valuations, or
    ///   observation vector do not match the matrix dimensions
    /// - no state is labeled [`INITIAL_LABEL`]
    /// - a DTMC state has more than one choice
    /// - a POMDP lacks observation classes, or a non-POMDP has them
    /// - two states with the same observation offer different action counts
    pub fn new(model_type: ModelType, components: ModelComponents) -> Result<Self, ModelError> {
        let ModelComponents {
            transition_matrix: matrix,
            state_labeling,
            reward_models,
            choice_labeling,
            state_valuations,
            observability_classes,
        } = components;

        let nr_states = matrix.nr_row_groups();
        let nr_choices = matrix.nr_rows();

        check_len("state labeling", nr_states, state_labeling.nr_states())?;

        let initial_state = *state_labeling
            .states_with_label(INITIAL_LABEL)
            .first()
            .ok_or(ModelError::NoInitialState)?;

        if model_type == ModelType::Dtmc {
            for s in 0..nr_states {
                let choices = matrix.row_group_size(StateId(s));
                if choices != 1 {
                    return Err(ModelError::NondeterministicChain {
                        state: StateId(s),
                        choices,
                    });
                }
            }
        }

        for (name, rm) in &reward_models {
            rm.validate(name, nr_states, nr_choices)?;
        }
        if let Some(labeling) = &choice_labeling {
            check_len("choice labeling", nr_choices, labeling.nr_choices())?;
        }
        if let Some(valuations) = &state_valuations {
            check_len("state valuations", nr_states, valuations.nr_states())?;
        }

        match (&observability_classes, model_type) {
            (None, ModelType::Pomdp) => return Err(ModelError::MissingObservations),
            (Some(_), ModelType::Dtmc | ModelType::Mdp) => {
                return Err(ModelError::UnexpectedObservations { model_type })
            }
            (Some(classes), ModelType::Pomdp) => {
                check_len("observability classes", nr_states, classes.len())?;
                let mut action_counts: HashMap<ObservationId, usize> = HashMap::new();
                for (s, &obs) in classes.iter().enumerate() {
                    let got = matrix.row_group_size(StateId(s));
                    let expected = *action_counts.entry(obs).or_insert(got);
                    if expected != got {
                        return Err(ModelError::ObservationActionMismatch {
                            observation: obs,
                            state: StateId(s),
                            expected,
                            got,
                        });
                    }
                }
            }
            (None, ModelType::Dtmc | ModelType::Mdp) => {}
        }

        Ok(Self {
            model_type,
            matrix,
            state_labeling,
            reward_models,
            choice_labeling,
            state_valuations,
            observations: observability_classes,
            initial_state,
        })
    }

    /// The transition matrix.
    pub fn transition_matrix(&self) -> &SparseMatrix {
        &self.matrix
    }

    /// The state labeling.
    pub fn state_labeling(&self) -> &StateLabeling {
        &self.state_labeling
    }

    /// Named reward models, in declaration order.
    pub fn reward_models(&self) -> &IndexMap<String, RewardModel> {
        &self.reward_models
    }

    /// Number of choices across all states.
    pub fn nr_choices(&self) -> usize {
        self.matrix.nr_rows()
    }

    /// All states labeled [`INITIAL_LABEL`].
    pub fn initial_states(&self) -> &[StateId] {
        self.state_labeling.states_with_label(INITIAL_LABEL)
    }
}

fn check_len(component: &'static str, expected: usize, got: usize) -> Result<(), ModelError> {
    if expected == got {
        Ok(())
    } else {
        Err(ModelError::LengthMismatch {
            component,
            expected,
            got,
        })
    }
}

impl Model for SparseModel {
    fn representation(&self) -> Representation {
        Representation::Sparse
    }

    fn model_type(&self) -> ModelType {
        self.model_type
    }

    fn nr_states(&self) -> usize {
        self.matrix.nr_row_groups()
    }

    fn nr_available_actions(&self, state: StateId) -> usize {
        self.matrix.row_group_size(state)
    }

    fn choice_index(&self, state: StateId, offset: usize) -> ChoiceIndex {
        ChoiceIndex(self.matrix.row_group(state).start + offset)
    }

    fn choice_labeling(&self) -> Option<&ChoiceLabeling> {
        self.choice_labeling.as_ref()
    }

    fn state_valuations(&self) -> Option<&StateValuations> {
        self.state_valuations.as_ref()
    }

    fn observation(&self, state: StateId) -> Option<ObservationId> {
        self.observations.as_ref()?.get(state.0).copied()
    }

    fn is_sink_state(&self, state: StateId) -> bool {
        self.matrix.is_self_absorbing(state)
    }

    fn as_transition_system(&self) -> Option<&dyn TransitionSystem> {
        Some(self)
    }
}

impl TransitionSystem for SparseModel {
    fn initial_state(&self) -> StateId {
        self.initial_state
    }

    fn choice_row(&self, choice: ChoiceIndex) -> &[(StateId, f64)] {
        self.matrix.row(choice)
    }

    fn nr_reward_models(&self) -> usize {
        self.reward_models.len()
    }

    fn state_reward(&self, reward_model: usize, state: StateId) -> f64 {
        self.reward_models
            .get_index(reward_model)
            .map_or(0.0, |(_, rm)| rm.state_reward(state))
    }

    fn choice_reward(&self, reward_model: usize, choice: ChoiceIndex) -> f64 {
        self.reward_models
            .get_index(reward_model)
            .map_or(0.0, |(_, rm)| rm.state_action_reward(choice.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tread_core::{ValuationValue, Variable};

    fn labeling(nr_states: usize) -> StateLabeling {
        let mut l = StateLabeling::new(nr_states);
        l.add_label_to_state(INITIAL_LABEL, StateId(0)).unwrap();
        l
    }

    /// s0 --a--> s1, s0 --b--> {s0: 0.5, s1: 0.5}, s1 self-loop.
    fn mdp_matrix() -> SparseMatrix {
        let mut b = SparseMatrix::builder();
        b.new_row_group()
            .add_row([(1, 1.0)])
            .add_row([(0, 0.5), (1, 0.5)]);
        b.new_row_group().add_row([(1, 1.0)]);
        b.build().unwrap()
    }

    #[test]
    fn mdp_metadata() {
        let model =
            SparseModel::new(ModelType::Mdp, ModelComponents::new(mdp_matrix(), labeling(2)))
                .unwrap();
        assert_eq!(model.representation(), Representation::Sparse);
        assert_eq!(model.nr_states(), 2);
        assert_eq!(model.nr_choices(), 3);
        assert!(model.is_nondeterministic());
        assert!(!model.is_partially_observable());
        assert_eq!(model.nr_available_actions(StateId(0)), 2);
        assert_eq!(model.nr_available_actions(StateId(1)), 1);
        assert_eq!(model.choice_index(StateId(1), 0), ChoiceIndex(2));
        assert_eq!(model.initial_state(), StateId(0));
        assert_eq!(model.initial_states(), &[StateId(0)]);
        assert!(!model.is_sink_state(StateId(0)));
        assert!(model.is_sink_state(StateId(1)));
        assert!(model.choice_labeling().is_none());
        assert!(model.state_valuations().is_none());
        assert_eq!(model.observation(StateId(0)), None);
        assert_eq!(model.nr_reward_models(), 0);
        assert_eq!(model.state_reward(0, StateId(0)), 0.0);

        let transitions = model.as_transition_system().unwrap();
        assert_eq!(
            transitions.choice_row(ChoiceIndex(1)),
            &[(StateId(0), 0.5), (StateId(1), 0.5)]
        );
    }

    #[test]
    fn dtmc_must_be_deterministic() {
        let err =
            SparseModel::new(ModelType::Dtmc, ModelComponents::new(mdp_matrix(), labeling(2)))
                .unwrap_err();
        assert_eq!(
            err,
            ModelError::NondeterministicChain {
                state: StateId(0),
                choices: 2
            }
        );
    }

    #[test]
    fn initial_state_required() {
        let err = SparseModel::new(
            ModelType::Mdp,
            ModelComponents::new(mdp_matrix(), StateLabeling::new(2)),
        )
        .unwrap_err();
        assert_eq!(err, ModelError::NoInitialState);
    }

    #[test]
    fn component_lengths_are_checked() {
        let err = SparseModel::new(
            ModelType::Mdp,
            ModelComponents::new(mdp_matrix(), labeling(2))
                .with_choice_labeling(ChoiceLabeling::new(2)),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::LengthMismatch {
                component: "choice labeling",
                expected: 3,
                got: 2
            }
        );

        let mut valuations = StateValuations::new(vec![Variable::new("x")]);
        valuations.add_state(vec![ValuationValue::Int(0)]).unwrap();
        let err = SparseModel::new(
            ModelType::Mdp,
            ModelComponents::new(mdp_matrix(), labeling(2)).with_state_valuations(valuations),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ModelError::LengthMismatch {
                component: "state valuations",
                ..
            }
        ));
    }

    #[test]
    fn observations_only_for_pomdps() {
        let err = SparseModel::new(
            ModelType::Pomdp,
            ModelComponents::new(mdp_matrix(), labeling(2)),
        )
        .unwrap_err();
        assert_eq!(err, ModelError::MissingObservations);

        let err = SparseModel::new(
            ModelType::Mdp,
            ModelComponents::new(mdp_matrix(), labeling(2))
                .with_observability_classes(vec![ObservationId(0), ObservationId(1)]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::UnexpectedObservations {
                model_type: ModelType::Mdp
            }
        );
    }

    #[test]
    fn shared_observation_needs_equal_action_counts() {
        let err = SparseModel::new(
            ModelType::Pomdp,
            ModelComponents::new(mdp_matrix(), labeling(2))
                .with_observability_classes(vec![ObservationId(7), ObservationId(7)]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::ObservationActionMismatch {
                observation: ObservationId(7),
                state: StateId(1),
                expected: 2,
                got: 1
            }
        );

        let model = SparseModel::new(
            ModelType::Pomdp,
            ModelComponents::new(mdp_matrix(), labeling(2))
                .with_observability_classes(vec![ObservationId(7), ObservationId(8)]),
        )
        .unwrap();
        assert!(model.is_partially_observable());
        assert_eq!(model.observation(StateId(1)), Some(ObservationId(8)));
    }

    #[test]
    fn rewards_by_model_index() {
        let model = SparseModel::new(
            ModelType::Mdp,
            ModelComponents::new(mdp_matrix(), labeling(2))
                .with_reward_model("steps", RewardModel::with_state_action_rewards(vec![1.0, 2.0, 3.0]))
                .with_reward_model("goal", RewardModel::with_state_rewards(vec![0.0, 10.0])),
        )
        .unwrap();
        assert_eq!(model.nr_reward_models(), 2);
        assert_eq!(model.choice_reward(0, ChoiceIndex(1)), 2.0);
        assert_eq!(model.state_reward(0, StateId(1)), 0.0);
        assert_eq!(model.state_reward(1, StateId(1)), 10.0);
        assert_eq!(model.state_reward(5, StateId(1)), 0.0);
    }
}
