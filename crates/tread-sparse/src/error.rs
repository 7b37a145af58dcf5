//! Error types for sparse model assembly.

use thiserror::Error;
use tread_core::{ArityMismatch, ModelType, ObservationId, StateId};

/// Errors detected while assembling a [`SparseMatrix`](crate::SparseMatrix)
/// or a [`SparseModel`](crate::SparseModel).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ModelError {
    /// The model has no states.
    #[error("model must have at least one state")]
    NoStates,

    /// A state has no choices.
    #[error("state {state} has no choices")]
    EmptyRowGroup {
        /// The state without choices.
        state: StateId,
    },

    /// A choice has no successors.
    #[error("row {row} has no entries")]
    EmptyRow {
        /// The empty row.
        row: usize,
    },

    /// A transition probability is NaN, infinite, or outside `(0, 1]`.
    #[error("row {row} has invalid probability {value} for successor {column}")]
    InvalidProbability {
        /// The offending row.
        row: usize,
        /// The successor column.
        column: usize,
        /// The probability value.
        value: f64,
    },

    /// A row's probabilities do not sum to one.
    #[error("row {row} sums to {sum}, expected 1")]
    RowNotStochastic {
        /// The offending row.
        row: usize,
        /// The actual row sum.
        sum: f64,
    },

    /// A successor refers to a state that does not exist.
    #[error("row {row} refers to state {column} but the model has {nr_states} states")]
    ColumnOutOfRange {
        /// The offending row.
        row: usize,
        /// The successor column.
        column: usize,
        /// Number of states.
        nr_states: usize,
    },

    /// No state carries the initial label.
    #[error("no state is labeled as initial")]
    NoInitialState,

    /// A DTMC state has more than one choice.
    #[error("DTMC state {state} has {choices} choices, expected 1")]
    NondeterministicChain {
        /// The offending state.
        state: StateId,
        /// Number of choices found.
        choices: usize,
    },

    /// A component vector does not match the model's dimensions.
    #[error("{component} has {got} entries, expected {expected}")]
    LengthMismatch {
        /// Name of the component.
        component: &'static str,
        /// Required length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// A state label refers to a state outside the model.
    #[error("label '{label}' refers to state {state} but the model has {nr_states} states")]
    LabelOutOfRange {
        /// The label name.
        label: String,
        /// The offending state.
        state: StateId,
        /// Number of states.
        nr_states: usize,
    },

    /// A reward value is NaN or infinite.
    #[error("reward model '{reward_model}' has non-finite reward {value} at index {index}")]
    NonFiniteReward {
        /// Name of the reward model.
        reward_model: String,
        /// Index of the state or choice.
        index: usize,
        /// The reward value.
        value: f64,
    },

    /// A POMDP is missing its observation classes.
    #[error("POMDP requires observability classes")]
    MissingObservations,

    /// Observation classes were supplied for a fully observable model.
    #[error("{model_type} must not carry observability classes")]
    UnexpectedObservations {
        /// The model type.
        model_type: ModelType,
    },

    /// Two states with the same observation offer different action counts.
    #[error(
        "states sharing observation {observation} disagree on action count: \
         state {state} has {got}, expected {expected}"
    )]
    ObservationActionMismatch {
        /// The shared observation class.
        observation: ObservationId,
        /// The state that disagrees.
        state: StateId,
        /// Action count of the first state with this observation.
        expected: usize,
        /// Action count of `state`.
        got: usize,
    },

    /// A state valuation had the wrong number of values.
    #[error(transparent)]
    Valuation(#[from] ArityMismatch),
}
