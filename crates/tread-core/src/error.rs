//! Error types for simulator operations.
//!
//! Every variant except [`SimulatorError::EngineInvariant`] and
//! [`SimulatorError::Faulted`] is raised before the engine or the
//! simulator's modes are touched, so a rejected call leaves the simulator
//! exactly as it was. The exception is a reporting failure after the engine
//! has moved, which faults the simulator.

use thiserror::Error;

use crate::action::ActionMode;
use crate::id::StateId;

/// Errors from simulator construction, configuration, and stepping.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SimulatorError {
    /// A mode was selected that the model cannot support.
    #[error("configuration error: {reason}")]
    Configuration {
        /// What the model is missing.
        reason: String,
    },

    /// An index action is out of range at the current state.
    #[error("action {action} out of range: only {available} actions available")]
    InvalidAction {
        /// The requested offset.
        action: usize,
        /// Number of actions at the current state.
        available: usize,
    },

    /// A named action does not match any choice at the current state.
    #[error("unknown action '{action}'")]
    UnknownAction {
        /// The requested label.
        action: String,
    },

    /// The action was omitted where more than one choice is available.
    #[error("an action must be given: {available} actions available at the current state")]
    AmbiguousAction {
        /// Number of actions at the current state.
        available: usize,
    },

    /// The action's shape does not fit the active action mode.
    #[error("{kind} action cannot be used in {mode} action mode")]
    InvalidActionType {
        /// Shape of the supplied action (`"index"` or `"name"`).
        kind: &'static str,
        /// The active action mode.
        mode: ActionMode,
    },

    /// The model's representation or labeling shape is not handled.
    #[error("unsupported model: {reason}")]
    UnsupportedModel {
        /// Which aspect of the model is unsupported.
        reason: String,
    },

    /// The requested combination of settings has no implementation.
    #[error("not implemented: {feature}")]
    NotImplemented {
        /// The unimplemented feature.
        feature: &'static str,
    },

    /// The engine failed on an action the simulator had validated.
    ///
    /// Signals a broken engine/model contract. The simulator is faulted
    /// afterwards.
    #[error("engine invariant violated: {operation} failed at state {state}")]
    EngineInvariant {
        /// The engine operation that failed.
        operation: &'static str,
        /// The engine's state when the operation was issued.
        state: StateId,
    },

    /// The simulator refused to continue after an engine invariant failure
    /// or a failed report of a state the engine had already moved to.
    #[error("simulator is faulted after an unrecoverable failure")]
    Faulted,
}

impl SimulatorError {
    /// Whether the error leaves the simulator unusable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::EngineInvariant { .. } | Self::Faulted)
    }

    /// Shorthand for a [`SimulatorError::Configuration`] error.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`SimulatorError::UnsupportedModel`] error.
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::UnsupportedModel {
            reason: reason.into(),
        }
    }
}
