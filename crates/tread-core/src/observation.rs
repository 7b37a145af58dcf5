//! Observations, the observation granularity mode, and step results.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::id::{ObservationId, StateId};

/// Granularity at which states are reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationMode {
    /// Report the raw state identifier (or observation class).
    #[default]
    StateLevel,
    /// Report the variable valuation of the state.
    ProgramLevel,
}

impl fmt::Display for ObservationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StateLevel => write!(f, "state-level"),
            Self::ProgramLevel => write!(f, "program-level"),
        }
    }
}

/// What a simulator reveals about the state it is in.
///
/// Which variant is produced depends on the full-observability flag and
/// the [`ObservationMode`]:
///
/// | full observability | mode | variant |
/// |---|---|---|
/// | yes | state-level | [`Observation::State`] |
/// | yes | program-level | [`Observation::Valuation`] |
/// | no | state-level | [`Observation::Class`] |
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Observation {
    /// The engine's current state, untransformed.
    State(StateId),
    /// The JSON record of the current state's variable valuation.
    Valuation(serde_json::Value),
    /// The observation class of the current state.
    Class(ObservationId),
}

impl Observation {
    /// The state identifier, if this is an [`Observation::State`].
    pub fn as_state(&self) -> Option<StateId> {
        match self {
            Self::State(s) => Some(*s),
            _ => None,
        }
    }

    /// The observation class, if this is an [`Observation::Class`].
    pub fn as_class(&self) -> Option<ObservationId> {
        match self {
            Self::Class(c) => Some(*c),
            _ => None,
        }
    }

    /// The valuation record, if this is an [`Observation::Valuation`].
    pub fn as_valuation(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Valuation(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State(s) => write!(f, "state {s}"),
            Self::Valuation(v) => write!(f, "{v}"),
            Self::Class(c) => write!(f, "observation {c}"),
        }
    }
}

/// Outcome of a `step`, `random_step`, or `restart`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// What the simulator reveals about the state it arrived in.
    pub observation: Observation,
    /// Reward the engine attached to the transition (or reset).
    ///
    /// Independent of the observability settings.
    pub reward: f64,
}

impl StepResult {
    /// Pair an observation with its reward.
    pub fn new(observation: Observation, reward: f64) -> Self {
        Self {
            observation,
            reward,
        }
    }
}
