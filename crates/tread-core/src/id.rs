//! Strongly-typed identifiers for states, choices, and observation classes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a state of a model.
///
/// States are numbered densely from zero. `StateId(n)` is the n-th state
/// of the model's state space; this is exactly the value a stepping engine
/// reports as its current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(pub usize);

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for StateId {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

/// Global index of a choice (a row of the transition matrix).
///
/// Distinct from an action *offset*: the offset is local to a state
/// (`0..nr_available_actions(state)`), while the choice index is unique
/// across the whole model. [`Model::choice_index`](crate::Model::choice_index)
/// maps one to the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceIndex(pub usize);

impl fmt::Display for ChoiceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for ChoiceIndex {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

/// Observation class of a partially observable model.
///
/// States sharing an `ObservationId` are indistinguishable to a policy
/// that only sees observations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObservationId(pub u32);

impl fmt::Display for ObservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ObservationId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
