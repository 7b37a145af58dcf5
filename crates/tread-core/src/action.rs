//! Actions and the action addressing mode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How actions are addressed when listing or taking them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionMode {
    /// Actions are the offsets `0..n` of the choices at the current state.
    #[default]
    Index,
    /// Actions are the choice labels of the current state's choices.
    ///
    /// Unlabeled choices are addressed as `_act_{offset}`.
    GlobalNames,
}

impl fmt::Display for ActionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index => write!(f, "index"),
            Self::GlobalNames => write!(f, "global-names"),
        }
    }
}

/// An action passed to or reported by a simulator.
///
/// An omitted action is expressed as `None` at the call site
/// (`Option<Action>`), not as a variant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Action {
    /// Offset of a choice at the current state.
    Index(usize),
    /// Label of a choice at the current state.
    Name(String),
}

impl Action {
    /// The offset, if this is an [`Action::Index`].
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(i) => Some(*i),
            Self::Name(_) => None,
        }
    }

    /// The label, if this is an [`Action::Name`].
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Index(_) => None,
            Self::Name(name) => Some(name),
        }
    }

    /// Short description of the action's shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Index(_) => "index",
            Self::Name(_) => "name",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(name) => write!(f, "{name}"),
        }
    }
}

impl From<usize> for Action {
    fn from(v: usize) -> Self {
        Self::Index(v)
    }
}

impl From<&str> for Action {
    fn from(v: &str) -> Self {
        Self::Name(v.to_string())
    }
}

impl From<String> for Action {
    fn from(v: String) -> Self {
        Self::Name(v)
    }
}

/// The synthesized name of an unlabeled choice at `offset`.
pub fn unlabeled_action_name(offset: usize) -> String {
    format!("_act_{offset}")
}
