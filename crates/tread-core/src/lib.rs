//! Core types and traits for the Tread model simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other crate in the workspace: state and
//! choice identifiers, actions and observations, the optional model
//! metadata (choice labeling, state valuations), the error taxonomy, and
//! the two collaborator traits a simulator drives: [`Model`] and
//! [`SteppingEngine`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod engine;
pub mod error;
pub mod id;
pub mod labeling;
pub mod model;
pub mod observation;
pub mod valuation;

pub use action::{unlabeled_action_name, Action, ActionMode};
pub use engine::SteppingEngine;
pub use error::SimulatorError;
pub use id::{ChoiceIndex, ObservationId, StateId};
pub use labeling::ChoiceLabeling;
pub use model::{Model, ModelType, Representation, TransitionSystem};
pub use observation::{Observation, ObservationMode, StepResult};
pub use valuation::{ArityMismatch, StateValuations, ValuationValue, Variable};
