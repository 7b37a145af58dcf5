//! Explicit-state ("sparse") models and their stepping engine.
//!
//! [`SparseModel`] stores a model as a row-grouped [`SparseMatrix`] plus
//! the optional components a simulator may ask for: state labeling, reward
//! models, choice labeling, state valuations, and observation classes.
//! [`SparseEngine`] samples transitions through any
//! [`TransitionSystem`](tread_core::TransitionSystem) with a seeded
//! ChaCha8 generator, so identical seeds give identical runs.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod components;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod model;

pub use components::{ModelComponents, RewardModel, StateLabeling, INITIAL_LABEL};
pub use engine::SparseEngine;
pub use error::ModelError;
pub use matrix::{SparseMatrix, SparseMatrixBuilder, PROBABILITY_TOLERANCE};
pub use model::SparseModel;
