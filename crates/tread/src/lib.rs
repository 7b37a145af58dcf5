//! Tread: step-by-step simulation of Markov chains, MDPs, and POMDPs.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Tread sub-crates. For most users, adding `tread` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tread::prelude::*;
//!
//! // A two-state chain: s0 moves to s1, s1 loops.
//! let mut matrix = SparseMatrix::builder();
//! matrix.new_row_group().add_row([(1, 1.0)]);
//! matrix.new_row_group().add_row([(1, 1.0)]);
//! let mut labeling = StateLabeling::new(2);
//! labeling.add_label_to_state(INITIAL_LABEL, StateId(0)).unwrap();
//! let components = ModelComponents::new(matrix.build().unwrap(), labeling)
//!     .with_reward_model("steps", RewardModel::with_state_action_rewards(vec![1.0, 0.0]));
//! let model = SparseModel::new(ModelType::Dtmc, components).unwrap();
//!
//! let mut sim = create_simulator(&model, Some(42)).unwrap();
//! let start = sim.restart().unwrap();
//! assert_eq!(start.observation, Observation::State(StateId(0)));
//!
//! let next = sim.step(None).unwrap();
//! assert_eq!(next.observation, Observation::State(StateId(1)));
//! assert_eq!(next.reward, 1.0);
//! assert!(sim.is_done());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tread-core` | IDs, actions, observations, collaborator traits, errors |
//! | [`sparse`] | `tread-sparse` | Explicit-state models and the seeded stepping engine |
//! | [`sim`] | `tread-sim` | Simulators, configuration, traces, and replay |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`tread-core`).
///
/// Contains actions, observations, the [`types::Model`] and
/// [`types::SteppingEngine`] collaborator traits, and
/// [`types::SimulatorError`].
pub use tread_core as types;

/// Explicit-state models (`tread-sparse`).
///
/// Build a [`sparse::SparseModel`] from [`sparse::ModelComponents`] and
/// sample it with [`sparse::SparseEngine`].
pub use tread_sparse as sparse;

/// Simulators (`tread-sim`).
///
/// [`sim::create_simulator`] picks a backend for a model;
/// [`sim::TraceRecorder`] and [`sim::replay`] capture and verify runs.
pub use tread_sim as sim;

/// Common imports for typical Tread usage.
///
/// ```rust
/// use tread::prelude::*;
/// ```
///
/// This imports the simulator contract and factory, the action and
/// observation types, and the sparse model builders.
pub mod prelude {
    // Core types and traits
    pub use tread_core::{
        Action, ActionMode, Model, ModelType, Observation, ObservationId, ObservationMode,
        StateId, StepResult, TransitionSystem,
    };

    // Errors
    pub use tread_core::SimulatorError;
    pub use tread_sparse::ModelError;

    // Sparse models
    pub use tread_sparse::{
        ModelComponents, RewardModel, SparseMatrix, SparseModel, StateLabeling, INITIAL_LABEL,
    };

    // Simulation
    pub use tread_sim::{
        create_simulator, create_simulator_with, replay, Simulator, SimulatorConfig, Trace,
        TraceRecorder,
    };
}
