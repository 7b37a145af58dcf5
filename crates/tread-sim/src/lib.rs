//! Step-by-step simulation of Markov chains, MDPs, and POMDPs.
//!
//! A [`Simulator`] drives an already-built model one transition at a time:
//! it validates and resolves the caller's action against the current state,
//! delegates the transition to a [`SteppingEngine`](tread_core::SteppingEngine),
//! and reports an observation and a reward. Observation granularity and
//! action addressing are configurable per simulator.
//!
//! Use [`create_simulator`] (or [`create_simulator_with`] and a
//! [`SimulatorConfig`]) to obtain a simulator for a model. The only backend
//! today is [`SparseSimulator`] for explicit-state models.
//!
//! Runs can be captured with a [`TraceRecorder`] and checked for
//! reproducibility with [`replay`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod factory;
pub mod report;
pub mod simulator;
pub mod sparse;
pub mod trace;

pub use config::SimulatorConfig;
pub use factory::{create_simulator, create_simulator_with};
pub use simulator::{AvailableActions, Simulator};
pub use sparse::SparseSimulator;
pub use trace::{replay, Divergence, ReplayReport, Trace, TraceAction, TraceRecorder, TraceStep};
