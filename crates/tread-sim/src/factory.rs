//! Backend selection.
//!
//! The factory inspects a model's [`Representation`] tag and builds the
//! matching simulator. Only explicit-state models have a backend today;
//! symbolic and hybrid models are rejected up front rather than failing on
//! first use.

use tracing::debug;
use tread_core::{Model, Representation, SimulatorError};

use crate::config::SimulatorConfig;
use crate::simulator::Simulator;
use crate::sparse::SparseSimulator;

/// Create a simulator for `model` with default modes.
///
/// Without a `seed` one is drawn from the operating system and reported by
/// [`Simulator::seed()`].
///
/// # Errors
///
/// [`SimulatorError::UnsupportedModel`] if no backend handles the model's
/// representation.
pub fn create_simulator<'m, M: Model + ?Sized>(
    model: &'m M,
    seed: Option<u64>,
) -> Result<Box<dyn Simulator + 'm>, SimulatorError> {
    create_simulator_with(
        model,
        &SimulatorConfig {
            seed,
            ..SimulatorConfig::default()
        },
    )
}

/// Create a simulator for `model` and apply `config`.
///
/// # Errors
///
/// - [`SimulatorError::UnsupportedModel`] if no backend handles the model's
///   representation, or a sparse model returns `None` from
///   [`Model::as_transition_system()`].
/// - Any error a mode setter returns for `config`.
pub fn create_simulator_with<'m, M: Model + ?Sized>(
    model: &'m M,
    config: &SimulatorConfig,
) -> Result<Box<dyn Simulator + 'm>, SimulatorError> {
    let mut sim: Box<dyn Simulator + 'm> = match model.representation() {
        Representation::Sparse => {
            let transitions = model.as_transition_system().ok_or_else(|| {
                SimulatorError::unsupported("sparse model exposes no transition structure")
            })?;
            Box::new(SparseSimulator::new(transitions, config.seed))
        }
        other @ (Representation::Symbolic | Representation::Hybrid) => {
            return Err(SimulatorError::unsupported(format!(
                "no simulator for {other} models"
            )));
        }
    };
    config.apply(sim.as_mut())?;
    debug!(
        representation = %model.representation(),
        seed = sim.seed(),
        "simulator ready"
    );
    Ok(sim)
}
