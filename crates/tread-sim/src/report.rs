//! Observation reporting.
//!
//! What a simulator reveals is a pure function of the full-observability
//! flag, the observation mode, and the current state:
//!
//! | full observability | mode | observation |
//! |---|---|---|
//! | yes | state-level | the raw state identifier |
//! | yes | program-level | the state's valuation record |
//! | no | state-level | the state's observation class (POMDP only) |
//! | no | program-level | not implemented |

use tread_core::{Model, Observation, ObservationMode, SimulatorError, StateId, StateValuations};

/// Feature name reported for the unsupported partial/program-level pair.
pub const PARTIAL_PROGRAM_LEVEL: &str = "program-level observations under partial observability";

/// Compute the observation of `state`.
///
/// `valuations` is the simulator's cached valuations reference; it is only
/// consulted in program-level mode.
///
/// # Errors
///
/// - [`SimulatorError::NotImplemented`] for program-level reporting
///   without full observability.
/// - [`SimulatorError::Configuration`] if the model lacks the valuation or
///   observation class the mode needs.
pub fn observe<M: Model + ?Sized>(
    model: &M,
    valuations: Option<&StateValuations>,
    full_observability: bool,
    mode: ObservationMode,
    state: StateId,
) -> Result<Observation, SimulatorError> {
    match (full_observability, mode) {
        (true, ObservationMode::StateLevel) => Ok(Observation::State(state)),
        (true, ObservationMode::ProgramLevel) => valuations
            .and_then(|v| v.json(state))
            .map(Observation::Valuation)
            .ok_or_else(|| SimulatorError::config(format!("no valuation for state {state}"))),
        (false, ObservationMode::StateLevel) => {
            if !model.is_partially_observable() {
                return Err(SimulatorError::config(
                    "observation classes require a partially observable model",
                ));
            }
            model
                .observation(state)
                .map(Observation::Class)
                .ok_or_else(|| {
                    SimulatorError::config(format!("no observation class for state {state}"))
                })
        }
        (false, ObservationMode::ProgramLevel) => Err(SimulatorError::NotImplemented {
            feature: PARTIAL_PROGRAM_LEVEL,
        }),
    }
}
