//! Trace recording and replay verification.
//!
//! A [`TraceRecorder`] wraps a simulator and logs every successful
//! `restart`, `step`, and `random_step` together with its result. The
//! resulting [`Trace`] carries the seed and modes needed to re-create the
//! run, and [`replay`] re-drives a fresh simulator through it, reporting the
//! first step whose result differs.
//!
//! Traces serialize to JSON so rollouts can be stored and compared across
//! processes.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use tread_core::{Action, ActionMode, ObservationMode, SimulatorError, StepResult};

use crate::config::SimulatorConfig;
use crate::simulator::Simulator;

/// The call that produced a trace step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceAction {
    /// [`Simulator::restart`].
    Restart,
    /// [`Simulator::step`] with the given action.
    Step(Option<Action>),
    /// [`Simulator::random_step`].
    RandomStep,
}

/// One recorded call and what it reported.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    /// The call.
    pub action: TraceAction,
    /// Its result.
    pub result: StepResult,
}

/// A recorded run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// The simulator's seed.
    pub seed: u64,
    /// Observation mode in effect while recording.
    pub observation_mode: ObservationMode,
    /// Action mode in effect while recording.
    pub action_mode: ActionMode,
    /// Observability in effect while recording.
    pub full_observability: bool,
    /// Recorded calls, oldest first.
    pub steps: Vec<TraceStep>,
}

impl Trace {
    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a trace previously produced by [`to_json()`](Self::to_json).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Total reward over every recorded step.
    pub fn total_reward(&self) -> f64 {
        self.steps.iter().map(|s| s.result.reward).sum()
    }
}

/// Records the calls made through it.
///
/// Modes are captured when the recorder is created; attach it to a
/// simulator that has not been stepped yet so that [`replay`] starts from
/// the same state.
pub struct TraceRecorder<'s, S: Simulator + ?Sized> {
    sim: &'s mut S,
    trace: Trace,
}

impl<'s, S: Simulator + ?Sized> TraceRecorder<'s, S> {
    /// Start recording `sim`.
    pub fn new(sim: &'s mut S) -> Self {
        let trace = Trace {
            seed: sim.seed(),
            observation_mode: sim.observation_mode(),
            action_mode: sim.action_mode(),
            full_observability: sim.full_observability(),
            steps: Vec::new(),
        };
        Self { sim, trace }
    }

    /// The wrapped simulator, for read-only queries.
    pub fn simulator(&self) -> &S {
        self.sim
    }

    /// Recorded steps so far.
    pub fn steps(&self) -> &[TraceStep] {
        &self.trace.steps
    }

    /// Restart and record.
    pub fn restart(&mut self) -> Result<StepResult, SimulatorError> {
        let result = self.sim.restart()?;
        Ok(self.push(TraceAction::Restart, result))
    }

    /// Step and record.
    pub fn step(&mut self, action: Option<Action>) -> Result<StepResult, SimulatorError> {
        let result = self.sim.step(action.clone())?;
        Ok(self.push(TraceAction::Step(action), result))
    }

    /// Random-step and record.
    pub fn random_step(&mut self) -> Result<StepResult, SimulatorError> {
        let result = self.sim.random_step()?;
        Ok(self.push(TraceAction::RandomStep, result))
    }

    /// Whether the wrapped simulator is in a sink state.
    pub fn is_done(&self) -> bool {
        self.sim.is_done()
    }

    /// Stop recording and return the trace.
    pub fn finish(self) -> Trace {
        self.trace
    }

    fn push(&mut self, action: TraceAction, result: StepResult) -> StepResult {
        self.trace.steps.push(TraceStep {
            action,
            result: result.clone(),
        });
        result
    }
}

/// The first step at which a replay departed from its trace.
#[derive(Clone, Debug, PartialEq)]
pub struct Divergence {
    /// Index into [`Trace::steps`].
    pub index: usize,
    /// What the trace recorded.
    pub expected: StepResult,
    /// What the simulator reported.
    pub actual: StepResult,
}

/// Outcome of [`replay`].
#[derive(Clone, Debug, PartialEq)]
pub struct ReplayReport {
    /// Steps re-driven, including the divergent one.
    pub steps_replayed: usize,
    /// The first mismatch, or `None` if every step matched.
    pub divergence: Option<Divergence>,
}

impl ReplayReport {
    /// Whether every step matched.
    pub fn is_faithful(&self) -> bool {
        self.divergence.is_none()
    }
}

/// Re-drive `sim` through `trace` and compare every result.
///
/// `sim` must be freshly created over the same model with the trace's seed.
/// The trace's modes are applied before the first step, through
/// [`SimulatorConfig::apply()`], whatever modes `sim` was created with.
/// Replay stops at the first divergence.
///
/// # Errors
///
/// - [`SimulatorError::Configuration`] if the seeds differ.
/// - Any error the simulator returns while applying modes or re-driving a
///   step; a recorded step never failed, so this also means the run has
///   departed from the trace.
pub fn replay<S: Simulator + ?Sized>(
    sim: &mut S,
    trace: &Trace,
) -> Result<ReplayReport, SimulatorError> {
    if sim.seed() != trace.seed {
        return Err(SimulatorError::config(format!(
            "trace was recorded with seed {}, simulator has seed {}",
            trace.seed,
            sim.seed()
        )));
    }
    SimulatorConfig {
        seed: Some(trace.seed),
        observation_mode: trace.observation_mode,
        action_mode: trace.action_mode,
        full_observability: Some(trace.full_observability),
    }
    .apply(sim)?;

    for (index, step) in trace.steps.iter().enumerate() {
        let actual = match &step.action {
            TraceAction::Restart => sim.restart()?,
            TraceAction::Step(action) => sim.step(action.clone())?,
            TraceAction::RandomStep => sim.random_step()?,
        };
        if actual != step.result {
            warn!(index, "replay diverged from trace");
            return Ok(ReplayReport {
                steps_replayed: index + 1,
                divergence: Some(Divergence {
                    index,
                    expected: step.result.clone(),
                    actual,
                }),
            });
        }
    }
    debug!(steps = trace.steps.len(), "replay matched trace");
    Ok(ReplayReport {
        steps_replayed: trace.steps.len(),
        divergence: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tread_core::{Observation, StateId};

    fn step(action: TraceAction, state: usize, reward: f64) -> TraceStep {
        TraceStep {
            action,
            result: StepResult::new(Observation::State(StateId(state)), reward),
        }
    }

    fn sample() -> Trace {
        Trace {
            seed: 5,
            observation_mode: ObservationMode::StateLevel,
            action_mode: ActionMode::Index,
            full_observability: true,
            steps: vec![
                step(TraceAction::Restart, 0, 0.0),
                step(TraceAction::Step(Some(Action::Index(1))), 2, 2.0),
                step(TraceAction::Step(None), 3, 5.0),
                step(TraceAction::RandomStep, 3, 7.0),
            ],
        }
    }

    #[test]
    fn total_reward_sums_steps() {
        assert_eq!(sample().total_reward(), 14.0);
    }

    #[test]
    fn json_round_trip_preserves_actions() {
        let trace = sample();
        let json = trace.to_json().unwrap();
        assert_eq!(Trace::from_json(&json).unwrap(), trace);
    }

    #[test]
    fn named_actions_serialize_as_strings() {
        let action = TraceAction::Step(Some(Action::from("north")));
        assert_eq!(
            serde_json::to_string(&action).unwrap(),
            r#"{"Step":"north"}"#
        );
        let omitted: TraceAction = serde_json::from_str(r#"{"Step":null}"#).unwrap();
        assert_eq!(omitted, TraceAction::Step(None));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Trace::from_json("{\"seed\": 1}").is_err());
    }
}
