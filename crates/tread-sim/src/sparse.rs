//! Simulator backend for explicit-state models.
//!
//! [`SparseSimulator`] binds a model, an exclusively owned stepping engine,
//! and the mode configuration into one state machine. Every call resolves
//! the action against the engine's current state first and only then lets
//! the engine move.
//!
//! # Ownership model
//!
//! The simulator borrows the model for `'m` and owns its engine. Dropping
//! the simulator releases the engine; the model is untouched.

use tracing::{debug, error, trace};
use tread_core::{
    unlabeled_action_name, Action, ActionMode, Model, ObservationMode, SimulatorError, StateId,
    StateValuations, StepResult, SteppingEngine, TransitionSystem,
};
use tread_sparse::SparseEngine;

use crate::report::{self, PARTIAL_PROGRAM_LEVEL};
use crate::simulator::{AvailableActions, Simulator};

/// Simulator over an explicit-state model.
///
/// Created with [`new()`](SparseSimulator::new) for the built-in
/// [`SparseEngine`], or [`with_engine()`](SparseSimulator::with_engine) for
/// any other [`SteppingEngine`].
///
/// # Example
///
/// ```ignore
/// let mut sim = SparseSimulator::new(&model, Some(42));
/// let start = sim.restart()?;
/// while !sim.is_done() {
///     let result = sim.step(Some(Action::Index(0)))?;
/// }
/// ```
pub struct SparseSimulator<'m, M: Model + ?Sized, E> {
    model: &'m M,
    engine: E,
    seed: u64,
    observation_mode: ObservationMode,
    action_mode: ActionMode,
    full_observability: bool,
    /// Present only while program-level reporting is active.
    state_valuations: Option<&'m StateValuations>,
    faulted: bool,
}

impl<'m, M: TransitionSystem + ?Sized> SparseSimulator<'m, M, SparseEngine<'m, M>> {
    /// A simulator over `model` with a [`SparseEngine`].
    ///
    /// Without a `seed` the engine draws one from the operating system;
    /// [`seed()`](Simulator::seed) reports it either way.
    pub fn new(model: &'m M, seed: Option<u64>) -> Self {
        let engine = match seed {
            Some(seed) => SparseEngine::with_seed(model, seed),
            None => SparseEngine::new(model),
        };
        let seed = engine.seed();
        Self::from_parts(model, engine, seed)
    }
}

impl<'m, M: Model + ?Sized, E: SteppingEngine> SparseSimulator<'m, M, E> {
    /// A simulator over `model` driving `engine`, which is seeded with
    /// `seed`.
    pub fn with_engine(model: &'m M, mut engine: E, seed: u64) -> Self {
        engine.set_seed(seed);
        Self::from_parts(model, engine, seed)
    }

    fn from_parts(model: &'m M, engine: E, seed: u64) -> Self {
        let full_observability = !model.is_partially_observable();
        debug!(
            model_type = %model.model_type(),
            states = model.nr_states(),
            seed,
            full_observability,
            "created sparse simulator"
        );
        Self {
            model,
            engine,
            seed,
            observation_mode: ObservationMode::default(),
            action_mode: ActionMode::default(),
            full_observability,
            state_valuations: None,
            faulted: false,
        }
    }

    /// The simulated model.
    pub fn model(&self) -> &'m M {
        self.model
    }

    /// The engine, for inspection.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Whether an engine or post-move reporting failure has made this
    /// simulator unusable.
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    /// Resolve the label of every choice at the current state.
    fn action_names(&self) -> Result<Vec<String>, SimulatorError> {
        let labeling = self.model.choice_labeling().ok_or_else(|| {
            SimulatorError::config("global-names action mode requires a model with choice labeling")
        })?;
        let state = self.engine.current_state();
        (0..self.nr_available_actions())
            .map(|offset| {
                let choice = self.model.choice_index(state, offset);
                let labels = labeling.labels_of_choice(choice);
                match labels.as_slice() {
                    [] => Ok(unlabeled_action_name(offset)),
                    [label] => Ok((*label).to_string()),
                    _ => Err(SimulatorError::unsupported(format!(
                        "choice {choice} carries {} labels",
                        labels.len()
                    ))),
                }
            })
            .collect()
    }

    /// Map `action` to an offset at the current state.
    fn resolve(&self, action: Option<&Action>) -> Result<usize, SimulatorError> {
        let available = self.nr_available_actions();
        match (action, self.action_mode) {
            (None, _) => {
                if self.model.is_nondeterministic() && available != 1 {
                    return Err(SimulatorError::AmbiguousAction { available });
                }
                Ok(0)
            }
            (Some(Action::Index(offset)), ActionMode::Index) => {
                if *offset >= available {
                    return Err(SimulatorError::InvalidAction {
                        action: *offset,
                        available,
                    });
                }
                Ok(*offset)
            }
            (Some(Action::Name(name)), ActionMode::GlobalNames) => self
                .action_names()?
                .iter()
                .position(|label| label == name)
                .ok_or_else(|| SimulatorError::UnknownAction {
                    action: name.clone(),
                }),
            (Some(action), mode) => Err(SimulatorError::InvalidActionType {
                kind: action.kind(),
                mode,
            }),
        }
    }

    fn ensure_usable(&self) -> Result<(), SimulatorError> {
        if self.faulted {
            return Err(SimulatorError::Faulted);
        }
        Ok(())
    }

    /// Turn an engine failure flag into a fatal error.
    fn check_engine(
        &mut self,
        operation: &'static str,
        state: StateId,
        ok: bool,
    ) -> Result<(), SimulatorError> {
        if ok {
            return Ok(());
        }
        self.faulted = true;
        error!(operation, %state, "stepping engine rejected a validated action");
        Err(SimulatorError::EngineInvariant { operation, state })
    }

    /// Report after the engine has moved.
    ///
    /// The move cannot be undone, so a reporting failure here faults the
    /// simulator.
    fn report_moved(&mut self, operation: &'static str) -> Result<StepResult, SimulatorError> {
        let result = self.report();
        if let Err(err) = &result {
            self.faulted = true;
            let state = self.engine.current_state();
            error!(operation, %state, %err, "could not report after the engine moved");
        }
        result
    }

    fn report(&self) -> Result<StepResult, SimulatorError> {
        let state = self.engine.current_state();
        let observation = report::observe(
            self.model,
            self.state_valuations,
            self.full_observability,
            self.observation_mode,
            state,
        )?;
        let reward = self.engine.last_reward();
        trace!(%state, reward, "reported");
        Ok(StepResult::new(observation, reward))
    }
}

impl<'m, M: Model + ?Sized, E: SteppingEngine> Simulator for SparseSimulator<'m, M, E> {
    fn available_actions(&self) -> Result<AvailableActions, SimulatorError> {
        match self.action_mode {
            ActionMode::Index => Ok(AvailableActions::Indices(0..self.nr_available_actions())),
            ActionMode::GlobalNames => Ok(AvailableActions::Names(self.action_names()?.into_iter())),
        }
    }

    fn nr_available_actions(&self) -> usize {
        if !self.model.is_nondeterministic() {
            return 1;
        }
        self.model
            .nr_available_actions(self.engine.current_state())
    }

    fn step(&mut self, action: Option<Action>) -> Result<StepResult, SimulatorError> {
        self.ensure_usable()?;
        let offset = self.resolve(action.as_ref())?;
        let state = self.engine.current_state();
        trace!(%state, offset, "step");
        let ok = self.engine.step(offset);
        self.check_engine("step", state, ok)?;
        self.report_moved("step")
    }

    fn random_step(&mut self) -> Result<StepResult, SimulatorError> {
        self.ensure_usable()?;
        let state = self.engine.current_state();
        trace!(%state, "random step");
        let ok = self.engine.random_step();
        self.check_engine("random_step", state, ok)?;
        self.report_moved("random_step")
    }

    fn restart(&mut self) -> Result<StepResult, SimulatorError> {
        self.ensure_usable()?;
        self.engine.reset_to_initial_state();
        trace!(state = %self.engine.current_state(), "restart");
        self.report_moved("restart")
    }

    fn is_done(&self) -> bool {
        self.model.is_sink_state(self.engine.current_state())
    }

    fn set_observation_mode(&mut self, mode: ObservationMode) -> Result<(), SimulatorError> {
        let valuations = match mode {
            ObservationMode::StateLevel => None,
            ObservationMode::ProgramLevel => {
                let valuations = self.model.state_valuations().ok_or_else(|| {
                    SimulatorError::config(
                        "program-level observations require a model with state valuations",
                    )
                })?;
                if !self.full_observability {
                    return Err(SimulatorError::NotImplemented {
                        feature: PARTIAL_PROGRAM_LEVEL,
                    });
                }
                Some(valuations)
            }
        };
        self.observation_mode = mode;
        self.state_valuations = valuations;
        debug!(%mode, "observation mode set");
        Ok(())
    }

    fn set_action_mode(&mut self, mode: ActionMode) -> Result<(), SimulatorError> {
        if mode == ActionMode::GlobalNames && self.model.choice_labeling().is_none() {
            return Err(SimulatorError::config(
                "global-names action mode requires a model with choice labeling",
            ));
        }
        self.action_mode = mode;
        debug!(%mode, "action mode set");
        Ok(())
    }

    fn set_full_observability(&mut self, value: bool) -> Result<(), SimulatorError> {
        if !value {
            if !self.model.is_partially_observable() {
                return Err(SimulatorError::config(
                    "partial observability requires a partially observable model",
                ));
            }
            if self.observation_mode == ObservationMode::ProgramLevel {
                return Err(SimulatorError::NotImplemented {
                    feature: PARTIAL_PROGRAM_LEVEL,
                });
            }
        }
        self.full_observability = value;
        debug!(full_observability = value, "observability set");
        Ok(())
    }

    fn observation_mode(&self) -> ObservationMode {
        self.observation_mode
    }

    fn action_mode(&self) -> ActionMode {
        self.action_mode
    }

    fn full_observability(&self) -> bool {
        self.full_observability
    }

    fn seed(&self) -> u64 {
        self.seed
    }

    fn current_state(&self) -> StateId {
        self.engine.current_state()
    }
}

impl<M: Model + ?Sized, E> std::fmt::Debug for SparseSimulator<'_, M, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SparseSimulator")
            .field("model_type", &self.model.model_type())
            .field("seed", &self.seed)
            .field("observation_mode", &self.observation_mode)
            .field("action_mode", &self.action_mode)
            .field("full_observability", &self.full_observability)
            .field("faulted", &self.faulted)
            .finish()
    }
}
