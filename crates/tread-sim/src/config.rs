//! Simulator construction options.
//!
//! [`SimulatorConfig`] bundles the seed and the three mode settings so a
//! simulator can be created fully configured in one call to
//! [`create_simulator_with()`](crate::create_simulator_with).

use serde::{Deserialize, Serialize};
use tread_core::{ActionMode, ObservationMode, SimulatorError};

use crate::simulator::Simulator;

/// Options applied when a simulator is created.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Engine seed. `None` = draw one from the operating system.
    pub seed: Option<u64>,
    /// Initial observation mode. Default: state-level.
    pub observation_mode: ObservationMode,
    /// Initial action mode. Default: index.
    pub action_mode: ActionMode,
    /// Observability override. `None` = full unless the model is a POMDP.
    pub full_observability: Option<bool>,
}

impl SimulatorConfig {
    /// Set the engine seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the observation mode.
    pub fn observation_mode(mut self, mode: ObservationMode) -> Self {
        self.observation_mode = mode;
        self
    }

    /// Set the action mode.
    pub fn action_mode(mut self, mode: ActionMode) -> Self {
        self.action_mode = mode;
        self
    }

    /// Override observability.
    pub fn full_observability(mut self, value: bool) -> Self {
        self.full_observability = Some(value);
        self
    }

    /// Push the mode settings into `sim` through its validating setters.
    ///
    /// Program-level reporting needs full observability, so the order
    /// depends on the direction. Turning observability on goes before the
    /// observation mode; turning it off goes after. This way `sim` can move
    /// between any two valid settings regardless of where it starts.
    ///
    /// # Errors
    ///
    /// Whatever the first rejecting setter returns.
    pub fn apply<S: Simulator + ?Sized>(&self, sim: &mut S) -> Result<(), SimulatorError> {
        match self.full_observability {
            Some(false) => {
                sim.set_observation_mode(self.observation_mode)?;
                sim.set_full_observability(false)?;
            }
            Some(true) => {
                sim.set_full_observability(true)?;
                sim.set_observation_mode(self.observation_mode)?;
            }
            None => sim.set_observation_mode(self.observation_mode)?,
        }
        sim.set_action_mode(self.action_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_simulator_with;
    use tread_test_utils::pomdp;

    #[test]
    fn default_is_index_state_level() {
        let c = SimulatorConfig::default();
        assert_eq!(c.seed, None);
        assert_eq!(c.observation_mode, ObservationMode::StateLevel);
        assert_eq!(c.action_mode, ActionMode::Index);
        assert_eq!(c.full_observability, None);
    }

    #[test]
    fn builder_sets_every_field() {
        let c = SimulatorConfig::default()
            .seed(7)
            .observation_mode(ObservationMode::ProgramLevel)
            .action_mode(ActionMode::GlobalNames)
            .full_observability(true);
        assert_eq!(c.seed, Some(7));
        assert_eq!(c.observation_mode, ObservationMode::ProgramLevel);
        assert_eq!(c.action_mode, ActionMode::GlobalNames);
        assert_eq!(c.full_observability, Some(true));
    }

    #[test]
    fn apply_moves_between_observability_settings_in_both_directions() {
        let model = pomdp();
        let program_level = SimulatorConfig::default()
            .full_observability(true)
            .observation_mode(ObservationMode::ProgramLevel);
        let partial = SimulatorConfig::default().full_observability(false);

        let mut sim = create_simulator_with(&model, &program_level.clone().seed(4)).unwrap();
        partial.apply(sim.as_mut()).unwrap();
        assert!(!sim.full_observability());
        assert_eq!(sim.observation_mode(), ObservationMode::StateLevel);

        program_level.apply(sim.as_mut()).unwrap();
        assert!(sim.full_observability());
        assert_eq!(sim.observation_mode(), ObservationMode::ProgramLevel);
    }

    #[test]
    fn apply_stops_at_the_first_rejected_setting() {
        let model = pomdp();
        let mut sim = create_simulator_with(&model, &SimulatorConfig::default().seed(4)).unwrap();
        let err = SimulatorConfig::default()
            .observation_mode(ObservationMode::ProgramLevel)
            .action_mode(ActionMode::GlobalNames)
            .apply(sim.as_mut())
            .unwrap_err();
        assert!(matches!(err, SimulatorError::NotImplemented { .. }), "{err}");
        assert_eq!(sim.observation_mode(), ObservationMode::StateLevel);
        assert_eq!(sim.action_mode(), ActionMode::Index);
    }
}
