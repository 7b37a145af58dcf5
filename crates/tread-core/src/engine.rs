//! The stepping-engine collaborator.

use crate::id::StateId;

/// Opaque transition sampler bound to one model.
///
/// The engine owns the current position and the pseudo-random generator.
/// Given the same seed and the same sequence of calls, an engine must
/// produce the same sequence of states and rewards.
///
/// `step` and `random_step` report success as a flag. A simulator only
/// calls `step` with offsets it has validated, so `false` signals an
/// inconsistency between engine and model rather than a caller mistake.
pub trait SteppingEngine {
    /// Reseed the pseudo-random generator.
    fn set_seed(&mut self, seed: u64);

    /// The state the engine is in.
    fn current_state(&self) -> StateId;

    /// Take the choice at `offset` of the current state and sample a
    /// successor.
    fn step(&mut self, offset: usize) -> bool;

    /// Pick one of the current state's choices uniformly at random and
    /// take it.
    fn random_step(&mut self) -> bool;

    /// Move back to the model's initial state.
    fn reset_to_initial_state(&mut self);

    /// Reward attached to the most recent transition or reset.
    fn last_reward(&self) -> f64;
}
