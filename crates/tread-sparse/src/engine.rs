//! Seeded transition sampler over an explicit transition system.
//!
//! Respects the determinism contract: all randomness comes from a single
//! ChaCha8 generator seeded once, so identical seeds and identical action
//! sequences produce identical state and reward sequences.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tread_core::{ChoiceIndex, StateId, SteppingEngine, TransitionSystem};

/// Stepping engine for any [`TransitionSystem`].
///
/// Borrows the model; one engine per simulator. Rewards are tracked per
/// reward model. A step earns the chosen choice's state-action reward plus
/// the successor's state reward. A reset earns the initial state's state
/// reward.
#[derive(Debug)]
pub struct SparseEngine<'m, M: TransitionSystem + ?Sized> {
    model: &'m M,
    rng: ChaCha8Rng,
    seed: u64,
    current: StateId,
    last_rewards: Vec<f64>,
}

impl<'m, M: TransitionSystem + ?Sized> SparseEngine<'m, M> {
    /// An engine seeded from the operating system's entropy source.
    ///
    /// The drawn seed is available through [`seed()`](Self::seed) so the
    /// run can be replayed.
    pub fn new(model: &'m M) -> Self {
        Self::with_seed(model, rand::random())
    }

    /// An engine with an explicit seed, positioned at the initial state.
    pub fn with_seed(model: &'m M, seed: u64) -> Self {
        let mut engine = Self {
            model,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            current: model.initial_state(),
            last_rewards: vec![0.0; model.nr_reward_models()],
        };
        engine.reset_to_initial_state();
        engine
    }

    /// The seed the generator was last seeded with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The model this engine samples from.
    pub fn model(&self) -> &'m M {
        self.model
    }

    /// Rewards of the most recent transition, one per reward model.
    pub fn last_rewards(&self) -> &[f64] {
        &self.last_rewards
    }

    fn sample_successor(&mut self, row: &[(StateId, f64)]) -> Option<StateId> {
        let (&(last, _), _) = row.split_last()?;
        let u: f64 = self.rng.random();
        let mut acc = 0.0;
        for &(succ, p) in row {
            acc += p;
            if u < acc {
                return Some(succ);
            }
        }
        // Row sums may fall short of 1 by rounding.
        Some(last)
    }

    fn add_state_rewards(&mut self, state: StateId) {
        for (i, r) in self.last_rewards.iter_mut().enumerate() {
            *r += self.model.state_reward(i, state);
        }
    }
}

impl<M: TransitionSystem + ?Sized> SteppingEngine for SparseEngine<'_, M> {
    fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    fn current_state(&self) -> StateId {
        self.current
    }

    fn step(&mut self, offset: usize) -> bool {
        if offset >= self.model.nr_available_actions(self.current) {
            return false;
        }
        let choice: ChoiceIndex = self.model.choice_index(self.current, offset);
        let model = self.model;
        let Some(successor) = self.sample_successor(model.choice_row(choice)) else {
            return false;
        };

        for (i, r) in self.last_rewards.iter_mut().enumerate() {
            *r = model.choice_reward(i, choice);
        }
        self.current = successor;
        self.add_state_rewards(successor);
        true
    }

    fn random_step(&mut self) -> bool {
        let available = self.model.nr_available_actions(self.current);
        if available == 0 {
            return false;
        }
        let offset = self.rng.random_range(0..available);
        self.step(offset)
    }

    fn reset_to_initial_state(&mut self) {
        self.current = self.model.initial_state();
        self.last_rewards.fill(0.0);
        self.add_state_rewards(self.current);
    }

    fn last_reward(&self) -> f64 {
        self.last_rewards.first().copied().unwrap_or(0.0)
    }
}
