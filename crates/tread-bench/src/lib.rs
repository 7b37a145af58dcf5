//! Benchmark models for the Tread simulator.
//!
//! - [`reference_mdp`]: a generated corridor MDP with labels and valuations
//! - [`corridor_len`]: the number of states in a profile of a given size

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tread_core::{
    ChoiceIndex, ChoiceLabeling, ModelType, StateId, StateValuations, ValuationValue, Variable,
};
use tread_sparse::{
    ModelComponents, ModelError, RewardModel, SparseMatrix, SparseModel, StateLabeling,
    INITIAL_LABEL,
};

/// Action labels, in offset order, of every non-sink state.
pub const ACTIONS: [&str; 4] = ["forward", "back", "jump", "wait"];

/// Number of states in a corridor with `len` cells: one per cell plus the
/// goal sink.
pub fn corridor_len(len: usize) -> usize {
    len + 1
}

/// Build a corridor MDP with `len` cells and a goal sink after the last.
///
/// Each cell offers [`ACTIONS`]:
///
/// - `forward`: next cell with 0.8, stay with 0.2
/// - `back`: previous cell (or stay at cell 0)
/// - `jump`: up to three cells ahead, spread by a hash of `seed`
/// - `wait`: stay
///
/// Choices cost 1 except `wait`, which costs 0.5; reaching the goal pays a
/// state reward of 100. Valuations hold the cell index `pos`.
pub fn reference_mdp(len: usize, seed: u64) -> Result<SparseModel, ModelError> {
    let goal = len;
    let clamp = |c: usize| c.min(goal);

    let mut b = SparseMatrix::builder();
    for cell in 0..len {
        let hop = 1 + (mix(seed, cell as u64) % 3) as usize;
        b.new_row_group()
            .add_row([(cell + 1, 0.8), (cell, 0.2)])
            .add_row([(cell.saturating_sub(1), 1.0)])
            .add_row(jump_row(cell, clamp(cell + hop)))
            .add_row([(cell, 1.0)]);
    }
    b.new_row_group().add_row([(goal, 1.0)]);
    let matrix = b.build()?;

    let nr_choices = len * ACTIONS.len() + 1;
    let mut choices = ChoiceLabeling::new(nr_choices);
    let mut costs = Vec::with_capacity(nr_choices);
    for cell in 0..len {
        for (offset, label) in ACTIONS.iter().enumerate() {
            choices.add_label_to_choice(label, ChoiceIndex(cell * ACTIONS.len() + offset));
            costs.push(if *label == "wait" { 0.5 } else { 1.0 });
        }
    }
    costs.push(0.0);

    let mut state_rewards = vec![0.0; corridor_len(len)];
    state_rewards[goal] = 100.0;

    let mut labeling = StateLabeling::new(corridor_len(len));
    labeling.add_label_to_state(INITIAL_LABEL, StateId(0))?;
    labeling.add_label_to_state("goal", StateId(goal))?;

    let mut valuations = StateValuations::new(vec![Variable::new("pos")]);
    for state in 0..corridor_len(len) {
        valuations.add_state(vec![ValuationValue::Int(state as i64)])?;
    }

    let components = ModelComponents::new(matrix, labeling)
        .with_reward_model(
            "cost",
            RewardModel::with_state_action_rewards(costs),
        )
        .with_reward_model("goal", RewardModel::with_state_rewards(state_rewards))
        .with_choice_labeling(choices)
        .with_state_valuations(valuations);
    SparseModel::new(ModelType::Mdp, components)
}

/// Split a jump's mass between its target and the cell before it.
fn jump_row(cell: usize, target: usize) -> Vec<(usize, f64)> {
    if target == cell + 1 {
        vec![(target, 1.0)]
    } else {
        vec![(target, 0.5), (target - 1, 0.5)]
    }
}

/// SplitMix64-style mixing of a seed and a cell index.
fn mix(seed: u64, cell: u64) -> u64 {
    let mut z = seed ^ cell.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
