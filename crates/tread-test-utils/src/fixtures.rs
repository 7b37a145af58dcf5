//! Reusable fixture models.
//!
//! - [`two_state_chain`]: DTMC `A -> B`, `B -> B`.
//! - [`labeled_mdp`]: four-state MDP with choice labels and valuations.
//! - [`unlabeled_mdp`]: the same MDP without optional metadata.
//! - [`multi_label_mdp`]: the same MDP with one doubly-labeled choice.
//! - [`pomdp`]: four-state POMDP with three observation classes.

use tread_core::{
    ChoiceIndex, ChoiceLabeling, ModelType, ObservationId, StateId, StateValuations,
    ValuationValue, Variable,
};
use tread_sparse::{
    ModelComponents, RewardModel, SparseMatrix, SparseModel, StateLabeling, INITIAL_LABEL,
};

/// State-action rewards of the two choices of [`two_state_chain`].
pub const CHAIN_REWARDS: [f64; 2] = [1.5, 2.5];

type Row<'a> = &'a [(usize, f64)];

fn matrix(groups: &[&[Row<'_>]]) -> SparseMatrix {
    let mut b = SparseMatrix::builder();
    for rows in groups {
        b.new_row_group();
        for row in rows.iter() {
            b.add_row(row.iter().copied());
        }
    }
    b.build().expect("fixture matrix is valid")
}

fn initial_labeling(nr_states: usize) -> StateLabeling {
    let mut l = StateLabeling::new(nr_states);
    l.add_label_to_state(INITIAL_LABEL, StateId(0))
        .expect("state 0 exists");
    l
}

fn int_valuations(names: &[&str], rows: &[&[i64]]) -> StateValuations {
    let mut v = StateValuations::new(names.iter().map(|n| Variable::new(*n)).collect());
    for row in rows {
        v.add_state(row.iter().map(|&x| ValuationValue::Int(x)).collect())
            .expect("fixture arity matches");
    }
    v
}

/// Two-state DTMC: `A` (state 0) moves to `B` (state 1); `B` loops.
///
/// The single reward model pays [`CHAIN_REWARDS`] per choice and has no
/// state rewards, so a reset reports 0. Carries a valuation `pos`.
pub fn two_state_chain() -> SparseModel {
    let m = matrix(&[&[&[(1, 1.0)]], &[&[(1, 1.0)]]]);
    let components = ModelComponents::new(m, initial_labeling(2))
        .with_reward_model(
            "reward",
            RewardModel::with_state_action_rewards(CHAIN_REWARDS.to_vec()),
        )
        .with_state_valuations(int_valuations(&["pos"], &[&[0], &[1]]));
    SparseModel::new(ModelType::Dtmc, components).expect("fixture model is valid")
}

/// Choices by state (global index in brackets):
///
/// - s0: `north` \[0\] -> s1, `south` \[1\] -> {s2: 0.5, s3: 0.5},
///   unlabeled \[2\] -> s0
/// - s1: `north` \[3\] -> s3
/// - s2: unlabeled \[4\] -> s3, `south` \[5\] -> s3
/// - s3: `stay` \[6\] -> s3 (sink)
fn mdp_matrix() -> SparseMatrix {
    matrix(&[
        &[&[(1, 1.0)], &[(2, 0.5), (3, 0.5)], &[(0, 1.0)]],
        &[&[(3, 1.0)]],
        &[&[(3, 1.0)], &[(3, 1.0)]],
        &[&[(3, 1.0)]],
    ])
}

fn mdp_labeling() -> ChoiceLabeling {
    let mut l = ChoiceLabeling::new(7);
    for (label, choice) in [("north", 0), ("south", 1), ("north", 3), ("south", 5), ("stay", 6)] {
        l.add_label_to_choice(label, ChoiceIndex(choice));
    }
    l
}

/// Choice `c` costs `c + 1` under the single reward model `cost`.
fn mdp_rewards() -> RewardModel {
    RewardModel::with_state_action_rewards((1..=7).map(f64::from).collect())
}

/// Four-state MDP with choice labels and `(x, y)` valuations.
///
/// See the module docs for the choice structure. State 3 is the only sink.
pub fn labeled_mdp() -> SparseModel {
    let components = ModelComponents::new(mdp_matrix(), initial_labeling(4))
        .with_reward_model("cost", mdp_rewards())
        .with_choice_labeling(mdp_labeling())
        .with_state_valuations(int_valuations(
            &["x", "y"],
            &[&[0, 0], &[0, 1], &[1, 0], &[1, 1]],
        ));
    SparseModel::new(ModelType::Mdp, components).expect("fixture model is valid")
}

/// [`labeled_mdp`] without choice labeling or valuations.
pub fn unlabeled_mdp() -> SparseModel {
    let components =
        ModelComponents::new(mdp_matrix(), initial_labeling(4)).with_reward_model("cost", mdp_rewards());
    SparseModel::new(ModelType::Mdp, components).expect("fixture model is valid")
}

/// [`labeled_mdp`] where choice 1 at s0 is labeled both `south` and `east`.
pub fn multi_label_mdp() -> SparseModel {
    let mut labeling = mdp_labeling();
    labeling.add_label_to_choice("east", ChoiceIndex(1));
    let components = ModelComponents::new(mdp_matrix(), initial_labeling(4))
        .with_reward_model("cost", mdp_rewards())
        .with_choice_labeling(labeling);
    SparseModel::new(ModelType::Mdp, components).expect("fixture model is valid")
}

/// Four-state POMDP.
///
/// - s0 (obs 0): \[0\] -> {s1: 0.5, s2: 0.5}, \[1\] -> s0
/// - s1 (obs 1): \[2\] -> s3, \[3\] -> s1
/// - s2 (obs 1): \[4\] -> s1, \[5\] -> s3
/// - s3 (obs 2): \[6\] -> s3 (sink)
///
/// Arriving in s3 earns a state reward of 10. Carries a valuation `s`
/// equal to the state index.
pub fn pomdp() -> SparseModel {
    let m = matrix(&[
        &[&[(1, 0.5), (2, 0.5)], &[(0, 1.0)]],
        &[&[(3, 1.0)], &[(1, 1.0)]],
        &[&[(1, 1.0)], &[(3, 1.0)]],
        &[&[(3, 1.0)]],
    ]);
    let components = ModelComponents::new(m, initial_labeling(4))
        .with_reward_model(
            "goal",
            RewardModel::with_state_rewards(vec![0.0, 0.0, 0.0, 10.0]),
        )
        .with_state_valuations(int_valuations(&["s"], &[&[0], &[1], &[2], &[3]]))
        .with_observability_classes(
            [0, 1, 1, 2].into_iter().map(ObservationId).collect(),
        );
    SparseModel::new(ModelType::Pomdp, components).expect("fixture model is valid")
}
