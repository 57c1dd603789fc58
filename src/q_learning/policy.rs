//! Epsilon-greedy action selection over a Q-table

use rand::Rng;

use crate::q_learning::QTable;

/// ε-greedy action selection
///
/// Draws `u ~ U[0, 1)`. If `u < explore` a uniformly random action is
/// returned, otherwise the greedy action for `state` (lowest index on ties).
/// With `explore = 0.0` the choice is deterministic for a fixed table, and
/// with `explore = 1.0` it is uniform over all actions.
///
/// The table is read at call time, so updates made earlier in the same
/// episode are always visible.
///
/// # Panics
///
/// Panics if `state` is out of range for `table`.
pub fn epsilon_greedy<R: Rng + ?Sized>(
    table: &QTable,
    state: usize,
    explore: f64,
    rng: &mut R,
) -> usize {
    if rng.random::<f64>() < explore {
        // Explore: random action
        rng.random_range(0..table.num_actions())
    } else {
        // Exploit: greedy action based on Q-values
        table.greedy_action(state)
    }
}
