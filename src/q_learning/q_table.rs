//! Dense Q-table for tabular temporal difference learning

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Q-table mapping (state, action) pairs to estimated discounted returns
///
/// Values are stored row-major: one row of `num_actions` entries per state.
/// The shape is fixed at construction and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    num_states: usize,
    num_actions: usize,
    values: Vec<f64>,
}

impl QTable {
    /// Create a zero-initialised table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySpace`] if either dimension is zero.
    pub fn new(num_states: usize, num_actions: usize) -> Result<Self> {
        check_dimensions(num_states, num_actions)?;
        Ok(Self {
            num_states,
            num_actions,
            values: vec![0.0; num_states * num_actions],
        })
    }

    /// Build a table from row-major values.
    ///
    /// # Errors
    ///
    /// Fails if the dimensions are empty, the value count does not match the
    /// shape, or any value is not finite.
    pub fn from_values(num_states: usize, num_actions: usize, values: Vec<f64>) -> Result<Self> {
        let table = Self {
            num_states,
            num_actions,
            values,
        };
        table.validate()?;
        Ok(table)
    }

    /// Check the structural invariants of the table.
    ///
    /// Tables coming from deserialization bypass the constructors, so
    /// repositories call this after loading.
    pub fn validate(&self) -> Result<()> {
        check_dimensions(self.num_states, self.num_actions)?;

        let expected = self.num_states * self.num_actions;
        if self.values.len() != expected {
            return Err(Error::CorruptTable {
                message: format!(
                    "expected {expected} values for shape ({}, {}), found {}",
                    self.num_states,
                    self.num_actions,
                    self.values.len()
                ),
            });
        }

        if let Some(index) = self.values.iter().position(|v| !v.is_finite()) {
            return Err(Error::CorruptTable {
                message: format!(
                    "non-finite value {} at state {}, action {}",
                    self.values[index],
                    index / self.num_actions,
                    index % self.num_actions
                ),
            });
        }

        Ok(())
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    /// (num_states, num_actions)
    pub fn shape(&self) -> (usize, usize) {
        (self.num_states, self.num_actions)
    }

    /// All values in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get Q-value for a state-action pair
    ///
    /// # Panics
    ///
    /// Panics if `state` or `action` is out of range.
    pub fn get(&self, state: usize, action: usize) -> f64 {
        self.values[self.index(state, action)]
    }

    /// Set Q-value for a state-action pair
    ///
    /// # Panics
    ///
    /// Panics if `state` or `action` is out of range.
    pub fn set(&mut self, state: usize, action: usize, value: f64) {
        let index = self.index(state, action);
        self.values[index] = value;
    }

    /// Q-values of every action in `state`.
    pub fn row(&self, state: usize) -> &[f64] {
        assert!(
            state < self.num_states,
            "state {state} out of range for {} states",
            self.num_states
        );
        let start = state * self.num_actions;
        &self.values[start..start + self.num_actions]
    }

    /// Iterate over rows in state order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.num_actions)
    }

    /// Maximum Q-value over all actions in a state
    pub fn max_q(&self, state: usize) -> f64 {
        self.row(state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Greedy action (highest Q-value) in a state
    ///
    /// Ties go to the lowest action index.
    pub fn greedy_action(&self, state: usize) -> usize {
        let row = self.row(state);
        let mut best = 0;
        for (action, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = action;
            }
        }
        best
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// Returns the updated Q(s,a).
    pub fn q_learning_update(
        &mut self,
        state: usize,
        action: usize,
        reward: f64,
        next_state: usize,
        learning_rate: f64,
        discount_factor: f64,
    ) -> f64 {
        let td_target = reward + discount_factor * self.max_q(next_state);
        self.move_toward(state, action, td_target, learning_rate)
    }

    /// SARSA update: on-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ Q(s',a') - Q(s,a)]
    ///
    /// Returns the updated Q(s,a).
    #[allow(clippy::too_many_arguments)]
    pub fn sarsa_update(
        &mut self,
        state: usize,
        action: usize,
        reward: f64,
        next_state: usize,
        next_action: usize,
        learning_rate: f64,
        discount_factor: f64,
    ) -> f64 {
        let td_target = reward + discount_factor * self.get(next_state, next_action);
        self.move_toward(state, action, td_target, learning_rate)
    }

    /// Reset all Q-values to zero
    pub fn reset(&mut self) {
        self.values.iter_mut().for_each(|v| *v = 0.0);
    }

    /// Check that a state index coming from outside is usable.
    pub fn check_state(&self, state: usize) -> Result<usize> {
        if state < self.num_states {
            Ok(state)
        } else {
            Err(Error::StateOutOfRange {
                state,
                num_states: self.num_states,
            })
        }
    }

    /// Check that an action index coming from outside is usable.
    pub fn check_action(&self, action: usize) -> Result<usize> {
        if action < self.num_actions {
            Ok(action)
        } else {
            Err(Error::ActionOutOfRange {
                action,
                num_actions: self.num_actions,
            })
        }
    }

    fn move_toward(&mut self, state: usize, action: usize, target: f64, learning_rate: f64) -> f64 {
        let current_q = self.get(state, action);
        let td_error = target - current_q;
        let new_q = current_q + learning_rate * td_error;
        self.set(state, action, new_q);
        new_q
    }

    fn index(&self, state: usize, action: usize) -> usize {
        assert!(
            state < self.num_states && action < self.num_actions,
            "({state}, {action}) out of range for Q-table of shape ({}, {})",
            self.num_states,
            self.num_actions
        );
        state * self.num_actions + action
    }
}

fn check_dimensions(num_states: usize, num_actions: usize) -> Result<()> {
    if num_states == 0 {
        return Err(Error::EmptySpace {
            space: "state".to_string(),
        });
    }
    if num_actions == 0 {
        return Err(Error::EmptySpace {
            space: "action".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qtable_initialization() {
        let qtable = QTable::new(48, 4).unwrap();
        assert_eq!(qtable.shape(), (48, 4));
        assert_eq!(qtable.values().len(), 192);
        assert!(qtable.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_empty_dimensions_rejected() {
        assert!(matches!(
            QTable::new(0, 4),
            Err(Error::EmptySpace { .. })
        ));
        assert!(matches!(
            QTable::new(4, 0),
            Err(Error::EmptySpace { .. })
        ));
    }

    #[test]
    fn test_qtable_set_get() {
        let mut qtable = QTable::new(3, 2).unwrap();
        qtable.set(2, 1, 1.5);
        assert_eq!(qtable.get(2, 1), 1.5);
        assert_eq!(qtable.row(2), &[0.0, 1.5]);
        assert_eq!(qtable.values()[5], 1.5);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_access_panics() {
        let qtable = QTable::new(3, 2).unwrap();
        qtable.get(3, 0);
    }

    #[test]
    fn test_max_q() {
        let mut qtable = QTable::new(1, 3).unwrap();
        qtable.set(0, 0, -0.5);
        qtable.set(0, 1, 1.5);
        qtable.set(0, 2, 0.8);
        assert_eq!(qtable.max_q(0), 1.5);
    }

    #[test]
    fn test_greedy_action() {
        let mut qtable = QTable::new(1, 3).unwrap();
        qtable.set(0, 0, 0.5);
        qtable.set(0, 1, 1.5);
        qtable.set(0, 2, 0.8);
        assert_eq!(qtable.greedy_action(0), 1);
    }

    #[test]
    fn test_greedy_ties_pick_lowest_index() {
        let mut qtable = QTable::new(2, 4).unwrap();
        assert_eq!(qtable.greedy_action(0), 0);

        qtable.set(1, 1, 2.0);
        qtable.set(1, 3, 2.0);
        assert_eq!(qtable.greedy_action(1), 1);
    }

    #[test]
    fn test_q_learning_update_formula() {
        let mut qtable = QTable::new(2, 2).unwrap();
        qtable.set(1, 0, 2.0);
        qtable.set(1, 1, 4.0);

        // 0 + 0.1 * (-1 + 0.9 * 4 - 0) = 0.26
        let updated = qtable.q_learning_update(0, 1, -1.0, 1, 0.1, 0.9);
        assert!((updated - 0.26).abs() < 1e-12);
        assert_eq!(qtable.get(0, 1), updated);
    }

    #[test]
    fn test_sarsa_update_formula() {
        let mut qtable = QTable::new(2, 2).unwrap();
        qtable.set(1, 0, 2.0);
        qtable.set(1, 1, 4.0);

        // 0 + 0.1 * (-1 + 0.9 * 2 - 0) = 0.08
        let updated = qtable.sarsa_update(0, 1, -1.0, 1, 0, 0.1, 0.9);
        assert!((updated - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_update_moves_strictly_toward_target() {
        let mut qtable = QTable::new(2, 2).unwrap();
        qtable.set(0, 0, 3.0);
        qtable.set(1, 1, -2.0);

        let before = qtable.get(0, 0);
        let target = -1.0 + 0.9 * qtable.max_q(1);
        let after = qtable.q_learning_update(0, 0, -1.0, 1, 0.3, 0.9);
        assert!((after - target).abs() < (before - target).abs());

        let before = qtable.get(0, 0);
        let target = 5.0 + 0.9 * qtable.get(1, 1);
        let after = qtable.sarsa_update(0, 0, 5.0, 1, 1, 0.3, 0.9);
        assert!((after - target).abs() < (before - target).abs());
    }

    #[test]
    fn test_full_learning_rate_jumps_to_target() {
        let mut qtable = QTable::new(2, 2).unwrap();
        qtable.set(1, 0, 10.0);
        let updated = qtable.q_learning_update(0, 0, 1.0, 1, 1.0, 0.5);
        assert_eq!(updated, 6.0);
    }

    #[test]
    fn test_updates_never_change_shape() {
        let mut qtable = QTable::new(4, 3).unwrap();
        for state in 0..4 {
            for action in 0..3 {
                qtable.q_learning_update(state, action, -1.0, (state + 1) % 4, 0.5, 0.9);
                qtable.sarsa_update(state, action, -1.0, (state + 2) % 4, action, 0.5, 0.9);
            }
        }
        assert_eq!(qtable.shape(), (4, 3));
        assert_eq!(qtable.values().len(), 12);
        assert!(qtable.validate().is_ok());
    }

    #[test]
    fn test_reset_zeroes_values() {
        let mut qtable = QTable::new(2, 2).unwrap();
        qtable.set(0, 1, 7.0);
        qtable.reset();
        assert!(qtable.values().iter().all(|&v| v == 0.0));
        assert_eq!(qtable.shape(), (2, 2));
    }

    #[test]
    fn test_from_values_validation() {
        let table = QTable::from_values(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(table.row(1), &[3.0, 4.0]);

        assert!(matches!(
            QTable::from_values(2, 2, vec![1.0, 2.0, 3.0]),
            Err(Error::CorruptTable { .. })
        ));
        assert!(matches!(
            QTable::from_values(2, 2, vec![1.0, f64::NAN, 3.0, 4.0]),
            Err(Error::CorruptTable { .. })
        ));
    }

    #[test]
    fn test_check_state_and_action() {
        let table = QTable::new(3, 2).unwrap();
        assert_eq!(table.check_state(2).unwrap(), 2);
        assert!(matches!(
            table.check_state(3),
            Err(Error::StateOutOfRange {
                state: 3,
                num_states: 3
            })
        ));
        assert!(matches!(
            table.check_action(2),
            Err(Error::ActionOutOfRange { .. })
        ));
    }

    #[test]
    fn test_rows_iterates_in_state_order() {
        let table = QTable::from_values(3, 2, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let rows: Vec<&[f64]> = table.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], &[4.0, 5.0]);
    }
}
