//! Statistical properties of epsilon-greedy action selection

use cliffwalk::q_learning::{QTable, epsilon_greedy};
use rand::{SeedableRng, rngs::StdRng};
use statrs::distribution::{ChiSquared, ContinuousCDF};

const SAMPLES: usize = 40_000;

fn action_counts(table: &QTable, state: usize, explore: f64, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut counts = vec![0; table.num_actions()];
    for _ in 0..SAMPLES {
        counts[epsilon_greedy(table, state, explore, &mut rng)] += 1;
    }
    counts
}

fn chi_square_uniform(counts: &[usize]) -> f64 {
    let expected = SAMPLES as f64 / counts.len() as f64;
    counts
        .iter()
        .map(|&c| {
            let diff = c as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

#[test]
fn full_exploration_is_uniform() {
    let mut table = QTable::new(48, 4).unwrap();
    // A strongly preferred action must not bias pure exploration
    table.set(36, 1, 100.0);

    let counts = action_counts(&table, 36, 1.0, 2024);
    let statistic = chi_square_uniform(&counts);
    let critical = ChiSquared::new(3.0).unwrap().inverse_cdf(0.999);

    assert!(
        statistic < critical,
        "chi-square {statistic:.2} exceeds {critical:.2} for counts {counts:?}"
    );
}

#[test]
fn zero_exploration_is_deterministic() {
    let mut table = QTable::new(4, 4).unwrap();
    table.set(2, 3, 0.5);
    table.set(2, 1, 0.5);

    for seed in 0..5 {
        let counts = action_counts(&table, 2, 0.0, seed);
        assert_eq!(counts, vec![0, SAMPLES, 0, 0]);
    }
}

#[test]
fn partial_exploration_mixes_in_the_expected_share() {
    let mut table = QTable::new(1, 4).unwrap();
    table.set(0, 2, 1.0);
    let epsilon = 0.2;

    let counts = action_counts(&table, 0, epsilon, 99);
    // Greedy share is (1 - ε) + ε / 4
    let expected_greedy = (1.0 - epsilon) + epsilon / 4.0;
    let observed_greedy = counts[2] as f64 / SAMPLES as f64;

    assert!(
        (observed_greedy - expected_greedy).abs() < 0.01,
        "greedy share {observed_greedy:.4}, expected {expected_greedy:.4}"
    );
    for action in [0, 1, 3] {
        let share = counts[action] as f64 / SAMPLES as f64;
        assert!((share - epsilon / 4.0).abs() < 0.01);
    }
}
