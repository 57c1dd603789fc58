//! Tests for the train, evaluate and export commands

use cliffwalk::{
    adapters::MsgPackRepository,
    cli::commands::{
        evaluate::{self, EvaluateArgs},
        export::{self, ExportArgs},
        train::{self, TrainArgs},
    },
    ports::QTableRepository,
};
use clap::Parser;
use tempfile::TempDir;

fn train_quietly(dir: &TempDir, learner: &str) -> std::path::PathBuf {
    let table = dir.path().join(format!("{learner}.msgpack"));
    let summary = dir.path().join(format!("{learner}_summary"));
    let args = TrainArgs::parse_from([
        "train",
        learner,
        "--episodes",
        "5",
        "--seed",
        "1",
        "--quiet",
        "--output",
        table.to_str().unwrap(),
        "--summary",
        summary.to_str().unwrap(),
    ]);
    train::execute(args).unwrap();
    table
}

#[test]
fn train_writes_table_and_summary() {
    let dir = TempDir::new().unwrap();
    let table_path = train_quietly(&dir, "q-learning");

    let table = MsgPackRepository::new().load(&table_path).unwrap();
    assert_eq!(table.shape(), (48, 4));
    // Every episode starts next to the cliff, so something was learned
    assert!(table.values().iter().any(|&v| v != 0.0));

    let summary_path = dir.path().join("q-learning_summary.json");
    let summary: serde_json::Value =
        serde_json::from_reader(std::fs::File::open(summary_path).unwrap()).unwrap();
    assert_eq!(summary["training"]["total_episodes"], 5);
    assert_eq!(summary["training"]["algorithm"], "q_learning");
    assert_eq!(summary["hyperparameters"]["alpha"], 0.1);
    assert_eq!(
        summary["training"]["episodes"].as_array().unwrap().len(),
        5
    );

    let metrics = &summary["metrics"];
    assert_eq!(metrics["episodes"], 5);
    assert_eq!(metrics["trailing_window"], 50);
    assert_eq!(metrics["mean_reward"], summary["training"]["mean_reward"]);
    assert_eq!(metrics["best_reward"], summary["training"]["best_reward"]);
}

#[test]
fn sarsa_training_uses_the_same_format() {
    let dir = TempDir::new().unwrap();
    let table_path = train_quietly(&dir, "sarsa");

    let table = MsgPackRepository::new().load(&table_path).unwrap();
    assert_eq!(table.shape(), (48, 4));
}

#[test]
fn train_rejects_invalid_hyperparameters() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("bad.msgpack");
    let args = TrainArgs::parse_from([
        "train",
        "sarsa",
        "--alpha",
        "0",
        "--quiet",
        "--output",
        output.to_str().unwrap(),
    ]);

    assert!(train::execute(args).is_err());
    assert!(!output.exists());
}

#[test]
fn evaluate_exports_results() {
    let dir = TempDir::new().unwrap();
    let table_path = train_quietly(&dir, "q-learning");
    let results = dir.path().join("eval.json");

    let args = EvaluateArgs::parse_from([
        "evaluate",
        table_path.to_str().unwrap(),
        "--episodes",
        "3",
        "--max-steps",
        "20",
        "--seed",
        "4",
        "--export",
        results.to_str().unwrap(),
    ]);
    evaluate::execute(args).unwrap();

    let result: serde_json::Value =
        serde_json::from_reader(std::fs::File::open(results).unwrap()).unwrap();
    let episodes = result["episodes"].as_array().unwrap();
    assert_eq!(episodes.len(), 3);
    assert!(
        episodes
            .iter()
            .all(|e| e["length"].as_u64().unwrap() <= 20)
    );
}

#[test]
fn evaluate_fails_on_missing_table() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.msgpack");
    let args = EvaluateArgs::parse_from(["evaluate", missing.to_str().unwrap()]);

    assert!(evaluate::execute(args).is_err());
}

#[test]
fn export_csv_has_one_row_per_state() {
    let dir = TempDir::new().unwrap();
    let table_path = train_quietly(&dir, "sarsa");
    let output = dir.path().join("table.csv");

    let args = ExportArgs::parse_from([
        "export",
        table_path.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);
    export::execute(args).unwrap();

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["state", "greedy_action", "max_q", "q_0", "q_1", "q_2", "q_3"]
    );
    let rows: Vec<_> = reader.records().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows.len(), 48);
    assert_eq!(&rows[47][0], "47");
}

#[test]
fn export_json_matches_table() {
    let dir = TempDir::new().unwrap();
    let table_path = train_quietly(&dir, "q-learning");
    let output = dir.path().join("table.json");

    let args = ExportArgs::parse_from([
        "export",
        table_path.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "-f",
        "json",
    ]);
    export::execute(args).unwrap();

    let table = MsgPackRepository::new().load(&table_path).unwrap();
    let document: serde_json::Value =
        serde_json::from_reader(std::fs::File::open(output).unwrap()).unwrap();
    assert_eq!(document["num_states"], 48);
    assert_eq!(document["num_actions"], 4);
    let greedy = document["greedy_actions"].as_array().unwrap();
    assert_eq!(greedy[36].as_u64().unwrap() as usize, table.greedy_action(36));
    assert_eq!(document["values"][36][1].as_f64().unwrap(), table.get(36, 1));
}
