//! Export command - Export a saved Q-table as CSV or JSON

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::{adapters::MsgPackRepository, ports::QTableRepository, q_learning::QTable};

#[derive(Parser, Debug)]
#[command(about = "Export a Q-table in various formats")]
pub struct ExportArgs {
    /// Path to a saved Q-table
    pub table: PathBuf,

    /// Output file path
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Export format
    #[arg(long, short = 'f', value_enum, default_value = "csv")]
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// One row per state: state, greedy action, max Q, then every Q-value
    Csv,
    /// Nested array of rows
    Json,
}

#[derive(Debug, Serialize)]
struct JsonTable<'a> {
    num_states: usize,
    num_actions: usize,
    greedy_actions: Vec<usize>,
    values: Vec<&'a [f64]>,
}

pub fn execute(args: ExportArgs) -> Result<()> {
    let table = MsgPackRepository::new()
        .load(&args.table)
        .with_context(|| format!("Failed to load Q-table from {}", args.table.display()))?;

    match args.format {
        ExportFormat::Csv => write_csv(&table, &args.output)
            .with_context(|| format!("Failed to write CSV to {}", args.output.display()))?,
        ExportFormat::Json => write_json(&table, &args.output)?,
    }

    println!(
        "✓ Q-table ({} x {}) exported to: {}",
        table.num_states(),
        table.num_actions(),
        args.output.display()
    );
    Ok(())
}

/// Write one CSV row per state.
pub fn write_csv(table: &QTable, output: &Path) -> crate::Result<()> {
    let mut writer = csv::Writer::from_path(output)?;

    let mut header = vec![
        "state".to_string(),
        "greedy_action".to_string(),
        "max_q".to_string(),
    ];
    header.extend((0..table.num_actions()).map(|a| format!("q_{a}")));
    writer.write_record(&header)?;

    for (state, row) in table.rows().enumerate() {
        let mut record = vec![
            state.to_string(),
            table.greedy_action(state).to_string(),
            table.max_q(state).to_string(),
        ];
        record.extend(row.iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

fn write_json(table: &QTable, output: &Path) -> Result<()> {
    let document = JsonTable {
        num_states: table.num_states(),
        num_actions: table.num_actions(),
        greedy_actions: (0..table.num_states())
            .map(|s| table.greedy_action(s))
            .collect(),
        values: table.rows().collect(),
    };

    let file =
        File::create(output).with_context(|| format!("Failed to create {}", output.display()))?;
    serde_json::to_writer_pretty(file, &document)?;
    Ok(())
}
