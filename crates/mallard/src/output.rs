//! Rendering materialized query results to stdout.

use std::fmt;
use std::io::{self, Write};

use anyhow::Result;
use clap::ValueEnum;
use mallard_exec::QueryOutput;
use serde_json::{Map, Value as JsonValue};

/// Display output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    #[default]
    Table,
    Json,
    Ndjson,
    Csv,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputMode::Table => "table",
            OutputMode::Json => "json",
            OutputMode::Ndjson => "ndjson",
            OutputMode::Csv => "csv",
        };
        f.write_str(name)
    }
}

pub fn print(output: &QueryOutput, mode: OutputMode) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Table => write_table(&mut out, output),
        OutputMode::Json => write_json(&mut out, output),
        OutputMode::Ndjson => write_ndjson(&mut out, output),
        OutputMode::Csv => write_csv(&mut out, output),
    }
}

fn row_object(output: &QueryOutput, row: &[JsonValue]) -> JsonValue {
    let mut object = Map::new();
    for (column, value) in output.columns.iter().zip(row) {
        object.insert(column.clone(), value.clone());
    }
    JsonValue::Object(object)
}

fn write_json(out: &mut impl Write, output: &QueryOutput) -> Result<()> {
    let rows: Vec<JsonValue> = output
        .rows
        .iter()
        .map(|row| row_object(output, row))
        .collect();
    writeln!(out, "{}", serde_json::to_string(&rows)?)?;
    Ok(())
}

fn write_ndjson(out: &mut impl Write, output: &QueryOutput) -> Result<()> {
    for row in &output.rows {
        writeln!(out, "{}", serde_json::to_string(&row_object(output, row))?)?;
    }
    Ok(())
}

fn write_csv(out: &mut impl Write, output: &QueryOutput) -> Result<()> {
    let header: Vec<String> = output.columns.iter().map(|c| csv_field(c)).collect();
    writeln!(out, "{}", header.join(","))?;
    for row in &output.rows {
        let fields: Vec<String> = row
            .iter()
            .map(|value| csv_field(&plain_value(value)))
            .collect();
        writeln!(out, "{}", fields.join(","))?;
    }
    Ok(())
}

fn write_table(out: &mut impl Write, output: &QueryOutput) -> Result<()> {
    let mut widths: Vec<usize> = output.columns.iter().map(|c| c.len()).collect();
    let rendered: Vec<Vec<String>> = output
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(idx, value)| {
                    let text = table_value(value);
                    if text.len() > widths[idx] {
                        widths[idx] = text.len();
                    }
                    text
                })
                .collect()
        })
        .collect();

    let header: Vec<String> = output
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| format!("{column:<width$}", width = widths[idx]))
        .collect();
    writeln!(out, "{}", header.join(" | ").trim_end())?;

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", separator.join("-+-"))?;

    for row in rendered {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(idx, cell)| format!("{cell:<width$}", width = widths[idx]))
            .collect();
        writeln!(out, "{}", cells.join(" | ").trim_end())?;
    }
    Ok(())
}

/// Quote a CSV field only when it contains a delimiter.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn plain_value(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn table_value(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "NULL".to_string(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
