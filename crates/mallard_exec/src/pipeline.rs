//! Linear SQL pipelines between an input file and an output file.
//!
//! Each step reads the previous step's result under the fixed name
//! [`STAGED_RELATION`]. There is no dependency resolution, no branching,
//! no retry: a failing step aborts the run before the output is written.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::{config, ExecError, Result};
use crate::loader::{quote_ident, quote_literal};
use crate::session::Session;

/// Name under which each step sees the previous step's result.
pub const STAGED_RELATION: &str = "staged";

/// Output formats supported by the final `COPY ... TO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Parquet,
    Csv,
}

impl OutputFormat {
    fn copy_options(self) -> &'static str {
        match self {
            OutputFormat::Parquet => "(FORMAT PARQUET)",
            OutputFormat::Csv => "(FORMAT CSV, HEADER)",
        }
    }
}

/// An ordered list of SQL transformations plus input and output paths.
///
/// Immutable once constructed and consumed linearly by [`Pipeline::run`].
#[derive(Debug, Clone)]
pub struct Pipeline {
    input: PathBuf,
    output: PathBuf,
    format: OutputFormat,
    steps: Vec<String>,
}

impl Pipeline {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        format: OutputFormat,
        steps: Vec<String>,
    ) -> Pipeline {
        Pipeline {
            input: input.into(),
            output: output.into(),
            format,
            steps,
        }
    }

    /// Run every step in order and write the final relation to the output
    /// path.
    ///
    /// With zero steps the input is copied to the output unchanged. Any
    /// failing step aborts the whole run; no output file is produced and
    /// nothing beyond the engine's own temporary state is cleaned up.
    pub fn run(&self, session: &Session) -> Result<()> {
        if !self.input.exists() {
            return Err(config!(
                "pipeline input does not exist: {}",
                self.input.display()
            ));
        }

        stage(session, 0, &format!("SELECT * FROM {}", read_call(&self.input)))?;

        for (idx, step) in self.steps.iter().enumerate() {
            let step_number = idx + 1;
            stage(session, step_number, step).map_err(|source| ExecError::Pipeline {
                step: step_number,
                source: Box::new(source),
            })?;
        }

        session.execute_batch(&format!(
            "COPY {} TO {} {}",
            quote_ident(STAGED_RELATION),
            quote_literal(&self.output.display().to_string()),
            self.format.copy_options(),
        ))?;

        info!(
            input = %self.input.display(),
            output = %self.output.display(),
            steps = self.steps.len(),
            "pipeline finished"
        );
        Ok(())
    }
}

/// Materialize `sql` as stage `n`, then repoint the staged relation at it.
///
/// The staged name is a view, so a step reads the previous stage's table
/// while its own result is materialized under a new one.
fn stage(session: &Session, n: usize, sql: &str) -> Result<()> {
    let table = format!("__mallard_stage_{n}");
    session.execute_batch(&format!("CREATE OR REPLACE TABLE {table} AS {sql}"))?;
    session.execute_batch(&format!(
        "CREATE OR REPLACE VIEW {} AS SELECT * FROM {table}",
        quote_ident(STAGED_RELATION),
    ))?;
    Ok(())
}

fn read_call(path: &Path) -> String {
    let literal = quote_literal(&path.display().to_string());
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("parquet") => format!("read_parquet({literal})"),
        _ => format!("read_csv_auto({literal})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use serde_json::json;

    fn connect() -> Session {
        Engine::in_memory().connect().unwrap()
    }

    fn write_input(dir: &Path) -> PathBuf {
        let path = dir.join("input.csv");
        std::fs::write(
            &path,
            "category,amount\nwidgets,10\nwidgets,5\ngadgets,2\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn zero_steps_copies_input_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let output = dir.path().join("output.csv");

        let pipeline = Pipeline::new(&input, &output, OutputFormat::Csv, vec![]);
        pipeline.run(&connect()).unwrap();

        let check = connect();
        let out = check
            .query(&format!(
                "SELECT category, amount FROM read_csv_auto({}) ORDER BY amount",
                quote_literal(&output.display().to_string())
            ))
            .unwrap();
        assert_eq!(out.row_count(), 3);
        assert_eq!(out.rows[0], vec![json!("gadgets"), json!(2)]);
        assert_eq!(out.rows[2], vec![json!("widgets"), json!(10)]);
    }

    #[test]
    fn steps_consume_the_staged_relation_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let output = dir.path().join("totals.parquet");

        let pipeline = Pipeline::new(
            &input,
            &output,
            OutputFormat::Parquet,
            vec![
                "SELECT category, CAST(sum(amount) AS BIGINT) AS total \
                 FROM staged GROUP BY category"
                    .to_string(),
                "SELECT category, total FROM staged WHERE total > 5 ORDER BY total DESC"
                    .to_string(),
            ],
        );
        pipeline.run(&connect()).unwrap();

        let check = connect();
        let out = check
            .query(&format!(
                "SELECT category, total FROM read_parquet({})",
                quote_literal(&output.display().to_string())
            ))
            .unwrap();
        assert_eq!(out.rows, vec![vec![json!("widgets"), json!(15)]]);
    }

    #[test]
    fn undefined_relation_aborts_without_an_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let output = dir.path().join("never.parquet");

        let pipeline = Pipeline::new(
            &input,
            &output,
            OutputFormat::Parquet,
            vec!["SELECT * FROM no_such_relation".to_string()],
        );
        let err = pipeline.run(&connect()).unwrap_err();

        assert!(matches!(err, ExecError::Pipeline { step: 1, .. }));
        assert!(!output.exists());
    }

    #[test]
    fn missing_input_fails_before_the_engine() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(
            dir.path().join("absent.csv"),
            dir.path().join("out.parquet"),
            OutputFormat::Parquet,
            vec![],
        );
        let err = pipeline.run(&connect()).unwrap_err();
        assert!(matches!(err, ExecError::Configuration(_)));
    }
}
