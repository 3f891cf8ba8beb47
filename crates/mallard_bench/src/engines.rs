use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use datafusion::prelude::{CsvReadOptions, SessionContext};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::case::BenchCase;
use crate::errors::{BenchError, Result};

/// Engines a case can be timed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    /// The embedded engine, through the same session path the rest of the
    /// workspace uses.
    DuckDb,
    /// The comparison query library, through its own CSV reader and SQL
    /// frontend.
    DataFusion,
}

impl EngineKind {
    pub const ALL: [EngineKind; 2] = [EngineKind::DuckDb, EngineKind::DataFusion];

    pub fn identifier(self) -> &'static str {
        match self {
            EngineKind::DuckDb => "duckdb",
            EngineKind::DataFusion => "datafusion",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for EngineKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<EngineKind> {
        match s {
            "duckdb" => Ok(EngineKind::DuckDb),
            "datafusion" => Ok(EngineKind::DataFusion),
            other => Err(BenchError::UnknownEngine(other.to_string())),
        }
    }
}

/// Times for one engine: untimed setup plus the single timed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchTimes {
    pub setup: Duration,
    pub query: Duration,
}

pub(crate) fn run_duckdb(case: &BenchCase) -> Result<BenchTimes> {
    let session = mallard_exec::Engine::in_memory().connect()?;

    let setup_start = Instant::now();
    if let Some(source) = &case.source {
        session.load_csv(&source.path, &source.table)?;
    }
    let setup = setup_start.elapsed();

    let output = session.query(&case.query)?;
    let query = output.elapsed;

    debug!(rows = output.row_count(), "duckdb run complete");
    Ok(BenchTimes { setup, query })
}

pub(crate) fn run_datafusion(case: &BenchCase) -> Result<BenchTimes> {
    // The comparison library is internally async; give it a runtime and
    // block, keeping the harness surface synchronous.
    let runtime = build_runtime()?;
    runtime.block_on(async {
        let ctx = SessionContext::new();

        let setup_start = Instant::now();
        if let Some(source) = &case.source {
            let path = source.path.to_string_lossy().into_owned();
            ctx.register_csv(source.table.as_str(), &path, CsvReadOptions::new())
                .await?;
        }
        let setup = setup_start.elapsed();

        let start = Instant::now();
        let batches = ctx.sql(&case.query).await?.collect().await?;
        let query = start.elapsed();

        debug!(batches = batches.len(), "datafusion run complete");
        Ok(BenchTimes { setup, query })
    })
}

fn build_runtime() -> Result<Runtime> {
    let runtime = Builder::new_current_thread().enable_all().build()?;
    Ok(runtime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_parse_back() {
        for kind in EngineKind::ALL {
            assert_eq!(kind.identifier().parse::<EngineKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        let err = "pandas".parse::<EngineKind>().unwrap_err();
        assert!(matches!(err, BenchError::UnknownEngine(_)));
    }
}
