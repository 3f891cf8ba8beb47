use std::collections::BTreeMap;

use tracing::info;

use crate::case::BenchCase;
use crate::engines::{run_datafusion, run_duckdb, BenchTimes, EngineKind};
use crate::errors::Result;

/// Run `case` once through each engine's idiomatic path.
///
/// Engines run in the order given, each with a fresh context. Returns a
/// mapping from engine identifier to elapsed times. Errors from any
/// engine abort the whole run.
pub fn run_benchmarks(
    case: &BenchCase,
    engines: &[EngineKind],
) -> Result<BTreeMap<String, BenchTimes>> {
    let mut times = BTreeMap::new();
    for kind in engines {
        let result = match kind {
            EngineKind::DuckDb => run_duckdb(case)?,
            EngineKind::DataFusion => run_datafusion(case)?,
        };
        info!(
            engine = %kind,
            setup_us = result.setup.as_micros() as u64,
            query_us = result.query.as_micros() as u64,
            "benchmark run"
        );
        times.insert(kind.identifier().to_string(), result);
    }
    Ok(times)
}
