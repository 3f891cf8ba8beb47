use std::path::PathBuf;

/// A benchmark case: one query, optionally over a CSV source.
///
/// The source load is setup and runs untimed; only the query is timed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchCase {
    /// SQL to time.
    pub query: String,
    /// Optional source registered before the query runs.
    pub source: Option<BenchSource>,
}

/// A CSV file registered under a relation name for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchSource {
    pub path: PathBuf,
    pub table: String,
}

impl BenchCase {
    /// A standalone query with no source data.
    pub fn query(query: impl Into<String>) -> BenchCase {
        BenchCase {
            query: query.into(),
            source: None,
        }
    }

    /// A query over a CSV file registered as `table`.
    pub fn with_source(
        query: impl Into<String>,
        path: impl Into<PathBuf>,
        table: impl Into<String>,
    ) -> BenchCase {
        BenchCase {
            query: query.into(),
            source: Some(BenchSource {
                path: path.into(),
                table: table.into(),
            }),
        }
    }
}
