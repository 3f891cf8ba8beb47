use super::*;

use mallard_bench::EngineKind;

#[derive(Debug, Parser)]
pub struct BenchArgs {
    /// SQL to time.
    #[clap(short, long, value_parser)]
    pub query: String,

    /// Engine to run, repeatable. All engines when omitted.
    #[clap(long = "engine", value_enum)]
    pub engines: Vec<EngineArg>,

    /// CSV file registered before the query runs.
    #[clap(long, value_parser, requires = "table")]
    pub csv: Option<PathBuf>,

    /// Relation name for the CSV source.
    #[clap(long, value_parser, requires = "csv")]
    pub table: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EngineArg {
    Duckdb,
    Datafusion,
}

impl From<EngineArg> for EngineKind {
    fn from(value: EngineArg) -> EngineKind {
        match value {
            EngineArg::Duckdb => EngineKind::DuckDb,
            EngineArg::Datafusion => EngineKind::DataFusion,
        }
    }
}
