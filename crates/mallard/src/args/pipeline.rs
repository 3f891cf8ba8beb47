use super::*;

#[derive(Debug, Parser)]
pub struct PipelineArgs {
    /// Input file (CSV, or Parquet by extension).
    #[clap(long, value_parser)]
    pub input: PathBuf,

    /// Output file written from the final staged relation.
    #[clap(long, value_parser)]
    pub output: PathBuf,

    /// SQL transformation, repeatable; each step reads the previous
    /// step's result as the relation `staged`.
    #[clap(long = "step", value_parser)]
    pub steps: Vec<String>,

    /// Output file format.
    #[clap(long, value_enum, default_value_t = FormatArg::Parquet)]
    pub format: FormatArg,

    #[clap(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Parquet,
    Csv,
}

impl std::fmt::Display for FormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FormatArg::Parquet => "parquet",
            FormatArg::Csv => "csv",
        })
    }
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> OutputFormat {
        match value {
            FormatArg::Parquet => OutputFormat::Parquet,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}
