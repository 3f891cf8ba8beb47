use super::*;

#[derive(Debug, Parser)]
pub struct QueryArgs {
    /// Execute a query, exiting upon completion.
    #[clap(short, long, value_parser)]
    pub query: Option<String>,

    /// Execute the contents of an SQL file.
    ///
    /// When neither a query nor a file is given, the query is read from
    /// stdin.
    #[clap(long, value_parser)]
    pub file: Option<PathBuf>,

    /// Display output mode.
    #[clap(long, value_enum, default_value_t = OutputMode::Table)]
    pub mode: OutputMode,

    #[clap(flatten)]
    pub connection: ConnectionArgs,
}
