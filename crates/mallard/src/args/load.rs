use super::*;

#[derive(Debug, Parser)]
pub struct LoadArgs {
    /// File to load. Parquet by extension, CSV otherwise.
    #[clap(value_parser)]
    pub source: PathBuf,

    /// Relation name to register the file under.
    #[clap(value_parser)]
    pub table: String,

    #[clap(flatten)]
    pub connection: ConnectionArgs,
}
