use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use mallard_exec::{Engine, OutputFormat, Session};

use crate::output::OutputMode;

mod bench;
mod load;
mod pipeline;
mod query;

pub use bench::BenchArgs;
pub use load::LoadArgs;
pub use pipeline::PipelineArgs;
pub use query::QueryArgs;

/// Connection options shared by every subcommand.
#[derive(Debug, Clone, Parser)]
pub struct ConnectionArgs {
    /// Optional file path for persisting data.
    ///
    /// An in-memory database is used when omitted.
    #[clap(short = 'f', long, value_parser)]
    pub data_file: Option<PathBuf>,

    /// Connect to the managed cloud database with this name.
    ///
    /// Requires the MOTHERDUCK_TOKEN environment variable.
    #[clap(long, conflicts_with = "data_file")]
    pub cloud: Option<String>,
}

impl ConnectionArgs {
    pub fn engine(&self) -> Engine {
        match (&self.cloud, &self.data_file) {
            (Some(database), _) => Engine::cloud(database.clone()),
            (None, Some(path)) => Engine::local(path),
            (None, None) => Engine::in_memory(),
        }
    }

    pub fn connect(&self) -> Result<Session> {
        Ok(self.engine().connect()?)
    }
}
