use std::io::Read as _;

use anyhow::{anyhow, Context, Result};
use clap::Subcommand;
use mallard_bench::{run_benchmarks, BenchCase, EngineKind};
use mallard_exec::loader::quote_ident;
use mallard_exec::Pipeline;

use crate::args::{BenchArgs, LoadArgs, PipelineArgs, QueryArgs};
use crate::output;

#[derive(Subcommand)]
pub enum Commands {
    /// Run a query against a local, file-backed, or cloud database.
    Query(QueryArgs),
    /// Load a CSV or Parquet file into a named table.
    Load(LoadArgs),
    /// Run an ordered list of SQL transformations from an input file to
    /// an output file.
    Pipeline(PipelineArgs),
    /// Time one query across engines.
    Bench(BenchArgs),
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Query(query) => query.run(),
            Commands::Load(load) => load.run(),
            Commands::Pipeline(pipeline) => pipeline.run(),
            Commands::Bench(bench) => bench.run(),
        }
    }
}

trait RunCommand {
    fn run(self) -> Result<()>;
}

impl RunCommand for QueryArgs {
    fn run(self) -> Result<()> {
        let query = match (self.query, self.file) {
            (Some(_), Some(_)) => {
                return Err(anyhow!(
                    "only one of a query or an SQL file can be passed at a time"
                ))
            }
            (Some(query), None) => query,
            (None, Some(file)) => std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read '{}'", file.display()))?,
            (None, None) => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };

        let session = self.connection.connect()?;
        let result = session.query(query.trim().trim_end_matches(';'))?;
        output::print(&result, self.mode)
    }
}

impl RunCommand for LoadArgs {
    fn run(self) -> Result<()> {
        let session = self.connection.connect()?;

        match self.source.extension().and_then(|ext| ext.to_str()) {
            Some("parquet") => session.load_parquet(&self.source, &self.table)?,
            _ => session.load_csv(&self.source, &self.table)?,
        }

        let count = session.query(&format!(
            "SELECT count(*) FROM {}",
            quote_ident(&self.table)
        ))?;
        let rows = count.scalar().and_then(|v| v.as_i64()).unwrap_or(0);
        println!("loaded {rows} rows into {}", self.table);
        Ok(())
    }
}

impl RunCommand for PipelineArgs {
    fn run(self) -> Result<()> {
        let session = self.connection.connect()?;
        let pipeline = Pipeline::new(self.input, self.output, self.format.into(), self.steps);
        pipeline.run(&session)?;
        Ok(())
    }
}

impl RunCommand for BenchArgs {
    fn run(self) -> Result<()> {
        let case = match (self.csv, self.table) {
            (Some(path), Some(table)) => BenchCase::with_source(self.query, path, table),
            _ => BenchCase::query(self.query),
        };

        let engines: Vec<EngineKind> = if self.engines.is_empty() {
            EngineKind::ALL.to_vec()
        } else {
            self.engines.iter().copied().map(EngineKind::from).collect()
        };

        let times = run_benchmarks(&case, &engines)?;
        for (engine, measured) in &times {
            println!(
                "{engine}\tsetup={}us\tquery={}us",
                measured.setup.as_micros(),
                measured.query.as_micros()
            );
        }
        Ok(())
    }
}
