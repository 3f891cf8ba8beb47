#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error(transparent)]
    Exec(#[from] mallard_exec::errors::ExecError),

    #[error(transparent)]
    DataFusion(#[from] datafusion::error::DataFusionError),

    #[error("failed to build comparison runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("unknown engine identifier: {0}")]
    UnknownEngine(String),
}

pub type Result<T, E = BenchError> = std::result::Result<T, E>;
