#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// Raised before any engine call is attempted.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Engine errors, propagated unchanged.
    #[error(transparent)]
    Duck(#[from] duckdb::Error),

    /// A pipeline step failed; the run was aborted with no output written.
    #[error("pipeline aborted at step {step}: {source}")]
    Pipeline {
        step: usize,
        source: Box<ExecError>,
    },
}

pub type Result<T, E = ExecError> = std::result::Result<T, E>;

macro_rules! config {
    ($($arg:tt)*) => {
        crate::errors::ExecError::Configuration(std::format!($($arg)*))
    };
}
pub(crate) use config;
