//! Thin orchestration layer over an embedded DuckDB engine.
//!
//! Everything heavy (planning, storage, vectorized execution, cloud sync)
//! lives inside the wrapped engine; this crate only sequences calls into
//! it: opening sessions ([`Engine`]), running SQL ([`Session::query`]),
//! registering files and in-memory batches as relations, and driving
//! linear SQL pipelines ([`Pipeline`]).

pub mod cloud;
pub mod engine;
pub mod errors;
pub mod loader;
pub mod pipeline;
pub mod session;

pub use engine::{ConnectTarget, Engine};
pub use pipeline::{OutputFormat, Pipeline};
pub use session::{QueryOutput, Session};
