//! Wall-clock comparison of the embedded engine against a comparison
//! query library.
//!
//! One logical query, one untimed setup and one timed run per engine.
//! No warm-up control and no statistical repetition; callers wanting
//! distributions run the harness themselves.

pub mod errors;

mod case;
mod engines;
mod runner;

pub use case::{BenchCase, BenchSource};
pub use engines::{BenchTimes, EngineKind};
pub use runner::run_benchmarks;
