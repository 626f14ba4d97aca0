//! pfr-results: simulation result data and its display projection.

pub mod export;
pub mod projector;
pub mod types;

pub use export::{chart_series_csv, write_chart_series_csv};
pub use projector::{summary_metrics, to_chart_series};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("Simulation result has no samples")]
    EmptyResult,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
