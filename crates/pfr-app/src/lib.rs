//! Shared application service layer for the PFR simulator front-ends.
//!
//! This crate owns the simulation-request lifecycle for both the CLI and the
//! GUI: the [`SimulationController`] state machine, the background
//! [`RunWorker`] that performs the remote call, and the [`Session`] that ties
//! them to a [`pfr_params::ParameterStore`].

pub mod controller;
pub mod error;
pub mod session;
pub mod worker;

// Re-export key types for convenience
pub use controller::{
    Completion, FailureKind, RunFailure, RunReport, RunState, RunTicket, SimulationController,
};
pub use error::{AppError, AppResult};
pub use session::Session;
pub use worker::{RunWorker, Waker, WorkerMessage, WorkerPoll};
