//! Simulation request lifecycle.
//!
//! ```text
//!   Idle ──trigger──▶ Running ──success──▶ Succeeded ─┐
//!                       ▲   └───failure──▶ Failed ────┤
//!                       └──────────trigger────────────┘
//! ```
//!
//! The controller is the only writer of [`RunState`]. It never performs I/O
//! itself: [`SimulationController::trigger_run`] hands out a [`RunTicket`] and
//! the caller reports the outcome back with the ticket's id. Outcomes for any
//! id other than the one currently in flight are discarded as stale.

use std::time::Instant;

use chrono::{DateTime, Utc};
use pfr_client::ClientError;
use pfr_core::{RequestId, RequestIdGen};
use pfr_params::{ParameterStore, SimulationRequest};
use pfr_results::SimulationResult;
use tracing::{debug, info, warn};

/// What the UI renders from. Exactly one variant holds at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Succeeded(SimulationResult),
    Failed(RunFailure),
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    pub fn result(&self) -> Option<&SimulationResult> {
        match self {
            RunState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&RunFailure> {
        match self {
            RunState::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RunState::Idle => "Idle",
            RunState::Running => "Running",
            RunState::Succeeded(_) => "Succeeded",
            RunState::Failed(_) => "Failed",
        }
    }
}

/// Coarse classification of a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Service unreachable or connection dropped.
    Transport,
    Timeout,
    /// Service answered with a non-success status.
    Status,
    /// Service answered but the body was unusable.
    Malformed,
    /// Client-side setup problem (bad URL, bad config).
    Config,
    /// The background worker stopped without reporting.
    Worker,
}

impl From<&ClientError> for FailureKind {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Transport { .. } => FailureKind::Transport,
            ClientError::Timeout { .. } => FailureKind::Timeout,
            ClientError::Status { .. } => FailureKind::Status,
            ClientError::Malformed { .. } => FailureKind::Malformed,
            ClientError::InvalidUrl { .. }
            | ClientError::ConfigRead { .. }
            | ClientError::Config(_) => FailureKind::Config,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunFailure {
    pub kind: FailureKind,
    /// User-facing text, always non-empty.
    pub message: String,
}

impl RunFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            "Simulation failed".to_string()
        } else {
            message
        };
        Self { kind, message }
    }

    pub fn from_client_error(err: &ClientError) -> Self {
        Self::new(FailureKind::from(err), format!("Simulation error: {err}"))
    }

    pub fn worker_lost() -> Self {
        Self::new(
            FailureKind::Worker,
            "Simulation error: run worker stopped without reporting a result",
        )
    }
}

/// Issued by a successful trigger; identifies the request the caller must
/// report back on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunTicket {
    pub id: RequestId,
    pub request: SimulationRequest,
}

/// Bookkeeping for the request currently in flight.
#[derive(Debug, Clone)]
struct InFlight {
    id: RequestId,
    request: SimulationRequest,
    started: Instant,
}

/// Summary of one finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub request_id: RequestId,
    pub request: SimulationRequest,
    pub succeeded: bool,
    pub elapsed_s: f64,
    pub finished_at: DateTime<Utc>,
}

/// Outcome of reporting a completion to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The completion belonged to the in-flight request and changed the state.
    Applied(RunReport),
    /// The completion was for a superseded or unknown request and was dropped.
    Stale { request_id: RequestId },
}

impl Completion {
    pub fn is_applied(&self) -> bool {
        matches!(self, Completion::Applied(_))
    }
}

#[derive(Debug, Default)]
pub struct SimulationController {
    state: RunState,
    ids: RequestIdGen,
    in_flight: Option<InFlight>,
    last_report: Option<RunReport>,
}

impl SimulationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// The request snapshot currently being computed, if any.
    pub fn in_flight(&self) -> Option<RunTicket> {
        self.in_flight.as_ref().map(|f| RunTicket {
            id: f.id,
            request: f.request,
        })
    }

    pub fn last_report(&self) -> Option<&RunReport> {
        self.last_report.as_ref()
    }

    /// Snapshot the parameters and enter `Running`.
    ///
    /// Returns `None` without any state change when a run is already in
    /// flight.
    pub fn trigger_run(&mut self, params: &ParameterStore) -> Option<RunTicket> {
        if self.is_running() {
            debug!("trigger ignored: a run is already in flight");
            return None;
        }

        let id = self.ids.next_id();
        let request = params.snapshot();
        self.in_flight = Some(InFlight {
            id,
            request,
            started: Instant::now(),
        });
        self.state = RunState::Running;
        info!(request_id = %id, ?request, "simulation run triggered");

        Some(RunTicket { id, request })
    }

    pub fn on_success(&mut self, id: RequestId, result: SimulationResult) -> Completion {
        match self.take_in_flight(id) {
            Some(flight) => {
                info!(request_id = %id, samples = result.sample_count(), "simulation run succeeded");
                self.state = RunState::Succeeded(result);
                self.finish(flight, true)
            }
            None => Completion::Stale { request_id: id },
        }
    }

    pub fn on_failure(&mut self, id: RequestId, failure: RunFailure) -> Completion {
        match self.take_in_flight(id) {
            Some(flight) => {
                warn!(request_id = %id, kind = ?failure.kind, message = %failure.message, "simulation run failed");
                self.state = RunState::Failed(failure);
                self.finish(flight, false)
            }
            None => Completion::Stale { request_id: id },
        }
    }

    /// Route a remote-call outcome to [`Self::on_success`] or [`Self::on_failure`].
    pub fn complete(
        &mut self,
        id: RequestId,
        outcome: Result<SimulationResult, ClientError>,
    ) -> Completion {
        match outcome {
            Ok(result) => self.on_success(id, result),
            Err(err) => self.on_failure(id, RunFailure::from_client_error(&err)),
        }
    }

    fn take_in_flight(&mut self, id: RequestId) -> Option<InFlight> {
        let matches = self.is_running() && self.in_flight.as_ref().is_some_and(|f| f.id == id);
        if matches {
            self.in_flight.take()
        } else {
            debug!(request_id = %id, "discarding stale completion");
            None
        }
    }

    fn finish(&mut self, flight: InFlight, succeeded: bool) -> Completion {
        let report = RunReport {
            request_id: flight.id,
            request: flight.request,
            succeeded,
            elapsed_s: flight.started.elapsed().as_secs_f64(),
            finished_at: Utc::now(),
        };
        self.last_report = Some(report.clone());
        Completion::Applied(report)
    }
}
