//! One operator session: parameters, run lifecycle and the backend they talk to.

use std::sync::Arc;
use std::time::Duration;

use pfr_client::SimulationBackend;
use pfr_core::{Real, RequestId};
use pfr_params::{ParamField, ParameterStore, SimulationParameters};
use tracing::error;

use crate::controller::{Completion, FailureKind, RunFailure, RunState, SimulationController};
use crate::error::{AppError, AppResult};
use crate::worker::{RunWorker, Waker, WorkerPoll};

/// Owns the [`ParameterStore`] and the [`SimulationController`] and keeps at
/// most one [`RunWorker`] alive.
///
/// Front-ends call [`Session::poll`] from their event loop (or
/// [`Session::wait`] when they have nothing else to do) to fold the worker's
/// outcome back into the run state.
pub struct Session {
    params: ParameterStore,
    controller: SimulationController,
    backend: Arc<dyn SimulationBackend>,
    worker: Option<RunWorker>,
    waker: Option<Waker>,
}

impl Session {
    pub fn new(backend: Arc<dyn SimulationBackend>) -> Self {
        Self::with_parameters(backend, SimulationParameters::default())
    }

    pub fn with_parameters(
        backend: Arc<dyn SimulationBackend>,
        parameters: SimulationParameters,
    ) -> Self {
        Self {
            params: ParameterStore::new(parameters),
            controller: SimulationController::new(),
            backend,
            worker: None,
            waker: None,
        }
    }

    /// Callback invoked from the worker thread once an outcome is ready,
    /// e.g. to request a UI repaint.
    pub fn set_waker(&mut self, waker: Waker) {
        self.waker = Some(waker);
    }

    pub fn parameters(&self) -> SimulationParameters {
        self.params.parameters()
    }

    pub fn set_parameter(&mut self, field: ParamField, value: Real) -> Real {
        self.params.set_parameter(field, value)
    }

    pub fn reset_parameters(&mut self) {
        self.params.reset();
    }

    pub fn state(&self) -> &RunState {
        self.controller.state()
    }

    pub fn controller(&self) -> &SimulationController {
        &self.controller
    }

    pub fn backend(&self) -> &dyn SimulationBackend {
        self.backend.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.controller.is_running()
    }

    /// Start a run from the current parameters.
    ///
    /// Returns the new request id, or `None` if a run is already in flight.
    pub fn trigger_run(&mut self) -> Option<RequestId> {
        let ticket = self.controller.trigger_run(&self.params)?;
        match RunWorker::start(self.backend.clone(), ticket, self.waker.clone()) {
            Ok(worker) => self.worker = Some(worker),
            Err(err) => {
                error!(request_id = %ticket.id, "{err}");
                self.controller.on_failure(
                    ticket.id,
                    RunFailure::new(FailureKind::Worker, err.to_string()),
                );
            }
        }
        Some(ticket.id)
    }

    /// Fold a finished worker's outcome into the state without blocking.
    pub fn poll(&mut self) -> Option<Completion> {
        let poll = self.worker.as_ref()?.try_recv();
        self.settle(poll)
    }

    /// Block until the in-flight run settles.
    pub fn wait(&mut self) -> Option<Completion> {
        let poll = self.worker.as_ref()?.recv();
        self.settle(poll)
    }

    pub fn wait_timeout(&mut self, timeout: Duration) -> Option<Completion> {
        let poll = self.worker.as_ref()?.recv_timeout(timeout);
        self.settle(poll)
    }

    /// Trigger a run and block until it settles.
    pub fn run_to_completion(&mut self) -> AppResult<&RunState> {
        if self.trigger_run().is_none() {
            return Err(AppError::InvalidInput(
                "a simulation run is already in flight".to_string(),
            ));
        }
        while self.is_running() {
            if self.wait().is_none() {
                break;
            }
        }
        Ok(self.state())
    }

    fn settle(&mut self, poll: WorkerPoll) -> Option<Completion> {
        let completion = match poll {
            WorkerPoll::Pending => return None,
            WorkerPoll::Finished(msg) => self.controller.complete(msg.request_id, msg.outcome),
            WorkerPoll::Lost(id) => self.controller.on_failure(id, RunFailure::worker_lost()),
        };
        self.worker = None;
        Some(completion)
    }
}
