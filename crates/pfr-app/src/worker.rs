use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError, channel};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use pfr_client::{ClientResult, SimulationBackend};
use pfr_core::RequestId;
use pfr_results::SimulationResult;

use crate::controller::RunTicket;
use crate::error::{AppError, AppResult};

/// Called from the worker thread after it has posted its message.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Performs one remote call on a background thread.
pub struct RunWorker {
    request_id: RequestId,
    rx: Receiver<WorkerMessage>,
    _handle: JoinHandle<()>,
}

#[derive(Debug)]
pub struct WorkerMessage {
    pub request_id: RequestId,
    pub outcome: ClientResult<SimulationResult>,
}

#[derive(Debug)]
pub enum WorkerPoll {
    Pending,
    Finished(WorkerMessage),
    /// The thread ended without sending anything (it panicked).
    Lost(RequestId),
}

impl RunWorker {
    pub fn start(
        backend: Arc<dyn SimulationBackend>,
        ticket: RunTicket,
        waker: Option<Waker>,
    ) -> AppResult<Self> {
        let (tx, rx) = channel();
        let request_id = ticket.id;

        let handle = thread::Builder::new()
            .name(format!("pfr-run-{}", request_id.get()))
            .spawn(move || {
                let outcome = backend.simulate(&ticket.request);
                let _ = tx.send(WorkerMessage {
                    request_id,
                    outcome,
                });
                if let Some(wake) = waker {
                    wake();
                }
            })
            .map_err(|e| AppError::Worker(format!("failed to spawn run worker: {e}")))?;

        Ok(Self {
            request_id,
            rx,
            _handle: handle,
        })
    }

    /// Non-blocking check for the outcome.
    pub fn try_recv(&self) -> WorkerPoll {
        match self.rx.try_recv() {
            Ok(msg) => WorkerPoll::Finished(msg),
            Err(TryRecvError::Empty) => WorkerPoll::Pending,
            Err(TryRecvError::Disconnected) => WorkerPoll::Lost(self.request_id),
        }
    }

    /// Block until the outcome arrives.
    pub fn recv(&self) -> WorkerPoll {
        match self.rx.recv() {
            Ok(msg) => WorkerPoll::Finished(msg),
            Err(_) => WorkerPoll::Lost(self.request_id),
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> WorkerPoll {
        match self.rx.recv_timeout(timeout) {
            Ok(msg) => WorkerPoll::Finished(msg),
            Err(RecvTimeoutError::Timeout) => WorkerPoll::Pending,
            Err(RecvTimeoutError::Disconnected) => WorkerPoll::Lost(self.request_id),
        }
    }
}
