//! Test doubles for the simulation service.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex};
use std::thread;

use axum::Router;

use pfr_client::{ClientError, ClientResult, ServiceInfo, SimulationBackend};
use pfr_params::SimulationRequest;
use pfr_results::SimulationResult;

pub fn three_point_result() -> SimulationResult {
    SimulationResult {
        axial_positions: vec![0.0, 2.5, 5.0],
        temperature_profile: vec![300.0, 310.0, 305.0],
        concentration_profile: vec![1.0, 0.6, 0.4],
        final_conversion_percent: 60.0,
        max_temperature: 310.0,
    }
}

pub fn info() -> ServiceInfo {
    ServiceInfo {
        message: "mock".to_string(),
        version: "test".to_string(),
    }
}

/// Answers every request immediately with a fixed outcome.
pub struct ScriptedBackend {
    outcome: ClientResult<SimulationResult>,
    pub requests: Mutex<Vec<SimulationRequest>>,
}

impl ScriptedBackend {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(three_point_result()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(err: ClientError) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(err),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<SimulationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl SimulationBackend for ScriptedBackend {
    fn simulate(&self, request: &SimulationRequest) -> ClientResult<SimulationResult> {
        self.requests.lock().unwrap().push(*request);
        self.outcome.clone()
    }

    fn service_info(&self) -> ClientResult<ServiceInfo> {
        Ok(info())
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

/// Holds each request until the test releases it with an outcome.
pub struct GatedBackend {
    started_tx: Mutex<Sender<SimulationRequest>>,
    release_rx: Mutex<Receiver<ClientResult<SimulationResult>>>,
}

pub struct Gate {
    pub started: Receiver<SimulationRequest>,
    pub release: Sender<ClientResult<SimulationResult>>,
}

impl GatedBackend {
    pub fn new() -> (Arc<Self>, Gate) {
        let (started_tx, started) = channel();
        let (release, release_rx) = channel();
        let backend = Arc::new(Self {
            started_tx: Mutex::new(started_tx),
            release_rx: Mutex::new(release_rx),
        });
        (backend, Gate { started, release })
    }
}

impl SimulationBackend for GatedBackend {
    fn simulate(&self, request: &SimulationRequest) -> ClientResult<SimulationResult> {
        let _ = self.started_tx.lock().unwrap().send(*request);
        self.release_rx
            .lock()
            .unwrap()
            .recv()
            .unwrap_or_else(|_| Err(ClientError::Transport {
                message: "gate closed".to_string(),
            }))
    }

    fn service_info(&self) -> ClientResult<ServiceInfo> {
        Ok(info())
    }

    fn describe(&self) -> String {
        "gated".to_string()
    }
}

/// Panics inside the worker thread.
pub struct PanickingBackend;

impl SimulationBackend for PanickingBackend {
    fn simulate(&self, _request: &SimulationRequest) -> ClientResult<SimulationResult> {
        panic!("backend exploded");
    }

    fn service_info(&self) -> ClientResult<ServiceInfo> {
        Ok(info())
    }

    fn describe(&self) -> String {
        "panicking".to_string()
    }
}

/// Serve `app` on an ephemeral localhost port from a background runtime and
/// return its base URL.
pub fn spawn_service(app: Router) -> String {
    let (tx, rx) = channel::<SocketAddr>();
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("tokio runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind mock service");
            tx.send(listener.local_addr().expect("local addr"))
                .expect("report address");
            axum::serve(listener, app).await.expect("serve mock service");
        });
    });
    let addr = rx.recv().expect("mock service address");
    format!("http://{addr}")
}

/// A localhost URL nothing is listening on.
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    let addr = listener.local_addr().expect("free port addr");
    drop(listener);
    format!("http://{addr}")
}
