//! Run lifecycle through a full session with in-process backends.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use common::{GatedBackend, PanickingBackend, ScriptedBackend, three_point_result};
use pfr_app::{AppError, Completion, FailureKind, RunState, Session};
use pfr_client::ClientError;
use pfr_params::{ParamField, SimulationParameters};
use pfr_results::summary_metrics;

const WAIT: Duration = Duration::from_secs(5);

#[test]
fn successful_run_yields_expected_summary() {
    let backend = ScriptedBackend::succeeding();
    let mut session = Session::new(backend.clone());

    let state = session.run_to_completion().unwrap();
    let result = state.result().expect("succeeded");
    let summary = summary_metrics(result).unwrap();

    assert_eq!(summary.inlet_temperature, 300.0);
    assert_eq!(summary.outlet_temperature, 305.0);
    assert_eq!(summary.max_temperature, 310.0);
    assert_eq!(summary.final_conversion_percent, 60.0);
    assert_eq!(summary.sample_count, 3);

    let seen = backend.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].t_in, 300.0);
    assert_eq!(seen[0].flow_velocity, 2.0);
    assert_eq!(seen[0].t_jacket, 280.0);
}

#[test]
fn trigger_is_running_before_completion() {
    let (backend, gate) = GatedBackend::new();
    let mut session = Session::new(backend);

    let id = session.trigger_run().unwrap();
    assert_eq!(session.state(), &RunState::Running);
    assert!(session.poll().is_none());

    gate.started.recv_timeout(WAIT).unwrap();
    gate.release.send(Ok(three_point_result())).unwrap();

    match session.wait_timeout(WAIT) {
        Some(Completion::Applied(report)) => assert_eq!(report.request_id, id),
        other => panic!("expected applied completion, got {other:?}"),
    }
    assert!(session.state().result().is_some());
}

#[test]
fn second_trigger_while_running_is_ignored() {
    let (backend, gate) = GatedBackend::new();
    let mut session = Session::new(backend);

    let first = session.trigger_run().unwrap();
    assert!(session.trigger_run().is_none());
    assert!(matches!(
        session.run_to_completion(),
        Err(AppError::InvalidInput(_))
    ));

    gate.started.recv_timeout(WAIT).unwrap();
    // Only one request reached the backend.
    assert!(gate.started.try_recv().is_err());

    gate.release.send(Ok(three_point_result())).unwrap();
    let completion = session.wait_timeout(WAIT).unwrap();
    assert!(completion.is_applied());
    assert_eq!(
        session.controller().last_report().unwrap().request_id,
        first
    );
}

#[test]
fn edits_while_running_only_affect_next_request() {
    let (backend, gate) = GatedBackend::new();
    let mut session = Session::new(backend);

    session.trigger_run().unwrap();
    let in_flight = gate.started.recv_timeout(WAIT).unwrap();

    session.set_parameter(ParamField::InletTemperature, 330.0);
    assert_eq!(in_flight.t_in, 300.0);
    assert_eq!(
        session.controller().in_flight().unwrap().request.t_in,
        300.0
    );

    gate.release.send(Ok(three_point_result())).unwrap();
    session.wait_timeout(WAIT).unwrap();

    session.trigger_run().unwrap();
    let next = gate.started.recv_timeout(WAIT).unwrap();
    assert_eq!(next.t_in, 330.0);

    gate.release.send(Ok(three_point_result())).unwrap();
    session.wait_timeout(WAIT).unwrap();
    assert_eq!(session.controller().last_report().unwrap().request.t_in, 330.0);
}

#[test]
fn transport_failure_then_retrigger_clears_error() {
    let backend = ScriptedBackend::failing(ClientError::Transport {
        message: "connection refused".to_string(),
    });
    let mut session = Session::new(backend);

    let state = session.run_to_completion().unwrap();
    let failure = state.failure().expect("failed");
    assert_eq!(failure.kind, FailureKind::Transport);
    assert!(!failure.message.is_empty());
    assert!(failure.message.contains("connection refused"));

    session.trigger_run().unwrap();
    assert_eq!(session.state(), &RunState::Running);
    assert!(session.state().failure().is_none());

    session.wait_timeout(WAIT).unwrap();
    assert!(session.state().failure().is_some());
}

#[test]
fn failure_replaces_previous_result() {
    let (backend, gate) = GatedBackend::new();
    let mut session = Session::new(backend);

    session.trigger_run().unwrap();
    gate.started.recv_timeout(WAIT).unwrap();
    gate.release.send(Ok(three_point_result())).unwrap();
    session.wait_timeout(WAIT).unwrap();
    assert!(session.state().result().is_some());

    session.trigger_run().unwrap();
    gate.started.recv_timeout(WAIT).unwrap();
    gate.release
        .send(Err(ClientError::Status {
            status: 503,
            body: "busy".to_string(),
        }))
        .unwrap();
    session.wait_timeout(WAIT).unwrap();

    assert!(session.state().result().is_none());
    let failure = session.state().failure().unwrap();
    assert_eq!(failure.kind, FailureKind::Status);
    assert!(failure.message.contains("503"));
}

#[test]
fn panicking_worker_is_reported_as_failure() {
    let mut session = Session::new(Arc::new(PanickingBackend));

    let state = session.run_to_completion().unwrap();
    assert_eq!(state.failure().unwrap().kind, FailureKind::Worker);
    assert!(!session.is_running());
}

#[test]
fn waker_fires_when_outcome_is_ready() {
    let backend = ScriptedBackend::succeeding();
    let mut session = Session::new(backend);
    let wakes = Arc::new(AtomicUsize::new(0));
    let counter = wakes.clone();
    session.set_waker(Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    session.run_to_completion().unwrap();
    // The waker runs after the send, so give the worker a moment to finish.
    for _ in 0..100 {
        if wakes.load(Ordering::SeqCst) > 0 {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(wakes.load(Ordering::SeqCst), 1);
}

#[test]
fn session_clamps_initial_parameters() {
    let session = Session::with_parameters(
        ScriptedBackend::succeeding(),
        SimulationParameters {
            inlet_temperature: 400.0,
            flow_velocity: 0.5,
            jacket_temperature: 250.0,
        },
    );
    let params = session.parameters();
    assert_eq!(params.inlet_temperature, 350.0);
    assert_eq!(params.residence_time_s(), 10.0);
}
