//! In-process stand-in for the simulation service.

use std::net::SocketAddr;
use std::sync::mpsc;
use std::thread;

use axum::Router;

/// Serve `app` on an ephemeral localhost port from a background runtime and
/// return its base URL.
pub fn spawn_service(app: Router) -> String {
    let (tx, rx) = mpsc::channel::<SocketAddr>();
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
