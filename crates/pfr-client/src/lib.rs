//! pfr-client: boundary to the remote PFR simulation service.
//!
//! - [`SimulationBackend`] is the seam the run worker calls through
//! - [`HttpBackend`] talks JSON over HTTP to the service
//! - [`wire`] holds the request/response bodies and response validation
//! - [`ClientConfig`] carries the service URL and transport timeout

pub mod backend;
pub mod config;
pub mod error;
pub mod http;
pub mod wire;

pub use backend::SimulationBackend;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpBackend;
pub use wire::{ServiceInfo, SimulateResponseBody, parse_simulate_response};
