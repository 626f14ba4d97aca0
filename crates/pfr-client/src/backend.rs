//! The seam between the run lifecycle and whatever computes the profiles.

use pfr_params::SimulationRequest;
use pfr_results::SimulationResult;

use crate::error::ClientResult;
use crate::wire::ServiceInfo;

/// A remote (or in-process) simulation service.
///
/// Calls block until the service answers or fails; the run worker invokes
/// them off the UI thread.
pub trait SimulationBackend: Send + Sync {
    /// Run one simulation and return a shape-checked result.
    fn simulate(&self, request: &SimulationRequest) -> ClientResult<SimulationResult>;

    /// Identify the service. Used as a reachability probe.
    fn service_info(&self) -> ClientResult<ServiceInfo>;

    /// Short human-readable location, e.g. the endpoint URL.
    fn describe(&self) -> String;
}
