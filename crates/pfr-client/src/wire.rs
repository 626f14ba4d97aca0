//! JSON bodies exchanged with the simulation service.
//!
//! The request body is [`pfr_params::SimulationRequest`] itself. Responses are
//! decoded into [`SimulateResponseBody`] and checked for shape before they
//! become a [`SimulationResult`], so the projector only ever sees aligned,
//! non-empty profiles.

use pfr_core::{Tolerances, nearly_equal};
use pfr_results::SimulationResult;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Success body of `POST /simulate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateResponseBody {
    pub z_axis: Vec<f64>,
    pub temperature_profile: Vec<f64>,
    pub concentration_profile: Vec<f64>,
    pub final_conversion: f64,
    pub max_temperature: f64,
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    #[serde(default)]
    pub version: String,
}

impl SimulateResponseBody {
    /// Check array shapes and convert into a [`SimulationResult`].
    pub fn into_result(self) -> ClientResult<SimulationResult> {
        let n = self.z_axis.len();
        if n == 0 {
            return Err(ClientError::malformed("z_axis is empty"));
        }
        for (name, len) in [
            ("temperature_profile", self.temperature_profile.len()),
            ("concentration_profile", self.concentration_profile.len()),
        ] {
            if len != n {
                return Err(ClientError::malformed(format!(
                    "{name} has {len} samples but z_axis has {n}"
                )));
            }
        }

        let tol = Tolerances::default();
        if !nearly_equal(self.z_axis[0], 0.0, tol) {
            return Err(ClientError::malformed(format!(
                "z_axis must start at 0, got {}",
                self.z_axis[0]
            )));
        }
        if let Some(i) = self.z_axis.windows(2).position(|w| w[1] < w[0]) {
            return Err(ClientError::malformed(format!(
                "z_axis decreases at index {}",
                i + 1
            )));
        }

        Ok(SimulationResult {
            axial_positions: self.z_axis,
            temperature_profile: self.temperature_profile,
            concentration_profile: self.concentration_profile,
            final_conversion_percent: self.final_conversion,
            max_temperature: self.max_temperature,
        })
    }
}

/// Decode and validate a raw `POST /simulate` response body.
pub fn parse_simulate_response(text: &str) -> ClientResult<SimulationResult> {
    let body: SimulateResponseBody = serde_json::from_str(text)?;
    body.into_result()
}
