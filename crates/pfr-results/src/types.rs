//! Result data types.

use pfr_core::{Real, kelvin_to_celsius};
use serde::{Deserialize, Serialize};

/// Axial profiles returned by one successful simulation.
///
/// The three profiles are index-aligned along `axial_positions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Distance from the inlet [m].
    pub axial_positions: Vec<Real>,
    /// Fluid temperature [K].
    pub temperature_profile: Vec<Real>,
    /// Reactant concentration [mol/m³].
    pub concentration_profile: Vec<Real>,
    /// Reported by the service, not re-derived.
    pub final_conversion_percent: Real,
    /// Reported by the service, not re-derived.
    pub max_temperature: Real,
}

impl SimulationResult {
    /// Number of samples usable across all three profiles.
    pub fn sample_count(&self) -> usize {
        self.axial_positions
            .len()
            .min(self.temperature_profile.len())
            .min(self.concentration_profile.len())
    }

    pub fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }
}

/// One chart row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Axial position formatted with two decimals.
    pub position: String,
    /// Unformatted axial position [m], for numeric plot axes.
    pub position_m: Real,
    /// Temperature [K] rounded to one decimal.
    pub temperature: Real,
    /// Concentration [mol/m³] rounded to two decimals.
    pub concentration: Real,
}

/// Headline numbers shown next to the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub final_conversion_percent: Real,
    pub max_temperature: Real,
    pub inlet_temperature: Real,
    pub outlet_temperature: Real,
    pub inlet_concentration: Real,
    pub outlet_concentration: Real,
    pub sample_count: usize,
}

impl SummaryMetrics {
    pub fn max_temperature_celsius(&self) -> Real {
        kelvin_to_celsius(self.max_temperature)
    }

    /// Outlet minus inlet temperature [K].
    pub fn temperature_rise(&self) -> Real {
        self.outlet_temperature - self.inlet_temperature
    }
}
