//! Pure projection of a [`SimulationResult`] into chart and KPI data.
//!
//! Nothing here caches: callers re-project from the latest result each time
//! they render.

use pfr_core::{format_fixed, round_to};

use crate::types::{ChartPoint, SimulationResult, SummaryMetrics};
use crate::{ResultsError, ResultsResult};

const POSITION_DECIMALS: usize = 2;
const TEMPERATURE_DECIMALS: u32 = 1;
const CONCENTRATION_DECIMALS: u32 = 2;

/// One [`ChartPoint`] per sample, in axial order.
///
/// An empty result projects to an empty series.
pub fn to_chart_series(result: &SimulationResult) -> Vec<ChartPoint> {
    let n = result.sample_count();
    (0..n)
        .map(|i| {
            let z = result.axial_positions[i];
            ChartPoint {
                position: format_fixed(round_to(z, POSITION_DECIMALS as u32), POSITION_DECIMALS),
                position_m: z,
                temperature: round_to(result.temperature_profile[i], TEMPERATURE_DECIMALS),
                concentration: round_to(result.concentration_profile[i], CONCENTRATION_DECIMALS),
            }
        })
        .collect()
}

/// Inlet/outlet values plus the service-reported KPIs.
///
/// Fails with [`ResultsError::EmptyResult`] when there are no samples.
pub fn summary_metrics(result: &SimulationResult) -> ResultsResult<SummaryMetrics> {
    let n = result.sample_count();
    if n == 0 {
        return Err(ResultsError::EmptyResult);
    }
    let last = n - 1;

    Ok(SummaryMetrics {
        final_conversion_percent: result.final_conversion_percent,
        max_temperature: result.max_temperature,
        inlet_temperature: result.temperature_profile[0],
        outlet_temperature: result.temperature_profile[last],
        inlet_concentration: result.concentration_profile[0],
        outlet_concentration: result.concentration_profile[last],
        sample_count: n,
    })
}
