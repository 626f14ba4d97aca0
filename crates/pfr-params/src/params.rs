//! Parameter definitions, domains and the request snapshot.

use pfr_core::{CoreError, CoreResult, Real, ensure_finite, reactor};
use serde::{Deserialize, Serialize};

/// Closed domain and slider step of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: Real,
    pub max: Real,
    pub step: Real,
    pub unit: &'static str,
}

impl ParamRange {
    pub fn contains(&self, value: Real) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp a finite value into the domain. Non-finite input is returned as-is.
    pub fn clamp(&self, value: Real) -> Real {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            value
        }
    }
}

/// Selector for one field of [`SimulationParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamField {
    InletTemperature,
    FlowVelocity,
    JacketTemperature,
}

impl ParamField {
    pub const ALL: [ParamField; 3] = [
        ParamField::InletTemperature,
        ParamField::FlowVelocity,
        ParamField::JacketTemperature,
    ];

    pub fn range(self) -> ParamRange {
        match self {
            ParamField::InletTemperature => ParamRange {
                min: 273.0,
                max: 350.0,
                step: 1.0,
                unit: "K",
            },
            ParamField::FlowVelocity => ParamRange {
                min: 0.5,
                max: 5.0,
                step: 0.1,
                unit: "m/s",
            },
            ParamField::JacketTemperature => ParamRange {
                min: 250.0,
                max: 300.0,
                step: 1.0,
                unit: "K",
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ParamField::InletTemperature => "Inlet temperature",
            ParamField::FlowVelocity => "Flow velocity",
            ParamField::JacketTemperature => "Jacket temperature",
        }
    }

    /// Field name on the simulation service wire format.
    pub fn wire_name(self) -> &'static str {
        match self {
            ParamField::InletTemperature => "T_in",
            ParamField::FlowVelocity => "Flow_Velocity",
            ParamField::JacketTemperature => "T_jacket",
        }
    }

    pub fn is_temperature(self) -> bool {
        matches!(
            self,
            ParamField::InletTemperature | ParamField::JacketTemperature
        )
    }
}

/// Operator input for one simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    /// Inlet temperature [K].
    pub inlet_temperature: Real,
    /// Superficial flow velocity [m/s].
    pub flow_velocity: Real,
    /// Cooling jacket temperature [K].
    pub jacket_temperature: Real,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            inlet_temperature: 300.0,
            flow_velocity: 2.0,
            jacket_temperature: 280.0,
        }
    }
}

impl SimulationParameters {
    pub fn get(&self, field: ParamField) -> Real {
        match field {
            ParamField::InletTemperature => self.inlet_temperature,
            ParamField::FlowVelocity => self.flow_velocity,
            ParamField::JacketTemperature => self.jacket_temperature,
        }
    }

    pub(crate) fn slot_mut(&mut self, field: ParamField) -> &mut Real {
        match field {
            ParamField::InletTemperature => &mut self.inlet_temperature,
            ParamField::FlowVelocity => &mut self.flow_velocity,
            ParamField::JacketTemperature => &mut self.jacket_temperature,
        }
    }

    /// Check every field against its domain.
    pub fn validate(&self) -> CoreResult<()> {
        for field in ParamField::ALL {
            let value = ensure_finite(self.get(field), field.wire_name())?;
            let range = field.range();
            if !range.contains(value) {
                return Err(CoreError::OutOfRange {
                    what: field.wire_name(),
                    value,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }

    /// Residence time [s] over the fixed reactor length.
    pub fn residence_time_s(&self) -> Real {
        reactor::residence_time_s(self.flow_velocity)
    }
}

/// Immutable snapshot of the parameters taken when a run is triggered.
///
/// Serializes to the simulation service request body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    #[serde(rename = "T_in")]
    pub t_in: Real,
    #[serde(rename = "Flow_Velocity")]
    pub flow_velocity: Real,
    #[serde(rename = "T_jacket")]
    pub t_jacket: Real,
}

impl From<&SimulationParameters> for SimulationRequest {
    fn from(params: &SimulationParameters) -> Self {
        Self {
            t_in: params.inlet_temperature,
            flow_velocity: params.flow_velocity,
            t_jacket: params.jacket_temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_within_domain() {
        let params = SimulationParameters::default();
        assert_eq!(params.inlet_temperature, 300.0);
        assert_eq!(params.flow_velocity, 2.0);
        assert_eq!(params.jacket_temperature, 280.0);
        params.validate().unwrap();
    }

    #[test]
    fn validate_reports_offending_field() {
        let params = SimulationParameters {
            flow_velocity: 6.0,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(
            err,
            CoreError::OutOfRange {
                what: "Flow_Velocity",
                value: 6.0,
                min: 0.5,
                max: 5.0,
            }
        );
    }

    #[test]
    fn validate_rejects_nan() {
        let params = SimulationParameters {
            jacket_temperature: Real::NAN,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(CoreError::NonFinite { what: "T_jacket", .. })
        ));
    }

    #[test]
    fn request_uses_wire_field_names() {
        let request = SimulationRequest::from(&SimulationParameters::default());
        let json = serde_json::to_value(request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "T_in": 300.0, "Flow_Velocity": 2.0, "T_jacket": 280.0 })
        );
    }

    #[test]
    fn residence_time_at_minimum_velocity() {
        let params = SimulationParameters {
            flow_velocity: ParamField::FlowVelocity.range().min,
            ..Default::default()
        };
        assert_eq!(params.residence_time_s(), 10.0);
    }
}
