//! Owner of the current [`SimulationParameters`].

use pfr_core::Real;
use tracing::{debug, warn};

use crate::params::{ParamField, SimulationParameters, SimulationRequest};

/// Holds the operator's current input.
///
/// Writes go through [`ParameterStore::set_parameter`], which clamps finite
/// values into the field's domain and ignores non-finite ones, so the stored
/// parameters are always within range.
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    current: SimulationParameters,
}

impl ParameterStore {
    pub fn new(initial: SimulationParameters) -> Self {
        let mut store = Self::default();
        for field in ParamField::ALL {
            store.set_parameter(field, initial.get(field));
        }
        store
    }

    pub fn parameters(&self) -> SimulationParameters {
        self.current
    }

    pub fn get(&self, field: ParamField) -> Real {
        self.current.get(field)
    }

    /// Replace one field and return the value actually stored.
    pub fn set_parameter(&mut self, field: ParamField, value: Real) -> Real {
        let slot = self.current.slot_mut(field);
        if !value.is_finite() {
            warn!(field = field.wire_name(), value, "ignoring non-finite parameter");
            return *slot;
        }

        let stored = field.range().clamp(value);
        if stored != value {
            debug!(
                field = field.wire_name(),
                requested = value,
                stored,
                "parameter clamped into domain"
            );
        }
        *slot = stored;
        stored
    }

    pub fn reset(&mut self) {
        self.current = SimulationParameters::default();
    }

    pub fn snapshot(&self) -> SimulationRequest {
        SimulationRequest::from(&self.current)
    }
}
