//! pfr-params: the operator-editable simulation input.
//!
//! [`ParameterStore`] is the single writer of [`SimulationParameters`]. A run
//! never reads the store directly; it takes a [`SimulationRequest`] snapshot.

pub mod params;
pub mod store;

pub use params::{ParamField, ParamRange, SimulationParameters, SimulationRequest};
pub use store::ParameterStore;
