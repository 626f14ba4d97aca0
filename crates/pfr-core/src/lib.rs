//! pfr-core: shared foundation for the PFR simulator front-end.
//!
//! Contains:
//! - units (uom SI types, constructors, reactor constants)
//! - numeric (Real, tolerances, rounding helpers)
//! - ids (request identifiers for the run lifecycle)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
