// pfr-core/src/units.rs

use uom::si::f64::{
    Length as UomLength, ThermodynamicTemperature as UomThermodynamicTemperature,
    Time as UomTime, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Length = UomLength;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;
pub type Velocity = UomVelocity;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

/// Celsius reading of an absolute temperature.
#[inline]
pub fn to_celsius(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_celsius;
    t.get::<degree_celsius>()
}

/// Celsius reading of a raw Kelvin value.
#[inline]
pub fn kelvin_to_celsius(t_k: f64) -> f64 {
    to_celsius(k(t_k))
}

/// Time a fluid element spends travelling `length` at `velocity`.
#[inline]
pub fn residence_time(length: Length, velocity: Velocity) -> Time {
    length / velocity
}

/// Fixed geometry of the simulated reactor tube.
pub mod reactor {
    use super::*;

    pub const LENGTH_M: f64 = 5.0;
    pub const TUBE_DIAMETER_M: f64 = 0.05;

    #[inline]
    pub fn length() -> Length {
        m(LENGTH_M)
    }

    /// Residence time in seconds for a given flow velocity in m/s.
    pub fn residence_time_s(flow_velocity_mps: f64) -> f64 {
        use uom::si::time::second;
        residence_time(length(), mps(flow_velocity_mps)).get::<second>()
    }
}
