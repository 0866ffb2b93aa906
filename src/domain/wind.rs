//! Wind features derived from orthogonal wind-vector components.
//!
//! `u` is the eastward and `v` the northward component (m/s). These must stay
//! bit-identical to the training features, so no `f64::hypot`.

/// Speed and meteorological bearing of a single wind vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindComponents {
    /// Magnitude in m/s, never negative
    pub speed: f64,
    /// Compass bearing the wind blows FROM, in `[0, 360)`
    pub direction_degrees: f64,
}

/// Derive speed and direction for one measurement height.
pub fn derive(u: f64, v: f64) -> WindComponents {
    WindComponents {
        speed: wind_speed(u, v),
        direction_degrees: wind_direction(u, v),
    }
}

pub fn wind_speed(u: f64, v: f64) -> f64 {
    (u * u + v * v).sqrt()
}

/// `(270 - degrees(atan2(v, u))) mod 360`, floored modulo.
pub fn wind_direction(u: f64, v: f64) -> f64 {
    // atan2 is within [-180, 180] degrees, so the dividend is always in [90, 450]
    (270.0 - v.atan2(u).to_degrees()).rem_euclid(360.0)
}
