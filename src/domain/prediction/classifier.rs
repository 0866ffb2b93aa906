use super::types::ProductionLevel;

/// Normalized outputs below this are `Low`.
pub const LOW_THRESHOLD: f64 = 0.2;
/// Normalized outputs at or above this are `High`.
pub const HIGH_THRESHOLD: f64 = 0.6;

/// Map a normalized prediction to its production band.
///
/// Bands are closed on the lower bound: exactly 0.2 is `Medium`, exactly 0.6 is `High`.
/// Values outside `[0, 1]` are classified as-is.
pub fn classify(normalized_output: f64) -> ProductionLevel {
    if normalized_output < LOW_THRESHOLD {
        ProductionLevel::Low
    } else if normalized_output < HIGH_THRESHOLD {
        ProductionLevel::Medium
    } else {
        ProductionLevel::High
    }
}
