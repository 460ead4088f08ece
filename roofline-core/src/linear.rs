//! Linear trim estimates derived from area, facet count, and pitch.
//!
//! These are heuristic approximations of typical roof shapes, not measured
//! lengths.

use crate::domain::LinearMeasurements;
use crate::rounding::nearest;

/// Estimate ridge, hip, valley, eave, rake, and flashing lengths in feet.
pub fn estimate_linear_measurements(
    area_square_feet: f64,
    facet_count: usize,
    average_pitch_degrees: f64,
) -> LinearMeasurements {
    let side = area_square_feet.sqrt();
    let perimeter = side * 4.0;
    let pitch_multiplier = 1.0 + average_pitch_degrees / 100.0;
    let facets = facet_count as f64;

    let ridge_feet = nearest((facets * 15.0 + side * 0.3) * pitch_multiplier);
    let hip_feet = if facet_count > 2 {
        nearest((facets - 2.0) * 12.0 * pitch_multiplier)
    } else {
        0
    };
    let valley_feet = if facet_count > 3 {
        nearest((facets - 3.0) * 10.0 * pitch_multiplier)
    } else {
        0
    };
    let eave_feet = nearest(perimeter * 0.35);
    let rake_feet = nearest(perimeter * 0.25 * pitch_multiplier);
    // Twenty feet of wall flashing on top of ridge and valley flashing.
    let flashing_feet = nearest((ridge_feet as f64 + valley_feet as f64) * 0.5 + 20.0);

    LinearMeasurements {
        ridge_feet,
        hip_feet,
        valley_feet,
        eave_feet,
        rake_feet,
        flashing_feet,
    }
}
