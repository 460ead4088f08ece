//! Opt-in geometry validation.
//!
//! The pipeline accepts any numbers. Callers that want to refuse
//! degenerate geometry run [`validate_geometry`] first.

use crate::domain::RoofGeometry;
use crate::error::{Result, RooflineError};

/// Steepest pitch accepted, in degrees.
pub const MAX_PITCH_DEGREES: f64 = 90.0;

/// Reject geometry with non-finite or negative areas, or impossible pitches.
pub fn validate_geometry(geometry: &RoofGeometry) -> Result<()> {
    check_area("total area", geometry.total_area_square_meters)?;

    for (index, facet) in geometry.facets.iter().enumerate() {
        let position = index + 1;
        check_area(&format!("facet {position} area"), facet.area_square_meters)?;
        if !facet.pitch_degrees.is_finite()
            || !(0.0..=MAX_PITCH_DEGREES).contains(&facet.pitch_degrees)
        {
            return Err(RooflineError::InvalidGeometry(format!(
                "facet {position} pitch must be between 0 and {MAX_PITCH_DEGREES} degrees (got {})",
                facet.pitch_degrees
            )));
        }
        if !facet.azimuth_degrees.is_finite() {
            return Err(RooflineError::InvalidGeometry(format!(
                "facet {position} azimuth must be finite"
            )));
        }
    }

    Ok(())
}

fn check_area(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(RooflineError::InvalidGeometry(format!(
            "{name} must be finite"
        )));
    }
    if value < 0.0 {
        return Err(RooflineError::InvalidGeometry(format!(
            "{name} must not be negative (got {value})"
        )));
    }
    Ok(())
}
