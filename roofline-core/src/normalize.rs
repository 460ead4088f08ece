//! Geometry normalizer: raw facet data to estimator units.

use std::f64::consts::PI;

use crate::domain::{CompassDirection, NormalizedFacet, NormalizedRoof, RoofGeometry};
use crate::rounding::{nearest, nearest_tenth, round_one_decimal};

/// Square feet per square meter.
pub const SQUARE_FEET_PER_SQUARE_METER: f64 = 10.764;

/// Degrees covered by one compass point.
const DEGREES_PER_COMPASS_POINT: f64 = 22.5;

/// Normalize a roof geometry into labelled facets and summary figures.
///
/// An empty facet list yields one synthetic facet covering the whole roof
/// with zero pitch, facing north. Non-finite or negative numbers are not
/// rejected here; they flow through the arithmetic unchanged.
pub fn normalize_geometry(geometry: &RoofGeometry) -> NormalizedRoof {
    let total_area_square_feet = square_feet(geometry.total_area_square_meters);

    if geometry.facets.is_empty() {
        return NormalizedRoof {
            facets: vec![NormalizedFacet {
                label: facet_label(0),
                pitch_degrees: 0.0,
                pitch_ratio: pitch_ratio(0.0),
                area_square_feet: total_area_square_feet,
                direction: CompassDirection::N,
            }],
            total_area_square_feet,
            average_pitch_degrees: 0.0,
        };
    }

    let facets: Vec<NormalizedFacet> = geometry
        .facets
        .iter()
        .enumerate()
        .map(|(index, facet)| NormalizedFacet {
            label: facet_label(index),
            pitch_degrees: facet.pitch_degrees,
            pitch_ratio: pitch_ratio(facet.pitch_degrees),
            area_square_feet: square_feet(facet.area_square_meters),
            direction: CompassDirection::from_azimuth(facet.azimuth_degrees),
        })
        .collect();

    let average_pitch_degrees = weighted_average_pitch(&facets);

    NormalizedRoof {
        facets,
        total_area_square_feet,
        average_pitch_degrees,
    }
}

/// Convert square meters to whole square feet.
pub fn square_feet(square_meters: f64) -> i64 {
    nearest(square_meters * SQUARE_FEET_PER_SQUARE_METER)
}

/// Roofing squares for an area in square feet, to one decimal.
///
/// The quotient is rounded by its stored binary value, so 2115 sq ft is
/// 21.1 squares rather than 21.2.
pub fn roof_squares(square_feet: i64) -> f64 {
    nearest_tenth(square_feet as f64 / 100.0)
}

/// Render a pitch in degrees as rise over twelve, e.g. `6:12` or `6.5:12`.
pub fn pitch_ratio(degrees: f64) -> String {
    let rise = (degrees * PI / 180.0).tan() * 12.0;
    format!("{}:12", round_one_decimal(rise))
}

impl CompassDirection {
    /// Nearest of the sixteen compass points for an azimuth in degrees.
    ///
    /// Azimuths outside `[0, 360)` wrap around. NaN maps to north.
    pub fn from_azimuth(degrees: f64) -> Self {
        let step = nearest(degrees / DEGREES_PER_COMPASS_POINT);
        let index = step.rem_euclid(Self::ALL.len() as i64) as usize;
        Self::ALL[index]
    }
}

fn facet_label(index: usize) -> String {
    format!("Facet {}", index + 1)
}

fn weighted_average_pitch(facets: &[NormalizedFacet]) -> f64 {
    // Summed as floats; saturated facet areas would overflow an i64 sum.
    let total_area: f64 = facets
        .iter()
        .map(|facet| facet.area_square_feet as f64)
        .sum();
    if total_area == 0.0 {
        return 0.0;
    }
    facets
        .iter()
        .map(|facet| facet.pitch_degrees * facet.area_square_feet as f64 / total_area)
        .sum()
}
