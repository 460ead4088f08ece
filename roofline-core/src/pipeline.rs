//! The estimate pipeline: geometry in, estimate report out.

use log::debug;

use crate::complexity::classify_complexity;
use crate::domain::{EstimateReport, GeometrySummary, PricingRates, RoofGeometry};
use crate::linear::estimate_linear_measurements;
use crate::materials::{calculate_materials, effective_squares};
use crate::normalize::{normalize_geometry, pitch_ratio, roof_squares};
use crate::pricing::calculate_prices;
use crate::waste::waste_factor;

/// Run every estimate stage over a roof geometry.
///
/// The computation is pure: identical inputs always give identical reports,
/// and no input makes it fail. Degenerate input (zero, negative, NaN)
/// produces degenerate figures rather than an error; use
/// [`crate::validate_geometry`] beforehand to reject it.
pub fn compute_estimate(geometry: &RoofGeometry, rates: &PricingRates) -> EstimateReport {
    let roof = normalize_geometry(geometry);
    let facet_count = roof.facets.len();
    let pitches: Vec<f64> = roof.facets.iter().map(|facet| facet.pitch_degrees).collect();

    let complexity = classify_complexity(facet_count, roof.average_pitch_degrees, &pitches);
    let waste = waste_factor(complexity.tier);
    debug!(
        "complexity score {} ({}) for {} facets, waste {}%",
        complexity.score, complexity.tier, facet_count, waste
    );

    let area_square_feet = roof.total_area_square_feet as f64;
    let linear =
        estimate_linear_measurements(area_square_feet, facet_count, roof.average_pitch_degrees);
    let squares = roof_squares(roof.total_area_square_feet);
    let materials = calculate_materials(squares, waste, &linear);
    let prices = calculate_prices(squares, waste, rates);
    debug!(
        "{} squares priced at {} / {} / {}",
        squares, prices.low, prices.mid, prices.high
    );

    EstimateReport {
        summary: GeometrySummary {
            total_area_square_feet: roof.total_area_square_feet,
            roof_squares: squares,
            effective_squares: effective_squares(squares, waste),
            facet_count,
            average_pitch_degrees: roof.average_pitch_degrees,
            predominant_pitch: pitch_ratio(roof.average_pitch_degrees),
        },
        facets: roof.facets,
        complexity,
        waste_factor: waste,
        linear,
        materials,
        prices,
    }
}
