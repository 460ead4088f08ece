//! Bulk material quantities.
//!
//! Every quantity rounds up so an order never falls short.

use crate::domain::{LinearMeasurements, MaterialQuantities};
use crate::rounding::up;

const BUNDLES_3_TAB_PER_SQUARE: f64 = 3.0;
const BUNDLES_ARCHITECTURAL_PER_SQUARE: f64 = 3.5;
const SQUARES_PER_UNDERLAYMENT_ROLL: f64 = 4.0;
const FEET_PER_DRIP_EDGE_PIECE: f64 = 10.0;
const FEET_PER_RIDGE_CAP_BUNDLE: f64 = 25.0;
const NAIL_POUNDS_PER_SQUARE: f64 = 2.5;

/// Roofing squares inflated by a waste percentage.
pub fn effective_squares(roof_squares: f64, waste_factor: u32) -> f64 {
    roof_squares * (1.0 + f64::from(waste_factor) / 100.0)
}

/// Derive material quantities from roof squares, waste, and trim lengths.
pub fn calculate_materials(
    roof_squares: f64,
    waste_factor: u32,
    linear: &LinearMeasurements,
) -> MaterialQuantities {
    let squares = effective_squares(roof_squares, waste_factor);
    let drip_edge_feet = linear.eave_feet as f64 + linear.rake_feet as f64;
    let ridge_cap_feet = linear.ridge_feet as f64 + linear.hip_feet as f64;

    MaterialQuantities {
        bundles_3_tab: up(squares * BUNDLES_3_TAB_PER_SQUARE),
        bundles_architectural: up(squares * BUNDLES_ARCHITECTURAL_PER_SQUARE),
        underlayment_rolls: up(squares / SQUARES_PER_UNDERLAYMENT_ROLL),
        drip_edge_pieces: up(drip_edge_feet / FEET_PER_DRIP_EDGE_PIECE),
        ridge_cap_bundles: up(ridge_cap_feet / FEET_PER_RIDGE_CAP_BUNDLE),
        nails_pounds: up(squares * NAIL_POUNDS_PER_SQUARE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(eaves: i64, rakes: i64, ridges: i64, hips: i64) -> LinearMeasurements {
        LinearMeasurements {
            ridge_feet: ridges,
            hip_feet: hips,
            eave_feet: eaves,
            rake_feet: rakes,
            ..LinearMeasurements::default()
        }
    }

    #[test]
    fn effective_squares_apply_waste() {
        assert_eq!(effective_squares(250.0, 10), 275.0);
        assert_eq!(effective_squares(100.0, 0), 100.0);
        assert!((effective_squares(20.0, 18) - 23.6).abs() < 1e-9);
    }

    #[test]
    fn large_flat_roof_quantities() {
        let materials = calculate_materials(250.0, 10, &linear(221, 158, 62, 0));
        assert_eq!(materials.bundles_3_tab, 825);
        assert_eq!(materials.bundles_architectural, 963);
        assert_eq!(materials.underlayment_rolls, 69);
        assert_eq!(materials.drip_edge_pieces, 38);
        assert_eq!(materials.ridge_cap_bundles, 3);
        assert_eq!(materials.nails_pounds, 688);
    }

    #[test]
    fn partial_units_round_up() {
        let materials = calculate_materials(1.0, 0, &linear(1, 0, 1, 0));
        assert_eq!(materials.bundles_3_tab, 3);
        assert_eq!(materials.bundles_architectural, 4);
        assert_eq!(materials.underlayment_rolls, 1);
        assert_eq!(materials.drip_edge_pieces, 1);
        assert_eq!(materials.ridge_cap_bundles, 1);
        assert_eq!(materials.nails_pounds, 3);
    }

    #[test]
    fn exact_multiples_do_not_round_past() {
        let materials = calculate_materials(4.0, 0, &linear(60, 40, 40, 10));
        assert_eq!(materials.underlayment_rolls, 1);
        assert_eq!(materials.drip_edge_pieces, 10);
        assert_eq!(materials.ridge_cap_bundles, 2);
        assert_eq!(materials.nails_pounds, 10);
    }

    #[test]
    fn zero_area_needs_no_field_material() {
        let materials = calculate_materials(0.0, 10, &LinearMeasurements::default());
        assert_eq!(materials, MaterialQuantities::default());
    }
}
