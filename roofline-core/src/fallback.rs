//! Synthetic roof geometry for when no measured geometry is available.
//!
//! The roof is drawn from a `ChaCha8Rng` seeded by the site coordinates, so
//! the same site always gets the same stand-in roof.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::{RawFacet, RoofGeometry, Site};

/// Square meters per square foot.
pub const SQUARE_METERS_PER_SQUARE_FOOT: f64 = 0.0929;

/// Range of stand-in roof areas, in square feet.
pub const FALLBACK_AREA_SQUARE_FEET: std::ops::Range<f64> = 2000.0..3500.0;

/// Range of stand-in facet counts.
pub const FALLBACK_FACETS: std::ops::RangeInclusive<usize> = 3..=7;

/// Range of stand-in pitches, in degrees.
pub const FALLBACK_PITCH_DEGREES: std::ops::Range<f64> = 20.0..35.0;

/// Build a plausible typical-house roof for a site.
///
/// All facets share one pitch, face north, and split the area evenly.
pub fn fallback_geometry(site: &Site) -> RoofGeometry {
    let mut rng = ChaCha8Rng::seed_from_u64(site_seed(site));

    let area_square_feet = rng.gen_range(FALLBACK_AREA_SQUARE_FEET);
    let facet_count = rng.gen_range(FALLBACK_FACETS);
    let pitch_degrees = rng.gen_range(FALLBACK_PITCH_DEGREES);

    let total_area_square_meters = area_square_feet * SQUARE_METERS_PER_SQUARE_FOOT;
    let facet_area = total_area_square_meters / facet_count as f64;

    RoofGeometry {
        total_area_square_meters,
        facets: (0..facet_count)
            .map(|_| RawFacet {
                pitch_degrees,
                azimuth_degrees: 0.0,
                area_square_meters: facet_area,
            })
            .collect(),
    }
}

fn site_seed(site: &Site) -> u64 {
    site.latitude.to_bits() ^ site.longitude.to_bits().rotate_left(32)
}
