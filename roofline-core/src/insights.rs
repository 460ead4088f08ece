//! Decoding of solar building-insights documents into roof geometry.
//!
//! Only the fields the estimator needs are read. Missing, zero, and NaN
//! values fall back the same way: whole-roof area to the maximum array
//! area and then to [`DEFAULT_ROOF_AREA_SQUARE_METERS`], segment area to an
//! even share of the roof, pitch and azimuth to zero.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{RawFacet, RoofGeometry};
use crate::error::{Result, RooflineError};

/// Roof area assumed when a document reports none.
pub const DEFAULT_ROOF_AREA_SQUARE_METERS: f64 = 200.0;

/// Top-level building-insights document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildingInsights {
    /// Solar potential block carrying the roof statistics.
    #[serde(default)]
    pub solar_potential: Option<SolarPotential>,
    /// Set when the document was synthesized rather than measured.
    #[serde(default)]
    pub is_estimate: bool,
}

/// Roof statistics inside a building-insights document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SolarPotential {
    /// Statistics for the whole roof.
    #[serde(default)]
    pub whole_roof_stats: Option<AreaStats>,
    /// Largest panel-array area, used when whole-roof area is absent.
    #[serde(default)]
    pub max_array_area_meters2: Option<f64>,
    /// Per-segment statistics.
    #[serde(default)]
    pub roof_segment_stats: Vec<RoofSegmentStats>,
}

/// Area statistics block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AreaStats {
    /// Area in square meters.
    #[serde(default)]
    pub area_meters2: Option<f64>,
}

/// One roof segment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoofSegmentStats {
    /// Segment pitch in degrees.
    #[serde(default)]
    pub pitch_degrees: Option<f64>,
    /// Segment azimuth in degrees.
    #[serde(default)]
    pub azimuth_degrees: Option<f64>,
    /// Segment area statistics.
    #[serde(default)]
    pub stats: Option<AreaStats>,
}

impl TryFrom<BuildingInsights> for RoofGeometry {
    type Error = RooflineError;

    fn try_from(insights: BuildingInsights) -> Result<Self> {
        let Some(potential) = insights.solar_potential else {
            return Err(RooflineError::Unavailable(
                "document has no solar potential data".to_string(),
            ));
        };

        let total_area_square_meters = reported(
            potential
                .whole_roof_stats
                .as_ref()
                .and_then(|stats| stats.area_meters2),
        )
        .or_else(|| reported(potential.max_array_area_meters2))
        .unwrap_or(DEFAULT_ROOF_AREA_SQUARE_METERS);

        let segment_count = potential.roof_segment_stats.len().max(1) as f64;
        let even_share = total_area_square_meters / segment_count;

        let facets = potential
            .roof_segment_stats
            .iter()
            .map(|segment| RawFacet {
                pitch_degrees: reported(segment.pitch_degrees).unwrap_or(0.0),
                azimuth_degrees: reported(segment.azimuth_degrees).unwrap_or(0.0),
                area_square_meters: reported(
                    segment.stats.as_ref().and_then(|stats| stats.area_meters2),
                )
                .unwrap_or(even_share),
            })
            .collect();

        Ok(RoofGeometry {
            total_area_square_meters,
            facets,
        })
    }
}

/// Decode a building-insights JSON document into roof geometry.
pub fn decode_building_insights(contents: &str) -> Result<RoofGeometry> {
    let insights: BuildingInsights = serde_json::from_str(contents)?;
    RoofGeometry::try_from(insights)
}

/// Treat zero and NaN the same as a missing value.
fn reported(value: Option<f64>) -> Option<f64> {
    value.filter(|number| *number != 0.0 && !number.is_nan())
}
