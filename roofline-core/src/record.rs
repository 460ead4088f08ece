//! Flat estimate record for downstream storage.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{EstimateReport, Site};

/// One estimate flattened to storage columns.
///
/// Field names match the `estimates` table columns, so the record is kept
/// in snake_case on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EstimateRecord {
    /// Street address, empty when unknown.
    pub address: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Roof area in square feet.
    pub roof_area_sqft: i64,
    /// Roofing squares.
    pub roof_squares: f64,
    /// Facet count.
    pub num_facets: usize,
    /// Predominant pitch ratio.
    pub predominant_pitch: String,
    /// Complexity tier label.
    pub complexity: String,
    /// Waste factor percentage.
    pub waste_factor: u32,
    /// Low price tier.
    pub price_low: i64,
    /// Mid price tier.
    pub price_mid: i64,
    /// High price tier.
    pub price_high: i64,
}

impl EstimateRecord {
    /// Flatten a report for the given site.
    pub fn from_report(report: &EstimateReport, site: &Site) -> Self {
        Self {
            address: site.address.clone().unwrap_or_default(),
            latitude: site.latitude,
            longitude: site.longitude,
            roof_area_sqft: report.summary.total_area_square_feet,
            roof_squares: report.summary.roof_squares,
            num_facets: report.summary.facet_count,
            predominant_pitch: report.summary.predominant_pitch.clone(),
            complexity: report.complexity.tier.label().to_string(),
            waste_factor: report.waste_factor,
            price_low: report.prices.low,
            price_mid: report.prices.mid,
            price_high: report.prices.high,
        }
    }
}
