#![deny(missing_docs)]
//! Roofline core library.
//!
//! Turns roof geometry into a reproducible replacement estimate: normalized
//! facets, a complexity tier, a waste factor, linear measurements, material
//! quantities and a three-tier price range. The pipeline itself is pure; the
//! intake helpers around it decode provider documents, synthesize stand-in
//! geometry, and flatten reports for storage.

pub mod complexity;
pub mod domain;
pub mod error;
pub mod fallback;
pub mod insights;
pub mod linear;
pub mod materials;
pub mod normalize;
pub mod pipeline;
pub mod pricing;
pub mod record;
pub mod report;
mod rounding;
pub mod source;
pub mod validate;
pub mod waste;

pub use complexity::classify_complexity;
pub use domain::{
    CompassDirection, ComplexityResult, ComplexityTier, EstimateReport, GeometrySummary,
    LinearMeasurements, MaterialQuantities, NormalizedFacet, NormalizedRoof, PriceEstimate,
    PricingRates, RawFacet, RoofGeometry, Site,
};
pub use error::{Result, RooflineError};
pub use fallback::fallback_geometry;
pub use insights::{BuildingInsights, decode_building_insights};
pub use linear::estimate_linear_measurements;
pub use materials::calculate_materials;
pub use normalize::normalize_geometry;
pub use pipeline::compute_estimate;
pub use pricing::calculate_prices;
pub use record::EstimateRecord;
pub use report::{
    EstimateEntry, EstimateStatus, format_currency, format_thousands, render_estimates_markdown,
    render_json,
};
pub use source::{
    AcquiredGeometry, DocumentKind, GeometryDocument, GeometrySource, JsonFileSource,
    acquire_geometry, parse_geometry_document,
};
pub use validate::validate_geometry;
pub use waste::waste_factor;
