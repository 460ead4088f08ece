//! OpenAPI specification for Roofline server.

use utoipa::OpenApi;

use roofline_core::domain::{
    CompassDirection, ComplexityResult, ComplexityTier, EstimateReport, GeometrySummary,
    LinearMeasurements, MaterialQuantities, NormalizedFacet, PriceEstimate, PricingRates,
    RawFacet, RoofGeometry,
};
use roofline_core::insights::{AreaStats, BuildingInsights, RoofSegmentStats, SolarPotential};
use roofline_core::record::EstimateRecord;

use crate::routes::{ComputeEstimateRequest, ComputeEstimateResponse, ErrorResponse, HealthResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::rates,
        crate::routes::compute,
        crate::routes::openapi_json
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            ComputeEstimateRequest,
            ComputeEstimateResponse,
            PricingRates,
            RoofGeometry,
            RawFacet,
            BuildingInsights,
            SolarPotential,
            AreaStats,
            RoofSegmentStats,
            EstimateReport,
            GeometrySummary,
            NormalizedFacet,
            CompassDirection,
            ComplexityResult,
            ComplexityTier,
            LinearMeasurements,
            MaterialQuantities,
            PriceEstimate,
            EstimateRecord
        )
    ),
    tags(
        (name = "estimates", description = "Roof estimates"),
        (name = "system", description = "System endpoints")
    )
)]
/// OpenAPI specification for the Roofline server.
pub struct ApiDoc;
