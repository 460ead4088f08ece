//! HTTP handlers for Roofline server.

use actix_web::{HttpRequest, HttpResponse, Responder, error, get, post, web};
use chrono::{SecondsFormat, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use roofline_core::{
    BuildingInsights, EstimateRecord, EstimateReport, PricingRates, RoofGeometry, RooflineError,
    Site, compute_estimate, fallback_geometry, validate_geometry,
};

use crate::openapi::ApiDoc;

/// Origins allowed by CORS when none are configured.
pub const DEFAULT_UI_ORIGINS: &str = "http://127.0.0.1:3000,http://localhost:3000";

/// Server configuration loaded from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Origins allowed by CORS.
    pub ui_origins: Vec<String>,
    /// Per-square pricing.
    pub rates: PricingRates,
    /// Reject degenerate geometry instead of estimating it.
    pub strict_geometry: bool,
}

impl ServerConfig {
    /// Build configuration from environment variables.
    #[cfg_attr(test, allow(dead_code))]
    pub fn from_env() -> roofline_core::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> roofline_core::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("ROOFLINE_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port_raw = lookup("ROOFLINE_PORT").unwrap_or_else(|| "8080".to_string());
        let port = port_raw.trim().parse::<u16>().map_err(|_| {
            RooflineError::Other(format!("ROOFLINE_PORT must be a u16 number (got {port_raw})"))
        })?;

        let origins = lookup("ROOFLINE_UI_ORIGINS").unwrap_or_else(|| DEFAULT_UI_ORIGINS.to_string());
        let ui_origins = origins
            .split(',')
            .map(|value| value.trim())
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        let pricing_rates = PricingRates::new(
            rate_from(&lookup, "ROOFLINE_RATE_LOW", PricingRates::DEFAULT_LOW)?,
            rate_from(&lookup, "ROOFLINE_RATE_MID", PricingRates::DEFAULT_MID)?,
            rate_from(&lookup, "ROOFLINE_RATE_HIGH", PricingRates::DEFAULT_HIGH)?,
        );
        pricing_rates.validate()?;

        let strict_geometry = match lookup("ROOFLINE_STRICT_GEOMETRY") {
            Some(value) => parse_flag("ROOFLINE_STRICT_GEOMETRY", &value)?,
            None => false,
        };

        Ok(Self {
            host,
            port,
            ui_origins,
            rates: pricing_rates,
            strict_geometry,
        })
    }
}

fn rate_from<F>(lookup: &F, key: &str, default: f64) -> roofline_core::Result<f64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| RooflineError::InvalidRates(format!("{key} must be a number (got {raw})"))),
        None => Ok(default),
    }
}

fn parse_flag(key: &str, value: &str) -> roofline_core::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(RooflineError::Other(format!(
            "{key} must be a boolean (got {value})"
        ))),
    }
}

#[derive(Debug, Clone)]
/// Shared application state for handlers.
pub struct AppState {
    /// Per-square pricing applied to every estimate.
    pub rates: PricingRates,
    /// Reject degenerate geometry instead of estimating it.
    pub strict_geometry: bool,
}

impl From<&ServerConfig> for AppState {
    fn from(config: &ServerConfig) -> Self {
        Self {
            rates: config.rates,
            strict_geometry: config.strict_geometry,
        }
    }
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

/// Liveness payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always true while the server answers.
    pub success: bool,
    /// Status message.
    pub message: String,
    /// RFC 3339 timestamp of the response.
    pub timestamp: String,
}

/// Request payload for computing an estimate.
///
/// Geometry is taken from `geometry`, then `insights`, then synthesized
/// from the coordinates.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComputeEstimateRequest {
    /// Street address recorded with the estimate.
    pub address: Option<String>,
    /// Site latitude.
    pub latitude: Option<f64>,
    /// Site longitude.
    pub longitude: Option<f64>,
    /// Measured roof geometry.
    pub geometry: Option<RoofGeometry>,
    /// Building-insights document to decode.
    pub insights: Option<BuildingInsights>,
}

/// Computed estimate.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComputeEstimateResponse {
    /// Identifier for this computation.
    pub request_id: String,
    /// RFC 3339 timestamp of the computation.
    pub generated_at: String,
    /// True when the geometry was a stand-in.
    pub estimated: bool,
    /// Full estimate.
    pub report: EstimateReport,
    /// Estimate flattened to storage columns.
    pub record: EstimateRecord,
}

/// JSON extractor configuration that reports malformed bodies as [`ErrorResponse`].
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        let message = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse { message }),
        )
        .into()
    })
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        message: message.into(),
    })
}

fn request_site(request: &ComputeEstimateRequest) -> Result<Option<Site>, String> {
    match (request.latitude, request.longitude) {
        (Some(latitude), Some(longitude)) => {
            let site = Site::new(latitude, longitude);
            Ok(Some(match &request.address {
                Some(address) if !address.trim().is_empty() => site.with_address(address.trim()),
                _ => site,
            }))
        }
        (None, None) => Ok(None),
        _ => Err("latitude and longitude must be provided together".to_string()),
    }
}

/// Pick the geometry for a request and whether it is a stand-in.
fn resolve_geometry(
    request: ComputeEstimateRequest,
    site: Option<&Site>,
) -> Result<(RoofGeometry, bool), String> {
    if let Some(geometry) = request.geometry {
        return Ok((geometry, false));
    }
    if let Some(insights) = request.insights {
        let estimated = insights.is_estimate;
        match (RoofGeometry::try_from(insights), site) {
            (Ok(geometry), _) => return Ok((geometry, estimated)),
            (Err(err), Some(site)) => {
                warn!("insights unusable, using fallback geometry: {err}");
                return Ok((fallback_geometry(site), true));
            }
            (Err(err), None) => return Err(err.to_string()),
        }
    }
    match site {
        Some(site) => Ok((fallback_geometry(site), true)),
        None => Err("provide geometry, insights, or latitude and longitude".to_string()),
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    ),
    tag = "system"
)]
#[get("/api/health")]
/// Report that the server is up.
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        success: true,
        message: "Server is running".to_string(),
        timestamp: now_rfc3339(),
    })
}

#[utoipa::path(
    get,
    path = "/rates",
    responses(
        (status = 200, description = "Configured per-square rates", body = PricingRates)
    ),
    tag = "estimates"
)]
#[get("/api/rates")]
/// Fetch the per-square rates applied to estimates.
pub async fn rates(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.rates)
}

#[utoipa::path(
    post,
    path = "/estimates/compute",
    request_body = ComputeEstimateRequest,
    responses(
        (status = 200, description = "Estimate computed", body = ComputeEstimateResponse),
        (status = 400, description = "Invalid request or geometry", body = ErrorResponse)
    ),
    tag = "estimates"
)]
#[post("/api/estimates/compute")]
/// Compute a roof replacement estimate.
pub async fn compute(
    state: web::Data<AppState>,
    payload: web::Json<ComputeEstimateRequest>,
) -> impl Responder {
    let request = payload.into_inner();
    let site = match request_site(&request) {
        Ok(site) => site,
        Err(message) => return bad_request(message),
    };
    let (geometry, estimated) = match resolve_geometry(request, site.as_ref()) {
        Ok(resolved) => resolved,
        Err(message) => return bad_request(message),
    };
    if state.strict_geometry {
        if let Err(err) = validate_geometry(&geometry) {
            return bad_request(err.to_string());
        }
    }

    let report = compute_estimate(&geometry, &state.rates);
    let record = EstimateRecord::from_report(&report, &site.unwrap_or_default());
    let request_id = Uuid::new_v4().to_string();
    info!(
        "estimate {request_id}: {} sq ft, {} tier, ${}-${}{}",
        report.summary.total_area_square_feet,
        report.complexity.tier,
        report.prices.low,
        report.prices.high,
        if estimated { " (estimated geometry)" } else { "" }
    );

    HttpResponse::Ok().json(ComputeEstimateResponse {
        request_id,
        generated_at: now_rfc3339(),
        estimated,
        report,
        record,
    })
}

#[utoipa::path(
    get,
    path = "/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document", body = serde_json::Value)
    ),
    tag = "system"
)]
#[get("/api/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
