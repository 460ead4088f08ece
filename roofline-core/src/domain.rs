//! Domain entities for Roofline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::RooflineError;

/// One roof plane as reported by the geometry source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawFacet {
    /// Pitch of the plane in degrees from horizontal.
    #[serde(default)]
    pub pitch_degrees: f64,
    /// Azimuth of the plane in degrees clockwise from north.
    #[serde(default)]
    pub azimuth_degrees: f64,
    /// Plan area of the plane in square meters.
    pub area_square_meters: f64,
}

/// Aggregate roof geometry fed into the estimate pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoofGeometry {
    /// Whole-roof area in square meters.
    pub total_area_square_meters: f64,
    /// Individual roof planes. Empty means one plane spanning the roof.
    #[serde(default)]
    pub facets: Vec<RawFacet>,
}

impl RoofGeometry {
    /// Geometry with no facet breakdown.
    pub fn whole_roof(total_area_square_meters: f64) -> Self {
        Self {
            total_area_square_meters,
            facets: Vec::new(),
        }
    }
}

/// Sixteen-point compass direction a facet faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompassDirection {
    /// North.
    N,
    /// North-northeast.
    Nne,
    /// Northeast.
    Ne,
    /// East-northeast.
    Ene,
    /// East.
    E,
    /// East-southeast.
    Ese,
    /// Southeast.
    Se,
    /// South-southeast.
    Sse,
    /// South.
    S,
    /// South-southwest.
    Ssw,
    /// Southwest.
    Sw,
    /// West-southwest.
    Wsw,
    /// West.
    W,
    /// West-northwest.
    Wnw,
    /// Northwest.
    Nw,
    /// North-northwest.
    Nnw,
}

impl CompassDirection {
    /// All directions, clockwise from north in 22.5 degree steps.
    pub const ALL: [CompassDirection; 16] = [
        Self::N,
        Self::Nne,
        Self::Ne,
        Self::Ene,
        Self::E,
        Self::Ese,
        Self::Se,
        Self::Sse,
        Self::S,
        Self::Ssw,
        Self::Sw,
        Self::Wsw,
        Self::W,
        Self::Wnw,
        Self::Nw,
        Self::Nnw,
    ];

    /// Short compass code, e.g. `"NNE"`.
    pub fn code(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::Nne => "NNE",
            Self::Ne => "NE",
            Self::Ene => "ENE",
            Self::E => "E",
            Self::Ese => "ESE",
            Self::Se => "SE",
            Self::Sse => "SSE",
            Self::S => "S",
            Self::Ssw => "SSW",
            Self::Sw => "SW",
            Self::Wsw => "WSW",
            Self::W => "W",
            Self::Wnw => "WNW",
            Self::Nw => "NW",
            Self::Nnw => "NNW",
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A roof plane converted to estimator units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedFacet {
    /// Display label, `Facet N`.
    pub label: String,
    /// Pitch in degrees, as supplied.
    pub pitch_degrees: f64,
    /// Rise over twelve, e.g. `6:12`.
    pub pitch_ratio: String,
    /// Area in whole square feet.
    pub area_square_feet: i64,
    /// Direction the facet faces.
    pub direction: CompassDirection,
}

/// Output of the geometry normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRoof {
    /// Facets in input order; never empty.
    pub facets: Vec<NormalizedFacet>,
    /// Whole-roof area in square feet.
    pub total_area_square_feet: i64,
    /// Area-weighted average pitch in degrees.
    pub average_pitch_degrees: f64,
}

/// Ordered roof complexity classification.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityTier {
    /// Few facets, shallow and uniform pitch.
    Simple,
    /// Some angles and valleys.
    Moderate,
    /// Multiple facets with varying pitch.
    Complex,
    /// Many facets, steep or highly varied pitch.
    VeryComplex,
}

impl ComplexityTier {
    /// Stable wire label, e.g. `very_complex`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Moderate => "moderate",
            Self::Complex => "complex",
            Self::VeryComplex => "very_complex",
        }
    }

    /// Human-readable explanation shown alongside the estimate.
    pub fn description(self) -> &'static str {
        match self {
            Self::Simple => {
                "Simple roof with minimal cuts. Standard installation procedures apply."
            }
            Self::Moderate => {
                "Moderate complexity with some angles and valleys. Additional labor required."
            }
            Self::Complex => {
                "Complex roof with multiple facets and varying pitches. Experienced crew recommended."
            }
            Self::VeryComplex => {
                "Very complex roof requiring specialized techniques. Higher material waste expected."
            }
        }
    }
}

impl fmt::Display for ComplexityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComplexityTier {
    type Err = RooflineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "moderate" => Ok(Self::Moderate),
            "complex" => Ok(Self::Complex),
            "very_complex" => Ok(Self::VeryComplex),
            other => Err(RooflineError::Other(format!(
                "unknown complexity tier: {other}"
            ))),
        }
    }
}

/// Complexity score and the tier it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityResult {
    /// Raw additive score; may exceed 100.
    pub score: u32,
    /// Score clamped to 100, for progress-bar style display.
    pub percentage: u8,
    /// Tier derived from the score.
    pub tier: ComplexityTier,
    /// Tier description.
    pub description: String,
}

/// Approximate trim lengths in feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinearMeasurements {
    /// Ridge length.
    pub ridge_feet: i64,
    /// Hip length.
    pub hip_feet: i64,
    /// Valley length.
    pub valley_feet: i64,
    /// Eave length.
    pub eave_feet: i64,
    /// Rake length.
    pub rake_feet: i64,
    /// Flashing length, including wall flashing allowance.
    pub flashing_feet: i64,
}

/// Bulk material quantities, always rounded up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialQuantities {
    /// Bundles of 3-tab shingles.
    #[serde(rename = "bundles3Tab")]
    pub bundles_3_tab: i64,
    /// Bundles of architectural shingles.
    pub bundles_architectural: i64,
    /// Rolls of underlayment.
    pub underlayment_rolls: i64,
    /// Ten-foot drip edge pieces.
    pub drip_edge_pieces: i64,
    /// Bundles of ridge cap.
    pub ridge_cap_bundles: i64,
    /// Roofing nails in pounds.
    pub nails_pounds: i64,
}

/// Per-square pricing for the three shingle tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PricingRates {
    /// 3-tab shingles.
    pub low: f64,
    /// Architectural shingles.
    pub mid: f64,
    /// Designer or premium shingles.
    pub high: f64,
}

impl PricingRates {
    /// Default low rate per square.
    pub const DEFAULT_LOW: f64 = 465.0;
    /// Default mid rate per square.
    pub const DEFAULT_MID: f64 = 550.0;
    /// Default high rate per square.
    pub const DEFAULT_HIGH: f64 = 750.0;

    /// Create rates from explicit values.
    pub fn new(low: f64, mid: f64, high: f64) -> Self {
        Self { low, mid, high }
    }

    /// Check the rates are finite, non-negative, and non-decreasing.
    pub fn validate(&self) -> crate::Result<()> {
        for (name, value) in [("low", self.low), ("mid", self.mid), ("high", self.high)] {
            if !value.is_finite() {
                return Err(RooflineError::InvalidRates(format!(
                    "{name} rate must be finite"
                )));
            }
            if value < 0.0 {
                return Err(RooflineError::InvalidRates(format!(
                    "{name} rate must not be negative"
                )));
            }
        }
        if self.low > self.mid || self.mid > self.high {
            return Err(RooflineError::InvalidRates(format!(
                "rates must be ordered low <= mid <= high (got {} / {} / {})",
                self.low, self.mid, self.high
            )));
        }
        Ok(())
    }
}

impl Default for PricingRates {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LOW, Self::DEFAULT_MID, Self::DEFAULT_HIGH)
    }
}

/// Three-tier price range in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct PriceEstimate {
    /// Low tier.
    pub low: i64,
    /// Mid tier.
    pub mid: i64,
    /// High tier.
    pub high: i64,
}

/// Geometry figures echoed back with the estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeometrySummary {
    /// Whole-roof area in square feet.
    pub total_area_square_feet: i64,
    /// Roofing squares (area / 100, one decimal).
    pub roof_squares: f64,
    /// Squares inflated by the waste factor.
    pub effective_squares: f64,
    /// Number of facets used by the estimate.
    pub facet_count: usize,
    /// Area-weighted average pitch in degrees.
    pub average_pitch_degrees: f64,
    /// Average pitch as a rise-over-twelve ratio.
    pub predominant_pitch: String,
}

/// Final output of the estimate pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateReport {
    /// Geometry summary.
    pub summary: GeometrySummary,
    /// Normalized facets.
    pub facets: Vec<NormalizedFacet>,
    /// Complexity classification.
    pub complexity: ComplexityResult,
    /// Waste factor in whole percent.
    pub waste_factor: u32,
    /// Trim measurements.
    pub linear: LinearMeasurements,
    /// Material quantities.
    pub materials: MaterialQuantities,
    /// Price range.
    pub prices: PriceEstimate,
}

/// Location an estimate is requested for.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    /// Free-form street address.
    #[serde(default)]
    pub address: Option<String>,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Site {
    /// Create a site from coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            address: None,
            latitude,
            longitude,
        }
    }

    /// Attach an address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}
