//! Geometry sources and the caller-side fallback policy.

use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{RoofGeometry, Site};
use crate::error::Result;
use crate::fallback::fallback_geometry;
use crate::insights::BuildingInsights;

/// Geometry plus whether it is a stand-in rather than a measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeometryDocument {
    /// Roof geometry.
    pub geometry: RoofGeometry,
    /// True when the geometry was synthesized.
    pub estimated: bool,
}

/// Somewhere roof geometry for a site can be obtained from.
#[cfg_attr(test, mockall::automock)]
pub trait GeometrySource {
    /// Fetch geometry for a site.
    fn fetch(&self, site: &Site) -> Result<GeometryDocument>;
}

/// How the contents of a geometry file are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentKind {
    /// Building insights when a `solarPotential` key is present, otherwise
    /// plain geometry.
    #[default]
    Detect,
    /// Plain [`RoofGeometry`].
    Geometry,
    /// A building-insights document.
    Insights,
}

/// Geometry read from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    kind: DocumentKind,
}

impl JsonFileSource {
    /// Create a source reading from `path`, detecting the document kind.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: DocumentKind::Detect,
        }
    }

    /// Read the file as `kind` instead of detecting it.
    pub fn with_kind(mut self, kind: DocumentKind) -> Self {
        self.kind = kind;
        self
    }

    /// Path the source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Document kind the source expects.
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }
}

impl GeometrySource for JsonFileSource {
    fn fetch(&self, _site: &Site) -> Result<GeometryDocument> {
        let contents = std::fs::read_to_string(&self.path)?;
        match self.kind {
            DocumentKind::Detect => parse_geometry_document(&contents),
            DocumentKind::Geometry => Ok(GeometryDocument {
                geometry: serde_json::from_str(&contents)?,
                estimated: false,
            }),
            DocumentKind::Insights => insights_document(serde_json::from_str(&contents)?),
        }
    }
}

/// Parse either a roof geometry or a building-insights JSON document.
pub fn parse_geometry_document(contents: &str) -> Result<GeometryDocument> {
    let value: serde_json::Value = serde_json::from_str(contents)?;
    if value.get("solarPotential").is_some() {
        return insights_document(serde_json::from_value(value)?);
    }
    Ok(GeometryDocument {
        geometry: serde_json::from_value(value)?,
        estimated: false,
    })
}

fn insights_document(insights: BuildingInsights) -> Result<GeometryDocument> {
    let estimated = insights.is_estimate;
    Ok(GeometryDocument {
        geometry: RoofGeometry::try_from(insights)?,
        estimated,
    })
}

/// Result of [`acquire_geometry`].
#[derive(Debug, Clone, PartialEq)]
pub struct AcquiredGeometry {
    /// Geometry to estimate from.
    pub geometry: RoofGeometry,
    /// True when the geometry is a stand-in.
    pub estimated: bool,
    /// Why the source failed, when the fallback was used.
    pub source_error: Option<String>,
}

/// Fetch geometry from `source`, substituting fallback geometry on failure.
pub fn acquire_geometry<S: GeometrySource + ?Sized>(source: &S, site: &Site) -> AcquiredGeometry {
    match source.fetch(site) {
        Ok(document) => AcquiredGeometry {
            geometry: document.geometry,
            estimated: document.estimated,
            source_error: None,
        },
        Err(err) => {
            warn!(
                "geometry unavailable for ({}, {}), using fallback: {err}",
                site.latitude, site.longitude
            );
            AcquiredGeometry {
                geometry: fallback_geometry(site),
                estimated: true,
                source_error: Some(err.to_string()),
            }
        }
    }
}
