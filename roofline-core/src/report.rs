//! Report formatting utilities for Roofline outputs.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::domain::{EstimateReport, NormalizedFacet, Site};

/// Where the geometry behind an estimate came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum EstimateStatus {
    /// Estimate has not run yet.
    Pending,
    /// Geometry was measured by the provider.
    Measured,
    /// Geometry was a stand-in; figures are indicative only.
    Estimated,
    /// No estimate could be produced.
    Failed(String),
}

/// One estimate with the context it was produced in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateEntry {
    /// Input the estimate came from (file path or coordinates).
    pub source: String,
    /// Site the estimate is for, when known.
    pub site: Option<Site>,
    /// Geometry provenance.
    pub status: EstimateStatus,
    /// Estimate, when one was produced.
    pub report: Option<EstimateReport>,
    /// Non-fatal problems encountered along the way.
    pub errors: Vec<String>,
}

impl EstimateEntry {
    /// Create a pending entry.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            site: None,
            status: EstimateStatus::Pending,
            report: None,
            errors: Vec::new(),
        }
    }

    /// Create an entry for an input that could not be estimated.
    pub fn failed(source: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            site: None,
            status: EstimateStatus::Failed(error.into()),
            report: None,
            errors: Vec::new(),
        }
    }
}

/// Render a list of estimates as Markdown.
pub fn render_estimates_markdown(entries: &[EstimateEntry]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Roofline Estimate Report\n");
    for entry in entries {
        let _ = writeln!(output, "## {}\n", entry.source);
        append_site(&mut output, entry.site.as_ref());
        append_status(&mut output, &entry.status);
        match &entry.report {
            Some(report) => append_report(&mut output, report),
            None => {
                let _ = writeln!(output, "Estimate unavailable.\n");
            }
        }
        append_errors(&mut output, &entry.errors);
    }
    output
}

/// Render any serializable report payload as JSON.
pub fn render_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}

/// Group digits in threes with commas, e.g. `127875 -> "127,875"`.
pub fn format_thousands(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}{}", group_digits(value.unsigned_abs()))
}

/// Format whole currency units, e.g. `$127,875`.
pub fn format_currency(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}${}", group_digits(value.unsigned_abs()))
}

fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

fn append_site(output: &mut String, site: Option<&Site>) {
    let Some(site) = site else {
        return;
    };
    if let Some(address) = &site.address {
        let _ = writeln!(output, "- Address: {address}");
    }
    let _ = writeln!(
        output,
        "- Location: {:.6}, {:.6}",
        site.latitude, site.longitude
    );
}

fn append_status(output: &mut String, status: &EstimateStatus) {
    match status {
        EstimateStatus::Pending => {
            let _ = writeln!(output, "- Status: pending");
        }
        EstimateStatus::Measured => {
            let _ = writeln!(output, "- Status: measured");
        }
        EstimateStatus::Estimated => {
            let _ = writeln!(
                output,
                "- Status: estimated (stand-in geometry; confirm with a site visit)"
            );
        }
        EstimateStatus::Failed(error) => {
            let _ = writeln!(output, "- Status: failed ({error})");
        }
    }
    let _ = writeln!(output);
}

fn append_report(output: &mut String, report: &EstimateReport) {
    let summary = &report.summary;
    let _ = writeln!(output, "### Roof summary");
    let _ = writeln!(
        output,
        "- Area: {} sq ft",
        format_thousands(summary.total_area_square_feet)
    );
    let _ = writeln!(output, "- Squares: {:.1}", summary.roof_squares);
    let _ = writeln!(output, "- Facets: {}", summary.facet_count);
    let _ = writeln!(output, "- Predominant pitch: {}\n", summary.predominant_pitch);

    let complexity = &report.complexity;
    let _ = writeln!(output, "### Complexity");
    let _ = writeln!(
        output,
        "- Tier: {} (score {}, {}%)",
        complexity.tier, complexity.score, complexity.percentage
    );
    let _ = writeln!(output, "- {}", complexity.description);
    let _ = writeln!(output, "- Waste factor: {}%\n", report.waste_factor);

    append_facets(output, &report.facets);

    let linear = &report.linear;
    let _ = writeln!(output, "### Linear measurements");
    for (name, feet) in [
        ("Ridges", linear.ridge_feet),
        ("Hips", linear.hip_feet),
        ("Valleys", linear.valley_feet),
        ("Eaves", linear.eave_feet),
        ("Rakes", linear.rake_feet),
        ("Flashing", linear.flashing_feet),
    ] {
        let _ = writeln!(output, "- {name}: {} ft", format_thousands(feet));
    }
    let _ = writeln!(output);

    let materials = &report.materials;
    let _ = writeln!(output, "### Materials");
    for (name, quantity) in [
        ("3-tab shingle bundles", materials.bundles_3_tab),
        ("Architectural shingle bundles", materials.bundles_architectural),
        ("Underlayment rolls", materials.underlayment_rolls),
        ("Drip edge pieces (10 ft)", materials.drip_edge_pieces),
        ("Ridge cap bundles", materials.ridge_cap_bundles),
        ("Nails (lbs)", materials.nails_pounds),
    ] {
        let _ = writeln!(output, "- {name}: {}", format_thousands(quantity));
    }
    let _ = writeln!(output);

    let prices = &report.prices;
    let _ = writeln!(output, "### Price range");
    let _ = writeln!(output, "- 3-tab: {}", format_currency(prices.low));
    let _ = writeln!(output, "- Architectural: {}", format_currency(prices.mid));
    let _ = writeln!(output, "- Premium: {}\n", format_currency(prices.high));
}

fn append_facets(output: &mut String, facets: &[NormalizedFacet]) {
    let _ = writeln!(output, "### Facets");
    let _ = writeln!(output, "| Facet | Pitch | Area | Facing |");
    let _ = writeln!(output, "| --- | --- | --- | --- |");
    for facet in facets {
        let _ = writeln!(
            output,
            "| {} | {} | {} sq ft | {} |",
            facet.label,
            facet.pitch_ratio,
            format_thousands(facet.area_square_feet),
            facet.direction
        );
    }
    let _ = writeln!(output);
}

fn append_errors(output: &mut String, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    let _ = writeln!(output, "### Errors");
    for error in errors {
        let _ = writeln!(output, "- {error}");
    }
    let _ = writeln!(output);
}
