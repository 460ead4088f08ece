#![deny(missing_docs)]
//! Roofline command-line interface.
//!
//! Estimates roof replacement costs from geometry files, building-insights
//! documents, directories of either, or bare coordinates.

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use log::info;
use roofline_core::{
    DocumentKind, EstimateEntry, EstimateRecord, EstimateStatus, GeometryDocument,
    GeometrySource, JsonFileSource, PricingRates, Site, acquire_geometry, compute_estimate,
    fallback_geometry, format_currency, format_thousands, render_estimates_markdown, render_json,
    validate_geometry,
};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "roofline", version, about = "Roofline CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Default)]
#[command(group(
    ArgGroup::new("source")
        .required(false)
        .args(&["geometry", "insights", "dir"])
))]
struct SourceArgs {
    /// Roof geometry JSON file.
    #[arg(long)]
    geometry: Option<PathBuf>,
    /// Building-insights JSON file.
    #[arg(long)]
    insights: Option<PathBuf>,
    /// Directory of geometry or building-insights JSON files.
    #[arg(long)]
    dir: Option<PathBuf>,
}

#[derive(Args, Clone, Default)]
struct SiteArgs {
    /// Site latitude; with no file source, estimates from fallback geometry.
    #[arg(long, requires = "longitude", allow_negative_numbers = true)]
    latitude: Option<f64>,
    /// Site longitude.
    #[arg(long, requires = "latitude", allow_negative_numbers = true)]
    longitude: Option<f64>,
    /// Street address recorded with the estimate.
    #[arg(long)]
    address: Option<String>,
}

#[derive(Args, Clone)]
struct RateArgs {
    /// Price per square for 3-tab shingles.
    #[arg(long = "rate-low", env = "ROOFLINE_RATE_LOW", default_value_t = PricingRates::DEFAULT_LOW)]
    low: f64,
    /// Price per square for architectural shingles.
    #[arg(long = "rate-mid", env = "ROOFLINE_RATE_MID", default_value_t = PricingRates::DEFAULT_MID)]
    mid: f64,
    /// Price per square for premium shingles.
    #[arg(long = "rate-high", env = "ROOFLINE_RATE_HIGH", default_value_t = PricingRates::DEFAULT_HIGH)]
    high: f64,
}

impl Default for RateArgs {
    fn default() -> Self {
        Self {
            low: PricingRates::DEFAULT_LOW,
            mid: PricingRates::DEFAULT_MID,
            high: PricingRates::DEFAULT_HIGH,
        }
    }
}

impl RateArgs {
    fn to_rates(&self) -> CliResult<PricingRates> {
        let rates = PricingRates::new(self.low, self.mid, self.high);
        rates.validate()?;
        Ok(rates)
    }
}

#[derive(Args, Clone)]
struct RunArgs {
    /// Reject negative, non-finite, or out-of-range geometry.
    #[arg(long)]
    strict: bool,
    /// Maximum number of files estimated concurrently.
    #[arg(short = 'j', long, default_value_t = 5)]
    concurrency: usize,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            strict: false,
            concurrency: 5,
        }
    }
}

#[derive(Args, Clone)]
struct OutputArgs {
    /// Output format for report data.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write the report to a file instead of stdout.
    #[arg(long = "report-output")]
    report_output: Option<PathBuf>,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
    Record,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate roof replacement cost from a file, a directory, or coordinates.
    Estimate {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        site: SiteArgs,
        #[command(flatten)]
        rates: RateArgs,
        #[command(flatten)]
        run: RunArgs,
        #[command(flatten)]
        report: OutputArgs,
    },
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate {
            source,
            site,
            rates,
            run,
            report,
        } => run_estimate(source, site, rates, run, report).await?,
    }

    Ok(())
}

#[cfg(test)]
fn main() {}

async fn run_estimate(
    source: SourceArgs,
    site: SiteArgs,
    rates: RateArgs,
    run: RunArgs,
    report: OutputArgs,
) -> CliResult<()> {
    let rates = rates.to_rates()?;
    let site = resolve_site(&site);
    let source = resolve_source_args(&source, site.as_ref())?;
    let targets = load_targets(source).await?;
    if targets.is_empty() {
        println!("No geometry files found to estimate.");
        return Ok(());
    }
    info!("estimating {} target(s)", targets.len());

    let settings = Arc::new(EstimateSettings {
        rates,
        strict: run.strict,
        site,
    });
    let concurrency = if run.concurrency == 0 {
        1
    } else {
        run.concurrency
    };
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut tasks = JoinSet::new();

    for target in targets {
        let permit = semaphore.clone().acquire_owned().await?;
        let settings = settings.clone();
        tasks.spawn_blocking(move || {
            let _permit = permit;
            estimate_target(target, &settings)
        });
    }

    let mut entries = Vec::new();
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(entry) => entries.push(entry),
            Err(err) => entries.push(entry_from_task_error(err)),
        }
    }
    entries.sort_by(|a, b| a.source.cmp(&b.source));

    emit_estimates(&entries, &report).await?;

    Ok(())
}

struct EstimateSettings {
    rates: PricingRates,
    strict: bool,
    site: Option<Site>,
}

fn resolve_site(args: &SiteArgs) -> Option<Site> {
    let (latitude, longitude) = (args.latitude?, args.longitude?);
    let site = Site::new(latitude, longitude);
    Some(match &args.address {
        Some(address) => site.with_address(address.trim()),
        None => site,
    })
}

fn resolve_source_args(source: &SourceArgs, site: Option<&Site>) -> CliResult<EstimateSource> {
    if let Some(path) = source.geometry.clone() {
        return Ok(EstimateSource::File(path, DocumentKind::Geometry));
    }
    if let Some(path) = source.insights.clone() {
        return Ok(EstimateSource::File(path, DocumentKind::Insights));
    }
    if let Some(dir) = source.dir.clone() {
        return Ok(EstimateSource::Dir(dir));
    }
    if site.is_some() {
        return Ok(EstimateSource::Coordinates);
    }
    Err("provide --geometry, --insights, --dir, or --latitude with --longitude".into())
}

async fn load_geometry_paths_from_dir(path: &Path) -> CliResult<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(path).await?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let file_type = entry.file_type().await?;
        if !file_type.is_file() {
            continue;
        }
        let entry_path = entry.path();
        if is_hidden_path(&entry_path) || !is_json_path(&entry_path) {
            continue;
        }
        files.push(entry_path);
    }
    files.sort();
    Ok(files)
}

fn is_hidden_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn is_json_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

async fn load_targets(source: EstimateSource) -> CliResult<Vec<EstimateTarget>> {
    match source {
        EstimateSource::File(path, kind) => Ok(vec![EstimateTarget::File { path, kind }]),
        EstimateSource::Dir(dir) => {
            let paths = load_geometry_paths_from_dir(&dir).await?;
            Ok(paths
                .into_iter()
                .map(|path| EstimateTarget::File {
                    path,
                    kind: DocumentKind::Detect,
                })
                .collect())
        }
        EstimateSource::Coordinates => Ok(vec![EstimateTarget::Coordinates]),
    }
}

enum EstimateSource {
    File(PathBuf, DocumentKind),
    Dir(PathBuf),
    Coordinates,
}

enum EstimateTarget {
    File { path: PathBuf, kind: DocumentKind },
    Coordinates,
}

fn estimate_target(target: EstimateTarget, settings: &EstimateSettings) -> EstimateEntry {
    match target {
        EstimateTarget::File { path, kind } => estimate_file(path, kind, settings),
        EstimateTarget::Coordinates => estimate_coordinates(settings),
    }
}

fn estimate_file(path: PathBuf, kind: DocumentKind, settings: &EstimateSettings) -> EstimateEntry {
    let label = path.display().to_string();
    let source = JsonFileSource::new(path).with_kind(kind);
    let mut errors = Vec::new();
    let document = match &settings.site {
        Some(site) => {
            let acquired = acquire_geometry(&source, site);
            if let Some(err) = acquired.source_error {
                errors.push(format!("{err}; used fallback geometry"));
            }
            GeometryDocument {
                geometry: acquired.geometry,
                estimated: acquired.estimated,
            }
        }
        None => match source.fetch(&Site::default()) {
            Ok(document) => document,
            Err(err) => return EstimateEntry::failed(label, err.to_string()),
        },
    };

    let mut entry = populate_estimate(EstimateEntry::new(label), document, settings);
    entry.errors.extend(errors);
    entry
}

fn estimate_coordinates(settings: &EstimateSettings) -> EstimateEntry {
    let Some(site) = &settings.site else {
        return EstimateEntry::failed("unknown", "no coordinates provided");
    };
    let document = GeometryDocument {
        geometry: fallback_geometry(site),
        estimated: true,
    };
    populate_estimate(
        EstimateEntry::new(format!("{}, {}", site.latitude, site.longitude)),
        document,
        settings,
    )
}

fn populate_estimate(
    mut entry: EstimateEntry,
    document: GeometryDocument,
    settings: &EstimateSettings,
) -> EstimateEntry {
    entry.site = settings.site.clone();
    if settings.strict {
        if let Err(err) = validate_geometry(&document.geometry) {
            entry.status = EstimateStatus::Failed(err.to_string());
            return entry;
        }
    }
    entry.status = if document.estimated {
        EstimateStatus::Estimated
    } else {
        EstimateStatus::Measured
    };
    entry.report = Some(compute_estimate(&document.geometry, &settings.rates));
    entry
}

fn entry_from_task_error(error: tokio::task::JoinError) -> EstimateEntry {
    EstimateEntry::failed("unknown", error.to_string())
}

fn estimate_records(entries: &[EstimateEntry]) -> Vec<EstimateRecord> {
    entries
        .iter()
        .filter_map(|entry| {
            let report = entry.report.as_ref()?;
            let site = entry.site.clone().unwrap_or_default();
            Some(EstimateRecord::from_report(report, &site))
        })
        .collect()
}

async fn emit_estimates(entries: &[EstimateEntry], output: &OutputArgs) -> CliResult<()> {
    let contents = match output.format {
        OutputFormat::Text => render_estimates_text(entries),
        OutputFormat::Markdown => render_estimates_markdown(entries),
        OutputFormat::Json => render_json(entries)?,
        OutputFormat::Record => render_json(&estimate_records(entries))?,
    };
    emit_output(output, contents).await
}

async fn emit_output(output: &OutputArgs, contents: String) -> CliResult<()> {
    if let Some(path) = &output.report_output {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, contents).await?;
    } else {
        print!("{contents}");
    }
    Ok(())
}

fn render_estimates_text(entries: &[EstimateEntry]) -> String {
    let mut output = String::new();
    for entry in entries {
        let _ = writeln!(output, "Source: {}", entry.source);
        if let Some(site) = &entry.site {
            if let Some(address) = &site.address {
                let _ = writeln!(output, "Address: {address}");
            }
            let _ = writeln!(output, "Location: {}, {}", site.latitude, site.longitude);
        }

        match &entry.status {
            EstimateStatus::Measured => {
                let _ = writeln!(output, "Status: measured");
            }
            EstimateStatus::Estimated => {
                let _ = writeln!(output, "Status: estimated (fallback geometry)");
            }
            EstimateStatus::Failed(error) => {
                let _ = writeln!(output, "Status: failed ({error})");
            }
            EstimateStatus::Pending => {
                let _ = writeln!(output, "Status: pending");
            }
        }

        if let Some(report) = &entry.report {
            let summary = &report.summary;
            let _ = writeln!(
                output,
                "Roof: {} sq ft, {:.1} squares, {} facet(s), pitch {}",
                format_thousands(summary.total_area_square_feet),
                summary.roof_squares,
                summary.facet_count,
                summary.predominant_pitch
            );
            let _ = writeln!(
                output,
                "Complexity: {} (score {}), waste {}%",
                report.complexity.tier, report.complexity.score, report.waste_factor
            );
            let linear = &report.linear;
            let _ = writeln!(
                output,
                "Linear ft: ridge {}, hip {}, valley {}, eave {}, rake {}, flashing {}",
                linear.ridge_feet,
                linear.hip_feet,
                linear.valley_feet,
                linear.eave_feet,
                linear.rake_feet,
                linear.flashing_feet
            );
            let materials = &report.materials;
            let _ = writeln!(
                output,
                "Materials: {} 3-tab bundles, {} architectural bundles, {} underlayment rolls, {} drip edge, {} ridge cap bundles, {} lbs nails",
                materials.bundles_3_tab,
                materials.bundles_architectural,
                materials.underlayment_rolls,
                materials.drip_edge_pieces,
                materials.ridge_cap_bundles,
                materials.nails_pounds
            );
            let _ = writeln!(
                output,
                "Price: {} / {} / {}",
                format_currency(report.prices.low),
                format_currency(report.prices.mid),
                format_currency(report.prices.high)
            );
        }

        if !entry.errors.is_empty() {
            let _ = writeln!(output, "Errors:");
            for error in &entry.errors {
                let _ = writeln!(output, "- {error}");
            }
        }
        let _ = writeln!(output);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::{
        Cli, Commands, EstimateSettings, EstimateSource, EstimateTarget, OutputArgs, OutputFormat,
        RateArgs, RunArgs, SiteArgs, SourceArgs, emit_estimates, estimate_records, estimate_target,
        load_geometry_paths_from_dir, load_targets, render_estimates_text, resolve_site,
        resolve_source_args, run_estimate,
    };
    use clap::Parser;
    use roofline_core::{
        ComplexityTier, DocumentKind, EstimateEntry, EstimateStatus, PricingRates, Site,
    };
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const FLAT_GEOMETRY: &str = r#"{ "totalAreaSquareMeters": 2322.576 }"#;
    const INSIGHTS: &str = r#"{
        "solarPotential": {
            "wholeRoofStats": { "areaMeters2": 185.8 },
            "roofSegmentStats": [
                { "pitchDegrees": 26.565, "azimuthDegrees": 180.0, "stats": { "areaMeters2": 92.9 } },
                { "pitchDegrees": 26.565, "azimuthDegrees": 0.0, "stats": { "areaMeters2": 92.9 } }
            ]
        },
        "isEstimate": true
    }"#;

    fn settings(site: Option<Site>, strict: bool) -> EstimateSettings {
        EstimateSettings {
            rates: PricingRates::default(),
            strict,
            site,
        }
    }

    fn temp_root() -> PathBuf {
        let root = std::env::temp_dir().join(unique_dir_name());
        std::fs::create_dir_all(&root).expect("create temp dir");
        root
    }

    fn write_file(root: &Path, name: &str, contents: &str) -> PathBuf {
        let path = root.join(name);
        std::fs::write(&path, contents).expect("write file");
        path
    }

    #[test]
    fn parses_estimate_with_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "roofline",
            "estimate",
            "--latitude",
            "33.4484",
            "--longitude",
            "-112.074",
            "--format",
            "record",
        ])
        .expect("parse");

        let Commands::Estimate { site, report, .. } = cli.command;
        assert_eq!(site.latitude, Some(33.4484));
        assert_eq!(site.longitude, Some(-112.074));
        assert_eq!(report.format, OutputFormat::Record);
    }

    #[test]
    fn rejects_multiple_file_sources() {
        let result = Cli::try_parse_from([
            "roofline",
            "estimate",
            "--geometry",
            "a.json",
            "--dir",
            "roofs",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_latitude_without_longitude() {
        let result = Cli::try_parse_from(["roofline", "estimate", "--latitude", "40.0"]);
        assert!(result.is_err());
    }

    #[test]
    fn rate_args_are_validated() {
        let rates = RateArgs {
            low: 600.0,
            mid: 550.0,
            high: 750.0,
        };
        let error = rates.to_rates().unwrap_err();
        assert!(error.to_string().contains("invalid rates"));

        let rates = RateArgs::default().to_rates().expect("default rates");
        assert_eq!(rates, PricingRates::default());
    }

    #[test]
    fn resolve_source_prefers_geometry_then_coordinates() {
        let args = SourceArgs {
            geometry: Some(PathBuf::from("roof.json")),
            ..SourceArgs::default()
        };
        match resolve_source_args(&args, None).expect("source") {
            EstimateSource::File(path, kind) => {
                assert_eq!(path, PathBuf::from("roof.json"));
                assert_eq!(kind, DocumentKind::Geometry);
            }
            _ => panic!("expected geometry file"),
        }

        let site = Site::new(40.0, -75.0);
        assert!(matches!(
            resolve_source_args(&SourceArgs::default(), Some(&site)).expect("source"),
            EstimateSource::Coordinates
        ));
        assert!(resolve_source_args(&SourceArgs::default(), None).is_err());
    }

    #[test]
    fn resolve_site_needs_both_coordinates() {
        assert!(resolve_site(&SiteArgs::default()).is_none());

        let site = resolve_site(&SiteArgs {
            latitude: Some(1.5),
            longitude: Some(2.5),
            address: Some("  9 Elm St ".to_string()),
        })
        .expect("site");
        assert_eq!(site.address.as_deref(), Some("9 Elm St"));
        assert_eq!(site.longitude, 2.5);
    }

    #[tokio::test]
    async fn dir_listing_keeps_visible_json_files_sorted() {
        let root = temp_root();
        write_file(&root, "b.json", FLAT_GEOMETRY);
        write_file(&root, "a.JSON", FLAT_GEOMETRY);
        write_file(&root, ".hidden.json", FLAT_GEOMETRY);
        write_file(&root, "notes.txt", "not geometry");
        std::fs::create_dir_all(root.join("nested.json")).expect("nested dir");

        let files = load_geometry_paths_from_dir(&root).await.expect("files");
        let names: Vec<String> = files
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.JSON", "b.json"]);

        let targets = load_targets(EstimateSource::Dir(root.clone()))
            .await
            .expect("targets");
        assert_eq!(targets.len(), 2);
        assert!(targets.iter().all(|target| matches!(
            target,
            EstimateTarget::File {
                kind: DocumentKind::Detect,
                ..
            }
        )));

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[test]
    fn insights_file_keeps_estimate_flag_and_rejects_plain_geometry() {
        let root = temp_root();
        let insights = write_file(&root, "insights.json", INSIGHTS);
        let geometry = write_file(&root, "roof.json", FLAT_GEOMETRY);

        let decoded = estimate_target(
            EstimateTarget::File {
                path: insights,
                kind: DocumentKind::Insights,
            },
            &settings(None, false),
        );
        assert_eq!(decoded.status, EstimateStatus::Estimated);
        assert_eq!(decoded.report.expect("report").summary.facet_count, 2);

        let wrong = estimate_target(
            EstimateTarget::File {
                path: geometry,
                kind: DocumentKind::Insights,
            },
            &settings(None, false),
        );
        match &wrong.status {
            EstimateStatus::Failed(message) => assert!(message.contains("geometry unavailable")),
            other => panic!("expected failure, got {other:?}"),
        }

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[test]
    fn estimate_file_produces_measured_report() {
        let root = temp_root();
        let path = write_file(&root, "roof.json", FLAT_GEOMETRY);

        let entry = estimate_target(
            EstimateTarget::File {
                path,
                kind: DocumentKind::Geometry,
            },
            &settings(None, false),
        );

        assert_eq!(entry.status, EstimateStatus::Measured);
        let report = entry.report.expect("report");
        assert_eq!(report.summary.total_area_square_feet, 25000);
        assert_eq!(report.prices.low, 127_875);

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[test]
    fn missing_file_without_coordinates_fails() {
        let missing = std::env::temp_dir().join(unique_dir_name()).join("roof.json");
        let entry = estimate_target(
            EstimateTarget::File {
                path: missing,
                kind: DocumentKind::Detect,
            },
            &settings(None, false),
        );

        assert!(matches!(entry.status, EstimateStatus::Failed(_)));
        assert!(entry.report.is_none());
    }

    #[test]
    fn missing_file_with_coordinates_falls_back() {
        let missing = std::env::temp_dir().join(unique_dir_name()).join("roof.json");
        let site = Site::new(39.7392, -104.9903);
        let entry = estimate_target(
            EstimateTarget::File {
                path: missing,
                kind: DocumentKind::Detect,
            },
            &settings(Some(site.clone()), false),
        );

        assert_eq!(entry.status, EstimateStatus::Estimated);
        assert_eq!(entry.site, Some(site));
        assert_eq!(entry.errors.len(), 1);
        assert!(entry.errors[0].contains("used fallback geometry"));
        assert!(entry.report.is_some());
    }

    #[test]
    fn strict_mode_rejects_negative_area() {
        let root = temp_root();
        let path = write_file(&root, "bad.json", r#"{ "totalAreaSquareMeters": -5.0 }"#);

        let target = || EstimateTarget::File {
            path: path.clone(),
            kind: DocumentKind::Geometry,
        };
        let strict = estimate_target(target(), &settings(None, true));
        match &strict.status {
            EstimateStatus::Failed(message) => assert!(message.contains("invalid geometry")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(strict.report.is_none());

        let lenient = estimate_target(target(), &settings(None, false));
        assert_eq!(lenient.status, EstimateStatus::Measured);

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[test]
    fn coordinates_target_uses_fallback_geometry() {
        let site = Site::new(30.2672, -97.7431).with_address("100 Congress Ave");
        let entry =
            estimate_target(EstimateTarget::Coordinates, &settings(Some(site), false));

        assert_eq!(entry.source, "30.2672, -97.7431");
        assert_eq!(entry.status, EstimateStatus::Estimated);
        let report = entry.report.expect("report");
        assert!((3..=7).contains(&report.summary.facet_count));
    }

    #[test]
    fn text_rendering_covers_success_and_failure() {
        let root = temp_root();
        let path = write_file(&root, "roof.json", FLAT_GEOMETRY);
        let mut measured = estimate_target(
            EstimateTarget::File {
                path,
                kind: DocumentKind::Geometry,
            },
            &settings(Some(Site::new(1.0, 2.0).with_address("1 Main St")), false),
        );
        measured.errors.push("note".to_string());
        let failed = EstimateEntry::failed("other.json", "io error: missing");

        let output = render_estimates_text(&[measured, failed]);
        assert!(output.contains("Address: 1 Main St"));
        assert!(output.contains("Status: measured"));
        assert!(output.contains("Roof: 25,000 sq ft, 250.0 squares, 1 facet(s), pitch 0:12"));
        assert!(output.contains("Complexity: simple (score 10), waste 10%"));
        assert!(output.contains("Price: $127,875 / $151,250 / $206,250"));
        assert!(output.contains("- note"));
        assert!(output.contains("Status: failed (io error: missing)"));

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[test]
    fn record_output_skips_failed_entries() {
        let site = Site::new(30.0, -97.0);
        let estimated =
            estimate_target(EstimateTarget::Coordinates, &settings(Some(site), false));
        let failed = EstimateEntry::failed("bad.json", "json error");

        let records = estimate_records(&[estimated, failed]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].latitude, 30.0);
    }

    #[tokio::test]
    async fn emit_estimates_writes_every_format() {
        let root = temp_root();
        let entries = vec![
            estimate_target(
                EstimateTarget::Coordinates,
                &settings(Some(Site::new(10.0, 20.0)), false),
            ),
        ];

        for (format, needle) in [
            (OutputFormat::Text, "Status: estimated"),
            (OutputFormat::Markdown, "# Roofline Estimate Report"),
            (OutputFormat::Json, "\"status\": \"estimated\""),
            (OutputFormat::Record, "\"roof_area_sqft\""),
        ] {
            let path = root.join("out").join(format!("{format:?}.txt"));
            let output = OutputArgs {
                format,
                report_output: Some(path.clone()),
            };
            emit_estimates(&entries, &output).await.expect("emit");
            let contents = std::fs::read_to_string(&path).expect("read output");
            assert!(contents.contains(needle), "{format:?} missing {needle}");
        }

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn run_estimate_over_directory_writes_report() {
        let root = temp_root();
        let dir = root.join("roofs");
        std::fs::create_dir_all(&dir).expect("roofs dir");
        write_file(&dir, "flat.json", FLAT_GEOMETRY);
        write_file(&dir, "insights.json", INSIGHTS);
        write_file(&dir, "broken.json", "{ nope");
        let report_path = root.join("report.json");

        run_estimate(
            SourceArgs {
                dir: Some(dir.clone()),
                ..SourceArgs::default()
            },
            SiteArgs::default(),
            RateArgs::default(),
            RunArgs {
                strict: false,
                concurrency: 2,
            },
            OutputArgs {
                format: OutputFormat::Json,
                report_output: Some(report_path.clone()),
            },
        )
        .await
        .expect("run estimate");

        let contents = std::fs::read_to_string(&report_path).expect("read report");
        let parsed: serde_json::Value = serde_json::from_str(&contents).expect("parse report");
        let entries = parsed.as_array().expect("array");
        assert_eq!(entries.len(), 3);
        assert!(entries[0]["source"].as_str().unwrap().ends_with("broken.json"));
        assert_eq!(entries[0]["status"]["status"], "failed");
        assert_eq!(entries[1]["status"]["status"], "measured");
        assert_eq!(entries[2]["status"]["status"], "estimated");
        assert_eq!(
            entries[2]["report"]["complexity"]["tier"],
            serde_json::to_value(ComplexityTier::Simple).unwrap()
        );

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn run_estimate_rejects_unordered_rates() {
        let result = run_estimate(
            SourceArgs::default(),
            SiteArgs {
                latitude: Some(1.0),
                longitude: Some(1.0),
                address: None,
            },
            RateArgs {
                low: 1.0,
                mid: 3.0,
                high: 2.0,
            },
            RunArgs::default(),
            OutputArgs {
                format: OutputFormat::Text,
                report_output: None,
            },
        )
        .await;
        assert!(result.is_err());
    }

    fn unique_dir_name() -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system time")
            .as_nanos();
        let count = COUNTER.fetch_add(1, Ordering::Relaxed);
        PathBuf::from(format!("roofline_cli_test_{nanos}_{count}"))
    }
}
