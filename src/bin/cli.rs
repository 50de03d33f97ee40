//! trailmend CLI - repair trail geometry from a catalog of GPX captures
//!
//! Usage:
//!   trailmend-cli repair <catalog.json> [--geometry-dir <dir>] [--output <dir>]
//!                        [--hints <file>] [--simplify <tolerance>]
//!
//! The catalog is a JSON array naming each trail, its reference distance
//! and its GPX file. Every trail is repaired against its reference
//! distance; with --output, per-trail record files and a manifest are
//! written for the persistence layer.

use clap::{Parser, Subcommand};
use gpx::{read, Gpx};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use trailmend::{
    geo_utils::douglas_peucker, repair_trail, GpsPoint, HintTable, ManifestEntry, QualityClass,
    RawTrail, RepairConfig, TrailRecord,
};

#[derive(Parser)]
#[command(name = "trailmend-cli")]
#[command(about = "Repair trail geometry against reference distances", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Repair every trail in a catalog and write records + manifest
    Repair {
        /// Catalog JSON listing trails, reference distances and GPX files
        catalog: PathBuf,

        /// Directory containing the GPX files named in the catalog
        /// (default: the catalog's directory)
        #[arg(short, long)]
        geometry_dir: Option<PathBuf>,

        /// Output directory for repaired records and the manifest
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Repair hints JSON file ({trail id -> overrides})
        #[arg(long)]
        hints: Option<PathBuf>,

        /// Douglas-Peucker tolerance in degrees applied to written
        /// geometry (0.0001 is roughly 11 meters)
        #[arg(long)]
        simplify: Option<f64>,
    },
}

/// One catalog line: trail metadata plus where its geometry lives.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogItem {
    id: String,
    name: String,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    country: Option<String>,
    official_distance_km: f64,
    #[serde(default)]
    multi_day: bool,
    #[serde(default = "default_source")]
    source: String,
    file: String,
}

fn default_source() -> String {
    "gpx-file".to_string()
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{:5}] {}", record.level(), record.args())
        })
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Repair {
            catalog,
            geometry_dir,
            output,
            hints,
            simplify,
        } => {
            run_repair(
                &catalog,
                geometry_dir.as_deref(),
                output.as_deref(),
                hints.as_deref(),
                simplify,
                cli.verbose,
            );
        }
    }
}

fn run_repair(
    catalog_path: &Path,
    geometry_dir: Option<&Path>,
    output: Option<&Path>,
    hints_path: Option<&Path>,
    simplify: Option<f64>,
    verbose: bool,
) {
    println!("\n{}", "=".repeat(60));
    println!("Repairing trails from: {}", catalog_path.display());
    println!("{}", "=".repeat(60));

    let items = match load_catalog(catalog_path) {
        Ok(items) => items,
        Err(e) => {
            eprintln!("Error reading catalog: {}", e);
            return;
        }
    };

    let hint_table = match hints_path {
        Some(path) => match load_hints(path) {
            Ok(table) => {
                println!("Loaded {} hint entries from {}", table.len(), path.display());
                table
            }
            Err(e) => {
                eprintln!("Error reading hints: {}", e);
                return;
            }
        },
        None => HintTable::new(),
    };

    let base_dir = geometry_dir
        .map(Path::to_path_buf)
        .or_else(|| catalog_path.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let config = RepairConfig::default();
    let mut records = Vec::new();
    let mut manifest = Vec::new();
    let mut quality_counts = [0usize; 3];

    for item in &items {
        let gpx_path = base_dir.join(&item.file);
        let points = match parse_gpx_file(&gpx_path) {
            Ok(points) => points,
            Err(e) => {
                eprintln!("  [ERR] {} - failed to parse {}: {}", item.id, gpx_path.display(), e);
                continue;
            }
        };

        if verbose {
            println!("\n  Processing: {} ({} raw points)", item.id, points.len());
        }

        let trail = RawTrail::new(
            item.id.clone(),
            item.name.clone(),
            points,
            item.official_distance_km,
        );
        if let Err(e) = trail.validate() {
            eprintln!("  [ERR] {}", e);
            continue;
        }

        let repaired = repair_trail(&trail, &config, hint_table.get(&item.id));

        println!(
            "  [{}] {} - {:.1} km vs {:.1} km official ({:.1}% error, {} points)",
            repaired.quality,
            item.name,
            repaired.computed_km,
            item.official_distance_km,
            repaired.error_percent(),
            repaired.points.len(),
        );
        if verbose && !repaired.applied.is_empty() {
            println!("        applied: {}", repaired.applied.join(", "));
        }

        match repaired.quality {
            QualityClass::Ok => quality_counts[0] += 1,
            QualityClass::Fair => quality_counts[1] += 1,
            QualityClass::High => quality_counts[2] += 1,
        }

        let mut record = TrailRecord::from_repair(
            item.id.clone(),
            item.name.clone(),
            item.region.clone(),
            item.country.clone(),
            item.official_distance_km,
            item.multi_day,
            item.source.clone(),
            &repaired,
        );
        if let Some(tolerance) = simplify {
            record.points = douglas_peucker(&record.points, tolerance);
        }

        manifest.push(ManifestEntry::from_record(&record, repaired.quality));
        records.push(record);
    }

    println!("\nRepaired {} trails", records.len());
    println!(
        "  OK: {}   FAIR: {}   HIGH: {}",
        quality_counts[0], quality_counts[1], quality_counts[2]
    );
    if quality_counts[2] > 0 {
        println!("  HIGH-error trails need a different geometry source.");
    }

    if let Some(output_dir) = output {
        write_results(output_dir, &records, &manifest);
    }
}

/// Load and parse the catalog JSON.
fn load_catalog(path: &Path) -> Result<Vec<CatalogItem>, String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| e.to_string())
}

/// Load the hints table from a JSON file.
fn load_hints(path: &Path) -> Result<HintTable, String> {
    let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
    HintTable::from_json(&json).map_err(|e| e.to_string())
}

/// Parse a single GPX file into a flat point sequence.
///
/// All tracks and track segments are flattened in file order; segment
/// boundaries become gaps the repair engine handles itself.
fn parse_gpx_file(path: &Path) -> Result<Vec<GpsPoint>, String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    let reader = BufReader::new(file);
    let gpx: Gpx = read(reader).map_err(|e| e.to_string())?;

    let mut points = Vec::new();
    for track in &gpx.tracks {
        for segment in &track.segments {
            for pt in &segment.points {
                let position = pt.point();
                points.push(GpsPoint {
                    latitude: position.y(),
                    longitude: position.x(),
                    elevation: pt.elevation,
                });
            }
        }
    }

    if points.is_empty() {
        return Err("No track points found".to_string());
    }

    Ok(points)
}

/// Write per-trail record files and the manifest.
fn write_results(output_dir: &Path, records: &[TrailRecord], manifest: &[ManifestEntry]) {
    println!("\n[Export] Writing records to: {}", output_dir.display());
    fs::create_dir_all(output_dir).expect("Failed to create output directory");

    for record in records {
        let path = output_dir.join(format!("{}.json", record.id));
        let file = File::create(&path).expect("Failed to create record file");
        serde_json::to_writer_pretty(BufWriter::new(file), record)
            .expect("Failed to write record");
    }
    println!("  Written: {} record files", records.len());

    let manifest_path = output_dir.join("manifest.json");
    let file = File::create(&manifest_path).expect("Failed to create manifest file");
    serde_json::to_writer_pretty(BufWriter::new(file), manifest).expect("Failed to write manifest");
    println!("  Written: manifest.json ({} entries)", manifest.len());
}
