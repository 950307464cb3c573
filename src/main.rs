use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

use reportmap::api::Geocoder;
use reportmap::config::FileConfig;
use reportmap::data::load_reports;
use reportmap::domain::{GeoPoint, SearchQuery, SearchRadius};
use reportmap::geometry::filter_by_radius;
use reportmap::map::{MapDocument, render_html, write_html};

/// Generate an interactive proximity map of geotagged incident reports
///
/// Examples:
///   # Reports within 500m of an address
///   reportmap -a "1 City Hall Square, Boston" -r 500 -d data/reports.csv
///
///   # Skip geocoding with direct coordinates, restrict to one year
///   reportmap --lat 42.3601 --lon -71.0589 -r 1200 -d data/reports.csv -y 2019
///
///   # Use a config file
///   reportmap --config my-settings.toml
#[derive(Parser, Debug)]
#[command(name = "reportmap")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches reportmap.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Free-text address to center the search on (optional if --lat and --lon are provided)
    #[arg(short = 'a', long)]
    address: Option<String>,

    /// Latitude for direct coordinate input (use with --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude for direct coordinate input (use with --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Search radius in meters
    #[arg(short = 'r', long, allow_hyphen_values = true)]
    radius: Option<f64>,

    /// Path to the report dataset CSV
    #[arg(short = 'd', long)]
    data: Option<PathBuf>,

    /// Restrict to reports from a single year
    #[arg(short = 'y', long)]
    year: Option<i32>,

    /// Output HTML file path (defaults to index.html)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };

    let address = args
        .address
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.address.clone()));
    let lat = args.lat.or_else(|| file_config.as_ref().and_then(|c| c.lat));
    let lon = args.lon.or_else(|| file_config.as_ref().and_then(|c| c.lon));
    let radius_m = args
        .radius
        .or_else(|| file_config.as_ref().and_then(|c| c.radius));
    let data = args
        .data
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.data.clone()));
    let year = args
        .year
        .or_else(|| file_config.as_ref().and_then(|c| c.year));
    let output = args
        .output
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.output.clone()));
    let verbose = args.verbose || file_config.as_ref().map(|c| c.verbose).unwrap_or(false);

    if address.is_none() && (lat.is_none() || lon.is_none()) {
        bail!("Must provide either --address/-a, or both --lat and --lon");
    }
    let Some(radius_m) = radius_m else {
        bail!("Must provide a search radius with --radius/-r");
    };
    let Some(data_path) = data else {
        bail!("Must provide a report dataset with --data/-d");
    };

    println!("reportmap - Report Proximity Map Generator");
    println!("==========================================");
    println!();

    let output_path = output.unwrap_or_else(|| PathBuf::from("index.html"));

    if verbose {
        println!("Configuration:");
        if let Some(ref a) = address {
            println!("  Address: {}", a);
        }
        if let (Some(lt), Some(ln)) = (lat, lon) {
            println!("  Coordinates: ({:.4}, {:.4})", lt, ln);
        }
        println!("  Radius: {}m", radius_m);
        println!("  Dataset: {}", data_path.display());
        if let Some(y) = year {
            println!("  Year: {}", y);
        }
        println!("  Output: {}", output_path.display());
        println!();
    }

    // Radius is validated before any network or file work happens.
    let radius = SearchRadius::from_meters(radius_m)?;

    let origin = if let (Some(lt), Some(ln)) = (lat, lon) {
        let point = GeoPoint::new(lt, ln).context("Invalid coordinates")?;
        println!("Using provided coordinates: ({:.4}, {:.4})", lt, ln);
        point
    } else {
        let addr = address.as_ref().unwrap();
        let spinner = create_spinner("Geocoding address...");
        let start = Instant::now();
        let mut geocoder = Geocoder::new().context("Failed to create geocoding client")?;
        let resolved = geocoder
            .geocode(addr)
            .context("Failed to geocode address")?;
        spinner.finish_with_message(format!(
            "Geocoded: {} -> ({:.4}, {:.4}) [{:.1}s]\n  {}",
            addr,
            resolved.location.lat(),
            resolved.location.lon(),
            start.elapsed().as_secs_f32(),
            resolved.display_name
        ));
        resolved.location
    };

    let query = SearchQuery { origin, radius };

    let spinner = create_spinner("Loading report dataset...");
    let start = Instant::now();
    let reports = load_reports(&data_path, year)
        .with_context(|| format!("Failed to load report dataset {:?}", data_path))?;
    spinner.finish_with_message(format!(
        "Loaded {} reports [{:.1}s]",
        reports.len(),
        start.elapsed().as_secs_f32()
    ));
    if reports.is_empty() {
        bail!(
            "No usable reports in the dataset. Check the file's columns and coordinate values, or widen the year restriction"
        );
    }

    let spinner = create_spinner("Filtering reports by distance...");
    let start = Instant::now();
    let total = reports.len();
    let filtered = filter_by_radius(reports, &query);
    spinner.finish_with_message(format!(
        "{} of {} reports within {:.0}m [{:.1}s]",
        filtered.len(),
        total,
        query.radius.meters(),
        start.elapsed().as_secs_f32()
    ));

    let spinner = create_spinner("Rendering map...");
    let start = Instant::now();
    let document = MapDocument::from_filtered(&query, &filtered);
    let html = render_html(&document).context("Failed to render map")?;
    write_html(&output_path, &html).context("Failed to write map artifact")?;
    spinner.finish_with_message(format!(
        "Wrote {} markers ({:.1} KB) [{:.1}s]",
        document.markers().len(),
        html.len() as f64 / 1024.0,
        start.elapsed().as_secs_f32()
    ));

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!();
    println!("Output: {}", output_path.display());
    println!("Open it in a browser to explore the reports.");

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
