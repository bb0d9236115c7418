use anyhow::Context;
use clap::{Parser, ValueEnum};
use hotquad::export;
use hotquad::trip::{TripReader, ingest};
use hotquad::{Cluster, Config, HotspotFinder, Quadtree};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Geojson,
}

/// Index trip locations in a quadtree and export its nodes or hotspots.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Trip CSV file
    input: PathBuf,

    /// JSON (or TOML with the `toml` feature) tree configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read at most this many trips
    #[arg(short, long)]
    limit: Option<usize>,

    #[arg(long)]
    leaf_capacity: Option<usize>,

    #[arg(long)]
    max_depth: Option<u32>,

    /// Export the given number of hotspot clusters instead of the whole tree
    #[arg(long)]
    hotspots: Option<usize>,

    #[arg(short, long, value_enum, default_value = "json")]
    format: Format,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;

    #[cfg(feature = "toml")]
    if path.extension().is_some_and(|ext| ext == "toml") {
        return Ok(Config::from_toml(&text)?);
    }

    Ok(Config::from_json(&text)?)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    if let Some(capacity) = args.leaf_capacity {
        config.leaf_capacity = capacity;
    }
    if let Some(max_depth) = args.max_depth {
        config = config.with_max_depth(max_depth);
    }

    let mut tree = Quadtree::from_config(&config)?;

    let mut trips = TripReader::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    if let Some(limit) = args.limit {
        trips = trips.with_limit(limit);
    }
    let stats = ingest(&mut tree, trips)?;
    info!(
        "Indexed {} locations from {} trips into {} nodes (depth {})",
        stats.inserted,
        stats.trips,
        tree.node_count(),
        tree.max_depth_reached()
    );

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout())),
    };

    let clusters = args.hotspots.map(|count| HotspotFinder::new(&tree).find(count));
    if let Some(clusters) = &clusters {
        info!(
            "Found {} hotspots, largest has {} nodes",
            clusters.len(),
            clusters.first().map_or(0, |c| c.len())
        );
    }

    match (args.format, &clusters) {
        (Format::Json, Some(clusters)) => {
            export::write_hotspots_json(&tree, clusters, &mut writer)?
        }
        (Format::Json, None) => export::write_tree_json(&tree, &mut writer)?,
        (Format::Geojson, clusters) => write_geojson(&tree, clusters.as_deref(), &mut writer)?,
    }
    writer.flush()?;

    Ok(())
}

#[cfg(feature = "geojson")]
fn write_geojson<W: Write>(
    tree: &Quadtree,
    clusters: Option<&[Cluster]>,
    writer: W,
) -> anyhow::Result<()> {
    let collection = match clusters {
        Some(clusters) => export::geojson::hotspots_to_geojson(tree, clusters),
        None => export::geojson::tree_to_geojson(tree),
    };
    export::geojson::write_geojson(&collection, writer)?;
    Ok(())
}

#[cfg(not(feature = "geojson"))]
fn write_geojson<W: Write>(
    _tree: &Quadtree,
    _clusters: Option<&[Cluster]>,
    _writer: W,
) -> anyhow::Result<()> {
    anyhow::bail!("GeoJSON output requires the `geojson` feature")
}
