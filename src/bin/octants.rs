//! octants CLI - Octant Atlas
//!
//! Thin wrapper over the `octant_atlas` library: resolves configuration,
//! starts logging, and dispatches one subcommand per run.

// Exclude from coverage - CLI binary tested via integration tests
#![cfg_attr(tarpaulin, ignore)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use octant_atlas::core::store::write_json_atomic;
use octant_atlas::core::{
    enrich_stars, galactic_directions, search_stars, AtlasConfig, AtlasEngine, FictionalOverlay,
    JsonRegionStore, JsonStarStore, NationDirectory, StarRecord, StarStore,
};
use octant_atlas::logging::setup_logging;
use octant_atlas::OverlapDetector;

/// Octant Atlas: name galactic octants after their brightest stars.
#[derive(Parser, Debug)]
#[command(name = "octants")]
#[command(version = octant_atlas::VERSION)]
#[command(about = "Octant Atlas: brightest-star region naming and catalog overlap reports")]
#[command(after_help = "EXAMPLES:
  # Rename every region after its brightest star
  octants name-regions --catalog stars.json --regions regions.json

  # Rename, then write one file per region
  octants run --output-dir public/regions

  # Report HIP/HD numbers reused by the fictional catalog
  octants overlap --fictional fictional.json
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    // ═══════════════════════════════════════════════════════════════════════════
    // INPUTS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Config file (default: ./octants.json if present)
    #[arg(short = 'c', long, global = true, value_name = "FILE", help_heading = "INPUTS")]
    config: Option<PathBuf>,

    /// Real star catalog (JSON rows)
    #[arg(long, global = true, value_name = "FILE", help_heading = "INPUTS")]
    catalog: Option<PathBuf>,

    /// Region-definition document
    #[arg(long, global = true, value_name = "FILE", help_heading = "INPUTS")]
    regions: Option<PathBuf>,

    /// Id of the origin star, never chosen as a representative
    #[arg(long, global = true, value_name = "ID", help_heading = "INPUTS")]
    origin_star_id: Option<i64>,

    // ═══════════════════════════════════════════════════════════════════════════
    // LOGGING
    // ═══════════════════════════════════════════════════════════════════════════
    /// Log level or module filter (RUST_LOG overrides)
    #[arg(long, global = true, default_value = "info", help_heading = "LOGGING")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rename every region after its brightest star and save the document.
    NameRegions,

    /// Write one file per region from the document as it stands.
    BuildFiles {
        /// Directory receiving region files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Provenance label written into each file
        #[arg(long)]
        provenance: Option<String>,
    },

    /// Rename regions, then write region files.
    Run {
        /// Directory receiving region files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Provenance label written into each file
        #[arg(long)]
        provenance: Option<String>,
    },

    /// Report fictional stars reusing real HIP/HD identifiers.
    Overlap {
        /// Fictional/overlay catalog
        #[arg(short, long)]
        fictional: Option<PathBuf>,

        /// Report format
        #[arg(long, value_enum, default_value = "text")]
        format: ReportFormat,
    },

    /// Write every star with display name, nation and fictional name.
    Enrich {
        /// Fictional/overlay catalog
        #[arg(short, long)]
        fictional: Option<PathBuf>,

        /// Nation directory
        #[arg(short, long)]
        nations: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Search stars by display, proper or fictional name.
    Search {
        /// Text to look for (case-insensitive)
        query: String,

        /// Maximum results
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Fictional/overlay catalog
        #[arg(short, long)]
        fictional: Option<PathBuf>,

        /// Nation directory
        #[arg(short, long)]
        nations: Option<PathBuf>,

        /// Print JSON instead of one line per star
        #[arg(long)]
        json: bool,
    },

    /// Print galactic direction markers as JSON.
    Directions {
        /// Marker distance from the origin in parsecs
        #[arg(long, default_value = "100.0")]
        distance: f64,

        /// Include octant-diagonal markers
        #[arg(long)]
        grid: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

fn main() {
    // Reset SIGPIPE so piping into head/tail terminates quietly
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    let cli = Cli::parse();

    let _logger = match setup_logging(&cli.log_level) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn resolve_config(cli: &Cli) -> anyhow::Result<AtlasConfig> {
    let cwd = std::env::current_dir().context("reading working directory")?;
    let mut config = AtlasConfig::load(cli.config.as_deref(), &cwd)?;
    if let Some(catalog) = &cli.catalog {
        config.catalog = catalog.clone();
    }
    if let Some(regions) = &cli.regions {
        config.regions = regions.clone();
    }
    if let Some(origin) = cli.origin_star_id {
        config.origin_star_id = origin;
    }
    Ok(config)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = resolve_config(&cli)?;

    match cli.command {
        Commands::NameRegions => {
            let engine = engine_for(&config);
            let summary = engine.name_regions()?;
            print!("{}", summary.render());
        }
        Commands::BuildFiles {
            output_dir,
            provenance,
        } => {
            apply_output_overrides(&mut config, output_dir, provenance);
            let engine = engine_for(&config);
            let written = engine.write_region_files(&config.region_file_builder(), &config.output_dir)?;
            println!("Wrote {} region files to {}", written.len(), config.output_dir.display());
        }
        Commands::Run {
            output_dir,
            provenance,
        } => {
            apply_output_overrides(&mut config, output_dir, provenance);
            let engine = engine_for(&config);
            let (summary, written) = engine.run(&config.region_file_builder(), &config.output_dir)?;
            print!("{}", summary.render());
            println!("Wrote {} region files to {}", written.len(), config.output_dir.display());
        }
        Commands::Overlap { fictional, format } => {
            let fictional = required_fictional(fictional, &config)?;
            let real = JsonStarStore::new(&config.catalog).load_stars()?;
            let report = overlap_report(&config, &real, &fictional)?;
            match format {
                ReportFormat::Text => print!("{}", report.render_text()),
                ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }
        Commands::Enrich {
            fictional,
            nations,
            output,
        } => {
            let enriched = enriched_catalog(&config, fictional, nations)?;
            match output {
                Some(path) => {
                    write_json_atomic(&path, &enriched)?;
                    info!("wrote {} enriched stars to {}", enriched.len(), path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&enriched)?),
            }
        }
        Commands::Search {
            query,
            limit,
            fictional,
            nations,
            json,
        } => {
            let enriched = enriched_catalog(&config, fictional, nations)?;
            let hits = search_stars(&enriched, &query, limit);
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                for star in hits {
                    let id = star.columns.get("id").cloned().unwrap_or_default();
                    match &star.fictional_name {
                        Some(fictional) => println!("{}\t{}\t({})", id, star.display_name, fictional),
                        None => println!("{}\t{}", id, star.display_name),
                    }
                }
            }
        }
        Commands::Directions { distance, grid } => {
            println!(
                "{}",
                serde_json::to_string_pretty(&galactic_directions(distance, grid))?
            );
        }
    }

    Ok(())
}

fn engine_for(config: &AtlasConfig) -> AtlasEngine<JsonStarStore, JsonRegionStore> {
    AtlasEngine::new(
        JsonStarStore::new(&config.catalog),
        JsonRegionStore::new(&config.regions),
        config.origin_star_id,
    )
}

fn apply_output_overrides(
    config: &mut AtlasConfig,
    output_dir: Option<PathBuf>,
    provenance: Option<String>,
) {
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    if let Some(label) = provenance {
        config.provenance = label;
    }
}

fn required_fictional(flag: Option<PathBuf>, config: &AtlasConfig) -> anyhow::Result<PathBuf> {
    flag.or_else(|| config.fictional_catalog.clone())
        .context("no fictional catalog given (use --fictional or set fictional_catalog in the config)")
}

fn overlap_report(
    config: &AtlasConfig,
    real: &[StarRecord],
    fictional: &Path,
) -> anyhow::Result<octant_atlas::OverlapReport> {
    let fictional = JsonStarStore::fictional(fictional).load_stars()?;
    Ok(OverlapDetector::new(config.origin_star_id).detect(real, &fictional))
}

fn enriched_catalog(
    config: &AtlasConfig,
    fictional: Option<PathBuf>,
    nations: Option<PathBuf>,
) -> anyhow::Result<Vec<octant_atlas::core::EnrichedStar>> {
    let stars = JsonStarStore::new(&config.catalog).load_stars()?;

    let overlay = match fictional.or_else(|| config.fictional_catalog.clone()) {
        Some(path) => {
            let report = overlap_report(config, &stars, &path)?;
            let source = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "fictional".to_string());
            FictionalOverlay::from_overlaps(&report, &source)
        }
        None => FictionalOverlay::default(),
    };

    let directory = match nations.or_else(|| config.nations.clone()) {
        Some(path) => NationDirectory::load(&path)?,
        None => NationDirectory::default(),
    };

    Ok(enrich_stars(&stars, &directory, &overlay))
}
