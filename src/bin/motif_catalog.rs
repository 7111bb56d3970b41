//! Inspect and validate motif catalogs from the shell.
//!
//! Usage:
//!   motif-catalog categories
//!   motif-catalog variants 1
//!   motif-catalog show 4 9 --json
//!   motif-catalog grid 0 0 --bounds 10,13,16,16
//!   motif-catalog validate --file caps.json
//!   motif-catalog validate < caps.json
//!
//! The table comes from `--table`, then `MOTIF_CATALOG_PATH`, then the bundled
//! cap table.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use motif_catalog::{
    Bounds, Catalog, TableSource, extent, resolve_table_source, to_occupancy_grid, to_rects,
};
use serde_json::json;
use std::fs;
use std::io::{Read, stdin};
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "motif-catalog")]
#[command(version, about = "Inspect rectangle-run cap motifs")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored log output
    #[arg(long)]
    no_color: bool,

    /// Motif table file; defaults to MOTIF_CATALOG_PATH or the bundled table.
    #[arg(long, global = true)]
    table: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every category id
    Categories,

    /// Print the variant ids of a category in ascending order
    Variants { category: u32 },

    /// Print the runs of one motif
    Show {
        category: u32,
        variant: u32,
        /// Emit JSON instead of one run per line
        #[arg(long)]
        json: bool,
    },

    /// Print the occupancy grid of one motif as text
    Grid {
        category: u32,
        variant: u32,
        /// Inclusive bounds as minX,minY,maxX,maxY (defaults to the canvas)
        #[arg(long)]
        bounds: Option<Bounds>,
    },

    /// Load a table and report how many motifs it holds
    Validate {
        /// Table file; reads stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.no_color)?;

    match cli.command {
        Command::Categories => {
            let catalog = load_catalog(cli.table)?;
            for category in catalog.list_categories() {
                println!("{category}");
            }
        }
        Command::Variants { category } => {
            let catalog = load_catalog(cli.table)?;
            for variant in catalog.list_variants(category) {
                println!("{variant}");
            }
        }
        Command::Show {
            category,
            variant,
            json,
        } => {
            let catalog = load_catalog(cli.table)?;
            let motif = catalog.get(category, variant)?;
            let runs = to_rects(motif)?;
            if json {
                let out = json!({
                    "category": motif.category(),
                    "variant": motif.variant(),
                    "extent": extent(motif),
                    "runs": runs,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                for run in runs {
                    println!("{} {} {} {}", run.x, run.y, run.width, run.height);
                }
            }
        }
        Command::Grid {
            category,
            variant,
            bounds,
        } => {
            let catalog = load_catalog(cli.table)?;
            let motif = catalog.get(category, variant)?;
            let grid = to_occupancy_grid(motif, bounds.unwrap_or_else(Bounds::canvas))?;
            println!("{grid}");
        }
        Command::Validate { file } => {
            let catalog = match file {
                Some(path) => Catalog::from_path(&path)
                    .with_context(|| format!("validating {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    stdin()
                        .read_to_string(&mut buf)
                        .context("reading stdin for motif table")?;
                    Catalog::from_json_str(&buf).context("validating motif table from stdin")?
                }
            };
            println!(
                "ok: {} motifs in {} categories",
                catalog.len(),
                catalog.list_categories().len()
            );
        }
    }

    Ok(())
}

fn load_catalog(explicit: Option<PathBuf>) -> Result<Catalog> {
    let source = resolve_table_source(explicit);
    if let TableSource::File(path) = &source {
        fs::metadata(path).with_context(|| format!("opening motif table {}", path.display()))?;
    }
    info!(source = ?source, "Loading motif catalog");
    source
        .load()
        .with_context(|| format!("loading motif table from {source:?}"))
}

fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("installing log subscriber")?;
    Ok(())
}
