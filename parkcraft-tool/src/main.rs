mod catalog;
mod config;
mod error;
mod logging;
mod script;

#[cfg(feature = "editor")]
mod editor;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use parkcraft_core::{Catalog, ExportOptions, FileTarget, Layout, export, export_to};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::catalog::load_catalog;
use crate::config::{Overrides, Settings, load_config, resolve_settings};
use crate::error::ToolError;
use crate::logging::LogDestination;

#[derive(Parser)]
#[command(name = "parkcraft")]
#[command(about = "Grid layout editor for park attractions", long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/parkcraft/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog TOML file; the built-in attractions are used otherwise
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Grid rows
    #[arg(long, global = true)]
    rows: Option<usize>,

    /// Grid columns
    #[arg(long, global = true)]
    cols: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[cfg(feature = "editor")]
    /// Open the interactive layout editor
    Edit {
        /// Seed for empty-cell sampling
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Apply a placement script and export the result
    Run {
        /// Script with one `place` or `delete` command per line
        script: PathBuf,

        /// Export file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seed for empty-cell sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Fail on the first rejected placement
        #[arg(long)]
        strict: bool,
    },

    /// List the kinds in the catalog
    Catalog,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let settings = resolve_settings(
        Overrides {
            catalog: cli.catalog,
            rows: cli.rows,
            cols: cli.cols,
        },
        config,
    )?;

    match cli.command {
        #[cfg(feature = "editor")]
        Command::Edit { seed } => {
            let destination = match &settings.log_file {
                Some(path) => LogDestination::File(path),
                None => LogDestination::Disabled,
            };
            logging::init(destination)?;

            let catalog = load_catalog(settings.catalog.as_deref())?;
            let layout = Layout::new(catalog, settings.rows, settings.cols);
            let app = editor::EditorApp::new(
                layout,
                editor::ExportSettings {
                    path: settings.export_path.clone(),
                    options: ExportOptions {
                        sample_size: settings.sample_size,
                    },
                    reuse_handle: settings.reuse_handle,
                },
                make_rng(seed),
            );
            editor::run(app)?;
        }
        Command::Run {
            script,
            output,
            seed,
            strict,
        } => {
            logging::init(LogDestination::Stderr)?;
            run_script(&settings, &script, output.as_deref(), seed, strict)?;
        }
        Command::Catalog => {
            logging::init(LogDestination::Stderr)?;
            let catalog = load_catalog(settings.catalog.as_deref())?;
            print_catalog(&catalog);
        }
    }

    Ok(())
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn run_script(
    settings: &Settings,
    script: &Path,
    output: Option<&Path>,
    seed: Option<u64>,
    strict: bool,
) -> Result<(), ToolError> {
    let source = std::fs::read_to_string(script).map_err(|source| ToolError::File {
        path: script.to_path_buf(),
        source,
    })?;
    let lines = script::parse_script(&source)?;

    let catalog = load_catalog(settings.catalog.as_deref())?;
    let mut layout = Layout::new(catalog, settings.rows, settings.cols);
    let report = script::apply(&mut layout, &lines, strict)?;
    info!(
        placed = report.placed,
        deleted = report.deleted,
        rejected = report.rejected.len(),
        objects = layout.registry().len(),
        "script applied"
    );

    let options = ExportOptions {
        sample_size: settings.sample_size,
    };
    let mut rng = make_rng(seed);
    match output {
        Some(path) => {
            let mut target = FileTarget::reusable(path)?;
            let receipt = export_to(&layout, &options, &mut rng, &mut target)?;
            info!(bytes = receipt.bytes, path = %path.display(), "export written");
        }
        None => print!("{}", export::render(&layout, &options, &mut rng)),
    }

    Ok(())
}

fn print_catalog(catalog: &Catalog) {
    println!(
        "{:<16} {:>5} {:>6} {:>9}  {:<16} NAME",
        "ID", "WIDTH", "HEIGHT", "ELEVATION", "FILE-ID"
    );
    for kind in catalog.iter() {
        println!(
            "{:<16} {:>5} {:>6} {:>9}  {:<16} {}",
            kind.id, kind.width, kind.height, kind.elevation, kind.file_id, kind.display_name
        );
    }
}
