//! Command-line interface over the package model
//!
//! Three headless operations: `inspect` prints the asset table, `validate`
//! re-ingests and reports integrity warnings, `create` lays down a fresh
//! empty package.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::domain::package::ImfPackage;
use crate::domain::projection::{AssetTable, Cell, Column};
use crate::domain::value_objects::UserText;
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::manifests::JsonManifestCodec;

/// Imfpack - IMF package inspection and authoring tool
#[derive(Parser, Debug)]
#[command(name = "imfpack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest a package and print its asset table
    Inspect {
        /// Package root directory
        dir: PathBuf,
    },

    /// Ingest a package and report integrity problems
    Validate {
        /// Package root directory
        dir: PathBuf,
    },

    /// Create a fresh empty package and write its manifests
    Create {
        /// Package root directory
        dir: PathBuf,

        /// Issuer recorded in the manifests
        #[arg(short, long)]
        issuer: String,

        /// Optional annotation text
        #[arg(short, long)]
        annotation: Option<String>,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    let fs = LocalFs::new();
    let codec = JsonManifestCodec::new();
    match cli.command {
        Commands::Inspect { dir } => inspect(&dir, &fs, &codec),
        Commands::Validate { dir } => validate(&dir, &fs, &codec),
        Commands::Create {
            dir,
            issuer,
            annotation,
        } => create(&dir, issuer, annotation, &fs, &codec),
    }
}

fn inspect(dir: &Path, fs: &LocalFs, codec: &JsonManifestCodec) -> Result<()> {
    let mut package = ImfPackage::open(dir);
    let report = package
        .ingest(fs, codec)
        .with_context(|| format!("failed to ingest package at {}", dir.display()))?;

    let asset_map = package.asset_map().context("package has no asset map")?;
    println!("Asset Map {} (issuer: {})", asset_map.id(), asset_map.issuer());
    println!(
        "{} packing list(s), {} asset(s)",
        package.packing_lists().len(),
        package.asset_count()
    );
    println!();

    let table = AssetTable::new(&package);
    let columns = [
        Column::Icon,
        Column::Kind,
        Column::FilePath,
        Column::FileSize,
        Column::Annotation,
    ];
    for row in 0..table.row_count() {
        let cells: Vec<String> = columns
            .iter()
            .map(|&column| render_cell(table.cell(row, column)))
            .collect();
        println!("{}", cells.join("  "));
    }

    for warning in report.warnings() {
        eprintln!("warning: {warning}");
    }
    Ok(())
}

fn validate(dir: &Path, fs: &LocalFs, codec: &JsonManifestCodec) -> Result<()> {
    let mut package = ImfPackage::open(dir);
    let report = package
        .ingest(fs, codec)
        .with_context(|| format!("failed to ingest package at {}", dir.display()))?;

    if report.is_clean() {
        println!("ok: {} asset(s) verified", package.asset_count());
        return Ok(());
    }
    for warning in report.warnings() {
        eprintln!("warning: {warning}");
    }
    bail!("{} problem(s) found", report.warnings().len());
}

fn create(
    dir: &Path,
    issuer: String,
    annotation: Option<String>,
    fs: &LocalFs,
    codec: &JsonManifestCodec,
) -> Result<()> {
    let mut package = ImfPackage::create(
        dir,
        UserText::from(issuer),
        annotation.map(UserText::from),
    );
    package
        .outgest(fs, codec)
        .with_context(|| format!("failed to write package at {}", dir.display()))?;
    println!(
        "created package at {} (asset map {})",
        dir.display(),
        package.asset_map().map(|m| m.id().to_string()).unwrap_or_default()
    );
    Ok(())
}

fn render_cell(cell: Cell) -> String {
    match cell {
        Cell::Text(text) => text,
        Cell::Size(bytes) => format!("{bytes} B"),
        Cell::Flag(true) => "yes".to_string(),
        Cell::Flag(false) => "no".to_string(),
        Cell::Empty => "-".to_string(),
    }
}
