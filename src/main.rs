//! Imfpack CLI - IMF package inspection and authoring tool
//!
//! Usage: imfpack <COMMAND>
//!
//! Commands:
//!   inspect   Ingest a package and print its asset table
//!   validate  Ingest a package and report integrity problems
//!   create    Create a fresh empty package

use anyhow::Result;
use clap::Parser;

use imfpack::cli::{run, Cli};

fn main() -> Result<()> {
    run(Cli::parse())
}
