// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Three subcommands, one per job:
// - check:   fetch the catalog, check every link, print the report
// - mirrors: write the datasets that have a mirrored download
// - count:   total triples and links in an annotated catalog
//
// Every option has a default taken from settings.rs, so running a
// subcommand without flags does exactly what the fixed scripts used to do.
// =============================================================================

use crate::settings::{
    Settings, ANNOTATED_OUTPUT, CATALOG_URL, CHECK_TIMEOUT_SECS, LOOKUP_URL, MIRROR_OUTPUT,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "lod-availability",
    version,
    about = "Checks the availability of LOD Cloud dataset downloads, examples and SPARQL endpoints",
    long_about = "lod-availability polls the LOD Cloud catalog, checks every download, example and \
                  SPARQL endpoint it lists, and reports how many of them are reachable. \
                  Downloads that the LOD Laundromat has mirrored count as available."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every link of every dataset and write the annotated catalog
    ///
    /// Example: lod-availability check --output lod-data.json
    Check {
        #[command(flatten)]
        remote: RemoteArgs,

        /// Mirror lookup SPARQL endpoint
        #[arg(long, default_value = LOOKUP_URL)]
        lookup_url: String,

        /// Timeout for each request, in seconds
        #[arg(long, default_value_t = CHECK_TIMEOUT_SECS)]
        timeout: u64,

        /// Where to write the annotated catalog (overwritten)
        #[arg(long, default_value = ANNOTATED_OUTPUT)]
        output: PathBuf,
    },

    /// Write the datasets that have at least one mirrored other download
    ///
    /// Reads a previously annotated catalog with --input, otherwise fetches
    /// the catalog.
    Mirrors {
        #[command(flatten)]
        remote: RemoteArgs,

        /// Annotated catalog to read instead of fetching
        #[arg(long)]
        input: Option<PathBuf>,

        /// Where to write the selected datasets (overwritten)
        #[arg(long, default_value = MIRROR_OUTPUT)]
        output: PathBuf,
    },

    /// Print total triples and total links of an annotated catalog
    Count {
        /// Annotated catalog to read
        #[arg(long, default_value = ANNOTATED_OUTPUT)]
        input: PathBuf,
    },
}

// Options shared by the subcommands that talk to the catalog endpoint
#[derive(Args, Debug, Clone)]
pub struct RemoteArgs {
    /// Catalog endpoint returning the datasets as JSON
    #[arg(long, default_value = CATALOG_URL)]
    pub catalog_url: String,
}

impl Commands {
    /// Run settings for this subcommand: defaults overridden by its flags
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        match self {
            Commands::Check {
                remote,
                lookup_url,
                timeout,
                output,
            } => {
                settings.catalog_url = remote.catalog_url.clone();
                settings.lookup_url = lookup_url.clone();
                settings.timeout = Duration::from_secs(*timeout);
                settings.annotated_output = output.clone();
            }
            Commands::Mirrors { remote, output, .. } => {
                settings.catalog_url = remote.catalog_url.clone();
                settings.mirror_output = output.clone();
            }
            Commands::Count { input } => {
                settings.annotated_output = input.clone();
            }
        }
        settings
    }
}
