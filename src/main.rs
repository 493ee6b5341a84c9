// src/main.rs
// =============================================================================
// Entry point of lod-availability.
//
// What happens here:
// 1. Set up diagnostics (tracing on stderr; the report goes to stdout)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the subcommand handler
// 4. Exit with proper code (0 = all good, 1 = some links failed, 2 = error)
// =============================================================================

mod analysis;      // src/analysis/ - mirror subset and totals
mod catalog;       // src/catalog/ - data model, fetch, load/save
mod checker;       // src/checker/ - link checks and mirror lookup
mod cli;           // src/cli.rs - command-line parsing
mod report;        // src/report/ - printed report and summary table
mod settings;      // src/settings.rs - fixed tunables

#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use settings::Settings;
use std::io::Write;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let settings = cli.command.settings();

    let mut out = std::io::stdout();

    match cli.command {
        Commands::Check { .. } => handle_check(&settings, &mut out).await,
        Commands::Mirrors { input, .. } => {
            handle_mirrors(&settings, input.as_deref(), &mut out).await
        }
        Commands::Count { .. } => handle_count(&settings, &mut out),
    }
}

// Fetch, check, report, write. Returns 1 when any checked link failed.
//
// The per-link report streams to stdout while checking; the summary table
// goes to `out`.
async fn handle_check(settings: &Settings, out: &mut impl Write) -> Result<i32> {
    let client = settings.http_client()?;
    let checker = checker::build(client.clone(), settings);
    let mut data = catalog::fetch_catalog(&client, &settings.catalog_url).await?;

    report::check_catalog(&checker, &mut data).await;

    catalog::save(&settings.annotated_output, &data)?;
    tracing::info!(path = %settings.annotated_output.display(), "annotated catalog written");

    let summary = report::Summary::from_catalog(&data);
    write!(out, "{}", summary.render())?;

    if summary.has_failures() {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Select datasets with a mirrored other download and write them out
async fn handle_mirrors(
    settings: &Settings,
    input: Option<&Path>,
    out: &mut impl Write,
) -> Result<i32> {
    let data = match input {
        Some(path) => catalog::load(path)?,
        None => {
            let client = settings.http_client()?;
            catalog::fetch_catalog(&client, &settings.catalog_url).await?
        }
    };

    writeln!(out, "# Mirrored datasets")?;
    writeln!(out)?;
    writeln!(out, "{}", data.len())?;

    let selected = analysis::with_mirrors(&data);
    writeln!(out, "{}", selected.len())?;

    catalog::save(&settings.mirror_output, &selected)?;
    Ok(0)
}

// Print total triples and total links of the annotated catalog
fn handle_count(settings: &Settings, out: &mut impl Write) -> Result<i32> {
    let data = catalog::load(&settings.annotated_output)?;
    let totals = analysis::totals(&data);

    writeln!(out, "Triples")?;
    writeln!(out, "{}", totals.triples)?;
    writeln!(out)?;
    writeln!(out, "Links")?;
    writeln!(out, "{}", totals.links)?;
    Ok(0)
}
