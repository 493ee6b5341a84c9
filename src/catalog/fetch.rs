// src/catalog/fetch.rs
// =============================================================================
// Getting the catalog in and out of the program.
//
// - fetch_catalog: downloads the catalog JSON from the remote endpoint
// - load: reads a catalog (usually a previously annotated one) from disk
// - save: writes a catalog to disk, pretty-printed, replacing the old file
//
// A failure here is fatal for the run: there is nothing to check without
// a catalog, so errors are propagated with context and never retried.
// =============================================================================

use super::model::Catalog;
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use std::fs;
use std::path::Path;

// Downloads and decodes the dataset catalog
//
// No timeout here: the catalog is large and a run is pointless without it.
//
// Parameters:
//   client: shared reqwest HTTP client
//   url: catalog endpoint (returns a JSON object keyed by identifier)
pub async fn fetch_catalog(client: &Client, url: &str) -> Result<Catalog> {
    tracing::info!(url, "fetching catalog");

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch catalog from {}", url))?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "Failed to fetch catalog from {}: HTTP {}",
            url,
            response.status()
        ));
    }

    let catalog: Catalog = response
        .json()
        .await
        .with_context(|| format!("Malformed catalog returned by {}", url))?;

    tracing::info!(datasets = catalog.len(), "catalog fetched");
    Ok(catalog)
}

/// Reads a catalog from a JSON file
pub fn load(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let catalog = serde_json::from_str(&content)
        .with_context(|| format!("Malformed catalog in {}", path.display()))?;
    Ok(catalog)
}

/// Writes a catalog as indented JSON, overwriting any existing file
pub fn save(path: &Path, catalog: &Catalog) -> Result<()> {
    let json = serde_json::to_string_pretty(catalog)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), datasets = catalog.len(), "catalog written");
    Ok(())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does .with_context() do?
//    - It wraps the underlying error with a message of our own
//    - The closure only runs when there actually is an error
//    - `{:#}` formatting in main.rs prints the whole chain
//
// 2. Why to_string_pretty?
//    - The annotated catalog is meant to be read by people too
//    - It indents with two spaces, one field per line
// -----------------------------------------------------------------------------
