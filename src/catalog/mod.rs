// src/catalog/mod.rs
// =============================================================================
// The dataset catalog: its data model and how it is fetched, loaded and saved.
//
// Submodules:
// - model: Dataset, Link, LinkStatus and the link categories
// - fetch: remote fetch plus local load/save of the JSON file
// =============================================================================

mod fetch;
mod model;

pub use fetch::{fetch_catalog, load, save};
pub use model::{Catalog, Category, Link, LinkStatus};
