// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - http: Checks links with the policy of their category
// - mirror: Looks up mirrored copies of downloads
//
// This file (mod.rs) is the module root - it re-exports the public API so
// callers can write `checker::LinkChecker` instead of `checker::http::...`.
// =============================================================================

mod http;
mod mirror;

pub use http::LinkChecker;
use mirror::MirrorResolver;

use crate::settings::Settings;
use reqwest::Client;

/// Builds a checker and its resolver around one shared HTTP client
pub fn build(client: Client, settings: &Settings) -> LinkChecker {
    let resolver = MirrorResolver::new(client.clone(), settings);
    LinkChecker::new(client, resolver, settings.timeout)
}
