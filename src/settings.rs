// src/settings.rs
// =============================================================================
// Fixed tunables for a run: endpoints, timeouts and output file names.
//
// Every value has a constant default. The CLI can override some of them
// (see cli.rs), but nothing is read from files or environment variables.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

/// Remote catalog of LOD Cloud datasets (JSON object keyed by identifier)
pub const CATALOG_URL: &str = "https://lod-cloud.net/extract/datasets";

/// SPARQL endpoint of the LOD Laundromat, used to find mirrored downloads
pub const LOOKUP_URL: &str = "http://lodlaundromat.org/sparql/";

/// Base URL that mirror downloads are served from
pub const MIRROR_BASE_URL: &str = "http://download.lodlaundromat.org/";

/// Length of the resource prefix stripped from a resolved mirror identifier
/// ("http://lodlaundromat.org/resource/" is 34 characters)
pub const MIRROR_PREFIX_LEN: usize = 34;

/// Upper bound for each link check and mirror lookup request
pub const CHECK_TIMEOUT_SECS: u64 = 30;

/// Redirects followed before a link check gives up
pub const MAX_REDIRECTS: usize = 30;

/// Accept header sent when fetching example resources
pub const EXAMPLE_ACCEPT: &str =
    "application/rdf+xml,text/turtle,application/n-triples,application/ld+json,*/*;q=0.9";

/// Annotated catalog written by `check`
pub const ANNOTATED_OUTPUT: &str = "lod-data.json";

/// Datasets with mirrored downloads, written by `mirrors`
pub const MIRROR_OUTPUT: &str = "ipfs-lod.json";

// Everything a run needs to know, gathered in one place
#[derive(Debug, Clone)]
pub struct Settings {
    pub catalog_url: String,
    pub lookup_url: String,
    pub mirror_base_url: String,
    pub timeout: Duration,
    pub annotated_output: PathBuf,
    pub mirror_output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_url: CATALOG_URL.to_string(),
            lookup_url: LOOKUP_URL.to_string(),
            mirror_base_url: MIRROR_BASE_URL.to_string(),
            timeout: Duration::from_secs(CHECK_TIMEOUT_SECS),
            annotated_output: PathBuf::from(ANNOTATED_OUTPUT),
            mirror_output: PathBuf::from(MIRROR_OUTPUT),
        }
    }
}

impl Settings {
    /// Builds the single HTTP client shared by the fetcher, resolver and checker
    ///
    /// reqwest follows redirects itself, so every link check is redirect-following.
    /// The client has no overall timeout: link checks and mirror lookups set
    /// `timeout` per request, the catalog download runs unbounded.
    pub fn http_client(&self) -> anyhow::Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("lod-availability/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_use_constants() {
        let settings = Settings::default();
        assert_eq!(settings.catalog_url, CATALOG_URL);
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.annotated_output, PathBuf::from("lod-data.json"));
        assert_eq!(settings.mirror_output, PathBuf::from("ipfs-lod.json"));
    }

    #[test]
    fn test_mirror_prefix_matches_resource_namespace() {
        assert_eq!("http://lodlaundromat.org/resource/".len(), MIRROR_PREFIX_LEN);
    }
}
