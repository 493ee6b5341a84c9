// src/checker/mirror.rs
// =============================================================================
// Finds mirrored copies of dataset downloads.
//
// The LOD Laundromat crawls and re-publishes RDF dumps. Its SPARQL endpoint
// can tell us whether a given download URL has been crawled, and if so under
// which resource identifier. A mirror download URL is that identifier with
// the resource namespace stripped, appended to the download base URL:
//
//   http://lodlaundromat.org/resource/0a1b2c...  ->
//   http://download.lodlaundromat.org/0a1b2c...
//
// Resolving is one step of a two-step check: the caller requests the original
// URL itself whenever lookup() returns Ok(None) or Err(_).
// =============================================================================

use crate::settings::{Settings, MIRROR_PREFIX_LEN};
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct MirrorResolver {
    client: Client,
    lookup_url: String,
    mirror_base_url: String,
    timeout: Duration,
}

impl MirrorResolver {
    pub fn new(client: Client, settings: &Settings) -> Self {
        Self {
            client,
            lookup_url: settings.lookup_url.clone(),
            mirror_base_url: settings.mirror_base_url.clone(),
            timeout: settings.timeout,
        }
    }

    /// Asks the lookup service for a crawled copy of `url`
    ///
    /// Returns the first resolved resource identifier, Ok(None) when the
    /// service knows no copy, and Err for transport or HTTP failures.
    pub async fn lookup(&self, url: &str) -> Result<Option<String>> {
        let request_url = self.request_url(url)?;

        let response = self
            .client
            .get(request_url)
            .timeout(self.timeout)
            .send()
            .await
            .context("mirror lookup request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("mirror lookup returned HTTP {}", response.status()));
        }

        let body = response.text().await?;
        Ok(extract_identifiers(&body).into_iter().next())
    }

    /// Download URL of the mirror for a resolved resource identifier
    pub fn mirror_url(&self, identifier: &str) -> String {
        let suffix: String = identifier.chars().skip(MIRROR_PREFIX_LEN).collect();
        format!("{}{}", self.mirror_base_url, suffix)
    }

    fn request_url(&self, url: &str) -> Result<Url> {
        let query = format!(
            "PREFIX llo: <http://lodlaundromat.org/ontology/> \
             SELECT DISTINCT ?dataset WHERE {{?dataset llo:url <{}>}}",
            url
        );
        let request_url = Url::parse_with_params(&self.lookup_url, &[("query", query)])
            .with_context(|| format!("Invalid lookup endpoint '{}'", self.lookup_url))?;
        Ok(request_url)
    }
}

// Pulls the text of every <uri> element out of a SPARQL XML result document
//
// The parser is lenient, so a truncated or non-XML body simply yields
// no identifiers.
pub fn extract_identifiers(body: &str) -> Vec<String> {
    let document = Html::parse_document(body);
    // Constant selector, always valid
    let selector = Selector::parse("uri").unwrap();

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}
