// src/checker/http.rs
// =============================================================================
// This module checks whether a dataset link is reachable.
//
// Three checking policies, one per kind of link:
// - Downloads (full and other): ask the mirror resolver first, then fall back
//   to a HEAD request against the original URL
// - Examples: a GET request asking for RDF, so we learn what the server
//   actually serves for the example resource
// - SPARQL endpoints: a HEAD request, status only
//
// Every outcome, including network errors, becomes a LinkStatus on the link.
// Nothing in here returns an error to the caller.
//
// Rust concepts:
// - async/await: The HTTP client is async, even though we check one link
//   at a time
// - &mut borrows: Links are annotated in place inside the catalog
// =============================================================================

use super::mirror::MirrorResolver;
use crate::catalog::{Category, Link, LinkStatus};
use crate::settings::EXAMPLE_ACCEPT;
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;

// Result of checking one URL directly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: LinkStatus,
    /// Declared content type of a 200 response
    pub media_type: Option<String>,
}

impl Outcome {
    fn ok(media_type: Option<String>) -> Self {
        Self {
            status: LinkStatus::Ok,
            media_type,
        }
    }

    fn fail(reason: impl Into<String>) -> Self {
        Self {
            status: LinkStatus::Fail(reason.into()),
            media_type: None,
        }
    }
}

// What a check looks at besides the status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Policy {
    /// Status only
    Existence,
    /// Status and declared content type
    MediaType,
    /// Status, content type, and the whole body must arrive
    Content,
}

// Checks links one at a time, annotating them as it goes
#[derive(Debug, Clone)]
pub struct LinkChecker {
    client: Client,
    resolver: MirrorResolver,
    timeout: Duration,
}

impl LinkChecker {
    pub fn new(client: Client, resolver: MirrorResolver, timeout: Duration) -> Self {
        Self {
            client,
            resolver,
            timeout,
        }
    }

    /// Checks one link with the policy of its category
    ///
    /// Returns false when the link has no URL to check; such links are
    /// left untouched. Otherwise any annotation from an earlier run is
    /// replaced.
    pub async fn check_link(&self, category: Category, link: &mut Link) -> bool {
        let url = match link.target(category) {
            Some(url) => url.to_string(),
            None => {
                tracing::debug!(category = category.key(), "link without URL skipped");
                return false;
            }
        };

        link.reset();
        match category {
            Category::FullDownload | Category::OtherDownload => {
                self.check_download(&url, link).await
            }
            Category::Example => self.check_example(&url, link).await,
            Category::Sparql => self.check_sparql(&url, link).await,
        }
        true
    }

    // Downloads: mirror lookup first, direct request only when that finds nothing
    async fn check_download(&self, url: &str, link: &mut Link) {
        match self.resolver.lookup(url).await {
            Ok(Some(identifier)) => {
                println!("{} => {}", url, identifier);
                link.record_mirror(self.resolver.mirror_url(&identifier));
                return;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(url, error = %format!("{:#}", e), "mirror lookup failed");
            }
        }

        let outcome = self.send_check(url, self.client.head(url), Policy::MediaType).await;
        link.record(outcome.status, outcome.media_type);
    }

    // Examples: fetch the content itself, preferring RDF serializations
    async fn check_example(&self, url: &str, link: &mut Link) {
        let request = self.client.get(url).header(ACCEPT, EXAMPLE_ACCEPT);
        let outcome = self.send_check(url, request, Policy::Content).await;
        link.record(outcome.status, outcome.media_type);
    }

    // SPARQL endpoints: existence only
    async fn check_sparql(&self, url: &str, link: &mut Link) {
        let outcome = self.send_check(url, self.client.head(url), Policy::Existence).await;
        link.record(outcome.status, None);
    }

    // Sends a check request and prints its one-line progress message
    //
    // The timeout covers the whole exchange, body included.
    async fn send_check(&self, url: &str, request: RequestBuilder, policy: Policy) -> Outcome {
        let outcome = match request.timeout(self.timeout).send().await {
            Ok(response) => {
                let outcome = analyze_response(response.status(), response.headers(), policy);
                if policy == Policy::Content && outcome.status.is_ok() {
                    match response.bytes().await {
                        Ok(_) => outcome,
                        Err(e) => categorize_error(&e),
                    }
                } else {
                    outcome
                }
            }
            Err(e) => categorize_error(&e),
        };
        println!("{}", progress_line(url, &outcome.status));
        outcome
    }
}

// Only an exact 200 counts as available; redirects were already followed
fn analyze_response(status: StatusCode, headers: &HeaderMap, policy: Policy) -> Outcome {
    if status != StatusCode::OK {
        return Outcome::fail(status.as_u16().to_string());
    }

    let media_type = match policy {
        Policy::Existence => None,
        Policy::MediaType | Policy::Content => headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    Outcome::ok(media_type)
}

// Turns a transport error into a failure carrying the error text
//
// The kind of failure only goes to the diagnostics; the status keeps
// reqwest's own message.
fn categorize_error(error: &reqwest::Error) -> Outcome {
    let kind = if error.is_timeout() {
        "timeout"
    } else if error.is_redirect() {
        "too many redirects"
    } else if error.is_connect() {
        "connection failed"
    } else if error.is_body() || error.is_decode() {
        "body error"
    } else {
        "request error"
    };
    tracing::debug!(kind, error = %error, "link check failed");
    Outcome::fail(error.to_string())
}

/// Progress message printed for each checked URL
pub fn progress_line(url: &str, status: &LinkStatus) -> String {
    match status {
        LinkStatus::Ok => format!("{} OK", url),
        LinkStatus::Fail(reason) if reason.parse::<u16>().is_ok() => format!("{} {}", url, reason),
        LinkStatus::Fail(reason) => format!("{} FAIL: ({})", url, reason),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why check one link at a time?
//    - The report is printed while checking, dataset by dataset
//    - Checking in catalog order keeps the printed trace readable
//    - The per-request timeout bounds how long one slow server can stall us
//
// 2. Why does check_link take `&mut Link`?
//    - The link lives inside the catalog, which we write to disk afterwards
//    - Annotating it in place means no second pass to merge results back
//
// 3. What is RequestBuilder?
//    - reqwest's way of assembling a request before sending it
//    - send_check doesn't care whether it is a HEAD or a GET; the caller decides
//    - .timeout() on the request bounds just this check, not every use of
//      the client
// -----------------------------------------------------------------------------
