// src/report/mod.rs
// =============================================================================
// The availability report.
//
// check_catalog walks the catalog in order, prints one section per dataset
// and one subsection per declared link category, and lets the checker print
// a progress line for every link as it is checked. When it returns, every
// link with a URL carries a status.
//
// Submodules:
// - summary: the per-category tallies and the final table
// =============================================================================

mod summary;

pub use summary::Summary;

use crate::catalog::{Catalog, Category};
use crate::checker::LinkChecker;

/// Checks every link of every dataset, printing the report as it goes
pub async fn check_catalog(checker: &LinkChecker, catalog: &mut Catalog) {
    println!("# Report for LOD Cloud availability");
    println!();

    for (identifier, dataset) in catalog.iter_mut() {
        tracing::debug!(dataset = %identifier, "checking dataset");
        println!("## Dataset name: {}", dataset.identifier);
        println!();

        for category in Category::ALL {
            let Some(links) = dataset.links_of_mut(category) else {
                continue;
            };
            println!("{}", section_opening(category, links.len()));

            for link in links.iter_mut() {
                if checker.check_link(category, link).await {
                    println!();
                }
            }
            if spaced(category) {
                println!();
            }
        }
        println!();
    }
}

/// Subsection heading for a link category, e.g. "### Examples (3)"
pub fn section_heading(category: Category, count: usize) -> String {
    format!("### {} ({})", category.heading(), count)
}

// Full downloads lead each dataset and are set off by a blank line on
// both sides; the other categories follow their heading directly.
fn spaced(category: Category) -> bool {
    category == Category::FullDownload
}

// Heading line as printed, with the blank line after it where one belongs
fn section_opening(category: Category, count: usize) -> String {
    let heading = section_heading(category, count);
    if spaced(category) {
        format!("{}\n", heading)
    } else {
        heading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::summary::Tally;
    use crate::catalog::LinkStatus;
    use crate::settings::Settings;
    use crate::test_support::{serve, Route};
    use serde_json::json;

    #[test]
    fn test_section_headings() {
        assert_eq!(section_heading(Category::FullDownload, 2), "### Full Downloads (2)");
        assert_eq!(section_heading(Category::OtherDownload, 0), "### Other downloads (0)");
        assert_eq!(section_heading(Category::Sparql, 1), "### SPARQL Endpoints (1)");
    }

    #[test]
    fn test_only_full_downloads_are_set_off() {
        assert_eq!(section_opening(Category::FullDownload, 1), "### Full Downloads (1)\n");
        assert_eq!(section_opening(Category::OtherDownload, 2), "### Other downloads (2)");
        assert_eq!(section_opening(Category::Example, 0), "### Examples (0)");
        assert_eq!(section_opening(Category::Sparql, 1), "### SPARQL Endpoints (1)");

        assert!(spaced(Category::FullDownload));
        assert!(Category::ALL.iter().skip(1).all(|c| !spaced(*c)));
    }

    #[tokio::test]
    async fn test_single_turtle_download_end_to_end() {
        let server = serve(vec![
            Route::new("/sparql/", 200).body("<sparql><results></results></sparql>"),
            Route::new("/dump.ttl", 200).header("Content-Type", "text/turtle"),
        ])
        .await;
        let settings = Settings {
            lookup_url: server.url("/sparql/"),
            ..Settings::default()
        };
        let checker = crate::checker::build(settings.http_client().unwrap(), &settings);

        let mut catalog: Catalog = serde_json::from_value(json!({
            "tiny": {
                "identifier": "tiny",
                "full_download": [{"download_url": server.url("/dump.ttl")}]
            }
        }))
        .unwrap();

        check_catalog(&checker, &mut catalog).await;

        let link = &catalog["tiny"].full_download.as_ref().unwrap()[0];
        assert_eq!(link.status, Some(LinkStatus::Ok));
        assert_eq!(link.media_type.as_deref(), Some("text/turtle"));

        let summary = Summary::from_catalog(&catalog);
        assert_eq!(summary.resources, Tally { available: 1, total: 1 });
        assert_eq!(summary.category(Category::FullDownload), Tally { available: 1, total: 1 });
        assert!(summary.render().contains("| Resources      |    1/   1 |"));
        assert!(summary.render().contains("| Full Download  |    1/   1 |"));
    }

    #[tokio::test]
    async fn test_every_link_with_url_gets_a_status() {
        let server = serve(vec![
            Route::new("/sparql/", 200).body("<sparql/>"),
            Route::new("/ok", 200),
        ])
        .await;
        let settings = Settings {
            lookup_url: server.url("/sparql/"),
            ..Settings::default()
        };
        let checker = crate::checker::build(settings.http_client().unwrap(), &settings);

        let mut catalog: Catalog = serde_json::from_value(json!({
            "mixed": {
                "identifier": "mixed",
                "full_download": [{"download_url": server.url("/ok")}],
                "other_download": [{"access_url": server.url("/gone")}, {"title": "no url"}],
                "example": [{"access_url": server.url("/ok")}],
                "sparql": [{"access_url": server.url("/gone")}]
            }
        }))
        .unwrap();

        check_catalog(&checker, &mut catalog).await;

        let dataset = &catalog["mixed"];
        for category in Category::ALL {
            for link in dataset.links_of(category).unwrap() {
                match (&link.status, link.target(category)) {
                    (Some(status), Some(_)) => {
                        assert!(status.is_ok() || status.to_string().starts_with("FAIL"))
                    }
                    (None, None) => {}
                    other => panic!("unexpected link state {:?}", other),
                }
            }
        }
        assert_eq!(
            dataset.sparql.as_ref().unwrap()[0].status,
            Some(LinkStatus::Fail("404".into()))
        );
    }
}
