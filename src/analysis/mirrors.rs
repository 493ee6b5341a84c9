// src/analysis/mirrors.rs
// =============================================================================
// Selects datasets that have a mirrored download.
//
// A dataset is selected when at least one of its `other_download` links
// carries a non-empty `mirror` list. Datasets without `other_download`
// are never selected.
// =============================================================================

use crate::catalog::Catalog;

/// Returns the subset of the catalog with at least one mirrored other download
pub fn with_mirrors(catalog: &Catalog) -> Catalog {
    catalog
        .iter()
        .filter(|(_, dataset)| {
            dataset
                .other_download
                .as_ref()
                .map_or(false, |links| links.iter().any(|l| l.has_mirror()))
        })
        .map(|(id, dataset)| (id.clone(), dataset.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_selects_only_mirrored_datasets() {
        let catalog: Catalog = serde_json::from_value(json!({
            "mirrored": {
                "identifier": "mirrored",
                "other_download": [{"mirror": ["http://m/x"]}]
            },
            "empty-mirror": {
                "identifier": "empty-mirror",
                "other_download": [{"mirror": []}]
            },
            "no-other": {
                "identifier": "no-other",
                "full_download": [{"download_url": "http://a", "mirror": ["http://m/y"]}]
            },
            "second-link": {
                "identifier": "second-link",
                "other_download": [{"access_url": "http://b"}, {"mirror": ["http://m/z"]}]
            }
        }))
        .unwrap();

        let selected = with_mirrors(&catalog);

        let ids: Vec<&str> = selected.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["mirrored", "second-link"]);
        assert_eq!(selected["mirrored"], catalog["mirrored"]);
    }

    #[test]
    fn test_empty_catalog_selects_nothing() {
        assert!(with_mirrors(&Catalog::new()).is_empty());
    }
}
