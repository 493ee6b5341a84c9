// src/analysis/count.rs
// =============================================================================
// Totals over an annotated catalog: triples and outbound link counts.
//
// The catalog stores these numbers either as JSON integers or as strings
// written for humans ("1,234", "12.000"). to_count normalizes both:
// - integers pass through
// - strings lose every ',' and '.', and must then be plain digits
// - anything else counts as 0
//
// Dropping '.' means "12.5" reads as 125. Decimal triple counts don't occur
// in the catalog, and "12.000" is a thousands separator there.
// =============================================================================

use crate::catalog::Catalog;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub triples: i64,
    pub links: i64,
}

/// Sums triple counts and outbound link values across all datasets
pub fn totals(catalog: &Catalog) -> Totals {
    let triples: i64 = catalog
        .values()
        .map(|d| d.triples.as_ref().map_or(0, to_count))
        .sum();

    let links: i64 = catalog
        .values()
        .flat_map(|d| d.links.iter().flatten())
        .map(|l| l.value.as_ref().map_or(0, to_count))
        .sum();

    Totals { triples, links }
}

/// Reads a count written as an integer or a numeric string
pub fn to_count(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().unwrap_or(0),
        Value::String(s) => {
            let digits: String = s.chars().filter(|c| *c != ',' && *c != '.').collect();
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                digits.parse().unwrap_or(0)
            } else {
                0
            }
        }
        _ => 0,
    }
}
