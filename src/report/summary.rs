// src/report/summary.rs
// =============================================================================
// Availability tallies and the summary table.
//
// Counting rules:
// - A link counts toward its category total once it has been checked
// - A dataset is "available" when at least one of its links is OK. The
//   first OK link puts the dataset in a seen-set; further OK links of the
//   same dataset don't count it again
// =============================================================================

use crate::catalog::{Catalog, Category};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub available: usize,
    pub total: usize,
}

impl Tally {
    fn add(&mut self, ok: bool) {
        self.total += 1;
        if ok {
            self.available += 1;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub resources: Tally,
    pub links: HashMap<Category, Tally>,
}

impl Summary {
    /// Tallies a fully annotated catalog
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut links: HashMap<Category, Tally> =
            Category::ALL.iter().map(|c| (*c, Tally::default())).collect();
        let mut available: HashSet<&str> = HashSet::new();

        for (identifier, dataset) in catalog {
            for category in Category::ALL {
                let Some(list) = dataset.links_of(category) else {
                    continue;
                };
                for link in list.iter().filter(|l| l.is_checked()) {
                    links.entry(category).or_default().add(link.is_ok());
                    if link.is_ok() {
                        available.insert(identifier.as_str());
                    }
                }
            }
        }

        Summary {
            resources: Tally {
                available: available.len(),
                total: catalog.len(),
            },
            links,
        }
    }

    pub fn category(&self, category: Category) -> Tally {
        self.links.get(&category).copied().unwrap_or_default()
    }

    /// True when some checked link failed
    pub fn has_failures(&self) -> bool {
        self.links.values().any(|t| t.available < t.total)
    }

    /// Renders the markdown summary table
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("|                | Status    |\n");
        out.push_str("|----------------|-----------|\n");
        out.push_str(&row("Resources", self.resources));
        for category in Category::ALL {
            out.push_str(&row(category.label(), self.category(category)));
        }
        out
    }
}

fn row(label: &str, tally: Tally) -> String {
    format!("| {:<14} | {:>4}/{:>4} |\n", label, tally.available, tally.total)
}
