// src/catalog/model.rs
// =============================================================================
// Data types for the LOD Cloud catalog.
//
// The catalog is a JSON object keyed by dataset identifier. We type the
// fields we read or annotate and keep every other field in a flattened
// map, so that writing the catalog back out preserves what we didn't touch.
//
// Rust concepts:
// - #[serde(flatten)]: Collects unknown fields into a map
// - Option<T>: Fields that may be absent in the input
// - Custom Serialize/Deserialize: LinkStatus is stored as a plain string
// =============================================================================

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Dataset identifier -> dataset. Sorted by identifier, so every run walks
/// the catalog in the same order.
pub type Catalog = BTreeMap<String, Dataset>;

// The four kinds of link a dataset can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    FullDownload,
    OtherDownload,
    Example,
    Sparql,
}

impl Category {
    /// All categories, in the order they are checked and reported
    pub const ALL: [Category; 4] = [
        Category::FullDownload,
        Category::OtherDownload,
        Category::Example,
        Category::Sparql,
    ];

    /// JSON key of this category in a dataset record
    pub fn key(self) -> &'static str {
        match self {
            Category::FullDownload => "full_download",
            Category::OtherDownload => "other_download",
            Category::Example => "example",
            Category::Sparql => "sparql",
        }
    }

    /// Section heading used in the printed report
    pub fn heading(self) -> &'static str {
        match self {
            Category::FullDownload => "Full Downloads",
            Category::OtherDownload => "Other downloads",
            Category::Example => "Examples",
            Category::Sparql => "SPARQL Endpoints",
        }
    }

    /// Row label used in the summary table
    pub fn label(self) -> &'static str {
        match self {
            Category::FullDownload => "Full Download",
            Category::OtherDownload => "Other Download",
            Category::Example => "Examples",
            Category::Sparql => "SPARQL",
        }
    }
}

// Outcome of checking one link
//
// Serialized as "OK" or "FAIL (<reason>)", which is the format of the
// annotated catalog file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    Ok,
    Fail(String),
}

impl LinkStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, LinkStatus::Ok)
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStatus::Ok => write!(f, "OK"),
            LinkStatus::Fail(reason) => write!(f, "FAIL ({})", reason),
        }
    }
}

impl Serialize for LinkStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<&str> for LinkStatus {
    // Anything that isn't "OK" or "FAIL (<reason>)" is kept whole as the
    // failure reason
    fn from(raw: &str) -> Self {
        if raw == "OK" {
            return LinkStatus::Ok;
        }
        let reason = raw
            .strip_prefix("FAIL (")
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(raw);
        LinkStatus::Fail(reason.to_string())
    }
}

impl<'de> Deserialize<'de> for LinkStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(LinkStatus::from(raw.as_str()))
    }
}

// A status that arrives in the catalog is replaced on the next check, so a
// value of the wrong JSON type is dropped instead of failing the whole file.
fn lenient_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<LinkStatus>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(raw)) => Some(LinkStatus::from(raw.as_str())),
        Some(other) => {
            tracing::debug!(status = %other, "ignoring non-string link status");
            None
        }
        None => None,
    })
}

// A single declared access point of a dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_url: Option<String>,

    /// None until the link has been checked in this run
    #[serde(
        default,
        deserialize_with = "lenient_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<LinkStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mirror: Option<Vec<String>>,

    /// Title, description, licence... passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Link {
    /// URL to check for a link of the given category
    ///
    /// Full downloads advertise `download_url`; everything else uses
    /// `access_url`.
    pub fn target(&self, category: Category) -> Option<&str> {
        match category {
            Category::FullDownload => self
                .download_url
                .as_deref()
                .or(self.access_url.as_deref()),
            _ => self.access_url.as_deref(),
        }
    }

    pub fn is_checked(&self) -> bool {
        self.status.is_some()
    }

    pub fn is_ok(&self) -> bool {
        self.status.as_ref().map_or(false, LinkStatus::is_ok)
    }

    pub fn has_mirror(&self) -> bool {
        self.mirror.as_ref().map_or(false, |m| !m.is_empty())
    }

    /// Drops the annotations of a previous run before the link is checked
    /// again; a catalog read back from disk already carries them.
    pub fn reset(&mut self) {
        self.status = None;
        self.media_type = None;
        self.mirror = None;
    }

    /// Records the outcome of a direct check
    pub fn record(&mut self, status: LinkStatus, media_type: Option<String>) {
        self.status = Some(status);
        self.media_type = media_type;
    }

    /// Records a mirror found by the resolver; this also marks the link OK
    pub fn record_mirror(&mut self, mirror_url: String) {
        self.mirror = Some(vec![mirror_url]);
        self.status = Some(LinkStatus::Ok);
    }
}

// An outbound link from one dataset to another (`links` in the catalog)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutboundLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Number of links; the catalog mixes integers and strings like "1,234"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// One dataset record of the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub identifier: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_download: Option<Vec<Link>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_download: Option<Vec<Link>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Vec<Link>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparql: Option<Vec<Link>>,

    /// Triple count; integer or numeric string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triples: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<OutboundLink>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Dataset {
    /// Links of one category, or None when the dataset doesn't declare it
    pub fn links_of(&self, category: Category) -> Option<&[Link]> {
        let list = match category {
            Category::FullDownload => &self.full_download,
            Category::OtherDownload => &self.other_download,
            Category::Example => &self.example,
            Category::Sparql => &self.sparql,
        };
        list.as_deref()
    }

    pub fn links_of_mut(&mut self, category: Category) -> Option<&mut Vec<Link>> {
        let list = match category {
            Category::FullDownload => &mut self.full_download,
            Category::OtherDownload => &mut self.other_download,
            Category::Example => &mut self.example,
            Category::Sparql => &mut self.sparql,
        };
        list.as_mut()
    }
}
