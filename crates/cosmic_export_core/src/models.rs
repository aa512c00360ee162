use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

/// One fetched object, as returned by the collection endpoint. Key order is
/// preserved so the first record can drive the column schema.
pub type RemoteRecord = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Metafield {
    pub key: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ObjectType {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub metafields: Vec<Metafield>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub object_types: Vec<ObjectType>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectsPage {
    pub objects: Option<Vec<RemoteRecord>>,
    #[serde(default)]
    pub total: u64,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ObjectsPage {
    pub fn remote_message(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Published,
    Draft,
}

impl StatusFilter {
    /// The `status` query-parameter value, or `None` when no constraint is set.
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Published => Some("published"),
            StatusFilter::Draft => Some("draft"),
        }
    }

    pub fn matches(self, record: &RemoteRecord) -> bool {
        match self.query_value() {
            None => true,
            Some(state) => record.get("state").and_then(Value::as_str) == Some(state),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "any"),
            StatusFilter::Published => write!(f, "published"),
            StatusFilter::Draft => write!(f, "draft"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        // "false" is the legacy extension value for "no status constraint"
        match value {
            "" | "all" | "any" | "false" => Ok(StatusFilter::All),
            "published" => Ok(StatusFilter::Published),
            "draft" => Ok(StatusFilter::Draft),
            other => Err(format!(
                "unknown status filter {other:?}, expected published, draft or all"
            )),
        }
    }
}
