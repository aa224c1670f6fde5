//! Category records as handed over by the orchestrator.

use serde::{Deserialize, Deserializer, Serialize};

/// One row of the category store.
///
/// Ids may arrive as strings or integers; both are normalised to strings.
/// Unknown fields in upstream rows are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Unique identifier
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display label
    #[serde(default)]
    pub name: String,
    /// Owning category, `None` for roots
    #[serde(
        default,
        deserialize_with = "deserialize_parent_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<String>,
    /// Items classified directly under this category
    #[serde(default, alias = "email_count")]
    pub item_count: u64,
}

impl CategoryRecord {
    /// Create a root category.
    pub fn root(id: impl Into<String>, name: impl Into<String>, item_count: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
            item_count,
        }
    }

    /// Create a category under `parent_id`.
    pub fn child(
        id: impl Into<String>,
        name: impl Into<String>,
        parent_id: impl Into<String>,
        item_count: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: Some(parent_id.into()),
            item_count,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Unsigned(n) => n.to_string(),
            RawId::Signed(n) => n.to_string(),
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

// Empty strings count as "no parent", same as null.
fn deserialize_parent_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw.map(String::from).filter(|s| !s.is_empty()))
}
