//! Wire types shared by the AACNews admin client and its command-line front end.
//!
//! Resource payloads are deliberately untyped: the admin API forwards whatever
//! fields the caller supplies and only ever inspects the `id` field.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// An unordered mapping of fields for a Type, Post or Newsletter.
pub type Payload = Map<String, Value>;

/// Name of the payload field that decides between create and update.
pub const ID_FIELD: &str = "id";

/// Opaque identifier of a server-side resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the identifier from a payload.
    ///
    /// Only a non-zero number or a non-empty string counts as present; null,
    /// `false`, `0`, `""` and composite values are treated as "no identifier".
    pub fn from_payload(payload: &Payload) -> Option<Self> {
        match payload.get(ID_FIELD)? {
            Value::Number(n) if n.as_f64().is_some_and(|v| v != 0.0) => {
                Some(Self(number_text(n)))
            }
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            _ => None,
        }
    }
}

/// Whole floats render without a fraction (`5.0` becomes `5`), the way the
/// admin UI prints numeric identifiers.
fn number_text(n: &Number) -> String {
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;
    match n.as_f64() {
        Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() <= MAX_SAFE => format!("{v:.0}"),
        _ => n.to_string(),
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for ResourceId {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl From<u64> for ResourceId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for ResourceId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<u32> for ResourceId {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

/// Lightweight `{id, name}` tag copied from a column group onto each of its posts.
///
/// `None` means the group had no such key; an explicit JSON `null` is kept.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TypeDescriptor {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<Value>,
}

impl From<TypeDescriptor> for Value {
    fn from(descriptor: TypeDescriptor) -> Self {
        let mut map = Map::new();
        if let Some(id) = descriptor.id {
            map.insert(ID_FIELD.to_owned(), id);
        }
        if let Some(name) = descriptor.name {
            map.insert("name".to_owned(), name);
        }
        Value::Object(map)
    }
}

/// A column group as laid out by the newsletter editor: one type with
/// several columns of posts.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ColumnGroup {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<Value>,
    #[serde(default)]
    pub columns: Vec<Vec<Payload>>,
}

impl ColumnGroup {
    pub fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Keeps a present `null` as `Some(Value::Null)`; only a missing key is `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A historical, versioned snapshot of a post.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HistoryEntry {
    pub version: Value,
    #[serde(flatten)]
    pub post: Payload,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SendNewsletterRequest {
    pub html: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CrossPostRequest {
    pub posts: Vec<Payload>,
}
