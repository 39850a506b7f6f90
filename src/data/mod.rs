//! Typed views over upstream API records
//!
//! The fetch layer hands out loosely-typed JSON. These views are built from it
//! only at presentation time and tolerate missing or oddly-typed fields: a
//! string field that holds a number is stringified, and anything else becomes
//! `None`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A character record (`people/{id}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Person {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub height: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub mass: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub birth_year: Option<String>,
    /// Film URLs the character appears in
    #[serde(deserialize_with = "lenient_list")]
    pub films: Vec<Value>,
}

/// A starship record
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Starship {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub model: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub cost_in_credits: Option<String>,
}

/// A planet record
///
/// `population` and `diameter` are kept as the upstream strings, which may be
/// `"unknown"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Planet {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub population: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub diameter: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub climate: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub films: Vec<Value>,
}

/// A film record
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Film {
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    /// Release date as `YYYY-MM-DD`
    #[serde(deserialize_with = "lenient_string")]
    pub release_date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub director: Option<String>,
}

/// A vehicle record (`vehicles/{id}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Vehicle {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub model: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub cost_in_credits: Option<String>,
}

/// A page of a collection endpoint: `{ count, results: [...] }`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Collection {
    /// Total number of records across all pages
    #[serde(deserialize_with = "lenient_u64")]
    pub count: Option<u64>,
    #[serde(deserialize_with = "lenient_list")]
    pub results: Vec<Value>,
}

impl Collection {
    /// Builds a typed view of every record on this page
    pub fn records<T: FromRecord>(&self) -> Vec<T> {
        self.results.iter().map(T::from_record).collect()
    }
}

/// Construction of a typed view from a raw JSON record
///
/// Never fails: a record that isn't a JSON object yields the default view.
pub trait FromRecord: Sized {
    fn from_record(value: &Value) -> Self;
}

impl<T> FromRecord for T
where
    T: for<'de> Deserialize<'de> + Default,
{
    fn from_record(value: &Value) -> Self {
        T::deserialize(value).unwrap_or_default()
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    })
}
