//! Query parameters and their serialization rules
//!
//! Values are primitives only: strings, numbers, booleans and lists of
//! numbers. Serialization follows the upstream conventions:
//!
//! - `Null` values are omitted
//! - lists are joined with commas
//! - booleans render as `true` / `false`
//! - strings and numbers render as-is

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Number;
use url::Url;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(untagged)]
pub enum QueryValue {
    /// Absent value, never serialized
    Null,
    /// Boolean flag
    Bool(bool),
    /// Numeric value (ids, years, counts)
    Number(#[cfg_attr(feature = "tauri", specta(type = f64))] Number),
    /// Comma-joined list of numbers
    Numbers(#[cfg_attr(feature = "tauri", specta(type = Vec<f64>))] Vec<Number>),
    /// Free-form text
    Text(String),
}

impl QueryValue {
    /// Render the value for the query string, or `None` when it is omitted.
    pub fn render(&self) -> Option<String> {
        match self {
            QueryValue::Null => None,
            QueryValue::Bool(flag) => Some(if *flag { "true" } else { "false" }.to_string()),
            QueryValue::Number(number) => Some(number.to_string()),
            QueryValue::Numbers(numbers) => {
                Some(numbers.iter().map(Number::to_string).collect::<Vec<_>>().join(","))
            }
            QueryValue::Text(text) => Some(text.clone()),
        }
    }

    /// Whether this value is omitted on serialization.
    pub fn is_null(&self) -> bool {
        matches!(self, QueryValue::Null)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<f64> for QueryValue {
    /// Non-finite floats have no string form upstream and become `Null`.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(QueryValue::Null, QueryValue::Number)
    }
}

impl<T> From<Option<T>> for QueryValue
where
    T: Into<QueryValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(QueryValue::Null, Into::into)
    }
}

macro_rules! integer_query_values {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    QueryValue::Number(Number::from(value))
                }
            }

            impl From<Vec<$ty>> for QueryValue {
                fn from(values: Vec<$ty>) -> Self {
                    QueryValue::Numbers(values.into_iter().map(Number::from).collect())
                }
            }

            impl From<&[$ty]> for QueryValue {
                fn from(values: &[$ty]) -> Self {
                    QueryValue::Numbers(values.iter().copied().map(Number::from).collect())
                }
            }
        )*
    };
}

integer_query_values!(i32, i64, u32, u64);

/// Ordered set of query parameters.
///
/// Keys are kept sorted so that identical parameter sets always serialize to
/// the same query string, which keeps cache keys stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(transparent)]
pub struct QueryParams {
    values: BTreeMap<String, QueryValue>,
}

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a parameter.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.values.get(key)
    }

    /// Iterate over all parameters, including `Null` ones.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of parameters, including `Null` ones.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Rendered key/value pairs, with `Null` values dropped.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .filter_map(|(key, value)| value.render().map(|rendered| (key.clone(), rendered)))
            .collect()
    }

    /// Form-encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new()).extend_pairs(self.pairs()).finish()
    }

    /// Append the rendered pairs to a URL's query.
    pub fn apply_to(&self, url: &mut Url) {
        let pairs = self.pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
