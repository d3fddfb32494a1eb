//! Ordered query parameters of a deep link.

use serde::{Deserialize, Serialize};

/// A single query item. `value` is `None` when the item had no `=`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DeepLinkParameter {
    pub name: String,
    pub value: Option<String>,
}

/// Query items in order of appearance.
///
/// Names are not deduplicated. Name lookups return the first match; later
/// duplicates are only reachable through [`DeepLinkParameters::iter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(transparent)]
pub struct DeepLinkParameters {
    items: Vec<DeepLinkParameter>,
}

impl DeepLinkParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter after all existing ones.
    pub fn push(&mut self, name: impl Into<String>, value: Option<String>) {
        self.items.push(DeepLinkParameter { name: name.into(), value });
    }

    fn first(&self, name: &str) -> Option<&DeepLinkParameter> {
        self.items.iter().find(|p| p.name == name)
    }

    /// Value of the first parameter called `name`.
    ///
    /// Returns `None` both when the name is absent and when the first match
    /// carries no value.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.first(name).and_then(|p| p.value.as_deref())
    }

    /// Value of the first parameter called `name`, parsed as a base-10 integer.
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get_string(name).and_then(|v| v.parse().ok())
    }

    /// Whether any parameter is called `name`, regardless of its value.
    pub fn exists(&self, name: &str) -> bool {
        self.first(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeepLinkParameter> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<(String, Option<String>)> for DeepLinkParameters {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        Self { items: iter.into_iter().map(|(name, value)| DeepLinkParameter { name, value }).collect() }
    }
}
