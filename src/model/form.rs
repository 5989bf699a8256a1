//! Form key/value types.

use serde::{Deserialize, Serialize};

/// One key/value pair of a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    /// Key text ("" when the service found no key text)
    pub key: String,
    /// Value text ("" when the service found no value text)
    pub value: String,
}

/// Insertion-ordered mapping from key text to value text.
///
/// Inserting an existing key replaces its value in place, so the last write
/// wins while the key keeps the position of its first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    /// Fields in order of first appearance
    pub fields: Vec<FormField>,
}

impl Form {
    /// Create an empty form.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Insert a pair, returning the value it replaced.
    ///
    /// Finding an existing key is a linear scan over the fields, which keeps
    /// the form a plain ordered list; pages carry at most a few dozen keys.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|f| f.key == key) {
            Some(field) => Some(std::mem::replace(&mut field.value, value)),
            None => {
                self.fields.push(FormField { key, value });
                None
            }
        }
    }

    /// Get the value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }

    /// Insert every pair of `other`, in order.
    pub fn extend_from(&mut self, other: &Form) {
        for field in &other.fields {
            self.insert(field.key.clone(), field.value.clone());
        }
    }

    /// Iterate over `(key, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.fields
            .iter()
            .map(|f| (f.key.as_str(), f.value.as_str()))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
