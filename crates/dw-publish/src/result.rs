//! The [`PublishResult`] value object.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Immutable outcome record returned by every publish/update operation.
///
/// Every `with_*` method returns a new value and leaves the receiver
/// untouched, so intermediate results can be kept and compared. Setting an
/// error forces `success = false`. The `extra` map carries structured data
/// such as `execution_time`, `versions_published` or `products_updated`;
/// callers merge child results' extras into their own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishResult {
    success: bool,
    error: Option<String>,
    messages: Vec<String>,
    extra: BTreeMap<String, Value>,
}

impl Default for PublishResult {
    fn default() -> Self {
        Self {
            success: true,
            error: None,
            messages: Vec::new(),
            extra: BTreeMap::new(),
        }
    }
}

impl PublishResult {
    /// Create a new successful, empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overall outcome flag.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Human-readable error, present when `is_success()` is `false`.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Progress and diagnostic lines, in the order they were added.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Structured extra data by key.
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// The full extra map.
    #[must_use]
    pub fn extras(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    /// Return a copy with the success flag set.
    #[must_use]
    pub fn with_success(&self, success: bool) -> Self {
        let mut next = self.clone();
        next.success = success;
        next
    }

    /// Return a copy carrying an error. Forces `success = false`.
    #[must_use]
    pub fn with_error(&self, error: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.error = Some(error.into());
        next.success = false;
        next
    }

    /// Return a copy with a message appended.
    #[must_use]
    pub fn with_message(&self, message: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.messages.push(message.into());
        next
    }

    /// Return a copy with an extra entry set.
    #[must_use]
    pub fn with_extra(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut next = self.clone();
        next.extra.insert(key.into(), value.into());
        next
    }

    /// Return a copy with `other`'s extra entries merged in
    /// (`other` wins on key collisions).
    #[must_use]
    pub fn with_merged_extras(&self, other: &Self) -> Self {
        let mut next = self.clone();
        for (key, value) in &other.extra {
            next.extra.insert(key.clone(), value.clone());
        }
        next
    }
}
