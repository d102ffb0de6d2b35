//! # Filters
//!
//! Each resource declares a typed filter set. A filter that is absent (`None`) or set to
//! the `"all"` sentinel places no constraint on the list request and is left out of the
//! query string.

use std::fmt::{Debug, Display};

/// Typed list filters for a resource.
pub trait FilterSet: Clone + Default + Debug + Send + Sync + 'static {
    /// Overlays `patch` onto `self`: keys present in `patch` replace the current value,
    /// absent keys keep it.
    fn merge(&mut self, patch: Self);

    /// Query parameters for the list request, constrained values only.
    fn to_query(&self) -> Vec<(String, String)>;
}

impl FilterSet for () {
    fn merge(&mut self, _patch: Self) {}

    fn to_query(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// Replaces `slot` when `patch` carries a value.
pub fn merge_option<T>(slot: &mut Option<T>, patch: Option<T>) {
    if patch.is_some() {
        *slot = patch;
    }
}

/// A filter on one value that can be widened back to every record.
///
/// `Scope::All` renders as the `"all"` sentinel, so [`QueryParams`] leaves it out and a
/// patch carrying it clears a previously set value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope<T> {
    #[default]
    All,
    Only(T),
}

impl<T> Scope<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Scope::All => None,
            Scope::Only(value) => Some(value),
        }
    }
}

impl<T> From<T> for Scope<T> {
    fn from(value: T) -> Self {
        Scope::Only(value)
    }
}

impl<T: Display> Display for Scope<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::All => f.write_str("all"),
            Scope::Only(value) => value.fmt(f),
        }
    }
}

/// Collects query parameters, skipping unconstrained values.
#[derive(Debug, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<V: Display>(mut self, key: &str, value: Option<&V>) -> Self {
        if let Some(value) = value {
            let text = value.to_string();
            let trimmed = text.trim();
            if !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("all") {
                self.0.push((key.to_string(), trimmed.to_string()));
            }
        }
        self
    }

    pub fn finish(self) -> Vec<(String, String)> {
        self.0
    }
}
