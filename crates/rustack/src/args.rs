//! Query arguments
//!
//! [`Arguments`] is an unordered string-to-string map. Resource handles use it
//! for parent filters (`vdc`, `project`) and callers use it for anything else
//! the list endpoints accept. Merging applies later values over earlier ones.

use std::collections::HashMap;

/// Query parameters for a GET request.
///
/// # Examples
///
/// ```rust
/// use rustack::Arguments;
///
/// let mut args = Arguments::from([("a", "0"), ("b", "2")]);
/// args.merge([Arguments::from([("a", "1")])]);
///
/// assert_eq!(args.get("a"), Some("1"));
/// assert_eq!(args.get("b"), Some("2"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    values: HashMap<String, String>,
}

impl Arguments {
    /// Empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty argument set; reads better at call sites that take defaults.
    pub fn defaults() -> Self {
        Self::default()
    }

    /// Add or replace `key`, returning self.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Add or replace `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no keys are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(key, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Apply each of `extras` over self in order. On collision the later
    /// value wins; keys only present in self are kept.
    pub fn merge<I>(&mut self, extras: I)
    where
        I: IntoIterator<Item = Arguments>,
    {
        for extra in extras {
            self.values.extend(extra.values);
        }
    }

    /// By-value [`merge`](Self::merge).
    pub fn merged<I>(mut self, extras: I) -> Self
    where
        I: IntoIterator<Item = Arguments>,
    {
        self.merge(extras);
        self
    }

    /// Append every pair to `url`'s query string.
    pub(crate) fn apply_to(&self, url: &mut url::Url) {
        if self.is_empty() {
            return;
        }
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_unstable();
        url.query_pairs_mut().extend_pairs(pairs);
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Arguments
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Arguments
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
