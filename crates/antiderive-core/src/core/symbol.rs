//! Symbol type for variables

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Global symbol interning cache to avoid duplicate Arc allocations
static SYMBOL_CACHE: Lazy<Mutex<HashMap<String, Arc<str>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Mathematical variable with efficient string sharing
///
/// Symbols with the same name share one interned allocation and compare
/// equal. A symbol name is never empty.
///
/// # Examples
///
/// ```rust
/// use antiderive_core::Symbol;
///
/// let x = Symbol::new("x");
/// assert_eq!(x.name(), "x");
/// assert_eq!(x, Symbol::new("x"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    name: Arc<str>,
}

impl Symbol {
    /// Create a symbol, interning the name
    ///
    /// # Panics
    ///
    /// Panics on an empty name; an unnamed variable is a programming defect.
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        let name_str = name.as_ref();
        assert!(!name_str.is_empty(), "BUG: symbol name must be non-empty");
        Self {
            name: Self::intern(name_str),
        }
    }

    fn intern(name: &str) -> Arc<str> {
        let mut cache = SYMBOL_CACHE
            .lock()
            .expect("BUG: symbol cache lock poisoned");
        if let Some(existing) = cache.get(name) {
            existing.clone()
        } else {
            let arc: Arc<str> = name.into();
            cache.insert(name.to_string(), arc.clone());
            arc
        }
    }

    /// Get the symbol name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Serialize for Symbol {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.name)
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        if name.is_empty() {
            return Err(serde::de::Error::custom("symbol name must be non-empty"));
        }
        Ok(Symbol::new(name))
    }
}

/// Construct several symbols from a whitespace-separated name list
///
/// # Examples
///
/// ```rust
/// use antiderive_core::symbols;
///
/// let vars = symbols("x y z");
/// assert_eq!(vars.len(), 3);
/// assert_eq!(vars[1].name(), "y");
/// ```
pub fn symbols(names: &str) -> Vec<Symbol> {
    names.split_whitespace().map(Symbol::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning_shares_storage() {
        let a = Symbol::new("shared_name");
        let b = Symbol::new("shared_name");
        assert!(Arc::ptr_eq(&a.name, &b.name));
    }

    #[test]
    fn test_symbols_splits_names() {
        let vars = symbols("alpha beta");
        assert_eq!(vars[0].name(), "alpha");
        assert_eq!(vars[1].name(), "beta");
    }

    #[test]
    #[should_panic(expected = "non-empty")]
    fn test_empty_name_rejected() {
        let _ = Symbol::new("");
    }

    #[test]
    fn test_serde_round_trip() {
        let x = Symbol::new("x");
        let json = serde_json::to_string(&x).expect("serialize");
        assert_eq!(json, "\"x\"");
        let back: Symbol = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, x);
    }
}
