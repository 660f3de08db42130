//! Named registry of market objects.
//!
//! Pricing calls refer to discount curves and volatilities by name. The
//! registry that resolves those names is an ordinary value owned by the
//! caller and passed into every pricing call, so separate runs can use
//! separate stores and a store can be reset between runs.
//!
//! Names are normalised (trimmed, upper-cased). Every `set` bumps a
//! per-name version and returns a tag of the form `NAME~version`; lookups
//! accept either the bare name or a tag. A tag whose version is no longer
//! current does not resolve.

use super::curves::CurveEnum;
use super::error::MarketDataError;
use super::surfaces::VolEnum;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Separator between name and version in a tag.
pub const TAG_SEPARATOR: char = '~';

#[derive(Debug, Clone)]
struct Entry<V> {
    version: u64,
    object: Arc<V>,
}

/// Versioned, name-keyed collection of one kind of market object.
#[derive(Debug, Clone)]
pub struct Registry<V> {
    kind: &'static str,
    entries: BTreeMap<String, Entry<V>>,
}

impl<V> Registry<V> {
    fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: BTreeMap::new(),
        }
    }

    fn normalise(name: &str) -> String {
        name.trim().to_ascii_uppercase()
    }

    /// Store `object` under `name`, returning its tag.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the name is empty or contains the tag separator.
    pub fn set(&mut self, name: &str, object: V) -> Result<String, MarketDataError> {
        let key = Self::normalise(name);
        if key.is_empty() || key.contains(TAG_SEPARATOR) {
            return Err(MarketDataError::InvalidInput(format!(
                "invalid {} name '{}'",
                self.kind, name
            )));
        }
        let version = self.entries.get(&key).map_or(1, |e| e.version + 1);
        let tag = format!("{}{}{}", key, TAG_SEPARATOR, version);
        debug!(kind = self.kind, %tag, "registered market object");
        self.entries.insert(
            key,
            Entry {
                version,
                object: Arc::new(object),
            },
        );
        Ok(tag)
    }

    /// Resolve a name or tag to the stored object.
    ///
    /// # Errors
    ///
    /// `NotFound` if the name is unknown or the tag's version is stale.
    pub fn get(&self, name_or_tag: &str) -> Result<Arc<V>, MarketDataError> {
        let not_found = || MarketDataError::NotFound {
            kind: self.kind,
            name: name_or_tag.trim().to_string(),
        };
        let (name, version) = match name_or_tag.split_once(TAG_SEPARATOR) {
            Some((name, version)) => {
                let version: u64 = version.trim().parse().map_err(|_| not_found())?;
                (name, Some(version))
            }
            None => (name_or_tag, None),
        };
        let entry = self.entries.get(&Self::normalise(name)).ok_or_else(not_found)?;
        match version {
            Some(v) if v != entry.version => Err(not_found()),
            _ => Ok(Arc::clone(&entry.object)),
        }
    }

    /// Whether `name_or_tag` resolves.
    pub fn contains(&self, name_or_tag: &str) -> bool {
        self.get(name_or_tag).is_ok()
    }

    /// Sorted list of stored names.
    pub fn list(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Market-data store holding yield curves and volatilities.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::{CurveEnum, MarketStore, VolEnum, YieldCurve};
///
/// let mut market = MarketStore::new();
/// let tag = market.yield_curves.set("usd.ois", CurveEnum::flat(0.03)).unwrap();
/// assert_eq!(tag, "USD.OIS~1");
///
/// let curve = market.yield_curves.get(" USD.OIS ").unwrap();
/// assert!((curve.spot_rate(1.0).unwrap() - 0.03).abs() < 1e-15);
///
/// market.volatilities.set("SPX", VolEnum::flat(0.2)).unwrap();
/// assert_eq!(market.volatilities.list(), vec!["SPX".to_string()]);
///
/// market.clear();
/// assert!(market.yield_curves.get("USD.OIS").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MarketStore {
    /// Discount curves by name.
    pub yield_curves: Registry<CurveEnum<f64>>,
    /// Volatility term structures by name.
    pub volatilities: Registry<VolEnum<f64>>,
}

impl MarketStore {
    /// Construct an empty store.
    pub fn new() -> Self {
        Self {
            yield_curves: Registry::new("yield curve"),
            volatilities: Registry::new("volatility"),
        }
    }

    /// Remove every object from both registries.
    pub fn clear(&mut self) {
        self.yield_curves.clear();
        self.volatilities.clear();
    }
}

impl Default for MarketStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_bumps_version() {
        let mut store = MarketStore::new();
        assert_eq!(store.yield_curves.set("eur", CurveEnum::flat(0.01)).unwrap(), "EUR~1");
        assert_eq!(store.yield_curves.set("EUR ", CurveEnum::flat(0.02)).unwrap(), "EUR~2");
        assert_eq!(store.yield_curves.len(), 1);
    }

    #[test]
    fn test_get_by_name_and_tag() {
        let mut store = MarketStore::new();
        store.yield_curves.set("EUR", CurveEnum::flat(0.01)).unwrap();
        let tag = store.yield_curves.set("EUR", CurveEnum::flat(0.02)).unwrap();

        assert_eq!(*store.yield_curves.get("eur").unwrap(), CurveEnum::flat(0.02));
        assert_eq!(*store.yield_curves.get(&tag).unwrap(), CurveEnum::flat(0.02));
        // Stale tag
        assert!(matches!(
            store.yield_curves.get("EUR~1"),
            Err(MarketDataError::NotFound { .. })
        ));
    }

    #[test]
    fn test_missing_name_reports_kind() {
        let store = MarketStore::new();
        match store.volatilities.get("SPX").unwrap_err() {
            MarketDataError::NotFound { kind, name } => {
                assert_eq!(kind, "volatility");
                assert_eq!(name, "SPX");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_names_rejected() {
        let mut store = MarketStore::new();
        assert!(store.volatilities.set("  ", VolEnum::flat(0.2)).is_err());
        assert!(store.volatilities.set("A~B", VolEnum::flat(0.2)).is_err());
    }

    #[test]
    fn test_list_sorted_and_clear() {
        let mut store = MarketStore::new();
        store.volatilities.set("b", VolEnum::flat(0.2)).unwrap();
        store.volatilities.set("a", VolEnum::flat(0.3)).unwrap();
        assert_eq!(store.volatilities.list(), vec!["A".to_string(), "B".to_string()]);
        assert!(store.volatilities.contains("A~1"));

        store.clear();
        assert!(store.volatilities.is_empty());
        assert!(store.yield_curves.is_empty());
    }
}
