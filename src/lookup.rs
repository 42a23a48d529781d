//! Static coordinate tables for the geographic drill-down.
//!
//! Both tables are deliberately partial: not every city (or even state) has a
//! coordinate entry, and lookups returning `None` are a normal condition the
//! drill-down handles by dropping the row or omitting the map focus.

use ahash::AHashMap;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Read-only coordinate lookups, keyed by state code and city name.
#[derive(Debug, Clone, Default)]
pub struct GeoTables {
    states: AHashMap<String, (f64, f64)>,
    cities: AHashMap<String, (f64, f64)>,
}

/// On-disk shape for [`GeoTables::merge_json`].
#[derive(Debug, Deserialize, Default)]
struct GeoFile {
    #[serde(default)]
    states: HashMap<String, (f64, f64)>,
    #[serde(default)]
    cities: HashMap<String, (f64, f64)>,
}

impl GeoTables {
    /// The built-in tables shipped with the dashboard.
    pub fn builtin() -> Self {
        let mut t = Self::default();
        for (code, lat, lon) in [
            ("CA", 36.7783, -119.4179),
            ("FL", 27.6648, -81.5158),
            ("NY", 40.7128, -74.0060),
        ] {
            t.states.insert(code.to_string(), (lat, lon));
        }
        for (city, lat, lon) in [
            ("Los Angeles", 34.0522, -118.2437),
            ("San Francisco", 37.7749, -122.4194),
            ("Miami", 25.7617, -80.1918),
            ("Orlando", 28.5383, -81.3792),
            ("New York", 40.7128, -74.0060),
            ("Buffalo", 42.8864, -78.8784),
        ] {
            t.cities.insert(city.to_string(), (lat, lon));
        }
        t
    }

    /// Centroid of a state, by two-letter code.
    pub fn state(&self, code: &str) -> Option<(f64, f64)> {
        self.states.get(code).copied()
    }

    /// Coordinate of a city, by name.
    pub fn city(&self, name: &str) -> Option<(f64, f64)> {
        self.cities.get(name).copied()
    }

    /// Merge additional entries from a JSON file of the form
    /// `{"states": {"TX": [31.0, -100.0]}, "cities": {"Austin": [30.27, -97.74]}}`.
    /// Entries in the file win over existing ones.
    pub fn merge_json<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("open coordinate file {}", path.display()))?;
        let file: GeoFile = serde_json::from_str(&text)
            .with_context(|| format!("parse coordinate file {}", path.display()))?;
        self.states.extend(file.states);
        self.cities.extend(file.cities);
        Ok(())
    }
}
