//! DrillDownController: the geographic selection and its city-level overlay.

use crate::aggregate::{self, specs};
use crate::lookup::GeoTables;
use crate::models::Record;
use serde::{Deserialize, Serialize};

/// Map projection scale applied when centering on a selected state.
pub const STATE_ZOOM: f64 = 5.0;

/// Geographic selection state. A map click always replaces the selection;
/// there is no deselect event in this design.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrillDown {
    #[default]
    Idle,
    StateSelected(String),
}

impl DrillDown {
    /// Apply a "map location clicked" event.
    pub fn select(&mut self, code: impl Into<String>) {
        *self = DrillDown::StateSelected(code.into());
    }

    /// The selected state code, if any.
    pub fn selection(&self) -> Option<&str> {
        match self {
            DrillDown::Idle => None,
            DrillDown::StateSelected(code) => Some(code),
        }
    }
}

/// One overlay marker: a city with a coordinate and its sales total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityMarker {
    pub city: String,
    pub lat: f64,
    pub lon: f64,
    pub sales: f64,
}

/// Re-centering directive for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapFocus {
    pub lat: f64,
    pub lon: f64,
    pub zoom: f64,
}

/// City-level overlay for a selected state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityOverlay {
    pub state: String,
    pub cities: Vec<CityMarker>,
    /// Omitted entirely when the selected state has no centroid entry.
    pub focus: Option<MapFocus>,
}

/// Compute the overlay for `code` over an already-filtered record view.
///
/// Cities without a coordinate entry are dropped from the overlay; that loss
/// is part of the contract, not an error.
pub fn overlay(records: &[&Record], code: &str, geo: &GeoTables) -> CityOverlay {
    let scoped: Vec<&Record> = records
        .iter()
        .copied()
        .filter(|r| r.state.as_deref() == Some(code))
        .collect();

    let cities = aggregate::aggregate(&scoped, &specs::sales_by_city_in_state())
        .into_iter()
        .filter_map(|row| {
            let (lat, lon) = geo.city(row.label())?;
            Some(CityMarker {
                city: row.label().to_string(),
                lat,
                lon,
                sales: row.value(),
            })
        })
        .collect();

    let focus = geo.state(code).map(|(lat, lon)| MapFocus {
        lat,
        lon,
        zoom: STATE_ZOOM,
    });

    CityOverlay {
        state: code.to_string(),
        cities,
        focus,
    }
}
