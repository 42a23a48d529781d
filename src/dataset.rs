//! Dataset loading: the Superstore CSV export parsed into tidy [`Record`]s.
//!
//! The source data is assumed already normalized (no cleaning happens here),
//! with two exceptions handled at load time:
//! - order dates are parsed from the export's `M/D/YYYY` form (ISO dates are
//!   accepted too),
//! - full state names are resolved to two-letter codes through a fixed
//!   50-entry table; names outside the table yield `state: None` and are
//!   reported once via `log::warn!` so the data loss is visible.

use crate::models::Record;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Typed load failures; wrapped in `anyhow::Error` by [`load_csv`].
#[derive(Debug, Error)]
pub enum DataError {
    #[error("row {row}: unreadable order date {value:?}")]
    BadDate { row: usize, value: String },
}

/// Full state name -> USPS code, all 50 states.
const STATE_CODES: [(&str, &str); 50] = [
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("Delaware", "DE"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Pennsylvania", "PA"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
];

/// Resolve a full state name to its USPS code.
pub fn state_code(full_name: &str) -> Option<&'static str> {
    STATE_CODES
        .iter()
        .find(|(name, _)| *name == full_name)
        .map(|(_, code)| *code)
}

/// Raw CSV row. Extra columns in the export (order id, postal code, ...) are
/// ignored by serde.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Order Date")]
    order_date: String,
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Sub-Category")]
    sub_category: String,
    #[serde(rename = "Segment")]
    segment: String,
    #[serde(rename = "Ship Mode")]
    ship_mode: String,
    #[serde(rename = "Product Name")]
    product_name: String,
    #[serde(rename = "Customer Name")]
    customer_name: String,
    #[serde(rename = "Sales")]
    sales: f64,
    #[serde(rename = "Profit")]
    profit: f64,
    #[serde(rename = "Discount")]
    discount: f64,
    #[serde(rename = "Quantity")]
    quantity: u32,
}

/// The export writes dates as `M/D/YYYY`; accept ISO as a fallback.
fn parse_order_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}

/// Load a Superstore CSV export into tidy records.
///
/// ### Errors
/// - File/CSV read error
/// - Unparseable order date (the dataset is assumed normalized, so this is a
///   hard error rather than a per-row skip)
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("open dataset {}", path.display()))?;

    let mut records = Vec::new();
    // Distinct unmapped state names -> affected row count, for one warning.
    let mut unmapped: BTreeMap<String, usize> = BTreeMap::new();

    for (idx, row) in rdr.deserialize::<RawRow>().enumerate() {
        let raw = row.with_context(|| format!("read dataset {}", path.display()))?;
        let order_date = parse_order_date(&raw.order_date).ok_or_else(|| DataError::BadDate {
            row: idx + 1,
            value: raw.order_date.clone(),
        })?;
        let state = match state_code(&raw.state) {
            Some(code) => Some(code.to_string()),
            None => {
                *unmapped.entry(raw.state.clone()).or_default() += 1;
                None
            }
        };
        records.push(Record {
            order_date,
            region: raw.region,
            state,
            city: raw.city,
            category: raw.category,
            sub_category: raw.sub_category,
            segment: raw.segment,
            ship_mode: raw.ship_mode,
            product_name: raw.product_name,
            customer_name: raw.customer_name,
            sales: raw.sales,
            profit: raw.profit,
            discount: raw.discount,
            quantity: raw.quantity,
        });
    }

    if !unmapped.is_empty() {
        let rows: usize = unmapped.values().sum();
        let names: Vec<&str> = unmapped.keys().map(String::as_str).collect();
        log::warn!(
            "{} row(s) carry state names outside the code table ({}); they are \
             excluded from state-keyed aggregations",
            rows,
            names.join(", ")
        );
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_all_fifty_states() {
        assert_eq!(state_code("California"), Some("CA"));
        assert_eq!(state_code("New York"), Some("NY"));
        assert_eq!(state_code("Wyoming"), Some("WY"));
        assert_eq!(state_code("Puerto Rico"), None);
        assert_eq!(state_code("california"), None); // literal match only
    }

    #[test]
    fn parses_export_and_iso_dates() {
        let d = parse_order_date("11/8/2017").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2017, 11, 8).unwrap());
        let d = parse_order_date("2017-11-08").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2017, 11, 8).unwrap());
        assert!(parse_order_date("8th of November").is_none());
    }
}
