use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Tidy structure used by this crate (one row = one order line).
///
/// Records are produced once by [`crate::dataset::load_csv`] and never mutated
/// afterwards; the engine only filters and groups them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub order_date: NaiveDate,
    pub region: String,
    /// Two-letter state code. `None` when the source state name is outside
    /// the fixed name-to-code table; such records still count toward every
    /// non-geographic aggregation.
    pub state: Option<String>,
    pub city: String,
    pub category: String,
    pub sub_category: String,
    pub segment: String,
    pub ship_mode: String,
    pub product_name: String,
    pub customer_name: String,
    pub sales: f64,
    pub profit: f64,
    /// Fraction in `[0, 1]`.
    pub discount: f64,
    pub quantity: u32,
}

/// Region selector: everything, or one region by name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RegionFilter {
    #[default]
    All,
    Region(String),
}

/// Year selector: everything, or one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum YearFilter {
    #[default]
    All,
    Year(i32),
}

/// One page's filter selection. Recreated per user interaction; `All` on
/// either dimension leaves that dimension unrestricted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub region: RegionFilter,
    pub year: YearFilter,
}

impl FilterCriteria {
    /// Criteria matching every record (region = All, year = All).
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(region: RegionFilter, year: YearFilter) -> Self {
        Self { region, year }
    }

    pub fn with_region(region: impl Into<String>) -> Self {
        Self {
            region: RegionFilter::Region(region.into()),
            year: YearFilter::All,
        }
    }

    /// Whether a record passes both dimensions.
    pub fn matches(&self, r: &Record) -> bool {
        let region_ok = match &self.region {
            RegionFilter::All => true,
            RegionFilter::Region(name) => r.region == *name,
        };
        let year_ok = match self.year {
            YearFilter::All => true,
            YearFilter::Year(y) => r.order_date.year() == y,
        };
        region_ok && year_ok
    }
}
