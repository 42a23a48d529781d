//! salesview
//!
//! A lightweight Rust library for filtering, aggregating, and summarizing
//! Superstore order data. Pairs with the `salesview` CLI.
//!
//! ### Features
//! - Load the Superstore CSV export into a tidy, analysis-friendly schema
//! - Narrow records by region and year, independently per dashboard page
//! - Derive every chart table (category totals, top-10 rankings, monthly
//!   series, segment/ship-mode performance) plus the three headline KPIs
//! - Geographic drill-down: city-level sales overlay for a selected state
//!
//! ### Example
//! ```no_run
//! use salesview_rs::assemble::{DataContext, RecomputeInputs, recompute};
//! use salesview_rs::lookup::GeoTables;
//! use salesview_rs::models::FilterCriteria;
//!
//! let records = salesview_rs::dataset::load_csv("Superstore.csv")?;
//! let ctx = DataContext::new(records, GeoTables::builtin());
//! let mut inputs = RecomputeInputs::default();
//! inputs.filters.home = FilterCriteria::with_region("West");
//! inputs.drill.select("CA");
//! let bundle = recompute(&ctx, &inputs);
//! println!("total sales: {}", bundle.kpi_text.total_sales);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod aggregate;
pub mod assemble;
pub mod dataset;
pub mod drilldown;
pub mod filter;
pub mod kpi;
pub mod lookup;
pub mod models;
pub mod storage;
pub mod view;

pub use assemble::{DashboardBundle, DataContext, RecomputeInputs, recompute};
pub use models::{FilterCriteria, Record, RegionFilter, YearFilter};
pub use view::{NavCounters, Page, PageFilters};
