//! OutputAssembler: one full recompute pass, from inputs to the named
//! output bundle.

use crate::aggregate::{AggregationResult, aggregate, specs};
use crate::drilldown::{self, CityOverlay, DrillDown};
use crate::filter;
use crate::kpi::{self, FormattedKpis, Kpis};
use crate::lookup::GeoTables;
use crate::models::Record;
use crate::view::{NavCounters, Page, PageFilters};
use serde::{Deserialize, Serialize};

/// Immutable data context built once at startup: the cleaned records and the
/// coordinate tables. Every recompute reads from here; nothing writes back.
#[derive(Debug, Clone)]
pub struct DataContext {
    pub records: Vec<Record>,
    pub geo: GeoTables,
}

impl DataContext {
    pub fn new(records: Vec<Record>, geo: GeoTables) -> Self {
        Self { records, geo }
    }
}

/// Everything the UI layer supplies for one recompute.
#[derive(Debug, Clone, Default)]
pub struct RecomputeInputs {
    pub filters: PageFilters,
    pub nav: NavCounters,
    pub drill: DrillDown,
}

/// The full named output set, produced in its entirety every recompute; the
/// rendering layer discards what the active page does not show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardBundle {
    pub page: Page,
    pub sales_by_category: AggregationResult,
    pub sales_over_time: AggregationResult,
    pub sales_by_state: AggregationResult,
    pub sales_by_subcategory: AggregationResult,
    pub profit_by_subcategory: AggregationResult,
    pub discount_by_category: AggregationResult,
    pub quantity_by_product: AggregationResult,
    pub performance_by_segment: AggregationResult,
    pub performance_by_shipmode: AggregationResult,
    pub sales_by_city: AggregationResult,
    pub sales_by_month: AggregationResult,
    pub profit_by_customer: AggregationResult,
    pub kpis: Kpis,
    pub kpi_text: FormattedKpis,
    /// Present only while a state is selected on the map.
    pub overlay: Option<CityOverlay>,
}

/// Run one full recompute: pick the active page's criteria, narrow the
/// records, and derive every table, the KPIs, and the drill-down overlay.
///
/// Pure in its inputs; calling it twice with the same context and inputs
/// yields identical bundles.
pub fn recompute(ctx: &DataContext, inputs: &RecomputeInputs) -> DashboardBundle {
    let page = inputs.nav.active_page();
    let criteria = inputs.filters.for_page(page);
    let rows = filter::apply(&ctx.records, criteria);
    log::debug!(
        "recompute: page={page:?}, {}/{} records pass {criteria:?}",
        rows.len(),
        ctx.records.len()
    );

    let kpis = kpi::compute(&rows);
    let kpi_text = kpis.formatted();
    let overlay = inputs
        .drill
        .selection()
        .map(|code| drilldown::overlay(&rows, code, &ctx.geo));

    DashboardBundle {
        page,
        sales_by_category: aggregate(&rows, &specs::sales_by_category()),
        sales_over_time: aggregate(&rows, &specs::sales_over_time()),
        sales_by_state: aggregate(&rows, &specs::sales_by_state()),
        sales_by_subcategory: aggregate(&rows, &specs::sales_by_subcategory()),
        profit_by_subcategory: aggregate(&rows, &specs::profit_by_subcategory()),
        discount_by_category: aggregate(&rows, &specs::discount_by_category()),
        quantity_by_product: aggregate(&rows, &specs::quantity_by_product()),
        performance_by_segment: aggregate(&rows, &specs::performance_by_segment()),
        performance_by_shipmode: aggregate(&rows, &specs::performance_by_shipmode()),
        sales_by_city: aggregate(&rows, &specs::sales_by_city()),
        sales_by_month: aggregate(&rows, &specs::sales_by_month()),
        profit_by_customer: aggregate(&rows, &specs::profit_by_customer()),
        kpis,
        kpi_text,
        overlay,
    }
}
