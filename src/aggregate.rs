//! AggregationEngine: grouped, sorted, optionally truncated summary tables.
//!
//! One [`AggregationSpec`] declaratively describes one derived table; the
//! [`specs`] submodule holds the spec for every chart the dashboard shows.

use crate::models::Record;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Categorical field used to group records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    Category,
    SubCategory,
    Segment,
    ShipMode,
    Product,
    Customer,
    City,
    State,
    /// Order date as `YYYY-MM-DD`, so key order is chronological.
    OrderDate,
    /// Order month as `YYYY-MM`.
    OrderMonth,
}

impl Dimension {
    /// Grouping key for a record, or `None` when the record lacks the
    /// dimension (an unmapped state). Records returning `None` are skipped by
    /// any aggregation grouping on that dimension.
    pub fn extract(&self, r: &Record) -> Option<String> {
        match self {
            Dimension::Category => Some(r.category.clone()),
            Dimension::SubCategory => Some(r.sub_category.clone()),
            Dimension::Segment => Some(r.segment.clone()),
            Dimension::ShipMode => Some(r.ship_mode.clone()),
            Dimension::Product => Some(r.product_name.clone()),
            Dimension::Customer => Some(r.customer_name.clone()),
            Dimension::City => Some(r.city.clone()),
            Dimension::State => r.state.clone(),
            Dimension::OrderDate => Some(r.order_date.format("%Y-%m-%d").to_string()),
            Dimension::OrderMonth => Some(r.order_date.format("%Y-%m").to_string()),
        }
    }
}

/// Numeric field being aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Measure {
    Sales,
    Profit,
    Quantity,
    Discount,
}

impl Measure {
    fn value(&self, r: &Record) -> f64 {
        match self {
            Measure::Sales => r.sales,
            Measure::Profit => r.profit,
            Measure::Quantity => f64::from(r.quantity),
            Measure::Discount => r.discount,
        }
    }
}

/// Reduction applied to a measure within each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggFunc {
    Sum,
    Mean,
    /// Quantity-weighted mean: Σ(value × quantity) / Σ(quantity). Used for
    /// the average discount, which weights each order line by units sold.
    WeightedMean,
}

/// One output column: a measure and how to reduce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureSpec {
    pub measure: Measure,
    pub func: AggFunc,
}

impl MeasureSpec {
    pub fn sum(measure: Measure) -> Self {
        Self { measure, func: AggFunc::Sum }
    }

    pub fn weighted_mean(measure: Measure) -> Self {
        Self { measure, func: AggFunc::WeightedMean }
    }
}

/// What the rows are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    /// The group-key tuple (lexicographic).
    Key,
    /// The value column at this index.
    Measure(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDir {
    Ascending,
    Descending,
}

/// Declarative description of one derived table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationSpec {
    /// One or two grouping dimensions.
    pub group_by: Vec<Dimension>,
    /// Value columns, each computed independently over the same grouping.
    pub measures: Vec<MeasureSpec>,
    pub sort: SortKey,
    pub direction: SortDir,
    /// Keep only the first N rows after sorting.
    pub limit: Option<usize>,
}

/// One result row: group-key tuple plus one value per [`MeasureSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggRow {
    pub key: Vec<String>,
    pub values: Vec<f64>,
}

impl AggRow {
    /// First key component; every spec groups on at least one dimension.
    pub fn label(&self) -> &str {
        self.key.first().map(String::as_str).unwrap_or("")
    }

    /// First value column.
    pub fn value(&self) -> f64 {
        self.values.first().copied().unwrap_or(0.0)
    }
}

/// Ordered result rows; row order is the spec's sort order.
pub type AggregationResult = Vec<AggRow>;

#[derive(Debug, Clone, Copy, Default)]
struct Accum {
    sum: f64,
    count: u64,
    weighted_sum: f64,
    weight: f64,
}

impl Accum {
    fn push(&mut self, value: f64, quantity: u32) {
        self.sum += value;
        self.count += 1;
        self.weighted_sum += value * f64::from(quantity);
        self.weight += f64::from(quantity);
    }

    /// Finalize for a group; groups always hold at least one record, and
    /// quantities are positive, so the divisors are nonzero.
    fn finish(&self, func: AggFunc) -> f64 {
        match func {
            AggFunc::Sum => self.sum,
            AggFunc::Mean => self.sum / self.count as f64,
            AggFunc::WeightedMean => self.weighted_sum / self.weight,
        }
    }
}

/// Aggregate records into the table described by `spec`.
///
/// Groups are keyed by the literal tuple of extracted dimension values, ties
/// keep first-encounter order (the sort is stable), and zero input rows yield
/// an empty result.
pub fn aggregate(records: &[&Record], spec: &AggregationSpec) -> AggregationResult {
    let mut index: AHashMap<Vec<String>, usize> = AHashMap::new();
    let mut keys: Vec<Vec<String>> = Vec::new();
    let mut accums: Vec<Vec<Accum>> = Vec::new();

    'records: for r in records {
        let mut key = Vec::with_capacity(spec.group_by.len());
        for dim in &spec.group_by {
            match dim.extract(r) {
                Some(v) => key.push(v),
                None => continue 'records,
            }
        }
        let slot = *index.entry(key).or_insert_with_key(|k| {
            keys.push(k.clone());
            accums.push(vec![Accum::default(); spec.measures.len()]);
            keys.len() - 1
        });
        for (acc, m) in accums[slot].iter_mut().zip(&spec.measures) {
            acc.push(m.measure.value(r), r.quantity);
        }
    }

    let mut rows: Vec<AggRow> = keys
        .into_iter()
        .zip(accums)
        .map(|(key, accs)| AggRow {
            values: accs
                .iter()
                .zip(&spec.measures)
                .map(|(acc, m)| acc.finish(m.func))
                .collect(),
            key,
        })
        .collect();

    rows.sort_by(|a, b| {
        let ord = match spec.sort {
            SortKey::Key => a.key.cmp(&b.key),
            SortKey::Measure(i) => a.values[i].total_cmp(&b.values[i]),
        };
        match spec.direction {
            SortDir::Ascending => ord,
            SortDir::Descending => ord.reverse(),
        }
    });

    if let Some(limit) = spec.limit {
        rows.truncate(limit);
    }
    rows
}

/// The spec behind each chart of the dashboard.
pub mod specs {
    use super::*;

    fn sum_table(
        group_by: Vec<Dimension>,
        measure: Measure,
        sort: SortKey,
        direction: SortDir,
        limit: Option<usize>,
    ) -> AggregationSpec {
        AggregationSpec {
            group_by,
            measures: vec![MeasureSpec::sum(measure)],
            sort,
            direction,
            limit,
        }
    }

    /// Total sales per category, best first.
    pub fn sales_by_category() -> AggregationSpec {
        sum_table(
            vec![Dimension::Category],
            Measure::Sales,
            SortKey::Measure(0),
            SortDir::Descending,
            None,
        )
    }

    /// Daily sales time series.
    pub fn sales_over_time() -> AggregationSpec {
        sum_table(
            vec![Dimension::OrderDate],
            Measure::Sales,
            SortKey::Key,
            SortDir::Ascending,
            None,
        )
    }

    /// Total sales per state, ascending (the choropleth's input order).
    /// Records with an unmapped state are absent here.
    pub fn sales_by_state() -> AggregationSpec {
        sum_table(
            vec![Dimension::State],
            Measure::Sales,
            SortKey::Measure(0),
            SortDir::Ascending,
            None,
        )
    }

    /// Sales per sub-category, with the parent category carried in the key.
    pub fn sales_by_subcategory() -> AggregationSpec {
        sum_table(
            vec![Dimension::SubCategory, Dimension::Category],
            Measure::Sales,
            SortKey::Measure(0),
            SortDir::Descending,
            None,
        )
    }

    /// Profit per sub-category, with the parent category carried in the key.
    pub fn profit_by_subcategory() -> AggregationSpec {
        sum_table(
            vec![Dimension::SubCategory, Dimension::Category],
            Measure::Profit,
            SortKey::Measure(0),
            SortDir::Descending,
            None,
        )
    }

    /// Average discount per category, quantity-weighted.
    pub fn discount_by_category() -> AggregationSpec {
        AggregationSpec {
            group_by: vec![Dimension::Category],
            measures: vec![MeasureSpec::weighted_mean(Measure::Discount)],
            sort: SortKey::Measure(0),
            direction: SortDir::Descending,
            limit: None,
        }
    }

    /// Top 10 products by units sold.
    pub fn quantity_by_product() -> AggregationSpec {
        sum_table(
            vec![Dimension::Product],
            Measure::Quantity,
            SortKey::Measure(0),
            SortDir::Descending,
            Some(10),
        )
    }

    /// Sales and profit per customer segment, sorted by sales.
    pub fn performance_by_segment() -> AggregationSpec {
        AggregationSpec {
            group_by: vec![Dimension::Segment],
            measures: vec![MeasureSpec::sum(Measure::Sales), MeasureSpec::sum(Measure::Profit)],
            sort: SortKey::Measure(0),
            direction: SortDir::Descending,
            limit: None,
        }
    }

    /// Sales and profit per ship mode, sorted by sales.
    pub fn performance_by_shipmode() -> AggregationSpec {
        AggregationSpec {
            group_by: vec![Dimension::ShipMode],
            measures: vec![MeasureSpec::sum(Measure::Sales), MeasureSpec::sum(Measure::Profit)],
            sort: SortKey::Measure(0),
            direction: SortDir::Descending,
            limit: None,
        }
    }

    /// Top 10 cities by sales.
    pub fn sales_by_city() -> AggregationSpec {
        sum_table(
            vec![Dimension::City],
            Measure::Sales,
            SortKey::Measure(0),
            SortDir::Descending,
            Some(10),
        )
    }

    /// Monthly sales time series.
    pub fn sales_by_month() -> AggregationSpec {
        sum_table(
            vec![Dimension::OrderMonth],
            Measure::Sales,
            SortKey::Key,
            SortDir::Ascending,
            None,
        )
    }

    /// Top 10 customers by profit.
    pub fn profit_by_customer() -> AggregationSpec {
        sum_table(
            vec![Dimension::Customer],
            Measure::Profit,
            SortKey::Measure(0),
            SortDir::Descending,
            Some(10),
        )
    }

    /// City sales within one state, for the drill-down overlay. Key order
    /// (city name) like the original map trace.
    pub fn sales_by_city_in_state() -> AggregationSpec {
        sum_table(
            vec![Dimension::City],
            Measure::Sales,
            SortKey::Key,
            SortDir::Ascending,
            None,
        )
    }
}
