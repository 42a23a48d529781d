use chrono::NaiveDate;
use salesview_rs::aggregate::{aggregate, specs};
use salesview_rs::filter;
use salesview_rs::models::{FilterCriteria, Record, RegionFilter, YearFilter};

fn base() -> Record {
    Record {
        order_date: NaiveDate::from_ymd_opt(2017, 6, 15).unwrap(),
        region: "West".into(),
        state: Some("CA".into()),
        city: "Los Angeles".into(),
        category: "Technology".into(),
        sub_category: "Phones".into(),
        segment: "Consumer".into(),
        ship_mode: "Second Class".into(),
        product_name: "Phone X".into(),
        customer_name: "Ann Smith".into(),
        sales: 100.0,
        profit: 20.0,
        discount: 0.0,
        quantity: 1,
    }
}

fn refs(records: &[Record]) -> Vec<&Record> {
    records.iter().collect()
}

#[test]
fn region_all_is_identity() {
    let records = vec![
        Record { region: "West".into(), ..base() },
        Record { region: "East".into(), ..base() },
        Record { region: "South".into(), ..base() },
    ];
    let view = filter::apply(&records, &FilterCriteria::all());
    assert_eq!(view.len(), records.len());
    for (got, want) in view.iter().zip(&records) {
        assert_eq!(*got, want);
    }
}

#[test]
fn filter_dimensions_commute() {
    let records = vec![
        Record { region: "West".into(), order_date: NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(), ..base() },
        Record { region: "West".into(), order_date: NaiveDate::from_ymd_opt(2017, 1, 1).unwrap(), ..base() },
        Record { region: "East".into(), order_date: NaiveDate::from_ymd_opt(2017, 1, 1).unwrap(), ..base() },
    ];
    let region_only = FilterCriteria::new(RegionFilter::Region("West".into()), YearFilter::All);
    let year_only = FilterCriteria::new(RegionFilter::All, YearFilter::Year(2017));
    let both = FilterCriteria::new(RegionFilter::Region("West".into()), YearFilter::Year(2017));

    // Apply region first, then year over the narrowed set.
    let first: Vec<Record> = filter::apply(&records, &region_only)
        .into_iter()
        .cloned()
        .collect();
    let region_then_year = filter::apply(&first, &year_only);

    // And the other order.
    let second: Vec<Record> = filter::apply(&records, &year_only)
        .into_iter()
        .cloned()
        .collect();
    let year_then_region = filter::apply(&second, &region_only);

    let combined = filter::apply(&records, &both);
    assert_eq!(region_then_year, year_then_region);
    assert_eq!(region_then_year.len(), combined.len());
    assert_eq!(region_then_year[0].order_date, combined[0].order_date);
}

#[test]
fn unmatched_region_yields_empty_not_error() {
    let records = vec![base()];
    let view = filter::apply(&records, &FilterCriteria::with_region("Atlantis"));
    assert!(view.is_empty());
}

#[test]
fn category_totals_cover_filtered_sum() {
    let records = vec![
        Record { category: "Technology".into(), sales: 10.0, ..base() },
        Record { category: "Furniture".into(), sales: 20.5, ..base() },
        Record { category: "Technology".into(), sales: 5.25, ..base() },
        Record { category: "Office Supplies".into(), sales: 1.0, ..base() },
    ];
    let view = refs(&records);
    let table = aggregate(&view, &specs::sales_by_category());
    let table_total: f64 = table.iter().map(|r| r.value()).sum();
    let direct_total: f64 = records.iter().map(|r| r.sales).sum();
    assert!((table_total - direct_total).abs() < 1e-9);
    assert_eq!(table.len(), 3);
    // Best category first.
    assert_eq!(table[0].label(), "Furniture");
}

#[test]
fn limit_keeps_top_ranked_rows_only() {
    let records: Vec<Record> = (0..15u32)
        .map(|i| Record {
            product_name: format!("Product {i:02}"),
            quantity: 1 + i,
            ..base()
        })
        .collect();
    let view = refs(&records);
    let table = aggregate(&view, &specs::quantity_by_product());
    assert_eq!(table.len(), 10);
    // Sorted descending...
    for pair in table.windows(2) {
        assert!(pair[0].value() >= pair[1].value());
    }
    // ...and nothing outside the top 10 sneaks in.
    let cutoff = table.last().unwrap().value();
    assert!(cutoff >= 6.0);
}

#[test]
fn discount_mean_is_quantity_weighted() {
    let records = vec![
        Record { discount: 0.1, quantity: 10, ..base() },
        Record { discount: 0.5, quantity: 2, ..base() },
    ];
    let view = refs(&records);
    let table = aggregate(&view, &specs::discount_by_category());
    assert_eq!(table.len(), 1);
    let got = table[0].value();
    let want = (0.1 * 10.0 + 0.5 * 2.0) / 12.0;
    assert!((got - want).abs() < 1e-12);
    // Not the plain row mean.
    assert!((got - 0.3).abs() > 0.1);
}

#[test]
fn custom_spec_with_plain_mean() {
    use salesview_rs::aggregate::{AggFunc, AggregationSpec, Dimension, Measure, MeasureSpec, SortDir, SortKey};

    let records = vec![
        Record { region: "West".into(), sales: 10.0, ..base() },
        Record { region: "West".into(), sales: 30.0, ..base() },
        Record { region: "East".into(), sales: 7.0, ..base() },
    ];
    let spec = AggregationSpec {
        group_by: vec![Dimension::Category],
        measures: vec![MeasureSpec { measure: Measure::Sales, func: AggFunc::Mean }],
        sort: SortKey::Key,
        direction: SortDir::Ascending,
        limit: None,
    };
    let view = refs(&records);
    let table = aggregate(&view, &spec);
    assert_eq!(table.len(), 1);
    assert!((table[0].value() - 47.0 / 3.0).abs() < 1e-9);
}

#[test]
fn empty_input_yields_empty_result() {
    let records: Vec<Record> = Vec::new();
    let view = refs(&records);
    let table = aggregate(&view, &specs::sales_by_category());
    assert!(table.is_empty());
}

#[test]
fn measure_ties_keep_first_encounter_order() {
    let records = vec![
        Record { category: "Bravo".into(), sales: 50.0, ..base() },
        Record { category: "Alpha".into(), sales: 50.0, ..base() },
        Record { category: "Zulu".into(), sales: 50.0, ..base() },
    ];
    let view = refs(&records);
    let table = aggregate(&view, &specs::sales_by_category());
    let labels: Vec<&str> = table.iter().map(|r| r.label()).collect();
    assert_eq!(labels, ["Bravo", "Alpha", "Zulu"]);
}

#[test]
fn subcategory_key_carries_parent_category() {
    let records = vec![
        Record { sub_category: "Phones".into(), category: "Technology".into(), sales: 80.0, ..base() },
        Record { sub_category: "Chairs".into(), category: "Furniture".into(), sales: 120.0, ..base() },
    ];
    let view = refs(&records);
    let table = aggregate(&view, &specs::sales_by_subcategory());
    assert_eq!(table[0].key, vec!["Chairs".to_string(), "Furniture".to_string()]);
    assert_eq!(table[1].key, vec!["Phones".to_string(), "Technology".to_string()]);
}

#[test]
fn multi_measure_sorts_by_primary_and_carries_secondary() {
    // Corporate leads on sales but trails on profit; the profit column must
    // stay attached to its segment, not get re-sorted.
    let records = vec![
        Record { segment: "Consumer".into(), sales: 100.0, profit: 90.0, ..base() },
        Record { segment: "Corporate".into(), sales: 300.0, profit: -50.0, ..base() },
        Record { segment: "Home Office".into(), sales: 200.0, profit: 10.0, ..base() },
    ];
    let view = refs(&records);
    let table = aggregate(&view, &specs::performance_by_segment());
    let labels: Vec<&str> = table.iter().map(|r| r.label()).collect();
    assert_eq!(labels, ["Corporate", "Home Office", "Consumer"]);
    assert_eq!(table[0].values, vec![300.0, -50.0]);
    assert_eq!(table[2].values, vec![100.0, 90.0]);
}

#[test]
fn unmapped_state_skipped_geographically_kept_elsewhere() {
    let records = vec![
        Record { state: Some("CA".into()), sales: 10.0, ..base() },
        Record { state: None, sales: 99.0, ..base() },
    ];
    let view = refs(&records);

    let by_state = aggregate(&view, &specs::sales_by_state());
    assert_eq!(by_state.len(), 1);
    assert_eq!(by_state[0].label(), "CA");
    assert!((by_state[0].value() - 10.0).abs() < 1e-9);

    // The unmapped record still counts toward non-geographic tables.
    let by_category = aggregate(&view, &specs::sales_by_category());
    assert!((by_category[0].value() - 109.0).abs() < 1e-9);
}

#[test]
fn month_series_is_chronological() {
    let records = vec![
        Record { order_date: NaiveDate::from_ymd_opt(2017, 12, 3).unwrap(), sales: 1.0, ..base() },
        Record { order_date: NaiveDate::from_ymd_opt(2016, 2, 1).unwrap(), sales: 2.0, ..base() },
        Record { order_date: NaiveDate::from_ymd_opt(2017, 1, 20).unwrap(), sales: 3.0, ..base() },
        Record { order_date: NaiveDate::from_ymd_opt(2017, 1, 5).unwrap(), sales: 4.0, ..base() },
    ];
    let view = refs(&records);
    let table = aggregate(&view, &specs::sales_by_month());
    let keys: Vec<&str> = table.iter().map(|r| r.label()).collect();
    assert_eq!(keys, ["2016-02", "2017-01", "2017-12"]);
    assert!((table[1].value() - 7.0).abs() < 1e-9);
}

#[test]
fn state_table_sorts_ascending() {
    let records = vec![
        Record { state: Some("NY".into()), sales: 500.0, ..base() },
        Record { state: Some("CA".into()), sales: 100.0, ..base() },
        Record { state: Some("FL".into()), sales: 300.0, ..base() },
    ];
    let view = refs(&records);
    let table = aggregate(&view, &specs::sales_by_state());
    let labels: Vec<&str> = table.iter().map(|r| r.label()).collect();
    assert_eq!(labels, ["CA", "FL", "NY"]);
}
