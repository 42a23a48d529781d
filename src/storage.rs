use crate::assemble::DashboardBundle;
use crate::models::Record;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save records (typically a filtered view) as CSV with header.
pub fn save_csv<P: AsRef<Path>>(records: &[&Record], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize((
        "order_date",
        "region",
        "state",
        "city",
        "category",
        "sub_category",
        "segment",
        "ship_mode",
        "product_name",
        "customer_name",
        "sales",
        "profit",
        "discount",
        "quantity",
    ))?;
    for r in records {
        wtr.serialize((
            r.order_date.format("%Y-%m-%d").to_string(),
            &r.region,
            &r.state,
            &r.city,
            &r.category,
            &r.sub_category,
            &r.segment,
            &r.ship_mode,
            &r.product_name,
            &r.customer_name,
            r.sales,
            r.profit,
            r.discount,
            r.quantity,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a full recompute bundle as pretty JSON.
pub fn save_json<P: AsRef<Path>>(bundle: &DashboardBundle, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(bundle)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::{DataContext, RecomputeInputs, recompute};
    use crate::lookup::GeoTables;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn rec() -> Record {
        Record {
            order_date: NaiveDate::from_ymd_opt(2017, 3, 4).unwrap(),
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
            discount: 0.1,
            quantity: 2,
        }
    }

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");

        let records = vec![rec()];
        let refs: Vec<&Record> = records.iter().collect();
        save_csv(&refs, &csvp).unwrap();

        let ctx = DataContext::new(records, GeoTables::builtin());
        let bundle = recompute(&ctx, &RecomputeInputs::default());
        save_json(&bundle, &jsonp).unwrap();

        assert!(csvp.exists());
        assert!(jsonp.exists());
    }
}
