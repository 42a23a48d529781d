use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::tempdir;

const FIXTURE: &str = "\
Row ID,Order Date,Ship Mode,Customer Name,Segment,Country,City,State,Region,Category,Sub-Category,Product Name,Sales,Quantity,Discount,Profit
1,11/8/2017,Second Class,Ann Smith,Consumer,United States,Los Angeles,California,West,Technology,Phones,Phone X,261.96,2,0.1,41.91
2,6/12/2016,Standard Class,Bob Jones,Corporate,United States,Buffalo,New York,East,Furniture,Chairs,Chair Y,731.94,3,0.0,219.58
3,3/4/2017,First Class,Cy Doe,Home Office,United States,Miami,Florida,South,Office Supplies,Paper,Paper Z,15.52,4,0.2,5.24
";

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("salesview").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("salesview"));
}

#[test]
fn report_prints_tables_and_kpis() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("orders.csv");
    std::fs::File::create(&data)
        .unwrap()
        .write_all(FIXTURE.as_bytes())
        .unwrap();

    let mut cmd = Command::cargo_bin("salesview").unwrap();
    cmd.args([
        "report",
        "--data",
        data.to_str().unwrap(),
        "--region",
        "West",
        "--kpis",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Sales by Category"))
        .stdout(predicate::str::contains("Technology"))
        .stdout(predicate::str::contains("Total sales:"))
        .stdout(predicate::str::contains("$261.96"));
}

#[test]
fn report_exports_bundle_json() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("orders.csv");
    std::fs::File::create(&data)
        .unwrap()
        .write_all(FIXTURE.as_bytes())
        .unwrap();
    let out = dir.path().join("bundle.json");

    let mut cmd = Command::cargo_bin("salesview").unwrap();
    cmd.args([
        "report",
        "--data",
        data.to_str().unwrap(),
        "--state",
        "CA",
        "--out",
        out.to_str().unwrap(),
    ]);
    cmd.assert().success();

    let text = std::fs::read_to_string(&out).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["page"], "Home");
    assert_eq!(json["overlay"]["state"], "CA");
}

#[test]
fn invalid_year_is_rejected() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("orders.csv");
    std::fs::File::create(&data)
        .unwrap()
        .write_all(FIXTURE.as_bytes())
        .unwrap();

    let mut cmd = Command::cargo_bin("salesview").unwrap();
    cmd.args([
        "report",
        "--data",
        data.to_str().unwrap(),
        "--year",
        "twenty-seventeen",
    ]);
    cmd.assert().failure();
}
