use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use salesview_rs::aggregate::AggregationResult;
use salesview_rs::assemble::{DataContext, RecomputeInputs, recompute};
use salesview_rs::lookup::GeoTables;
use salesview_rs::models::{FilterCriteria, RegionFilter, YearFilter};
use salesview_rs::view::NavCounters;
use salesview_rs::{dataset, filter, storage};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "salesview",
    version,
    about = "Filter, aggregate & summarize Superstore sales data"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a dataset, run one dashboard recompute, and print the results.
    Report(ReportArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Path to the Superstore CSV export.
    #[arg(short, long)]
    data: PathBuf,
    /// Region filter for the home page (e.g., West). "All" or omitted = no filter.
    #[arg(long)]
    region: Option<String>,
    /// Year filter for the home page (e.g., 2017). "All" or omitted = no filter.
    #[arg(long)]
    year: Option<String>,
    /// Region filter for the detail page.
    #[arg(long)]
    detail_region: Option<String>,
    /// Year filter for the detail page.
    #[arg(long)]
    detail_year: Option<String>,
    /// Times the "show detail" navigation was clicked.
    #[arg(long, default_value_t = 0)]
    detail_clicks: u64,
    /// Times the "show home" navigation was clicked.
    #[arg(long, default_value_t = 0)]
    home_clicks: u64,
    /// Drill into a state by two-letter code (e.g., CA).
    #[arg(long)]
    state: Option<String>,
    /// Extra coordinate tables as JSON ({"states": {...}, "cities": {...}}).
    #[arg(long)]
    geo: Option<PathBuf>,
    /// Save results to file (bundle as JSON, filtered records as CSV).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print the KPI block.
    #[arg(long, default_value_t = false)]
    kpis: bool,
}

fn parse_region(s: Option<&str>) -> RegionFilter {
    match s {
        None => RegionFilter::All,
        Some(v) if v.eq_ignore_ascii_case("all") => RegionFilter::All,
        Some(v) => RegionFilter::Region(v.to_string()),
    }
}

fn parse_year(s: Option<&str>) -> Result<YearFilter> {
    match s {
        None => Ok(YearFilter::All),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(YearFilter::All),
        Some(v) => v
            .parse::<i32>()
            .map(YearFilter::Year)
            .map_err(|_| anyhow::anyhow!("invalid --year, expected YYYY or All")),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Report(args) => cmd_report(args),
    }
}

fn print_table(title: &str, rows: &AggregationResult) {
    println!("\n{title}");
    for row in rows {
        let values = row
            .values
            .iter()
            .map(|v| format!("{v:.2}"))
            .collect::<Vec<_>>()
            .join("  ");
        println!("  {:<32} {values}", row.key.join(" / "));
    }
    if rows.is_empty() {
        println!("  (no rows)");
    }
}

fn cmd_report(args: ReportArgs) -> Result<()> {
    let records = dataset::load_csv(&args.data)?;

    let mut geo = GeoTables::builtin();
    if let Some(path) = args.geo.as_ref() {
        geo.merge_json(path)?;
    }
    let ctx = DataContext::new(records, geo);

    let mut inputs = RecomputeInputs::default();
    inputs.filters.home = FilterCriteria::new(
        parse_region(args.region.as_deref()),
        parse_year(args.year.as_deref())?,
    );
    inputs.filters.detail = FilterCriteria::new(
        parse_region(args.detail_region.as_deref()),
        parse_year(args.detail_year.as_deref())?,
    );
    inputs.nav = NavCounters::new(args.detail_clicks, args.home_clicks);
    if let Some(code) = args.state.as_ref() {
        inputs.drill.select(code.clone());
    }

    let bundle = recompute(&ctx, &inputs);

    println!("Active page: {:?}", bundle.page);
    print_table("Sales by Category", &bundle.sales_by_category);
    print_table("Sales by Sub-Category", &bundle.sales_by_subcategory);
    print_table("Profit by Sub-Category", &bundle.profit_by_subcategory);
    print_table("Average Discount by Category", &bundle.discount_by_category);
    print_table("Top 10 Products by Quantity", &bundle.quantity_by_product);
    print_table("Sales & Profit by Segment", &bundle.performance_by_segment);
    print_table("Sales & Profit by Ship Mode", &bundle.performance_by_shipmode);
    print_table("Top 10 Cities by Sales", &bundle.sales_by_city);
    print_table("Monthly Sales", &bundle.sales_by_month);
    print_table("Top 10 Customers by Profit", &bundle.profit_by_customer);
    print_table("Sales by State", &bundle.sales_by_state);

    if let Some(overlay) = bundle.overlay.as_ref() {
        println!("\nCity drill-down for {}", overlay.state);
        for m in &overlay.cities {
            println!("  {:<24} ({:.4}, {:.4})  {:.2}", m.city, m.lat, m.lon, m.sales);
        }
        if let Some(f) = overlay.focus {
            println!("  center ({:.4}, {:.4}) zoom {}", f.lat, f.lon, f.zoom);
        }
    }

    if args.kpis {
        println!("\nTotal sales:      {}", bundle.kpi_text.total_sales);
        println!("Total profit:     {}", bundle.kpi_text.total_profit);
        println!("Average discount: {}", bundle.kpi_text.avg_discount);
    }

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("json"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => {
                let criteria = inputs.filters.for_page(bundle.page);
                let rows = filter::apply(&ctx.records, criteria);
                storage::save_csv(&rows, path)?;
                eprintln!("Saved {} filtered rows to {}", rows.len(), path.display());
            }
            "json" => {
                storage::save_json(&bundle, path)?;
                eprintln!("Saved bundle to {}", path.display());
            }
            other => anyhow::bail!("unsupported format: {}", other),
        }
    }

    Ok(())
}
