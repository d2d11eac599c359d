use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use time::Date;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use shelf_dashboard::{
    CategoryFilter, DashboardConfig, DashboardSnapshot, DashboardStore, DashboardView, Error,
    FilterState, PageSize, parse_filter_date,
};

/// Prints the dashboard view-models for a snapshot of records as JSON.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to a JSON snapshot of dashboard records.
    #[arg(long)]
    snapshot: PathBuf,

    /// File path to a JSON dashboard config. Defaults are used if omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// The expense category to show, or "All".
    #[arg(long, default_value = "All")]
    category: String,

    /// The first expense date to include, as YYYY-MM-DD.
    #[arg(long, value_parser = parse_filter_date)]
    start_date: Option<Date>,

    /// The last expense date to include, as YYYY-MM-DD.
    #[arg(long, value_parser = parse_filter_date)]
    end_date: Option<Date>,

    /// Text to search product names and IDs for.
    #[arg(long, default_value = "")]
    search: String,

    /// The page of both product lists to show.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    page: i64,

    /// The number of product cards per page.
    #[arg(long, value_parser = parse_page_size)]
    page_size: Option<PageSize>,

    /// Pretty print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(stderr_log).init();
}

fn run(args: Args) -> Result<(), Error> {
    let config = match &args.config {
        Some(path) => DashboardConfig::from_json(&read_file(path)?)?,
        None => DashboardConfig::default(),
    };

    let mut store = DashboardStore::new(config);
    let ticket = store.begin_fetch();

    match read_file(&args.snapshot).and_then(|json| DashboardSnapshot::from_json(&json)) {
        Ok(snapshot) => {
            store.receive(ticket, snapshot);
        }
        Err(error) => {
            tracing::error!("Could not load the snapshot: {error}");
            store.receive_error(ticket);
        }
    }

    store.set_filter(FilterState {
        category: CategoryFilter::from_selection(&args.category),
        start_date: args.start_date,
        end_date: args.end_date,
        search_term: args.search,
    });

    if let Some(page_size) = args.page_size {
        store.set_catalog_page_size(page_size);
    }
    store.set_catalog_page(args.page);
    store.set_inventory_page(args.page);

    let json = match store.view() {
        DashboardView::Loading => serde_json::json!({ "status": "loading" }),
        DashboardView::Ready(view) => {
            serde_json::json!({ "status": "ready", "view": view.as_ref() })
        }
    };

    if args.pretty {
        println!("{json:#}");
    } else {
        println!("{json}");
    }

    Ok(())
}

fn read_file(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path)
        .map_err(|error| Error::ReadFile(path.display().to_string(), error.to_string()))
}

fn parse_page_size(text: &str) -> Result<PageSize, Error> {
    let size = text.parse::<usize>().map_err(|_| Error::InvalidPageSize)?;
    PageSize::new(size)
}
