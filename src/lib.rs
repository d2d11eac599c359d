//! Shelf Dashboard derives the view-models shown on an inventory and expense
//! dashboard.
//!
//! The crate takes a snapshot of raw records (expenses, sales and purchase
//! time series, the product catalog) and the current filter and pagination
//! state, and produces display-ready structures: per-category expense
//! breakdowns, time-series summaries, catalog statistics and paged product
//! lists. Every derivation is a pure function of its inputs.

#![warn(missing_docs)]

pub mod aggregation;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod fetch;
pub mod filter;
pub mod format;
pub mod pagination;
pub mod records;
pub mod summary;

pub use aggregation::{AggregatedCategory, ExpenseBreakdown, aggregate, category_color};
pub use catalog::{CatalogStats, LOW_STOCK_THRESHOLD, StockStatus, stats};
pub use config::DashboardConfig;
pub use dashboard::{
    DashboardSnapshot, DashboardStore, DashboardView, DashboardViewModel, build_view_model,
};
pub use fetch::{FetchState, LatestWins, RequestTicket};
pub use filter::{
    CategoryFilter, DateRangePolicy, FilterState, category_options, filter_expenses,
    filter_products, parse_filter_date,
};
pub use pagination::{PageSize, PageState, PageWindow, PaginationIndicator, paginate};
pub use records::{ExpenseRecord, ProductRecord, TimeSeriesPoint};
pub use summary::{MetricSummary, summarize};

/// The errors that may occur at the edges of the pipeline.
///
/// The derivation functions themselves never fail. These errors come from
/// validating state updates and parsing inputs supplied by the caller.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A page size of zero was requested.
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    /// A filter date could not be parsed.
    ///
    /// Filter dates must be calendar dates in the form `YYYY-MM-DD`.
    #[error("could not parse \"{0}\" as a YYYY-MM-DD date")]
    InvalidDate(String),

    /// The JSON snapshot of dashboard records could not be parsed.
    #[error("could not parse the dashboard snapshot: {0}")]
    InvalidSnapshot(String),

    /// The JSON dashboard configuration could not be parsed or was invalid.
    #[error("invalid dashboard config: {0}")]
    InvalidConfig(String),

    /// A file could not be read.
    ///
    /// Callers should pass in the path and the original error as a string.
    #[error("could not read \"{0}\": {1}")]
    ReadFile(String, String),
}
