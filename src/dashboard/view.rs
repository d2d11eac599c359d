//! View-models for the dashboard pages.
//!
//! [build_view_model] is a pure function of the snapshot, the dashboard state
//! and the config. Rendering code consumes its output and never touches the
//! raw records.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    aggregation::{AggregatedCategory, ExpenseBreakdown},
    catalog::{CatalogStats, StockStatus, stats},
    config::DashboardConfig,
    filter::{FilterState, category_options, filter_expenses, filter_products},
    format::{
        format_compact_currency, format_currency, format_precise_change, format_share,
        format_signed_percentage,
    },
    pagination::{
        PageSize, PageState, PageWindow, PaginationIndicator, create_pagination_indicators,
    },
    records::{ExpenseRecord, ProductRecord, TimeSeriesPoint},
    summary::{MetricSummary, summarize},
};

/// All records the dashboard is built from, as delivered by the data layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSnapshot {
    /// Individual expenses.
    pub expenses: Vec<ExpenseRecord>,
    /// The product catalog.
    pub products: Vec<ProductRecord>,
    /// Sales totals in ascending date order.
    pub sales: Vec<TimeSeriesPoint>,
    /// Purchase totals in ascending date order.
    pub purchases: Vec<TimeSeriesPoint>,
}

impl DashboardSnapshot {
    /// Parse a snapshot from JSON. Missing arrays are treated as empty.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidSnapshot] if `json` does
    /// not describe a snapshot.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|error| Error::InvalidSnapshot(error.to_string()))
    }
}

/// The filter and pagination state the dashboard is derived from.
///
/// Owned by a single writer, see [crate::DashboardStore].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DashboardState {
    /// The expense filter and product search.
    pub filter: FilterState,
    /// The page of product cards.
    pub catalog_page: PageState,
    /// The page of the inventory grid.
    pub inventory_page: PageState,
}

impl DashboardState {
    /// Start with no filter and on the first page of each list.
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            filter: FilterState::default(),
            catalog_page: PageState::new(config.catalog_page_size),
            inventory_page: PageState::new(config.grid_page_size),
        }
    }
}

/// Everything the dashboard pages display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViewModel {
    /// Whether the data layer reported an error. The rest of the view is then
    /// built from an empty snapshot.
    pub failed: bool,
    /// The expense breakdown for the current filter.
    pub expenses: ExpensesView,
    /// The sales summary card.
    pub sales: MetricCard,
    /// The purchase summary card.
    pub purchases: MetricCard,
    /// Statistics over the whole catalog.
    pub catalog: CatalogView,
    /// The current page of product cards.
    pub products: ProductPage,
    /// The current page of the inventory grid.
    pub inventory: ProductPage,
}

/// The expenses page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensesView {
    /// Per-category totals, largest first.
    pub categories: Vec<CategoryRow>,
    /// The total of the filtered expenses.
    pub total: f64,
    /// The total formatted as currency.
    pub total_label: String,
    /// The number of categories in the breakdown.
    pub category_count: usize,
    /// The mean amount per category.
    pub average_per_category: f64,
    /// The mean amount per category formatted as currency.
    pub average_per_category_label: String,
    /// The choices for the category dropdown.
    pub category_options: Vec<String>,
    /// The current dropdown selection.
    pub selected_category: String,
}

/// One category of the expense breakdown with its display strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRow {
    /// The category totals.
    #[serde(flatten)]
    pub category: AggregatedCategory,
    /// The amount formatted as currency.
    pub amount_label: String,
    /// The percentage formatted to one decimal place.
    pub share_label: String,
}

/// A summary card for a time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCard {
    /// The summary figures.
    #[serde(flatten)]
    pub summary: MetricSummary,
    /// The headline amount, e.g. "$2.35m".
    pub headline_label: String,
    /// The change shown next to the headline, e.g. "+12%".
    pub change_label: Option<String>,
}

impl MetricCard {
    /// The sales card headlines the total and the average change to two
    /// decimal places.
    fn sales(series: &[TimeSeriesPoint]) -> Self {
        let summary = summarize(series);

        Self {
            headline_label: format_compact_currency(summary.total),
            change_label: Some(format_precise_change(summary.average_change_percentage)),
            summary,
        }
    }

    /// The purchase card headlines the latest point and its change.
    fn purchases(series: &[TimeSeriesPoint]) -> Self {
        let summary = summarize(series);

        Self {
            headline_label: format_compact_currency(summary.latest_value.unwrap_or(0.0)),
            change_label: summary
                .latest_change_percentage
                .map(format_signed_percentage),
            summary,
        }
    }
}

/// Catalog statistics with their display strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    /// The statistics.
    #[serde(flatten)]
    pub stats: CatalogStats,
    /// The inventory value formatted as currency.
    pub total_inventory_value_label: String,
    /// The average rating to one decimal place.
    pub average_rating_label: String,
}

/// A page of products matching the search term.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    /// The products on this page.
    pub rows: Vec<ProductRow>,
    /// Where this page sits in the list.
    pub window: PageWindow,
    /// The page buttons.
    pub indicators: Vec<PaginationIndicator>,
    /// The number of products matching the search term.
    pub matching_count: usize,
    /// The current page size.
    pub page_size: PageSize,
    /// The page sizes the user can choose from.
    pub page_size_options: Vec<PageSize>,
}

impl ProductPage {
    fn new(products: &[&ProductRecord], page: PageState, page_size_options: &[PageSize]) -> Self {
        let window = page.window(products.len());

        Self {
            rows: window
                .slice(products)
                .iter()
                .map(|product| ProductRow::new(product))
                .collect(),
            indicators: create_pagination_indicators(window.page, window.total_pages),
            window,
            matching_count: products.len(),
            page_size: page.page_size(),
            page_size_options: page_size_options.to_vec(),
        }
    }
}

/// A product with its stock status and display strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    /// The product.
    #[serde(flatten)]
    pub product: ProductRecord,
    /// Whether the product is low on stock.
    pub stock_status: StockStatus,
    /// The price formatted as currency.
    pub price_label: String,
}

impl ProductRow {
    fn new(product: &ProductRecord) -> Self {
        Self {
            product: product.clone(),
            stock_status: StockStatus::of(product.stock_quantity),
            price_label: format_currency(product.price),
        }
    }
}

/// Derives every dashboard view-model from `snapshot` and `state`.
///
/// The expense breakdown follows the category and date filter. Both product
/// lists follow the search term, while the catalog statistics always cover the
/// whole catalog.
pub fn build_view_model(
    snapshot: &DashboardSnapshot,
    state: &DashboardState,
    config: &DashboardConfig,
) -> DashboardViewModel {
    let filtered_expenses =
        filter_expenses(&snapshot.expenses, &state.filter, config.date_range_policy);
    let matching_products = filter_products(&snapshot.products, &state.filter.search_term);

    DashboardViewModel {
        failed: false,
        expenses: expenses_view(
            ExpenseBreakdown::new(filtered_expenses),
            category_options(&snapshot.expenses),
            &state.filter,
        ),
        sales: MetricCard::sales(&snapshot.sales),
        purchases: MetricCard::purchases(&snapshot.purchases),
        catalog: catalog_view(stats(&snapshot.products)),
        products: ProductPage::new(
            &matching_products,
            state.catalog_page,
            &config.catalog_page_size_options,
        ),
        inventory: ProductPage::new(
            &matching_products,
            state.inventory_page,
            &config.grid_page_size_options,
        ),
    }
}

fn expenses_view(
    breakdown: ExpenseBreakdown,
    category_options: Vec<String>,
    filter: &FilterState,
) -> ExpensesView {
    let categories = breakdown
        .categories
        .into_iter()
        .map(|category| CategoryRow {
            amount_label: format_currency(category.amount),
            share_label: format_share(category.percentage),
            category,
        })
        .collect();

    ExpensesView {
        categories,
        total: breakdown.total,
        total_label: format_currency(breakdown.total),
        category_count: breakdown.category_count,
        average_per_category: breakdown.average_per_category,
        average_per_category_label: format_currency(breakdown.average_per_category),
        category_options,
        selected_category: filter.category.to_string(),
    }
}

fn catalog_view(stats: CatalogStats) -> CatalogView {
    CatalogView {
        total_inventory_value_label: format_currency(stats.total_inventory_value),
        average_rating_label: format!("{:.1}", stats.average_rating),
        stats,
    }
}
