//! Dashboard module
//!
//! Derives the expenses, products and inventory pages from a snapshot of
//! records and the current filter and pagination state.

mod store;
mod view;

pub use store::{DashboardStore, DashboardView};
pub use view::{
    CatalogView, CategoryRow, DashboardSnapshot, DashboardState, DashboardViewModel, ExpensesView,
    MetricCard, ProductPage, ProductRow, build_view_model,
};
