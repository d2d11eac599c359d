//! Selecting the subset of records that matches the current filter state.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

use crate::{
    Error,
    records::{ExpenseRecord, ProductRecord},
};

/// The category selection that matches every category.
pub const ALL_CATEGORIES: &str = "All";

/// The expense category selected in the filter bar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// Every category passes.
    #[default]
    All,
    /// Only the named category passes.
    Named(String),
}

impl CategoryFilter {
    /// Interpret a selection from the category dropdown, where "All" selects
    /// every category.
    pub fn from_selection(selection: &str) -> Self {
        if selection == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Named(selection.to_owned())
        }
    }

    /// Whether `category` passes this filter.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "{ALL_CATEGORIES}"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

/// How the start and end dates of the filter are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateRangePolicy {
    /// The date range only applies once both bounds are set. With either bound
    /// missing, no date filtering happens.
    #[default]
    RequireBothBounds,
    /// Each bound that is set applies on its own.
    EachBound,
}

impl DateRangePolicy {
    /// Whether a record dated `date` passes the range `start..=end`.
    ///
    /// A record without a usable date fails any active range.
    pub fn matches(self, date: Option<Date>, start: Option<Date>, end: Option<Date>) -> bool {
        match self {
            Self::RequireBothBounds => match (start, end) {
                (Some(start), Some(end)) => date.is_some_and(|date| start <= date && date <= end),
                _ => true,
            },
            Self::EachBound => {
                if start.is_none() && end.is_none() {
                    return true;
                }

                let Some(date) = date else {
                    return false;
                };

                start.is_none_or(|start| start <= date) && end.is_none_or(|end| date <= end)
            }
        }
    }
}

/// The filter state owned by the presentation layer.
///
/// Updates replace the whole value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterState {
    /// The selected expense category.
    pub category: CategoryFilter,
    /// The first date to include.
    pub start_date: Option<Date>,
    /// The last date to include.
    pub end_date: Option<Date>,
    /// Free text used to search the product catalog.
    pub search_term: String,
}

/// Selects the expenses that match the category and date range of `state`.
///
/// The input order is preserved and `records` is left untouched.
pub fn filter_expenses<'a>(
    records: &'a [ExpenseRecord],
    state: &FilterState,
    policy: DateRangePolicy,
) -> Vec<&'a ExpenseRecord> {
    records
        .iter()
        .filter(|record| state.category.matches(&record.category))
        .filter(|record| {
            policy.matches(record.normalized_date(), state.start_date, state.end_date)
        })
        .collect()
}

/// The choices for the category dropdown: "All" followed by each distinct
/// category in the order it first appears.
pub fn category_options(records: &[ExpenseRecord]) -> Vec<String> {
    let mut options = vec![ALL_CATEGORIES.to_owned()];

    for record in records {
        if !options[1..].contains(&record.category) {
            options.push(record.category.clone());
        }
    }

    options
}

/// Selects the products whose name contains `search_term` (ignoring case) or
/// whose ID contains it.
///
/// A blank search term matches every product.
pub fn filter_products<'a>(
    products: &'a [ProductRecord],
    search_term: &str,
) -> Vec<&'a ProductRecord> {
    let search_term = search_term.trim();

    if search_term.is_empty() {
        return products.iter().collect();
    }

    let lowercase_term = search_term.to_lowercase();

    products
        .iter()
        .filter(|product| {
            product.name.to_lowercase().contains(&lowercase_term)
                || product.product_id.contains(search_term)
        })
        .collect()
}

/// Parse a `YYYY-MM-DD` date entered as a filter bound.
///
/// # Errors
///
/// This function will return an [Error::InvalidDate] if `text` is not a valid date.
pub fn parse_filter_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| Error::InvalidDate(text.to_owned()))
}
