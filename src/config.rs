//! Dashboard configuration.

use serde::{Deserialize, Serialize};

use crate::{Error, filter::DateRangePolicy, pagination::PageSize};

/// The number of product cards per page on the products page.
pub const DEFAULT_CATALOG_PAGE_SIZE: usize = 12;

/// The number of rows per page in the inventory data grid.
pub const DEFAULT_GRID_PAGE_SIZE: usize = 25;

const CATALOG_PAGE_SIZE_OPTIONS: [usize; 4] = [8, 12, 16, 24];
const GRID_PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// The config for the dashboard.
///
/// Every field has a default, so a config file only needs the fields it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    /// The page size the product cards start with.
    pub catalog_page_size: PageSize,
    /// The page sizes offered for the product cards.
    pub catalog_page_size_options: Vec<PageSize>,
    /// The page size the inventory grid starts with.
    pub grid_page_size: PageSize,
    /// The page sizes offered for the inventory grid.
    pub grid_page_size_options: Vec<PageSize>,
    /// How the start and end dates of the expense filter are applied.
    pub date_range_policy: DateRangePolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            catalog_page_size: PageSize::new_unchecked(DEFAULT_CATALOG_PAGE_SIZE),
            catalog_page_size_options: CATALOG_PAGE_SIZE_OPTIONS
                .map(PageSize::new_unchecked)
                .to_vec(),
            grid_page_size: PageSize::new_unchecked(DEFAULT_GRID_PAGE_SIZE),
            grid_page_size_options: GRID_PAGE_SIZE_OPTIONS
                .map(PageSize::new_unchecked)
                .to_vec(),
            date_range_policy: DateRangePolicy::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse a config from JSON.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidConfig] if `json` is not a
    /// valid config, including when a page size is zero.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|error| Error::InvalidConfig(error.to_string()))
    }
}
