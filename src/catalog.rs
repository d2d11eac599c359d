//! Statistics over the product catalog.

use serde::Serialize;

use crate::records::ProductRecord;

/// Products with fewer units in stock than this are flagged for replenishment.
pub const LOW_STOCK_THRESHOLD: u64 = 20;

/// Whether a product needs restocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    /// Fewer than [LOW_STOCK_THRESHOLD] units remain.
    Low,
    /// At least [LOW_STOCK_THRESHOLD] units remain.
    InStock,
}

impl StockStatus {
    /// The status of a product with `stock_quantity` units.
    pub fn of(stock_quantity: u64) -> Self {
        if stock_quantity < LOW_STOCK_THRESHOLD {
            Self::Low
        } else {
            Self::InStock
        }
    }
}

/// Aggregate figures for the inventory and products pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    /// The number of products.
    pub total_count: usize,
    /// The value of all stock, i.e. the sum of price times quantity.
    pub total_inventory_value: f64,
    /// The number of products with [StockStatus::Low].
    pub low_stock_count: usize,
    /// The mean rating, where unrated products count as zero.
    pub average_rating: f64,
    /// The number of units in stock across all products.
    pub total_stock: u64,
}

/// Computes the catalog statistics.
///
/// Unrated products stay in the denominator of the average rating with a
/// rating of zero. An empty catalog gives all zeros.
pub fn stats(products: &[ProductRecord]) -> CatalogStats {
    if products.is_empty() {
        return CatalogStats::default();
    }

    let total_count = products.len();
    let total_inventory_value = products
        .iter()
        .map(|product| product.price * product.stock_quantity as f64)
        .sum();
    let low_stock_count = products
        .iter()
        .filter(|product| StockStatus::of(product.stock_quantity) == StockStatus::Low)
        .count();
    let rating_total: f64 = products
        .iter()
        .map(|product| product.rating.unwrap_or(0.0))
        .sum();
    let total_stock = products
        .iter()
        .map(|product| product.stock_quantity)
        .fold(0u64, u64::saturating_add);

    CatalogStats {
        total_count,
        total_inventory_value,
        low_stock_count,
        average_rating: rating_total / total_count as f64,
        total_stock,
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        catalog::{CatalogStats, LOW_STOCK_THRESHOLD, StockStatus, stats},
        records::ProductRecord,
    };

    #[test]
    fn computes_catalog_stats() {
        let products = vec![
            ProductRecord::new("p1", "Widget", 2.5, 10).rating(4.0),
            ProductRecord::new("p2", "Gadget", 10.0, 20).rating(3.0),
            ProductRecord::new("p3", "Sprocket", 1.0, 100),
        ];

        let want = CatalogStats {
            total_count: 3,
            total_inventory_value: 325.0,
            low_stock_count: 1,
            average_rating: 7.0 / 3.0,
            total_stock: 130,
        };

        let got = stats(&products);

        assert_eq!(want, got);
    }

    #[test]
    fn empty_catalog_is_all_zero() {
        let want = CatalogStats {
            total_count: 0,
            total_inventory_value: 0.0,
            low_stock_count: 0,
            average_rating: 0.0,
            total_stock: 0,
        };

        let got = stats(&[]);

        assert_eq!(want, got);
    }

    #[test]
    fn low_stock_threshold_is_exclusive() {
        assert_eq!(StockStatus::of(0), StockStatus::Low);
        assert_eq!(StockStatus::of(LOW_STOCK_THRESHOLD - 1), StockStatus::Low);
        assert_eq!(StockStatus::of(LOW_STOCK_THRESHOLD), StockStatus::InStock);
    }

    #[test]
    fn unrated_products_count_towards_average_rating() {
        let products = vec![
            ProductRecord::new("p1", "Rated", 1.0, 50).rating(5.0),
            ProductRecord::new("p2", "Unrated", 1.0, 50),
        ];

        assert_eq!(stats(&products).average_rating, 2.5);
    }

    #[test]
    fn computing_stats_twice_gives_identical_results() {
        let products = vec![
            ProductRecord::new("p1", "Widget", 0.1, 3).rating(4.5),
            ProductRecord::new("p2", "Gadget", 19.99, 42),
            ProductRecord::new("p3", "Sprocket", 7.25, 19).rating(2.0),
        ];

        let want = stats(&products);
        let got = stats(&products);

        assert_eq!(want, got);
    }
}
