//! Expense aggregation by category.
//!
//! Groups filtered expenses by category, sums their amounts, and annotates each
//! category with its share of the total and a stable display color.

use std::collections::HashMap;

use serde::Serialize;

use crate::records::ExpenseRecord;

/// The total spent in one expense category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedCategory {
    /// The category name.
    pub name: String,
    /// The sum of the amounts of the category's expenses.
    pub amount: f64,
    /// A `#rrggbb` color derived from the category name.
    pub color: String,
    /// The category's share of the total, from 0 to 100.
    pub percentage: f64,
}

/// Groups expenses by category and sums their amounts.
///
/// # Arguments
/// * `records` - The expenses that passed the current filter
///
/// # Returns
/// One entry per category, sorted by amount with the largest first. Categories
/// with equal amounts keep the order in which they first appear. Every
/// percentage is zero when the total is zero.
pub fn aggregate<'a, I>(records: I) -> Vec<AggregatedCategory>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, f64)> = Vec::new();

    for record in records {
        let index = *index_by_name
            .entry(record.category.as_str())
            .or_insert_with(|| {
                totals.push((record.category.as_str(), 0.0));
                totals.len() - 1
            });

        totals[index].1 += record.amount();
    }

    let total: f64 = totals.iter().map(|(_, amount)| amount).sum();

    let mut categories: Vec<AggregatedCategory> = totals
        .into_iter()
        .map(|(name, amount)| AggregatedCategory {
            name: name.to_owned(),
            amount,
            color: category_color(name),
            percentage: percentage_of(amount, total),
        })
        .collect();

    categories.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    categories
}

/// A stable `#rrggbb` color for a category.
///
/// The color is taken from the MD5 digest of the name, so the same category
/// gets the same color on every render regardless of which other categories
/// are present.
pub fn category_color(name: &str) -> String {
    let digest = md5::compute(name.as_bytes());
    format!("#{:02x}{:02x}{:02x}", digest[0], digest[1], digest[2])
}

fn percentage_of(amount: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        amount / total * 100.0
    }
}

/// The expense breakdown shown on the expenses page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseBreakdown {
    /// Per-category totals, largest first.
    pub categories: Vec<AggregatedCategory>,
    /// The sum over all categories.
    pub total: f64,
    /// The number of categories.
    pub category_count: usize,
    /// The mean amount per category, or zero when there are no categories.
    pub average_per_category: f64,
}

impl ExpenseBreakdown {
    /// Aggregate `records` and summarize the result.
    pub fn new<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        let categories = aggregate(records);
        let category_count = categories.len();

        // Summing nothing gives -0.0, which would leak into the JSON output.
        let (total, average_per_category) = if category_count == 0 {
            (0.0, 0.0)
        } else {
            let total: f64 = categories.iter().map(|category| category.amount).sum();
            (total, total / category_count as f64)
        };

        Self {
            categories,
            total,
            category_count,
            average_per_category,
        }
    }
}
