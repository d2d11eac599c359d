//! Raw records as delivered by the data layer.
//!
//! Records are treated as an immutable snapshot. Numeric fields that may arrive
//! as text are parsed leniently: anything that is not a finite number counts as
//! zero, so a single malformed row cannot poison a whole aggregation.

use serde::{Deserialize, Deserializer, Serialize};
use time::{
    Date, OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339,
    macros::format_description,
};

/// A single expense, e.g. 'Salaries, 2024-01-02, 1500.00'.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// The expense category, e.g. "Office".
    pub category: String,
    /// When the expense occurred, as an ISO-8601 date or timestamp.
    pub date: String,
    /// The amount as decimal text.
    #[serde(deserialize_with = "deserialize_amount_text")]
    pub amount: String,
}

impl ExpenseRecord {
    /// Create an expense record.
    pub fn new(category: &str, date: &str, amount: &str) -> Self {
        Self {
            category: category.to_owned(),
            date: date.to_owned(),
            amount: amount.to_owned(),
        }
    }

    /// The parsed amount, or zero if the amount text is malformed.
    pub fn amount(&self) -> f64 {
        parse_amount(&self.amount)
    }

    /// The calendar date of the expense, if the date text can be understood.
    pub fn normalized_date(&self) -> Option<Date> {
        normalize_date(&self.date)
    }
}

/// One point of a date-ordered series such as daily sales or purchases.
///
/// Series are expected in ascending date order. The pipeline trusts that order
/// rather than enforcing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// The ISO-8601 date of the point.
    pub date: String,
    /// The value at this point, e.g. the total sales for the day.
    #[serde(
        default,
        alias = "totalValue",
        alias = "totalPurchased",
        deserialize_with = "deserialize_lenient_number"
    )]
    pub value: f64,
    /// The change relative to the previous point, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_percentage: Option<f64>,
}

impl TimeSeriesPoint {
    /// Create a point without a change percentage.
    pub fn new(date: &str, value: f64) -> Self {
        Self {
            date: date.to_owned(),
            value,
            change_percentage: None,
        }
    }

    /// Set the change percentage of the point.
    pub fn change_percentage(mut self, change_percentage: f64) -> Self {
        self.change_percentage = Some(change_percentage);
        self
    }
}

/// A row of the product catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// The unique product identifier.
    pub product_id: String,
    /// The display name of the product.
    pub name: String,
    /// The unit price.
    #[serde(default, deserialize_with = "deserialize_lenient_number")]
    pub price: f64,
    /// The number of units in stock.
    #[serde(default)]
    pub stock_quantity: u64,
    /// The customer rating between 0 and 5, if the product has been rated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl ProductRecord {
    /// Create an unrated product.
    pub fn new(product_id: &str, name: &str, price: f64, stock_quantity: u64) -> Self {
        Self {
            product_id: product_id.to_owned(),
            name: name.to_owned(),
            price,
            stock_quantity,
            rating: None,
        }
    }

    /// Set the rating of the product.
    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }
}

/// Parse decimal text, treating anything that is not a finite number as zero.
pub fn parse_amount(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => amount,
        _ => {
            tracing::warn!("Treating malformed amount {text:?} as zero");
            0.0
        }
    }
}

/// Normalize an ISO-8601 date or timestamp to a calendar date.
///
/// RFC 3339 timestamps are converted to UTC before the date is taken. Anything
/// else must start with a `YYYY-MM-DD` date. Returns `None` for text that
/// matches neither form.
pub fn normalize_date(text: &str) -> Option<Date> {
    let text = text.trim();

    if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(date_time.to_offset(UtcOffset::UTC).date());
    }

    let prefix = text.get(..10)?;
    Date::parse(prefix, format_description!("[year]-[month]-[day]")).ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn deserialize_lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;

    Ok(match value {
        Some(NumberOrText::Number(number)) => number,
        Some(NumberOrText::Text(text)) => parse_amount(&text),
        None => 0.0,
    })
}

fn deserialize_amount_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;

    Ok(match value {
        Some(NumberOrText::Number(number)) => number.to_string(),
        Some(NumberOrText::Text(text)) => text,
        None => String::new(),
    })
}
