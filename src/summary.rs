//! Summaries of date-ordered series such as daily sales and purchases.

use serde::Serialize;

use crate::records::TimeSeriesPoint;

/// Headline figures for a sales or purchase series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSummary {
    /// The sum of all values.
    pub total: f64,
    /// The mean value, or zero for an empty series.
    pub average: f64,
    /// The value of the last point.
    pub latest_value: Option<f64>,
    /// The change percentage of the last point.
    pub latest_change_percentage: Option<f64>,
    /// The mean change percentage, with points lacking one counted as zero.
    pub average_change_percentage: f64,
    /// The first point holding the largest value.
    pub peak: Option<TimeSeriesPoint>,
    /// The number of points in the series.
    pub point_count: usize,
}

/// Reduces a series to its total, average, latest change and peak.
///
/// "Latest" means the last point in the order given; the series is not sorted.
pub fn summarize(series: &[TimeSeriesPoint]) -> MetricSummary {
    let Some(latest) = series.last() else {
        return MetricSummary::default();
    };

    let point_count = series.len();
    let total: f64 = series.iter().map(|point| point.value).sum();
    let change_total: f64 = series
        .iter()
        .map(|point| point.change_percentage.unwrap_or(0.0))
        .sum();

    let mut peak = &series[0];
    for point in &series[1..] {
        if point.value > peak.value {
            peak = point;
        }
    }

    MetricSummary {
        total,
        average: total / point_count as f64,
        latest_value: Some(latest.value),
        latest_change_percentage: latest.change_percentage,
        average_change_percentage: change_total / point_count as f64,
        peak: Some(peak.clone()),
        point_count,
    }
}
