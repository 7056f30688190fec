use chrono::{DateTime, TimeZone};

use crate::model::{RawChartPoint, SymbolEntry};

pub const NO_DATA_MESSAGE: &str = "チャートデータを表示できません。";

/// A cleaned chart point ready for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub timestamp: String,
    pub label: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub points: Vec<ChartPoint>,
    pub currency_symbol: String,
}

impl ChartSeries {
    /// Axis tick text: the value exactly as given, prefixed with the currency.
    pub fn format_axis(&self, value: f64) -> String {
        format!("{}{}", self.currency_symbol, value)
    }

    /// Tooltip text: the value rounded to two decimals before the currency is applied.
    pub fn format_tooltip(&self, value: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, value)
    }

    pub fn min_price(&self) -> Option<f64> {
        self.points.iter().map(|point| point.price).reduce(f64::min)
    }

    pub fn max_price(&self) -> Option<f64> {
        self.points.iter().map(|point| point.price).reduce(f64::max)
    }

    pub fn first(&self) -> Option<&ChartPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&ChartPoint> {
        self.points.last()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    NoData,
    Series(ChartSeries),
}

impl ChartView {
    pub fn series(&self) -> Option<&ChartSeries> {
        match self {
            ChartView::NoData => None,
            ChartView::Series(series) => Some(series),
        }
    }
}

/// Drop absent points and label the rest with a short date in `tz`.
pub fn format_series<'a, I, Tz>(points: I, currency_symbol: &str, tz: &Tz) -> ChartView
where
    I: IntoIterator<Item = &'a Option<RawChartPoint>>,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let points: Vec<ChartPoint> = points
        .into_iter()
        .flatten()
        .map(|raw| ChartPoint {
            label: short_date_label(&raw.timestamp, tz),
            timestamp: raw.timestamp.clone(),
            price: raw.price,
        })
        .collect();

    if points.is_empty() {
        return ChartView::NoData;
    }

    ChartView::Series(ChartSeries {
        points,
        currency_symbol: currency_symbol.to_string(),
    })
}

/// Format the chart carried by `entry`, if any.
pub fn format_entry<Tz>(entry: &SymbolEntry, tz: &Tz) -> ChartView
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match &entry.chart {
        Some(points) => format_series(points, &entry.detail.currency_symbol, tz),
        None => ChartView::NoData,
    }
}

/// `YYYY/MM/DD` in `tz`; timestamps that fail to parse are shown verbatim.
pub fn short_date_label<Tz>(timestamp: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => parsed.with_timezone(tz).format("%Y/%m/%d").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// Entry whose chart should be displayed: the selected symbol when it carries
/// data, otherwise the last entry that does.
pub fn chart_entry<'a>(entries: &'a [SymbolEntry], selected: Option<&str>) -> Option<&'a SymbolEntry> {
    selected
        .and_then(|symbol| {
            entries
                .iter()
                .find(|entry| entry.detail.symbol == symbol && entry.has_chart())
        })
        .or_else(|| entries.iter().rev().find(|entry| entry.has_chart()))
}
