use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quote and display metadata for a single listed symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolDetail {
    pub symbol: String,
    pub short_name: String,
    pub long_name: String,
    pub price: f64,
    pub change: String,
    pub change_percent: String,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub market_cap: Option<String>,
    pub currency_symbol: String,
}

impl SymbolDetail {
    pub fn direction(&self) -> Direction {
        Direction::from_change(&self.change)
    }

    /// Current price prefixed with the currency symbol, e.g. `$175.32`.
    pub fn price_label(&self) -> String {
        format!("{}{}", self.currency_symbol, self.price)
    }

    /// `+1.25 (+0.72%)` style summary of the day's move.
    pub fn change_label(&self) -> String {
        format!("{} ({})", self.change, self.change_percent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Changes arrive pre-formatted; only an explicit leading `+` counts as up.
    pub fn from_change(change: &str) -> Self {
        if change.starts_with('+') {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

/// Raw point of a chart series as returned upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawChartPoint {
    #[serde(default)]
    pub symbol: Option<String>,
    pub timestamp: String,
    pub price: f64,
}

/// One element of the `symbols` query: the quote plus its chart for the requested range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub id: String,
    pub symbol: String,
    pub detail: SymbolDetail,
    #[serde(default)]
    pub chart: Option<Vec<Option<RawChartPoint>>>,
}

impl SymbolEntry {
    pub fn has_chart(&self) -> bool {
        self.chart
            .as_ref()
            .is_some_and(|points| points.iter().any(Option::is_some))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTarget {
    pub id: String,
    pub symbol: String,
    pub short_name: String,
}

/// The authenticated member's notification rule. Only the hour of `time` is meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub time: DateTime<Utc>,
    pub targets: Vec<NotificationTarget>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_entry_deserializes_from_sample() {
        let json = r#"{
            "id": "U3ltYm9sOkFBUEw=",
            "symbol": "AAPL",
            "detail": {
                "symbol": "AAPL",
                "shortName": "Apple",
                "longName": "Apple Inc.",
                "price": 175.32,
                "change": "+1.25",
                "changePercent": "+0.72%",
                "volume": null,
                "marketCap": "2.75T",
                "currencySymbol": "$"
            },
            "chart": [
                {"symbol": "AAPL", "timestamp": "2025-01-02T00:00:00Z", "price": 170.5},
                null
            ]
        }"#;

        let entry: SymbolEntry = serde_json::from_str(json).expect("valid entry");
        assert_eq!(entry.detail.short_name, "Apple");
        assert_eq!(entry.detail.volume, None);
        assert_eq!(entry.detail.market_cap.as_deref(), Some("2.75T"));
        assert_eq!(entry.chart.as_ref().map(Vec::len), Some(2));
        assert!(entry.has_chart());
    }

    #[test]
    fn direction_follows_leading_sign() {
        assert_eq!(Direction::from_change("+1.25"), Direction::Up);
        assert_eq!(Direction::from_change("-15.40"), Direction::Down);
        assert_eq!(Direction::from_change("0.00"), Direction::Down);
    }

    #[test]
    fn notification_time_accepts_offsets() {
        let json = r#"{
            "id": "n1",
            "time": "2025-06-01T09:00:00+09:00",
            "targets": [{"id": "t1", "symbol": "7203.T", "shortName": "TOYOTA"}]
        }"#;

        let notification: Notification = serde_json::from_str(json).expect("valid notification");
        assert_eq!(notification.time.to_rfc3339(), "2025-06-01T00:00:00+00:00");
        assert_eq!(notification.targets[0].short_name, "TOYOTA");
    }
}
