use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Months, NaiveDate, Offset, TimeZone, Utc};
use serde::Serialize;
use thiserror::Error;

/// Relative window bounding a chart query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Period {
    Month1,
    Month6,
    #[default]
    Year1,
    Year5,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Month1, Period::Month6, Period::Year1, Period::Year5];

    pub fn label(self) -> &'static str {
        match self {
            Period::Month1 => "1M",
            Period::Month6 => "6M",
            Period::Year1 => "1Y",
            Period::Year5 => "5Y",
        }
    }

    pub fn months(self) -> u32 {
        match self {
            Period::Month1 => 1,
            Period::Month6 => 6,
            Period::Year1 => 12,
            Period::Year5 => 60,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown period {0:?}; expected one of 1M, 6M, 1Y, 5Y")]
pub struct ParsePeriodError(pub String);

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1M" => Ok(Period::Month1),
            "6M" => Ok(Period::Month6),
            "1Y" => Ok(Period::Year1),
            "5Y" => Ok(Period::Year5),
            _ => Err(ParsePeriodError(s.to_string())),
        }
    }
}

/// Bounds sent upstream as the `ChartInput` of the symbols query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl ChartRange {
    pub fn with_symbol(mut self, symbol: Option<String>) -> Self {
        self.symbol = symbol;
        self
    }
}

/// Resolve `period` against `now`: both bounds are end-of-day in `now`'s zone,
/// the start shifted back by the period with month-end clamping.
pub fn resolve<Tz: TimeZone>(period: Period, now: &DateTime<Tz>) -> ChartRange {
    let today = now.date_naive();
    // Shift the calendar date, not the instant: the same wall-clock time a
    // month back may not exist (or exist twice) in `now`'s zone.
    let first_day = today
        .checked_sub_months(Months::new(period.months()))
        .unwrap_or_else(|| {
            log::warn!(target: "period", "cannot shift {today} back by {period}; using today");
            today
        });

    ChartRange {
        start: end_of_day(now, first_day),
        end: end_of_day(now, today),
        symbol: None,
    }
}

/// Last millisecond of `date` in the zone of `now`.
pub fn end_of_day<Tz: TimeZone>(now: &DateTime<Tz>, date: NaiveDate) -> DateTime<Utc> {
    let Some(last_moment) = date.and_hms_milli_opt(23, 59, 59, 999) else {
        return now.with_timezone(&Utc);
    };

    match now.timezone().from_local_datetime(&last_moment).latest() {
        Some(instant) => instant.with_timezone(&Utc),
        // Skipped by a transition at midnight; read it at `now`'s offset.
        None => Utc.from_utc_datetime(&(last_moment - now.offset().fix())),
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;
    use chrono_tz::America::New_York;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tokyo(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, 30, 0)
            .unwrap()
    }

    #[test]
    fn one_month_clamps_to_month_end() {
        let range = resolve(Period::Month1, &tokyo(2025, 3, 31, 10));

        assert_eq!(range.end.to_rfc3339(), "2025-03-31T14:59:59.999+00:00");
        assert_eq!(range.start.to_rfc3339(), "2025-02-28T14:59:59.999+00:00");
        assert_eq!(range.symbol, None);
    }

    #[test]
    fn one_year_is_end_of_day_a_year_back() {
        let now = tokyo(2024, 2, 29, 8);
        let range = resolve(Period::Year1, &now);

        assert_eq!(range.start, end_of_day(&now, date(2023, 2, 28)));
        assert_eq!(range.end, end_of_day(&now, date(2024, 2, 29)));
    }

    #[test]
    fn every_period_starts_before_it_ends() {
        let now = tokyo(2025, 7, 15, 23);
        for period in Period::ALL {
            let range = resolve(period, &now);
            assert!(range.start < range.end, "{period} range is inverted");
        }
        let five_years = resolve(Period::Year5, &now);
        assert_eq!(five_years.start, end_of_day(&now, date(2020, 7, 15)));
    }

    #[test]
    fn start_survives_a_skipped_hour_a_month_back() {
        // 2025-03-09 02:30 does not exist in New York.
        let now = New_York.with_ymd_and_hms(2025, 4, 9, 2, 30, 0).unwrap();
        let range = resolve(Period::Month1, &now);

        assert_eq!(range.start.to_rfc3339(), "2025-03-10T03:59:59.999+00:00");
        assert_eq!(range.end.to_rfc3339(), "2025-04-10T03:59:59.999+00:00");
    }

    #[test]
    fn start_survives_a_repeated_hour_a_month_back() {
        // 2025-11-02 01:30 happens twice in New York.
        let now = New_York.with_ymd_and_hms(2025, 12, 2, 1, 30, 0).unwrap();
        let range = resolve(Period::Month1, &now);

        assert_eq!(range.start.to_rfc3339(), "2025-11-03T04:59:59.999+00:00");
        assert_eq!(range.end.to_rfc3339(), "2025-12-03T04:59:59.999+00:00");
        assert!(range.start < range.end);
    }

    #[test]
    fn labels_round_trip_through_from_str() {
        for period in Period::ALL {
            assert_eq!(period.label().parse::<Period>(), Ok(period));
        }
        assert_eq!("1y".parse::<Period>(), Ok(Period::Year1));
        assert!("2W".parse::<Period>().is_err());
        assert_eq!(Period::default(), Period::Year1);
    }

    #[test]
    fn chart_range_serializes_as_chart_input() {
        let range = resolve(Period::Month6, &tokyo(2025, 1, 10, 12)).with_symbol(Some("AAPL".into()));
        let value = serde_json::to_value(&range).unwrap();

        assert_eq!(value["symbol"], "AAPL");
        assert!(value["start"].as_str().unwrap().starts_with("2024-07-10T14:59:59.999"));

        let without_symbol = serde_json::to_value(resolve(Period::Month6, &tokyo(2025, 1, 10, 12))).unwrap();
        assert!(without_symbol.get("symbol").is_none());
    }
}
