use chrono::{DateTime, TimeZone};

use crate::model::SymbolDetail;
use crate::period::{self, ChartRange, Period};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedSymbol {
    pub symbol: String,
    pub short_name: String,
}

impl From<&SymbolDetail> for SelectedSymbol {
    fn from(detail: &SymbolDetail) -> Self {
        SelectedSymbol {
            symbol: detail.symbol.clone(),
            short_name: detail.short_name.clone(),
        }
    }
}

/// Which symbol and period the dashboard is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    symbol: Option<SelectedSymbol>,
    period: Period,
}

impl Selection {
    pub fn symbol(&self) -> Option<&SelectedSymbol> {
        self.symbol.as_ref()
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn is_selected(&self, symbol: &str) -> bool {
        self.symbol
            .as_ref()
            .is_some_and(|selected| selected.symbol == symbol)
    }

    /// Pick the first symbol when nothing is selected yet. Returns whether the selection changed.
    pub fn sync<'a, I>(&mut self, symbols: I) -> bool
    where
        I: IntoIterator<Item = &'a SymbolDetail>,
    {
        if self.symbol.is_some() {
            return false;
        }
        match symbols.into_iter().next() {
            Some(first) => {
                log::debug!(target: "selection", "auto-selecting {}", first.symbol);
                self.symbol = Some(first.into());
                true
            }
            None => false,
        }
    }

    pub fn select(&mut self, symbol: SelectedSymbol) {
        self.symbol = Some(symbol);
    }

    pub fn set_period(&mut self, period: Period) {
        self.period = period;
    }

    /// Query bounds for the current period, scoped to the selected symbol.
    pub fn chart_range<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> ChartRange {
        period::resolve(self.period, now)
            .with_symbol(self.symbol.as_ref().map(|selected| selected.symbol.clone()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn detail(symbol: &str) -> SymbolDetail {
        SymbolDetail {
            symbol: symbol.to_string(),
            short_name: format!("{symbol} short"),
            long_name: format!("{symbol} long"),
            price: 10.0,
            change: "-0.50".into(),
            change_percent: "-4.76%".into(),
            volume: Some("1.2M".into()),
            market_cap: None,
            currency_symbol: "$".into(),
        }
    }

    #[test]
    fn starts_unselected_on_one_year() {
        let selection = Selection::default();
        assert!(selection.symbol().is_none());
        assert_eq!(selection.period(), Period::Year1);
    }

    #[test]
    fn sync_picks_first_symbol_once() {
        let symbols = vec![detail("AAPL"), detail("GOOGL")];
        let mut selection = Selection::default();

        assert!(!selection.sync(&[]));
        assert!(selection.sync(&symbols));
        assert_eq!(selection.symbol().unwrap().symbol, "AAPL");

        let reordered = vec![detail("GOOGL"), detail("AAPL")];
        assert!(!selection.sync(&reordered));
        assert!(selection.is_selected("AAPL"));
    }

    #[test]
    fn period_change_keeps_symbol() {
        let mut selection = Selection::default();
        selection.select(SelectedSymbol::from(&detail("MSFT")));
        selection.set_period(Period::Month6);

        assert!(selection.is_selected("MSFT"));
        assert_eq!(selection.period(), Period::Month6);
    }

    #[test]
    fn chart_range_carries_selected_symbol() {
        let now = Utc::now();
        let mut selection = Selection::default();
        assert_eq!(selection.chart_range(&now).symbol, None);

        selection.select(SelectedSymbol::from(&detail("AMZN")));
        let range = selection.chart_range(&now);
        assert_eq!(range.symbol.as_deref(), Some("AMZN"));
        assert_eq!(range.start, period::resolve(Period::Year1, &now).start);
    }
}
