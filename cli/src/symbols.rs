use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use dashboard_core::model::Direction;
use dashboard_core::pagination::total_pages;
use dashboard_core::search::filter_symbols;
use dashboard_core::{Api, PageState, Period, Selection, SymbolDetail, Transport, PAGE_SIZE};
use serde_json::json;

use crate::logging;

#[derive(Debug, Args, Clone)]
pub struct SymbolsArgs {
    /// Case-insensitive filter on the symbol code or company name
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Page to show, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page
    #[arg(long, default_value_t = PAGE_SIZE)]
    pub page_size: usize,

    /// Chart period sent with the request (1M, 6M, 1Y, 5Y)
    #[arg(long, default_value_t = Period::default())]
    pub period: Period,
}

impl Default for SymbolsArgs {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            page_size: PAGE_SIZE,
            period: Period::default(),
        }
    }
}

pub async fn run<T: Transport>(api: &Api<T>, args: SymbolsArgs) -> Result<()> {
    let mut selection = Selection::default();
    selection.set_period(args.period);

    let entries = api
        .symbols(&selection.chart_range(&Local::now()))
        .await
        .context("failed to fetch symbols")?;
    let details: Vec<SymbolDetail> = entries.into_iter().map(|entry| entry.detail).collect();

    let listing = paginate(&details, &args);
    for line in &listing.lines {
        println!("{line}");
    }
    Ok(())
}

/// Rendered page of the symbol table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub page: usize,
    pub total_pages: usize,
    pub lines: Vec<String>,
}

pub fn paginate(details: &[SymbolDetail], args: &SymbolsArgs) -> Listing {
    let mut state = PageState::new(args.page_size);
    state.set_query(args.query.clone());

    let found = filter_symbols(details, state.query());
    let total = total_pages(found.len(), state.page_size());
    if !state.go_to(args.page, total) && args.page != 1 {
        logging::warn(
            "symbols.page",
            "requested page is out of range, showing the first page",
            json!({ "requested": args.page, "total_pages": total }),
        );
    }

    let mut lines = Vec::with_capacity(state.page_size() + 2);
    if found.is_empty() {
        lines.push(format!("no symbols match {:?}", state.query()));
    } else {
        lines.push(format!(
            "{:<10} | {:<24} | {:>12} | {:>20} | {:>10}",
            "SYMBOL", "NAME", "PRICE", "CHANGE", "VOLUME"
        ));
        lines.extend(state.slice(&found).iter().map(|detail| format_row(detail)));
    }
    lines.push(format!("page {} / {}", state.page(), total.max(1)));

    Listing {
        page: state.page(),
        total_pages: total,
        lines,
    }
}

fn format_row(detail: &SymbolDetail) -> String {
    let arrow = match detail.direction() {
        Direction::Up => '▲',
        Direction::Down => '▼',
    };
    format!(
        "{:<10} | {:<24} | {:>12} | {:>18} {} | {:>10}",
        detail.symbol,
        truncate(&detail.short_name, 24),
        detail.price_label(),
        detail.change_label(),
        arrow,
        detail.volume.as_deref().unwrap_or("-"),
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
