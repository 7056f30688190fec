use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Args;
use dashboard_core::chart::{chart_entry, format_entry, NO_DATA_MESSAGE};
use dashboard_core::{Api, ChartSeries, ChartView, Period, SelectedSymbol, Selection, Transport};
use textplots::{Chart, Plot, Shape};

#[derive(Debug, Args, Clone)]
pub struct ChartArgs {
    /// Symbol to plot; defaults to the first listed symbol
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// History window (1M, 6M, 1Y, 5Y)
    #[arg(short, long, default_value_t = Period::default())]
    pub period: Period,

    /// Chart width in characters
    #[arg(long, default_value_t = 120)]
    pub width: u32,

    /// Chart height in characters
    #[arg(long, default_value_t = 30)]
    pub height: u32,
}

pub async fn run<T: Transport>(api: &Api<T>, args: ChartArgs) -> Result<()> {
    let now = Local::now();
    let mut selection = Selection::default();
    selection.set_period(args.period);

    // The unscoped listing resolves which symbol the chart is for.
    let listing = api
        .symbols(&selection.chart_range(&now))
        .await
        .context("failed to fetch symbols")?;
    match &args.symbol {
        Some(code) => {
            let Some(entry) = listing
                .iter()
                .find(|entry| entry.detail.symbol.eq_ignore_ascii_case(code))
            else {
                bail!("unknown symbol {code}");
            };
            selection.select(SelectedSymbol::from(&entry.detail));
        }
        None => {
            selection.sync(listing.iter().map(|entry| &entry.detail));
        }
    }
    let Some(selected) = selection.symbol().cloned() else {
        bail!("the backend returned no symbols");
    };

    let entries = api
        .symbols(&selection.chart_range(&now))
        .await
        .with_context(|| format!("failed to fetch chart for {}", selected.symbol))?;
    let Some(entry) = chart_entry(&entries, Some(&selected.symbol)) else {
        println!("{NO_DATA_MESSAGE}");
        return Ok(());
    };

    match format_entry(entry, &Local) {
        ChartView::NoData => println!("{NO_DATA_MESSAGE}"),
        ChartView::Series(series) => {
            let title = format!("{} ({}) - {}", entry.detail.short_name, entry.detail.symbol, selection.period());
            for line in summary_lines(&title, &series) {
                println!("{line}");
            }
            render_chart(&series, args.width, args.height);
        }
    }
    Ok(())
}

/// Header printed above the plot: title, date span, price range and last close.
pub fn summary_lines(title: &str, series: &ChartSeries) -> Vec<String> {
    let mut lines = vec![format!("{title} ({} samples)", series.points.len())];
    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        lines.push(format!("{} → {}", first.label, last.label));
    }
    if let (Some(min), Some(max)) = (series.min_price(), series.max_price()) {
        lines.push(format!(
            "Price range: {} → {}",
            series.format_axis(min),
            series.format_axis(max)
        ));
    }
    if let Some(last) = series.last() {
        lines.push(format!("Last: {}", series.format_tooltip(last.price)));
    }
    lines
}

fn render_chart(series: &ChartSeries, width: u32, height: u32) {
    let samples: Vec<(f32, f32)> = series
        .points
        .iter()
        .enumerate()
        .map(|(idx, point)| (idx as f32, point.price as f32))
        .collect();
    let max_x = (samples.len().saturating_sub(1) as f32).max(1.0);

    Chart::new(width.max(40), height.max(10), 0.0, max_x)
        .lineplot(&Shape::Lines(&samples))
        .display();
    println!();
}
