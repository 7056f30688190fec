use dashboard_core::{chart::NO_DATA_MESSAGE, ChartSeries};
use leptos::*;

use super::dashboard::{SelectionSignal, SymbolListing};

const CHART_WIDTH: f64 = 620.0;
const CHART_HEIGHT: f64 = 260.0;
const Y_TICKS: usize = 4;

#[component]
pub fn StockChart() -> impl IntoView {
    let listing = use_context::<SymbolListing>().expect("symbol listing context missing");
    let selection = use_context::<SelectionSignal>().expect("selection context missing");

    let title = move || {
        selection.0.with(|selection| {
            let name = selection
                .symbol()
                .map(|symbol| symbol.short_name.clone())
                .unwrap_or_default();
            format!("{name} - 価格推移 ({})", selection.period())
        })
    };
    let geometry = create_memo(move |_| {
        listing
            .chart
            .with(|view| view.series().and_then(|series| compute_chart_geometry(series, CHART_WIDTH, CHART_HEIGHT)))
    });

    view! {
        <section class="stock-chart">
            <h3>{title}</h3>
            <Show
                when=move || geometry.with(Option::is_some)
                fallback=|| view! { <p class="stock-chart__empty">{NO_DATA_MESSAGE}</p> }
            >
                {move || geometry.get().map(|geometry| view! {
                    <svg
                        width=CHART_WIDTH
                        height=CHART_HEIGHT
                        viewBox=format!("0 0 {} {}", CHART_WIDTH, CHART_HEIGHT)
                        class="stock-chart__svg"
                    >
                        <defs>
                            <linearGradient id="colorPrice" x1="0" x2="0" y1="0" y2="1">
                                <stop offset="5%" stop-color="#34d399" stop-opacity="0.8" />
                                <stop offset="95%" stop-color="#34d399" stop-opacity="0.1" />
                            </linearGradient>
                        </defs>
                        {geometry.y_ticks.iter().map(|tick| view! {
                            <g class="stock-chart__tick">
                                <line x1="0" x2=CHART_WIDTH y1=tick.y y2=tick.y />
                                <text x="4" y={tick.y - 4.0}>{tick.label.clone()}</text>
                            </g>
                        }).collect_view()}
                        <polygon class="stock-chart__area" points=geometry.area_points.clone() />
                        <polyline class="stock-chart__line" points=geometry.points.clone() />
                        {geometry.markers.iter().map(|marker| view! {
                            <circle class="stock-chart__marker" cx=marker.x cy=marker.y r="3">
                                <title>{marker.tooltip.clone()}</title>
                            </circle>
                        }).collect_view()}
                    </svg>
                    <footer class="stock-chart__footer">
                        <span>{geometry.first_label.clone()}</span>
                        <span>{geometry.last_label.clone()}</span>
                    </footer>
                })}
            </Show>
        </section>
    }
}

#[derive(Debug, Clone, PartialEq)]
struct AxisTick {
    y: f64,
    label: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Marker {
    x: f64,
    y: f64,
    tooltip: String,
}

#[derive(Debug, Clone, PartialEq)]
struct ChartGeometry {
    points: String,
    area_points: String,
    markers: Vec<Marker>,
    y_ticks: Vec<AxisTick>,
    first_label: String,
    last_label: String,
}

/// Project a series onto a `width` x `height` canvas. Points are spaced evenly
/// along x; a flat series is drawn through the vertical middle.
fn compute_chart_geometry(series: &ChartSeries, width: f64, height: f64) -> Option<ChartGeometry> {
    if series.points.is_empty() || width <= 0.0 || height <= 0.0 {
        return None;
    }

    let min_price = series.min_price()?;
    let max_price = series.max_price()?;
    if !min_price.is_finite() || !max_price.is_finite() {
        return None;
    }
    let price_span = max_price - min_price;
    let flat = price_span.abs() < f64::EPSILON;

    let project_y = |price: f64| {
        if flat {
            height / 2.0
        } else {
            height - ((price - min_price) / price_span) * height
        }
    };
    let steps = (series.points.len() - 1).max(1) as f64;
    let project_x = |idx: usize| {
        if series.points.len() == 1 {
            width / 2.0
        } else {
            (idx as f64 / steps) * width
        }
    };

    let markers: Vec<Marker> = series
        .points
        .iter()
        .enumerate()
        .map(|(idx, point)| Marker {
            x: project_x(idx),
            y: project_y(point.price),
            tooltip: format!("{}: {}", point.label, series.format_tooltip(point.price)),
        })
        .collect();

    let points = markers
        .iter()
        .map(|marker| format!("{:.2},{:.2}", marker.x, marker.y))
        .collect::<Vec<_>>()
        .join(" ");
    let first_x = markers.first().map(|marker| marker.x).unwrap_or_default();
    let last_x = markers.last().map(|marker| marker.x).unwrap_or_default();
    let area_points = format!("{first_x:.2},{height:.2} {points} {last_x:.2},{height:.2}");

    let y_ticks = if flat {
        vec![AxisTick {
            y: height / 2.0,
            label: series.format_axis(round_cents(min_price)),
        }]
    } else {
        (0..Y_TICKS)
            .map(|idx| {
                let value = min_price + price_span * idx as f64 / (Y_TICKS - 1) as f64;
                AxisTick {
                    y: project_y(value),
                    label: series.format_axis(round_cents(value)),
                }
            })
            .collect()
    };

    Some(ChartGeometry {
        points,
        area_points,
        markers,
        y_ticks,
        first_label: series.first().map(|point| point.label.clone()).unwrap_or_default(),
        last_label: series.last().map(|point| point.label.clone()).unwrap_or_default(),
    })
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
