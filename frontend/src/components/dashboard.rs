use std::fmt;
use std::rc::Rc;

use chrono::Local;
use dashboard_core::{
    chart::{chart_entry, format_entry},
    pagination::total_pages,
    search::filter_symbols,
    ChartView, DashboardConfig, PageState, RequestGeneration, Selection, SymbolDetail, SymbolEntry,
};
use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::BrowserApi;

use super::{
    notification::NotificationSection, pagination::Pagination, period_selector::PeriodSelector,
    search_box::SearchBox, stock_card::StockList, stock_chart::StockChart,
};

#[derive(Clone, Copy)]
pub struct SelectionSignal(pub RwSignal<Selection>);

#[derive(Clone, Copy)]
pub struct PageSignal(pub RwSignal<PageState>);

#[derive(Clone)]
pub struct ApiHandle(pub BrowserApi);

#[derive(Clone)]
pub struct ConfigHandle(pub DashboardConfig);

/// Latest outcome of the symbol list query.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SymbolsState {
    #[default]
    Loading,
    Loaded(Vec<SymbolEntry>),
    Failed(String),
}

impl SymbolsState {
    pub fn entries(&self) -> &[SymbolEntry] {
        match self {
            SymbolsState::Loaded(entries) => entries,
            _ => &[],
        }
    }
}

/// Symbol list failure, raised to the surrounding error boundary.
#[derive(Debug, Clone)]
pub struct LoadError(pub String);

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load symbols: {}", self.0)
    }
}

impl std::error::Error for LoadError {}

#[derive(Clone, Copy)]
struct SymbolsSignal {
    state: RwSignal<SymbolsState>,
    /// A refetch (new symbol or period) is in flight.
    fetching: RwSignal<bool>,
}

/// Derived views over the fetched symbols.
#[derive(Clone, Copy)]
pub struct SymbolListing {
    pub all: Memo<Vec<SymbolDetail>>,
    pub visible: Memo<Vec<SymbolDetail>>,
    pub total_pages: Memo<usize>,
    pub chart: Memo<ChartView>,
}

/// Top-level dashboard wrapper providing shared application state via context.
#[component]
pub fn Dashboard(api: BrowserApi, config: DashboardConfig) -> impl IntoView {
    let selection = create_rw_signal(Selection::default());
    let page = create_rw_signal(PageState::default());
    let symbols = SymbolsSignal {
        state: create_rw_signal(SymbolsState::Loading),
        fetching: create_rw_signal(false),
    };

    watch_symbols(Rc::clone(&api), selection, symbols);

    let all = create_memo(move |_| {
        symbols.state.with(|state| {
            state
                .entries()
                .iter()
                .map(|entry| entry.detail.clone())
                .collect::<Vec<_>>()
        })
    });
    let query = create_memo(move |_| page.with(|page| page.query().to_string()));
    let filtered = create_memo(move |_| {
        query.with(|query| {
            all.with(|details| {
                filter_symbols(details, query)
                    .into_iter()
                    .cloned()
                    .collect::<Vec<_>>()
            })
        })
    });
    let pages = create_memo(move |_| {
        let page_size = page.with(|page| page.page_size());
        filtered.with(|found| total_pages(found.len(), page_size))
    });
    let visible = create_memo(move |_| {
        filtered.with(|found| page.with(|page| page.slice(found).to_vec()))
    });
    let chart = create_memo(move |_| {
        let selected = selection.with(|selection| selection.symbol().map(|s| s.symbol.clone()));
        symbols.state.with(|state| {
            chart_entry(state.entries(), selected.as_deref())
                .map(|entry| format_entry(entry, &Local))
                .unwrap_or(ChartView::NoData)
        })
    });

    // A shrinking result set may leave the current page past the end.
    create_effect(move |_| {
        let total = pages.get();
        if page.with_untracked(|page| page.page() > total.max(1)) {
            page.update(|page| page.clamp(total));
        }
    });

    let notifications_enabled = config.notifications_enabled();

    provide_context(SelectionSignal(selection));
    provide_context(PageSignal(page));
    provide_context(SymbolListing {
        all,
        visible,
        total_pages: pages,
        chart,
    });
    provide_context(ApiHandle(api));
    provide_context(ConfigHandle(config));

    view! {
        <div class="dashboard">
            <header class="dashboard__header">
                <h1>"株価ダッシュボード"</h1>
                {move || symbols.fetching.get().then(|| view! { <span class="dashboard__busy">"更新中..."</span> })}
            </header>
            <section class="dashboard__body">
                <div class="dashboard__main">
                    <SearchBox />
                    {move || match symbols.state.get() {
                        SymbolsState::Loading => Ok(view! { <p class="dashboard__status">"読み込み中..."</p> }.into_view()),
                        SymbolsState::Failed(message) => Err(LoadError(message)),
                        SymbolsState::Loaded(_) => Ok(view! { <StockList /> }.into_view()),
                    }}
                    <Pagination />
                </div>
                <aside class="dashboard__sidebar">
                    <PeriodSelector />
                    <StockChart />
                </aside>
            </section>
            <Show when=move || notifications_enabled>
                <NotificationSection />
            </Show>
        </div>
    }
}

/// Refetch the symbol list whenever the selection or period changes. Responses
/// that arrive after a newer request was issued are dropped.
fn watch_symbols(api: BrowserApi, selection: RwSignal<Selection>, symbols: SymbolsSignal) {
    let generation = Rc::new(RequestGeneration::default());

    create_effect(move |_| {
        let range = selection.with(|selection| selection.chart_range(&Local::now()));
        let ticket = generation.begin();
        let api = Rc::clone(&api);
        let generation = Rc::clone(&generation);
        symbols.fetching.set(true);

        spawn_local(async move {
            let result = api.symbols(&range).await;
            if !generation.is_current(ticket) {
                log::debug!("dropping stale symbols response for {range:?}");
                return;
            }
            symbols.fetching.set(false);

            match result {
                Ok(entries) => {
                    let mut next = selection.get_untracked();
                    let changed = next.sync(entries.iter().map(|entry| &entry.detail));
                    symbols.state.set(SymbolsState::Loaded(entries));
                    if changed {
                        selection.set(next);
                    }
                }
                Err(err) => {
                    log::error!("failed to load symbols: {err}");
                    symbols.state.set(SymbolsState::Failed(err.to_string()));
                }
            }
        });
    });
}
