use dashboard_core::{model::Direction, SelectedSymbol, SymbolDetail};
use leptos::*;

use super::dashboard::{SelectionSignal, SymbolListing};

/// Cards for the current page of search results.
#[component]
pub fn StockList() -> impl IntoView {
    let listing = use_context::<SymbolListing>().expect("symbol listing context missing");

    view! {
        <section class="stock-list">
            <Show
                when=move || listing.visible.with(|visible| !visible.is_empty())
                fallback=|| view! { <p class="stock-list__empty">"該当する銘柄がありません。"</p> }
            >
                <For
                    each=move || listing.visible.get()
                    key=|detail| detail.symbol.clone()
                    children=move |detail: SymbolDetail| view! { <StockCard detail=detail /> }
                />
            </Show>
        </section>
    }
}

#[component]
fn StockCard(detail: SymbolDetail) -> impl IntoView {
    let selection = use_context::<SelectionSignal>().expect("selection context missing");

    let symbol = detail.symbol.clone();
    let chosen = SelectedSymbol::from(&detail);
    let positive = detail.direction() == Direction::Up;

    view! {
        <article
            class="stock-card"
            class:selected=move || selection.0.with(|selection| selection.is_selected(&symbol))
            on:click=move |_| {
                let chosen = chosen.clone();
                selection.0.update(|selection| selection.select(chosen));
            }
        >
            <header class="stock-card__header">
                <div>
                    <h4>{detail.short_name.clone()}</h4>
                    <p class="stock-card__name">{detail.long_name.clone()}</p>
                </div>
                <div class="stock-card__quote">
                    <p class="stock-card__price">{detail.price_label()}</p>
                    <p class="stock-card__change" class:positive=positive class:negative=!positive>
                        {detail.change_label()}
                    </p>
                </div>
            </header>
            {(detail.volume.is_some() || detail.market_cap.is_some()).then(|| view! {
                <footer class="stock-card__footer">
                    {detail.volume.clone().map(|volume| view! { <span>"出来高: "{volume}</span> })}
                    {detail.market_cap.clone().map(|cap| view! { <span>"時価総額: "{cap}</span> })}
                </footer>
            })}
        </article>
    }
}
