use leptos::*;

use super::dashboard::{PageSignal, SymbolListing};

/// Previous/next controls; hidden while everything fits on one page.
#[component]
pub fn Pagination() -> impl IntoView {
    let page = use_context::<PageSignal>().expect("page state context missing");
    let listing = use_context::<SymbolListing>().expect("symbol listing context missing");

    let current = move || page.0.with(|page| page.page());
    let total = move || listing.total_pages.get();

    view! {
        <Show when=move || { total() > 1 }>
            <nav class="pagination">
                <button
                    type="button"
                    disabled=move || current() <= 1
                    on:click=move |_| {
                        let total = total();
                        page.0.update(|page| {
                            page.previous(total);
                        });
                    }
                >
                    "前へ"
                </button>
                <span class="pagination__position">{move || format!("{} / {}", current(), total())}</span>
                <button
                    type="button"
                    disabled=move || current() >= total()
                    on:click=move |_| {
                        let total = total();
                        page.0.update(|page| {
                            page.next(total);
                        });
                    }
                >
                    "次へ"
                </button>
            </nav>
        </Show>
    }
}
