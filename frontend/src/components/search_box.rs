use leptos::{ev, event_target_value, *};

use super::dashboard::PageSignal;

#[component]
pub fn SearchBox() -> impl IntoView {
    let page = use_context::<PageSignal>().expect("page state context missing");

    view! {
        <label class="search-box">
            <span class="search-box__label">"銘柄検索"</span>
            <input
                type="search"
                class="search-box__input"
                placeholder="シンボルまたは銘柄名"
                prop:value=move || page.0.with(|page| page.query().to_string())
                on:input=move |ev: ev::Event| {
                    let query = event_target_value(&ev);
                    page.0.update(|page| page.set_query(query));
                }
            />
        </label>
    }
}
