use leptos::*;
use leptos_router::A;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <main class="not-found">
            <h1>"404"</h1>
            <p>"The requested page could not be found."</p>
            <A href="/">"ダッシュボードへ戻る"</A>
        </main>
    }
}
