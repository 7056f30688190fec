use leptos::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{Route, Router, Routes};
use wasm_bindgen::prelude::wasm_bindgen;

mod api;
mod components;
mod logging;

pub use api::{BrowserApi, BrowserTransport, build_config, connect};
pub use components::dashboard::Dashboard;
pub use components::not_found::NotFound;
pub use logging::init_logging;

/// Root component: routing, page title and the error boundary around the dashboard.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = build_config();
    let api = connect(&config);

    view! {
        <Title text="Dashboard" />
        <Router>
            <main class="app-root">
                <Routes>
                    <Route
                        path="/"
                        view=move || {
                            let api = api.clone();
                            let config = config.clone();
                            view! {
                                <ErrorBoundary fallback=error_fallback>
                                    <Dashboard api=api config=config />
                                </ErrorBoundary>
                            }
                        }
                    />
                    <Route path="/*any" view=NotFound />
                </Routes>
            </main>
        </Router>
    }
}

/// Generic failure page; the underlying errors are only listed in debug builds.
fn error_fallback(errors: RwSignal<Errors>) -> impl IntoView {
    view! {
        <section class="error-page">
            <h1>"Oops!"</h1>
            <p>"An unexpected error occurred."</p>
            {cfg!(debug_assertions).then(|| view! {
                <pre class="error-page__details">
                    {move || {
                        errors
                            .get()
                            .into_iter()
                            .map(|(_, err)| err.to_string())
                            .collect::<Vec<_>>()
                            .join("\n")
                    }}
                </pre>
            })}
        </section>
    }
}

/// WASM entry point called automatically by `trunk`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), wasm_bindgen::JsValue> {
    init_logging();
    console_error_panic_hook::set_once();

    leptos::mount_to_body(|| view! { <App /> });
    Ok(())
}
