use dashboard_core::Period;
use leptos::*;

use super::dashboard::SelectionSignal;

#[component]
pub fn PeriodSelector() -> impl IntoView {
    let selection = use_context::<SelectionSignal>().expect("selection context missing");

    view! {
        <div class="period-selector">
            <For
                each=move || Period::ALL.into_iter()
                key=|period| period.label()
                children=move |period: Period| {
                    view! {
                        <button
                            type="button"
                            class="period-selector__option"
                            class:active=move || selection.0.with(|selection| selection.period() == period)
                            on:click=move |_| selection.0.update(|selection| selection.set_period(period))
                        >
                            {period.label()}
                        </button>
                    }
                }
            />
        </div>
    }
}
