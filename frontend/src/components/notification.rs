use std::rc::Rc;

use chrono::Local;
use dashboard_core::{NotificationDraft, NotificationState, NotificationStatus, NotificationView, SymbolDetail};
use leptos::{ev, event_target_value, *};
use wasm_bindgen_futures::spawn_local;

use super::dashboard::{ApiHandle, ConfigHandle, SymbolListing};

/// Login prompt, or the registered notification / creation form for a signed-in user.
#[component]
pub fn NotificationSection() -> impl IntoView {
    let api = use_context::<ApiHandle>().expect("api context missing").0;
    let config = use_context::<ConfigHandle>().expect("config context missing").0;

    let state = create_rw_signal(NotificationState::Loading);
    // Bumped after every mutation to re-read the (invalidated) notification.
    let version = create_rw_signal(0_u32);

    create_effect(move |_| {
        version.track();
        let api = Rc::clone(&api);
        spawn_local(async move {
            let result = api.notification().await;
            state.set(NotificationState::from_result(result));
        });
    });

    let status = create_memo(move |_| state.with(|state| state.status(&Local)));
    let refetch = Callback::new(move |_: ()| version.update(|version| *version += 1));
    let login_url = config.login_url();
    let logout_url = config.logout_url();

    view! {
        <section class="notification">
            {move || match status.get() {
                NotificationStatus::Loading => view! { <p class="notification__status">"読み込み中..."</p> }.into_view(),
                NotificationStatus::LoginRequired => view! { <LoginPrompt login_url=login_url.clone() /> }.into_view(),
                NotificationStatus::Failed(message) => view! {
                    <p class="notification__status notification__status--error">{message}</p>
                }.into_view(),
                NotificationStatus::Empty => view! {
                    <AccountBar logout_url=logout_url.clone() />
                    <NotificationForm on_changed=refetch />
                }.into_view(),
                NotificationStatus::Registered(registered) => view! {
                    <AccountBar logout_url=logout_url.clone() />
                    <RegisteredNotification registered=registered on_changed=refetch />
                }.into_view(),
            }}
        </section>
    }
}

#[component]
fn LoginPrompt(login_url: String) -> impl IntoView {
    view! {
        <div class="notification__login">
            <h4>"通知機能を利用するにはログイン"</h4>
            <p>"Googleアカウントでログインして、気になる銘柄の株価通知を設定しましょう。"</p>
            <a class="notification__login-link" href=login_url>"Googleでログイン"</a>
        </div>
    }
}

#[component]
fn AccountBar(logout_url: String) -> impl IntoView {
    view! {
        <div class="notification__account">
            <a class="notification__logout" href=logout_url>"ログアウト"</a>
        </div>
    }
}

#[component]
fn NotificationForm(on_changed: Callback<()>) -> impl IntoView {
    let api = use_context::<ApiHandle>().expect("api context missing").0;
    let listing = use_context::<SymbolListing>().expect("symbol listing context missing");

    let draft = create_rw_signal(NotificationDraft::default());
    let error = create_rw_signal(None::<String>);
    let pending = create_rw_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let input = match draft.with_untracked(|draft| draft.validate(&Local::now())) {
            Ok(input) => input,
            Err(err) => {
                error.set(Some(err.to_string()));
                return;
            }
        };
        error.set(None);
        pending.set(true);

        let api = Rc::clone(&api);
        spawn_local(async move {
            match api.create_notification(&input).await {
                Ok(created) => {
                    log::info!("registered notification {} at {}", created.id, created.time);
                    on_changed.call(());
                }
                Err(err) => {
                    log::error!("failed to register notification: {err}");
                    error.set(Some(err.to_string()));
                }
            }
            pending.set(false);
        });
    };

    view! {
        <div class="notification__form">
            <h4>"株価通知を登録"</h4>
            {move || error.get().map(|message| view! { <p class="notification__error">{message}</p> })}
            <form on:submit=on_submit>
                <label for="notify-time">"通知時間"</label>
                <input
                    type="time"
                    id="notify-time"
                    prop:value=move || draft.with(|draft| draft.time().to_string())
                    on:input=move |ev: ev::Event| {
                        let time = event_target_value(&ev);
                        draft.update(|draft| draft.set_time(time));
                    }
                />
                <fieldset class="notification__targets">
                    <legend>"対象の株 (複数選択可)"</legend>
                    <For
                        each=move || listing.all.get()
                        key=|detail| detail.symbol.clone()
                        children=move |detail: SymbolDetail| {
                            let symbol = detail.symbol.clone();
                            let toggled = detail.symbol.clone();
                            view! {
                                <label class="notification__target">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || draft.with(|draft| draft.is_selected(&symbol))
                                        on:change=move |_| draft.update(|draft| {
                                            draft.toggle(&toggled);
                                        })
                                    />
                                    <span>{format!("{} - {}", detail.symbol, detail.short_name)}</span>
                                </label>
                            }
                        }
                    />
                </fieldset>
                <button type="submit" disabled=move || pending.get()>"通知を登録する"</button>
            </form>
        </div>
    }
}

#[component]
fn RegisteredNotification(registered: NotificationView, on_changed: Callback<()>) -> impl IntoView {
    let api = use_context::<ApiHandle>().expect("api context missing").0;
    let error = create_rw_signal(None::<String>);

    let on_delete = move |_| {
        let api = Rc::clone(&api);
        spawn_local(async move {
            match api.delete_notification().await {
                Ok(id) => {
                    log::info!("deleted notification {id}");
                    on_changed.call(());
                }
                Err(err) => {
                    log::error!("failed to delete notification: {err}");
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    view! {
        <div class="notification__list">
            <h4>"登録済み通知一覧"</h4>
            {move || error.get().map(|message| view! { <p class="notification__error">{message}</p> })}
            <ul>
                <li class="notification__item">
                    <div>
                        <p>"時間: "<span>{registered.time.clone()}</span></p>
                        <p>"銘柄: "<span>{registered.tickers.join(", ")}</span></p>
                    </div>
                    <button type="button" on:click=on_delete>"削除"</button>
                </li>
            </ul>
        </div>
    }
}
