use anyhow::{bail, Result};
use chrono::Local;
use clap::{Args, Subcommand};
use dashboard_core::config::ENABLE_NOTIFICATION_ENV;
use dashboard_core::notification::DEFAULT_TIME;
use dashboard_core::{
    Api, ApiError, DashboardConfig, NotificationDraft, NotificationState, NotificationStatus, Transport,
};
use serde_json::json;

use crate::cli::SESSION_ENV;
use crate::logging;

#[derive(Debug, Subcommand, Clone)]
pub enum NotificationCommand {
    /// Show the registered notification
    Show,
    /// Register a notification, replacing the current one
    Create(CreateArgs),
    /// Delete the registered notification
    Delete,
}

#[derive(Debug, Args, Clone)]
pub struct CreateArgs {
    /// Time of day as HH:MM; only the hour is used
    #[arg(short, long, default_value = DEFAULT_TIME)]
    pub time: String,

    /// Symbols to include (one or more)
    pub symbols: Vec<String>,
}

pub async fn run<T: Transport>(api: &Api<T>, config: &DashboardConfig, command: NotificationCommand) -> Result<()> {
    if !config.notifications_enabled() {
        bail!("notifications are disabled; set {ENABLE_NOTIFICATION_ENV}=true or pass --enable-notification true");
    }

    match command {
        NotificationCommand::Show => show(api, config).await,
        NotificationCommand::Create(args) => {
            let mut draft = NotificationDraft::default();
            draft.set_time(args.time);
            for symbol in &args.symbols {
                if !draft.is_selected(symbol) {
                    draft.toggle(symbol);
                }
            }
            // Validation failures never reach the server.
            let input = draft.validate(&Local::now())?;

            let created = api
                .create_notification(&input)
                .await
                .map_err(|err| explain(err, config))?;
            logging::info(
                "notification.create",
                "registered notification",
                json!({ "id": created.id, "symbols": input.symbols, "time": input.time }),
            );
            show(api, config).await
        }
        NotificationCommand::Delete => {
            let id = api
                .delete_notification()
                .await
                .map_err(|err| explain(err, config))?;
            logging::info("notification.delete", "deleted notification", json!({ "id": id }));
            show(api, config).await
        }
    }
}

async fn show<T: Transport>(api: &Api<T>, config: &DashboardConfig) -> Result<()> {
    let state = NotificationState::from_result(api.notification().await);
    let status = state.status(&Local);
    for line in describe(&status, config) {
        println!("{line}");
    }

    match status {
        NotificationStatus::Failed(message) => bail!("failed to load notification: {message}"),
        _ => Ok(()),
    }
}

/// Human-readable lines for each notification state.
pub fn describe(status: &NotificationStatus, config: &DashboardConfig) -> Vec<String> {
    match status {
        NotificationStatus::Loading => vec!["loading...".to_string()],
        NotificationStatus::LoginRequired => login_prompt(config),
        NotificationStatus::Empty => vec!["登録済みの通知はありません。".to_string()],
        NotificationStatus::Registered(view) => vec![
            format!("時間: {}", view.time),
            format!("銘柄: {}", view.tickers.join(", ")),
        ],
        NotificationStatus::Failed(message) => vec![format!("error: {message}")],
    }
}

fn login_prompt(config: &DashboardConfig) -> Vec<String> {
    vec![
        "通知機能を利用するにはログイン".to_string(),
        format!("Sign in at {} and pass the session cookie via --session or {SESSION_ENV}.", config.login_url()),
    ]
}

fn explain(err: ApiError, config: &DashboardConfig) -> anyhow::Error {
    if err.is_unauthorized() {
        anyhow::anyhow!("{}", login_prompt(config).join("\n"))
    } else {
        anyhow::Error::new(err).context("notification request failed")
    }
}
