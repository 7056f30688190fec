use clap::{Parser, Subcommand};
use dashboard_core::config::{parse_flag, BACKEND_URL_ENV, DEFAULT_BACKEND_URL, ENABLE_NOTIFICATION_ENV};
use dashboard_core::DashboardConfig;

use crate::chart::ChartArgs;
use crate::notification::NotificationCommand;
use crate::symbols::SymbolsArgs;

pub const SESSION_ENV: &str = "DASHBOARD_SESSION";

#[derive(Debug, Parser)]
#[command(author, version, about = "Stock dashboard terminal client")]
pub struct Cli {
    /// Backend base URL; `query` is resolved relative to it
    #[arg(long, global = true, env = BACKEND_URL_ENV, default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Enable the notification commands (true/1/yes/on)
    #[arg(long, global = true, env = ENABLE_NOTIFICATION_ENV, value_name = "FLAG")]
    pub enable_notification: Option<String>,

    /// Cookie header sent with every request, e.g. `session=...`
    #[arg(long, global = true, env = SESSION_ENV, hide_env_values = true)]
    pub session: Option<String>,

    /// Emit debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn config(&self) -> DashboardConfig {
        let enabled = self
            .enable_notification
            .as_deref()
            .map(parse_flag)
            .unwrap_or(false);
        DashboardConfig::new(self.backend_url.clone(), enabled)
    }

    pub fn command(self) -> Command {
        self.command.unwrap_or_default()
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List symbols with their latest quote, one page at a time
    Symbols(SymbolsArgs),
    /// Render the price history of a symbol as an ASCII chart
    Chart(ChartArgs),
    /// Show, register or delete the daily price notification
    #[command(subcommand)]
    Notification(NotificationCommand),
}

impl Default for Command {
    fn default() -> Self {
        Command::Symbols(SymbolsArgs::default())
    }
}
