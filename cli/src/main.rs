use anyhow::{Context, Result};
use clap::Parser;
use dashboard_core::Api;
use stock_dashboard::cli::{Cli, Command};
use stock_dashboard::transport::ReqwestTransport;
use stock_dashboard::{chart, logging, notification, symbols};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose).context("failed to install logger")?;

    let config = cli.config();
    let api = Api::new(ReqwestTransport::new(&config, cli.session.clone())?);

    match cli.command() {
        Command::Symbols(args) => symbols::run(&api, args).await,
        Command::Chart(args) => chart::run(&api, args).await,
        Command::Notification(command) => notification::run(&api, &config, command).await,
    }
}
