pub mod bot;
pub mod broker;
pub mod cancel;
pub mod clock;
pub mod config;
pub mod handlers;
pub mod platforms;
pub mod polling;
pub mod services;
pub mod utils;

use std::sync::Arc;

use clap::Parser;
use config::{AppConfig, CliConfig, FileConfig};
use futures::future::join_all;
use handlers::{
    error::ErrorHandler, games::GamesHandler, manager::Manager, telegram::TelegramHandler,
    twitter::TwitterHandler,
};
use services::DiContainer;
use tracing::{error, info};
use tracing_subscriber::fmt;

use crate::utils::get_levelfilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli_config = CliConfig::parse();
    fmt().with_max_level(get_levelfilter(cli_config.verbosity())).init();
    info!("Logging & CLI config initialized... Loading file config");

    let file_config = FileConfig::new(cli_config.config_file.clone())?;
    let config = AppConfig::new(file_config, &cli_config);
    info!("File config initialized... Broadcasting to chat {}", config.channel);

    let di = DiContainer::create(config)?;
    let mut manager = Manager::new(di.broker.clone());
    manager.register(Arc::new(TelegramHandler::new(
        Arc::new(di.telegram.clone()),
        di.broker.clone(),
        di.config.channel,
    )));
    if let Some(twitter) = &di.twitter {
        manager.register(Arc::new(TwitterHandler::new(
            Arc::new(twitter.clone()),
            di.broker.clone(),
        )));
    }
    manager.register(Arc::new(ErrorHandler::new(di.broker.clone())));
    manager.register(Arc::new(GamesHandler::new(di.polling_context())));

    let (cancel, token) = cancel::cancellation();
    let mut tasks = manager.start(token.clone());
    tasks.push(tokio::spawn(bot::run(
        di.telegram.clone(),
        di.broker.clone(),
        di.config.telegram.admins.clone(),
        token,
    )));
    info!("Huddle started with handlers {:?}", manager.ids());

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for the shutdown signal: {e}");
    }

    info!("Shutting down");
    cancel.cancel();
    for result in join_all(tasks).await {
        if let Err(e) = result {
            error!("A task ended abnormally: {e}");
        }
    }
    di.broker.close();

    Ok(())
}
