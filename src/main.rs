use std::{path::PathBuf, process::ExitCode};

use config::{ChatBotConfig, TOKEN_ENV};
use utils::log::Logger;

mod bot;
mod chat;
mod config;
mod utils;

#[tokio::main]
async fn main() -> ExitCode {
    Logger::init(Logger::level_from_env());

    let config = match ChatBotConfig::read(PathBuf::from("config.toml")) {
        Ok(config) => config.with_token_override(std::env::var(TOKEN_ENV).ok()),
        Err(why) => {
            log::error!("could not read config: {why:?}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(why) = config.validate() {
        log::error!("{why}");
        return ExitCode::FAILURE;
    }

    log::info!("starting discord bot...");

    let bot = match bot::ChatBot::new(config).await {
        Ok(bot) => bot,
        Err(why) => {
            log::error!("failed to start bot: {why:?}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(why) = bot.run().await {
        log::error!("client error: {why:?}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
