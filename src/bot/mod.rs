use std::sync::Arc;

use anyhow::Result;
use handler::{Handler, InnerData};
use serenity::{Client, all::GatewayIntents};

use crate::{
    chat::ModelClient,
    config::{ChatBotConfig, RelaySettings},
};

pub mod gateway;
mod handler;

pub struct ChatBot {
    client: Client,
}

impl ChatBot {
    pub async fn new(config: ChatBotConfig) -> Result<Self> {
        let intents = GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MEMBERS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        let data = Arc::new(InnerData::new(
            RelaySettings::from(&*config),
            ModelClient::new(&config.llm),
        ));

        let client = serenity::Client::builder(&config.discord.token, intents)
            .event_handler(Handler::new(data))
            .await?;

        Ok(Self { client })
    }

    /// Runs until the gateway connection ends. A rejected token surfaces here.
    pub async fn run(self) -> Result<()> {
        let ChatBot { mut client } = self;

        client.start().await?;

        Ok(())
    }
}
