use async_trait::async_trait;
use serenity::all::UserId;

use crate::{
    bot::{
        gateway::{ChannelMessage, Gateway},
        handler::Data,
    },
    chat::ConversationBuilder,
    utils::misc,
};

use super::{MessageHandler, reply, typing::TypingIndicator};

/// Decides whether a message is meant for the bot and, if so, answers it.
/// Built per event around the gateway that delivered it.
pub struct Router<G: Gateway> {
    pub(super) gateway: G,
    data: Data,
    bot_id: UserId,
}

impl<G: Gateway> Router<G> {
    pub fn new(gateway: G, data: Data, bot_id: UserId) -> Self {
        Self {
            gateway,
            data,
            bot_id,
        }
    }

    fn accepts(&self, event: &ChannelMessage) -> bool {
        if event.author.bot {
            return false;
        }

        if !self.data.settings.allowed_channels.contains(&event.channel_id) {
            return false;
        }

        // only the first character is compared, a longer prefix never matches here
        let first_char = event
            .content
            .trim()
            .chars()
            .next()
            .map(String::from)
            .unwrap_or_default();
        let mentioned = event.mentions.contains(&self.bot_id);

        first_char == self.data.settings.prefix || mentioned
    }

    async fn relay(&self, event: &ChannelMessage) -> anyhow::Result<()> {
        let settings = &self.data.settings;

        let conversation =
            ConversationBuilder::new(&settings.system_prompt, &settings.prefix, self.bot_id)
                .build(&self.gateway, event.channel_id)
                .await?;

        log::info!("sending {} messages to LLM...", conversation.len());

        let response = self.data.client.query(&conversation).await;

        reply::dispatch(&self.gateway, &response, event, settings.chunk_size).await
    }
}

#[async_trait]
impl<G: Gateway> MessageHandler for Router<G> {
    async fn on_message(&self, event: &ChannelMessage) {
        if !self.accepts(event) {
            return;
        }

        log::info!(
            "processing message from {}: {}",
            event.author.name,
            misc::preview(&event.content, 50)
        );

        let typing = TypingIndicator::start(self.gateway.clone(), event.channel_id);

        if let Err(why) = self.relay(event).await {
            self.on_error(why, event).await;
        }

        typing.stop().await;
    }
}
