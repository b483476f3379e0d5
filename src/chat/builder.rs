use anyhow::Result;
use serenity::all::{ChannelId, UserId};

use crate::{bot::gateway::Gateway, utils::misc};

use super::message::{Conversation, MessageRole};

/// How many raw messages of channel history are considered per request.
pub const HISTORY_LIMIT: u8 = 10;

/// Turns recent channel history into model input. Only prefixed messages and
/// the bot's own replies make it in; everything else in the channel is chatter.
pub struct ConversationBuilder<'a> {
    system_prompt: &'a str,
    prefix: &'a str,
    bot_id: UserId,
}

impl<'a> ConversationBuilder<'a> {
    pub fn new(system_prompt: &'a str, prefix: &'a str, bot_id: UserId) -> Self {
        Self {
            system_prompt,
            prefix,
            bot_id,
        }
    }

    pub async fn build(&self, gateway: &impl Gateway, channel: ChannelId) -> Result<Conversation> {
        let mut conversation = Conversation::new(self.system_prompt);

        let mut history = gateway.history(channel, HISTORY_LIMIT).await?;
        history.reverse();

        for msg in history {
            let from_bot = msg.author.id == self.bot_id;
            if !from_bot && !msg.content.starts_with(self.prefix) {
                continue;
            }

            let role = match from_bot {
                true => MessageRole::Assistant,
                false => MessageRole::User,
            };

            conversation.push_turn(role, misc::normalize_username(&msg.author.name), msg.content);
        }

        log::debug!("built conversation with {} messages", conversation.len());

        Ok(conversation)
    }
}
