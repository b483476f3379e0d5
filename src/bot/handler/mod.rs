use std::sync::{Arc, OnceLock};

use serenity::{
    all::{ActivityData, Context, EventHandler, Message, OnlineStatus, Ready, UserId},
    async_trait,
};

use crate::{chat::ModelClient, config::RelaySettings};

use super::gateway::{ChannelMessage, SerenityGateway};
pub use events::MessageHandler;
use events::Router;

mod events;

pub struct InnerData {
    pub settings: RelaySettings,
    pub client: ModelClient,
    /// Set once the gateway reports `ready`.
    pub bot_id: OnceLock<UserId>,
}
pub type Data = Arc<InnerData>;

impl InnerData {
    pub fn new(settings: RelaySettings, client: ModelClient) -> Self {
        Self {
            settings,
            client,
            bot_id: OnceLock::new(),
        }
    }
}

pub struct Handler {
    pub data: Data,
}
impl Handler {
    pub fn new(data: Data) -> Self {
        Self { data }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        self.data.bot_id.set(ready.user.id).ok();

        log::info!("{} is connected!", ready.user.name);
        log::info!("prefix: {}", self.data.settings.prefix);

        ctx.set_presence(
            Some(ActivityData::playing(format!(
                "Chatting with {}",
                self.data.settings.prefix
            ))),
            OnlineStatus::Online,
        );
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let Some(bot_id) = self.data.bot_id.get().copied() else {
            log::warn!("message {} arrived before ready, ignoring", msg.id);
            return;
        };

        let router = Router::new(
            SerenityGateway::new(ctx.http.clone()),
            self.data.clone(),
            bot_id,
        );

        router.on_message(&ChannelMessage::from(&msg)).await;
    }
}
