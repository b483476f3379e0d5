mod error;
mod message;
mod reply;
mod typing;

use async_trait::async_trait;

use crate::bot::gateway::ChannelMessage;

pub use message::Router;

/// Invoked once per message observed on the gateway.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn on_message(&self, event: &ChannelMessage);
}
