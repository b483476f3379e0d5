use crate::bot::gateway::{ChannelMessage, Gateway};

use super::message::Router;

pub const APOLOGY: &str = "Sorry, I encountered an error processing your request.";

impl<G: Gateway> Router<G> {
    /// logs the error and apologizes to the author of `event`
    /// if the apology fails too, that gets logged as well
    pub async fn on_error(&self, error: anyhow::Error, event: &ChannelMessage) {
        log::error!("error handling message:\n\n{error:?}\n");

        if let Err(why) = self.gateway.reply(event, APOLOGY).await {
            log::error!("error during propagation of error to user: {why:?}");
        }
    }
}
