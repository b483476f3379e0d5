use anyhow::Result;

use crate::{
    bot::gateway::{ChannelMessage, Gateway},
    utils::misc,
};

/// Sends `text` back to the channel `original` came from. Anything longer than
/// `limit` characters is cut into fixed-width chunks: the first one replies to
/// `original`, the rest follow as plain channel messages, one at a time.
pub async fn dispatch(
    gateway: &impl Gateway,
    text: &str,
    original: &ChannelMessage,
    limit: usize,
) -> Result<()> {
    if text.chars().count() <= limit {
        return gateway.reply(original, text).await;
    }

    let chunks = misc::chunk_message(text, limit);
    log::debug!("reply is too long, sending it in {} chunks", chunks.len());

    let mut chunks = chunks.iter();
    if let Some(first) = chunks.next() {
        gateway.reply(original, first).await?;
    }
    for chunk in chunks {
        gateway.send(original.channel_id, chunk).await?;
    }

    Ok(())
}
