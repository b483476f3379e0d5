use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serenity::all::{ChannelId, CreateMessage, GetMessages, Http, Message, MessageId, UserId};

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: UserId,
    pub name: String,
    pub bot: bool,
}

/// What the relay needs to know about a Discord message, either the one that
/// triggered it or one read back from channel history.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub author: Author,
    pub content: String,
    pub mentions: Vec<UserId>,
}

impl From<&Message> for ChannelMessage {
    fn from(msg: &Message) -> Self {
        Self {
            id: msg.id,
            channel_id: msg.channel_id,
            author: Author {
                id: msg.author.id,
                name: msg.author.name.clone(),
                bot: msg.author.bot,
            },
            content: msg.content.clone(),
            mentions: msg.mentions.iter().map(|user| user.id).collect(),
        }
    }
}

/// Channel operations the relay performs against the chat platform.
#[async_trait]
pub trait Gateway: Clone + Send + Sync + 'static {
    /// Most recent `limit` messages, newest first.
    async fn history(&self, channel: ChannelId, limit: u8) -> Result<Vec<ChannelMessage>>;

    async fn broadcast_typing(&self, channel: ChannelId) -> Result<()>;

    /// Sends `content` as a reply quoting `to`.
    async fn reply(&self, to: &ChannelMessage, content: &str) -> Result<()>;

    async fn send(&self, channel: ChannelId, content: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct SerenityGateway {
    http: Arc<Http>,
}

impl SerenityGateway {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Gateway for SerenityGateway {
    async fn history(&self, channel: ChannelId, limit: u8) -> Result<Vec<ChannelMessage>> {
        let messages = channel
            .messages(&self.http, GetMessages::new().limit(limit))
            .await?;

        Ok(messages.iter().map(ChannelMessage::from).collect())
    }

    async fn broadcast_typing(&self, channel: ChannelId) -> Result<()> {
        channel.broadcast_typing(&self.http).await?;
        Ok(())
    }

    async fn reply(&self, to: &ChannelMessage, content: &str) -> Result<()> {
        to.channel_id
            .send_message(
                &self.http,
                CreateMessage::new()
                    .content(content)
                    .reference_message((to.channel_id, to.id)),
            )
            .await?;
        Ok(())
    }

    async fn send(&self, channel: ChannelId, content: &str) -> Result<()> {
        channel.say(&self.http, content).await?;
        Ok(())
    }
}

#[cfg(test)]
pub mod fake {
    use std::{
        sync::{
            Arc, Mutex,
            atomic::{AtomicBool, AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use anyhow::{Result, bail};
    use async_trait::async_trait;
    use serenity::all::{ChannelId, MessageId, UserId};

    use super::{Author, ChannelMessage, Gateway};

    #[derive(Debug, Clone, PartialEq)]
    pub enum Outbound {
        Reply { to: MessageId, content: String },
        Send { channel: ChannelId, content: String },
    }

    #[derive(Default)]
    struct State {
        history: Mutex<Vec<ChannelMessage>>,
        fail_history: AtomicBool,
        fail_sends: AtomicBool,
        history_reads: AtomicUsize,
        typing: AtomicUsize,
        typing_stall: Mutex<Option<Duration>>,
        outbound: Mutex<Vec<Outbound>>,
    }

    /// In-memory gateway recording everything the relay does to a channel.
    #[derive(Clone, Default)]
    pub struct FakeGateway {
        state: Arc<State>,
    }

    impl FakeGateway {
        /// `history` is newest first, the way the platform returns it.
        pub fn with_history(history: Vec<ChannelMessage>) -> Self {
            let gateway = Self::default();
            *gateway.state.history.lock().unwrap() = history;
            gateway
        }

        pub fn fail_history(&self) {
            self.state.fail_history.store(true, Ordering::SeqCst);
        }

        pub fn fail_sends(&self) {
            self.state.fail_sends.store(true, Ordering::SeqCst);
        }

        /// The next typing signal takes `delay` to complete.
        pub fn stall_next_typing(&self, delay: Duration) {
            *self.state.typing_stall.lock().unwrap() = Some(delay);
        }

        pub fn history_reads(&self) -> usize {
            self.state.history_reads.load(Ordering::SeqCst)
        }

        pub fn typing_signals(&self) -> usize {
            self.state.typing.load(Ordering::SeqCst)
        }

        pub fn outbound(&self) -> Vec<Outbound> {
            self.state.outbound.lock().unwrap().clone()
        }

        /// Live handles to this gateway, including this one.
        pub fn handles(&self) -> usize {
            Arc::strong_count(&self.state)
        }
    }

    #[async_trait]
    impl Gateway for FakeGateway {
        async fn history(&self, _channel: ChannelId, limit: u8) -> Result<Vec<ChannelMessage>> {
            self.state.history_reads.fetch_add(1, Ordering::SeqCst);
            if self.state.fail_history.load(Ordering::SeqCst) {
                bail!("history unavailable");
            }

            let history = self.state.history.lock().unwrap();
            Ok(history.iter().take(limit as usize).cloned().collect())
        }

        async fn broadcast_typing(&self, _channel: ChannelId) -> Result<()> {
            self.state.typing.fetch_add(1, Ordering::SeqCst);
            let stall = self.state.typing_stall.lock().unwrap().take();
            if let Some(delay) = stall {
                tokio::time::sleep(delay).await;
            }
            Ok(())
        }

        async fn reply(&self, to: &ChannelMessage, content: &str) -> Result<()> {
            self.state.outbound.lock().unwrap().push(Outbound::Reply {
                to: to.id,
                content: content.to_string(),
            });
            Ok(())
        }

        async fn send(&self, channel: ChannelId, content: &str) -> Result<()> {
            if self.state.fail_sends.load(Ordering::SeqCst) {
                bail!("missing permissions");
            }
            self.state.outbound.lock().unwrap().push(Outbound::Send {
                channel,
                content: content.to_string(),
            });
            Ok(())
        }
    }

    pub fn message(id: u64, channel: u64, author: (u64, &str, bool), content: &str) -> ChannelMessage {
        ChannelMessage {
            id: MessageId::new(id),
            channel_id: ChannelId::new(channel),
            author: Author {
                id: UserId::new(author.0),
                name: author.1.to_string(),
                bot: author.2,
            },
            content: content.to_string(),
            mentions: Vec::new(),
        }
    }
}
