use std::time::Duration;

use serenity::all::ChannelId;
use tokio::{
    task::JoinHandle,
    time::MissedTickBehavior,
};

use crate::bot::gateway::Gateway;

/// Discord drops the indicator after roughly ten seconds.
pub const TYPING_INTERVAL: Duration = Duration::from_secs(10);

async fn typing_loop(gateway: impl Gateway, channel: ChannelId, period: Duration) {
    let mut interval = tokio::time::interval(period);
    // a slow signal pushes the schedule back instead of bursting to catch up
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        if let Err(why) = gateway.broadcast_typing(channel).await {
            log::debug!("failed to signal typing in {channel}: {why:?}");
        }
    }
}

/// Keeps "bot is typing..." visible in a channel until stopped.
///
/// Dropping it without calling [`TypingIndicator::stop`] still aborts the
/// background task, it just doesn't wait for it to finish.
pub struct TypingIndicator {
    handle: Option<JoinHandle<()>>,
}

impl TypingIndicator {
    pub fn start(gateway: impl Gateway, channel: ChannelId) -> Self {
        let handle = tokio::spawn(typing_loop(gateway, channel, TYPING_INTERVAL));

        Self {
            handle: Some(handle),
        }
    }

    /// Cancels the loop and waits until the task has actually stopped.
    pub async fn stop(mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        handle.abort();
        match handle.await {
            Ok(()) => {}
            Err(why) if why.is_cancelled() => {}
            Err(why) => log::warn!("typing indicator ended abnormally: {why}"),
        }
    }
}

impl Drop for TypingIndicator {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::gateway::fake::FakeGateway;

    #[tokio::test(start_paused = true)]
    async fn signals_immediately_then_every_interval() {
        let gateway = FakeGateway::default();
        let typing = TypingIndicator::start(gateway.clone(), ChannelId::new(1));

        tokio::time::sleep(Duration::from_secs(25)).await;
        assert_eq!(gateway.typing_signals(), 3);

        typing.stop().await;
        assert_eq!(gateway.handles(), 1);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(gateway.typing_signals(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_signal_does_not_burst_missed_ticks() {
        let gateway = FakeGateway::default();
        gateway.stall_next_typing(Duration::from_secs(35));
        let typing = TypingIndicator::start(gateway.clone(), ChannelId::new(1));

        // first signal finishes at 35s, the next is due 10s after that
        tokio::time::sleep(Duration::from_secs(39)).await;
        assert_eq!(gateway.typing_signals(), 2);

        tokio::time::sleep(Duration::from_secs(7)).await;
        assert_eq!(gateway.typing_signals(), 3);

        typing.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_aborts_the_loop() {
        let gateway = FakeGateway::default();
        let typing = TypingIndicator::start(gateway.clone(), ChannelId::new(1));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(gateway.typing_signals(), 1);

        drop(typing);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(gateway.typing_signals(), 1);
        assert_eq!(gateway.handles(), 1);
    }
}
