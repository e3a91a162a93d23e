//! Chat platform interface
//!
//! The pipeline talks to the chat service only through `ChatPlatform`, so
//! the Discord adapter and test fakes are interchangeable.

use async_trait::async_trait;

use crate::error::RenderError;
use crate::splitter::Segment;

/// Location of a message on the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub channel_id: u64,
    pub message_id: u64,
}

/// Platform-neutral inbound message
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub message_id: u64,
    pub channel_id: u64,
    pub author_id: u64,
    pub author_name: String,
    pub content: String,
}

impl IncomingMessage {
    pub fn reference(&self) -> MessageRef {
        MessageRef {
            channel_id: self.channel_id,
            message_id: self.message_id,
        }
    }
}

#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// User ID the bot is logged in as
    fn current_user_id(&self) -> u64;

    /// Plain-text message in a channel
    async fn reply(&self, channel_id: u64, text: &str) -> Result<(), RenderError>;

    /// Start a thread on `origin`; returns the thread's channel ID
    async fn create_thread(
        &self,
        origin: MessageRef,
        name: &str,
        archive_minutes: u16,
    ) -> Result<u64, RenderError>;

    /// Post one segment as an embed card
    async fn post_card(&self, thread_id: u64, segment: &Segment) -> Result<(), RenderError>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every platform call. Failures are injected per operation.
    #[derive(Default)]
    pub(crate) struct FakePlatform {
        fail_thread: bool,
        fail_cards: Vec<usize>,
        replies: Mutex<Vec<(u64, String)>>,
        threads: Mutex<Vec<(MessageRef, String, u16)>>,
        cards: Mutex<Vec<(u64, Segment)>>,
        attempts: Mutex<usize>,
    }

    pub(crate) const BOT_ID: u64 = 1;
    pub(crate) const THREAD_ID: u64 = 777;

    impl FakePlatform {
        /// Every thread creation is rejected
        pub fn failing_thread() -> Self {
            Self {
                fail_thread: true,
                ..Default::default()
            }
        }

        /// Card posts with these zero-based attempt numbers are rejected
        pub fn failing_cards(attempts: Vec<usize>) -> Self {
            Self {
                fail_cards: attempts,
                ..Default::default()
            }
        }

        pub fn replies(&self) -> Vec<(u64, String)> {
            self.replies.lock().unwrap().clone()
        }

        pub fn threads(&self) -> Vec<(MessageRef, String, u16)> {
            self.threads.lock().unwrap().clone()
        }

        pub fn cards(&self) -> Vec<(u64, Segment)> {
            self.cards.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatPlatform for FakePlatform {
        fn current_user_id(&self) -> u64 {
            BOT_ID
        }

        async fn reply(&self, channel_id: u64, text: &str) -> Result<(), RenderError> {
            self.replies.lock().unwrap().push((channel_id, text.to_string()));
            Ok(())
        }

        async fn create_thread(
            &self,
            origin: MessageRef,
            name: &str,
            archive_minutes: u16,
        ) -> Result<u64, RenderError> {
            if self.fail_thread {
                return Err(RenderError::ThreadCreation("missing permissions".to_string()));
            }
            self.threads
                .lock()
                .unwrap()
                .push((origin, name.to_string(), archive_minutes));
            Ok(THREAD_ID)
        }

        async fn post_card(&self, thread_id: u64, segment: &Segment) -> Result<(), RenderError> {
            let attempt = {
                let mut attempts = self.attempts.lock().unwrap();
                let current = *attempts;
                *attempts += 1;
                current
            };
            if self.fail_cards.contains(&attempt) {
                return Err(RenderError::CardPost(format!("card {} rejected", attempt)));
            }
            self.cards.lock().unwrap().push((thread_id, segment.clone()));
            Ok(())
        }
    }
}
