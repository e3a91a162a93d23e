//! Thread rendering
//!
//! One thread per command on the triggering message, then one card per
//! segment. Card failures do not stop the remaining cards.

use tracing::{debug, error, warn};

use crate::error::RenderError;
use crate::platform::{ChatPlatform, MessageRef};
use crate::splitter::Segment;

/// Discord thread name limit
pub const THREAD_NAME_LIMIT: usize = 100;

/// Delivery result for one card
#[derive(Debug, Clone)]
pub struct CardOutcome {
    pub index: usize,
    pub title: String,
    pub result: Result<(), RenderError>,
}

impl CardOutcome {
    pub fn is_posted(&self) -> bool {
        self.result.is_ok()
    }
}

/// `man <section> <command>`, cut to the platform limit
pub fn thread_name(section: &str, command: &str) -> String {
    format!("man {} {}", section, command)
        .chars()
        .take(THREAD_NAME_LIMIT)
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct ThreadRenderer {
    archive_minutes: u16,
}

impl ThreadRenderer {
    pub fn new(archive_minutes: u16) -> Self {
        Self { archive_minutes }
    }

    /// Create the thread and post every segment in order.
    ///
    /// Fails only if the thread cannot be created; nothing is posted then.
    pub async fn render<P: ChatPlatform + ?Sized>(
        &self,
        platform: &P,
        trigger: MessageRef,
        section: &str,
        command: &str,
        segments: &[Segment],
    ) -> Result<Vec<CardOutcome>, RenderError> {
        let name = thread_name(section, command);
        let thread_id = platform
            .create_thread(trigger, &name, self.archive_minutes)
            .await
            .inspect_err(|e| error!("Could not start thread '{}': {}", name, e))?;

        debug!("Thread {} '{}' created for {} cards", thread_id, name, segments.len());

        let mut outcomes = Vec::with_capacity(segments.len());
        for (index, segment) in segments.iter().enumerate() {
            let result = platform.post_card(thread_id, segment).await;
            if let Err(e) = &result {
                warn!("Card {} ('{}') in thread {} failed: {}", index, segment.title, thread_id, e);
            }
            outcomes.push(CardOutcome {
                index,
                title: segment.title.clone(),
                result,
            });
        }

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::tests::{FakePlatform, THREAD_ID};

    fn segments() -> Vec<Segment> {
        ["NAME", "SYNOPSIS", "DESCRIPTION"]
            .iter()
            .map(|t| Segment {
                title: t.to_string(),
                description: format!("{} body", t),
            })
            .collect()
    }

    fn trigger() -> MessageRef {
        MessageRef {
            channel_id: 10,
            message_id: 20,
        }
    }

    #[tokio::test]
    async fn test_posts_all_cards_in_order() {
        let platform = FakePlatform::default();
        let renderer = ThreadRenderer::new(60);

        let outcomes = renderer
            .render(&platform, trigger(), "1", "ls", &segments())
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(CardOutcome::is_posted));

        let threads = platform.threads();
        assert_eq!(threads, vec![(trigger(), "man 1 ls".to_string(), 60)]);

        let titles: Vec<String> = platform
            .cards()
            .into_iter()
            .map(|(thread, s)| {
                assert_eq!(thread, THREAD_ID);
                s.title
            })
            .collect();
        assert_eq!(titles, vec!["NAME", "SYNOPSIS", "DESCRIPTION"]);
    }

    #[tokio::test]
    async fn test_card_failure_does_not_abort() {
        let platform = FakePlatform::failing_cards(vec![1]);
        let renderer = ThreadRenderer::new(60);

        let outcomes = renderer
            .render(&platform, trigger(), "1", "ls", &segments())
            .await
            .unwrap();

        let posted: Vec<bool> = outcomes.iter().map(CardOutcome::is_posted).collect();
        assert_eq!(posted, vec![true, false, true]);
        assert_eq!(outcomes[1].title, "SYNOPSIS");
        assert_eq!(platform.cards().len(), 2);
    }

    #[tokio::test]
    async fn test_thread_failure_posts_nothing() {
        let platform = FakePlatform::failing_thread();
        let renderer = ThreadRenderer::new(60);

        let err = renderer
            .render(&platform, trigger(), "1", "ls", &segments())
            .await
            .unwrap_err();

        assert!(matches!(err, RenderError::ThreadCreation(_)));
        assert!(platform.cards().is_empty());
        assert!(platform.replies().is_empty());
    }

    #[test]
    fn test_thread_name_truncated() {
        let name = thread_name("1", &"x".repeat(200));
        assert_eq!(name.chars().count(), THREAD_NAME_LIMIT);
        assert!(name.starts_with("man 1 x"));
    }
}
