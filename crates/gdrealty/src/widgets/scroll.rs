//! Scroll-offset driven navbar treatment.
//!
//! [`ScrollToggle`] is the pure predicate: past the threshold or not, with no
//! hysteresis. [`ScrollFeed`] distributes offsets to subscribers; each
//! [`ScrollSubscription`] is released when dropped.

use tokio::sync::watch;

/// Default offset, in pixels, past which the navbar switches treatment.
pub const DEFAULT_THRESHOLD_PX: u32 = 20;

/// Tracks whether the vertical scroll offset is past a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollToggle {
    threshold: u32,
    past: bool,
}

impl Default for ScrollToggle {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD_PX)
    }
}

impl ScrollToggle {
    /// Create a toggle at offset zero.
    #[must_use]
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            past: false,
        }
    }

    /// The configured threshold.
    #[must_use]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// `true` once the last observed offset is strictly greater than the threshold.
    #[must_use]
    pub fn is_past(&self) -> bool {
        self.past
    }

    /// Record a new offset. Returns the new state if it flipped.
    pub fn observe(&mut self, offset: u32) -> Option<bool> {
        let past = offset > self.threshold;
        if past == self.past {
            None
        } else {
            self.past = past;
            Some(past)
        }
    }
}

/// Publisher of scroll offsets for one view.
#[derive(Debug)]
pub struct ScrollFeed {
    tx: watch::Sender<u32>,
}

impl Default for ScrollFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollFeed {
    /// Create a feed at offset zero.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self { tx }
    }

    /// Publish the latest offset. Never fails, even with no subscribers.
    pub fn publish(&self, offset: u32) {
        self.tx.send_replace(offset);
    }

    /// Subscribe with the given threshold.
    ///
    /// The subscription starts from the current offset and is released when
    /// dropped.
    #[must_use]
    pub fn subscribe(&self, threshold: u32) -> ScrollSubscription {
        let rx = self.tx.subscribe();
        let mut toggle = ScrollToggle::new(threshold);
        toggle.observe(*rx.borrow());
        ScrollSubscription { rx, toggle }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A live subscription to a [`ScrollFeed`].
#[derive(Debug)]
pub struct ScrollSubscription {
    rx: watch::Receiver<u32>,
    toggle: ScrollToggle,
}

impl ScrollSubscription {
    /// Current toggle state.
    #[must_use]
    pub fn is_past(&self) -> bool {
        self.toggle.is_past()
    }

    /// Wait for the toggle to flip and return its new state.
    ///
    /// Returns `None` once the feed has been dropped. Cancel safe.
    pub async fn flipped(&mut self) -> Option<bool> {
        loop {
            if self.rx.changed().await.is_err() {
                return None;
            }
            let offset = *self.rx.borrow_and_update();
            if let Some(past) = self.toggle.observe(offset) {
                return Some(past);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_starts_false() {
        let toggle = ScrollToggle::default();
        assert!(!toggle.is_past());
        assert_eq!(toggle.threshold(), 20);
    }

    #[test]
    fn test_toggle_threshold_is_exclusive() {
        let mut toggle = ScrollToggle::default();
        assert_eq!(toggle.observe(0), None);
        assert_eq!(toggle.observe(20), None);
        assert!(!toggle.is_past());
        assert_eq!(toggle.observe(21), Some(true));
        assert!(toggle.is_past());
    }

    #[test]
    fn test_toggle_flips_back_without_hysteresis() {
        let mut toggle = ScrollToggle::default();
        toggle.observe(500);
        assert_eq!(toggle.observe(21), None);
        assert_eq!(toggle.observe(20), Some(false));
        assert_eq!(toggle.observe(21), Some(true));
    }

    #[test]
    fn test_subscription_starts_from_current_offset() {
        let feed = ScrollFeed::new();
        feed.publish(100);
        let sub = feed.subscribe(DEFAULT_THRESHOLD_PX);
        assert!(sub.is_past());
    }

    #[test]
    fn test_drop_releases_subscription() {
        let feed = ScrollFeed::new();
        assert_eq!(feed.subscriber_count(), 0);

        let first = feed.subscribe(20);
        let second = feed.subscribe(20);
        assert_eq!(feed.subscriber_count(), 2);

        drop(first);
        assert_eq!(feed.subscriber_count(), 1);
        drop(second);
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let feed = ScrollFeed::new();
        feed.publish(42);
        let subscription = feed.subscribe(20);
        assert!(subscription.is_past());
    }

    #[tokio::test]
    async fn test_flipped_reports_crossings_only() {
        let feed = ScrollFeed::new();
        let mut sub = feed.subscribe(20);

        feed.publish(10);
        feed.publish(35);
        assert_eq!(sub.flipped().await, Some(true));

        feed.publish(5);
        assert_eq!(sub.flipped().await, Some(false));
        assert!(!sub.is_past());
    }

    #[tokio::test]
    async fn test_flipped_ends_when_feed_dropped() {
        let feed = ScrollFeed::new();
        let mut sub = feed.subscribe(20);
        drop(feed);
        assert_eq!(sub.flipped().await, None);
    }
}
