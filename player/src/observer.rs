use crate::{
    controller::PlaybackController,
    registry::VideoId,
};
use std::collections::HashMap;

/// Fraction of a video's area that must be inside the viewport before it
/// counts as visible.
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.8;

/// One video moving across the visibility threshold, in either direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityChange {
    pub video: VideoId,
    pub entering: bool,
}

/// Watches intersection ratios and reports threshold crossings to the
/// controller, batched the way a scroll tick reports every video that moved
/// across the threshold at once.
#[derive(Debug)]
pub struct ViewportObserver {
    threshold: f64,
    controller: PlaybackController,
    intersecting: HashMap<VideoId, bool>,
    pending: Vec<VisibilityChange>,
}

impl ViewportObserver {
    pub fn new(controller: PlaybackController) -> Self {
        Self::with_threshold(DEFAULT_VISIBILITY_THRESHOLD, controller)
    }

    pub fn with_threshold(threshold: f64, controller: PlaybackController) -> Self {
        Self {
            threshold,
            controller,
            intersecting: HashMap::new(),
            pending: Vec::new(),
        }
    }

    /// Start tracking a video. Everything starts off-screen; the first
    /// ratio at or above the threshold produces an entering change.
    pub fn observe(&mut self, video: VideoId) {
        self.intersecting.entry(video).or_insert(false);
    }

    /// Feed the current intersection ratio of one video. Queues a change
    /// when the ratio moved across the threshold since the last report.
    pub fn record(&mut self, video: &VideoId, ratio: f64) {
        let Some(intersecting) = self.intersecting.get_mut(video) else {
            warn!(%video, "intersection ratio for a video that is not observed");
            return;
        };
        let now = ratio >= self.threshold;
        if now != *intersecting {
            *intersecting = now;
            self.pending.push(VisibilityChange {
                video: video.clone(),
                entering: now,
            });
        }
    }

    /// Deliver all queued changes to the controller as one batch. Nothing
    /// is sent when no video crossed the threshold.
    pub fn deliver(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let changes = std::mem::take(&mut self.pending);
        debug!(count = changes.len(), "delivering visibility changes");
        self.controller.visibility_changed(changes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fake::FakeVideo,
        media::MediaElement as _,
        registry::VideoRegistry,
        volume::VolumePreference,
    };
    use pretty_assertions::assert_eq;
    use std::{
        sync::Arc,
        time::Duration,
    };

    fn observer() -> ViewportObserver {
        let controller = PlaybackController::spawn(VideoRegistry::new(), VolumePreference::default());
        ViewportObserver::new(controller)
    }

    #[tokio::test]
    async fn reports_each_crossing_exactly_once() {
        let mut observer = observer();
        let video = VideoId::from("clip-1");
        observer.observe(video.clone());

        observer.record(&video, 0.9);
        observer.record(&video, 0.95);
        assert_eq!(
            observer.pending,
            vec![VisibilityChange {
                video: video.clone(),
                entering: true,
            }]
        );

        observer.record(&video, 0.4);
        assert_eq!(observer.pending.len(), 2);
        assert_eq!(
            observer.pending[1],
            VisibilityChange {
                video: video.clone(),
                entering: false,
            }
        );
    }

    #[tokio::test]
    async fn threshold_is_inclusive() {
        let mut observer = observer();
        let video = VideoId::from("clip-1");
        observer.observe(video.clone());

        observer.record(&video, 0.8);
        assert_eq!(observer.pending.len(), 1);
        assert!(observer.pending[0].entering);

        observer.record(&video, 0.79);
        assert_eq!(observer.pending.len(), 2);
        assert!(!observer.pending[1].entering);
    }

    #[tokio::test]
    async fn churn_below_the_threshold_stays_silent() {
        let mut observer = observer();
        let video = VideoId::from("clip-1");
        observer.observe(video.clone());

        observer.record(&video, 0.1);
        observer.record(&video, 0.5);
        observer.record(&video, 0.79);
        observer.deliver();

        assert!(observer.pending.is_empty());
    }

    #[tokio::test]
    async fn delivers_simultaneous_crossings_as_one_batch() {
        let registry = VideoRegistry::new();
        let first = FakeVideo::new();
        let second = FakeVideo::new();
        registry.bind(VideoId::from("clip-1"), Arc::new(first.clone()), None);
        registry.bind(VideoId::from("clip-2"), Arc::new(second.clone()), None);
        let controller = PlaybackController::spawn(registry, VolumePreference::default());
        let mut observer = ViewportObserver::new(controller);
        observer.observe(VideoId::from("clip-1"));
        observer.observe(VideoId::from("clip-2"));

        observer.record(&VideoId::from("clip-1"), 1.0);
        observer.record(&VideoId::from("clip-2"), 0.85);
        assert_eq!(observer.pending.len(), 2);

        observer.deliver();
        assert!(observer.pending.is_empty());

        let start = tokio::time::Instant::now();
        while (first.paused() || second.paused()) && start.elapsed() < Duration::from_secs(1) {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(!first.paused());
        assert!(!second.paused());
    }
}
