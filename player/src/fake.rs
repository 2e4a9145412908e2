use crate::{
    indicator::MuteIndicator,
    media::{
        MediaElement,
        PlayOutcome,
        PlaybackRejected,
    },
};
use std::{
    sync::{
        Arc,
        Mutex,
    },
    time::Duration,
};
use tokio::sync::oneshot;

/// Autoplay stance of a [`FakeVideo`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayPolicy {
    /// Play requests start playback immediately.
    #[default]
    Allow,
    /// Play requests are rejected, like a host refusing autoplay.
    Block,
    /// Play requests stay pending until released or interrupted.
    Defer,
}

/// In-memory stand-in for a host video element, for the simulator and for
/// tests. Clones share the same element state.
#[derive(Debug, Default, Clone)]
pub struct FakeVideo {
    inner: Arc<Mutex<FakeVideoInner>>,
}

#[derive(Debug)]
struct FakeVideoInner {
    muted: bool,
    paused: bool,
    position: Duration,
    policy: AutoplayPolicy,
    pending: Vec<oneshot::Sender<Result<(), PlaybackRejected>>>,
}

impl Default for FakeVideoInner {
    fn default() -> Self {
        Self {
            muted: false,
            paused: true,
            position: Duration::ZERO,
            policy: AutoplayPolicy::default(),
            pending: Vec::new(),
        }
    }
}

impl FakeVideo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: AutoplayPolicy) -> Self {
        let video = Self::default();
        video.inner.lock().unwrap().policy = policy;
        video
    }

    /// Resolve all held play requests successfully, as the host would when
    /// deferred playback finally starts.
    pub fn release_pending_plays(&self) {
        let pending = {
            let mut inner = self.inner.lock().unwrap();
            let pending = std::mem::take(&mut inner.pending);
            if !pending.is_empty() {
                inner.paused = false;
            }
            pending
        };
        for sender in pending {
            let _ = sender.send(Ok(()));
        }
    }

    pub fn position(&self) -> Duration {
        self.inner.lock().unwrap().position
    }

    /// Move the playhead forward, as if `by` passed while playing. Paused
    /// videos do not advance.
    pub fn advance(&self, by: Duration) {
        let mut inner = self.inner.lock().unwrap();
        if !inner.paused {
            inner.position += by;
        }
    }
}

impl MediaElement for FakeVideo {
    fn play(&self) -> PlayOutcome {
        let mut inner = self.inner.lock().unwrap();
        match inner.policy {
            AutoplayPolicy::Allow => {
                inner.paused = false;
                Box::pin(futures::future::ready(Ok(())))
            }
            AutoplayPolicy::Block => Box::pin(futures::future::ready(Err(PlaybackRejected::AutoplayPolicy))),
            AutoplayPolicy::Defer => {
                let (sender, receiver) = oneshot::channel();
                inner.pending.push(sender);
                Box::pin(async move { receiver.await.unwrap_or(Err(PlaybackRejected::Interrupted)) })
            }
        }
    }

    fn pause(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.paused = true;
        // A pause rejects whatever play requests are still in flight.
        for sender in inner.pending.drain(..) {
            let _ = sender.send(Err(PlaybackRejected::Interrupted));
        }
    }

    fn paused(&self) -> bool {
        self.inner.lock().unwrap().paused
    }

    fn muted(&self) -> bool {
        self.inner.lock().unwrap().muted
    }

    fn set_muted(&self, muted: bool) {
        self.inner.lock().unwrap().muted = muted;
    }

    fn rewind(&self) {
        self.inner.lock().unwrap().position = Duration::ZERO;
    }
}

/// In-memory mute control that remembers the glyph it currently shows.
#[derive(Debug, Default, Clone)]
pub struct FakeIndicator {
    glyph: Arc<Mutex<Option<char>>>,
}

impl FakeIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn glyph(&self) -> Option<char> {
        *self.glyph.lock().unwrap()
    }
}

impl MuteIndicator for FakeIndicator {
    fn set_glyph(&self, glyph: char) {
        *self.glyph.lock().unwrap() = Some(glyph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn pause_rejects_play_requests_in_flight() {
        let video = FakeVideo::with_policy(AutoplayPolicy::Defer);
        let outcome = video.play();

        video.pause();

        assert_eq!(outcome.await, Err(PlaybackRejected::Interrupted));
        assert!(video.paused());
    }

    #[tokio::test]
    async fn released_play_requests_start_playback() {
        let video = FakeVideo::with_policy(AutoplayPolicy::Defer);
        let outcome = video.play();
        assert!(video.paused());

        video.release_pending_plays();

        assert_eq!(outcome.await, Ok(()));
        assert!(!video.paused());
    }

    #[test]
    fn advances_only_while_playing() {
        let video = FakeVideo::new();
        video.advance(Duration::from_secs(1));
        assert_eq!(video.position(), Duration::ZERO);

        let _ = video.play();
        video.advance(Duration::from_secs(1));
        assert_eq!(video.position(), Duration::from_secs(1));

        video.rewind();
        assert_eq!(video.position(), Duration::ZERO);
    }
}
