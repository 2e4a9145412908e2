use crate::{
    indicator::MUTED_GLYPH,
    observer::VisibilityChange,
    registry::{
        VideoBinding,
        VideoId,
        VideoRegistry,
    },
    volume::{
        VolumePreference,
        VolumeState,
    },
};
use std::sync::Arc;
use tokio::sync::mpsc::{
    unbounded_channel,
    UnboundedReceiver,
    UnboundedSender,
};
use tokio_util::sync::{
    CancellationToken,
    DropGuard,
};

/// Messages consumed by the controller worker.
#[derive(Debug, Clone, derive_more::Display)]
pub enum PlayerMessage {
    #[display("visibility changes ({})", _0.len())]
    Visibility(Vec<VisibilityChange>),
    #[display("indicator tapped for {_0}")]
    IndicatorTapped(VideoId),
    #[display("surface tapped for {_0}")]
    SurfaceTapped(VideoId),
}

/// Viewport playback controller.
///
/// Cheap-to-clone handle over a spawned worker that owns the playback
/// decisions for every registered video. Dropping the last handle stops the
/// worker.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    sender: UnboundedSender<PlayerMessage>,
    _worker_guard: Arc<DropGuard>,
}

impl PlaybackController {
    /// Spawn the controller worker over a registry and the shared volume
    /// preference.
    pub fn spawn(registry: VideoRegistry, preference: VolumePreference) -> Self {
        let (sender, receiver) = unbounded_channel();
        let cancellation_token = CancellationToken::new();
        let cancellation_guard = cancellation_token.clone().drop_guard();

        let worker = ControllerWorker { registry, preference };
        tokio::task::spawn(async move {
            tokio::select! {
                biased;
                _ = cancellation_token.cancelled() => {},
                _ = worker.run(receiver) => {},
            }
            debug!("controller worker stopped");
        });

        Self {
            sender,
            _worker_guard: Arc::new(cancellation_guard),
        }
    }

    /// A batch of threshold crossings from the viewport observer.
    pub fn visibility_changed(&self, changes: Vec<VisibilityChange>) {
        self.send(PlayerMessage::Visibility(changes));
    }

    /// A tap landed on a mute control. The tap is fully absorbed by the
    /// control; it never doubles as a surface tap on the video underneath.
    pub fn tap_indicator(&self, video: VideoId) {
        self.send(PlayerMessage::IndicatorTapped(video));
    }

    /// A tap landed directly on a video surface.
    pub fn tap_surface(&self, video: VideoId) {
        self.send(PlayerMessage::SurfaceTapped(video));
    }

    fn send(&self, message: PlayerMessage) {
        if let Err(err) = self.sender.send(message) {
            error!("controller worker is gone, dropping message: {}", err.0);
        }
    }
}

/// Worker owning the playback decisions. Runs until the channel closes or
/// the last handle is dropped.
#[derive(Debug)]
struct ControllerWorker {
    registry: VideoRegistry,
    preference: VolumePreference,
}

impl ControllerWorker {
    async fn run(self, mut receiver: UnboundedReceiver<PlayerMessage>) {
        while let Some(message) = receiver.recv().await {
            debug!("handling {message}");
            match message {
                PlayerMessage::Visibility(changes) => self.handle_visibility(changes),
                PlayerMessage::IndicatorTapped(video) => self.toggle_mute(&video),
                PlayerMessage::SurfaceTapped(video) => self.toggle_playback(&video),
            }
        }
    }

    /// Entries within a batch carry no ordering guarantee; each branch is
    /// self-contained.
    fn handle_visibility(&self, changes: Vec<VisibilityChange>) {
        for change in changes {
            let Some(binding) = self.registry.get(&change.video) else {
                warn!(video = %change.video, "visibility change for an unknown video");
                continue;
            };
            if change.entering {
                self.video_entered(&change.video, &binding);
            } else {
                self.video_left(&change.video, &binding);
            }
        }
    }

    /// The video is now sufficiently visible: apply the remembered volume
    /// preference and try to start it.
    fn video_entered(&self, video: &VideoId, binding: &VideoBinding) {
        let preference = self.preference.get();
        binding.media.set_muted(preference.is_muted());
        if let Some(control) = &binding.control {
            control.indicator.set_glyph(preference.glyph());
        }
        debug!(%video, %preference, "starting playback");
        Self::request_play(video, binding);
    }

    /// The video is no longer sufficiently visible. Its mute state is
    /// remembered before anything else is touched, then the video is
    /// parked: paused, muted, rewound to the start.
    fn video_left(&self, video: &VideoId, binding: &VideoBinding) {
        self.preference.set(VolumeState::from_muted(binding.media.muted()));
        binding.media.pause();
        binding.media.set_muted(true);
        if let Some(control) = &binding.control {
            control.indicator.set_glyph(MUTED_GLYPH);
        }
        binding.media.rewind();
        debug!(%video, preference = %self.preference.get(), "video parked");
    }

    /// Invert the video's mute state and record the choice as the new
    /// preference, in that order.
    fn toggle_mute(&self, video: &VideoId) {
        let Some(binding) = self.registry.get(video) else {
            warn!(%video, "indicator tap for an unknown video");
            return;
        };
        let muted = !binding.media.muted();
        binding.media.set_muted(muted);
        let state = VolumeState::from_muted(muted);
        if let Some(control) = &binding.control {
            control.indicator.set_glyph(state.glyph());
        }
        self.preference.set(state);
        debug!(%video, %state, "mute toggled");
    }

    fn toggle_playback(&self, video: &VideoId) {
        let Some(binding) = self.registry.get(video) else {
            warn!(%video, "surface tap for an unknown video");
            return;
        };
        if binding.media.paused() {
            Self::request_play(video, &binding);
        } else {
            binding.media.pause();
        }
    }

    /// Kick off a play request and route its eventual rejection to the log.
    /// The completion task never touches player state, so a stale result
    /// arriving after the video already left the viewport has no effect.
    fn request_play(video: &VideoId, binding: &VideoBinding) {
        let outcome = binding.media.play();
        let video = video.clone();
        tokio::task::spawn(async move {
            if let Err(err) = outcome.await {
                error!(%video, "playback start rejected: {err}");
            }
        });
    }
}
