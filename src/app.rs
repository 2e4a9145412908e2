use crate::feed::Feed;
use eyre::Result;
use scrollfeed_config::{
    Args,
    Config,
    ScenarioStep,
};
use scrollfeed_player::{
    fake::{
        AutoplayPolicy,
        FakeIndicator,
        FakeVideo,
    },
    registry::{
        ControlBinding,
        ControlId,
    },
    MediaElement as _,
    PlaybackController,
    VideoId,
    VideoRegistry,
    ViewportObserver,
    VolumePreference,
};
use std::{
    collections::HashMap,
    sync::Arc,
    time::Duration,
};

/// Scripted simulator run: builds a fake feed from the config and drives
/// the playback controller through the scenario, reporting every video's
/// state after each step.
pub struct App {
    config: Config,
    feed: Feed,
    preference: VolumePreference,
    controller: PlaybackController,
    observer: ViewportObserver,
    /// Feed order, top to bottom.
    order: Vec<VideoId>,
    videos: HashMap<VideoId, FakeVideo>,
    indicators: HashMap<VideoId, FakeIndicator>,
}

impl App {
    pub fn new(args: Args) -> Result<Self> {
        let config = Config::load(&args)?;
        let feed = Feed::new(config.feed);
        let preference = VolumePreference::default();

        let registry = VideoRegistry::new();
        let mut order = Vec::new();
        let mut videos = HashMap::new();
        let mut indicators = HashMap::new();
        for spec in &config.videos {
            let id = VideoId::new(&spec.id);
            let policy = if spec.autoplay_allowed {
                AutoplayPolicy::Allow
            } else {
                AutoplayPolicy::Block
            };
            let video = FakeVideo::with_policy(policy);
            let control = spec.control.as_ref().map(|control| {
                let indicator = FakeIndicator::new();
                indicators.insert(id.clone(), indicator.clone());
                ControlBinding {
                    id: ControlId::new(control),
                    indicator: Arc::new(indicator),
                }
            });
            registry.bind(id.clone(), Arc::new(video.clone()), control);
            videos.insert(id.clone(), video);
            order.push(id);
        }

        let controller = PlaybackController::spawn(registry, preference.clone());
        let mut observer = ViewportObserver::with_threshold(config.visibility_threshold, controller.clone());
        for id in &order {
            observer.observe(id.clone());
        }

        Ok(Self {
            config,
            feed,
            preference,
            controller,
            observer,
            order,
            videos,
            indicators,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        info!(
            videos = self.order.len(),
            steps = self.config.scenario.len(),
            "starting scenario"
        );

        let steps = self.config.scenario.clone();
        for (index, step) in steps.iter().enumerate() {
            info!("step {}/{}: {:?}", index + 1, steps.len(), step);
            match step {
                ScenarioStep::Scroll(offset) => self.scroll_to(*offset),
                ScenarioStep::TapControl(video) => self.controller.tap_indicator(VideoId::new(video)),
                ScenarioStep::TapVideo(video) => self.controller.tap_surface(VideoId::new(video)),
                ScenarioStep::Wait(ms) => self.idle(Duration::from_millis(*ms)).await,
            }
            self.settle().await;
            self.report();
        }

        info!(preference = %self.preference.get(), "scenario finished");
        Ok(())
    }

    /// Report every video's intersection ratio at the new offset, then
    /// deliver the crossings as one batch.
    fn scroll_to(&mut self, offset: f64) {
        debug!(offset, "scrolling feed");
        for (index, id) in self.order.iter().enumerate() {
            let ratio = self.feed.intersection_ratio(index, offset);
            self.observer.record(id, ratio);
        }
        self.observer.deliver();
    }

    /// Let wall-clock and playhead time pass.
    async fn idle(&self, duration: Duration) {
        for video in self.videos.values() {
            video.advance(duration);
        }
        tokio::time::sleep(duration).await;
    }

    async fn settle(&self) {
        tokio::time::sleep(Duration::from_millis(self.config.settle_ms)).await;
    }

    fn report(&self) {
        for id in &self.order {
            let Some(video) = self.videos.get(id) else {
                continue;
            };
            let glyph = self
                .indicators
                .get(id)
                .and_then(|indicator| indicator.glyph())
                .map(String::from)
                .unwrap_or_else(|| "-".to_string());
            info!(
                video = %id,
                paused = video.paused(),
                muted = video.muted(),
                position_ms = video.position().as_millis() as u64,
                glyph = %glyph,
                "state"
            );
        }
    }
}
