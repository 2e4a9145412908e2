#[macro_use]
extern crate tracing;

mod args;
mod scenario;

pub use args::Args;
pub use scenario::ScenarioStep;

use eyre::{
    eyre,
    Context as _,
    Result,
};
use serde::{
    Deserialize,
    Serialize,
};
use serde_yml::with::singleton_map_recursive;
use std::{
    collections::HashMap,
    path::Path,
};

const DEFAULT_CONFIG: &str = include_str!("default-config.yaml");

/// Scenario configuration for one simulator run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedLayout,
    /// Fraction of a video's area that must be visible before it counts as
    /// intersecting.
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f64,
    /// Grace period after every step, letting the controller worker drain
    /// before the state report.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    pub videos: Vec<VideoSpec>,
    #[serde(default, with = "singleton_map_recursive")]
    pub scenario: Vec<ScenarioStep>,
}

fn default_visibility_threshold() -> f64 {
    0.8
}

fn default_settle_ms() -> u64 {
    50
}

/// Vertical geometry of the simulated feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeedLayout {
    /// Height of the visible viewport.
    pub viewport_height: f64,
    /// Height of every video item.
    pub item_height: f64,
    /// Vertical gap between adjacent items.
    #[serde(default)]
    pub item_gap: f64,
}

impl Default for FeedLayout {
    fn default() -> Self {
        Self {
            viewport_height: 800.0,
            item_height: 600.0,
            item_gap: 40.0,
        }
    }
}

/// One video in the feed, top to bottom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSpec {
    pub id: String,
    /// Mute control paired with this video. Videos without a control are
    /// still managed; they just have no glyph to update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<String>,
    /// Whether the host lets this video start playback on its own.
    #[serde(default = "default_true")]
    pub autoplay_allowed: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        serde_yml::from_str(DEFAULT_CONFIG).expect("Failed to parse default config")
    }
}

pub fn parse_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario config {}", path.display()))?;
    let config = serde_yml::from_str::<Config>(&content).context("failed to parse scenario config")?;
    debug!(path = %path.display(), "parsed scenario config");
    Ok(config)
}

impl Config {
    pub fn load(args: &Args) -> Result<Self> {
        let config = match &args.config {
            Some(path) => parse_config(path)?,
            None => {
                debug!("no config given, using the built-in demo scenario");
                Self::default()
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.videos.is_empty() {
            return Err(eyre!("config.videos must be non-empty"));
        }
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(eyre!("visibility_threshold must be between 0.0 and 1.0"));
        }
        if self.feed.viewport_height <= 0.0 || self.feed.item_height <= 0.0 {
            return Err(eyre!("feed dimensions must be positive"));
        }

        let mut controls = HashMap::new();
        for video in &self.videos {
            if controls.insert(video.id.as_str(), video.control.is_some()).is_some() {
                return Err(eyre!("duplicate video id: {}", video.id));
            }
        }
        for step in &self.scenario {
            if let Some(video) = step.video() {
                if !controls.contains_key(video) {
                    return Err(eyre!("scenario step refers to unknown video: {video}"));
                }
            }
            if let ScenarioStep::TapControl(video) = step {
                if controls.get(video.as_str()) == Some(&false) {
                    return Err(eyre!("video {video} has no mute control to tap"));
                }
            }
        }
        Ok(())
    }
}
