use serde::{
    Deserialize,
    Serialize,
};

/// One scripted interaction in a simulator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Scroll the feed to the given offset.
    Scroll(f64),
    /// Tap the mute control paired with this video.
    TapControl(String),
    /// Tap directly on this video's surface.
    TapVideo(String),
    /// Let the scenario idle for this many milliseconds.
    Wait(u64),
}

impl ScenarioStep {
    /// The video a step refers to, if any.
    pub fn video(&self) -> Option<&str> {
        match self {
            Self::TapControl(video) | Self::TapVideo(video) => Some(video),
            Self::Scroll(_) | Self::Wait(_) => None,
        }
    }
}
