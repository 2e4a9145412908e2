use crate::{
    indicator::MuteIndicator,
    media::MediaElement,
};
use std::{
    collections::HashMap,
    sync::{
        Arc,
        Mutex,
    },
};

/// Identifier of a video surface in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl From<&str> for VideoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Identifier of a mute toggle control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub struct ControlId(String);

impl ControlId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Mute control paired with one video.
#[derive(Debug, Clone)]
pub struct ControlBinding {
    pub id: ControlId,
    pub indicator: Arc<dyn MuteIndicator>,
}

/// A managed video surface together with its (optional) mute control.
#[derive(Debug, Clone)]
pub struct VideoBinding {
    pub media: Arc<dyn MediaElement>,
    pub control: Option<ControlBinding>,
}

/// All videos under playback management, each bound to its control.
///
/// The video-to-control pairing is built once, up front. A video without a
/// control stays fully managed; only glyph updates are skipped for it.
#[derive(Debug, Default, Clone)]
pub struct VideoRegistry {
    inner: Arc<Mutex<HashMap<VideoId, VideoBinding>>>,
}

impl VideoRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&self, video: VideoId, media: Arc<dyn MediaElement>, control: Option<ControlBinding>) {
        self.inner.lock().unwrap().insert(video, VideoBinding { media, control });
    }

    pub fn get(&self, video: &VideoId) -> Option<VideoBinding> {
        self.inner.lock().unwrap().get(video).cloned()
    }

    pub fn ids(&self) -> Vec<VideoId> {
        self.inner.lock().unwrap().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}
