#[macro_use]
extern crate tracing;

pub mod controller;
pub mod fake;
pub mod indicator;
pub mod media;
pub mod observer;
pub mod registry;
pub mod volume;

pub use controller::PlaybackController;
pub use indicator::MuteIndicator;
pub use media::{
    MediaElement,
    PlaybackRejected,
};
pub use observer::{
    ViewportObserver,
    VisibilityChange,
};
pub use registry::{
    VideoId,
    VideoRegistry,
};
pub use volume::{
    VolumePreference,
    VolumeState,
};
