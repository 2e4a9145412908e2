use crate::indicator::{
    MUTED_GLYPH,
    SOUND_ON_GLYPH,
};
use std::sync::{
    Arc,
    Mutex,
};

/// The remembered mute state, carried from the last video that left the
/// viewport (or the last explicit toggle) to the next video that enters it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum VolumeState {
    /// Hosts only allow autoplay for silent media, so everything starts
    /// muted.
    #[default]
    #[strum(serialize = "muted")]
    Muted,
    #[strum(serialize = "unmuted")]
    Unmuted,
}

impl VolumeState {
    pub fn from_muted(muted: bool) -> Self {
        if muted {
            Self::Muted
        } else {
            Self::Unmuted
        }
    }

    pub fn is_muted(self) -> bool {
        matches!(self, Self::Muted)
    }

    /// The indicator glyph matching this state.
    pub fn glyph(self) -> char {
        match self {
            Self::Muted => MUTED_GLYPH,
            Self::Unmuted => SOUND_ON_GLYPH,
        }
    }
}

/// Shared volume preference, handed to the controller at construction and
/// read/written through clones of the same handle.
#[derive(Debug, Default, Clone)]
pub struct VolumePreference {
    inner: Arc<Mutex<VolumeState>>,
}

impl VolumePreference {
    pub fn get(&self) -> VolumeState {
        *self.inner.lock().unwrap()
    }

    pub fn set(&self, state: VolumeState) {
        *self.inner.lock().unwrap() = state;
    }
}
