/// Glyph shown while the paired video is muted.
pub const MUTED_GLYPH: char = '🔇';

/// Glyph shown while the paired video has sound.
pub const SOUND_ON_GLYPH: char = '🔊';

/// Mute toggle control paired with a video.
///
/// The displayed glyph is a derived cache of the video's `muted` attribute
/// and gets rewritten every time `muted` changes, through whichever path.
pub trait MuteIndicator: std::fmt::Debug + Send + Sync {
    fn set_glyph(&self, glyph: char);
}
