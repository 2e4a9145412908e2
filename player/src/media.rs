use futures::future::BoxFuture;

/// Deferred outcome of a playback start request. The host resolves it once
/// playback actually starts, or rejects it at some later point.
pub type PlayOutcome = BoxFuture<'static, Result<(), PlaybackRejected>>;

/// A playback start request was denied by the host.
///
/// Handled next to the play call: logged, dropped, never retried. The video
/// simply stays paused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackRejected {
    #[error("autoplay was blocked by the playback policy")]
    AutoplayPolicy,
    #[error("the play request was interrupted by a pause")]
    Interrupted,
}

/// Control surface of a single video element.
///
/// The controller only flips attributes and issues play/pause requests;
/// creating and destroying the elements is the host's business.
pub trait MediaElement: std::fmt::Debug + Send + Sync {
    /// Request playback. Starting is asynchronous and the host may reject
    /// the request, commonly because of an autoplay policy.
    fn play(&self) -> PlayOutcome;

    fn pause(&self);

    fn paused(&self) -> bool;

    fn muted(&self) -> bool;

    fn set_muted(&self, muted: bool);

    /// Reset the playback position to the start.
    fn rewind(&self);
}
