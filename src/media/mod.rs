/*!
 * Boundary between the player core and the host media stack.
 *
 * The core never drives a real video element directly. It emits
 * [`MediaRequest`]s, which are applied to a [`MediaResource`] and a
 * [`FullscreenPlatform`], and it learns what actually happened from the
 * [`MediaSignal`]s the host reports back:
 * - `MediaResource`: the opaque playable video handle
 * - `FullscreenPlatform`: fullscreen enter/exit on the player container
 * - `simulated`: an in-process clock used by the CLI and tests
 */

use std::fmt::Debug;

use crate::errors::PlayerError;

pub mod simulated;

pub use simulated::{SimulatedFullscreen, SimulatedMedia};

/// Opaque playable media handle
///
/// Requests are fire-and-forget: a successful `play()` does not mean playback
/// started, only that the host accepted the request. The confirmation arrives
/// later as a [`MediaSignal::Resumed`].
pub trait MediaResource: Send + Debug {
    /// Ask the host to start playback
    fn play(&mut self) -> Result<(), PlayerError>;

    /// Ask the host to pause playback
    fn pause(&mut self) -> Result<(), PlayerError>;

    /// Jump to an absolute position in seconds
    fn seek_to(&mut self, time: f64) -> Result<(), PlayerError>;

    /// Set output volume in `[0, 1]`
    fn set_volume(&mut self, volume: f64) -> Result<(), PlayerError>;

    fn set_muted(&mut self, muted: bool) -> Result<(), PlayerError>;

    /// Current playback position in seconds
    fn current_time(&self) -> f64;

    /// Media duration in seconds, `None` until metadata has loaded
    fn duration(&self) -> Option<f64>;
}

/// Host fullscreen API for the player container
pub trait FullscreenPlatform: Send + Debug {
    fn request_fullscreen(&mut self) -> Result<(), PlayerError>;

    fn exit_fullscreen(&mut self) -> Result<(), PlayerError>;
}

/// Notifications reported by the host
#[derive(Debug, Clone, PartialEq)]
pub enum MediaSignal {
    /// Playback clock moved to this position (seconds)
    TimeUpdated(f64),
    /// Metadata is available; carries the duration in seconds
    MetadataLoaded(f64),
    /// Playback is now paused
    Paused,
    /// Playback is now running
    Resumed,
    /// Fullscreen state as reported by the platform
    FullscreenChanged(bool),
}

/// Side effect the core wants performed on the host
#[derive(Debug, Clone, PartialEq)]
pub enum MediaRequest {
    Play,
    Pause,
    SeekTo(f64),
    SetVolume(f64),
    SetMuted(bool),
    RequestFullscreen,
    ExitFullscreen,
}

impl MediaRequest {
    /// Perform this request against the host
    pub fn apply(
        &self,
        media: &mut dyn MediaResource,
        platform: &mut dyn FullscreenPlatform,
    ) -> Result<(), PlayerError> {
        match self {
            Self::Play => media.play(),
            Self::Pause => media.pause(),
            Self::SeekTo(time) => media.seek_to(*time),
            Self::SetVolume(volume) => media.set_volume(*volume),
            Self::SetMuted(muted) => media.set_muted(*muted),
            Self::RequestFullscreen => platform.request_fullscreen(),
            Self::ExitFullscreen => platform.exit_fullscreen(),
        }
    }
}
