/*!
 * Data models for the playback session.
 *
 * This module defines:
 * - `PlaybackState`: the mirrored state of the media host plus UI flags
 * - `PlayerEvent`: every input the player reacts to, from host signals to
 *   control actions and file selection
 */

use serde::Serialize;
use std::path::PathBuf;

use crate::media::MediaSignal;
use crate::offset::OffsetStep;

/// Playback state as the controls see it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
    /// Mirrors the host's paused/playing signals
    pub paused: bool,

    pub muted: bool,

    /// Output volume in `[0, 1]`, kept while muted
    pub volume: f64,

    /// Last reported playback position in seconds
    pub current_time: f64,

    /// Media duration in seconds, 0 until metadata has loaded
    pub duration: f64,

    /// Position as a percentage of duration, 0 while duration is unknown
    pub progress: f64,

    /// Mirrors the platform's fullscreen notifications
    pub fullscreen: bool,

    pub controls_visible: bool,
}

impl PlaybackState {
    /// Initial state with the given volume
    pub fn with_volume(volume: f64) -> Self {
        Self {
            paused: true,
            muted: false,
            volume: volume.clamp(0.0, 1.0),
            current_time: 0.0,
            duration: 0.0,
            progress: 0.0,
            fullscreen: false,
            controls_visible: true,
        }
    }

    /// Whether the duration is usable for seek and progress math
    pub fn duration_known(&self) -> bool {
        self.duration.is_finite() && self.duration > 0.0
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::with_volume(1.0)
    }
}

/// Input to the player, processed one at a time
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// Signal reported by the media host
    Media(MediaSignal),

    /// Play/pause button or click on the video
    TogglePlay,

    /// Volume set directly, in `[0, 1]`
    SetVolume(f64),

    ToggleMute,

    /// Seek to a percentage of the duration
    Seek(f64),

    /// Click at `x` on a progress bar `width` wide
    SeekClick { x: f64, width: f64 },

    ToggleFullscreen,

    /// Add a signed delta (seconds) to the subtitle offset
    AdjustOffset(f64),

    /// One of the offset buttons
    ApplyOffsetStep(OffsetStep),

    ResetOffset,

    /// Pointer entered the visible caption
    CaptionHoverEnter,

    /// Pointer left the caption
    CaptionHoverLeave,

    /// Pointer moved anywhere inside the player container
    PointerMoved,

    /// Pointer pressed on the volume bar at this fraction of its width
    VolumeDragStart(f64),

    /// Pointer moved while a volume drag may be in progress
    VolumeDragMove(f64),

    /// Pointer released anywhere in the document
    VolumeDragEnd,

    /// Pointer pressed at `x` on a volume bar `width` wide
    VolumePointerDown { x: f64, width: f64 },

    /// Pointer moved to `x` relative to a volume bar `width` wide
    VolumePointerMove { x: f64, width: f64 },

    /// A video file was picked
    VideoSelected(PathBuf),

    /// A subtitle file was picked
    SubtitleSelected(PathBuf),

    /// Subtitle content supplied directly, e.g. from a reader callback
    SubtitleText(String),

    /// Tear the player down
    Shutdown,
}

impl From<MediaSignal> for PlayerEvent {
    fn from(signal: MediaSignal) -> Self {
        Self::Media(signal)
    }
}
