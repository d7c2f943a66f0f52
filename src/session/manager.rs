/*!
 * Playback session.
 *
 * This module handles:
 * - Holding the mirrored playback state and the loaded captions
 * - Turning control actions into media requests
 * - Reconciling state from host signals
 * - Refreshing the active caption on every time update
 *
 * Every operation is a state transition that returns the requests it wants
 * the host to perform. `paused` and `fullscreen` are never set here on a user
 * action; they only change when the host's signal arrives.
 */

use log::{debug, trace};

use crate::media::{MediaRequest, MediaSignal};
use crate::subtitle_processor::{CaptionEntry, CaptionSequence};
use crate::sync;

use super::models::PlaybackState;

/// Owns playback state, captions and the current offset
#[derive(Debug, Clone, Default)]
pub struct PlaybackSession {
    state: PlaybackState,
    captions: CaptionSequence,
    offset: f64,
    active_index: Option<usize>,
}

impl PlaybackSession {
    /// Create a session with default state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session starting at the given volume
    pub fn with_volume(volume: f64) -> Self {
        Self {
            state: PlaybackState::with_volume(volume),
            ..Self::default()
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn captions(&self) -> &CaptionSequence {
        &self.captions
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Caption currently on screen
    pub fn active_caption(&self) -> Option<&CaptionEntry> {
        self.active_index.and_then(|index| self.captions.get(index))
    }

    // =========================================================================
    // Captions and offset
    // =========================================================================

    /// Replace the caption sequence wholesale
    pub fn load_captions(&mut self, captions: CaptionSequence) {
        debug!("Loaded {} captions", captions.len());
        self.captions = captions;
        self.refresh_active_caption();
    }

    /// Store a new offset and re-evaluate the active caption
    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
        self.refresh_active_caption();
    }

    fn refresh_active_caption(&mut self) {
        self.active_index = sync::active_caption_index(&self.captions, self.state.current_time, self.offset);
    }

    // =========================================================================
    // Control actions
    // =========================================================================

    /// Request play when paused, pause otherwise
    pub fn toggle_play(&self) -> Vec<MediaRequest> {
        if self.state.paused {
            vec![MediaRequest::Play]
        } else {
            vec![MediaRequest::Pause]
        }
    }

    /// Set the volume; zero mutes, anything above zero unmutes
    pub fn set_volume(&mut self, volume: f64) -> Vec<MediaRequest> {
        let volume = if volume.is_finite() { volume.clamp(0.0, 1.0) } else { 0.0 };
        self.state.volume = volume;

        let mut requests = vec![MediaRequest::SetVolume(volume)];
        if volume == 0.0 {
            if !self.state.muted {
                self.state.muted = true;
                requests.push(MediaRequest::SetMuted(true));
            }
        } else if self.state.muted {
            self.state.muted = false;
            requests.push(MediaRequest::SetMuted(false));
        }
        requests
    }

    /// Flip mute without touching the stored volume
    pub fn toggle_mute(&mut self) -> Vec<MediaRequest> {
        self.state.muted = !self.state.muted;
        vec![MediaRequest::SetMuted(self.state.muted)]
    }

    /// Seek to `percentage` of the duration; no-op while duration is unknown
    pub fn seek(&self, percentage: f64) -> Vec<MediaRequest> {
        if !self.state.duration_known() || !percentage.is_finite() {
            debug!("Ignoring seek to {}% with unknown duration", percentage);
            return Vec::new();
        }

        let time = percentage / 100.0 * self.state.duration;
        vec![MediaRequest::SeekTo(time)]
    }

    /// Enter fullscreen when windowed, exit otherwise
    pub fn toggle_fullscreen(&self) -> Vec<MediaRequest> {
        if self.state.fullscreen {
            vec![MediaRequest::ExitFullscreen]
        } else {
            vec![MediaRequest::RequestFullscreen]
        }
    }

    pub fn set_controls_visible(&mut self, visible: bool) {
        self.state.controls_visible = visible;
    }

    // =========================================================================
    // Host signals
    // =========================================================================

    /// Reconcile state from a host signal
    pub fn handle_signal(&mut self, signal: &MediaSignal) {
        match signal {
            MediaSignal::TimeUpdated(time) => self.on_time_update(*time),
            MediaSignal::MetadataLoaded(duration) => self.on_loaded_metadata(*duration),
            MediaSignal::Paused => self.state.paused = true,
            MediaSignal::Resumed => self.state.paused = false,
            MediaSignal::FullscreenChanged(fullscreen) => self.state.fullscreen = *fullscreen,
        }
    }

    fn on_time_update(&mut self, time: f64) {
        self.state.current_time = time;
        self.state.progress = if self.state.duration_known() {
            time / self.state.duration * 100.0
        } else {
            0.0
        };
        self.refresh_active_caption();
        trace!("Time update {:.3}s, active caption {:?}", time, self.active_index);
    }

    fn on_loaded_metadata(&mut self, duration: f64) {
        debug!("Media metadata loaded, duration {:.3}s", duration);
        self.state.duration = duration;
    }
}
