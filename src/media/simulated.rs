/*!
 * Simulated media host.
 *
 * Stands in for a browser video element and fullscreen API. Requests change
 * the simulated state immediately, but the matching signals are only queued;
 * the owner drains them with [`SimulatedMedia::advance`] or
 * [`SimulatedMedia::take_signals`] and feeds them back to the player, the
 * same way a real host reports state changes asynchronously.
 */

use std::sync::Arc;
use parking_lot::Mutex;

use crate::errors::PlayerError;
use crate::media::{FullscreenPlatform, MediaResource, MediaSignal};

#[derive(Debug)]
struct SimulatedState {
    duration: f64,
    position: f64,
    playing: bool,
    volume: f64,
    muted: bool,
    fullscreen: bool,
    deny_fullscreen: bool,
    reject_play: bool,
    pending: Vec<MediaSignal>,
}

/// Simulated video element with a manually advanced clock
#[derive(Debug, Clone)]
pub struct SimulatedMedia {
    state: Arc<Mutex<SimulatedState>>,
}

impl SimulatedMedia {
    /// Create a paused media handle of the given duration.
    ///
    /// Metadata and an initial time update are queued right away.
    pub fn new(duration: f64) -> Self {
        let duration = duration.max(0.0);
        let state = SimulatedState {
            duration,
            position: 0.0,
            playing: false,
            volume: 1.0,
            muted: false,
            fullscreen: false,
            deny_fullscreen: false,
            reject_play: false,
            pending: vec![MediaSignal::MetadataLoaded(duration), MediaSignal::TimeUpdated(0.0)],
        };

        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Fullscreen platform sharing this handle's state
    pub fn fullscreen(&self) -> SimulatedFullscreen {
        SimulatedFullscreen {
            state: Arc::clone(&self.state),
        }
    }

    /// Make fullscreen requests fail the way a browser denies them
    pub fn set_deny_fullscreen(&self, deny: bool) {
        self.state.lock().deny_fullscreen = deny;
    }

    /// Make play requests fail, e.g. autoplay blocked
    pub fn set_reject_play(&self, reject: bool) {
        self.state.lock().reject_play = reject;
    }

    /// Move the clock forward by `elapsed` seconds and return every signal
    /// raised since the last drain.
    ///
    /// Playback stops with a `Paused` signal when the end is reached.
    pub fn advance(&self, elapsed: f64) -> Vec<MediaSignal> {
        let mut state = self.state.lock();
        let mut signals = std::mem::take(&mut state.pending);

        if state.playing && elapsed > 0.0 {
            state.position = (state.position + elapsed).min(state.duration);
            signals.push(MediaSignal::TimeUpdated(state.position));

            if state.position >= state.duration {
                state.playing = false;
                signals.push(MediaSignal::Paused);
            }
        }

        signals
    }

    /// Drain queued signals without moving the clock
    pub fn take_signals(&self) -> Vec<MediaSignal> {
        std::mem::take(&mut self.state.lock().pending)
    }

    pub fn is_playing(&self) -> bool {
        self.state.lock().playing
    }

    pub fn volume(&self) -> f64 {
        self.state.lock().volume
    }

    pub fn is_muted(&self) -> bool {
        self.state.lock().muted
    }

    pub fn is_fullscreen(&self) -> bool {
        self.state.lock().fullscreen
    }

    /// Whether the clock has reached the end of the media
    pub fn is_finished(&self) -> bool {
        let state = self.state.lock();
        state.position >= state.duration
    }
}

impl MediaResource for SimulatedMedia {
    fn play(&mut self) -> Result<(), PlayerError> {
        let mut state = self.state.lock();
        if state.reject_play {
            return Err(PlayerError::PlaybackRejected("simulated host refused to play".to_string()));
        }

        if !state.playing {
            // Playing from the end restarts from the beginning
            if state.duration > 0.0 && state.position >= state.duration {
                state.position = 0.0;
                state.pending.push(MediaSignal::TimeUpdated(0.0));
            }
            state.playing = true;
            state.pending.push(MediaSignal::Resumed);
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        let mut state = self.state.lock();
        if state.playing {
            state.playing = false;
            state.pending.push(MediaSignal::Paused);
        }
        Ok(())
    }

    fn seek_to(&mut self, time: f64) -> Result<(), PlayerError> {
        let mut state = self.state.lock();
        state.position = time.clamp(0.0, state.duration);
        let position = state.position;
        state.pending.push(MediaSignal::TimeUpdated(position));
        Ok(())
    }

    fn set_volume(&mut self, volume: f64) -> Result<(), PlayerError> {
        self.state.lock().volume = volume.clamp(0.0, 1.0);
        Ok(())
    }

    fn set_muted(&mut self, muted: bool) -> Result<(), PlayerError> {
        self.state.lock().muted = muted;
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.state.lock().position
    }

    fn duration(&self) -> Option<f64> {
        let duration = self.state.lock().duration;
        (duration > 0.0).then_some(duration)
    }
}

/// Simulated fullscreen API bound to a [`SimulatedMedia`]
#[derive(Debug, Clone)]
pub struct SimulatedFullscreen {
    state: Arc<Mutex<SimulatedState>>,
}

impl FullscreenPlatform for SimulatedFullscreen {
    fn request_fullscreen(&mut self) -> Result<(), PlayerError> {
        let mut state = self.state.lock();
        if state.deny_fullscreen {
            return Err(PlayerError::FullscreenDenied("simulated platform refused".to_string()));
        }

        if !state.fullscreen {
            state.fullscreen = true;
            state.pending.push(MediaSignal::FullscreenChanged(true));
        }
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), PlayerError> {
        let mut state = self.state.lock();
        if state.fullscreen {
            state.fullscreen = false;
            state.pending.push(MediaSignal::FullscreenChanged(false));
        }
        Ok(())
    }
}
