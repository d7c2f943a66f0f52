/*!
 * Pointer interactions that mutate playback state.
 *
 * This module covers three behaviors:
 * - Hover-to-pause: hovering the caption pauses playback, leaving resumes it,
 *   unless the user took over play/pause in between
 * - Idle controls: pointer movement shows the controls, and they hide again
 *   after a period without movement (debounced)
 * - Volume drag: a press on the volume bar starts a drag that follows the
 *   pointer until it is released anywhere
 */

use log::debug;
use tokio::time::{Duration, Instant};

use crate::media::MediaRequest;
use crate::session::PlaybackSession;

/// Default inactivity delay before the controls hide
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_millis(3000);

/// Tracks hover, idle and drag state next to a [`PlaybackSession`]
#[derive(Debug, Clone)]
pub struct InteractionCoordinator {
    /// Set only when playback was paused by hovering the caption
    auto_paused_by_hover: bool,
    idle_timeout: Duration,
    idle_deadline: Option<Instant>,
    volume_drag_active: bool,
}

impl Default for InteractionCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT)
    }
}

impl InteractionCoordinator {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            auto_paused_by_hover: false,
            idle_timeout,
            idle_deadline: None,
            volume_drag_active: false,
        }
    }

    pub fn auto_paused_by_hover(&self) -> bool {
        self.auto_paused_by_hover
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// When the controls will hide, if a timer is pending
    pub fn idle_deadline(&self) -> Option<Instant> {
        self.idle_deadline
    }

    pub fn volume_drag_active(&self) -> bool {
        self.volume_drag_active
    }

    // =========================================================================
    // Hover-to-pause
    // =========================================================================

    /// Pointer entered the caption; pauses only a playing session
    pub fn hover_enter(&mut self, session: &PlaybackSession) -> Vec<MediaRequest> {
        if session.active_caption().is_none() || session.state().paused {
            return Vec::new();
        }

        debug!("Pausing for caption hover");
        self.auto_paused_by_hover = true;
        vec![MediaRequest::Pause]
    }

    /// Pointer left the caption; resumes only if the hover caused the pause
    pub fn hover_leave(&mut self) -> Vec<MediaRequest> {
        if !self.auto_paused_by_hover {
            return Vec::new();
        }

        debug!("Resuming after caption hover");
        self.auto_paused_by_hover = false;
        vec![MediaRequest::Play]
    }

    /// The user pressed play/pause; from now on hover-leave must not resume
    pub fn user_toggled_play(&mut self) {
        self.auto_paused_by_hover = false;
    }

    /// Forget a hover pause and any drag that belonged to the previous media
    pub fn reset_media_gestures(&mut self) {
        self.auto_paused_by_hover = false;
        self.volume_drag_active = false;
    }

    // =========================================================================
    // Idle controls
    // =========================================================================

    /// Show the controls and restart the inactivity timer from `now`
    pub fn pointer_moved(&mut self, now: Instant, session: &mut PlaybackSession) -> Instant {
        session.set_controls_visible(true);
        let deadline = now + self.idle_timeout;
        self.idle_deadline = Some(deadline);
        deadline
    }

    /// Hide the controls if the pending timer has expired by `now`.
    ///
    /// Returns whether the controls were hidden.
    pub fn poll_idle(&mut self, now: Instant, session: &mut PlaybackSession) -> bool {
        match self.idle_deadline {
            Some(deadline) if now >= deadline => {
                self.idle_deadline = None;
                session.set_controls_visible(false);
                true
            }
            _ => false,
        }
    }

    // =========================================================================
    // Volume drag
    // =========================================================================

    /// Press on the volume bar: set volume and start following the pointer
    pub fn begin_volume_drag(&mut self, fraction: f64, session: &mut PlaybackSession) -> Vec<MediaRequest> {
        self.volume_drag_active = true;
        session.set_volume(fraction)
    }

    /// Pointer moved; only changes volume while a drag is active
    pub fn volume_drag_move(&mut self, fraction: f64, session: &mut PlaybackSession) -> Vec<MediaRequest> {
        if !self.volume_drag_active {
            return Vec::new();
        }
        session.set_volume(fraction)
    }

    /// Pointer released anywhere, inside the bar or not
    pub fn end_volume_drag(&mut self) {
        self.volume_drag_active = false;
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Drop every pending timer and gesture
    pub fn teardown(&mut self) {
        self.idle_deadline = None;
        self.volume_drag_active = false;
        self.auto_paused_by_hover = false;
    }
}
