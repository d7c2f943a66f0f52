// @module: Helpers shared by the playback controls

use crate::session::PlaybackState;

/// Format seconds as `MM:SS`; minutes keep counting past 59
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Elapsed and total time, e.g. `01:05 / 42:10`
pub fn clock_label(state: &PlaybackState) -> String {
    let elapsed = state.duration * (state.progress / 100.0);
    format!("{} / {}", format_clock(elapsed), format_clock(state.duration))
}

// @returns: Pointer position as a fraction of the bar, clamped to [0, 1]
fn bar_fraction(x: f64, width: f64) -> f64 {
    if !width.is_finite() || width <= 0.0 || !x.is_finite() {
        return 0.0;
    }
    x.clamp(0.0, width) / width
}

/// Volume for a pointer at `x` on a volume bar of `width`
pub fn volume_from_pointer(x: f64, width: f64) -> f64 {
    bar_fraction(x, width)
}

/// Whole-percent volume preview shown while hovering the volume bar
pub fn hover_volume_percent(x: f64, width: f64) -> u8 {
    (bar_fraction(x, width) * 100.0).round() as u8
}

/// Seek percentage for a click at `x` on a progress bar of `width`
pub fn progress_from_pointer(x: f64, width: f64) -> f64 {
    bar_fraction(x, width) * 100.0
}

/// Time preview (seconds) shown while hovering the progress bar
pub fn hover_progress_time(x: f64, width: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 {
        return 0.0;
    }
    bar_fraction(x, width) * duration
}
