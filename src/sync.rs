/*!
 * Caption synchronization.
 *
 * Picks the caption that should be on screen for a playback instant. The
 * lookup shifts playback time by the user offset and then scans the captions
 * in file order; the first entry whose inclusive range contains the shifted
 * time wins, even when a later overlapping entry bounds it more tightly.
 */

use crate::subtitle_processor::{CaptionEntry, CaptionSequence};

/// Playback time shifted by the subtitle offset
pub fn effective_time(raw_playback_time: f64, offset: f64) -> f64 {
    raw_playback_time - offset
}

/// Index of the active caption in `sequence`, if any
pub fn active_caption_index(sequence: &CaptionSequence, raw_playback_time: f64, offset: f64) -> Option<usize> {
    let time = effective_time(raw_playback_time, offset);
    if !time.is_finite() {
        return None;
    }

    sequence.iter().position(|entry| entry.contains(time))
}

/// Caption visible at `raw_playback_time` with the given offset, if any
pub fn active_caption(sequence: &CaptionSequence, raw_playback_time: f64, offset: f64) -> Option<&CaptionEntry> {
    active_caption_index(sequence, raw_playback_time, offset).and_then(|index| sequence.get(index))
}
