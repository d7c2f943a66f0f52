/*!
 * Tests for the playback session
 */

use subplayer::media::{MediaRequest, MediaSignal};
use subplayer::session::PlaybackSession;
use subplayer::subtitle_processor::parse_srt;
use crate::common;

#[test]
fn test_new_shouldStartPausedWithFullVolume() {
    let session = PlaybackSession::new();
    let state = session.state();

    assert!(state.paused);
    assert!(!state.muted);
    assert_eq!(state.volume, 1.0);
    assert!(state.controls_visible);
    assert!(!state.fullscreen);
    assert_eq!(state.progress, 0.0);
}

#[test]
fn test_setVolume_zeroThenHalf_shouldMuteThenUnmute() {
    let mut session = PlaybackSession::new();

    let requests = session.set_volume(0.0);
    assert!(session.state().muted);
    assert_eq!(requests, vec![MediaRequest::SetVolume(0.0), MediaRequest::SetMuted(true)]);

    let requests = session.set_volume(0.5);
    assert!(!session.state().muted);
    assert_eq!(session.state().volume, 0.5);
    assert_eq!(requests, vec![MediaRequest::SetVolume(0.5), MediaRequest::SetMuted(false)]);
}

#[test]
fn test_setVolume_outOfRange_shouldClamp() {
    let mut session = PlaybackSession::new();

    session.set_volume(1.7);
    assert_eq!(session.state().volume, 1.0);

    session.set_volume(-0.3);
    assert_eq!(session.state().volume, 0.0);
    assert!(session.state().muted);
}

#[test]
fn test_toggleMute_shouldKeepVolume() {
    let mut session = PlaybackSession::new();
    session.set_volume(0.4);

    assert_eq!(session.toggle_mute(), vec![MediaRequest::SetMuted(true)]);
    assert!(session.state().muted);
    assert_eq!(session.state().volume, 0.4);

    session.toggle_mute();
    assert!(!session.state().muted);
}

#[test]
fn test_togglePlay_shouldOnlyRequest() {
    let mut session = PlaybackSession::new();

    assert_eq!(session.toggle_play(), vec![MediaRequest::Play]);
    assert!(session.state().paused);

    session.handle_signal(&MediaSignal::Resumed);
    assert!(!session.state().paused);
    assert_eq!(session.toggle_play(), vec![MediaRequest::Pause]);
}

#[test]
fn test_seek_withUnknownDuration_shouldDoNothing() {
    let session = PlaybackSession::new();
    assert!(session.seek(50.0).is_empty());
}

#[test]
fn test_seek_withDuration_shouldRequestTime() {
    let mut session = PlaybackSession::new();
    session.handle_signal(&MediaSignal::MetadataLoaded(200.0));

    assert_eq!(session.seek(25.0), vec![MediaRequest::SeekTo(50.0)]);
}

#[test]
fn test_timeUpdate_shouldRefreshProgressAndCaption() {
    let mut session = PlaybackSession::new();
    session.load_captions(parse_srt(common::SAMPLE_SRT));
    session.handle_signal(&MediaSignal::MetadataLoaded(20.0));

    session.handle_signal(&MediaSignal::TimeUpdated(5.0));
    assert_eq!(session.state().progress, 25.0);
    assert_eq!(session.active_caption().map(|e| e.text.as_str()), Some("It contains multiple lines."));

    session.handle_signal(&MediaSignal::TimeUpdated(9.5));
    assert!(session.active_caption().is_none());
}

#[test]
fn test_timeUpdate_beforeMetadata_shouldKeepProgressZero() {
    let mut session = PlaybackSession::new();
    session.handle_signal(&MediaSignal::TimeUpdated(3.0));

    assert_eq!(session.state().current_time, 3.0);
    assert_eq!(session.state().progress, 0.0);
}

#[test]
fn test_setOffset_shouldReevaluateWithoutTimeUpdate() {
    let mut session = PlaybackSession::new();
    session.load_captions(parse_srt(common::SAMPLE_SRT));
    session.handle_signal(&MediaSignal::TimeUpdated(4.5));
    assert!(session.active_caption().is_none());

    session.set_offset(1.0);
    assert_eq!(session.offset(), 1.0);
    assert_eq!(session.active_caption().map(|e| e.start_time), Some(1.0));
}

#[test]
fn test_fullscreen_shouldFollowPlatformSignals() {
    let mut session = PlaybackSession::new();

    assert_eq!(session.toggle_fullscreen(), vec![MediaRequest::RequestFullscreen]);
    assert!(!session.state().fullscreen);

    session.handle_signal(&MediaSignal::FullscreenChanged(true));
    assert!(session.state().fullscreen);
    assert_eq!(session.toggle_fullscreen(), vec![MediaRequest::ExitFullscreen]);

    // Leaving through the platform, e.g. the Escape key
    session.handle_signal(&MediaSignal::FullscreenChanged(false));
    assert!(!session.state().fullscreen);
}
