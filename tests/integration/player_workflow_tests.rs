/*!
 * End-to-end playback through the controller and a simulated host
 */

use anyhow::Result;
use subplayer::errors::PlayerError;
use subplayer::media::{MediaSignal, SimulatedMedia};
use subplayer::offset::OffsetStep;
use subplayer::session::PlayerEvent;
use subplayer::Controller;
use tokio::time::Instant;
use crate::common::{self, advance, controller_with_media, deliver};

fn send(controller: &mut Controller, event: PlayerEvent) {
    controller.dispatch(event, Instant::now()).expect("event accepted");
}

#[test]
fn test_workflow_selectFilesAndPlay_shouldShowCaptionsInOrder() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let subtitle = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;

    let (mut controller, media) = controller_with_media(20.0);
    send(&mut controller, PlayerEvent::VideoSelected(temp_dir.path().join("movie.mkv")));
    send(&mut controller, PlayerEvent::SubtitleSelected(subtitle));

    let frame = controller.snapshot();
    assert_eq!(frame.video_name.as_deref(), Some("movie.mkv"));
    assert_eq!(frame.subtitle_name.as_deref(), Some("movie.srt"));
    assert_eq!(frame.caption_count, 3);
    assert!(frame.state.paused);

    send(&mut controller, PlayerEvent::TogglePlay);
    let mut seen = Vec::new();
    for _ in 0..30 {
        advance(&mut controller, &media, 0.5);
        if let Some(text) = controller.snapshot().caption_text {
            if seen.last() != Some(&text) {
                seen.push(text);
            }
        }
    }

    assert_eq!(
        seen,
        vec!["This is a test subtitle.", "It contains multiple lines.", "For testing purposes."]
    );
    Ok(())
}

#[test]
fn test_workflow_reachEnd_shouldMirrorHostPause() {
    let (mut controller, media) = controller_with_media(3.0);
    send(&mut controller, PlayerEvent::TogglePlay);
    advance(&mut controller, &media, 0.0);
    assert!(!controller.snapshot().state.paused);

    advance(&mut controller, &media, 5.0);
    let frame = controller.snapshot();
    assert!(frame.state.paused);
    assert_eq!(frame.state.progress, 100.0);
    assert_eq!(frame.clock_label, "00:03 / 00:03");
}

#[test]
fn test_workflow_hoverPauseAndResume_shouldRoundTrip() {
    let (mut controller, media) = controller_with_media(20.0);
    send(&mut controller, PlayerEvent::SubtitleText(common::SAMPLE_SRT.to_string()));
    send(&mut controller, PlayerEvent::TogglePlay);
    advance(&mut controller, &media, 2.0);

    send(&mut controller, PlayerEvent::CaptionHoverEnter);
    deliver(&mut controller, media.take_signals());
    assert!(controller.snapshot().state.paused);
    assert!(controller.interaction().auto_paused_by_hover());

    send(&mut controller, PlayerEvent::CaptionHoverLeave);
    deliver(&mut controller, media.take_signals());
    assert!(!controller.snapshot().state.paused);
    assert!(media.is_playing());
}

#[test]
fn test_workflow_userPausesDuringHover_shouldStayPaused() {
    let (mut controller, media) = controller_with_media(20.0);
    send(&mut controller, PlayerEvent::SubtitleText(common::SAMPLE_SRT.to_string()));
    send(&mut controller, PlayerEvent::TogglePlay);
    advance(&mut controller, &media, 2.0);

    send(&mut controller, PlayerEvent::CaptionHoverEnter);
    deliver(&mut controller, media.take_signals());

    // Already paused by the hover, so the user's toggle asks to play
    send(&mut controller, PlayerEvent::TogglePlay);
    deliver(&mut controller, media.take_signals());
    send(&mut controller, PlayerEvent::TogglePlay);
    deliver(&mut controller, media.take_signals());
    assert!(controller.snapshot().state.paused);

    send(&mut controller, PlayerEvent::CaptionHoverLeave);
    deliver(&mut controller, media.take_signals());
    assert!(controller.snapshot().state.paused);
    assert!(!media.is_playing());
}

#[test]
fn test_workflow_rejectedPlay_shouldStayPaused() {
    let (mut controller, media) = controller_with_media(20.0);
    media.set_reject_play(true);

    send(&mut controller, PlayerEvent::TogglePlay);
    advance(&mut controller, &media, 1.0);

    assert!(controller.snapshot().state.paused);
    assert!(!media.is_playing());
}

#[test]
fn test_workflow_fullscreenDenied_shouldStayWindowed() {
    let (mut controller, media) = controller_with_media(20.0);
    media.set_deny_fullscreen(true);

    send(&mut controller, PlayerEvent::ToggleFullscreen);
    deliver(&mut controller, media.take_signals());
    assert!(!controller.snapshot().state.fullscreen);

    media.set_deny_fullscreen(false);
    send(&mut controller, PlayerEvent::ToggleFullscreen);
    deliver(&mut controller, media.take_signals());
    assert!(controller.snapshot().state.fullscreen);

    // Platform exit without going through the player
    deliver(&mut controller, vec![MediaSignal::FullscreenChanged(false)]);
    assert!(!controller.snapshot().state.fullscreen);
}

#[test]
fn test_workflow_seekAndVolume_shouldReachHost() {
    let (mut controller, media) = controller_with_media(40.0);

    send(&mut controller, PlayerEvent::Seek(50.0));
    deliver(&mut controller, media.take_signals());
    let frame = controller.snapshot();
    assert_eq!(frame.state.current_time, 20.0);
    assert_eq!(frame.state.progress, 50.0);

    send(&mut controller, PlayerEvent::VolumeDragStart(0.0));
    assert!(media.is_muted());
    send(&mut controller, PlayerEvent::VolumeDragMove(0.6));
    send(&mut controller, PlayerEvent::VolumeDragEnd);
    send(&mut controller, PlayerEvent::VolumeDragMove(0.1));

    assert!(!media.is_muted());
    assert_eq!(media.volume(), 0.6);
    assert_eq!(controller.snapshot().state.volume, 0.6);
}

#[test]
fn test_workflow_offsetButtons_shouldShiftCaption() {
    let (mut controller, media) = controller_with_media(18.0);
    send(&mut controller, PlayerEvent::SubtitleText(common::SAMPLE_SRT.to_string()));
    send(&mut controller, PlayerEvent::Seek(25.0));
    deliver(&mut controller, media.take_signals());

    // 4.5s sits in the gap between the first two captions
    assert!(controller.snapshot().caption_text.is_none());

    send(&mut controller, PlayerEvent::AdjustOffset(-0.5));
    let frame = controller.snapshot();
    assert_eq!(frame.caption_text.as_deref(), Some("It contains multiple lines."));
    assert_eq!(frame.offset_label, "Subtitle Offset: -0.5s");

    send(&mut controller, PlayerEvent::ResetOffset);
    assert!(controller.snapshot().caption_text.is_none());
}

#[test]
fn test_workflow_offsetStepButtons_shouldMatchLabels() -> Result<()> {
    let (mut controller, media) = controller_with_media(18.0);
    send(&mut controller, PlayerEvent::SubtitleText(common::SAMPLE_SRT.to_string()));
    send(&mut controller, PlayerEvent::Seek(25.0));
    deliver(&mut controller, media.take_signals());

    send(&mut controller, PlayerEvent::ApplyOffsetStep("-0.5s".parse::<OffsetStep>()?));
    assert_eq!(controller.snapshot().caption_text.as_deref(), Some("It contains multiple lines."));

    send(&mut controller, PlayerEvent::ApplyOffsetStep("+0.1s".parse::<OffsetStep>()?));
    let frame = controller.snapshot();
    assert_eq!(frame.offset_label, "Subtitle Offset: -0.4s");
    assert!(frame.caption_text.is_none());
    Ok(())
}

#[test]
fn test_workflow_pointerOnBars_shouldSeekAndSetVolume() {
    let (mut controller, media) = controller_with_media(40.0);

    assert_eq!(controller.progress_preview(90.0, 120.0), "00:30");
    send(&mut controller, PlayerEvent::SeekClick { x: 30.0, width: 120.0 });
    deliver(&mut controller, media.take_signals());
    assert_eq!(controller.snapshot().state.current_time, 10.0);

    assert_eq!(controller.volume_preview(33.0, 100.0), "33%");
    send(&mut controller, PlayerEvent::VolumePointerDown { x: -5.0, width: 80.0 });
    assert!(media.is_muted());
    send(&mut controller, PlayerEvent::VolumePointerMove { x: 60.0, width: 80.0 });
    send(&mut controller, PlayerEvent::VolumeDragEnd);
    send(&mut controller, PlayerEvent::VolumePointerMove { x: 8.0, width: 80.0 });

    assert!(!media.is_muted());
    assert_eq!(media.volume(), 0.75);
}

#[test]
fn test_workflow_newVideo_shouldKeepCaptionsAndOffset() {
    let (mut controller, _media) = controller_with_media(20.0);
    send(&mut controller, PlayerEvent::SubtitleText(common::SAMPLE_SRT.to_string()));
    send(&mut controller, PlayerEvent::AdjustOffset(1.0));

    let other = SimulatedMedia::new(60.0);
    controller.attach_simulated(&other);
    deliver(&mut controller, other.take_signals());

    let frame = controller.snapshot();
    assert_eq!(frame.caption_count, 3);
    assert_eq!(frame.offset, 1.0);
    assert_eq!(frame.state.duration, 60.0);
    assert!(frame.state.paused);
}

#[test]
fn test_workflow_newVideoDuringHoverPause_shouldNotAutoResume() {
    let (mut controller, media) = controller_with_media(20.0);
    send(&mut controller, PlayerEvent::SubtitleText(common::SAMPLE_SRT.to_string()));
    send(&mut controller, PlayerEvent::TogglePlay);
    advance(&mut controller, &media, 2.0);

    send(&mut controller, PlayerEvent::CaptionHoverEnter);
    deliver(&mut controller, media.take_signals());
    send(&mut controller, PlayerEvent::VolumeDragStart(0.5));

    // Pointer still rests on the caption while another video is loaded
    let other = SimulatedMedia::new(60.0);
    controller.attach_simulated(&other);
    deliver(&mut controller, other.take_signals());
    assert!(!controller.interaction().auto_paused_by_hover());
    assert!(!controller.interaction().volume_drag_active());

    send(&mut controller, PlayerEvent::CaptionHoverLeave);
    send(&mut controller, PlayerEvent::VolumeDragMove(0.1));
    deliver(&mut controller, other.take_signals());

    assert!(!other.is_playing());
    assert!(controller.snapshot().state.paused);
    assert_eq!(other.volume(), 1.0);
}

#[test]
fn test_workflow_subtitleWithoutMedia_shouldStillParse() {
    let mut controller = Controller::new().expect("default config is valid");
    send(&mut controller, PlayerEvent::SubtitleText(common::SAMPLE_SRT.to_string()));
    send(&mut controller, PlayerEvent::TogglePlay);

    assert_eq!(controller.snapshot().caption_count, 3);
    assert!(controller.snapshot().state.paused);
}

#[test]
fn test_workflow_videoInSubtitleZone_shouldReject() {
    let mut controller = Controller::new().expect("default config is valid");
    let result = controller.dispatch(PlayerEvent::VideoSelected("captions.srt".into()), Instant::now());

    assert!(matches!(result, Err(PlayerError::UnsupportedFile(_))));
    assert!(controller.snapshot().video_name.is_none());
}
