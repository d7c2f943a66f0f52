use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::Path;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};

use crate::app_config::Config;
use crate::controls;
use crate::errors::PlayerError;
use crate::file_utils::{FileManager, FileType};
use crate::interaction::InteractionCoordinator;
use crate::media::{FullscreenPlatform, MediaRequest, MediaResource, SimulatedMedia};
use crate::offset::OffsetController;
use crate::session::{PlaybackSession, PlaybackState, PlayerEvent};
use crate::subtitle_processor::CaptionSequence;

// @module: Player controller and event loop

/// Everything the presentation layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedFrame {
    /// Text of the caption on screen, if any
    pub caption_text: Option<String>,
    /// Subtitle offset in seconds
    pub offset: f64,
    /// Offset as shown to the user, e.g. "Subtitle Offset: 0.5s"
    pub offset_label: String,
    /// Elapsed / total time, e.g. "01:05 / 42:10"
    pub clock_label: String,
    pub state: PlaybackState,
    pub video_name: Option<String>,
    pub subtitle_name: Option<String>,
    pub caption_count: usize,
}

/// Main player controller
///
/// Routes every [`PlayerEvent`] to the session, the offset controller or the
/// interaction coordinator, then performs the resulting media requests.
#[derive(Debug)]
pub struct Controller {
    // @field: App configuration
    config: Config,
    session: PlaybackSession,
    offset: OffsetController,
    interaction: InteractionCoordinator,
    media: Option<Box<dyn MediaResource>>,
    platform: Option<Box<dyn FullscreenPlatform>>,
    video_name: Option<String>,
    subtitle_name: Option<String>,
    torn_down: bool,
}

impl Controller {
    /// Create a controller with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;

        let session = PlaybackSession::with_volume(config.player.initial_volume);
        let interaction = InteractionCoordinator::new(config.player.controls_idle_timeout());

        Ok(Self {
            config,
            session,
            offset: OffsetController::new(),
            interaction,
            media: None,
            platform: None,
            video_name: None,
            subtitle_name: None,
            torn_down: false,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn offset(&self) -> &OffsetController {
        &self.offset
    }

    pub fn interaction(&self) -> &InteractionCoordinator {
        &self.interaction
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Hand over the media handle and fullscreen API for a newly selected video.
    ///
    /// Playback state and hover/drag gestures start over; captions and offset
    /// are kept.
    pub fn attach_media(&mut self, media: Box<dyn MediaResource>, platform: Box<dyn FullscreenPlatform>) {
        let captions = self.session.captions().clone();
        self.session = PlaybackSession::with_volume(self.config.player.initial_volume);
        self.session.load_captions(captions);
        self.session.set_offset(self.offset.value());
        self.interaction.reset_media_gestures();

        let volume = self.session.state().volume;
        self.media = Some(media);
        self.platform = Some(platform);
        self.perform(vec![MediaRequest::SetVolume(volume), MediaRequest::SetMuted(false)]);
    }

    /// Attach a simulated media handle and its fullscreen API
    pub fn attach_simulated(&mut self, media: &SimulatedMedia) {
        self.attach_media(Box::new(media.clone()), Box::new(media.fullscreen()));
    }

    /// Replace the captions with the parsed content of `raw`
    pub fn load_subtitle_text(&mut self, raw: &str) {
        let captions = CaptionSequence::parse(raw);
        if captions.is_empty() {
            warn!("Subtitle content produced no captions");
        }
        self.session.load_captions(captions);
    }

    /// Process one event
    pub fn dispatch(&mut self, event: PlayerEvent, now: Instant) -> Result<(), PlayerError> {
        if self.torn_down {
            return Err(PlayerError::RuntimeClosed);
        }

        let requests = match event {
            PlayerEvent::Media(signal) => {
                self.session.handle_signal(&signal);
                Vec::new()
            }
            PlayerEvent::TogglePlay => {
                self.interaction.user_toggled_play();
                self.session.toggle_play()
            }
            PlayerEvent::SetVolume(volume) => self.session.set_volume(volume),
            PlayerEvent::ToggleMute => self.session.toggle_mute(),
            PlayerEvent::Seek(percentage) => self.session.seek(percentage),
            PlayerEvent::SeekClick { x, width } => {
                self.session.seek(controls::progress_from_pointer(x, width))
            }
            PlayerEvent::ToggleFullscreen => self.session.toggle_fullscreen(),
            PlayerEvent::AdjustOffset(delta) => {
                let value = self.offset.adjust_by(delta);
                debug!("Subtitle offset now {:.1}s", value);
                self.session.set_offset(value);
                Vec::new()
            }
            PlayerEvent::ApplyOffsetStep(step) => {
                let value = self.offset.apply(step);
                debug!("Subtitle offset {} -> {:.1}s", step, value);
                self.session.set_offset(value);
                Vec::new()
            }
            PlayerEvent::ResetOffset => {
                self.offset.reset();
                self.session.set_offset(self.offset.value());
                Vec::new()
            }
            PlayerEvent::CaptionHoverEnter => self.interaction.hover_enter(&self.session),
            PlayerEvent::CaptionHoverLeave => self.interaction.hover_leave(),
            PlayerEvent::PointerMoved => {
                self.interaction.pointer_moved(now, &mut self.session);
                Vec::new()
            }
            PlayerEvent::VolumeDragStart(fraction) => {
                self.interaction.begin_volume_drag(fraction, &mut self.session)
            }
            PlayerEvent::VolumeDragMove(fraction) => {
                self.interaction.volume_drag_move(fraction, &mut self.session)
            }
            PlayerEvent::VolumeDragEnd => {
                self.interaction.end_volume_drag();
                Vec::new()
            }
            PlayerEvent::VolumePointerDown { x, width } => {
                let fraction = controls::volume_from_pointer(x, width);
                self.interaction.begin_volume_drag(fraction, &mut self.session)
            }
            PlayerEvent::VolumePointerMove { x, width } => {
                let fraction = controls::volume_from_pointer(x, width);
                self.interaction.volume_drag_move(fraction, &mut self.session)
            }
            PlayerEvent::VideoSelected(path) => {
                self.select_video(&path)?;
                Vec::new()
            }
            PlayerEvent::SubtitleSelected(path) => {
                self.select_subtitle(&path)?;
                Vec::new()
            }
            PlayerEvent::SubtitleText(raw) => {
                self.load_subtitle_text(&raw);
                Vec::new()
            }
            PlayerEvent::Shutdown => {
                self.teardown();
                Vec::new()
            }
        };

        self.perform(requests);
        Ok(())
    }

    /// Time tooltip for a pointer hovering at `x` on a progress bar `width` wide
    pub fn progress_preview(&self, x: f64, width: f64) -> String {
        let duration = self.session.state().duration;
        controls::format_clock(controls::hover_progress_time(x, width, duration))
    }

    /// Volume tooltip for a pointer hovering at `x` on a volume bar `width` wide
    pub fn volume_preview(&self, x: f64, width: f64) -> String {
        format!("{}%", controls::hover_volume_percent(x, width))
    }

    /// Hide the controls if the idle timer expired by `now`
    pub fn poll_idle(&mut self, now: Instant) -> bool {
        self.interaction.poll_idle(now, &mut self.session)
    }

    /// When the idle timer fires next, if one is pending
    pub fn idle_deadline(&self) -> Option<Instant> {
        self.interaction.idle_deadline()
    }

    /// Release the media handle and clear timers and gestures
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        info!("Tearing down player");
        self.interaction.teardown();
        self.media = None;
        self.platform = None;
        self.torn_down = true;
    }

    /// Current output for the presentation layer
    pub fn snapshot(&self) -> RenderedFrame {
        let state = self.session.state().clone();
        RenderedFrame {
            caption_text: self.session.active_caption().map(|entry| entry.text.clone()),
            offset: self.offset.value(),
            offset_label: self.offset.display_label(),
            clock_label: controls::clock_label(&state),
            state,
            video_name: self.video_name.clone(),
            subtitle_name: self.subtitle_name.clone(),
            caption_count: self.session.captions().len(),
        }
    }

    fn select_video(&mut self, path: &Path) -> Result<(), PlayerError> {
        if FileManager::detect_file_type(path) == Some(FileType::Subtitle) {
            return Err(PlayerError::UnsupportedFile(path.display().to_string()));
        }
        let name = FileManager::display_name(path);
        info!("Video selected: {}", name);
        self.video_name = Some(name);
        Ok(())
    }

    fn select_subtitle(&mut self, path: &Path) -> Result<(), PlayerError> {
        if FileManager::detect_file_type(path) == Some(FileType::Video) {
            return Err(PlayerError::UnsupportedFile(path.display().to_string()));
        }
        let name = FileManager::display_name(path);
        let captions = CaptionSequence::from_file(path);
        info!("Subtitles selected: {} ({} captions)", name, captions.len());
        self.session.load_captions(captions);
        self.subtitle_name = Some(name);
        Ok(())
    }

    // @performs: Media requests in order; failures are logged and skipped
    fn perform(&mut self, requests: Vec<MediaRequest>) {
        if requests.is_empty() {
            return;
        }

        let (Some(media), Some(platform)) = (self.media.as_deref_mut(), self.platform.as_deref_mut()) else {
            debug!("No media attached, dropping {} request(s)", requests.len());
            return;
        };

        for request in requests {
            if let Err(e) = request.apply(media, platform) {
                warn!("Media request {:?} failed: {}", request, e);
            }
        }
    }

    /// Move the controller onto a tokio task and return a handle to it
    pub fn spawn(self) -> PlayerHandle {
        let capacity = self.config.player.event_channel_capacity;
        let (events_tx, events_rx) = mpsc::channel(capacity);
        let (frames_tx, frames_rx) = watch::channel(self.snapshot());
        let task = tokio::spawn(run_event_loop(self, events_rx, frames_tx));

        PlayerHandle {
            events: events_tx,
            frames: frames_rx,
            task,
        }
    }
}

/// Handle to a controller running on its own task
#[derive(Debug)]
pub struct PlayerHandle {
    events: mpsc::Sender<PlayerEvent>,
    frames: watch::Receiver<RenderedFrame>,
    task: JoinHandle<Controller>,
}

impl PlayerHandle {
    /// Queue an event for the player
    pub async fn send(&self, event: PlayerEvent) -> Result<(), PlayerError> {
        self.events.send(event).await.map_err(|_| PlayerError::RuntimeClosed)
    }

    /// Sender that other tasks, e.g. a media clock, can feed events through
    pub fn sender(&self) -> mpsc::Sender<PlayerEvent> {
        self.events.clone()
    }

    /// Receiver that observes every published frame
    pub fn frames(&self) -> watch::Receiver<RenderedFrame> {
        self.frames.clone()
    }

    /// Most recently published frame
    pub fn current_frame(&self) -> RenderedFrame {
        self.frames.borrow().clone()
    }

    /// Tear the player down and get the controller back
    pub async fn shutdown(self) -> Result<Controller> {
        // The loop may already be gone; the join below reports the outcome
        let _ = self.events.send(PlayerEvent::Shutdown).await;
        drop(self.events);
        self.task.await.map_err(|e| anyhow!("Player task failed: {}", e))
    }
}

// @runs: One event at a time; the idle timer is the only other wake-up source
async fn run_event_loop(
    mut controller: Controller,
    mut events: mpsc::Receiver<PlayerEvent>,
    frames: watch::Sender<RenderedFrame>,
) -> Controller {
    loop {
        let deadline = controller.idle_deadline();

        tokio::select! {
            maybe_event = events.recv() => match maybe_event {
                Some(PlayerEvent::Shutdown) | None => {
                    controller.teardown();
                    frames.send_replace(controller.snapshot());
                    break;
                }
                Some(event) => {
                    if let Err(e) = controller.dispatch(event, Instant::now()) {
                        warn!("Player event rejected: {}", e);
                    }
                }
            },
            _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if controller.poll_idle(Instant::now()) {
                    debug!("Controls hidden after inactivity");
                }
            }
        }

        frames.send_replace(controller.snapshot());
    }

    controller
}

/// Feed a simulated media clock into the player every `interval`.
///
/// Media time runs `speed` times faster than wall time. Stops when the
/// player stops accepting events.
pub fn spawn_simulated_clock(
    media: SimulatedMedia,
    events: mpsc::Sender<PlayerEvent>,
    interval: Duration,
    speed: f64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        let mut last = Instant::now();

        loop {
            ticker.tick().await;
            let now = Instant::now();
            let elapsed = now.duration_since(last).as_secs_f64() * speed;
            last = now;

            for signal in media.advance(elapsed) {
                if events.send(PlayerEvent::Media(signal)).await.is_err() {
                    return;
                }
            }
        }
    })
}
