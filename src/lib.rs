/*!
 * # subplayer - subtitle overlay player core
 *
 * Plays a video with captions from an SRT file drawn on top of it.
 *
 * ## Features
 *
 * - Lenient SRT parsing: malformed blocks are skipped, never fatal
 * - Caption lookup against the playback clock with a user-adjustable offset
 * - Playback state mirrored from the host media stack
 * - Hover-to-pause captions, auto-hiding controls and volume dragging
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `subtitle_processor`: SRT parsing into an ordered caption sequence
 * - `sync`: Picking the caption for a playback time and offset
 * - `offset`: Subtitle offset arithmetic and the offset button set
 * - `session`: Playback state and the events that change it
 * - `interaction`: Hover-pause, idle controls timer and volume drag
 * - `media`: Boundary to the host media stack, plus a simulated host
 * - `controls`: Clock labels and pointer-to-bar conversions
 * - `app_controller`: Event routing and the async player loop
 * - `app_config`: Configuration management
 * - `file_utils`: Upload file classification and reading
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod controls;
pub mod errors;
pub mod file_utils;
pub mod interaction;
pub mod media;
pub mod offset;
pub mod session;
pub mod subtitle_processor;
pub mod sync;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, PlayerHandle, RenderedFrame};
pub use errors::{AppError, PlayerError, SubtitleError};
pub use interaction::InteractionCoordinator;
pub use media::{MediaRequest, MediaSignal, SimulatedMedia};
pub use offset::{OffsetController, OffsetStep};
pub use session::{PlaybackSession, PlaybackState, PlayerEvent};
pub use subtitle_processor::{parse_srt, CaptionEntry, CaptionSequence};
