/*!
 * Common test utilities for the subplayer test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;

use subplayer::media::{MediaSignal, SimulatedMedia};
use subplayer::session::PlayerEvent;
use subplayer::Controller;
use tokio::time::Instant;

/// Three well-formed captions with a gap between each
pub const SAMPLE_SRT: &str = r#"1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains
multiple lines.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
"#;

/// Route library logs to the test output when RUST_LOG is set
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample subtitle file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_SRT)
}

/// Controller with a simulated media handle of `duration` seconds attached
/// and its metadata already delivered
pub fn controller_with_media(duration: f64) -> (Controller, SimulatedMedia) {
    let mut controller = Controller::new().expect("default config is valid");
    let media = SimulatedMedia::new(duration);
    controller.attach_simulated(&media);
    deliver(&mut controller, media.take_signals());
    (controller, media)
}

/// Feed host signals back into the controller
pub fn deliver(controller: &mut Controller, signals: Vec<MediaSignal>) {
    for signal in signals {
        controller
            .dispatch(PlayerEvent::Media(signal), Instant::now())
            .expect("media signals are always accepted");
    }
}

/// Advance the simulated clock and deliver everything it reported
pub fn advance(controller: &mut Controller, media: &SimulatedMedia, elapsed: f64) {
    let signals = media.advance(elapsed);
    deliver(controller, signals);
}
