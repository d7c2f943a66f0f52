/*!
 * Playback session module.
 *
 * This module provides:
 * - The mirrored playback state
 * - Control operations expressed as media requests
 * - Host signal reconciliation and caption refresh
 */

pub mod manager;
pub mod models;

// Re-export main types
pub use manager::PlaybackSession;
pub use models::{PlaybackState, PlayerEvent};
