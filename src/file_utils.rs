use anyhow::{Result, Context};
use std::fs;
use std::path::Path;

// @module: File utilities for the upload surface

// @const: Extensions accepted as video files
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "webm", "mkv", "mov", "avi", "ogv", "ogg", "mpeg", "mpg", "ts", "3gp", "wmv", "flv",
];

// @const: Extensions accepted as subtitle files
const SUBTITLE_EXTENSIONS: &[&str] = &["srt"];

/// Kind of file handed over by the upload surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Video,
    Subtitle,
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @detects: File type from the extension, case-insensitively
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> Option<FileType> {
        let ext = path.as_ref().extension()?.to_string_lossy().to_lowercase();

        if SUBTITLE_EXTENSIONS.contains(&ext.as_str()) {
            Some(FileType::Subtitle)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(FileType::Video)
        } else {
            None
        }
    }

    /// Read a text file, replacing invalid UTF-8 sequences
    pub fn read_text_lossy<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    // @returns: File name for display, falling back to the full path
    pub fn display_name<P: AsRef<Path>>(path: P) -> String {
        let path = path.as_ref();
        path.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string())
    }
}
