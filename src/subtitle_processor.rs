use std::fmt;
use std::path::Path;
use regex::Regex;
use once_cell::sync::Lazy;
use log::{debug, warn};

use crate::errors::{AppError, SubtitleError};
use crate::file_utils::FileManager;

// @module: Subtitle file parsing

// @const: One or more blank (empty or whitespace-only) lines between blocks
static BLOCK_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n(?:[ \t]*\n)+").expect("block separator regex is valid")
});

// @const: Separator between start and end timestamps on the timing line
const TIMING_ARROW: &str = " --> ";

// @struct: Single timed caption
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionEntry {
    // @field: Start time in seconds
    pub start_time: f64,

    // @field: End time in seconds
    pub end_time: f64,

    // @field: Caption text, already collapsed to a single line
    pub text: String,
}

impl CaptionEntry {
    /// Creates a new caption entry without validation
    pub fn new(start_time: f64, end_time: f64, text: impl Into<String>) -> Self {
        CaptionEntry {
            start_time,
            end_time,
            text: text.into(),
        }
    }

    // @creates: Validated caption entry
    // @validates: start <= end
    pub fn new_validated(start_time: f64, end_time: f64, text: String) -> Result<Self, SubtitleError> {
        if start_time > end_time {
            return Err(SubtitleError::InvalidTimeRange {
                start: start_time,
                end: end_time,
            });
        }

        Ok(Self::new(start_time, end_time, text))
    }

    /// Whether `time` falls inside `[start_time, end_time]`, both ends inclusive
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start_time && time <= self.end_time
    }

    /// Parse an `HH:MM:SS,mmm` timestamp into seconds.
    ///
    /// Hours are not capped at 24 and minutes/seconds are not capped at 60;
    /// any non-negative integers are accepted. Every component must be a
    /// plain integer, otherwise the timestamp is rejected.
    pub fn parse_timestamp(timestamp: &str) -> Result<f64, SubtitleError> {
        let invalid = || SubtitleError::InvalidTimestamp(timestamp.to_string());

        let mut parts = timestamp.split(':');
        let (hours, minutes, seconds_and_ms) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(m), Some(s), None) => (h, m, s),
            _ => return Err(invalid()),
        };

        let (seconds, millis) = seconds_and_ms.split_once(',').ok_or_else(invalid)?;
        if millis.contains(',') {
            return Err(invalid());
        }

        let component = |value: &str| value.trim().parse::<u64>().map_err(|_| invalid());
        let hours = component(hours)?;
        let minutes = component(minutes)?;
        let seconds = component(seconds)?;
        let millis = component(millis)?;

        Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds as f64 + millis as f64 / 1000.0)
    }

    /// Format seconds as an `HH:MM:SS,mmm` timestamp
    pub fn format_timestamp(seconds: f64) -> String {
        let total_ms = if seconds.is_finite() && seconds > 0.0 {
            (seconds * 1000.0).round() as u64
        } else {
            0
        };
        let hours = total_ms / 3_600_000;
        let minutes = (total_ms % 3_600_000) / 60_000;
        let secs = (total_ms % 60_000) / 1_000;
        let millis = total_ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
    }

    /// Start time as an SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time)
    }

    /// End time as an SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time)
    }

    // @parses: One blank-line-delimited block
    fn parse_block(block: &str) -> Result<Self, SubtitleError> {
        let lines: Vec<&str> = block.split('\n').collect();
        if lines.len() < 3 {
            return Err(SubtitleError::TooFewLines(lines.len()));
        }

        // lines[0] is the index line and is never looked at
        let timing_line = lines[1];
        let (start, end) = timing_line
            .split_once(TIMING_ARROW)
            .ok_or_else(|| SubtitleError::InvalidTimingLine(timing_line.to_string()))?;

        let start_time = Self::parse_timestamp(start)?;
        let end_time = Self::parse_timestamp(end)?;

        // Multi-line captions collapse into one line
        let text = lines[2..].join(" ");

        Self::new_validated(start_time, end_time, text)
    }
}

impl fmt::Display for CaptionEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        write!(f, "{}", self.text)
    }
}

/// Ordered captions from one subtitle file, kept in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptionSequence {
    entries: Vec<CaptionEntry>,
}

impl CaptionSequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap already-built entries without reordering them
    pub fn from_entries(entries: Vec<CaptionEntry>) -> Self {
        Self { entries }
    }

    /// Parse subtitle text; see [`parse_srt`]
    pub fn parse(raw: &str) -> Self {
        parse_srt(raw)
    }

    /// Read and parse a subtitle file, failing when it is missing or unreadable
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            return Err(AppError::File(format!("Subtitle file does not exist: {}", path.display())));
        }

        let content = FileManager::read_text_lossy(path)
            .map_err(|e| AppError::File(format!("{:#}", e)))?;
        Ok(parse_srt(&content))
    }

    /// Read and parse a subtitle file.
    ///
    /// An unreadable file yields an empty sequence rather than an error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!("Could not read subtitle file: {}", e);
            Self::new()
        })
    }

    pub fn entries(&self) -> &[CaptionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CaptionEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CaptionEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a CaptionSequence {
    type Item = &'a CaptionEntry;
    type IntoIter = std::slice::Iter<'a, CaptionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Writes the sequence back out as numbered SRT blocks
impl fmt::Display for CaptionSequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", i + 1)?;
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// Parse SRT-style subtitle text into a caption sequence.
///
/// Blocks are separated by one or more blank lines. Each block needs an index
/// line (ignored), an `HH:MM:SS,mmm --> HH:MM:SS,mmm` timing line and at least
/// one text line; text lines are joined with a single space. Malformed blocks
/// are dropped and parsing carries on, so this never fails.
pub fn parse_srt(raw: &str) -> CaptionSequence {
    let without_bom = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let normalized = without_bom.replace("\r\n", "\n").replace('\r', "\n");
    let content = normalized.trim();

    if content.is_empty() {
        return CaptionSequence::new();
    }

    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for (block_index, block) in BLOCK_SEPARATOR_REGEX.split(content).enumerate() {
        match CaptionEntry::parse_block(block) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                skipped += 1;
                debug!("Skipping subtitle block {}: {}", block_index + 1, e);
            }
        }
    }

    debug!("Parsed {} captions ({} blocks skipped)", entries.len(), skipped);

    CaptionSequence::from_entries(entries)
}
