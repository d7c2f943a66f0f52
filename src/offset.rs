/*!
 * Subtitle timing offset.
 *
 * The offset is a signed number of seconds subtracted from playback time
 * before caption lookup. It only ever changes by discrete adjustments and is
 * rounded to one decimal place after each one so repeated small steps do not
 * accumulate floating-point error.
 */

use std::fmt;

/// Apply `delta` to `current` and round the result to one decimal place
pub fn adjust(current: f64, delta: f64) -> f64 {
    let rounded = ((current + delta) * 10.0).round() / 10.0;
    // Avoid displaying "-0.0"
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Offset increments offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetStep {
    MinusFive,
    MinusOne,
    MinusHalf,
    MinusTenth,
    PlusTenth,
    PlusHalf,
    PlusOne,
    PlusFive,
}

impl OffsetStep {
    /// All steps in button order
    pub const ALL: [OffsetStep; 8] = [
        Self::MinusFive,
        Self::MinusOne,
        Self::MinusHalf,
        Self::MinusTenth,
        Self::PlusTenth,
        Self::PlusHalf,
        Self::PlusOne,
        Self::PlusFive,
    ];

    // @returns: Signed delta in seconds
    pub fn delta(&self) -> f64 {
        match self {
            Self::MinusFive => -5.0,
            Self::MinusOne => -1.0,
            Self::MinusHalf => -0.5,
            Self::MinusTenth => -0.1,
            Self::PlusTenth => 0.1,
            Self::PlusHalf => 0.5,
            Self::PlusOne => 1.0,
            Self::PlusFive => 5.0,
        }
    }

    // @returns: Button label, e.g. "-0.5s"
    pub fn label(&self) -> &'static str {
        match self {
            Self::MinusFive => "-5s",
            Self::MinusOne => "-1s",
            Self::MinusHalf => "-0.5s",
            Self::MinusTenth => "-0.1s",
            Self::PlusTenth => "+0.1s",
            Self::PlusHalf => "+0.5s",
            Self::PlusOne => "+1s",
            Self::PlusFive => "+5s",
        }
    }
}

impl fmt::Display for OffsetStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for OffsetStep {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|step| step.label() == s.trim())
            .ok_or_else(|| anyhow::anyhow!("Invalid offset step: {}", s))
    }
}

/// Holds the current subtitle offset
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OffsetController {
    value: f64,
}

impl OffsetController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current offset in seconds
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Apply an arbitrary signed delta and return the new offset
    pub fn adjust_by(&mut self, delta: f64) -> f64 {
        self.value = adjust(self.value, delta);
        self.value
    }

    /// Apply one of the exposed steps and return the new offset
    pub fn apply(&mut self, step: OffsetStep) -> f64 {
        self.adjust_by(step.delta())
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    /// Text shown under the offset buttons
    pub fn display_label(&self) -> String {
        format!("Subtitle Offset: {}", self)
    }
}

impl fmt::Display for OffsetController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}s", self.value)
    }
}
