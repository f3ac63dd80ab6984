//! Security patch dates as reported by the platform (`YYYY-MM-DD`)

use serde::{Deserialize, Serialize};
use std::fmt;

/// A security patch date
///
/// Ordering is a plain tuple comparison over `(year, month, day)`. No calendar
/// validation is performed, `2024-13-40` is a perfectly good value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PatchDate {
    year: i32,
    month: i32,
    day: i32,
}

impl PatchDate {
    /// Sentinel used for unparsable input, earlier than any real date
    pub const ZERO: PatchDate = PatchDate { year: 0, month: 0, day: 0 };

    /// Create a date from its components
    pub const fn new(year: i32, month: i32, day: i32) -> Self {
        Self { year, month, day }
    }

    /// Parse a `YYYY-MM-DD` string
    ///
    /// Anything that is not exactly three dash separated integers yields
    /// [`PatchDate::ZERO`]. Trailing dashes are ignored, leading and inner
    /// empty components are not. This never fails.
    pub fn parse(text: &str) -> Self {
        let mut parts: Vec<&str> = text.split('-').collect();
        while parts.last() == Some(&"") {
            parts.pop();
        }
        if parts.len() != 3 {
            return Self::ZERO;
        }

        match (parts[0].parse(), parts[1].parse(), parts[2].parse()) {
            (Ok(year), Ok(month), Ok(day)) => Self { year, month, day },
            _ => Self::ZERO,
        }
    }

    /// Year component
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month component
    pub fn month(&self) -> i32 {
        self.month
    }

    /// Day component
    pub fn day(&self) -> i32 {
        self.day
    }

    /// Whether this is the zero sentinel
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// `true` if `self` is the same day as `other` or comes after it
    pub fn is_equal_or_later_than(&self, other: &PatchDate) -> bool {
        self >= other
    }
}

impl From<&str> for PatchDate {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl fmt::Display for PatchDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}
