//! Numeric input normalisation.
//!
//! Edits never fail: unparseable input becomes zero (counts), `None`
//! (ratings) or `false` (flags), and counts are forced into their bounds.

use super::domain::Rating;

/// Inclusive bounds for a count field. `max: None` means only non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountBounds {
    pub min: u32,
    pub max: Option<u32>,
}

impl CountBounds {
    pub const fn up_to(max: u32) -> Self {
        Self {
            min: 0,
            max: Some(max),
        }
    }

    pub const fn non_negative() -> Self {
        Self { min: 0, max: None }
    }

    pub fn clamp(&self, value: i64) -> u32 {
        let upper = i64::from(self.max.unwrap_or(u32::MAX));
        // Bounds fit in u32 so the clamped value always converts.
        u32::try_from(value.clamp(i64::from(self.min), upper)).unwrap_or(self.min)
    }

    pub fn clamp_input(&self, raw: &str) -> u32 {
        self.clamp(parse_leading_int(raw))
    }
}

/// Integer prefix of `raw`, read the way a browser's `parseInt` reads it.
///
/// Leading whitespace and one sign are accepted, then the longest run of
/// ASCII digits. No digits yields 0. Overflow saturates.
pub fn parse_leading_int(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(i64::from(digit - b'0'))
        });

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Dependent counts may never exceed their parent.
pub fn clamp_to_parent(value: u32, parent: u32) -> u32 {
    value.min(parent)
}

pub fn parse_rating(raw: &str) -> Option<Rating> {
    raw.trim().parse::<u8>().ok().and_then(Rating::new)
}

pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "sim" | "s" | "yes" | "y" | "on" | "1"
    )
}
