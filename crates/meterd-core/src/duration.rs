//! Human duration strings (`"1h"`, `"1h30m"`, `"1.5s"`, `"300ms"`).
//!
//! Grammar: optional `+` or `-` sign, then one or more `<decimal><unit>` groups.
//! Units: `ns`, `us` (`µs`, `μs`), `ms`, `s`, `m`, `h`. The bare string `"0"`
//! is zero. Magnitudes are bounded by `i64::MAX` nanoseconds in both directions.

use thiserror::Error;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Largest accepted total, in nanoseconds (matches a signed 64-bit nanosecond clock).
const MAX_NANOS: u64 = i64::MAX as u64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDurationError {
    #[error("invalid duration {0:?}")]
    Invalid(String),
    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),
    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },
    #[error("duration {0:?} out of range")]
    Overflow(String),
}

/// Signed span of time with nanosecond resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MeterDuration {
    nanos: i64,
}

impl MeterDuration {
    pub const ZERO: Self = Self { nanos: 0 };

    pub const fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self::from_nanos(millis * NANOS_PER_MILLI as i64)
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self::from_nanos(secs * NANOS_PER_SEC as i64)
    }

    pub const fn as_nanos(self) -> i64 {
        self.nanos
    }

    pub const fn as_millis(self) -> i64 {
        self.nanos / NANOS_PER_MILLI as i64
    }

    pub const fn is_negative(self) -> bool {
        self.nanos < 0
    }
}

fn unit_nanos(unit: &str) -> Option<u64> {
    Some(match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => NANOS_PER_MICRO,
        "ms" => NANOS_PER_MILLI,
        "s" => NANOS_PER_SEC,
        "m" => 60 * NANOS_PER_SEC,
        "h" => 60 * 60 * NANOS_PER_SEC,
        _ => return None,
    })
}

/// Split off the leading run of ASCII digits.
fn take_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Parse a human duration string into a [`MeterDuration`].
pub fn parse_duration(input: &str) -> Result<MeterDuration, ParseDurationError> {
    let invalid = || ParseDurationError::Invalid(input.to_string());
    let overflow = || ParseDurationError::Overflow(input.to_string());

    let mut s = input;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Ok(MeterDuration::ZERO);
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        let first = s.chars().next().ok_or_else(invalid)?;
        if !(first == '.' || first.is_ascii_digit()) {
            return Err(invalid());
        }

        // integer part
        let (int_digits, rest) = take_digits(s);
        s = rest;
        let whole: u64 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| overflow())?
        };

        // fractional part
        let mut frac: u64 = 0;
        let mut scale: f64 = 1.0;
        let mut frac_digits = "";
        if let Some(rest) = s.strip_prefix('.') {
            let (digits, rest) = take_digits(rest);
            s = rest;
            frac_digits = digits;
            for d in digits.bytes() {
                // extra precision past 18 digits is dropped
                if scale >= 1e18 {
                    break;
                }
                frac = frac * 10 + u64::from(d - b'0');
                scale *= 10.0;
            }
        }
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(invalid());
        }

        let unit_end = s
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        let (unit, rest) = s.split_at(unit_end);
        s = rest;
        if unit.is_empty() {
            return Err(ParseDurationError::MissingUnit(input.to_string()));
        }
        let per_unit = unit_nanos(unit).ok_or_else(|| ParseDurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        let mut value = whole.checked_mul(per_unit).ok_or_else(overflow)?;
        if frac > 0 {
            let extra = (frac as f64 * (per_unit as f64 / scale)) as u64;
            value = value.checked_add(extra).ok_or_else(overflow)?;
        }
        total = total.checked_add(value).ok_or_else(overflow)?;
        if total > MAX_NANOS {
            return Err(overflow());
        }
    }

    // total <= MAX_NANOS, so both signs fit in i64
    let magnitude = i64::try_from(total).map_err(|_| overflow())?;
    Ok(MeterDuration::from_nanos(if negative { -magnitude } else { magnitude }))
}
