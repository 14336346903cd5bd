//! Request parameter parsing and bounds checks.
//!
//! Numeric parameters are read leniently: leading whitespace, an optional
//! sign, then the leading run of digits. Anything after the digits is ignored,
//! so `"12abc"` reads as 12 and `"2.5"` as 2. A `0x` prefix switches to
//! hexadecimal, so `"0x10"` reads as 16.

use super::error::ApiError;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_LIMIT: u64 = 50;
pub const MAX_PAGE_LIMIT: u64 = 1000;
pub const MAX_RANGE_SPAN: u64 = 10_000;
pub const DEFAULT_TOP_COUNT: u64 = 50;
pub const MAX_TOP_COUNT: u64 = 1000;

/// Parses the leading integer of `input`, saturating at the `i64` bounds.
/// Returns `None` when no digit follows the optional sign and radix prefix.
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else {
            break;
        };
        seen_digit = true;
        let digit = i64::from(digit);
        value = if negative {
            value.saturating_mul(i64::from(radix)).saturating_sub(digit)
        } else {
            value.saturating_mul(i64::from(radix)).saturating_add(digit)
        };
    }

    seen_digit.then_some(value)
}

fn positive(value: Option<&str>) -> Option<u64> {
    value
        .and_then(parse_int_prefix)
        .filter(|&v| v > 0)
        .map(|v| v as u64)
}

/// A resolved page request: never invalid, bad input falls back to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub limit: u64,
}

impl PageWindow {
    pub fn resolve(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = positive(page).unwrap_or(DEFAULT_PAGE);
        let limit = positive(limit)
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .min(MAX_PAGE_LIMIT);
        Self { page, limit }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

/// Validates an inclusive rank range.
pub fn validate_range(from: &str, to: &str) -> Result<(u64, u64), ApiError> {
    let (from, to) = match (parse_int_prefix(from), parse_int_prefix(to)) {
        (Some(from), Some(to)) if from >= 1 && to >= from => (from as u64, to as u64),
        _ => {
            return Err(ApiError::Validation(
                "Invalid rank range. 'from' and 'to' must be positive integers with from <= to"
                    .to_string(),
            ))
        }
    };

    if to - from > MAX_RANGE_SPAN {
        return Err(ApiError::Validation(
            "Rank range too large. Maximum range size is 10,000 positions".to_string(),
        ));
    }

    Ok((from, to))
}

/// Resolves the top-N count.
///
/// The default is applied before the sign check: a non-numeric or zero count
/// becomes 50, while a negative count is rejected.
pub fn resolve_top_count(count: &str) -> Result<u64, ApiError> {
    let count = match parse_int_prefix(count) {
        Some(0) | None => DEFAULT_TOP_COUNT as i64,
        Some(count) => count.min(MAX_TOP_COUNT as i64),
    };

    if count < 1 {
        return Err(ApiError::Validation(
            "Invalid count. Must be a positive integer".to_string(),
        ));
    }
    Ok(count as u64)
}
