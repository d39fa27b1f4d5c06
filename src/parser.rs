//! Provides the grammar of grid reference text.
//!
//! A grid reference is a myriad, followed by an optional space,
//! followed by an optional pair of equal length digit runs
//! (1 to 5 digits each) which may be separated by a single space,
//! e.g. `TQ`, `SP0886`, `TQ 30695 80671`.
//!
//! A two-character text is taken as a bare myriad without matching
//! the grammar; the myriad table decides whether it exists.
use log::trace;

use crate::gridref::GridRef;
use crate::myriad;
use crate::{Error, Result};

/// Max digits of each of easting and northing.
pub const MAX_DIGITS: usize = 5;

/// Returns `true` if the letters are allowed as a myriad.
///
/// This accepts exactly the myriads in the myriad table.
/// The letter `I` is never used.
#[inline]
const fn is_myriad_pair(first: u8, second: u8) -> bool {
    matches!(
        (first, second),
        (b'H' | b'J', b'F'..=b'H')
            | (b'N' | b'S', b'A'..=b'H')
            | (b'H' | b'N' | b'S', b'J'..=b'Z')
            | (b'O' | b'T' | b'Y', b'A'..=b'C')
            | (b'O' | b'T', b'F'..=b'H')
            | (b'J' | b'O' | b'T', b'L'..=b'N' | b'Q'..=b'S' | b'V'..=b'X')
            | (b'X', b'A'..=b'E')
    )
}

/// Returns `true` if `s` is a myriad according to the grammar.
///
/// # Example
///
/// ```
/// # use bngref::parser::is_myriad;
/// assert!(is_myriad("TQ"));
/// assert!(is_myriad("XD"));
/// assert!(!is_myriad("TI"));
/// assert!(!is_myriad("tq"));
/// assert!(!is_myriad("TQ1"));
/// ```
pub fn is_myriad(s: &str) -> bool {
    match s.as_bytes() {
        [first, second] => is_myriad_pair(*first, *second),
        _ => false,
    }
}

/// Returns `true` if `s` is a run of 1 to 5 ASCII digits.
#[inline]
fn is_digits(s: &str) -> bool {
    (1..=MAX_DIGITS).contains(&s.len()) && s.bytes().all(|c| c.is_ascii_digit())
}

/// Splits `s` into myriad, easting and northing, if `s` matches the grammar.
fn split(s: &str) -> Option<(&str, &str, &str)> {
    let (myriad, rest) = match s.as_bytes() {
        [first, second, ..] if is_myriad_pair(*first, *second) => s.split_at(2),
        _ => return None,
    };

    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    if rest.is_empty() {
        return Some((myriad, "", ""));
    }

    let (easting, northing) = match rest.split_once(' ') {
        Some(pair) => pair,
        None if rest.len() % 2 == 0 && rest.is_ascii() => rest.split_at(rest.len() / 2),
        None => return None,
    };

    if easting.len() == northing.len() && is_digits(easting) && is_digits(northing) {
        Some((myriad, easting, northing))
    } else {
        None
    }
}

/// Parses a grid reference.
///
/// This is the implementation of [`GridRef`]'s [`FromStr`](std::str::FromStr).
///
/// # Errors
///
/// If `s` does not match the grammar, the myriad is unknown
/// or the digits have different lengths.
///
/// # Example
///
/// ```
/// # use bngref::*;
/// # fn main() -> Result<()> {
/// let gridref = parser::parse("TQ3069580671")?;
/// assert_eq!(gridref, GridRef::new("TQ", "30695", "80671"));
///
/// let gridref = parser::parse("TQ")?;
/// assert_eq!(gridref, GridRef::new("TQ", "", ""));
///
/// assert!(parser::parse("TQ1").is_err());
/// # Ok(())}
/// ```
pub fn parse(s: &str) -> Result<GridRef> {
    trace!("parse grid reference {s:?}");

    let (myriad, easting, northing) = if s.chars().count() == 2 {
        (s, "", "")
    } else {
        split(s).ok_or_else(|| Error::new_malformed_reference(s))?
    };

    if !myriad::contains(myriad) {
        return Err(Error::new_unknown_myriad(myriad));
    }

    if easting.len() != northing.len() {
        return Err(Error::new_mismatched_digit_length(easting, northing));
    }

    Ok(GridRef::new(myriad, easting, northing))
}
