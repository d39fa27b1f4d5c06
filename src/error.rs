//! Provides the error type of this crate.
use std::num::ParseIntError;

/// Alias for a `Result<T, bngref::error::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents all possible errors that can occur by this crate.
#[derive(Debug)]
pub struct Error {
    err: Box<ErrorKind>,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.err)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.err.as_ref() {
            ErrorKind::InvalidDigits {
                source: Some(source),
                ..
            } => Some(source),
            _ => None,
        }
    }
}

impl Error {
    /// Returns a error kind.
    pub fn kind(&self) -> &ErrorKind {
        &self.err
    }
}

impl Error {
    pub(crate) fn new_malformed_reference(s: &str) -> Self {
        Self {
            err: Box::new(ErrorKind::MalformedReference { s: s.to_string() }),
        }
    }

    pub(crate) fn new_unknown_myriad(myriad: &str) -> Self {
        Self {
            err: Box::new(ErrorKind::UnknownMyriad {
                myriad: myriad.to_string(),
            }),
        }
    }

    pub(crate) fn new_mismatched_digit_length(easting: &str, northing: &str) -> Self {
        Self {
            err: Box::new(ErrorKind::MismatchedDigitLength {
                easting: easting.to_string(),
                northing: northing.to_string(),
            }),
        }
    }

    pub(crate) fn new_invalid_digits(s: &str, source: Option<ParseIntError>) -> Self {
        Self {
            err: Box::new(ErrorKind::InvalidDigits {
                s: s.to_string(),
                source,
            }),
        }
    }

    pub(crate) fn new_invalid_resolution(digits: i32) -> Self {
        Self {
            err: Box::new(ErrorKind::InvalidResolution { digits }),
        }
    }

    pub(crate) fn new_out_of_extents(direction: Direction) -> Self {
        Self {
            err: Box::new(ErrorKind::OutOfExtents { direction }),
        }
    }
}

#[derive(Debug)]
pub enum ErrorKind {
    /// The text does not look like a grid reference.
    MalformedReference {
        /// Invalid data
        s: String,
    },
    /// Two letters which do not name a known myriad.
    UnknownMyriad {
        /// Invalid myriad
        myriad: String,
    },
    /// Easting and northing have different digit counts.
    MismatchedDigitLength { easting: String, northing: String },
    /// Easting or northing is not a run of (at most five) decimal digits.
    InvalidDigits {
        /// Invalid data
        s: String,
        /// The error of the integer parser, if any
        source: Option<ParseIntError>,
    },
    /// Digit resolution must satisfy 0 <= and <= 5.
    InvalidResolution { digits: i32 },
    /// The coordinate lies outside the myriad table.
    OutOfExtents { direction: Direction },
}

/// The side of the myriad table that a coordinate falls beyond.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    West,
    East,
    South,
    North,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Direction::West => "west",
            Direction::East => "east",
            Direction::South => "south",
            Direction::North => "north",
        };
        f.write_str(s)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ErrorKind::MalformedReference { s } => write!(f, "badly formatted NGR: '{s}'"),
            ErrorKind::UnknownMyriad { myriad } => write!(f, "unknown myriad: '{myriad}'"),
            ErrorKind::MismatchedDigitLength { easting, northing } => write!(
                f,
                "mismatched digit lengths: easting '{easting}', northing '{northing}'"
            ),
            ErrorKind::InvalidDigits { s, .. } => write!(f, "invalid digits in NGR: '{s}'"),
            ErrorKind::InvalidResolution { digits } => write!(
                f,
                "invalid digit resolution: must satisfy 0 <= and <= 5, not {digits}"
            ),
            ErrorKind::OutOfExtents { direction } => {
                write!(f, "outside the grid: {direction} of extents")
            }
        }
    }
}
