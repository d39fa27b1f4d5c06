//! Provides [`GridRef`], a national grid reference.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::coord::Coordinate;
use crate::geodesy::{GeodeticTransform, LatLon, OsTransverseMercator};
use crate::parser::MAX_DIGITS;
use crate::{myriad, parser, Error, Result};

/// Represents a national grid reference, a myriad and a position
/// from the south-west corner of the myriad.
///
/// The easting and northing are kept as given digits, so that
/// leading zeros and the resolution survive.
/// The number of digits, the _digit resolution_, takes 0 to 5,
/// and the reference denotes a cell with `10^(5 - digits)` \[m\] edges.
/// The digit resolution 0 denotes the whole myriad.
///
/// # Example
///
/// ```
/// # use bngref::*;
/// # fn main() -> Result<()> {
/// // Construct from &str
/// let gridref: GridRef = "TQ 30695 80671".parse()?;
/// assert_eq!(gridref.myriad(), "TQ");
/// assert_eq!(gridref.easting(), "30695");
/// assert_eq!(gridref.northing(), "80671");
/// assert_eq!(gridref.digit_resolution(), 5);
///
/// // The south-west corner of the cell
/// assert_eq!(gridref.to_coordinate()?, Coordinate::new(530695, 180671));
///
/// // Formats into the canonical form
/// let gridref: GridRef = "SP0886".parse()?;
/// assert_eq!(gridref.to_string(), "SP 08 86");
/// # Ok(())}
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridRef {
    /// The two letters of the myriad
    pub(crate) myriad: String,
    /// The digits of the easting within the myriad
    pub(crate) easting: String,
    /// The digits of the northing within the myriad
    pub(crate) northing: String,
}

impl Display for GridRef {
    /// Returns the canonical form of `self`,
    /// the myriad, easting and northing separated by a single space.
    ///
    /// # Example
    ///
    /// ```
    /// # use bngref::*;
    /// assert_eq!(GridRef::new("TQ", "30695", "80671").to_string(), "TQ 30695 80671");
    /// assert_eq!(GridRef::new("TQ", "", "").to_string(), "TQ");
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.easting.is_empty() {
            f.write_str(&self.myriad)
        } else {
            write!(f, "{} {} {}", self.myriad, self.easting, self.northing)
        }
    }
}

impl FromStr for GridRef {
    type Err = Error;

    /// See [`parser::parse()`].
    fn from_str(s: &str) -> Result<Self> {
        parser::parse(s)
    }
}

impl TryFrom<&str> for GridRef {
    type Error = Error;

    /// See [`parser::parse()`].
    fn try_from(value: &str) -> Result<Self> {
        parser::parse(value)
    }
}

impl From<GridRef> for String {
    fn from(value: GridRef) -> Self {
        value.to_string()
    }
}

/// Returns `10^(5 - digits)`, the cell edge at the digit resolution.
#[inline]
pub(crate) const fn factor(digits: usize) -> i64 {
    10_i64.pow((MAX_DIGITS - digits) as u32)
}

impl GridRef {
    /// Makes a [`GridRef`].
    ///
    /// This does not check the values,
    /// [`GridRef::to_coordinate`] does.
    ///
    /// # Example
    ///
    /// ```
    /// # use bngref::*;
    /// let gridref = GridRef::new("SH", "123", "124");
    /// assert_eq!(gridref.to_string(), "SH 123 124");
    /// ```
    pub fn new(
        myriad: impl Into<String>,
        easting: impl Into<String>,
        northing: impl Into<String>,
    ) -> Self {
        Self {
            myriad: myriad.into(),
            easting: easting.into(),
            northing: northing.into(),
        }
    }

    /// Makes a [`GridRef`] with checking.
    ///
    /// # Errors
    ///
    /// If the myriad is unknown, easting and northing have different lengths,
    /// or either is not a run of at most five digits.
    ///
    /// # Example
    ///
    /// ```
    /// # use bngref::*;
    /// # fn main() -> Result<()> {
    /// let gridref = GridRef::try_new("SH", "123", "124")?;
    /// assert_eq!(gridref.to_string(), "SH 123 124");
    ///
    /// assert!(GridRef::try_new("AA", "123", "124").is_err());
    /// assert!(GridRef::try_new("SH", "123", "12").is_err());
    /// assert!(GridRef::try_new("SH", "12a", "124").is_err());
    /// # Ok(())}
    /// ```
    pub fn try_new(
        myriad: impl Into<String>,
        easting: impl Into<String>,
        northing: impl Into<String>,
    ) -> Result<Self> {
        let gridref = Self::new(myriad, easting, northing);
        gridref.position()?;
        Ok(gridref)
    }

    /// Returns the myriad of `self`.
    pub fn myriad(&self) -> &str {
        &self.myriad
    }

    /// Returns the easting digits of `self`.
    pub fn easting(&self) -> &str {
        &self.easting
    }

    /// Returns the northing digits of `self`.
    pub fn northing(&self) -> &str {
        &self.northing
    }

    /// Returns the number of digits of easting (and northing), 0 to 5.
    ///
    /// # Example
    ///
    /// ```
    /// # use bngref::*;
    /// assert_eq!(GridRef::new("TQ", "", "").digit_resolution(), 0);
    /// assert_eq!(GridRef::new("SP", "08", "86").digit_resolution(), 2);
    /// ```
    pub fn digit_resolution(&self) -> u8 {
        self.easting.len() as u8
    }

    /// Returns the edge of the cell which `self` denotes \[m\].
    ///
    /// # Example
    ///
    /// ```
    /// # use bngref::*;
    /// assert_eq!(GridRef::new("TQ", "", "").precision(), 100_000);
    /// assert_eq!(GridRef::new("SP", "08", "86").precision(), 1_000);
    /// assert_eq!(GridRef::new("TQ", "30695", "80671").precision(), 1);
    /// ```
    pub fn precision(&self) -> u32 {
        factor(self.easting.len().min(MAX_DIGITS)) as u32
    }

    /// Returns the myriad offset and the position within the myriad.
    fn position(&self) -> Result<(Coordinate, i64, i64)> {
        let offset =
            myriad::offset(&self.myriad).ok_or_else(|| Error::new_unknown_myriad(&self.myriad))?;

        if self.easting.len() != self.northing.len() {
            return Err(Error::new_mismatched_digit_length(
                &self.easting,
                &self.northing,
            ));
        }

        if self.easting.is_empty() {
            return Ok((offset, 0, 0));
        }

        let easting = parse_digits(&self.easting)?;
        let northing = parse_digits(&self.northing)?;

        let factor = factor(self.easting.len());
        Ok((offset, easting * factor, northing * factor))
    }

    /// Returns the south-west corner of the cell which `self` denotes.
    ///
    /// A reference coarser than 1 \[m\] resolution gives the corner,
    /// it never rounds to the nearest.
    ///
    /// # Errors
    ///
    /// If the myriad is unknown, easting and northing have different lengths,
    /// or either is not a run of at most five digits.
    ///
    /// # Example
    ///
    /// ```
    /// # use bngref::*;
    /// # fn main() -> Result<()> {
    /// let gridref: GridRef = "SH123124".parse()?;
    /// assert_eq!(gridref.to_coordinate()?, Coordinate::new(212300, 312400));
    ///
    /// // St Helier, south of the false origin
    /// let gridref: GridRef = "XD 92356 20839".parse()?;
    /// assert_eq!(gridref.to_coordinate()?, Coordinate::new(392356, -79161));
    ///
    /// let gridref = GridRef::new("AA", "", "");
    /// assert!(gridref.to_coordinate().is_err());
    /// # Ok(())}
    /// ```
    pub fn to_coordinate(&self) -> Result<Coordinate> {
        let (offset, easting, northing) = self.position()?;

        let coord = Coordinate::new(
            (offset.easting as i64 + easting) as i32,
            (offset.northing as i64 + northing) as i32,
        );

        debug!("{self} resolves to {coord:?}");
        Ok(coord)
    }

    /// Returns the latitude and longitude (WGS84) of the south-west corner
    /// of the cell which `self` denotes.
    ///
    /// # Errors
    ///
    /// If [`GridRef::to_coordinate`] fails.
    ///
    /// # Example
    ///
    /// ```
    /// # use bngref::*;
    /// # fn main() -> Result<()> {
    /// let gridref: GridRef = "TG 51409 13177".parse()?;
    /// let latlon = gridref.to_geodetic()?;
    /// assert!((latlon.latitude() - 52.657977).abs() < 1e-6);
    /// assert!((latlon.longitude() - 1.716038).abs() < 1e-6);
    /// # Ok(())}
    /// ```
    pub fn to_geodetic(&self) -> Result<LatLon> {
        self.to_geodetic_with(&OsTransverseMercator::default())
    }

    /// Returns the latitude and longitude of the south-west corner
    /// of the cell which `self` denotes, by `transform`.
    ///
    /// # Errors
    ///
    /// If [`GridRef::to_coordinate`] fails.
    pub fn to_geodetic_with<T>(&self, transform: &T) -> Result<LatLon>
    where
        T: GeodeticTransform + ?Sized,
    {
        let coord = self.to_coordinate()?;
        Ok(transform.to_lat_lon(&coord))
    }
}

/// Parses a run of at most five ASCII digits.
fn parse_digits(s: &str) -> Result<i64> {
    if s.len() <= MAX_DIGITS && s.bytes().all(|c| c.is_ascii_digit()) {
        s.parse::<u32>()
            .map(i64::from)
            .map_err(|err| Error::new_invalid_digits(s, Some(err)))
    } else {
        // u32 parser accepts a sign and longer runs
        Err(Error::new_invalid_digits(s, s.parse::<u32>().err()))
    }
}
