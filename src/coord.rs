//! Provides [`Coordinate`], an integer grid position.
use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Direction;
use crate::geodesy::{GeodeticTransform, LatLon, OsTransverseMercator};
use crate::gridref::{factor, GridRef};
use crate::myriad::{self, MYRIAD_SIZE};
use crate::parser::MAX_DIGITS;
use crate::{Error, Result};

/// Represents a position on the grid, easting and northing in whole metres.
///
/// The origin is the south-west corner of the `SV` myriad,
/// the false origin of the British National Grid.
/// The Channel Islands myriads (`XA` to `YC`) lie south of it
/// and have negative northing.
///
/// # Example
///
/// ```
/// # use bngref::*;
/// # fn main() -> Result<()> {
/// let coord = Coordinate::new(530695, 180671);
/// assert_eq!(coord.easting(), 530695);
/// assert_eq!(coord.northing(), 180671);
///
/// // The cell containing coord at the digit resolution
/// assert_eq!(coord.to_grid_ref(5)?.to_string(), "TQ 30695 80671");
/// assert_eq!(coord.to_grid_ref(2)?.to_string(), "TQ 30 80");
/// assert_eq!(coord.to_grid_ref(0)?.to_string(), "TQ");
/// # Ok(())}
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    /// The easting \[m\]
    pub(crate) easting: i32,
    /// The northing \[m\]
    pub(crate) northing: i32,
}

impl From<(i32, i32)> for Coordinate {
    /// see [`Coordinate::new()`]
    fn from(rhs: (i32, i32)) -> Self {
        Self::new(rhs.0, rhs.1)
    }
}

impl From<Coordinate> for (i32, i32) {
    fn from(value: Coordinate) -> Self {
        (value.easting, value.northing)
    }
}

impl TryFrom<&GridRef> for Coordinate {
    type Error = Error;

    /// see [`GridRef::to_coordinate()`]
    fn try_from(value: &GridRef) -> Result<Self> {
        value.to_coordinate()
    }
}

impl Coordinate {
    /// Makes a [`Coordinate`].
    ///
    /// This does not check the value range.
    pub const fn new(easting: i32, northing: i32) -> Self {
        Self { easting, northing }
    }

    /// Returns the easting of `self`.
    pub const fn easting(&self) -> i32 {
        self.easting
    }

    /// Returns the northing of `self`.
    pub const fn northing(&self) -> i32 {
        self.northing
    }

    /// Returns the grid reference, at the digit resolution `digits`,
    /// of the cell containing `self`.
    ///
    /// It truncates to the south-west corner of the cell,
    /// it never rounds.
    ///
    /// # Errors
    ///
    /// If `digits` is not in 0 to 5 inclusive,
    /// or `self` is outside the myriad table.
    ///
    /// # Example
    ///
    /// ```
    /// # use bngref::*;
    /// # fn main() -> Result<()> {
    /// // Edinburgh
    /// let coord = Coordinate::new(326002, 673723);
    /// assert_eq!(coord.to_grid_ref(2)?, "NT2673".parse::<GridRef>()?);
    ///
    /// assert!(coord.to_grid_ref(6).is_err());
    /// assert!(Coordinate::new(-1, 0).to_grid_ref(5).is_err());
    /// # Ok(())}
    /// ```
    pub fn to_grid_ref(&self, digits: i32) -> Result<GridRef> {
        let width = match usize::try_from(digits) {
            Ok(width) if width <= MAX_DIGITS => width,
            _ => return Err(Error::new_invalid_resolution(digits)),
        };

        let easting = self.easting as i64;
        if easting < 0 {
            return Err(Error::new_out_of_extents(Direction::West));
        }
        let column = (easting / MYRIAD_SIZE) as usize;
        if column >= myriad::COLUMNS {
            return Err(Error::new_out_of_extents(Direction::East));
        }

        // shift for the Channel Islands row
        let northing = self.northing as i64 + MYRIAD_SIZE;
        if northing < 0 {
            return Err(Error::new_out_of_extents(Direction::South));
        }
        let row = (northing / MYRIAD_SIZE) as usize;
        if row >= myriad::ROWS {
            return Err(Error::new_out_of_extents(Direction::North));
        }

        let myriad =
            myriad::at(column, row).ok_or_else(|| Error::new_out_of_extents(Direction::North))?;

        let gridref = if width == 0 {
            GridRef::new(myriad, "", "")
        } else {
            let factor = factor(width);
            GridRef::new(
                myriad,
                format!("{:0width$}", (easting % MYRIAD_SIZE) / factor),
                format!("{:0width$}", (northing % MYRIAD_SIZE) / factor),
            )
        };

        debug!("{self:?} resolves to {gridref}");
        Ok(gridref)
    }

    /// Returns the latitude and longitude (WGS84) of `self`.
    ///
    /// # Example
    ///
    /// ```
    /// # use bngref::*;
    /// let latlon = Coordinate::new(651409, 313177).to_geodetic();
    /// assert!((latlon.latitude() - 52.657977).abs() < 1e-6);
    /// assert!((latlon.longitude() - 1.716038).abs() < 1e-6);
    /// ```
    pub fn to_geodetic(&self) -> LatLon {
        self.to_geodetic_with(&OsTransverseMercator::default())
    }

    /// Returns the latitude and longitude of `self` by `transform`.
    pub fn to_geodetic_with<T>(&self, transform: &T) -> LatLon
    where
        T: GeodeticTransform + ?Sized,
    {
        transform.to_lat_lon(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn direction(result: Result<GridRef>) -> Option<Direction> {
        match result.unwrap_err().kind() {
            ErrorKind::OutOfExtents { direction } => Some(*direction),
            _ => None,
        }
    }

    #[test]
    fn test_to_grid_ref() {
        let coord = Coordinate::new(530695, 180671);
        for (e, digits) in [
            ("TQ", 0),
            ("TQ 3 8", 1),
            ("TQ 30 80", 2),
            ("TQ 306 806", 3),
            ("TQ 3069 8067", 4),
            ("TQ 30695 80671", 5),
        ] {
            assert_eq!(coord.to_grid_ref(digits).unwrap().to_string(), e);
        }
    }

    #[test]
    fn test_truncation() {
        let coord = Coordinate::new(326002, 673723);
        assert_eq!(coord.to_grid_ref(2).unwrap().to_string(), "NT 26 73");

        // exact multiples of the myriad give zeros
        let coord = Coordinate::new(300000, 600000);
        assert_eq!(coord.to_grid_ref(5).unwrap().to_string(), "NT 00000 00000");
        let coord = Coordinate::new(0, -100000);
        assert_eq!(coord.to_grid_ref(3).unwrap().to_string(), "XA 000 000");

        // the last metre of a myriad
        let coord = Coordinate::new(399999, -1);
        assert_eq!(coord.to_grid_ref(5).unwrap().to_string(), "XD 99999 99999");
        assert_eq!(coord.to_grid_ref(1).unwrap().to_string(), "XD 9 9");
        assert_eq!(
            Coordinate::new(400000, 0).to_grid_ref(1).unwrap().to_string(),
            "SZ 0 0"
        );
    }

    #[test]
    fn test_digit_resolution() {
        let coord = Coordinate::new(530695, 180671);
        for digits in [0, 1, 2, 3, 4, 5] {
            assert!(coord.to_grid_ref(digits).is_ok(), "{digits}");
        }

        for digits in [-1, 6, 7, 9, 11, 12, 13, i32::MIN, i32::MAX] {
            let err = coord.to_grid_ref(digits).unwrap_err();
            assert!(
                matches!(err.kind(), ErrorKind::InvalidResolution { digits: d } if *d == digits),
                "{digits}"
            );
        }
    }

    #[test]
    fn test_south_west_extents() {
        let o = "XA".parse::<GridRef>().unwrap().to_coordinate().unwrap();
        assert_eq!(o, Coordinate::new(0, -100000));

        for digits in 0..=5 {
            assert!(o.to_grid_ref(digits).is_ok());

            for (e, coord) in [
                (Direction::West, Coordinate::new(o.easting - 1, o.northing)),
                (Direction::South, Coordinate::new(o.easting, o.northing - 1)),
                (
                    Direction::West,
                    Coordinate::new(o.easting - 1, o.northing - 1),
                ),
            ] {
                assert_eq!(
                    direction(coord.to_grid_ref(digits)),
                    Some(e),
                    "{coord:?} {digits}"
                );
            }
        }
    }

    #[test]
    fn test_north_east_extents() {
        let o = "JH".parse::<GridRef>().unwrap().to_coordinate().unwrap();
        assert_eq!(o, Coordinate::new(700000, 1300000));

        for digits in 0..=5 {
            // the north-east metre of JH
            let corner = Coordinate::new(o.easting + 99999, o.northing + 99999);
            assert_eq!(corner.to_grid_ref(digits).unwrap().myriad(), "JH");

            for (e, coord) in [
                (
                    Direction::East,
                    Coordinate::new(o.easting + 100000, o.northing),
                ),
                (
                    Direction::North,
                    Coordinate::new(o.easting, o.northing + 100000),
                ),
                (
                    Direction::East,
                    Coordinate::new(o.easting + 100000, o.northing + 100000),
                ),
            ] {
                assert_eq!(
                    direction(coord.to_grid_ref(digits)),
                    Some(e),
                    "{coord:?} {digits}"
                );
            }
        }
    }

    #[test]
    fn test_extreme_values() {
        for (e, coord) in [
            (Direction::West, Coordinate::new(i32::MIN, 0)),
            (Direction::East, Coordinate::new(i32::MAX, 0)),
            (Direction::South, Coordinate::new(0, i32::MIN)),
            (Direction::North, Coordinate::new(0, i32::MAX)),
        ] {
            assert_eq!(direction(coord.to_grid_ref(5)), Some(e), "{coord:?}");
        }
    }

    #[test]
    fn test_every_myriad_round_trips() {
        for myriad in myriad::iter() {
            let gridref = GridRef::new(myriad, "", "");
            let coord = gridref.to_coordinate().unwrap();
            assert_eq!(coord.to_grid_ref(0).unwrap(), gridref);

            let gridref = GridRef::new(myriad, "12345", "67890");
            let coord = gridref.to_coordinate().unwrap();
            assert_eq!(coord.to_grid_ref(5).unwrap(), gridref);
        }
    }

    #[test]
    fn test_conversion() {
        let coord: Coordinate = (1, 2).into();
        assert_eq!(coord, Coordinate::new(1, 2));
        assert_eq!(<(i32, i32)>::from(coord), (1, 2));

        let gridref = GridRef::new("SV", "00001", "00002");
        assert_eq!(Coordinate::try_from(&gridref).unwrap(), coord);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() {
        use serde_test::{assert_tokens, Token};

        assert_tokens(
            &Coordinate::new(530695, -180671),
            &[
                Token::Struct {
                    name: "Coordinate",
                    len: 2,
                },
                Token::Str("easting"),
                Token::I32(530695),
                Token::Str("northing"),
                Token::I32(-180671),
                Token::StructEnd,
            ],
        );
    }
}
