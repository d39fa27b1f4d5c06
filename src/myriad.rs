//! Provides the myriad (100km square) tables.
//!
//! The table reaches beyond the squares the Ordnance Survey defines:
//! the `X?`/`Y?` row south of the false origin covers the Channel Islands,
//! and the `O?`/`J?` columns cover the North Sea. Agencies with offshore
//! assets use them, hence we support them.
//!
//! # Example
//!
//! ```
//! # use bngref::myriad;
//! # use bngref::Coordinate;
//! assert_eq!(myriad::offset("TQ"), Some(Coordinate::new(500000, 100000)));
//! assert_eq!(myriad::offset("XD"), Some(Coordinate::new(300000, -100000)));
//! assert_eq!(myriad::offset("AA"), None);
//!
//! assert_eq!(myriad::at(5, 2), Some("TQ"));
//! assert_eq!(myriad::at(8, 0), None);
//! ```
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::coord::Coordinate;

/// Edge of a myriad \[m\].
pub const MYRIAD_SIZE: i64 = 100_000;

/// The number of myriad columns, west to east.
pub const COLUMNS: usize = 8;

/// The number of myriad rows, south to north.
///
/// The first row lies south of the false origin.
pub const ROWS: usize = 15;

/// Myriads indexed by `[column][row]`,
/// drawn upside down compared to the map.
const TABLE: [[&str; ROWS]; COLUMNS] = [
    [
        "XA", "SV", "SQ", "SL", "SF", "SA", "NV", "NQ", "NL", "NF", "NA", "HV", "HQ", "HL", "HF",
    ],
    [
        "XB", "SW", "SR", "SM", "SG", "SB", "NW", "NR", "NM", "NG", "NB", "HW", "HR", "HM", "HG",
    ],
    [
        "XC", "SX", "SS", "SN", "SH", "SC", "NX", "NS", "NN", "NH", "NC", "HX", "HS", "HN", "HH",
    ],
    [
        "XD", "SY", "ST", "SO", "SJ", "SD", "NY", "NT", "NO", "NJ", "ND", "HY", "HT", "HO", "HJ",
    ],
    [
        "XE", "SZ", "SU", "SP", "SK", "SE", "NZ", "NU", "NP", "NK", "NE", "HZ", "HU", "HP", "HK",
    ],
    [
        "YA", "TV", "TQ", "TL", "TF", "TA", "OV", "OQ", "OL", "OF", "OA", "JV", "JQ", "JL", "JF",
    ],
    [
        "YB", "TW", "TR", "TM", "TG", "TB", "OW", "OR", "OM", "OG", "OB", "JW", "JR", "JM", "JG",
    ],
    [
        "YC", "TX", "TS", "TN", "TH", "TC", "OX", "OS", "ON", "OH", "OC", "JX", "JS", "JN", "JH",
    ],
];

/// South-west corners keyed by myriad, derived from [`TABLE`].
fn offsets() -> &'static HashMap<&'static str, Coordinate> {
    static OFFSETS: OnceLock<HashMap<&'static str, Coordinate>> = OnceLock::new();
    OFFSETS.get_or_init(|| {
        let mut map = HashMap::with_capacity(COLUMNS * ROWS);
        for (column, myriads) in TABLE.iter().enumerate() {
            for (row, myriad) in myriads.iter().enumerate() {
                // the first row is one myriad south of the false origin
                let easting = MYRIAD_SIZE * column as i64;
                let northing = MYRIAD_SIZE * (row as i64 - 1);
                map.insert(*myriad, Coordinate::new(easting as i32, northing as i32));
            }
        }
        map
    })
}

/// Returns the south-west corner of `myriad`.
///
/// Returns [`None`] if `myriad` is unknown.
#[inline]
pub fn offset(myriad: &str) -> Option<Coordinate> {
    offsets().get(myriad).copied()
}

/// Returns `true` if `myriad` is a known myriad.
#[inline]
pub fn contains(myriad: &str) -> bool {
    offsets().contains_key(myriad)
}

/// Returns the myriad at the `column`-th (west to east)
/// and `row`-th (south to north) position.
#[inline]
pub fn at(column: usize, row: usize) -> Option<&'static str> {
    TABLE.get(column).and_then(|myriads| myriads.get(row)).copied()
}

/// Returns an iterator of all known myriads, column by column.
pub fn iter() -> impl Iterator<Item = &'static str> {
    TABLE.iter().flat_map(|myriads| myriads.iter().copied())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_no_duplicates() {
        let mut seen = HashSet::new();
        for myriad in iter() {
            assert!(seen.insert(myriad), "duplicated myriad {myriad:?}");
        }
        assert_eq!(seen.len(), COLUMNS * ROWS);
    }

    #[test]
    fn test_table_and_offsets_agree() {
        assert_eq!(offsets().len(), COLUMNS * ROWS);

        for column in 0..COLUMNS {
            for row in 0..ROWS {
                let myriad = at(column, row).unwrap();
                assert!(contains(myriad));
                assert_eq!(
                    offset(myriad),
                    Some(Coordinate::new(
                        100_000 * column as i32,
                        100_000 * (row as i32 - 1)
                    )),
                    "{myriad}"
                );
            }
        }
    }

    #[test]
    fn test_offset() {
        for (myriad, e) in [
            ("SV", Coordinate::new(0, 0)),
            ("XA", Coordinate::new(0, -100000)),
            ("YC", Coordinate::new(700000, -100000)),
            ("HF", Coordinate::new(0, 1300000)),
            ("JH", Coordinate::new(700000, 1300000)),
            ("NT", Coordinate::new(300000, 600000)),
            ("TG", Coordinate::new(600000, 300000)),
        ] {
            assert_eq!(offset(myriad), Some(e), "{myriad}");
        }

        for myriad in ["AA", "ZZ", "SI", "tq", "", "TQQ"] {
            assert_eq!(offset(myriad), None, "{myriad}");
        }
    }

    #[test]
    fn test_at() {
        assert_eq!(at(0, 0), Some("XA"));
        assert_eq!(at(7, 14), Some("JH"));
        assert_eq!(at(COLUMNS, 0), None);
        assert_eq!(at(0, ROWS), None);
    }
}
