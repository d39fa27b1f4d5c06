//! # bngref
//!
//! British National Grid references (NGR) of the Ordnance Survey [^1],
//! parsing, formatting and conversion to and from integer grid coordinates
//! in whole metres, and onward to latitude and longitude.
//!
//! ```
//! use bngref::{Coordinate, GridRef};
//!
//! fn main() -> bngref::Result<()> {
//!     // Parse a grid reference
//!     let gridref: GridRef = "TQ 30695 80671".parse()?;
//!     // Prints GridRef { myriad: "TQ", easting: "30695", northing: "80671" }
//!     println!("{gridref:?}");
//!
//!     // The south-west corner of the cell
//!     let coord = gridref.to_coordinate()?;
//!     assert_eq!(coord, Coordinate::new(530695, 180671));
//!
//!     // Back to a grid reference at lower resolution, 100m
//!     let gridref = coord.to_grid_ref(3)?;
//!     assert_eq!(gridref.to_string(), "TQ 306 806");
//!
//!     // Latitude and longitude on WGS84
//!     let latlon = coord.to_geodetic();
//!     // Prints LatLon { latitude: 51.50..., longitude: -0.12... }
//!     println!("{latlon:?}");
//!
//!     Ok(())
//! }
//! ```
//!
//! Features:
//!
//! - Integer arithmetic only, from text to coordinate and back
//! - Supports every digit resolution, from the bare myriad (100km)
//!   to 5 digits (1m)
//! - Truncates to the south-west corner of the cell, never rounds
//! - Supports the myriads outside the official grid used for offshore assets,
//!   the Channel Islands row (`XA` to `YC`) and the North Sea columns
//!   (`O?` and `J?`)
//! - Pluggable conversion to latitude and longitude, see [`geodesy`]
//!
//! The grammar of grid reference text is described in [`parser`].
//!
//! # Serialization and Deserialization
//!
//! It supports (de)serialization by [`serde` crate](https://crates.io/crates/serde)
//! only if the feature `serde` is enabled.
//!
//! ```
//! # #[cfg(feature = "serde")]
//! # fn main() -> serde_json::Result<()> {
//! use bngref::GridRef;
//!
//! let gridref = GridRef::new("SP", "08", "86");
//!
//! let json = serde_json::to_string(&gridref)?;
//! assert_eq!(json, r#"{"myriad":"SP","easting":"08","northing":"86"}"#);
//!
//! let result: GridRef = serde_json::from_str(&json)?;
//! assert_eq!(result, gridref);
//! # Ok(())}
//! # #[cfg(not(feature = "serde"))]
//! # fn main() {}
//! ```
//!
//! # Logging
//!
//! This emits conversion records through the [`log`](https://crates.io/crates/log) facade,
//! and installs no logger.
//!
//! [^1]: Ordnance Survey, A Guide to the National Grid:
//!       <https://www.ordnancesurvey.co.uk/resources/maps-and-geographic-resources/the-national-grid.html>

#[doc(inline)]
pub use coord::Coordinate;
#[doc(inline)]
pub use error::{Direction, Error, ErrorKind, Result};
#[doc(inline)]
pub use geodesy::{GeodeticTransform, LatLon};
#[doc(inline)]
pub use gridref::GridRef;

pub mod coord;
pub mod error;
pub mod geodesy;
pub mod gridref;
mod internal;
pub mod myriad;
pub mod parser;
