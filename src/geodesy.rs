//! Provides the conversion from grid coordinate to latitude and longitude.
//!
//! The conversion is a [`GeodeticTransform`], any pure function
//! from [`Coordinate`] to [`LatLon`].
//! We provide [`OsTransverseMercator`], the inverse projection of
//! the Ordnance Survey on the Airy 1830 ellipsoid, optionally followed
//! by the Helmert transformation into WGS84.
//!
//! # Example
//!
//! ```
//! # use bngref::*;
//! # use bngref::geodesy::*;
//! let coord = Coordinate::new(651409, 313177);
//!
//! // WGS84, the default
//! let latlon = coord.to_geodetic();
//! assert!((latlon.latitude() - 52.657977).abs() < 1e-6);
//! assert!((latlon.longitude() - 1.716038).abs() < 1e-6);
//!
//! // OSGB36
//! let latlon = coord.to_geodetic_with(&OsTransverseMercator::new(Datum::Osgb36));
//! assert!((latlon.latitude() - 52.657568).abs() < 1e-6);
//! assert!((latlon.longitude() - 1.717908).abs() < 1e-6);
//!
//! // Any function works
//! let latlon = coord.to_geodetic_with(&|_: &Coordinate| LatLon::new(1.0, 2.0));
//! assert_eq!(latlon, LatLon::new(1.0, 2.0));
//! ```
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::coord::Coordinate;
use crate::internal::fma;

/// Represents a position on an ellipsoid, latitude and longitude in degree.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatLon {
    /// The latitude \[deg\]
    pub(crate) latitude: f64,
    /// The longitude \[deg\]
    pub(crate) longitude: f64,
}

impl From<LatLon> for (f64, f64) {
    /// Returns `(latitude, longitude)`.
    fn from(value: LatLon) -> Self {
        (value.latitude, value.longitude)
    }
}

impl LatLon {
    /// Makes a [`LatLon`].
    ///
    /// This does not check the value range.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns the latitude of `self`.
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude of `self`.
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Converts an integer grid coordinate into latitude and longitude.
pub trait GeodeticTransform {
    /// Returns the latitude and longitude of `coord`.
    fn to_lat_lon(&self, coord: &Coordinate) -> LatLon;
}

impl<F> GeodeticTransform for F
where
    F: Fn(&Coordinate) -> LatLon,
{
    fn to_lat_lon(&self, coord: &Coordinate) -> LatLon {
        self(coord)
    }
}

/// Represents a reference ellipsoid.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Ellipsoid {
    /// The semi-major axis \[m\]
    pub a: f64,
    /// The semi-minor axis \[m\]
    pub b: f64,
}

impl Ellipsoid {
    /// Airy 1830, the ellipsoid of OSGB36.
    pub const AIRY_1830: Self = Self {
        a: 6377563.396,
        b: 6356256.909,
    };

    /// The ellipsoid of WGS84.
    pub const WGS84: Self = Self {
        a: 6378137.0,
        b: 6356752.314245,
    };

    /// Returns the square of the first eccentricity.
    #[inline]
    fn e2(&self) -> f64 {
        1.0 - (self.b * self.b) / (self.a * self.a)
    }

    /// Returns the geocentric Cartesian coordinate of `(phi, lambda)` \[rad\]
    /// on the surface.
    fn to_cartesian(&self, phi: f64, lambda: f64) -> [f64; 3] {
        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let e2 = self.e2();

        let nu = self.a / (1.0 - e2 * sin_phi * sin_phi).sqrt();
        [
            nu * cos_phi * cos_lambda,
            nu * cos_phi * sin_lambda,
            nu * (1.0 - e2) * sin_phi,
        ]
    }

    /// Returns `(phi, lambda)` \[rad\] of the geocentric Cartesian coordinate,
    /// by Bowring's method.
    fn to_geographic(&self, [x, y, z]: [f64; 3]) -> (f64, f64) {
        let Self { a, b } = *self;
        let e2 = self.e2();
        let epsilon2 = e2 / (1.0 - e2);

        let p = x.hypot(y);
        let r = p.hypot(z);

        let tan_beta = (b * z) / (a * p) * (1.0 + epsilon2 * b / r);
        let sin_beta = tan_beta / (1.0 + tan_beta * tan_beta).sqrt();
        let cos_beta = sin_beta / tan_beta;

        let phi = f64::atan2(
            fma(epsilon2 * b, sin_beta.powi(3), z),
            fma(-e2 * a, cos_beta.powi(3), p),
        );
        let lambda = f64::atan2(y, x);
        (phi, lambda)
    }
}

/// Represents a seven-parameter Helmert transformation.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Helmert {
    /// Translation \[m\]
    pub tx: f64,
    /// Translation \[m\]
    pub ty: f64,
    /// Translation \[m\]
    pub tz: f64,
    /// Scale \[ppm\]
    pub s: f64,
    /// Rotation \[arcsec\]
    pub rx: f64,
    /// Rotation \[arcsec\]
    pub ry: f64,
    /// Rotation \[arcsec\]
    pub rz: f64,
}

impl Helmert {
    /// From OSGB36 to WGS84.
    pub const OSGB36_TO_WGS84: Self = Self {
        tx: 446.448,
        ty: -125.157,
        tz: 542.060,
        s: -20.4894,
        rx: 0.1502,
        ry: 0.2470,
        rz: 0.8421,
    };

    /// Returns the transformed geocentric Cartesian coordinate.
    pub fn apply(&self, [x, y, z]: [f64; 3]) -> [f64; 3] {
        let s = self.s / 1e6 + 1.0;
        let rx = (self.rx / 3600.0).to_radians();
        let ry = (self.ry / 3600.0).to_radians();
        let rz = (self.rz / 3600.0).to_radians();

        [
            self.tx + x * s - y * rz + z * ry,
            self.ty + x * rz + y * s - z * rx,
            self.tz - x * ry + y * rx + z * s,
        ]
    }
}

/// The datum of resulting latitude and longitude.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Datum {
    /// OSGB36, the datum of the British National Grid
    Osgb36,
    /// WGS84
    #[default]
    Wgs84,
}

/// Scale factor on the central meridian.
const F0: f64 = 0.9996012717;
/// Latitude of the true origin \[deg\]
const PHI0: f64 = 49.0;
/// Longitude of the true origin \[deg\]
const LAMBDA0: f64 = -2.0;
/// Easting of the true origin \[m\]
const E0: f64 = 400000.0;
/// Northing of the true origin \[m\]
const N0: f64 = -100000.0;

/// The inverse transverse Mercator projection of the British National Grid.
///
/// # Example
///
/// ```
/// # use bngref::*;
/// # use bngref::geodesy::*;
/// // The true origin
/// let tm = OsTransverseMercator::new(Datum::Osgb36);
/// let latlon = tm.to_lat_lon(&Coordinate::new(400000, -100000));
/// assert!((latlon.latitude() - 49.0).abs() < 1e-12);
/// assert!((latlon.longitude() - -2.0).abs() < 1e-12);
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct OsTransverseMercator {
    datum: Datum,
}

impl OsTransverseMercator {
    /// Makes a [`OsTransverseMercator`] resulting in `datum`.
    pub const fn new(datum: Datum) -> Self {
        Self { datum }
    }

    /// Returns the datum of resulting latitude and longitude.
    pub const fn datum(&self) -> &Datum {
        &self.datum
    }

    /// Returns `(phi, lambda)` \[rad\] on Airy 1830.
    fn inverse(easting: f64, northing: f64) -> (f64, f64) {
        let Ellipsoid { a, b } = Ellipsoid::AIRY_1830;
        let e2 = Ellipsoid::AIRY_1830.e2();
        let phi0 = PHI0.to_radians();
        let lambda0 = LAMBDA0.to_radians();

        let n = (a - b) / (a + b);
        let n2 = n * n;
        let n3 = n2 * n;

        // meridional arc
        let arc = |phi: f64| {
            let ma = (1.0 + n + 1.25 * n2 + 1.25 * n3) * (phi - phi0);
            let mb = (3.0 * n + 3.0 * n2 + 21.0 / 8.0 * n3)
                * (phi - phi0).sin()
                * (phi + phi0).cos();
            let mc = (15.0 / 8.0 * n2 + 15.0 / 8.0 * n3)
                * (2.0 * (phi - phi0)).sin()
                * (2.0 * (phi + phi0)).cos();
            let md = 35.0 / 24.0 * n3 * (3.0 * (phi - phi0)).sin() * (3.0 * (phi + phi0)).cos();
            b * F0 * (ma - mb + mc - md)
        };

        let mut phi = phi0;
        let mut m = 0.0;
        loop {
            phi += (northing - N0 - m) / (a * F0);
            m = arc(phi);
            if (northing - N0 - m).abs() < 1e-5 {
                break;
            }
        }

        let (sin_phi, cos_phi) = phi.sin_cos();
        let w = 1.0 - e2 * sin_phi * sin_phi;
        let nu = a * F0 / w.sqrt();
        let rho = a * F0 * (1.0 - e2) / w.powf(1.5);
        let eta2 = nu / rho - 1.0;

        let tan_phi = phi.tan();
        let tan2 = tan_phi * tan_phi;
        let tan4 = tan2 * tan2;
        let tan6 = tan4 * tan2;
        let sec_phi = 1.0 / cos_phi;
        let nu3 = nu * nu * nu;
        let nu5 = nu3 * nu * nu;
        let nu7 = nu5 * nu * nu;

        let vii = tan_phi / (2.0 * rho * nu);
        let viii = tan_phi / (24.0 * rho * nu3) * (5.0 + 3.0 * tan2 + eta2 - 9.0 * tan2 * eta2);
        let ix = tan_phi / (720.0 * rho * nu5) * (61.0 + 90.0 * tan2 + 45.0 * tan4);
        let x = sec_phi / nu;
        let xi = sec_phi / (6.0 * nu3) * (nu / rho + 2.0 * tan2);
        let xii = sec_phi / (120.0 * nu5) * (5.0 + 28.0 * tan2 + 24.0 * tan4);
        let xiia =
            sec_phi / (5040.0 * nu7) * (61.0 + 662.0 * tan2 + 1320.0 * tan4 + 720.0 * tan6);

        let de = easting - E0;
        let de2 = de * de;

        let phi = fma(de2, fma(de2, fma(-ix, de2, viii), -vii), phi);
        let lambda = fma(de, fma(de2, fma(de2, fma(-xiia, de2, xii), -xi), x), lambda0);
        (phi, lambda)
    }
}

impl GeodeticTransform for OsTransverseMercator {
    fn to_lat_lon(&self, coord: &Coordinate) -> LatLon {
        let (phi, lambda) = Self::inverse(coord.easting as f64, coord.northing as f64);

        let (phi, lambda) = match self.datum {
            Datum::Osgb36 => (phi, lambda),
            Datum::Wgs84 => {
                let xyz = Ellipsoid::AIRY_1830.to_cartesian(phi, lambda);
                let xyz = Helmert::OSGB36_TO_WGS84.apply(xyz);
                Ellipsoid::WGS84.to_geographic(xyz)
            }
        };

        LatLon::new(phi.to_degrees(), lambda.to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GridRef;

    #[test]
    fn test_true_origin() {
        let latlon =
            OsTransverseMercator::new(Datum::Osgb36).to_lat_lon(&Coordinate::new(400000, -100000));
        assert!((latlon.latitude - 49.0).abs() < 1e-12);
        assert!((latlon.longitude - -2.0).abs() < 1e-12);
    }

    #[test]
    fn test_osgb36() {
        let latlon =
            OsTransverseMercator::new(Datum::Osgb36).to_lat_lon(&Coordinate::new(651409, 313177));
        assert!((latlon.latitude - 52.65756829808709).abs() < 1e-8);
        assert!((latlon.longitude - 1.7179080516165743).abs() < 1e-8);
    }

    #[test]
    fn test_wgs84() {
        let gridref: GridRef = "TG 51409 13177".parse().unwrap();
        let latlon = gridref.to_geodetic().unwrap();
        assert!((latlon.longitude - 1.716038).abs() < 1e-6);
        assert!((latlon.latitude - 52.657977).abs() < 1e-6);
    }

    #[test]
    fn test_round_trip_cartesian() {
        let (phi, lambda) = (52.5_f64.to_radians(), (-1.5_f64).to_radians());
        for ellipsoid in [Ellipsoid::AIRY_1830, Ellipsoid::WGS84] {
            let (p, l) = ellipsoid.to_geographic(ellipsoid.to_cartesian(phi, lambda));
            assert!((p - phi).abs() < 1e-9);
            assert!((l - lambda).abs() < 1e-9);
        }
    }

    #[test]
    fn test_default() {
        assert_eq!(OsTransverseMercator::default().datum(), &Datum::Wgs84);
        assert_eq!(
            Coordinate::new(651409, 313177).to_geodetic(),
            Coordinate::new(651409, 313177).to_geodetic_with(&OsTransverseMercator::new(Datum::Wgs84))
        );
    }

    #[test]
    fn test_injected() {
        let transform = |coord: &Coordinate| LatLon::new(coord.northing as f64, coord.easting as f64);
        let latlon = GridRef::new("SV", "1", "2")
            .to_geodetic_with(&transform)
            .unwrap();
        assert_eq!(<(f64, f64)>::from(latlon), (20000.0, 10000.0));

        let dyn_transform: &dyn GeodeticTransform = &OsTransverseMercator::default();
        assert!(GridRef::new("AA", "", "")
            .to_geodetic_with(dyn_transform)
            .is_err());
    }
}
