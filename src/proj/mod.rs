//! Map projections.
//!
//! Each projection kind lives in its own module, validates its parameters at
//! construction and precomputes derived constants. `Projection` is the closed
//! set of supported kinds; forward maps geographic radians to projected
//! metres (false easting/northing applied), inverse maps back.

pub mod albers;
pub mod azimuthal_equal_area;
pub mod equirectangular;
pub mod lambert_conformal;
pub mod mercator;
pub mod oblique_stereographic;
pub mod polyconic;
pub mod stereographic;
pub mod swiss_oblique;
pub mod transverse_mercator;

use crate::ellipsoid::Ellipsoid;
use crate::error::ProjError;

use albers::AlbersEqualArea;
use azimuthal_equal_area::AzimuthalEqualArea;
use equirectangular::Equirectangular;
use lambert_conformal::LambertConformalConic;
use mercator::Mercator;
use oblique_stereographic::ObliqueStereographic;
use polyconic::Polyconic;
use stereographic::Stereographic;
use swiss_oblique::SwissObliqueMercator;
use transverse_mercator::TransverseMercator;

/// The closed set of projection variants.
#[derive(Clone, Debug)]
pub enum Projection {
    /// Geographic CRS: no projection, coordinates stay angular.
    Geographic(Ellipsoid),
    Mercator(Mercator),
    TransverseMercator(TransverseMercator),
    LambertConformalConic(LambertConformalConic),
    AlbersEqualArea(AlbersEqualArea),
    Stereographic(Stereographic),
    ObliqueStereographic(ObliqueStereographic),
    AzimuthalEqualArea(AzimuthalEqualArea),
    SwissObliqueMercator(SwissObliqueMercator),
    Equirectangular(Equirectangular),
    Polyconic(Polyconic),
}

impl Projection {
    /// Forward: (lon_rad, lat_rad) -> (easting, northing) in metres.
    pub fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        match self {
            Projection::Geographic(_) => Ok((lon, lat)),
            Projection::Mercator(p) => p.forward(lon, lat),
            Projection::TransverseMercator(p) => p.forward(lon, lat),
            Projection::LambertConformalConic(p) => p.forward(lon, lat),
            Projection::AlbersEqualArea(p) => p.forward(lon, lat),
            Projection::Stereographic(p) => p.forward(lon, lat),
            Projection::ObliqueStereographic(p) => p.forward(lon, lat),
            Projection::AzimuthalEqualArea(p) => p.forward(lon, lat),
            Projection::SwissObliqueMercator(p) => p.forward(lon, lat),
            Projection::Equirectangular(p) => p.forward(lon, lat),
            Projection::Polyconic(p) => p.forward(lon, lat),
        }
    }

    /// Inverse: (easting, northing) in metres -> (lon_rad, lat_rad).
    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        match self {
            Projection::Geographic(_) => Ok((x, y)),
            Projection::Mercator(p) => p.inverse(x, y),
            Projection::TransverseMercator(p) => p.inverse(x, y),
            Projection::LambertConformalConic(p) => p.inverse(x, y),
            Projection::AlbersEqualArea(p) => p.inverse(x, y),
            Projection::Stereographic(p) => p.inverse(x, y),
            Projection::ObliqueStereographic(p) => p.inverse(x, y),
            Projection::AzimuthalEqualArea(p) => p.inverse(x, y),
            Projection::SwissObliqueMercator(p) => p.inverse(x, y),
            Projection::Equirectangular(p) => p.inverse(x, y),
            Projection::Polyconic(p) => p.inverse(x, y),
        }
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        match self {
            Projection::Geographic(e) => e,
            Projection::Mercator(p) => &p.ellipsoid,
            Projection::TransverseMercator(p) => &p.ellipsoid,
            Projection::LambertConformalConic(p) => &p.ellipsoid,
            Projection::AlbersEqualArea(p) => &p.ellipsoid,
            Projection::Stereographic(p) => &p.ellipsoid,
            Projection::ObliqueStereographic(p) => &p.ellipsoid,
            Projection::AzimuthalEqualArea(p) => &p.ellipsoid,
            Projection::SwissObliqueMercator(p) => &p.ellipsoid,
            Projection::Equirectangular(p) => &p.ellipsoid,
            Projection::Polyconic(p) => &p.ellipsoid,
        }
    }

    pub fn is_geographic(&self) -> bool {
        matches!(self, Projection::Geographic(_))
    }
}
