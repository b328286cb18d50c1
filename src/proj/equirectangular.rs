//! Equidistant Cylindrical (Plate Carrée when both parallels are zero).

use std::f64::consts::FRAC_PI_2;

use crate::ellipsoid::Ellipsoid;
use crate::error::ProjError;
use crate::math::{adjlon, EPS10};

#[derive(Clone, Debug)]
pub struct Equirectangular {
    pub ellipsoid: Ellipsoid,
    lon0: f64,
    lat0: f64,
    x0: f64,
    y0: f64,
    cos_ts: f64,
}

impl Equirectangular {
    pub fn new(
        ellipsoid: Ellipsoid,
        lon0: f64,
        lat0: f64,
        lat_ts: f64,
        x0: f64,
        y0: f64,
    ) -> Result<Self, ProjError> {
        if (lat_ts.abs() - FRAC_PI_2).abs() < EPS10 {
            return Err(ProjError::InvalidParameter(
                "eqc standard parallel at a pole".to_string(),
            ));
        }
        Ok(Self {
            ellipsoid,
            lon0,
            lat0,
            x0,
            y0,
            cos_ts: lat_ts.cos(),
        })
    }

    pub fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let a = self.ellipsoid.a;
        let x = a * adjlon(lon - self.lon0) * self.cos_ts + self.x0;
        let y = a * (lat - self.lat0) + self.y0;
        Ok((x, y))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let a = self.ellipsoid.a;
        let lon = adjlon((x - self.x0) / (a * self.cos_ts) + self.lon0);
        let lat = (y - self.y0) / a + self.lat0;
        Ok((lon, lat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plate_carree() {
        let proj =
            Equirectangular::new(Ellipsoid::wgs84(), 0.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        let (x, y) = proj
            .forward(90.0f64.to_radians(), 45.0f64.to_radians())
            .unwrap();
        assert_relative_eq!(x, 6_378_137.0 * FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(y, 6_378_137.0 * 45.0f64.to_radians(), epsilon = 1e-6);
    }

    #[test]
    fn test_standard_parallel_scales_x() {
        let proj = Equirectangular::new(
            Ellipsoid::wgs84(),
            0.0,
            0.0,
            60.0f64.to_radians(),
            0.0,
            0.0,
        )
        .unwrap();
        let (x, _) = proj.forward(10.0f64.to_radians(), 0.0).unwrap();
        assert_relative_eq!(
            x,
            6_378_137.0 * 10.0f64.to_radians() * 0.5,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_roundtrip() {
        let proj = Equirectangular::new(
            Ellipsoid::wgs84(),
            15.0f64.to_radians(),
            5.0f64.to_radians(),
            30.0f64.to_radians(),
            100_000.0,
            -50_000.0,
        )
        .unwrap();
        let lon = (-42.5f64).to_radians();
        let lat = 67.125f64.to_radians();
        let (x, y) = proj.forward(lon, lat).unwrap();
        let (lon2, lat2) = proj.inverse(x, y).unwrap();
        assert_relative_eq!(lon2, lon, epsilon = 1e-12);
        assert_relative_eq!(lat2, lat, epsilon = 1e-12);
    }

    #[test]
    fn test_polar_parallel_rejected() {
        let err = Equirectangular::new(Ellipsoid::wgs84(), 0.0, 0.0, FRAC_PI_2, 0.0, 0.0);
        assert!(err.is_err());
    }
}
