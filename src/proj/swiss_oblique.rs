//! Swiss Oblique Mercator, the CH1903 national grid projection.

use std::f64::consts::FRAC_PI_2;

use crate::ellipsoid::Ellipsoid;
use crate::error::ProjError;
use crate::math::adjlon;

const INV_TOL: f64 = 1e-10;
const INV_MAX_ITER: usize = 6;

#[derive(Clone, Debug)]
pub struct SwissObliqueMercator {
    pub ellipsoid: Ellipsoid,
    lon0: f64,
    x0: f64,
    y0: f64,
    c: f64,
    k_const: f64,
    kr: f64,
    hlf_e: f64,
    sinp0: f64,
    cosp0: f64,
}

impl SwissObliqueMercator {
    pub fn new(
        ellipsoid: Ellipsoid,
        lon0: f64,
        lat0: f64,
        k0: f64,
        x0: f64,
        y0: f64,
    ) -> Result<Self, ProjError> {
        if k0 <= 0.0 {
            return Err(ProjError::InvalidParameter(
                "somerc scale factor must be positive".to_string(),
            ));
        }
        let e = ellipsoid.e;
        let es = ellipsoid.es;
        let hlf_e = 0.5 * e;

        let mut cp = lat0.cos();
        cp *= cp;
        let c = (1.0 + es * cp * cp / (1.0 - es)).sqrt();
        let mut sp = lat0.sin();
        let sinp0 = sp / c;
        let cosp0 = sinp0.asin().cos();
        sp *= e;
        let k_const = (0.25 * std::f64::consts::PI + 0.5 * sinp0.asin()).tan().ln()
            - c * ((0.25 * std::f64::consts::PI + 0.5 * lat0).tan().ln()
                - hlf_e * ((1.0 + sp) / (1.0 - sp)).ln());
        let kr = k0 * (1.0 - es).sqrt() / (1.0 - sp * sp);

        Ok(Self {
            ellipsoid,
            lon0,
            x0,
            y0,
            c,
            k_const,
            kr,
            hlf_e,
            sinp0,
            cosp0,
        })
    }

    pub fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let quart_pi = 0.25 * std::f64::consts::PI;
        let lam = adjlon(lon - self.lon0);
        let sp = self.ellipsoid.e * lat.sin();
        let phip = 2.0
            * ((self.c
                * ((quart_pi + 0.5 * lat).tan().ln()
                    - self.hlf_e * ((1.0 + sp) / (1.0 - sp)).ln())
                + self.k_const)
                .exp())
            .atan()
            - FRAC_PI_2;
        let lamp = self.c * lam;
        let cp = phip.cos();
        let phipp = (self.cosp0 * phip.sin() - self.sinp0 * cp * lamp.cos()).asin();
        let lampp = (cp * lamp.sin() / phipp.cos()).asin();

        let a = self.ellipsoid.a;
        let x = a * self.kr * lampp + self.x0;
        let y = a * self.kr * (quart_pi + 0.5 * phipp).tan().ln() + self.y0;
        Ok((x, y))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let quart_pi = 0.25 * std::f64::consts::PI;
        let a = self.ellipsoid.a;
        let xn = (x - self.x0) / (a * self.kr);
        let yn = (y - self.y0) / (a * self.kr);

        let phipp = 2.0 * (yn.exp().atan() - quart_pi);
        let lampp = xn;
        let cp = phipp.cos();
        let phip = (self.cosp0 * phipp.sin() + self.sinp0 * cp * lampp.cos()).asin();
        let lamp = (cp * lampp.sin() / phip.cos()).asin();

        let con = (self.k_const - (quart_pi + 0.5 * phip).tan().ln()) / self.c;
        let mut phi = phip;
        for i in 0..=INV_MAX_ITER {
            if i == INV_MAX_ITER {
                return Err(ProjError::NoConvergence(
                    "somerc inverse iteration did not converge".to_string(),
                ));
            }
            let esp = self.ellipsoid.e * phi.sin();
            let delp = (con + (quart_pi + 0.5 * phi).tan().ln()
                - self.hlf_e * ((1.0 + esp) / (1.0 - esp)).ln())
                * (1.0 - esp * esp)
                * phi.cos()
                / (1.0 - self.ellipsoid.es);
            phi -= delp;
            if delp.abs() < INV_TOL {
                break;
            }
        }
        Ok((adjlon(lamp / self.c + self.lon0), phi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoid;
    use approx::assert_relative_eq;

    fn ch1903() -> SwissObliqueMercator {
        // CH1903 / LV03 geometry (EPSG:21781).
        SwissObliqueMercator::new(
            ellipsoid::named("bessel").unwrap(),
            7.439583333333333f64.to_radians(),
            46.95240555555556f64.to_radians(),
            1.0,
            600_000.0,
            200_000.0,
        )
        .unwrap()
    }

    #[test]
    fn test_known_point() {
        let proj = ch1903();
        let (x, y) = proj
            .forward(8.23f64.to_radians(), 46.82f64.to_radians())
            .unwrap();
        assert_relative_eq!(x, 660_309.34, epsilon = 0.1);
        assert_relative_eq!(y, 185_586.30, epsilon = 0.1);
    }

    #[test]
    fn test_origin_maps_to_false_origin() {
        let proj = ch1903();
        let (x, y) = proj
            .forward(
                7.439583333333333f64.to_radians(),
                46.95240555555556f64.to_radians(),
            )
            .unwrap();
        assert_relative_eq!(x, 600_000.0, epsilon = 1e-3);
        assert_relative_eq!(y, 200_000.0, epsilon = 1e-3);
    }

    #[test]
    fn test_roundtrip() {
        let proj = ch1903();
        for &(lon_deg, lat_deg) in &[(7.44, 46.95), (6.14, 46.2), (9.53, 46.85), (8.54, 47.38)] {
            let lon = (lon_deg as f64).to_radians();
            let lat = (lat_deg as f64).to_radians();
            let (x, y) = proj.forward(lon, lat).unwrap();
            let (lon2, lat2) = proj.inverse(x, y).unwrap();
            assert_relative_eq!(lon2, lon, epsilon = 1e-9);
            assert_relative_eq!(lat2, lat, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_inverse_longitude_stays_normalized() {
        // Origin near the antimeridian; inverse longitudes wrap back into range.
        let proj = SwissObliqueMercator::new(
            ellipsoid::named("bessel").unwrap(),
            179.0f64.to_radians(),
            46.0f64.to_radians(),
            1.0,
            0.0,
            0.0,
        )
        .unwrap();
        let lon = (-179.6f64).to_radians();
        let lat = 46.4f64.to_radians();
        let (x, y) = proj.forward(lon, lat).unwrap();
        let (lon2, lat2) = proj.inverse(x, y).unwrap();
        assert!(lon2.abs() <= std::f64::consts::PI);
        assert_relative_eq!(lon2, lon, epsilon = 1e-9);
        assert_relative_eq!(lat2, lat, epsilon = 1e-9);
    }
}
