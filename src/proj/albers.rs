//! Albers Equal-Area Conic projection.

use std::f64::consts::FRAC_PI_2;

use crate::ellipsoid::Ellipsoid;
use crate::error::ProjError;
use crate::math::{adjlon, msfn, qsfn, EPS10};

const PHI1_TOL: f64 = 1e-10;
const PHI1_MAX_ITER: usize = 15;

/// Latitude for the authalic value `q`, by Newton iteration.
fn phi1(q: f64, e: f64, one_es: f64) -> Result<f64, ProjError> {
    let mut phi = (0.5 * q).asin();
    if e < EPS10 {
        return Ok(phi);
    }
    for _ in 0..PHI1_MAX_ITER {
        let sinphi = phi.sin();
        let cosphi = phi.cos();
        let con = e * sinphi;
        let com = 1.0 - con * con;
        let dphi = 0.5 * com * com / cosphi
            * (q / one_es - sinphi / com + 0.5 / e * ((1.0 - con) / (1.0 + con)).ln());
        phi += dphi;
        if dphi.abs() <= PHI1_TOL {
            return Ok(phi);
        }
    }
    Err(ProjError::NoConvergence(
        "aea inverse latitude iteration did not converge".to_string(),
    ))
}

#[derive(Clone, Debug)]
pub struct AlbersEqualArea {
    pub ellipsoid: Ellipsoid,
    lon0: f64,
    x0: f64,
    y0: f64,
    n: f64,
    c: f64,
    dd: f64,
    rho0: f64,
    ec: f64,
}

impl AlbersEqualArea {
    pub fn new(
        ellipsoid: Ellipsoid,
        lon0: f64,
        lat0: f64,
        lat1: f64,
        lat2: Option<f64>,
        x0: f64,
        y0: f64,
    ) -> Result<Self, ProjError> {
        let phi1_ = lat1;
        let phi2_ = lat2.unwrap_or(lat1);
        if (phi1_ + phi2_).abs() < EPS10 {
            return Err(ProjError::UnsupportedProjection(
                "aea standard parallels must not be opposite or both zero".to_string(),
            ));
        }
        let e = ellipsoid.e;
        let es = ellipsoid.es;
        let one_es = 1.0 - es;

        let sinphi1 = phi1_.sin();
        let m1 = msfn(sinphi1, phi1_.cos(), es);
        let q1 = qsfn(sinphi1, e, one_es);

        let secant = (phi1_ - phi2_).abs() >= EPS10;
        let n = if secant {
            let sinphi2 = phi2_.sin();
            let m2 = msfn(sinphi2, phi2_.cos(), es);
            let q2 = qsfn(sinphi2, e, one_es);
            (m1 * m1 - m2 * m2) / (q2 - q1)
        } else {
            sinphi1
        };
        if n == 0.0 {
            return Err(ProjError::UnsupportedProjection(
                "aea cone constant is zero".to_string(),
            ));
        }

        let ec = 1.0 - 0.5 * one_es * ((1.0 - e) / (1.0 + e)).ln() / e;
        let c = m1 * m1 + n * q1;
        let dd = 1.0 / n;
        let rho0 = dd * (c - n * qsfn(lat0.sin(), e, one_es)).sqrt();

        Ok(Self {
            ellipsoid,
            lon0,
            x0,
            y0,
            n,
            c,
            dd,
            rho0,
            ec,
        })
    }

    pub fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let rho = self.c - self.n * qsfn(lat.sin(), self.ellipsoid.e, 1.0 - self.ellipsoid.es);
        if rho < 0.0 {
            return Err(ProjError::OutsideDomain(
                "aea point outside cone domain".to_string(),
            ));
        }
        let rho = self.dd * rho.sqrt();
        let theta = self.n * adjlon(lon - self.lon0);
        let a = self.ellipsoid.a;
        let x = a * rho * theta.sin() + self.x0;
        let y = a * (self.rho0 - rho * theta.cos()) + self.y0;
        Ok((x, y))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let a = self.ellipsoid.a;
        let mut xn = (x - self.x0) / a;
        let mut yn = self.rho0 - (y - self.y0) / a;
        let mut rho = (xn * xn + yn * yn).sqrt();

        if rho == 0.0 {
            let lat = if self.n > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
            return Ok((self.lon0, lat));
        }
        if self.n < 0.0 {
            rho = -rho;
            xn = -xn;
            yn = -yn;
        }
        let q = (self.c - (rho / self.dd) * (rho / self.dd)) / self.n;
        let lat = if (self.ec - q.abs()).abs() > 1e-7 {
            phi1(q, self.ellipsoid.e, 1.0 - self.ellipsoid.es)?
        } else if q < 0.0 {
            -FRAC_PI_2
        } else {
            FRAC_PI_2
        };
        let lon = adjlon(xn.atan2(yn) / self.n + self.lon0);
        Ok((lon, lat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoid;
    use approx::assert_relative_eq;

    fn bc_albers() -> AlbersEqualArea {
        // BC Albers geometry (EPSG:3153).
        AlbersEqualArea::new(
            ellipsoid::named("GRS80").unwrap(),
            (-126.0f64).to_radians(),
            45.0f64.to_radians(),
            50.0f64.to_radians(),
            Some(58.5f64.to_radians()),
            1_000_000.0,
            0.0,
        )
        .unwrap()
    }

    #[test]
    fn test_known_point() {
        let proj = bc_albers();
        let (x, y) = proj
            .forward((-127.0f64).to_radians(), 52.11f64.to_radians())
            .unwrap();
        assert_relative_eq!(x, 931_625.911_182_862_6, epsilon = 1e-4);
        assert_relative_eq!(y, 789_252.646_454_557, epsilon = 1e-4);
    }

    #[test]
    fn test_roundtrip() {
        let proj = bc_albers();
        for &(lon_deg, lat_deg) in &[(-126.0, 54.0), (-132.5, 49.5), (-118.2, 59.9)] {
            let lon = (lon_deg as f64).to_radians();
            let lat = (lat_deg as f64).to_radians();
            let (x, y) = proj.forward(lon, lat).unwrap();
            let (lon2, lat2) = proj.inverse(x, y).unwrap();
            assert_relative_eq!(lon2, lon, epsilon = 1e-9);
            assert_relative_eq!(lat2, lat, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_pole_inverse() {
        let proj = bc_albers();
        let (x, y) = proj
            .forward((-126.0f64).to_radians(), FRAC_PI_2)
            .unwrap();
        let (_, lat) = proj.inverse(x, y).unwrap();
        assert_relative_eq!(lat, FRAC_PI_2, epsilon = 1e-7);
    }

    #[test]
    fn test_opposite_parallels_rejected() {
        let err = AlbersEqualArea::new(
            Ellipsoid::wgs84(),
            0.0,
            0.0,
            20.0f64.to_radians(),
            Some((-20.0f64).to_radians()),
            0.0,
            0.0,
        );
        assert!(matches!(err, Err(ProjError::UnsupportedProjection(_))));
    }
}
