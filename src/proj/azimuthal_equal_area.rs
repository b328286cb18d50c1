//! Lambert Azimuthal Equal-Area projection.

use std::f64::consts::FRAC_PI_2;

use crate::ellipsoid::Ellipsoid;
use crate::error::ProjError;
use crate::math::{adjlon, authlat, authset, qsfn, EPS10};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Mode {
    NorthPole,
    SouthPole,
    Oblique,
    Equatorial,
}

#[derive(Clone, Debug)]
pub struct AzimuthalEqualArea {
    pub ellipsoid: Ellipsoid,
    lon0: f64,
    lat0: f64,
    x0: f64,
    y0: f64,
    mode: Mode,
    qp: f64,
    apa: [f64; 3],
    rq: f64,
    dd: f64,
    xmf: f64,
    ymf: f64,
    sinb1: f64,
    cosb1: f64,
}

impl AzimuthalEqualArea {
    pub fn new(
        ellipsoid: Ellipsoid,
        lon0: f64,
        lat0: f64,
        x0: f64,
        y0: f64,
    ) -> Result<Self, ProjError> {
        let e = ellipsoid.e;
        let es = ellipsoid.es;
        let one_es = 1.0 - es;

        let mode = if (lat0.abs() - FRAC_PI_2).abs() < EPS10 {
            if lat0 < 0.0 {
                Mode::SouthPole
            } else {
                Mode::NorthPole
            }
        } else if lat0.abs() < EPS10 {
            Mode::Equatorial
        } else {
            Mode::Oblique
        };

        let qp = qsfn(1.0, e, one_es);
        let apa = authset(es);
        let rq = (0.5 * qp).sqrt();

        let (dd, xmf, ymf, sinb1, cosb1) = match mode {
            Mode::Oblique => {
                let sinphi = lat0.sin();
                let sinb1 = qsfn(sinphi, e, one_es) / qp;
                let cosb1 = (1.0 - sinb1 * sinb1).sqrt();
                let dd = lat0.cos() / ((1.0 - es * sinphi * sinphi).sqrt() * rq * cosb1);
                (dd, rq * dd, rq / dd, sinb1, cosb1)
            }
            Mode::Equatorial => (1.0 / rq, 1.0, 0.5 * qp, 0.0, 1.0),
            Mode::NorthPole | Mode::SouthPole => (1.0, 0.0, 0.0, 0.0, 0.0),
        };

        Ok(Self {
            ellipsoid,
            lon0,
            lat0,
            x0,
            y0,
            mode,
            qp,
            apa,
            rq,
            dd,
            xmf,
            ymf,
            sinb1,
            cosb1,
        })
    }

    pub fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let e = self.ellipsoid.e;
        let one_es = 1.0 - self.ellipsoid.es;
        let lam = lon - self.lon0;
        let coslam = lam.cos();
        let sinlam = lam.sin();
        let q = qsfn(lat.sin(), e, one_es);

        let (x, y) = match self.mode {
            Mode::Oblique | Mode::Equatorial => {
                let sinb = q / self.qp;
                let cosb = (1.0 - sinb * sinb).sqrt();
                let b = match self.mode {
                    Mode::Oblique => 1.0 + self.sinb1 * sinb + self.cosb1 * cosb * coslam,
                    _ => 1.0 + cosb * coslam,
                };
                if b.abs() < EPS10 {
                    return Err(ProjError::OutsideDomain(
                        "laea antipodal point cannot be projected".to_string(),
                    ));
                }
                let b = (2.0 / b).sqrt();
                let y = match self.mode {
                    Mode::Oblique => {
                        self.ymf * b * (self.cosb1 * sinb - self.sinb1 * cosb * coslam)
                    }
                    _ => self.ymf * b * sinb,
                };
                (self.xmf * b * cosb * sinlam, y)
            }
            Mode::NorthPole | Mode::SouthPole => {
                if (lat + self.lat0).abs() < EPS10 {
                    return Err(ProjError::OutsideDomain(
                        "laea opposite pole cannot be projected".to_string(),
                    ));
                }
                let q = match self.mode {
                    Mode::NorthPole => self.qp - q,
                    _ => self.qp + q,
                };
                let b = q.sqrt();
                let y = coslam * if self.mode == Mode::SouthPole { b } else { -b };
                (b * sinlam, y)
            }
        };
        let a = self.ellipsoid.a;
        Ok((a * x + self.x0, a * y + self.y0))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let a = self.ellipsoid.a;
        let mut xn = (x - self.x0) / a;
        let mut yn = (y - self.y0) / a;

        let (lam, ab);
        match self.mode {
            Mode::Oblique | Mode::Equatorial => {
                xn /= self.dd;
                yn *= self.dd;
                let rho = (xn * xn + yn * yn).sqrt();
                if rho < EPS10 {
                    return Ok((self.lon0, self.lat0));
                }
                let mut s_ce = 2.0 * (0.5 * rho / self.rq).asin();
                let c_ce = s_ce.cos();
                s_ce = s_ce.sin();
                xn *= s_ce;
                if self.mode == Mode::Oblique {
                    ab = c_ce * self.sinb1 + yn * s_ce * self.cosb1 / rho;
                    yn = rho * self.cosb1 * c_ce - yn * self.sinb1 * s_ce;
                } else {
                    ab = yn * s_ce / rho;
                    yn = rho * c_ce;
                }
                lam = xn.atan2(yn);
            }
            Mode::NorthPole | Mode::SouthPole => {
                if self.mode == Mode::NorthPole {
                    yn = -yn;
                }
                let q = xn * xn + yn * yn;
                if q == 0.0 {
                    return Ok((self.lon0, self.lat0));
                }
                let mut t = 1.0 - q / self.qp;
                if self.mode == Mode::SouthPole {
                    t = -t;
                }
                ab = t;
                lam = xn.atan2(yn);
            }
        }
        let phi = authlat(ab.clamp(-1.0, 1.0).asin(), &self.apa);
        Ok((adjlon(lam + self.lon0), phi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoid;
    use approx::assert_relative_eq;

    fn etrs89_laea() -> AzimuthalEqualArea {
        // ETRS89-extended / LAEA Europe geometry (EPSG:3035).
        AzimuthalEqualArea::new(
            ellipsoid::named("GRS80").unwrap(),
            10.0f64.to_radians(),
            52.0f64.to_radians(),
            4_321_000.0,
            3_210_000.0,
        )
        .unwrap()
    }

    fn north_pole_laea() -> AzimuthalEqualArea {
        // North Pole LAEA Canada geometry (EPSG:3573).
        AzimuthalEqualArea::new(
            Ellipsoid::wgs84(),
            (-100.0f64).to_radians(),
            FRAC_PI_2,
            0.0,
            0.0,
        )
        .unwrap()
    }

    #[test]
    fn test_oblique_known_point() {
        let proj = etrs89_laea();
        let (x, y) = proj
            .forward(11.0f64.to_radians(), 53.0f64.to_radians())
            .unwrap();
        assert_relative_eq!(x, 4_388_138.60, epsilon = 0.1);
        assert_relative_eq!(y, 3_321_736.46, epsilon = 0.1);
    }

    #[test]
    fn test_polar_known_point() {
        let proj = north_pole_laea();
        let (x, y) = proj
            .forward(9.84375f64.to_radians(), 61.875f64.to_radians())
            .unwrap();
        assert_relative_eq!(x, 2_923_052.020_09, epsilon = 1e-4);
        assert_relative_eq!(y, 1_054_885.465_59, epsilon = 1e-4);
    }

    #[test]
    fn test_oblique_roundtrip() {
        let proj = etrs89_laea();
        for &(lon_deg, lat_deg) in &[(10.0, 52.0), (-8.5, 38.2), (27.1, 64.9)] {
            let lon = (lon_deg as f64).to_radians();
            let lat = (lat_deg as f64).to_radians();
            let (x, y) = proj.forward(lon, lat).unwrap();
            let (lon2, lat2) = proj.inverse(x, y).unwrap();
            assert_relative_eq!(lon2, lon, epsilon = 1e-9);
            assert_relative_eq!(lat2, lat, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_polar_roundtrip() {
        let proj = north_pole_laea();
        for &(lon_deg, lat_deg) in &[(-100.0, 80.0), (35.0, 62.5), (-170.0, 71.0)] {
            let lon = (lon_deg as f64).to_radians();
            let lat = (lat_deg as f64).to_radians();
            let (x, y) = proj.forward(lon, lat).unwrap();
            let (lon2, lat2) = proj.inverse(x, y).unwrap();
            assert_relative_eq!(lon2, lon, epsilon = 1e-9);
            assert_relative_eq!(lat2, lat, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_opposite_pole_rejected() {
        let proj = north_pole_laea();
        assert!(proj.forward(0.0, -FRAC_PI_2).is_err());
    }

    #[test]
    fn test_inverse_longitude_stays_normalized() {
        // Origin near the antimeridian; inverse longitudes wrap back into range.
        let proj = AzimuthalEqualArea::new(
            ellipsoid::named("GRS80").unwrap(),
            170.0f64.to_radians(),
            (-45.0f64).to_radians(),
            0.0,
            0.0,
        )
        .unwrap();
        let lon = (-178.0f64).to_radians();
        let lat = (-43.0f64).to_radians();
        let (x, y) = proj.forward(lon, lat).unwrap();
        let (lon2, lat2) = proj.inverse(x, y).unwrap();
        assert!(lon2.abs() <= std::f64::consts::PI);
        assert_relative_eq!(lon2, lon, epsilon = 1e-9);
        assert_relative_eq!(lat2, lat, epsilon = 1e-9);
    }
}
