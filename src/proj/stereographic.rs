//! Polar, oblique and equatorial Stereographic projection.

use std::f64::consts::FRAC_PI_2;

use crate::ellipsoid::Ellipsoid;
use crate::error::ProjError;
use crate::math::{adjlon, tsfn, EPS10};

const INV_TOL: f64 = 1e-10;
const INV_MAX_ITER: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Mode {
    NorthPole,
    SouthPole,
    Oblique,
    Equatorial,
}

fn ssfn(phi: f64, sinphi: f64, e: f64) -> f64 {
    let esin = e * sinphi;
    (0.5 * (FRAC_PI_2 + phi)).tan() * ((1.0 - esin) / (1.0 + esin)).powf(0.5 * e)
}

#[derive(Clone, Debug)]
pub struct Stereographic {
    pub ellipsoid: Ellipsoid,
    lon0: f64,
    x0: f64,
    y0: f64,
    mode: Mode,
    akm1: f64,
    // chi-sphere origin, oblique and equatorial modes
    sinx1: f64,
    cosx1: f64,
}

impl Stereographic {
    /// `lat_ts` applies to the polar aspects only; it defaults to the pole
    /// itself, in which case `k0` scales the projection.
    pub fn new(
        ellipsoid: Ellipsoid,
        lon0: f64,
        lat0: f64,
        lat_ts: Option<f64>,
        k0: f64,
        x0: f64,
        y0: f64,
    ) -> Result<Self, ProjError> {
        if k0 <= 0.0 {
            return Err(ProjError::InvalidParameter(
                "stere scale factor must be positive".to_string(),
            ));
        }
        let e = ellipsoid.e;
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

        let (akm1, sinx1, cosx1) = match mode {
            Mode::NorthPole | Mode::SouthPole => {
                let phits = lat_ts.map(f64::abs).unwrap_or(FRAC_PI_2);
                let akm1 = if (phits - FRAC_PI_2).abs() < EPS10 {
                    2.0 * k0 / ((1.0 + e).powf(1.0 + e) * (1.0 - e).powf(1.0 - e)).sqrt()
                } else {
                    let t = phits.sin();
                    let mut akm1 = phits.cos() / tsfn(phits, t, e);
                    let t = t * e;
                    akm1 / (1.0 - t * t).sqrt()
                };
                (akm1, 0.0, 0.0)
            }
            Mode::Oblique => {
                let x0_chi = 2.0 * ssfn(lat0, lat0.sin(), e).atan() - FRAC_PI_2;
                let t = lat0.sin() * e;
                let akm1 = 2.0 * k0 * lat0.cos() / (1.0 - t * t).sqrt();
                (akm1, x0_chi.sin(), x0_chi.cos())
            }
            Mode::Equatorial => (2.0 * k0, 0.0, 1.0),
        };

        Ok(Self {
            ellipsoid,
            lon0,
            x0,
            y0,
            mode,
            akm1,
            sinx1,
            cosx1,
        })
    }

    pub fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let e = self.ellipsoid.e;
        let lam = lon - self.lon0;
        let mut coslam = lam.cos();
        let sinlam = lam.sin();

        let (x, y) = match self.mode {
            Mode::Oblique | Mode::Equatorial => {
                let chi = 2.0 * ssfn(lat, lat.sin(), e).atan() - FRAC_PI_2;
                let sinchi = chi.sin();
                let coschi = chi.cos();
                let denom = match self.mode {
                    Mode::Oblique => {
                        self.cosx1 * (1.0 + self.sinx1 * sinchi + self.cosx1 * coschi * coslam)
                    }
                    _ => 1.0 + coschi * coslam,
                };
                if denom.abs() < EPS10 {
                    return Err(ProjError::OutsideDomain(
                        "stere antipodal point cannot be projected".to_string(),
                    ));
                }
                let a = self.akm1 / denom;
                let y = match self.mode {
                    Mode::Oblique => a * (self.cosx1 * sinchi - self.sinx1 * coschi * coslam),
                    _ => a * sinchi,
                };
                (a * coschi * sinlam, y)
            }
            Mode::NorthPole | Mode::SouthPole => {
                let (phi, sinphi) = if self.mode == Mode::SouthPole {
                    coslam = -coslam;
                    (-lat, -lat.sin())
                } else {
                    (lat, lat.sin())
                };
                if (phi + FRAC_PI_2).abs() < EPS10 {
                    return Err(ProjError::OutsideDomain(
                        "stere opposite pole cannot be projected".to_string(),
                    ));
                }
                let x = self.akm1 * tsfn(phi, sinphi, e);
                let y = -x * coslam;
                (x * sinlam, y)
            }
        };
        let a = self.ellipsoid.a;
        Ok((a * x + self.x0, a * y + self.y0))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let e = self.ellipsoid.e;
        let a = self.ellipsoid.a;
        let mut xn = (x - self.x0) / a;
        let mut yn = (y - self.y0) / a;
        let rho = (xn * xn + yn * yn).sqrt();

        let (tp, mut phi_l, halfpi, halfe) = match self.mode {
            Mode::Oblique | Mode::Equatorial => {
                let c = 2.0 * (rho * self.cosx1).atan2(self.akm1);
                let cosc = c.cos();
                let sinc = c.sin();
                let phi_l = if rho == 0.0 {
                    (cosc * self.sinx1).asin()
                } else {
                    (cosc * self.sinx1 + yn * sinc * self.cosx1 / rho).asin()
                };
                let tp = (0.5 * (FRAC_PI_2 + phi_l)).tan();
                xn *= sinc;
                yn = rho * self.cosx1 * cosc - yn * self.sinx1 * sinc;
                (tp, phi_l, FRAC_PI_2, 0.5 * e)
            }
            Mode::NorthPole | Mode::SouthPole => {
                if self.mode == Mode::NorthPole {
                    yn = -yn;
                }
                let tp = -rho / self.akm1;
                (tp, FRAC_PI_2 - 2.0 * tp.atan(), -FRAC_PI_2, -0.5 * e)
            }
        };

        for _ in 0..INV_MAX_ITER {
            let sinphi = e * phi_l.sin();
            let phi =
                2.0 * (tp * ((1.0 + sinphi) / (1.0 - sinphi)).powf(halfe)).atan() - halfpi;
            if (phi_l - phi).abs() < INV_TOL {
                let phi = if self.mode == Mode::SouthPole { -phi } else { phi };
                let lam = if xn == 0.0 && yn == 0.0 {
                    0.0
                } else {
                    xn.atan2(yn)
                };
                return Ok((adjlon(lam + self.lon0), phi));
            }
            phi_l = phi;
        }
        Err(ProjError::NoConvergence(
            "stere inverse iteration did not converge".to_string(),
        ))
    }
}
