//! Lambert Conformal Conic projection, one or two standard parallels.

use std::f64::consts::FRAC_PI_2;

use crate::ellipsoid::Ellipsoid;
use crate::error::ProjError;
use crate::math::{adjlon, msfn, phi2, tsfn, EPS10};

#[derive(Clone, Debug)]
pub struct LambertConformalConic {
    pub ellipsoid: Ellipsoid,
    lon0: f64,
    k0: f64,
    x0: f64,
    y0: f64,
    n: f64,    // cone constant
    c: f64,    // F·t₁ⁿ normalization
    rho0: f64, // radius at the latitude of origin
}

impl LambertConformalConic {
    /// `lat2` defaults to `lat1` (one standard parallel) when absent.
    pub fn new(
        ellipsoid: Ellipsoid,
        lon0: f64,
        lat0: f64,
        lat1: f64,
        lat2: Option<f64>,
        k0: f64,
        x0: f64,
        y0: f64,
    ) -> Result<Self, ProjError> {
        let phi1 = lat1;
        let phi2_ = lat2.unwrap_or(lat1);
        if (phi1 + phi2_).abs() < EPS10 {
            return Err(ProjError::UnsupportedProjection(
                "lcc standard parallels must not be opposite or both zero".to_string(),
            ));
        }
        let e = ellipsoid.e;
        let es = ellipsoid.es;

        let sinphi1 = phi1.sin();
        let m1 = msfn(sinphi1, phi1.cos(), es);
        let t1 = tsfn(phi1, sinphi1, e);

        let secant = (phi1 - phi2_).abs() >= EPS10;
        let n = if secant {
            let sinphi2 = phi2_.sin();
            let m2 = msfn(sinphi2, phi2_.cos(), es);
            let t2 = tsfn(phi2_, sinphi2, e);
            (m1 / m2).ln() / (t1 / t2).ln()
        } else {
            sinphi1
        };
        if n == 0.0 {
            return Err(ProjError::UnsupportedProjection(
                "lcc cone constant is zero".to_string(),
            ));
        }

        let c = m1 * t1.powf(-n) / n;
        let rho0 = if (lat0.abs() - FRAC_PI_2).abs() < EPS10 {
            0.0
        } else {
            c * tsfn(lat0, lat0.sin(), e).powf(n)
        };

        Ok(Self {
            ellipsoid,
            lon0,
            k0,
            x0,
            y0,
            n,
            c,
            rho0,
        })
    }

    pub fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let rho = if (lat.abs() - FRAC_PI_2).abs() < EPS10 {
            if lat * self.n <= 0.0 {
                return Err(ProjError::OutsideDomain(
                    "lcc is singular at the pole opposite the cone".to_string(),
                ));
            }
            0.0
        } else {
            self.c * tsfn(lat, lat.sin(), self.ellipsoid.e).powf(self.n)
        };
        let theta = adjlon(lon - self.lon0) * self.n;
        let ak0 = self.ellipsoid.a * self.k0;
        let x = ak0 * rho * theta.sin() + self.x0;
        let y = ak0 * (self.rho0 - rho * theta.cos()) + self.y0;
        Ok((x, y))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let ak0 = self.ellipsoid.a * self.k0;
        let mut xn = (x - self.x0) / ak0;
        let mut yn = self.rho0 - (y - self.y0) / ak0;
        let mut rho = (xn * xn + yn * yn).sqrt();

        let (lon, lat);
        if rho != 0.0 {
            if self.n < 0.0 {
                rho = -rho;
                xn = -xn;
                yn = -yn;
            }
            lat = phi2((rho / self.c).powf(1.0 / self.n), self.ellipsoid.e)?;
            lon = adjlon(xn.atan2(yn) / self.n + self.lon0);
        } else {
            lon = adjlon(self.lon0);
            lat = if self.n > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
        }
        Ok((lon, lat))
    }
}
