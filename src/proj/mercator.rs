//! Mercator projection, ellipsoidal form.
//!
//!   forward: x = a·k₀·(λ - λ₀), y = -a·k₀·ln(tsfn(φ, e))
//!   inverse: λ = λ₀ + x/(a·k₀), φ = phi2(exp(-y/(a·k₀)), e)
//!
//! A spherical ellipsoid (`+a` == `+b`, e.g. EPSG:3785) degenerates to the
//! classic spherical formulas through e = 0.

use std::f64::consts::FRAC_PI_2;

use crate::ellipsoid::Ellipsoid;
use crate::error::ProjError;
use crate::math::{adjlon, msfn, phi2, tsfn, EPS10};

#[derive(Clone, Debug)]
pub struct Mercator {
    pub ellipsoid: Ellipsoid,
    lon0: f64,
    k0: f64,
    x0: f64,
    y0: f64,
}

impl Mercator {
    /// `lat_ts` (latitude of true scale) overrides `k0` when given.
    pub fn new(
        ellipsoid: Ellipsoid,
        lon0: f64,
        lat_ts: Option<f64>,
        k0: f64,
        x0: f64,
        y0: f64,
    ) -> Result<Self, ProjError> {
        let k0 = match lat_ts {
            Some(phits) => {
                if phits.abs() >= FRAC_PI_2 {
                    return Err(ProjError::InvalidParameter(
                        "mercator lat_ts must lie strictly between the poles".to_string(),
                    ));
                }
                msfn(phits.sin(), phits.cos(), ellipsoid.es)
            }
            None => k0,
        };
        Ok(Self {
            ellipsoid,
            lon0,
            k0,
            x0,
            y0,
        })
    }

    pub fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        if FRAC_PI_2 - lat.abs() <= EPS10 {
            return Err(ProjError::OutsideDomain(
                "mercator is singular at the poles".to_string(),
            ));
        }
        let ak0 = self.ellipsoid.a * self.k0;
        let lam = adjlon(lon - self.lon0);
        let x = ak0 * lam + self.x0;
        let y = -ak0 * tsfn(lat, lat.sin(), self.ellipsoid.e).ln() + self.y0;
        Ok((x, y))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let ak0 = self.ellipsoid.a * self.k0;
        let ts = (-(y - self.y0) / ak0).exp();
        let lat = phi2(ts, self.ellipsoid.e)?;
        let lon = adjlon(self.lon0 + (x - self.x0) / ak0);
        Ok((lon, lat))
    }
}
