//! Oblique Stereographic Alternative, a double projection through the
//! conformal Gauss sphere. Used by the Dutch RD grid among others.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::ellipsoid::Ellipsoid;
use crate::error::ProjError;
use crate::math::adjlon;

const GAUSS_INV_TOL: f64 = 1e-14;
const GAUSS_INV_MAX_ITER: usize = 20;

fn srat(esinp: f64, exp: f64) -> f64 {
    ((1.0 - esinp) / (1.0 + esinp)).powf(exp)
}

/// Conformal sphere mapping shared by the forward and inverse paths.
#[derive(Clone, Debug)]
struct Gauss {
    e: f64,
    c: f64,
    k: f64,
    chi0: f64,
    ratexp: f64,
    rc: f64,
}

impl Gauss {
    fn new(ellipsoid: &Ellipsoid, lat0: f64) -> Self {
        let es = ellipsoid.es;
        let e = ellipsoid.e;
        let sphi = lat0.sin();
        let mut cphi = lat0.cos();
        cphi *= cphi;
        let rc = (1.0 - es).sqrt() / (1.0 - es * sphi * sphi);
        let c = (1.0 + es * cphi * cphi / (1.0 - es)).sqrt();
        let chi0 = (sphi / c).asin();
        let ratexp = 0.5 * c * e;
        let k = (0.5 * chi0 + FRAC_PI_4).tan()
            / ((0.5 * lat0 + FRAC_PI_4).tan().powf(c) * srat(e * sphi, ratexp));
        Self {
            e,
            c,
            k,
            chi0,
            ratexp,
            rc,
        }
    }

    fn forward(&self, lam: f64, phi: f64) -> (f64, f64) {
        let chi = 2.0
            * (self.k
                * (0.5 * phi + FRAC_PI_4).tan().powf(self.c)
                * srat(self.e * phi.sin(), self.ratexp))
            .atan()
            - FRAC_PI_2;
        (self.c * lam, chi)
    }

    fn inverse(&self, lam: f64, chi: f64) -> Result<(f64, f64), ProjError> {
        let lam_out = lam / self.c;
        let num = ((0.5 * chi + FRAC_PI_4).tan() / self.k).powf(1.0 / self.c);
        let mut phi = chi;
        for _ in 0..GAUSS_INV_MAX_ITER {
            let next =
                2.0 * (num * srat(self.e * phi.sin(), -0.5 * self.e)).atan() - FRAC_PI_2;
            if (next - phi).abs() < GAUSS_INV_TOL {
                return Ok((lam_out, next));
            }
            phi = next;
        }
        Err(ProjError::NoConvergence(
            "sterea conformal latitude iteration did not converge".to_string(),
        ))
    }
}

#[derive(Clone, Debug)]
pub struct ObliqueStereographic {
    pub ellipsoid: Ellipsoid,
    lon0: f64,
    k0: f64,
    x0: f64,
    y0: f64,
    gauss: Gauss,
    sinc0: f64,
    cosc0: f64,
    r2: f64,
}

impl ObliqueStereographic {
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
                "sterea scale factor must be positive".to_string(),
            ));
        }
        let gauss = Gauss::new(&ellipsoid, lat0);
        let sinc0 = gauss.chi0.sin();
        let cosc0 = gauss.chi0.cos();
        let r2 = 2.0 * gauss.rc;
        Ok(Self {
            ellipsoid,
            lon0,
            k0,
            x0,
            y0,
            gauss,
            sinc0,
            cosc0,
            r2,
        })
    }

    pub fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let (lam, chi) = self.gauss.forward(adjlon(lon - self.lon0), lat);
        let sinc = chi.sin();
        let cosc = chi.cos();
        let cosl = lam.cos();
        let k = self.k0 * self.r2 / (1.0 + self.sinc0 * sinc + self.cosc0 * cosc * cosl);
        let x = k * cosc * lam.sin();
        let y = k * (self.cosc0 * sinc - self.sinc0 * cosc * cosl);
        let a = self.ellipsoid.a;
        Ok((a * x + self.x0, a * y + self.y0))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let a = self.ellipsoid.a;
        let xn = (x - self.x0) / a / self.k0;
        let yn = (y - self.y0) / a / self.k0;
        let rho = (xn * xn + yn * yn).sqrt();

        let (lam, chi);
        if rho != 0.0 {
            let c = 2.0 * rho.atan2(self.r2);
            let sinc = c.sin();
            let cosc = c.cos();
            chi = (cosc * self.sinc0 + yn * sinc * self.cosc0 / rho).asin();
            lam = (xn * sinc).atan2(rho * self.cosc0 * cosc - yn * self.sinc0 * sinc);
        } else {
            chi = self.gauss.chi0;
            lam = 0.0;
        }
        let (lam, phi) = self.gauss.inverse(lam, chi)?;
        Ok((adjlon(lam + self.lon0), phi))
    }
}
