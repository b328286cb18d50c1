//! American Polyconic projection.

use crate::ellipsoid::Ellipsoid;
use crate::error::ProjError;
use crate::math::{adjlon, mlfn, msfn};

const TOL: f64 = 1e-10;
const CONV: f64 = 1e-12;
const INV_MAX_ITER: usize = 20;

#[derive(Clone, Debug)]
pub struct Polyconic {
    pub ellipsoid: Ellipsoid,
    lon0: f64,
    x0: f64,
    y0: f64,
    en: [f64; 5],
    ml0: f64,
}

impl Polyconic {
    pub fn new(ellipsoid: Ellipsoid, lon0: f64, lat0: f64, x0: f64, y0: f64) -> Self {
        let en = crate::math::enfn(ellipsoid.es);
        let ml0 = -mlfn(lat0, lat0.sin(), lat0.cos(), &en);
        Self {
            ellipsoid,
            lon0,
            x0,
            y0,
            en,
            ml0,
        }
    }

    pub fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let lam = adjlon(lon - self.lon0);
        let (x, y) = if lat.abs() <= TOL {
            (lam, self.ml0)
        } else {
            let sp = lat.sin();
            let cp = lat.cos();
            let ms = if cp.abs() > TOL {
                msfn(sp, cp, self.ellipsoid.es) / sp
            } else {
                0.0
            };
            let e_ = lam * sp;
            (
                ms * e_.sin(),
                mlfn(lat, sp, cp, &self.en) + self.ml0 + ms * (1.0 - e_.cos()),
            )
        };
        let a = self.ellipsoid.a;
        Ok((a * x + self.x0, a * y + self.y0))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let a = self.ellipsoid.a;
        let es = self.ellipsoid.es;
        let one_es = 1.0 - es;
        let xn = (x - self.x0) / a;
        let yn = (y - self.y0) / a - self.ml0;

        if yn.abs() <= TOL {
            return Ok((adjlon(xn + self.lon0), 0.0));
        }

        let r = yn * yn + xn * xn;
        let mut phi = yn;
        let mut converged = false;
        for _ in 0..INV_MAX_ITER {
            let sp = phi.sin();
            let cp = phi.cos();
            if cp.abs() < CONV {
                return Err(ProjError::NoConvergence(
                    "poly inverse iteration reached the pole".to_string(),
                ));
            }
            let mp = (1.0 - es * sp * sp).sqrt();
            let c = sp * mp / cp;
            let ml = mlfn(phi, sp, cp, &self.en);
            let mlb = ml * ml + r;
            let mlp = one_es / (mp * mp * mp);
            let dphi = (2.0 * ml + c * mlb - 2.0 * yn * (c * ml + 1.0))
                / (es * sp * cp * (mlb - 2.0 * yn * ml) / c
                    + 2.0 * (yn - ml) * (c * mlp - 1.0 / sp)
                    - 2.0 * mlp);
            phi += dphi;
            if dphi.abs() <= TOL {
                converged = true;
                break;
            }
        }
        if !converged {
            return Err(ProjError::NoConvergence(
                "poly inverse iteration did not converge".to_string(),
            ));
        }
        let c = phi.sin();
        let arg = (xn * phi.tan() * (1.0 - es * c * c).sqrt()).clamp(-1.0, 1.0);
        let lam = arg.asin() / phi.sin();
        Ok((adjlon(lam + self.lon0), phi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoid;
    use approx::assert_relative_eq;

    fn brazil_polyconic() -> Polyconic {
        // Brazil Polyconic geometry (EPSG:29100).
        Polyconic::new(
            ellipsoid::named("GRS67").unwrap(),
            (-54.0f64).to_radians(),
            0.0,
            5_000_000.0,
            10_000_000.0,
        )
    }

    #[test]
    fn test_known_point() {
        let proj = brazil_polyconic();
        let (x, y) = proj
            .forward((-53.0f64).to_radians(), 5.0f64.to_radians())
            .unwrap();
        assert_relative_eq!(x, 5_110_899.06, epsilon = 10.0);
        assert_relative_eq!(y, 10_552_971.67, epsilon = 10.0);
    }

    #[test]
    fn test_equator_is_linear() {
        let proj = brazil_polyconic();
        let (x, y) = proj.forward((-50.0f64).to_radians(), 0.0).unwrap();
        assert_relative_eq!(
            x,
            5_000_000.0 + proj.ellipsoid.a * 4.0f64.to_radians(),
            epsilon = 1e-6
        );
        assert_relative_eq!(y, 10_000_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_roundtrip() {
        let proj = brazil_polyconic();
        for &(lon_deg, lat_deg) in &[(-54.0, -10.0), (-43.2, -22.9), (-60.0, 3.1)] {
            let lon = (lon_deg as f64).to_radians();
            let lat = (lat_deg as f64).to_radians();
            let (x, y) = proj.forward(lon, lat).unwrap();
            let (lon2, lat2) = proj.inverse(x, y).unwrap();
            assert_relative_eq!(lon2, lon, epsilon = 1e-9);
            assert_relative_eq!(lat2, lat, epsilon = 1e-9);
        }
    }
}
