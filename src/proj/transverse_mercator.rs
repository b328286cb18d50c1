//! Transverse Mercator projection, ellipsoidal series form.
//!
//! This is the projection underlying all UTM zones and most national
//! Gauss-Krüger grids. Uses the meridional-arc series (`enfn`/`mlfn`) and
//! the fourth-order longitude expansions; agrees with reference
//! implementations to well under a millimetre over a zone's width.

use std::f64::consts::FRAC_PI_2;

use crate::ellipsoid::Ellipsoid;
use crate::error::ProjError;
use crate::math::{adjlon, enfn, inv_mlfn, mlfn, EPS10};

const FC1: f64 = 1.0;
const FC2: f64 = 0.5;
const FC3: f64 = 0.16666666666666666666;
const FC4: f64 = 0.08333333333333333333;
const FC5: f64 = 0.05;
const FC6: f64 = 0.03333333333333333333;
const FC7: f64 = 0.02380952380952380952;
const FC8: f64 = 0.01785714285714285714;

#[derive(Clone, Debug)]
pub struct TransverseMercator {
    pub ellipsoid: Ellipsoid,
    lon0: f64,
    k0: f64,
    x0: f64,
    y0: f64,
    // Precomputed constants
    esp: f64,
    en: [f64; 5],
    ml0: f64,
}

impl TransverseMercator {
    pub fn new(
        ellipsoid: Ellipsoid,
        lon0: f64,
        lat0: f64,
        k0: f64,
        x0: f64,
        y0: f64,
    ) -> Result<Self, ProjError> {
        if !(k0 > 0.0) {
            return Err(ProjError::InvalidParameter(format!(
                "tmerc scale factor must be positive, got {k0}"
            )));
        }
        let en = enfn(ellipsoid.es);
        let ml0 = mlfn(lat0, lat0.sin(), lat0.cos(), &en);
        Ok(Self {
            ellipsoid,
            lon0,
            k0,
            x0,
            y0,
            esp: ellipsoid.es / (1.0 - ellipsoid.es),
            en,
            ml0,
        })
    }

    /// A UTM zone (1-60): central meridian at zone·6 - 183 degrees,
    /// k₀ = 0.9996, 500 km false easting, 10000 km false northing south.
    pub fn utm_zone(
        ellipsoid: Ellipsoid,
        zone: u8,
        south: bool,
    ) -> Result<Self, ProjError> {
        if !(1..=60).contains(&zone) {
            return Err(ProjError::InvalidParameter(format!(
                "UTM zone must be 1-60, got {zone}"
            )));
        }
        let lon0 = ((zone as f64 - 1.0) * 6.0 - 180.0 + 3.0).to_radians();
        let y0 = if south { 10_000_000.0 } else { 0.0 };
        Self::new(ellipsoid, lon0, 0.0, 0.9996, 500_000.0, y0)
    }

    pub fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let lam = adjlon(lon - self.lon0);
        let es = self.ellipsoid.es;
        let sinphi = lat.sin();
        let cosphi = lat.cos();

        let mut t = if cosphi.abs() > EPS10 {
            sinphi / cosphi
        } else {
            0.0
        };
        t *= t;
        let mut al = cosphi * lam;
        let als = al * al;
        al /= (1.0 - es * sinphi * sinphi).sqrt();
        let n = self.esp * cosphi * cosphi;

        let x = self.k0
            * al
            * (FC1
                + FC3 * als * (1.0 - t + n
                    + FC5 * als * (5.0 + t * (t - 18.0) + n * (14.0 - 58.0 * t)
                        + FC7 * als * (61.0 + t * (t * (179.0 - t) - 479.0)))));
        let y = self.k0
            * (mlfn(lat, sinphi, cosphi, &self.en) - self.ml0
                + sinphi
                    * al
                    * lam
                    * FC2
                    * (1.0
                        + FC4 * als * (5.0 - t + n * (9.0 + 4.0 * n)
                            + FC6 * als * (61.0 + t * (t - 58.0) + n * (270.0 - 330.0 * t)
                                + FC8 * als * (1385.0 + t * (t * (543.0 - t) - 3111.0))))));

        Ok((
            self.ellipsoid.a * x + self.x0,
            self.ellipsoid.a * y + self.y0,
        ))
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let es = self.ellipsoid.es;
        let xn = (x - self.x0) / self.ellipsoid.a;
        let yn = (y - self.y0) / self.ellipsoid.a;

        let mut phi = inv_mlfn(self.ml0 + yn / self.k0, es, &self.en)?;
        if phi.abs() >= FRAC_PI_2 {
            return Ok((
                adjlon(self.lon0),
                if yn < 0.0 { -FRAC_PI_2 } else { FRAC_PI_2 },
            ));
        }

        let sinphi = phi.sin();
        let cosphi = phi.cos();
        let mut t = if cosphi.abs() > EPS10 {
            sinphi / cosphi
        } else {
            0.0
        };
        let n = self.esp * cosphi * cosphi;
        let mut con = 1.0 - es * sinphi * sinphi;
        let d = xn * con.sqrt() / self.k0;
        con *= t;
        t *= t;
        let ds = d * d;

        phi -= (con * ds / (1.0 - es))
            * FC2
            * (1.0
                - ds * FC4
                    * (5.0 + t * (3.0 - 9.0 * n) + n * (1.0 - 4.0 * n)
                        - ds * FC6
                            * (61.0 + t * (90.0 - 252.0 * n + 45.0 * t) + 46.0 * n
                                - ds * FC8
                                    * (1385.0 + t * (3633.0 + t * (4095.0 + 1574.0 * t))))));
        let lam = d
            * (FC1
                - ds * FC3
                    * (1.0 + 2.0 * t + n
                        - ds * FC5
                            * (5.0 + t * (28.0 + 24.0 * t + 8.0 * n) + 6.0 * n
                                - ds * FC7 * (61.0 + t * (662.0 + t * (1320.0 + 720.0 * t))))))
            / cosphi;

        Ok((adjlon(self.lon0 + lam), phi))
    }
}
