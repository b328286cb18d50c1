//! Shared numeric helpers for projection math (isometric/authalic latitude,
//! meridional arc series, angle normalization).
//!
//! These follow the classic PROJ formulations so that results agree with
//! reference implementations to full double precision.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::ProjError;

pub const EPS10: f64 = 1.0e-10;

/// Arc-seconds to radians.
pub const SEC_TO_RAD: f64 = 4.848_136_811_095_36e-6;

/// Normalize an angle to (-PI, PI].
pub fn adjlon(mut lon: f64) -> f64 {
    if lon.abs() <= PI {
        return lon;
    }
    lon += PI;
    lon -= 2.0 * PI * (lon / (2.0 * PI)).floor();
    lon -= PI;
    lon
}

/// Meridian scale factor m(φ) = cos(φ) / sqrt(1 - e²·sin²(φ)).
pub fn msfn(sinphi: f64, cosphi: f64, es: f64) -> f64 {
    cosphi / (1.0 - es * sinphi * sinphi).sqrt()
}

/// Isometric latitude function t(φ) = tan(π/4 - φ/2) / ((1-e·sinφ)/(1+e·sinφ))^(e/2).
pub fn tsfn(phi: f64, sinphi: f64, e: f64) -> f64 {
    let con = e * sinphi;
    (0.5 * (FRAC_PI_2 - phi)).tan() / ((1.0 - con) / (1.0 + con)).powf(0.5 * e)
}

/// Latitude from isometric latitude value ts, by fixed-point iteration.
pub fn phi2(ts: f64, e: f64) -> Result<f64, ProjError> {
    let eccnth = 0.5 * e;
    let mut phi = FRAC_PI_2 - 2.0 * ts.atan();
    for _ in 0..15 {
        let con = e * phi.sin();
        let dphi = FRAC_PI_2 - 2.0 * (ts * ((1.0 - con) / (1.0 + con)).powf(eccnth)).atan() - phi;
        phi += dphi;
        if dphi.abs() <= EPS10 {
            return Ok(phi);
        }
    }
    Err(ProjError::NoConvergence(
        "isometric latitude inverse (phi2)".to_string(),
    ))
}

/// Authalic latitude function q(φ).
pub fn qsfn(sinphi: f64, e: f64, one_es: f64) -> f64 {
    if e >= 1.0e-7 {
        let con = e * sinphi;
        one_es * (sinphi / (1.0 - con * con) - (0.5 / e) * ((1.0 - con) / (1.0 + con)).ln())
    } else {
        sinphi + sinphi
    }
}

// Meridional arc series coefficients.
const C00: f64 = 1.0;
const C02: f64 = 0.25;
const C04: f64 = 0.046875;
const C06: f64 = 0.01953125;
const C08: f64 = 0.01068115234375;
const C22: f64 = 0.75;
const C44: f64 = 0.46875;
const C46: f64 = 0.01302083333333333333;
const C48: f64 = 0.00712076822916666666;
const C66: f64 = 0.36458333333333333333;
const C68: f64 = 0.00569661458333333333;
const C88: f64 = 0.3076171875;

/// Series coefficients for the meridional arc, as a function of e².
pub fn enfn(es: f64) -> [f64; 5] {
    let t = es * es;
    [
        C00 - es * (C02 + es * (C04 + es * (C06 + es * C08))),
        es * (C22 - es * (C04 + es * (C06 + es * C08))),
        t * (C44 - es * (C46 + es * C48)),
        t * es * (C66 - es * C68),
        t * t * es * C88,
    ]
}

/// Meridional arc distance from the equator to φ, in units of the semi-major axis.
pub fn mlfn(phi: f64, mut sphi: f64, mut cphi: f64, en: &[f64; 5]) -> f64 {
    cphi *= sphi;
    sphi *= sphi;
    en[0] * phi - cphi * (en[1] + sphi * (en[2] + sphi * (en[3] + sphi * en[4])))
}

/// Latitude from meridional arc distance, by Newton iteration.
pub fn inv_mlfn(arg: f64, es: f64, en: &[f64; 5]) -> Result<f64, ProjError> {
    let k = 1.0 / (1.0 - es);
    let mut phi = arg;
    for _ in 0..10 {
        let s = phi.sin();
        let mut t = 1.0 - es * s * s;
        t = (mlfn(phi, s, phi.cos(), en) - arg) * t * t.sqrt() * k;
        phi -= t;
        if t.abs() < 1.0e-11 {
            return Ok(phi);
        }
    }
    Err(ProjError::NoConvergence(
        "meridional arc inverse (inv_mlfn)".to_string(),
    ))
}

// Authalic latitude series coefficients.
const P00: f64 = 0.33333333333333333333;
const P01: f64 = 0.17222222222222222222;
const P02: f64 = 0.10257936507936507936;
const P10: f64 = 0.06388888888888888888;
const P11: f64 = 0.06640211640211640211;
const P20: f64 = 0.01641501294219154443;

/// Coefficients for the authalic-to-geodetic latitude series.
pub fn authset(es: f64) -> [f64; 3] {
    let t = es * es;
    [
        es * P00 + t * P01 + t * es * P02,
        t * P10 + t * es * P11,
        t * es * P20,
    ]
}

/// Geodetic latitude from authalic latitude β.
pub fn authlat(beta: f64, apa: &[f64; 3]) -> f64 {
    let t = beta + beta;
    beta + apa[0] * t.sin() + apa[1] * (t + t).sin() + apa[2] * (t + t + t).sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const WGS84_ES: f64 = 0.006694379990141317;

    #[test]
    fn test_adjlon_wraps() {
        assert_relative_eq!(adjlon(PI + 0.1), -PI + 0.1, epsilon = 1e-12);
        assert_relative_eq!(adjlon(-PI - 0.1), PI - 0.1, epsilon = 1e-12);
        assert_relative_eq!(adjlon(0.5), 0.5);
    }

    #[test]
    fn test_tsfn_phi2_inverse_pair() {
        let e = WGS84_ES.sqrt();
        for &lat_deg in &[-80.0, -45.0, 0.0, 30.0, 60.0, 85.0] {
            let phi = (lat_deg as f64).to_radians();
            let ts = tsfn(phi, phi.sin(), e);
            let back = phi2(ts, e).unwrap();
            assert_relative_eq!(back, phi, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_mlfn_inverse_pair() {
        let en = enfn(WGS84_ES);
        for &lat_deg in &[-60.0, -10.0, 0.0, 45.0, 75.0] {
            let phi = (lat_deg as f64).to_radians();
            let ml = mlfn(phi, phi.sin(), phi.cos(), &en);
            let back = inv_mlfn(ml, WGS84_ES, &en).unwrap();
            assert_relative_eq!(back, phi, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_meridional_arc_quarter() {
        // Quarter meridian of WGS84 is ~10001965.7 m.
        let en = enfn(WGS84_ES);
        let m = 6378137.0 * mlfn(FRAC_PI_2, 1.0, 0.0, &en);
        assert_relative_eq!(m, 10_001_965.729, epsilon = 0.01);
    }

    #[test]
    fn test_qsfn_authlat_pair() {
        let e = WGS84_ES.sqrt();
        let one_es = 1.0 - WGS84_ES;
        let qp = qsfn(1.0, e, one_es);
        let apa = authset(WGS84_ES);
        for &lat_deg in &[-70.0, -20.0, 0.0, 35.0, 80.0] {
            let phi = (lat_deg as f64).to_radians();
            let beta = (qsfn(phi.sin(), e, one_es) / qp).asin();
            let back = authlat(beta, &apa);
            assert_relative_eq!(back, phi, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_sphere_degenerates() {
        // With e = 0 the helpers reduce to their spherical forms.
        assert_relative_eq!(qsfn(0.5, 0.0, 1.0), 1.0);
        assert_relative_eq!(msfn(0.0, 1.0, 0.0), 1.0);
        let en = enfn(0.0);
        assert_relative_eq!(mlfn(0.7, 0.7f64.sin(), 0.7f64.cos(), &en), 0.7);
    }
}
