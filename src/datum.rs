//! Geodetic datums and the inter-datum Helmert shift.
//!
//! A datum binds an ellipsoid to optional 3- or 7-parameter shift values
//! toward WGS84. Converting between two datums pivots through geocentric
//! WGS84 space: geographic -> geocentric -> apply source shift -> invert
//! target shift -> geocentric -> geographic.

use std::f64::consts::FRAC_PI_2;

use crate::ellipsoid::{self, Ellipsoid};
use crate::error::ProjError;
use crate::math::SEC_TO_RAD;

const ELLIPSOID_ES_TOLERANCE: f64 = 5.0e-12;

/// A geocentric position, metres.
#[derive(Clone, Copy, Debug)]
pub struct Geocentric {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Helmert parameters toward WGS84. Translations in metres, rotations in
/// arc-seconds, scale in parts per million.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HelmertShift {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
    pub scale_ppm: f64,
    pub seven_param: bool,
}

impl HelmertShift {
    pub fn from_towgs84(values: &[f64]) -> Result<Self, ProjError> {
        match values.len() {
            3 => Ok(Self {
                dx: values[0],
                dy: values[1],
                dz: values[2],
                rx: 0.0,
                ry: 0.0,
                rz: 0.0,
                scale_ppm: 0.0,
                seven_param: false,
            }),
            7 => Ok(Self {
                dx: values[0],
                dy: values[1],
                dz: values[2],
                rx: values[3],
                ry: values[4],
                rz: values[5],
                scale_ppm: values[6],
                seven_param: true,
            }),
            n => Err(ProjError::InvalidParameter(format!(
                "towgs84 expects 3 or 7 values, got {n}"
            ))),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.dx == 0.0
            && self.dy == 0.0
            && self.dz == 0.0
            && self.rx == 0.0
            && self.ry == 0.0
            && self.rz == 0.0
            && self.scale_ppm == 0.0
    }

    /// Apply the shift: local geocentric -> WGS84 geocentric.
    pub fn to_wgs84(&self, p: Geocentric) -> Geocentric {
        if !self.seven_param {
            return Geocentric {
                x: p.x + self.dx,
                y: p.y + self.dy,
                z: p.z + self.dz,
            };
        }
        let rx = self.rx * SEC_TO_RAD;
        let ry = self.ry * SEC_TO_RAD;
        let rz = self.rz * SEC_TO_RAD;
        let m = 1.0 + self.scale_ppm * 1.0e-6;
        Geocentric {
            x: m * (p.x - rz * p.y + ry * p.z) + self.dx,
            y: m * (rz * p.x + p.y - rx * p.z) + self.dy,
            z: m * (-ry * p.x + rx * p.y + p.z) + self.dz,
        }
    }

    /// Invert the shift: WGS84 geocentric -> local geocentric, using the
    /// standard linear approximation.
    pub fn from_wgs84(&self, p: Geocentric) -> Geocentric {
        if !self.seven_param {
            return Geocentric {
                x: p.x - self.dx,
                y: p.y - self.dy,
                z: p.z - self.dz,
            };
        }
        let rx = self.rx * SEC_TO_RAD;
        let ry = self.ry * SEC_TO_RAD;
        let rz = self.rz * SEC_TO_RAD;
        let m = 1.0 + self.scale_ppm * 1.0e-6;
        let tx = (p.x - self.dx) / m;
        let ty = (p.y - self.dy) / m;
        let tz = (p.z - self.dz) / m;
        Geocentric {
            x: tx + rz * ty - ry * tz,
            y: -rz * tx + ty + rx * tz,
            z: ry * tx - rx * ty + tz,
        }
    }
}

/// How a datum relates to WGS84.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DatumShift {
    /// No analytic parameters (grid-based datums such as NAD27). A transform
    /// to a different datum is an error, never a silent no-op.
    None,
    Helmert(HelmertShift),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Datum {
    pub name: &'static str,
    pub ellipsoid: Ellipsoid,
    pub shift: DatumShift,
}

impl Datum {
    pub fn wgs84() -> Self {
        named("WGS84").unwrap()
    }

    /// A user datum from explicit `+towgs84` parameters.
    pub fn user(ellipsoid: Ellipsoid, values: &[f64]) -> Result<Self, ProjError> {
        Ok(Self {
            name: "user",
            ellipsoid,
            shift: DatumShift::Helmert(HelmertShift::from_towgs84(values)?),
        })
    }

    pub fn has_shift_parameters(&self) -> bool {
        matches!(self.shift, DatumShift::Helmert(_))
    }

    /// True when converting between the two datums requires no shift:
    /// same ellipsoid (within tolerance) and identical shift parameters.
    pub fn is_equal(&self, other: &Datum) -> bool {
        if (self.ellipsoid.a - other.ellipsoid.a).abs() > 1.0e-6
            || (self.ellipsoid.es - other.ellipsoid.es).abs() > ELLIPSOID_ES_TOLERANCE
        {
            return false;
        }
        match (&self.shift, &other.shift) {
            (DatumShift::None, DatumShift::None) => true,
            (DatumShift::Helmert(a), DatumShift::Helmert(b)) => {
                if a.is_identity() && b.is_identity() {
                    true
                } else {
                    a == b
                }
            }
            _ => false,
        }
    }

    fn shift_params(&self, role: &str) -> Result<&HelmertShift, ProjError> {
        match &self.shift {
            DatumShift::Helmert(h) => Ok(h),
            DatumShift::None => Err(ProjError::DatumNotConvertible(format!(
                "{role} datum {} has no toWGS84 parameters",
                self.name
            ))),
        }
    }

    /// Convert geographic coordinates (radians, metres) from this datum to
    /// `target`. Callers are expected to have checked `is_equal` first.
    pub fn transform_to(
        &self,
        target: &Datum,
        lam: f64,
        phi: f64,
        h: f64,
    ) -> Result<(f64, f64, f64), ProjError> {
        let src_shift = self.shift_params("source")?;
        let tgt_shift = target.shift_params("target")?;

        let local = geodetic_to_geocentric(&self.ellipsoid, lam, phi, h)?;
        let pivot = src_shift.to_wgs84(local);
        let out = tgt_shift.from_wgs84(pivot);
        Ok(geocentric_to_geodetic(&target.ellipsoid, out))
    }
}

/// Convert geodetic coordinates to geocentric (radians, metres in/out).
pub fn geodetic_to_geocentric(
    ell: &Ellipsoid,
    lam: f64,
    mut phi: f64,
    h: f64,
) -> Result<Geocentric, ProjError> {
    // Tolerate slight numerical overshoot beyond the poles.
    if phi > FRAC_PI_2 {
        if phi > FRAC_PI_2 + 1.0e-8 {
            return Err(ProjError::OutsideDomain(format!(
                "latitude {phi} beyond pole"
            )));
        }
        phi = FRAC_PI_2;
    } else if phi < -FRAC_PI_2 {
        if phi < -FRAC_PI_2 - 1.0e-8 {
            return Err(ProjError::OutsideDomain(format!(
                "latitude {phi} beyond pole"
            )));
        }
        phi = -FRAC_PI_2;
    }
    let sin_lat = phi.sin();
    let cos_lat = phi.cos();
    let rn = ell.a / (1.0 - ell.es * sin_lat * sin_lat).sqrt();
    Ok(Geocentric {
        x: (rn + h) * cos_lat * lam.cos(),
        y: (rn + h) * cos_lat * lam.sin(),
        z: (rn * (1.0 - ell.es) + h) * sin_lat,
    })
}

// Constants for the non-iterative geocentric-to-geodetic method.
const AD_C: f64 = 1.0026000;
const COS_67P5: f64 = 0.38268343236508977;

/// Convert geocentric coordinates to geodetic (lam, phi, height), using the
/// GEOTRANS closed-form approximation.
pub fn geocentric_to_geodetic(ell: &Ellipsoid, p: Geocentric) -> (f64, f64, f64) {
    let at_pole = p.x == 0.0 && p.y == 0.0;
    let lam = if at_pole { 0.0 } else { p.y.atan2(p.x) };

    let w2 = p.x * p.x + p.y * p.y;
    let w = w2.sqrt();
    if at_pole && p.z == 0.0 {
        return (lam, 0.0, -ell.b);
    }

    let t0 = p.z * AD_C;
    let s0 = (t0 * t0 + w2).sqrt();
    let sin_b0 = t0 / s0;
    let cos_b0 = w / s0;
    let sin3_b0 = sin_b0 * sin_b0 * sin_b0;
    let t1 = p.z + ell.b * ell.ep2 * sin3_b0;
    let sum = w - ell.a * ell.es * cos_b0 * cos_b0 * cos_b0;
    let s1 = (t1 * t1 + sum * sum).sqrt();
    let sin_p1 = t1 / s1;
    let cos_p1 = sum / s1;
    let rn = ell.a / (1.0 - ell.es * sin_p1 * sin_p1).sqrt();

    let height = if cos_p1 >= COS_67P5 {
        w / cos_p1 - rn
    } else if cos_p1 <= -COS_67P5 {
        w / -cos_p1 - rn
    } else {
        p.z / sin_p1 + rn * (ell.es - 1.0)
    };
    let phi = if cos_p1 == 0.0 {
        if sin_p1 > 0.0 {
            FRAC_PI_2
        } else {
            -FRAC_PI_2
        }
    } else {
        (sin_p1 / cos_p1).atan()
    };
    (lam, phi, height)
}

// PROJ datum table. Rotation values in arc-seconds, scale in ppm.
// NAD27 carries no analytic parameters (grid shift only).
struct NamedDatum {
    name: &'static str,
    ellps: &'static str,
    towgs84: Option<&'static [f64]>,
}

const NAMED: &[NamedDatum] = &[
    NamedDatum {
        name: "WGS84",
        ellps: "WGS84",
        towgs84: Some(&[0.0, 0.0, 0.0]),
    },
    NamedDatum {
        name: "GGRS87",
        ellps: "GRS80",
        towgs84: Some(&[-199.87, 74.79, 246.62]),
    },
    NamedDatum {
        name: "NAD83",
        ellps: "GRS80",
        towgs84: Some(&[0.0, 0.0, 0.0]),
    },
    NamedDatum {
        name: "NAD27",
        ellps: "clrk66",
        towgs84: None,
    },
    NamedDatum {
        name: "potsdam",
        ellps: "bessel",
        towgs84: Some(&[606.0, 23.0, 413.0]),
    },
    NamedDatum {
        name: "carthage",
        ellps: "clrk80",
        towgs84: Some(&[-263.0, 6.0, 431.0]),
    },
    NamedDatum {
        name: "hermannskogel",
        ellps: "bessel",
        towgs84: Some(&[653.0, -212.0, 449.0]),
    },
    NamedDatum {
        name: "ire65",
        ellps: "mod_airy",
        towgs84: Some(&[482.530, -130.596, 564.557, -1.042, -0.214, -0.631, 8.15]),
    },
    NamedDatum {
        name: "nzgd49",
        ellps: "intl",
        towgs84: Some(&[59.47, -5.04, 187.44, 0.47, -0.1, 1.024, -4.5993]),
    },
    NamedDatum {
        name: "OSGB36",
        ellps: "airy",
        towgs84: Some(&[446.448, -125.157, 542.060, 0.1502, 0.2470, 0.8421, -20.4894]),
    },
];

/// Look up a named datum (`+datum=` value).
pub fn named(name: &str) -> Result<Datum, ProjError> {
    for entry in NAMED {
        if entry.name == name {
            let ell = ellipsoid::named(entry.ellps)?;
            let shift = match entry.towgs84 {
                Some(values) => DatumShift::Helmert(HelmertShift::from_towgs84(values)?),
                None => DatumShift::None,
            };
            return Ok(Datum {
                name: entry.name,
                ellipsoid: ell,
                shift,
            });
        }
    }
    Err(ProjError::InvalidParameter(format!("unknown datum: {name}")))
}
