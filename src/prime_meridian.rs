//! Prime meridians: longitude offsets from Greenwich.

use crate::error::ProjError;

/// A prime meridian, as a longitude offset from Greenwich in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrimeMeridian {
    pub name: &'static str,
    /// Offset east of Greenwich, radians.
    pub offset: f64,
}

impl PrimeMeridian {
    pub const GREENWICH: PrimeMeridian = PrimeMeridian {
        name: "greenwich",
        offset: 0.0,
    };

    pub fn is_greenwich(&self) -> bool {
        self.offset == 0.0
    }
}

impl Default for PrimeMeridian {
    fn default() -> Self {
        Self::GREENWICH
    }
}

// PROJ prime meridian table, degrees east of Greenwich.
const NAMED: &[(&str, f64)] = &[
    ("greenwich", 0.0),
    ("lisbon", -9.131906111111112),
    ("paris", 2.337229166666667),
    ("bogota", -74.08091666666667),
    ("madrid", -3.687938888888889),
    ("rome", 12.45233333333333),
    ("bern", 7.439583333333333),
    ("jakarta", 106.8077194444444),
    ("ferro", -17.66666666666667),
    ("brussels", 4.367975),
    ("stockholm", 18.05827777777778),
    ("athens", 23.7163375),
    ("oslo", 10.72291666666667),
];

/// Resolve a `+pm=` value: a named meridian or a numeric offset in degrees.
pub fn resolve(value: &str) -> Result<PrimeMeridian, ProjError> {
    for (name, degrees) in NAMED {
        if name.eq_ignore_ascii_case(value) {
            return Ok(PrimeMeridian {
                name,
                offset: degrees.to_radians(),
            });
        }
    }
    value
        .parse::<f64>()
        .map(|degrees| PrimeMeridian {
            name: "unknown",
            offset: degrees.to_radians(),
        })
        .map_err(|_| ProjError::InvalidParameter(format!("unknown prime meridian: {value}")))
}
