//! Reference ellipsoids.

use crate::error::ProjError;

/// Reference ellipsoid shape parameters with derived eccentricities.
/// Immutable once constructed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    pub name: &'static str,
    /// Semi-major axis (metres)
    pub a: f64,
    /// Semi-minor axis (metres)
    pub b: f64,
    /// First eccentricity squared: (a² - b²) / a²
    pub es: f64,
    /// First eccentricity
    pub e: f64,
    /// Second eccentricity squared: e² / (1 - e²)
    pub ep2: f64,
}

impl Ellipsoid {
    pub fn from_axes(name: &'static str, a: f64, b: f64) -> Result<Self, ProjError> {
        if !(a > 0.0) || !(b > 0.0) || b > a {
            return Err(ProjError::InvalidParameter(format!(
                "invalid ellipsoid axes a={a} b={b}"
            )));
        }
        let es = (a * a - b * b) / (a * a);
        Ok(Self {
            name,
            a,
            b,
            es,
            e: es.sqrt(),
            ep2: es / (1.0 - es),
        })
    }

    pub fn from_reciprocal_flattening(name: &'static str, a: f64, rf: f64) -> Result<Self, ProjError> {
        if !(rf > 1.0) {
            return Err(ProjError::InvalidParameter(format!(
                "invalid reciprocal flattening rf={rf}"
            )));
        }
        Self::from_flattening(name, a, 1.0 / rf)
    }

    pub fn from_flattening(name: &'static str, a: f64, f: f64) -> Result<Self, ProjError> {
        if !(0.0..1.0).contains(&f) {
            return Err(ProjError::InvalidParameter(format!(
                "invalid flattening f={f}"
            )));
        }
        Self::from_axes(name, a, a * (1.0 - f))
    }

    pub fn sphere(name: &'static str, radius: f64) -> Result<Self, ProjError> {
        Self::from_axes(name, radius, radius)
    }

    pub fn is_sphere(&self) -> bool {
        self.es == 0.0
    }

    /// WGS84, the default ellipsoid when a spec names none.
    pub fn wgs84() -> Self {
        named("WGS84").unwrap()
    }
}

// PROJ ellipsoid table (subset). Entries are (name, a, shape) where shape is
// either a reciprocal flattening or an explicit semi-minor axis.
enum Shape {
    Rf(f64),
    B(f64),
}

const PRESETS: &[(&str, f64, Shape)] = &[
    ("MERIT", 6378137.0, Shape::Rf(298.257)),
    ("GRS80", 6378137.0, Shape::Rf(298.257222101)),
    ("WGS84", 6378137.0, Shape::Rf(298.257223563)),
    ("WGS72", 6378135.0, Shape::Rf(298.26)),
    ("WGS66", 6378145.0, Shape::Rf(298.25)),
    ("WGS60", 6378165.0, Shape::Rf(298.3)),
    ("intl", 6378388.0, Shape::Rf(297.0)),
    ("new_intl", 6378157.5, Shape::B(6356772.2)),
    ("bessel", 6377397.155, Shape::Rf(299.1528128)),
    ("bess_nam", 6377483.865, Shape::Rf(299.1528128)),
    ("clrk66", 6378206.4, Shape::B(6356583.8)),
    ("clrk80", 6378249.145, Shape::Rf(293.4663)),
    ("GRS67", 6378160.0, Shape::Rf(298.2471674270)),
    ("airy", 6377563.396, Shape::B(6356256.910)),
    ("mod_airy", 6377340.189, Shape::B(6356034.446)),
    ("aust_SA", 6378160.0, Shape::Rf(298.25)),
    ("krass", 6378245.0, Shape::Rf(298.3)),
    ("evrst30", 6377276.345, Shape::Rf(300.8017)),
    ("helmert", 6378200.0, Shape::Rf(298.3)),
    ("sphere", 6370997.0, Shape::B(6370997.0)),
];

/// Look up a named ellipsoid preset (`+ellps=` value).
pub fn named(name: &str) -> Result<Ellipsoid, ProjError> {
    for (preset, a, shape) in PRESETS {
        if *preset == name {
            return match shape {
                Shape::Rf(rf) => Ellipsoid::from_reciprocal_flattening(preset, *a, *rf),
                Shape::B(b) => Ellipsoid::from_axes(preset, *a, *b),
            };
        }
    }
    Err(ProjError::InvalidParameter(format!(
        "unknown ellipsoid: {name}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wgs84_constants() {
        let e = Ellipsoid::wgs84();
        assert_relative_eq!(e.a, 6_378_137.0);
        assert_relative_eq!(e.b, 6_356_752.314_245_179, epsilon = 0.001);
        assert_relative_eq!(e.e, 0.081_819_190_842_622, epsilon = 1e-12);
        assert_relative_eq!(e.es, 0.006_694_379_990_141, epsilon = 1e-12);
    }

    #[test]
    fn test_grs80_close_to_wgs84() {
        let grs80 = named("GRS80").unwrap();
        let wgs84 = Ellipsoid::wgs84();
        assert_relative_eq!(grs80.a, wgs84.a);
        assert!((grs80.es - wgs84.es).abs() < 1e-9);
        assert!(grs80.es != wgs84.es);
    }

    #[test]
    fn test_clarke_1866_from_axes() {
        let e = named("clrk66").unwrap();
        assert_relative_eq!(e.b, 6_356_583.8);
        assert_relative_eq!(e.es, 0.006_768_657_997_291, epsilon = 1e-12);
    }

    #[test]
    fn test_flattening_forms_agree() {
        let preset = named("GRS80").unwrap();
        let built =
            Ellipsoid::from_flattening("GRS80", 6_378_137.0, 1.0 / 298.257222101).unwrap();
        assert_relative_eq!(preset.es, built.es, epsilon = 1e-15);
    }

    #[test]
    fn test_sphere_has_zero_eccentricity() {
        let s = named("sphere").unwrap();
        assert!(s.is_sphere());
        assert_relative_eq!(s.e, 0.0);
    }

    #[test]
    fn test_invalid_axes_rejected() {
        assert!(Ellipsoid::from_axes("user", -1.0, 1.0).is_err());
        assert!(Ellipsoid::from_axes("user", 6378137.0, 6378138.0).is_err());
        assert!(named("nosuch").is_err());
    }
}
