//! Linear units for projected coordinates.

use crate::error::ProjError;

/// A linear unit: multiplying a value in this unit by `to_meter` yields metres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Unit {
    pub name: &'static str,
    pub to_meter: f64,
}

impl Unit {
    pub const METER: Unit = Unit {
        name: "m",
        to_meter: 1.0,
    };

    /// Explicit `+to_meter=` override.
    pub fn custom(to_meter: f64) -> Result<Self, ProjError> {
        if !(to_meter > 0.0) {
            return Err(ProjError::InvalidParameter(format!(
                "to_meter must be positive, got {to_meter}"
            )));
        }
        Ok(Unit {
            name: "custom",
            to_meter,
        })
    }
}

impl Default for Unit {
    fn default() -> Self {
        Self::METER
    }
}

// PROJ linear unit table (subset).
const NAMED: &[(&str, f64)] = &[
    ("m", 1.0),
    ("km", 1000.0),
    ("dm", 0.1),
    ("cm", 0.01),
    ("mm", 0.001),
    ("ft", 0.3048),
    ("us-ft", 0.304800609601219241),
    ("yd", 0.9144),
    ("us-yd", 0.914401828803657204),
    ("in", 0.0254),
    ("mi", 1609.344),
    ("us-mi", 1609.347218694437),
    ("fath", 1.8288),
    ("ch", 20.1168),
    ("link", 0.201168),
    ("kmi", 1852.0),
];

/// Resolve a `+units=` value to a linear unit.
pub fn resolve(value: &str) -> Result<Unit, ProjError> {
    for (name, to_meter) in NAMED {
        if *name == value {
            return Ok(Unit {
                name,
                to_meter: *to_meter,
            });
        }
    }
    Err(ProjError::InvalidParameter(format!("unknown unit: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_us_survey_foot() {
        let u = resolve("us-ft").unwrap();
        // 500000 m is exactly 1640416.666... US survey feet.
        assert_relative_eq!(500_000.0 / u.to_meter, 1_640_416.666_666, epsilon = 0.001);
    }

    #[test]
    fn test_meter_identity() {
        assert_relative_eq!(resolve("m").unwrap().to_meter, 1.0);
    }

    #[test]
    fn test_custom_override() {
        let u = Unit::custom(0.3048006096012192).unwrap();
        assert_relative_eq!(u.to_meter, 0.3048006096012192);
        assert!(Unit::custom(0.0).is_err());
    }

    #[test]
    fn test_unknown_unit_rejected() {
        assert!(resolve("cubit").is_err());
    }
}
