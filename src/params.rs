//! PROJ-style parameter string parsing.
//!
//! A spec is a whitespace-separated list of `+key=value` or bare `+key`
//! tokens, e.g. `+proj=tmerc +lat_0=0 +lon_0=-142 +k=0.9999 +units=us-ft`.
//! Bare keys act as boolean flags (`+south`, `+no_defs`).

use std::collections::HashMap;

use crate::error::ProjError;

#[derive(Debug, Clone, Default)]
pub struct ParamMap {
    values: HashMap<String, String>,
}

impl ParamMap {
    pub fn parse(spec: &str) -> Result<Self, ProjError> {
        let mut values = HashMap::new();
        for token in spec.split_whitespace() {
            let token = token.trim_start_matches('+');
            if token.is_empty() {
                continue;
            }
            match token.split_once('=') {
                Some((key, value)) => {
                    values.insert(key.to_string(), value.to_string());
                }
                None => {
                    values.insert(token.to_string(), String::new());
                }
            }
        }
        if values.is_empty() {
            return Err(ProjError::InvalidParameter(format!(
                "no parameters in spec: {spec:?}"
            )));
        }
        Ok(Self { values })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn f64(&self, key: &str) -> Result<Option<f64>, ProjError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<f64>()
                .map(Some)
                .map_err(|_| ProjError::InvalidParameter(format!("{key}={raw}: not a number"))),
        }
    }

    pub fn f64_or(&self, key: &str, default: f64) -> Result<f64, ProjError> {
        Ok(self.f64(key)?.unwrap_or(default))
    }

    /// Angle parameter in decimal degrees, returned in radians.
    pub fn angle(&self, key: &str) -> Result<Option<f64>, ProjError> {
        Ok(self.f64(key)?.map(f64::to_radians))
    }

    pub fn angle_or(&self, key: &str, default_rad: f64) -> Result<f64, ProjError> {
        Ok(self.angle(key)?.unwrap_or(default_rad))
    }

    /// Comma-separated list of numbers, e.g. `+towgs84=-87,-98,-121`.
    pub fn f64_list(&self, key: &str) -> Result<Option<Vec<f64>>, ProjError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(raw) => raw
                .split(',')
                .map(|part| {
                    part.trim().parse::<f64>().map_err(|_| {
                        ProjError::InvalidParameter(format!("{key}={raw}: not a number list"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_key_values_and_flags() {
        let p = ParamMap::parse("+proj=tmerc +lat_0=0 +lon_0=-142 +k=0.9999 +south +no_defs")
            .unwrap();
        assert_eq!(p.string("proj"), Some("tmerc"));
        assert_relative_eq!(p.f64("lon_0").unwrap().unwrap(), -142.0);
        assert!(p.contains("south"));
        assert!(p.contains("no_defs"));
        assert!(!p.contains("zone"));
    }

    #[test]
    fn test_repeated_plus_and_whitespace() {
        let p = ParamMap::parse("  ++proj=merc   +lon_0=3  ").unwrap();
        assert_eq!(p.string("proj"), Some("merc"));
        assert_relative_eq!(p.f64("lon_0").unwrap().unwrap(), 3.0);
    }

    #[test]
    fn test_angle_in_radians() {
        let p = ParamMap::parse("+proj=lcc +lat_1=46.8").unwrap();
        assert_relative_eq!(
            p.angle("lat_1").unwrap().unwrap(),
            46.8f64.to_radians(),
            epsilon = 1e-15
        );
        assert_relative_eq!(p.angle_or("lat_2", 0.25).unwrap(), 0.25);
    }

    #[test]
    fn test_towgs84_list() {
        let p = ParamMap::parse("+proj=longlat +towgs84=-87,-98,-121").unwrap();
        assert_eq!(p.f64_list("towgs84").unwrap().unwrap(), vec![-87.0, -98.0, -121.0]);
    }

    #[test]
    fn test_bad_number_is_parse_error() {
        let p = ParamMap::parse("+proj=merc +lon_0=abc").unwrap();
        assert!(matches!(
            p.f64("lon_0"),
            Err(ProjError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_empty_spec_rejected() {
        assert!(ParamMap::parse("   ").is_err());
    }
}
