//! Coordinate transformation between two reference systems.

use std::sync::Arc;

use crate::crs::Crs;
use crate::error::ProjError;

/// A coordinate in the external representation of some CRS: decimal degrees
/// for geographic systems, projected units otherwise. `z` is an ellipsoidal
/// height in metres and defaults to zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A reusable transformation from `source` to `target`.
///
/// The pipeline runs source units to radians and metres, source projection
/// inverse, prime meridian restoration, datum shift through WGS84 when the
/// datums differ, then the target side in reverse order.
pub struct CoordTransform {
    source: Arc<Crs>,
    target: Arc<Crs>,
    shift_datum: bool,
}

impl CoordTransform {
    /// Construction cannot fail: the datum pair is inspected once here, and an
    /// unconvertible pair reports `DatumNotConvertible` from [`apply`](Self::apply).
    pub fn new(source: Arc<Crs>, target: Arc<Crs>) -> Self {
        let shift_datum = !source.datum.is_equal(&target.datum);
        Self {
            source,
            target,
            shift_datum,
        }
    }

    pub fn source(&self) -> &Arc<Crs> {
        &self.source
    }

    pub fn target(&self) -> &Arc<Crs> {
        &self.target
    }

    pub fn apply(&self, coord: Coord) -> Result<Coord, ProjError> {
        // Source side: external representation to geographic radians.
        let (mut lam, mut phi) = if self.source.is_geographic() {
            (coord.x.to_radians(), coord.y.to_radians())
        } else {
            let to_meter = self.source.unit.to_meter;
            self.source
                .projection
                .inverse(coord.x * to_meter, coord.y * to_meter)?
        };
        let mut z = coord.z;

        lam += self.source.prime_meridian.offset;

        if self.shift_datum {
            (lam, phi, z) = self.source.datum.transform_to(&self.target.datum, lam, phi, z)?;
        }

        lam -= self.target.prime_meridian.offset;

        // Target side: geographic radians to external representation.
        let (x, y) = if self.target.is_geographic() {
            (lam.to_degrees(), phi.to_degrees())
        } else {
            let (x, y) = self.target.projection.forward(lam, phi)?;
            let to_meter = self.target.unit.to_meter;
            (x / to_meter, y / to_meter)
        };
        Ok(Coord::with_z(x, y, z))
    }

    /// The same transformation in the opposite direction.
    pub fn inverse(&self) -> CoordTransform {
        CoordTransform::new(Arc::clone(&self.target), Arc::clone(&self.source))
    }
}

/// One-shot transformation of a single coordinate.
pub fn transform(source: &Arc<Crs>, target: &Arc<Crs>, coord: Coord) -> Result<Coord, ProjError> {
    CoordTransform::new(Arc::clone(source), Arc::clone(target)).apply(coord)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::CrsFactory;
    use approx::assert_relative_eq;

    fn crs(factory: &CrsFactory, spec: &str) -> Arc<Crs> {
        factory.create(spec).unwrap()
    }

    #[test]
    fn test_geographic_passthrough() {
        let f = CrsFactory::new();
        let wgs = crs(&f, "EPSG:4326");
        let out = transform(&wgs, &wgs, Coord::new(12.5, -33.25)).unwrap();
        assert_relative_eq!(out.x, 12.5, epsilon = 1e-12);
        assert_relative_eq!(out.y, -33.25, epsilon = 1e-12);
    }

    #[test]
    fn test_z_carried_through() {
        let f = CrsFactory::new();
        let wgs = crs(&f, "EPSG:4326");
        let utm = crs(&f, "EPSG:32631");
        let out = transform(&wgs, &utm, Coord::with_z(3.0, 46.5, 120.0)).unwrap();
        assert_relative_eq!(out.z, 120.0, epsilon = 1e-9);
    }

    #[test]
    fn test_equal_datums_skip_shift() {
        // Both sides NAD27: no parameters, but no shift is needed either.
        let f = CrsFactory::new();
        let nad27 = crs(&f, "EPSG:4267");
        let alaska = crs(&f, "ESRI:26732");
        let t = CoordTransform::new(Arc::clone(&nad27), Arc::clone(&alaska));
        assert!(t.apply(Coord::new(-142.0, 56.0)).is_ok());
    }

    #[test]
    fn test_unshiftable_datum_rejected_at_apply() {
        // Building the transform succeeds; the missing shift parameters only
        // matter once a point actually has to cross the datum boundary.
        let f = CrsFactory::new();
        let nad27 = crs(&f, "EPSG:4267");
        let wgs = crs(&f, "EPSG:4326");
        let fwd = CoordTransform::new(Arc::clone(&nad27), Arc::clone(&wgs));
        assert!(matches!(
            fwd.apply(Coord::new(-100.0, 40.0)),
            Err(ProjError::DatumNotConvertible(_))
        ));
        let rev = CoordTransform::new(wgs, nad27);
        assert!(matches!(
            rev.apply(Coord::new(-100.0, 40.0)),
            Err(ProjError::DatumNotConvertible(_))
        ));
        // A failed point does not poison the transform for later calls.
        assert!(matches!(
            rev.apply(Coord::new(-101.0, 41.0)),
            Err(ProjError::DatumNotConvertible(_))
        ));
    }

    #[test]
    fn test_inverse_transform() {
        let f = CrsFactory::new();
        let wgs = crs(&f, "EPSG:4326");
        let osgb = crs(&f, "EPSG:27700");
        let fwd = CoordTransform::new(Arc::clone(&wgs), Arc::clone(&osgb));
        let inv = fwd.inverse();
        let there = fwd.apply(Coord::new(-2.89, 55.4)).unwrap();
        let back = inv.apply(there).unwrap();
        assert_relative_eq!(back.x, -2.89, epsilon = 1e-7);
        assert_relative_eq!(back.y, 55.4, epsilon = 1e-7);
    }
}
