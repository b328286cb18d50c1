//! Coordinate reference system transformations.
//!
//! A CRS is built from a PROJ-style parameter string or an `AUTHORITY:CODE`
//! name, and pairs of systems are bridged by [`CoordTransform`]: projected
//! units to geographic radians, a Helmert shift through WGS84 when the datums
//! differ, and back out the other side.
//!
//! ```
//! use reproj::{factory, transform, Coord};
//!
//! let wgs84 = factory::global().from_name("EPSG:4326")?;
//! let osgb = factory::global().from_name("EPSG:27700")?;
//! let out = transform::transform(&wgs84, &osgb, Coord::new(-2.89, 55.4))?;
//! assert!((out.x - 343_733.14).abs() < 0.5);
//! # Ok::<(), reproj::ProjError>(())
//! ```

pub mod crs;
pub mod datum;
pub mod ellipsoid;
pub mod error;
pub mod factory;
pub mod math;
pub mod params;
pub mod prime_meridian;
pub mod proj;
pub mod registry;
pub mod transform;
pub mod units;

pub use crs::Crs;
pub use datum::Datum;
pub use ellipsoid::Ellipsoid;
pub use error::ProjError;
pub use factory::CrsFactory;
pub use proj::Projection;
pub use transform::{Coord, CoordTransform};
