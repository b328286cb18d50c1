//! A coordinate reference system assembled from a parameter string.

use crate::datum::{self, Datum};
use crate::ellipsoid::{self, Ellipsoid};
use crate::error::ProjError;
use crate::params::ParamMap;
use crate::prime_meridian::{self, PrimeMeridian};
use crate::proj::albers::AlbersEqualArea;
use crate::proj::azimuthal_equal_area::AzimuthalEqualArea;
use crate::proj::equirectangular::Equirectangular;
use crate::proj::lambert_conformal::LambertConformalConic;
use crate::proj::mercator::Mercator;
use crate::proj::oblique_stereographic::ObliqueStereographic;
use crate::proj::polyconic::Polyconic;
use crate::proj::stereographic::Stereographic;
use crate::proj::swiss_oblique::SwissObliqueMercator;
use crate::proj::transverse_mercator::TransverseMercator;
use crate::proj::Projection;
use crate::units::{self, Unit};

#[derive(Clone, Debug)]
pub struct Crs {
    pub name: String,
    pub projection: Projection,
    pub datum: Datum,
    pub prime_meridian: PrimeMeridian,
    /// Linear unit of projected coordinates. Geographic systems always use
    /// decimal degrees externally, whatever this says.
    pub unit: Unit,
}

impl Crs {
    /// Builds a CRS from a PROJ-style parameter string.
    pub fn from_proj_string(name: &str, spec: &str) -> Result<Self, ProjError> {
        let params = ParamMap::parse(spec)?;
        Self::from_params(name, &params)
    }

    pub fn from_params(name: &str, params: &ParamMap) -> Result<Self, ProjError> {
        let named_datum = match params.string("datum") {
            Some(d) => Some(datum::named(d)?),
            None => None,
        };

        let explicit_ellipsoid = parse_ellipsoid(params)?;
        let ell = explicit_ellipsoid
            .or_else(|| named_datum.as_ref().map(|d| d.ellipsoid))
            .unwrap_or_else(Ellipsoid::wgs84);

        // No +datum and no +towgs84 means the CRS is treated as WGS84 for
        // datum purposes even when it carries a different ellipsoid.
        let datum = match named_datum {
            Some(d) => d,
            None => match params.f64_list("towgs84")? {
                Some(values) => Datum::user(ell, &values)?,
                None => Datum::wgs84(),
            },
        };

        let prime_meridian = match params.string("pm") {
            Some(pm) => prime_meridian::resolve(pm)?,
            None => PrimeMeridian::GREENWICH,
        };

        let projection = build_projection(params, ell)?;

        // Geographic systems are always read and written in decimal degrees,
        // so any +units or +to_meter is ignored there.
        let unit = if projection.is_geographic() {
            Unit::METER
        } else {
            match params.f64("to_meter")? {
                Some(to_meter) => Unit::custom(to_meter)?,
                None => match params.string("units") {
                    Some(u) => units::resolve(u)?,
                    None => Unit::METER,
                },
            }
        };

        Ok(Self {
            name: name.to_string(),
            projection,
            datum,
            prime_meridian,
            unit,
        })
    }

    pub fn is_geographic(&self) -> bool {
        self.projection.is_geographic()
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        self.projection.ellipsoid()
    }

    /// The geographic companion of this CRS: same datum and prime meridian,
    /// no projection.
    pub fn to_geographic(&self) -> Crs {
        if self.is_geographic() {
            return self.clone();
        }
        Crs {
            name: format!("{} (geographic)", self.name),
            projection: Projection::Geographic(*self.ellipsoid()),
            datum: self.datum,
            prime_meridian: self.prime_meridian,
            unit: Unit::METER,
        }
    }
}

fn parse_ellipsoid(params: &ParamMap) -> Result<Option<Ellipsoid>, ProjError> {
    if let Some(name) = params.string("ellps") {
        return ellipsoid::named(name).map(Some);
    }
    if let Some(a) = params.f64("a")? {
        if let Some(b) = params.f64("b")? {
            return Ellipsoid::from_axes("user", a, b).map(Some);
        }
        if let Some(rf) = params.f64("rf")? {
            return Ellipsoid::from_reciprocal_flattening("user", a, rf).map(Some);
        }
        return Ellipsoid::sphere("user", a).map(Some);
    }
    Ok(None)
}

fn build_projection(params: &ParamMap, ell: Ellipsoid) -> Result<Projection, ProjError> {
    let proj = params.string("proj").ok_or_else(|| {
        ProjError::InvalidParameter("parameter string lacks +proj".to_string())
    })?;

    let lon0 = params.angle_or("lon_0", 0.0)?;
    let lat0 = params.angle_or("lat_0", 0.0)?;
    let x0 = params.f64_or("x_0", 0.0)?;
    let y0 = params.f64_or("y_0", 0.0)?;
    let lat_ts = params.angle("lat_ts")?;
    // +k is the legacy spelling of +k_0.
    let k0 = match params.f64("k_0")? {
        Some(k) => k,
        None => params.f64_or("k", 1.0)?,
    };

    let projection = match proj {
        "longlat" | "latlong" | "latlon" | "lonlat" => Projection::Geographic(ell),
        "merc" => Projection::Mercator(Mercator::new(ell, lon0, lat_ts, k0, x0, y0)?),
        "tmerc" => Projection::TransverseMercator(TransverseMercator::new(
            ell, lon0, lat0, k0, x0, y0,
        )?),
        "utm" => {
            // A recognized projection keyword without its required parameter
            // is an unsupported projection, not a parse failure.
            let zone = params
                .f64("zone")?
                .ok_or_else(|| {
                    ProjError::UnsupportedProjection("utm requires +zone".to_string())
                })?;
            if zone.fract() != 0.0 || !(1.0..=60.0).contains(&zone) {
                return Err(ProjError::InvalidParameter(format!(
                    "UTM zone must be an integer 1-60, got {zone}"
                )));
            }
            Projection::TransverseMercator(TransverseMercator::utm_zone(
                ell,
                zone as u8,
                params.contains("south"),
            )?)
        }
        "lcc" => {
            let lat1 = params.angle_or("lat_1", 0.0)?;
            let lat2 = params.angle("lat_2")?;
            Projection::LambertConformalConic(LambertConformalConic::new(
                ell, lon0, lat0, lat1, lat2, k0, x0, y0,
            )?)
        }
        "aea" => {
            let lat1 = params.angle_or("lat_1", 0.0)?;
            let lat2 = params.angle("lat_2")?;
            Projection::AlbersEqualArea(AlbersEqualArea::new(
                ell, lon0, lat0, lat1, lat2, x0, y0,
            )?)
        }
        "stere" => Projection::Stereographic(Stereographic::new(
            ell, lon0, lat0, lat_ts, k0, x0, y0,
        )?),
        "sterea" => Projection::ObliqueStereographic(ObliqueStereographic::new(
            ell, lon0, lat0, k0, x0, y0,
        )?),
        "laea" => {
            Projection::AzimuthalEqualArea(AzimuthalEqualArea::new(ell, lon0, lat0, x0, y0)?)
        }
        "somerc" => Projection::SwissObliqueMercator(SwissObliqueMercator::new(
            ell, lon0, lat0, k0, x0, y0,
        )?),
        "eqc" => Projection::Equirectangular(Equirectangular::new(
            ell,
            lon0,
            lat0,
            lat_ts.unwrap_or(0.0),
            x0,
            y0,
        )?),
        "poly" => Projection::Polyconic(Polyconic::new(ell, lon0, lat0, x0, y0)),
        other => {
            return Err(ProjError::UnsupportedProjection(other.to_string()));
        }
    };
    Ok(projection)
}
