//! Compiled-in authority registry mapping `AUTHORITY:CODE` names to
//! projection parameter strings.

use crate::error::ProjError;

/// EPSG codes with hand-maintained definitions.
static EPSG: &[(u32, &str)] = &[
    (2154, "+proj=lcc +lat_1=49 +lat_2=44 +lat_0=46.5 +lon_0=3 +x_0=700000 +y_0=6600000 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs"),
    (2192, "+proj=lcc +lat_1=46.8 +lat_0=46.8 +lon_0=2.337229166666667 +k_0=0.99987742 +x_0=600000 +y_0=2200000 +ellps=intl +units=m +no_defs"),
    (2227, "+proj=lcc +lat_1=38.43333333333333 +lat_2=37.06666666666667 +lat_0=36.5 +lon_0=-120.5 +x_0=2000000.0001016 +y_0=500000.0001016001 +datum=NAD83 +units=us-ft +no_defs"),
    (2736, "+proj=utm +zone=36 +south +ellps=clrk66 +units=m +no_defs"),
    (3005, "+proj=aea +lat_1=50 +lat_2=58.5 +lat_0=45 +lon_0=-126 +x_0=1000000 +y_0=0 +datum=NAD83 +units=m +no_defs"),
    (3031, "+proj=stere +lat_0=-90 +lat_ts=-71 +lon_0=0 +k=1 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs"),
    (3035, "+proj=laea +lat_0=52 +lon_0=10 +x_0=4321000 +y_0=3210000 +ellps=GRS80 +units=m +no_defs"),
    (3153, "+proj=aea +lat_1=50 +lat_2=58.5 +lat_0=45 +lon_0=-126 +x_0=1000000 +y_0=0 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs"),
    (3573, "+proj=laea +lat_0=90 +lon_0=-100 +x_0=0 +y_0=0 +ellps=WGS84 +datum=WGS84 +units=m +no_defs"),
    (3785, "+proj=merc +a=6378137 +b=6378137 +lat_ts=0.0 +lon_0=0.0 +x_0=0.0 +y_0=0 +k=1.0 +units=m +no_defs"),
    (3857, "+proj=merc +a=6378137 +b=6378137 +lat_ts=0.0 +lon_0=0.0 +x_0=0.0 +y_0=0 +k=1.0 +units=m +no_defs"),
    (4230, "+proj=longlat +ellps=intl +no_defs"),
    (4258, "+proj=longlat +ellps=GRS80 +no_defs"),
    (4267, "+proj=longlat +datum=NAD27 +no_defs"),
    (4269, "+proj=longlat +datum=NAD83 +no_defs"),
    (4326, "+proj=longlat +datum=WGS84 +no_defs"),
    (21781, "+proj=somerc +lat_0=46.95240555555556 +lon_0=7.439583333333333 +x_0=600000 +y_0=200000 +ellps=bessel +towgs84=674.374,15.056,405.346,0,0,0,0 +units=m +no_defs"),
    (23030, "+proj=utm +zone=30 +ellps=intl +towgs84=-87,-98,-121 +units=m +no_defs"),
    (23031, "+proj=utm +zone=31 +ellps=intl +towgs84=-87,-98,-121 +units=m +no_defs"),
    (25832, "+proj=utm +zone=32 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs"),
    (25833, "+proj=utm +zone=33 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs"),
    (26916, "+proj=utm +zone=16 +datum=NAD83 +units=m +no_defs"),
    (27492, "+proj=tmerc +lat_0=39.66666666666666 +lon_0=-8.131906111111112 +k=1 +x_0=180.598 +y_0=-86.99 +ellps=intl +towgs84=-223.237,110.193,36.649 +units=m +no_defs"),
    (27563, "+proj=lcc +lat_1=44.10000000000001 +lat_0=44.10000000000001 +lon_0=0 +k_0=0.999877499 +x_0=600000 +y_0=200000 +a=6378249.2 +b=6356515 +towgs84=-168,-60,320,0,0,0,0 +pm=paris +units=m +no_defs"),
    (27572, "+proj=lcc +lat_1=46.8 +lat_0=46.8 +lon_0=0 +k_0=0.99987742 +x_0=600000 +y_0=2200000 +a=6378249.2 +b=6356515 +towgs84=-168,-60,320,0,0,0,0 +pm=paris +units=m +no_defs"),
    (27700, "+proj=tmerc +lat_0=49 +lon_0=-2 +k=0.9996012717 +x_0=400000 +y_0=-100000 +ellps=airy +datum=OSGB36 +units=m +no_defs"),
    (28992, "+proj=sterea +lat_0=52.15616055555555 +lon_0=5.38763888888889 +k=0.9999079 +x_0=155000 +y_0=463000 +ellps=bessel +towgs84=565.417,50.3319,465.552,-0.398957,0.343988,-1.8774,4.0725 +units=m +no_defs"),
    (29100, "+proj=poly +lat_0=0 +lon_0=-54 +x_0=5000000 +y_0=10000000 +ellps=GRS67 +units=m +no_defs"),
    (31285, "+proj=tmerc +lat_0=0 +lon_0=13.33333333333333 +k=1 +x_0=450000 +y_0=0 +ellps=bessel +units=m +no_defs"),
    (31466, "+proj=tmerc +lat_0=0 +lon_0=6 +k=1 +x_0=2500000 +y_0=0 +datum=potsdam +units=m +no_defs"),
];

/// ESRI codes used by the state plane and Alaska zone tests.
static ESRI: &[(u32, &str)] = &[
    (26732, "+proj=tmerc +lat_0=54 +lon_0=-142 +k=0.999900 +x_0=152400.3048006096 +y_0=0 +datum=NAD27 +units=us-ft +no_defs"),
    (102632, "+proj=tmerc +lat_0=54 +lon_0=-142 +k=0.999900 +x_0=500000.0000000002 +y_0=0 +datum=NAD83 +units=us-ft +no_defs"),
    (102633, "+proj=tmerc +lat_0=54 +lon_0=-146 +k=0.999900 +x_0=500000.0000000002 +y_0=0 +datum=NAD83 +units=us-ft +no_defs"),
    (102634, "+proj=tmerc +lat_0=54 +lon_0=-150 +k=0.999900 +x_0=500000.0000000002 +y_0=0 +datum=NAD83 +units=us-ft +no_defs"),
    (102635, "+proj=tmerc +lat_0=54 +lon_0=-154 +k=0.999900 +x_0=500000.0000000002 +y_0=0 +datum=NAD83 +units=us-ft +no_defs"),
];

fn epsg_lookup(code: u32) -> Option<String> {
    if let Some(&(_, def)) = EPSG.iter().find(|&&(c, _)| c == code) {
        return Some(def.to_string());
    }
    // WGS 84 UTM bands, northern then southern hemisphere.
    if (32601..=32660).contains(&code) {
        return Some(format!(
            "+proj=utm +zone={} +datum=WGS84 +units=m +no_defs",
            code - 32600
        ));
    }
    if (32701..=32760).contains(&code) {
        return Some(format!(
            "+proj=utm +zone={} +south +datum=WGS84 +units=m +no_defs",
            code - 32700
        ));
    }
    None
}

fn esri_lookup(code: u32) -> Option<String> {
    ESRI.iter()
        .find(|&&(c, _)| c == code)
        .map(|&(_, def)| def.to_string())
}

/// Resolves an `AUTHORITY:CODE` name (authority is case-insensitive, a bare
/// code implies EPSG) to its parameter string.
pub fn lookup(name: &str) -> Result<String, ProjError> {
    let name = name.trim();
    let (authority, code) = match name.split_once(':') {
        Some((auth, code)) => (auth.trim(), code.trim()),
        None => ("EPSG", name),
    };
    let code: u32 = code
        .parse()
        .map_err(|_| ProjError::UnknownCrs(name.to_string()))?;
    let def = match authority.to_ascii_uppercase().as_str() {
        "EPSG" => epsg_lookup(code),
        "ESRI" => esri_lookup(code),
        _ => None,
    };
    log::debug!("registry lookup {name}: {}", if def.is_some() { "found" } else { "missing" });
    def.ok_or_else(|| ProjError::UnknownCrs(name.to_string()))
}
