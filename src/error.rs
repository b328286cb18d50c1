use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjError {
    #[error("Unknown CRS: {0}")]
    UnknownCrs(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported projection: {0}")]
    UnsupportedProjection(String),

    #[error("Datum not convertible: {0}")]
    DatumNotConvertible(String),

    #[error("Coordinate outside projection domain: {0}")]
    OutsideDomain(String),

    #[error("Iteration failed to converge: {0}")]
    NoConvergence(String),
}
