use thiserror::Error;

/// Top-level error type for the curlkit kernel.
#[derive(Debug, Error)]
pub enum CurlError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
}

/// Errors raised when validating a configuration snapshot.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{parameter} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("fractional rect {name} is inverted or outside [0, 1]")]
    InvalidFracRect { name: &'static str },
}

/// Convenience type alias for results using [`CurlError`].
pub type Result<T> = std::result::Result<T, CurlError>;
