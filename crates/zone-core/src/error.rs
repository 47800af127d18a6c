use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZoneError {
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
    #[error("invalid radius {0} m")]
    InvalidRadius(f64),
    #[error("invalid style: {0}")]
    InvalidStyle(String),
}

pub type ZoneResult<T> = Result<T, ZoneError>;
