use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid transform: {0}")]
    InvalidTransform(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
