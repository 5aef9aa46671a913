use thiserror::Error;

#[derive(Error, Debug)]
pub enum LltError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Degenerate roll stiffness: total {total} lb-ft/rad must be positive")]
    DegenerateStiffness { total: f64 },

    #[error("Invalid weight: {0}")]
    InvalidWeight(String),

    #[error("Non-finite result: {0}")]
    NonFinite(String),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LltResult<T> = Result<T, LltError>;
