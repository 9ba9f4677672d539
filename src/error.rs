use thiserror::Error;

#[derive(Error, Debug)]
pub enum HealthError {
    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("invalid repository identifier (expected owner/repo): {0}")]
    InvalidRepository(String),

    #[error("snapshot parse error: {0}")]
    SnapshotParse(String),

    #[error("refusing to overwrite existing file: {0}")]
    AlreadyExists(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HealthError>;
