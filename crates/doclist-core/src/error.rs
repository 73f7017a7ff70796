#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("directory request failed: {0}")]
    Request(reqwest::Error),
    #[error("directory request returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to read directory response body: {0}")]
    Body(reqwest::Error),
    #[error("malformed directory payload: {0}")]
    Payload(#[from] doclist_types::TypesError),
}

pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;
