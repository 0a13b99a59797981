pub type Result<T, E = GraderError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum GraderError {
    #[error("failed to open sandbox: {0}")]
    Open(#[from] rusqlite::Error),

    #[error("invalid sandbox schema: {0}")]
    Schema(String),

    #[error("invalid sandbox seed data: {0}")]
    Seed(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("reference solution failed: {0}")]
    Solution(String),
}

#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("completion response had no message content")]
    MalformedResponse,

    #[error("model reply JSON did not parse: {0}")]
    Parse(#[from] serde_json::Error),
}
