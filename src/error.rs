//! Error taxonomy shared by the client, credential stores and config loader.

pub type SkylineResult<T> = Result<T, SkylineError>;

#[derive(thiserror::Error, Debug)]
pub enum SkylineError {
    /// No credential could be obtained from storage or the prompt.
    #[error("GitHub token is required")]
    Auth,

    /// The HTTP exchange itself failed (status or connection).
    #[error("{0}")]
    Transport(String),

    /// The GraphQL body carried an `errors` array.
    #[error("{0}")]
    Api(String),

    /// `data.user` did not resolve.
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("invalid date range: {0}")]
    InvalidRange(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("viewport error: {0}")]
    Viewport(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SkylineError {
    pub fn status(code: u16) -> Self {
        Self::Transport(format!("GitHub API response error: {}", code))
    }

    pub fn request(msg: impl std::fmt::Display) -> Self {
        Self::Transport(format!("request failed: {}", msg))
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
