use thiserror::Error;

/// Ways a single chat turn can fail. None of them are retried; each becomes
/// the visible assistant reply for that turn.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("rate limited by the chat service")]
    RateLimited,

    #[error("{status} - {body}")]
    Status { status: u16, body: String },

    #[error("could not reach the chat service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response from the chat service: {0}")]
    MalformedResponse(String),
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::MalformedResponse(err.to_string())
    }
}
