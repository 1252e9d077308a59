use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The payload could not be serialized. Not expected for string or record input.
    #[error("failed to serialize payload: {0}")]
    Format(#[from] serde_json::Error),

    /// The webhook answered with a non-success status.
    #[error("post to {url} failed: {status} {status_text}")]
    Delivery {
        url: String,
        status: u16,
        status_text: String,
    },

    /// The request never completed (DNS, connection refused, TLS, ...).
    #[error("request error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("no webhook URL configured")]
    MissingWebhookUrl,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Wrap whatever a transport failed with.
    pub fn transport(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Transport(cause.into())
    }

    /// HTTP status of a failed delivery, if the remote end answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Delivery { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
