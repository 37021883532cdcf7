// ── Bot Panel Atoms: Error Types ───────────────────────────────────────────
// Single canonical error enum for the panel, built with `thiserror`.
//
// Design rules:
//   • Variants follow the failure taxonomy of a Bot API call: credential,
//     transport, remote rejection, then caller input and configuration.
//   • Transport failures are grouped under one variant so callers can match
//     "the request never produced an envelope" in one arm.
//   • No variant carries the bot token. reqwest errors are stripped of their
//     URL before they are wrapped, because the token lives in the path.

use thiserror::Error;

// ── Transport failures ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Connection, TLS, or body-read failure (reqwest layer).
    #[error("network failure: {0}")]
    Network(reqwest::Error),

    /// The response body was not a valid envelope.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError::Network(e.without_url())
    }
}

// ── Primary error enum ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum BotError {
    /// Bot token missing, empty, or not usable as a path segment.
    #[error("Invalid credential: bot token is missing or malformed")]
    InvalidCredential,

    /// The request did not yield an envelope.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The envelope came back with `ok: false`.
    #[error("Remote rejected: {description}")]
    RemoteRejected {
        description: String,
        error_code: Option<i64>,
    },

    /// A required input field was empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Caller input present but unusable.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Panel configuration is invalid or unreadable.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ── Convenience constructors ───────────────────────────────────────────────

impl BotError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// HTTP status carried by a transport failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            BotError::Transport(TransportError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// True for failures raised before any request was attempted.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            BotError::InvalidCredential | BotError::MissingField(_) | BotError::Validation(_)
        )
    }
}

impl From<reqwest::Error> for BotError {
    fn from(e: reqwest::Error) -> Self {
        BotError::Transport(TransportError::from(e))
    }
}

impl From<serde_json::Error> for BotError {
    fn from(e: serde_json::Error) -> Self {
        BotError::Transport(TransportError::Decode(e))
    }
}

// ── Convenience alias ──────────────────────────────────────────────────────

/// All panel operations return this type.
pub type BotResult<T> = Result<T, BotError>;
