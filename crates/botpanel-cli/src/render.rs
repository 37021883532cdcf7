// Output rendering and error → exit-code mapping.

use botpanel_core::{BotError, BotResult, TransportError};
use serde::Serialize;

/// Pretty JSON for any serializable payload.
pub fn json<T: Serialize + ?Sized>(value: &T) -> BotResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| BotError::validation(format!("cannot render output: {e}")))
}

/// Short label printed before the error message.
pub fn error_kind(e: &BotError) -> &'static str {
    match e {
        BotError::InvalidCredential => "invalid credential",
        BotError::Transport(TransportError::Status { .. }) => "http error",
        BotError::Transport(_) => "transport error",
        BotError::RemoteRejected { .. } => "rejected by bot api",
        BotError::MissingField(_) | BotError::Validation(_) => "invalid input",
        BotError::Config(_) | BotError::Io(_) => "local error",
    }
}

/// 2 = caller input, 3 = remote rejection, 4 = transport, 5 = local.
pub fn exit_code(e: &BotError) -> u8 {
    if e.is_input_error() {
        return 2;
    }
    match e {
        BotError::RemoteRejected { .. } => 3,
        BotError::Transport(_) => 4,
        _ => 5,
    }
}
