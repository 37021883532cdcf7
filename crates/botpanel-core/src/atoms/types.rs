// ── Bot Panel Atoms: Data Types ─────────────────────────────────────────────
// Plain request/response types shared by the client, the typed operations,
// and the CLI. No I/O here.

use crate::atoms::error::{BotError, BotResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ── Credential ─────────────────────────────────────────────────────────────

/// A bot token. Validated on construction and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Accept a token if it is non-empty and made only of characters that
    /// stay literal in a URL path segment: ASCII alphanumerics and `:_-`.
    pub fn parse(raw: &str) -> BotResult<Self> {
        let token = raw.trim();
        if token.is_empty() || !token.chars().all(is_token_char) {
            return Err(BotError::InvalidCredential);
        }
        Ok(Credential(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ':' | '_' | '-')
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

// ── Request parameters ─────────────────────────────────────────────────────

/// File content destined for a multipart part.
#[derive(Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        FileUpload { file_name: file_name.into(), mime: None, bytes }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Sent as its JSON serialization (arrays, reply markup, ...).
    Json(Value),
    File(FileUpload),
}

impl ParamValue {
    /// Wire text of a scalar value. Files have no text form.
    pub fn to_wire_text(&self) -> Option<String> {
        match self {
            ParamValue::Text(s) => Some(s.clone()),
            ParamValue::Integer(n) => Some(n.to_string()),
            ParamValue::Float(x) => Some(x.to_string()),
            ParamValue::Bool(b) => Some(b.to_string()),
            ParamValue::Json(v) => Some(v.to_string()),
            ParamValue::File(_) => None,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, ParamValue::File(_))
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Integer(n)
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        ParamValue::Integer(n.into())
    }
}

impl From<f64> for ParamValue {
    fn from(x: f64) -> Self {
        ParamValue::Float(x)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<Value> for ParamValue {
    fn from(v: Value) -> Self {
        ParamValue::Json(v)
    }
}

impl From<FileUpload> for ParamValue {
    fn from(f: FileUpload) -> Self {
        ParamValue::File(f)
    }
}

/// Ordered name → value mapping. Absent values are never stored, and a
/// repeated name replaces the earlier value in its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value.into());
        self
    }

    /// Like `set`, but `None` leaves the mapping untouched.
    pub fn set_opt<V: Into<ParamValue>>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(name, v),
            None => self,
        }
    }

    pub fn insert(&mut self, name: &str, value: ParamValue) {
        match self.entries.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn has_file(&self) -> bool {
        self.entries.iter().any(|(_, v)| v.is_file())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<(String, ParamValue)> {
        self.entries
    }
}

// ── Response envelope ──────────────────────────────────────────────────────

/// Wire shape of every Bot API response body.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
}

/// Normalized outcome of one call that reached the remote service.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Ok(Value),
    Err {
        description: String,
        error_code: Option<i64>,
    },
}

impl From<ApiResponse> for Envelope {
    fn from(resp: ApiResponse) -> Self {
        if resp.ok {
            Envelope::Ok(resp.result.unwrap_or(Value::Null))
        } else {
            Envelope::Err {
                description: resp.description.unwrap_or_else(|| "unknown error".into()),
                error_code: resp.error_code,
            }
        }
    }
}

impl Envelope {
    pub fn into_result(self) -> BotResult<Value> {
        match self {
            Envelope::Ok(payload) => Ok(payload),
            Envelope::Err { description, error_code } => {
                Err(BotError::RemoteRejected { description, error_code })
            }
        }
    }
}

// ── Chat targets ───────────────────────────────────────────────────────────

/// Where a chat-scoped call is aimed: a numeric id or `@channelusername`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTarget {
    Id(i64),
    Username(String),
}

impl ChatTarget {
    pub fn parse(raw: &str) -> BotResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(BotError::MissingField("chat_id"));
        }
        if let Ok(id) = raw.parse::<i64>() {
            return Ok(ChatTarget::Id(id));
        }
        match raw.strip_prefix('@') {
            Some(name) if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') => {
                Ok(ChatTarget::Username(raw.to_string()))
            }
            _ => Err(BotError::validation(format!(
                "chat target '{}' is neither a numeric id nor an @username",
                raw
            ))),
        }
    }
}

impl From<i64> for ChatTarget {
    fn from(id: i64) -> Self {
        ChatTarget::Id(id)
    }
}

impl From<&ChatTarget> for ParamValue {
    fn from(target: &ChatTarget) -> Self {
        match target {
            ChatTarget::Id(id) => ParamValue::Integer(*id),
            ChatTarget::Username(name) => ParamValue::Text(name.clone()),
        }
    }
}

impl fmt::Display for ChatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatTarget::Id(id) => write!(f, "{}", id),
            ChatTarget::Username(name) => f.write_str(name),
        }
    }
}

// ── Bot API objects ────────────────────────────────────────────────────────

/// `getMe` result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BotUser {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    pub username: Option<String>,
    pub can_join_groups: Option<bool>,
    pub can_read_all_group_messages: Option<bool>,
    pub supports_inline_queries: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl User {
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ChatKind,
    pub title: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Chat {
    pub fn display_name(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => return format!("{} {}", first, last),
            (Some(first), None) => return first.clone(),
            _ => {}
        }
        match &self.username {
            Some(u) => format!("@{}", u),
            None => self.id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub date: i64,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatMemberUpdated {
    pub chat: Chat,
    pub from: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatJoinRequest {
    pub chat: Chat,
    pub from: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
}

/// One `getUpdates` entry. Only the variants that carry a chat or a sender
/// are modelled; everything else deserializes with all fields `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub edited_message: Option<Message>,
    pub channel_post: Option<Message>,
    pub edited_channel_post: Option<Message>,
    pub my_chat_member: Option<ChatMemberUpdated>,
    pub chat_member: Option<ChatMemberUpdated>,
    pub chat_join_request: Option<ChatJoinRequest>,
    pub callback_query: Option<CallbackQuery>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn credential_rejects_empty_and_path_breaking_tokens() {
        assert!(matches!(Credential::parse(""), Err(BotError::InvalidCredential)));
        assert!(matches!(Credential::parse("   "), Err(BotError::InvalidCredential)));
        assert!(matches!(Credential::parse("12/34"), Err(BotError::InvalidCredential)));
        assert!(matches!(Credential::parse("12 34"), Err(BotError::InvalidCredential)));
        for token in ["123:ABC?x", "123:ABC#x", "123:AB%2FC", "123:ABC.", "123:äbc"] {
            assert!(
                matches!(Credential::parse(token), Err(BotError::InvalidCredential)),
                "{} should be rejected",
                token
            );
        }
        let ok = Credential::parse(" 123:ABC-def ").unwrap();
        assert_eq!(ok.as_str(), "123:ABC-def");
        assert_eq!(format!("{:?}", ok), "Credential(***)");
    }

    #[test]
    fn params_skip_absent_and_replace_in_place() {
        let params = Params::new()
            .set("chat_id", 42i64)
            .set_opt::<String>("parse_mode", None)
            .set("text", "first")
            .set("chat_id", 7i64);
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["chat_id", "text"]);
        assert_eq!(params.get("chat_id"), Some(&ParamValue::Integer(7)));
        assert!(params.get("parse_mode").is_none());
        assert!(!params.has_file());
    }

    #[test]
    fn wire_text_of_scalars() {
        assert_eq!(ParamValue::from(true).to_wire_text().as_deref(), Some("true"));
        assert_eq!(ParamValue::from(-5i64).to_wire_text().as_deref(), Some("-5"));
        assert_eq!(
            ParamValue::from(json!(["message"])).to_wire_text().as_deref(),
            Some("[\"message\"]")
        );
        let file = ParamValue::from(FileUpload::new("a.png", vec![1, 2, 3]));
        assert!(file.to_wire_text().is_none());
        assert!(file.is_file());
    }

    #[test]
    fn envelope_from_wire_shape() {
        let ok: ApiResponse = serde_json::from_value(json!({"ok": true, "result": {"id": 1}})).unwrap();
        assert_eq!(Envelope::from(ok), Envelope::Ok(json!({"id": 1})));

        let bare: ApiResponse = serde_json::from_value(json!({"ok": true})).unwrap();
        assert_eq!(Envelope::from(bare).into_result().unwrap(), Value::Null);

        let err: ApiResponse =
            serde_json::from_value(json!({"ok": false, "error_code": 400, "description": "Bad Request"})).unwrap();
        match Envelope::from(err).into_result() {
            Err(BotError::RemoteRejected { description, error_code }) => {
                assert_eq!(description, "Bad Request");
                assert_eq!(error_code, Some(400));
            }
            other => panic!("expected RemoteRejected, got {:?}", other),
        }
    }

    #[test]
    fn chat_target_parsing() {
        assert_eq!(ChatTarget::parse("-1001234").unwrap(), ChatTarget::Id(-1001234));
        assert_eq!(
            ChatTarget::parse("@my_channel").unwrap(),
            ChatTarget::Username("@my_channel".into())
        );
        assert!(matches!(ChatTarget::parse(" "), Err(BotError::MissingField("chat_id"))));
        assert!(matches!(ChatTarget::parse("general"), Err(BotError::Validation(_))));
        assert!(matches!(ChatTarget::parse("@"), Err(BotError::Validation(_))));
    }

    #[test]
    fn update_tolerates_unknown_fields_and_chat_types() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 10,
            "poll": {"id": "x"},
            "message": {
                "message_id": 3,
                "date": 0,
                "chat": {"id": 5, "type": "business"},
                "from": {"id": 9, "is_bot": false, "first_name": "Ana", "last_name": "Lee"}
            }
        }))
        .unwrap();
        let msg = update.message.unwrap();
        assert_eq!(msg.chat.kind, ChatKind::Unknown);
        assert_eq!(msg.from.unwrap().display_name(), "Ana Lee");
        assert!(update.channel_post.is_none());
    }

    #[test]
    fn chat_display_name_fallbacks() {
        let mut chat = Chat {
            id: 77,
            kind: ChatKind::Private,
            title: None,
            username: Some("ana".into()),
            first_name: None,
            last_name: None,
        };
        assert_eq!(chat.display_name(), "@ana");
        chat.first_name = Some("Ana".into());
        assert_eq!(chat.display_name(), "Ana");
        chat.title = Some("Team".into());
        assert_eq!(chat.display_name(), "Team");
    }
}
