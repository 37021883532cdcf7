// Pawz Bot Panel — Telegram Bot Operations
//
// Each operation checks its required fields, builds the parameter mapping
// for one fixed endpoint, and delegates to `call` or `call_with_upload`.
// Credential and chat selection are plain arguments; nothing is remembered
// between calls.

use crate::atoms::constants::*;
use crate::atoms::error::{BotError, BotResult};
use crate::atoms::traits::BotTransport;
use crate::atoms::types::{BotUser, ChatTarget, FileUpload, Params, Update};
use log::info;
use serde_json::{json, Value};

// ── Request types ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Markdown,
    MarkdownV2,
    Html,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Markdown => "Markdown",
            ParseMode::MarkdownV2 => "MarkdownV2",
            ParseMode::Html => "HTML",
        }
    }

    pub fn parse(raw: &str) -> BotResult<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(ParseMode::Markdown),
            "markdownv2" | "mdv2" => Ok(ParseMode::MarkdownV2),
            "html" => Ok(ParseMode::Html),
            other => Err(BotError::validation(format!(
                "unknown parse mode '{}' (valid: Markdown, MarkdownV2, HTML)",
                other
            ))),
        }
    }
}

/// A text message to send.
#[derive(Debug, Clone)]
pub struct OutgoingMessage {
    pub chat: ChatTarget,
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    /// Deliver without a notification sound.
    pub silent: bool,
    pub reply_to: Option<i64>,
}

impl OutgoingMessage {
    pub fn new(chat: ChatTarget, text: impl Into<String>) -> Self {
        OutgoingMessage {
            chat,
            text: text.into(),
            parse_mode: None,
            silent: false,
            reply_to: None,
        }
    }
}

/// Where a photo comes from: uploaded bytes, or an HTTP URL / file_id the
/// platform fetches itself.
#[derive(Debug, Clone)]
pub enum PhotoSource {
    Upload(FileUpload),
    Remote(String),
}

// ── Field checks ───────────────────────────────────────────────────────────

/// Required text: non-blank and within `max` characters.
fn require_text<'a>(field: &'static str, value: &'a str, max: usize) -> BotResult<&'a str> {
    if value.trim().is_empty() {
        return Err(BotError::MissingField(field));
    }
    let len = value.chars().count();
    if len > max {
        return Err(BotError::validation(format!(
            "{} is {} characters, limit is {}",
            field, len, max
        )));
    }
    Ok(value)
}

/// Optional text: blank counts as absent.
fn optional_text<'a>(field: &'static str, value: Option<&'a str>, max: usize) -> BotResult<Option<&'a str>> {
    match value {
        Some(v) if !v.trim().is_empty() => require_text(field, v, max).map(Some),
        _ => Ok(None),
    }
}

fn require_file(field: &'static str, file: &FileUpload) -> BotResult<()> {
    if file.bytes.is_empty() {
        return Err(BotError::MissingField(field));
    }
    Ok(())
}

// ── Identity & discovery ───────────────────────────────────────────────────

/// `getMe`: who the token belongs to.
pub async fn get_me(api: &dyn BotTransport, token: &str) -> BotResult<BotUser> {
    let result = api.call(token, GET_ME, Params::new()).await?;
    Ok(serde_json::from_value(result)?)
}

/// `getUpdates`: one page of pending updates. `limit` is clamped to the
/// platform range.
pub async fn get_updates(
    api: &dyn BotTransport,
    token: &str,
    limit: u32,
    offset: Option<i64>,
) -> BotResult<Vec<Update>> {
    let params = Params::new()
        .set_opt("offset", offset)
        .set("limit", limit.clamp(1, DISCOVERY_LIMIT_MAX));
    let result = api.call(token, GET_UPDATES, params).await?;
    Ok(serde_json::from_value(result)?)
}

/// `getChat`: full chat object.
pub async fn get_chat(api: &dyn BotTransport, token: &str, chat: &ChatTarget) -> BotResult<Value> {
    api.call(token, GET_CHAT, Params::new().set("chat_id", chat)).await
}

// ── Messaging ──────────────────────────────────────────────────────────────

/// `sendMessage`. Returns the sent message object.
pub async fn send_message(api: &dyn BotTransport, token: &str, msg: &OutgoingMessage) -> BotResult<Value> {
    let text = require_text("text", &msg.text, MAX_MESSAGE_CHARS)?;
    let params = Params::new()
        .set("chat_id", &msg.chat)
        .set("text", text)
        .set_opt("parse_mode", msg.parse_mode.map(|m| m.as_str()))
        .set_opt("disable_notification", msg.silent.then_some(true))
        .set_opt("reply_to_message_id", msg.reply_to);

    let sent = api.call(token, SEND_MESSAGE, params).await?;
    info!("[telegram] Message sent to {} ({} chars)", msg.chat, text.chars().count());
    Ok(sent)
}

/// `sendPhoto`. Uploads go multipart; URLs and file ids go as a query param.
pub async fn send_photo(
    api: &dyn BotTransport,
    token: &str,
    chat: &ChatTarget,
    photo: PhotoSource,
    caption: Option<&str>,
) -> BotResult<Value> {
    let caption = optional_text("caption", caption, MAX_CAPTION_CHARS)?;
    let params = Params::new().set("chat_id", chat).set_opt("caption", caption);

    let sent = match photo {
        PhotoSource::Upload(file) => {
            require_file("photo", &file)?;
            api.call_with_upload(token, SEND_PHOTO, params.set("photo", file)).await?
        }
        PhotoSource::Remote(reference) => {
            let reference = require_text("photo", &reference, usize::MAX)?;
            api.call(token, SEND_PHOTO, params.set("photo", reference)).await?
        }
    };
    info!("[telegram] Photo sent to {}", chat);
    Ok(sent)
}

// ── Group metadata ─────────────────────────────────────────────────────────

pub async fn set_chat_title(api: &dyn BotTransport, token: &str, chat: &ChatTarget, title: &str) -> BotResult<Value> {
    let title = require_text("title", title, MAX_CHAT_TITLE_CHARS)?;
    let params = Params::new().set("chat_id", chat).set("title", title);
    let result = api.call(token, SET_CHAT_TITLE, params).await?;
    info!("[telegram] Title of {} changed", chat);
    Ok(result)
}

/// An empty description clears it, so no presence check here.
pub async fn set_chat_description(
    api: &dyn BotTransport,
    token: &str,
    chat: &ChatTarget,
    description: &str,
) -> BotResult<Value> {
    let len = description.chars().count();
    if len > MAX_CHAT_DESCRIPTION_CHARS {
        return Err(BotError::validation(format!(
            "description is {} characters, limit is {}",
            len, MAX_CHAT_DESCRIPTION_CHARS
        )));
    }
    let params = Params::new().set("chat_id", chat).set("description", description);
    let result = api.call(token, SET_CHAT_DESCRIPTION, params).await?;
    info!("[telegram] Description of {} changed", chat);
    Ok(result)
}

pub async fn set_chat_photo(api: &dyn BotTransport, token: &str, chat: &ChatTarget, photo: FileUpload) -> BotResult<Value> {
    require_file("photo", &photo)?;
    let params = Params::new().set("chat_id", chat).set("photo", photo);
    let result = api.call_with_upload(token, SET_CHAT_PHOTO, params).await?;
    info!("[telegram] Photo of {} changed", chat);
    Ok(result)
}

/// `exportChatInviteLink`: revokes the previous primary link and returns
/// the new one.
pub async fn export_chat_invite_link(api: &dyn BotTransport, token: &str, chat: &ChatTarget) -> BotResult<String> {
    let result = api
        .call(token, EXPORT_CHAT_INVITE_LINK, Params::new().set("chat_id", chat))
        .await?;
    match result {
        Value::String(link) => Ok(link),
        other => Err(BotError::validation(format!(
            "exportChatInviteLink returned a non-string result: {}",
            other
        ))),
    }
}

// ── Bot profile ────────────────────────────────────────────────────────────

pub async fn set_my_name(api: &dyn BotTransport, token: &str, name: &str) -> BotResult<Value> {
    let name = require_text("name", name, MAX_BOT_NAME_CHARS)?;
    let result = api.call(token, SET_MY_NAME, Params::new().set("name", name)).await?;
    info!("[telegram] Bot name changed");
    Ok(result)
}

pub async fn set_my_description(api: &dyn BotTransport, token: &str, description: &str) -> BotResult<Value> {
    let len = description.chars().count();
    if len > MAX_BOT_DESCRIPTION_CHARS {
        return Err(BotError::validation(format!(
            "description is {} characters, limit is {}",
            len, MAX_BOT_DESCRIPTION_CHARS
        )));
    }
    let result = api
        .call(token, SET_MY_DESCRIPTION, Params::new().set("description", description))
        .await?;
    info!("[telegram] Bot description changed");
    Ok(result)
}

/// The profile-photo method takes an `InputProfilePhoto` object whose
/// `photo` field points at a separately named multipart part.
pub async fn set_my_profile_photo(api: &dyn BotTransport, token: &str, photo: FileUpload) -> BotResult<Value> {
    require_file("photo", &photo)?;
    let descriptor = json!({
        "type": "static",
        "photo": format!("attach://{}", PROFILE_PHOTO_PART),
    });
    let params = Params::new()
        .set("photo", descriptor)
        .set(PROFILE_PHOTO_PART, photo);
    let result = api.call_with_upload(token, SET_MY_PROFILE_PHOTO, params).await?;
    info!("[telegram] Bot profile photo changed");
    Ok(result)
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::types::ParamValue;
    use crate::engine::testing::{CallKind, RecordingTransport};

    const TOKEN: &str = "123:ABC";

    #[tokio::test]
    async fn get_me_decodes_bot_user() {
        let api = RecordingTransport::new(vec![Ok(json!({
            "id": 99, "is_bot": true, "first_name": "Paw", "username": "paw_bot",
            "can_join_groups": true
        }))]);
        let me = get_me(&api, TOKEN).await.unwrap();
        assert_eq!(me.username.as_deref(), Some("paw_bot"));
        assert_eq!(me.can_join_groups, Some(true));
        let call = &api.calls()[0];
        assert_eq!(call.endpoint, GET_ME);
        assert_eq!(call.token, TOKEN);
        assert!(call.params.is_empty());
    }

    #[tokio::test]
    async fn send_message_builds_params_and_omits_unset_fields() {
        let api = RecordingTransport::new(vec![Ok(json!({"message_id": 5}))]);
        let mut msg = OutgoingMessage::new(ChatTarget::Id(-100), "hello");
        msg.parse_mode = Some(ParseMode::Html);

        send_message(&api, TOKEN, &msg).await.unwrap();

        let call = &api.calls()[0];
        assert_eq!(call.kind, CallKind::Query);
        assert_eq!(call.endpoint, SEND_MESSAGE);
        assert_eq!(call.params.get("chat_id"), Some(&ParamValue::Integer(-100)));
        assert_eq!(call.params.get("parse_mode"), Some(&ParamValue::Text("HTML".into())));
        assert!(call.params.get("disable_notification").is_none());
        assert!(call.params.get("reply_to_message_id").is_none());
    }

    #[tokio::test]
    async fn blank_text_fails_before_delegating() {
        let api = RecordingTransport::new(vec![]);
        let msg = OutgoingMessage::new(ChatTarget::Id(1), "   ");
        let err = send_message(&api, TOKEN, &msg).await.unwrap_err();
        assert!(matches!(err, BotError::MissingField("text")));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn overlong_title_is_rejected() {
        let api = RecordingTransport::new(vec![]);
        let title = "t".repeat(MAX_CHAT_TITLE_CHARS + 1);
        let err = set_chat_title(&api, TOKEN, &ChatTarget::Id(1), &title).await.unwrap_err();
        assert!(matches!(err, BotError::Validation(_)));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn send_photo_routes_by_source() {
        let api = RecordingTransport::new(vec![Ok(json!({})), Ok(json!({}))]);
        let chat = ChatTarget::Username("@news".into());

        let upload = FileUpload::new("cat.jpg", vec![1, 2, 3]).with_mime("image/jpeg");
        send_photo(&api, TOKEN, &chat, PhotoSource::Upload(upload), Some("  ")).await.unwrap();
        send_photo(&api, TOKEN, &chat, PhotoSource::Remote("https://x.test/cat.jpg".into()), Some("cat"))
            .await
            .unwrap();

        let calls = api.calls();
        assert_eq!(calls[0].kind, CallKind::Upload);
        assert!(calls[0].params.get("caption").is_none());
        assert!(calls[0].params.has_file());
        assert_eq!(calls[1].kind, CallKind::Query);
        assert_eq!(calls[1].params.get("chat_id"), Some(&ParamValue::Text("@news".into())));
        assert_eq!(calls[1].params.get("caption"), Some(&ParamValue::Text("cat".into())));
    }

    #[tokio::test]
    async fn empty_upload_is_missing_field() {
        let api = RecordingTransport::new(vec![]);
        let err = set_my_profile_photo(&api, TOKEN, FileUpload::new("me.png", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, BotError::MissingField("photo")));
    }

    #[tokio::test]
    async fn profile_photo_is_attached_by_reference() {
        let api = RecordingTransport::new(vec![Ok(json!(true))]);
        set_my_profile_photo(&api, TOKEN, FileUpload::new("me.png", vec![7, 7]))
            .await
            .unwrap();

        let call = &api.calls()[0];
        assert_eq!((call.kind, call.endpoint.as_str()), (CallKind::Upload, SET_MY_PROFILE_PHOTO));
        assert_eq!(
            call.params.get("photo"),
            Some(&ParamValue::Json(json!({"type": "static", "photo": "attach://profile_photo"})))
        );
        match call.params.get(PROFILE_PHOTO_PART) {
            Some(ParamValue::File(file)) => assert_eq!(file.file_name, "me.png"),
            other => panic!("expected file part, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn chat_photo_and_description_delegate() {
        let api = RecordingTransport::new(vec![Ok(json!(true)), Ok(json!(true))]);
        let chat = ChatTarget::Id(-42);
        set_chat_photo(&api, TOKEN, &chat, FileUpload::new("g.png", vec![9])).await.unwrap();
        set_chat_description(&api, TOKEN, &chat, "").await.unwrap();

        let calls = api.calls();
        assert_eq!((calls[0].kind, calls[0].endpoint.as_str()), (CallKind::Upload, SET_CHAT_PHOTO));
        assert_eq!(calls[1].endpoint, SET_CHAT_DESCRIPTION);
        assert_eq!(calls[1].params.get("description"), Some(&ParamValue::Text(String::new())));
    }

    #[tokio::test]
    async fn invite_link_must_be_a_string() {
        let api = RecordingTransport::new(vec![
            Ok(json!("https://t.me/+abc")),
            Ok(json!({"unexpected": true})),
        ]);
        let chat = ChatTarget::Id(-1);
        assert_eq!(export_chat_invite_link(&api, TOKEN, &chat).await.unwrap(), "https://t.me/+abc");
        assert!(export_chat_invite_link(&api, TOKEN, &chat).await.is_err());
    }

    #[tokio::test]
    async fn remote_rejection_propagates_unchanged() {
        let api = RecordingTransport::new(vec![Err(BotError::RemoteRejected {
            description: "Bad Request: not enough rights".into(),
            error_code: Some(400),
        })]);
        let err = set_my_name(&api, TOKEN, "Paw").await.unwrap_err();
        assert!(matches!(err, BotError::RemoteRejected { error_code: Some(400), .. }));
    }

    #[tokio::test]
    async fn get_updates_clamps_limit() {
        let api = RecordingTransport::new(vec![Ok(json!([]))]);
        let updates = get_updates(&api, TOKEN, 500, Some(10)).await.unwrap();
        assert!(updates.is_empty());
        let call = &api.calls()[0];
        assert_eq!(call.params.get("limit"), Some(&ParamValue::Integer(100)));
        assert_eq!(call.params.get("offset"), Some(&ParamValue::Integer(10)));
    }

    #[test]
    fn parse_mode_names() {
        assert_eq!(ParseMode::parse("html").unwrap(), ParseMode::Html);
        assert_eq!(ParseMode::parse("MarkdownV2").unwrap().as_str(), "MarkdownV2");
        assert!(ParseMode::parse("rtf").is_err());
    }
}
