// Command dispatch: one subcommand → one core operation.

use crate::render;
use crate::{Cli, Command};
use botpanel_core::engine::telegram;
use botpanel_core::{
    click_to_chat_link, discover, BotError, BotResult, BotTransport, FileUpload, HttpBotClient, OutgoingMessage,
    PanelConfig, ParamValue, Params, ParseMode, PhotoSource,
};
use log::{debug, warn};
use std::path::Path;

pub async fn run(cli: Cli) -> BotResult<String> {
    let config = PanelConfig::load_or_default(cli.config.as_deref())?;
    let api = HttpBotClient::new(config.api_base.clone());
    // An absent token reaches the client as "" and fails there, before any request.
    let token = cli.token.as_deref().unwrap_or("");

    match cli.command {
        Command::Me => render::json(&telegram::get_me(&api, token).await?),

        Command::Discover { limit, groups_only } => {
            let mut found = discover(&api, token, limit.unwrap_or(config.discovery_limit)).await?;
            if groups_only {
                found.chats = found.groups().cloned().collect();
            }
            if found.is_empty() {
                warn!("[discovery] No chats or contacts in recent updates; message the bot first");
            }
            render::json(&found)
        }

        Command::Chat { chat } => render::json(&telegram::get_chat(&api, token, &chat).await?),

        Command::Send { chat, text, parse_mode, silent, reply_to } => {
            let mut msg = OutgoingMessage::new(chat, text);
            msg.parse_mode = parse_mode.as_deref().map(ParseMode::parse).transpose()?;
            msg.silent = silent;
            msg.reply_to = reply_to;
            render::json(&telegram::send_message(&api, token, &msg).await?)
        }

        Command::Photo { chat, file, url, caption } => {
            let source = match (file, url) {
                (Some(path), _) => PhotoSource::Upload(read_upload(&path).await?),
                (None, Some(url)) => PhotoSource::Remote(url),
                (None, None) => return Err(BotError::MissingField("photo")),
            };
            render::json(&telegram::send_photo(&api, token, &chat, source, caption.as_deref()).await?)
        }

        Command::Title { chat, title } => render::json(&telegram::set_chat_title(&api, token, &chat, &title).await?),

        Command::Description { chat, text } => {
            render::json(&telegram::set_chat_description(&api, token, &chat, &text).await?)
        }

        Command::ChatPhoto { chat, file } => {
            let photo = read_upload(&file).await?;
            render::json(&telegram::set_chat_photo(&api, token, &chat, photo).await?)
        }

        Command::InviteLink { chat } => telegram::export_chat_invite_link(&api, token, &chat).await,

        Command::SetName { name } => render::json(&telegram::set_my_name(&api, token, &name).await?),

        Command::SetDescription { text } => render::json(&telegram::set_my_description(&api, token, &text).await?),

        Command::SetPhoto { file } => {
            let photo = read_upload(&file).await?;
            render::json(&telegram::set_my_profile_photo(&api, token, photo).await?)
        }

        Command::Raw { endpoint, params, files } => {
            let mut request = Params::new();
            for (key, value) in params {
                request.insert(&key, ParamValue::Text(value));
            }
            let has_files = !files.is_empty();
            for (key, path) in files {
                request.insert(&key, ParamValue::File(read_upload(&path).await?));
            }
            let result = if has_files {
                api.call_with_upload(token, &endpoint, request).await?
            } else {
                api.call(token, &endpoint, request).await?
            };
            render::json(&result)
        }

        Command::WaLink { number, message } => {
            let number = number
                .or(config.whatsapp.number)
                .ok_or(BotError::MissingField("number"))?;
            click_to_chat_link(&number, message.or(config.whatsapp.message).as_deref())
        }
    }
}

/// Read a local file into an upload part, guessing the MIME type from the
/// extension.
async fn read_upload(path: &Path) -> BotResult<FileUpload> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    debug!("[cli] Read {} ({} bytes)", path.display(), bytes.len());
    let upload = FileUpload::new(file_name, bytes);
    Ok(match mime_for(path) {
        Some(mime) => upload.with_mime(mime),
        None => upload,
    })
}

fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "mp4" => Some("video/mp4"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}
