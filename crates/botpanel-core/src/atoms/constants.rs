// ── Bot Panel Atoms: Constants ─────────────────────────────────────────────
// All named constants for the crate live here: API prefixes, endpoint names,
// and the platform's documented field limits.

// ── API prefixes ──────────────────────────────────────────────────────────
/// Bot API prefix. The token is appended directly, then `/<method>`.
pub const TG_API: &str = "https://api.telegram.org/bot";

/// Click-to-chat link prefix.
pub const WA_ME_BASE: &str = "https://wa.me/";

// ── Endpoint names ────────────────────────────────────────────────────────
pub const GET_ME: &str = "getMe";
pub const GET_UPDATES: &str = "getUpdates";
pub const GET_CHAT: &str = "getChat";
pub const SEND_MESSAGE: &str = "sendMessage";
pub const SEND_PHOTO: &str = "sendPhoto";
pub const SET_CHAT_TITLE: &str = "setChatTitle";
pub const SET_CHAT_DESCRIPTION: &str = "setChatDescription";
pub const SET_CHAT_PHOTO: &str = "setChatPhoto";
pub const EXPORT_CHAT_INVITE_LINK: &str = "exportChatInviteLink";
pub const SET_MY_NAME: &str = "setMyName";
pub const SET_MY_DESCRIPTION: &str = "setMyDescription";
pub const SET_MY_PROFILE_PHOTO: &str = "setMyProfilePhoto";

/// Multipart part that `InputProfilePhoto` refers to via `attach://`.
pub const PROFILE_PHOTO_PART: &str = "profile_photo";

// ── Field limits (characters) ─────────────────────────────────────────────
pub const MAX_MESSAGE_CHARS: usize = 4096;
pub const MAX_CAPTION_CHARS: usize = 1024;
pub const MAX_CHAT_TITLE_CHARS: usize = 128;
pub const MAX_CHAT_DESCRIPTION_CHARS: usize = 255;
pub const MAX_BOT_NAME_CHARS: usize = 64;
pub const MAX_BOT_DESCRIPTION_CHARS: usize = 512;

// ── Discovery ─────────────────────────────────────────────────────────────
// getUpdates accepts 1..=100.
pub const DISCOVERY_LIMIT_MAX: u32 = 100;
pub const DISCOVERY_LIMIT_DEFAULT: u32 = 100;

// ── Configuration ─────────────────────────────────────────────────────────
pub const CONFIG_DIR: &str = ".paw";
pub const CONFIG_FILE: &str = "botpanel.toml";
