// Pawz Bot Panel — Discovery Scan
//
// Reads one bounded page of recent updates and extracts the distinct chats
// the bot has seen and the distinct people who wrote to it, each list in
// first-seen order. A scan that finds nothing is a success with zero items;
// callers that want to flag it check `Discovery::is_empty`.

use crate::atoms::error::BotResult;
use crate::atoms::traits::BotTransport;
use crate::atoms::types::{Chat, ChatKind, Update, User};
use crate::engine::telegram::get_updates;
use log::{debug, info};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiscoveredChat {
    pub id: i64,
    pub kind: ChatKind,
    pub name: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiscoveredUser {
    pub id: i64,
    pub name: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Discovery {
    pub chats: Vec<DiscoveredChat>,
    pub users: Vec<DiscoveredUser>,
    /// Number of updates read.
    pub scanned: usize,
    pub last_update_id: Option<i64>,
}

impl Discovery {
    pub fn from_updates(updates: &[Update]) -> Self {
        let mut scan = Scan::default();
        for update in updates {
            scan.visit(update);
        }
        Discovery {
            chats: scan.chats,
            users: scan.users,
            scanned: updates.len(),
            last_update_id: updates.iter().map(|u| u.update_id).max(),
        }
    }

    /// True when neither a chat nor a user was found.
    pub fn is_empty(&self) -> bool {
        self.chats.is_empty() && self.users.is_empty()
    }

    /// Chats whose metadata a bot can edit (groups, supergroups, channels).
    pub fn groups(&self) -> impl Iterator<Item = &DiscoveredChat> {
        self.chats
            .iter()
            .filter(|c| matches!(c.kind, ChatKind::Group | ChatKind::Supergroup | ChatKind::Channel))
    }
}

#[derive(Default)]
struct Scan {
    seen_chats: HashSet<i64>,
    seen_users: HashSet<i64>,
    chats: Vec<DiscoveredChat>,
    users: Vec<DiscoveredUser>,
}

impl Scan {
    fn visit(&mut self, update: &Update) {
        let messages = [
            &update.message,
            &update.edited_message,
            &update.channel_post,
            &update.edited_channel_post,
        ];
        for msg in messages.into_iter().flatten() {
            self.chat(&msg.chat);
            if let Some(from) = &msg.from {
                self.user(from);
            }
        }
        for member in [&update.my_chat_member, &update.chat_member].into_iter().flatten() {
            self.chat(&member.chat);
            self.user(&member.from);
        }
        if let Some(req) = &update.chat_join_request {
            self.chat(&req.chat);
            self.user(&req.from);
        }
        if let Some(query) = &update.callback_query {
            self.user(&query.from);
        }
    }

    fn chat(&mut self, chat: &Chat) {
        if self.seen_chats.insert(chat.id) {
            self.chats.push(DiscoveredChat {
                id: chat.id,
                kind: chat.kind,
                name: chat.display_name(),
                username: chat.username.clone(),
            });
        }
    }

    /// Bots (the panel's own bot included) are not contacts.
    fn user(&mut self, user: &User) {
        if user.is_bot {
            return;
        }
        if self.seen_users.insert(user.id) {
            self.users.push(DiscoveredUser {
                id: user.id,
                name: user.display_name(),
                username: user.username.clone(),
            });
        }
    }
}

/// Fetch up to `limit` recent updates and extract chats and contacts.
pub async fn discover(api: &dyn BotTransport, token: &str, limit: u32) -> BotResult<Discovery> {
    let updates = get_updates(api, token, limit, None).await?;
    debug!("[discovery] Scanning {} updates", updates.len());
    let found = Discovery::from_updates(&updates);
    info!(
        "[discovery] {} chats, {} users from {} updates",
        found.chats.len(),
        found.users.len(),
        found.scanned
    );
    Ok(found)
}
