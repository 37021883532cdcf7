// ── Bot Panel Engine ───────────────────────────────────────────────────────
// HTTP plumbing, the Bot API client, typed operations, and the helpers the
// admin surfaces build on.

pub mod bot_api;
pub mod config;
pub mod discovery;
pub mod http;
pub mod telegram;
pub mod whatsapp;

#[cfg(test)]
pub(crate) mod testing;
