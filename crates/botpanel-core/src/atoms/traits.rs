// ── Bot Panel Atoms: Transport Trait ───────────────────────────────────────
// The seam between typed bot operations and HTTP. `engine::bot_api` provides
// the reqwest implementation; tests substitute a recording fake.

use crate::atoms::error::BotResult;
use crate::atoms::types::Params;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait BotTransport: Send + Sync {
    /// GET `<base><token>/<endpoint>?<params>`. Returns the envelope payload;
    /// `ok: false` surfaces as `BotError::RemoteRejected`.
    async fn call(&self, token: &str, endpoint: &str, params: Params) -> BotResult<Value>;

    /// POST `<base><token>/<endpoint>` with a multipart body. `params` must
    /// hold at least one file.
    async fn call_with_upload(&self, token: &str, endpoint: &str, params: Params) -> BotResult<Value>;
}
