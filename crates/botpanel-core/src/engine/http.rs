// ── Bot Panel Engine: HTTP Client Factory ──────────────────────────────────
//
// Builds the one `reqwest::Client` every Bot API call goes through, using a
// `rustls::ClientConfig` seeded only with the Mozilla root certificates so a
// CA installed on the host cannot intercept the bot token in transit.
//
// No request timeout is configured: a stalled call blocks only the task
// that issued it, and every failure is surfaced to the caller immediately.

use log::warn;
use reqwest::Client;
use rustls::ClientConfig;
use std::sync::{Arc, LazyLock};

/// Longest slice of an error body kept in `TransportError::Status`.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Explicit `ring` provider rather than the process default, so the config
/// also builds in test binaries where no global provider is installed.
fn pinned_tls_config() -> Option<ClientConfig> {
    let mut root_store = rustls::RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = ClientConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
        .with_safe_default_protocol_versions()
        .ok()?
        .with_root_certificates(root_store)
        .with_no_client_auth();
    Some(config)
}

static PINNED_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    let builder = match pinned_tls_config() {
        Some(tls) => Client::builder().use_preconfigured_tls(tls),
        None => {
            warn!("[http] Pinned TLS config unavailable, using reqwest defaults");
            Client::builder()
        }
    };
    builder.build().unwrap_or_else(|e| {
        warn!("[http] Client build failed ({}), using reqwest defaults", e);
        Client::new()
    })
});

/// Shared certificate-pinned client. Cloning shares the connection pool.
pub fn pinned_client() -> Client {
    PINNED_CLIENT.clone()
}

/// Trim an error body for inclusion in an error message.
pub fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        return body.to_string();
    }
    let mut cut: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    cut.push('…');
    cut
}
