// Pawz Bot Panel — Bot API Client Wrapper
//
// Performs exactly one remote operation per call and normalizes the answer:
//   • GET  <base><token>/<method>?<urlencoded params>   for scalar calls
//   • POST <base><token>/<method> (multipart)           for file-bearing calls
//
// The credential is validated before anything touches the network. A
// non-success HTTP status is a transport failure whatever the body says;
// only a 2xx body is decoded into an envelope, whose `ok` field decides
// between the payload and `RemoteRejected`.
//
// No retry, no backoff, no timeout, no rate limiting.

use crate::atoms::constants::TG_API;
use crate::atoms::error::{BotError, BotResult, TransportError};
use crate::atoms::traits::BotTransport;
use crate::atoms::types::{ApiResponse, Credential, Envelope, ParamValue, Params};
use crate::engine::http::{pinned_client, truncate_body};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

// ── Encoding ───────────────────────────────────────────────────────────────

/// Percent-encode every scalar entry as `k=v` pairs joined by `&`.
/// File entries have no query form and are skipped.
pub fn encode_query(params: &Params) -> String {
    params
        .iter()
        .filter_map(|(name, value)| {
            value.to_wire_text().map(|text| {
                format!("{}={}", urlencoding::encode(name), urlencoding::encode(&text))
            })
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Build a multipart body. The boundary and content-type header are left to
/// reqwest.
pub fn build_form(params: Params) -> BotResult<Form> {
    let mut form = Form::new();
    for (name, value) in params.into_entries() {
        form = match value {
            ParamValue::File(file) => {
                let mut part = Part::bytes(file.bytes).file_name(file.file_name);
                if let Some(mime) = file.mime.as_deref() {
                    part = part
                        .mime_str(mime)
                        .map_err(|e| BotError::validation(format!("invalid MIME type '{}': {}", mime, e)))?;
                }
                form.part(name, part)
            }
            scalar => form.text(name, scalar.to_wire_text().unwrap_or_default()),
        };
    }
    Ok(form)
}

fn check_endpoint(endpoint: &str) -> BotResult<()> {
    if endpoint.is_empty() {
        return Err(BotError::MissingField("endpoint"));
    }
    if !endpoint.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(BotError::validation(format!("endpoint '{}' is not a method name", endpoint)));
    }
    Ok(())
}

// ── Client ─────────────────────────────────────────────────────────────────

/// reqwest-backed `BotTransport`.
#[derive(Clone)]
pub struct HttpBotClient {
    client: Client,
    base_url: String,
}

impl Default for HttpBotClient {
    fn default() -> Self {
        Self::new(TG_API)
    }
}

impl HttpBotClient {
    /// `base_url` is the prefix the token is appended to, `bot` marker
    /// included (e.g. `https://api.telegram.org/bot`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(pinned_client(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        HttpBotClient { client, base_url: base_url.into() }
    }

    fn method_url(&self, credential: &Credential, endpoint: &str) -> String {
        format!("{}{}/{}", self.base_url, credential.as_str(), endpoint)
    }

    async fn dispatch(&self, endpoint: &str, request: RequestBuilder) -> BotResult<Value> {
        let envelope = match execute(request).await {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("[bot-api] {} failed: {}", endpoint, e);
                return Err(e);
            }
        };
        if let Envelope::Err { description, error_code } = &envelope {
            warn!(
                "[bot-api] {} rejected (code {}): {}",
                endpoint,
                error_code.map(|c| c.to_string()).unwrap_or_else(|| "-".into()),
                description
            );
        }
        envelope.into_result()
    }
}

/// Send a prepared request and turn the response into an envelope.
async fn execute(request: RequestBuilder) -> BotResult<Envelope> {
    let resp = request.send().await.map_err(TransportError::from)?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(TransportError::Status {
            status: status.as_u16(),
            body: truncate_body(&body),
        }
        .into());
    }
    let bytes = resp.bytes().await.map_err(TransportError::from)?;
    let parsed: ApiResponse = serde_json::from_slice(&bytes).map_err(TransportError::Decode)?;
    Ok(Envelope::from(parsed))
}

#[async_trait]
impl BotTransport for HttpBotClient {
    async fn call(&self, token: &str, endpoint: &str, params: Params) -> BotResult<Value> {
        let credential = Credential::parse(token)?;
        check_endpoint(endpoint)?;
        if params.has_file() {
            return Err(BotError::validation(format!(
                "{}: file parameters must be sent with call_with_upload",
                endpoint
            )));
        }

        let mut url = self.method_url(&credential, endpoint);
        let query = encode_query(&params);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        debug!("[bot-api] GET {} ({} params)", endpoint, params.len());
        self.dispatch(endpoint, self.client.get(url)).await
    }

    async fn call_with_upload(&self, token: &str, endpoint: &str, params: Params) -> BotResult<Value> {
        let credential = Credential::parse(token)?;
        check_endpoint(endpoint)?;
        if !params.has_file() {
            return Err(BotError::validation(format!(
                "{}: upload call carries no file part",
                endpoint
            )));
        }

        let field_count = params.len();
        let form = build_form(params)?;
        let url = self.method_url(&credential, endpoint);

        debug!("[bot-api] POST {} (multipart, {} parts)", endpoint, field_count);
        self.dispatch(endpoint, self.client.post(url).multipart(form)).await
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
