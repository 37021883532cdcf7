// Test double for `BotTransport`: records every call and replays canned
// results in order.

use crate::atoms::error::{BotError, BotResult};
use crate::atoms::traits::BotTransport;
use crate::atoms::types::Params;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Query,
    Upload,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub kind: CallKind,
    pub token: String,
    pub endpoint: String,
    pub params: Params,
}

pub struct RecordingTransport {
    replies: Mutex<VecDeque<BotResult<Value>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingTransport {
    pub fn new(replies: Vec<BotResult<Value>>) -> Self {
        RecordingTransport {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, kind: CallKind, token: &str, endpoint: &str, params: Params) -> BotResult<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            kind,
            token: token.to_string(),
            endpoint: endpoint.to_string(),
            params,
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BotError::validation(format!("no canned reply for {}", endpoint))))
    }
}

#[async_trait]
impl BotTransport for RecordingTransport {
    async fn call(&self, token: &str, endpoint: &str, params: Params) -> BotResult<Value> {
        self.record(CallKind::Query, token, endpoint, params)
    }

    async fn call_with_upload(&self, token: &str, endpoint: &str, params: Params) -> BotResult<Value> {
        self.record(CallKind::Upload, token, endpoint, params)
    }
}
