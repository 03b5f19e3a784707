//! Scripted transport for exercising the adapter without an rqlite node.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::client::Transport;
use crate::error::RqliteDbError;
use crate::types::Endpoint;

/// What the scripted transport answers with next.
#[derive(Debug, Clone)]
pub enum Reply {
    /// A 2xx reply with this JSON body
    Body(JsonValue),
    /// A non-2xx reply
    Status(u16, String),
}

/// One request seen by the scripted transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub endpoint: Endpoint,
    pub body: String,
}

impl RecordedRequest {
    /// The body parsed back as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the recorded body is not JSON.
    #[must_use]
    pub fn json(&self) -> JsonValue {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

/// Transport that replays queued replies and records every request.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 2xx reply.
    #[must_use]
    pub fn reply(self, body: JsonValue) -> Self {
        self.push(Reply::Body(body));
        self
    }

    /// Queue a non-2xx reply.
    #[must_use]
    pub fn reply_status(self, status: u16, body: &str) -> Self {
        self.push(Reply::Status(status, body.to_string()));
        self
    }

    pub fn push(&self, reply: Reply) {
        lock(&self.replies).push_back(reply);
    }

    /// Requests seen so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, endpoint: Endpoint, body: String) -> Result<JsonValue, RqliteDbError> {
        lock(&self.requests).push(RecordedRequest { endpoint, body });
        match lock(&self.replies).pop_front() {
            Some(Reply::Body(json)) => Ok(json),
            Some(Reply::Status(status, body)) => Err(RqliteDbError::HttpStatus { status, body }),
            None => Err(RqliteDbError::Other("no scripted reply left".to_string())),
        }
    }
}

fn lock<V>(mutex: &Mutex<V>) -> std::sync::MutexGuard<'_, V> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
