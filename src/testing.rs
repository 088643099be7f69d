//! Scripted HTTP client for exercising the request path without a network.

use http_client::{Error, HttpClient, Request, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A canned response.
#[derive(Debug, Clone)]
pub struct Reply {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

impl Reply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// A client-credentials token response.
    pub fn token(access_token: &str, expires_in: u64) -> Self {
        Self::ok(format!(
            r#"{{"access_token": "{access_token}", "token_type": "Bearer", "expires_in": {expires_in}}}"#
        ))
    }
}

/// What the client sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Sent {
    pub method: String,
    pub url: String,
    pub authorization: Option<String>,
    pub body: String,
}

/// Answers requests from a queue of [`Reply`]s, in order, and records every request.
///
/// Clones share the queue and the record, so a test can keep one clone after
/// handing the other to the code under test. An unscripted request gets a 500.
#[derive(Debug, Clone, Default)]
pub struct ScriptedHttpClient {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    sent: Arc<Mutex<Vec<Sent>>>,
}

impl ScriptedHttpClient {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            sent: Arc::default(),
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn send(&self, mut req: Request) -> Result<Response, Error> {
        let body = req.body_string().await?;
        let authorization = req
            .header("Authorization")
            .and_then(|h| h.get(0))
            .map(|v| v.as_str().to_string());

        self.sent.lock().unwrap().push(Sent {
            method: req.method().to_string(),
            url: req.url().to_string(),
            authorization,
            body,
        });

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Reply::new(500, "unscripted request"));

        let mut response = Response::new(reply.status);
        for (name, value) in &reply.headers {
            let _ = response.insert_header(name.as_str(), value.as_str());
        }
        response.set_body(reply.body);
        Ok(response)
    }
}
