//! Executes core `HttpRequest`s over the network with ureq.

use std::cell::Cell;

use anyhow::Context;
use groceteria_core::{HttpMethod, HttpRequest, HttpResponse};

pub struct Transport {
    agent: ureq::Agent,
    sent: Cell<u64>,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport {
    /// Status codes come back as data so the core decides what they mean.
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            agent,
            sent: Cell::new(0),
        }
    }

    /// Requests executed so far, failed ones included.
    pub fn sent(&self) -> u64 {
        self.sent.get()
    }

    pub fn execute(&self, req: HttpRequest) -> anyhow::Result<HttpResponse> {
        tracing::debug!(method = %req.method, path = %req.path, "sending request");
        let target = format!("{} {}", req.method, req.path);
        self.sent.set(self.sent.get() + 1);

        let mut response = match (req.method, req.body) {
            (HttpMethod::Get, _) => self.agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&req.path).send_empty(),
        }
        .with_context(|| format!("{target} failed"))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .with_context(|| format!("reading body of {target}"))?;
        tracing::debug!(status, "received response");

        Ok(HttpResponse::new(status, body))
    }
}
