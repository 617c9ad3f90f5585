//! In-memory ports for unit tests.

use crate::domain::ports::{Storage, Transport};
use crate::utils::error::{EtlError, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
pub struct MockStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_prefix: Option<String>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write below `prefix` fails with a filesystem error.
    pub fn failing_under(prefix: &str) -> Self {
        Self {
            fail_prefix: Some(prefix.to_string()),
            ..Self::default()
        }
    }

    pub async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
        let files = self.files.lock().await;
        files.get(path).cloned()
    }

    pub async fn paths(&self) -> Vec<String> {
        let files = self.files.lock().await;
        let mut paths: Vec<String> = files.keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl Storage for MockStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        if let Some(prefix) = &self.fail_prefix {
            if path.starts_with(prefix.as_str()) {
                return Err(EtlError::filesystem(
                    path,
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                ));
            }
        }
        let mut files = self.files.lock().await;
        files.insert(path.to_string(), data.to_vec());
        Ok(())
    }
}

#[derive(Clone)]
enum Reply {
    Body { body: Vec<u8>, delay: Duration },
    Status(u16),
}

/// Transport answering from a fixed url table, optionally after a delay.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    replies: Arc<HashMap<String, Reply>>,
    calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

impl ScriptedTransport {
    pub fn builder() -> ScriptedTransportBuilder {
        ScriptedTransportBuilder::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of `get` calls that were running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct ScriptedTransportBuilder {
    replies: HashMap<String, Reply>,
}

impl ScriptedTransportBuilder {
    pub fn json(self, url: &str, body: serde_json::Value) -> Self {
        self.delayed_json(url, body, Duration::ZERO)
    }

    pub fn delayed_json(mut self, url: &str, body: serde_json::Value, delay: Duration) -> Self {
        self.replies.insert(
            url.to_string(),
            Reply::Body {
                body: body.to_string().into_bytes(),
                delay,
            },
        );
        self
    }

    pub fn raw(mut self, url: &str, body: &[u8]) -> Self {
        self.replies.insert(
            url.to_string(),
            Reply::Body {
                body: body.to_vec(),
                delay: Duration::ZERO,
            },
        );
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.replies.insert(url.to_string(), Reply::Status(status));
        self
    }

    pub fn build(self) -> ScriptedTransport {
        ScriptedTransport {
            replies: Arc::new(self.replies),
            ..ScriptedTransport::default()
        }
    }
}

impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.replies.get(url).cloned() {
            Some(Reply::Body { body, delay }) => {
                let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                self.peak_in_flight.fetch_max(running, Ordering::SeqCst);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok(body)
            }
            Some(Reply::Status(status)) => Err(EtlError::HttpStatusError {
                url: url.to_string(),
                status,
            }),
            None => Err(EtlError::HttpStatusError {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

pub fn detail_json(name: &str, id: i64) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "id": id,
        "base_experience": 50 + id,
        "order": id,
        "stats": [
            {"base_stat": 40 + id, "effort": 0, "stat": {"name": "hp"}},
            {"base_stat": 10, "effort": 1, "stat": {"name": "speed"}}
        ]
    })
}
