//! Secret issuance and server CRUD over the host bridge
//!
//! This module provides:
//! - Collaborator traits for the registration workflow
//! - Request ID tracking for matching bridge responses
//! - Request building in JSON-RPC format
//! - Timeout handling for stalled requests

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::sync::{mpsc, oneshot, RwLock};

use jconnect_core::prelude::*;
use jconnect_core::types::{JenkinsPluginConfig, JenkinsServer};

/// Issues webhook secrets for new server registrations
#[trait_variant::make(SecretIssuer: Send)]
pub trait LocalSecretIssuer {
    async fn generate_secret(&self) -> Result<String>;
}

/// Creates and reads server records on the host backend
#[trait_variant::make(ServerGateway: Send)]
pub trait LocalServerGateway {
    /// Persist a newly registered server
    async fn create_server(&self, server: &JenkinsServer) -> Result<()>;

    /// Fetch one server record by uuid
    async fn fetch_server(&self, uuid: &str) -> Result<JenkinsServer>;

    /// Fetch the plugin's auto-configuration for a server.
    /// `None` means the plugin has never reported.
    async fn fetch_plugin_config(&self, uuid: &str) -> Result<Option<JenkinsPluginConfig>>;
}

/// Global request ID counter
static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a unique request ID
pub fn next_request_id() -> u64 {
    REQUEST_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Bridge request types
#[derive(Debug, Clone)]
pub enum BridgeRequest {
    GenerateSecret,
    CreateServer { server: JenkinsServer },
    FetchServer { uuid: String },
    FetchPluginConfig { uuid: String },
}

impl BridgeRequest {
    /// Build the JSON-RPC request object
    pub fn build(&self, id: u64) -> String {
        let (method, params) = match self {
            BridgeRequest::GenerateSecret => ("secret.generate", json!({})),
            BridgeRequest::CreateServer { server } => {
                ("server.create", json!({ "server": server }))
            }
            BridgeRequest::FetchServer { uuid } => ("server.get", json!({ "uuid": uuid })),
            BridgeRequest::FetchPluginConfig { uuid } => {
                ("server.getPluginConfig", json!({ "uuid": uuid }))
            }
        };

        json!({
            "id": id,
            "method": method,
            "params": params,
        })
        .to_string()
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            BridgeRequest::GenerateSecret => "generate secret",
            BridgeRequest::CreateServer { .. } => "create server",
            BridgeRequest::FetchServer { .. } => "fetch server",
            BridgeRequest::FetchPluginConfig { .. } => "fetch plugin config",
        }
    }
}

/// Response to a bridge request
#[derive(Debug, Clone)]
pub struct BridgeResponse {
    pub id: u64,
    pub success: bool,
    pub result: Option<Value>,
    pub error: Option<String>,
}

impl BridgeResponse {
    /// Create a success response
    pub fn success(id: u64, result: Option<Value>) -> Self {
        Self {
            id,
            success: true,
            result,
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: u64, message: impl Into<String>) -> Self {
        Self {
            id,
            success: false,
            result: None,
            error: Some(message.into()),
        }
    }
}

/// Tracks pending requests and matches responses
#[derive(Default)]
pub struct RequestTracker {
    /// Map of request ID to response channel
    pending: Arc<RwLock<HashMap<u64, oneshot::Sender<BridgeResponse>>>>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new pending request
    /// Returns (request_id, receiver for response)
    pub async fn register(&self) -> (u64, oneshot::Receiver<BridgeResponse>) {
        let id = next_request_id();
        let (tx, rx) = oneshot::channel();

        self.pending.write().await.insert(id, tx);

        (id, rx)
    }

    /// Handle an incoming response from the bridge
    /// Returns true if the response was matched to a pending request
    pub async fn handle_response(&self, response: BridgeResponse) -> bool {
        if let Some(tx) = self.pending.write().await.remove(&response.id) {
            let _ = tx.send(response);
            true
        } else {
            false
        }
    }

    /// Forget a pending request (e.g. after its caller timed out)
    pub async fn forget(&self, id: u64) {
        self.pending.write().await.remove(&id);
    }

    /// Cancel all pending requests (e.g. on shutdown)
    pub async fn cancel_all(&self) {
        let mut pending = self.pending.write().await;
        for (id, tx) in pending.drain() {
            let _ = tx.send(BridgeResponse::error(id, "Request cancelled"));
        }
    }

    /// Get the number of pending requests
    pub async fn pending_count(&self) -> usize {
        self.pending.read().await.len()
    }
}

/// Production issuer + gateway speaking JSON-RPC over the NDJSON bridge
///
/// Requests go out as single lines through `line_tx`; responses come back
/// through [`BridgeGateway::handle_response`] from the stdin reader.
#[derive(Clone)]
pub struct BridgeGateway {
    /// Channel to the line writer task
    line_tx: mpsc::UnboundedSender<String>,
    /// Request tracker for response matching
    tracker: Arc<RequestTracker>,
    /// How long to wait for a response before giving up
    timeout: Duration,
}

impl std::fmt::Debug for BridgeGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeGateway")
            .field("line_tx", &"<channel>")
            .field("tracker", &"<tracker>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl BridgeGateway {
    pub fn new(line_tx: mpsc::UnboundedSender<String>) -> Self {
        Self::with_timeout(line_tx, Duration::from_secs(30))
    }

    pub fn with_timeout(line_tx: mpsc::UnboundedSender<String>, timeout: Duration) -> Self {
        Self {
            line_tx,
            tracker: Arc::new(RequestTracker::new()),
            timeout,
        }
    }

    /// Route a response from the bridge to its waiting caller.
    /// Returns true if a pending request matched.
    pub async fn handle_response(&self, response: BridgeResponse) -> bool {
        self.tracker.handle_response(response).await
    }

    /// Cancel all in-flight requests
    pub async fn shutdown(&self) {
        self.tracker.cancel_all().await;
    }

    /// Send a request and wait for its response
    async fn call(&self, request: BridgeRequest) -> Result<Value> {
        let (id, response_rx) = self.tracker.register().await;
        let line = request.build(id);

        debug!("Sending bridge request #{}: {}", id, request.description());

        if self.line_tx.send(line).is_err() {
            self.tracker.forget(id).await;
            return Err(Error::channel_send("bridge writer"));
        }

        match tokio::time::timeout(self.timeout, response_rx).await {
            Ok(Ok(response)) => {
                debug!("Bridge request #{} completed: success={}", id, response.success);
                match response.error {
                    Some(message) => Err(Error::gateway(message)),
                    None => Ok(response.result.unwrap_or(Value::Null)),
                }
            }
            Ok(Err(_)) => Err(Error::ChannelClosed),
            Err(_) => {
                self.tracker.forget(id).await;
                Err(Error::RequestTimeout {
                    id,
                    seconds: self.timeout.as_secs(),
                })
            }
        }
    }
}

impl SecretIssuer for BridgeGateway {
    async fn generate_secret(&self) -> Result<String> {
        let result = self
            .call(BridgeRequest::GenerateSecret)
            .await
            .map_err(|e| Error::issuance(e.to_string()))?;

        result
            .get("secret")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::issuance("response carried no secret"))
    }
}

impl ServerGateway for BridgeGateway {
    async fn create_server(&self, server: &JenkinsServer) -> Result<()> {
        self.call(BridgeRequest::CreateServer {
            server: server.clone(),
        })
        .await
        .map_err(|e| Error::creation(e.to_string()))?;

        Ok(())
    }

    async fn fetch_server(&self, uuid: &str) -> Result<JenkinsServer> {
        let result = self
            .call(BridgeRequest::FetchServer {
                uuid: uuid.to_string(),
            })
            .await?;

        let record = result
            .get("server")
            .cloned()
            .ok_or_else(|| Error::gateway("response carried no server record"))?;

        Ok(serde_json::from_value(record)?)
    }

    async fn fetch_plugin_config(&self, uuid: &str) -> Result<Option<JenkinsPluginConfig>> {
        let result = self
            .call(BridgeRequest::FetchPluginConfig {
                uuid: uuid.to_string(),
            })
            .await?;

        match result.get("config") {
            None => Ok(None),
            Some(Value::Null) => Ok(None),
            Some(config) => Ok(Some(serde_json::from_value(config.clone())?)),
        }
    }
}
