//! Bridge protocol - NDJSON commands in, JSON events out
//!
//! The runner speaks to its host over stdio: one JSON command per line on
//! stdin, one JSON event per line on stdout. This stands in for the
//! browser UI the connect flow normally renders, and makes the whole flow
//! scriptable in E2E tests.
//!
//! # Example Exchange
//!
//! ```json
//! {"cmd":"setServerUrl","value":"https://ci.example.com"}
//! {"cmd":"submit"}
//! {"event":"form_state","server_name":"","server_url":"https://ci.example.com","has_error":false,"error_message":"","is_loading":true,"timestamp":1704700001000}
//! ```
//!
//! Responses to outgoing JSON-RPC requests (`secret.generate`,
//! `server.create`, ...) come back as `{"cmd":"response",...}` lines and
//! are routed to the gateway, never to the update loop.

pub mod runner;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{self, Write};
use tracing::error;

use jconnect_app::form::CreateServerForm;
use jconnect_app::SubmitOutcome;
use jconnect_core::connection::ConnectionPanel;
use jconnect_core::types::{HandshakeStatus, JenkinsPluginConfig, JenkinsServer};

/// Commands the host can send on stdin
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "cmd", rename_all = "camelCase")]
pub enum BridgeCommand {
    /// Edit the name field
    SetServerName { value: String },

    /// Edit the URL field
    SetServerUrl { value: String },

    /// Press the Create button
    Submit,

    /// Deliver the displayed server record
    ServerFetched {
        server: JenkinsServer,
        #[serde(default)]
        handshake: HandshakeStatus,
        #[serde(default)]
        duplicate: bool,
    },

    /// Report a failed record fetch
    ServerFetchFailed { error: String },

    /// Deliver the plugin auto-configuration (null = not reporting)
    PluginConfig {
        #[serde(default)]
        config: Option<JenkinsPluginConfig>,
    },

    /// Response to an outgoing JSON-RPC request
    Response {
        id: u64,
        #[serde(default)]
        result: Option<Value>,
        #[serde(default)]
        error: Option<String>,
    },

    /// Shut the runner down
    Quit,
}

/// Events emitted on stdout
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UiEvent {
    /// Create-server form after a state change
    FormState {
        server_name: String,
        server_url: String,
        has_error: bool,
        error_message: String,
        is_loading: bool,
        timestamp: i64,
    },

    /// Connection panel render decision
    ConnectionState {
        /// Record still loading; `status` is absent
        loading: bool,
        status: Option<String>,
        recent_events: usize,
        tabbed: bool,
        timestamp: i64,
    },

    /// Setup-guide instruction lines per event category
    SetupGuide {
        build: Vec<String>,
        deployment: Vec<String>,
        timestamp: i64,
    },

    /// A registration attempt settled
    SubmitResult {
        outcome: String,
        uuid: Option<String>,
        message: Option<String>,
        timestamp: i64,
    },

    /// Route change
    Navigation { path: String, timestamp: i64 },

    /// Something went wrong outside the form's inline error
    Error { message: String, timestamp: i64 },
}

impl UiEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize bridge event: {}", e);
                return;
            }
        };

        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write bridge event to stdout: {}", e);
            return;
        }

        if let Err(e) = stdout.flush() {
            error!("Failed to flush bridge stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn form_state(form: &CreateServerForm) -> Self {
        Self::FormState {
            server_name: form.server_name.clone(),
            server_url: form.server_url.clone(),
            has_error: form.has_error,
            error_message: form.error_message.clone(),
            is_loading: form.is_loading,
            timestamp: Self::now(),
        }
    }

    pub fn connection_state(panel: Option<ConnectionPanel>) -> Self {
        match panel {
            Some(panel) => Self::ConnectionState {
                loading: false,
                status: Some(panel.state.label().to_string()),
                recent_events: panel.recent_events,
                tabbed: panel.tabbed,
                timestamp: Self::now(),
            },
            None => Self::ConnectionState {
                loading: true,
                status: None,
                recent_events: 0,
                tabbed: false,
                timestamp: Self::now(),
            },
        }
    }

    pub fn setup_guide(build: Vec<String>, deployment: Vec<String>) -> Self {
        Self::SetupGuide {
            build,
            deployment,
            timestamp: Self::now(),
        }
    }

    pub fn submit_result(outcome: &SubmitOutcome) -> Self {
        let (name, uuid, message) = match outcome {
            SubmitOutcome::Created { uuid } => ("created", Some(uuid.clone()), None),
            SubmitOutcome::Rejected => ("rejected", None, None),
            SubmitOutcome::Failed { message } => ("failed", None, Some(message.clone())),
            SubmitOutcome::InFlight => ("in_flight", None, None),
        };

        Self::SubmitResult {
            outcome: name.to_string(),
            uuid,
            message,
            timestamp: Self::now(),
        }
    }

    pub fn navigation(path: &str) -> Self {
        Self::Navigation {
            path: path.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn error(message: String) -> Self {
        Self::Error {
            message,
            timestamp: Self::now(),
        }
    }
}
