//! Core domain types for the connect front end
//!
//! These mirror the JSON shapes the add-on backend speaks: server records,
//! per-pipeline event summaries, and the plugin's auto-configuration
//! snapshot. Everything here is plain data; classification and derivation
//! live in [`crate::connection`] and [`crate::setup_guide`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of pipeline event a Jenkins server reports to Jira
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Build,
    Deployment,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Build => write!(f, "build"),
            EventType::Deployment => write!(f, "deployment"),
        }
    }
}

/// Status of the most recent event reported for a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Pending,
    InProgress,
    Successful,
    Failed,
    Cancelled,
    Unknown,
}

/// A pipeline the connected server has reported events for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineEvent {
    pub name: String,
    pub last_event_type: EventType,
    pub last_event_status: EventStatus,
    pub last_event_date: DateTime<Utc>,
}

/// A registered Jenkins server record
///
/// `pipelines` is the backend's record of recent activity; its length is
/// the "recent events" count shown on the connection panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JenkinsServer {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    pub secret: String,
    #[serde(default)]
    pub pipelines: Vec<PipelineEvent>,
}

/// Auto-configuration snapshot reported by the Jenkins plugin
///
/// The whole record may be absent: a server that has never completed the
/// plugin handshake has no config to report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JenkinsPluginConfig {
    pub auto_build_enabled: bool,
    #[serde(default)]
    pub auto_build_regex: Option<String>,
    pub auto_deployments_enabled: bool,
    #[serde(default)]
    pub auto_deployments_regex: Option<String>,
}

/// Result of the plugin's registration callback, as reported by the
/// fetch layer alongside the server record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandshakeStatus {
    /// Server registered; the plugin has not called back yet
    #[default]
    Awaiting,
    /// Plugin completed its registration callback
    Confirmed,
    /// Plugin never reported, or its configuration was removed
    Unreported,
}
