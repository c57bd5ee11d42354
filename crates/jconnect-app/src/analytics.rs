//! Analytics event definitions and client abstraction
//!
//! Transport is owned by the host product; the production client here
//! turns events into structured log lines. The registration workflow only
//! depends on the trait, so tests can record events in memory and assert
//! on their order.

use serde_json::Value;
use std::fmt;

use jconnect_core::prelude::*;

/// Category of analytics event, mirroring the add-on's event API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsEventType {
    Screen,
    Ui,
    Track,
    Operational,
}

impl fmt::Display for AnalyticsEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalyticsEventType::Screen => "screen",
            AnalyticsEventType::Ui => "ui",
            AnalyticsEventType::Track => "track",
            AnalyticsEventType::Operational => "operational",
        };
        write!(f, "{name}")
    }
}

/// Event names emitted by the create-server flow
pub mod events {
    /// Screen name for the create-server form, also used as the `source`
    /// attribute on every event the form emits
    pub const CREATE_SERVER_SCREEN: &str = "createJenkinsServerScreen";
    /// UI event for the Create button
    pub const CREATE_SERVER_CLICKED: &str = "createJenkinsServer";
    /// Rejected server URL on submit
    pub const URL_VALIDATION_FAILURE: &str = "jenkinsServerUrlValidationFailure";
    /// Remote creation succeeded
    pub const CREATE_SERVER_SUCCESS: &str = "createdJenkinsServerSuccess";
    /// Remote creation failed
    pub const CREATE_SERVER_ERROR: &str = "createdJenkinsServerError";
}

/// Client for sending analytics events
///
/// Sends are awaited only to preserve event ordering; a refused send never
/// aborts the caller.
#[trait_variant::make(AnalyticsClient: Send)]
pub trait LocalAnalyticsClient {
    async fn send_event(
        &self,
        event_type: AnalyticsEventType,
        name: &str,
        attributes: Value,
    ) -> Result<()>;
}

/// Production client: events become structured log lines
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalyticsClient;

impl AnalyticsClient for TracingAnalyticsClient {
    async fn send_event(
        &self,
        event_type: AnalyticsEventType,
        name: &str,
        attributes: Value,
    ) -> Result<()> {
        info!(
            target: "jconnect_app::analytics",
            %event_type,
            name,
            %attributes,
            "analytics event"
        );
        Ok(())
    }
}
