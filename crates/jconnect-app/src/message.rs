//! Message types for the application (TEA pattern)

use jconnect_core::types::{HandshakeStatus, JenkinsPluginConfig, JenkinsServer};

use crate::create_server::SubmitOutcome;
use crate::form::CreateServerForm;

/// All state changes flow through these messages
#[derive(Debug, Clone)]
pub enum Message {
    /// Name field edited
    ServerNameChanged(String),

    /// URL field edited
    ServerUrlChanged(String),

    /// Create button pressed
    SubmitCreateServer,

    /// Registration workflow settled; carries back the form state the
    /// workflow task owned while it ran
    CreateServerFinished {
        form: CreateServerForm,
        outcome: SubmitOutcome,
    },

    /// Fetch layer delivered the displayed server record
    ServerFetched {
        server: JenkinsServer,
        handshake: HandshakeStatus,
        duplicate: bool,
    },

    /// Fetch layer failed to load the record
    ServerFetchFailed { error: String },

    /// Fetch layer delivered the plugin auto-configuration
    /// (`None` = plugin not reporting)
    PluginConfigFetched {
        config: Option<JenkinsPluginConfig>,
    },

    /// Navigate to a route
    Navigate { path: String },

    /// Shut the message loop down
    Quit,
}
