//! Application state (the Model in the TEA pattern)

use jconnect_core::connection::{classify, ConnectionPanel};
use jconnect_core::setup_guide::SetUpGuide;
use jconnect_core::types::{HandshakeStatus, JenkinsPluginConfig, JenkinsServer};

use crate::form::CreateServerForm;

/// Everything the front end knows, in one place
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Create-server form
    pub form: CreateServerForm,

    /// The server record on display; `None` while it loads
    pub server: Option<JenkinsServer>,

    /// Plugin handshake result reported with the record
    pub handshake: HandshakeStatus,

    /// The displayed server shares a URL with another registration
    pub duplicate: bool,

    /// Plugin auto-configuration; `None` when the plugin is not reporting
    pub plugin_config: Option<JenkinsPluginConfig>,

    /// Current route
    pub route: String,

    /// Set when the message loop should exit
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            route: "/".to_string(),
            ..Default::default()
        }
    }

    /// Render decision for the connection panel; `None` while loading
    pub fn connection_panel(&self) -> Option<ConnectionPanel> {
        classify(self.server.as_ref(), self.handshake, self.duplicate)
    }

    /// Setup-guide instructions derived from the plugin config
    pub fn setup_guide(&self) -> SetUpGuide {
        SetUpGuide::for_config(self.plugin_config.as_ref())
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }
}
