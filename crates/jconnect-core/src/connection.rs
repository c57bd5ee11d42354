//! Connection-status classification for a registered server
//!
//! Turns the fetch layer's raw signals (server record, handshake result,
//! duplicate flag) into the single render decision the panel needs. The
//! classification is pure: same inputs, same panel, no side effects.

use crate::types::{HandshakeStatus, JenkinsServer};

/// Connection state shown on a server's panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectedState {
    Connected,
    Pending,
    Duplicate,
    NotConnected,
}

impl ConnectedState {
    /// Human-readable status label
    pub fn label(&self) -> &'static str {
        match self {
            ConnectedState::Connected => "CONNECTED",
            ConnectedState::Pending => "PENDING",
            ConnectedState::Duplicate => "DUPLICATE",
            ConnectedState::NotConnected => "NOT CONNECTED",
        }
    }
}

/// The full render decision for a server's connection panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionPanel {
    pub state: ConnectedState,
    /// Count shown on the recent-events tab
    pub recent_events: usize,
    /// Whether the tabbed body is shown at all
    pub tabbed: bool,
}

/// Classify a server's connection status.
///
/// `None` means the record is still loading and nothing should be
/// classified yet. A duplicate server wins over every other signal and
/// collapses the panel to a single explanation without tabs. An
/// unconfirmed handshake renders as pending with a zero event count even
/// when the record carries cached pipeline entries.
pub fn classify(
    server: Option<&JenkinsServer>,
    handshake: HandshakeStatus,
    duplicate: bool,
) -> Option<ConnectionPanel> {
    let server = server?;

    if duplicate {
        return Some(ConnectionPanel {
            state: ConnectedState::Duplicate,
            recent_events: 0,
            tabbed: false,
        });
    }

    let panel = match handshake {
        HandshakeStatus::Awaiting => ConnectionPanel {
            state: ConnectedState::Pending,
            recent_events: 0,
            tabbed: true,
        },
        HandshakeStatus::Confirmed => ConnectionPanel {
            state: ConnectedState::Connected,
            recent_events: server.pipelines.len(),
            tabbed: true,
        },
        HandshakeStatus::Unreported => ConnectionPanel {
            state: ConnectedState::NotConnected,
            recent_events: server.pipelines.len(),
            tabbed: true,
        },
    };

    Some(panel)
}
