//! TEA update function
//!
//! `update` is pure over `AppState`: it mutates state and tells the event
//! loop what side effect to run next. The loop owns the collaborators and
//! spawns the registration workflow; completions come back as messages.

use jconnect_core::prelude::*;

use crate::create_server::SubmitOutcome;
use crate::message::Message;
use crate::state::AppState;

/// Actions the event loop performs after update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    /// Run the registration workflow with the production collaborators.
    /// Carries a snapshot of the form; the live form is flagged loading
    /// until `CreateServerFinished` hands it back.
    SubmitCreateServer { form: crate::form::CreateServerForm },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}

/// Process one message
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::ServerNameChanged(name) => {
            state.form.set_server_name(name);
            UpdateResult::none()
        }

        Message::ServerUrlChanged(url) => {
            state.form.set_server_url(url);
            UpdateResult::none()
        }

        Message::SubmitCreateServer => {
            if state.form.is_loading {
                debug!("Submit ignored: registration already in flight");
                return UpdateResult::none();
            }

            // Snapshot before flagging, so the workflow's own guard
            // sees a submittable form.
            let snapshot = state.form.clone();
            state.form.is_loading = true;

            UpdateResult::action(UpdateAction::SubmitCreateServer { form: snapshot })
        }

        Message::CreateServerFinished { form, outcome } => {
            state.form = form;
            match &outcome {
                SubmitOutcome::Created { uuid } => {
                    info!("Server {uuid} registered");
                }
                SubmitOutcome::Failed { message } => {
                    warn!("Server registration failed: {message}");
                }
                SubmitOutcome::Rejected | SubmitOutcome::InFlight => {}
            }
            UpdateResult::none()
        }

        Message::ServerFetched {
            server,
            handshake,
            duplicate,
        } => {
            state.server = Some(server);
            state.handshake = handshake;
            state.duplicate = duplicate;
            UpdateResult::none()
        }

        Message::ServerFetchFailed { error } => {
            warn!("Server fetch failed: {error}");
            state.server = None;
            UpdateResult::none()
        }

        Message::PluginConfigFetched { config } => {
            state.plugin_config = config;
            UpdateResult::none()
        }

        Message::Navigate { path } => {
            state.route = path;
            UpdateResult::none()
        }

        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::CreateServerForm;
    use jconnect_core::types::{HandshakeStatus, JenkinsServer};

    fn sample_server() -> JenkinsServer {
        JenkinsServer {
            uuid: "abc".to_string(),
            name: "ci".to_string(),
            url: "https://ci.example.com".to_string(),
            secret: "s".to_string(),
            pipelines: vec![],
        }
    }

    #[test]
    fn test_field_edits_flow_into_the_form() {
        let mut state = AppState::new();

        update(&mut state, Message::ServerNameChanged("Build".to_string()));
        update(
            &mut state,
            Message::ServerUrlChanged("https://ci.example.com".to_string()),
        );

        assert_eq!(state.form.server_name, "Build");
        assert_eq!(state.form.server_url, "https://ci.example.com");
    }

    #[test]
    fn test_submit_snapshots_form_and_enters_loading() {
        let mut state = AppState::new();
        state.form.set_server_name("Build");
        state.form.set_server_url("https://ci.example.com");

        let result = update(&mut state, Message::SubmitCreateServer);

        match result.action {
            Some(UpdateAction::SubmitCreateServer { form }) => {
                assert!(!form.is_loading);
                assert_eq!(form.server_name, "Build");
            }
            other => panic!("unexpected action: {other:?}"),
        }
        assert!(state.form.is_loading);
    }

    #[test]
    fn test_second_submit_while_loading_is_a_noop() {
        let mut state = AppState::new();
        state.form.is_loading = true;

        let result = update(&mut state, Message::SubmitCreateServer);
        assert!(result.action.is_none());
        assert!(result.message.is_none());
    }

    #[test]
    fn test_finished_hands_the_form_back() {
        let mut state = AppState::new();
        state.form.is_loading = true;

        let mut returned = CreateServerForm::new();
        returned.set_server_name("Build");
        returned.set_error("Server creation failed: 409 Conflict");

        update(
            &mut state,
            Message::CreateServerFinished {
                form: returned,
                outcome: SubmitOutcome::Failed {
                    message: "409 Conflict".to_string(),
                },
            },
        );

        assert!(!state.form.is_loading);
        assert!(state.form.has_error);
        assert_eq!(state.form.server_name, "Build");
    }

    #[test]
    fn test_server_fetched_updates_classification_inputs() {
        let mut state = AppState::new();

        update(
            &mut state,
            Message::ServerFetched {
                server: sample_server(),
                handshake: HandshakeStatus::Confirmed,
                duplicate: false,
            },
        );

        assert!(state.server.is_some());
        assert_eq!(state.handshake, HandshakeStatus::Confirmed);
        assert!(!state.duplicate);
    }

    #[test]
    fn test_fetch_failure_returns_panel_to_loading() {
        let mut state = AppState::new();
        state.server = Some(sample_server());

        update(
            &mut state,
            Message::ServerFetchFailed {
                error: "503".to_string(),
            },
        );

        assert!(state.server.is_none());
        assert!(state.connection_panel().is_none());
    }

    #[test]
    fn test_navigate_updates_route() {
        let mut state = AppState::new();

        update(
            &mut state,
            Message::Navigate {
                path: "/connect/abc".to_string(),
            },
        );

        assert_eq!(state.route, "/connect/abc");
    }

    #[test]
    fn test_quit_sets_flag() {
        let mut state = AppState::new();
        update(&mut state, Message::Quit);
        assert!(state.should_quit);
    }
}
