//! End-to-end registration flow: messages through the update function,
//! the workflow against in-memory collaborators, and the completion
//! round-trip back into state.

use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::mpsc;

use jconnect_app::analytics::{AnalyticsClient, AnalyticsEventType};
use jconnect_app::gateway::{BridgeGateway, BridgeResponse, ServerGateway, SecretIssuer};
use jconnect_app::navigation::ChannelNavigator;
use jconnect_app::{submit_create_server, update, AppState, Message, SubmitOutcome, UpdateAction};
use jconnect_core::prelude::*;
use jconnect_core::types::{HandshakeStatus, JenkinsPluginConfig, JenkinsServer};

#[derive(Default)]
struct RecordingAnalytics {
    names: Mutex<Vec<String>>,
}

impl AnalyticsClient for RecordingAnalytics {
    async fn send_event(
        &self,
        _event_type: AnalyticsEventType,
        name: &str,
        _attributes: Value,
    ) -> Result<()> {
        self.names.lock().unwrap().push(name.to_string());
        Ok(())
    }
}

struct FixedSecrets;

impl SecretIssuer for FixedSecrets {
    async fn generate_secret(&self) -> Result<String> {
        Ok("s3cr3t".to_string())
    }
}

#[derive(Default)]
struct InMemoryGateway {
    created: Mutex<Vec<JenkinsServer>>,
}

impl ServerGateway for InMemoryGateway {
    async fn create_server(&self, server: &JenkinsServer) -> Result<()> {
        self.created.lock().unwrap().push(server.clone());
        Ok(())
    }

    async fn fetch_server(&self, uuid: &str) -> Result<JenkinsServer> {
        self.created
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.uuid == uuid)
            .cloned()
            .ok_or_else(|| Error::gateway(format!("no server {uuid}")))
    }

    async fn fetch_plugin_config(&self, _uuid: &str) -> Result<Option<JenkinsPluginConfig>> {
        Ok(None)
    }
}

#[tokio::test]
async fn create_server_flow_reaches_the_detail_view() {
    let (msg_tx, mut msg_rx) = mpsc::channel::<Message>(16);

    let analytics = RecordingAnalytics::default();
    let secrets = FixedSecrets;
    let gateway = InMemoryGateway::default();
    let navigator = ChannelNavigator::new(msg_tx);

    let mut state = AppState::new();

    // Fill the form the way the host would.
    update(
        &mut state,
        Message::ServerNameChanged("Build server".to_string()),
    );
    update(
        &mut state,
        Message::ServerUrlChanged("https://ci.example.com:8080".to_string()),
    );

    // Submit: update snapshots the form and enters loading.
    let result = update(&mut state, Message::SubmitCreateServer);
    let mut form = match result.action {
        Some(UpdateAction::SubmitCreateServer { form }) => form,
        other => panic!("expected a submit action, got {other:?}"),
    };
    assert!(state.form.is_loading);

    // The event loop runs the workflow on the snapshot.
    let outcome = submit_create_server(&mut form, &analytics, &secrets, &gateway, &navigator).await;

    let uuid = match &outcome {
        SubmitOutcome::Created { uuid } => uuid.clone(),
        other => panic!("expected a created outcome, got {other:?}"),
    };
    assert!(uuid::Uuid::parse_str(&uuid).is_ok());

    // The record hit the backend exactly once, with an empty history.
    {
        let created = gateway.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].name, "Build server");
        assert_eq!(created[0].secret, "s3cr3t");
        assert!(created[0].pipelines.is_empty());
    }

    // Completion and navigation come back as messages.
    update(
        &mut state,
        Message::CreateServerFinished {
            form,
            outcome: outcome.clone(),
        },
    );

    let navigate = msg_rx.recv().await.expect("navigation message");
    update(&mut state, navigate);
    assert_eq!(state.route, format!("/connect/{uuid}"));

    // Success keeps the form loading: navigation replaces it.
    assert!(state.form.is_loading);
    assert!(!state.form.has_error);

    assert_eq!(
        analytics.names.lock().unwrap().as_slice(),
        ["createJenkinsServer", "createdJenkinsServerSuccess"]
    );

    // The detail view can now fetch what was created.
    let fetched = gateway.fetch_server(&uuid).await.expect("record exists");
    update(
        &mut state,
        Message::ServerFetched {
            server: fetched,
            handshake: HandshakeStatus::Awaiting,
            duplicate: false,
        },
    );

    let panel = state.connection_panel().expect("record loaded");
    assert_eq!(panel.state.label(), "PENDING");
    assert_eq!(panel.recent_events, 0);
}

#[tokio::test]
async fn bridge_gateway_carries_the_whole_registration() {
    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();
    let gateway = BridgeGateway::with_timeout(line_tx, Duration::from_secs(2));

    // Simulated host backend: answers secret.generate and server.create.
    let responder = gateway.clone();
    tokio::spawn(async move {
        while let Some(line) = line_rx.recv().await {
            let request: Value = serde_json::from_str(&line).expect("request is JSON");
            let id = request["id"].as_u64().expect("request id");

            let result = match request["method"].as_str() {
                Some("secret.generate") => serde_json::json!({ "secret": "wired-secret" }),
                Some("server.create") => serde_json::json!({}),
                other => panic!("unexpected method: {other:?}"),
            };

            responder
                .handle_response(BridgeResponse::success(id, Some(result)))
                .await;
        }
    });

    let (msg_tx, mut msg_rx) = mpsc::channel::<Message>(16);
    let analytics = RecordingAnalytics::default();
    let navigator = ChannelNavigator::new(msg_tx);

    let mut form = jconnect_app::CreateServerForm::new();
    form.set_server_name("Wired server");
    form.set_server_url("https://ci.example.com");

    let outcome =
        submit_create_server(&mut form, &analytics, &gateway, &gateway, &navigator).await;

    let uuid = match outcome {
        SubmitOutcome::Created { uuid } => uuid,
        other => panic!("expected a created outcome, got {other:?}"),
    };

    match msg_rx.recv().await {
        Some(Message::Navigate { path }) => assert_eq!(path, format!("/connect/{uuid}")),
        other => panic!("expected navigation, got {other:?}"),
    }
}
