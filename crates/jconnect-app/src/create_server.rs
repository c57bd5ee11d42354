//! Server registration workflow
//!
//! One strictly ordered async sequence per submission: button analytics,
//! validation, secret issuance, remote creation, navigation. Collaborator
//! failures are recovered here; the workflow itself never returns an
//! error, only an outcome.

use serde_json::json;
use uuid::Uuid;

use jconnect_core::prelude::*;
use jconnect_core::types::JenkinsServer;

use crate::analytics::{events, AnalyticsClient, AnalyticsEventType};
use crate::form::CreateServerForm;
use crate::gateway::{SecretIssuer, ServerGateway};
use crate::navigation::{connect_path, Navigator};

/// Outcome of one submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Server registered; navigation to its detail view was requested
    Created { uuid: String },
    /// A field failed validation; the inline error explains why
    Rejected,
    /// Secret issuance or remote creation failed; the form keeps its
    /// values and stays editable for a retry
    Failed { message: String },
    /// A submission is already in flight; this one did nothing
    InFlight,
}

/// Run the create-server submission.
///
/// The caller hands over the form for the duration of the attempt. On
/// success the form stays in loading state: navigating away from it is
/// the cleanup. On failure loading is cleared and the field values are
/// untouched.
pub async fn submit_create_server<A, S, G, N>(
    form: &mut CreateServerForm,
    analytics: &A,
    secrets: &S,
    gateway: &G,
    navigator: &N,
) -> SubmitOutcome
where
    A: AnalyticsClient + Sync,
    S: SecretIssuer + Sync,
    G: ServerGateway + Sync,
    N: Navigator + Sync,
{
    if form.is_loading {
        return SubmitOutcome::InFlight;
    }

    send_event(
        analytics,
        AnalyticsEventType::Ui,
        events::CREATE_SERVER_CLICKED,
        json!({
            "source": events::CREATE_SERVER_SCREEN,
            "action": "clicked Create",
            "actionSubject": "button",
        }),
    )
    .await;

    if !form.validate_server_url() {
        send_event(
            analytics,
            AnalyticsEventType::Track,
            events::URL_VALIDATION_FAILURE,
            json!({
                "source": events::CREATE_SERVER_SCREEN,
                "action": "submitted create server form with URL validation failure",
                "actionSubject": "input-validation",
            }),
        )
        .await;
        return SubmitOutcome::Rejected;
    }

    if !form.validate_server_name() {
        return SubmitOutcome::Rejected;
    }

    form.is_loading = true;
    let uuid = Uuid::new_v4().to_string();

    match register(form, &uuid, secrets, gateway).await {
        Ok(()) => {
            send_event(
                analytics,
                AnalyticsEventType::Track,
                events::CREATE_SERVER_SUCCESS,
                json!({
                    "source": events::CREATE_SERVER_SCREEN,
                    "action": "submitted create server form success",
                    "actionSubject": "form",
                }),
            )
            .await;

            let _ = navigator.go_to(&connect_path(&uuid)).await;

            SubmitOutcome::Created { uuid }
        }
        Err(err) => {
            error!("Create server failed: {err}");

            send_event(
                analytics,
                AnalyticsEventType::Track,
                events::CREATE_SERVER_ERROR,
                json!({
                    "source": events::CREATE_SERVER_SCREEN,
                    "action": "submitted create server form error",
                    "actionSubject": "form",
                    "error": err.to_string(),
                }),
            )
            .await;

            form.is_loading = false;

            SubmitOutcome::Failed {
                message: err.to_string(),
            }
        }
    }
}

/// Issue a secret and persist the record. Both failure sources funnel
/// through the one recovery path in the caller.
async fn register<S, G>(
    form: &CreateServerForm,
    uuid: &str,
    secrets: &S,
    gateway: &G,
) -> Result<()>
where
    S: SecretIssuer + Sync,
    G: ServerGateway + Sync,
{
    let secret = secrets.generate_secret().await?;

    let server = JenkinsServer {
        uuid: uuid.to_string(),
        name: form.server_name.clone(),
        url: form.server_url.clone(),
        secret,
        pipelines: Vec::new(),
    };

    gateway.create_server(&server).await
}

/// Await an analytics send for ordering only; a refused event must not
/// abort the submission.
async fn send_event<A>(
    analytics: &A,
    event_type: AnalyticsEventType,
    name: &str,
    attributes: serde_json::Value,
) where
    A: AnalyticsClient + Sync,
{
    if let Err(err) = analytics.send_event(event_type, name, attributes).await {
        warn!("Analytics send failed for {name}: {err}");
    }
}
