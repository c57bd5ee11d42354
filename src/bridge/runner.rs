//! Bridge runner - the message loop over stdio
//!
//! Owns the production collaborators and wires them to the TEA update
//! function: stdin commands become messages, update results spawn the
//! registration workflow, state changes go out as NDJSON events.

use std::time::Duration;

use tokio::sync::mpsc;

use jconnect_app::analytics::{
    events, AnalyticsClient, AnalyticsEventType, TracingAnalyticsClient,
};
use jconnect_app::gateway::{BridgeGateway, BridgeResponse};
use jconnect_app::navigation::ChannelNavigator;
use jconnect_app::{submit_create_server, update, AppState, Message, UpdateAction};
use jconnect_core::prelude::*;

use super::{BridgeCommand, UiEvent};

/// Run the bridge event loop until a quit command or stdin closes
pub async fn run(request_timeout: Duration) -> Result<()> {
    info!("Jenkins Connect bridge starting");

    let (msg_tx, mut msg_rx) = mpsc::channel::<Message>(64);
    let (resp_tx, mut resp_rx) = mpsc::unbounded_channel::<BridgeResponse>();
    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();

    // Writer task: outgoing JSON-RPC requests share stdout with UI events,
    // one line each
    tokio::spawn(async move {
        use std::io::Write;

        while let Some(line) = line_rx.recv().await {
            let mut stdout = std::io::stdout().lock();
            if writeln!(stdout, "{line}")
                .and_then(|_| stdout.flush())
                .is_err()
            {
                error!("Failed to write bridge request to stdout");
                break;
            }
        }
    });

    let gateway = BridgeGateway::with_timeout(line_tx, request_timeout);
    let analytics = TracingAnalyticsClient;
    let navigator = ChannelNavigator::new(msg_tx.clone());

    // Stdin reader thread: commands become messages, responses go to the
    // gateway's request tracker
    {
        let msg_tx = msg_tx.clone();
        std::thread::spawn(move || read_stdin_blocking(msg_tx, resp_tx));
    }

    let mut state = AppState::new();
    UiEvent::form_state(&state.form).emit();
    UiEvent::connection_state(state.connection_panel()).emit();

    // The form is on screen as soon as the loop is up.
    if let Err(err) = analytics
        .send_event(
            AnalyticsEventType::Screen,
            events::CREATE_SERVER_SCREEN,
            serde_json::json!({}),
        )
        .await
    {
        warn!("Analytics send failed: {err}");
    }

    loop {
        tokio::select! {
            Some(response) = resp_rx.recv() => {
                if !gateway.handle_response(response).await {
                    warn!("Response for unknown or expired request id");
                }
            }
            message = msg_rx.recv() => {
                let Some(message) = message else {
                    info!("Message channel closed");
                    break;
                };

                process_message(&mut state, message, &msg_tx, &gateway, analytics, &navigator);

                if state.should_quit {
                    info!("Quit requested");
                    break;
                }
            }
        }
    }

    gateway.shutdown().await;
    info!("Jenkins Connect bridge exiting");

    Ok(())
}

/// Run one message (and any follow-ups) through update, dispatch the
/// resulting actions, and emit the state the host renders from.
fn process_message(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    gateway: &BridgeGateway,
    analytics: TracingAnalyticsClient,
    navigator: &ChannelNavigator,
) {
    let mut next = Some(message);

    while let Some(message) = next.take() {
        let settled = match &message {
            Message::CreateServerFinished { outcome, .. } => Some(outcome.clone()),
            _ => None,
        };
        let navigated = match &message {
            Message::Navigate { path } => Some(path.clone()),
            _ => None,
        };
        let config_changed = matches!(&message, Message::PluginConfigFetched { .. });

        let result = update(state, message);

        if let Some(action) = result.action {
            dispatch_action(action, msg_tx, gateway, analytics, navigator);
        }

        UiEvent::form_state(&state.form).emit();
        UiEvent::connection_state(state.connection_panel()).emit();

        if config_changed {
            let guide = state.setup_guide();
            UiEvent::setup_guide(
                guide.build.lines(jconnect_core::EventType::Build),
                guide
                    .deployment
                    .lines(jconnect_core::EventType::Deployment),
            )
            .emit();
        }
        if let Some(outcome) = settled {
            UiEvent::submit_result(&outcome).emit();
        }
        if let Some(path) = navigated {
            UiEvent::navigation(&path).emit();
        }

        next = result.message;
    }
}

/// Spawn the side effect an update asked for
fn dispatch_action(
    action: UpdateAction,
    msg_tx: &mpsc::Sender<Message>,
    gateway: &BridgeGateway,
    analytics: TracingAnalyticsClient,
    navigator: &ChannelNavigator,
) {
    match action {
        UpdateAction::SubmitCreateServer { form } => {
            let gateway = gateway.clone();
            let navigator = navigator.clone();
            let msg_tx = msg_tx.clone();

            tokio::spawn(async move {
                let mut form = form;
                let outcome =
                    submit_create_server(&mut form, &analytics, &gateway, &gateway, &navigator)
                        .await;

                // Loop already gone means nobody is left to render this.
                let _ = msg_tx
                    .send(Message::CreateServerFinished { form, outcome })
                    .await;
            });
        }
    }
}

/// Read NDJSON commands from stdin until EOF or quit
fn read_stdin_blocking(
    msg_tx: mpsc::Sender<Message>,
    resp_tx: mpsc::UnboundedSender<BridgeResponse>,
) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let command = match serde_json::from_str::<BridgeCommand>(trimmed) {
            Ok(command) => command,
            Err(e) => {
                warn!("Unparseable bridge command: {}", e);
                UiEvent::error(format!("unparseable command: {e}")).emit();
                continue;
            }
        };

        let message = match command {
            BridgeCommand::Response { id, result, error } => {
                let response = match error {
                    Some(message) => BridgeResponse::error(id, message),
                    None => BridgeResponse::success(id, result),
                };
                if resp_tx.send(response).is_err() {
                    break;
                }
                continue;
            }
            BridgeCommand::SetServerName { value } => Message::ServerNameChanged(value),
            BridgeCommand::SetServerUrl { value } => Message::ServerUrlChanged(value),
            BridgeCommand::Submit => Message::SubmitCreateServer,
            BridgeCommand::ServerFetched {
                server,
                handshake,
                duplicate,
            } => Message::ServerFetched {
                server,
                handshake,
                duplicate,
            },
            BridgeCommand::ServerFetchFailed { error } => Message::ServerFetchFailed { error },
            BridgeCommand::PluginConfig { config } => Message::PluginConfigFetched { config },
            BridgeCommand::Quit => Message::Quit,
        };

        let quitting = matches!(message, Message::Quit);
        if msg_tx.blocking_send(message).is_err() || quitting {
            break;
        }
    }

    // EOF means the host is gone; shut the loop down behind it.
    let _ = msg_tx.blocking_send(Message::Quit);
    info!("Stdin reader exiting");
}
