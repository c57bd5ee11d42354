//! Navigation collaborator
//!
//! Routing itself is owned by the host; the workflow only asks to go
//! somewhere. The channel-backed implementation forwards the request to
//! the message loop and is a deliberate no-op once the loop is gone, so a
//! registration settling after shutdown never crashes.

use tokio::sync::mpsc;

use jconnect_core::prelude::*;

use crate::message::Message;

/// Build the detail-view route for a registered server
pub fn connect_path(uuid: &str) -> String {
    format!("/connect/{uuid}")
}

/// Requests navigation to a route
#[trait_variant::make(Navigator: Send)]
pub trait LocalNavigator {
    async fn go_to(&self, path: &str) -> Result<()>;
}

/// Routes navigation through the message loop
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    tx: mpsc::Sender<Message>,
}

impl ChannelNavigator {
    pub fn new(tx: mpsc::Sender<Message>) -> Self {
        Self { tx }
    }
}

impl Navigator for ChannelNavigator {
    async fn go_to(&self, path: &str) -> Result<()> {
        // Loop already gone means there is nothing left to navigate.
        let _ = self
            .tx
            .send(Message::Navigate {
                path: path.to_string(),
            })
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_path() {
        assert_eq!(connect_path("abc-123"), "/connect/abc-123");
    }

    #[tokio::test]
    async fn test_navigator_sends_navigate_message() {
        let (tx, mut rx) = mpsc::channel(8);
        let navigator = ChannelNavigator::new(tx);

        Navigator::go_to(&navigator, "/connect/abc").await.unwrap();

        match rx.recv().await {
            Some(Message::Navigate { path }) => assert_eq!(path, "/connect/abc"),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_navigator_is_noop_after_loop_shutdown() {
        let (tx, rx) = mpsc::channel(8);
        drop(rx);
        let navigator = ChannelNavigator::new(tx);

        // Must not error even though nobody is listening.
        assert!(Navigator::go_to(&navigator, "/connect/abc").await.is_ok());
    }
}
