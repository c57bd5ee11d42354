//! # jconnect-app - Application Orchestration
//!
//! The TEA-pattern application layer for Jenkins Connect: messages, state,
//! the update function, and the create-server registration workflow with
//! its collaborator traits.
//!
//! ## Structure
//!
//! - `message` / `state` / `handler`: the message loop's model and update
//! - `form`: create-server form state and field validation
//! - `create_server`: the submission workflow
//! - `analytics`: event definitions and the analytics client trait
//! - `gateway`: secret issuance and server CRUD over the host bridge
//! - `navigation`: route requests back into the message loop

pub mod analytics;
pub mod create_server;
pub mod form;
pub mod gateway;
pub mod handler;
pub mod message;
pub mod navigation;
pub mod state;

// Re-export the main entry points
pub use create_server::{submit_create_server, SubmitOutcome};
pub use form::CreateServerForm;
pub use handler::{update, UpdateAction, UpdateResult};
pub use message::Message;
pub use state::AppState;
