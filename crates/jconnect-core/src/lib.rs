//! # jconnect-core - Core Domain Types
//!
//! Foundation crate for Jenkins Connect. Provides the domain model for
//! registered Jenkins servers, input validation, connection-status
//! classification, and setup-guide instruction derivation.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (serde, chrono, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`JenkinsServer`] - A registered server record with its pipeline history
//! - [`PipelineEvent`] - Most recent event summary for one pipeline
//! - [`EventType`], [`EventStatus`] - Event category and outcome
//! - [`JenkinsPluginConfig`] - The plugin's reported auto-configuration
//! - [`HandshakeStatus`] - Result of the plugin's registration callback
//!
//! ### Validation (`validation`)
//! - [`is_valid_server_url()`] - URL/IP grammar check for the create form
//! - [`server_name_error()`] - Centralized display-name policy
//!
//! ### Connection Status (`connection`)
//! - [`classify()`] - Raw fetch signals to a [`ConnectionPanel`] decision
//!
//! ### Setup Guide (`setup_guide`)
//! - [`resolve()`] - Auto-config to an [`InstructionVariant`] per category
//! - [`SetUpGuide`] - Both categories derived from one plugin config
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with recoverability classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use jconnect_core::prelude::*;
//! ```

pub mod connection;
pub mod error;
pub mod logging;
pub mod setup_guide;
pub mod types;
pub mod validation;

/// Prelude for common imports used throughout all Jenkins Connect crates
pub mod prelude {
    pub use super::error::{Error, Result};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use connection::{classify, ConnectedState, ConnectionPanel};
pub use error::{Error, Result};
pub use setup_guide::{
    pipeline_step_label, resolve, InstructionVariant, SetUpGuide, BUILD_STEP_LABEL,
    DEPLOYMENT_STEP_LABEL,
};
pub use types::{
    EventStatus, EventType, HandshakeStatus, JenkinsPluginConfig, JenkinsServer, PipelineEvent,
};
pub use validation::{is_valid_server_url, server_name_error, SERVER_NAME_MAX_LENGTH};
