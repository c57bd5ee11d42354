//! Setup-guide instruction derivation
//!
//! Decides what a user has to add to their Jenkinsfile for Jira to see
//! build and deployment events, based on the plugin's reported
//! auto-configuration for that event category.

use crate::types::{EventType, JenkinsPluginConfig};

/// Pipeline step inserted into a Jenkinsfile for build events
pub const BUILD_STEP_LABEL: &str = "jiraSendBuildInfo";
/// Pipeline step inserted into a Jenkinsfile for deployment events
pub const DEPLOYMENT_STEP_LABEL: &str = "jiraSendDeploymentInfo";

/// The manual pipeline step for an event category
pub fn pipeline_step_label(event_type: EventType) -> &'static str {
    match event_type {
        EventType::Build => BUILD_STEP_LABEL,
        EventType::Deployment => DEPLOYMENT_STEP_LABEL,
    }
}

/// Which instruction composition the setup guide presents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstructionVariant {
    /// Manual pipeline step, or naming stages to match the configured
    /// pattern. `regex` is the configured stage-name pattern when one
    /// exists; the rendered text falls back to a placeholder otherwise.
    Dual { regex: Option<String> },
    /// Automatic detection covers everything; nothing to add
    NoSetupRequired,
    /// Only the manual pipeline step applies
    ManualOnly,
}

/// Resolve the instruction variant for one event category.
///
/// Deployments with auto-detection enabled always get the dual
/// instructions, pattern or not. Builds with auto-detection but no
/// pattern need no setup at all. Everything else falls back to the
/// manual pipeline step.
pub fn resolve(
    event_type: EventType,
    auto_enabled: bool,
    regex: Option<&str>,
) -> InstructionVariant {
    let has_regex = regex.is_some_and(|r| !r.is_empty());

    if auto_enabled
        && (event_type == EventType::Deployment
            || (event_type == EventType::Build && has_regex))
    {
        InstructionVariant::Dual {
            regex: regex.filter(|r| !r.is_empty()).map(str::to_string),
        }
    } else if event_type == EventType::Build && auto_enabled {
        InstructionVariant::NoSetupRequired
    } else {
        InstructionVariant::ManualOnly
    }
}

impl InstructionVariant {
    /// Render the instruction text shown to the user
    pub fn lines(&self, event_type: EventType) -> Vec<String> {
        let step = pipeline_step_label(event_type);
        match self {
            InstructionVariant::Dual { regex } => vec![
                format!("Add a {step} step to the end of {event_type} stages."),
                "OR".to_string(),
                format!(
                    "Use {} in the names of the {event_type} stages.",
                    regex.as_deref().unwrap_or("<regex>")
                ),
            ],
            InstructionVariant::NoSetupRequired => vec!["No setup required".to_string()],
            InstructionVariant::ManualOnly => {
                vec![format!("Add a {step} step to the end of {event_type} stages.")]
            }
        }
    }
}

/// Instruction variants for both event categories of one server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetUpGuide {
    pub build: InstructionVariant,
    pub deployment: InstructionVariant,
}

impl SetUpGuide {
    /// Derive the guide from a fetched plugin config.
    ///
    /// An absent config means the plugin has reported nothing; both
    /// categories fall back to the manual instructions.
    pub fn for_config(config: Option<&JenkinsPluginConfig>) -> Self {
        match config {
            Some(cfg) => Self {
                build: resolve(
                    EventType::Build,
                    cfg.auto_build_enabled,
                    cfg.auto_build_regex.as_deref(),
                ),
                deployment: resolve(
                    EventType::Deployment,
                    cfg.auto_deployments_enabled,
                    cfg.auto_deployments_regex.as_deref(),
                ),
            },
            None => Self {
                build: InstructionVariant::ManualOnly,
                deployment: InstructionVariant::ManualOnly,
            },
        }
    }
}
