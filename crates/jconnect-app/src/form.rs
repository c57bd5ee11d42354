//! Create-server form state
//!
//! One inline error slot is shared by both fields, like the form it
//! models: the most recent validation failure wins, and editing either
//! field clears it.

use jconnect_core::validation::{self, messages};

/// State of the create-server form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateServerForm {
    pub server_name: String,
    pub server_url: String,
    pub has_error: bool,
    pub error_message: String,
    /// A registration is in flight; submits are ignored until it settles
    pub is_loading: bool,
}

impl CreateServerForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the name field. Editing clears any standing error.
    pub fn set_server_name(&mut self, name: impl Into<String>) {
        self.server_name = name.into();
        self.clear_error();
    }

    /// Update the URL field. Editing clears any standing error.
    pub fn set_server_url(&mut self, url: impl Into<String>) {
        self.server_url = url.into();
        self.clear_error();
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.has_error = true;
        self.error_message = message.into();
    }

    pub fn clear_error(&mut self) {
        self.has_error = false;
        self.error_message.clear();
    }

    /// Validate the URL field, setting the inline error on failure.
    pub fn validate_server_url(&mut self) -> bool {
        if validation::is_valid_server_url(&self.server_url) {
            self.clear_error();
            true
        } else {
            self.set_error(messages::INVALID_URL);
            false
        }
    }

    /// Validate the name field against the centralized policy.
    pub fn validate_server_name(&mut self) -> bool {
        match validation::server_name_error(&self.server_name) {
            None => {
                self.clear_error();
                true
            }
            Some(message) => {
                self.set_error(message);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_form_is_clean() {
        let form = CreateServerForm::new();
        assert!(!form.has_error);
        assert!(!form.is_loading);
        assert!(form.server_name.is_empty());
        assert!(form.server_url.is_empty());
    }

    #[test]
    fn test_invalid_url_sets_inline_error() {
        let mut form = CreateServerForm::new();
        form.set_server_url("not a url");

        assert!(!form.validate_server_url());
        assert!(form.has_error);
        assert_eq!(form.error_message, messages::INVALID_URL);
    }

    #[test]
    fn test_error_persists_until_edit() {
        let mut form = CreateServerForm::new();
        form.set_server_url("not a url");
        form.validate_server_url();
        assert!(form.has_error);

        form.set_server_url("https://ci.example.com");
        assert!(!form.has_error);
        assert!(form.error_message.is_empty());
    }

    #[test]
    fn test_error_clears_on_successful_revalidation() {
        let mut form = CreateServerForm::new();
        form.set_server_url("not a url");
        form.validate_server_url();
        assert!(form.has_error);

        form.server_url = "https://ci.example.com".to_string();
        assert!(form.validate_server_url());
        assert!(!form.has_error);
    }

    #[test]
    fn test_empty_name_sets_inline_error() {
        let mut form = CreateServerForm::new();

        assert!(!form.validate_server_name());
        assert!(form.has_error);
        assert_eq!(form.error_message, messages::EMPTY_NAME);
    }

    #[test]
    fn test_editing_name_clears_error() {
        let mut form = CreateServerForm::new();
        form.validate_server_name();
        assert!(form.has_error);

        form.set_server_name("Build server");
        assert!(!form.has_error);
        assert!(form.validate_server_name());
    }
}
