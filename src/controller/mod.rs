//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input
//! and coordinates between the model and view. It is organized into
//! submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `modals`: Modal form input and submission
//! - `playback`: Playback control methods
//! - `navigation`: Library/playlist/search navigation

mod input;
mod modals;
mod navigation;
mod playback;

use std::sync::Arc;

use crate::model::{AppModel, AuthError};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<AppModel>,
}

impl AppController {
    pub fn new(model: Arc<AppModel>) -> Self {
        Self { model }
    }

    /// Message shown when a failed login pushed the attempt counter over
    /// the warning threshold.
    pub(crate) fn login_error_message(error: &AuthError, attempts: u32) -> String {
        if *error == AuthError::InvalidCredentials && attempts >= 3 {
            "Too many failed login attempts. Try again later or reset your password.".to_string()
        } else {
            error.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_message_escalates_after_third_failure() {
        let e = AuthError::InvalidCredentials;
        assert_eq!(
            AppController::login_error_message(&e, 1),
            e.to_string()
        );
        assert!(AppController::login_error_message(&e, 3).contains("Too many"));
    }
}
