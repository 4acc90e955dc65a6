//! Sign-in form controller.
//!
//! Drives the self-hosted login page: the email/password submission and
//! the forgot-password sub-flow, rendered onto the page surface. The form
//! lifecycle states live in the domain ([`SignInPhase`], [`ResetPhase`]);
//! this controller guards every move through [`StateMachine`], so a
//! double submit or an out-of-order click is simply ignored.
//!
//! If the sign-in form control is absent from the current page the whole
//! controller silently disables itself.

use std::sync::Arc;

use crate::domain::foundation::StateMachine;
use crate::domain::signin::{FormMode, ResetPhase, SignInPhase};
use crate::ports::{Control, LoginCredentials, PageSurface, TokenService, TokenStore};

/// Controller for the self-hosted sign-in page.
pub struct SignInForm {
    surface: Arc<dyn PageSurface>,
    token_service: Arc<dyn TokenService>,
    token_store: Arc<dyn TokenStore>,
    success_redirect: String,
    mode: FormMode,
    phase: SignInPhase,
    reset: ResetPhase,
}

impl SignInForm {
    pub fn new(
        surface: Arc<dyn PageSurface>,
        token_service: Arc<dyn TokenService>,
        token_store: Arc<dyn TokenStore>,
        success_redirect: impl Into<String>,
    ) -> Self {
        Self {
            surface,
            token_service,
            token_store,
            success_redirect: success_redirect.into(),
            mode: FormMode::default(),
            phase: SignInPhase::default(),
            reset: ResetPhase::default(),
        }
    }

    /// Returns true if the current page carries the sign-in form at all.
    pub fn is_available(&self) -> bool {
        self.surface.has_control(Control::SignInForm)
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn phase(&self) -> SignInPhase {
        self.phase
    }

    pub fn reset_phase(&self) -> ResetPhase {
        self.reset
    }

    /// Initial render: the sign-in face, idle.
    pub fn render(&self) {
        if !self.is_available() {
            return;
        }
        self.show_sign_in_face();
        self.surface.set_visible(Control::LoadingIndicator, false);
        self.surface.set_visible(Control::ErrorMessage, false);
        self.surface.set_visible(Control::ConfirmationMessage, false);
    }

    /// Credential submission.
    ///
    /// Validation failures and server rejections render into the error
    /// area and leave the form ready for another attempt; nothing is
    /// written to the token store on any failure path. Success persists
    /// the record and navigates away.
    pub async fn submit(&mut self, email: &str, password: &str) {
        if !self.is_available() {
            return;
        }
        let Ok(next) = self.phase.transition_to(SignInPhase::Submitting) else {
            // Already submitting or already succeeded.
            return;
        };

        let credentials = match LoginCredentials::new(email, password) {
            Ok(credentials) => credentials,
            Err(error) => {
                self.show_error(&error.user_message());
                return;
            }
        };

        self.phase = next;
        self.surface.set_visible(Control::ErrorMessage, false);
        self.surface.set_visible(Control::SignInForm, false);
        self.surface.set_visible(Control::LoadingIndicator, true);

        match self.token_service.login(credentials).await {
            Ok(record) => {
                if let Err(error) = self.token_store.save(&record) {
                    // The session resolver falls back to the provider on
                    // the next load, so the login still goes through.
                    tracing::warn!(error = %error, "Failed to persist token record after login");
                }
                if let Ok(done) = self.phase.transition_to(SignInPhase::Succeeded) {
                    self.phase = done;
                }
                self.surface.navigate(&self.success_redirect);
            }
            Err(error) => {
                tracing::warn!(error = %error, "Login failed");
                if let Ok(back) = self.phase.transition_to(SignInPhase::Idle) {
                    self.phase = back;
                }
                self.surface.set_visible(Control::LoadingIndicator, false);
                self.surface.set_visible(Control::SignInForm, true);
                self.show_error(&error.user_message());
            }
        }
    }

    /// Forgot-password link: swap to the reset face.
    pub fn show_forgot_password(&mut self) {
        if !self.is_available() || self.mode == FormMode::ForgotPassword {
            return;
        }
        self.mode = FormMode::ForgotPassword;
        self.surface.set_visible(Control::ErrorMessage, false);
        self.show_forgot_password_face();
    }

    /// Back-to-sign-in link: swap back to the credential face.
    ///
    /// A confirmed reset stays confirmed; only a failed or idle reset
    /// flow is abandoned.
    pub fn back_to_sign_in(&mut self) {
        if !self.is_available() || self.mode == FormMode::SignIn {
            return;
        }
        self.mode = FormMode::SignIn;
        if self.reset != ResetPhase::Confirmed {
            self.reset = ResetPhase::Idle;
        }
        self.surface.set_visible(Control::ErrorMessage, false);
        self.show_sign_in_face();
    }

    /// Password-reset request for the forgot-password face.
    pub async fn request_password_reset(&mut self, email: &str) {
        if !self.is_available() {
            return;
        }
        let Ok(next) = self.reset.transition_to(ResetPhase::Resetting) else {
            return;
        };

        if email.trim().is_empty() {
            self.show_error("Please enter your email address.");
            return;
        }

        self.reset = next;
        self.surface.set_visible(Control::ErrorMessage, false);
        self.surface.set_visible(Control::LoadingIndicator, true);

        match self.token_service.forgot_password(email).await {
            Ok(message) => {
                if let Ok(done) = self.reset.transition_to(ResetPhase::Confirmed) {
                    self.reset = done;
                }
                self.surface.set_visible(Control::LoadingIndicator, false);
                self.surface.set_visible(Control::ForgotPasswordForm, false);
                self.surface.set_text(Control::ConfirmationMessage, &message);
                self.surface.set_visible(Control::ConfirmationMessage, true);
            }
            Err(error) => {
                tracing::warn!(error = %error, "Password reset request failed");
                if let Ok(failed) = self.reset.transition_to(ResetPhase::Failed) {
                    self.reset = failed;
                }
                self.surface.set_visible(Control::LoadingIndicator, false);
                self.show_error(&error.user_message());
            }
        }
    }

    fn show_sign_in_face(&self) {
        self.surface.set_visible(Control::ForgotPasswordForm, false);
        self.surface.set_visible(Control::BackToSignIn, false);
        self.surface.set_visible(Control::SignInForm, true);
        self.surface.set_visible(Control::EmailField, true);
        self.surface.set_visible(Control::PasswordField, true);
        self.surface.set_visible(Control::GoogleSsoButton, true);
        self.surface.set_visible(Control::ForgotPasswordLink, true);
    }

    fn show_forgot_password_face(&self) {
        self.surface.set_visible(Control::SignInForm, false);
        self.surface.set_visible(Control::PasswordField, false);
        self.surface.set_visible(Control::GoogleSsoButton, false);
        self.surface.set_visible(Control::ForgotPasswordLink, false);
        self.surface.set_visible(Control::ForgotPasswordForm, true);
        self.surface.set_visible(Control::BackToSignIn, true);
    }

    fn show_error(&self, message: &str) {
        self.surface.set_text(Control::ErrorMessage, message);
        self.surface.set_visible(Control::ErrorMessage, true);
    }
}
