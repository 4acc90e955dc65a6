//! Page surface port.
//!
//! The fixed set of page controls the core mutates, plus navigation and
//! paywall-widget removal. The desktop/mobile login/logout variants are
//! modeled as control pairs so the wiring is iterated, never duplicated.
//!
//! Absence of a control is not an error: [`PageSurface::has_control`] lets
//! callers silently disable a sub-flow whose controls are missing from the
//! current page.

/// The page controls the core knows by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    LoginDesktop,
    LogoutDesktop,
    LoginMobile,
    LogoutMobile,
    ManageSubscription,
    UsernameSlot,

    // Sign-in page controls.
    SignInForm,
    EmailField,
    PasswordField,
    GoogleSsoButton,
    ForgotPasswordLink,
    ForgotPasswordForm,
    BackToSignIn,
    LoadingIndicator,
    ErrorMessage,
    ConfirmationMessage,
}

/// A login/logout control pair for one page variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlPair {
    pub login: Control,
    pub logout: Control,
}

/// The login/logout pairs present on every page (desktop and mobile).
pub fn auth_control_pairs() -> [ControlPair; 2] {
    [
        ControlPair {
            login: Control::LoginDesktop,
            logout: Control::LogoutDesktop,
        },
        ControlPair {
            login: Control::LoginMobile,
            logout: Control::LogoutMobile,
        },
    ]
}

/// Mutation surface of the page.
///
/// Every operation is synchronous and idempotent: applying the same state
/// twice leaves the page unchanged.
pub trait PageSurface: Send + Sync {
    /// Returns true if the control exists on the current page.
    fn has_control(&self, control: Control) -> bool;

    /// Shows or hides a control. A no-op for absent controls.
    fn set_visible(&self, control: Control, visible: bool);

    /// Sets the text content of a control. A no-op for absent controls.
    fn set_text(&self, control: Control, text: &str);

    /// Client-side navigation to the given URL or path.
    fn navigate(&self, url: &str);

    /// Disables the third-party paywall widget and removes its DOM nodes.
    fn remove_paywall_widget(&self);
}
