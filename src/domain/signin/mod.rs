//! Sign-in form lifecycle states.
//!
//! The self-hosted login page runs two small state machines: one for the
//! credential submission itself and one for the parallel password-reset
//! sub-flow reached through the "forgot password" toggle. The surface
//! controller renders exactly one control set per state, so the legal
//! edges are defined here and enforced through [`StateMachine`].

use crate::domain::foundation::StateMachine;

/// Which face of the login page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    /// The email/password sign-in form.
    #[default]
    SignIn,
    /// The forgot-password form.
    ForgotPassword,
}

/// Lifecycle of a credential submission.
///
/// Failure returns to `Idle` with the server error rendered; success is
/// terminal because the page redirects immediately afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignInPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
}

impl StateMachine for SignInPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SignInPhase::*;
        matches!(
            (self, target),
            (Idle, Submitting) | (Submitting, Succeeded) | (Submitting, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SignInPhase::*;
        match self {
            Idle => vec![Submitting],
            Submitting => vec![Succeeded, Idle],
            Succeeded => vec![],
        }
    }
}

/// Lifecycle of a password-reset request.
///
/// `Failed` allows a retry; `Confirmed` is terminal (the confirmation
/// message replaces the form).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetPhase {
    #[default]
    Idle,
    Resetting,
    Confirmed,
    Failed,
}

impl StateMachine for ResetPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ResetPhase::*;
        matches!(
            (self, target),
            (Idle, Resetting)
                | (Resetting, Confirmed)
                | (Resetting, Failed)
                | (Failed, Resetting)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ResetPhase::*;
        match self {
            Idle => vec![Resetting],
            Resetting => vec![Confirmed, Failed],
            Failed => vec![Resetting],
            Confirmed => vec![],
        }
    }
}
