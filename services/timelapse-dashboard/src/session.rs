//! Session state held by the controller for the lifetime of the page

use crate::identity::IdToken;
use crate::model::Profile;

/// Whether a user is signed in
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    SignedOut,
    SignedIn { token: IdToken, profile: Profile },
}

/// Owner of the bearer token. Never persisted.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.state, SessionState::SignedIn { .. })
    }

    pub fn token(&self) -> Option<&IdToken> {
        match &self.state {
            SessionState::SignedIn { token, .. } => Some(token),
            SessionState::SignedOut => None,
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        match &self.state {
            SessionState::SignedIn { profile, .. } => Some(profile),
            SessionState::SignedOut => None,
        }
    }

    /// Enter `SignedIn`, replacing any previous account
    pub fn sign_in(&mut self, token: IdToken, profile: Profile) {
        if self.is_signed_in() {
            tracing::debug!("Replacing signed-in account with '{}'", profile.id);
        }
        self.state = SessionState::SignedIn { token, profile };
    }

    /// Enter `SignedOut`, dropping the token
    pub fn sign_out(&mut self) {
        self.state = SessionState::SignedOut;
    }
}
