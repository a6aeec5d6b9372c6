//! Identity provider trait and the token-backed provider used by the CLI

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::model::Profile;

/// Opaque bearer credential issued by the identity provider
#[derive(Clone, PartialEq, Eq)]
pub struct IdToken(String);

impl IdToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for IdToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("IdToken(<redacted>)")
    }
}

/// Result of a sign-in: the token plus the profile, if the provider has one
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub token: IdToken,
    pub profile: Option<Profile>,
}

impl Identity {
    /// Build an identity from an ID token, reading the profile from its claims
    pub fn from_token(token: impl Into<String>) -> Self {
        let token = IdToken::new(token);
        let profile = decode_profile(token.as_str());
        Self { token, profile }
    }
}

/// Abstraction over the sign-in widget
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait IdentityProvider: Send + Sync {
    /// Whether the provider can be used at all
    fn is_available(&self) -> bool;

    /// The identity of the currently signed-in user, if any
    async fn current_identity(&self) -> crate::Result<Option<Identity>>;

    /// Exchange a credential collected from the user for an identity
    async fn sign_in(&self, credential: &str) -> crate::Result<Identity>;

    /// Prompt for an account and return the chosen identity
    async fn select_account(&self) -> crate::Result<Identity>;

    /// Sign the current user out of the provider
    async fn sign_out(&self) -> crate::Result<()>;
}

/// The subset of ID token claims shown on the dashboard
#[derive(Debug, Deserialize)]
struct ProfileClaims {
    sub: Option<String>,
    name: Option<String>,
    picture: Option<String>,
    email: Option<String>,
}

/// Decode the profile from a JWT payload without verifying the signature.
///
/// Returns `None` when the token is not a JWT or carries no subject.
pub fn decode_profile(token: &str) -> Option<Profile> {
    let payload = token.split('.').nth(1)?;
    let bytes = match URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("Malformed token payload: {}", e);
            return None;
        }
    };
    let claims: ProfileClaims = match serde_json::from_slice(&bytes) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("Token payload is not a claims object: {}", e);
            return None;
        }
    };

    let id = claims.sub?;
    let name = claims
        .name
        .or_else(|| claims.email.clone())
        .unwrap_or_else(|| id.clone());

    Some(Profile {
        id,
        name,
        image_url: claims.picture,
        email: claims.email,
    })
}

/// Identity provider backed by a pre-issued ID token
pub struct TokenIdentityProvider {
    client_id: String,
    token: RwLock<Option<IdToken>>,
}

impl std::fmt::Debug for TokenIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIdentityProvider")
            .field("client_id", &self.client_id)
            .finish()
    }
}

impl TokenIdentityProvider {
    pub fn new(client_id: impl Into<String>, token: Option<String>) -> Self {
        let client_id = client_id.into();
        tracing::debug!(
            "Created TokenIdentityProvider for client '{}' (token supplied: {})",
            client_id,
            token.is_some()
        );
        Self {
            client_id,
            token: RwLock::new(token.map(IdToken::new)),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

#[async_trait]
impl IdentityProvider for TokenIdentityProvider {
    fn is_available(&self) -> bool {
        true
    }

    async fn current_identity(&self) -> crate::Result<Option<Identity>> {
        let token = self.token.read().await;
        Ok(token.as_ref().map(|t| Identity::from_token(t.as_str())))
    }

    async fn sign_in(&self, credential: &str) -> crate::Result<Identity> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(crate::DashboardError::Identity(
                "an ID token is required to sign in".to_string(),
            ));
        }
        let token = IdToken::new(credential);
        let identity = Identity::from_token(token.as_str());
        *self.token.write().await = Some(token);
        Ok(identity)
    }

    async fn select_account(&self) -> crate::Result<Identity> {
        self.current_identity().await?.ok_or_else(|| {
            crate::DashboardError::Identity(
                "no ID token available; pass --token or set TIMELAPSE_ID_TOKEN".to_string(),
            )
        })
    }

    async fn sign_out(&self) -> crate::Result<()> {
        self.token.write().await.take();
        tracing::debug!("Forgot ID token for client '{}'", self.client_id);
        Ok(())
    }
}
