//! Session lifecycle against the identity provider.

use crate::backend::{BackendClient, ClientError};
use ritual_core::Identity;
use tracing::warn;

/// Owns the signed-in identity and the startup resolution flag.
///
/// One instance per process, handed to the app explicitly; nothing else
/// holds session state. `loading` starts true and drops to false exactly
/// once, when [`SessionStore::resolve`] finishes.
pub struct SessionStore {
    client: BackendClient,
    user: Option<Identity>,
    loading: bool,
}

impl SessionStore {
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            user: None,
            loading: true,
        }
    }

    pub fn user(&self) -> Option<&Identity> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Turns a persisted token back into an identity, once per process
    /// start. A token the backend rejects is cleared on the spot. One
    /// attempt, no retries.
    pub async fn resolve(&mut self) {
        if self.client.has_session() {
            match self.client.current_account().await {
                Ok(identity) => self.user = Some(identity),
                Err(err) => {
                    warn!(error = %err, "stored session rejected, clearing it");
                    self.client.clear_session();
                    self.user = None;
                }
            }
        }
        self.loading = false;
    }

    /// Creates the account, then signs in with the same credentials. When
    /// account creation succeeds but the follow-up sign-in fails, the
    /// sign-in error is what surfaces.
    pub async fn sign_up(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        self.client.create_account(email, password).await?;
        self.sign_in(email, password).await
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        self.client.create_session(email, password).await?;
        let identity = self.client.current_account().await?;
        self.user = Some(identity);
        Ok(())
    }

    /// Revokes the remote session best-effort, then clears local state
    /// unconditionally. A failed revocation is logged, never surfaced.
    pub async fn sign_out(&mut self) {
        if self.client.has_session() {
            if let Err(err) = self.client.delete_session().await {
                warn!(error = %err, "failed to revoke the remote session");
            }
        }
        self.client.clear_session();
        self.user = None;
    }
}
