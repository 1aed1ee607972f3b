//! Session management
//!
//! A session is a connected store handle for one profile. The manager is the
//! sole owner of that handle; commands borrow it only after a fresh probe.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::profile::Profile;
use crate::traits::ObjectStore;

/// Builds store clients from credentials
#[async_trait]
pub trait Connector: Send + Sync {
    /// Construct a store client for `profile` without contacting the store
    async fn connect(&self, profile: &Profile) -> Result<Arc<dyn ObjectStore>>;
}

/// An established session
struct Session {
    profile: String,
    store: Arc<dyn ObjectStore>,
}

/// Owns the active session, if any
pub struct SessionManager {
    connector: Arc<dyn Connector>,
    session: Option<Session>,
}

impl SessionManager {
    /// Create a logged-out manager
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector,
            session: None,
        }
    }

    /// Whether a session is held
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Drop the current session, if any
    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(profile = %session.profile, "session closed");
        }
    }

    /// Open a session for `profile`
    ///
    /// Any existing session is discarded first, so a failed login always
    /// leaves the manager logged out.
    pub async fn login(&mut self, profile: &Profile) -> Result<()> {
        self.logout();

        let store = self.connector.connect(profile).await.map_err(|e| {
            Error::Auth(format!(
                "Login failed - credentials for profile '{}' are invalid: {e}",
                profile.name
            ))
        })?;

        if let Err(e) = store.probe().await {
            tracing::warn!(profile = %profile.name, error = %e, "login probe failed");
            return Err(Error::Auth(format!(
                "Session failure - credentials for profile '{}' are invalid, expired, or cannot list buckets: {e}",
                profile.name
            )));
        }

        tracing::info!(profile = %profile.name, "session established");
        self.session = Some(Session {
            profile: profile.name.clone(),
            store,
        });
        Ok(())
    }

    /// Re-probe the session right before a gated command
    ///
    /// Returns the store handle on success. A failed probe discards the
    /// session.
    pub async fn validate(&mut self) -> Result<Arc<dyn ObjectStore>> {
        let store = self.store()?;

        if let Err(e) = store.probe().await {
            tracing::warn!(error = %e, "session probe failed, logging out");
            self.session = None;
            return Err(Error::SessionExpired(
                "credentials expired or revoked, please login again to continue.".into(),
            ));
        }

        Ok(store)
    }

    /// The store handle without re-probing
    pub fn store(&self) -> Result<Arc<dyn ObjectStore>> {
        self.session
            .as_ref()
            .map(|s| Arc::clone(&s.store))
            .ok_or_else(|| Error::Auth("Must login first.".into()))
    }
}
