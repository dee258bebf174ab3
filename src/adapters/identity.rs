use crate::domain::model::Session;
use crate::domain::ports::{IdentityProvider, Storage};
use crate::utils::error::{ProfileError, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Storage key of the session; profile keys must not reuse it.
pub const SESSION_KEY: &str = "session";
const SESSION_FILE: &str = "session.json";

/// Who to sign in as. Stands in for the account picked at the external provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl Identity {
    fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.email.is_none()
    }
}

/// Session persisted through a [`Storage`], so it survives between CLI invocations.
pub struct StoredSessionProvider<S: Storage> {
    storage: S,
    identity: Option<Identity>,
}

impl<S: Storage> StoredSessionProvider<S> {
    pub fn new(storage: S, identity: Option<Identity>) -> Self {
        Self { storage, identity }
    }
}

#[async_trait]
impl<S: Storage> IdentityProvider for StoredSessionProvider<S> {
    async fn current_session(&self) -> Result<Option<Session>> {
        let data = match self.storage.read_file(SESSION_FILE).await {
            Ok(data) => data,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };
        Ok(Some(serde_json::from_slice(&data)?))
    }

    async fn begin_sign_in(&self) -> Result<Session> {
        let identity = match &self.identity {
            Some(identity) if !identity.is_empty() => identity,
            _ => {
                return Err(ProfileError::SignInFailed {
                    message: "no identity configured".to_string(),
                })
            }
        };

        let session = Session {
            display_name: identity.display_name.clone(),
            email: identity.email.clone(),
            signed_in_at: Utc::now(),
        };
        self.storage
            .write_file(SESSION_FILE, &serde_json::to_vec_pretty(&session)?)
            .await?;
        tracing::info!("Signed in as {:?}", session.email);

        Ok(session)
    }

    async fn end_sign_in(&self) -> Result<()> {
        self.storage.delete_file(SESSION_FILE).await?;
        tracing::info!("Signed out");
        Ok(())
    }
}
