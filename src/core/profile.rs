use crate::core::validator::FieldValidator;
use crate::domain::model::{FieldErrors, ProfileRecord, Session, DEFAULT_COUNTRY_CODE};
use crate::domain::ports::{Geocoder, IdentityProvider, ProfileStore};
use crate::utils::error::{ProfileError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved(ProfileRecord),
    Rejected(FieldErrors),
}

/// The profile form: prefill, validate, persist.
pub struct ProfileService<G: Geocoder, P: ProfileStore, I: IdentityProvider> {
    validator: FieldValidator<G>,
    store: P,
    identity: I,
}

impl<G: Geocoder, P: ProfileStore, I: IdentityProvider> ProfileService<G, P, I> {
    pub fn new(validator: FieldValidator<G>, store: P, identity: I) -> Self {
        Self {
            validator,
            store,
            identity,
        }
    }

    pub fn validator(&self) -> &FieldValidator<G> {
        &self.validator
    }

    pub fn identity(&self) -> &I {
        &self.identity
    }

    async fn require_session(&self) -> Result<Session> {
        self.identity
            .current_session()
            .await?
            .ok_or(ProfileError::NotSignedIn)
    }

    /// Stored profile if there is one, otherwise a form seeded from the session.
    pub async fn load_form(&self) -> Result<ProfileRecord> {
        let session = self.require_session().await?;

        match self.store.load().await? {
            Some(mut record) => {
                tracing::debug!("Loaded stored profile");
                if record.country_code.is_empty() {
                    record.country_code = DEFAULT_COUNTRY_CODE.to_string();
                }
                Ok(record)
            }
            None => {
                tracing::debug!("No stored profile, prefilling from session");
                Ok(ProfileRecord::from_session(&session))
            }
        }
    }

    pub async fn submit(&self, form: ProfileRecord) -> Result<SubmitOutcome> {
        self.require_session().await?;

        let errors = self.validator.validate_fields(&form.address).await;
        if !errors.is_empty() {
            tracing::info!("Profile rejected: {:?}", errors);
            return Ok(SubmitOutcome::Rejected(errors));
        }

        let record = ProfileRecord {
            phone: form.phone.trim().to_string(),
            ..form
        };
        self.store.save(&record).await?;
        tracing::info!("Profile saved: {:?}", record);

        Ok(SubmitOutcome::Saved(record))
    }
}
