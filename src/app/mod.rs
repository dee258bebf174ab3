// Application layer: wires the adapters into the profile service.

use crate::adapters::geocoder::HttpGeocoder;
use crate::adapters::identity::StoredSessionProvider;
use crate::adapters::storage::{JsonProfileStore, LocalStorage};
use crate::config::toml_config::TomlConfig;
use crate::core::profile::ProfileService;
use crate::core::validator::FieldValidator;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

pub type LocalProfileService = ProfileService<
    HttpGeocoder,
    JsonProfileStore<LocalStorage>,
    StoredSessionProvider<LocalStorage>,
>;

/// Validates `config` and builds a service storing everything under its data dir.
pub fn build_service(config: &TomlConfig) -> Result<LocalProfileService> {
    config.validate()?;

    let geocoder = HttpGeocoder::from_config(config)?;
    let validator = FieldValidator::new(geocoder, config.zone()?);

    let storage = LocalStorage::new(config.data_dir());
    let store = JsonProfileStore::new(storage.clone(), config.profile_key());
    let identity = StoredSessionProvider::new(storage, config.identity());

    tracing::debug!(
        "Profile service ready: data_dir={}, geocoder={}",
        config.data_dir(),
        config.geocoder_base_url()
    );
    Ok(ProfileService::new(validator, store, identity))
}
