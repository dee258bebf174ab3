pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::geocoder::HttpGeocoder;
pub use adapters::storage::{InMemoryProfileStore, JsonProfileStore, LocalStorage};
pub use app::{build_service, LocalProfileService};
pub use config::TomlConfig;
pub use core::profile::{ProfileService, SubmitOutcome};
pub use core::validator::FieldValidator;
pub use utils::error::{ProfileError, Result};
