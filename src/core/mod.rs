pub mod geo;
pub mod profile;
pub mod validator;

pub use crate::domain::model::{
    Coordinate, FieldErrors, Geocoded, ProfileRecord, RejectReason, Session, ValidationOutcome,
    Zone,
};
pub use crate::domain::ports::{ConfigProvider, Geocoder, IdentityProvider, ProfileStore, Storage};
pub use crate::utils::error::Result;
