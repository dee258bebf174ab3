use crate::utils::error::{ProfileError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_COUNTRY_CODE: &str = "+216";
pub const ADDRESS_FIELD: &str = "address";

/// A point on the globe in degrees. Only constructible through [`Coordinate::new`],
/// so latitude and longitude are always in range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

/// Center of the default allowed zone.
pub const PARIS: Coordinate = Coordinate {
    lat: 48.8566,
    lng: 2.3522,
};

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        let reason = if !lat.is_finite() || !lng.is_finite() {
            Some("values must be finite")
        } else if !(-90.0..=90.0).contains(&lat) {
            Some("latitude out of range")
        } else if !(-180.0..=180.0).contains(&lng) {
            Some("longitude out of range")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ProfileError::InvalidCoordinate {
                latitude: lat,
                longitude: lng,
                reason: reason.to_string(),
            }),
            None => Ok(Self { lat, lng }),
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lng)
    }
}

/// Result of a geocoding lookup. Transport and parsing failures collapse into `NotFound`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geocoded {
    Found(Coordinate),
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NotFound,
    TooFar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted,
    Rejected(RejectReason),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted)
    }
}

/// Reference point, its display name and the accepted radius around it.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub name: String,
    pub center: Coordinate,
    pub radius_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    RequiredFieldMissing,
    AddressNotFound,
    AddressTooFar,
}

impl FieldError {
    pub fn message(&self, label: &str, zone: &Zone) -> String {
        match self {
            FieldError::RequiredFieldMissing => format!("{} is required", label),
            // both address failures read the same to the user
            FieldError::AddressNotFound | FieldError::AddressTooFar => format!(
                "The address must be within {} km of {}.",
                zone.radius_km, zone.name
            ),
        }
    }
}

impl From<RejectReason> for FieldError {
    fn from(reason: RejectReason) -> Self {
        match reason {
            RejectReason::NotFound => FieldError::AddressNotFound,
            RejectReason::TooFar => FieldError::AddressTooFar,
        }
    }
}

/// Field name to human-readable message. Empty means the form is valid.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birth_date: String,
    pub address: String,
    pub phone: String,
    pub country_code: String,
}

impl ProfileRecord {
    /// Blank form seeded from the signed-in user's identity.
    pub fn from_session(session: &Session) -> Self {
        let (first_name, last_name) = session
            .display_name
            .as_deref()
            .map(split_display_name)
            .unwrap_or_default();

        Self {
            first_name,
            last_name,
            email: session.email.clone().unwrap_or_default(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            ..Self::default()
        }
    }
}

/// "Jean Paul Sartre" -> ("Jean", "Paul Sartre")
pub fn split_display_name(name: &str) -> (String, String) {
    match name.split_once(' ') {
        Some((first, rest)) => (first.to_string(), rest.to_string()),
        None => (name.to_string(), String::new()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub signed_in_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris_zone() -> Zone {
        Zone {
            name: "Paris".to_string(),
            center: Coordinate::new(48.8566, 2.3522).unwrap(),
            radius_km: 50.0,
        }
    }

    #[test]
    fn test_coordinate_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(90.0001, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_field_error_messages() {
        let zone = paris_zone();
        assert_eq!(
            FieldError::RequiredFieldMissing.message("Address", &zone),
            "Address is required"
        );
        assert_eq!(
            FieldError::AddressTooFar.message("Address", &zone),
            "The address must be within 50 km of Paris."
        );
        assert_eq!(
            FieldError::AddressNotFound.message("Address", &zone),
            FieldError::AddressTooFar.message("Address", &zone)
        );
    }

    #[test]
    fn test_split_display_name() {
        assert_eq!(
            split_display_name("Jean Paul Sartre"),
            ("Jean".to_string(), "Paul Sartre".to_string())
        );
        assert_eq!(
            split_display_name("Cher"),
            ("Cher".to_string(), String::new())
        );
    }

    #[test]
    fn test_profile_from_session() {
        let session = Session {
            display_name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            signed_in_at: Utc::now(),
        };
        let record = ProfileRecord::from_session(&session);
        assert_eq!(record.first_name, "Ada");
        assert_eq!(record.last_name, "Lovelace");
        assert_eq!(record.email, "ada@example.com");
        assert_eq!(record.country_code, DEFAULT_COUNTRY_CODE);
        assert!(record.address.is_empty());

        let anonymous = Session {
            display_name: None,
            email: None,
            signed_in_at: Utc::now(),
        };
        let record = ProfileRecord::from_session(&anonymous);
        assert!(record.first_name.is_empty());
        assert!(record.email.is_empty());
    }

    #[test]
    fn test_profile_record_json_shape() {
        let record = ProfileRecord {
            first_name: "Ada".to_string(),
            country_code: "+33".to_string(),
            ..ProfileRecord::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["countryCode"], "+33");
        assert!(json.get("first_name").is_none());

        let partial: ProfileRecord = serde_json::from_str(r#"{"address":"Paris"}"#).unwrap();
        assert_eq!(partial.address, "Paris");
        assert!(partial.country_code.is_empty());
    }
}
