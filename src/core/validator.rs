use crate::core::geo;
use crate::domain::model::{
    FieldError, FieldErrors, Geocoded, RejectReason, ValidationOutcome, Zone, ADDRESS_FIELD,
};
use crate::domain::ports::Geocoder;

/// Combines the "required" and "proximity" policies for the address field.
///
/// Name, phone and birth date are not checked here.
pub struct FieldValidator<G: Geocoder> {
    geocoder: G,
    zone: Zone,
}

impl<G: Geocoder> FieldValidator<G> {
    pub fn new(geocoder: G, zone: Zone) -> Self {
        Self { geocoder, zone }
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    /// Geocodes `address` and checks it against the zone.
    pub async fn check_address(&self, address: &str) -> ValidationOutcome {
        let candidate = match self.geocoder.resolve(address).await {
            Geocoded::Found(coordinate) => coordinate,
            Geocoded::NotFound => {
                tracing::debug!("No coordinate for address {:?}", address);
                return ValidationOutcome::Rejected(RejectReason::NotFound);
            }
        };

        let distance_km = geo::distance(&candidate, &self.zone.center);
        tracing::debug!(
            "Address {:?} resolved to {}, {:.2} km from {}",
            address,
            candidate,
            distance_km,
            self.zone.name
        );

        if geo::is_within_radius(&candidate, &self.zone.center, self.zone.radius_km) {
            ValidationOutcome::Accepted
        } else {
            ValidationOutcome::Rejected(RejectReason::TooFar)
        }
    }

    /// Field name to message; empty when the address passes.
    pub async fn validate_fields(&self, address: &str) -> FieldErrors {
        let mut errors = FieldErrors::new();

        let error = if address.trim().is_empty() {
            Some(FieldError::RequiredFieldMissing)
        } else {
            match self.check_address(address).await {
                ValidationOutcome::Accepted => None,
                ValidationOutcome::Rejected(reason) => Some(FieldError::from(reason)),
            }
        };

        if let Some(error) = error {
            errors.insert(ADDRESS_FIELD.to_string(), error.message("Address", &self.zone));
        }

        errors
    }
}
