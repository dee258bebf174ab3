pub use crate::domain::model::PARIS;
use crate::domain::model::Coordinate;
use crate::utils::error::Result;

/// The Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const DEFAULT_RADIUS_KM: f64 = 50.0;

pub const PARIS_NAME: &str = "Paris";

/// Slack on the radius comparison, in km (one micrometre). Absorbs the
/// last-ulp rounding of the trigonometry so a point built exactly on the
/// circle is not rejected.
pub const RADIUS_TOLERANCE_KM: f64 = 1e-9;

/// Great-circle distance in km (haversine).
pub fn distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let dlat = (b.lat() - a.lat()).to_radians();
    let dlng = (b.lng() - a.lng()).to_radians();

    let h = (dlat / 2.0).sin() * (dlat / 2.0).sin()
        + lat1.cos() * lat2.cos() * (dlng / 2.0).sin() * (dlng / 2.0).sin();
    // rounding can push h just past 1 for antipodal points
    let h = h.min(1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Inclusive: a candidate exactly `radius_km` away is accepted.
pub fn is_within_radius(candidate: &Coordinate, reference: &Coordinate, radius_km: f64) -> bool {
    distance(candidate, reference) <= radius_km + RADIUS_TOLERANCE_KM
}

/// Point reached by travelling `distance_km` from `origin` along the initial
/// `bearing_deg` (clockwise from north) on the same sphere used by [`distance`].
pub fn destination(origin: &Coordinate, bearing_deg: f64, distance_km: f64) -> Result<Coordinate> {
    let delta = distance_km / EARTH_RADIUS_KM;
    let theta = bearing_deg.to_radians();
    let lat1 = origin.lat().to_radians();
    let lng1 = origin.lng().to_radians();

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
    let lng2 = lng1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    let lat = lat2.to_degrees().clamp(-90.0, 90.0);
    let lng = (lng2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
    Coordinate::new(lat, lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn no_distance() {
        assert_eq!(distance(&PARIS, &PARIS), 0.0);
        let c = coord(-33.8688, 151.2093);
        assert_eq!(distance(&c, &c), 0.0);
    }

    #[test]
    fn identical_points_are_always_within_radius() {
        for c in [PARIS, coord(0.0, 0.0), coord(90.0, 0.0), coord(-12.5, 179.9)] {
            assert!(is_within_radius(&c, &c, 0.0));
            assert!(is_within_radius(&c, &c, DEFAULT_RADIUS_KM));
        }
    }

    #[test]
    fn real_distance() {
        let versailles = coord(48.8049, 2.1204);
        let d = distance(&PARIS, &versailles);
        assert!(d > 16.0 && d < 19.0, "got {}", d);
        assert!(is_within_radius(&versailles, &PARIS, DEFAULT_RADIUS_KM));

        let lyon = coord(45.7640, 4.8357);
        let d = distance(&PARIS, &lyon);
        assert!(d > 385.0 && d < 400.0, "got {}", d);
        assert!(!is_within_radius(&lyon, &PARIS, DEFAULT_RADIUS_KM));

        let new_york = coord(40.7128, -74.0060);
        assert!(distance(&PARIS, &new_york) > 5800.0);
    }

    #[test]
    fn symmetric_distance() {
        let a = coord(80.0, 0.0);
        let b = coord(90.0, 20.0);
        assert_eq!(distance(&a, &b), distance(&b, &a));
    }

    #[test]
    fn antipodal_distance_is_half_circumference() {
        let antipode = coord(-48.8566, -177.6478);
        let d = distance(&PARIS, &antipode);
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - half).abs() < 0.01, "got {}", d);
        assert!(!is_within_radius(&antipode, &PARIS, DEFAULT_RADIUS_KM));
    }

    #[test]
    fn boundary_is_inclusive() {
        let edge = destination(&PARIS, 0.0, DEFAULT_RADIUS_KM).unwrap();
        let d = distance(&edge, &PARIS);
        assert!((d - DEFAULT_RADIUS_KM).abs() < 1e-6, "got {}", d);
        assert!(is_within_radius(&edge, &PARIS, DEFAULT_RADIUS_KM));

        let inside = destination(&PARIS, 135.0, 49.999).unwrap();
        assert!(is_within_radius(&inside, &PARIS, DEFAULT_RADIUS_KM));

        let outside = destination(&PARIS, 0.0, 50.001).unwrap();
        assert!(!is_within_radius(&outside, &PARIS, DEFAULT_RADIUS_KM));
    }

    #[test]
    fn points_on_the_circle_are_accepted_at_every_bearing() {
        for bearing in 0..360 {
            let edge = destination(&PARIS, bearing as f64, DEFAULT_RADIUS_KM).unwrap();
            assert!(
                is_within_radius(&edge, &PARIS, DEFAULT_RADIUS_KM),
                "bearing {}: {} km",
                bearing,
                distance(&edge, &PARIS)
            );

            let beyond = destination(&PARIS, bearing as f64, 50.001).unwrap();
            assert!(
                !is_within_radius(&beyond, &PARIS, DEFAULT_RADIUS_KM),
                "bearing {}",
                bearing
            );
        }
    }

    #[test]
    fn destination_across_antimeridian() {
        let origin = coord(0.0, 179.9);
        let east = destination(&origin, 90.0, 50.0).unwrap();
        assert!(east.lng() < 0.0, "got {}", east);
        assert!((distance(&origin, &east) - 50.0).abs() < 1e-6);
    }

    #[test]
    fn destination_over_the_pole() {
        let origin = coord(89.9, 0.0);
        let over = destination(&origin, 0.0, 50.0).unwrap();
        assert!(over.lat() <= 90.0);
        assert!((distance(&origin, &over) - 50.0).abs() < 1e-6);
    }
}
