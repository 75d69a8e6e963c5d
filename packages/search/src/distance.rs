//! Surface distance on the WGS84 ellipsoid.
//!
//! Uses Karney's geodesic algorithm from the `geo` crate, accurate to a few
//! nanometers, so radius boundaries do not depend on a spherical
//! approximation.

use geo::{Destination as _, Distance as _, Geodesic, Point};
use wifi_map_catalog_models::Coordinate;

fn to_point(coordinate: Coordinate) -> Point<f64> {
    Point::new(coordinate.longitude, coordinate.latitude)
}

/// Geodesic distance between two coordinates in meters.
#[must_use]
pub fn geodesic_m(a: Coordinate, b: Coordinate) -> f64 {
    Geodesic.distance(to_point(a), to_point(b))
}

/// The coordinate `distance_m` meters from `origin` along `bearing_deg`
/// (degrees clockwise from north).
#[must_use]
pub fn destination(origin: Coordinate, bearing_deg: f64, distance_m: f64) -> Coordinate {
    let point = Geodesic.destination(to_point(origin), bearing_deg, distance_m);
    Coordinate::new(point.y(), point.x())
}
