//! Great-circle distances between navigation coordinates.

use geodesy::prelude::*;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Mean Earth radius, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A sphere of mean Earth radius: geodesics on it are great circles.
static EARTH: Lazy<Ellipsoid> = Lazy::new(|| Ellipsoid::new(EARTH_RADIUS_KM * 1000.0, 0.0));

/// A position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinates { latitude, longitude }
    }

    /// Great-circle distance to `other`, in kilometres.
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        great_circle_distance(*self, *other)
    }
}

impl From<Coordinates> for Coor2D {
    fn from(val: Coordinates) -> Self {
        Coor2D::geo(val.latitude, val.longitude)
    }
}

/// Great-circle distance in kilometres between two positions on a spherical Earth.
pub fn great_circle_distance(a: Coordinates, b: Coordinates) -> f64 {
    if a == b {
        return 0.0;
    }
    EARTH.distance(&Coor2D::from(a), &Coor2D::from(b)) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_degree_of_arc_on_the_equator() {
        let d = great_circle_distance(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 1.0));
        assert!((d - EARTH_RADIUS_KM.to_radians()).abs() < 1e-3, "{d}");
    }

    #[test]
    fn one_degree_of_arc_along_a_meridian() {
        let d = great_circle_distance(Coordinates::new(45.0, 10.0), Coordinates::new(46.0, 10.0));
        assert!((d - 111.195).abs() < 1e-2, "{d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let paris = Coordinates::new(49.0097, 2.5479);
        let toulouse = Coordinates::new(43.6293, 1.3638);
        let there = paris.distance_km(&toulouse);
        let back = toulouse.distance_km(&paris);
        assert!((there - back).abs() < 1e-6);
        assert!((there - 605.0).abs() < 5.0, "{there}");
    }

    #[test]
    fn coincident_points() {
        let p = Coordinates::new(31.1434, 121.8052);
        assert_eq!(great_circle_distance(p, p), 0.0);
    }
}
