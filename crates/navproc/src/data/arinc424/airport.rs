use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

use super::Table;

/**
 * An airport of the navigation database.
 */
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Airport {
    /// ICAO location indicator
    #[serde(rename = "ARPT_IDENT")]
    pub ident: String,
    /// Elevation in feet
    #[serde(rename = "ARPT_ELEV")]
    pub elevation: f64,
    /// Latitude of the reference point in decimal degrees
    #[serde(rename = "ARPT_LAT")]
    pub latitude: f64,
    /// Longitude of the reference point in decimal degrees
    #[serde(rename = "ARPT_LON")]
    pub longitude: f64,
    /// Transition altitude in feet, if published
    #[serde(rename = "TRANSITIONS_ALT", default)]
    pub transition_altitude: Option<f64>,
    /// Transition level in feet, if published
    #[serde(rename = "TRANSITION_LEVEL", default)]
    pub transition_level: Option<f64>,
}

impl Table for Airport {
    const FILE_NAME: &'static str = "AIRPORT.csv";
}

impl Airport {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}
