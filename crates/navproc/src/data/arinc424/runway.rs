use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

use super::Table;

/**
 * A runway threshold.
 */
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Runway {
    /// ICAO indicator of the airport
    #[serde(rename = "ARPT_IDENT")]
    pub airport: String,
    /// Runway identifier, e.g. `RW09L`
    #[serde(rename = "RUNWAY_IDENT")]
    pub ident: String,
    /// Latitude of the threshold in decimal degrees
    #[serde(rename = "RUNWAY_LAT")]
    pub latitude: f64,
    /// Longitude of the threshold in decimal degrees
    #[serde(rename = "RUNWAY_LON")]
    pub longitude: f64,
}

impl Table for Runway {
    const FILE_NAME: &'static str = "RUNWAY.csv";
}

impl Runway {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// The designator without its `RW` prefix: `RW09L` gives `09L`.
    pub fn designator(&self) -> &str {
        self.ident.get(2..).unwrap_or_default()
    }
}
