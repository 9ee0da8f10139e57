use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

use super::Table;

/**
 * An enroute or terminal waypoint.
 *
 * Terminal waypoints carry the ICAO indicator of their airport as region
 * code, which is what scopes them to that airport.
 */
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Waypoint {
    #[serde(rename = "WAYPOINT_IDENT")]
    pub ident: String,
    /// ARINC-424 section code: `E` for enroute, `P` for terminal
    #[serde(rename = "SECT_CODE", default)]
    pub section: String,
    #[serde(rename = "REGION_CODE", default)]
    pub region: String,
    #[serde(rename = "WAYPOINT_LAT")]
    pub latitude: f64,
    #[serde(rename = "WAYPOINT_LON")]
    pub longitude: f64,
}

impl Table for Waypoint {
    const FILE_NAME: &'static str = "WAYPOINT.csv";
}

impl Waypoint {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn is_enroute(&self) -> bool {
        self.section.trim() == "E"
    }
}
