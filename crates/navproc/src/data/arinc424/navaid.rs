//! Radio navigation aids: VOR/DME and NDB stations.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

use super::Table;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct VhfNavaid {
    #[serde(rename = "VOR_IDENT")]
    pub ident: String,
    #[serde(rename = "VOR_LAT")]
    pub latitude: f64,
    #[serde(rename = "VOR_LON")]
    pub longitude: f64,
}

impl Table for VhfNavaid {
    const FILE_NAME: &'static str = "VHF_NAVAID.csv";
}

/// An NDB, either enroute (section `D`) or terminal (section `P`).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct NdbNavaid {
    #[serde(rename = "NDB_IDENT")]
    pub ident: String,
    #[serde(rename = "SECT_CODE", default)]
    pub section: String,
    #[serde(rename = "NDB_LAT")]
    pub latitude: f64,
    #[serde(rename = "NDB_LON")]
    pub longitude: f64,
}

impl Table for NdbNavaid {
    const FILE_NAME: &'static str = "NDB_NAVAID.csv";
}

impl VhfNavaid {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

impl NdbNavaid {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}
