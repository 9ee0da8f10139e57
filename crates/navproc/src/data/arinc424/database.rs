//! Navigation database handling.
//!
//! This module loads the reference tables and resolves fix identifiers to
//! coordinates. Fix identifiers are not unique worldwide, so same-ident
//! candidates are disambiguated by their distance to the airport the
//! procedure belongs to.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::data::arinc424::{
    airport::Airport,
    navaid::{NdbNavaid, VhfNavaid},
    procedure_leg::{ProcedureCategory, ProcedureLeg},
    runway::Runway,
    waypoint::Waypoint,
    LoadError, TableSource,
};
use crate::geo::Coordinates;

/// Candidates farther than this from their airport are reported as suspicious.
pub const TOO_FAR_KM: f64 = 1000.0;

/**
 * A navigation database containing airports, runways, waypoints, navaids and
 * procedure legs.
 */
pub struct NavigationDatabase {
    airports: Vec<Airport>,
    airport_index: HashMap<String, usize>,
    runways: HashMap<String, Vec<Runway>>,
    waypoints: HashMap<String, Vec<Waypoint>>,
    vhf_navaids: HashMap<String, Vec<VhfNavaid>>,
    ndb_navaids: HashMap<String, Vec<NdbNavaid>>,
    procedure_legs: Vec<ProcedureLeg>,
    too_far_km: f64,
}

impl NavigationDatabase {
    /// Load the navigation database from a directory or zip archive of CSV tables.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let source = TableSource::new(path);
        Ok(NavigationDatabase::from_tables(
            source.read()?,
            source.read()?,
            source.read()?,
            source.read()?,
            source.read()?,
            source.read()?,
        ))
    }

    /// Build the database from already parsed tables, preserving table order.
    pub fn from_tables(
        airports: Vec<Airport>,
        runways: Vec<Runway>,
        waypoints: Vec<Waypoint>,
        vhf_navaids: Vec<VhfNavaid>,
        ndb_navaids: Vec<NdbNavaid>,
        procedure_legs: Vec<ProcedureLeg>,
    ) -> Self {
        let mut airport_index = HashMap::new();
        for (i, airport) in airports.iter().enumerate() {
            airport_index.entry(airport.ident.clone()).or_insert(i);
        }
        NavigationDatabase {
            airports,
            airport_index,
            runways: group_by(runways, |r| r.airport.clone()),
            waypoints: group_by(waypoints, |w| w.ident.clone()),
            vhf_navaids: group_by(vhf_navaids, |n| n.ident.clone()),
            ndb_navaids: group_by(ndb_navaids, |n| n.ident.clone()),
            procedure_legs,
            too_far_km: TOO_FAR_KM,
        }
    }

    /// Override the distance above which a resolved point is flagged as too far.
    pub fn with_too_far_threshold(mut self, km: f64) -> Self {
        self.too_far_km = km;
        self
    }

    /// Airports in table order.
    pub fn airports(&self) -> impl Iterator<Item = &Airport> {
        self.airports.iter()
    }

    /// The first airport of the table with this identifier.
    pub fn airport(&self, ident: &str) -> Option<&Airport> {
        self.airport_index.get(ident).map(|&i| &self.airports[i])
    }

    /// Runways of an airport, in table order.
    pub fn runways(&self, airport: &str) -> &[Runway] {
        self.runways.get(airport).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn runway(&self, airport: &str, ident: &str) -> Option<&Runway> {
        self.runways(airport).iter().find(|r| r.ident == ident)
    }

    /// Legs of a procedure category grouped by airport.
    ///
    /// Airports come in order of first appearance; legs keep their table
    /// order. Legs whose route type is not exported for the category are left
    /// out.
    pub fn procedures_by_airport(&self, category: ProcedureCategory) -> Vec<(&str, Vec<&ProcedureLeg>)> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut grouped: Vec<(&str, Vec<&ProcedureLeg>)> = Vec::new();
        for leg in &self.procedure_legs {
            if leg.category() != Some(category) || !category.accepts(&leg.route_type) {
                continue;
            }
            let i = *index.entry(leg.airport.as_str()).or_insert_with(|| {
                grouped.push((leg.airport.as_str(), Vec::new()));
                grouped.len() - 1
            });
            grouped[i].1.push(leg);
        }
        grouped
    }

    /// Resolve a fix to coordinates.
    ///
    /// The section and subsection codes of the fix select the table to look
    /// into; among same-ident candidates the one nearest to `airport` wins,
    /// the first in table order on ties.
    pub fn resolve_point(
        &self,
        ident: &str,
        airport: &str,
        section: &str,
        subsection: &str,
    ) -> Result<ResolvedPoint, PointIssue> {
        let reference = self.airport(airport).ok_or(PointIssue::AirportNotFound)?.coordinates();
        let category = PointCategory::classify(section, subsection).ok_or(PointIssue::UnknownCategory)?;

        let candidates: Vec<Coordinates> = match category {
            PointCategory::EnrouteWaypoint => self
                .waypoints
                .get(ident)
                .into_iter()
                .flatten()
                .filter(|w| w.is_enroute())
                .map(Waypoint::coordinates)
                .collect(),
            PointCategory::TerminalWaypoint => self
                .waypoints
                .get(ident)
                .into_iter()
                .flatten()
                .filter(|w| w.region.trim() == airport)
                .map(Waypoint::coordinates)
                .collect(),
            PointCategory::Vor => self
                .vhf_navaids
                .get(ident)
                .into_iter()
                .flatten()
                .map(VhfNavaid::coordinates)
                .collect(),
            PointCategory::Ndb => self
                .ndb_navaids
                .get(ident)
                .into_iter()
                .flatten()
                .filter(|n| n.section.trim() == section.trim())
                .map(NdbNavaid::coordinates)
                .collect(),
            PointCategory::RunwayThreshold => self
                .runways(airport)
                .iter()
                .filter(|r| r.ident == ident)
                .map(Runway::coordinates)
                .collect(),
        };

        let (&coordinates, distance_km) =
            nearest(&reference, &candidates, |c| *c).ok_or(PointIssue::NotFound(category))?;
        let warning = if distance_km >= self.too_far_km {
            tracing::debug!("{ident} resolved {distance_km:.0} km away from {airport}");
            Some(PointIssue::TooFar)
        } else {
            None
        };
        Ok(ResolvedPoint {
            point: Point {
                coordinates,
                category,
            },
            distance_km,
            warning,
        })
    }

    /// Coordinates of a runway threshold, straight from the runway table.
    pub fn runway_threshold(&self, airport: &str, ident: &str) -> Option<Point> {
        self.runway(airport, ident).map(|runway| Point {
            coordinates: runway.coordinates(),
            category: PointCategory::RunwayThreshold,
        })
    }
}

fn group_by<T>(records: Vec<T>, key: impl Fn(&T) -> String) -> HashMap<String, Vec<T>> {
    let mut grouped: HashMap<String, Vec<T>> = HashMap::new();
    for record in records {
        grouped.entry(key(&record)).or_default().push(record);
    }
    grouped
}

/// The candidate nearest to `reference`, with its distance in kilometres.
fn nearest<'a, T>(
    reference: &Coordinates,
    candidates: impl IntoIterator<Item = &'a T>,
    position: impl Fn(&T) -> Coordinates,
) -> Option<(&'a T, f64)>
where
    T: 'a,
{
    let mut best: Option<(&'a T, f64)> = None;
    for candidate in candidates {
        let distance = reference.distance_km(&position(candidate));
        // strict comparison keeps the first candidate on ties
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }
    best
}

/// Where a fix is looked up, from its ARINC-424 section and subsection codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PointCategory {
    EnrouteWaypoint,
    TerminalWaypoint,
    Vor,
    Ndb,
    RunwayThreshold,
}

impl PointCategory {
    pub fn classify(section: &str, subsection: &str) -> Option<Self> {
        match (section.trim(), subsection.trim()) {
            ("E", _) => Some(PointCategory::EnrouteWaypoint),
            ("P", "C") => Some(PointCategory::TerminalWaypoint),
            ("D", "") => Some(PointCategory::Vor),
            ("D", "B") | ("P", "N") => Some(PointCategory::Ndb),
            ("P", "G") => Some(PointCategory::RunwayThreshold),
            _ => None,
        }
    }
}

impl fmt::Display for PointCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointCategory::EnrouteWaypoint => write!(f, "enroute waypoint"),
            PointCategory::TerminalWaypoint => write!(f, "terminal waypoint"),
            PointCategory::Vor => write!(f, "VOR"),
            PointCategory::Ndb => write!(f, "NDB"),
            PointCategory::RunwayThreshold => write!(f, "runway"),
        }
    }
}

/// Why a fix could not be placed, or why its placement is doubtful.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointIssue {
    #[error("airport not found")]
    AirportNotFound,
    #[error("{0} not found")]
    NotFound(PointCategory),
    #[error("unknown type point")]
    UnknownCategory,
    #[error("too far")]
    TooFar,
}

/// A position with the category of the table it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub coordinates: Coordinates,
    pub category: PointCategory,
}

/// The outcome of a successful resolution.
///
/// A candidate farther than the threshold from the airport is still returned,
/// with [`PointIssue::TooFar`] as warning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedPoint {
    pub point: Point,
    /// Distance to the airport reference point, in kilometres
    pub distance_km: f64,
    #[serde(skip)]
    pub warning: Option<PointIssue>,
}
