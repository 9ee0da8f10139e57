//! Encoding of a single procedure leg into `Key=Value` attribute lines.
//!
//! Which attributes a leg carries depends on its path terminator. Missing
//! optional data is never an error: the line is left out and, when the leg
//! type needs that attribute, a diagnostic is recorded.

use crate::data::arinc424::database::{NavigationDatabase, Point, PointCategory, PointIssue};
use crate::data::arinc424::non_blank;
use crate::data::arinc424::path_terminator::PathTerminator;
use crate::data::arinc424::procedure_leg::ProcedureLeg;
use crate::diagnostics::{Diagnostic, Diagnostics, LegRef, PointRole};

/// An encoded leg: its attribute lines, `Leg=<type>` first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg(Vec<String>);

impl Leg {
    pub fn lines(&self) -> &[String] {
        &self.0
    }

    /// The value of the first `key=value` line with this key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find_map(|line| line.strip_prefix(key)?.strip_prefix('='))
    }
}

impl From<Vec<String>> for Leg {
    fn from(lines: Vec<String>) -> Self {
        Leg(lines)
    }
}

/// Encodes legs against a navigation database.
pub struct LegEncoder<'a> {
    db: &'a NavigationDatabase,
}

impl<'a> LegEncoder<'a> {
    pub fn new(db: &'a NavigationDatabase) -> Self {
        LegEncoder { db }
    }

    pub fn encode(&self, leg: &ProcedureLeg, diagnostics: &mut Diagnostics) -> Leg {
        let kind = leg.path_terminator();
        let context = LegRef::new(leg);
        let mut lines = vec![format!("Leg={}", leg.path_termination.trim())];

        if kind.has_fix() {
            self.encode_fix(leg, &context, &mut lines, diagnostics);
        }

        if leg.descriptor_flag(1).is_some_and(|c| c == 'B' || c == 'Y') {
            lines.push("CrossThisPoint=1".to_string());
        }

        if kind.has_heading() {
            match leg.course {
                Some(course) => lines.push(format!("Heading={course:.1}")),
                None => diagnostics.push(Diagnostic::MissingHeading(context.clone())),
            }
        }

        match non_blank(&leg.turn_direction) {
            Some(direction @ ("L" | "R")) => lines.push(format!("TurnDirection={direction}")),
            _ if kind.requires_turn_direction() => {
                diagnostics.push(Diagnostic::MissingTurnDirection(context.clone()))
            }
            _ => (),
        }

        if let Some(speed) = non_blank(&leg.speed_limit) {
            let suffix = match non_blank(&leg.speed_descriptor) {
                Some("+") => "A",
                Some("-") => "B",
                _ => "",
            };
            lines.push(format!("Speed={speed}{suffix}"));
        }

        match encode_altitude(leg) {
            Some(altitude) => lines.push(altitude),
            None if kind.requires_altitude() => diagnostics.push(Diagnostic::MissingAltitude(context.clone())),
            None => (),
        }

        if leg.descriptor_flag(3) == Some('M') {
            lines.push("MAP=1".to_string());
        }

        match non_blank(&leg.recommended_navaid) {
            Some(navaid) => lines.push(format!("Frequency={navaid}")),
            None if kind.requires_navaid() => diagnostics.push(Diagnostic::MissingFrequency(context.clone())),
            None => (),
        }

        if let Some(angle) = leg.vertical_angle {
            lines.push(format!("Slope={}", format_decimal(-angle)));
        }

        match leg.theta {
            Some(theta) => lines.push(format!("NavBear={:.1}", tenths(theta))),
            None if kind.requires_theta() => diagnostics.push(Diagnostic::MissingNavBear(context.clone())),
            None => (),
        }

        let nav_distance = if kind.ends_at_dme_distance() {
            non_blank(&leg.distance_or_time).and_then(parse_tenths)
        } else {
            leg.rho.map(tenths)
        };
        match nav_distance {
            Some(distance) => lines.push(format!("NavDist={distance:.1}")),
            None if kind.ends_at_dme_distance() || kind.requires_rho() => {
                diagnostics.push(Diagnostic::MissingNavDist(context.clone()))
            }
            None => (),
        }

        match non_blank(&leg.distance_or_time).and_then(DistanceOrTime::parse) {
            Some(value) => lines.push(format!("Dist={value}")),
            None if kind.requires_distance() => diagnostics.push(Diagnostic::MissingDist(context.clone())),
            None => (),
        }

        if kind == PathTerminator::RadiusToFix {
            self.encode_arc_center(leg, &context, &mut lines, diagnostics);
        }

        Leg(lines)
    }

    fn encode_fix(&self, leg: &ProcedureLeg, context: &LegRef, lines: &mut Vec<String>, diagnostics: &mut Diagnostics) {
        let Some(fix) = leg.fix_ident() else {
            diagnostics.push(Diagnostic::MissingFixIdent {
                airport: leg.airport.clone(),
                procedure: leg.procedure.clone(),
            });
            return;
        };
        lines.push(format!("Name={fix}"));

        let subsection = non_blank(&leg.fix_subsection).unwrap_or_default();
        let resolved = if subsection == "G" {
            self.db
                .runway_threshold(&leg.airport, fix)
                .ok_or(PointIssue::NotFound(PointCategory::RunwayThreshold))
                .map(|point| (point, None))
        } else {
            let section = non_blank(&leg.fix_section).unwrap_or_default();
            self.db
                .resolve_point(fix, &leg.airport, section, subsection)
                .map(|resolved| (resolved.point, resolved.warning))
        };
        push_point(resolved, ("Latitude", "Longitude"), context, PointRole::Fix, lines, diagnostics);
    }

    fn encode_arc_center(
        &self,
        leg: &ProcedureLeg,
        context: &LegRef,
        lines: &mut Vec<String>,
        diagnostics: &mut Diagnostics,
    ) {
        let Some(center) = non_blank(&leg.center_fix) else {
            diagnostics.push(Diagnostic::MissingCenterFix(context.clone()));
            return;
        };
        let resolved = self
            .db
            .resolve_point(
                center,
                &leg.airport,
                non_blank(&leg.center_fix_section).unwrap_or_default(),
                non_blank(&leg.center_fix_subsection).unwrap_or_default(),
            )
            .map(|resolved| (resolved.point, resolved.warning));
        push_point(
            resolved,
            ("CenterLat", "CenterLon"),
            &context.with_fix(center),
            PointRole::ArcCenter,
            lines,
            diagnostics,
        );
    }
}

fn push_point(
    resolved: Result<(Point, Option<PointIssue>), PointIssue>,
    (lat_key, lon_key): (&str, &str),
    context: &LegRef,
    role: PointRole,
    lines: &mut Vec<String>,
    diagnostics: &mut Diagnostics,
) {
    let issue = match resolved {
        Ok((point, warning)) => {
            lines.push(format!("{lat_key}={:.6}", point.coordinates.latitude));
            lines.push(format!("{lon_key}={:.6}", point.coordinates.longitude));
            warning
        }
        Err(issue) => Some(issue),
    };
    if let Some(reason) = issue {
        diagnostics.push(Diagnostic::UnresolvedPoint {
            leg: context.clone(),
            role,
            reason,
        });
    }
}

/// The `Altitude=` line, from the altitude descriptor and one or two altitudes.
fn encode_altitude(leg: &ProcedureLeg) -> Option<String> {
    let altitude1 = feet(leg.altitude1?);
    let line = match non_blank(&leg.altitude_descriptor) {
        // at or above; G/H/I (at) and J (at or above) deviate from ARINC-424 in the source data
        Some("+" | "C" | "J" | "V") => format!("Altitude={altitude1}A"),
        // at or below
        Some("-" | "Y") => format!("Altitude={altitude1}B"),
        Some("B") => match leg.altitude2 {
            Some(altitude2) => format!("Altitude={}A{altitude1}B", feet(altitude2)),
            None => format!("Altitude={altitude1}"),
        },
        _ => format!("Altitude={altitude1}"),
    };
    Some(line)
}

fn feet(value: f64) -> i64 {
    value.trunc() as i64
}

/// Integer tenths to units: `1234` gives `123.4`.
fn tenths(value: f64) -> f64 {
    value.trunc() / 10.0
}

/// An all-digit cell in tenths.
fn parse_tenths(value: &str) -> Option<f64> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    value.parse::<u64>().ok().map(|v| v as f64 / 10.0)
}

/// `-3` is written `-3.0`, other values with the shortest exact representation.
fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// The distance/time column: tenths of nautical miles or `T` and minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DistanceOrTime {
    Minutes(u64),
    NauticalMiles(f64),
}

impl DistanceOrTime {
    fn parse(value: &str) -> Option<Self> {
        match value.strip_prefix('T') {
            Some(minutes) => minutes.trim().parse().ok().map(DistanceOrTime::Minutes),
            None => parse_tenths(value).map(DistanceOrTime::NauticalMiles),
        }
    }
}

impl std::fmt::Display for DistanceOrTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceOrTime::Minutes(minutes) => write!(f, "{}", minutes * 1000),
            DistanceOrTime::NauticalMiles(nm) => write!(f, "{nm:.1}"),
        }
    }
}
