//! Run-scoped collection of non-fatal export warnings.
//!
//! Missing or unresolvable leg attributes never stop an export: the attribute
//! line is left out and a [`Diagnostic`] is recorded. The whole list is
//! written once, at the end of the run, as `debug.txt`.

use std::fmt;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::data::arinc424::database::PointIssue;
use crate::data::arinc424::procedure_leg::ProcedureLeg;

/// Line terminator of the report, as expected on the addon side.
pub const REPORT_LINE_ENDING: &str = "\r\n";

/// The leg a diagnostic is about: `airport:procedure:fix`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegRef {
    pub airport: String,
    pub procedure: String,
    pub fix: String,
}

impl LegRef {
    pub fn new(leg: &ProcedureLeg) -> Self {
        LegRef {
            airport: leg.airport.clone(),
            procedure: leg.procedure.clone(),
            fix: leg.fix_ident().unwrap_or_default().to_string(),
        }
    }

    /// Same leg, about another point (e.g. the center of an arc).
    pub fn with_fix(&self, fix: &str) -> Self {
        LegRef {
            fix: fix.to_string(),
            ..self.clone()
        }
    }
}

impl fmt::Display for LegRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.airport, self.procedure, self.fix)
    }
}

/// Which point of a leg failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointRole {
    Fix,
    ArcCenter,
}

impl fmt::Display for PointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointRole::Fix => write!(f, "Lat/Lon"),
            PointRole::ArcCenter => write!(f, "RF center"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Diagnostic {
    #[error("Warning: IDENT missing for {airport}:{procedure}")]
    MissingFixIdent { airport: String, procedure: String },
    #[error("Warning: {role} for {leg}:{reason}")]
    UnresolvedPoint {
        leg: LegRef,
        role: PointRole,
        reason: PointIssue,
    },
    #[error("Warning: Heading missing for {0}")]
    MissingHeading(LegRef),
    #[error("Warning: TurnDirection missing for {0}")]
    MissingTurnDirection(LegRef),
    #[error("Warning: Altitude missing for {0}")]
    MissingAltitude(LegRef),
    #[error("Warning: Frequency missing for {0}")]
    MissingFrequency(LegRef),
    #[error("Warning: NavBear missing for {0}")]
    MissingNavBear(LegRef),
    #[error("Warning: NavDist missing for {0}")]
    MissingNavDist(LegRef),
    #[error("Warning: Dist missing for {0}")]
    MissingDist(LegRef),
    #[error("Warning: RF center missing for {0}")]
    MissingCenterFix(LegRef),
    #[error("Warning: uncertain runway, added to all. {airport}:{procedure}:{transition}")]
    UncertainRunway {
        airport: String,
        procedure: String,
        transition: String,
    },
    #[error("Warning: no runway matches {airport}:{procedure}:{transition}")]
    NoMatchingRunway {
        airport: String,
        procedure: String,
        transition: String,
    },
}

/// Append-only diagnostics sink, one per export run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// The report, one diagnostic per line.
    pub fn report(&self) -> String {
        self.entries
            .iter()
            .map(Diagnostic::to_string)
            .collect::<Vec<_>>()
            .join(REPORT_LINE_ENDING)
    }

    pub fn write_report<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        fs::write(path, self.report())
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
