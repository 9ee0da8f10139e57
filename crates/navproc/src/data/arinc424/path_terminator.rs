//! ARINC-424 path terminators (leg types).
//!
//! The two-letter code describes both the path flown and how the leg ends:
//! `CF` is a course to a fix, `VA` a heading to an altitude, `RF` a constant
//! radius arc to a fix, and so on.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathTerminator {
    /// `AF`: DME arc to a fix
    ArcToFix,
    /// `CA`: course to an altitude
    CourseToAltitude,
    /// `CD`: course to a DME distance
    CourseToDmeDistance,
    /// `CF`: course to a fix
    CourseToFix,
    /// `CI`: course to an intercept
    CourseToIntercept,
    /// `CR`: course to a radial
    CourseToRadial,
    /// `DF`: direct to a fix
    DirectToFix,
    /// `FA`: course from a fix to an altitude
    FixToAltitude,
    /// `FC`: track from a fix for a distance
    FixToDistance,
    /// `FD`: track from a fix to a DME distance
    FixToDmeDistance,
    /// `FM`: course from a fix to a manual termination
    FixToManual,
    /// `HA`: holding terminated at an altitude
    HoldToAltitude,
    /// `HF`: holding terminated after one circuit
    HoldToFix,
    /// `HM`: holding terminated manually
    HoldToManual,
    /// `IF`: initial fix
    InitialFix,
    /// `PI`: procedure turn
    ProcedureTurn,
    /// `RF`: constant radius arc to a fix
    RadiusToFix,
    /// `TF`: track to a fix
    TrackToFix,
    /// `VA`: heading to an altitude
    HeadingToAltitude,
    /// `VD`: heading to a DME distance
    HeadingToDmeDistance,
    /// `VI`: heading to an intercept
    HeadingToIntercept,
    /// `VM`: heading to a manual termination
    HeadingToManual,
    /// `VR`: heading to a radial
    HeadingToRadial,
    /// Any code outside of ARINC-424, kept verbatim
    Other(String),
}

use PathTerminator::*;

impl PathTerminator {
    pub fn code(&self) -> &str {
        match self {
            ArcToFix => "AF",
            CourseToAltitude => "CA",
            CourseToDmeDistance => "CD",
            CourseToFix => "CF",
            CourseToIntercept => "CI",
            CourseToRadial => "CR",
            DirectToFix => "DF",
            FixToAltitude => "FA",
            FixToDistance => "FC",
            FixToDmeDistance => "FD",
            FixToManual => "FM",
            HoldToAltitude => "HA",
            HoldToFix => "HF",
            HoldToManual => "HM",
            InitialFix => "IF",
            ProcedureTurn => "PI",
            RadiusToFix => "RF",
            TrackToFix => "TF",
            HeadingToAltitude => "VA",
            HeadingToDmeDistance => "VD",
            HeadingToIntercept => "VI",
            HeadingToManual => "VM",
            HeadingToRadial => "VR",
            Other(code) => code,
        }
    }

    pub fn is_holding(&self) -> bool {
        matches!(self, HoldToAltitude | HoldToFix | HoldToManual)
    }

    /// Legs ending at (or anchored on) a named fix, whose position is exported.
    pub fn has_fix(&self) -> bool {
        self.is_holding()
            || matches!(
                self,
                ProcedureTurn
                    | ArcToFix
                    | CourseToFix
                    | DirectToFix
                    | FixToDistance
                    | FixToDmeDistance
                    | RadiusToFix
                    | TrackToFix
                    | InitialFix
            )
    }

    /// Legs flown along a course or heading.
    pub fn has_heading(&self) -> bool {
        self.is_holding()
            || matches!(
                self,
                ProcedureTurn
                    | FixToManual
                    | HeadingToManual
                    | CourseToAltitude
                    | HeadingToAltitude
                    | CourseToDmeDistance
                    | HeadingToDmeDistance
                    | CourseToFix
                    | CourseToIntercept
                    | HeadingToIntercept
                    | CourseToRadial
                    | HeadingToRadial
                    | FixToAltitude
                    | FixToDistance
                    | FixToDmeDistance
            )
    }

    pub fn requires_turn_direction(&self) -> bool {
        self.is_holding() || matches!(self, ProcedureTurn)
    }

    pub fn requires_altitude(&self) -> bool {
        matches!(self, CourseToAltitude | HeadingToAltitude | FixToAltitude)
    }

    /// Legs defined relative to a recommended navaid.
    pub fn requires_navaid(&self) -> bool {
        matches!(
            self,
            ProcedureTurn
                | ArcToFix
                | CourseToDmeDistance
                | HeadingToDmeDistance
                | CourseToRadial
                | HeadingToRadial
                | FixToDmeDistance
        )
    }

    pub fn requires_theta(&self) -> bool {
        matches!(self, ProcedureTurn | CourseToRadial | HeadingToRadial)
    }

    pub fn requires_rho(&self) -> bool {
        matches!(self, ProcedureTurn | ArcToFix)
    }

    /// Legs ending at a DME distance, carried in the distance/time column.
    pub fn ends_at_dme_distance(&self) -> bool {
        matches!(self, CourseToDmeDistance | HeadingToDmeDistance | FixToDmeDistance)
    }

    pub fn requires_distance(&self) -> bool {
        self.is_holding() || matches!(self, ProcedureTurn | FixToDistance)
    }
}

impl From<&str> for PathTerminator {
    fn from(code: &str) -> Self {
        match code.trim() {
            "AF" => ArcToFix,
            "CA" => CourseToAltitude,
            "CD" => CourseToDmeDistance,
            "CF" => CourseToFix,
            "CI" => CourseToIntercept,
            "CR" => CourseToRadial,
            "DF" => DirectToFix,
            "FA" => FixToAltitude,
            "FC" => FixToDistance,
            "FD" => FixToDmeDistance,
            "FM" => FixToManual,
            "HA" => HoldToAltitude,
            "HF" => HoldToFix,
            "HM" => HoldToManual,
            "IF" => InitialFix,
            "PI" => ProcedureTurn,
            "RF" => RadiusToFix,
            "TF" => TrackToFix,
            "VA" => HeadingToAltitude,
            "VD" => HeadingToDmeDistance,
            "VI" => HeadingToIntercept,
            "VM" => HeadingToManual,
            "VR" => HeadingToRadial,
            other => Other(other.to_string()),
        }
    }
}

impl FromStr for PathTerminator {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

impl fmt::Display for PathTerminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
