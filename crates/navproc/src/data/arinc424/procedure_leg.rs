use std::fmt;

use serde::{Deserialize, Serialize};

use super::path_terminator::PathTerminator;
use super::{non_blank, Table};

/**
 * One row of the airport procedure table: a single leg of a SID, STAR or
 * approach (or one of their transitions).
 *
 * Rows of the same procedure are contiguous and numbered by an increasing
 * sequence number; the first row of each procedure carries the procedure
 * identifier, route type and transition identifier for the whole group.
 */
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProcedureLeg {
    #[serde(rename = "ARPT_IDENT")]
    pub airport: String,
    /// `D` (SID), `E` (STAR) or `F` (approach)
    #[serde(rename = "SUBS_CODE")]
    pub subsection: String,
    #[serde(rename = "ROUTE_TYPE", default)]
    pub route_type: String,
    #[serde(rename = "SEQ_NR")]
    pub sequence: u32,
    #[serde(rename = "PROC_IDENT")]
    pub procedure: String,
    #[serde(rename = "TRANSITION_IDENT", default)]
    pub transition: Option<String>,
    #[serde(rename = "PATH_AND_TERMINATION")]
    pub path_termination: String,
    #[serde(rename = "FIX_IDENT", default)]
    pub fix: Option<String>,
    #[serde(rename = "FIX_SECT_CODE", default)]
    pub fix_section: Option<String>,
    #[serde(rename = "FIX_SUBS_CODE", default)]
    pub fix_subsection: Option<String>,
    /// Four positional flags, e.g. `E  M` for a missed approach point
    #[serde(rename = "WAYPOINT_DESCR_CODE", default)]
    pub descriptor: Option<String>,
    /// Magnetic course in degrees
    #[serde(rename = "MAG_COURSE", default)]
    pub course: Option<f64>,
    #[serde(rename = "TURN_DIR", default)]
    pub turn_direction: Option<String>,
    /// Speed limit in knots
    #[serde(rename = "SPEED_LIMIT", default)]
    pub speed_limit: Option<String>,
    #[serde(rename = "SPEED_LIMIT_DESCR", default)]
    pub speed_descriptor: Option<String>,
    #[serde(rename = "ALT_DESCR", default)]
    pub altitude_descriptor: Option<String>,
    /// Altitude in feet
    #[serde(rename = "ALT_1", default)]
    pub altitude1: Option<f64>,
    /// Second altitude in feet, upper bound of a block
    #[serde(rename = "ALT_2", default)]
    pub altitude2: Option<f64>,
    #[serde(rename = "RECOMMENDED_NAVAID", default)]
    pub recommended_navaid: Option<String>,
    /// Vertical path angle in degrees (negative when descending)
    #[serde(rename = "VERTICAL_ANGLE", default)]
    pub vertical_angle: Option<f64>,
    /// Magnetic bearing from the recommended navaid, in tenths of degrees
    #[serde(rename = "THETA", default)]
    pub theta: Option<f64>,
    /// Distance from the recommended navaid, in tenths of nautical miles
    #[serde(rename = "RHO", default)]
    pub rho: Option<f64>,
    /// Tenths of nautical miles, or `T` followed by minutes
    #[serde(rename = "ROUTE_DISTANCE_HOLDING_DISTANCE_OR_TIME", default)]
    pub distance_or_time: Option<String>,
    #[serde(rename = "CENTER_FIX_OR_TAA_PROCEDURE_TURN_IND", default)]
    pub center_fix: Option<String>,
    #[serde(rename = "MULTIPLE_CODE_OR_TAA_SECTOR_SECT_CODE", default)]
    pub center_fix_section: Option<String>,
    #[serde(rename = "MULTIPLE_CODE_OR_TAA_SECTOR_SUBS_CODE", default)]
    pub center_fix_subsection: Option<String>,
}

impl Table for ProcedureLeg {
    const FILE_NAME: &'static str = "AIRPORT_PROCEDURE.csv";
}

impl ProcedureLeg {
    pub fn path_terminator(&self) -> PathTerminator {
        PathTerminator::from(self.path_termination.as_str())
    }

    pub fn category(&self) -> Option<ProcedureCategory> {
        ProcedureCategory::from_subsection(&self.subsection)
    }

    pub fn fix_ident(&self) -> Option<&str> {
        non_blank(&self.fix)
    }

    pub fn transition_ident(&self) -> Option<&str> {
        non_blank(&self.transition)
    }

    /// The `n`-th flag of the waypoint descriptor, when the code is complete.
    pub fn descriptor_flag(&self, n: usize) -> Option<char> {
        let descriptor = self.descriptor.as_deref()?;
        if descriptor.chars().count() != 4 {
            return None;
        }
        descriptor.chars().nth(n)
    }
}

/// The three kinds of terminal procedures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProcedureCategory {
    Sid,
    Star,
    Approach,
}

impl ProcedureCategory {
    pub const ALL: [ProcedureCategory; 3] = [ProcedureCategory::Sid, ProcedureCategory::Star, ProcedureCategory::Approach];

    pub fn from_subsection(code: &str) -> Option<Self> {
        match code.trim() {
            "D" => Some(ProcedureCategory::Sid),
            "E" => Some(ProcedureCategory::Star),
            "F" => Some(ProcedureCategory::Approach),
            _ => None,
        }
    }

    /// Route types exported for this category, in processing order.
    ///
    /// Approaches are exported whatever their route type, in table order.
    pub fn route_types(self) -> Option<&'static [&'static str]> {
        match self {
            ProcedureCategory::Sid => Some(&["1", "2", "3", "4", "5", "6"]),
            ProcedureCategory::Star => Some(&["3", "2", "1", "6", "5", "4"]),
            ProcedureCategory::Approach => None,
        }
    }

    /// Whether legs of this route type describe an enroute transition rather
    /// than the procedure itself.
    pub fn is_transition(self, route_type: &str) -> bool {
        let route_type = route_type.trim();
        match self {
            ProcedureCategory::Sid => matches!(route_type, "3" | "6"),
            ProcedureCategory::Star => matches!(route_type, "1" | "4"),
            ProcedureCategory::Approach => route_type == "A",
        }
    }

    pub fn accepts(self, route_type: &str) -> bool {
        self.route_types()
            .is_none_or(|types| types.contains(&route_type.trim()))
    }
}

impl fmt::Display for ProcedureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcedureCategory::Sid => write!(f, "SID"),
            ProcedureCategory::Star => write!(f, "STAR"),
            ProcedureCategory::Approach => write!(f, "approach"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg_with_descriptor(descriptor: &str) -> ProcedureLeg {
        ProcedureLeg {
            descriptor: Some(descriptor.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn descriptor_flags() {
        let leg = leg_with_descriptor("EY M");
        assert_eq!(leg.descriptor_flag(1), Some('Y'));
        assert_eq!(leg.descriptor_flag(3), Some('M'));
        assert_eq!(leg_with_descriptor("EY").descriptor_flag(1), None);
        assert_eq!(ProcedureLeg::default().descriptor_flag(0), None);
    }

    #[test]
    fn route_types() {
        assert!(ProcedureCategory::Sid.is_transition("6"));
        assert!(!ProcedureCategory::Sid.is_transition("1"));
        assert!(ProcedureCategory::Star.is_transition("1"));
        assert!(ProcedureCategory::Approach.is_transition("A"));
        assert!(!ProcedureCategory::Sid.accepts("0"));
        assert!(ProcedureCategory::Star.accepts("5"));
        assert!(ProcedureCategory::Approach.accepts("I"));
        assert_eq!(ProcedureCategory::from_subsection("E"), Some(ProcedureCategory::Star));
        assert_eq!(ProcedureCategory::from_subsection("G"), None);
    }

    #[test]
    fn deserialize_leg_row() {
        let csv = "ARPT_IDENT,SUBS_CODE,ROUTE_TYPE,SEQ_NR,PROC_IDENT,TRANSITION_IDENT,PATH_AND_TERMINATION,\
                   FIX_IDENT,FIX_SECT_CODE,FIX_SUBS_CODE,WAYPOINT_DESCR_CODE,MAG_COURSE,ALT_DESCR,ALT_1\n\
                   ZSPD,D,5,10,PIK1A,RW17L,CF,PD170,P,C,E  M,171.5,+,3000\n";
        let legs: Vec<ProcedureLeg> = super::super::parse_table(csv.as_bytes()).unwrap();
        let leg = &legs[0];
        assert_eq!(leg.sequence, 10);
        assert_eq!(leg.transition_ident(), Some("RW17L"));
        assert_eq!(leg.path_terminator(), PathTerminator::CourseToFix);
        assert_eq!(leg.descriptor_flag(3), Some('M'));
        assert_eq!(leg.course, Some(171.5));
        assert_eq!(leg.altitude1, Some(3000.0));
        assert_eq!(leg.rho, None);
        assert_eq!(leg.category(), Some(ProcedureCategory::Sid));
    }
}
