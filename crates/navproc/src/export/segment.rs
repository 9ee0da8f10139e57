//! Segmentation of leg rows into procedures and their runway or transition
//! variants.
//!
//! Leg rows carry no explicit procedure boundary: a new procedure starts
//! wherever the sequence number stops increasing. Each procedure group is
//! then filed under a variant key, `PROCEDURE.RUNWAY` for the procedure
//! proper or `TRANSITION.PROCEDURE` for enroute transitions.

use std::collections::BTreeMap;
use std::fmt;

use crate::data::arinc424::procedure_leg::{ProcedureCategory, ProcedureLeg};
use crate::data::arinc424::runway::Runway;
use crate::diagnostics::{Diagnostic, Diagnostics};

use super::leg::{Leg, LegEncoder};

/// Transition code of the legs common to all runways.
pub const ALL_RUNWAYS: &str = "ALL";

/// Placeholder transition matching every runway of the airport.
const ANY_RUNWAY: &str = "RW";

/// A run of contiguous leg rows forming one procedure (or transition).
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureGroup<'a> {
    pub ident: &'a str,
    pub route_type: &'a str,
    pub transition: Option<&'a str>,
    pub legs: Vec<&'a ProcedureLeg>,
}

impl<'a> ProcedureGroup<'a> {
    /// The group's identification comes from its first row.
    fn from_rows(rows: &[&'a ProcedureLeg]) -> Option<Self> {
        let first = *rows.first()?;
        Some(ProcedureGroup {
            ident: first.procedure.trim(),
            route_type: first.route_type.trim(),
            transition: first.transition_ident(),
            legs: rows.to_vec(),
        })
    }
}

/// Split ordered leg rows into procedures.
///
/// A new procedure starts at every row whose sequence number is not strictly
/// greater than the previous one.
pub fn split_procedures<'a>(rows: &[&'a ProcedureLeg]) -> Vec<ProcedureGroup<'a>> {
    rows.chunk_by(|previous, current| current.sequence > previous.sequence)
        .filter_map(ProcedureGroup::from_rows)
        .collect()
}

/// Key of a procedure variant, e.g. `PIK1A.17L` or `ELNEX.PIK1A`.
///
/// Keys order lexicographically, which is the order of the output manifest.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariantKey(String);

impl VariantKey {
    pub fn new(head: &str, tail: &str) -> Self {
        VariantKey(format!("{head}.{tail}"))
    }

    /// The part before the first dot.
    pub fn head(&self) -> &str {
        self.0.split_once('.').map_or(self.0.as_str(), |(head, _)| head)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encoded legs per variant key.
pub type VariantMap = BTreeMap<VariantKey, Vec<Leg>>;

/// All variants of one airport and category.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CategoryVariants {
    pub main: VariantMap,
    pub transitions: VariantMap,
}

impl CategoryVariants {
    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.transitions.is_empty()
    }
}

/// Append the legs common to all runways to a runway variant.
///
/// The first common leg repeats the last fix of the runway variant and is
/// dropped.
pub fn merge_common_legs(variant: &mut Vec<Leg>, common: &[Leg]) {
    variant.extend(common.iter().skip(1).cloned());
}

/// Strip the trailing `B` ("both sides") of a runway transition code.
fn runway_pattern(transition: &str) -> &str {
    transition.strip_suffix('B').unwrap_or(transition)
}

/// Collects the groups of one airport's SIDs or STARs into variants.
///
/// Runway-specific groups are filed under every runway their transition code
/// matches, replacing any variant already under that key. Groups common to all
/// runways extend the variants of the same procedure built so far, or are
/// filed under every runway when there is none yet.
pub struct RunwayVariants<'a> {
    airport: &'a str,
    runways: &'a [Runway],
    main: VariantMap,
    transitions: VariantMap,
}

impl<'a> RunwayVariants<'a> {
    pub fn new(airport: &'a str, runways: &'a [Runway]) -> Self {
        RunwayVariants {
            airport,
            runways,
            main: VariantMap::new(),
            transitions: VariantMap::new(),
        }
    }

    pub fn add_transition(&mut self, transition: &str, ident: &str, legs: Vec<Leg>) {
        self.transitions.insert(VariantKey::new(transition, ident), legs);
    }

    pub fn add_procedure(&mut self, ident: &str, transition: Option<&str>, legs: Vec<Leg>, diagnostics: &mut Diagnostics) {
        let transition = match transition {
            None | Some(ALL_RUNWAYS) => {
                let mut merged = false;
                for (_, variant) in self.main.iter_mut().filter(|(key, _)| key.head() == ident) {
                    merge_common_legs(variant, &legs);
                    merged = true;
                }
                if merged {
                    return;
                }
                ANY_RUNWAY
            }
            Some(transition) => transition,
        };
        let variants = file_by_runway(self.airport, self.runways, ident, transition, legs, diagnostics);
        self.main.extend(variants);
    }

    pub fn finish(self) -> CategoryVariants {
        CategoryVariants {
            main: self.main,
            transitions: self.transitions,
        }
    }
}

/// File a procedure under `IDENT.RUNWAY` for every runway matching its
/// transition code.
fn file_by_runway(
    airport: &str,
    runways: &[Runway],
    ident: &str,
    transition: &str,
    legs: Vec<Leg>,
    diagnostics: &mut Diagnostics,
) -> VariantMap {
    let pattern = runway_pattern(transition);
    let variants: VariantMap = runways
        .iter()
        .filter(|runway| runway.ident.contains(pattern))
        .map(|runway| (VariantKey::new(ident, runway.designator()), legs.clone()))
        .collect();
    if variants.is_empty() {
        diagnostics.push(Diagnostic::NoMatchingRunway {
            airport: airport.to_string(),
            procedure: ident.to_string(),
            transition: transition.to_string(),
        });
    }
    variants
}

/// The runway an approach serves, from its identifier: `I09L` gives `09L`.
fn approach_runway(ident: &str) -> Option<String> {
    let mut runway: String = ident.chars().skip(1).take(2).collect();
    if runway.is_empty() || !runway.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if let Some(side @ ('L' | 'R')) = ident.chars().nth(3) {
        runway.push(side);
    }
    Some(runway)
}

/// Segment, encode and file the legs of one airport and category.
pub fn assemble(
    category: ProcedureCategory,
    airport: &str,
    rows: &[&ProcedureLeg],
    runways: &[Runway],
    encoder: &LegEncoder,
    diagnostics: &mut Diagnostics,
) -> CategoryVariants {
    let encode = |group: &ProcedureGroup, diagnostics: &mut Diagnostics| -> Vec<Leg> {
        group.legs.iter().map(|leg| encoder.encode(leg, diagnostics)).collect()
    };

    let Some(route_types) = category.route_types() else {
        let mut variants = CategoryVariants::default();
        for group in split_procedures(rows) {
            let legs = encode(&group, diagnostics);
            if category.is_transition(group.route_type) {
                let key = VariantKey::new(group.transition.unwrap_or_default(), group.ident);
                variants.transitions.insert(key, legs);
            } else if let Some(runway) = approach_runway(group.ident) {
                variants.main.insert(VariantKey::new(group.ident, &runway), legs);
            } else {
                // one warning per runway the approach is filed under
                for runway in runways {
                    variants
                        .main
                        .insert(VariantKey::new(group.ident, runway.designator()), legs.clone());
                    diagnostics.push(Diagnostic::UncertainRunway {
                        airport: airport.to_string(),
                        procedure: group.ident.to_string(),
                        transition: group.transition.unwrap_or_default().to_string(),
                    });
                }
            }
        }
        return variants;
    };

    let mut variants = RunwayVariants::new(airport, runways);
    for route_type in route_types {
        let typed: Vec<&ProcedureLeg> = rows
            .iter()
            .copied()
            .filter(|leg| leg.route_type.trim() == *route_type)
            .collect();
        let groups = split_procedures(&typed);
        tracing::debug!("{airport}: {} {category} groups of route type {route_type}", groups.len());
        for group in groups {
            let legs = encode(&group, diagnostics);
            if category.is_transition(route_type) {
                variants.add_transition(group.transition.unwrap_or_default(), group.ident, legs);
            } else {
                variants.add_procedure(group.ident, group.transition, legs, diagnostics);
            }
        }
    }
    variants.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::arinc424::database::NavigationDatabase;
    use proptest::prelude::*;

    fn row(route_type: &str, procedure: &str, transition: &str, sequence: u32) -> ProcedureLeg {
        ProcedureLeg {
            airport: "ZZZZ".to_string(),
            subsection: "D".to_string(),
            route_type: route_type.to_string(),
            sequence,
            procedure: procedure.to_string(),
            transition: Some(transition.to_string()),
            path_termination: "VA".to_string(),
            course: Some(f64::from(sequence)),
            altitude1: Some(1000.0),
            ..Default::default()
        }
    }

    fn runways(idents: &[&str]) -> Vec<Runway> {
        idents
            .iter()
            .map(|ident| Runway {
                airport: "ZZZZ".to_string(),
                ident: ident.to_string(),
                ..Default::default()
            })
            .collect()
    }

    fn empty_database() -> NavigationDatabase {
        NavigationDatabase::from_tables(vec![], vec![], vec![], vec![], vec![], vec![])
    }

    fn headings(legs: &[Leg]) -> Vec<&str> {
        legs.iter().filter_map(|leg| leg.get("Heading")).collect()
    }

    fn run(
        category: ProcedureCategory,
        rows: &[ProcedureLeg],
        runways: &[Runway],
    ) -> (CategoryVariants, Diagnostics) {
        let database = empty_database();
        let encoder = LegEncoder::new(&database);
        let rows: Vec<&ProcedureLeg> = rows.iter().collect();
        let mut diagnostics = Diagnostics::new();
        let variants = assemble(category, "ZZZZ", &rows, runways, &encoder, &mut diagnostics);
        (variants, diagnostics)
    }

    fn keys(map: &VariantMap) -> Vec<&str> {
        map.keys().map(VariantKey::as_str).collect()
    }

    #[test]
    fn split_on_sequence_reset() {
        let rows = [
            row("2", "ABC1", "ALL", 10),
            row("2", "ABC1", "ALL", 20),
            row("2", "ABC1", "ALL", 30),
            row("2", "DEF2", "ALL", 10),
            row("2", "DEF2", "ALL", 20),
            row("2", "GHI3", "ALL", 20),
        ];
        let rows: Vec<&ProcedureLeg> = rows.iter().collect();
        let groups = split_procedures(&rows);
        let sizes: Vec<_> = groups.iter().map(|g| (g.ident, g.legs.len())).collect();
        assert_eq!(sizes, [("ABC1", 3), ("DEF2", 2), ("GHI3", 1)]);
        assert!(split_procedures(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn split_preserves_rows(sequences in prop::collection::vec(0u32..50, 0..40)) {
            let rows: Vec<ProcedureLeg> = sequences.iter().map(|&s| row("2", "ABC1", "ALL", s)).collect();
            let refs: Vec<&ProcedureLeg> = rows.iter().collect();
            let groups = split_procedures(&refs);

            let flattened: Vec<u32> = groups.iter().flat_map(|g| g.legs.iter().map(|l| l.sequence)).collect();
            prop_assert_eq!(&flattened, &sequences);
            for group in &groups {
                prop_assert!(group.legs.windows(2).all(|w| w[1].sequence > w[0].sequence));
            }
            for pair in groups.windows(2) {
                let last = pair[0].legs.last().map(|l| l.sequence);
                let first = pair[1].legs.first().map(|l| l.sequence);
                prop_assert!(first <= last);
            }
        }
    }

    #[test]
    fn variant_key_head() {
        let key = VariantKey::new("ABC1", "09L");
        assert_eq!(key.as_str(), "ABC1.09L");
        assert_eq!(key.head(), "ABC1");
        assert_eq!(key.to_string(), "ABC1.09L");
    }

    #[test]
    fn common_route_extends_runway_variants_read_before_it() {
        // STAR runway transitions (3) are read before common routes (2)
        let rows = [
            row("2", "ABC1", "ALL", 10),
            row("2", "ABC1", "ALL", 20),
            row("2", "ABC1", "ALL", 30),
            row("3", "ABC1", "RW09L", 11),
            row("3", "ABC1", "RW09L", 21),
            row("3", "ABC1", "RW09L", 31),
        ];
        let (variants, diagnostics) = run(ProcedureCategory::Star, &rows, &runways(&["RW09L", "RW27R"]));
        assert!(diagnostics.is_empty());
        assert_eq!(keys(&variants.main), ["ABC1.09L"]);
        let legs = &variants.main[&VariantKey::new("ABC1", "09L")];
        assert_eq!(headings(legs), ["11.0", "21.0", "31.0", "20.0", "30.0"]);
    }

    #[test]
    fn runway_variant_read_after_common_route_replaces_it() {
        // SID common routes (2) are read before RNAV runway transitions (4)
        let rows = [
            row("2", "ABC1", "ALL", 10),
            row("2", "ABC1", "ALL", 20),
            row("2", "ABC1", "ALL", 30),
            row("4", "ABC1", "RW09L", 11),
            row("4", "ABC1", "RW09L", 21),
            row("4", "ABC1", "RW09L", 31),
        ];
        let (variants, diagnostics) = run(ProcedureCategory::Sid, &rows, &runways(&["RW09L", "RW27R"]));
        assert!(diagnostics.is_empty());
        let sizes: Vec<_> = variants.main.iter().map(|(key, legs)| (key.as_str(), legs.len())).collect();
        assert_eq!(sizes, [("ABC1.09L", 3), ("ABC1.27R", 3)]);
        assert_eq!(headings(&variants.main[&VariantKey::new("ABC1", "09L")]), ["11.0", "21.0", "31.0"]);
        assert_eq!(headings(&variants.main[&VariantKey::new("ABC1", "27R")]), ["10.0", "20.0", "30.0"]);
    }

    #[test]
    fn merge_drops_first_common_leg() {
        let leg = |name: &str| Leg::from(vec![format!("Name={name}")]);
        let mut variant = vec![leg("A"), leg("B")];
        merge_common_legs(&mut variant, &[leg("B"), leg("C"), leg("D")]);
        assert_eq!(variant, [leg("A"), leg("B"), leg("C"), leg("D")]);
    }

    #[test]
    fn both_sides_transition_matches_parallel_runways() {
        let rows = [row("1", "ABC1", "RW09B", 10), row("1", "ABC1", "RW09B", 20)];
        let (variants, diagnostics) = run(ProcedureCategory::Sid, &rows, &runways(&["RW09L", "RW09R", "RW27L"]));
        assert!(diagnostics.is_empty());
        assert_eq!(keys(&variants.main), ["ABC1.09L", "ABC1.09R"]);
    }

    #[test]
    fn common_only_procedure_applies_to_every_runway() {
        let rows = [
            row("5", "XYZ2", "ALL", 10),
            row("5", "XYZ2", "ALL", 20),
            row("5", "XYZ2", "", 10),
            row("5", "XYZ2", "", 20),
        ];
        let (variants, diagnostics) = run(ProcedureCategory::Sid, &rows, &runways(&["RW09L", "RW27R"]));
        assert!(diagnostics.is_empty());
        assert_eq!(keys(&variants.main), ["XYZ2.09L", "XYZ2.27R"]);
        let legs = &variants.main[&VariantKey::new("XYZ2", "27R")];
        assert_eq!(headings(legs), ["10.0", "20.0", "20.0"]);
    }

    #[test]
    fn unmatched_runway_is_dropped() {
        let rows = [row("1", "ABC1", "RW18", 10)];
        let (variants, diagnostics) = run(ProcedureCategory::Sid, &rows, &runways(&["RW09L"]));
        assert!(variants.is_empty());
        assert_eq!(diagnostics.report(), "Warning: no runway matches ZZZZ:ABC1:RW18");
    }

    #[test]
    fn enroute_transitions() {
        let rows = [
            row("3", "ABC1", "ELNEX", 10),
            row("3", "ABC1", "ELNEX", 20),
            row("6", "ABC1", "PIKAS", 10),
        ];
        let (variants, _) = run(ProcedureCategory::Sid, &rows, &runways(&["RW09L"]));
        assert!(variants.main.is_empty());
        assert_eq!(keys(&variants.transitions), ["ELNEX.ABC1", "PIKAS.ABC1"]);

        let (variants, _) = run(ProcedureCategory::Star, &[row("1", "DEF2", "ROMOS", 10)], &[]);
        assert_eq!(keys(&variants.transitions), ["ROMOS.DEF2"]);
    }

    #[test]
    fn approach_runway_from_ident() {
        assert_eq!(approach_runway("I09L").as_deref(), Some("09L"));
        assert_eq!(approach_runway("R27").as_deref(), Some("27"));
        assert_eq!(approach_runway("D18C").as_deref(), Some("18"));
        assert_eq!(approach_runway("VDMA"), None);
        assert_eq!(approach_runway("I"), None);
    }

    #[test]
    fn approaches() {
        let rows = [
            row("A", "I09L", "ZZV", 10),
            row("A", "I09L", "ZZV", 20),
            row("I", "I09L", "", 10),
            row("I", "I09L", "", 20),
            row("V", "VDMA", "", 10),
        ];
        let (variants, diagnostics) = run(ProcedureCategory::Approach, &rows, &runways(&["RW09L", "RW27R"]));
        assert_eq!(keys(&variants.transitions), ["ZZV.I09L"]);
        assert_eq!(keys(&variants.main), ["I09L.09L", "VDMA.09L", "VDMA.27R"]);
        assert_eq!(
            diagnostics.report(),
            "Warning: uncertain runway, added to all. ZZZZ:VDMA:\r\n\
             Warning: uncertain runway, added to all. ZZZZ:VDMA:"
        );
    }

    #[test]
    fn approach_without_runways_is_dropped_silently() {
        let (variants, diagnostics) = run(ProcedureCategory::Approach, &[row("V", "VDMA", "", 10)], &[]);
        assert!(variants.is_empty());
        assert!(diagnostics.is_empty());
    }
}
