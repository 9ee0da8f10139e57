//! Rendering of procedure variants into iFly text files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::ExportOptions;
use crate::data::arinc424::airport::Airport;
use crate::data::arinc424::procedure_leg::ProcedureCategory;

use super::segment::{CategoryVariants, VariantMap};

/// Line terminator of every exported file.
pub const LINE_ENDING: &str = "\r\n";

/// Speed restrictions apply below this height above a high airport.
const SPEED_TRANSITION_HEIGHT_FT: i64 = 10_000;
/// Airports below this elevation use a fixed speed transition altitude.
const HIGH_AIRPORT_FT: i64 = 5_000;

/// A file of the exported tree, with its path relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    fn new(directory: &str, file_name: String, lines: Vec<String>) -> Self {
        Artifact {
            path: Path::new(directory).join(file_name),
            contents: lines.join(LINE_ENDING),
        }
    }
}

/// Render a variant map as a `[list]` manifest followed by one section per leg.
///
/// Keys come out in ascending order, the order of the map.
pub fn render_procedures(variants: &VariantMap) -> Vec<String> {
    let mut lines = vec!["[list]".to_string()];
    lines.extend(
        variants
            .keys()
            .enumerate()
            .map(|(i, key)| format!("Procedure.{i}={key}")),
    );
    for (key, legs) in variants {
        for (k, leg) in legs.iter().enumerate() {
            lines.push(format!("[{key}.{k}]"));
            lines.extend(leg.lines().iter().cloned());
        }
    }
    lines
}

fn extension(category: ProcedureCategory) -> (&'static str, &'static str) {
    match category {
        ProcedureCategory::Sid => ("Sid", "sid"),
        ProcedureCategory::Star => ("Star", "star"),
        ProcedureCategory::Approach => ("Star", "app"),
    }
}

/// The procedure and transition files of one airport and category.
///
/// Empty maps produce no file.
pub fn procedure_artifacts(airport: &str, category: ProcedureCategory, variants: &CategoryVariants) -> Vec<Artifact> {
    let (directory, extension) = extension(category);
    [(&variants.main, ""), (&variants.transitions, "trs")]
        .into_iter()
        .filter(|(map, _)| !map.is_empty())
        .map(|(map, suffix)| {
            Artifact::new(
                directory,
                format!("{airport}.{extension}{suffix}"),
                render_procedures(map),
            )
        })
        .collect()
}

/// Speed restriction and transition altitudes of an airport.
pub fn render_supplement(airport: &Airport, options: &ExportOptions) -> Artifact {
    let elevation = airport.elevation as i64;
    let base = if elevation >= HIGH_AIRPORT_FT { elevation } else { 0 };
    let speed_altitude = (base + SPEED_TRANSITION_HEIGHT_FT) / 1000 * 1000;
    let transition_altitude = airport
        .transition_altitude
        .map_or(options.default_transition_altitude, |ft| ft as i64);
    let transition_level = airport
        .transition_level
        .map_or(options.default_transition_level, |ft| ft as i64);

    let lines = vec![
        "[Speed_Transition]".to_string(),
        format!("Speed={}", options.speed_limit),
        format!("Altitude={speed_altitude}"),
        "[Transition_Altitude]".to_string(),
        format!("Altitude={transition_altitude}"),
        "[Transition_Level]".to_string(),
        format!("Altitude={transition_level}"),
    ];
    Artifact::new("Supp", format!("{}.supp", airport.ident.trim()), lines)
}

/// Write artifacts below `root`, creating directories as needed.
pub fn write_artifacts(root: &Path, artifacts: &[Artifact]) -> io::Result<()> {
    for artifact in artifacts {
        let path = root.join(&artifact.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &artifact.contents)?;
        tracing::info!("Exported: {}", artifact.path.display());
    }
    Ok(())
}
