//! The export pipeline: load the tables, build every airport's files, write
//! them and pack the tree.

pub mod leg;
pub mod package;
pub mod segment;
pub mod writer;

use std::io;

use thiserror::Error;
use zip::result::ZipError;

use crate::config::ExportOptions;
use crate::data::arinc424::database::NavigationDatabase;
use crate::data::arinc424::procedure_leg::ProcedureCategory;
use crate::data::arinc424::LoadError;
use crate::diagnostics::Diagnostics;

use leg::LegEncoder;
use writer::Artifact;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("failed to pack output: {0}")]
    Zip(#[from] ZipError),
}

/// Every file of the exported tree: one supplement per airport, then the
/// procedure files of each category.
pub fn build_artifacts(db: &NavigationDatabase, options: &ExportOptions, diagnostics: &mut Diagnostics) -> Vec<Artifact> {
    let mut artifacts: Vec<Artifact> = db
        .airports()
        .map(|airport| writer::render_supplement(airport, options))
        .collect();

    let encoder = LegEncoder::new(db);
    for category in ProcedureCategory::ALL {
        let by_airport = db.procedures_by_airport(category);
        tracing::debug!("{} airports with {category} procedures", by_airport.len());
        for (airport, rows) in by_airport {
            let variants = segment::assemble(category, airport, &rows, db.runways(airport), &encoder, diagnostics);
            artifacts.extend(writer::procedure_artifacts(airport, category, &variants));
        }
    }
    artifacts
}

fn export(options: &ExportOptions, diagnostics: &mut Diagnostics) -> Result<(), ExportError> {
    let db = NavigationDatabase::new(&options.input)?.with_too_far_threshold(options.too_far_km);
    package::prepare_output_dir(&options.output_dir)?;

    let artifacts = build_artifacts(&db, options, diagnostics);
    writer::write_artifacts(&options.output_dir, &artifacts)?;

    if let Some(notes) = &options.installation_notes {
        package::copy_into(&options.output_dir, notes)?;
    }
    if let Some(archive) = &options.archive {
        package::pack_directory(&options.output_dir, archive)?;
    }
    Ok(())
}

/// Run a complete export.
///
/// The diagnostics report is written even when the export fails.
pub fn run(options: &ExportOptions) -> Result<Diagnostics, ExportError> {
    let mut diagnostics = Diagnostics::new();
    let result = export(options, &mut diagnostics);
    let report = diagnostics.write_report(&options.report);
    result?;
    report?;
    tracing::info!("{} diagnostics written to {}", diagnostics.len(), options.report.display());
    Ok(diagnostics)
}
