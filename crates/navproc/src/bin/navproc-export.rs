use std::path::PathBuf;

use clap::Parser;
use navproc::config::ExportOptions;
use navproc::export;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "navproc-export")]
#[command(about = "Export ARINC-424 terminal procedures to iFly procedure files", long_about = None)]
struct Args {
    /// Directory or zip archive holding the CSV tables
    input: PathBuf,

    /// Directory the procedure files are written to
    output_dir: Option<PathBuf>,

    /// Pack the exported tree into this zip archive
    #[arg(long)]
    archive: Option<PathBuf>,

    /// JSON options file, overridden by the other arguments
    #[arg(long)]
    config: Option<PathBuf>,

    /// Installation notes copied at the root of the exported tree
    #[arg(long)]
    notes: Option<PathBuf>,
}

impl Args {
    fn apply(self, mut options: ExportOptions) -> ExportOptions {
        options.input = self.input;
        if let Some(output_dir) = self.output_dir {
            options.output_dir = output_dir;
        }
        if self.archive.is_some() {
            options.archive = self.archive;
        }
        if self.notes.is_some() {
            options.installation_notes = self.notes;
        }
        options
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let options = match &args.config {
        Some(path) => ExportOptions::from_json_file(path)?,
        None => ExportOptions::default(),
    };
    let options = args.apply(options);

    let diagnostics = export::run(&options)?;
    println!("{} diagnostics recorded in {}", diagnostics.len(), options.report.display());
    Ok(())
}
