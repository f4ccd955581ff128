//! The `generate` command: settings resolution and the conversion run.

use clap::Args;
use std::io::Write;
use std::path::{Path, PathBuf};

use docsn_core::{SiteWriter, generate};
use tracing::{debug, info};

use crate::config::Settings;

/// Flags of the `generate` command. Each one overrides the settings file.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Settings file (defaults to ./docsn.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Extractor JSON to convert
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: Option<PathBuf>,
    /// Directory receiving the generated documents
    #[arg(long = "out-dir", short = 'o', value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
    /// File name of the table of contents
    #[arg(long = "toc-file", value_name = "NAME")]
    pub toc_file: Option<String>,
    /// Also write the search index under this file name
    #[arg(long = "search-file", value_name = "NAME")]
    pub search_file: Option<String>,
    /// Print every skipped declaration after writing
    #[arg(long = "print-skipped")]
    pub print_skipped: bool,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    /// Settings the run used, after flag overrides.
    pub settings: Settings,
    /// Number of class documents written.
    pub class_documents: usize,
    /// Skip log of the walk.
    pub skipped: Vec<String>,
}

/// Merge settings file and flags; relative paths resolve against `cwd`.
pub fn resolve_settings(args: &GenerateArgs, cwd: &Path) -> Result<Settings, String> {
    let explicit = args.config.as_ref().map(|p| cwd.join(p));
    let mut settings = Settings::load(explicit.as_deref(), cwd)?;

    if let Some(input) = &args.input {
        settings.input.clone_from(input);
    }
    if let Some(out_dir) = &args.out_dir {
        settings.out_dir.clone_from(out_dir);
    }
    if let Some(toc_file) = &args.toc_file {
        settings.toc_file.clone_from(toc_file);
    }
    if args.search_file.is_some() {
        settings.search_file.clone_from(&args.search_file);
    }

    settings.input = cwd.join(&settings.input);
    settings.out_dir = cwd.join(&settings.out_dir);
    Ok(settings)
}

/// Run the conversion with `cwd` as the working directory.
pub fn execute(args: &GenerateArgs, cwd: &Path) -> Result<GenerateReport, String> {
    let settings = resolve_settings(args, cwd)?;
    debug!(
        input = %settings.input.display(),
        out_dir = %settings.out_dir.display(),
        "Resolved generate settings."
    );

    let writer = SiteWriter::new(&settings.out_dir)
        .toc_file(settings.toc_file.clone())
        .search_file(settings.search_file.clone());
    let (normalization, summary) =
        generate(&settings.input, &writer).map_err(|err| err.to_string())?;

    info!(
        classes = summary.class_documents,
        out_dir = %settings.out_dir.display(),
        "Generated class documents."
    );

    Ok(GenerateReport {
        settings,
        class_documents: summary.class_documents,
        skipped: normalization.skipped,
    })
}

/// Entry point of the `generate` command; returns the process exit code.
pub fn run(args: &GenerateArgs) -> i32 {
    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(err) => {
            eprintln!("Failed to determine working directory: {err}");
            return 1;
        }
    };

    match execute(args, &cwd) {
        Ok(report) => {
            let mut stdout = std::io::stdout().lock();
            if args.print_skipped {
                for entry in &report.skipped {
                    let _ = writeln!(stdout, "{entry}");
                }
            }
            let _ = writeln!(
                stdout,
                "Wrote {} class documents to {}",
                report.class_documents,
                report.settings.out_dir.display()
            );
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}
