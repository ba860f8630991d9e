//! Catalog updater entry point.
//!
//! # Responsibility
//! - Parse flags, wire source adapters, and run one reconciliation.
//! - Map outcomes to exit codes: only a fatal build-system failure is a
//!   process error; everything else logs and exits normally.

use clap::Parser;
use log::{error, info};
use pkgcatalog_core::db::open_db;
use pkgcatalog_core::reconcile::run::{run_update, RunOptions, UpdateSources, DEFAULT_BYPASS_TAG};
use pkgcatalog_core::source::build_system::HttpBuildSystemSource;
use pkgcatalog_core::source::curated::{CuratedSource, HttpCuratedSource};
use pkgcatalog_core::source::metadata::FileMetadataSource;
use pkgcatalog_core::{default_log_level, init_logging};
use std::path::PathBuf;
use std::process::ExitCode;

/// Update the package catalog from its authoritative sources.
#[derive(Debug, Parser)]
#[command(name = "pkgcatalog-update", version)]
struct Args {
    /// Path to the catalog database file.
    #[arg(long)]
    database: PathBuf,

    /// Base URL of the build-system hub.
    #[arg(long)]
    build_system_url: String,

    /// Path to the local package-metadata dump (YAML).
    #[arg(long)]
    metadata_file: PathBuf,

    /// Number of summaries to backfill from local metadata; 0 = no limit.
    /// Time intensive.
    #[arg(short = 'n', long, default_value_t = 0)]
    summaries_to_process: usize,

    /// URL for a curated application list. Absent = skip that pass.
    #[arg(short = 'u', long)]
    url_for_curated_apps: Option<String>,

    /// Build-system tag whose packages are skipped on import.
    #[arg(long, default_value_t = DEFAULT_BYPASS_TAG)]
    bypass_tag: i64,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, default_value_t = default_log_level().to_string())]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = init_logging(&args.log_level) {
        eprintln!("pkgcatalog-update: {err}");
        return ExitCode::FAILURE;
    }

    let mut conn = match open_db(&args.database) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=cli module=cli status=error stage=db_open error={err}");
            return ExitCode::FAILURE;
        }
    };

    let build_system = HttpBuildSystemSource::new(&args.build_system_url);
    let metadata = FileMetadataSource::open(&args.metadata_file);
    let curated = args.url_for_curated_apps.as_deref().map(HttpCuratedSource::new);

    let sources = UpdateSources {
        build_system: &build_system,
        metadata: &metadata,
        curated: curated.as_ref().map(|source| source as &dyn CuratedSource),
    };
    let options = RunOptions {
        summaries_to_process: args.summaries_to_process,
        bypass_tag: args.bypass_tag,
    };

    match run_update(&mut conn, &sources, &options) {
        Ok(report) => {
            info!(
                "event=cli module=cli status=ok new_packages={} enriched={} curated_apps={}",
                report.new_packages, report.backfill.enriched, report.curated_apps
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli module=cli status=error stage=run_update error={err}");
            ExitCode::FAILURE
        }
    }
}
