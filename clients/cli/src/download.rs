use std::io::{self, IsTerminal};

use cli_rs::cli_error::CliResult;
use colored::Colorize;
use drive_mirror::blocking::Mirror;
use drive_mirror::service::mirror::{SyncProgress, SyncSummary};
use drive_mirror::Config;

use crate::mirror_err;

pub fn download_data() -> CliResult<()> {
    let config = Config::cli_config().map_err(mirror_err)?;
    let mirror = Mirror::init(config).map_err(mirror_err)?;

    let update_status = Some(|progress: SyncProgress| println!("{}", status_line(&progress)));
    let summary = mirror.download_data(&update_status).map_err(mirror_err)?;

    if io::stdout().is_terminal() {
        println!("{}", summary_line(&summary).green());
    }

    Ok(())
}

fn status_line(progress: &SyncProgress) -> String {
    format!("[{}] {}", progress.action, progress.local_path.display())
}

fn summary_line(summary: &SyncSummary) -> String {
    format!(
        "{} created, {} updated, {} skipped",
        summary.created, summary.updated, summary.skipped
    )
}
