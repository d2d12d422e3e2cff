use std::fmt::Write as _;

use anyhow::{bail, Context as _};
use exer_core::{action, style};
use exer_webclient::{ApiClient, DownloadTarget};

use super::{GlobalArgs, SubcmdResult};
use crate::config::{GlobalConfig, BIN_NAME};

/// Download an exercise.
///
/// If you've already started working on it, your latest solution is
/// downloaded too. Download other people's solutions by providing the UUID.
#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub exercise: Option<String>,

    /// The solution UUID
    #[arg(short, long)]
    pub uuid: Option<String>,

    /// The track ID
    #[arg(short, long)]
    pub track: Option<String>,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let target = DownloadTarget::from_args(
        args.uuid.as_deref(),
        args.exercise.as_deref(),
        args.track.as_deref(),
    )
    .context("Need an exercise name or a solution --uuid")?;

    let cfg = GlobalConfig::from_file_and_args(global_args)?;
    let cli = ApiClient::new(cfg.api.clone()).context("Failed to set up API client")?;

    let report = match action::download_solution(&cli, &target, &cfg.workspace).await {
        Ok(report) => report,
        Err(e) => {
            if let Some(exer_webclient::Error::TrackAmbiguous {
                exercise,
                possible_track_ids,
            }) = e.downcast_ref::<exer_webclient::Error>()
            {
                // TODO: let the user pick the track interactively.
                eprint!("{}", track_ambiguous_guidance(exercise, possible_track_ids));
                std::process::exit(1);
            }
            return Err(e);
        }
    };

    style::print_download_report(&report);

    if !report.is_complete() {
        bail!(
            "Failed to download {} of {} files",
            report.failed.len(),
            report.total_files()
        );
    }
    Ok(())
}

pub fn track_ambiguous_guidance(exercise: &str, track_ids: &[String]) -> String {
    let mut s = format!(
        "You have multiple {} exercises available to you.\nSpecify the --track flag:\n",
        exercise
    );
    for id in track_ids {
        let _ = writeln!(s, "  {} download {} --track={}", BIN_NAME, exercise, id);
    }
    s
}
