use std::path::{Path, PathBuf};

use anyhow::Context as _;
use exer_webclient::{ApiClient, DownloadTarget, SolutionFile, Url};
use tokio::io::AsyncWriteExt as _;

use crate::error::{Error, Result};
use crate::storage::{Solution, Workspace};

#[derive(Debug)]
pub struct FailedFile {
    pub file: String,
    pub error: Error,
}

/// Outcome of [`download_solution`].
#[derive(Debug)]
pub struct DownloadReport {
    pub solution: Solution,
    pub solution_dir: PathBuf,
    pub saved: Vec<PathBuf>,
    /// Files the server reported as empty.
    pub skipped: Vec<String>,
    pub failed: Vec<FailedFile>,
}

impl DownloadReport {
    fn new(solution: Solution) -> Self {
        Self {
            solution_dir: solution.dir.clone(),
            solution,
            saved: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn total_files(&self) -> usize {
        self.saved.len() + self.skipped.len() + self.failed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Download a solution and every file in it into `workspace_root`.
///
/// Anything failing before the file loop is fatal. A file that cannot be
/// fetched or saved is recorded in [`DownloadReport::failed`] and the loop
/// moves on to the next one.
pub async fn download_solution(
    cli: &ApiClient,
    target: &DownloadTarget,
    workspace_root: impl AsRef<Path>,
) -> Result<DownloadReport> {
    let payload = cli.fetch_solution(target).await?;

    let mut solution =
        Solution::from_payload(&payload).context("Refusing to save the downloaded solution")?;
    let base_url = payload.file_download_base_url()?;

    let parent = workspace_root.as_ref().join(solution.path_to_parent());
    fsutil::mkdir_all(&parent)?;

    let dir = Workspace::new(&parent).create_solution_dir(&solution.exercise, &solution.id)?;
    solution
        .write(&dir)
        .context("Failed to save solution metadata")?;

    let mut report = DownloadReport::new(solution);

    for wire in &payload.files {
        match save_solution_file(cli, &base_url, wire, &dir).await {
            Ok(Some(path)) => {
                log::debug!("Saved {}", path.to_string_lossy());
                report.saved.push(path);
            }
            Ok(None) => {
                log::debug!("Nothing to save for {}", wire);
                report.skipped.push(wire.clone());
            }
            Err(error) => {
                log::warn!("Failed to download {}: {:#}", wire, error);
                report.failed.push(FailedFile {
                    file: wire.clone(),
                    error,
                });
            }
        }
    }
    Ok(report)
}

/// Returns the saved path, or `None` when the server declares an empty body.
async fn save_solution_file(
    cli: &ApiClient,
    base_url: &Url,
    wire: &str,
    solution_dir: &Path,
) -> Result<Option<PathBuf>> {
    let file = SolutionFile::parse(wire)?;
    let mut resp = cli.fetch_file(base_url, &file).await?;

    if resp.content_length() == Some(0) {
        return Ok(None);
    }

    // TODO: ask before overwriting a file the user has already edited.
    let dest = solution_dir.join(file.local_path());
    let mut out = tokio::fs::File::from_std(fsutil::create_with_mkdir(&dest)?);

    let copied = async {
        while let Some(chunk) = resp.chunk().await? {
            out.write_all(&chunk)
                .await
                .map_err(|e| fsutil::write_error(&dest, e))?;
        }
        out.flush().await.map_err(|e| fsutil::write_error(&dest, e))?;
        Ok::<_, Error>(())
    }
    .await;
    drop(out);

    if let Err(e) = copied {
        discard_partial(&dest);
        return Err(e.context(format!("Failed to save {}", dest.to_string_lossy())));
    }
    Ok(Some(dest))
}

/// Remove a file whose download broke off. Returns whether it is gone.
fn discard_partial(dest: &Path) -> bool {
    match fsutil::remove_file(dest) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Partial file left behind: {}", e);
            false
        }
    }
}
