use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use filetime::FileTime;

use crate::io::remote::{FetchRequest, Remote};
use crate::model::conversion::conversion_for;
use crate::model::drive::{DriveFile, FileListing};
use crate::model::errors::MirrorResult;
use crate::model::local_path;
use crate::Mirror;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Create,
    Update,
    Skip,
}

impl Display for SyncAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SyncAction::Create => write!(f, "CREATE"),
            SyncAction::Update => write!(f, "UPDATE"),
            SyncAction::Skip => write!(f, "SKIP"),
        }
    }
}

/// Reported once per remote file, before any content is fetched.
#[derive(Debug, Clone)]
pub struct SyncProgress {
    pub action: SyncAction,
    pub local_path: PathBuf,
    pub file: DriveFile,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
}

impl SyncSummary {
    fn record(&mut self, action: SyncAction) {
        match action {
            SyncAction::Create => self.created += 1,
            SyncAction::Update => self.updated += 1,
            SyncAction::Skip => self.skipped += 1,
        }
    }
}

/// Where a remote file lands and how its content is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    pub request: FetchRequest,
    pub local_path: PathBuf,
    pub converted: bool,
}

impl FetchPlan {
    pub fn new(folder: &Path, file: &DriveFile) -> Self {
        let conversion = conversion_for(&file.mime_type);
        let local_path = local_path::file_path(folder, &file.name, conversion);
        let request = match conversion {
            Some(conversion) => FetchRequest::Export {
                id: file.id.clone(),
                mime_type: conversion.export_mime.to_string(),
            },
            None => FetchRequest::Media { id: file.id.clone() },
        };

        Self { request, local_path, converted: conversion.is_some() }
    }
}

/// What is on disk at a planned local path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalState {
    pub size: u64,
    pub modified: DateTime<Utc>,
}

impl LocalState {
    pub fn read(path: &Path) -> MirrorResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let metadata = fs::metadata(path)?;
        Ok(Some(Self { size: metadata.len(), modified: DateTime::from(metadata.modified()?) }))
    }
}

/// Local copies whose mtime lags the remote by at most this many seconds are current.
pub const MODIFIED_TOLERANCE_SECS: i64 = 1;

/// Skip when a local copy exists, the remote was not modified after it (within tolerance),
/// and, for unconverted files, the byte sizes agree. Exported documents differ in size from
/// their native form so only the timestamp is checked for them.
pub fn decide(local: Option<&LocalState>, remote: &DriveFile, converted: bool) -> SyncAction {
    let Some(local) = local else { return SyncAction::Create };

    let lag = remote.modified_time - local.modified;
    let current = lag <= Duration::seconds(MODIFIED_TOLERANCE_SECS);
    let same_size = converted || remote.size == Some(local.size);

    if current && same_size {
        SyncAction::Skip
    } else {
        SyncAction::Update
    }
}

impl<R: Remote> Mirror<R> {
    /// Lists the remote folder and brings the local mirror up to date.
    pub async fn download_data<F: Fn(SyncProgress)>(
        &self, update_status: &Option<F>,
    ) -> MirrorResult<SyncSummary> {
        let listing = self.list_remote().await?;
        self.mirror_listing(&listing, update_status).await
    }

    /// Brings the local mirror up to date with an already fetched listing. Stops at the first
    /// failure; files handled before it stay written.
    #[instrument(level = "info", skip_all, fields(data_path = %self.config.data_path.display()), err(Debug))]
    pub async fn mirror_listing<F: Fn(SyncProgress)>(
        &self, listing: &FileListing, update_status: &Option<F>,
    ) -> MirrorResult<SyncSummary> {
        let data_path = &self.config.data_path;
        fs::create_dir_all(data_path)?;

        let names = local_path::folder_names(&listing.folder_tree);
        let mut written = HashSet::new();
        let mut summary = SyncSummary::default();

        for entry in &listing.file_list {
            let folder = local_path::folder_path(data_path, &entry.folder_tree, &names)?;
            fs::create_dir_all(&folder)?;

            for file in &entry.files {
                let plan = FetchPlan::new(&folder, file);
                if !written.insert(plan.local_path.clone()) {
                    warn!(
                        "{} maps to {} which another remote file already claimed",
                        file.id,
                        plan.local_path.display()
                    );
                }

                let local = LocalState::read(&plan.local_path)?;
                let action = decide(local.as_ref(), file, plan.converted);
                summary.record(action);

                if let Some(update_status) = update_status {
                    update_status(SyncProgress {
                        action,
                        local_path: plan.local_path.clone(),
                        file: file.clone(),
                    });
                }

                if action == SyncAction::Skip {
                    continue;
                }

                let content = self.remote.fetch(&plan.request).await?;
                write_checkpointed(&plan.local_path, &content, file.modified_time)?;
                debug!(bytes = content.len(), path = %plan.local_path.display(), "{action}");
            }
        }

        info!(
            created = summary.created,
            updated = summary.updated,
            skipped = summary.skipped,
            "mirror complete"
        );
        Ok(summary)
    }
}

/// Writes `content` and stamps the file with the remote modification time, truncated to the
/// second. The stamp is what the next run compares against.
fn write_checkpointed(path: &Path, content: &[u8], modified: DateTime<Utc>) -> MirrorResult<()> {
    fs::write(path, content)?;
    let stamp = FileTime::from_unix_time(modified.timestamp(), 0);
    filetime::set_file_times(path, stamp, stamp)?;
    Ok(())
}
