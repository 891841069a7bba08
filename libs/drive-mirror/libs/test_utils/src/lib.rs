use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use drive_mirror::model::conversion::FOLDER_MIME;
use drive_mirror::model::drive::{DriveFile, FilePage};
use drive_mirror::model::errors::{MirrorErrKind, MirrorResult};
use drive_mirror::{Config, FetchRequest, Mirror, Remote};
use tempfile::TempDir;

pub const ROOT_ID: &str = "root";

pub fn test_config(data_path: &Path) -> Config {
    Config {
        folder_id: ROOT_ID.to_string(),
        api_key: "test-key".to_string(),
        api_url: "http://localhost:0".to_string(),
        data_path: data_path.to_path_buf(),
        writeable_path: data_path.display().to_string(),
        logs: false,
        stdout_logs: false,
        colored_logs: false,
    }
}

/// A scratch data directory and a mirror over `drive` writing into it.
pub fn test_mirror(drive: FakeDrive) -> (TempDir, Mirror<FakeDrive>) {
    let dir = tempfile::tempdir().unwrap();
    let mirror = Mirror::with_remote(test_config(&dir.path().join("data")), drive);
    (dir, mirror)
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// In-memory drive. Folders and files are added by parent id, fetches are recorded.
pub struct FakeDrive {
    items: RefCell<Vec<(String, DriveFile)>>,
    content: RefCell<HashMap<String, Vec<u8>>>,
    page_size: usize,
    pub fetches: RefCell<Vec<FetchRequest>>,
    pub list_calls: RefCell<usize>,
    pub failing: RefCell<Vec<String>>,
}

impl Default for FakeDrive {
    fn default() -> Self {
        Self::new("Shared")
    }
}

impl FakeDrive {
    pub fn new(root_name: &str) -> Self {
        let root = DriveFile {
            id: ROOT_ID.to_string(),
            name: root_name.to_string(),
            mime_type: FOLDER_MIME.to_string(),
            size: None,
            modified_time: at(0),
        };
        Self {
            items: RefCell::new(vec![(String::new(), root)]),
            content: RefCell::default(),
            page_size: 100,
            fetches: RefCell::default(),
            list_calls: RefCell::new(0),
            failing: RefCell::default(),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn folder(&self, parent: &str, id: &str, name: &str) {
        self.items.borrow_mut().push((
            parent.to_string(),
            DriveFile {
                id: id.to_string(),
                name: name.to_string(),
                mime_type: FOLDER_MIME.to_string(),
                size: None,
                modified_time: at(0),
            },
        ));
    }

    /// Adds a stored file whose size is the length of `content`.
    pub fn file(&self, parent: &str, id: &str, name: &str, content: &[u8], modified: i64) {
        self.put(
            parent,
            DriveFile {
                id: id.to_string(),
                name: name.to_string(),
                mime_type: "application/octet-stream".to_string(),
                size: Some(content.len() as u64),
                modified_time: at(modified),
            },
            content,
        );
    }

    /// Adds a native document; `exported` is what an export request returns.
    pub fn native(
        &self, parent: &str, id: &str, name: &str, mime_type: &str, exported: &[u8], modified: i64,
    ) {
        self.put(
            parent,
            DriveFile {
                id: id.to_string(),
                name: name.to_string(),
                mime_type: mime_type.to_string(),
                size: None,
                modified_time: at(modified),
            },
            exported,
        );
    }

    pub fn put(&self, parent: &str, file: DriveFile, content: &[u8]) {
        let mut items = self.items.borrow_mut();
        items.retain(|(_, existing)| existing.id != file.id);
        self.content
            .borrow_mut()
            .insert(file.id.clone(), content.to_vec());
        items.push((parent.to_string(), file));
    }

    /// Makes every fetch of `id` fail.
    pub fn fail_fetch(&self, id: &str) {
        self.failing.borrow_mut().push(id.to_string());
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.borrow().len()
    }

    pub fn clear_fetches(&self) {
        self.fetches.borrow_mut().clear();
    }
}

impl Remote for FakeDrive {
    async fn get_folder(&self, id: &str) -> MirrorResult<DriveFile> {
        self.items
            .borrow()
            .iter()
            .find(|(_, file)| file.id == id)
            .map(|(_, file)| file.clone())
            .ok_or_else(|| MirrorErrKind::Unexpected(format!("no folder {id}")).into())
    }

    async fn list_children(
        &self, parent: &str, page_token: Option<&str>,
    ) -> MirrorResult<FilePage> {
        *self.list_calls.borrow_mut() += 1;

        let children: Vec<DriveFile> = self
            .items
            .borrow()
            .iter()
            .filter(|(p, _)| p == parent)
            .map(|(_, file)| file.clone())
            .collect();

        let start: usize = page_token.map(|t| t.parse().unwrap()).unwrap_or(0);
        let end = (start + self.page_size).min(children.len());
        let next_page_token = if end < children.len() { Some(end.to_string()) } else { None };

        Ok(FilePage { files: children[start..end].to_vec(), next_page_token })
    }

    async fn fetch(&self, request: &FetchRequest) -> MirrorResult<Vec<u8>> {
        self.fetches.borrow_mut().push(request.clone());

        if self.failing.borrow().iter().any(|id| id == request.id()) {
            return Err(MirrorErrKind::Unexpected(format!("fetch of {} failed", request.id())).into());
        }

        self.content
            .borrow()
            .get(request.id())
            .cloned()
            .ok_or_else(|| MirrorErrKind::Unexpected(format!("no content {}", request.id())).into())
    }
}

pub fn read(path: impl AsRef<Path>) -> Vec<u8> {
    std::fs::read(path).unwrap()
}

pub fn mtime_secs(path: impl AsRef<Path>) -> i64 {
    let modified = std::fs::metadata(path).unwrap().modified().unwrap();
    DateTime::<Utc>::from(modified).timestamp()
}

pub fn data_dir(dir: &TempDir) -> PathBuf {
    dir.path().join("data")
}
