use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::model::conversion::FOLDER_MIME;

/// A file or folder as returned by Drive's `files` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    /// Drive encodes sizes as decimal strings and leaves them out for native documents.
    #[serde(default, deserialize_with = "size_from_str")]
    pub size: Option<u64>,
    pub modified_time: DateTime<Utc>,
}

impl DriveFile {
    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME
    }
}

/// One page of a `files.list` response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePage {
    #[serde(default)]
    pub files: Vec<DriveFile>,
    pub next_page_token: Option<String>,
}

/// Every folder reached while walking the remote tree. `folders[i]` is named `names[i]`;
/// the root comes first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderTree {
    pub folders: Vec<String>,
    pub names: Vec<String>,
}

/// The files directly inside one remote folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    /// Ids from the root down to this folder, both ends included.
    pub folder_tree: Vec<String>,
    pub files: Vec<DriveFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileListing {
    pub folder_tree: FolderTree,
    pub file_list: Vec<FolderEntry>,
}

impl FileListing {
    pub fn file_count(&self) -> usize {
        self.file_list.iter().map(|entry| entry.files.len()).sum()
    }
}

fn size_from_str<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Size {
        Text(String),
        Number(u64),
    }

    match Option::<Size>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Size::Number(n)) => Ok(Some(n)),
        Some(Size::Text(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
