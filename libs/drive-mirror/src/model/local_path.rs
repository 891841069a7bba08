use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::model::conversion::Conversion;
use crate::model::drive::FolderTree;
use crate::model::errors::{MirrorErrKind, MirrorResult};

/// Folder id to folder name, without the root: the root maps onto the data directory itself.
pub fn folder_names(tree: &FolderTree) -> HashMap<&str, &str> {
    tree.folders
        .iter()
        .zip(tree.names.iter())
        .skip(1)
        .map(|(id, name)| (id.as_str(), name.as_str()))
        .collect()
}

/// Local directory of a remote folder given its chain of ids (root first).
pub fn folder_path(
    data_path: &Path, chain: &[String], names: &HashMap<&str, &str>,
) -> MirrorResult<PathBuf> {
    let mut path = data_path.to_path_buf();
    for id in chain.iter().skip(1) {
        let name = names
            .get(id.as_str())
            .ok_or_else(|| MirrorErrKind::FolderUnknown(id.clone()))?;
        path.push(sanitize(name));
    }
    Ok(path)
}

/// Local path of a file inside `folder`. Converted files take the export extension, replacing
/// whatever extension the remote name carried.
pub fn file_path(folder: &Path, name: &str, conversion: Option<&Conversion>) -> PathBuf {
    let path = folder.join(sanitize(name));
    match conversion {
        Some(conversion) => path.with_extension(conversion.extension),
        None => path,
    }
}

/// Drive allows any character in a name; keep every name a single, normal path component.
pub fn sanitize(name: &str) -> String {
    match name {
        "" | "." | ".." => "_".to_string(),
        _ => name
            .chars()
            .map(|c| if c == '/' || c == '\\' || c == '\0' { '_' } else { c })
            .collect(),
    }
}
