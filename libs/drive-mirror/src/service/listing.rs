use std::collections::{HashSet, VecDeque};

use crate::io::remote::Remote;
use crate::model::drive::{DriveFile, FileListing, FolderEntry, FolderTree};
use crate::model::errors::MirrorResult;
use crate::Mirror;

impl<R: Remote> Mirror<R> {
    /// Walks the configured folder breadth first and returns every folder with the files it
    /// directly contains.
    #[instrument(level = "debug", skip(self), fields(root = %self.config.folder_id), err(Debug))]
    pub async fn list_remote(&self) -> MirrorResult<FileListing> {
        let root = self.remote.get_folder(&self.config.folder_id).await?;

        let mut folder_tree = FolderTree::default();
        let mut file_list = vec![];
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        visited.insert(root.id.clone());
        folder_tree.folders.push(root.id.clone());
        folder_tree.names.push(root.name.clone());
        queue.push_back(vec![root.id]);

        while let Some(chain) = queue.pop_front() {
            let Some(parent) = chain.last() else { continue };
            let children = self.list_all_children(parent).await?;

            let mut files = vec![];
            for child in children {
                if !child.is_folder() {
                    files.push(child);
                    continue;
                }

                if !visited.insert(child.id.clone()) {
                    warn!("folder {} ({}) reached twice, visiting once", child.name, child.id);
                    continue;
                }

                folder_tree.folders.push(child.id.clone());
                folder_tree.names.push(child.name);

                let mut child_chain = chain.clone();
                child_chain.push(child.id);
                queue.push_back(child_chain);
            }

            file_list.push(FolderEntry { folder_tree: chain, files });
        }

        let listing = FileListing { folder_tree, file_list };
        info!(
            folders = listing.folder_tree.folders.len(),
            files = listing.file_count(),
            "listed remote folder"
        );
        Ok(listing)
    }

    async fn list_all_children(&self, parent: &str) -> MirrorResult<Vec<DriveFile>> {
        let mut children = vec![];
        let mut page_token: Option<String> = None;

        loop {
            let page = self
                .remote
                .list_children(parent, page_token.as_deref())
                .await?;
            children.extend(page.files);

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(children)
    }
}
