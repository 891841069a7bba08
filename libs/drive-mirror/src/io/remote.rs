use crate::model::drive::{DriveFile, FilePage};
use crate::model::errors::MirrorResult;

/// The two ways Drive hands out file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// Server side conversion of a native document to `mime_type`.
    Export { id: String, mime_type: String },
    /// Raw bytes of a stored file.
    Media { id: String },
}

impl FetchRequest {
    pub fn id(&self) -> &str {
        match self {
            FetchRequest::Export { id, .. } | FetchRequest::Media { id } => id,
        }
    }

    /// Url and query parameters of this request, minus the api key.
    pub fn endpoint(&self, api_url: &str) -> (String, Vec<(&'static str, String)>) {
        match self {
            FetchRequest::Export { id, mime_type } => {
                (format!("{api_url}/files/{id}/export"), vec![("mimeType", mime_type.clone())])
            }
            FetchRequest::Media { id } => {
                (format!("{api_url}/files/{id}"), vec![("alt", "media".to_string())])
            }
        }
    }
}

/// Everything the mirror needs from Drive. Calls are awaited one at a time.
#[allow(async_fn_in_trait)]
pub trait Remote {
    /// Metadata of a single folder (used for the root of the mirror).
    async fn get_folder(&self, id: &str) -> MirrorResult<DriveFile>;

    /// One page of the non-trashed children of `parent`.
    async fn list_children(&self, parent: &str, page_token: Option<&str>)
        -> MirrorResult<FilePage>;

    async fn fetch(&self, request: &FetchRequest) -> MirrorResult<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_endpoint() {
        let request = FetchRequest::Export {
            id: "abc".to_string(),
            mime_type: "application/pdf".to_string(),
        };
        let (url, query) = request.endpoint("https://www.googleapis.com/drive/v3");
        assert_eq!(url, "https://www.googleapis.com/drive/v3/files/abc/export");
        assert_eq!(query, vec![("mimeType", "application/pdf".to_string())]);
        assert_eq!(request.id(), "abc");
    }

    #[test]
    fn media_endpoint() {
        let request = FetchRequest::Media { id: "xyz".to_string() };
        let (url, query) = request.endpoint("http://localhost:9000");
        assert_eq!(url, "http://localhost:9000/files/xyz");
        assert_eq!(query, vec![("alt", "media".to_string())]);
    }
}
