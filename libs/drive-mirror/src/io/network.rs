use std::fmt::{self, Display, Formatter};
use std::time::{Duration, Instant};

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::get_code_version;
use crate::io::remote::{FetchRequest, Remote};
use crate::model::config::Config;
use crate::model::conversion::FOLDER_MIME;
use crate::model::drive::{DriveFile, FilePage};
use crate::model::errors::{unexpected, MirrorResult};

static FILE_FIELDS: &str = "id, name, mimeType, size, modifiedTime";
static PAGE_SIZE: &str = "1000";

#[derive(Debug)]
pub enum ApiError {
    SendFailed(String),
    Status { status: u16, url: String, body: String },
    ReceiveFailed(String),
    Deserialize(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::SendFailed(msg) => write!(f, "Could not reach Google Drive: {msg}"),
            ApiError::Status { status, url, body } => {
                write!(f, "Google Drive answered {status} for {url}: {body}")
            }
            ApiError::ReceiveFailed(msg) => write!(f, "Download interrupted: {msg}"),
            ApiError::Deserialize(msg) => write!(f, "Unreadable response from Google Drive: {msg}"),
        }
    }
}

/// [Remote] backed by the Drive v3 REST api, authenticated with an api key.
#[derive(Debug, Clone)]
pub struct Network {
    pub client: Client,
    pub api_url: String,
    pub api_key: String,
}

impl Network {
    pub fn new(config: &Config) -> MirrorResult<Self> {
        let client = Client::builder()
            .user_agent(format!("drive-mirror/{}", get_code_version()))
            .build()
            .map_err(unexpected)?;

        Ok(Self { client, api_url: config.api_url.clone(), api_key: config.api_key.clone() })
    }

    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Response, ApiError> {
        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|err| ApiError::SendFailed(err.to_string()))?;

        if start.elapsed() > Duration::from_millis(1000) {
            warn!("network request took {:?}", start.elapsed());
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body: body.chars().take(512).collect(),
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self, url: &str, query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let bytes = self
            .get(url, query)
            .await?
            .bytes()
            .await
            .map_err(|err| ApiError::ReceiveFailed(err.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|err| ApiError::Deserialize(err.to_string()))
    }
}

impl Remote for Network {
    #[instrument(level = "debug", skip(self), err(Debug))]
    async fn get_folder(&self, id: &str) -> MirrorResult<DriveFile> {
        let url = format!("{}/files/{id}", self.api_url);
        let query = [("fields", FILE_FIELDS.to_string()), ("supportsAllDrives", "true".to_string())];

        Ok(self.get_json(&url, &query).await?)
    }

    #[instrument(level = "debug", skip(self), err(Debug))]
    async fn list_children(
        &self, parent: &str, page_token: Option<&str>,
    ) -> MirrorResult<FilePage> {
        let url = format!("{}/files", self.api_url);
        let mut query = vec![
            ("q", format!("'{parent}' in parents and trashed = false")),
            ("fields", format!("nextPageToken, files({FILE_FIELDS})")),
            ("pageSize", PAGE_SIZE.to_string()),
            ("orderBy", "folder, name".to_string()),
            ("supportsAllDrives", "true".to_string()),
            ("includeItemsFromAllDrives", "true".to_string()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }

        let page: FilePage = self.get_json(&url, &query).await?;
        debug!(
            files = page.files.len(),
            folders = page.files.iter().filter(|f| f.mime_type == FOLDER_MIME).count(),
            more = page.next_page_token.is_some(),
            "listed page"
        );
        Ok(page)
    }

    #[instrument(level = "debug", skip(self), err(Debug))]
    async fn fetch(&self, request: &FetchRequest) -> MirrorResult<Vec<u8>> {
        let (url, query) = request.endpoint(&self.api_url);

        let bytes = self
            .get(&url, &query)
            .await?
            .bytes()
            .await
            .map_err(|err| ApiError::ReceiveFailed(err.to_string()))?;

        if bytes.len() > 100 * 1024 * 1024 {
            warn!("downloaded {} bytes for {}", bytes.len(), request.id());
        }

        Ok(bytes.to_vec())
    }
}
