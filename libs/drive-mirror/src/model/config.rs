use std::env;
use std::path::PathBuf;

use crate::model::errors::{MirrorErrKind, MirrorResult};
use crate::DEFAULT_API_LOCATION;

pub static FOLDER_ID_VAR: &str = "GOOGLE_DRIVE_FOLDER_ID";
pub static API_KEY_VAR: &str = "GOOGLE_DRIVE_API_KEY";
pub static DATA_PATH_VAR: &str = "DRIVE_MIRROR_DATA_PATH";
pub static API_URL_VAR: &str = "DRIVE_MIRROR_API_URL";
pub static WRITEABLE_PATH_VAR: &str = "DRIVE_MIRROR_PATH";

pub static DEFAULT_DATA_PATH: &str = "data";

#[derive(Debug, Clone)]
pub struct Config {
    /// Id of the shared Drive folder being mirrored.
    pub folder_id: String,
    /// Drive API key, sent as the `key` query parameter.
    pub api_key: String,
    /// Base of the Drive v3 API.
    pub api_url: String,
    /// Local root of the mirror.
    pub data_path: PathBuf,
    /// Where should logs (and panic reports) be written?
    pub writeable_path: String,

    /// Should we log at all?
    pub logs: bool,
    /// Should logs be printed to stdout?
    pub stdout_logs: bool,
    /// Should logs be colored?
    pub colored_logs: bool,
}

impl Config {
    /// Configures the mirror for CLI use from the process environment: file logs only, no
    /// stdout logs.
    pub fn cli_config() -> MirrorResult<Config> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Reads every variable through `lookup`. Both the folder id and the api key are required;
    /// all missing required variables are reported together.
    pub fn from_lookup<F>(lookup: F) -> MirrorResult<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| lookup(var).filter(|value| !value.is_empty());

        let (folder_id, api_key) = match (required(FOLDER_ID_VAR), required(API_KEY_VAR)) {
            (Some(folder_id), Some(api_key)) => (folder_id, api_key),
            (folder_id, api_key) => {
                let mut missing = vec![];
                if folder_id.is_none() {
                    missing.push(FOLDER_ID_VAR);
                }
                if api_key.is_none() {
                    missing.push(API_KEY_VAR);
                }
                return Err(MirrorErrKind::MissingConfig(missing).into());
            }
        };

        let data_path = lookup(DATA_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let api_url = lookup(API_URL_VAR)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_LOCATION.to_string());

        let writeable_path = lookup(WRITEABLE_PATH_VAR)
            .or_else(|| lookup("HOME").map(|home| format!("{home}/.drive-mirror"))) // unix
            .or_else(|| lookup("HOMEPATH").map(|home| format!("{home}/.drive-mirror"))) // windows
            .unwrap_or_else(|| ".drive-mirror".to_string());

        Ok(Config {
            folder_id,
            api_key,
            api_url,
            data_path,
            writeable_path,
            logs: true,
            stdout_logs: false,
            colored_logs: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::model::errors::MirrorErrKind;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults_applied() {
        let config =
            Config::from_lookup(lookup(&[(FOLDER_ID_VAR, "folder"), (API_KEY_VAR, "key")]))
                .unwrap();

        assert_eq!(config.folder_id, "folder");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.api_url, DEFAULT_API_LOCATION);
        assert_eq!(config.data_path, PathBuf::from("data"));
        assert!(config.logs);
        assert!(!config.stdout_logs);
    }

    #[test]
    fn overrides_applied() {
        let config = Config::from_lookup(lookup(&[
            (FOLDER_ID_VAR, "folder"),
            (API_KEY_VAR, "key"),
            (DATA_PATH_VAR, "/tmp/mirror"),
            (API_URL_VAR, "http://localhost:9000/"),
            (WRITEABLE_PATH_VAR, "/tmp/logs"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://localhost:9000");
        assert_eq!(config.data_path, PathBuf::from("/tmp/mirror"));
        assert_eq!(config.writeable_path, "/tmp/logs");
    }

    #[test]
    fn writeable_path_from_home() {
        let config = Config::from_lookup(lookup(&[
            (FOLDER_ID_VAR, "folder"),
            (API_KEY_VAR, "key"),
            ("HOME", "/home/someone"),
        ]))
        .unwrap();

        assert_eq!(config.writeable_path, "/home/someone/.drive-mirror");
    }

    #[test]
    fn missing_everything() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(
            err.kind,
            MirrorErrKind::MissingConfig(ref vars) if vars == &vec![FOLDER_ID_VAR, API_KEY_VAR]
        ));
    }

    #[test]
    fn empty_key_is_missing() {
        let err = Config::from_lookup(lookup(&[(FOLDER_ID_VAR, "folder"), (API_KEY_VAR, "")]))
            .unwrap_err();
        assert!(matches!(
            err.kind,
            MirrorErrKind::MissingConfig(ref vars) if vars == &vec![API_KEY_VAR]
        ));
    }
}
