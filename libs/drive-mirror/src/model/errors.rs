use std::backtrace::Backtrace;
use std::fmt::{self, Display, Formatter};
use std::io;
use std::panic::Location;

use crate::io::network::ApiError;

pub type MirrorResult<T> = Result<T, MirrorErr>;

#[derive(Debug)]
pub struct MirrorErr {
    pub kind: MirrorErrKind,
    pub backtrace: Option<Backtrace>,
}

#[derive(Debug)]
pub enum MirrorErrKind {
    /// Names of the required environment variables that were absent or empty.
    MissingConfig(Vec<&'static str>),
    Api(ApiError),
    Disk(String),
    /// A folder chain referenced an id that is not part of the folder tree.
    FolderUnknown(String),
    Unexpected(String),
}

impl Display for MirrorErr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl Display for MirrorErrKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MirrorErrKind::MissingConfig(vars) => write!(
                f,
                "Environment variables ({}) missing from .env file.",
                vars.join(", ")
            ),
            MirrorErrKind::Api(err) => write!(f, "{err}"),
            MirrorErrKind::Disk(msg) => write!(f, "Could not write to disk: {msg}"),
            MirrorErrKind::FolderUnknown(id) => {
                write!(f, "Folder {id} is not part of the remote folder tree")
            }
            MirrorErrKind::Unexpected(msg) => write!(f, "Unexpected error: {msg}"),
        }
    }
}

impl From<MirrorErrKind> for MirrorErr {
    fn from(kind: MirrorErrKind) -> Self {
        Self { kind, backtrace: Some(Backtrace::force_capture()) }
    }
}

impl From<ApiError> for MirrorErr {
    fn from(err: ApiError) -> Self {
        MirrorErrKind::Api(err).into()
    }
}

impl From<io::Error> for MirrorErr {
    #[track_caller]
    fn from(err: io::Error) -> Self {
        let location = Location::caller();
        MirrorErrKind::Disk(format!("{err} ({}:{})", location.file(), location.line())).into()
    }
}

#[track_caller]
pub fn unexpected<T: fmt::Debug>(err: T) -> MirrorErr {
    let location = Location::caller();
    let msg = format!("{err:?} ({}:{})", location.file(), location.line());
    error!("unexpected error: {msg}");
    MirrorErrKind::Unexpected(msg).into()
}
