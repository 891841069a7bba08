//! Keeps a local directory in step with a shared Google Drive folder.
//!
//! - Most integrators will be interested in the functions attached to the [Mirror] struct.
//!   See the [service] module for evolving this functionality.
//! - The [model] module contains the data structures exchanged with Drive and the
//!   configuration / error types.
//! - The [blocking] module contains blocking variants of the [Mirror] functions for
//!   consumers without async runtimes.
//! - The [io] module contains interactions with the network.

#[macro_use]
extern crate tracing;

pub mod blocking;
pub mod io;
pub mod model;
pub mod service;

/// Entry point of the library. Generic over the [Remote] so tests can swap the
/// network for an in-memory drive.
#[derive(Clone)]
pub struct Mirror<R = Network> {
    pub config: Config,
    pub remote: R,
}

impl Mirror<Network> {
    #[instrument(level = "info", skip_all, err(Debug))]
    pub async fn init(config: Config) -> MirrorResult<Self> {
        logging::init(&config)?;

        let remote = Network::new(&config)?;

        Ok(Self { config, remote })
    }
}

impl<R: Remote> Mirror<R> {
    /// Builds a mirror over an arbitrary remote. Does not touch logging.
    pub fn with_remote(config: Config, remote: R) -> Self {
        Self { config, remote }
    }
}

pub fn get_code_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub static DEFAULT_API_LOCATION: &str = "https://www.googleapis.com/drive/v3";

pub use io::network::Network;
pub use io::remote::{FetchRequest, Remote};
pub use model::config::Config;
pub use model::errors::{MirrorErr, MirrorErrKind, MirrorResult};
use service::logging;
