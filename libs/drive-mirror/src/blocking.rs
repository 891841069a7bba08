use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};

use crate::io::network::Network;
use crate::io::remote::Remote;
use crate::model::config::Config;
use crate::model::drive::FileListing;
use crate::model::errors::{unexpected, MirrorResult};
use crate::service::mirror::{SyncProgress, SyncSummary};

/// Blocking face of [crate::Mirror]. Everything runs on a single thread.
#[derive(Clone)]
pub struct Mirror<R = Network> {
    mirror: crate::Mirror<R>,
    rt: Arc<Runtime>,
}

impl Mirror<Network> {
    pub fn init(config: Config) -> MirrorResult<Self> {
        let rt = Arc::new(runtime()?);
        let mirror = rt.block_on(crate::Mirror::init(config))?;
        Ok(Self { mirror, rt })
    }
}

impl<R: Remote> Mirror<R> {
    pub fn with_remote(config: Config, remote: R) -> MirrorResult<Self> {
        let rt = Arc::new(runtime()?);
        Ok(Self { mirror: crate::Mirror::with_remote(config, remote), rt })
    }

    pub fn remote(&self) -> &R {
        &self.mirror.remote
    }

    pub fn list_remote(&self) -> MirrorResult<FileListing> {
        self.rt.block_on(self.mirror.list_remote())
    }

    pub fn download_data<F: Fn(SyncProgress)>(
        &self, update_status: &Option<F>,
    ) -> MirrorResult<SyncSummary> {
        self.rt.block_on(self.mirror.download_data(update_status))
    }

    pub fn mirror_listing<F: Fn(SyncProgress)>(
        &self, listing: &FileListing, update_status: &Option<F>,
    ) -> MirrorResult<SyncSummary> {
        self.rt
            .block_on(self.mirror.mirror_listing(listing, update_status))
    }
}

fn runtime() -> MirrorResult<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(unexpected)
}
