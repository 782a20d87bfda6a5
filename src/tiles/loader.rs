use crate::core::config::{LoaderConfig, TileConfig};
use crate::core::geo::Point;
use crate::tiles::cache::read_cached_image;
use crate::tiles::image::TileImage;
use crate::tiles::tile::{LoadPlan, Tile};
use crate::{Result, TileError};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A cache read for one tile, detached from the tile itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub location: Point,
    /// Generation of the tile when the request was made
    pub generation: u64,
    pub zoom: u32,
    pub path: PathBuf,
}

impl LoadRequest {
    /// Performs the read on the calling thread.
    pub fn execute(self) -> LoadOutcome {
        let result = read_cached_image(&self.path);
        LoadOutcome {
            location: self.location,
            generation: self.generation,
            zoom: self.zoom,
            path: self.path,
            result,
        }
    }
}

/// Result of a [`LoadRequest`], to be applied with [`Tile::finish_load`].
#[derive(Debug)]
pub struct LoadOutcome {
    pub location: Point,
    pub generation: u64,
    pub zoom: u32,
    pub path: PathBuf,
    pub result: Result<TileImage>,
}

/// What [`TileLoader::request`] did with a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    /// The tile is loaded; nothing was queued
    AlreadyLoaded,
    /// A load for this tile is still outstanding; nothing was queued
    InFlight,
    /// No cache is configured; the tile was loaded as a placeholder
    Placeholder,
    /// A cache read was queued and the tile flagged as loading
    Queued,
    /// The loader has shut down; the tile was left untouched
    Rejected,
}

/// Reads cached tile bitmaps on a pool of background threads.
///
/// Requests go out over one channel and finished reads come back over
/// another. Workers never see a [`Tile`]; the owner drains outcomes with
/// [`TileLoader::try_recv`] (or friends) and applies them with
/// [`Tile::finish_load`] on its own thread.
pub struct TileLoader {
    request_tx: Option<Sender<LoadRequest>>,
    result_rx: Receiver<LoadOutcome>,
    workers: Vec<JoinHandle<()>>,
}

impl TileLoader {
    /// Starts `config.workers` reader threads.
    pub fn new(config: &LoaderConfig) -> Result<Self> {
        let (request_tx, request_rx) = unbounded::<LoadRequest>();
        let (result_tx, result_rx) = unbounded::<LoadOutcome>();

        let count = config.workers.max(1);
        let mut workers = Vec::with_capacity(count);
        for id in 0..count {
            let request_rx = request_rx.clone();
            let result_tx = result_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("tile-loader-{}", id))
                .spawn(move || worker_loop(id, request_rx, result_tx))?;
            workers.push(handle);
        }
        log::debug!("tile loader started with {} workers", count);

        Ok(Self {
            request_tx: Some(request_tx),
            result_rx,
            workers,
        })
    }

    /// Loader sized from the engine configuration.
    pub fn from_config(config: &TileConfig) -> Result<Self> {
        Self::new(&config.loader)
    }

    /// Starts loading `tile` unless it is loaded or already loading.
    ///
    /// With no cache configured the tile becomes a loaded placeholder right
    /// away. Otherwise the tile is flagged as loading and the read is queued;
    /// the flag is cleared when the outcome is applied or the tile unloaded.
    pub fn request<S>(&self, tile: &mut Tile, config: &TileConfig, scale: S) -> RequestStatus
    where
        S: FnOnce() -> f32,
    {
        if tile.is_loading() {
            return RequestStatus::InFlight;
        }
        match tile.plan_load(config, scale) {
            LoadPlan::AlreadyLoaded => {
                log::debug!("region {} already loaded", tile.location());
                RequestStatus::AlreadyLoaded
            }
            LoadPlan::Placeholder => {
                tile.load_placeholder();
                RequestStatus::Placeholder
            }
            LoadPlan::Read(request) => match self.submit(request) {
                Ok(()) => {
                    tile.set_loading(true);
                    RequestStatus::Queued
                }
                Err(e) => {
                    log::warn!("could not queue region {}: {}", tile.location(), e);
                    RequestStatus::Rejected
                }
            },
        }
    }

    /// Queues a raw request. Prefer [`TileLoader::request`], which also
    /// maintains the tile's loading flag.
    pub fn submit(&self, request: LoadRequest) -> Result<()> {
        let tx = self.request_tx.as_ref().ok_or(TileError::LoaderClosed)?;
        tx.send(request).map_err(|_| TileError::LoaderClosed)
    }

    /// Next finished read, if any.
    pub fn try_recv(&self) -> Option<LoadOutcome> {
        match self.result_rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Waits up to `timeout` for the next finished read.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<LoadOutcome> {
        match self.result_rx.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Every read that has finished so far.
    pub fn drain(&self) -> Vec<LoadOutcome> {
        self.result_rx.try_iter().collect()
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Stops accepting requests and waits for the workers to finish the
    /// reads already queued.
    pub fn shutdown(&mut self) {
        if self.request_tx.take().is_none() {
            return;
        }
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                log::error!("tile loader worker panicked");
            }
        }
        log::debug!("tile loader shut down");
    }
}

impl Drop for TileLoader {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(id: usize, requests: Receiver<LoadRequest>, results: Sender<LoadOutcome>) {
    for request in requests.iter() {
        log::trace!("worker {} reading {}", id, request.path.display());
        if results.send(request.execute()).is_err() {
            break;
        }
    }
}

/// Performs a cache read on tokio's blocking pool.
#[cfg(feature = "tokio-runtime")]
pub async fn load_async(request: LoadRequest) -> LoadOutcome {
    let location = request.location;
    let generation = request.generation;
    let zoom = request.zoom;
    let path = request.path.clone();

    match tokio::task::spawn_blocking(move || request.execute()).await {
        Ok(outcome) => outcome,
        Err(e) => LoadOutcome {
            location,
            generation,
            zoom,
            path,
            result: Err(TileError::Worker(e.to_string())),
        },
    }
}
