//! The region tile: load state, bitmaps and selection of one region.

use crate::core::config::TileConfig;
use crate::core::geo::Point;
use crate::core::zoom::zoom_level;
use crate::spatial::culling::Culling;
use crate::tiles::cache::{read_cached_image, CacheLayout};
use crate::tiles::image::TileImage;
use crate::tiles::loader::{LoadOutcome, LoadRequest};
use crate::tiles::marks::{MarkLevel, MarkState};
use crate::traits::ViewportProvider;

/// Result of trying to bring a tile into the loaded state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing was done, the tile was loaded already
    AlreadyLoaded,
    /// No cache is configured; the tile is loaded without an image
    Placeholder,
    /// The cached bitmap was read and attached
    Loaded,
    /// The cached bitmap is absent or unreadable; the tile stays unloaded
    Missing,
    /// The result belongs to a load that was cancelled by `unload`
    Stale,
}

/// What a load of this tile would have to do, decided without any I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPlan {
    AlreadyLoaded,
    Placeholder,
    Read(LoadRequest),
}

/// One region of the world as shown by the viewer.
///
/// A tile is owned by a single thread (the one driving the UI). Disk reads
/// may happen elsewhere, but their results come back as [`LoadOutcome`]
/// values applied with [`Tile::finish_load`] on the owning thread.
#[derive(Debug)]
pub struct Tile {
    location: Point,
    image: Option<TileImage>,
    overlay: Option<TileImage>,
    loading: bool,
    loaded: bool,
    marks: MarkState,
    /// Bumped by every `unload`; results of older loads are discarded.
    generation: u64,
}

impl Tile {
    /// Creates an unloaded, unmarked tile for the region at `location`.
    pub fn new(location: Point) -> Self {
        Self {
            location,
            image: None,
            overlay: None,
            loading: false,
            loaded: false,
            marks: MarkState::new(location),
            generation: 0,
        }
    }

    /// Region coordinate of this tile.
    pub fn location(&self) -> Point {
        self.location
    }

    pub fn image(&self) -> Option<&TileImage> {
        self.image.as_ref()
    }

    /// Attaches a freshly rendered bitmap and marks the tile as loaded.
    pub fn set_image(&mut self, image: TileImage) {
        self.image = Some(image);
        self.loaded = true;
    }

    /// `true` when there is no bitmap to draw, e.g. a placeholder tile.
    pub fn is_empty(&self) -> bool {
        self.image.is_none()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Flags a load as in flight. Callers own this flag and must not start a
    /// second load while it is set.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_visible(&self, viewport: &impl ViewportProvider, threshold: i32) -> bool {
        Culling::is_visible(self.location, viewport, threshold)
    }

    /// Drops both bitmaps and returns the tile to the unloaded state.
    ///
    /// Any load still in flight is orphaned: its result carries the previous
    /// generation and [`Tile::finish_load`] will discard it.
    pub fn unload(&mut self) {
        self.image = None;
        self.overlay = None;
        self.loaded = false;
        self.loading = false;
        self.generation = self.generation.wrapping_add(1);
        log::trace!("unloaded region {}", self.location);
    }

    // --- selection ---------------------------------------------------------

    pub fn marks(&self) -> &MarkState {
        &self.marks
    }

    pub fn mark_level(&self) -> MarkLevel {
        self.marks.level()
    }

    /// Whether the whole region is marked.
    pub fn is_marked(&self) -> bool {
        self.marks.is_region_marked()
    }

    pub fn is_chunk_marked(&self, chunk: Point) -> bool {
        self.marks.is_chunk_marked(chunk)
    }

    /// Individually marked chunks. Empty when the whole region is marked.
    pub fn marked_chunks(&self) -> impl Iterator<Item = Point> + '_ {
        self.marks.iter()
    }

    pub fn marked_chunk_count(&self) -> usize {
        self.marks.len()
    }

    /// Sets or clears the whole-region mark.
    pub fn mark(&mut self, marked: bool) {
        self.marks.set_full_mark(marked);
        self.overlay = None;
    }

    /// Marks one chunk of this region. Returns `false` for foreign chunks.
    pub fn mark_chunk(&mut self, chunk: Point) -> bool {
        let accepted = self.marks.mark_chunk(chunk);
        if accepted {
            self.overlay = None;
        }
        accepted
    }

    /// Unmarks one chunk of this region. Returns `false` for foreign chunks.
    pub fn unmark_chunk(&mut self, chunk: Point) -> bool {
        let accepted = self.marks.unmark_chunk(chunk);
        if accepted {
            self.overlay = None;
        }
        accepted
    }

    pub fn clear_marks(&mut self) {
        self.marks.clear();
        self.overlay = None;
    }

    pub fn overlay_image(&self) -> Option<&TileImage> {
        self.overlay.as_ref()
    }

    pub fn set_overlay_image(&mut self, overlay: TileImage) {
        self.overlay = Some(overlay);
    }

    /// Returns the mark overlay, rendering it first if the selection changed
    /// since the last render.
    pub fn overlay_or_render<F>(&mut self, render: F) -> &TileImage
    where
        F: FnOnce(&MarkState) -> TileImage,
    {
        let marks = &self.marks;
        self.overlay.get_or_insert_with(|| render(marks))
    }

    // --- loading -----------------------------------------------------------

    /// Decides how this tile would be loaded. `scale` is only consulted when
    /// a cache read is needed.
    pub fn plan_load<S>(&self, config: &TileConfig, scale: S) -> LoadPlan
    where
        S: FnOnce() -> f32,
    {
        if self.loaded {
            return LoadPlan::AlreadyLoaded;
        }
        match CacheLayout::from_config(config) {
            None => LoadPlan::Placeholder,
            Some(layout) => {
                let zoom = zoom_level(scale());
                LoadPlan::Read(LoadRequest {
                    location: self.location,
                    generation: self.generation,
                    zoom,
                    path: layout.tile_path(self.location, zoom),
                })
            }
        }
    }

    /// Loads the tile's bitmap from the cache on the calling thread.
    ///
    /// `on_complete` runs exactly when this call moves the tile into the
    /// loaded state. Calling this on a loaded tile does nothing. A cache miss
    /// leaves the tile unloaded so the load can be retried later. The
    /// `loading` flag is not touched.
    pub fn load_from_cache<S, F>(&mut self, config: &TileConfig, scale: S, on_complete: F) -> LoadStatus
    where
        S: FnOnce() -> f32,
        F: FnOnce(&Tile),
    {
        match self.plan_load(config, scale) {
            LoadPlan::AlreadyLoaded => {
                log::debug!("region {} already loaded", self.location);
                LoadStatus::AlreadyLoaded
            }
            LoadPlan::Placeholder => {
                self.load_placeholder();
                on_complete(self);
                LoadStatus::Placeholder
            }
            LoadPlan::Read(request) => {
                log::debug!(
                    "loading region {} from cache: {}",
                    self.location,
                    request.path.display()
                );
                match read_cached_image(&request.path) {
                    Ok(image) => {
                        self.set_image(image);
                        on_complete(self);
                        LoadStatus::Loaded
                    }
                    Err(e) => {
                        log::debug!("region {} not cached: {}", self.location, e);
                        LoadStatus::Missing
                    }
                }
            }
        }
    }

    /// Applies the result of a background load.
    ///
    /// Results from before the last `unload` are discarded untouched.
    /// Otherwise the `loading` flag is cleared and a successful read attaches
    /// its bitmap.
    pub fn finish_load(&mut self, outcome: LoadOutcome) -> LoadStatus {
        if outcome.location != self.location || outcome.generation != self.generation {
            log::debug!(
                "discarding stale load of region {} (generation {}, current {})",
                outcome.location,
                outcome.generation,
                self.generation
            );
            return LoadStatus::Stale;
        }

        self.loading = false;
        if self.loaded {
            return LoadStatus::AlreadyLoaded;
        }

        match outcome.result {
            Ok(image) => {
                self.set_image(image);
                LoadStatus::Loaded
            }
            Err(e) => {
                log::debug!("region {} not cached: {}", self.location, e);
                LoadStatus::Missing
            }
        }
    }

    /// Loaded state without a bitmap, used when no cache is configured.
    pub(crate) fn load_placeholder(&mut self) {
        self.image = None;
        self.loaded = true;
    }
}
