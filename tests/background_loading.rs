use regionmap::prelude::*;
use std::path::Path;
use std::time::Duration;

/// Tests for loading tiles off the owning thread: the worker pool, message
/// hand-off and discarding of results that arrive after an unload.
#[cfg(test)]
mod background_loading_tests {
    use super::*;

    const WAIT: Duration = Duration::from_secs(5);

    fn write_cached_tile(root: &Path, region: Point, zoom: u32) {
        let layout = CacheLayout::new(root, "png");
        std::fs::create_dir_all(layout.zoom_dir(zoom)).unwrap();
        image::RgbaImage::new(4, 4)
            .save(layout.tile_path(region, zoom))
            .unwrap();
    }

    #[test]
    fn test_queued_load_completes_on_owner_thread() {
        let dir = tempfile::tempdir().unwrap();
        write_cached_tile(dir.path(), Point::new(1, 1), 1);
        let config = TileConfig::with_cache_dir(dir.path());
        let loader = TileLoader::from_config(&config).unwrap();

        let mut tile = Tile::new(Point::new(1, 1));
        assert_eq!(loader.request(&mut tile, &config, || 1.0), RequestStatus::Queued);
        assert!(tile.is_loading());
        assert_eq!(loader.request(&mut tile, &config, || 1.0), RequestStatus::InFlight);

        let outcome = loader.recv_timeout(WAIT).expect("load outcome");
        assert_eq!(outcome.location, Point::new(1, 1));
        assert_eq!(tile.finish_load(outcome), LoadStatus::Loaded);
        assert!(tile.is_loaded());
        assert!(!tile.is_loading());

        assert_eq!(
            loader.request(&mut tile, &config, || 1.0),
            RequestStatus::AlreadyLoaded
        );
    }

    #[test]
    fn test_result_after_unload_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        write_cached_tile(dir.path(), Point::new(0, 0), 1);
        let config = TileConfig::with_cache_dir(dir.path());
        let loader = TileLoader::new(&LoaderConfig::low_resource()).unwrap();

        let mut tile = Tile::new(Point::new(0, 0));
        loader.request(&mut tile, &config, || 1.0);
        tile.unload();

        let outcome = loader.recv_timeout(WAIT).expect("load outcome");
        assert_eq!(tile.finish_load(outcome), LoadStatus::Stale);
        assert!(!tile.is_loaded());
        assert!(tile.image().is_none());

        // A fresh request after the unload is honoured.
        assert_eq!(loader.request(&mut tile, &config, || 1.0), RequestStatus::Queued);
        let outcome = loader.recv_timeout(WAIT).expect("load outcome");
        assert_eq!(tile.finish_load(outcome), LoadStatus::Loaded);
    }

    #[test]
    fn test_many_tiles_load_concurrently() {
        let dir = tempfile::tempdir().unwrap();
        let viewport = Viewport::new(Point::new(-1024, -1024), 1000, 1000, 2.0);
        let regions: Vec<Point> = Culling::visible_regions(&viewport, 0).collect();
        for region in &regions {
            write_cached_tile(dir.path(), *region, zoom_level(viewport.scale));
        }

        let config = TileConfig::with_cache_dir(dir.path());
        let loader = TileLoader::from_config(&config).unwrap();
        let mut tiles: HashMap<Point, Tile> = regions.iter().map(|r| (*r, Tile::new(*r))).collect();

        for tile in tiles.values_mut() {
            assert_eq!(
                loader.request(tile, &config, || viewport.scale),
                RequestStatus::Queued
            );
        }

        for _ in 0..regions.len() {
            let outcome = loader.recv_timeout(WAIT).expect("load outcome");
            let tile = tiles.get_mut(&outcome.location).expect("known tile");
            assert_eq!(tile.finish_load(outcome), LoadStatus::Loaded);
        }
        assert!(tiles.values().all(|t| t.is_loaded() && !t.is_loading()));
        assert!(loader.try_recv().is_none());
    }

    #[test]
    fn test_shutdown_finishes_queued_reads() {
        let dir = tempfile::tempdir().unwrap();
        let config = TileConfig::with_cache_dir(dir.path());
        let mut loader = TileLoader::new(&LoaderConfig::low_resource()).unwrap();

        let mut tiles: Vec<Tile> = (0..8).map(|x| Tile::new(Point::new(x, 0))).collect();
        for tile in tiles.iter_mut() {
            loader.request(tile, &config, || 1.0);
        }
        loader.shutdown();

        let outcomes = loader.drain();
        assert_eq!(outcomes.len(), 8);
        assert!(outcomes.iter().all(|o| o.result.is_err()));
    }

    #[cfg(feature = "tokio-runtime")]
    #[tokio::test]
    async fn test_load_async() {
        let dir = tempfile::tempdir().unwrap();
        write_cached_tile(dir.path(), Point::new(-2, 5), 8);
        let config = TileConfig::with_cache_dir(dir.path());

        let mut tile = Tile::new(Point::new(-2, 5));
        let request = match tile.plan_load(&config, || 8.0) {
            LoadPlan::Read(request) => request,
            other => panic!("unexpected plan {:?}", other),
        };
        tile.set_loading(true);

        let outcome = load_async(request).await;
        assert_eq!(outcome.zoom, 8);
        assert_eq!(tile.finish_load(outcome), LoadStatus::Loaded);
        assert_eq!(tile.image().map(|i| i.width()), Some(4));
    }
}
