//! Catalogue loading with a local cache

use crate::catalogue::Catalogue;
use crate::codec::ReadSummary;
use crate::region::RegionTable;
use crate::Result;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Loads a catalogue from a local cache or a snapshot, merges an optional
/// feed file, and writes the merged result back to the cache.
#[derive(Debug, Clone)]
pub struct CatalogueLoader {
    cache_path: PathBuf,
    snapshot_path: Option<PathBuf>,
    feed_path: Option<PathBuf>,
    regions: RegionTable,
}

impl CatalogueLoader {
    /// Create a loader that caches to `cache_path`
    pub fn new<P: AsRef<Path>>(cache_path: P) -> Self {
        Self {
            cache_path: cache_path.as_ref().to_path_buf(),
            snapshot_path: None,
            feed_path: None,
            regions: RegionTable::new(),
        }
    }

    /// Snapshot read when no cache exists yet
    pub fn with_snapshot<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.snapshot_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Additional file merged on top of the cache or snapshot
    pub fn with_feed<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.feed_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use a specific region table
    pub fn with_regions(mut self, regions: RegionTable) -> Self {
        self.regions = regions;
        self
    }

    /// Path of the local cache file
    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Load, merge and persist the catalogue
    pub fn load(&self) -> Result<Catalogue> {
        let mut catalogue = Catalogue::new();

        if self.cache_path.exists() {
            let summary = self.read_file(&self.cache_path, &mut catalogue)?;
            debug!(path = %self.cache_path.display(), added = summary.added, "read catalogue cache");
        } else if let Some(snapshot) = &self.snapshot_path {
            let summary = self.read_file(snapshot, &mut catalogue)?;
            debug!(path = %snapshot.display(), added = summary.added, "read catalogue snapshot");
        }

        info!(count = catalogue.len(), "local catalogue loaded");

        if let Some(feed) = &self.feed_path {
            let summary = self.read_file(feed, &mut catalogue)?;
            info!(
                path = %feed.display(),
                added = summary.added,
                duplicates = summary.duplicates,
                "merged catalogue feed"
            );
        }

        let writer = BufWriter::new(File::create(&self.cache_path)?);
        catalogue.write_csv(writer)?;

        Ok(catalogue)
    }

    fn read_file(&self, path: &Path, catalogue: &mut Catalogue) -> Result<ReadSummary> {
        let reader = BufReader::new(File::open(path)?);
        catalogue.read_csv(reader, &self.regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const SNAPSHOT: &str = "\
2010-02-27;06:34:14;-36.1;-72.7;35; ;MW;8.8;OFFSHORE MAULE, CHILE;
2015-09-16;22:54:32;-31.6;-71.7;25; ;MW;8.3;OFF COAST OF COQUIMBO, CHILE;
";

    const FEED: &str = "\
2015-09-16;22:54:32;-31.6;-71.7;25; ;MW;8.3;OFF COAST OF COQUIMBO, CHILE;
2014-04-01;23:46:47;-19.6;-70.8;20; ;MW;8.2;TARAPACA, CHILE;
";

    fn write_file(path: &Path, contents: &str) {
        let mut file = File::create(path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn test_snapshot_used_without_cache_and_cache_written() {
        let dir = tempdir().unwrap();
        let cache = dir.path().join("earthquakes.base");
        let snapshot = dir.path().join("snapshot.csv");
        write_file(&snapshot, SNAPSHOT);

        let catalogue = CatalogueLoader::new(&cache)
            .with_snapshot(&snapshot)
            .load()
            .unwrap();

        assert_eq!(catalogue.len(), 2);
        assert!(cache.exists());
    }

    #[test]
    fn test_cache_preferred_over_snapshot() {
        let dir = tempdir().unwrap();
        let cache = dir.path().join("earthquakes.base");
        let snapshot = dir.path().join("snapshot.csv");
        write_file(&cache, FEED);
        write_file(&snapshot, SNAPSHOT);

        let catalogue = CatalogueLoader::new(&cache)
            .with_snapshot(&snapshot)
            .load()
            .unwrap();

        assert_eq!(catalogue.len(), 2);
        assert_eq!(catalogue.strongest().unwrap().magnitude, 8.3);
    }

    #[test]
    fn test_feed_is_merged_and_persisted() {
        let dir = tempdir().unwrap();
        let cache = dir.path().join("earthquakes.base");
        let snapshot = dir.path().join("snapshot.csv");
        let feed = dir.path().join("feed.csv");
        write_file(&snapshot, SNAPSHOT);
        write_file(&feed, FEED);

        let catalogue = CatalogueLoader::new(&cache)
            .with_snapshot(&snapshot)
            .with_feed(&feed)
            .load()
            .unwrap();
        assert_eq!(catalogue.len(), 3);

        // a second run reads everything back from the cache alone
        let cached = CatalogueLoader::new(&cache).load().unwrap();
        assert_eq!(cached.len(), 3);
    }

    #[test]
    fn test_missing_feed_is_an_error() {
        let dir = tempdir().unwrap();
        let result = CatalogueLoader::new(dir.path().join("cache"))
            .with_feed(dir.path().join("missing.csv"))
            .load();
        assert!(result.is_err());
    }
}
