//! Caller-held memoization of loaded catalogs.
//!
//! A catalog is reloaded only when the file's modification time or any of
//! its [`LoadOptions`] change. The cache is a plain value owned by whoever
//! drives queries; there is no process-wide state.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use wifi_map_catalog_models::TextEncoding;

use crate::loader::load_catalog;
use crate::progress::ProgressCallback;
use crate::{Catalog, LoadError, LoadOptions};

/// Identity of a cached catalog, excluding the file modification time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CatalogKey {
    /// Catalog file path.
    pub path: PathBuf,
    /// Declared text encoding.
    pub encoding: TextEncoding,
    /// Header profile id.
    pub profile: String,
    /// Region filter value.
    pub region: Option<String>,
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl From<&LoadOptions> for CatalogKey {
    fn from(options: &LoadOptions) -> Self {
        Self {
            path: options.path.clone(),
            encoding: options.encoding,
            profile: options.profile.clone(),
            region: options.region.clone(),
            delimiter: options.delimiter,
        }
    }
}

struct CacheEntry {
    modified: SystemTime,
    catalog: Arc<Catalog>,
}

/// Loaded catalogs keyed by [`CatalogKey`] and stamped with the file's
/// modification time.
#[derive(Default)]
pub struct CatalogCache {
    entries: BTreeMap<CatalogKey, CacheEntry>,
}

impl CatalogCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached catalog for `options` if the file is unchanged,
    /// otherwise loads it and replaces the entry.
    ///
    /// Files whose modification time cannot be read are never cached.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the file is missing or the load fails. A
    /// failed load leaves any previous entry for the key untouched.
    pub fn get_or_load(
        &mut self,
        options: &LoadOptions,
        progress: &dyn ProgressCallback,
    ) -> Result<Arc<Catalog>, LoadError> {
        let key = CatalogKey::from(options);
        let modified = file_modified(options)?;

        if let Some(modified) = modified
            && let Some(entry) = self.entries.get(&key)
            && entry.modified == modified
        {
            log::debug!("Catalog cache hit for {}", options.path.display());
            return Ok(Arc::clone(&entry.catalog));
        }

        log::debug!("Catalog cache miss for {}", options.path.display());
        let catalog = Arc::new(load_catalog(options, progress)?);

        if let Some(modified) = modified {
            self.entries.insert(
                key,
                CacheEntry {
                    modified,
                    catalog: Arc::clone(&catalog),
                },
            );
        }

        Ok(catalog)
    }

    /// Drops every cached catalog loaded from `path`, whatever its options.
    pub fn invalidate(&mut self, path: &std::path::Path) {
        self.entries.retain(|key, _| key.path != path);
    }

    /// Number of cached catalogs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn file_modified(options: &LoadOptions) -> Result<Option<SystemTime>, LoadError> {
    let metadata = std::fs::metadata(&options.path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::FileNotFound {
            path: options.path.clone(),
        },
        _ => LoadError::Io(e),
    })?;
    Ok(metadata.modified().ok())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::progress::NullProgress;

    const CSV: &str = "ssid,provider,lat,lon,place_name,detail_address\n\
                       a,KT,37.5,127.0,A,\n";

    fn options(path: &std::path::Path) -> LoadOptions {
        LoadOptions::new(path).with_profile("normalized")
    }

    #[test]
    fn returns_same_catalog_while_file_is_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wifi.csv");
        std::fs::write(&path, CSV).unwrap();

        let mut cache = CatalogCache::new();
        let first = cache.get_or_load(&options(&path), &NullProgress).unwrap();
        let second = cache.get_or_load(&options(&path), &NullProgress).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn reloads_when_modification_time_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wifi.csv");
        std::fs::write(&path, CSV).unwrap();

        let mut cache = CatalogCache::new();
        let first = cache.get_or_load(&options(&path), &NullProgress).unwrap();
        assert_eq!(first.len(), 1);

        std::fs::write(&path, format!("{CSV}b,SKT,37.6,127.1,B,\n")).unwrap();
        let file = std::fs::File::options().write(true).open(&path).unwrap();
        let bumped = std::fs::metadata(&path).unwrap().modified().unwrap() + Duration::from_secs(5);
        file.set_modified(bumped).unwrap();

        let second = cache.get_or_load(&options(&path), &NullProgress).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn different_options_are_cached_separately() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wifi.csv");
        std::fs::write(&path, CSV).unwrap();

        let mut cache = CatalogCache::new();
        cache.get_or_load(&options(&path), &NullProgress).unwrap();
        cache
            .get_or_load(
                &options(&path).with_encoding(TextEncoding::Cp949),
                &NullProgress,
            )
            .unwrap();
        assert_eq!(cache.len(), 2);

        cache.invalidate(&path);
        assert!(cache.is_empty());
    }

    #[test]
    fn missing_file_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = CatalogCache::new();
        let err = cache
            .get_or_load(&options(&dir.path().join("absent.csv")), &NullProgress)
            .unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound { .. }));
        assert!(cache.is_empty());
    }
}
