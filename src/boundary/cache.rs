use super::{AdminLevel, BoundarySet, parse_feature_collection};
use crate::error::CoverageError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Resolution of the boundary files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
    /// Simplified outlines.
    #[default]
    General,
    /// Full-resolution outlines.
    Detailed,
    /// The small bundled sample set.
    Sample,
}

impl DetailLevel {
    /// Suffix of the file stem at this level.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            DetailLevel::General => "_generale",
            DetailLevel::Detailed => "_dettagliata",
            DetailLevel::Sample => "",
        }
    }
}

/// Loads the boundary set for a detail level.
pub trait BoundarySource {
    fn load(&self, level: DetailLevel) -> Result<BoundarySet, CoverageError>;
}

/// Stores loaded boundary sets by detail level.
pub trait BoundaryCache {
    fn get(&self, level: DetailLevel) -> Option<Arc<BoundarySet>>;
    fn put(&self, level: DetailLevel, set: Arc<BoundarySet>);
}

/// Process-local cache; entries live as long as the cache.
#[derive(Debug, Default)]
pub struct MemoryBoundaryCache {
    entries: RwLock<HashMap<DetailLevel, Arc<BoundarySet>>>,
}

impl MemoryBoundaryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BoundaryCache for MemoryBoundaryCache {
    fn get(&self, level: DetailLevel) -> Option<Arc<BoundarySet>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(&level).cloned()
    }

    fn put(&self, level: DetailLevel, set: Arc<BoundarySet>) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(level, set);
    }
}

/// Directory of `province{suffix}.json` and `comuni{suffix}.json` files.
///
/// A missing file yields an empty list. When neither file exists at a
/// suffixed level, the unsuffixed sample files are used instead.
#[derive(Debug, Clone)]
pub struct GeoJsonDir {
    root: PathBuf,
}

impl GeoJsonDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, stem: &str, level: DetailLevel) -> PathBuf {
        self.root.join(format!("{stem}{}.json", level.file_suffix()))
    }

    fn read(path: &Path, level: AdminLevel) -> Result<Option<Vec<super::AdminArea>>, CoverageError> {
        if !path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(path)
            .map_err(|e| CoverageError::Io(format!("{}: {e}", path.display())))?;
        parse_feature_collection(&json, level).map(Some)
    }
}

impl BoundarySource for GeoJsonDir {
    fn load(&self, level: DetailLevel) -> Result<BoundarySet, CoverageError> {
        let provinces = Self::read(&self.path("province", level), AdminLevel::Province)?;
        let municipalities = Self::read(&self.path("comuni", level), AdminLevel::Municipality)?;

        if provinces.is_none() && municipalities.is_none() && level != DetailLevel::Sample {
            warn!(?level, root = %self.root.display(), "no boundary files, using sample set");
            return self.load(DetailLevel::Sample);
        }

        Ok(BoundarySet::new(
            provinces.unwrap_or_default(),
            municipalities.unwrap_or_default(),
        ))
    }
}

/// Memoizes a [`BoundarySource`] through a [`BoundaryCache`]: each detail
/// level is loaded at most once while it stays cached.
pub struct CachedBoundaries<P: BoundarySource, C: BoundaryCache> {
    source: P,
    cache: C,
}

impl<P: BoundarySource, C: BoundaryCache> CachedBoundaries<P, C> {
    pub fn new(source: P, cache: C) -> Self {
        Self { source, cache }
    }

    pub fn get(&self, level: DetailLevel) -> Result<Arc<BoundarySet>, CoverageError> {
        if let Some(set) = self.cache.get(level) {
            debug!(?level, "boundary cache hit");
            return Ok(set);
        }
        let set = Arc::new(self.source.load(level)?);
        debug!(
            ?level,
            provinces = set.provinces.len(),
            municipalities = set.municipalities.len(),
            "boundaries loaded"
        );
        self.cache.put(level, Arc::clone(&set));
        Ok(set)
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }
}
