//! CRS construction with a process-wide definition cache.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::crs::Crs;
use crate::error::ProjError;
use crate::registry;

/// Builds CRS instances from authority names or parameter strings and caches
/// them by name. Cached systems are shared via `Arc`, so repeated lookups
/// return the same instance.
#[derive(Default)]
pub struct CrsFactory {
    cache: RwLock<HashMap<String, Arc<Crs>>>,
}

impl CrsFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a CRS from either an `AUTHORITY:CODE` name or, when the
    /// argument contains `+`, a raw parameter string.
    pub fn create(&self, spec: &str) -> Result<Arc<Crs>, ProjError> {
        if spec.contains('+') {
            self.from_proj_string(spec, spec)
        } else {
            self.from_name(spec)
        }
    }

    /// Resolves an `AUTHORITY:CODE` name through the registry.
    pub fn from_name(&self, name: &str) -> Result<Arc<Crs>, ProjError> {
        let key = name.trim().to_ascii_uppercase();
        if let Some(crs) = self.cache.read().get(&key) {
            log::debug!("crs cache hit: {key}");
            return Ok(Arc::clone(crs));
        }
        log::debug!("crs cache miss: {key}");
        let definition = registry::lookup(&key)?;
        let crs = Arc::new(Crs::from_proj_string(&key, &definition)?);
        self.cache
            .write()
            .entry(key)
            .or_insert_with(|| Arc::clone(&crs));
        Ok(crs)
    }

    /// Builds a CRS directly from a parameter string, cached under `name`.
    pub fn from_proj_string(&self, name: &str, spec: &str) -> Result<Arc<Crs>, ProjError> {
        if let Some(crs) = self.cache.read().get(name) {
            log::debug!("crs cache hit: {name}");
            return Ok(Arc::clone(crs));
        }
        let crs = Arc::new(Crs::from_proj_string(name, spec)?);
        self.cache
            .write()
            .entry(name.to_string())
            .or_insert_with(|| Arc::clone(&crs));
        Ok(crs)
    }
}

lazy_static::lazy_static! {
    static ref GLOBAL: CrsFactory = CrsFactory::new();
}

/// The shared process-wide factory.
pub fn global() -> &'static CrsFactory {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        let factory = CrsFactory::new();
        let crs = factory.from_name("EPSG:4326").unwrap();
        assert!(crs.is_geographic());
    }

    #[test]
    fn test_cache_returns_same_instance() {
        let factory = CrsFactory::new();
        let a = factory.from_name("EPSG:27700").unwrap();
        let b = factory.from_name("epsg:27700").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_create_dispatches_on_plus() {
        let factory = CrsFactory::new();
        let named = factory.create("EPSG:4326").unwrap();
        assert!(named.is_geographic());
        let raw = factory
            .create("+proj=utm +zone=31 +datum=WGS84 +units=m +no_defs")
            .unwrap();
        assert!(!raw.is_geographic());
    }

    #[test]
    fn test_unknown_name() {
        let factory = CrsFactory::new();
        assert!(matches!(
            factory.from_name("EPSG:1"),
            Err(ProjError::UnknownCrs(_))
        ));
    }

    #[test]
    fn test_global_is_shared() {
        let a = global().from_name("EPSG:4326").unwrap();
        let b = global().from_name("EPSG:4326").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
