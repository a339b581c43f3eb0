//! Flat map shared between the frame pipeline and readers.
//!
//! The pipeline holds the write lock for the whole clear-and-redraw pass,
//! so a reader never observes a partially drawn frame.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::FlatMap;

/// Read access to a complete frame.
pub type FlatMapReadGuard<'a> = RwLockReadGuard<'a, FlatMap>;

/// Cloneable handle to a flat map behind a reader-writer lock.
#[derive(Debug, Clone)]
pub struct SharedFlatMap {
    inner: Arc<RwLock<FlatMap>>,
}

impl SharedFlatMap {
    /// Wrap a map.
    pub fn new(map: FlatMap) -> Self {
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// Block until no frame is being drawn, then borrow the map.
    pub fn read(&self) -> FlatMapReadGuard<'_> {
        self.inner.read()
    }

    /// Borrow the map without blocking; `None` while a frame is being drawn.
    pub fn try_read(&self) -> Option<FlatMapReadGuard<'_>> {
        self.inner.try_read()
    }

    /// Exclusive access for a redraw pass.
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, FlatMap> {
        self.inner.write()
    }

    /// Owned copy of the latest complete frame.
    pub fn snapshot(&self) -> FlatMap {
        self.inner.read().clone()
    }

    /// Generation of the latest complete frame.
    pub fn generation(&self) -> u64 {
        self.inner.read().generation()
    }
}

impl Default for SharedFlatMap {
    fn default() -> Self {
        Self::new(FlatMap::default())
    }
}
