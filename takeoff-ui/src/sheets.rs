//! Per-session quantity sheet buffers
//!
//! Each login session holds at most one working sheet: the result of the
//! latest successful drawing analysis, or of an explicit edit. Buffers live
//! only in memory; a restart drops them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use takeoff_common::Sheet;

/// In-memory map from session token to that session's working sheet
#[derive(Clone, Default)]
pub struct SheetStore {
    inner: Arc<Mutex<HashMap<String, Sheet>>>,
}

impl SheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current sheet for the session, if any
    pub fn get(&self, token: &str) -> Option<Sheet> {
        self.inner.lock().unwrap().get(token).cloned()
    }

    /// Replace the session's sheet, dropping any prior one
    pub fn replace(&self, token: &str, sheet: Sheet) {
        self.inner.lock().unwrap().insert(token.to_string(), sheet);
    }

    /// Drop the session's sheet (logout)
    pub fn remove(&self, token: &str) {
        self.inner.lock().unwrap().remove(token);
    }
}
