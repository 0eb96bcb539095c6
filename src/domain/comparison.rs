//! Comparison selection: the small, durable list of tools queued for a
//! side-by-side view.
//!
//! The selection persists through a [`DurableScope`], a minimal key-value
//! capability. The web layer backs it with a cookie; tests and the CLI use
//! [`MemoryScope`]. Persistence is best effort: an absent or corrupt value
//! loads as an empty selection and is never reported as an error.

use std::collections::HashMap;

use tracing::warn;

/// Key under which the selection is stored.
pub const COMPARE_STORAGE_KEY: &str = "compareTools";

/// Default number of tools that can be compared at once.
pub const DEFAULT_COMPARE_CAPACITY: usize = 4;

/// Largest capacity a deployment may configure.
pub const MAX_COMPARE_CAPACITY: usize = 8;

/// A client-local key-value store with best-effort durability.
pub trait DurableScope {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// In-memory scope.
#[derive(Debug, Clone, Default)]
pub struct MemoryScope {
    entries: HashMap<String, String>,
}

impl MemoryScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scope pre-populated with one raw entry.
    pub fn with_entry(key: &str, value: impl Into<String>) -> Self {
        let mut scope = Self::new();
        scope.entries.insert(key.to_string(), value.into());
        scope
    }
}

impl DurableScope for MemoryScope {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Result of [`ComparisonSelection::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
    /// The selection is full; nothing was changed.
    CapacityReached,
}

/// Ordered, de-duplicated set of tool slugs, written through to its scope.
#[derive(Debug)]
pub struct ComparisonSelection<S: DurableScope> {
    scope: S,
    slugs: Vec<String>,
    capacity: usize,
}

impl<S: DurableScope> ComparisonSelection<S> {
    /// Loads the selection stored in `scope`.
    ///
    /// Malformed data is logged and treated as an empty selection.
    pub fn load(scope: S, capacity: usize) -> Self {
        let slugs = match scope.read(COMPARE_STORAGE_KEY) {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(list) => dedupe(list),
                Err(e) => {
                    warn!(error = %e, "Discarding malformed comparison selection");
                    Vec::new()
                }
            },
        };

        Self {
            scope,
            slugs,
            capacity: capacity.max(1),
        }
    }

    /// Appends `slug` unless it is already selected or the selection is full.
    pub fn add(&mut self, slug: &str) -> AddOutcome {
        let slug = slug.trim();
        if self.contains(slug) {
            return AddOutcome::AlreadyPresent;
        }
        if self.is_full() {
            return AddOutcome::CapacityReached;
        }

        self.slugs.push(slug.to_string());
        self.persist();
        AddOutcome::Added
    }

    /// Removes `slug` if present. Returns whether anything changed.
    pub fn remove(&mut self, slug: &str) -> bool {
        let before = self.slugs.len();
        self.slugs.retain(|s| s != slug.trim());
        let changed = self.slugs.len() != before;
        if changed {
            self.persist();
        }
        changed
    }

    pub fn clear(&mut self) {
        self.slugs.clear();
        self.scope.remove(COMPARE_STORAGE_KEY);
    }

    /// Selected slugs in insertion order.
    pub fn list(&self) -> &[String] {
        &self.slugs
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.iter().any(|s| s == slug)
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.slugs.len() >= self.capacity
    }

    pub fn scope(&self) -> &S {
        &self.scope
    }

    /// Releases the scope, e.g. to flush cookie headers into a response.
    pub fn into_scope(self) -> S {
        self.scope
    }

    fn persist(&mut self) {
        if self.slugs.is_empty() {
            self.scope.remove(COMPARE_STORAGE_KEY);
            return;
        }
        match serde_json::to_string(&self.slugs) {
            Ok(json) => self.scope.write(COMPARE_STORAGE_KEY, json),
            Err(e) => warn!(error = %e, "Failed to encode comparison selection"),
        }
    }
}

fn dedupe(list: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(list.len());
    for slug in list {
        let slug = slug.trim().to_string();
        if !slug.is_empty() && !out.contains(&slug) {
            out.push(slug);
        }
    }
    out
}
