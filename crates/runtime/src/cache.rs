use dashmap::DashMap;
use scriptscope_api::{ResponsePayload, ScriptVersion};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Outline,
    /// Roots sorted and deduplicated.
    References(Vec<String>),
    Diagnostics,
}

impl QueryKey {
    pub fn references(roots: &[String]) -> Self {
        let mut roots = roots.to_vec();
        roots.sort();
        roots.dedup();
        QueryKey::References(roots)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub file_name: String,
    pub version: ScriptVersion,
    pub query: QueryKey,
}

/// Query results keyed by the buffer version they were computed from.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: DashMap<CacheKey, ResponsePayload>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<ResponsePayload> {
        self.entries.get(key).map(|hit| hit.value().clone())
    }

    pub fn insert(&self, key: CacheKey, payload: ResponsePayload) {
        self.entries.insert(key, payload);
    }

    /// Drop every result computed for `file_name`, whatever its version.
    pub fn invalidate_file(&self, file_name: &str) {
        self.entries.retain(|key, _| key.file_name != file_name);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
