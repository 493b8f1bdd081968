use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Tracked root name -> distinct member/index names accessed on it.
///
/// Every tracked root is present as a key, even when nothing was accessed.
/// Ordered collections keep the serialized form stable between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ReferenceMap(BTreeMap<String, BTreeSet<String>>);

impl ReferenceMap {
    pub fn with_roots<I, S>(roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            roots
                .into_iter()
                .map(|r| (r.into(), BTreeSet::new()))
                .collect(),
        )
    }

    pub fn is_tracked(&self, root: &str) -> bool {
        self.0.contains_key(root)
    }

    /// Record an access on a tracked root. Untracked roots are ignored.
    pub fn record(&mut self, root: &str, member: impl Into<String>) -> bool {
        match self.0.get_mut(root) {
            Some(members) => members.insert(member.into()),
            None => false,
        }
    }

    pub fn get(&self, root: &str) -> Option<&BTreeSet<String>> {
        self.0.get(root)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of recorded accesses across all roots.
    pub fn access_count(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }
}
