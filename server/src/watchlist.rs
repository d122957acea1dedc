use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WatchlistEntry {
    pub object_id: i64,
    pub object_repr: String,
}

/// One user's watchlist: entries per model label, in the order they were
/// added. A model label never maps to an empty list.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Watchlist {
    models: BTreeMap<String, Vec<WatchlistEntry>>,
}

impl Watchlist {
    pub fn on_watchlist(&self, model_label: &str, object_id: i64) -> bool {
        self.entries(model_label)
            .iter()
            .any(|entry| entry.object_id == object_id)
    }

    pub fn entries(&self, model_label: &str) -> &[WatchlistEntry] {
        self.models
            .get(model_label)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn models(&self) -> impl Iterator<Item = (&str, &[WatchlistEntry])> {
        self.models
            .iter()
            .map(|(label, entries)| (label.as_str(), entries.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.models.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Returns false if the object was already on the watchlist.
    pub fn add(&mut self, model_label: &str, object_id: i64, object_repr: &str) -> bool {
        if self.on_watchlist(model_label, object_id) {
            return false;
        }
        self.models
            .entry(model_label.to_string())
            .or_default()
            .push(WatchlistEntry {
                object_id,
                object_repr: object_repr.to_string(),
            });
        true
    }

    pub fn remove(&mut self, model_label: &str, object_id: i64) -> bool {
        let Some(entries) = self.models.get_mut(model_label) else {
            return false;
        };
        let Some(index) = entries.iter().position(|entry| entry.object_id == object_id) else {
            return false;
        };
        entries.remove(index);
        if entries.is_empty() {
            self.models.remove(model_label);
        }
        true
    }

    /// Adds the object if absent, removes it otherwise. Returns whether the
    /// object is on the watchlist afterwards.
    pub fn toggle(&mut self, model_label: &str, object_id: i64, object_repr: &str) -> bool {
        if self.remove(model_label, object_id) {
            false
        } else {
            self.add(model_label, object_id, object_repr)
        }
    }

    /// Returns how many entries were dropped.
    pub fn remove_model(&mut self, model_label: &str) -> usize {
        self.models
            .remove(model_label)
            .map(|entries| entries.len())
            .unwrap_or(0)
    }
}
