//! Demand logging for searches with no catalog results. Entries are
//! free-text strings, deduplicated and append-only. UI input goes
//! through an explicit debounce handle so that only a settled search
//! term reaches the log.

use std::time::{Duration, Instant};

use crate::storage::{MISSING_BRAND_KEY, MISSING_MODEL_KEY, Storage};

/// Delay before a search term is considered settled. Within the
/// observed 150 ms–1.5 s band of the storefront.
pub const SETTLE_DELAY: Duration = Duration::from_millis(900);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemandKind {
    Brand,
    Model,
}

impl DemandKind {
    pub fn key(self) -> &'static str {
        match self {
            Self::Brand => MISSING_BRAND_KEY,
            Self::Model => MISSING_MODEL_KEY,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Brand => "marca",
            Self::Model => "modelo",
        }
    }
}

/// Combined entry format for missing-model searches: "Brand: query".
pub fn model_entry(brand: &str, query: &str) -> String {
    format!("{brand}: {query}")
}

pub fn load_entries(storage: &dyn Storage, kind: DemandKind) -> Vec<String> {
    let Ok(Some(raw)) = storage.load(kind.key()) else {
        return Vec::new();
    };
    serde_json::from_str(&raw).unwrap_or_default()
}

/// Appends a deduplicated entry and writes the log through. Returns
/// false when the entry was already present.
pub fn append_entry(storage: &dyn Storage, kind: DemandKind, entry: &str) -> bool {
    let entry = entry.trim();
    if entry.is_empty() {
        return false;
    }

    let mut entries = load_entries(storage, kind);
    if entries.iter().any(|existing| existing == entry) {
        return false;
    }

    entries.push(entry.to_string());
    if let Ok(raw) = serde_json::to_string(&entries) {
        let _ = storage.save(kind.key(), &raw);
    }
    true
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingEntry {
    kind: DemandKind,
    entry: String,
    due: Instant,
}

/// A single cancellable pending log entry, owned by the caller.
/// Scheduling replaces whatever was pending (last write wins);
/// navigation away cancels it; ticks flush it once the deadline has
/// passed.
#[derive(Debug, Default)]
pub struct DebouncedDemand {
    pending: Option<PendingEntry>,
}

impl DebouncedDemand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, kind: DemandKind, entry: String, delay: Duration, now: Instant) {
        if entry.trim().is_empty() {
            self.pending = None;
            return;
        }
        self.pending = Some(PendingEntry {
            kind,
            entry,
            due: now + delay,
        });
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Appends the pending entry when its deadline has passed.
    /// Returns the appended (kind, entry) pair, or `None` when
    /// nothing was due or the entry was a duplicate.
    pub fn flush_due(
        &mut self,
        storage: &dyn Storage,
        now: Instant,
    ) -> Option<(DemandKind, String)> {
        let due = self
            .pending
            .as_ref()
            .map(|pending| pending.due <= now)
            .unwrap_or(false);
        if !due {
            return None;
        }

        let pending = self.pending.take()?;
        if append_entry(storage, pending.kind, &pending.entry) {
            Some((pending.kind, pending.entry))
        } else {
            None
        }
    }
}
