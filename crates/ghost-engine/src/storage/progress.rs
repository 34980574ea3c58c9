//! The single durable record: whether the player has seen the intro.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::storage::store::KeyValueStore;

/// Current schema version written by [`Progress::encode`].
pub const PROGRESS_VERSION: u32 = 1;

/// Durable player progress, stored as a flat JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    #[serde(default = "current_version")]
    pub version: u32,
    pub seen_intro: bool,
}

fn current_version() -> u32 {
    PROGRESS_VERSION
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            version: PROGRESS_VERSION,
            seen_intro: false,
        }
    }
}

/// Every shape the record has had on disk.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredProgress {
    Current(Progress),
    /// Early builds stored a level counter; any progress means the intro was seen.
    Legacy { progress: u32 },
}

/// Result of reading progress at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedProgress {
    pub progress: Progress,
    /// Nothing was stored under the key.
    pub first_run: bool,
}

impl Progress {
    pub fn encode(&self) -> String {
        serde_json::json!({
            "version": PROGRESS_VERSION,
            "seenIntro": self.seen_intro,
        })
        .to_string()
    }

    /// Parse a stored blob, migrating legacy shapes.
    pub fn decode(blob: &str) -> Result<Self, EngineError> {
        let stored: StoredProgress =
            serde_json::from_str(blob).map_err(EngineError::InvalidPersistedState)?;
        Ok(match stored {
            StoredProgress::Current(p) => Progress {
                version: PROGRESS_VERSION,
                ..p
            },
            StoredProgress::Legacy { progress } => Progress {
                version: PROGRESS_VERSION,
                seen_intro: progress > 0,
            },
        })
    }

    /// Read progress from `store`. Unparseable blobs fall back to defaults.
    pub fn load(store: &dyn KeyValueStore, key: &str) -> LoadedProgress {
        let Some(blob) = store.get(key) else {
            return LoadedProgress {
                progress: Progress::default(),
                first_run: true,
            };
        };
        let progress = match Progress::decode(&blob) {
            Ok(p) => p,
            Err(err) => {
                log::warn!("{}; starting from default progress", err);
                Progress::default()
            }
        };
        LoadedProgress {
            progress,
            first_run: false,
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore, key: &str) {
        store.set(key, &self.encode());
    }
}

/// One-shot delayed write, fire-and-forget.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeferredWrite {
    due_ms: Option<f64>,
}

impl DeferredWrite {
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64) {
        self.due_ms = Some(now_ms + delay_ms);
    }

    pub fn is_pending(&self) -> bool {
        self.due_ms.is_some()
    }

    /// True exactly once, on the first poll at or after the due time.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.due_ms {
            Some(due) if now_ms >= due => {
                self.due_ms = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::store::MemoryStore;

    const KEY: &str = "ghostwire.progress";

    #[test]
    fn absent_blob_is_first_run() {
        let store = MemoryStore::new();
        let loaded = Progress::load(&store, KEY);
        assert!(loaded.first_run);
        assert!(!loaded.progress.seen_intro);
    }

    #[test]
    fn encode_decode() {
        let p = Progress {
            seen_intro: true,
            ..Progress::default()
        };
        assert_eq!(p.encode(), r#"{"seenIntro":true,"version":1}"#);
        assert_eq!(Progress::decode(&p.encode()).unwrap(), p);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let store = MemoryStore::with(KEY, "{not json");
        let loaded = Progress::load(&store, KEY);
        assert!(!loaded.first_run);
        assert_eq!(loaded.progress, Progress::default());
        assert!(matches!(
            Progress::decode("42"),
            Err(EngineError::InvalidPersistedState(_))
        ));
    }

    #[test]
    fn legacy_counter_migrates() {
        assert!(Progress::decode(r#"{"progress":3}"#).unwrap().seen_intro);
        assert!(!Progress::decode(r#"{"progress":0}"#).unwrap().seen_intro);
        let old = Progress::decode(r#"{"seenIntro":true}"#).unwrap();
        assert_eq!(old.version, PROGRESS_VERSION);
    }

    #[test]
    fn deferred_write_fires_once() {
        let mut w = DeferredWrite::default();
        assert!(!w.poll(0.0));
        w.schedule(100.0, 2000.0);
        assert!(!w.poll(2099.0));
        assert!(w.poll(2100.0));
        assert!(!w.poll(5000.0));
    }
}
