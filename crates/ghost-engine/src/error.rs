use thiserror::Error;

/// Everything the engine can report instead of silently recovering.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("asset `{name}` failed to load")]
    AssetLoadFailure { name: String },
    #[error("asset loading timed out with {pending} asset(s) still pending")]
    AssetTimeout { pending: usize },
    #[error("stored progress could not be parsed: {0}")]
    InvalidPersistedState(#[source] serde_json::Error),
    #[error("no scene registered at index {index} ({count} registered)")]
    InvalidSceneIndex { index: usize, count: usize },
    #[error("asset manifest is malformed: {0}")]
    Manifest(#[source] serde_json::Error),
    #[error("config override is malformed: {0}")]
    Config(#[source] serde_json::Error),
}
