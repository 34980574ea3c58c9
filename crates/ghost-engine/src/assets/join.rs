//! Fan-in join over asynchronously loading assets.
//!
//! The host starts every load, then reports each completion by index. The
//! join resolves exactly once: `Ready` when all assets loaded, `Failed` on the
//! first failure or when the timeout passes with loads still pending.

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    Pending,
    Loaded,
    Failed,
}

/// Outcome of polling the join.
#[derive(Debug)]
pub enum JoinState {
    Waiting { loaded: usize, total: usize },
    Ready,
    Failed(EngineError),
}

#[derive(Debug, Clone)]
pub struct AssetJoin {
    names: Vec<String>,
    status: Vec<AssetStatus>,
    timeout_ms: f64,
    started_ms: Option<f64>,
}

impl AssetJoin {
    pub fn new(names: Vec<String>, timeout_ms: f64) -> Self {
        let status = vec![AssetStatus::Pending; names.len()];
        Self {
            names,
            status,
            timeout_ms,
            started_ms: None,
        }
    }

    pub fn total(&self) -> usize {
        self.names.len()
    }

    pub fn loaded(&self) -> usize {
        self.status.iter().filter(|s| **s == AssetStatus::Loaded).count()
    }

    pub fn status(&self, index: usize) -> Option<AssetStatus> {
        self.status.get(index).copied()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn mark_loaded(&mut self, index: usize) {
        self.set(index, AssetStatus::Loaded);
    }

    pub fn mark_failed(&mut self, index: usize) {
        self.set(index, AssetStatus::Failed);
    }

    fn set(&mut self, index: usize, status: AssetStatus) {
        match self.status.get_mut(index) {
            Some(slot) if *slot == AssetStatus::Pending => *slot = status,
            Some(_) => log::debug!("asset {} reported twice, keeping first result", index),
            None => log::warn!("asset index {} out of range ({} assets)", index, self.names.len()),
        }
    }

    /// Check progress at `now_ms`. The first poll starts the timeout.
    pub fn poll(&mut self, now_ms: f64) -> JoinState {
        let started = *self.started_ms.get_or_insert(now_ms);

        if let Some(idx) = self.status.iter().position(|s| *s == AssetStatus::Failed) {
            return JoinState::Failed(EngineError::AssetLoadFailure {
                name: self.names[idx].clone(),
            });
        }

        let loaded = self.loaded();
        let total = self.total();
        if loaded == total {
            return JoinState::Ready;
        }

        if now_ms - started >= self.timeout_ms {
            return JoinState::Failed(EngineError::AssetTimeout {
                pending: total - loaded,
            });
        }

        JoinState::Waiting { loaded, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn join() -> AssetJoin {
        AssetJoin::new(vec!["a.png".into(), "b.png".into(), "c.png".into()], 1000.0)
    }

    #[test]
    fn ready_only_after_every_asset() {
        let mut j = join();
        j.mark_loaded(0);
        j.mark_loaded(2);
        assert!(matches!(j.poll(0.0), JoinState::Waiting { loaded: 2, total: 3 }));
        j.mark_loaded(1);
        assert!(matches!(j.poll(10.0), JoinState::Ready));
    }

    #[test]
    fn failure_names_the_asset() {
        let mut j = join();
        j.mark_loaded(0);
        j.mark_failed(1);
        match j.poll(0.0) {
            JoinState::Failed(EngineError::AssetLoadFailure { name }) => assert_eq!(name, "b.png"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn timeout_guards_a_stuck_join() {
        let mut j = join();
        j.mark_loaded(0);
        assert!(matches!(j.poll(100.0), JoinState::Waiting { .. }));
        assert!(matches!(j.poll(600.0), JoinState::Waiting { .. }));
        match j.poll(1100.0) {
            JoinState::Failed(EngineError::AssetTimeout { pending }) => assert_eq!(pending, 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn empty_join_is_ready() {
        let mut j = AssetJoin::new(Vec::new(), 10.0);
        assert!(matches!(j.poll(0.0), JoinState::Ready));
    }

    #[test]
    fn first_report_wins() {
        let mut j = join();
        j.mark_loaded(1);
        j.mark_failed(1);
        assert_eq!(j.status(1), Some(AssetStatus::Loaded));
        j.mark_loaded(9);
    }
}
