//! Retrieval configuration

use insightx_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Minimum top score for answering from retrieved context.
///
/// Chosen empirically for small general-purpose text embedding models
/// (0.25–0.35 works in practice). Other models may need a different value.
pub const DEFAULT_THRESHOLD: f32 = 0.30;

/// Fragments kept after ranking
pub const DEFAULT_TOP_K: usize = 8;

/// Fragments scanned per query. The ranker is a full scan over this working
/// set, not an index; beyond it, fragments are never considered.
pub const DEFAULT_WORKING_SET_CAP: usize = 1000;

/// Non-system chat messages carried into a prompt
pub const DEFAULT_HISTORY_WINDOW: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f32,

    #[serde(default = "default_top_k")]
    pub top_k: usize,

    #[serde(default = "default_working_set_cap")]
    pub working_set_cap: usize,

    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_working_set_cap() -> usize {
    DEFAULT_WORKING_SET_CAP
}

fn default_history_window() -> usize {
    DEFAULT_HISTORY_WINDOW
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            working_set_cap: DEFAULT_WORKING_SET_CAP,
            history_window: DEFAULT_HISTORY_WINDOW,
        }
    }
}

impl RetrievalConfig {
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_working_set_cap(mut self, cap: usize) -> Self {
        self.working_set_cap = cap;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(-1.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidConfig(format!(
                "threshold must be within [-1, 1], got {}",
                self.threshold
            )));
        }
        if self.top_k == 0 {
            return Err(Error::InvalidConfig("top_k must be positive".to_string()));
        }
        if self.working_set_cap == 0 {
            return Err(Error::InvalidConfig("working_set_cap must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = RetrievalConfig::default();
        assert_eq!(config.threshold, 0.30);
        assert_eq!(config.top_k, 8);
        assert_eq!(config.working_set_cap, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values() {
        assert!(RetrievalConfig::default().with_threshold(1.5).validate().is_err());
        assert!(RetrievalConfig::default().with_threshold(f32::NAN).validate().is_err());
        assert!(RetrievalConfig::default().with_top_k(0).validate().is_err());
        assert!(RetrievalConfig::default().with_working_set_cap(0).validate().is_err());
    }
}
