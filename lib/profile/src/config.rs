//! Profiler configuration
//!
//! The sampling cap, the categorical length cut-off and the target hint list
//! are heuristics. They are exposed here with their documented defaults
//! rather than hard-coded in the inference functions.

use insightx_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Non-missing values examined per column during type inference
pub const DEFAULT_SAMPLE_CAP: usize = 500;

/// Longest value (in characters) still counted as categorical
pub const DEFAULT_CATEGORICAL_MAX_LEN: usize = 30;

/// Header names treated as the target column, in priority order
pub const DEFAULT_TARGET_HINTS: [&str; 5] = ["target", "label", "y", "objetivo", "clase"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfilerConfig {
    #[serde(default = "default_sample_cap")]
    pub sample_cap: usize,

    #[serde(default = "default_categorical_max_len")]
    pub categorical_max_len: usize,

    /// Matched case-insensitively against header names; earlier hints win
    #[serde(default = "default_target_hints")]
    pub target_hints: Vec<String>,
}

fn default_sample_cap() -> usize {
    DEFAULT_SAMPLE_CAP
}

fn default_categorical_max_len() -> usize {
    DEFAULT_CATEGORICAL_MAX_LEN
}

fn default_target_hints() -> Vec<String> {
    DEFAULT_TARGET_HINTS.iter().map(|h| h.to_string()).collect()
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            sample_cap: DEFAULT_SAMPLE_CAP,
            categorical_max_len: DEFAULT_CATEGORICAL_MAX_LEN,
            target_hints: default_target_hints(),
        }
    }
}

impl ProfilerConfig {
    pub fn with_sample_cap(mut self, sample_cap: usize) -> Self {
        self.sample_cap = sample_cap;
        self
    }

    pub fn with_target_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_hints = hints.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_cap == 0 {
            return Err(Error::InvalidConfig("sample_cap must be positive".to_string()));
        }
        Ok(())
    }
}
