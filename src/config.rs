use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::heuristics::HeuristicsConfig;
use crate::matching::OverlapConfig;
use crate::stages::MergeConfig;

/// Configuration rejected before it reaches the attribution engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("max_speakers must be at least 1")]
    NoSpeakers,

    #[error("{name} must be a finite, non-negative number of seconds (got {value})")]
    InvalidDuration { name: &'static str, value: f64 },

    #[error("{name} must be between 0 and 1 (got {value})")]
    RatioOutOfRange { name: &'static str, value: f64 },

    #[error("short_segment_duration ({short}s) must not exceed long_segment_duration ({long}s)")]
    InvertedDurationBounds { short: f64, long: f64 },
}

/// Tunables for one attribution run, split per component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributionConfig {
    pub heuristics: HeuristicsConfig,
    pub overlap: OverlapConfig,
    pub merge: MergeConfig,
}

impl AttributionConfig {
    /// Load a JSON config file; missing fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse config JSON")?;
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    /// Check every tunable is in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let h = &self.heuristics;

        if h.max_speakers == 0 {
            return Err(ConfigError::NoSpeakers);
        }

        let durations = [
            ("pause_threshold", h.pause_threshold),
            ("short_segment_duration", h.short_segment_duration),
            ("long_segment_duration", h.long_segment_duration),
            ("fragment_max_gap", h.fragment_max_gap),
            ("min_speaker_duration", h.min_speaker_duration),
            ("max_gap", self.merge.max_gap),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDuration { name, value });
            }
        }

        let ratios = [
            ("similarity_threshold", h.similarity_threshold),
            ("min_overlap_ratio", self.overlap.min_overlap_ratio),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RatioOutOfRange { name, value });
            }
        }

        if h.short_segment_duration > h.long_segment_duration {
            return Err(ConfigError::InvertedDurationBounds {
                short: h.short_segment_duration,
                long: h.long_segment_duration,
            });
        }

        Ok(())
    }
}
