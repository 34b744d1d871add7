use serde::{Deserialize, Serialize};

/// One or more consecutive same-speaker segments folded into a readable block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedUtterance {
    pub speaker: String,
    /// Start of the first absorbed segment in seconds
    pub start: f64,
    /// End of the last absorbed segment in seconds
    pub end: f64,
    /// Space-joined text of all absorbed segments
    pub text: String,
}

impl MergedUtterance {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Aggregate talk statistics for one speaker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerStatistics {
    pub speaker: String,
    /// Total speaking time in seconds
    pub total_time: f64,
    /// Number of merged utterances attributed to this speaker
    pub segment_count: usize,
    pub word_count: usize,
    pub average_words_per_segment: f64,
}

impl SpeakerStatistics {
    pub fn new(speaker: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            total_time: 0.0,
            segment_count: 0,
            word_count: 0,
            average_words_per_segment: 0.0,
        }
    }

    /// Total speaking time in minutes
    pub fn total_minutes(&self) -> f64 {
        self.total_time / 60.0
    }
}
