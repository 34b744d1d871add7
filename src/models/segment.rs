use serde::{Deserialize, Serialize};

/// A timestamped piece of recognized speech
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start timestamp in seconds
    #[serde(alias = "start_time")]
    pub start: f64,
    /// End timestamp in seconds
    #[serde(alias = "end_time")]
    pub end: f64,
    /// Recognized text
    #[serde(default)]
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Duration in seconds (may be zero or negative for malformed input)
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Midpoint in seconds
    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// A time interval attributed to one speaker by a diarization model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerTurn {
    /// Speaker label as reported by the model
    #[serde(alias = "speaker_id")]
    pub speaker: String,
    /// Start timestamp in seconds
    #[serde(alias = "start_time")]
    pub start: f64,
    /// End timestamp in seconds
    #[serde(alias = "end_time")]
    pub end: f64,
}

impl SpeakerTurn {
    pub fn new(speaker: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            speaker: speaker.into(),
            start,
            end,
        }
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// A transcript segment with a speaker assigned to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributedSegment {
    pub speaker: String,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl AttributedSegment {
    pub fn new(segment: &TranscriptSegment, speaker: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            start: segment.start,
            end: segment.end,
            text: segment.text.clone(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Number of whitespace-delimited words in a piece of text
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
