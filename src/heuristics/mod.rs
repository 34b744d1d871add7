pub mod change_points;
pub mod characteristics;
pub mod fragments;
pub mod labels;

pub use change_points::*;
pub use characteristics::*;
pub use fragments::*;
pub use labels::*;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{AttributedSegment, TranscriptSegment};

/// Configuration for heuristic speaker attribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicsConfig {
    /// Number of distinct labels before the label counter wraps to SPEAKER_00
    pub max_speakers: usize,
    /// Pause between segments (seconds) that always starts a new turn
    pub pause_threshold: f64,
    /// Pairwise similarity below which a new turn starts
    pub similarity_threshold: f64,
    /// Segments shorter than this (seconds) are considered short
    pub short_segment_duration: f64,
    /// Segments longer than this (seconds) are considered long
    pub long_segment_duration: f64,
    /// Maximum gap (seconds) for a fragment to join the current group
    pub fragment_max_gap: f64,
    /// Fragments at least this long (seconds) always start a new group
    pub min_speaker_duration: f64,
    /// Lowercase phrases that open a turn when a segment starts with them
    pub greetings: Vec<String>,
    /// Lowercase phrases that close a turn when a segment ends with them
    pub goodbyes: Vec<String>,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            max_speakers: 4,
            pause_threshold: 1.2,
            similarity_threshold: 0.7,
            short_segment_duration: 1.0,
            long_segment_duration: 5.0,
            fragment_max_gap: 0.5,
            min_speaker_duration: 1.5,
            greetings: vec![
                "dzień dobry".to_string(),
                "dobry".to_string(),
                "cześć".to_string(),
                "witam".to_string(),
                "hej".to_string(),
                "hello".to_string(),
                "hi".to_string(),
                "good morning".to_string(),
                "good afternoon".to_string(),
                "good evening".to_string(),
            ],
            goodbyes: vec![
                "do widzenia".to_string(),
                "pa".to_string(),
                "cześć".to_string(),
                "nara".to_string(),
                "goodbye".to_string(),
                "bye".to_string(),
                "see you".to_string(),
                "dziękuję".to_string(),
                "dzięki".to_string(),
                "thank you".to_string(),
                "thanks".to_string(),
            ],
        }
    }
}

/// Attribute speakers using only the shape of the transcript segments
///
/// Used when no diarization model output is available:
/// 1. Derive per-segment characteristics
/// 2. Detect likely speaker change points
/// 3. Assign round-robin speaker labels at each change point
/// 4. Group short same-speaker fragments (order and count preserving)
pub fn attribute_heuristically(
    segments: &[TranscriptSegment],
    config: &HeuristicsConfig,
) -> Vec<AttributedSegment> {
    if segments.is_empty() {
        return vec![];
    }

    info!(
        "Heuristic speaker attribution for {} segments",
        segments.len()
    );

    let characteristics = analyze_segments(segments, config);
    let change_points = detect_change_points(&characteristics, config);
    info!("Detected {} speaker change points", change_points.len());

    let labeled = assign_speakers(segments, &change_points, config.max_speakers);
    let grouping = group_fragments(labeled, config);

    log_speaker_summary(&grouping.segments);

    grouping.segments
}

/// Log the number of speakers and each speaker's talk time
fn log_speaker_summary(segments: &[AttributedSegment]) {
    let mut talk_time: BTreeMap<&str, f64> = BTreeMap::new();
    for segment in segments {
        *talk_time.entry(segment.speaker.as_str()).or_insert(0.0) += segment.duration();
    }

    info!("Heuristic attribution found {} speakers", talk_time.len());
    for (speaker, total) in &talk_time {
        info!("  {}: {:.1}s ({:.1}min)", speaker, total, total / 60.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let result = attribute_heuristically(&[], &HeuristicsConfig::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_pause_starts_new_speaker() {
        let segments = vec![
            TranscriptSegment::new(0.0, 2.0, "hi"),
            TranscriptSegment::new(5.0, 7.0, "ok"),
        ];

        let result = attribute_heuristically(&segments, &HeuristicsConfig::default());

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].speaker, "SPEAKER_00");
        assert_eq!(result[1].speaker, "SPEAKER_01");
        assert_eq!(result[1].text, "ok");
    }

    #[test]
    fn test_similar_segments_keep_speaker() {
        let segments = vec![
            TranscriptSegment::new(0.0, 2.0, "one two three four"),
            TranscriptSegment::new(2.2, 4.2, "five six seven eight"),
            TranscriptSegment::new(4.4, 6.4, "nine ten eleven twelve"),
        ];

        let result = attribute_heuristically(&segments, &HeuristicsConfig::default());

        assert!(result.iter().all(|s| s.speaker == "SPEAKER_00"));
    }

    #[test]
    fn test_labels_stay_within_max_speakers() {
        let config = HeuristicsConfig {
            max_speakers: 3,
            ..Default::default()
        };
        // Every segment follows a long pause, so every index is a change point
        let segments: Vec<TranscriptSegment> = (0..10)
            .map(|i| {
                let start = i as f64 * 5.0;
                TranscriptSegment::new(start, start + 2.0, "some words here")
            })
            .collect();

        let result = attribute_heuristically(&segments, &config);
        let allowed = ["SPEAKER_00", "SPEAKER_01", "SPEAKER_02"];

        assert_eq!(result.len(), 10);
        assert!(result.iter().all(|s| allowed.contains(&s.speaker.as_str())));
    }

    #[test]
    fn test_default_config_values() {
        let config = HeuristicsConfig::default();
        assert_eq!(config.max_speakers, 4);
        assert_eq!(config.pause_threshold, 1.2);
        assert_eq!(config.similarity_threshold, 0.7);
        assert!(config.greetings.contains(&"dzień dobry".to_string()));
        assert!(config.goodbyes.contains(&"thank you".to_string()));
    }
}
