use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{word_count, AttributedSegment, MergedUtterance, SpeakerStatistics};

/// Configuration for Stage 2 utterance merging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Same-speaker segments closer than this (seconds) are merged
    pub max_gap: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self { max_gap: 1.0 }
    }
}

/// Result of Stage 2 merging
#[derive(Debug, Clone)]
pub struct Stage2Result {
    pub utterances: Vec<MergedUtterance>,
    /// Per-speaker aggregates keyed by speaker label
    pub statistics: BTreeMap<String, SpeakerStatistics>,
}

/// Execute Stage 2: fold attributed segments into utterances and aggregate statistics
pub fn execute_stage2(segments: &[AttributedSegment], config: &MergeConfig) -> Stage2Result {
    let utterances = merge_utterances(segments, config);
    debug!(
        "Merged {} segments into {} utterances",
        segments.len(),
        utterances.len()
    );
    let statistics = compute_statistics(&utterances);

    Stage2Result {
        utterances,
        statistics,
    }
}

/// Merge consecutive same-speaker segments separated by less than `max_gap`
pub fn merge_utterances(
    segments: &[AttributedSegment],
    config: &MergeConfig,
) -> Vec<MergedUtterance> {
    let Some((first, rest)) = segments.split_first() else {
        return vec![];
    };

    let mut merged = Vec::new();
    let mut current = start_utterance(first);

    for segment in rest {
        if segment.speaker == current.speaker && segment.start - current.end < config.max_gap {
            current.end = segment.end;
            current.text.push(' ');
            current.text.push_str(&segment.text);
        } else {
            merged.push(std::mem::replace(&mut current, start_utterance(segment)));
        }
    }

    merged.push(current);
    merged
}

fn start_utterance(segment: &AttributedSegment) -> MergedUtterance {
    MergedUtterance {
        speaker: segment.speaker.clone(),
        start: segment.start,
        end: segment.end,
        text: segment.text.clone(),
    }
}

/// Accumulate talk time, utterance and word counts per speaker
pub fn compute_statistics(utterances: &[MergedUtterance]) -> BTreeMap<String, SpeakerStatistics> {
    let mut statistics: BTreeMap<String, SpeakerStatistics> = BTreeMap::new();

    for utterance in utterances {
        let stats = statistics
            .entry(utterance.speaker.clone())
            .or_insert_with(|| SpeakerStatistics::new(utterance.speaker.clone()));
        stats.total_time += utterance.duration();
        stats.segment_count += 1;
        stats.word_count += word_count(&utterance.text);
    }

    for stats in statistics.values_mut() {
        stats.average_words_per_segment = if stats.segment_count > 0 {
            stats.word_count as f64 / stats.segment_count as f64
        } else {
            0.0
        };
    }

    statistics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(speaker: &str, start: f64, end: f64, text: &str) -> AttributedSegment {
        AttributedSegment {
            speaker: speaker.to_string(),
            start,
            end,
            text: text.to_string(),
        }
    }

    fn utterance(speaker: &str, start: f64, end: f64, text: &str) -> MergedUtterance {
        MergedUtterance {
            speaker: speaker.to_string(),
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_merge_close_same_speaker() {
        let segments = vec![seg("A", 0.0, 2.0, "hello"), seg("A", 2.5, 4.0, "world")];

        let merged = merge_utterances(&segments, &MergeConfig::default());

        assert_eq!(merged, vec![utterance("A", 0.0, 4.0, "hello world")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_utterances(&[], &MergeConfig::default()).is_empty());
        assert!(compute_statistics(&[]).is_empty());
    }

    #[test]
    fn test_speaker_change_and_long_gap_split() {
        let segments = vec![
            seg("A", 0.0, 1.0, "one"),
            seg("B", 1.2, 2.0, "two"),
            seg("B", 3.5, 4.0, "three"),
            seg("A", 4.1, 5.0, "four"),
        ];

        let merged = merge_utterances(&segments, &MergeConfig::default());

        assert_eq!(merged.len(), 4);
        assert_eq!(merged[2].text, "three");
    }

    #[test]
    fn test_gap_measured_from_group_end() {
        let segments = vec![
            seg("A", 0.0, 1.0, "a"),
            seg("A", 1.8, 3.0, "b"),
            seg("A", 3.9, 4.5, "c"),
        ];

        let merged = merge_utterances(&segments, &MergeConfig::default());

        assert_eq!(merged, vec![utterance("A", 0.0, 4.5, "a b c")]);
    }

    #[test]
    fn test_coverage_is_preserved() {
        let segments = vec![
            seg("A", 0.0, 1.0, "a"),
            seg("B", 1.0, 2.5, "b"),
            seg("B", 2.7, 3.0, "c"),
            seg("A", 6.0, 7.0, "d"),
        ];

        let merged = merge_utterances(&segments, &MergeConfig::default());

        assert_eq!(merged.first().unwrap().start, 0.0);
        assert_eq!(merged.last().unwrap().end, 7.0);
        let words: usize = merged.iter().map(|u| word_count(&u.text)).sum();
        assert_eq!(words, segments.len());
    }

    #[test]
    fn test_statistics_single_utterance() {
        let stats = compute_statistics(&[utterance("A", 0.0, 4.0, "hello world")]);
        let a = &stats["A"];

        assert_eq!(a.speaker, "A");
        assert_eq!(a.total_time, 4.0);
        assert_eq!(a.segment_count, 1);
        assert_eq!(a.word_count, 2);
        assert_eq!(a.average_words_per_segment, 2.0);
    }

    #[test]
    fn test_statistics_accumulate_per_speaker() {
        let result = execute_stage2(
            &[
                seg("A", 0.0, 2.0, "one two three"),
                seg("B", 2.5, 3.0, "yes"),
                seg("A", 5.0, 6.0, "four"),
            ],
            &MergeConfig::default(),
        );

        assert_eq!(result.utterances.len(), 3);
        assert_eq!(result.statistics.len(), 2);

        let a = &result.statistics["A"];
        assert_eq!(a.total_time, 3.0);
        assert_eq!(a.segment_count, 2);
        assert_eq!(a.word_count, 4);
        assert_eq!(a.average_words_per_segment, 2.0);
        assert_eq!(result.statistics["B"].word_count, 1);
    }
}
