use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{AttributedSegment, SpeakerTurn, TranscriptSegment};

/// Label assigned when no speaker turns are available
pub const UNKNOWN_SPEAKER: &str = "Unknown";

/// Configuration for overlap-based speaker matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlapConfig {
    /// Best overlap ratio below which the nearest-midpoint turn is used instead
    pub min_overlap_ratio: f64,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            min_overlap_ratio: 0.5,
        }
    }
}

/// Fraction of the segment's duration covered by the turn
///
/// Normalized by the segment, not the turn. Zero-length segments and
/// non-overlapping pairs yield 0.
pub fn overlap_ratio(segment: &TranscriptSegment, turn: &SpeakerTurn) -> f64 {
    let overlap = (segment.end.min(turn.end) - segment.start.max(turn.start)).max(0.0);
    let duration = segment.duration();

    if overlap > 0.0 && duration > 0.0 {
        overlap / duration
    } else {
        0.0
    }
}

/// Turn whose midpoint is nearest to the segment's midpoint (first wins on ties)
pub fn find_closest_speaker<'a>(
    segment: &TranscriptSegment,
    turns: &'a [SpeakerTurn],
) -> Option<&'a SpeakerTurn> {
    let center = segment.midpoint();
    let mut closest: Option<(&SpeakerTurn, f64)> = None;

    for turn in turns {
        let distance = (center - turn.midpoint()).abs();
        if closest.is_none_or(|(_, best)| distance < best) {
            closest = Some((turn, distance));
        }
    }

    closest.map(|(turn, _)| turn)
}

/// Pick the speaker for one transcript segment
pub fn find_speaker_for_segment(
    segment: &TranscriptSegment,
    turns: &[SpeakerTurn],
    config: &OverlapConfig,
) -> String {
    let mut best: Option<&SpeakerTurn> = None;
    let mut best_ratio = 0.0;

    for turn in turns {
        let ratio = overlap_ratio(segment, turn);
        if ratio > best_ratio {
            best_ratio = ratio;
            best = Some(turn);
        }
    }

    if best_ratio < config.min_overlap_ratio {
        debug!(
            "Segment {:.2}-{:.2}s overlaps {:.0}%, falling back to nearest turn",
            segment.start,
            segment.end,
            best_ratio * 100.0
        );
        best = find_closest_speaker(segment, turns);
    }

    best.map(|turn| turn.speaker.clone())
        .unwrap_or_else(|| UNKNOWN_SPEAKER.to_string())
}

/// Attribute every transcript segment to a diarization speaker turn
pub fn match_speakers(
    segments: &[TranscriptSegment],
    turns: &[SpeakerTurn],
    config: &OverlapConfig,
) -> Vec<AttributedSegment> {
    segments
        .iter()
        .map(|segment| {
            AttributedSegment::new(segment, find_speaker_for_segment(segment, turns, config))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speaker_for(segment: TranscriptSegment, turns: &[SpeakerTurn]) -> String {
        find_speaker_for_segment(&segment, turns, &OverlapConfig::default())
    }

    #[test]
    fn test_full_containment() {
        let turns = vec![SpeakerTurn::new("A", 0.0, 10.0)];
        let segment = TranscriptSegment::new(0.0, 10.0, "text");

        assert_eq!(overlap_ratio(&segment, &turns[0]), 1.0);
        assert_eq!(speaker_for(segment, &turns), "A");
    }

    #[test]
    fn test_contained_in_one_of_many() {
        let turns = vec![
            SpeakerTurn::new("A", 0.0, 4.0),
            SpeakerTurn::new("B", 4.0, 9.0),
            SpeakerTurn::new("C", 9.0, 12.0),
        ];
        assert_eq!(speaker_for(TranscriptSegment::new(5.0, 8.0, "x"), &turns), "B");
    }

    #[test]
    fn test_majority_overlap_wins() {
        let turns = vec![
            SpeakerTurn::new("A", 0.0, 3.0),
            SpeakerTurn::new("B", 3.0, 10.0),
        ];
        // 1s with A, 3s with B
        assert_eq!(speaker_for(TranscriptSegment::new(2.0, 6.0, "x"), &turns), "B");
    }

    #[test]
    fn test_equidistant_fallback_keeps_first() {
        let turns = vec![
            SpeakerTurn::new("A", 0.0, 3.0),
            SpeakerTurn::new("B", 7.0, 10.0),
        ];
        assert_eq!(speaker_for(TranscriptSegment::new(4.0, 6.0, "text"), &turns), "A");
    }

    #[test]
    fn test_low_overlap_uses_nearest_midpoint() {
        let turns = vec![
            SpeakerTurn::new("A", 0.0, 4.2),
            SpeakerTurn::new("B", 5.2, 6.0),
        ];
        // A covers 10% and B 40% of the segment; B's midpoint (5.6) is nearest to 5.0
        assert_eq!(speaker_for(TranscriptSegment::new(4.0, 6.0, "x"), &turns), "B");
    }

    #[test]
    fn test_no_turns_is_unknown() {
        assert_eq!(speaker_for(TranscriptSegment::new(0.0, 1.0, "x"), &[]), UNKNOWN_SPEAKER);
    }

    #[test]
    fn test_degenerate_durations() {
        let turns = vec![
            SpeakerTurn::new("A", 2.0, 2.0),
            SpeakerTurn::new("B", 8.0, 9.0),
        ];
        let zero_length = TranscriptSegment::new(3.0, 3.0, "");

        assert_eq!(overlap_ratio(&zero_length, &turns[1]), 0.0);
        assert_eq!(speaker_for(zero_length, &turns), "A");
    }

    #[test]
    fn test_match_speakers_preserves_segments() {
        let turns = vec![
            SpeakerTurn::new("SPEAKER_00", 0.0, 5.0),
            SpeakerTurn::new("SPEAKER_01", 5.0, 10.0),
        ];
        let segments = vec![
            TranscriptSegment::new(0.5, 4.5, "first"),
            TranscriptSegment::new(5.5, 9.5, "second"),
        ];

        let result = match_speakers(&segments, &turns, &OverlapConfig::default());

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].speaker, "SPEAKER_00");
        assert_eq!(result[1].speaker, "SPEAKER_01");
        assert_eq!(result[1].text, "second");
        assert_eq!(result[1].start, 5.5);
    }
}
