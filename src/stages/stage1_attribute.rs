use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AttributionConfig;
use crate::heuristics::attribute_heuristically;
use crate::matching::match_speakers;
use crate::models::{AttributedSegment, SpeakerTurn, TranscriptSegment};

/// Which attribution strategy produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Turns inferred from segment shape alone
    Heuristic,
    /// Segments matched against diarization model turns
    Overlap,
}

/// Attribution strategy selected for one transcript
#[derive(Debug, Clone, Copy)]
pub enum AttributionStrategy<'a> {
    Heuristic,
    Overlap(&'a [SpeakerTurn]),
}

impl<'a> AttributionStrategy<'a> {
    /// Use diarization turns when the model produced any, otherwise fall back to heuristics
    pub fn select(turns: Option<&'a [SpeakerTurn]>) -> Self {
        match turns {
            Some(turns) if !turns.is_empty() => Self::Overlap(turns),
            _ => Self::Heuristic,
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Heuristic => StrategyKind::Heuristic,
            Self::Overlap(_) => StrategyKind::Overlap,
        }
    }
}

/// Execute Stage 1: attribute a speaker to every transcript segment
pub fn execute_stage1(
    segments: &[TranscriptSegment],
    strategy: AttributionStrategy<'_>,
    config: &AttributionConfig,
) -> Vec<AttributedSegment> {
    match strategy {
        AttributionStrategy::Heuristic => {
            info!("No diarization turns available, using heuristic attribution");
            attribute_heuristically(segments, &config.heuristics)
        }
        AttributionStrategy::Overlap(turns) => {
            info!(
                "Matching {} segments against {} diarization turns",
                segments.len(),
                turns.len()
            );
            match_speakers(segments, turns, &config.overlap)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_selection() {
        let turns = vec![SpeakerTurn::new("A", 0.0, 1.0)];

        assert_eq!(AttributionStrategy::select(None).kind(), StrategyKind::Heuristic);
        assert_eq!(
            AttributionStrategy::select(Some(&[][..])).kind(),
            StrategyKind::Heuristic
        );
        assert_eq!(
            AttributionStrategy::select(Some(turns.as_slice())).kind(),
            StrategyKind::Overlap
        );
    }

    #[test]
    fn test_overlap_strategy_uses_turn_labels() {
        let turns = vec![SpeakerTurn::new("alice", 0.0, 10.0)];
        let segments = vec![TranscriptSegment::new(1.0, 2.0, "hi")];

        let result = execute_stage1(
            &segments,
            AttributionStrategy::select(Some(turns.as_slice())),
            &AttributionConfig::default(),
        );

        assert_eq!(result[0].speaker, "alice");
    }

    #[test]
    fn test_heuristic_strategy_uses_generated_labels() {
        let segments = vec![TranscriptSegment::new(1.0, 2.0, "hi")];

        let result = execute_stage1(
            &segments,
            AttributionStrategy::Heuristic,
            &AttributionConfig::default(),
        );

        assert_eq!(result[0].speaker, "SPEAKER_00");
    }

    #[test]
    fn test_strategy_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&StrategyKind::Overlap).unwrap(),
            "\"overlap\""
        );
    }
}
