pub mod stage1_attribute;
pub mod stage2_merge;
pub mod stage3_render;

pub use stage1_attribute::*;
pub use stage2_merge::*;
pub use stage3_render::*;

use std::collections::BTreeMap;

use tracing::info;

use crate::config::AttributionConfig;
use crate::models::{
    AttributedSegment, MergedUtterance, SpeakerStatistics, SpeakerTurn, TranscriptSegment,
};

/// Outcome of attributing and merging one transcript
#[derive(Debug, Clone)]
pub struct AttributionResult {
    pub strategy: StrategyKind,
    /// One entry per input segment, in input order
    pub attributed: Vec<AttributedSegment>,
    pub utterances: Vec<MergedUtterance>,
    pub statistics: BTreeMap<String, SpeakerStatistics>,
}

impl AttributionResult {
    /// Seconds from the first utterance's start to the last utterance's end
    pub fn total_duration(&self) -> f64 {
        match (self.utterances.first(), self.utterances.last()) {
            (Some(first), Some(last)) => (last.end - first.start).max(0.0),
            _ => 0.0,
        }
    }

    pub fn speaker_count(&self) -> usize {
        self.statistics.len()
    }
}

/// Attribute speakers to a transcript and fold the result into utterances
///
/// Diarization turns, when present and non-empty, are matched by overlap.
/// Otherwise speakers are inferred heuristically from segment shape.
pub fn attribute_transcript(
    segments: &[TranscriptSegment],
    turns: Option<&[SpeakerTurn]>,
    config: &AttributionConfig,
) -> AttributionResult {
    let strategy = AttributionStrategy::select(turns);
    let attributed = execute_stage1(segments, strategy, config);
    let Stage2Result {
        utterances,
        statistics,
    } = execute_stage2(&attributed, &config.merge);

    info!(
        "Attributed {} segments into {} utterances across {} speakers",
        attributed.len(),
        utterances.len(),
        statistics.len()
    );

    AttributionResult {
        strategy: strategy.kind(),
        attributed,
        utterances,
        statistics,
    }
}
