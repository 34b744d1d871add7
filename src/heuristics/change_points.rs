use super::{HeuristicsConfig, SegmentCharacteristics};

/// Floor for continuous-valued similarity denominators
const SIMILARITY_EPSILON: f64 = 0.1;

/// Relative similarity of two non-negative values in `[0, 1]` (can go negative for malformed input)
fn relative_similarity(a: f64, b: f64, floor: f64) -> f64 {
    1.0 - (a - b).abs() / a.max(b).max(floor)
}

/// Unweighted mean of duration, speaking-rate and word-count similarity
pub fn segment_similarity(prev: &SegmentCharacteristics, curr: &SegmentCharacteristics) -> f64 {
    let duration = relative_similarity(prev.duration, curr.duration, SIMILARITY_EPSILON);
    let rate = relative_similarity(
        prev.words_per_second,
        curr.words_per_second,
        SIMILARITY_EPSILON,
    );
    let length = relative_similarity(prev.word_count as f64, curr.word_count as f64, 1.0);

    (duration + rate + length) / 3.0
}

/// Decide whether `curr` likely starts a new speaker turn
pub fn is_speaker_change(
    prev: &SegmentCharacteristics,
    curr: &SegmentCharacteristics,
    similarity: f64,
    config: &HeuristicsConfig,
) -> bool {
    let pause = curr.start - prev.end;

    pause > config.pause_threshold
        || similarity < config.similarity_threshold
        || prev.is_short != curr.is_short
        || prev.has_question != curr.has_question
        || curr.starts_with_greeting
        || prev.ends_with_goodbye
}

/// Indices (always `>= 1`) at which a new speaker turn begins
pub fn detect_change_points(
    characteristics: &[SegmentCharacteristics],
    config: &HeuristicsConfig,
) -> Vec<usize> {
    characteristics
        .windows(2)
        .filter_map(|pair| {
            let (prev, curr) = (&pair[0], &pair[1]);
            let similarity = segment_similarity(prev, curr);
            is_speaker_change(prev, curr, similarity, config).then_some(curr.index)
        })
        .collect()
}
