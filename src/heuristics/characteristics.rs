use crate::models::{word_count, TranscriptSegment};

use super::HeuristicsConfig;

/// Lexical and timing features of one transcript segment
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentCharacteristics {
    /// Position in the source segment sequence
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    /// Trimmed segment text
    pub text: String,
    pub word_count: usize,
    /// Speaking rate; zero when the segment has no positive duration
    pub words_per_second: f64,
    pub has_question: bool,
    pub has_exclamation: bool,
    pub is_short: bool,
    pub is_long: bool,
    pub starts_with_greeting: bool,
    pub ends_with_goodbye: bool,
}

/// Derive characteristics for every segment, preserving order
pub fn analyze_segments(
    segments: &[TranscriptSegment],
    config: &HeuristicsConfig,
) -> Vec<SegmentCharacteristics> {
    segments
        .iter()
        .enumerate()
        .map(|(index, segment)| analyze_segment(index, segment, config))
        .collect()
}

fn analyze_segment(
    index: usize,
    segment: &TranscriptSegment,
    config: &HeuristicsConfig,
) -> SegmentCharacteristics {
    let text = segment.text.trim();
    let duration = segment.duration();
    let words = word_count(text);
    let words_per_second = if duration > 0.0 {
        words as f64 / duration
    } else {
        0.0
    };

    SegmentCharacteristics {
        index,
        start: segment.start,
        end: segment.end,
        duration,
        text: text.to_string(),
        word_count: words,
        words_per_second,
        has_question: text.contains('?'),
        has_exclamation: text.contains('!'),
        is_short: duration < config.short_segment_duration,
        is_long: duration > config.long_segment_duration,
        starts_with_greeting: starts_with_any(text, &config.greetings),
        ends_with_goodbye: ends_with_any(text, &config.goodbyes),
    }
}

/// Case-insensitive prefix match against a phrase list
pub fn starts_with_any(text: &str, phrases: &[String]) -> bool {
    let lower = text.trim().to_lowercase();
    phrases
        .iter()
        .any(|p| lower.starts_with(p.to_lowercase().as_str()))
}

/// Case-insensitive suffix match against a phrase list
pub fn ends_with_any(text: &str, phrases: &[String]) -> bool {
    let lower = text.trim().to_lowercase();
    phrases
        .iter()
        .any(|p| lower.ends_with(p.to_lowercase().as_str()))
}
