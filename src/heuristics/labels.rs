use std::collections::HashSet;

use crate::models::{AttributedSegment, TranscriptSegment};

/// Format a numeric speaker slot as `SPEAKER_NN`
pub fn speaker_label(slot: usize) -> String {
    format!("SPEAKER_{:02}", slot)
}

/// Assign a speaker label to every segment, advancing the label at each change point
///
/// Labels cycle through `SPEAKER_00..SPEAKER_{max_speakers-1}`. Once more than
/// `max_speakers` turns have been seen the counter wraps back to `SPEAKER_00`,
/// so a new speaker can be folded into an earlier speaker's label. This is a
/// known limitation of the heuristic path, not an attempt at identity tracking.
pub fn assign_speakers(
    segments: &[TranscriptSegment],
    change_points: &[usize],
    max_speakers: usize,
) -> Vec<AttributedSegment> {
    let change_points: HashSet<usize> = change_points.iter().copied().collect();
    let mut counter = 0usize;
    let mut current_label = speaker_label(counter);

    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            if change_points.contains(&i) {
                counter += 1;
                if counter >= max_speakers {
                    counter = 0;
                }
                current_label = speaker_label(counter);
            }
            AttributedSegment::new(segment, current_label.clone())
        })
        .collect()
}
