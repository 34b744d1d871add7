use std::ops::Range;

use tracing::debug;

use crate::models::AttributedSegment;

use super::HeuristicsConfig;

/// Result of the fragment grouping pass
#[derive(Debug, Clone)]
pub struct FragmentGrouping {
    /// The input sequence, unchanged in order, count and timestamps
    pub segments: Vec<AttributedSegment>,
    /// Index ranges of grouped fragments (covering every segment, in order)
    pub groups: Vec<Range<usize>>,
}

impl FragmentGrouping {
    /// Number of groups holding more than one fragment
    pub fn multi_fragment_groups(&self) -> usize {
        self.groups.iter().filter(|g| g.len() > 1).count()
    }
}

/// Group very short, closely spaced same-speaker fragments
///
/// A segment joins the current group when it shares the previous segment's
/// speaker, starts less than `fragment_max_gap` after it ends and is shorter
/// than `min_speaker_duration`. Group membership is reported in `groups`, but
/// the emitted segments are the input entries, one per original segment.
pub fn group_fragments(
    segments: Vec<AttributedSegment>,
    config: &HeuristicsConfig,
) -> FragmentGrouping {
    let mut groups = Vec::new();
    let mut group_start = 0usize;

    for i in 1..segments.len() {
        let prev = &segments[i - 1];
        let curr = &segments[i];

        let joins = curr.speaker == prev.speaker
            && curr.start - prev.end < config.fragment_max_gap
            && curr.duration() < config.min_speaker_duration;

        if !joins {
            groups.push(group_start..i);
            group_start = i;
        }
    }

    if !segments.is_empty() {
        groups.push(group_start..segments.len());
    }

    let grouping = FragmentGrouping { segments, groups };
    debug!(
        "Fragment grouping: {} groups, {} with multiple fragments",
        grouping.groups.len(),
        grouping.multi_fragment_groups()
    );

    grouping
}
