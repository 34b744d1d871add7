use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::{MergedUtterance, SpeakerStatistics};
use crate::stages::{AttributionResult, StrategyKind};

const RULE_WIDTH: usize = 60;

/// Machine-readable output format
#[derive(Debug, Clone, Serialize)]
pub struct MachineTranscript {
    /// Speaker-labelled utterances in order
    pub utterances: Vec<MergedUtterance>,
    /// Per-speaker aggregates keyed by speaker label
    pub statistics: BTreeMap<String, SpeakerStatistics>,
    /// Metadata about the processing
    pub metadata: TranscriptMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptMetadata {
    pub strategy: StrategyKind,
    pub total_segments: usize,
    pub total_utterances: usize,
    pub total_speakers: usize,
    pub duration_seconds: f64,
}

impl MachineTranscript {
    pub fn from_result(result: &AttributionResult) -> Self {
        Self {
            utterances: result.utterances.clone(),
            statistics: result.statistics.clone(),
            metadata: TranscriptMetadata {
                strategy: result.strategy,
                total_segments: result.attributed.len(),
                total_utterances: result.utterances.len(),
                total_speakers: result.speaker_count(),
                duration_seconds: result.total_duration(),
            },
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

/// Human-readable transcript format
pub struct HumanTranscript<'a> {
    title: &'a str,
    result: &'a AttributionResult,
}

impl<'a> HumanTranscript<'a> {
    pub fn new(title: &'a str, result: &'a AttributionResult) -> Self {
        Self { title, result }
    }

    /// Format the transcript followed by the speaker statistics section
    pub fn format(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut output = String::new();

        let _ = writeln!(output, "Transcript: {}", self.title);
        let _ = writeln!(output, "{}\n", rule);

        for utterance in &self.result.utterances {
            let _ = writeln!(
                output,
                "[{}-{}] {}: {}",
                format_timestamp(utterance.start),
                format_timestamp(utterance.end),
                utterance.speaker,
                utterance.text
            );
        }

        let _ = writeln!(output, "\n{}", rule);
        let _ = writeln!(output, "SPEAKER STATISTICS:");
        let _ = writeln!(output, "{}", rule);

        for stats in self.result.statistics.values() {
            let _ = writeln!(output, "{}:", stats.speaker);
            let _ = writeln!(
                output,
                "  - Talk time: {:.1}s ({:.1}min)",
                stats.total_time,
                stats.total_minutes()
            );
            let _ = writeln!(output, "  - Utterances: {}", stats.segment_count);
            let _ = writeln!(output, "  - Words: {}", stats.word_count);
            let _ = writeln!(
                output,
                "  - Average words/utterance: {:.1}",
                stats.average_words_per_segment
            );
            output.push('\n');
        }

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

/// Format seconds as MM:SS (whole seconds, truncated)
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
