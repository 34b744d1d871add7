use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::{SpeakerTurn, TranscriptSegment};

/// Transcription output: either a bare segment list or an envelope with `segments`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SegmentsDocument {
    List(Vec<TranscriptSegment>),
    Envelope { segments: Vec<TranscriptSegment> },
}

/// Diarization output: either a bare turn list or an envelope with `speakers`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TurnsDocument {
    List(Vec<SpeakerTurn>),
    Envelope { speakers: Vec<SpeakerTurn> },
}

/// Parse a transcript segments JSON file
pub fn parse_segments_file(path: &Path) -> Result<Vec<TranscriptSegment>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_segments_json(&content)
}

/// Parse transcript segments JSON, trimming segment text
pub fn parse_segments_json(json: &str) -> Result<Vec<TranscriptSegment>> {
    let document: SegmentsDocument =
        serde_json::from_str(json).context("Failed to parse transcript segments JSON")?;
    let segments = match document {
        SegmentsDocument::List(segments) | SegmentsDocument::Envelope { segments } => segments,
    };

    Ok(segments
        .into_iter()
        .map(|mut segment| {
            segment.text = segment.text.trim().to_string();
            segment
        })
        .collect())
}

/// Parse a speaker turns JSON file
pub fn parse_turns_file(path: &Path) -> Result<Vec<SpeakerTurn>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_turns_json(&content)
}

pub fn parse_turns_json(json: &str) -> Result<Vec<SpeakerTurn>> {
    let document: TurnsDocument =
        serde_json::from_str(json).context("Failed to parse speaker turns JSON")?;
    Ok(match document {
        TurnsDocument::List(turns) | TurnsDocument::Envelope { speakers: turns } => turns,
    })
}
