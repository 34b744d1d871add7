pub mod config;
pub mod heuristics;
pub mod io;
pub mod matching;
pub mod models;
pub mod stages;

pub use config::{AttributionConfig, ConfigError};
pub use heuristics::{attribute_heuristically, HeuristicsConfig};
pub use io::{
    parse_segments_file, parse_segments_json, parse_turns_file, parse_turns_json,
    HumanTranscript, MachineTranscript, TranscriptMetadata,
};
pub use matching::{match_speakers, OverlapConfig, UNKNOWN_SPEAKER};
pub use models::{
    AttributedSegment, MergedUtterance, SpeakerStatistics, SpeakerTurn, TranscriptSegment,
};
pub use stages::{
    attribute_transcript, execute_stage1, execute_stage2, execute_stage3, AttributionResult,
    AttributionStrategy, MergeConfig, Stage3Config, StrategyKind,
};
