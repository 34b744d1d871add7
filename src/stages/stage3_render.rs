use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::io::{HumanTranscript, MachineTranscript};

use super::AttributionResult;

/// Configuration for Stage 3 rendering
#[derive(Debug, Clone)]
pub struct Stage3Config {
    /// Whether to generate machine-readable output
    pub generate_machine: bool,
    /// Whether to generate human-readable output
    pub generate_human: bool,
}

impl Default for Stage3Config {
    fn default() -> Self {
        Self {
            generate_machine: true,
            generate_human: true,
        }
    }
}

/// Result of Stage 3 rendering
#[derive(Debug)]
pub struct Stage3Result {
    /// Path to machine transcript (if generated)
    pub machine_path: Option<PathBuf>,
    /// Path to human transcript (if generated)
    pub human_path: Option<PathBuf>,
}

/// Execute Stage 3: Rendering
///
/// Produces two output views:
/// 1. Machine transcript: JSON with utterances, per-speaker statistics and metadata
/// 2. Human transcript: `[MM:SS-MM:SS] SPEAKER: text` lines plus a statistics section
pub fn execute_stage3(
    result: &AttributionResult,
    title: &str,
    machine_output: Option<&Path>,
    human_output: Option<&Path>,
    config: &Stage3Config,
) -> Result<Stage3Result> {
    let mut rendered = Stage3Result {
        machine_path: None,
        human_path: None,
    };

    if config.generate_machine {
        if let Some(path) = machine_output {
            info!("Writing machine transcript to {:?}", path);
            MachineTranscript::from_result(result).write_json(path)?;
            rendered.machine_path = Some(path.to_path_buf());
        }
    }

    if config.generate_human {
        if let Some(path) = human_output {
            info!("Writing human transcript to {:?}", path);
            HumanTranscript::new(title, result).write_file(path)?;
            rendered.human_path = Some(path.to_path_buf());
        }
    }

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AttributionConfig;
    use crate::models::TranscriptSegment;
    use crate::stages::attribute_transcript;

    #[test]
    fn test_disabled_outputs_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let machine = dir.path().join("out.json");
        let human = dir.path().join("out.txt");
        let result = attribute_transcript(
            &[TranscriptSegment::new(0.0, 1.0, "hi")],
            None,
            &AttributionConfig::default(),
        );
        let config = Stage3Config {
            generate_machine: true,
            generate_human: false,
        };

        let rendered = execute_stage3(
            &result,
            "test",
            Some(machine.as_path()),
            Some(human.as_path()),
            &config,
        )
        .unwrap();

        assert_eq!(rendered.machine_path.as_deref(), Some(machine.as_path()));
        assert!(rendered.human_path.is_none());
        assert!(machine.exists());
        assert!(!human.exists());
    }
}
