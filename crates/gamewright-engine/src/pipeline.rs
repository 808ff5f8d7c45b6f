//! Pipeline orchestration: design, execute, archive.

use crate::config::EngineConfig;
use crate::executor::GameExecutor;
use crate::extract::extract_code;
use crate::generate::TextGenerator;
use crate::persist::GameStore;
use crate::validate::validate_structure;
use gamewright_domain::{ExecutionRecord, SavedArtifact, ValidationOutcome};
use std::time::{Duration, Instant};
use tracing::info;

/// Result of the design step: generation plus extraction plus validation.
#[derive(Debug, Clone)]
pub struct DesignOutcome {
    /// Extracted candidate source (empty when generation failed).
    pub code: String,

    /// Structural verdict on the candidate.
    pub validation: ValidationOutcome,

    /// The generator's full response, before extraction.
    pub raw_response: String,

    /// Wall-clock time of the generation call.
    pub response_time: Duration,
}

/// Result of a complete design → execute → save chain.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// The design step's outcome, always present.
    pub design: DesignOutcome,

    /// Execution record; `None` when the candidate was rejected before the
    /// executor.
    pub execution: Option<ExecutionRecord>,

    /// Archive paths; `None` when nothing was executed.
    pub artifact: Option<SavedArtifact>,

    /// Whether the candidate was valid, ran, and exited cleanly.
    pub success: bool,
}

impl PipelineReport {
    /// Why the attempt did not succeed, if it didn't.
    ///
    /// A rejected or failed candidate is never silently dropped; the caller
    /// decides whether to surface this to a user or discard the attempt.
    /// A run that failed without writing to stderr gets a synthetic
    /// `"exit code <n>"` reason so the diagnostic is never empty.
    pub fn failure_reason(&self) -> Option<String> {
        if self.success {
            return None;
        }
        match &self.execution {
            Some(record) if record.stderr.is_empty() => {
                Some(format!("exit code {}", record.exit_code))
            }
            Some(record) => Some(record.stderr.clone()),
            None => Some(self.design.validation.reason.clone()),
        }
    }
}

/// Orchestrates one game attempt from prompt to archived record.
pub struct GamePipeline {
    executor: GameExecutor,
    store: GameStore,
}

impl GamePipeline {
    /// Build a pipeline from engine configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            executor: GameExecutor::new(config.executor),
            store: GameStore::new(config.output_dir),
        }
    }

    /// Generate a candidate and check it, without running anything.
    ///
    /// Generator failures are folded into a rejected outcome rather than
    /// propagated: from the pipeline's point of view an unusable response
    /// and an absent response are the same declined candidate.
    pub async fn design(&self, generator: &dyn TextGenerator, prompt: &str) -> DesignOutcome {
        let start = Instant::now();

        let raw_response = match generator.generate(prompt).await {
            Ok(text) => text,
            Err(e) => {
                return DesignOutcome {
                    code: String::new(),
                    validation: ValidationOutcome::rejected(format!("generation error: {e}")),
                    raw_response: String::new(),
                    response_time: start.elapsed(),
                }
            }
        };
        let response_time = start.elapsed();

        let code = extract_code(&raw_response);
        let validation = validate_structure(&code);

        DesignOutcome {
            code,
            validation,
            raw_response,
            response_time,
        }
    }

    /// Run the full chain: design, execute if valid, archive what ran.
    ///
    /// Invalid candidates short-circuit before the executor. Executed
    /// candidates are archived whether or not they passed. Persistence
    /// failures are the only error path out of this method.
    pub async fn run(
        &self,
        generator: &dyn TextGenerator,
        prompt: &str,
    ) -> anyhow::Result<PipelineReport> {
        let design = self.design(generator, prompt).await;

        if !design.validation.is_valid {
            info!(reason = %design.validation.reason, "Candidate rejected before execution");
            return Ok(PipelineReport {
                design,
                execution: None,
                artifact: None,
                success: false,
            });
        }

        info!("Executing validated candidate");
        let record = self.executor.execute(&design.code).await;

        let artifact = self.store.save(&design.code, &record)?;
        info!(
            directory = %artifact.directory.display(),
            success = record.passed(),
            "Archived game attempt"
        );

        Ok(PipelineReport {
            success: record.passed(),
            design,
            execution: Some(record),
            artifact: Some(artifact),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct CannedGenerator(String);

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            Ok(self.0.clone())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            anyhow::bail!("model unavailable")
        }
    }

    fn pipeline() -> GamePipeline {
        GamePipeline::new(EngineConfig::default())
    }

    #[tokio::test]
    async fn test_design_extracts_and_validates() {
        let generator = CannedGenerator(
            "Here you go:\n```python\nclass Game:\n    def play(self):\n        print(1)\n```\n"
                .to_string(),
        );

        let outcome = pipeline().design(&generator, "a grid game").await;

        assert!(outcome.validation.is_valid);
        assert!(outcome.code.contains("class Game"));
        assert!(!outcome.code.contains("```"));
        assert!(outcome.raw_response.contains("Here you go"));
    }

    #[tokio::test]
    async fn test_design_rejects_missing_game_class() {
        let generator =
            CannedGenerator("```python\ndef play():\n    print(1)\n```".to_string());

        let outcome = pipeline().design(&generator, "a grid game").await;

        assert!(!outcome.validation.is_valid);
        assert_eq!(outcome.validation.reason, "no 'Game' type found");
    }

    #[tokio::test]
    async fn test_design_folds_generator_failure_into_rejection() {
        let outcome = pipeline().design(&FailingGenerator, "a grid game").await;

        assert!(!outcome.validation.is_valid);
        assert!(outcome.validation.reason.contains("generation error"));
        assert!(outcome.code.is_empty());
    }

    #[tokio::test]
    async fn test_run_short_circuits_invalid_candidate() {
        let generator = CannedGenerator("```python\nprint('snippet only')\n```".to_string());

        let report = pipeline()
            .run(&generator, "a grid game")
            .await
            .expect("pipeline");

        assert!(!report.success);
        assert!(report.execution.is_none());
        assert!(report.artifact.is_none());
        assert_eq!(
            report.failure_reason().as_deref(),
            Some("no 'Game' type found")
        );
    }

    #[test]
    fn test_failure_reason_for_silent_nonzero_exit() {
        let report = PipelineReport {
            design: DesignOutcome {
                code: "class Game:\n    def play(self): pass".to_string(),
                validation: ValidationOutcome::valid(),
                raw_response: String::new(),
                response_time: Duration::ZERO,
            },
            execution: Some(ExecutionRecord::completed(
                3,
                String::new(),
                String::new(),
                Duration::from_millis(5),
            )),
            artifact: None,
            success: false,
        };

        assert_eq!(report.failure_reason().as_deref(), Some("exit code 3"));
    }

    #[test]
    fn test_failure_reason_prefers_stderr_when_present() {
        let report = PipelineReport {
            design: DesignOutcome {
                code: String::new(),
                validation: ValidationOutcome::valid(),
                raw_response: String::new(),
                response_time: Duration::ZERO,
            },
            execution: Some(ExecutionRecord::completed(
                1,
                String::new(),
                "Traceback: boom".to_string(),
                Duration::from_millis(5),
            )),
            artifact: None,
            success: false,
        };

        assert_eq!(report.failure_reason().as_deref(), Some("Traceback: boom"));
    }
}
