//! Generation engine port and the `openapi-generator-cli` adapter
//!
//! The engine is a black box: it receives a [`GeneratorConfig`] and either
//! writes the SDK project into the configured output directory or fails.

use std::io::Write;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::core::{Error, Result};
use crate::generation::GeneratorConfig;

/// Default engine executable, resolved through `PATH`
pub const DEFAULT_ENGINE_PROGRAM: &str = "openapi-generator-cli";

/// Runs code generation for a prepared configuration
#[async_trait]
pub trait GenerationEngine: Send + Sync {
    async fn generate(&self, config: &GeneratorConfig) -> Result<()>;
}

/// How to launch the external engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Executable name or path
    pub program: String,
    /// Arguments placed before `generate`, e.g. `-jar openapi-generator-cli.jar`
    pub leading_args: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            program: DEFAULT_ENGINE_PROGRAM.to_string(),
            leading_args: Vec::new(),
        }
    }
}

/// Engine adapter that shells out to `openapi-generator-cli`
pub struct OpenApiGeneratorCli {
    settings: EngineSettings,
}

impl OpenApiGeneratorCli {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }
}

impl Default for OpenApiGeneratorCli {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

#[async_trait]
impl GenerationEngine for OpenApiGeneratorCli {
    async fn generate(&self, config: &GeneratorConfig) -> Result<()> {
        let mut config_file = tempfile::Builder::new()
            .prefix("openworld-generator-")
            .suffix(".json")
            .tempfile()?;
        serde_json::to_writer_pretty(config_file.as_file_mut(), &config.to_config_file())?;
        config_file.flush()?;

        let args = config.to_args(config_file.path());
        info!(
            program = %self.settings.program,
            generator = %config.generator_name,
            package = %config.package_name,
            output = %config.output_dir.display(),
            "Running generation engine"
        );
        debug!(args = ?args, "Engine arguments");

        let output = Command::new(&self.settings.program)
            .args(&self.settings.leading_args)
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| Error::EngineUnavailable {
                program: self.settings.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
            debug!(target: "engine", "{line}");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // The engine reports most failures on stdout
            let detail = if stderr.trim().is_empty() {
                stdout.trim()
            } else {
                stderr.trim()
            };
            return Err(Error::Engine {
                exit_code: output.status.code().unwrap_or(-1),
                stderr: detail.to_string(),
            });
        }

        Ok(())
    }
}

/// Engine double for tests
#[cfg(test)]
pub struct MockEngine {
    pub fail_with: Option<(i32, String)>,
    pub calls: std::sync::Mutex<Vec<GeneratorConfig>>,
}

#[cfg(test)]
impl MockEngine {
    pub fn succeeding() -> Self {
        Self {
            fail_with: None,
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn failing(exit_code: i32, stderr: &str) -> Self {
        Self {
            fail_with: Some((exit_code, stderr.to_string())),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl GenerationEngine for MockEngine {
    async fn generate(&self, config: &GeneratorConfig) -> Result<()> {
        self.calls.lock().unwrap().push(config.clone());
        match &self.fail_with {
            Some((exit_code, stderr)) => Err(Error::Engine {
                exit_code: *exit_code,
                stderr: stderr.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::SdkCoordinates;

    fn config() -> GeneratorConfig {
        GeneratorConfig::new(
            "/tmp/spec.yaml",
            "/tmp/out",
            &SdkCoordinates::new("rapid", "0.1.0"),
        )
    }

    #[tokio::test]
    async fn test_missing_program_is_engine_unavailable() {
        let engine = OpenApiGeneratorCli::new(EngineSettings {
            program: "openworld-definitely-not-installed".to_string(),
            leading_args: Vec::new(),
        });

        let err = engine.generate(&config()).await.unwrap_err();

        assert!(matches!(err, Error::EngineUnavailable { .. }), "got {err:?}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_engine_failure_reports_exit_code_and_stderr() {
        let engine = OpenApiGeneratorCli::new(EngineSettings {
            program: "sh".to_string(),
            leading_args: vec![
                "-c".to_string(),
                "echo 'spec is invalid' >&2; exit 3".to_string(),
            ],
        });

        let err = engine.generate(&config()).await.unwrap_err();

        match err {
            Error::Engine { exit_code, stderr } => {
                assert_eq!(exit_code, 3);
                assert_eq!(stderr, "spec is invalid");
            }
            other => panic!("Expected Engine error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_engine_receives_config_file() {
        // `sh -c script generate ...` binds `generate` to $0 and the flags to $@
        let script = r#"
            while [ "$#" -gt 0 ]; do
                if [ "$1" = "--config" ]; then
                    grep -q '"enumPropertyNaming": "UPPERCASE"' "$2" || exit 7
                    exit 0
                fi
                shift
            done
            exit 9
        "#;
        let engine = OpenApiGeneratorCli::new(EngineSettings {
            program: "sh".to_string(),
            leading_args: vec!["-c".to_string(), script.to_string()],
        });

        engine.generate(&config()).await.unwrap();
    }

    #[tokio::test]
    async fn test_mock_engine_records_calls() {
        let engine = MockEngine::failing(1, "boom");

        let err = engine.generate(&config()).await.unwrap_err();

        assert!(matches!(err, Error::Engine { exit_code: 1, .. }));
        assert_eq!(engine.calls.lock().unwrap().len(), 1);
    }
}
