//! Use case for generating an openworld Python SDK project

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::core::{Error, Result};
use crate::generation::{GenerationEngine, GeneratorConfig, SdkCoordinates, add_missing_imports};
use crate::spec::materialize;

/// Inputs for one SDK generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSdkRequest {
    /// Base64-encoded zip archive holding the OpenAPI spec
    pub input_spec: String,
    pub output_dir: PathBuf,
    pub namespace: String,
    pub version: String,
}

impl GenerateSdkRequest {
    /// All four inputs must be non-empty.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("input-spec", self.input_spec.trim().is_empty()),
            ("output-directory", self.output_dir.as_os_str().is_empty()),
            ("namespace", self.namespace.trim().is_empty()),
            ("version", self.version.trim().is_empty()),
        ];
        match fields.iter().find(|(_, empty)| *empty) {
            Some((name, _)) => Err(Error::invalid_argument(format!(
                "--{name} must not be empty"
            ))),
            None => Ok(()),
        }
    }
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSdkResponse {
    pub output_path: PathBuf,
    pub package_name: String,
    pub artifact_id: String,
    /// Generated modules that received missing imports
    pub updated_modules: Vec<PathBuf>,
}

/// Use case for generating an SDK: materialize, configure, generate, tidy
pub struct GenerateSdkUseCase {
    engine: Arc<dyn GenerationEngine>,
}

impl GenerateSdkUseCase {
    pub fn new(engine: Arc<dyn GenerationEngine>) -> Self {
        Self { engine }
    }

    pub async fn execute(&self, request: GenerateSdkRequest) -> Result<GenerateSdkResponse> {
        // 1. Validate request
        request.validate()?;

        // 2. Extract the spec; it is removed when `spec` goes out of scope
        let spec = materialize(&request.input_spec)?;

        // 3. Build the engine configuration
        let coordinates = SdkCoordinates::new(&request.namespace, &request.version);
        if coordinates.normalized_namespace.is_empty() {
            warn!(
                namespace = %request.namespace,
                "Namespace normalizes to an empty package fragment"
            );
        }
        let config = GeneratorConfig::new(spec.path(), &request.output_dir, &coordinates);
        info!(
            package = %config.package_name,
            artifact = %config.artifact_id,
            version = %config.artifact_version,
            "Configured SDK generation"
        );

        // 4. Generate code
        self.engine.generate(&config).await?;

        // 5. Add missing imports to the generated package
        let package_dir = request.output_dir.join(coordinates.package_path());
        let updated_modules = if package_dir.is_dir() {
            add_missing_imports(&package_dir)?
        } else {
            warn!(
                path = %package_dir.display(),
                "Generated package directory not found, skipping import fixes"
            );
            Vec::new()
        };

        Ok(GenerateSdkResponse {
            output_path: request.output_dir,
            package_name: config.package_name,
            artifact_id: config.artifact_id,
            updated_modules,
        })
    }
}
