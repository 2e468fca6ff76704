//! Generator configuration for openworld Python SDK projects
//!
//! [`GeneratorConfig`] is assembled once from the CLI inputs and handed to the
//! generation engine by reference. The key names and values here are the
//! contract with `openapi-generator` and its `openworld-sdk` templates.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::core::utils::normalize_namespace;

/// Target generator understood by the engine
pub const GENERATOR_NAME: &str = "python";
/// Custom template directory, relative to the working directory
pub const TEMPLATE_DIR: &str = "templates/openworld-sdk/";
/// Supporting files rendered alongside models and clients
pub const SUPPORTING_FILES: &str = "requirements.txt,setup.py,apis_tag_to_api.handlebars";
pub const GROUP_ID: &str = "openworld.sdk";
pub const INVOKER_PACKAGE: &str = "openworld.sdk";
pub const ARTIFACT_PREFIX: &str = "openworld-sdk-python";
pub const API_NAME_SUFFIX: &str = "Client";
pub const MODEL_PACKAGE: &str = "model";
pub const API_PACKAGE: &str = "client";
pub const ENUM_PROPERTY_NAMING: &str = "UPPERCASE";

/// Naming inputs for one SDK: the namespace as given, its normalized
/// package fragment, and the artifact version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkCoordinates {
    pub namespace: String,
    pub normalized_namespace: String,
    pub version: String,
}

impl SdkCoordinates {
    pub fn new(namespace: impl Into<String>, version: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let normalized_namespace = normalize_namespace(&namespace);
        Self {
            namespace,
            normalized_namespace,
            version: version.into(),
        }
    }

    /// e.g. `openworld-sdk-python-travelapi`
    pub fn artifact_id(&self) -> String {
        format!("{ARTIFACT_PREFIX}-{}", self.normalized_namespace)
    }

    /// e.g. `openworld.sdk.travelapi`
    pub fn package_name(&self) -> String {
        format!("{INVOKER_PACKAGE}.{}", self.normalized_namespace)
    }

    /// Directory of the generated package, relative to the output root
    pub fn package_path(&self) -> PathBuf {
        let mut path: PathBuf = INVOKER_PACKAGE.split('.').collect();
        path.push(&self.normalized_namespace);
        path
    }
}

/// Kind of file a user-defined template produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TemplateType {
    SupportingFiles,
}

/// Extra template rendered in addition to the generator's own set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDefinition {
    pub template_file: String,
    pub destination_filename: String,
    pub template_type: TemplateType,
}

impl TemplateDefinition {
    pub fn supporting_file(template_file: &str, destination_filename: &str) -> Self {
        Self {
            template_file: template_file.to_string(),
            destination_filename: destination_filename.to_string(),
            template_type: TemplateType::SupportingFiles,
        }
    }
}

/// Everything the engine needs for one generation run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub generator_name: String,
    pub template_dir: PathBuf,
    pub input_spec: PathBuf,
    pub output_dir: PathBuf,
    pub global_properties: BTreeMap<String, String>,
    pub api_name_suffix: String,
    pub model_package: String,
    pub api_package: String,
    pub artifact_version: String,
    pub group_id: String,
    pub artifact_id: String,
    pub invoker_package: String,
    pub package_name: String,
    pub additional_properties: Map<String, Value>,
    pub user_templates: Vec<TemplateDefinition>,
}

impl GeneratorConfig {
    pub fn new(
        input_spec: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        coordinates: &SdkCoordinates,
    ) -> Self {
        let package_name = coordinates.package_name();

        // Empty values select every model and api
        let global_properties = BTreeMap::from([
            ("models".to_string(), String::new()),
            ("apis".to_string(), String::new()),
            ("supportingFiles".to_string(), SUPPORTING_FILES.to_string()),
        ]);

        let mut additional_properties = Map::new();
        additional_properties.insert("enumPropertyNaming".into(), json!(ENUM_PROPERTY_NAMING));
        additional_properties.insert("sortParamsByRequiredFlag".into(), json!(true));
        additional_properties.insert(
            "normalizedNamespace".into(),
            json!(coordinates.normalized_namespace),
        );
        additional_properties.insert("projectName".into(), json!(package_name));
        additional_properties.insert("namespace".into(), json!(coordinates.namespace));

        Self {
            generator_name: GENERATOR_NAME.to_string(),
            template_dir: PathBuf::from(TEMPLATE_DIR),
            input_spec: input_spec.into(),
            output_dir: output_dir.into(),
            global_properties,
            api_name_suffix: API_NAME_SUFFIX.to_string(),
            model_package: MODEL_PACKAGE.to_string(),
            api_package: API_PACKAGE.to_string(),
            artifact_version: coordinates.version.clone(),
            group_id: GROUP_ID.to_string(),
            artifact_id: coordinates.artifact_id(),
            invoker_package: INVOKER_PACKAGE.to_string(),
            package_name,
            additional_properties,
            user_templates: vec![TemplateDefinition::supporting_file(
                "requirements.handlebars",
                "requirements.txt",
            )],
        }
    }

    /// Body of the engine's `-c` config file.
    ///
    /// Global and additional properties go here rather than on the command
    /// line because `supportingFiles` itself contains commas.
    pub fn to_config_file(&self) -> EngineConfigFile<'_> {
        let files = self
            .user_templates
            .iter()
            .map(|t| {
                (
                    t.template_file.as_str(),
                    TemplateFileEntry {
                        destination_filename: &t.destination_filename,
                        template_type: t.template_type,
                    },
                )
            })
            .collect();

        EngineConfigFile {
            global_properties: &self.global_properties,
            additional_properties: &self.additional_properties,
            files,
        }
    }

    /// Arguments for `openapi-generator-cli`, starting with the `generate`
    /// subcommand.
    pub fn to_args(&self, config_file: &Path) -> Vec<String> {
        let mut args = vec!["generate".to_string()];
        let mut push = |flag: &str, value: &str| {
            args.push(flag.to_string());
            args.push(value.to_string());
        };

        push("--generator-name", &self.generator_name);
        push("--input-spec", &self.input_spec.to_string_lossy());
        push("--output", &self.output_dir.to_string_lossy());
        push("--template-dir", &self.template_dir.to_string_lossy());
        push("--config", &config_file.to_string_lossy());
        push("--api-name-suffix", &self.api_name_suffix);
        push("--model-package", &self.model_package);
        push("--api-package", &self.api_package);
        push("--artifact-version", &self.artifact_version);
        push("--group-id", &self.group_id);
        push("--artifact-id", &self.artifact_id);
        push("--invoker-package", &self.invoker_package);
        push("--package-name", &self.package_name);
        args
    }
}

/// Serialized form of the engine config file
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfigFile<'a> {
    pub global_properties: &'a BTreeMap<String, String>,
    pub additional_properties: &'a Map<String, Value>,
    pub files: BTreeMap<&'a str, TemplateFileEntry<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateFileEntry<'a> {
    pub destination_filename: &'a str,
    pub template_type: TemplateType,
}
