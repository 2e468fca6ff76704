//! openworld-sdk-generator CLI entrypoint
//! Parses command-line arguments and runs SDK generation.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use openworld_sdk_generator::application::{GenerateSdkRequest, GenerateSdkUseCase};
use openworld_sdk_generator::generation::OpenApiGeneratorCli;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

/// Let's build an openworld SDK!
#[derive(Parser, Debug)]
#[command(name = "openworld-sdk-generator")]
#[command(about, long_about = None, disable_version_flag = true)]
struct Cli {
    /// Base64-encoded zip archive containing the OpenAPI spec
    #[arg(short = 'i', long = "input-spec")]
    input_spec: String,
    /// Directory to write the generated project into
    #[arg(short = 'o', long = "output-directory")]
    output_directory: PathBuf,
    /// SDK namespace, normalized into package identifiers
    #[arg(short = 'n', long = "namespace")]
    namespace: String,
    /// Artifact version of the generated SDK
    #[arg(short = 'v', long = "version")]
    version: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging with default level INFO
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    match generate_sdk(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let kind = e
                .downcast_ref::<openworld_sdk_generator::Error>()
                .map(|e| e.kind())
                .unwrap_or("unknown");
            error!(kind, "Failed to generate SDK");
            error!("{e:?}");
            ExitCode::FAILURE
        }
    }
}

async fn generate_sdk(cli: Cli) -> anyhow::Result<()> {
    info!(
        namespace = %cli.namespace,
        version = %cli.version,
        "Generating SDK"
    );

    let use_case = GenerateSdkUseCase::new(Arc::new(OpenApiGeneratorCli::default()));
    let response = use_case
        .execute(GenerateSdkRequest {
            input_spec: cli.input_spec,
            output_dir: cli.output_directory,
            namespace: cli.namespace,
            version: cli.version,
        })
        .await
        .context("SDK generation failed")?;

    info!(
        package = %response.package_name,
        artifact = %response.artifact_id,
        output_path = %response.output_path.display(),
        updated_modules = response.updated_modules.len(),
        "Successfully generated SDK"
    );
    Ok(())
}
