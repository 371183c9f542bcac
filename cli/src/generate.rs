#![deny(missing_docs)]

//! # Generate Command
//!
//! Discovers route group files under a directory, builds the OpenAPI document
//! and writes it as JSON or YAML.

use crate::error::{CliError, CliResult};
use routedoc_core::{
    build_document_with_operation_defaults, Document, DocumentSkeleton, ModuleRoutes,
    OperationDefaults,
};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Directory searched recursively for route group files.
    #[clap(long, env = "ROUTEDOC_ROUTES")]
    pub routes: PathBuf,

    /// File name suffix of route group files.
    /// Files ending in `.yaml`/`.yml` are read as YAML, everything else as JSON.
    #[clap(long, env = "ROUTEDOC_PATTERN", default_value = "-routes.json")]
    pub pattern: String,

    /// Document skeleton (JSON or YAML) merged over the defaults.
    #[clap(long, env = "ROUTEDOC_SKELETON")]
    pub skeleton: Option<PathBuf>,

    /// Per-operation defaults (JSON or YAML): tags, summary, description, responses.
    #[clap(long, env = "ROUTEDOC_OPERATION_DEFAULTS")]
    pub operation_defaults: Option<PathBuf>,

    /// Replaces the document servers with a single URL.
    #[clap(long, env = "ROUTEDOC_SERVER_URL")]
    pub server_url: Option<String>,

    /// Output path. Supports .json and .yaml/.yml extensions.
    /// If not provided, prints JSON to stdout.
    #[clap(long, env = "ROUTEDOC_OUTPUT")]
    pub output: Option<PathBuf>,
}

/// Executes the generate command.
pub fn execute(args: &GenerateArgs) -> CliResult<()> {
    let document = build(args)?;
    let rendered = render(&document, args.output.as_deref())?;

    match &args.output {
        Some(out_path) => {
            if let Some(parent) = out_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(out_path, rendered)?;
            tracing::info!(output = %out_path.display(), "document written");
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

/// Loads every input named by `args` and builds the document.
pub fn build(args: &GenerateArgs) -> CliResult<Document> {
    let files = discover_route_files(&args.routes, &args.pattern)?;
    tracing::info!(count = files.len(), dir = %args.routes.display(), "route files found");

    let modules = files
        .iter()
        .map(|path| {
            tracing::debug!(file = %path.display(), "loading route group");
            load_data::<ModuleRoutes>(path)
        })
        .collect::<CliResult<Vec<_>>>()?;

    let mut skeleton = match &args.skeleton {
        Some(path) => load_data::<DocumentSkeleton>(path)?,
        None => DocumentSkeleton::default(),
    };
    if let Some(url) = &args.server_url {
        skeleton = skeleton.with_server_url(url.clone());
    }

    let defaults = match &args.operation_defaults {
        Some(path) => load_data::<OperationDefaults>(path)?,
        None => OperationDefaults::default(),
    };

    Ok(build_document_with_operation_defaults(
        &modules, &skeleton, &defaults,
    )?)
}

/// Lists the files under `dir` whose name ends with `suffix`, sorted by path.
pub fn discover_route_files(dir: &Path, suffix: &str) -> CliResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CliError::General(format!(
            "Routes directory not found: {:?}",
            dir
        )));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_string_lossy().ends_with(suffix))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    Ok(files)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn load_data<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::General(format!("Failed to read {:?}: {}", path, e))
    })?;
    if is_yaml(path) {
        Ok(serde_yaml::from_str(&content)?)
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}

fn render(document: &Document, output: Option<&Path>) -> CliResult<String> {
    // Stdout defaults to JSON
    match output {
        Some(path) if is_yaml(path) => Ok(document.to_yaml()?),
        _ => Ok(document.to_json_pretty()?),
    }
}
