use clap::ValueEnum;
use k8s_openapi::api::core::v1::Pod;

use crate::error::Result;

/// How `podgen-generate` prints the pod
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single-line JSON
    #[default]
    Json,
    /// Indented JSON
    JsonPretty,
    Yaml,
}

/// Serialize a pod in the requested format, without a trailing newline
pub fn render(pod: &Pod, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string(pod)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(pod)?,
        OutputFormat::Yaml => serde_yaml::to_string(pod)?.trim_end().to_string(),
    };
    Ok(text)
}
