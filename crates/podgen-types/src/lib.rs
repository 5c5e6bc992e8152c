//! Shared types for podgen
//!
//! This crate builds the Pod descriptor that both podgen binaries work with,
//! and a small summary view used for logging and confirmation output.

use k8s_openapi::api::core::v1::{Container, EnvVar, Pod, PodSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

// ============================================================================
// Descriptor Constants
// ============================================================================

/// Name of the generated pod
pub const POD_NAME: &str = "test-pod";

/// Name of the single container in the generated pod
pub const CONTAINER_NAME: &str = "test-container";

/// Image reference for the container
pub const CONTAINER_IMAGE: &str = "nginx";

/// Name of the environment variable carrying the environment label
pub const ENV_VAR_NAME: &str = "ENV";

/// Environment label used when none is given
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Namespace pods are created in when none is given
pub const DEFAULT_NAMESPACE: &str = "default";

// ============================================================================
// Pod Builder
// ============================================================================

/// Build the test pod for an environment label.
///
/// The result always has exactly one container with exactly one environment
/// variable, `ENV`, set to `environment`. Kind and apiVersion come from the
/// `k8s_openapi::Resource` impl on [`Pod`] and are written on serialization.
pub fn build_pod(environment: &str) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(POD_NAME.to_string()),
            ..Default::default()
        },
        spec: Some(PodSpec {
            containers: vec![Container {
                name: CONTAINER_NAME.to_string(),
                image: Some(CONTAINER_IMAGE.to_string()),
                env: Some(vec![EnvVar {
                    name: ENV_VAR_NAME.to_string(),
                    value: Some(environment.to_string()),
                    ..Default::default()
                }]),
                ..Default::default()
            }],
            ..Default::default()
        }),
        ..Default::default()
    }
}

// ============================================================================
// Pod Summary
// ============================================================================

/// Flat view of the fields podgen cares about
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PodSummary {
    pub name: String,
    pub namespace: Option<String>,
    pub image: Option<String>,
    pub environment: Option<String>,
}

impl PodSummary {
    /// Extract a summary from any pod, tolerating missing fields
    pub fn from_pod(pod: &Pod) -> Self {
        let container = pod
            .spec
            .as_ref()
            .and_then(|spec| spec.containers.first());

        let environment = container
            .and_then(|c| c.env.as_ref())
            .and_then(|env| env.iter().find(|var| var.name == ENV_VAR_NAME))
            .and_then(|var| var.value.clone());

        Self {
            name: pod.metadata.name.clone().unwrap_or_default(),
            namespace: pod.metadata.namespace.clone(),
            image: container.and_then(|c| c.image.clone()),
            environment,
        }
    }

    /// Format as `pod/<name>`, the way kubectl refers to it
    pub fn resource_ref(&self) -> String {
        format!("pod/{}", self.name)
    }
}
