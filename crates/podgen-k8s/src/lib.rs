//! Kubernetes client for podgen
//!
//! This crate loads kubeconfig credentials, builds a `kube::Client` and
//! submits pods to the cluster.

mod client;
mod error;

pub use client::{KubeClient, default_kubeconfig_path};
pub use error::{Error, Result};

// Re-export types that are used in our public API
pub use k8s_openapi::api::core::v1::Pod;
pub use podgen_types::PodSummary;
