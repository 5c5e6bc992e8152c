use std::path::PathBuf;

use kube::config::KubeconfigError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors from loading credentials and talking to the API server
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not determine the home directory to locate ~/.kube/config")]
    HomeDirNotFound,

    #[error("failed to read kubeconfig at {}", path.display())]
    KubeconfigRead {
        path: PathBuf,
        #[source]
        source: KubeconfigError,
    },

    #[error("failed to build client configuration from kubeconfig")]
    Config(#[source] KubeconfigError),

    #[error("failed to create Kubernetes client")]
    Client(#[source] kube::Error),

    #[error("failed to create pod '{name}' in namespace '{namespace}'")]
    Create {
        name: String,
        namespace: String,
        #[source]
        source: kube::Error,
    },
}
