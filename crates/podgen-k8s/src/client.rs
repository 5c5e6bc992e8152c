//! Kubernetes client for podgen

use std::path::{Path, PathBuf};

use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, PostParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::ResourceExt;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Path of the kubeconfig kubectl uses by default: `~/.kube/config`
pub fn default_kubeconfig_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(Error::HomeDirNotFound)?;
    Ok(home.join(".kube").join("config"))
}

/// Kubernetes client wrapper
pub struct KubeClient {
    client: kube::Client,
}

impl KubeClient {
    /// Load `~/.kube/config` and build a client for its current context
    pub async fn from_default_path() -> Result<Self> {
        let path = default_kubeconfig_path()?;
        Self::from_path(&path, None).await
    }

    /// Load a kubeconfig file and build a client for `context`, or for the
    /// file's current context when `context` is `None`
    pub async fn from_path(path: &Path, context: Option<&str>) -> Result<Self> {
        debug!(path = %path.display(), "reading kubeconfig");
        let kubeconfig = Kubeconfig::read_from(path).map_err(|source| Error::KubeconfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_kubeconfig(kubeconfig, context).await
    }

    /// Build a client from an already parsed kubeconfig
    pub async fn from_kubeconfig(kubeconfig: Kubeconfig, context: Option<&str>) -> Result<Self> {
        let options = KubeConfigOptions {
            context: context.map(str::to_string),
            ..Default::default()
        };

        let config = kube::Config::from_custom_kubeconfig(kubeconfig, &options)
            .await
            .map_err(Error::Config)?;
        debug!(cluster_url = %config.cluster_url, "resolved cluster endpoint");

        let client = kube::Client::try_from(config).map_err(Error::Client)?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn from_client(client: kube::Client) -> Self {
        Self { client }
    }

    /// Submit a pod for creation in `namespace`.
    ///
    /// With `dry_run` the API server validates the request without
    /// persisting it. Returns the object the server sent back.
    pub async fn create_pod(&self, namespace: &str, pod: &Pod, dry_run: bool) -> Result<Pod> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let params = PostParams {
            dry_run,
            ..Default::default()
        };

        let created = pods
            .create(&params, pod)
            .await
            .map_err(|source| Error::Create {
                name: pod.name_any(),
                namespace: namespace.to_string(),
                source,
            })?;

        info!(name = %created.name_any(), namespace, dry_run, "pod created");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Request, Response, StatusCode};
    use http_body_util::BodyExt;
    use kube::client::Body;
    use podgen_types::build_pod;
    use serde_json::json;

    type ApiServerHandle = tower_test::mock::Handle<Request<Body>, Response<Body>>;
    struct ApiServerVerifier(ApiServerHandle);

    /// What the fake API server should answer with
    enum Scenario {
        Created { dry_run: bool },
        AlreadyExists,
    }

    impl ApiServerVerifier {
        fn run(self, scenario: Scenario) -> tokio::task::JoinHandle<()> {
            tokio::spawn(async move {
                match scenario {
                    Scenario::Created { dry_run } => self.handle_create(dry_run).await,
                    Scenario::AlreadyExists => self.handle_conflict().await,
                }
            })
        }

        async fn next_create(&mut self) -> (Request<Body>, tower_test::mock::SendResponse<Response<Body>>) {
            let (request, send) = self.0.next_request().await.expect("service not called");
            assert_eq!(request.method(), http::Method::POST);
            assert_eq!(request.uri().path(), "/api/v1/namespaces/default/pods");
            (request, send)
        }

        async fn handle_create(mut self, dry_run: bool) {
            let (request, send) = self.next_create().await;
            let query = request.uri().query().unwrap_or_default().to_string();
            assert_eq!(query.contains("dryRun=All"), dry_run);

            let body = request.into_body().collect().await.unwrap().to_bytes();
            let mut pod: Pod = serde_json::from_slice(&body).unwrap();
            assert_eq!(pod, build_pod("dev"));

            // respond as the apiserver would have
            pod.metadata.namespace = Some("default".to_string());
            pod.metadata.uid = Some("3f1c0b7e-0000-4000-8000-000000000001".to_string());
            let response = serde_json::to_vec(&pod).unwrap();
            send.send_response(
                Response::builder()
                    .status(StatusCode::CREATED)
                    .body(Body::from(response))
                    .unwrap(),
            );
        }

        async fn handle_conflict(mut self) {
            let (_request, send) = self.next_create().await;
            let status = json!({
                "kind": "Status",
                "apiVersion": "v1",
                "metadata": {},
                "status": "Failure",
                "message": "pods \"test-pod\" already exists",
                "reason": "AlreadyExists",
                "code": 409
            });
            send.send_response(
                Response::builder()
                    .status(StatusCode::CONFLICT)
                    .body(Body::from(serde_json::to_vec(&status).unwrap()))
                    .unwrap(),
            );
        }
    }

    async fn timeout_after_1s(handle: tokio::task::JoinHandle<()>) {
        tokio::time::timeout(std::time::Duration::from_secs(1), handle)
            .await
            .expect("timeout on mock apiserver")
            .expect("scenario succeeded")
    }

    fn testcontext() -> (KubeClient, ApiServerVerifier) {
        let (mock_service, handle) = tower_test::mock::pair::<Request<Body>, Response<Body>>();
        let client = kube::Client::new(mock_service, "default");
        (KubeClient::from_client(client), ApiServerVerifier(handle))
    }

    const UNREACHABLE_KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
clusters:
- name: unreachable
  cluster:
    server: http://127.0.0.1:1
contexts:
- name: unreachable
  context:
    cluster: unreachable
    user: nobody
current-context: unreachable
users:
- name: nobody
  user: {}
"#;

    #[tokio::test]
    async fn test_create_pod() {
        let (client, server) = testcontext();
        let mocksrv = server.run(Scenario::Created { dry_run: false });

        let created = client
            .create_pod("default", &build_pod("dev"), false)
            .await
            .unwrap();
        assert_eq!(created.name_any(), "test-pod");
        assert_eq!(created.metadata.namespace.as_deref(), Some("default"));
        timeout_after_1s(mocksrv).await;
    }

    #[tokio::test]
    async fn test_create_pod_dry_run() {
        let (client, server) = testcontext();
        let mocksrv = server.run(Scenario::Created { dry_run: true });

        let created = client
            .create_pod("default", &build_pod("dev"), true)
            .await
            .unwrap();
        assert_eq!(created.name_any(), "test-pod");
        timeout_after_1s(mocksrv).await;
    }

    #[tokio::test]
    async fn test_create_pod_conflict() {
        let (client, server) = testcontext();
        let mocksrv = server.run(Scenario::AlreadyExists);

        let err = client
            .create_pod("default", &build_pod("dev"), false)
            .await
            .unwrap_err();
        match err {
            Error::Create {
                name,
                namespace,
                source: kube::Error::Api(response),
            } => {
                assert_eq!(name, "test-pod");
                assert_eq!(namespace, "default");
                assert_eq!(response.code, 409);
                assert_eq!(response.reason, "AlreadyExists");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        timeout_after_1s(mocksrv).await;
    }

    #[tokio::test]
    async fn test_unreachable_cluster_fails() {
        let kubeconfig = Kubeconfig::from_yaml(UNREACHABLE_KUBECONFIG).unwrap();
        let client = KubeClient::from_kubeconfig(kubeconfig, None).await.unwrap();

        let err = client
            .create_pod("default", &build_pod("dev"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Create { .. }), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn test_unknown_context_fails() {
        let kubeconfig = Kubeconfig::from_yaml(UNREACHABLE_KUBECONFIG).unwrap();
        let result = KubeClient::from_kubeconfig(kubeconfig, Some("missing")).await;
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_missing_kubeconfig_fails() {
        let path = std::env::temp_dir().join("podgen-test-no-such-dir").join("config");
        let result = KubeClient::from_path(&path, None).await;
        match result {
            Err(Error::KubeconfigRead { path: reported, .. }) => assert_eq!(reported, path),
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("expected an error for a missing kubeconfig"),
        }
    }

    #[test]
    fn test_default_kubeconfig_path() {
        if let Ok(path) = default_kubeconfig_path() {
            assert!(path.ends_with(".kube/config"));
        }
    }
}
