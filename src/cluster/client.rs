use super::types::{DeploymentInfo, NodeInfo, PodInfo};
use crate::Result;
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Node, Pod};
use kube::api::{ListParams, LogParams};
use kube::{Api, Client};
use tracing::{debug, info};

/// Read-only access to the cluster control plane.
#[async_trait]
pub trait ClusterReader: Send + Sync {
    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodInfo>>;

    async fn list_deployments(&self, namespace: &str) -> Result<Vec<DeploymentInfo>>;

    /// Recent log output of one container; `None` lets the API server pick,
    /// which only works for single-container pods.
    async fn pod_logs(
        &self,
        namespace: &str,
        pod_name: &str,
        container: Option<&str>,
    ) -> Result<String>;

    async fn list_nodes(&self) -> Result<Vec<NodeInfo>>;
}

pub const DEFAULT_LOG_TAIL_LINES: i64 = 200;

/// Upper bound on log bytes requested for one prompt.
pub const LOG_LIMIT_BYTES: i64 = 64 * 1024;

pub struct KubeClusterReader {
    client: Client,
    log_tail_lines: i64,
}

impl KubeClusterReader {
    /// Uses the kubeconfig or in-cluster credentials of the environment.
    pub async fn try_default() -> Result<Self> {
        debug!("Initializing Kubernetes client");

        let client = Client::try_default().await?;

        info!("Kubernetes client initialized");

        Ok(Self::new(client))
    }

    pub fn from_config(config: kube::Config) -> Result<Self> {
        let client = Client::try_from(config)?;
        Ok(Self::new(client))
    }

    pub fn new(client: Client) -> Self {
        Self {
            client,
            log_tail_lines: DEFAULT_LOG_TAIL_LINES,
        }
    }

    pub fn with_log_tail_lines(mut self, log_tail_lines: i64) -> Self {
        self.log_tail_lines = log_tail_lines;
        self
    }

    fn log_params(&self, container: Option<&str>) -> LogParams {
        LogParams {
            container: container.map(str::to_string),
            tail_lines: Some(self.log_tail_lines),
            limit_bytes: Some(LOG_LIMIT_BYTES),
            ..Default::default()
        }
    }
}

#[async_trait]
impl ClusterReader for KubeClusterReader {
    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodInfo>> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let list = pods.list(&ListParams::default()).await?;

        debug!("Listed {} pods in namespace {}", list.items.len(), namespace);

        Ok(list.items.iter().map(PodInfo::from_k8s_pod).collect())
    }

    async fn list_deployments(&self, namespace: &str) -> Result<Vec<DeploymentInfo>> {
        let deployments: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        let list = deployments.list(&ListParams::default()).await?;

        debug!(
            "Listed {} deployments in namespace {}",
            list.items.len(),
            namespace
        );

        Ok(list
            .items
            .iter()
            .map(DeploymentInfo::from_k8s_deployment)
            .collect())
    }

    async fn pod_logs(
        &self,
        namespace: &str,
        pod_name: &str,
        container: Option<&str>,
    ) -> Result<String> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let logs = pods.logs(pod_name, &self.log_params(container)).await?;

        debug!(
            "Fetched {} bytes of logs for pod {}/{}",
            logs.len(),
            namespace,
            pod_name
        );

        Ok(logs)
    }

    async fn list_nodes(&self) -> Result<Vec<NodeInfo>> {
        let nodes: Api<Node> = Api::all(self.client.clone());
        let list = nodes.list(&ListParams::default()).await?;

        info!("Total number of nodes in the cluster: {}", list.items.len());

        Ok(list.items.iter().map(NodeInfo::from_k8s_node).collect())
    }
}
