use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Node, Pod};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodInfo {
    pub name: String,
    pub namespace: String,
    pub status: String,
    pub node: Option<String>,
    /// Container names in spec order.
    pub containers: Vec<String>,
}

impl PodInfo {
    pub fn from_k8s_pod(pod: &Pod) -> Self {
        let metadata = &pod.metadata;

        Self {
            name: metadata.name.clone().unwrap_or_default(),
            namespace: metadata.namespace.clone().unwrap_or_default(),
            status: pod
                .status
                .as_ref()
                .and_then(|s| s.phase.clone())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            node: pod.spec.as_ref().and_then(|s| s.node_name.clone()),
            containers: pod
                .spec
                .as_ref()
                .map(|s| s.containers.iter().map(|c| c.name.clone()).collect())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentInfo {
    pub name: String,
    pub replicas: Option<i32>,
    pub available_replicas: Option<i32>,
    pub ready_replicas: Option<i32>,
    /// Type of the most recent condition.
    pub status: String,
    pub selector: BTreeMap<String, String>,
    pub strategy: String,
}

impl DeploymentInfo {
    pub fn from_k8s_deployment(deploy: &Deployment) -> Self {
        let spec = deploy.spec.as_ref();
        let status = deploy.status.as_ref();

        Self {
            name: deploy.metadata.name.clone().unwrap_or_default(),
            replicas: spec.and_then(|s| s.replicas),
            available_replicas: status.and_then(|s| s.available_replicas),
            ready_replicas: status.and_then(|s| s.ready_replicas),
            status: status
                .and_then(|s| s.conditions.as_ref())
                .and_then(|c| c.last())
                .map(|c| c.type_.clone())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            selector: spec
                .and_then(|s| s.selector.match_labels.clone())
                .unwrap_or_default(),
            strategy: spec
                .and_then(|s| s.strategy.as_ref())
                .and_then(|s| s.type_.clone())
                .unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub name: String,
    /// Type of the most recent condition.
    pub status: String,
    pub labels: BTreeMap<String, String>,
    pub node_ip: String,
    pub unschedulable: bool,
}

impl NodeInfo {
    pub fn from_k8s_node(node: &Node) -> Self {
        let status = node.status.as_ref();

        Self {
            name: node.metadata.name.clone().unwrap_or_default(),
            status: status
                .and_then(|s| s.conditions.as_ref())
                .and_then(|c| c.last())
                .map(|c| c.type_.clone())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            labels: node.metadata.labels.clone().unwrap_or_default(),
            node_ip: status
                .and_then(|s| s.addresses.as_ref())
                .and_then(|a| a.first())
                .map(|a| a.address.clone())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            unschedulable: node
                .spec
                .as_ref()
                .and_then(|s| s.unschedulable)
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodLogs {
    pub pod_name: String,
    pub container: Option<String>,
    pub content: String,
}

/// Everything read from the cluster for a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    pub namespace: String,
    pub pods: Vec<PodInfo>,
    pub deployments: Vec<DeploymentInfo>,
    pub nodes: Vec<NodeInfo>,
    pub logs: Option<PodLogs>,
}
