use async_trait::async_trait;
use kube_query::{
    Error, Result,
    cluster::{ClusterReader, DeploymentInfo, NodeInfo, PodInfo},
    llm::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, LlmClient},
};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

/// Mock cluster reader for testing
#[derive(Debug, Clone, Default)]
pub struct MockClusterReader {
    pub pods: Arc<Mutex<Vec<PodInfo>>>,
    pub deployments: Arc<Mutex<Vec<DeploymentInfo>>>,
    pub nodes: Arc<Mutex<Vec<NodeInfo>>>,
    pub logs: Arc<Mutex<HashMap<String, String>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub log_containers: Arc<Mutex<Vec<Option<String>>>>,
    pub error: Option<String>,
}

impl MockClusterReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pods(self, pods: Vec<PodInfo>) -> Self {
        *self.pods.lock().unwrap() = pods;
        self
    }

    pub fn with_deployments(self, deployments: Vec<DeploymentInfo>) -> Self {
        *self.deployments.lock().unwrap() = deployments;
        self
    }

    pub fn with_nodes(self, nodes: Vec<NodeInfo>) -> Self {
        *self.nodes.lock().unwrap() = nodes;
        self
    }

    pub fn with_logs(self, pod_name: &str, content: &str) -> Self {
        self.logs
            .lock()
            .unwrap()
            .insert(pod_name.to_string(), content.to_string());
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Container argument of every `pod_logs` call, in order.
    pub fn get_log_containers(&self) -> Vec<Option<String>> {
        self.log_containers.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match &self.error {
            Some(error) => Err(Error::internal(error.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ClusterReader for MockClusterReader {
    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodInfo>> {
        self.record(format!("list_pods:{namespace}"))?;
        Ok(self.pods.lock().unwrap().clone())
    }

    async fn list_deployments(&self, namespace: &str) -> Result<Vec<DeploymentInfo>> {
        self.record(format!("list_deployments:{namespace}"))?;
        Ok(self.deployments.lock().unwrap().clone())
    }

    async fn pod_logs(
        &self,
        namespace: &str,
        pod_name: &str,
        container: Option<&str>,
    ) -> Result<String> {
        self.log_containers
            .lock()
            .unwrap()
            .push(container.map(str::to_string));
        self.record(format!("pod_logs:{namespace}/{pod_name}"))?;
        self.logs
            .lock()
            .unwrap()
            .get(pod_name)
            .cloned()
            .ok_or_else(|| Error::internal(format!("pods \"{pod_name}\" not found")))
    }

    async fn list_nodes(&self) -> Result<Vec<NodeInfo>> {
        self.record("list_nodes".to_string())?;
        Ok(self.nodes.lock().unwrap().clone())
    }
}

/// Mock LLM client for testing
#[derive(Debug, Clone, Default)]
pub struct MockLlmClient {
    pub reply: Arc<Mutex<Option<String>>>,
    pub requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
    pub error: Option<String>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every completion returns `content`.
    pub fn with_reply(self, content: &str) -> Self {
        *self.reply.lock().unwrap() = Some(content.to_string());
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn get_requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(ref error) = self.error {
            return Err(Error::llm(error.clone()));
        }

        match self.reply.lock().unwrap().as_deref() {
            Some(content) => Ok(create_mock_chat_response(content)),
            None => Err(Error::llm("No mock reply configured")),
        }
    }
}

// Helper functions for creating test data

pub fn create_mock_chat_response(content: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: "test-id".to_string(),
        model: "test-model".to_string(),
        choices: vec![Choice {
            index: 0,
            message: ChatMessage::assistant(content),
            finish_reason: Some("Stop".to_string()),
        }],
        usage: None,
    }
}

pub fn create_pod(name: &str, status: &str) -> PodInfo {
    PodInfo {
        name: name.to_string(),
        namespace: "default".to_string(),
        status: status.to_string(),
        node: Some("node-a".to_string()),
        containers: vec!["app".to_string()],
    }
}

pub fn create_deployment(name: &str, replicas: i32) -> DeploymentInfo {
    DeploymentInfo {
        name: name.to_string(),
        replicas: Some(replicas),
        available_replicas: Some(replicas),
        ready_replicas: Some(replicas),
        status: "Available".to_string(),
        selector: BTreeMap::from([("app".to_string(), name.to_string())]),
        strategy: "RollingUpdate".to_string(),
    }
}

pub fn create_node(name: &str) -> NodeInfo {
    NodeInfo {
        name: name.to_string(),
        status: "Ready".to_string(),
        labels: BTreeMap::new(),
        node_ip: "10.0.0.5".to_string(),
        unschedulable: false,
    }
}

/// Three running pods, one deployment, one node.
pub fn create_populated_cluster() -> MockClusterReader {
    MockClusterReader::new()
        .with_pods(vec![
            create_pod("web-0", "Running"),
            create_pod("web-1", "Running"),
            create_pod("web-2", "Running"),
        ])
        .with_deployments(vec![create_deployment("web", 3)])
        .with_nodes(vec![create_node("node-a")])
}
