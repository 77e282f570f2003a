use super::prompt::{build_prompt, extract_pod_name, is_log_query};
use crate::{
    Error, Result,
    cluster::{ClusterReader, ClusterSnapshot, PodLogs},
    llm::{ChatCompletionRequest, ChatMessage, LlmClient},
};
use tracing::{debug, info, warn};

/// Answers one question: read the cluster, build the prompt, ask the model.
pub struct Agent {
    cluster: Box<dyn ClusterReader>,
    llm_client: Box<dyn LlmClient>,
    namespace: String,
}

impl Agent {
    pub fn new(
        cluster: Box<dyn ClusterReader>,
        llm_client: Box<dyn LlmClient>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            cluster,
            llm_client,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub async fn answer(&self, query: &str) -> Result<String> {
        let snapshot = self.snapshot(query).await?;
        let prompt = build_prompt(&snapshot);

        debug!("Built prompt of {} bytes", prompt.len());

        let request =
            ChatCompletionRequest::new(vec![ChatMessage::system(prompt), ChatMessage::user(query)]);

        let response = self.llm_client.create_chat_completion(request).await?;
        let answer = response
            .first_content()
            .ok_or_else(|| Error::llm("Completion API returned no choices"))?
            .to_string();

        info!("LLM response received successfully");

        Ok(answer)
    }

    /// Reads pods, deployments and nodes, plus one pod's logs when the
    /// question asks about logs.
    pub async fn snapshot(&self, query: &str) -> Result<ClusterSnapshot> {
        let pods = self.cluster.list_pods(&self.namespace).await?;
        let deployments = self.cluster.list_deployments(&self.namespace).await?;
        let nodes = self.cluster.list_nodes().await?;

        let logs = if is_log_query(query) {
            match extract_pod_name(query, &pods) {
                Some(pod) => {
                    info!("Extracted pod name: {}", pod.name);
                    let container = pod.containers.first().cloned();
                    let content = self
                        .cluster
                        .pod_logs(&self.namespace, &pod.name, container.as_deref())
                        .await?;
                    Some(PodLogs {
                        pod_name: pod.name.clone(),
                        container,
                        content,
                    })
                }
                None => {
                    warn!("Pod name not found in query: {}", query);
                    None
                }
            }
        } else {
            None
        };

        Ok(ClusterSnapshot {
            namespace: self.namespace.clone(),
            pods,
            deployments,
            nodes,
            logs,
        })
    }
}
