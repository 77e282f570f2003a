//! Turns a cluster snapshot into the system prompt sent to the model.

use crate::cluster::{ClusterSnapshot, DeploymentInfo, NodeInfo, PodInfo};
use regex::Regex;
use std::fmt::Write;
use std::sync::OnceLock;

const LOG_KEYWORD: &str = "log";

const PREAMBLE: &str = "You are an AI assistant and provide assistance to only Kubernetes related queries. \
If the user asks how many pods, just give the number of pods precisely and not more than that.";

fn pod_reference() -> &'static Regex {
    static POD_REFERENCE: OnceLock<Regex> = OnceLock::new();
    POD_REFERENCE.get_or_init(|| {
        Regex::new(r"(?i)\blogs?\s+(?:for|of|from)\s+(?:the\s+)?pod\s+([a-z0-9][a-z0-9.\-]*)")
            .expect("valid regex")
    })
}

/// Plain substring match; "catalog" counts too.
pub fn is_log_query(question: &str) -> bool {
    question.to_lowercase().contains(LOG_KEYWORD)
}

/// Finds the listed pod a log question refers to.
///
/// A "logs for pod <name>" phrase wins when it names a listed pod.
/// Otherwise the longest listed pod name mentioned as a whole word is used.
/// Names that are not listed are never returned, since the listing already
/// covers the namespace the logs would be read from.
pub fn extract_pod_name<'a>(question: &str, pods: &'a [PodInfo]) -> Option<&'a PodInfo> {
    let referenced = pod_reference()
        .captures(question)
        .map(|captures| captures[1].trim_end_matches(['.', '-']).to_lowercase());

    if let Some(name) = referenced {
        if let Some(pod) = pods.iter().find(|pod| pod.name.to_lowercase() == name) {
            return Some(pod);
        }
    }

    let lowered = question.to_lowercase();
    pods.iter()
        .filter(|pod| mentions(&lowered, &pod.name.to_lowercase()))
        .max_by_key(|pod| pod.name.len())
}

/// `name` occurs in `text` and is not part of a longer name.
fn mentions(text: &str, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }

    let part_of_name = |c: char| c.is_ascii_alphanumeric() || c == '-';

    text.match_indices(name).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + name.len()..].chars().next();
        !before.is_some_and(part_of_name) && !after.is_some_and(part_of_name)
    })
}

pub fn build_prompt(snapshot: &ClusterSnapshot) -> String {
    let mut prompt = String::new();

    let _ = writeln!(prompt, "{PREAMBLE}");
    let _ = writeln!(
        prompt,
        "Analyze the following Kubernetes pods, deployment and node data for namespace \"{}\":",
        snapshot.namespace
    );

    prompt.push_str("\nPods:\n");
    push_lines(&mut prompt, snapshot.pods.iter().map(pod_line));

    prompt.push_str("\nDeployments:\n");
    push_lines(&mut prompt, snapshot.deployments.iter().map(deployment_line));

    prompt.push_str("\nNodes:\n");
    push_lines(&mut prompt, snapshot.nodes.iter().map(node_line));

    if let Some(logs) = &snapshot.logs {
        match &logs.container {
            Some(container) => {
                let _ = writeln!(
                    prompt,
                    "\nLogs for pod {} (container {}):",
                    logs.pod_name, container
                );
            }
            None => {
                let _ = writeln!(prompt, "\nLogs for pod {}:", logs.pod_name);
            }
        }
        if logs.content.is_empty() {
            prompt.push_str("(empty)\n");
        } else {
            prompt.push_str(&logs.content);
            if !logs.content.ends_with('\n') {
                prompt.push('\n');
            }
        }
    }

    prompt
}

fn push_lines(prompt: &mut String, lines: impl Iterator<Item = String>) {
    let mut empty = true;
    for line in lines {
        prompt.push_str(&line);
        prompt.push('\n');
        empty = false;
    }
    if empty {
        prompt.push_str("(none)\n");
    }
}

fn pod_line(pod: &PodInfo) -> String {
    format!(
        "Pod name: {}, Namespace: {}, Status: {}, Node: {}",
        pod.name,
        pod.namespace,
        pod.status,
        pod.node.as_deref().unwrap_or("None")
    )
}

fn deployment_line(deployment: &DeploymentInfo) -> String {
    format!(
        "Name: {}, Replicas: {}, Available: {}, Ready: {}, Status: {}, Strategy: {}",
        deployment.name,
        count(deployment.replicas),
        count(deployment.available_replicas),
        count(deployment.ready_replicas),
        deployment.status,
        deployment.strategy
    )
}

fn node_line(node: &NodeInfo) -> String {
    format!(
        "Name: {}, Status: {}, Node IP: {}, Unschedulable: {}",
        node.name, node.status, node.node_ip, node.unschedulable
    )
}

fn count(value: Option<i32>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}
