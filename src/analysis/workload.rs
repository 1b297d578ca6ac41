//! Distribution of activities across assigned agents.

use crate::model::Process;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Agents above this multiple of the mean task count are overloaded
pub const OVERLOAD_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentWorkloadInfo {
    /// Agent id to assigned activity ids, in declaration order
    pub agent_tasks: BTreeMap<String, Vec<String>>,
    /// 1 - variance / mean^2; 0 when fewer than two agents have tasks
    pub workload_balance: f64,
    /// Sorted agent ids
    pub overloaded_agents: Vec<String>,
    pub unassigned_tasks: Vec<String>,
}

pub fn analyze_workload(process: &Process) -> AgentWorkloadInfo {
    let mut info = AgentWorkloadInfo::default();

    for activity in &process.elements().activities {
        match activity.agent_id() {
            Some(agent) => info
                .agent_tasks
                .entry(agent.to_string())
                .or_default()
                .push(activity.id.clone()),
            None => info.unassigned_tasks.push(activity.id.clone()),
        }
    }

    if info.agent_tasks.len() > 1 {
        let counts: Vec<f64> = info.agent_tasks.values().map(|t| t.len() as f64).collect();
        let (balance, threshold) = balance_score(&counts);
        info.workload_balance = balance;
        info.overloaded_agents = info
            .agent_tasks
            .iter()
            .filter(|(_, tasks)| tasks.len() as f64 > threshold)
            .map(|(agent, _)| agent.clone())
            .collect();
    }

    info
}

/// Balance score and overload threshold for per-agent task counts
fn balance_score(counts: &[f64]) -> (f64, f64) {
    let n = counts.len() as f64;
    let mean = counts.iter().sum::<f64>() / n;
    let variance = counts.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n;

    let balance = if mean > 0.0 {
        1.0 - variance / (mean * mean)
    } else {
        0.0
    };
    (balance, mean * OVERLOAD_FACTOR)
}
