//! Advisory deadlock heuristics over gateways and loops.
//!
//! Neither check is a proof. An incomplete join only says that a parallel
//! join is wired in a way that can desynchronize its branches; an infinite
//! loop only says that no exclusive gateway inside the loop leads out of it.

use super::graph::ProcessGraph;
use super::loops::Loop;
use crate::model::{Gateway, GatewayKind, Process};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeadlockKind {
    IncompleteJoin,
    InfiniteLoop,
}

impl std::fmt::Display for DeadlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IncompleteJoin => write!(f, "incomplete-join"),
            Self::InfiniteLoop => write!(f, "infinite-loop"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlockInfo {
    #[serde(rename = "type")]
    pub kind: DeadlockKind,
    pub elements: Vec<String>,
    pub description: String,
}

/// Gateways by id; the first declaration wins on duplicate ids
fn index_gateways(process: &Process) -> HashMap<&str, &Gateway> {
    let mut index = HashMap::new();
    for gateway in &process.elements().gateways {
        index.entry(gateway.id.as_str()).or_insert(gateway);
    }
    index
}

/// Run both heuristics; join findings come first, in gateway declaration order
pub fn detect_deadlocks(
    process: &Process,
    graph: &ProcessGraph<'_>,
    loops: &[Loop],
) -> Vec<DeadlockInfo> {
    let gateways = index_gateways(process);
    let mut deadlocks = incomplete_joins(process, graph, &gateways);
    deadlocks.extend(loops_without_exit(graph, loops, &gateways));
    deadlocks
}

fn incomplete_joins(
    process: &Process,
    graph: &ProcessGraph<'_>,
    gateways: &HashMap<&str, &Gateway>,
) -> Vec<DeadlockInfo> {
    let mut findings = Vec::new();

    for join in process.elements().gateways.iter().filter(|g| g.is_parallel_join()) {
        let incoming = graph.predecessors(&join.id);

        if incoming.len() < 2 {
            findings.push(DeadlockInfo {
                kind: DeadlockKind::IncompleteJoin,
                elements: vec![join.id.clone()],
                description: format!(
                    "Parallel join gateway '{}' has fewer than 2 incoming flows",
                    join.label()
                ),
            });
            continue;
        }

        // A branch that goes straight from the split to the join completes
        // trivially and can leave the join waiting on the others.
        for &source in incoming {
            if gateways.get(source).is_some_and(|g| g.is_parallel_split()) {
                findings.push(DeadlockInfo {
                    kind: DeadlockKind::IncompleteJoin,
                    elements: vec![join.id.clone(), source.to_string()],
                    description: format!(
                        "Parallel join gateway '{}' has direct connection from split gateway \
                         '{}' without intermediate activities",
                        join.label(),
                        source
                    ),
                });
            }
        }
    }

    findings
}

fn loops_without_exit(
    graph: &ProcessGraph<'_>,
    loops: &[Loop],
    gateways: &HashMap<&str, &Gateway>,
) -> Vec<DeadlockInfo> {
    loops
        .iter()
        .filter(|lp| !has_exit(graph, lp, gateways))
        .map(|lp| DeadlockInfo {
            kind: DeadlockKind::InfiniteLoop,
            elements: lp.elements.clone(),
            description: "Loop detected without clear exit condition".to_string(),
        })
        .collect()
}

/// True when some exclusive gateway in the loop has a flow leaving the loop
fn has_exit(graph: &ProcessGraph<'_>, lp: &Loop, gateways: &HashMap<&str, &Gateway>) -> bool {
    let members: HashSet<&str> = lp.elements.iter().map(String::as_str).collect();

    lp.elements
        .iter()
        .filter(|id| {
            gateways
                .get(id.as_str())
                .is_some_and(|g| g.kind == GatewayKind::Exclusive)
        })
        .any(|id| {
            graph
                .successors(id)
                .iter()
                .any(|target| !members.contains(target))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::limits::Budget;
    use crate::analysis::loops::find_loops;
    use crate::testkit::ProcessBuilder;

    fn deadlocks_of(process: &Process) -> Vec<DeadlockInfo> {
        let graph = ProcessGraph::build(process);
        let scan = find_loops(&graph, &Budget::unlimited());
        detect_deadlocks(process, &graph, &scan.loops)
    }

    fn split_join() -> ProcessBuilder {
        ProcessBuilder::new()
            .start("start")
            .end("end")
            .task("task1")
            .task("task2")
            .parallel_split("split")
            .parallel_join("join")
            .flow("start", "split")
            .flow("split", "task1")
            .flow("split", "task2")
            .flow("task1", "join")
            .flow("task2", "join")
            .flow("join", "end")
    }

    #[test]
    fn test_balanced_split_join_is_clean() {
        assert!(deadlocks_of(&split_join().build()).is_empty());
    }

    #[test]
    fn test_direct_split_to_join_edge() {
        let process = split_join().flow("split", "join").build();
        let deadlocks = deadlocks_of(&process);

        assert_eq!(deadlocks.len(), 1);
        assert_eq!(deadlocks[0].kind, DeadlockKind::IncompleteJoin);
        assert_eq!(deadlocks[0].elements, vec!["join", "split"]);
    }

    #[test]
    fn test_join_findings_describe_join_by_name() {
        let mut process = split_join().flow("split", "join").build();
        for gateway in &mut process.info.elements.gateways {
            if gateway.id == "join" {
                gateway.name = "Merge approvals".into();
            }
        }
        let deadlocks = deadlocks_of(&process);

        assert_eq!(deadlocks.len(), 1);
        assert!(deadlocks[0]
            .description
            .starts_with("Parallel join gateway 'Merge approvals' has direct connection"));
        assert!(deadlocks[0].description.contains("split gateway 'split'"));
    }

    #[test]
    fn test_join_with_single_incoming_flow() {
        let process = ProcessBuilder::new()
            .start("start")
            .parallel_join("join")
            .end("end")
            .chain(&["start", "join", "end"])
            .build();
        let deadlocks = deadlocks_of(&process);

        assert_eq!(deadlocks.len(), 1);
        assert_eq!(deadlocks[0].elements, vec!["join"]);
        assert!(deadlocks[0].description.contains("fewer than 2"));
    }

    #[test]
    fn test_loop_with_exit_is_not_flagged() {
        let process = ProcessBuilder::new()
            .start("start")
            .task("task1")
            .task("task2")
            .exclusive("decision")
            .end("end")
            .chain(&["start", "task1", "decision", "task2", "end"])
            .flow("decision", "task1")
            .build();

        assert!(deadlocks_of(&process).is_empty());
    }

    #[test]
    fn test_loop_without_gateway_is_flagged() {
        let process = ProcessBuilder::new()
            .start("start")
            .task("a")
            .task("b")
            .chain(&["start", "a", "b", "a"])
            .build();
        let deadlocks = deadlocks_of(&process);

        assert_eq!(deadlocks.len(), 1);
        assert_eq!(deadlocks[0].kind, DeadlockKind::InfiniteLoop);
        assert_eq!(deadlocks[0].elements, vec!["a", "b"]);
    }

    #[test]
    fn test_exit_through_non_exclusive_gateway_does_not_count() {
        let process = ProcessBuilder::new()
            .start("start")
            .task("a")
            .parallel_split("fork")
            .end("end")
            .chain(&["start", "a", "fork", "a"])
            .flow("fork", "end")
            .build();
        let deadlocks = deadlocks_of(&process);

        assert_eq!(deadlocks.len(), 1);
        assert_eq!(deadlocks[0].kind, DeadlockKind::InfiniteLoop);
    }

    #[test]
    fn test_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&DeadlockKind::IncompleteJoin).unwrap();
        assert_eq!(json, "\"incomplete-join\"");
        assert_eq!(DeadlockKind::InfiniteLoop.to_string(), "infinite-loop");
    }
}
