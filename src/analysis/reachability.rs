//! Forward reachability from start events and backward reachability to end
//! events.

use super::graph::ProcessGraph;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReachabilityInfo {
    /// Known nodes not reachable from any start event, sorted
    pub unreachable_elements: Vec<String>,
    /// Known nodes that cannot reach any end event, sorted
    pub dead_end_elements: Vec<String>,
    pub reachable_from_start: BTreeSet<String>,
    pub reaches_end: BTreeSet<String>,
}

impl ReachabilityInfo {
    pub fn is_reachable(&self, id: &str) -> bool {
        self.reachable_from_start.contains(id)
    }

    pub fn reaches_end(&self, id: &str) -> bool {
        self.reaches_end.contains(id)
    }
}

/// Compute both traversals and the complementary unreachable/dead-end lists.
///
/// `reachable_from_start` and `unreachable_elements` partition the known
/// node set exactly; likewise `reaches_end` and `dead_end_elements`.
pub fn analyze_reachability<'a>(
    graph: &ProcessGraph<'a>,
    starts: &[&'a str],
    ends: &[&'a str],
) -> ReachabilityInfo {
    let forward = traverse(starts, |id| graph.successors(id));
    let backward = traverse(ends, |id| graph.predecessors(id));

    let unreachable_elements = graph
        .nodes()
        .filter(|id| !forward.contains(id))
        .map(str::to_string)
        .collect();
    let dead_end_elements = graph
        .nodes()
        .filter(|id| !backward.contains(id))
        .map(str::to_string)
        .collect();

    ReachabilityInfo {
        unreachable_elements,
        dead_end_elements,
        reachable_from_start: into_owned(forward),
        reaches_end: into_owned(backward),
    }
}

/// Iterative DFS from every root over the given neighbor relation
fn traverse<'a, 'g, F>(roots: &[&'a str], neighbors: F) -> BTreeSet<&'a str>
where
    F: Fn(&str) -> &'g [&'a str],
    'a: 'g,
{
    let mut visited = BTreeSet::new();
    let mut stack: Vec<&'a str> = roots.to_vec();

    while let Some(node) = stack.pop() {
        if !visited.insert(node) {
            continue;
        }
        stack.extend(
            neighbors(node)
                .iter()
                .copied()
                .filter(|next| !visited.contains(next)),
        );
    }

    visited
}

fn into_owned(ids: BTreeSet<&str>) -> BTreeSet<String> {
    ids.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::ProcessBuilder;

    fn reachability_of(process: &crate::model::Process) -> ReachabilityInfo {
        let graph = ProcessGraph::build(process);
        let starts: Vec<_> = process.start_events().map(|e| e.id.as_str()).collect();
        let ends: Vec<_> = process.end_events().map(|e| e.id.as_str()).collect();
        analyze_reachability(&graph, &starts, &ends)
    }

    #[test]
    fn test_linear_chain_fully_reachable() {
        let process = ProcessBuilder::new()
            .start("start")
            .task("task1")
            .end("end")
            .chain(&["start", "task1", "end"])
            .build();
        let info = reachability_of(&process);

        assert!(info.unreachable_elements.is_empty());
        assert!(info.dead_end_elements.is_empty());
        assert_eq!(info.reachable_from_start.len(), 3);
    }

    #[test]
    fn test_orphan_task_is_unreachable_and_dead_end() {
        let process = ProcessBuilder::new()
            .start("start")
            .task("task1")
            .task("task2")
            .end("end")
            .chain(&["start", "task1", "end"])
            .build();
        let info = reachability_of(&process);

        assert_eq!(info.unreachable_elements, vec!["task2"]);
        assert_eq!(info.dead_end_elements, vec!["task2"]);
    }

    #[test]
    fn test_dead_end_branch() {
        let process = ProcessBuilder::new()
            .start("start")
            .exclusive("gw")
            .task("stuck")
            .end("end")
            .chain(&["start", "gw", "end"])
            .flow("gw", "stuck")
            .build();
        let info = reachability_of(&process);

        assert!(info.unreachable_elements.is_empty());
        assert_eq!(info.dead_end_elements, vec!["stuck"]);
        assert!(info.is_reachable("stuck"));
        assert!(!info.reaches_end("stuck"));
    }

    #[test]
    fn test_lists_are_sorted() {
        let process = ProcessBuilder::new()
            .start("start")
            .task("zeta")
            .task("alpha")
            .task("mid")
            .build();
        let info = reachability_of(&process);

        assert_eq!(info.unreachable_elements, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_no_start_events_means_everything_unreachable() {
        let process = ProcessBuilder::new()
            .task("a")
            .end("end")
            .flow("a", "end")
            .build();
        let info = reachability_of(&process);

        assert_eq!(info.unreachable_elements, vec!["a", "end"]);
        assert!(info.dead_end_elements.is_empty());
    }

    #[test]
    fn test_partition_covers_phantoms() {
        let process = ProcessBuilder::new()
            .start("start")
            .end("end")
            .chain(&["start", "ghost", "end"])
            .build();
        let info = reachability_of(&process);

        assert!(info.is_reachable("ghost"));
        assert!(info.reaches_end("ghost"));
        assert!(info.unreachable_elements.is_empty());
    }
}
