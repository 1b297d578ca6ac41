//! Cycle detection over the forward adjacency.

use super::graph::ProcessGraph;
use super::limits::Budget;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopKind {
    Simple,
}

/// One elementary cycle, in traversal order starting at the re-entered node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loop {
    pub elements: Vec<String>,
    #[serde(rename = "type")]
    pub kind: LoopKind,
}

impl Loop {
    pub fn simple(elements: Vec<String>) -> Self {
        Self {
            elements,
            kind: LoopKind::Simple,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.iter().any(|e| e == id)
    }
}

/// Loops found by one scan, plus whether the budget cut it short
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopScan {
    pub loops: Vec<Loop>,
    pub interrupted: bool,
}

struct Frame<'a> {
    node: &'a str,
    next: usize,
}

/// Detect cycles with a DFS that tracks which nodes are on the current path.
///
/// Roots are taken in sorted id order, successors in flow order. Whenever a
/// successor is already on the path, the path segment from that successor to
/// the current node is recorded. The path is read straight off the frame
/// stack, so sibling branches never share a buffer. Overlapping loops are all
/// reported; nothing is deduplicated.
pub fn find_loops(graph: &ProcessGraph<'_>, budget: &Budget) -> LoopScan {
    let mut visited: HashSet<&str> = HashSet::with_capacity(graph.node_count());
    let mut on_path: HashSet<&str> = HashSet::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut scan = LoopScan::default();
    let mut steps = 0usize;

    for root in graph.nodes() {
        if !visited.insert(root) {
            continue;
        }
        on_path.insert(root);
        stack.push(Frame { node: root, next: 0 });

        while let Some(top) = stack.last_mut() {
            steps += 1;
            if budget.should_stop(steps) {
                scan.interrupted = true;
                debug!(loops = scan.loops.len(), "loop scan interrupted");
                return scan;
            }

            let node = top.node;
            let Some(&neighbor) = graph.successors(node).get(top.next) else {
                on_path.remove(node);
                stack.pop();
                continue;
            };
            top.next += 1;

            if visited.insert(neighbor) {
                on_path.insert(neighbor);
                stack.push(Frame {
                    node: neighbor,
                    next: 0,
                });
            } else if on_path.contains(neighbor) {
                if let Some(start) = stack.iter().position(|f| f.node == neighbor) {
                    let elements = stack[start..]
                        .iter()
                        .map(|f| f.node.to_string())
                        .collect();
                    scan.loops.push(Loop::simple(elements));
                }
            }
        }
    }

    scan
}
