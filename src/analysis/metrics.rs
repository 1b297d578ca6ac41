//! Size and shape metrics: complexity, depth, width, connectivity.

use super::graph::ProcessGraph;
use super::limits::Budget;
use crate::model::Process;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Declared element counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ElementCount {
    pub total: usize,
    pub events: usize,
    pub activities: usize,
    pub gateways: usize,
    pub flows: usize,
}

impl ElementCount {
    pub fn of(process: &Process) -> Self {
        let elements = process.elements();
        let (events, activities, gateways) = (
            elements.events.len(),
            elements.activities.len(),
            elements.gateways.len(),
        );
        Self {
            total: events + activities + gateways,
            events,
            activities,
            gateways,
            flows: elements.sequence_flows.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessMetrics {
    pub elements: ElementCount,
    /// |V| + |E| - 2|C| over all known nodes
    pub complexity: i64,
    /// Longest node count along a simple forward path from a start event
    pub depth: usize,
    /// Largest number of nodes sharing a first-visit DFS level
    pub width: usize,
    /// |E| / |V|
    pub connectivity: f64,
}

/// Compute all metrics. Returns the metrics and whether the depth search
/// was interrupted by the budget (in which case `depth` is a lower bound).
pub fn calculate_metrics<'a>(
    process: &'a Process,
    graph: &ProcessGraph<'a>,
    starts: &[&'a str],
    budget: &Budget,
) -> (ProcessMetrics, bool) {
    let vertices = graph.node_count();
    let edges = graph.flow_count();
    let (depth, interrupted) = calculate_depth(graph, starts, budget);

    let metrics = ProcessMetrics {
        elements: ElementCount::of(process),
        complexity: complexity(vertices, edges, graph.component_count()),
        depth,
        width: calculate_width(graph, starts),
        connectivity: if vertices > 0 {
            edges as f64 / vertices as f64
        } else {
            0.0
        },
    };

    (metrics, interrupted)
}

pub fn complexity(vertices: usize, edges: usize, components: usize) -> i64 {
    vertices as i64 + edges as i64 - 2 * components as i64
}

struct Frame<'a> {
    node: &'a str,
    next: usize,
}

/// Maximum over start events of the longest simple forward path.
///
/// Every simple path from the start is explored with backtracking, so the
/// deepest frame stack seen is the answer. A node reached again while still
/// on the current path contributes nothing; once popped it can be reached
/// again from another branch.
pub fn calculate_depth<'a>(
    graph: &ProcessGraph<'a>,
    starts: &[&'a str],
    budget: &Budget,
) -> (usize, bool) {
    let mut deepest = 0;
    let mut steps = 0usize;

    for &root in starts.iter().filter(|id| graph.contains(id)) {
        let mut on_path: HashSet<&str> = HashSet::from([root]);
        let mut stack = vec![Frame { node: root, next: 0 }];
        deepest = deepest.max(1);

        while let Some(top) = stack.last_mut() {
            steps += 1;
            if budget.should_stop(steps) {
                return (deepest, true);
            }

            let node = top.node;
            let Some(&child) = graph.successors(node).get(top.next) else {
                on_path.remove(node);
                stack.pop();
                continue;
            };
            top.next += 1;

            if on_path.insert(child) {
                stack.push(Frame { node: child, next: 0 });
                deepest = deepest.max(stack.len());
            }
        }
    }

    (deepest, false)
}

/// Width from a single DFS shared by all start events.
///
/// Each node gets the level of the branch that reaches it first and is never
/// revisited, so this approximates parallelism rather than measuring true
/// breadth-first layers.
pub fn calculate_width<'a>(graph: &ProcessGraph<'a>, starts: &[&'a str]) -> usize {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut levels: BTreeMap<usize, usize> = BTreeMap::new();

    for &root in starts.iter().filter(|id| graph.contains(id)) {
        if !visited.insert(root) {
            continue;
        }
        *levels.entry(0).or_default() += 1;
        let mut stack = vec![Frame { node: root, next: 0 }];

        while let Some(top) = stack.last_mut() {
            let node = top.node;
            let Some(&child) = graph.successors(node).get(top.next) else {
                stack.pop();
                continue;
            };
            top.next += 1;

            if visited.insert(child) {
                *levels.entry(stack.len()).or_default() += 1;
                stack.push(Frame { node: child, next: 0 });
            }
        }
    }

    levels.values().copied().max().unwrap_or(0)
}
