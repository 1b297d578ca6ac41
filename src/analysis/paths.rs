//! Start-to-end path enumeration and path statistics.
//!
//! Enumeration is a backtracking DFS that never revisits a node already on
//! the current path. The number of paths is exponential in the number of
//! independent branches (k sequential binary splits give 2^k paths), so the
//! enumeration honors a path cap and the run's [`Budget`].

use super::graph::ProcessGraph;
use super::limits::Budget;
use super::loops::Loop;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathInfo {
    /// First enumerated path of maximum length
    pub critical_path: Vec<String>,
    pub all_paths: Vec<Vec<String>>,
    pub loop_detected: bool,
    pub loops: Vec<Loop>,
    pub max_path_length: usize,
    pub min_path_length: usize,
    pub average_path_length: f64,
    /// Enumeration stopped at the path cap
    pub truncated: bool,
}

impl PathInfo {
    pub fn path_count(&self) -> usize {
        self.all_paths.len()
    }
}

/// Outcome of enumeration before statistics are derived
#[derive(Debug, Default)]
struct Enumeration {
    paths: Vec<Vec<String>>,
    truncated: bool,
    interrupted: bool,
}

impl Enumeration {
    fn is_done(&self) -> bool {
        self.truncated || self.interrupted
    }

    /// Record a path unless the cap is already reached
    fn record(&mut self, path: Vec<String>, max_paths: Option<usize>) {
        if max_paths.is_some_and(|cap| self.paths.len() >= cap) {
            self.truncated = true;
        } else {
            self.paths.push(path);
        }
    }
}

struct Frame<'a> {
    node: &'a str,
    next: usize,
}

/// Enumerate every simple path for every (start, end) pair and derive stats.
///
/// Pairs are visited in the order given. Returns the path info and whether
/// the budget interrupted enumeration.
pub fn analyze_paths<'a>(
    graph: &ProcessGraph<'a>,
    starts: &[&'a str],
    ends: &[&'a str],
    loops: Vec<Loop>,
    max_paths: Option<usize>,
    budget: &Budget,
) -> (PathInfo, bool) {
    let mut enumeration = Enumeration::default();

    'pairs: for &start in starts {
        for &end in ends {
            enumerate_between(graph, start, end, max_paths, budget, &mut enumeration);
            if enumeration.is_done() {
                break 'pairs;
            }
        }
    }

    let interrupted = enumeration.interrupted;
    (summarize(enumeration, loops), interrupted)
}

fn enumerate_between<'a>(
    graph: &ProcessGraph<'a>,
    start: &'a str,
    end: &'a str,
    max_paths: Option<usize>,
    budget: &Budget,
    out: &mut Enumeration,
) {
    if start == end {
        out.record(vec![start.to_string()], max_paths);
        return;
    }

    let mut on_path: HashSet<&str> = HashSet::from([start]);
    let mut stack = vec![Frame {
        node: start,
        next: 0,
    }];
    let mut steps = 0usize;

    while let Some(top) = stack.last_mut() {
        steps += 1;
        if budget.should_stop(steps) {
            out.interrupted = true;
            return;
        }

        let node = top.node;
        let Some(&next) = graph.successors(node).get(top.next) else {
            on_path.remove(node);
            stack.pop();
            continue;
        };
        top.next += 1;

        if next == end {
            let mut path: Vec<String> = stack.iter().map(|f| f.node.to_string()).collect();
            path.push(end.to_string());
            out.record(path, max_paths);
            if out.truncated {
                return;
            }
        } else if on_path.insert(next) {
            stack.push(Frame { node: next, next: 0 });
        }
    }
}

fn summarize(enumeration: Enumeration, loops: Vec<Loop>) -> PathInfo {
    let paths = enumeration.paths;
    let lengths = paths.iter().map(Vec::len);
    let min_path_length = lengths.clone().min().unwrap_or(0);
    let max_path_length = lengths.clone().max().unwrap_or(0);
    let average_path_length = if paths.is_empty() {
        0.0
    } else {
        lengths.sum::<usize>() as f64 / paths.len() as f64
    };
    let critical_path = paths
        .iter()
        .find(|p| p.len() == max_path_length)
        .cloned()
        .unwrap_or_default();

    PathInfo {
        critical_path,
        all_paths: paths,
        loop_detected: !loops.is_empty(),
        loops,
        max_path_length,
        min_path_length,
        average_path_length,
        truncated: enumeration.truncated,
    }
}
