//! Forward and reverse adjacency over a process definition.

use crate::model::Process;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Adjacency view of a process, borrowing ids from the definition.
///
/// Every declared node gets an entry before flows are applied. A flow whose
/// endpoint is not declared still creates an entry for that id: such
/// phantom nodes are part of the node set and are reported by
/// [`ProcessGraph::phantoms`]. Keys are kept sorted; successor lists keep
/// flow declaration order.
#[derive(Debug, Clone, Default)]
pub struct ProcessGraph<'a> {
    forward: BTreeMap<&'a str, Vec<&'a str>>,
    reverse: BTreeMap<&'a str, Vec<&'a str>>,
    phantoms: BTreeSet<&'a str>,
    flow_count: usize,
}

impl<'a> ProcessGraph<'a> {
    pub fn build(process: &'a Process) -> Self {
        let mut graph = Self::default();

        for node in process.nodes() {
            graph.forward.entry(node.id()).or_default();
            graph.reverse.entry(node.id()).or_default();
        }

        for flow in &process.elements().sequence_flows {
            let (source, target) = (flow.source_ref.as_str(), flow.target_ref.as_str());
            for endpoint in [source, target] {
                if !graph.forward.contains_key(endpoint) {
                    graph.phantoms.insert(endpoint);
                }
                graph.forward.entry(endpoint).or_default();
                graph.reverse.entry(endpoint).or_default();
            }
            graph.forward.entry(source).or_default().push(target);
            graph.reverse.entry(target).or_default().push(source);
            graph.flow_count += 1;
        }

        graph
    }

    /// All known node ids (declared and phantom), sorted
    pub fn nodes(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.forward.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.forward.len()
    }

    pub fn flow_count(&self) -> usize {
        self.flow_count
    }

    pub fn contains(&self, id: &str) -> bool {
        self.forward.contains_key(id)
    }

    pub fn successors(&self, id: &str) -> &[&'a str] {
        self.forward.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn predecessors(&self, id: &str) -> &[&'a str] {
        self.reverse.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Flow endpoints that are not declared nodes
    pub fn phantoms(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.phantoms.iter().copied()
    }

    /// Number of weakly connected components over all known nodes
    pub fn component_count(&self) -> usize {
        petgraph::algo::connected_components(&self.to_undirected())
    }

    /// Undirected petgraph copy; nodes are inserted in sorted id order
    fn to_undirected(&self) -> UnGraph<&'a str, ()> {
        let mut graph = UnGraph::with_capacity(self.node_count(), self.flow_count);
        let index: HashMap<&'a str, NodeIndex> =
            self.nodes().map(|id| (id, graph.add_node(id))).collect();

        for (source, targets) in &self.forward {
            for target in targets {
                graph.add_edge(index[source], index[target], ());
            }
        }

        graph
    }
}
