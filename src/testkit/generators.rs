//! Synthetic topologies for stress tests and benches.

use super::ProcessBuilder;
use crate::model::Process;

/// start -> t1 -> ... -> tn -> end
pub fn linear_chain(tasks: usize) -> Process {
    let ids: Vec<String> = (1..=tasks).map(|i| format!("t{}", i)).collect();
    let mut builder = ProcessBuilder::new().start("start").end("end");
    for id in &ids {
        builder = builder.task(id);
    }

    let mut chain = vec!["start"];
    chain.extend(ids.iter().map(String::as_str));
    chain.push("end");
    builder.chain(&chain).build()
}

/// `layers` parallel split/join diamonds in sequence.
///
/// Each diamond doubles the number of start-to-end paths, so the result
/// has `2^layers` paths.
pub fn layered_diamonds(layers: usize) -> Process {
    let mut builder = ProcessBuilder::new().start("start").end("end");
    let mut previous = "start".to_string();

    for layer in 0..layers {
        let split = format!("split{}", layer);
        let join = format!("join{}", layer);
        let left = format!("left{}", layer);
        let right = format!("right{}", layer);

        builder = builder
            .parallel_split(&split)
            .parallel_join(&join)
            .task(&left)
            .task(&right)
            .flow(&previous, &split)
            .flow(&split, &left)
            .flow(&split, &right)
            .flow(&left, &join)
            .flow(&right, &join);
        previous = join;
    }

    builder.flow(&previous, "end").build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_chain_shape() {
        let process = linear_chain(3);
        assert_eq!(process.elements().activities.len(), 3);
        assert_eq!(process.elements().sequence_flows.len(), 4);
    }

    #[test]
    fn test_layered_diamonds_shape() {
        let process = layered_diamonds(2);
        assert_eq!(process.elements().gateways.len(), 4);
        assert_eq!(process.elements().sequence_flows.len(), 11);
    }
}
