//! Property-based tests for the analysis engine
//!
//! These tests verify invariants that should hold for all process graphs:
//! - Reachability partitions the known node set
//! - Repeated analysis gives identical results
//! - Parallel and sequential execution agree
//! - Path enumeration respects the cap

use procmap::analysis::{AnalysisLimits, AnalysisOptions, Analyzer};
use procmap::model::{GatewayDirection, GatewayKind, Process};
use procmap::testkit::ProcessBuilder;
use proptest::prelude::*;

/// Node roles assigned by index
fn role(index: usize) -> u8 {
    (index % 5) as u8
}

/// Random process: node 0 is a start event, the last node an end event,
/// the rest a mix of tasks and gateways. Flows are arbitrary and may form
/// cycles, self-loops, and references to undeclared ids.
fn arb_process() -> impl Strategy<Value = Process> {
    (2usize..9).prop_flat_map(|nodes| {
        let flow = (0..nodes + 1, 0..nodes + 1);
        proptest::collection::vec(flow, 0..nodes * 3).prop_map(move |flows| {
            let id = |i: usize| {
                if i == nodes {
                    "phantom".to_string()
                } else {
                    format!("n{}", i)
                }
            };

            let mut builder = ProcessBuilder::new().start(&id(0)).end(&id(nodes - 1));
            for i in 1..nodes - 1 {
                builder = match role(i) {
                    0 => builder.exclusive(&id(i)),
                    1 => builder.parallel_split(&id(i)),
                    2 => builder.parallel_join(&id(i)),
                    3 => builder.gateway(
                        &id(i),
                        GatewayKind::Inclusive,
                        Some(GatewayDirection::Mixed),
                    ),
                    _ => builder.assigned_task(&id(i), if i % 2 == 0 { "even" } else { "odd" }),
                };
            }
            for (source, target) in flows {
                builder = builder.flow(&id(source), &id(target));
            }
            builder.build()
        })
    })
}

proptest! {
    /// Property: every known node is either reachable or unreachable, never both,
    /// and likewise for reaching an end event
    #[test]
    fn prop_reachability_partitions_nodes(process in arb_process()) {
        let analyzer = Analyzer::new(&process);
        let result = analyzer.analyze();
        let reachability = &result.reachability;

        for node in analyzer.graph().nodes() {
            let unreachable = reachability.unreachable_elements.iter().any(|id| id == node);
            let dead_end = reachability.dead_end_elements.iter().any(|id| id == node);
            prop_assert_eq!(reachability.is_reachable(node), !unreachable);
            prop_assert_eq!(reachability.reaches_end(node), !dead_end);
        }
    }

    /// Property: analysis is a pure function of the process
    #[test]
    fn prop_analysis_is_idempotent(process in arb_process()) {
        let first = Analyzer::new(&process).analyze();
        let second = Analyzer::new(&process).analyze();
        prop_assert_eq!(first, second);
    }

    /// Property: running stages on the rayon pool changes nothing
    #[test]
    fn prop_parallel_matches_sequential(process in arb_process()) {
        let sequential = Analyzer::with_options(&process, AnalysisOptions::default()).analyze();
        let parallel =
            Analyzer::with_options(&process, AnalysisOptions::default().parallel(true)).analyze();
        prop_assert_eq!(sequential, parallel);
    }

    /// Property: paths are simple, run start to end, and never exceed the cap
    #[test]
    fn prop_paths_are_simple_and_capped(process in arb_process(), cap in 1usize..6) {
        let options = AnalysisOptions::default().with_limits(AnalysisLimits {
            max_paths: Some(cap),
            timeout: None,
        });
        let result = Analyzer::with_options(&process, options).analyze();
        let paths = &result.paths;

        prop_assert!(paths.path_count() <= cap);
        for path in &paths.all_paths {
            let mut seen = std::collections::HashSet::new();
            prop_assert!(path.iter().all(|id| seen.insert(id)));
            prop_assert_eq!(path.first().map(String::as_str), Some("n0"));
            prop_assert!(path.len() <= paths.max_path_length);
        }
        if paths.path_count() > 0 {
            prop_assert_eq!(paths.critical_path.len(), paths.max_path_length);
        }
    }

    /// Property: every reported loop is a real cycle in the graph
    #[test]
    fn prop_loops_are_cycles(process in arb_process()) {
        let analyzer = Analyzer::new(&process);
        let graph = analyzer.graph();
        let result = analyzer.analyze();

        prop_assert_eq!(result.paths.loop_detected, !result.paths.loops.is_empty());
        for lp in &result.paths.loops {
            prop_assert!(!lp.elements.is_empty());
            let closed = lp.elements.iter().zip(lp.elements.iter().cycle().skip(1));
            for (from, to) in closed {
                prop_assert!(graph.successors(from).contains(&to.as_str()));
            }
        }
    }
}
