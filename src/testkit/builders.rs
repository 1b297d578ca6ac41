//! Fluent process builder for tests.

use crate::model::{
    Activity, ActivityKind, AgentAssignment, Event, EventKind, Gateway, GatewayDirection,
    GatewayKind, Process, ProcessInfo, SequenceFlow,
};

/// Builds a [`Process`] element by element.
///
/// Flows get generated ids (`flow1`, `flow2`, ...) in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ProcessBuilder {
    process: Process,
}

impl ProcessBuilder {
    pub fn new() -> Self {
        let mut process = Process {
            doc_type: "bpmn:process".into(),
            version: "2.0".into(),
            info: ProcessInfo::default(),
        };
        process.info.id = "test_process".into();
        process.info.name = "Test Process".into();
        Self { process }
    }

    pub fn start(self, id: &str) -> Self {
        self.event(id, EventKind::StartEvent)
    }

    pub fn end(self, id: &str) -> Self {
        self.event(id, EventKind::EndEvent)
    }

    pub fn event(mut self, id: &str, kind: EventKind) -> Self {
        self.process.info.elements.events.push(Event {
            id: id.into(),
            name: String::new(),
            kind,
            event_type: None,
        });
        self
    }

    pub fn task(self, id: &str) -> Self {
        self.activity(id, None)
    }

    /// A user task assigned to `agent` (an empty agent id counts as unassigned)
    pub fn assigned_task(self, id: &str, agent: &str) -> Self {
        self.activity(
            id,
            Some(AgentAssignment {
                agent_type: "human".into(),
                id: agent.into(),
                ..AgentAssignment::default()
            }),
        )
    }

    fn activity(mut self, id: &str, agent: Option<AgentAssignment>) -> Self {
        self.process.info.elements.activities.push(Activity {
            id: id.into(),
            name: id.into(),
            kind: ActivityKind::UserTask,
            agent,
        });
        self
    }

    pub fn exclusive(self, id: &str) -> Self {
        self.gateway(id, GatewayKind::Exclusive, None)
    }

    pub fn parallel_split(self, id: &str) -> Self {
        self.gateway(id, GatewayKind::Parallel, Some(GatewayDirection::Diverging))
    }

    pub fn parallel_join(self, id: &str) -> Self {
        self.gateway(id, GatewayKind::Parallel, Some(GatewayDirection::Converging))
    }

    pub fn gateway(
        mut self,
        id: &str,
        kind: GatewayKind,
        direction: Option<GatewayDirection>,
    ) -> Self {
        self.process.info.elements.gateways.push(Gateway {
            id: id.into(),
            name: String::new(),
            kind,
            direction,
        });
        self
    }

    pub fn flow(mut self, source: &str, target: &str) -> Self {
        let flows = &mut self.process.info.elements.sequence_flows;
        flows.push(SequenceFlow {
            id: format!("flow{}", flows.len() + 1),
            name: String::new(),
            source_ref: source.into(),
            target_ref: target.into(),
            condition_expression: None,
        });
        self
    }

    /// Connect consecutive ids with flows
    pub fn chain(self, ids: &[&str]) -> Self {
        ids.windows(2)
            .fold(self, |builder, pair| builder.flow(pair[0], pair[1]))
    }

    pub fn build(self) -> Process {
        self.process
    }
}
