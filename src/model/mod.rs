//! In-memory process definition.
//!
//! These types mirror the JSON process document produced by external
//! tooling. The analysis engine only borrows them; nothing here enforces id
//! uniqueness or referential integrity.

use serde::{Deserialize, Serialize};

/// Root of a process document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Process {
    #[serde(rename = "$type", default)]
    pub doc_type: String,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "process")]
    pub info: ProcessInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub is_executable: bool,
    #[serde(default)]
    pub elements: Elements,
}

/// All flow elements of a process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Elements {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub gateways: Vec<Gateway>,
    #[serde(default)]
    pub sequence_flows: Vec<SequenceFlow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    StartEvent,
    EndEvent,
    IntermediateThrowEvent,
    IntermediateCatchEvent,
    BoundaryEvent,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Trigger sub-type (`message`, `timer`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityKind {
    Task,
    UserTask,
    ServiceTask,
    ScriptTask,
    SendTask,
    ReceiveTask,
    ManualTask,
    BusinessRuleTask,
    CallActivity,
    SubProcess,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentAssignment>,
}

impl Activity {
    /// The agent id this activity is assigned to, ignoring empty ids
    pub fn agent_id(&self) -> Option<&str> {
        self.agent
            .as_ref()
            .map(|agent| agent.id.as_str())
            .filter(|id| !id.is_empty())
    }
}

/// Who performs an activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AgentAssignment {
    #[serde(rename = "type", default)]
    pub agent_type: String,
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GatewayKind {
    #[serde(rename = "exclusiveGateway")]
    Exclusive,
    #[serde(rename = "parallelGateway")]
    Parallel,
    #[serde(rename = "inclusiveGateway")]
    Inclusive,
    #[serde(rename = "eventBasedGateway")]
    EventBased,
    #[serde(rename = "complexGateway")]
    Complex,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayDirection {
    Converging,
    Diverging,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gateway {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: GatewayKind,
    #[serde(
        rename = "gatewayDirection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub direction: Option<GatewayDirection>,
}

impl Gateway {
    pub fn is_parallel_join(&self) -> bool {
        self.kind == GatewayKind::Parallel && self.direction == Some(GatewayDirection::Converging)
    }

    pub fn is_parallel_split(&self) -> bool {
        self.kind == GatewayKind::Parallel && self.direction == Some(GatewayDirection::Diverging)
    }

    /// Name for messages, falling back to the id
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expression {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub body: String,
}

/// Directed edge between two flow elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceFlow {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub source_ref: String,
    pub target_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<Expression>,
}

/// A borrowed view of any flow node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Event(&'a Event),
    Activity(&'a Activity),
    Gateway(&'a Gateway),
}

impl<'a> Node<'a> {
    pub fn id(&self) -> &'a str {
        match *self {
            Node::Event(event) => &event.id,
            Node::Activity(activity) => &activity.id,
            Node::Gateway(gateway) => &gateway.id,
        }
    }
}

impl Process {
    pub fn elements(&self) -> &Elements {
        &self.info.elements
    }

    /// Declared nodes in declaration order: events, activities, gateways
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_>> {
        let elements = self.elements();
        elements
            .events
            .iter()
            .map(Node::Event)
            .chain(elements.activities.iter().map(Node::Activity))
            .chain(elements.gateways.iter().map(Node::Gateway))
    }

    pub fn start_events(&self) -> impl Iterator<Item = &Event> {
        self.events_of(EventKind::StartEvent)
    }

    pub fn end_events(&self) -> impl Iterator<Item = &Event> {
        self.events_of(EventKind::EndEvent)
    }

    fn events_of(&self, kind: EventKind) -> impl Iterator<Item = &Event> {
        self.elements()
            .events
            .iter()
            .filter(move |event| event.kind == kind)
    }
}
