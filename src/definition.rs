use serde::Deserialize;

use crate::{
    argument::ServiceArguments,
    ast::{ServiceDefinitionNode, ServiceMethodCallNode},
};

fn default_shared() -> bool {
    true
}

/// A call applied to a freshly constructed service, in declaration order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: ServiceArguments,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: impl Into<ServiceArguments>) -> Self {
        Self {
            method: method.into(),
            arguments: arguments.into(),
        }
    }
}

impl From<ServiceMethodCallNode> for MethodCall {
    fn from(node: ServiceMethodCallNode) -> Self {
        Self {
            method: node.name,
            arguments: node.arguments.into(),
        }
    }
}

/// How to build one service: class, constructor arguments and setup calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDefinition {
    pub class_name: String,
    pub arguments: ServiceArguments,
    pub calls: Vec<MethodCall>,
    pub shared: bool,
}

impl ServiceDefinition {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            arguments: ServiceArguments::new(),
            calls: Vec::new(),
            shared: true,
        }
    }

    pub fn arguments(&mut self, arguments: impl Into<ServiceArguments>) -> &mut Self {
        self.arguments = arguments.into();
        self
    }

    /// Appends a post-construction call.
    pub fn call(&mut self, method: impl Into<String>, arguments: impl Into<ServiceArguments>) -> &mut Self {
        self.calls.push(MethodCall::new(method, arguments));
        self
    }

    pub fn calls(&mut self, calls: impl IntoIterator<Item = MethodCall>) -> &mut Self {
        self.calls.extend(calls);
        self
    }

    pub fn shared(&mut self, shared: bool) -> &mut Self {
        self.shared = shared;
        self
    }
}

impl From<ServiceDefinitionNode> for ServiceDefinition {
    fn from(node: ServiceDefinitionNode) -> Self {
        Self {
            class_name: node.class_name,
            arguments: node.arguments.map(Into::into).unwrap_or_default(),
            calls: node.construction_actions.into_iter().map(Into::into).collect(),
            shared: true,
        }
    }
}

/// Serialized form of a service definition, as found in provider tables and
/// bulk imports.
///
/// ```json
/// { "class": "Acme\\Car", "arguments": ["@engine"], "shared": false,
///   "calls": [{ "method": "setColor", "arguments": ["red"] }] }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceRecord {
    #[serde(rename = "class")]
    pub class_name: String,
    #[serde(default)]
    pub arguments: ServiceArguments,
    #[serde(default = "default_shared")]
    pub shared: bool,
    #[serde(default)]
    pub calls: Vec<MethodCall>,
}

impl ServiceRecord {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            arguments: ServiceArguments::new(),
            shared: true,
            calls: Vec::new(),
        }
    }
}

impl From<ServiceRecord> for ServiceDefinition {
    fn from(record: ServiceRecord) -> Self {
        Self {
            class_name: record.class_name,
            arguments: record.arguments,
            calls: record.calls,
            shared: record.shared,
        }
    }
}
