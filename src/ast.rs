//! # Abstract Syntax Tree
//!
//! Nodes produced by the [`analyzer`](crate::analyzer) for one definition file.
//! They are built in a single parse pass and consumed once, usually by
//! [`ContainerNamespace::import_scope`](crate::namespace::ContainerNamespace::import_scope).
//!
//! ```text
//! ScopeNode
//! ├── ParameterDefinitionNode   :env = 'prod'
//! └── ServiceDefinitionNode     override @logger: Acme\Log(@handler, :path)
//!     ├── ArgumentArrayNode     (@handler, :path)
//!     └── ServiceMethodCallNode - setName('app')
//! ```

use serde_json::Value;

use crate::argument::{Argument, ServiceArguments};

/// Ordered list of top-level definitions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScopeNode {
    pub items: Vec<ScopeItem>,
}

impl ScopeNode {
    pub fn add_node(&mut self, item: ScopeItem) {
        self.items.push(item);
    }

    pub fn services(&self) -> impl Iterator<Item = &ServiceDefinitionNode> {
        self.items.iter().filter_map(|item| match item {
            ScopeItem::Service(service) => Some(service),
            ScopeItem::Parameter(_) => None,
        })
    }

    pub fn parameters(&self) -> impl Iterator<Item = &ParameterDefinitionNode> {
        self.items.iter().filter_map(|item| match item {
            ScopeItem::Parameter(parameter) => Some(parameter),
            ScopeItem::Service(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScopeItem {
    Service(ServiceDefinitionNode),
    Parameter(ParameterDefinitionNode),
}

/// `[override] @name: ClassPath[(arguments)]` followed by `- method(...)` lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceDefinitionNode {
    pub name: String,
    pub class_name: String,
    pub is_override: bool,
    /// `None` when the declaration has no parentheses at all
    pub arguments: Option<ArgumentArrayNode>,
    pub construction_actions: Vec<ServiceMethodCallNode>,
}

impl ServiceDefinitionNode {
    pub fn has_arguments(&self) -> bool {
        self.arguments.is_some()
    }
}

/// `:name [= literal]`
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDefinitionNode {
    pub name: String,
    pub value: Option<Value>,
}

/// Positional tagged arguments of a constructor or method call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArgumentArrayNode {
    pub arguments: Vec<Argument>,
}

impl ArgumentArrayNode {
    pub fn new(arguments: Vec<Argument>) -> Self {
        Self { arguments }
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }
}

impl From<ArgumentArrayNode> for ServiceArguments {
    fn from(node: ArgumentArrayNode) -> Self {
        node.arguments.into_iter().collect()
    }
}

/// A post-construction call, `- setLevel(:level)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceMethodCallNode {
    pub name: String,
    pub arguments: ArgumentArrayNode,
}
