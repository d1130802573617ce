//! Parameters and services collected from one or more definition sources,
//! ready to be imported by a [`ContainerBuilder`](crate::builder::ContainerBuilder).

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use crate::{
    analyzer,
    ast::{ScopeItem, ScopeNode},
    definition::ServiceDefinition,
    InternalResult,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NamespaceError {
    #[error("Service `{0}` is already defined, use `override` to replace it")]
    DuplicateService(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerNamespace {
    parameters: Vec<(String, Value)>,
    services: Vec<(String, ServiceDefinition)>,
}

impl ContainerNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `source` and imports its definitions.
    pub fn parse(&mut self, source: &str) -> InternalResult<()> {
        let scope = analyzer::parse_scope(source)?;
        self.import_scope(scope)?;
        Ok(())
    }

    /// Adds the definitions of a parsed scope. Later parameters win; a service
    /// may only be redefined with `override`. A rejected scope leaves the
    /// namespace untouched.
    pub fn import_scope(&mut self, scope: ScopeNode) -> Result<(), NamespaceError> {
        self.check_scope(&scope)?;
        for item in scope.items {
            match item {
                ScopeItem::Parameter(parameter) => {
                    self.set_parameter(parameter.name, parameter.value.unwrap_or(Value::Null))
                }
                ScopeItem::Service(service) => {
                    let name = service.name.clone();
                    self.set_service(name, ServiceDefinition::from(service));
                }
            }
        }
        Ok(())
    }

    fn check_scope(&self, scope: &ScopeNode) -> Result<(), NamespaceError> {
        let mut defined: HashSet<&str> =
            self.services.iter().map(|(name, _)| name.as_str()).collect();
        for service in scope.services() {
            if !defined.insert(service.name.as_str()) && !service.is_override {
                return Err(NamespaceError::DuplicateService(service.name.clone()));
            }
        }
        Ok(())
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.parameters.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => *existing = value,
            None => self.parameters.push((name, value)),
        }
    }

    pub fn set_service(&mut self, name: impl Into<String>, definition: ServiceDefinition) {
        let name = name.into();
        match self.services.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => *existing = definition,
            None => self.services.push((name, definition)),
        }
    }

    pub fn has_service(&self, name: &str) -> bool {
        self.services.iter().any(|(existing, _)| existing == name)
    }

    pub fn parameters(&self) -> &[(String, Value)] {
        &self.parameters
    }

    pub fn services(&self) -> &[(String, ServiceDefinition)] {
        &self.services
    }
}
