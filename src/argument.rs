//! Tagged constructor and method arguments.
//!
//! A string starting with `@` names a dependency, one starting with `:` names a
//! parameter; everything else is passed through as a raw value.

use std::fmt;

use serde_json::Value;

use crate::container::{Container, ContainerResult, Resolved};

#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Raw(Resolved),
    Parameter(String),
    Dependency(String),
}

impl Argument {
    /// Applies the prefix rule to string values.
    pub fn from_value(value: impl Into<Resolved>) -> Self {
        match value.into() {
            Resolved::Value(Value::String(s)) => {
                if let Some(name) = s.strip_prefix('@') {
                    Argument::Dependency(name.to_string())
                } else if let Some(name) = s.strip_prefix(':') {
                    Argument::Parameter(name.to_string())
                } else {
                    Argument::Raw(Resolved::Value(Value::String(s)))
                }
            }
            other => Argument::Raw(other),
        }
    }

    pub fn raw(value: impl Into<Resolved>) -> Self {
        Argument::Raw(value.into())
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        Argument::Parameter(name.into())
    }

    pub fn dependency(name: impl Into<String>) -> Self {
        Argument::Dependency(name.into())
    }

    pub fn resolve(&self, container: &mut Container) -> ContainerResult<Resolved> {
        match self {
            Argument::Raw(value) => Ok(value.clone()),
            Argument::Parameter(name) => Ok(container.parameter(name)),
            Argument::Dependency(name) => container.get(name),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Raw(Resolved::Value(value)) => write!(f, "{}", value),
            Argument::Raw(other) => write!(f, "{:?}", other),
            Argument::Parameter(name) => write!(f, ":{}", name),
            Argument::Dependency(name) => write!(f, "@{}", name),
        }
    }
}

/// Ordered argument list of a constructor or method call.
#[derive(Debug, Clone, PartialEq, Default, serde::Deserialize)]
#[serde(from = "Vec<Value>")]
pub struct ServiceArguments(Vec<Argument>);

impl ServiceArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Resolved>,
    {
        values.into_iter().map(Argument::from_value).collect()
    }

    pub fn push(&mut self, argument: Argument) {
        self.0.push(argument);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Argument> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Argument] {
        &self.0
    }

    /// Resolves every argument in order against `container`.
    pub fn resolve(&self, container: &mut Container) -> ContainerResult<Vec<Resolved>> {
        self.0.iter().map(|argument| argument.resolve(container)).collect()
    }
}

impl From<Vec<Value>> for ServiceArguments {
    fn from(values: Vec<Value>) -> Self {
        Self::from_values(values)
    }
}

impl From<Vec<Argument>> for ServiceArguments {
    fn from(arguments: Vec<Argument>) -> Self {
        Self(arguments)
    }
}

impl FromIterator<Argument> for ServiceArguments {
    fn from_iter<T: IntoIterator<Item = Argument>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ServiceArguments {
    type Item = Argument;
    type IntoIter = std::vec::IntoIter<Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ServiceArguments {
    type Item = &'a Argument;
    type IntoIter = std::slice::Iter<'a, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prefix_rule() {
        assert_eq!(Argument::from_value("@logger"), Argument::dependency("logger"));
        assert_eq!(Argument::from_value(":path"), Argument::parameter("path"));
        assert_eq!(Argument::from_value("plain"), Argument::raw("plain"));
        assert_eq!(Argument::from_value(42i64), Argument::raw(42i64));
        assert_eq!(
            Argument::from_value(json!(["@a"])),
            Argument::Raw(Resolved::Value(json!(["@a"])))
        );
    }

    #[test]
    fn test_resolve_against_container() {
        let mut container = Container::with_parameters([("path", json!("/var/log"))]);
        container.set("level", "debug").unwrap();

        let arguments =
            ServiceArguments::from_values(vec![json!("@level"), json!(":path"), json!(":missing"), json!(3)]);
        let resolved = arguments.resolve(&mut container).unwrap();

        assert_eq!(
            resolved,
            vec![
                Resolved::from("debug"),
                Resolved::from("/var/log"),
                Resolved::null(),
                Resolved::from(3i64),
            ]
        );
    }

    #[test]
    fn test_self_dependency_resolves_to_container() {
        let mut container = Container::new();
        let resolved = Argument::dependency("container").resolve(&mut container).unwrap();
        assert_eq!(resolved.as_container(), Some(container.id()));
    }

    #[test]
    fn test_deserialize_applies_prefix_rule() {
        let arguments: ServiceArguments = serde_json::from_str(r#"["@engine", ":speed", 1.5]"#).unwrap();
        assert_eq!(
            arguments.as_slice(),
            &[
                Argument::dependency("engine"),
                Argument::parameter("speed"),
                Argument::raw(1.5f64),
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Argument::dependency("a.b").to_string(), "@a.b");
        assert_eq!(Argument::parameter("p").to_string(), ":p");
        assert_eq!(Argument::raw("s").to_string(), "\"s\"");
    }
}
