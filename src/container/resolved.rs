use std::{any::Any, fmt, rc::Rc};

use serde_json::Value;
use uuid::Uuid;

/// Identity of one [`Container`](super::Container) instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(Uuid);

impl ContainerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ContainerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container#{}", self.0)
    }
}

/// Anything a container hands out: plain data, a constructed service, or the
/// container's own identity.
#[derive(Clone)]
pub enum Resolved {
    Value(Value),
    Instance(Rc<dyn Any>),
    Container(ContainerId),
}

impl Resolved {
    pub fn null() -> Self {
        Resolved::Value(Value::Null)
    }

    pub fn instance<T: Any>(value: T) -> Self {
        Resolved::Instance(Rc::new(value))
    }

    pub fn from_boxed(instance: Box<dyn Any>) -> Self {
        Resolved::Instance(Rc::from(instance))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Resolved::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_value().and_then(Value::as_i64)
    }

    pub fn as_container(&self) -> Option<ContainerId> {
        match self {
            Resolved::Container(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Resolved::Value(Value::Null))
    }

    /// Typed handle to a service instance, `None` for other variants or types.
    pub fn downcast<T: Any>(&self) -> Option<Rc<T>> {
        match self {
            Resolved::Instance(instance) => Rc::clone(instance).downcast::<T>().ok(),
            _ => None,
        }
    }

    /// Identity comparison. Instances are the same when they share an
    /// allocation; plain values have no identity and compare by value.
    pub fn ptr_eq(&self, other: &Resolved) -> bool {
        match (self, other) {
            (Resolved::Instance(a), Resolved::Instance(b)) => Rc::ptr_eq(a, b),
            (Resolved::Container(a), Resolved::Container(b)) => a == b,
            (Resolved::Value(a), Resolved::Value(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq for Resolved {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Resolved::Instance(_) => f.write_str("Instance(..)"),
            Resolved::Container(id) => f.debug_tuple("Container").field(id).finish(),
        }
    }
}

impl From<Value> for Resolved {
    fn from(value: Value) -> Self {
        Resolved::Value(value)
    }
}

impl From<&str> for Resolved {
    fn from(value: &str) -> Self {
        Resolved::Value(Value::from(value))
    }
}

impl From<String> for Resolved {
    fn from(value: String) -> Self {
        Resolved::Value(Value::from(value))
    }
}

impl From<i64> for Resolved {
    fn from(value: i64) -> Self {
        Resolved::Value(Value::from(value))
    }
}

impl From<f64> for Resolved {
    fn from(value: f64) -> Self {
        Resolved::Value(Value::from(value))
    }
}

impl From<bool> for Resolved {
    fn from(value: bool) -> Self {
        Resolved::Value(Value::from(value))
    }
}

impl From<ContainerId> for Resolved {
    fn from(id: ContainerId) -> Self {
        Resolved::Container(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Engine;

    #[test]
    fn test_instances_compare_by_identity() {
        let a = Resolved::instance(Engine);
        let b = Resolved::instance(Engine);
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
        assert!(a.downcast::<Engine>().is_some());
        assert!(a.downcast::<String>().is_none());
    }

    #[test]
    fn test_values_compare_by_content() {
        assert_eq!(Resolved::from("x"), Resolved::Value(json!("x")));
        assert_ne!(Resolved::from(1i64), Resolved::from(2i64));
        assert!(Resolved::null().is_null());
        assert_eq!(Resolved::from(7i64).as_i64(), Some(7));
    }

    #[test]
    fn test_container_ids_are_unique() {
        let id = ContainerId::new();
        assert_ne!(id, ContainerId::new());
        assert_eq!(Resolved::from(id).as_container(), Some(id));
    }
}
