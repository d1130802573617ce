//! Name-addressed constructors and methods.
//!
//! Definitions, providers and generated resolvers refer to classes by their
//! path string (`Acme\Log`). A [`ClassRegistry`] maps those strings to typed
//! Rust constructors and setter-style methods.
//!
//! ```rust
//! use wirebox::container::class::ClassRegistry;
//!
//! struct Engine {
//!     speed: i64,
//! }
//!
//! let mut classes = ClassRegistry::new();
//! classes
//!     .class("Engine", |args| Ok(Engine { speed: args.int(0)? }))
//!     .method("setSpeed", |engine: &mut Engine, args| {
//!         engine.speed = args.int(0)?;
//!         Ok(())
//!     });
//! assert!(classes.has_method("Engine", "setSpeed"));
//! ```

use std::{any::Any, collections::HashMap, marker::PhantomData, rc::Rc};

use serde_json::Value;

use super::{
    error::{ContainerError, ContainerResult},
    resolved::{ContainerId, Resolved},
};

type Constructor = Rc<dyn Fn(CallArguments) -> ContainerResult<Box<dyn Any>>>;
type Method = Rc<dyn Fn(&mut dyn Any, CallArguments) -> ContainerResult<()>>;

struct ClassEntry {
    constructor: Constructor,
    methods: HashMap<String, Method>,
}

#[derive(Default)]
pub struct ClassRegistry {
    classes: HashMap<String, ClassEntry>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a class. Methods are attached through the
    /// returned handle.
    pub fn class<T, F>(&mut self, name: impl Into<String>, constructor: F) -> ClassHandle<'_, T>
    where
        T: Any,
        F: Fn(CallArguments) -> ContainerResult<T> + 'static,
    {
        let name = name.into();
        let constructor: Constructor =
            Rc::new(move |args| constructor(args).map(|instance| Box::new(instance) as Box<dyn Any>));
        let entry = self.classes.entry(name.clone()).or_insert_with(|| ClassEntry {
            constructor: Rc::clone(&constructor),
            methods: HashMap::new(),
        });
        entry.constructor = constructor;
        ClassHandle {
            class: name,
            entry,
            _marker: PhantomData,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    pub fn has_method(&self, class: &str, method: &str) -> bool {
        self.classes
            .get(class)
            .is_some_and(|entry| entry.methods.contains_key(method))
    }

    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn construct(&self, class: &str, arguments: Vec<Resolved>) -> ContainerResult<Box<dyn Any>> {
        let entry = self
            .classes
            .get(class)
            .ok_or_else(|| ContainerError::UnknownClass(class.to_string()))?;
        tracing::trace!("constructing `{}` with {} arguments", class, arguments.len());
        (entry.constructor)(CallArguments::new(class, arguments))
    }

    pub fn call(
        &self,
        class: &str,
        instance: &mut dyn Any,
        method: &str,
        arguments: Vec<Resolved>,
    ) -> ContainerResult<()> {
        let entry = self
            .classes
            .get(class)
            .ok_or_else(|| ContainerError::UnknownClass(class.to_string()))?;
        let method_fn = entry
            .methods
            .get(method)
            .ok_or_else(|| ContainerError::UnknownMethod {
                class: class.to_string(),
                method: method.to_string(),
            })?;
        method_fn(instance, CallArguments::new(format!("{}::{}", class, method), arguments))
    }
}

impl std::fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassRegistry")
            .field("classes", &self.class_names())
            .finish()
    }
}

/// Returned by [`ClassRegistry::class`] to attach methods to the class.
pub struct ClassHandle<'a, T> {
    class: String,
    entry: &'a mut ClassEntry,
    _marker: PhantomData<T>,
}

impl<T: Any> ClassHandle<'_, T> {
    pub fn method<F>(self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&mut T, CallArguments) -> ContainerResult<()> + 'static,
    {
        let name = name.into();
        let target = format!("{}::{}", self.class, name);
        let method: Method = Rc::new(move |instance: &mut dyn Any, args| {
            let receiver = instance.downcast_mut::<T>().ok_or_else(|| {
                ContainerError::invalid_argument(
                    target.clone(),
                    format!("receiver is not a `{}`", std::any::type_name::<T>()),
                )
            })?;
            method(receiver, args)
        });
        self.entry.methods.insert(name, method);
        self
    }
}

/// Positional arguments handed to constructors and methods.
#[derive(Debug, Clone)]
pub struct CallArguments {
    target: String,
    values: Vec<Resolved>,
}

impl CallArguments {
    pub fn new(target: impl Into<String>, values: Vec<Resolved>) -> Self {
        Self {
            target: target.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> ContainerResult<&Resolved> {
        self.values
            .get(index)
            .ok_or_else(|| self.invalid(index, "missing"))
    }

    pub fn value(&self, index: usize) -> ContainerResult<&Value> {
        self.get(index)?
            .as_value()
            .ok_or_else(|| self.invalid(index, "expected a plain value"))
    }

    pub fn string(&self, index: usize) -> ContainerResult<String> {
        self.value(index)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.invalid(index, "expected a string"))
    }

    pub fn int(&self, index: usize) -> ContainerResult<i64> {
        self.value(index)?
            .as_i64()
            .ok_or_else(|| self.invalid(index, "expected an integer"))
    }

    pub fn float(&self, index: usize) -> ContainerResult<f64> {
        self.value(index)?
            .as_f64()
            .ok_or_else(|| self.invalid(index, "expected a number"))
    }

    pub fn bool(&self, index: usize) -> ContainerResult<bool> {
        self.value(index)?
            .as_bool()
            .ok_or_else(|| self.invalid(index, "expected a boolean"))
    }

    pub fn instance<T: Any>(&self, index: usize) -> ContainerResult<Rc<T>> {
        self.get(index)?.downcast::<T>().ok_or_else(|| {
            self.invalid(
                index,
                &format!("expected an instance of `{}`", std::any::type_name::<T>()),
            )
        })
    }

    pub fn container(&self, index: usize) -> ContainerResult<ContainerId> {
        self.get(index)?
            .as_container()
            .ok_or_else(|| self.invalid(index, "expected the container"))
    }

    pub fn into_vec(self) -> Vec<Resolved> {
        self.values
    }

    fn invalid(&self, index: usize, reason: &str) -> ContainerError {
        ContainerError::invalid_argument(
            self.target.clone(),
            format!("argument {}: {}", index, reason),
        )
    }
}
