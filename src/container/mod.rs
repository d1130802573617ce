//! # Runtime Container
//!
//! Resolves services by name. Every registered name holds one [`Binding`],
//! which decides how an instance is produced, and an optional cached instance
//! for shared services.
//!
//! | strategy   | produced by                                  | cached by           |
//! |------------|----------------------------------------------|---------------------|
//! | `Factory`  | closure or definition, on every resolution   | never               |
//! | `Shared`   | closure or definition, on first resolution   | the container       |
//! | `Method`   | a resolver function (generated containers)   | the resolver itself |
//! | `Provider` | a registered [`ServiceProvider`]             | per provider answer |
//!
//! The name `container` is reserved: it always resolves to the container's own
//! identity and can never be bound.
//!
//! ```rust
//! use wirebox::container::{Container, Resolved};
//!
//! let mut container = Container::new();
//! container
//!     .bind_factory_shared("answer", |_| Ok(Resolved::instance(42u32)))
//!     .unwrap();
//!
//! let first = container.get("answer").unwrap();
//! let second = container.get("answer").unwrap();
//! assert!(first.ptr_eq(&second));
//! assert!(container.is_resolved("answer"));
//! ```

pub mod class;
pub mod error;
pub mod provider;
pub mod resolved;

use std::{any::Any, collections::HashMap, fmt, rc::Rc};

use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::definition::ServiceDefinition;

pub use class::{CallArguments, ClassRegistry};
pub use error::{ContainerError, ContainerResult};
pub use provider::{ServiceProvider, ServiceProviderArray};
pub use resolved::{ContainerId, Resolved};

/// Reserved name under which a container exposes itself.
pub const CONTAINER_SERVICE_NAME: &str = "container";

pub type ServiceClosure = Rc<dyn Fn(&mut Container) -> ContainerResult<Resolved>>;

/// Resolver function of a generated container.
pub type MethodResolver = fn(&mut Container) -> ContainerResult<Resolved>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ResolverType {
    Factory,
    Shared,
    Method,
    Provider,
}

/// Payload of a factory binding.
#[derive(Clone)]
pub enum ServiceFactory {
    Closure(ServiceClosure),
    Definition(ServiceDefinition),
    /// A plain value; only valid as the pre-resolved payload of [`Container::set`].
    Value(Resolved),
}

impl ServiceFactory {
    pub fn closure<F>(f: F) -> Self
    where
        F: Fn(&mut Container) -> ContainerResult<Resolved> + 'static,
    {
        ServiceFactory::Closure(Rc::new(f))
    }
}

impl From<ServiceDefinition> for ServiceFactory {
    fn from(definition: ServiceDefinition) -> Self {
        ServiceFactory::Definition(definition)
    }
}

impl From<Resolved> for ServiceFactory {
    fn from(value: Resolved) -> Self {
        ServiceFactory::Value(value)
    }
}

impl fmt::Debug for ServiceFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceFactory::Closure(_) => f.write_str("Closure(..)"),
            ServiceFactory::Definition(definition) => {
                f.debug_tuple("Definition").field(definition).finish()
            }
            ServiceFactory::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

#[derive(Clone)]
pub enum Binding {
    Factory(ServiceFactory),
    Shared(ServiceFactory),
    Method(MethodResolver),
    Provider(Rc<dyn ServiceProvider>),
}

impl Binding {
    pub fn resolver_type(&self) -> ResolverType {
        match self {
            Binding::Factory(_) => ResolverType::Factory,
            Binding::Shared(_) => ResolverType::Shared,
            Binding::Method(_) => ResolverType::Method,
            Binding::Provider(_) => ResolverType::Provider,
        }
    }
}

struct Registration {
    binding: Binding,
    resolved: Option<Resolved>,
}

impl Registration {
    fn new(binding: Binding) -> Self {
        Self {
            binding,
            resolved: None,
        }
    }
}

pub struct Container {
    id: ContainerId,
    parameters: HashMap<String, Value>,
    registrations: HashMap<String, Registration>,
    order: Vec<String>,
    classes: Rc<ClassRegistry>,
    resolving: Vec<String>,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.id)
            .field("services", &self.order)
            .field("parameters", &self.parameters)
            .finish()
    }
}

impl Container {
    pub fn new() -> Self {
        Self {
            id: ContainerId::new(),
            parameters: HashMap::new(),
            registrations: HashMap::new(),
            order: Vec::new(),
            classes: Rc::new(ClassRegistry::new()),
            resolving: Vec::new(),
        }
    }

    pub fn with_parameters<I, K, V>(parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut container = Self::new();
        container.parameters = parameters
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        container
    }

    pub fn with_classes(mut self, classes: Rc<ClassRegistry>) -> Self {
        self.classes = classes;
        self
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn classes(&self) -> &Rc<ClassRegistry> {
        &self.classes
    }

    pub fn self_reference(&self) -> Resolved {
        Resolved::Container(self.id)
    }

    // Resolution

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn get(&mut self, name: &str) -> ContainerResult<Resolved> {
        if name == CONTAINER_SERVICE_NAME {
            return Ok(self.self_reference());
        }

        let binding = {
            let registration = self
                .registrations
                .get(name)
                .ok_or_else(|| ContainerError::UnknownService(name.to_string()))?;
            if let Some(resolved) = &registration.resolved {
                return Ok(resolved.clone());
            }
            registration.binding.clone()
        };

        let (resolved, shared) = self.guarded(name, |container| container.invoke(name, binding))?;
        if shared {
            self.cache(name, resolved.clone());
        }
        Ok(resolved)
    }

    pub fn has(&self, name: &str) -> bool {
        name == CONTAINER_SERVICE_NAME || self.registrations.contains_key(name)
    }

    /// Builds an instance from a definition without registering anything.
    pub fn instantiate(&mut self, definition: &ServiceDefinition) -> ContainerResult<Resolved> {
        let arguments = definition.arguments.resolve(self)?;
        let mut instance = self.construct(&definition.class_name, arguments)?;
        for call in &definition.calls {
            let arguments = call.arguments.resolve(self)?;
            self.call_method(&definition.class_name, &mut instance, &call.method, arguments)?;
        }
        Ok(Resolved::from_boxed(instance))
    }

    fn invoke(&mut self, name: &str, binding: Binding) -> ContainerResult<(Resolved, bool)> {
        match binding {
            Binding::Factory(factory) => Ok((self.call_factory(name, &factory)?, false)),
            Binding::Shared(factory) => Ok((self.call_factory(name, &factory)?, true)),
            // generated resolvers cache shared instances themselves
            Binding::Method(resolver) => Ok((resolver(self)?, false)),
            Binding::Provider(provider) => provider.resolve(name, self),
        }
    }

    fn call_factory(&mut self, name: &str, factory: &ServiceFactory) -> ContainerResult<Resolved> {
        match factory {
            ServiceFactory::Closure(closure) => closure(self),
            ServiceFactory::Definition(definition) => self.instantiate(definition),
            ServiceFactory::Value(_) => Err(ContainerError::invalid_service(
                name,
                "bound value is neither a factory nor a definition",
            )),
        }
    }

    /// Runs `f` with `name` on the resolution stack.
    fn guarded<T>(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut Self) -> ContainerResult<T>,
    ) -> ContainerResult<T> {
        if self.resolving.iter().any(|resolving| resolving == name) {
            let mut chain = self.resolving.clone();
            chain.push(name.to_string());
            tracing::debug!("circular dependency: {}", chain.join(" -> "));
            return Err(ContainerError::CircularDependency(chain));
        }
        self.resolving.push(name.to_string());
        let result = f(self);
        self.resolving.pop();
        result
    }

    fn cache(&mut self, name: &str, resolved: Resolved) {
        if let Some(registration) = self.registrations.get_mut(name) {
            tracing::trace!("caching shared service `{}`", name);
            registration.resolved = Some(resolved);
        }
    }

    // Binding

    /// Binds a closure or definition. A plain value payload is accepted here but
    /// fails with `InvalidService` when resolved.
    pub fn bind(
        &mut self,
        name: &str,
        factory: impl Into<ServiceFactory>,
        shared: bool,
    ) -> ContainerResult<()> {
        let factory = factory.into();
        let binding = if shared {
            Binding::Shared(factory)
        } else {
            Binding::Factory(factory)
        };
        self.insert(name, Registration::new(binding))
    }

    pub fn bind_factory<F>(&mut self, name: &str, factory: F) -> ContainerResult<()>
    where
        F: Fn(&mut Container) -> ContainerResult<Resolved> + 'static,
    {
        self.bind(name, ServiceFactory::closure(factory), false)
    }

    pub fn bind_factory_shared<F>(&mut self, name: &str, factory: F) -> ContainerResult<()>
    where
        F: Fn(&mut Container) -> ContainerResult<Resolved> + 'static,
    {
        self.bind(name, ServiceFactory::closure(factory), true)
    }

    /// Binds `class` by name and returns its definition for further wiring.
    ///
    /// ```rust
    /// # use wirebox::{argument::Argument, container::Container};
    /// let mut container = Container::new();
    /// container
    ///     .bind_class("car", "Acme\\Car", false)
    ///     .unwrap()
    ///     .arguments(vec![Argument::dependency("engine")])
    ///     .call("setColor", vec![Argument::raw("red")]);
    /// ```
    pub fn bind_class(
        &mut self,
        name: &str,
        class: &str,
        shared: bool,
    ) -> ContainerResult<&mut ServiceDefinition> {
        let mut definition = ServiceDefinition::new(class);
        definition.shared(shared);
        self.bind(name, definition, shared)?;

        match self.registrations.get_mut(name).map(|r| &mut r.binding) {
            Some(Binding::Factory(ServiceFactory::Definition(definition)))
            | Some(Binding::Shared(ServiceFactory::Definition(definition))) => Ok(definition),
            _ => Err(ContainerError::invalid_service(name, "definition binding was not stored")),
        }
    }

    pub fn bind_method(&mut self, name: &str, resolver: MethodResolver) -> ContainerResult<()> {
        self.insert(name, Registration::new(Binding::Method(resolver)))
    }

    /// Stores an already resolved shared value.
    pub fn set(&mut self, name: &str, value: impl Into<Resolved>) -> ContainerResult<()> {
        let value = value.into();
        self.insert(
            name,
            Registration {
                binding: Binding::Shared(ServiceFactory::Value(value.clone())),
                resolved: Some(value),
            },
        )
    }

    /// Registers every name the provider lists.
    pub fn register(&mut self, provider: Rc<dyn ServiceProvider>) -> ContainerResult<()> {
        let names = provider.provides();
        if names.iter().any(|name| name == CONTAINER_SERVICE_NAME) {
            return Err(ContainerError::ReservedName(CONTAINER_SERVICE_NAME.to_string()));
        }
        for name in names {
            self.insert(&name, Registration::new(Binding::Provider(Rc::clone(&provider))))?;
        }
        Ok(())
    }

    fn insert(&mut self, name: &str, registration: Registration) -> ContainerResult<()> {
        if name == CONTAINER_SERVICE_NAME {
            return Err(ContainerError::ReservedName(name.to_string()));
        }
        tracing::debug!(
            "binding `{}` as {}",
            name,
            registration.binding.resolver_type()
        );
        if self
            .registrations
            .insert(name.to_string(), registration)
            .is_none()
        {
            self.order.push(name.to_string());
        }
        Ok(())
    }

    // Registration state

    pub fn service_resolver_type(&self, name: &str) -> ContainerResult<ResolverType> {
        self.registrations
            .get(name)
            .map(|registration| registration.binding.resolver_type())
            .ok_or_else(|| ContainerError::UnknownService(name.to_string()))
    }

    /// Registered names in registration order, followed by `container`.
    pub fn available(&self) -> Vec<String> {
        self.order
            .iter()
            .cloned()
            .chain(std::iter::once(CONTAINER_SERVICE_NAME.to_string()))
            .collect()
    }

    pub fn is_resolved(&self, name: &str) -> bool {
        name == CONTAINER_SERVICE_NAME
            || self
                .registrations
                .get(name)
                .is_some_and(|registration| registration.resolved.is_some())
    }

    /// Drops a cached shared instance. Returns whether anything was cached.
    pub fn release(&mut self, name: &str) -> bool {
        let released = self
            .registrations
            .get_mut(name)
            .and_then(|registration| registration.resolved.take())
            .is_some();
        if released {
            tracing::debug!("released `{}`", name);
        }
        released
    }

    /// Deletes a registration. Returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        if self.registrations.remove(name).is_none() {
            return false;
        }
        self.order.retain(|registered| registered != name);
        tracing::debug!("removed `{}`", name);
        true
    }

    // Parameters

    pub fn parameters(&self) -> &HashMap<String, Value> {
        &self.parameters
    }

    pub fn get_parameter(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }

    pub fn parameter_or(&self, name: &str, default: impl Into<Value>) -> Value {
        self.parameters
            .get(name)
            .cloned()
            .unwrap_or_else(|| default.into())
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.parameters.insert(name.into(), value.into());
    }

    /// Parameter value as an argument, `null` when unset.
    pub fn parameter(&self, name: &str) -> Resolved {
        Resolved::Value(self.parameters.get(name).cloned().unwrap_or(Value::Null))
    }

    // Helpers for generated resolvers

    pub fn construct(&self, class: &str, arguments: Vec<Resolved>) -> ContainerResult<Box<dyn Any>> {
        self.classes.construct(class, arguments)
    }

    pub fn call_method(
        &self,
        class: &str,
        instance: &mut Box<dyn Any>,
        method: &str,
        arguments: Vec<Resolved>,
    ) -> ContainerResult<()> {
        self.classes.call(class, instance.as_mut(), method, arguments)
    }

    /// Wraps a constructed instance and caches it when `name` is registered
    /// with a binding that caches (`Shared` or `Method`).
    pub fn share(&mut self, name: &str, instance: Box<dyn Any>) -> Resolved {
        let resolved = Resolved::from_boxed(instance);
        if self.caches(name) {
            self.cache(name, resolved.clone());
        }
        resolved
    }

    /// Returns the cached instance of `name` or produces it with `resolver`.
    ///
    /// When `name` has been rebound to anything other than a method binding,
    /// the current binding wins and resolution goes through [`get`](Self::get).
    pub fn resolve_shared(&mut self, name: &str, resolver: MethodResolver) -> ContainerResult<Resolved> {
        match self.registrations.get(name) {
            Some(Registration {
                resolved: Some(resolved),
                ..
            }) => Ok(resolved.clone()),
            Some(Registration {
                binding: Binding::Method(_),
                ..
            })
            | None => self.guarded(name, resolver),
            Some(_) => self.get(name),
        }
    }

    fn caches(&self, name: &str) -> bool {
        self.registrations.get(name).is_some_and(|registration| {
            matches!(registration.binding, Binding::Shared(_) | Binding::Method(_))
        })
    }
}
