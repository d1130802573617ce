//! # Container Builder
//!
//! Collects service definitions and parameters and emits Rust source for a
//! container type whose services are wired by dedicated resolver functions.
//!
//! ```rust
//! use wirebox::{
//!     argument::{Argument, ServiceArguments},
//!     builder::ContainerBuilder,
//! };
//!
//! let mut builder = ContainerBuilder::new("app::AppContainer").unwrap();
//! builder.add("engine", "Acme\\Engine", ServiceArguments::new(), false).unwrap();
//! builder
//!     .add("car", "Acme\\Car", vec![Argument::dependency("engine")], true)
//!     .unwrap()
//!     .call("setColor", vec![Argument::raw("red")]);
//!
//! let source = builder.generate().unwrap();
//! assert!(source.contains("resolveCar"));
//! ```
//!
//! The generated type wraps a runtime [`Container`](crate::container::Container)
//! and derefs to it. Its constructor binds every declared service with the
//! [`Method`](crate::container::ResolverType::Method) strategy:
//!
//! ```text
//! pub mod app {
//!     pub struct AppContainer { container: Container }
//!     impl AppContainer {
//!         pub const SERVICE_RESOLVER_TYPE: &[(&str, ResolverType)] = ...;
//!         pub const RESOLVER_METHODS: &[(&str, &str)] = ...;
//!         pub fn new(classes: Rc<ClassRegistry>) -> Result<Self, ContainerError>;
//!         pub fn default_parameters() -> Vec<(&'static str, Value)>;
//!         pub fn resolveEngine(container: &mut Container) -> Result<Resolved, ContainerError>;
//!         pub fn resolveCar(container: &mut Container) -> Result<Resolved, ContainerError>;
//!     }
//! }
//! ```

pub mod naming;
pub mod render;

use std::collections::{HashMap, HashSet};

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use serde_json::Value;
use thiserror::Error;

use crate::{
    argument::{Argument, ServiceArguments},
    config::GeneratorConfig,
    definition::{ServiceDefinition, ServiceRecord},
    namespace::ContainerNamespace,
};

use naming::{is_valid_service_name, parse_container_name, validate_service_name, MethodNames};
use render::{CodeGen, RenderContext, ResolverTarget};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuilderError {
    #[error("Invalid container name `{0}`")]
    InvalidContainerName(String),
    #[error("Invalid service name `{0}`")]
    InvalidServiceName(String),
    #[error("Invalid parameter name `{0}`")]
    InvalidParameterName(String),
    #[error("Invalid reference `{0}`")]
    InvalidReference(String),
    #[error("Argument {argument} of service `{service}` cannot be rendered as a literal")]
    UnrenderableArgument { service: String, argument: String },
    #[error("Invalid runtime path `{0}`")]
    InvalidRuntimePath(String),
    #[error("Generated code does not parse: {0}")]
    InvalidOutput(String),
    #[error("Circular dependency between unshared services: {}", .0.join(" -> "))]
    CircularDependency(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct ContainerBuilder {
    config: GeneratorConfig,
    /// Module path segments followed by the type name
    name: Vec<String>,
    services: Vec<(String, ServiceDefinition)>,
    parameters: Vec<(String, Value)>,
}

impl ContainerBuilder {
    pub fn new(container_name: &str) -> Result<Self, BuilderError> {
        Ok(Self {
            config: GeneratorConfig::default(),
            name: parse_container_name(container_name)?,
            services: Vec::new(),
            parameters: Vec::new(),
        })
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_container_name(&mut self, container_name: &str) -> Result<(), BuilderError> {
        self.name = parse_container_name(container_name)?;
        Ok(())
    }

    pub fn container_name(&self) -> String {
        self.name.join("::")
    }

    /// Records `definition` under `name`. Re-adding a name replaces the
    /// definition in place; the service keeps its original position.
    pub fn add_service(
        &mut self,
        name: &str,
        mut definition: ServiceDefinition,
        shared: bool,
    ) -> Result<&mut ServiceDefinition, BuilderError> {
        validate_service_name(name)?;
        definition.shared = shared;

        let index = match self.services.iter().position(|(existing, _)| existing == name) {
            Some(index) => {
                tracing::debug!("replacing service `{}`", name);
                self.services[index].1 = definition;
                index
            }
            None => {
                self.services.push((name.to_string(), definition));
                self.services.len() - 1
            }
        };
        Ok(&mut self.services[index].1)
    }

    /// Adds a service of `class_name`. The returned definition accepts further
    /// method calls.
    pub fn add(
        &mut self,
        name: &str,
        class_name: &str,
        arguments: impl Into<ServiceArguments>,
        shared: bool,
    ) -> Result<&mut ServiceDefinition, BuilderError> {
        let mut definition = ServiceDefinition::new(class_name);
        definition.arguments(arguments);
        self.add_service(name, definition, shared)
    }

    /// Adds services from records, in iteration order. Every name is checked
    /// before anything is added.
    pub fn add_array<I, K>(&mut self, records: I) -> Result<(), BuilderError>
    where
        I: IntoIterator<Item = (K, ServiceRecord)>,
        K: AsRef<str>,
    {
        let records: Vec<(K, ServiceRecord)> = records.into_iter().collect();
        for (name, _) in &records {
            validate_service_name(name.as_ref())?;
        }
        for (name, record) in records {
            let shared = record.shared;
            self.add_service(name.as_ref(), ServiceDefinition::from(record), shared)?;
        }
        Ok(())
    }

    /// Copies the parameters and services of `namespace`. Every name is
    /// checked before anything is copied.
    pub fn import_namespace(&mut self, namespace: &ContainerNamespace) -> Result<(), BuilderError> {
        for (name, _) in namespace.parameters() {
            if !is_valid_service_name(name) {
                return Err(BuilderError::InvalidParameterName(name.clone()));
            }
        }
        for (name, _) in namespace.services() {
            validate_service_name(name)?;
        }

        for (name, value) in namespace.parameters() {
            self.set_parameter(name, value.clone())?;
        }
        for (name, definition) in namespace.services() {
            self.add_service(name, definition.clone(), definition.shared)?;
        }
        Ok(())
    }

    pub fn set_parameter(&mut self, name: &str, value: impl Into<Value>) -> Result<(), BuilderError> {
        if !is_valid_service_name(name) {
            return Err(BuilderError::InvalidParameterName(name.to_string()));
        }
        let value = value.into();
        match self.parameters.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, existing)) => *existing = value,
            None => self.parameters.push((name.to_string(), value)),
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ServiceDefinition> {
        self.services
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, definition)| definition)
    }

    pub fn services(&self) -> &[(String, ServiceDefinition)] {
        &self.services
    }

    pub fn service_names(&self) -> Vec<&str> {
        self.services.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn shared_names(&self) -> Vec<&str> {
        self.services
            .iter()
            .filter(|(_, definition)| definition.shared)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn parameters(&self) -> &[(String, Value)] {
        &self.parameters
    }

    /// Service name and resolver method name, in declaration order.
    pub fn resolver_methods(&self) -> Vec<(&str, String)> {
        let mut names = MethodNames::new();
        self.services
            .iter()
            .map(|(name, _)| (name.as_str(), names.assign(name)))
            .collect()
    }

    /// Generated source as a string. The output is validated as a Rust file.
    pub fn generate(&self) -> Result<String, BuilderError> {
        let tokens = self.generate_tokens()?;
        syn::parse_file(&tokens.to_string())
            .map_err(|e| BuilderError::InvalidOutput(e.to_string()))?;
        Ok(tokens.to_string())
    }

    #[tracing::instrument(level = "debug", skip(self), fields(container = %self.container_name()))]
    pub fn generate_tokens(&self) -> Result<TokenStream, BuilderError> {
        let runtime: syn::Path = syn::parse_str(&self.config.runtime_path)
            .map_err(|_| BuilderError::InvalidRuntimePath(self.config.runtime_path.clone()))?;

        self.check_unshared_cycles()?;

        let methods = self.resolver_methods();
        let targets: HashMap<String, ResolverTarget> = self
            .services
            .iter()
            .zip(&methods)
            .map(|((name, definition), (_, method))| {
                (
                    name.clone(),
                    ResolverTarget {
                        method: method.clone(),
                        shared: definition.shared,
                    },
                )
            })
            .collect();
        let ctx = RenderContext {
            runtime: &runtime,
            targets: &targets,
        };

        let resolvers = self
            .services
            .iter()
            .zip(&methods)
            .map(|((name, definition), (_, method))| self.render_resolver(&ctx, name, definition, method))
            .collect::<Result<Vec<_>, _>>()?;

        let (type_name, modules) = match self.name.split_last() {
            Some((type_name, modules)) => (format_ident!("{}", type_name), modules),
            None => return Err(BuilderError::InvalidContainerName(String::new())),
        };

        let service_names: Vec<&str> = methods.iter().map(|(name, _)| *name).collect();
        let method_names: Vec<&str> = methods.iter().map(|(_, method)| method.as_str()).collect();
        let method_idents: Vec<_> = method_names.iter().map(|m| format_ident!("{}", m)).collect();

        let parameter_names = self.parameters.iter().map(|(name, _)| name);
        let parameter_values = self.parameters.iter().map(|(_, value)| value.generate_rust());

        let derive_debug = self.config.derive_debug.then(|| quote! { #[derive(Debug)] });

        let body = quote! {
            #derive_debug
            pub struct #type_name {
                container: #runtime::Container,
            }

            impl ::std::ops::Deref for #type_name {
                type Target = #runtime::Container;

                fn deref(&self) -> &#runtime::Container {
                    &self.container
                }
            }

            impl ::std::ops::DerefMut for #type_name {
                fn deref_mut(&mut self) -> &mut #runtime::Container {
                    &mut self.container
                }
            }

            #[allow(non_snake_case)]
            impl #type_name {
                pub const SERVICE_RESOLVER_TYPE: &'static [(&'static str, #runtime::ResolverType)] = &[
                    #((#service_names, #runtime::ResolverType::Method)),*
                ];

                pub const RESOLVER_METHODS: &'static [(&'static str, &'static str)] = &[
                    #((#service_names, #method_names)),*
                ];

                pub fn new(
                    classes: ::std::rc::Rc<#runtime::ClassRegistry>,
                ) -> ::std::result::Result<Self, #runtime::ContainerError> {
                    let mut container = #runtime::Container::with_parameters(Self::default_parameters())
                        .with_classes(classes);
                    #(container.bind_method(#service_names, Self::#method_idents)?;)*
                    Ok(Self { container })
                }

                pub fn default_parameters() -> ::std::vec::Vec<(&'static str, #runtime::serde_json::Value)> {
                    vec![
                        #((#parameter_names, #runtime::serde_json::json!(#parameter_values))),*
                    ]
                }

                pub fn into_inner(self) -> #runtime::Container {
                    self.container
                }

                #(#resolvers)*
            }
        };

        let tokens = modules.iter().rev().fold(body, |inner, module| {
            let module = format_ident!("{}", module);
            quote! {
                #[allow(non_snake_case)]
                pub mod #module {
                    #inner
                }
            }
        });

        syn::parse2::<syn::File>(tokens.clone())
            .map_err(|e| BuilderError::InvalidOutput(e.to_string()))?;
        tracing::debug!("generated {} resolvers", self.services.len());
        Ok(tokens)
    }

    /// Unshared services call each other's resolvers directly, without the
    /// runtime resolution guard, so a cycle made only of unshared services is
    /// rejected here. Any shared service on the path is guarded at runtime.
    fn check_unshared_cycles(&self) -> Result<(), BuilderError> {
        let unshared: HashMap<&str, &ServiceDefinition> = self
            .services
            .iter()
            .filter(|(_, definition)| !definition.shared)
            .map(|(name, definition)| (name.as_str(), definition))
            .collect();

        let mut done = HashSet::new();
        for (name, definition) in &self.services {
            if !definition.shared {
                visit_unshared(name, &unshared, &mut Vec::new(), &mut done)?;
            }
        }
        Ok(())
    }

    fn render_resolver(
        &self,
        ctx: &RenderContext,
        name: &str,
        definition: &ServiceDefinition,
        method: &str,
    ) -> Result<TokenStream, BuilderError> {
        let runtime = ctx.runtime;
        let method = format_ident!("{}", method);
        let class_name = &definition.class_name;
        let arguments = ctx.render_arguments(name, &definition.arguments)?;

        let calls = definition
            .calls
            .iter()
            .map(|call| {
                let call_method = &call.method;
                let call_arguments = ctx.render_arguments(name, &call.arguments)?;
                Ok(quote! {
                    {
                        let arguments = #call_arguments;
                        container.call_method(#class_name, &mut instance, #call_method, arguments)?;
                    }
                })
            })
            .collect::<Result<Vec<_>, BuilderError>>()?;

        let binding = if calls.is_empty() {
            quote! { let instance }
        } else {
            quote! { let mut instance }
        };

        let result = if definition.shared {
            quote! { container.share(#name, instance) }
        } else {
            quote! { #runtime::Resolved::from_boxed(instance) }
        };

        Ok(quote! {
            pub fn #method(
                container: &mut #runtime::Container,
            ) -> ::std::result::Result<#runtime::Resolved, #runtime::ContainerError> {
                let arguments = #arguments;
                #binding = container.construct(#class_name, arguments)?;
                #(#calls)*
                Ok(#result)
            }
        })
    }
}

fn visit_unshared<'a>(
    name: &'a str,
    unshared: &HashMap<&'a str, &'a ServiceDefinition>,
    path: &mut Vec<&'a str>,
    done: &mut HashSet<&'a str>,
) -> Result<(), BuilderError> {
    if done.contains(name) {
        return Ok(());
    }
    if let Some(start) = path.iter().position(|seen| *seen == name) {
        let mut cycle: Vec<String> = path[start..].iter().map(|seen| seen.to_string()).collect();
        cycle.push(name.to_string());
        return Err(BuilderError::CircularDependency(cycle));
    }
    let Some(&definition) = unshared.get(name) else {
        return Ok(());
    };

    path.push(name);
    let arguments = definition
        .arguments
        .iter()
        .chain(definition.calls.iter().flat_map(|call| call.arguments.iter()));
    for argument in arguments {
        if let Argument::Dependency(dependency) = argument {
            visit_unshared(dependency, unshared, path, done)?;
        }
    }
    path.pop();
    done.insert(name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::Argument;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn car_builder() -> ContainerBuilder {
        let mut builder = ContainerBuilder::new("CarContainer").unwrap();
        builder.add("car", "Car", vec![Argument::dependency("engine")], true).unwrap();
        builder.add("producer", "Producer", ServiceArguments::new(), true).unwrap();
        builder.add("engine", "Engine", ServiceArguments::new(), false).unwrap();
        builder
    }

    #[test]
    fn test_service_and_shared_names() {
        let builder = car_builder();
        assert_eq!(builder.service_names(), vec!["car", "producer", "engine"]);
        assert_eq!(builder.shared_names(), vec!["car", "producer"]);
    }

    #[test]
    fn test_invalid_names() {
        assert_eq!(
            ContainerBuilder::new("").err(),
            Some(BuilderError::InvalidContainerName(String::new()))
        );
        let mut builder = car_builder();
        assert!(builder.set_container_name("My Container").is_err());
        assert_eq!(builder.container_name(), "CarContainer");

        for name in ["", "1foo", ".foo", "foo.", "_foo", "foo_", "foo bar", "container"] {
            assert_eq!(
                builder.add(name, "Foo", ServiceArguments::new(), true).err(),
                Some(BuilderError::InvalidServiceName(name.to_string()))
            );
        }
        assert!(builder.set_parameter("bad name", 1).is_err());
    }

    #[test]
    fn test_readding_keeps_position() {
        let mut builder = car_builder();
        builder.add("car", "SportsCar", ServiceArguments::new(), false).unwrap();

        assert_eq!(builder.service_names(), vec!["car", "producer", "engine"]);
        assert_eq!(builder.get("car").unwrap().class_name, "SportsCar");
        assert_eq!(builder.shared_names(), vec!["producer"]);
    }

    #[test]
    fn test_add_array_preserves_order() {
        let mut builder = ContainerBuilder::new("C").unwrap();
        let records: Vec<(String, ServiceRecord)> = serde_json::from_value(json!([
            ["b", { "class": "B", "shared": false }],
            ["a", { "class": "A", "arguments": ["@b"], "calls": [{ "method": "init" }] }]
        ]))
        .unwrap();
        builder.add_array(records).unwrap();

        assert_eq!(builder.service_names(), vec!["b", "a"]);
        assert_eq!(builder.shared_names(), vec!["a"]);
        assert_eq!(builder.get("a").unwrap().calls[0].method, "init");
    }

    #[test]
    fn test_rejected_array_adds_nothing() {
        let mut builder = car_builder();
        let records = vec![
            ("wheel", ServiceRecord::new("Wheel")),
            ("car", ServiceRecord::new("SportsCar")),
            ("bad name", ServiceRecord::new("Broken")),
        ];

        assert_eq!(
            builder.add_array(records).err(),
            Some(BuilderError::InvalidServiceName("bad name".to_string()))
        );
        assert_eq!(builder.service_names(), vec!["car", "producer", "engine"]);
        assert_eq!(builder.get("car").unwrap().class_name, "Car");
    }

    #[test]
    fn test_rejected_namespace_imports_nothing() {
        let mut namespace = ContainerNamespace::new();
        namespace.parse(":color = 'red'\n@wheel: Wheel\n@container: Box").unwrap();

        let mut builder = car_builder();
        assert_eq!(
            builder.import_namespace(&namespace).err(),
            Some(BuilderError::InvalidServiceName("container".to_string()))
        );
        assert_eq!(builder.service_names(), vec!["car", "producer", "engine"]);
        assert!(builder.parameters().is_empty());
    }

    #[test]
    fn test_import_namespace() {
        let mut namespace = ContainerNamespace::new();
        namespace
            .parse(":color = 'red'\n@car: Car(@engine, :color)\n@engine: Engine")
            .unwrap();
        let before = namespace.clone();

        let mut builder = ContainerBuilder::new("C").unwrap();
        builder.import_namespace(&namespace).unwrap();

        assert_eq!(namespace, before);
        assert_eq!(builder.service_names(), vec!["car", "engine"]);
        assert_eq!(builder.parameters(), &[("color".to_string(), json!("red"))]);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let builder = car_builder();
        assert_eq!(builder.generate().unwrap(), builder.generate().unwrap());
    }

    #[test]
    fn test_resolver_method_collisions() {
        let mut builder = ContainerBuilder::new("C").unwrap();
        for name in ["foo.bar", "fooBar", "foo_bar", "foo__bar"] {
            builder.add(name, "Foo", ServiceArguments::new(), true).unwrap();
        }
        let methods: Vec<String> = builder.resolver_methods().into_iter().map(|(_, m)| m).collect();
        assert_eq!(
            methods,
            vec!["resolveFooBar", "resolveFooBar1", "resolveFooBar2", "resolveFooBar3"]
        );
        let source = builder.generate().unwrap();
        assert!(source.contains("pub fn resolveFooBar3"));
    }

    #[test]
    fn test_generated_resolver_bodies() {
        let mut builder = ContainerBuilder::new("C").unwrap();
        builder.add("engine", "Engine", ServiceArguments::new(), false).unwrap();
        builder
            .add(
                "car",
                "Car",
                vec![Argument::dependency("engine"), Argument::dependency("container")],
                true,
            )
            .unwrap()
            .call("setColor", vec![Argument::parameter("color")]);

        let file = syn::parse2::<syn::File>(builder.generate_tokens().unwrap()).unwrap();
        let source = quote! { #file }.to_string();

        let expected_car = quote! {
            pub fn resolveCar(
                container: &mut ::wirebox::Container,
            ) -> ::std::result::Result<::wirebox::Resolved, ::wirebox::ContainerError> {
                let arguments = vec![Self::resolveEngine(container)?, container.self_reference()];
                let mut instance = container.construct("Car", arguments)?;
                {
                    let arguments = vec![container.parameter("color")];
                    container.call_method("Car", &mut instance, "setColor", arguments)?;
                }
                Ok(container.share("car", instance))
            }
        };
        let expected_engine = quote! {
            pub fn resolveEngine(
                container: &mut ::wirebox::Container,
            ) -> ::std::result::Result<::wirebox::Resolved, ::wirebox::ContainerError> {
                let arguments = vec![];
                let instance = container.construct("Engine", arguments)?;
                Ok(::wirebox::Resolved::from_boxed(instance))
            }
        };
        assert!(source.contains(&expected_car.to_string()));
        assert!(source.contains(&expected_engine.to_string()));
        assert!(!source.contains("container.get"));
    }

    #[test]
    fn test_undeclared_dependency_uses_lookup() {
        let mut builder = ContainerBuilder::new("C").unwrap();
        builder.add("car", "Car", vec![Argument::dependency("driver")], true).unwrap();
        let source = builder.generate().unwrap();
        assert!(source.contains(&quote! { container.get("driver")? }.to_string()));
    }

    #[test]
    fn test_module_path() {
        let builder = ContainerBuilder::new("app::di::AppContainer").unwrap();
        let file = syn::parse_file(&builder.generate().unwrap()).unwrap();

        let syn::Item::Mod(app) = &file.items[0] else {
            panic!("expected a module");
        };
        assert_eq!(app.ident, "app");
        let (_, items) = app.content.as_ref().unwrap();
        assert!(matches!(&items[0], syn::Item::Mod(di) if di.ident == "di"));

        let flat = ContainerBuilder::new("AppContainer").unwrap().generate().unwrap();
        assert!(!flat.contains("pub mod"));
    }

    #[test]
    fn test_parameters_and_runtime_path() {
        let mut builder = ContainerBuilder::new("C").unwrap().with_config(GeneratorConfig {
            runtime_path: "crate::di".to_string(),
            derive_debug: true,
        });
        builder.set_parameter("env", "prod").unwrap();

        let source = builder.generate().unwrap();
        assert!(source.contains(&quote! { ("env", crate::di::serde_json::json!("prod")) }.to_string()));
        assert!(source.contains("derive (Debug)"));

        let broken = builder.with_config(GeneratorConfig {
            runtime_path: "not a path".to_string(),
            derive_debug: false,
        });
        assert_eq!(
            broken.generate().err(),
            Some(BuilderError::InvalidRuntimePath("not a path".to_string()))
        );
    }

    #[test]
    fn test_invalid_reference_fails_generation() {
        let mut builder = ContainerBuilder::new("C").unwrap();
        builder
            .add("car", "Car", ServiceArguments::from_values(vec!["@42"]), true)
            .unwrap();
        assert_eq!(
            builder.generate().err(),
            Some(BuilderError::InvalidReference("@42".to_string()))
        );
    }

    #[test]
    fn test_unshared_cycle_fails_generation() {
        let mut builder = ContainerBuilder::new("C").unwrap();
        builder
            .add("node", "Node", vec![Argument::dependency("node")], false)
            .unwrap();
        assert_eq!(
            builder.generate().err(),
            Some(BuilderError::CircularDependency(vec![
                "node".to_string(),
                "node".to_string()
            ]))
        );

        let mut builder = ContainerBuilder::new("C").unwrap();
        builder
            .add("car", "Car", vec![Argument::dependency("engine")], false)
            .unwrap();
        builder
            .add("engine", "Engine", ServiceArguments::new(), false)
            .unwrap()
            .call("setCar", vec![Argument::dependency("car")]);
        assert_eq!(
            builder.generate().err(),
            Some(BuilderError::CircularDependency(vec![
                "car".to_string(),
                "engine".to_string(),
                "car".to_string()
            ]))
        );
    }

    #[test]
    fn test_shared_service_breaks_generated_cycle() {
        let mut builder = ContainerBuilder::new("C").unwrap();
        builder
            .add("car", "Car", vec![Argument::dependency("engine")], false)
            .unwrap();
        builder
            .add("engine", "Engine", vec![Argument::dependency("car")], true)
            .unwrap();
        builder
            .add("wheel", "Wheel", vec![Argument::dependency("car")], false)
            .unwrap();
        assert!(builder.generate().is_ok());
    }
}
