//! # wirebox: service definitions and dependency injection
//!
//! wirebox has two halves that share one data model.
//!
//! ## Definition Compiler
//!
//! Service definitions are written in a small line-based language:
//!
//! ```text
//! :log.path = '/var/log/app.log'
//!
//! @log.handler: Acme\FileHandler(:log.path)
//! @logger: Acme\Log(@log.handler)
//!   - setName('app')
//! ```
//!
//! and compiled into Rust source for a container type with one resolver
//! function per service:
//!
//! ```text
//! Source → Tokenizer → Preprocessor → Parser → Namespace → Builder → Rust source
//! ```
//!
//! - Tokenization ([`tokenizer`])
//! - Token normalization ([`preprocessor`])
//! - Parsing into an Abstract Syntax Tree ([`analyzer`], [`ast`])
//! - Definition collection ([`namespace`])
//! - Code generation ([`builder`], configured by [`config`])
//!
//! ## Runtime Container
//!
//! [`Container`] resolves services by name, either from bindings made at
//! runtime (closures, class definitions, providers) or from the resolver
//! functions of a generated container. Shared services are cached until
//! released.
//!
//! Classes are referenced by name in definitions; a [`ClassRegistry`] maps
//! those names to Rust constructors and methods.
//!
//! ## Errors
//!
//! Every stage has its own error type; [`Error`] aggregates them so callers
//! can still tell a lexical error from a parse, builder or container error.

pub mod analyzer;
pub mod argument;
pub mod ast;
pub mod builder;
pub mod config;
pub mod container;
pub mod definition;
pub mod error;
pub mod namespace;
pub mod preprocessor;
pub mod tokenizer;

// Re-exports
pub use argument::{Argument, ServiceArguments};
pub use builder::{BuilderError, ContainerBuilder};
pub use config::GeneratorConfig;
pub use container::{
    ClassRegistry, Container, ContainerError, ContainerId, ResolverType, Resolved, ServiceProvider,
    ServiceProviderArray,
};
pub use definition::{MethodCall, ServiceDefinition, ServiceRecord};
pub use error::*;
pub use namespace::ContainerNamespace;

// Generated containers reach serde_json through this crate.
pub use serde_json;

/// Parses `source` and generates a container type named `container_name`.
///
/// ```rust
/// let source = wirebox::compile("AppContainer", "@logger: Acme\\Log", &Default::default()).unwrap();
/// assert!(source.contains("resolveLogger"));
/// ```
#[tracing::instrument(level = "debug", skip(source, config))]
pub fn compile(container_name: &str, source: &str, config: &GeneratorConfig) -> InternalResult<String> {
    let mut namespace = ContainerNamespace::new();
    namespace.parse(source)?;

    let mut builder = ContainerBuilder::new(container_name)?.with_config(config.clone());
    builder.import_namespace(&namespace)?;
    Ok(builder.generate()?)
}
