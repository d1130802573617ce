pub mod common;
pub use common::*;

pub mod argument;
pub mod scope;
pub mod service;

pub use argument::{parse_argument, parse_argument_array};
pub use scope::{parse_definitions, parse_parameter_definition};
pub use service::{parse_method_call, parse_service_definition};

#[cfg(test)]
mod tests;
