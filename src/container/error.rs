use thiserror::Error;

/// Failures raised while binding or resolving services.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContainerError {
    /// The reserved self-name cannot be bound, set or registered.
    #[error("Container error: `{0}` is reserved for the container itself")]
    ReservedName(String),
    #[error("Unknown service `{0}`")]
    UnknownService(String),
    #[error("Invalid service `{name}`: {reason}")]
    InvalidService { name: String, reason: String },
    #[error("Unknown class `{0}`")]
    UnknownClass(String),
    #[error("Class `{class}` has no method `{method}`")]
    UnknownMethod { class: String, method: String },
    #[error("Invalid argument for `{target}`: {reason}")]
    InvalidArgument { target: String, reason: String },
    #[error("Circular dependency: {}", .0.join(" -> "))]
    CircularDependency(Vec<String>),
}

impl ContainerError {
    pub fn invalid_service(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ContainerError::InvalidService {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_argument(target: impl Into<String>, reason: impl Into<String>) -> Self {
        ContainerError::InvalidArgument {
            target: target.into(),
            reason: reason.into(),
        }
    }
}

pub type ContainerResult<T> = Result<T, ContainerError>;
