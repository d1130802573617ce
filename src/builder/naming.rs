//! Name rules shared by the builder and the code it emits.

use std::collections::HashSet;

use crate::container::CONTAINER_SERVICE_NAME;

use super::BuilderError;

/// Service and parameter names: ASCII letters, digits, `.` and `_`, starting
/// with a letter and not ending with a separator.
pub fn is_valid_service_name(name: &str) -> bool {
    let Some(first) = name.chars().next() else {
        return false;
    };
    first.is_ascii_alphabetic()
        && !name.ends_with(['.', '_'])
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
}

/// Checks a name before a service is registered under it.
pub fn validate_service_name(name: &str) -> Result<(), BuilderError> {
    if !is_valid_service_name(name) || name == CONTAINER_SERVICE_NAME {
        return Err(BuilderError::InvalidServiceName(name.to_string()));
    }
    Ok(())
}

/// Splits `A::B::Container` into its segments. Every segment must be a plain
/// Rust identifier; the last one names the generated type.
pub fn parse_container_name(name: &str) -> Result<Vec<String>, BuilderError> {
    let invalid = || BuilderError::InvalidContainerName(name.to_string());
    let segments: Vec<String> = name.split("::").map(str::to_string).collect();
    for segment in &segments {
        let mut chars = segment.chars();
        let head_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !head_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid());
        }
        // rejects keywords and a lone `_`
        syn::parse_str::<syn::Ident>(segment).map_err(|_| invalid())?;
    }
    Ok(segments)
}

/// `foo.bar`, `foo_bar` and `fooBar` all become `resolveFooBar`.
pub fn method_base_name(service: &str) -> String {
    let mut name = String::from("resolve");
    let mut segment_start = true;
    let mut previous_lower = false;

    for c in service.chars() {
        if c == '.' || c == '_' {
            segment_start = true;
            previous_lower = false;
            continue;
        }
        if c.is_ascii_uppercase() && previous_lower {
            segment_start = true;
        }
        if segment_start {
            name.push(c.to_ascii_uppercase());
            segment_start = false;
        } else {
            name.push(c);
        }
        previous_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
    }
    name
}

/// Hands out resolver method names, suffixing `1`, `2`, ... on collision.
#[derive(Debug, Default)]
pub struct MethodNames {
    used: HashSet<String>,
}

impl MethodNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, service: &str) -> String {
        let base = method_base_name(service);
        let mut candidate = base.clone();
        let mut suffix = 1;
        while self.used.contains(&candidate) {
            candidate = format!("{}{}", base, suffix);
            suffix += 1;
        }
        self.used.insert(candidate.clone());
        candidate
    }
}
