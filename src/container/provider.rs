use crate::definition::{ServiceDefinition, ServiceRecord};

use super::{error::ContainerResult, resolved::Resolved, Container};

/// Supplies services to a container without touching its own bindings.
///
/// A provider is registered once and answers for every name it lists in
/// [`provides`](ServiceProvider::provides). The flag returned by
/// [`resolve`](ServiceProvider::resolve) tells the container whether to cache
/// the instance.
pub trait ServiceProvider {
    fn provides(&self) -> Vec<String>;

    fn resolve(&self, name: &str, container: &mut Container) -> ContainerResult<(Resolved, bool)>;
}

/// A provider backed by a table of service records.
#[derive(Debug, Clone, Default)]
pub struct ServiceProviderArray {
    services: Vec<(String, ServiceRecord)>,
}

impl ServiceProviderArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entry; replaced entries keep their position.
    pub fn add(&mut self, name: impl Into<String>, record: ServiceRecord) -> &mut Self {
        let name = name.into();
        match self.services.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => *existing = record,
            None => self.services.push((name, record)),
        }
        self
    }

    pub fn record(&self, name: &str) -> Option<&ServiceRecord> {
        self.services
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, record)| record)
    }

    /// Reads a JSON object of `name -> record`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let table: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut provider = Self::new();
        for (name, value) in table {
            provider.add(name, serde_json::from_value(value)?);
        }
        Ok(provider)
    }
}

impl<K: Into<String>> FromIterator<(K, ServiceRecord)> for ServiceProviderArray {
    fn from_iter<T: IntoIterator<Item = (K, ServiceRecord)>>(iter: T) -> Self {
        let mut provider = Self::new();
        for (name, record) in iter {
            provider.add(name, record);
        }
        provider
    }
}

impl ServiceProvider for ServiceProviderArray {
    fn provides(&self) -> Vec<String> {
        self.services.iter().map(|(name, _)| name.clone()).collect()
    }

    fn resolve(&self, name: &str, container: &mut Container) -> ContainerResult<(Resolved, bool)> {
        let record = self
            .record(name)
            .ok_or_else(|| super::ContainerError::UnknownService(name.to_string()))?;
        let definition = ServiceDefinition::from(record.clone());
        let instance = container.instantiate(&definition)?;
        Ok((instance, definition.shared))
    }
}
