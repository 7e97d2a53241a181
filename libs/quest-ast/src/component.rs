//! # Component Descriptions
//!
//! Alias/description metadata for host components and their methods. The
//! records are filled by whoever scans the host code; a service module can be
//! attached so generators see both together.

use crate::module::ServiceModule;
use serde::{Deserialize, Serialize};

/// Metadata for one method of a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescription {
    pub alias: String,
    pub description: String,
}

impl MethodDescription {
    pub fn new(alias: impl Into<String>, description: impl Into<String>) -> Self {
        Self { alias: alias.into(), description: description.into() }
    }
}

/// Metadata for one component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentDescription {
    pub alias: String,
    pub description: String,
    pub methods: Vec<MethodDescription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceModule>,
}

impl ComponentDescription {
    pub fn new(alias: impl Into<String>, description: impl Into<String>) -> Self {
        Self { alias: alias.into(), description: description.into(), ..Self::default() }
    }

    pub fn with_method(mut self, method: MethodDescription) -> Self {
        self.methods.push(method);
        self
    }

    /// Attach the service module this component implements.
    pub fn attach(&mut self, service: ServiceModule) {
        self.service = Some(service);
    }

    pub fn method(&self, alias: &str) -> Option<&MethodDescription> {
        self.methods.iter().find(|m| m.alias == alias)
    }
}
