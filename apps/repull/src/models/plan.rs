//! Plan schema: everything the compiler needs for one run.

use super::endpoint::EndpointConfig;
use super::system::{SyncOptions, SystemConfig};
use crate::validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Plan {
    pub source: EndpointConfig,
    pub target: EndpointConfig,
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default)]
    pub sync: SyncOptions,
}

impl Plan {
    pub fn new(source: EndpointConfig, target: EndpointConfig) -> Self {
        Self {
            source,
            target,
            system: SystemConfig::default(),
            sync: SyncOptions::default(),
        }
    }

    /// Validate both endpoints and the pip package names; an empty list means
    /// the plan may be compiled.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = validate::validate(&self.source, "Source");
        errors.extend(validate::validate(&self.target, "Target"));
        errors.extend(validate::validate_packages(&self.system.python_packages, "System"));
        errors
    }
}
