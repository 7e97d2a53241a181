//! # Module Containers
//!
//! Named containers filled by module assembly, one per document kind.
//! Names are unique keys; inserting under an existing name replaces the
//! earlier entry.

use crate::kind::DocumentKind;
use crate::statement::{Function, Process};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Processes and functions of one `@kind service` script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceModule {
    /// Business module the units belong to.
    pub biz_module: String,
    pub processes: BTreeMap<String, Process>,
    pub functions: BTreeMap<String, Function>,
}

impl ServiceModule {
    pub fn new(biz_module: impl Into<String>) -> Self {
        Self { biz_module: biz_module.into(), ..Self::default() }
    }

    /// Insert or overwrite a process; returns the replaced entry.
    pub fn put_process(&mut self, name: impl Into<String>, process: Process) -> Option<Process> {
        let name = name.into();
        let replaced = self.processes.insert(name.clone(), process);
        if replaced.is_some() {
            tracing::warn!(process = %name, "duplicate process name, keeping the last definition");
        }
        replaced
    }

    /// Insert or overwrite a function; returns the replaced entry.
    pub fn put_function(&mut self, name: impl Into<String>, function: Function) -> Option<Function> {
        let name = name.into();
        let replaced = self.functions.insert(name.clone(), function);
        if replaced.is_some() {
            tracing::warn!(function = %name, "duplicate function name, keeping the last definition");
        }
        replaced
    }

    pub fn process(&self, name: &str) -> Option<&Process> {
        self.processes.get(name)
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }
}

/// Requirements of one `@kind prd` script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrdModule {
    pub biz_module: String,
    /// Requirement name to its items, in declaration order, quotes stripped.
    pub requirements: BTreeMap<String, Vec<String>>,
}

impl PrdModule {
    pub fn new(biz_module: impl Into<String>) -> Self {
        Self { biz_module: biz_module.into(), ..Self::default() }
    }

    /// Insert or overwrite a requirement; returns the replaced items.
    pub fn put_requirement(&mut self, name: impl Into<String>, items: Vec<String>) -> Option<Vec<String>> {
        let name = name.into();
        let replaced = self.requirements.insert(name.clone(), items);
        if replaced.is_some() {
            tracing::warn!(requirement = %name, "duplicate requirement name, keeping the last definition");
        }
        replaced
    }
}

/// Result of assembling one script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestModule {
    Service(ServiceModule),
    Prd(PrdModule),
}

impl QuestModule {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Service(_) => DocumentKind::Service,
            Self::Prd(_) => DocumentKind::Prd,
        }
    }

    pub fn biz_module(&self) -> &str {
        match self {
            Self::Service(module) => &module.biz_module,
            Self::Prd(module) => &module.biz_module,
        }
    }

    pub fn as_service(&self) -> Option<&ServiceModule> {
        match self {
            Self::Service(module) => Some(module),
            Self::Prd(_) => None,
        }
    }

    pub fn as_prd(&self) -> Option<&PrdModule> {
        match self {
            Self::Prd(module) => Some(module),
            Self::Service(_) => None,
        }
    }
}
