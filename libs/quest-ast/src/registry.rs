//! # Pipeline Registry
//!
//! Maps each document kind to the pipeline that assembles it. Build the
//! registry once at startup and share it by reference; it is never mutated
//! after construction.
//!
//! ## Example
//!
//! ```rust
//! use quest_ast::{DocumentKind, PipelineRegistry};
//!
//! let registry = PipelineRegistry::standard();
//! let cst = quest_parser::parse("@kind prd;\nrequirement login { \"sms\"; }");
//! let module = registry.assemble(&cst.root).unwrap();
//! assert_eq!(module.kind(), DocumentKind::Prd);
//! ```

use crate::error::LowerError;
use crate::kind::{extract_kind, DocumentKind};
use crate::module::QuestModule;
use crate::visitor::cst_to_ast::{assemble_prd, assemble_service};
use quest_parser::CstNode;
use std::collections::HashMap;
use std::fmt;

/// Assembles one document kind.
pub trait Pipeline: Send + Sync {
    /// Kind this pipeline handles.
    fn kind(&self) -> DocumentKind;

    /// Assemble a script root. Either the full module or an error; never a
    /// partially filled container.
    fn assemble(&self, root: &CstNode) -> Result<QuestModule, LowerError>;
}

/// Processes and functions of service scripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServicePipeline;

impl Pipeline for ServicePipeline {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Service
    }

    fn assemble(&self, root: &CstNode) -> Result<QuestModule, LowerError> {
        assemble_service(root).map(QuestModule::Service)
    }
}

/// Requirements of prd scripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrdPipeline;

impl Pipeline for PrdPipeline {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Prd
    }

    fn assemble(&self, root: &CstNode) -> Result<QuestModule, LowerError> {
        assemble_prd(root).map(QuestModule::Prd)
    }
}

/// Kind → pipeline lookup.
#[derive(Default)]
pub struct PipelineRegistry {
    pipelines: HashMap<DocumentKind, Box<dyn Pipeline>>,
}

impl PipelineRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the service and prd pipelines.
    pub fn standard() -> Self {
        Self::new().register(ServicePipeline).register(PrdPipeline)
    }

    /// Add a pipeline, replacing any earlier one for the same kind.
    pub fn register(mut self, pipeline: impl Pipeline + 'static) -> Self {
        self.pipelines.insert(pipeline.kind(), Box::new(pipeline));
        self
    }

    pub fn get(&self, kind: DocumentKind) -> Option<&dyn Pipeline> {
        self.pipelines.get(&kind).map(|p| p.as_ref())
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<DocumentKind> {
        let mut kinds: Vec<DocumentKind> = self.pipelines.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Extract the kind of `root` and run its pipeline.
    pub fn assemble(&self, root: &CstNode) -> Result<QuestModule, LowerError> {
        let kind = extract_kind(root)?;
        tracing::debug!(%kind, alias = kind.alias(), "extracted document kind");
        let pipeline = self.get(kind).ok_or(LowerError::NoPipeline(kind))?;
        pipeline.assemble(root)
    }
}

impl fmt::Debug for PipelineRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineRegistry").field("kinds", &self.kinds()).finish()
    }
}
