//! Run-scoped context shared by every row of a conversion.

use sba_map::MappingRegistry;
use sba_model::{ContractError, ConversionOptions, DocumentKind};

/// Everything a conversion run reads but never mutates.
///
/// Built once before any row is processed; construction fails on a broken
/// mapping registry so no partial output is ever produced from it.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub kind: DocumentKind,
    pub registry: MappingRegistry,
    pub options: ConversionOptions,
    /// Worker threads for row processing; `None` uses the global pool.
    pub jobs: Option<usize>,
}

impl RunContext {
    pub fn new(kind: DocumentKind, options: ConversionOptions) -> Result<Self, ContractError> {
        Ok(Self {
            kind,
            registry: sba_map::registry(kind)?,
            options,
            jobs: None,
        })
    }

    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs.filter(|jobs| *jobs > 0);
        self
    }
}
