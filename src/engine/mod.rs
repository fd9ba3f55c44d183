//! Health-Risk Classification & Result-Assembly Engine
//!
//! Pipeline: RiskSampler -> ResultAssembler -> HistoryStore, orchestrated by
//! AnalysisService. The whole pipeline is synchronous; the only mutable state
//! is the per-subject history registry, and every random draw goes through
//! the injectable `UnitSource` seam.

pub mod assembler;
pub mod catalog;
pub mod history;
pub mod random;
pub mod sampler;
pub mod service;

pub use catalog::SymptomCatalog;
pub use random::UnitSource;
pub use service::AnalysisService;
