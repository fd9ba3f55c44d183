//! Analysis Service
//!
//! Orchestrates the pipeline the HTTP layer calls: validate input, sample a
//! symptom, assemble the result, record it in the subject's history.

use chrono::{DateTime, Utc};

use crate::error::EngineError;
use crate::models::{AnalysisResult, HistoryEntry};

use super::assembler;
use super::catalog::SymptomCatalog;
use super::history::HistoryRegistry;
use super::random::UnitSource;
use super::sampler::{RiskSampler, SelectionWeights};

#[derive(Debug)]
pub struct AnalysisService {
    catalog: SymptomCatalog,
    weights: SelectionWeights,
    histories: HistoryRegistry,
}

impl AnalysisService {
    /// Wire a service from a catalog and matching weights. Validates the
    /// pairing once so per-request sampling cannot fail on configuration.
    pub fn new(
        catalog: SymptomCatalog,
        weights: SelectionWeights,
        history_capacity: usize,
    ) -> Result<Self, EngineError> {
        if history_capacity == 0 {
            return Err(EngineError::InvalidConfig(
                "history capacity must be at least 1".to_string(),
            ));
        }
        RiskSampler::new(&catalog, &weights)?;

        Ok(Self {
            catalog,
            weights,
            histories: HistoryRegistry::new(history_capacity),
        })
    }

    /// The service with the canonical catalog and weights
    pub fn standard(history_capacity: usize) -> Result<Self, EngineError> {
        Self::new(
            SymptomCatalog::standard().clone(),
            SelectionWeights::standard(),
            history_capacity,
        )
    }

    pub fn catalog(&self) -> &SymptomCatalog {
        &self.catalog
    }

    /// Run one analysis for a subject.
    ///
    /// The image reference is opaque; any non-empty value is accepted. On
    /// success the result is recorded in the subject's history; on failure
    /// no history mutation happens.
    pub fn analyze(
        &self,
        subject: &str,
        image_ref: &str,
        now: DateTime<Utc>,
        source: &mut dyn UnitSource,
    ) -> Result<AnalysisResult, EngineError> {
        if image_ref.trim().is_empty() {
            return Err(EngineError::InvalidInput("missing image data".to_string()));
        }

        let sampler = RiskSampler::new(&self.catalog, &self.weights)?;
        let symptom = sampler.sample(source)?;
        let result = assembler::assemble(symptom, now, source);

        self.histories.record(subject, result.clone(), image_ref);
        Ok(result)
    }

    /// Retained history for a subject, newest first
    pub fn history(&self, subject: &str) -> Vec<HistoryEntry> {
        self.histories.list(subject)
    }

    pub fn history_entry(&self, subject: &str, id: u64) -> Result<HistoryEntry, EngineError> {
        self.histories.get(subject, id)
    }
}
