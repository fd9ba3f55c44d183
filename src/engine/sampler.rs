//! Risk Sampler
//!
//! Draws one symptom from the catalog using fixed prevalence weights, so
//! "normal" comes up far more often than "parasitic_infection".

use crate::error::EngineError;

use super::catalog::{SymptomCatalog, SymptomDefinition};
use super::random::UnitSource;

/// Tolerance when checking that weights sum to 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Standard prevalence weights, one per standard catalog entry
const STANDARD_WEIGHTS: [f64; 5] = [0.5, 0.15, 0.12, 0.13, 0.1];

/// Non-negative selection weights, parallel to the catalog order
#[derive(Debug, Clone)]
pub struct SelectionWeights {
    values: Vec<f64>,
}

impl SelectionWeights {
    /// Build a weight vector, validating non-negativity and unit sum.
    pub fn new(values: Vec<f64>) -> Result<Self, EngineError> {
        if values.iter().any(|w| *w < 0.0 || !w.is_finite()) {
            return Err(EngineError::InvalidConfig(
                "selection weights must be finite and non-negative".to_string(),
            ));
        }

        let sum: f64 = values.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EngineError::InvalidConfig(format!(
                "selection weights sum to {}, expected 1.0",
                sum
            )));
        }

        Ok(Self { values })
    }

    /// The weights shipped with the standard catalog
    pub fn standard() -> Self {
        Self { values: STANDARD_WEIGHTS.to_vec() }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Weighted sampler over a catalog
#[derive(Debug, Clone)]
pub struct RiskSampler<'a> {
    catalog: &'a SymptomCatalog,
    weights: &'a SelectionWeights,
}

impl<'a> RiskSampler<'a> {
    /// Pair a catalog with its weights. Lengths must match.
    pub fn new(
        catalog: &'a SymptomCatalog,
        weights: &'a SelectionWeights,
    ) -> Result<Self, EngineError> {
        if weights.len() != catalog.len() {
            return Err(EngineError::InvalidConfig(format!(
                "{} weights for {} catalog entries",
                weights.len(),
                catalog.len()
            )));
        }
        Ok(Self { catalog, weights })
    }

    /// Draw one symptom.
    ///
    /// Walks the catalog in its fixed order subtracting each weight from a
    /// uniform draw; the first entry at which the remainder reaches zero is
    /// selected. If floating-point drift leaves no entry selected after the
    /// full walk, the last entry is returned. Never panics.
    pub fn sample(&self, source: &mut dyn UnitSource) -> Result<&'a SymptomDefinition, EngineError> {
        let mut remainder = source.next_unit();

        for (definition, weight) in self.catalog.all().iter().zip(self.weights.as_slice()) {
            remainder -= weight;
            if remainder <= 0.0 {
                return Ok(definition);
            }
        }

        self.catalog
            .all()
            .last()
            .ok_or_else(|| EngineError::AnalysisFailure("sampled from an empty catalog".to_string()))
    }
}
