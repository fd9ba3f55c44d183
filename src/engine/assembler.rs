//! Result Assembler
//!
//! Turns a sampled symptom into the canonical analysis result. Pure: the
//! output is fully determined by the symptom, the timestamp, and the random
//! source.

use chrono::{DateTime, Utc};

use crate::models::{AnalysisResult, Detection, HealthAnalysis, RiskLevel, RiskMetrics};

use super::catalog::SymptomDefinition;
use super::random::UnitSource;

// ============================================================================
// SYNTHETIC RANGES
// ============================================================================

/// Confidence is drawn uniformly from [0.82, 0.96]
const CONFIDENCE_MIN: f64 = 0.82;
const CONFIDENCE_SPAN: f64 = 0.14;

/// Processing time is drawn uniformly from [0.5, 1.5] seconds
const PROCESSING_MIN_SECS: f64 = 0.5;
const PROCESSING_SPAN_SECS: f64 = 1.0;

/// Suffix appended to the display name to form the result message
const MESSAGE_SUFFIX: &str = "症状";

/// Assemble the canonical result for one sampled symptom.
///
/// Confidence is rounded to 3 decimal places and processing time to 2, so
/// repeated assembly of the same symptom differs only in the drawn fields.
pub fn assemble(
    symptom: &SymptomDefinition,
    now: DateTime<Utc>,
    source: &mut dyn UnitSource,
) -> AnalysisResult {
    let confidence = round_dp(CONFIDENCE_MIN + source.next_unit() * CONFIDENCE_SPAN, 3);
    let processing_time = round_dp(
        PROCESSING_MIN_SECS + source.next_unit() * PROCESSING_SPAN_SECS,
        2,
    );

    AnalysisResult {
        detection: Detection {
            features: symptom.features.clone(),
            confidence,
            class_name: symptom.key.clone(),
        },
        health_analysis: HealthAnalysis {
            risk_level: RiskLevel::from_score(symptom.risk_score),
            message: format!("{}{}", symptom.display_name, MESSAGE_SUFFIX),
            description: symptom.description.clone(),
            confidence,
            recommendation: symptom.recommendation.clone(),
            detected_class: symptom.display_name.clone(),
        },
        risk_metrics: RiskMetrics {
            risk_level: symptom.risk_score,
            cure_rate: symptom.cure_rate,
            color: symptom.display_color.clone(),
        },
        processing_time,
        analyzed_at: now,
    }
}

fn round_dp(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::SymptomCatalog;
    use crate::engine::random::FixedSequence;

    #[test]
    fn test_assemble_is_pure() {
        let catalog = SymptomCatalog::standard();
        let symptom = catalog.by_key("constipation").unwrap();
        let now = Utc::now();

        let a = assemble(symptom, now, &mut FixedSequence::new([0.3, 0.7]));
        let b = assemble(symptom, now, &mut FixedSequence::new([0.3, 0.7]));

        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }

    #[test]
    fn test_confidence_and_processing_ranges() {
        let catalog = SymptomCatalog::standard();
        let symptom = catalog.by_key("normal").unwrap();
        let now = Utc::now();

        let low = assemble(symptom, now, &mut FixedSequence::new([0.0, 0.0]));
        assert_eq!(low.detection.confidence, 0.82);
        assert_eq!(low.processing_time, 0.5);

        let high = assemble(symptom, now, &mut FixedSequence::new([0.9999, 0.9999]));
        assert_eq!(high.detection.confidence, 0.96);
        assert_eq!(high.processing_time, 1.5);
    }

    #[test]
    fn test_rounding_precision() {
        let catalog = SymptomCatalog::standard();
        let symptom = catalog.by_key("normal").unwrap();
        let now = Utc::now();

        // 0.82 + 0.123456 * 0.14 = 0.83728...  -> 0.837
        // 0.5 + 0.123456 * 1.0 = 0.623456      -> 0.62
        let result = assemble(symptom, now, &mut FixedSequence::new([0.123456, 0.123456]));
        assert!((result.detection.confidence - 0.837).abs() < 1e-9);
        assert!((result.processing_time - 0.62).abs() < 1e-9);
    }

    #[test]
    fn test_message_and_classes() {
        let catalog = SymptomCatalog::standard();
        let symptom = catalog.by_key("watery_diarrhea").unwrap();
        let now = Utc::now();

        let result = assemble(symptom, now, &mut FixedSequence::new([0.5, 0.5]));
        assert_eq!(result.health_analysis.message, "拉稀症状");
        assert_eq!(result.detection.class_name, "watery_diarrhea");
        assert_eq!(result.health_analysis.detected_class, "拉稀");
        assert_eq!(result.health_analysis.risk_level, RiskLevel::Danger);
        assert_eq!(result.risk_metrics.risk_level, 65);
        assert_eq!(result.risk_metrics.cure_rate, 85);
        assert_eq!(result.risk_metrics.color, "#fd7e14");
        assert_eq!(result.analyzed_at, now);
    }

    #[test]
    fn test_confidence_shared_between_blocks() {
        let catalog = SymptomCatalog::standard();
        let symptom = catalog.by_key("soft_stool").unwrap();

        let result = assemble(symptom, Utc::now(), &mut FixedSequence::new([0.42, 0.1]));
        assert_eq!(result.detection.confidence, result.health_analysis.confidence);
    }

    #[test]
    fn test_wire_shape() {
        let catalog = SymptomCatalog::standard();
        let symptom = catalog.by_key("normal").unwrap();

        let result = assemble(symptom, Utc::now(), &mut FixedSequence::new([0.0, 0.0]));
        let json = serde_json::to_value(&result).unwrap();

        // Features are flattened into the detection object.
        assert_eq!(json["detection"]["color"], "棕色");
        assert_eq!(json["detection"]["texture"], "成形");
        assert_eq!(json["detection"]["shape"], "长条状");
        assert_eq!(json["detection"]["class_name"], "normal");
        assert_eq!(json["health_analysis"]["risk_level"], "normal");
        assert_eq!(json["risk_metrics"]["risk_level"], 5);
        assert_eq!(json["risk_metrics"]["cure_rate"], 98);
        assert!(json["analyzed_at"].is_string());
    }
}
