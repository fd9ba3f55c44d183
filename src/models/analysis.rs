//! Analysis result types
//!
//! Wire shape of one analysis outcome, mirrored by the SPA. Field names are
//! part of the API contract and must stay snake_case.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Qualitative risk bucket derived from the numeric risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// No action needed
    Normal,
    /// Worth watching, adjust diet / observe
    Warning,
    /// See a veterinarian
    Danger,
}

impl RiskLevel {
    /// Bucket a 0-100 risk score. Thresholds are exact: 30 and below is
    /// normal, 31-50 is warning, anything above 50 is danger.
    pub fn from_score(risk_score: u8) -> Self {
        if risk_score <= 30 {
            RiskLevel::Normal
        } else if risk_score <= 50 {
            RiskLevel::Warning
        } else {
            RiskLevel::Danger
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Normal => "normal",
            RiskLevel::Warning => "warning",
            RiskLevel::Danger => "danger",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ANALYSIS RESULT
// ============================================================================

/// Detection block: observed attributes plus the classified symptom key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    /// Attribute name -> observed value (color, texture, shape). Flattened
    /// into the detection object on the wire.
    #[serde(flatten)]
    pub features: BTreeMap<String, String>,
    pub confidence: f64,
    pub class_name: String,
}

/// Human-facing interpretation of the detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthAnalysis {
    pub risk_level: RiskLevel,
    pub message: String,
    pub description: String,
    pub confidence: f64,
    pub recommendation: String,
    pub detected_class: String,
}

/// Numeric risk metadata for the classified symptom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Numeric risk score 0-100 (API name predates the bucket enum)
    pub risk_level: u8,
    pub cure_rate: u8,
    pub color: String,
}

/// One complete analysis outcome, immutable once returned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub detection: Detection,
    pub health_analysis: HealthAnalysis,
    pub risk_metrics: RiskMetrics,
    pub processing_time: f64,
    pub analyzed_at: DateTime<Utc>,
}

// ============================================================================
// REQUEST / RESPONSE ENVELOPES
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Opaque image reference (base64 data URL in the reference client).
    /// Never inspected beyond a non-empty check.
    pub image: Option<String>,

    /// Client-side timestamp; accepted and ignored, server time is
    /// authoritative.
    #[allow(dead_code)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: AnalysisResult,
}
