//! History entry model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::analysis::AnalysisResult;

/// One persisted past analysis outcome for a subject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Monotonically increasing per subject
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub result: AnalysisResult,
    pub image_ref: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub count: usize,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntryResponse {
    pub success: bool,
    pub entry: HistoryEntry,
}
