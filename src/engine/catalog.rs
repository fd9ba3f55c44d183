//! Symptom Catalog
//!
//! Fixed taxonomy of stool-condition categories with their risk metadata.
//! Built once at startup, never mutated afterwards. Catalog order is the
//! order the selection weights index.

use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One immutable symptom definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomDefinition {
    /// Stable unique token, e.g. "watery_diarrhea"
    pub key: String,
    /// Localized label shown to the user
    pub display_name: String,
    /// Numeric severity 0-100, higher = worse
    pub risk_score: u8,
    /// Probability-of-resolution estimate 0-100
    pub cure_rate: u8,
    /// Presentation color token (#RRGGBB)
    pub display_color: String,
    pub description: String,
    pub recommendation: String,
    /// Illustrative detection attributes (color, texture, shape)
    pub features: BTreeMap<String, String>,
}

/// Ordered, read-only symptom taxonomy
#[derive(Debug, Clone)]
pub struct SymptomCatalog {
    entries: Vec<SymptomDefinition>,
}

impl SymptomCatalog {
    /// Build a catalog, validating its invariants: at least one entry,
    /// scores within 0-100, keys pairwise distinct.
    pub fn new(entries: Vec<SymptomDefinition>) -> Result<Self, EngineError> {
        if entries.is_empty() {
            return Err(EngineError::InvalidConfig("catalog must not be empty".to_string()));
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.risk_score > 100 || entry.cure_rate > 100 {
                return Err(EngineError::InvalidConfig(format!(
                    "symptom '{}' has a score outside 0-100",
                    entry.key
                )));
            }
            if !seen.insert(entry.key.as_str()) {
                return Err(EngineError::InvalidConfig(format!(
                    "duplicate symptom key '{}'",
                    entry.key
                )));
            }
        }

        Ok(Self { entries })
    }

    /// The canonical five-entry catalog shipped with the product
    pub fn standard() -> &'static SymptomCatalog {
        &STANDARD_CATALOG
    }

    /// All definitions in their fixed order
    pub fn all(&self) -> &[SymptomDefinition] {
        &self.entries
    }

    /// Look up a definition by its stable key
    pub fn by_key(&self, key: &str) -> Result<&SymptomDefinition, EngineError> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .ok_or_else(|| EngineError::NotFound(format!("symptom '{}'", key)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static STANDARD_CATALOG: Lazy<SymptomCatalog> = Lazy::new(|| {
    SymptomCatalog::new(standard_entries()).expect("standard catalog is valid")
});

fn standard_entries() -> Vec<SymptomDefinition> {
    let def = |key: &str,
               display_name: &str,
               risk_score: u8,
               cure_rate: u8,
               display_color: &str,
               description: &str,
               recommendation: &str,
               features: [(&str, &str); 3]| {
        SymptomDefinition {
            key: key.to_string(),
            display_name: display_name.to_string(),
            risk_score,
            cure_rate,
            display_color: display_color.to_string(),
            description: description.to_string(),
            recommendation: recommendation.to_string(),
            features: features
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    };

    vec![
        def(
            "normal",
            "正常",
            5,
            98,
            "#28a745",
            "排泄物特征正常，猫咪健康状况良好",
            "请保持当前的喂养习惯，继续观察猫咪的健康状况。",
            [("color", "棕色"), ("texture", "成形"), ("shape", "长条状")],
        ),
        def(
            "soft_stool",
            "软便",
            25,
            90,
            "#ffc107",
            "检测到轻微消化不良症状，可能存在饮食问题",
            "建议调整饮食，暂时禁食12小时，喂食温和食物如白水煮鸡胸肉。",
            [("color", "黄色"), ("texture", "软便"), ("shape", "糊状")],
        ),
        def(
            "watery_diarrhea",
            "拉稀",
            65,
            85,
            "#fd7e14",
            "检测到水样腹泻，需要注意消化系统健康",
            "确保猫咪充足饮水，避免脱水，如症状持续请咨询兽医。",
            [("color", "黄色"), ("texture", "稀水"), ("shape", "不规则")],
        ),
        def(
            "constipation",
            "便秘",
            40,
            92,
            "#17a2b8",
            "检测到便秘特征，需要增加水分和纤维摄入",
            "增加膳食纤维，鼓励多喝水，喂食南瓜泥帮助通便。",
            [("color", "深棕色"), ("texture", "硬块"), ("shape", "颗粒状")],
        ),
        def(
            "parasitic_infection",
            "寄生虫感染",
            75,
            95,
            "#dc3545",
            "检测到可能的寄生虫感染特征，建议立即检查",
            "立即联系兽医进行检查，需要进行粪便检查和驱虫治疗。",
            [("color", "异常色"), ("texture", "异常"), ("shape", "不规则")],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_invariants() {
        let catalog = SymptomCatalog::standard();
        assert_eq!(catalog.len(), 5);

        let mut keys = HashSet::new();
        for entry in catalog.all() {
            assert!(entry.risk_score <= 100, "{} risk_score out of range", entry.key);
            assert!(entry.cure_rate <= 100, "{} cure_rate out of range", entry.key);
            assert!(keys.insert(entry.key.clone()), "duplicate key {}", entry.key);
        }
    }

    #[test]
    fn test_standard_catalog_order_is_stable() {
        let keys: Vec<_> = SymptomCatalog::standard()
            .all()
            .iter()
            .map(|e| e.key.as_str())
            .collect();
        assert_eq!(
            keys,
            vec!["normal", "soft_stool", "watery_diarrhea", "constipation", "parasitic_infection"]
        );
    }

    #[test]
    fn test_by_key_hit_and_miss() {
        let catalog = SymptomCatalog::standard();

        let normal = catalog.by_key("normal").unwrap();
        assert_eq!(normal.risk_score, 5);
        assert_eq!(normal.display_name, "正常");

        let err = catalog.by_key("hairball").unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let mut entries = standard_entries();
        entries[1].key = "normal".to_string();
        let err = SymptomCatalog::new(entries).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_empty_catalog() {
        let err = SymptomCatalog::new(vec![]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }
}
