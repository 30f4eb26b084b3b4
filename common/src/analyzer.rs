//! 照合パイプライン（抽出 → 照合）
//!
//! AIの応答テキストとカタログのスナップショットを受け取り、
//! 副作用なしで照合結果を返す。AI呼び出し自体は呼び出し側の責務。

use crate::matcher::match_catalog;
use crate::parser::extract_medicine_names;
use crate::types::{CatalogRecord, MatchResult};

/// 1件の処方箋に対する照合結果
#[derive(Debug, Clone, PartialEq)]
pub struct PrescriptionMatch<R> {
    /// AI応答から抽出した薬品名（抽出順）
    pub extracted: Vec<String>,
    /// カタログ照合結果
    pub result: MatchResult<R>,
}

/// AI応答テキストをカタログと照合
///
/// どんな入力でも失敗しない。抽出できなければ空の結果になる。
pub fn match_prescription<R>(response: &str, catalog: &[R]) -> PrescriptionMatch<R>
where
    R: CatalogRecord + Clone,
{
    let extracted = extract_medicine_names(response);
    tracing::info!(?extracted, "薬品名を抽出");

    let result = match_catalog(&extracted, catalog);
    PrescriptionMatch { extracted, result }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn catalog() -> Vec<Product> {
        vec![
            Product {
                id: "P1".into(),
                title: "Amoxicillin 500mg Capsules".into(),
                ..Default::default()
            },
            Product {
                id: "P2".into(),
                title: "Ibuprofen 400mg".into(),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_match_prescription_json_response() {
        let m = match_prescription(r#"["Amoxicillin", "Ibuprofen", "Zolpidem"]"#, &catalog());
        assert_eq!(m.extracted, vec!["Amoxicillin", "Ibuprofen", "Zolpidem"]);
        assert_eq!(m.result.matched_records.len(), 2);
        assert_eq!(m.result.unmatched_candidates, vec!["Zolpidem"]);
    }

    #[test]
    fn test_match_prescription_plain_text_response() {
        let m = match_prescription("1. Amox\n2. Ibuprofen", &catalog());
        assert_eq!(m.extracted, vec!["Amox", "Ibuprofen"]);
        let ids: Vec<&str> = m.result.matched_records.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "P2"]);
    }

    #[test]
    fn test_match_prescription_empty_response() {
        let m = match_prescription("[]", &catalog());
        assert!(m.extracted.is_empty());
        assert!(m.result.is_empty());
    }
}
