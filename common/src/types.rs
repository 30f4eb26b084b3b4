//! 共有型定義
//!
//! - CatalogRecord: 照合対象レコードの最小インターフェース
//! - Product: 商品カタログの1件
//! - MatchResult: 照合結果（一致した商品 / 一致しなかった薬品名）

use serde::{Deserialize, Serialize};

/// 照合対象となるカタログレコード
///
/// 照合に必要なのは識別子とタイトルだけ。レコード自体は読み取り専用として扱う。
pub trait CatalogRecord {
    /// 重複排除に使う識別子
    fn record_id(&self) -> &str;

    /// 表示タイトル（大文字小文字・空白・記号は任意）
    fn title(&self) -> &str;
}

/// 商品カタログの1件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", default)]
    pub id: String,

    #[serde(default)]
    pub unique_id: String,

    #[serde(default)]
    pub imgsrc: String,

    pub title: String,

    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indication: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,

    #[serde(rename = "sideEffects", default, skip_serializing_if = "Option::is_none")]
    pub side_effects: Option<String>,

    #[serde(rename = "countInStock", default)]
    pub count_in_stock: u32,
}

impl CatalogRecord for Product {
    /// `_id` がなければ `unique_id` を使う
    fn record_id(&self) -> &str {
        if self.id.is_empty() {
            &self.unique_id
        } else {
            &self.id
        }
    }

    fn title(&self) -> &str {
        &self.title
    }
}

/// 照合結果
///
/// 候補名はすべて「一致に寄与した」か `unmatched_candidates` のどちらか一方に入る。
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<R> {
    /// 一致したレコード（最初に一致した順、識別子の重複なし）
    pub matched_records: Vec<R>,
    /// どのレコードにも一致しなかった候補名（入力順）
    pub unmatched_candidates: Vec<String>,
}

impl<R> Default for MatchResult<R> {
    fn default() -> Self {
        Self {
            matched_records: Vec::new(),
            unmatched_candidates: Vec::new(),
        }
    }
}

impl<R> MatchResult<R> {
    pub fn is_empty(&self) -> bool {
        self.matched_records.is_empty() && self.unmatched_candidates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserialize_full() {
        let json = r#"{
            "_id": "64f0c0ffee",
            "unique_id": "MED-001",
            "imgsrc": "/images/amox.png",
            "title": "Amoxicillin 500mg Capsules",
            "price": 120.5,
            "category": "Antibiotics",
            "indication": "Bacterial infections",
            "dosage": "1 capsule thrice daily",
            "sideEffects": "Nausea",
            "countInStock": 42
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, "64f0c0ffee");
        assert_eq!(product.unique_id, "MED-001");
        assert_eq!(product.title, "Amoxicillin 500mg Capsules");
        assert_eq!(product.side_effects.as_deref(), Some("Nausea"));
        assert_eq!(product.count_in_stock, 42);
    }

    #[test]
    fn test_product_deserialize_minimal() {
        let product: Product = serde_json::from_str(r#"{"unique_id": "P1", "title": "Aspirin"}"#).unwrap();
        assert_eq!(product.id, "");
        assert_eq!(product.price, 0.0);
        assert_eq!(product.count_in_stock, 0); // デフォルト値
        assert!(product.indication.is_none());
    }

    #[test]
    fn test_record_id_falls_back_to_unique_id() {
        let product = Product {
            unique_id: "MED-007".to_string(),
            title: "Cetirizine".to_string(),
            ..Default::default()
        };
        assert_eq!(product.record_id(), "MED-007");

        let product = Product {
            id: "abc".to_string(),
            unique_id: "MED-007".to_string(),
            ..product
        };
        assert_eq!(product.record_id(), "abc");
    }

    #[test]
    fn test_match_result_default_is_empty() {
        let result: MatchResult<Product> = MatchResult::default();
        assert!(result.is_empty());
    }
}
