//! 解析レポート
//!
//! 処方箋1枚ごとの出力形式（JSON, camelCase）。
//! 一致した商品はカート操作に使えるよう識別子とタイトルを必ず含める。

use crate::analyzer::PrescriptionMatch;
use crate::types::{CatalogRecord, Product};
use serde::{Deserialize, Serialize};

/// レポートに載せる商品情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedProduct {
    #[serde(rename = "_id")]
    pub id: String,
    pub unique_id: String,
    pub title: String,
    pub price: f64,
    pub imgsrc: String,
    pub category: String,
    #[serde(rename = "countInStock")]
    pub count_in_stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indication: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
}

impl From<Product> for MatchedProduct {
    /// `_id` には重複排除に使った識別子（`_id` がなければ `unique_id`）を入れる
    fn from(p: Product) -> Self {
        Self {
            id: p.record_id().to_string(),
            unique_id: p.unique_id,
            title: p.title,
            price: p.price,
            imgsrc: p.imgsrc,
            category: p.category,
            count_in_stock: p.count_in_stock,
            indication: p.indication,
            dosage: p.dosage,
        }
    }
}

/// 処方箋1枚の解析レポート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub success: bool,
    pub extracted_medicines: Vec<String>,
    pub matched_products: Vec<MatchedProduct>,
    /// カタログにない薬品名（利用者には「取扱いなし」として表示）
    pub unmatched_medicines: Vec<String>,
    pub prescription_image: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub analyzed_at: String,
}

impl AnalysisReport {
    pub fn new(
        matched: PrescriptionMatch<Product>,
        prescription_image: impl Into<String>,
        provider: impl Into<String>,
        analyzed_at: impl Into<String>,
    ) -> Self {
        let PrescriptionMatch { extracted, result } = matched;

        Self {
            success: true,
            extracted_medicines: extracted,
            matched_products: result
                .matched_records
                .into_iter()
                .map(MatchedProduct::from)
                .collect(),
            unmatched_medicines: result.unmatched_candidates,
            prescription_image: prescription_image.into(),
            provider: provider.into(),
            analyzed_at: analyzed_at.into(),
        }
    }
}
