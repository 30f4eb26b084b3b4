//! 商品カタログモジュール
//!
//! 外部の商品ストアからエクスポートしたJSON配列を読み込み、
//! 照合時点のスナップショットとして保持する。

use crate::error::Result;
use crate::types::{CatalogRecord, Product};
use std::path::Path;

/// 商品カタログのスナップショット（読み取り専用）
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// JSONファイルから読み込み
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    ///
    /// タイトルが空のレコードは全候補名に包含一致してしまうため除外する。
    /// 識別子（`_id` / `unique_id`）が両方空のレコードも重複排除できないため除外する。
    /// 除外は警告のみで、残りのレコードはそのまま使う。
    pub fn from_json(json: &str) -> Result<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        let total = products.len();

        let products: Vec<Product> = products
            .into_iter()
            .enumerate()
            .filter(|(idx, product)| {
                if product.title.trim().is_empty() {
                    tracing::warn!(index = idx + 1, id = product.record_id(), "タイトルが空のためスキップ");
                    return false;
                }
                if product.record_id().is_empty() {
                    tracing::warn!(index = idx + 1, title = %product.title, "識別子がないためスキップ");
                    return false;
                }
                true
            })
            .map(|(_, product)| product)
            .collect();

        if products.len() < total {
            tracing::warn!(skipped = total - products.len(), loaded = products.len(), "無効な商品レコードを除外");
        }

        Ok(Self { products })
    }

    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// カタログ順の商品一覧
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
