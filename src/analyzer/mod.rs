//! 処方箋解析
//!
//! 1. ビジョンAI（`VisionAnalyzer`）で画像 → テキスト
//! 2. 共通ロジックで薬品名抽出 → カタログ照合
//!
//! AIクライアントは起動時に1回だけ `build_analyzer` で作り、呼び出し側が引き回す。

mod claude_cli;
mod groq;

pub use claude_cli::ClaudeCliAnalyzer;
pub use groq::GroqAnalyzer;

use crate::ai_provider::AiProvider;
use crate::config::Config;
use crate::error::Result;
use crate::scanner::PrescriptionImage;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use prescription_ai_common::{match_prescription, AnalysisReport, Catalog};
use std::time::Duration;

/// 画像 → テキストの変換能力
#[async_trait]
pub trait VisionAnalyzer: Send + Sync {
    /// レポートに記録するプロバイダ名
    fn name(&self) -> &str;

    /// 処方箋画像を読み取り、モデルの生の応答テキストを返す
    async fn analyze(&self, image: &PrescriptionImage) -> Result<String>;
}

/// 設定に従ってAIクライアントを構築
pub fn build_analyzer(provider: AiProvider, config: &Config) -> Result<Box<dyn VisionAnalyzer>> {
    match provider {
        AiProvider::Groq => Ok(Box::new(GroqAnalyzer::new(config)?)),
        AiProvider::Claude => Ok(Box::new(ClaudeCliAnalyzer::new(config))),
    }
}

/// 取得済みのAI応答をカタログと照合してレポート化
pub fn report_from_response(
    response: &str,
    prescription_image: &str,
    provider: &str,
    catalog: &Catalog,
) -> AnalysisReport {
    let matched = match_prescription(response, catalog.products());
    AnalysisReport::new(
        matched,
        prescription_image,
        provider,
        chrono::Utc::now().to_rfc3339(),
    )
}

/// 処方箋1枚を解析
pub async fn analyze_prescription(
    analyzer: &dyn VisionAnalyzer,
    image: &PrescriptionImage,
    catalog: &Catalog,
) -> Result<AnalysisReport> {
    tracing::info!(file = %image.file_name, provider = analyzer.name(), "処方箋を解析");

    let response = analyzer.analyze(image).await?;
    tracing::debug!(%response, "AI応答");

    Ok(report_from_response(
        &response,
        &image.path.display().to_string(),
        analyzer.name(),
        catalog,
    ))
}

/// 複数の処方箋を順に解析（カタログは同じスナップショットを使う）
pub async fn analyze_images(
    analyzer: &dyn VisionAnalyzer,
    images: &[PrescriptionImage],
    catalog: &Catalog,
    show_progress: bool,
) -> Result<Vec<AnalysisReport>> {
    let mut reports = Vec::with_capacity(images.len());

    for (idx, image) in images.iter().enumerate() {
        let spinner = if show_progress {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("  {spinner} {msg}") {
                pb.set_style(style);
            }
            pb.enable_steady_tick(Duration::from_millis(120));
            pb
        } else {
            ProgressBar::hidden()
        };
        spinner.set_message(format!("[{}/{}] {} を読み取り中...", idx + 1, images.len(), image.file_name));

        let report = analyze_prescription(analyzer, image, catalog).await;
        spinner.finish_and_clear();
        reports.push(report?);
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prescription_ai_common::Product;

    fn catalog() -> Catalog {
        Catalog::new(vec![Product {
            id: "P1".into(),
            unique_id: "MED-001".into(),
            title: "Azithromycin 500mg".into(),
            ..Default::default()
        }])
    }

    #[test]
    fn test_report_from_response() {
        let report = report_from_response(
            r#"["Azithromycin", "Montelukast"]"#,
            "rx.png",
            "text",
            &catalog(),
        );

        assert!(report.success);
        assert_eq!(report.matched_products.len(), 1);
        assert_eq!(report.matched_products[0].unique_id, "MED-001");
        assert_eq!(report.unmatched_medicines, vec!["Montelukast"]);
        assert_eq!(report.provider, "text");
        assert!(chrono::DateTime::parse_from_rfc3339(&report.analyzed_at).is_ok());
    }
}
