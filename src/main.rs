use clap::Parser;
use prescription_ai_common::{AnalysisReport, Catalog};
use prescription_ai_rust::{analyzer, cli, config, error, scanner};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.is_file() {
        return Err(error::RxAiError::FileNotFound(path.display().to_string()));
    }
    Ok(Catalog::from_file(path)?)
}

fn write_reports(reports: &[AnalysisReport], output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(reports)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            eprintln!("✔ 結果を保存: {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn print_summary(reports: &[AnalysisReport]) {
    for report in reports {
        eprintln!(
            "  {}: 抽出 {}件 / 一致 {}件 / 取扱いなし {}件",
            report.prescription_image,
            report.extracted_medicines.len(),
            report.matched_products.len(),
            report.unmatched_medicines.len()
        );
        for name in &report.unmatched_medicines {
            eprintln!("    - {} (取扱いなし)", name);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { path, catalog, output } => {
            eprintln!("💊 rx-ai - 処方箋解析\n");

            // 1. 画像とカタログの読み込み
            eprintln!("[1/3] 処方箋画像とカタログを読み込み中...");
            let images = scanner::collect_images(&path, config.max_image_bytes)?;
            let catalog = load_catalog(&catalog)?;
            eprintln!("✔ 画像 {}枚 / 商品 {}件\n", images.len(), catalog.len());

            // 2. AI読み取り＋照合
            eprintln!("[2/3] AI読み取り中... ({})", cli.ai_provider);
            let vision = analyzer::build_analyzer(cli.ai_provider, &config)?;
            let reports = analyzer::analyze_images(vision.as_ref(), &images, &catalog, !cli.verbose).await?;
            eprintln!("✔ 読み取り完了");
            print_summary(&reports);

            // 3. 結果出力
            eprintln!("\n[3/3] 結果を出力中...");
            write_reports(&reports, output.as_deref())?;

            eprintln!("\n✅ 解析完了");
        }

        Commands::Match { catalog, text, input, output } => {
            let (response, source) = match (text, input) {
                (Some(text), _) => (text, "-".to_string()),
                (None, Some(input)) => (std::fs::read_to_string(&input)?, input.display().to_string()),
                (None, None) => {
                    return Err(error::RxAiError::Config("--text か --input を指定してください".into()))
                }
            };

            let catalog = load_catalog(&catalog)?;
            let report = analyzer::report_from_response(&response, &source, "text", &catalog);
            let reports = [report];
            print_summary(&reports);
            write_reports(&reports, output.as_deref())?;
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  temperature: {}", config.temperature);
                println!("  最大トークン: {}", config.max_completion_tokens);
                println!("  画像サイズ上限: {} bytes", config.max_image_bytes);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}
