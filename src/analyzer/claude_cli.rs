//! Claude CLI連携モジュール
//!
//! `claude -p` に画像ファイルのパスを含むプロンプトを渡し、テキスト応答を得る

use super::VisionAnalyzer;
use crate::config::Config;
use crate::error::{RxAiError, Result};
use crate::scanner::PrescriptionImage;
use async_trait::async_trait;
use prescription_ai_common::build_prescription_prompt_for_file;
use std::time::Duration;
use tokio::process::Command;

pub struct ClaudeCliAnalyzer {
    timeout: Duration,
}

impl ClaudeCliAnalyzer {
    pub fn new(config: &Config) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }
}

/// CLI引数として渡せるようにプロンプトを1行化
fn flatten_prompt(prompt: &str) -> String {
    prompt.replace('\n', " ")
}

/// cmd /c 経由ではダブルクォートをエスケープする
#[cfg_attr(not(windows), allow(dead_code))]
fn escape_for_cmd(prompt: &str) -> String {
    prompt.replace('"', "\\\"")
}

async fn run_claude_cli(prompt: &str, timeout: Duration) -> Result<String> {
    // Claude CLI呼び出し（Windowsではcmd /c経由）
    #[cfg(windows)]
    let mut command = {
        let mut c = Command::new("cmd");
        let escaped = escape_for_cmd(prompt);
        c.args(["/c", "claude", "-p", escaped.as_str(), "--output-format", "text"]);
        c
    };

    #[cfg(not(windows))]
    let mut command = {
        let mut c = Command::new("claude");
        c.args(["-p", prompt, "--output-format", "text"]);
        c
    };

    command.kill_on_drop(true);

    let output = tokio::time::timeout(timeout, command.output())
        .await
        .map_err(|_| RxAiError::CliExecution(format!("Claude CLI timed out after {:?}", timeout)))?
        .map_err(|e| RxAiError::CliExecution(format!("Claude CLI実行エラー: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RxAiError::ApiCall(format!(
            "Claude CLI failed (code {:?}): {}",
            output.status.code(),
            stderr
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

#[async_trait]
impl VisionAnalyzer for ClaudeCliAnalyzer {
    fn name(&self) -> &str {
        "claude"
    }

    async fn analyze(&self, image: &PrescriptionImage) -> Result<String> {
        let abs_path = std::fs::canonicalize(&image.path)?;
        let path_str = abs_path.display().to_string().replace('\\', "/");
        let prompt = flatten_prompt(&build_prescription_prompt_for_file(&path_str));

        tracing::debug!(prompt_len = prompt.len(), "Claude CLI 呼び出し");
        run_claude_cli(&prompt, self.timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_prompt() {
        let prompt = "line1\nformat: [\"A\", \"B\"]";
        // プロセス引数に直接渡すのでクォートはそのまま
        assert_eq!(flatten_prompt(prompt), r#"line1 format: ["A", "B"]"#);
    }

    #[test]
    fn test_flatten_prompt_keeps_json_example() {
        let prompt = flatten_prompt(&build_prescription_prompt_for_file("/tmp/rx.png"));
        assert!(!prompt.contains('\n'));
        assert!(!prompt.contains('\\'));
        assert!(prompt.contains(r#"["Medicine1", "Medicine2", "Medicine3"]"#));
        assert!(prompt.contains("/tmp/rx.png"));
    }

    #[test]
    fn test_escape_for_cmd() {
        assert_eq!(escape_for_cmd(r#"["A", "B"]"#), r#"[\"A\", \"B\"]"#);
    }

    #[test]
    fn test_new_uses_config_timeout() {
        let config = Config {
            timeout_seconds: 7,
            ..Config::default()
        };
        let analyzer = ClaudeCliAnalyzer::new(&config);
        assert_eq!(analyzer.timeout, Duration::from_secs(7));
        assert_eq!(analyzer.name(), "claude");
    }
}
