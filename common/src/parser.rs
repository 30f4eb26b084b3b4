//! AIレスポンスパーサー
//!
//! ビジョンモデルの応答テキストから薬品名の候補リストを取り出す。
//! モデルには `["Name1", "Name2"]` 形式を指示しているが、守られる保証はないため
//! 失敗時はプレーンテキストからの復元にフォールバックする。

use regex::Regex;

/// フォールバック時に断片から取り除く文字
const STRIP_CHARS: &[char] = &['[', ']', '"', '\'', '.'];

/// フォールバック時に残す断片の最小文字数（これ以下は捨てる）
const MIN_FRAGMENT_CHARS: usize = 2;

/// レスポンスから最初の `[...]` を抽出（最短一致）
///
/// # Examples
/// ```
/// use prescription_ai_common::parser::extract_bracketed;
///
/// let span = extract_bracketed(r#"Result: ["A"] and ["B"]"#);
/// assert_eq!(span, Some(r#"["A"]"#));
/// ```
pub fn extract_bracketed(response: &str) -> Option<&str> {
    lazy_static::lazy_static! {
        static ref BRACKET_RE: Regex = Regex::new(r"(?s)\[.*?\]").unwrap();
    }

    BRACKET_RE.find(response).map(|m| m.as_str())
}

/// `[...]` を文字列配列としてパース
///
/// 要素に文字列以外（数値・オブジェクト等）が含まれる場合は失敗扱い
fn parse_string_array(span: &str) -> Option<Vec<String>> {
    serde_json::from_str::<Vec<String>>(span).ok()
}

/// プレーンテキストから薬品名を復元
///
/// カンマ・改行で分割し、括弧・引用符・ピリオド・数字を除去してトリム。
/// 2文字以下の断片は捨てる。
pub fn fallback_extract(response: &str) -> Vec<String> {
    response
        .split([',', '\n'])
        .map(|fragment| {
            fragment
                .chars()
                .filter(|c| !STRIP_CHARS.contains(c) && !c.is_ascii_digit())
                .collect::<String>()
                .trim()
                .to_string()
        })
        .filter(|name| name.chars().count() > MIN_FRAGMENT_CHARS)
        .collect()
}

/// AIレスポンスから薬品名リストを抽出
///
/// 抽出優先順位:
/// 1. 最初の `[...]` を文字列配列としてパース（要素はそのまま、順序維持）
/// 2. 失敗したら元のテキスト全体に対して `fallback_extract`
///
/// 失敗しない。何も取れなければ空のVecを返す。
///
/// # Examples
/// ```
/// use prescription_ai_common::extract_medicine_names;
///
/// let names = extract_medicine_names(r#"["Amoxicillin", "Ibuprofen"]"#);
/// assert_eq!(names, vec!["Amoxicillin", "Ibuprofen"]);
/// ```
pub fn extract_medicine_names(response: &str) -> Vec<String> {
    if let Some(span) = extract_bracketed(response) {
        if let Some(names) = parse_string_array(span) {
            tracing::debug!(count = names.len(), "JSON配列から薬品名を抽出");
            return names;
        }
        tracing::warn!(raw = span, "[...] のパースに失敗、テキストから復元します");
    } else if !response.trim().is_empty() {
        tracing::warn!("[...] が見つかりません、テキストから復元します");
    }

    fallback_extract(response)
}
