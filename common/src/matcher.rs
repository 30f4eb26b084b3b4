//! カタログ照合モジュール
//!
//! AIが読み取った薬品名（候補名）と商品タイトルをあいまい照合する。
//!
//! ## 判定順（最初に真になった時点で一致）
//! 1. 包含: 正規化後、どちらかがもう一方の部分文字列
//! 2. 単語前方一致: 3文字以上の単語同士で、どちらかが前方一致
//! 3. 単語近似一致: 文字数差2以内・候補側4文字以上で、先頭揃えの位置一致率が0.75以上
//!
//! 近似一致は編集距離ではなく位置ごとの比較なので、挿入・脱字で位置がずれると一致しない。

use crate::types::{CatalogRecord, MatchResult};
use std::collections::HashSet;

/// 単語照合の対象とする最小文字数（これ未満の単語は無視）
pub const MIN_WORD_CHARS: usize = 3;

/// 近似一致で候補側の単語に要求する最小文字数
pub const MIN_SIMILAR_WORD_CHARS: usize = 4;

/// 近似一致で許容する文字数差
pub const MAX_LENGTH_DIFF: usize = 2;

/// 近似一致とみなす位置一致率
pub const SIMILARITY_THRESHOLD: f64 = 0.75;

/// 照合用に正規化（小文字化＋前後空白除去）
pub fn normalize_name(value: &str) -> String {
    value.trim().to_lowercase()
}

/// 先頭揃えで同じ位置の文字が一致する割合（短い方の長さで割る）
///
/// どちらかが空なら0.0
pub fn positional_similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let min_len = a.len().min(b.len());
    if min_len == 0 {
        return 0.0;
    }

    let matches = a.iter().zip(b.iter()).filter(|(x, y)| x == y).count();
    matches as f64 / min_len as f64
}

/// 単語ペアの判定（前方一致 → 近似一致）
fn words_match(name_word: &str, title_word: &str, name_len: usize, title_len: usize) -> bool {
    if title_word.starts_with(name_word) || name_word.starts_with(title_word) {
        return true;
    }

    name_len.abs_diff(title_len) <= MAX_LENGTH_DIFF
        && name_len >= MIN_SIMILAR_WORD_CHARS
        && positional_similarity(name_word, title_word) >= SIMILARITY_THRESHOLD
}

/// 候補名が商品タイトルを指しているか判定
///
/// # Examples
/// ```
/// use prescription_ai_common::fuzzy_match;
///
/// assert!(fuzzy_match("amoxicillin", "Amoxicillin 500mg Capsules"));
/// assert!(!fuzzy_match("ibuprofen", "Paracetamol 500mg"));
/// ```
pub fn fuzzy_match(candidate: &str, title: &str) -> bool {
    let name = normalize_name(candidate);
    let title = normalize_name(title);

    if title.contains(&name) || name.contains(&title) {
        return true;
    }

    let title_words: Vec<(&str, usize)> = title
        .split_whitespace()
        .map(|w| (w, w.chars().count()))
        .filter(|(_, len)| *len >= MIN_WORD_CHARS)
        .collect();

    name.split_whitespace()
        .map(|w| (w, w.chars().count()))
        .filter(|(_, len)| *len >= MIN_WORD_CHARS)
        .any(|(nw, nlen)| {
            title_words
                .iter()
                .any(|&(tw, tlen)| words_match(nw, tw, nlen, tlen))
        })
}

/// 候補名リストをカタログと照合
///
/// - 候補名ごとにカタログ順に走査し、最初に一致したレコードを採用（最良一致は探さない）
/// - 既に採用済みの識別子なら追加しないが、候補名は一致扱い
/// - どれにも一致しなければ `unmatched_candidates` へ
pub fn match_catalog<S, R>(candidates: &[S], catalog: &[R]) -> MatchResult<R>
where
    S: AsRef<str>,
    R: CatalogRecord + Clone,
{
    let mut result = MatchResult::default();
    let mut seen: HashSet<&str> = HashSet::new();

    for candidate in candidates {
        let candidate = candidate.as_ref();

        match catalog.iter().find(|r| fuzzy_match(candidate, r.title())) {
            Some(record) => {
                if seen.insert(record.record_id()) {
                    result.matched_records.push(record.clone());
                }
            }
            None => result.unmatched_candidates.push(candidate.to_string()),
        }
    }

    tracing::info!(
        matched = result.matched_records.len(),
        unmatched = result.unmatched_candidates.len(),
        "カタログ照合完了"
    );

    result
}
