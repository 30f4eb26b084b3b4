//! プロンプト生成モジュール
//!
//! ビジョンモデルに渡す処方箋読み取り指示。
//! 応答は `parser::extract_medicine_names` で解釈する。

/// 出力例として提示する薬品名
pub const EXAMPLE_MEDICINES: &[&str] = &["Amoxicillin", "Ibuprofen", "Metformin"];

/// 処方箋読み取りプロンプト生成
///
/// # Returns
/// 画像と一緒に送るテキスト部分
pub fn build_prescription_prompt() -> String {
    let example = serde_json::to_string(EXAMPLE_MEDICINES).unwrap_or_else(|_| "[]".into());

    format!(
        r#"You are a medical prescription reader AI. Analyze this prescription image and extract ALL medicine/drug names mentioned in it.

IMPORTANT RULES:
1. Return ONLY a JSON array of medicine names, nothing else.
2. Use generic/common medicine names (not brand names when possible).
3. Include only the medicine/drug names, NOT dosage, frequency, or other details.
4. If you cannot read the prescription clearly, return what you can identify.
5. Return the response in this exact format: ["Medicine1", "Medicine2", "Medicine3"]
6. If no medicines are found, return: []

Example output: {example}"#
    )
}

/// 画像ファイルのパスを含むプロンプト（ローカルCLI用）
///
/// CLI型のAIは画像をファイルパスで受け取るため、読み込み指示を先頭に付ける
pub fn build_prescription_prompt_for_file(image_path: &str) -> String {
    format!(
        "Read the following image file and analyze it: {}\n\n{}",
        image_path,
        build_prescription_prompt()
    )
}
