//! Prescription AI Common Library
//!
//! 処方箋画像のAI読み取り結果を商品カタログと照合するための共有ロジック

pub mod types;
pub mod error;
pub mod catalog;
pub mod parser;
pub mod matcher;
pub mod prompts;
pub mod analyzer;
pub mod report;

pub use types::{CatalogRecord, MatchResult, Product};
pub use error::{Error, Result};
pub use catalog::Catalog;
pub use parser::extract_medicine_names;
pub use matcher::{fuzzy_match, match_catalog};
pub use prompts::{build_prescription_prompt, build_prescription_prompt_for_file};
pub use analyzer::{match_prescription, PrescriptionMatch};
pub use report::{AnalysisReport, MatchedProduct};
