//! 処方箋画像の取り込み
//!
//! 受け付ける形式とサイズ上限を検査し、AIに渡す画像情報を作る。

use crate::error::{RxAiError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct PrescriptionImage {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: &'static str,
    pub size: u64,
}

impl PrescriptionImage {
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.path)?)
    }
}

/// 拡張子 → MIMEタイプ
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
];

/// 拡張子からMIMEタイプを判定（大文字小文字は区別しない）
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    IMAGE_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// 単一の処方箋画像を検査して読み込む
pub fn load_image(path: &Path, max_bytes: u64) -> Result<PrescriptionImage> {
    if !path.is_file() {
        return Err(RxAiError::FileNotFound(path.display().to_string()));
    }

    let mime_type = mime_type_for(path)
        .ok_or_else(|| RxAiError::UnsupportedImage(path.display().to_string()))?;

    let size = std::fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(RxAiError::ImageTooLarge {
            path: path.display().to_string(),
            size,
            limit: max_bytes,
        });
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(PrescriptionImage {
        path: path.to_path_buf(),
        file_name,
        mime_type,
        size,
    })
}

/// フォルダ直下の処方箋画像を列挙
///
/// 対応外の拡張子は無視、サイズ超過は警告してスキップする
pub fn scan_folder(folder: &Path, max_bytes: u64) -> Result<Vec<PrescriptionImage>> {
    if !folder.is_dir() {
        return Err(RxAiError::FolderNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || mime_type_for(path).is_none() {
            continue;
        }

        match load_image(path, max_bytes) {
            Ok(image) => images.push(image),
            Err(RxAiError::ImageTooLarge { path, size, limit }) => {
                tracing::warn!(%path, size, limit, "サイズ上限超過のためスキップ");
            }
            Err(e) => return Err(e),
        }
    }

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}

/// ファイルならその1枚、フォルダなら直下の画像すべて
pub fn collect_images(path: &Path, max_bytes: u64) -> Result<Vec<PrescriptionImage>> {
    if path.is_dir() {
        let images = scan_folder(path, max_bytes)?;
        if images.is_empty() {
            return Err(RxAiError::NoImagesFound(path.display().to_string()));
        }
        Ok(images)
    } else {
        Ok(vec![load_image(path, max_bytes)?])
    }
}
