//! 入力ファイルの検証
//!
//! ドロップまたはファイル選択で得たパスを、送信可能な `FileReference` に変換する。

use std::path::{Path, PathBuf};

use thiserror::Error;

/// 受け付ける画像拡張子（大文字小文字は区別しない）
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp"];

/// ファイル選択ダイアログのフィルタ名
pub const IMAGE_FILTER_NAME: &str = "Image Files";

/// 候補ファイルの入手経路
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionOrigin {
    /// ウィンドウへのドラッグ&ドロップ
    #[default]
    Drop,
    /// ファイル選択ダイアログ
    Pick,
}

impl std::str::FromStr for SubmissionOrigin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "drop" => Ok(SubmissionOrigin::Drop),
            "pick" | "dialog" => Ok(SubmissionOrigin::Pick),
            _ => Err(format!("Unknown origin: {}. Use drop or pick", s)),
        }
    }
}

/// 入力検証エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("The image file is invalid or does not exist.")]
    MissingFile { path: PathBuf },

    #[error("Please drop a valid image file (JPG, PNG, BMP).")]
    UnsupportedExtension { path: PathBuf },
}

impl InvalidInput {
    /// 通知ダイアログのタイトル
    pub fn title(&self) -> &'static str {
        match self {
            InvalidInput::MissingFile { .. } => "Error",
            InvalidInput::UnsupportedExtension { .. } => "Invalid File Type",
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            InvalidInput::MissingFile { path } | InvalidInput::UnsupportedExtension { path } => path,
        }
    }
}

/// 検証済みの送信対象ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    path: PathBuf,
    file_name: String,
    extension: String,
}

impl FileReference {
    /// パスを検証して `FileReference` を作る
    ///
    /// ドロップ経由の場合は拡張子チェックを存在チェックより先に行う。
    /// どちらの経路でも最終的に拡張子は許可リストに含まれていなければならない。
    pub fn validate(path: &Path, origin: SubmissionOrigin) -> Result<Self, InvalidInput> {
        if path.as_os_str().is_empty() {
            return Err(InvalidInput::MissingFile { path: path.to_path_buf() });
        }

        if origin == SubmissionOrigin::Drop && !is_image_path(path) {
            return Err(InvalidInput::UnsupportedExtension { path: path.to_path_buf() });
        }

        if !path.is_file() {
            return Err(InvalidInput::MissingFile { path: path.to_path_buf() });
        }

        if !is_image_path(path) {
            return Err(InvalidInput::UnsupportedExtension { path: path.to_path_buf() });
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            extension,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 送信時に使う元のファイル名
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// 小文字化済みの拡張子
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

/// 拡張子が許可リストに含まれるか
pub fn is_image_extension(ext: &str) -> bool {
    let ext = ext.trim_start_matches('.');
    IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext))
}

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| is_image_extension(&ext.to_string_lossy()))
        .unwrap_or(false)
}
