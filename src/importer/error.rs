// ==========================================
// 組織変更反映バッチ - 取込モジュールエラー型
// ==========================================
// 工具: thiserror 派生マクロ
// ==========================================

use thiserror::Error;

/// 取込モジュールのエラー型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== ファイル関連 =====
    #[error("ファイルが存在しない: {0}")]
    FileNotFound(String),

    #[error("未対応のファイル形式: {0} (.xlsx/.xls/.csv のみ対応)")]
    UnsupportedFormat(String),

    #[error("ファイル読込失敗: {0}")]
    FileReadError(String),

    #[error("Excel 解析失敗: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失敗: {0}")]
    CsvParseError(String),

    // ===== マッピング関連 =====
    #[error("フィールド変換失敗 (行 {row}, 列 {field}): {message}")]
    FieldConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("必須列が見つからない: {0}")]
    MissingColumn(String),

    // ===== ルール表関連 =====
    #[error("ルール表に結果列 ({0}) がない")]
    MissingDecisionResultColumn(String),

    #[error("ルール表の結果ラベルが空 (行 {0})")]
    EmptyDecisionResult(usize),

    // ===== 設定関連 =====
    #[error("設定ファイル読込失敗 ({path}): {message}")]
    ConfigReadError { path: String, message: String },

    // ===== 汎用 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// std::io::Error からの変換
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// csv::Error からの変換
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// calamine::Error からの変換
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 型エイリアス
pub type ImportResult<T> = Result<T, ImportError>;
