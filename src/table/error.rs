// ==========================================
// 組織変更反映バッチ - テーブル検索エラー型
// ==========================================
// 工具: thiserror 派生マクロ
// ==========================================

use crate::importer::error::ImportError;
use thiserror::Error;

/// テーブル検索・キャッシュのエラー型
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("不正な検索演算子: {0} (and / or のみ)")]
    InvalidOperator(String),

    #[error("述語の真偽マスク長が不一致: 期待 {expected} 行, 実際 {actual} 行")]
    MaskLengthMismatch { expected: usize, actual: usize },

    #[error("テーブルファイルが見つからない: {0}")]
    TableNotFound(String),

    #[error("テーブル読込失敗: {0}")]
    TableLoad(#[from] ImportError),

    #[error("ファイル情報取得失敗: {0}")]
    Io(#[from] std::io::Error),
}

/// Result 型エイリアス
pub type SearchResult<T> = Result<T, SearchError>;
