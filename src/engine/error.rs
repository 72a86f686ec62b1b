// ==========================================
// 組織変更反映バッチ - ルールエンジンエラー型
// ==========================================
// 工具: thiserror 派生マクロ
// 方針: 構成不備・入力不正は即時エラー (リトライしない)。
//       「一致なし」は正常系の戻り値であってエラーではない
// ==========================================

use thiserror::Error;

/// ルールエンジンのエラー型
#[derive(Error, Debug)]
pub enum RuleError {
    // ===== 構成不備 (構築時に即検出) =====
    #[error("ルール表が空")]
    EmptyDecisionTable,

    #[error("ルール表にキャッチオール行 ({0}) がない")]
    MissingDefaultRow(String),

    #[error("部店コードプレフィックスの桁数が不正: {code} ({length} 桁。4 または 5 桁のみ)")]
    InvalidBranchCodePrefix { code: String, length: usize },

    // ===== 呼び出し時の入力不正 =====
    #[error("申請明細 (行ビュー) が空")]
    EmptyRequestRow,

    #[error("未登録の編集処理名: {0}")]
    UnknownEditor(String),

    #[error("グループコード指定時はグループ名称が必須")]
    MissingGroupName,

    #[error("不正な申請種別: {0}")]
    InvalidApplicationType(String),
}

/// Result 型エイリアス
pub type RuleResult<T> = Result<T, RuleError>;
