// ==========================================
// 組織変更反映バッチ - ディシジョンテーブル定義
// ==========================================
// 職責: 条件列 → 編集処理名の宣言的ルール表を表す
// 制約: 行は宣言順に評価し最初の全列一致で確定 (first-match-wins)
// 制約: キャッチオール行 (DataFrameEditorDefault) を必ず 1 行含む
// ==========================================

use serde::{Deserialize, Serialize};

/// キャッチオール編集処理のラベル。ルール表の整合性チェックと
/// 不一致時のフォールバックの両方で使う
pub const DECISION_RESULT_DEFAULT: &str = "DataFrameEditorDefault";

/// ルール表の結果列名 (取込時に日本語表記から正規化される)
pub const DECISION_RESULT_COLUMN: &str = "decision_result";

// ==========================================
// DecisionRow - ルール表の 1 行
// ==========================================
// 条件は (列名, 条件式) の宣言順リスト。条件式 None は
// セル空欄を意味し、その行を決して一致させない除外センチネル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRow {
    pub conditions: Vec<(String, Option<String>)>,
    pub decision_result: String,
}

impl DecisionRow {
    pub fn new(conditions: Vec<(String, Option<String>)>, decision_result: impl Into<String>) -> Self {
        Self {
            conditions,
            decision_result: decision_result.into(),
        }
    }

    /// キャッチオール行かどうか
    pub fn is_default(&self) -> bool {
        self.decision_result == DECISION_RESULT_DEFAULT
    }
}

// ==========================================
// DecisionTable - ルール表全体
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTable {
    pub rows: Vec<DecisionRow>,
}

impl DecisionTable {
    pub fn new(rows: Vec<DecisionRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// キャッチオール行を含むか (ディスパッチャ構築時の整合性チェック)
    pub fn has_default_row(&self) -> bool {
        self.rows.iter().any(DecisionRow::is_default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_default_row() {
        let table = DecisionTable::new(vec![
            DecisionRow::new(vec![("target_org".to_string(), Some("branch".to_string()))], "DataFrameEditorBranch"),
            DecisionRow::new(vec![], DECISION_RESULT_DEFAULT),
        ]);
        assert!(table.has_default_row());

        let table = DecisionTable::new(vec![DecisionRow::new(vec![], "DataFrameEditorBranch")]);
        assert!(!table.has_default_row());

        assert!(!DecisionTable::default().has_default_row());
    }
}
