// ==========================================
// 組織変更反映バッチ - 条件評価エンジン
// ==========================================
// 職責: ルール表 1 行の条件式を申請明細 (行ビュー) へ評価する
// 評価順: 空欄 → 不一致 / "any" → 一致 / カンマ → OR /
//         登録済み判定関数 / 正規表現 (先頭一致) / 文字列等値
// 制約: 行は宣言順に評価し最初の全列一致で確定する
// ==========================================

use crate::domain::decision::{DecisionRow, DecisionTable, DECISION_RESULT_DEFAULT};
use regex::Regex;
use std::collections::HashMap;
use std::sync::Mutex;

/// 条件式ワイルドカード ("don't care")
pub const CONDITION_ANY: &str = "any";

// ==========================================
// 登録済み判定関数
// ==========================================
// 明示的なリテラル登録のみ。メンバ走査による自動登録はしない

fn is_4digits(value: &str) -> bool {
    value.chars().count() == 4 && value.chars().all(|c| c.is_ascii_digit())
}

fn is_5digits(value: &str) -> bool {
    value.chars().count() == 5 && value.chars().all(|c| c.is_ascii_digit())
}

fn is_empty(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_not_empty(value: &str) -> bool {
    !is_empty(value)
}

// ==========================================
// ConditionEvaluator
// ==========================================
pub struct ConditionEvaluator {
    checks: HashMap<&'static str, fn(&str) -> bool>,
    // 同じ条件式を行ごとに再コンパイルしないための覚え書き。
    // コンパイル不能な式は None を記録して以後スキップする
    regex_cache: Mutex<HashMap<String, Option<Regex>>>,
}

impl Default for ConditionEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionEvaluator {
    pub fn new() -> Self {
        let mut checks: HashMap<&'static str, fn(&str) -> bool> = HashMap::new();
        checks.insert("is_4digits", is_4digits);
        checks.insert("is_5digits", is_5digits);
        checks.insert("is_empty", is_empty);
        checks.insert("is_not_empty", is_not_empty);

        Self {
            checks,
            regex_cache: Mutex::new(HashMap::new()),
        }
    }

    /// 条件式 1 個を値へ評価する
    ///
    /// # 引数
    /// - value: 申請明細側の値 (文字列正規化済み)
    /// - condition: 条件式。None はセル空欄 (除外センチネル) で常に不一致
    ///
    /// # 評価順 (最初に該当した規則で確定)
    /// 1. None / 空文字列 → false (空文字列を正規表現として扱わない)
    /// 2. "any" → true
    /// 3. カンマ区切り → 各トークンを OR 結合
    /// 4. 登録済み判定関数名 → 関数適用
    /// 5. 正規表現としてコンパイル可能 → 先頭一致 (値の先頭からの一致のみ)
    /// 6. 文字列等値
    pub fn check_condition(&self, value: &str, condition: Option<&str>) -> bool {
        let condition = match condition {
            Some(c) => c.trim(),
            None => return false,
        };
        if condition.is_empty() {
            return false;
        }

        if condition == CONDITION_ANY {
            return true;
        }

        if condition.contains(',') {
            return condition
                .split(',')
                .map(str::trim)
                .any(|token| self.check_condition(value, Some(token)));
        }

        if let Some(check) = self.checks.get(condition) {
            return check(value);
        }

        if let Some(matched) = self.try_regex(value, condition) {
            return matched;
        }

        value == condition
    }

    /// ルール表全体を評価し、最初に全列一致した行の結果ラベルを返す
    ///
    /// # 引数
    /// - row: 統一レイアウトの行ビュー (列名 → 値)
    /// - table: ルール表 (宣言順)
    ///
    /// # 戻り値
    /// - 一致行の decision_result。不一致・行ビュー空なら
    ///   キャッチオールラベル
    pub fn evaluate(&self, row: &HashMap<String, String>, table: &DecisionTable) -> String {
        if row.is_empty() {
            return DECISION_RESULT_DEFAULT.to_string();
        }

        for decision_row in &table.rows {
            if self.row_matches(row, decision_row) {
                return decision_row.decision_result.clone();
            }
        }

        DECISION_RESULT_DEFAULT.to_string()
    }

    /// ルール表 1 行の全列一致判定 (列単位の暗黙 AND)
    ///
    /// 行ビューに存在しない条件列は判定対象外
    fn row_matches(&self, row: &HashMap<String, String>, decision_row: &DecisionRow) -> bool {
        decision_row.conditions.iter().all(|(column, condition)| {
            match row.get(column) {
                Some(value) => self.check_condition(value, condition.as_deref()),
                None => true,
            }
        })
    }

    /// 正規表現条件の判定
    ///
    /// # 戻り値
    /// - Some(bool): 条件式が正規表現としてコンパイルできた場合の一致結果
    /// - None: コンパイル不能 (等値比較へフォールバック)
    fn try_regex(&self, value: &str, condition: &str) -> Option<bool> {
        let mut cache = self.regex_cache.lock().unwrap_or_else(|e| e.into_inner());
        let entry = cache
            .entry(condition.to_string())
            .or_insert_with(|| Regex::new(condition).ok());

        entry
            .as_ref()
            .map(|re| re.find(value).is_some_and(|m| m.start() == 0))
    }
}
