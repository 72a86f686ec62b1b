// ==========================================
// 組織変更反映バッチ - ディシジョンテーブル取込
// ==========================================
// 職責: ルール表ファイルを読み、日本語の条件表記・列見出しを
//       条件評価エンジンの語彙へ正規化する
// 正規化: 「4桁」「5桁」「なし」「あり」→ 登録済み判定関数名
//         「任意」「*」→ ワイルドカード any / 空欄 → 除外センチネル
// ==========================================

use crate::domain::decision::{DecisionRow, DecisionTable, DECISION_RESULT_COLUMN};
use crate::domain::request::columns as request_columns;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalFileParser;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// 結果列の許容見出し (最初に見つかったものを使う)
const RESULT_HEADERS: [&str; 3] = [DECISION_RESULT_COLUMN, "判定結果", "編集処理"];

pub struct DecisionTableLoader;

impl DecisionTableLoader {
    /// ルール表ファイルを読み込んで正規化する
    pub fn load(path: &Path) -> ImportResult<DecisionTable> {
        let rows = UniversalFileParser.parse(path)?;
        let table = Self::from_rows(&rows)?;
        info!(path = %path.display(), rows = table.len(), "ルール表取込完了");
        Ok(table)
    }

    /// 解析済みの行マップ列から構築する
    pub fn from_rows(rows: &[HashMap<String, String>]) -> ImportResult<DecisionTable> {
        let mut decision_rows = Vec::with_capacity(rows.len());

        for (idx, row) in rows.iter().enumerate() {
            let result_header = RESULT_HEADERS
                .iter()
                .find(|h| row.contains_key(**h))
                .ok_or_else(|| {
                    ImportError::MissingDecisionResultColumn(DECISION_RESULT_COLUMN.to_string())
                })?;

            let decision_result = row[*result_header].trim().to_string();
            if decision_result.is_empty() {
                return Err(ImportError::EmptyDecisionResult(idx + 1));
            }

            // 条件列: 結果列以外すべて。列名順で安定化する
            let mut condition_columns: Vec<&String> =
                row.keys().filter(|k| k.as_str() != *result_header).collect();
            condition_columns.sort();

            let conditions = condition_columns
                .into_iter()
                .map(|col| {
                    (
                        Self::normalize_header(col),
                        Self::normalize_condition(&row[col]),
                    )
                })
                .collect();

            decision_rows.push(DecisionRow::new(conditions, decision_result));
        }

        Ok(DecisionTable::new(decision_rows))
    }

    /// 条件列の日本語見出しを統一レイアウト列名へ正規化する
    fn normalize_header(header: &str) -> String {
        match header.trim() {
            "申請元" | "申請元区分" => request_columns::APPLICANT.to_string(),
            "申請種別" => request_columns::APPLICATION_TYPE.to_string(),
            "対象" | "対象区分" => request_columns::TARGET_ORG.to_string(),
            "部店コード" => request_columns::BRANCH_CODE.to_string(),
            "部店名称" => request_columns::BRANCH_NAME.to_string(),
            "課Grコード" => request_columns::SECTION_GR_CODE.to_string(),
            "課Gr名称" => request_columns::SECTION_GR_NAME.to_string(),
            "親部店コード" => request_columns::PARENT_BRANCH_CODE.to_string(),
            "常駐部店コード" => request_columns::RESIDENT_BRANCH_CODE.to_string(),
            "部門・エリアコード" => request_columns::BUSINESS_AND_AREA_CODE.to_string(),
            "備考" => request_columns::REMARKS.to_string(),
            other => other.to_string(),
        }
    }

    /// 条件セル 1 個の正規化
    ///
    /// # 戻り値
    /// - None: 空欄 (その行を決して一致させない除外センチネル)
    /// - Some(expr): 正規化済みの条件式
    fn normalize_condition(cell: &str) -> Option<String> {
        let cell = cell.trim();
        if cell.is_empty() {
            return None;
        }

        // カンマ区切り OR は各トークンを個別に正規化して再結合
        let normalized = cell
            .replace('，', ",")
            .split(',')
            .map(|token| Self::normalize_token(token.trim()))
            .collect::<Vec<_>>()
            .join(",");
        Some(normalized)
    }

    fn normalize_token(token: &str) -> String {
        match token {
            // 判定関数名
            "4桁" => "is_4digits".to_string(),
            "5桁" => "is_5digits".to_string(),
            "なし" => "is_empty".to_string(),
            "あり" => "is_not_empty".to_string(),
            // ワイルドカード
            "任意" | "*" => "any".to_string(),
            // 区分値 (統一レイアウトの行ビューは英字トークンを持つ)
            "新設" => "new".to_string(),
            "変更" => "modify".to_string(),
            "廃止" => "discontinue".to_string(),
            "部店" => "branch".to_string(),
            "課Gr" => "section_gr".to_string(),
            "エリア" => "area".to_string(),
            "拠点内営業部" => "internal_sales_dept".to_string(),
            "人事部" => "jinji".to_string(),
            "国際事務企画部" => "kokusai".to_string(),
            "関連会社" => "kanren".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::DECISION_RESULT_DEFAULT;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_label_normalization() {
        let rows = vec![row(&[
            ("対象区分", "部店"),
            ("部店コード", "4桁,5桁"),
            ("課Grコード", "なし"),
            ("判定結果", "DataFrameEditorBranch"),
        ])];

        let table = DecisionTableLoader::from_rows(&rows).unwrap();
        let conditions: HashMap<_, _> = table.rows[0].conditions.iter().cloned().collect();
        assert_eq!(
            conditions.get("branch_code").unwrap().as_deref(),
            Some("is_4digits,is_5digits")
        );
        assert_eq!(
            conditions.get("section_gr_code").unwrap().as_deref(),
            Some("is_empty")
        );
        assert_eq!(
            conditions.get("target_org").unwrap().as_deref(),
            Some("branch")
        );
    }

    #[test]
    fn test_empty_cell_is_exclusion_sentinel() {
        let rows = vec![row(&[
            ("部店コード", ""),
            ("判定結果", DECISION_RESULT_DEFAULT),
        ])];
        let table = DecisionTableLoader::from_rows(&rows).unwrap();
        assert_eq!(table.rows[0].conditions[0].1, None);
    }

    #[test]
    fn test_missing_result_column() {
        let rows = vec![row(&[("部店コード", "任意")])];
        assert!(matches!(
            DecisionTableLoader::from_rows(&rows),
            Err(ImportError::MissingDecisionResultColumn(_))
        ));
    }

    #[test]
    fn test_wildcard_normalization() {
        let rows = vec![row(&[("部店コード", "任意"), ("判定結果", "X")])];
        let table = DecisionTableLoader::from_rows(&rows).unwrap();
        assert_eq!(table.rows[0].conditions[0].1.as_deref(), Some("any"));
    }
}
