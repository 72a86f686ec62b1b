// ==========================================
// 組織変更反映バッチ - リファレンススナップショット取込
// ==========================================
// 職責: 現組織スナップショットと BPR 判定参照値表の読込
// 備考: スナップショットは実行ごとに全件読込し、以後不変として扱う
// ==========================================

use crate::domain::reference::{ReferenceRecord, ReferenceTable};
use crate::domain::types::BprAdFlag;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::UniversalFileParser;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// 別名を許容した文字列取得
fn get_string(row: &HashMap<String, String>, aliases: &[&str]) -> String {
    for alias in aliases {
        if let Some(v) = row.get(*alias) {
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }
    String::new()
}

pub struct ReferenceLoader;

impl ReferenceLoader {
    /// スナップショットファイルを読み込む
    pub fn load(path: &Path) -> ImportResult<ReferenceTable> {
        let rows = UniversalFileParser.parse(path)?;
        let table = Self::from_rows(&rows);
        info!(path = %path.display(), records = table.len(), "リファレンス取込完了");
        Ok(table)
    }

    /// 解析済み行マップから構築する。見出しは統一名と日本語名の両方を受理
    pub fn from_rows(rows: &[HashMap<String, String>]) -> ReferenceTable {
        let records = rows
            .iter()
            .map(|row| ReferenceRecord {
                branch_code_bpr: get_string(row, &["branch_code_bpr", "部店コード(BPR)"]),
                branch_code_jinji: get_string(row, &["branch_code_jinji", "部店コード(人事)"]),
                section_gr_code_bpr: get_string(row, &["section_gr_code_bpr", "課Grコード(BPR)"]),
                section_gr_code_jinji: get_string(
                    row,
                    &["section_gr_code_jinji", "課Grコード(人事)"],
                ),
                branch_name: get_string(row, &["branch_name", "部店名称"]),
                section_gr_name: get_string(row, &["section_gr_name", "課Gr名称"]),
                parent_branch_code: get_string(row, &["parent_branch_code", "親部店コード"]),
                business_code: get_string(row, &["business_code", "部門コード"]),
                area_code: get_string(row, &["area_code", "エリアコード"]),
                bpr_target_flag: get_string(row, &["bpr_target_flag", "BPR対象フラグ"]),
            })
            .collect();
        ReferenceTable::new(records)
    }

    /// BPR 判定参照値表 (変更・廃止時の既登録判定値) を読み込む
    ///
    /// # 戻り値
    /// - (部署コード, グループコード) → 判定区分。解釈不能な判定値の行は読み飛ばす
    pub fn load_flag_reference(path: &Path) -> ImportResult<Vec<((String, String), BprAdFlag)>> {
        let rows = UniversalFileParser.parse(path)?;
        let mut entries = Vec::with_capacity(rows.len());

        for row in &rows {
            let department = get_string(row, &["department_code", "部署コード"]);
            let group = get_string(row, &["group_code", "グループコード", "課Grコード"]);
            let flag_raw = get_string(row, &["bpr_ad_flag", "BPR・AD判定"]);

            if let Ok(flag) = flag_raw.parse::<BprAdFlag>() {
                entries.push(((department, group), flag));
            }
        }

        info!(path = %path.display(), entries = entries.len(), "判定参照値表取込完了");
        Ok(entries)
    }
}
