// ==========================================
// 組織変更反映バッチ - 変更申請レコード (統一レイアウト)
// ==========================================
// 職責: 提出元ごとのフォーム差異を吸収した後の 1 明細を表す
// 制約: 部店コード長は 4 桁 (部店粒度) または 5 桁 (課・エリア粒度、
//       先頭 4 桁が所属部店)
// ==========================================

use crate::domain::types::{Applicant, ApplicationType, TargetOrg};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// 統一レイアウト列名
// ==========================================
// ディシジョンテーブルの条件列はこの列名で記述する
pub mod columns {
    pub const REQUEST_ID: &str = "request_id";
    pub const APPLICANT: &str = "applicant";
    pub const APPLICATION_TYPE: &str = "application_type";
    pub const TARGET_ORG: &str = "target_org";
    pub const BRANCH_CODE: &str = "branch_code";
    pub const BRANCH_NAME: &str = "branch_name";
    pub const SECTION_GR_CODE: &str = "section_gr_code";
    pub const SECTION_GR_NAME: &str = "section_gr_name";
    pub const PARENT_BRANCH_CODE: &str = "parent_branch_code";
    pub const RESIDENT_BRANCH_CODE: &str = "resident_branch_code";
    pub const BUSINESS_AND_AREA_CODE: &str = "business_and_area_code";
    pub const REMARKS: &str = "remarks";

    // 前処理で付与される派生列
    pub const BRANCH_CODE_PREFIX4: &str = "branch_code_prefix4";
}

// ==========================================
// RequestRecord - 変更申請 1 明細
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub request_id: String,
    pub applicant: Option<Applicant>,
    pub application_type: Option<ApplicationType>,
    pub target_org: Option<TargetOrg>,
    pub branch_code: String,
    pub branch_name: String,
    pub section_gr_code: String,
    pub section_gr_name: String,
    pub parent_branch_code: String,
    pub resident_branch_code: String,
    pub business_and_area_code: String,
    pub remarks: String,

    /// 取込元ファイルの行番号 (検証報告用)
    #[serde(default)]
    pub row_number: usize,
}

impl RequestRecord {
    /// 部店コード先頭 4 桁 (4 桁未満ならそのまま)
    pub fn branch_code_prefix4(&self) -> &str {
        let end = self
            .branch_code
            .char_indices()
            .nth(4)
            .map_or(self.branch_code.len(), |(i, _)| i);
        &self.branch_code[..end]
    }

    /// 部店コード桁数
    pub fn branch_code_len(&self) -> usize {
        self.branch_code.chars().count()
    }

    /// 判定用の部署コード (部店コード先頭 4 桁)
    pub fn department_code(&self) -> &str {
        self.branch_code_prefix4()
    }

    /// 判定用のグループコード (課Grコード。空なら None)
    pub fn group_code(&self) -> Option<&str> {
        let code = self.section_gr_code.trim();
        (!code.is_empty()).then_some(code)
    }

    /// 判定用のグループ名称 (課Gr名称。空なら None)
    pub fn group_name(&self) -> Option<&str> {
        let name = self.section_gr_name.trim();
        (!name.is_empty()).then_some(name)
    }

    /// ディシジョンテーブル評価・編集処理へ渡す行ビュー
    ///
    /// # 戻り値
    /// - 統一レイアウト列名 → 文字列値 (派生列を含む)
    pub fn to_row(&self) -> HashMap<String, String> {
        let mut row = HashMap::new();
        row.insert(columns::REQUEST_ID.to_string(), self.request_id.clone());
        row.insert(
            columns::APPLICANT.to_string(),
            self.applicant.map(|a| a.to_string()).unwrap_or_default(),
        );
        row.insert(
            columns::APPLICATION_TYPE.to_string(),
            self.application_type.map(|t| t.to_string()).unwrap_or_default(),
        );
        row.insert(
            columns::TARGET_ORG.to_string(),
            self.target_org.map(|t| t.to_string()).unwrap_or_default(),
        );
        row.insert(columns::BRANCH_CODE.to_string(), self.branch_code.clone());
        row.insert(columns::BRANCH_NAME.to_string(), self.branch_name.clone());
        row.insert(columns::SECTION_GR_CODE.to_string(), self.section_gr_code.clone());
        row.insert(columns::SECTION_GR_NAME.to_string(), self.section_gr_name.clone());
        row.insert(
            columns::PARENT_BRANCH_CODE.to_string(),
            self.parent_branch_code.clone(),
        );
        row.insert(
            columns::RESIDENT_BRANCH_CODE.to_string(),
            self.resident_branch_code.clone(),
        );
        row.insert(
            columns::BUSINESS_AND_AREA_CODE.to_string(),
            self.business_and_area_code.clone(),
        );
        row.insert(columns::REMARKS.to_string(), self.remarks.clone());
        row.insert(
            columns::BRANCH_CODE_PREFIX4.to_string(),
            self.branch_code_prefix4().to_string(),
        );
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_code_prefix4() {
        let mut record = RequestRecord::default();
        record.branch_code = "78181".to_string();
        assert_eq!(record.branch_code_prefix4(), "7818");

        record.branch_code = "1234".to_string();
        assert_eq!(record.branch_code_prefix4(), "1234");

        record.branch_code = "12".to_string();
        assert_eq!(record.branch_code_prefix4(), "12");
    }

    #[test]
    fn test_group_code_empty_is_none() {
        let mut record = RequestRecord::default();
        record.section_gr_code = "  ".to_string();
        assert_eq!(record.group_code(), None);

        record.section_gr_code = "01".to_string();
        assert_eq!(record.group_code(), Some("01"));
    }

    #[test]
    fn test_to_row_contains_derived_prefix() {
        let mut record = RequestRecord::default();
        record.branch_code = "78181".to_string();
        record.target_org = Some(TargetOrg::Branch);

        let row = record.to_row();
        assert_eq!(row.get(columns::BRANCH_CODE_PREFIX4).unwrap(), "7818");
        assert_eq!(row.get(columns::TARGET_ORG).unwrap(), "branch");
    }
}
