// ==========================================
// 組織変更反映バッチ - リファレンス存在チェッカ
// ==========================================
// 職責: 部店コードプレフィックス単位で、申請に対応する
//       現組織レコードの有無を判定する
// 判定順: 特例チェック (登録制) → 対象区分別の標準比較
// 備考: 「存在しない」は正常系の戻り値 (false) であってエラーではない
// ==========================================

use crate::domain::reference::ReferenceTable;
use crate::domain::request::RequestRecord;
use crate::domain::types::TargetOrg;
use crate::engine::error::{RuleError, RuleResult};
use tracing::debug;

// ==========================================
// SpecialCaseCheck Trait
// ==========================================
// 用途: 標準比較に先行する名前付き特例の登録口
pub trait SpecialCaseCheck: Send + Sync {
    fn name(&self) -> &'static str;

    /// この特例がこの明細に対して一致を宣言するか
    fn matches(&self, request: &RequestRecord, reference: &ReferenceTable) -> bool;
}

// ==========================================
// Section7818Check - 7818 特例
// ==========================================
// 課Grコード(BPR) が 7818 始まりのリファレンス行のうち、
// 申請の課Grコードと完全一致するものがあれば一致とする
pub struct Section7818Check;

impl SpecialCaseCheck for Section7818Check {
    fn name(&self) -> &'static str {
        "section_7818"
    }

    fn matches(&self, request: &RequestRecord, reference: &ReferenceTable) -> bool {
        reference
            .find_by_section_gr_bpr_prefix("7818")
            .any(|r| r.section_gr_code_bpr == request.section_gr_code)
    }
}

// ==========================================
// ReferenceExistenceChecker
// ==========================================
pub struct ReferenceExistenceChecker {
    prefix: String,
    requests: Vec<RequestRecord>,
    special_checks: Vec<Box<dyn SpecialCaseCheck>>,
}

impl ReferenceExistenceChecker {
    /// # 引数
    /// - prefix: 対象の部店コードプレフィックス (4 桁または 5 桁)
    /// - requests: 申請明細全体。先頭 4 桁が一致する明細のみ保持する
    ///
    /// # エラー
    /// - InvalidBranchCodePrefix: 桁数が 4 でも 5 でもない
    pub fn new(prefix: &str, requests: &[RequestRecord]) -> RuleResult<Self> {
        let length = prefix.chars().count();
        if length != 4 && length != 5 {
            return Err(RuleError::InvalidBranchCodePrefix {
                code: prefix.to_string(),
                length,
            });
        }

        let prefix4: String = prefix.chars().take(4).collect();
        let filtered = requests
            .iter()
            .filter(|r| r.branch_code_prefix4() == prefix4)
            .cloned()
            .collect();

        Ok(Self {
            prefix: prefix.to_string(),
            requests: filtered,
            special_checks: vec![Box::new(Section7818Check)],
        })
    }

    /// 特例チェックを差し替える (テスト・個別運用向け)
    pub fn with_special_checks(mut self, checks: Vec<Box<dyn SpecialCaseCheck>>) -> Self {
        self.special_checks = checks;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// 対応するリファレンスレコードの有無
    ///
    /// # 戻り値
    /// - true: いずれかの明細が特例または標準比較で一致
    /// - false: 対象明細なし、または全明細不一致
    pub fn check(&self, reference: &ReferenceTable) -> bool {
        for request in &self.requests {
            if let Some(check) = self
                .special_checks
                .iter()
                .find(|c| c.matches(request, reference))
            {
                debug!(prefix = %self.prefix, special = check.name(), "特例チェック一致");
                return true;
            }

            if Self::matches_by_org_type(request, reference) {
                return true;
            }
        }
        false
    }

    /// 対象区分別の標準比較
    fn matches_by_org_type(request: &RequestRecord, reference: &ReferenceTable) -> bool {
        match request.target_org {
            // 部店: 4 桁は BPR 系コード一致かつ親レコードの存在、
            //       5 桁は人事系コード一致かつ課Grコード(人事) 等値
            Some(TargetOrg::Branch) => {
                if request.branch_code_len() == 4 {
                    reference
                        .find_by_branch_code_bpr(&request.branch_code)
                        .any(|r| r.is_parent())
                } else {
                    reference
                        .find_by_branch_code_jinji(&request.branch_code)
                        .any(|r| r.section_gr_code_jinji == request.section_gr_code)
                }
            }
            // 課Gr (拠点内営業部も課粒度として同じ比較): 桁数によらず
            // 人事系コード一致かつ課Grコード(人事) 等値
            Some(TargetOrg::SectionGr) | Some(TargetOrg::InternalSalesDept) => reference
                .find_by_branch_code_jinji(&request.branch_code)
                .any(|r| r.section_gr_code_jinji == request.section_gr_code),
            // エリア: 課Grコード先頭 1 文字 + 常駐部店コードの合成キーで
            // 課Grコード(人事) と比較
            Some(TargetOrg::Area) => {
                let head: String = request.section_gr_code.chars().take(1).collect();
                let composite = format!("{}{}", head, request.resident_branch_code);
                reference
                    .find_by_branch_code_jinji(&request.branch_code)
                    .any(|r| r.section_gr_code_jinji == composite)
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reference::ReferenceRecord;

    fn reference_record(bpr: &str, jinji: &str, sec_bpr: &str, sec_jinji: &str) -> ReferenceRecord {
        ReferenceRecord {
            branch_code_bpr: bpr.to_string(),
            branch_code_jinji: jinji.to_string(),
            section_gr_code_bpr: sec_bpr.to_string(),
            section_gr_code_jinji: sec_jinji.to_string(),
            ..Default::default()
        }
    }

    fn request(target: TargetOrg, branch_code: &str, section_gr_code: &str) -> RequestRecord {
        RequestRecord {
            target_org: Some(target),
            branch_code: branch_code.to_string(),
            section_gr_code: section_gr_code.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_prefix_length() {
        let result = ReferenceExistenceChecker::new("123", &[]);
        assert!(matches!(
            result,
            Err(RuleError::InvalidBranchCodePrefix { length: 3, .. })
        ));

        let result = ReferenceExistenceChecker::new("123456", &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_branch_4digit_matches_parent_record() {
        let requests = vec![request(TargetOrg::Branch, "1234", "A1")];
        let reference = ReferenceTable::new(vec![reference_record("1234", "1234", "0", "")]);

        let checker = ReferenceExistenceChecker::new("1234", &requests).unwrap();
        assert!(checker.check(&reference));
    }

    #[test]
    fn test_branch_4digit_no_parent_record() {
        let requests = vec![request(TargetOrg::Branch, "1234", "A1")];
        let reference = ReferenceTable::new(vec![reference_record("1234", "1234", "9", "")]);

        let checker = ReferenceExistenceChecker::new("1234", &requests).unwrap();
        assert!(!checker.check(&reference));
    }

    #[test]
    fn test_branch_5digit_compares_jinji_section() {
        let requests = vec![request(TargetOrg::Branch, "12345", "B2")];
        let reference = ReferenceTable::new(vec![reference_record("9999", "12345", "9", "B2")]);

        let checker = ReferenceExistenceChecker::new("1234", &requests).unwrap();
        assert!(checker.check(&reference));
    }

    #[test]
    fn test_section_gr_comparison() {
        let requests = vec![request(TargetOrg::SectionGr, "1234", "01")];
        let reference = ReferenceTable::new(vec![reference_record("1234", "1234", "9", "01")]);

        let checker = ReferenceExistenceChecker::new("1234", &requests).unwrap();
        assert!(checker.check(&reference));

        let reference = ReferenceTable::new(vec![reference_record("1234", "1234", "9", "02")]);
        assert!(!checker.check(&reference));
    }

    #[test]
    fn test_area_composite_key() {
        let mut req = request(TargetOrg::Area, "1234", "A01");
        req.resident_branch_code = "9876".to_string();
        let requests = vec![req];

        // 合成キー = "A" + "9876"
        let reference = ReferenceTable::new(vec![reference_record("1234", "1234", "9", "A9876")]);
        let checker = ReferenceExistenceChecker::new("1234", &requests).unwrap();
        assert!(checker.check(&reference));
    }

    #[test]
    fn test_7818_special_case_wins() {
        // 標準比較では不一致だが 7818 特例で一致する
        let requests = vec![request(TargetOrg::Branch, "78181", "78181")];
        let reference = ReferenceTable::new(vec![reference_record("7818", "7818", "78181", "X")]);

        let checker = ReferenceExistenceChecker::new("7818", &requests).unwrap();
        assert!(checker.check(&reference));
    }

    #[test]
    fn test_empty_filtered_subset_is_false() {
        // プレフィックス不一致の明細しかない場合は false
        let requests = vec![request(TargetOrg::Branch, "9999", "A1")];
        let reference = ReferenceTable::new(vec![reference_record("1234", "1234", "0", "")]);

        let checker = ReferenceExistenceChecker::new("1234", &requests).unwrap();
        assert!(!checker.check(&reference));
    }

    #[test]
    fn test_5digit_prefix_filters_on_first_4() {
        // 5 桁プレフィックスでも先頭 4 桁で明細を拾う
        let requests = vec![request(TargetOrg::Branch, "1234", "")];
        let reference = ReferenceTable::new(vec![reference_record("1234", "1234", "0", "")]);

        let checker = ReferenceExistenceChecker::new("12345", &requests).unwrap();
        assert!(checker.check(&reference));
    }
}
