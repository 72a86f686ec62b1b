// ==========================================
// 組織変更反映バッチ - 構造マッチングパターン
// ==========================================
// 職責: 申請明細の構造 (対象区分・部店コード桁数・プレフィックス) から
//       リファレンス結合キーの組を選定する
// 制約: パターンは priority 昇順で評価し最初の該当で確定。
//       フォールバックはなく、どのパターンにも該当しない明細は
//       結合せず未一致として報告する
// ==========================================

use crate::domain::reference::columns as ref_columns;
use crate::domain::request::RequestRecord;
use crate::domain::types::TargetOrg;

// ==========================================
// PatternCondition - 該当判定
// ==========================================
// 各項は None なら不問。すべての指定項を満たしたときに該当
#[derive(Debug, Clone, Default)]
pub struct PatternCondition {
    pub target_org: Option<TargetOrg>,
    pub branch_code_len: Option<usize>,
    pub branch_code_prefix: Option<&'static str>,
    pub branch_code_prefix_exclude: Option<&'static str>,
}

impl PatternCondition {
    fn matches(&self, record: &RequestRecord) -> bool {
        if let Some(expected) = self.target_org {
            if record.target_org != Some(expected) {
                return false;
            }
        }
        if let Some(len) = self.branch_code_len {
            if record.branch_code_len() != len {
                return false;
            }
        }
        if let Some(prefix) = self.branch_code_prefix {
            if !record.branch_code.starts_with(prefix) {
                return false;
            }
        }
        if let Some(exclude) = self.branch_code_prefix_exclude {
            if record.branch_code.starts_with(exclude) {
                return false;
            }
        }
        true
    }
}

// ==========================================
// JoinValue - 結合キーの値取り出し
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinValue {
    /// 部店コードそのもの
    BranchCode,
    /// 部店コード先頭 4 桁
    BranchCodePrefix4,
    /// 課Grコード
    SectionGrCode,
    /// 部門・エリアコード先頭 1 文字
    BusinessAndAreaHead,
    /// 部門・エリアコード 2 文字目以降
    BusinessAndAreaTail,
    /// 固定値
    Literal(&'static str),
}

impl JoinValue {
    fn resolve(&self, record: &RequestRecord) -> String {
        match self {
            JoinValue::BranchCode => record.branch_code.clone(),
            JoinValue::BranchCodePrefix4 => record.branch_code_prefix4().to_string(),
            JoinValue::SectionGrCode => record.section_gr_code.clone(),
            JoinValue::BusinessAndAreaHead => {
                record.business_and_area_code.chars().take(1).collect()
            }
            JoinValue::BusinessAndAreaTail => {
                record.business_and_area_code.chars().skip(1).collect()
            }
            JoinValue::Literal(value) => (*value).to_string(),
        }
    }
}

// ==========================================
// MatchingPattern - 構造パターン 1 件
// ==========================================
#[derive(Debug, Clone)]
pub struct MatchingPattern {
    pub name: &'static str,
    pub priority: u32,
    pub condition: PatternCondition,
    /// (リファレンス列名, 値の取り出し方)。固定制約も同じ形で持つ
    pub join_keys: Vec<(&'static str, JoinValue)>,
}

impl MatchingPattern {
    /// この明細に対する結合条件 (リファレンス列名 → 値)
    pub fn build_conditions(&self, record: &RequestRecord) -> Vec<(String, String)> {
        self.join_keys
            .iter()
            .map(|(column, value)| ((*column).to_string(), value.resolve(record)))
            .collect()
    }
}

// ==========================================
// PatternMatcher
// ==========================================
pub struct PatternMatcher {
    patterns: Vec<MatchingPattern>,
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternMatcher {
    /// 既定のパターン群で構築する
    pub fn new() -> Self {
        Self::with_patterns(Self::default_patterns())
    }

    /// 任意のパターン群で構築する。priority 昇順に並べ替えて保持
    pub fn with_patterns(mut patterns: Vec<MatchingPattern>) -> Self {
        patterns.sort_by_key(|p| p.priority);
        Self { patterns }
    }

    pub fn patterns(&self) -> &[MatchingPattern] {
        &self.patterns
    }

    /// priority 昇順で最初に該当したパターンを返す
    pub fn select(&self, record: &RequestRecord) -> Option<&MatchingPattern> {
        self.patterns.iter().find(|p| p.condition.matches(record))
    }

    /// 既定パターン群 (申請構造の族ごとに 1 件)
    fn default_patterns() -> Vec<MatchingPattern> {
        vec![
            // 5 桁・7818 始まりの特例。人事系部店コードのみで結合し
            // 課Grコード(人事) は空欄固定
            MatchingPattern {
                name: "branch_7818_special",
                priority: 10,
                condition: PatternCondition {
                    branch_code_len: Some(5),
                    branch_code_prefix: Some("7818"),
                    ..Default::default()
                },
                join_keys: vec![
                    (ref_columns::BRANCH_CODE_JINJI, JoinValue::BranchCode),
                    (ref_columns::SECTION_GR_CODE_JINJI, JoinValue::Literal("")),
                ],
            },
            // 4 桁の部店申請。親レコード (課Grコード(BPR)="0") と結合
            MatchingPattern {
                name: "branch_4digit",
                priority: 20,
                condition: PatternCondition {
                    target_org: Some(TargetOrg::Branch),
                    branch_code_len: Some(4),
                    ..Default::default()
                },
                join_keys: vec![
                    (ref_columns::BRANCH_CODE_JINJI, JoinValue::BranchCode),
                    (ref_columns::SECTION_GR_CODE_BPR, JoinValue::Literal("0")),
                ],
            },
            // 5 桁・7 始まり以外の部店申請
            MatchingPattern {
                name: "branch_5digit",
                priority: 30,
                condition: PatternCondition {
                    target_org: Some(TargetOrg::Branch),
                    branch_code_len: Some(5),
                    branch_code_prefix_exclude: Some("7"),
                    ..Default::default()
                },
                join_keys: vec![
                    (ref_columns::BRANCH_CODE_JINJI, JoinValue::BranchCode),
                    (ref_columns::SECTION_GR_CODE_JINJI, JoinValue::Literal("")),
                ],
            },
            // 5 桁・7 始まり (7818 を除く) の部店申請。人事系部店コードと
            // BPR 系課Grコードの二重キー
            MatchingPattern {
                name: "branch_5digit_7prefix",
                priority: 40,
                condition: PatternCondition {
                    target_org: Some(TargetOrg::Branch),
                    branch_code_len: Some(5),
                    branch_code_prefix: Some("7"),
                    branch_code_prefix_exclude: Some("7818"),
                },
                join_keys: vec![
                    (ref_columns::BRANCH_CODE_JINJI, JoinValue::BranchCode),
                    (ref_columns::SECTION_GR_CODE_BPR, JoinValue::SectionGrCode),
                ],
            },
            // 拠点内営業部。先頭 4 桁が所属部店、5 桁全体が営業部
            MatchingPattern {
                name: "internal_sales_dept",
                priority: 50,
                condition: PatternCondition {
                    target_org: Some(TargetOrg::InternalSalesDept),
                    branch_code_len: Some(5),
                    ..Default::default()
                },
                join_keys: vec![
                    (ref_columns::BRANCH_CODE_JINJI, JoinValue::BranchCodePrefix4),
                    (ref_columns::SECTION_GR_CODE_JINJI, JoinValue::BranchCode),
                ],
            },
            // 課Gr
            MatchingPattern {
                name: "section_gr",
                priority: 60,
                condition: PatternCondition {
                    target_org: Some(TargetOrg::SectionGr),
                    ..Default::default()
                },
                join_keys: vec![
                    (ref_columns::BRANCH_CODE_JINJI, JoinValue::BranchCode),
                    (ref_columns::SECTION_GR_CODE_JINJI, JoinValue::SectionGrCode),
                ],
            },
            // エリア。部門・エリアコードを 1 文字 + 残りへ分割して結合
            MatchingPattern {
                name: "area",
                priority: 70,
                condition: PatternCondition {
                    target_org: Some(TargetOrg::Area),
                    ..Default::default()
                },
                join_keys: vec![
                    (ref_columns::BRANCH_CODE_JINJI, JoinValue::BranchCode),
                    (ref_columns::BUSINESS_CODE, JoinValue::BusinessAndAreaHead),
                    (ref_columns::AREA_CODE, JoinValue::BusinessAndAreaTail),
                ],
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(target: TargetOrg, branch_code: &str) -> RequestRecord {
        RequestRecord {
            target_org: Some(target),
            branch_code: branch_code.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_7818_special_takes_priority() {
        let matcher = PatternMatcher::new();
        let pattern = matcher.select(&record(TargetOrg::Branch, "78181")).unwrap();
        assert_eq!(pattern.name, "branch_7818_special");
    }

    #[test]
    fn test_branch_4digit() {
        let matcher = PatternMatcher::new();
        let pattern = matcher.select(&record(TargetOrg::Branch, "1234")).unwrap();
        assert_eq!(pattern.name, "branch_4digit");

        let conditions = pattern.build_conditions(&record(TargetOrg::Branch, "1234"));
        assert!(conditions.contains(&("branch_code_jinji".to_string(), "1234".to_string())));
        assert!(conditions.contains(&("section_gr_code_bpr".to_string(), "0".to_string())));
    }

    #[test]
    fn test_branch_5digit_non_7() {
        let matcher = PatternMatcher::new();
        let pattern = matcher.select(&record(TargetOrg::Branch, "12345")).unwrap();
        assert_eq!(pattern.name, "branch_5digit");
    }

    #[test]
    fn test_branch_5digit_7prefix_dual_key() {
        let matcher = PatternMatcher::new();
        let mut req = record(TargetOrg::Branch, "71234");
        req.section_gr_code = "9".to_string();

        let pattern = matcher.select(&req).unwrap();
        assert_eq!(pattern.name, "branch_5digit_7prefix");

        let conditions = pattern.build_conditions(&req);
        assert!(conditions.contains(&("section_gr_code_bpr".to_string(), "9".to_string())));
    }

    #[test]
    fn test_internal_sales_dept_prefix_split() {
        let matcher = PatternMatcher::new();
        let req = record(TargetOrg::InternalSalesDept, "12345");
        let pattern = matcher.select(&req).unwrap();
        assert_eq!(pattern.name, "internal_sales_dept");

        let conditions = pattern.build_conditions(&req);
        assert!(conditions.contains(&("branch_code_jinji".to_string(), "1234".to_string())));
        assert!(conditions.contains(&("section_gr_code_jinji".to_string(), "12345".to_string())));
    }

    #[test]
    fn test_area_business_code_split() {
        let matcher = PatternMatcher::new();
        let mut req = record(TargetOrg::Area, "12345");
        req.business_and_area_code = "3101".to_string();

        let pattern = matcher.select(&req).unwrap();
        assert_eq!(pattern.name, "area");

        let conditions = pattern.build_conditions(&req);
        assert!(conditions.contains(&("business_code".to_string(), "3".to_string())));
        assert!(conditions.contains(&("area_code".to_string(), "101".to_string())));
    }

    #[test]
    fn test_no_pattern_matches() {
        // 対象区分が解釈できなかった明細はどのパターンにも該当しない
        let matcher = PatternMatcher::new();
        let req = RequestRecord {
            branch_code: "1234".to_string(),
            ..Default::default()
        };
        assert!(matcher.select(&req).is_none());
    }
}
