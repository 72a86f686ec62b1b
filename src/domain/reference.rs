// ==========================================
// 組織変更反映バッチ - リファレンステーブル
// ==========================================
// 職責: 現行組織のスナップショットを保持し、照合クエリを提供
// 制約: 1 実行中は不変。更新は明示的な再読込 (リロード) のみ
// ==========================================
// コード体系: BPR 系 (branch_code_bpr) と人事系 (branch_code_jinji) の
//             2 座標系が同一物理組織を指す
// ==========================================

use serde::{Deserialize, Serialize};

/// 課Grコード(BPR) が "0" の行はその部店プレフィックス群の親 (部店自身) レコード
pub const PARENT_SECTION_GR_CODE: &str = "0";

// ==========================================
// リファレンステーブル列名 (統一レイアウト)
// ==========================================
pub mod columns {
    pub const BRANCH_CODE_BPR: &str = "branch_code_bpr";
    pub const BRANCH_CODE_JINJI: &str = "branch_code_jinji";
    pub const SECTION_GR_CODE_BPR: &str = "section_gr_code_bpr";
    pub const SECTION_GR_CODE_JINJI: &str = "section_gr_code_jinji";
    pub const BRANCH_NAME: &str = "branch_name";
    pub const SECTION_GR_NAME: &str = "section_gr_name";
    pub const PARENT_BRANCH_CODE: &str = "parent_branch_code";
    pub const BUSINESS_CODE: &str = "business_code";
    pub const AREA_CODE: &str = "area_code";
    pub const BPR_TARGET_FLAG: &str = "bpr_target_flag";
}

// ==========================================
// ReferenceRecord - 現組織 1 レコード
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub branch_code_bpr: String,
    pub branch_code_jinji: String,
    pub section_gr_code_bpr: String,
    pub section_gr_code_jinji: String,
    pub branch_name: String,
    pub section_gr_name: String,
    pub parent_branch_code: String,
    pub business_code: String,
    pub area_code: String,
    pub bpr_target_flag: String,
}

impl ReferenceRecord {
    /// 統一レイアウト列名による値参照
    ///
    /// # 戻り値
    /// - Some(&str): 既知の列
    /// - None: 未定義の列名
    pub fn field(&self, column: &str) -> Option<&str> {
        match column {
            columns::BRANCH_CODE_BPR => Some(&self.branch_code_bpr),
            columns::BRANCH_CODE_JINJI => Some(&self.branch_code_jinji),
            columns::SECTION_GR_CODE_BPR => Some(&self.section_gr_code_bpr),
            columns::SECTION_GR_CODE_JINJI => Some(&self.section_gr_code_jinji),
            columns::BRANCH_NAME => Some(&self.branch_name),
            columns::SECTION_GR_NAME => Some(&self.section_gr_name),
            columns::PARENT_BRANCH_CODE => Some(&self.parent_branch_code),
            columns::BUSINESS_CODE => Some(&self.business_code),
            columns::AREA_CODE => Some(&self.area_code),
            columns::BPR_TARGET_FLAG => Some(&self.bpr_target_flag),
            _ => None,
        }
    }

    /// 親 (部店自身) レコードかどうか
    pub fn is_parent(&self) -> bool {
        self.section_gr_code_bpr == PARENT_SECTION_GR_CODE
    }
}

// ==========================================
// ReferenceTable - インメモリ索引
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    records: Vec<ReferenceRecord>,
}

impl ReferenceTable {
    pub fn new(records: Vec<ReferenceRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceRecord> {
        self.records.iter()
    }

    /// BPR 系部店コード完全一致
    pub fn find_by_branch_code_bpr<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a ReferenceRecord> {
        self.records.iter().filter(move |r| r.branch_code_bpr == code)
    }

    /// 人事系部店コード完全一致
    pub fn find_by_branch_code_jinji<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a ReferenceRecord> {
        self.records.iter().filter(move |r| r.branch_code_jinji == code)
    }

    /// BPR 系課Grコードの前方一致
    pub fn find_by_section_gr_bpr_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a ReferenceRecord> {
        self.records
            .iter()
            .filter(move |r| r.section_gr_code_bpr.starts_with(prefix))
    }

    /// 部店コードプレフィックス群の親レコード (課Grコード(BPR) = "0")
    pub fn parent_record(&self, branch_code_bpr: &str) -> Option<&ReferenceRecord> {
        self.records
            .iter()
            .find(|r| r.branch_code_bpr == branch_code_bpr && r.is_parent())
    }

    /// 列名→値の AND 等値照合 (結合キー選定後の参照クエリ)
    ///
    /// # 引数
    /// - conditions: (統一レイアウト列名, 期待値) の組
    ///
    /// # 戻り値
    /// - 全条件を満たすレコード。未定義の列名を含む条件は常に不一致
    pub fn query<'a>(&'a self, conditions: &'a [(String, String)]) -> Vec<&'a ReferenceRecord> {
        self.records
            .iter()
            .filter(|r| {
                conditions
                    .iter()
                    .all(|(col, value)| r.field(col).is_some_and(|v| v == value.as_str()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(bpr: &str, jinji: &str, sec_bpr: &str, sec_jinji: &str) -> ReferenceRecord {
        ReferenceRecord {
            branch_code_bpr: bpr.to_string(),
            branch_code_jinji: jinji.to_string(),
            section_gr_code_bpr: sec_bpr.to_string(),
            section_gr_code_jinji: sec_jinji.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parent_record() {
        let table = ReferenceTable::new(vec![
            record("1234", "1234", "9", "A1"),
            record("1234", "1234", "0", ""),
        ]);

        let parent = table.parent_record("1234").unwrap();
        assert!(parent.is_parent());
        assert_eq!(parent.section_gr_code_bpr, "0");
    }

    #[test]
    fn test_query_and_semantics() {
        let table = ReferenceTable::new(vec![
            record("1234", "1234", "0", ""),
            record("1234", "1234", "9", "A1"),
        ]);

        let conditions = vec![
            ("branch_code_jinji".to_string(), "1234".to_string()),
            ("section_gr_code_jinji".to_string(), "A1".to_string()),
        ];
        let hits = table.query(&conditions);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].section_gr_code_bpr, "9");
    }

    #[test]
    fn test_query_unknown_column_never_matches() {
        let table = ReferenceTable::new(vec![record("1234", "1234", "0", "")]);
        let conditions = vec![("unknown_col".to_string(), "x".to_string())];
        assert!(table.query(&conditions).is_empty());
    }

    #[test]
    fn test_section_gr_bpr_prefix_scan() {
        let table = ReferenceTable::new(vec![
            record("7818", "7818", "78181", "78181"),
            record("7818", "7818", "9999", "9999"),
        ]);
        let hits: Vec<_> = table.find_by_section_gr_bpr_prefix("7818").collect();
        assert_eq!(hits.len(), 1);
    }
}
