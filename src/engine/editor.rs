// ==========================================
// 組織変更反映バッチ - 行編集処理
// ==========================================
// 職責: ディスパッチ結果に応じて BPR 側出力列を組み立てる
// 備考: ラベルはルール表 (運用保守の編集定義) が持つ語彙。
//       キャッチオールは DataFrameEditorDefault 固定
// ==========================================

use crate::domain::request::columns as req;
use std::collections::HashMap;

// ==========================================
// 出力列名 (BPR 側レイアウト)
// ==========================================
pub mod output_columns {
    pub const BPR_BRANCH_CODE: &str = "bpr_branch_code";
    pub const BPR_SECTION_GR_CODE: &str = "bpr_section_gr_code";
    pub const BPR_BRANCH_NAME: &str = "bpr_branch_name";
    pub const BPR_SECTION_GR_NAME: &str = "bpr_section_gr_name";
    pub const DELETE_FLAG: &str = "delete_flag";
}

use self::output_columns as out;

/// 行ビューから値を取り出す (列欠損は空文字列)
fn get<'a>(row: &'a HashMap<String, String>, column: &str) -> &'a str {
    row.get(column).map_or("", String::as_str)
}

fn set(row: &mut HashMap<String, String>, column: &str, value: impl Into<String>) {
    row.insert(column.to_string(), value.into());
}

// ==========================================
// RecordEditor Trait
// ==========================================
// 用途: ディスパッチ先の編集処理 (1 行単位・決定的)
pub trait RecordEditor: Send + Sync {
    /// ルール表の結果列に書かれるラベル
    fn label(&self) -> &'static str;

    /// 行ビューへ出力列を書き込む
    fn apply(&self, row: &mut HashMap<String, String>);
}

// ==========================================
// DefaultEditor - キャッチオール (素通し)
// ==========================================
pub struct DefaultEditor;

impl RecordEditor for DefaultEditor {
    fn label(&self) -> &'static str {
        "DataFrameEditorDefault"
    }

    fn apply(&self, row: &mut HashMap<String, String>) {
        let branch_code = get(row, req::BRANCH_CODE).to_string();
        let section_code = get(row, req::SECTION_GR_CODE).to_string();
        let branch_name = get(row, req::BRANCH_NAME).to_string();
        let section_name = get(row, req::SECTION_GR_NAME).to_string();

        set(row, out::BPR_BRANCH_CODE, branch_code);
        set(row, out::BPR_SECTION_GR_CODE, section_code);
        set(row, out::BPR_BRANCH_NAME, branch_name);
        set(row, out::BPR_SECTION_GR_NAME, section_name);
        set(row, out::DELETE_FLAG, "0");
    }
}

// ==========================================
// BranchEditor - 部店粒度
// ==========================================
// 部店自身のレコードなので課Grコードは親 ("0")
pub struct BranchEditor;

impl RecordEditor for BranchEditor {
    fn label(&self) -> &'static str {
        "DataFrameEditorBranch"
    }

    fn apply(&self, row: &mut HashMap<String, String>) {
        let branch_code = get(row, req::BRANCH_CODE).to_string();
        let branch_name = get(row, req::BRANCH_NAME).to_string();

        set(row, out::BPR_BRANCH_CODE, branch_code);
        set(row, out::BPR_SECTION_GR_CODE, "0");
        set(row, out::BPR_BRANCH_NAME, branch_name);
        set(row, out::BPR_SECTION_GR_NAME, "");
        set(row, out::DELETE_FLAG, "0");
    }
}

// ==========================================
// SectionGrEditor - 課Gr 粒度
// ==========================================
pub struct SectionGrEditor;

impl RecordEditor for SectionGrEditor {
    fn label(&self) -> &'static str {
        "DataFrameEditorSectionGr"
    }

    fn apply(&self, row: &mut HashMap<String, String>) {
        let branch_code = get(row, req::BRANCH_CODE).to_string();
        let section_code = get(row, req::SECTION_GR_CODE).to_string();
        let branch_name = get(row, req::BRANCH_NAME).to_string();
        let section_name = get(row, req::SECTION_GR_NAME).to_string();

        set(row, out::BPR_BRANCH_CODE, branch_code);
        set(row, out::BPR_SECTION_GR_CODE, section_code);
        set(row, out::BPR_BRANCH_NAME, branch_name);
        set(row, out::BPR_SECTION_GR_NAME, section_name);
        set(row, out::DELETE_FLAG, "0");
    }
}

// ==========================================
// AreaEditor - エリア粒度
// ==========================================
// 出力課Grコードは課Grコード先頭 1 文字 + 常駐部店コードの合成キー
pub struct AreaEditor;

impl RecordEditor for AreaEditor {
    fn label(&self) -> &'static str {
        "DataFrameEditorArea"
    }

    fn apply(&self, row: &mut HashMap<String, String>) {
        let branch_code = get(row, req::BRANCH_CODE).to_string();
        let branch_name = get(row, req::BRANCH_NAME).to_string();
        let section_name = get(row, req::SECTION_GR_NAME).to_string();
        let head: String = get(row, req::SECTION_GR_CODE).chars().take(1).collect();
        let composite = format!("{}{}", head, get(row, req::RESIDENT_BRANCH_CODE));

        set(row, out::BPR_BRANCH_CODE, branch_code);
        set(row, out::BPR_SECTION_GR_CODE, composite);
        set(row, out::BPR_BRANCH_NAME, branch_name);
        set(row, out::BPR_SECTION_GR_NAME, section_name);
        set(row, out::DELETE_FLAG, "0");
    }
}

// ==========================================
// SalesDeptEditor - 拠点内営業部
// ==========================================
// 部店コード先頭 4 桁が所属部店、5 桁全体が営業部を指す
pub struct SalesDeptEditor;

impl RecordEditor for SalesDeptEditor {
    fn label(&self) -> &'static str {
        "DataFrameEditorSalesDept"
    }

    fn apply(&self, row: &mut HashMap<String, String>) {
        let prefix4 = get(row, req::BRANCH_CODE_PREFIX4).to_string();
        let full_code = get(row, req::BRANCH_CODE).to_string();
        let branch_name = get(row, req::BRANCH_NAME).to_string();
        let section_name = get(row, req::SECTION_GR_NAME).to_string();

        set(row, out::BPR_BRANCH_CODE, prefix4);
        set(row, out::BPR_SECTION_GR_CODE, full_code);
        set(row, out::BPR_BRANCH_NAME, branch_name);
        set(row, out::BPR_SECTION_GR_NAME, section_name);
        set(row, out::DELETE_FLAG, "0");
    }
}

// ==========================================
// DiscontinueEditor - 廃止
// ==========================================
pub struct DiscontinueEditor;

impl RecordEditor for DiscontinueEditor {
    fn label(&self) -> &'static str {
        "DataFrameEditorDiscontinue"
    }

    fn apply(&self, row: &mut HashMap<String, String>) {
        let branch_code = get(row, req::BRANCH_CODE).to_string();
        let section_code = get(row, req::SECTION_GR_CODE).to_string();

        set(row, out::BPR_BRANCH_CODE, branch_code);
        set(row, out::BPR_SECTION_GR_CODE, section_code);
        set(row, out::DELETE_FLAG, "1");
    }
}
