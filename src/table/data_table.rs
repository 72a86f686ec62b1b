// ==========================================
// 組織変更反映バッチ - 汎用データテーブル
// ==========================================
// 職責: ファイル由来の表データを列名→値の行集合として保持
// 備考: 値はすべて文字列に正規化済み (取込層の責務)
// ==========================================

use std::collections::{BTreeSet, HashMap};

// ==========================================
// DataTable - 行指向の汎用テーブル
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<HashMap<String, String>>,
}

impl DataTable {
    pub fn new(columns: Vec<String>, rows: Vec<HashMap<String, String>>) -> Self {
        Self { columns, rows }
    }

    /// 生の行集合から構築。列は全行のキー和集合 (名前順)
    pub fn from_rows(rows: Vec<HashMap<String, String>>) -> Self {
        let columns: BTreeSet<String> = rows.iter().flat_map(|r| r.keys().cloned()).collect();
        Self {
            columns: columns.into_iter().collect(),
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[HashMap<String, String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 行・列指定の値参照。列欠損は空文字列として扱う
    pub fn value(&self, row_index: usize, column: &str) -> &str {
        self.rows
            .get(row_index)
            .and_then(|row| row.get(column))
            .map_or("", String::as_str)
    }

    /// 真偽マスクに従って行を抽出した新しいテーブルを返す
    ///
    /// # 前提
    /// - mask.len() == self.len() (呼び出し側で検証済み)
    pub fn filter_by_mask(&self, mask: &[bool]) -> DataTable {
        let rows = self
            .rows
            .iter()
            .zip(mask.iter())
            .filter(|(_, keep)| **keep)
            .map(|(row, _)| row.clone())
            .collect();
        DataTable {
            columns: self.columns.clone(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_rows_column_union() {
        let table = DataTable::from_rows(vec![row(&[("a", "1")]), row(&[("b", "2")])]);
        assert_eq!(table.columns(), &["a".to_string(), "b".to_string()]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_value_missing_column_is_empty() {
        let table = DataTable::from_rows(vec![row(&[("a", "1")])]);
        assert_eq!(table.value(0, "a"), "1");
        assert_eq!(table.value(0, "b"), "");
        assert_eq!(table.value(9, "a"), "");
    }

    #[test]
    fn test_filter_by_mask() {
        let table = DataTable::from_rows(vec![row(&[("a", "1")]), row(&[("a", "2")])]);
        let filtered = table.filter_by_mask(&[false, true]);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.value(0, "a"), "2");
    }
}
