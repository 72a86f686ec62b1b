// ==========================================
// テーブルサーチャ結合テスト
// ==========================================
// 職責: キャッシュの鮮度判定 (冪等性) と検索意味論の検証
// ==========================================


use orgchange_batch::table::{SearchConditions, SearchError, TableSearcher};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;
use test_helpers::temp_csv;

fn conditions(pairs: &[(&str, &str)]) -> SearchConditions {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    SearchConditions::Single(map)
}

fn searcher_for(file: &tempfile::NamedTempFile) -> TableSearcher {
    let path = file.path();
    let dir = path.parent().unwrap();
    let name = path.file_name().unwrap().to_str().unwrap();
    TableSearcher::new(name, Some(dir))
}

#[test]
fn test_cached_table_is_reused_without_file_change() {
    let file = temp_csv("col,val", &["A,1", "B,2"]);
    let searcher = searcher_for(&file);

    let first = searcher.table().unwrap();
    let second = searcher.table().unwrap();

    // ファイル無変更なら同一のキャッシュ実体が返る (再読込しない)
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.len(), 2);
}

#[test]
fn test_reload_after_file_update() {
    let mut file = temp_csv("col,val", &["A,1"]);
    let searcher = searcher_for(&file);

    let first = searcher.table().unwrap();
    assert_eq!(first.len(), 1);

    // 更新時刻を確実に進めてから追記する
    std::thread::sleep(std::time::Duration::from_millis(1100));
    writeln!(file, "B,2").unwrap();
    file.flush().unwrap();

    let second = searcher.table().unwrap();
    assert_eq!(second.len(), 2);
    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_simple_search_exact_equality() {
    let file = temp_csv("col,val", &["X,1", "Y,2", "X,3"]);
    let searcher = searcher_for(&file);

    let result = searcher
        .simple_search(&conditions(&[("col", "X")]), "and")
        .unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result.value(0, "col"), "X");
}

#[test]
fn test_simple_search_startswith() {
    let file = temp_csv("col,val", &["ABCD,1", "ABX,2", "ZABC,3"]);
    let searcher = searcher_for(&file);

    let result = searcher
        .simple_search(&conditions(&[("col", "startswith:AB")]), "and")
        .unwrap();
    // 前方一致のみ。途中一致 (ZABC) は含まれない
    assert_eq!(result.len(), 2);
}

#[test]
fn test_simple_search_and_or_within_map() {
    let file = temp_csv("col,val", &["A,1", "A,2", "B,1"]);
    let searcher = searcher_for(&file);

    let both = conditions(&[("col", "A"), ("val", "1")]);
    assert_eq!(searcher.simple_search(&both, "and").unwrap().len(), 1);
    assert_eq!(searcher.simple_search(&both, "or").unwrap().len(), 3);
}

#[test]
fn test_simple_search_multiple_maps_are_or_combined() {
    let file = temp_csv("col,val", &["A,1", "B,2", "C,3"]);
    let searcher = searcher_for(&file);

    let maps: Vec<HashMap<String, String>> = vec![
        [("col".to_string(), "A".to_string())].into(),
        [("col".to_string(), "C".to_string())].into(),
    ];
    let result = searcher
        .simple_search(&SearchConditions::Multi(maps), "and")
        .unwrap();
    assert_eq!(result.len(), 2);
}

#[test]
fn test_simple_search_invalid_operator() {
    let file = temp_csv("col,val", &["A,1"]);
    let searcher = searcher_for(&file);

    let result = searcher.simple_search(&conditions(&[("col", "A")]), "XOR");
    assert!(matches!(result, Err(SearchError::InvalidOperator(_))));
}

#[test]
fn test_simple_search_empty_result_is_table_not_none() {
    let file = temp_csv("col,val", &["A,1"]);
    let searcher = searcher_for(&file);

    let result = searcher
        .simple_search(&conditions(&[("col", "ZZZ")]), "and")
        .unwrap();
    assert!(result.is_empty());
    assert_eq!(result.columns().len(), 2);
}

#[test]
fn test_advanced_search_predicate() {
    let file = temp_csv("col,val", &["A,1", "B,2", "C,3"]);
    let searcher = searcher_for(&file);

    let result = searcher
        .advanced_search(|table| {
            (0..table.len())
                .map(|i| table.value(i, "val").parse::<i32>().unwrap_or(0) >= 2)
                .collect()
        })
        .unwrap();
    assert_eq!(result.len(), 2);
}

#[test]
fn test_advanced_search_mask_length_mismatch() {
    let file = temp_csv("col,val", &["A,1", "B,2"]);
    let searcher = searcher_for(&file);

    let result = searcher.advanced_search(|_| vec![true]);
    assert!(matches!(
        result,
        Err(SearchError::MaskLengthMismatch {
            expected: 2,
            actual: 1
        })
    ));
}

#[test]
fn test_missing_table_file() {
    let dir = tempfile::tempdir().unwrap();
    let searcher = TableSearcher::new("no_such_table.csv", Some(dir.path()));
    assert!(matches!(
        searcher.table(),
        Err(SearchError::TableNotFound(_))
    ));
}
