// ==========================================
// 組織変更反映バッチ - テーブルサーチャ
// ==========================================
// 職責: テーブル識別子に対する読込キャッシュ付きアクセスと
//       簡易検索 (AND/OR・前方一致) / 高度検索 (述語関数)
// 制約: アクセスごとに更新時刻を比較し、再読込は高々 1 回。
//       呼び出し側が再読込途中のテーブルを観測することはない
// ==========================================

use crate::importer::file_parser::UniversalFileParser;
use crate::table::data_table::DataTable;
use crate::table::error::{SearchError, SearchResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;
use tracing::debug;

/// 前方一致を指示する値プレフィックス
pub const STARTSWITH_PREFIX: &str = "startswith:";

// ==========================================
// 検索条件 (単一マップ or マップ列)
// ==========================================
// 単一マップ内は operator で結合、マップ列同士は常に OR 結合
#[derive(Debug, Clone)]
pub enum SearchConditions {
    Single(HashMap<String, String>),
    Multi(Vec<HashMap<String, String>>),
}

impl From<HashMap<String, String>> for SearchConditions {
    fn from(map: HashMap<String, String>) -> Self {
        SearchConditions::Single(map)
    }
}

impl From<Vec<HashMap<String, String>>> for SearchConditions {
    fn from(maps: Vec<HashMap<String, String>>) -> Self {
        SearchConditions::Multi(maps)
    }
}

/// マップ内結合演算子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    And,
    Or,
}

impl Operator {
    fn parse(s: &str) -> SearchResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" => Ok(Operator::And),
            "or" => Ok(Operator::Or),
            _ => Err(SearchError::InvalidOperator(s.to_string())),
        }
    }
}

// ==========================================
// TableCache - 明示的キャッシュオブジェクト
// ==========================================
// 更新時刻の鮮度判定と差し替えを 1 箇所で行う
#[derive(Debug, Default)]
struct TableCache {
    table: Option<Arc<DataTable>>,
    loaded_mtime: Option<SystemTime>,
}

impl TableCache {
    /// 鮮度チェック付き取得。古ければ load で再読込して差し替える
    fn get_or_reload<F>(&mut self, current_mtime: SystemTime, load: F) -> SearchResult<Arc<DataTable>>
    where
        F: FnOnce() -> SearchResult<DataTable>,
    {
        let table = match (&self.table, self.loaded_mtime) {
            (Some(table), Some(loaded)) if current_mtime <= loaded => Arc::clone(table),
            _ => {
                let reloaded = Arc::new(load()?);
                self.table = Some(Arc::clone(&reloaded));
                self.loaded_mtime = Some(current_mtime);
                reloaded
            }
        };
        Ok(table)
    }
}

// ==========================================
// TableSearcher - キャッシュ付きテーブルアクセサ
// ==========================================
pub struct TableSearcher {
    table_name: String,
    file_path: PathBuf,
    cache: Mutex<TableCache>,
}

impl TableSearcher {
    /// 既定のテーブル格納ディレクトリ
    ///
    /// ユーザデータディレクトリ配下。取得できない環境ではカレント
    pub fn default_directory() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join("orgchange-batch").join("tables"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// # 引数
    /// - table_name: テーブル識別子 (ファイル名)
    /// - directory: 格納ディレクトリ。None なら既定ディレクトリ
    pub fn new(table_name: &str, directory: Option<&Path>) -> Self {
        let dir = directory.map_or_else(Self::default_directory, Path::to_path_buf);
        Self {
            table_name: table_name.to_string(),
            file_path: dir.join(table_name),
            cache: Mutex::new(TableCache::default()),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// テーブル取得 (アクセスごとの鮮度チェック付き)
    ///
    /// # 戻り値
    /// - Arc<DataTable>: ファイル無変更なら同一のキャッシュ実体
    pub fn table(&self) -> SearchResult<Arc<DataTable>> {
        let mtime = std::fs::metadata(&self.file_path)
            .and_then(|m| m.modified())
            .map_err(|_| SearchError::TableNotFound(self.file_path.display().to_string()))?;

        // 単一スレッドバッチのためロック競合はない。毒化時も実体を引き継ぐ
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.get_or_reload(mtime, || {
            debug!(table = %self.table_name, "テーブル再読込");
            let parser = UniversalFileParser;
            let rows = parser.parse(&self.file_path)?;
            Ok(DataTable::from_rows(rows))
        })
    }

    /// 簡易検索
    ///
    /// # 引数
    /// - conditions: 列名→値。値が "startswith:" 始まりなら前方一致、
    ///   それ以外は文字列等値。マップ列を渡した場合は各マップの結果を OR 結合
    /// - operator: マップ内の結合 ("and" / "or")。それ以外はエラー
    ///
    /// # 戻り値
    /// - 絞り込み後のテーブル (0 行もあり得る。None は返さない)
    pub fn simple_search(
        &self,
        conditions: &SearchConditions,
        operator: &str,
    ) -> SearchResult<DataTable> {
        let op = Operator::parse(operator)?;
        let table = self.table()?;

        let mask: Vec<bool> = table
            .rows()
            .iter()
            .map(|row| match conditions {
                SearchConditions::Single(map) => Self::match_map(row, map, op),
                SearchConditions::Multi(maps) => {
                    maps.iter().any(|map| Self::match_map(row, map, op))
                }
            })
            .collect();

        Ok(table.filter_by_mask(&mask))
    }

    /// 高度検索
    ///
    /// # 引数
    /// - predicate: テーブル全体 → 行数と同長の真偽マスク
    ///
    /// # エラー
    /// - マスク長が行数と異なる場合は MaskLengthMismatch
    pub fn advanced_search<F>(&self, predicate: F) -> SearchResult<DataTable>
    where
        F: FnOnce(&DataTable) -> Vec<bool>,
    {
        let table = self.table()?;
        let mask = predicate(&table);

        if mask.len() != table.len() {
            return Err(SearchError::MaskLengthMismatch {
                expected: table.len(),
                actual: mask.len(),
            });
        }

        Ok(table.filter_by_mask(&mask))
    }

    /// 1 行を 1 マップ条件へ照合する
    fn match_map(row: &HashMap<String, String>, map: &HashMap<String, String>, op: Operator) -> bool {
        let mut checks = map.iter().map(|(column, expected)| {
            let actual = row.get(column).map_or("", String::as_str);
            match expected.strip_prefix(STARTSWITH_PREFIX) {
                Some(prefix) => actual.starts_with(prefix),
                None => actual == expected,
            }
        });
        match op {
            Operator::And => checks.all(|b| b),
            Operator::Or => checks.any(|b| b),
        }
    }
}
