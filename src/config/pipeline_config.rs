// ==========================================
// 組織変更反映バッチ - パイプライン設定
// ==========================================
// 職責: 実行 1 回分の入出力パスと実行オプションの保持
// 方針: プロセス起動時に 1 回構築し、利用側へ明示的に渡す
//       (暗黙のグローバル状態は持たない)
// ==========================================

use crate::domain::types::Applicant;
use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ==========================================
// RequestFileEntry - 申請ファイル 1 本の指定
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestFileEntry {
    /// 申請ファイルパス (base_dir 相対可)
    pub path: PathBuf,
    /// 提出元 (レイアウト選択)
    pub applicant: Applicant,
}

// ==========================================
// PipelineConfig
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// 相対パスの基点。未指定ならユーザデータディレクトリ
    #[serde(default)]
    pub base_dir: Option<PathBuf>,

    /// 現組織スナップショット
    pub reference_snapshot: PathBuf,

    /// 申請ファイル群 (提出元ごと)
    pub request_files: Vec<RequestFileEntry>,

    /// ルール表 (ディシジョンテーブル)
    pub decision_table: PathBuf,

    /// BPR 判定参照値表 (変更・廃止用)。未指定なら空で開始
    #[serde(default)]
    pub flag_reference: Option<PathBuf>,

    /// 処理結果 CSV の出力先
    pub output_path: PathBuf,
}

impl PipelineConfig {
    /// 設定ファイル (JSON) を読み込む
    pub fn load(path: &Path) -> ImportResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| ImportError::ConfigReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| ImportError::ConfigReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 相対パスの基点
    pub fn base_dir(&self) -> PathBuf {
        self.base_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("orgchange-batch"))
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }

    /// base_dir を基点に解決した絶対パス
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir().join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{
                "base_dir": "/data/orgchange",
                "reference_snapshot": "reference.csv",
                "request_files": [
                    {{"path": "jinji.xlsx", "applicant": "JINJI"}},
                    {{"path": "kokusai.xlsx", "applicant": "KOKUSAI"}}
                ],
                "decision_table": "decision.csv",
                "output_path": "out/result.csv"
            }}"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = PipelineConfig::load(file.path()).unwrap();
        assert_eq!(config.request_files.len(), 2);
        assert_eq!(config.request_files[0].applicant, Applicant::Jinji);
        assert_eq!(
            config.resolve(Path::new("reference.csv")),
            PathBuf::from("/data/orgchange/reference.csv")
        );
        assert_eq!(config.flag_reference, None);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = PipelineConfig::load(Path::new("no_such_config.json"));
        assert!(matches!(result, Err(ImportError::ConfigReadError { .. })));
    }
}
