// ==========================================
// 組織変更反映バッチ - コアライブラリ
// ==========================================
// 用途: 組織変更申請 (人事部 / 国際事務企画部 / 関連会社) を
//       統一レイアウトへ正規化し、現組織リファレンスと照合して
//       BPR・AD 判定と編集処理ディスパッチを行う
// 方式: 単一スレッドの同期バッチ (1 実行 = 1 プロセス)
// ==========================================

// ==========================================
// モジュール宣言
// ==========================================

// 領域層 - エンティティと型
pub mod domain;

// 取込層 - 外部ファイル
pub mod importer;

// テーブルアクセス層 - キャッシュ付き検索
pub mod table;

// エンジン層 - 業務ルール
pub mod engine;

// 設定層
pub mod config;

// ログ
pub mod logging;

// ==========================================
// コア型の再公開
// ==========================================

// 領域型
pub use domain::types::{Applicant, ApplicationType, BprAdFlag, TargetOrg, ViolationLevel};

// 領域エンティティ
pub use domain::{
    DecisionRow, DecisionTable, ReferenceRecord, ReferenceTable, RequestRecord,
    DECISION_RESULT_DEFAULT,
};

// エンジン
pub use engine::{
    BprAdFlagDeterminer, ConditionEvaluator, DecisionTableDispatcher, EditorRegistry,
    OrgChangeOrchestrator, PatternMatcher, ReferenceExistenceChecker,
};

// テーブルアクセス
pub use table::{DataTable, SearchConditions, TableSearcher};

// 設定
pub use config::PipelineConfig;

// ==========================================
// 定数
// ==========================================

// システムバージョン
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// システム名称
pub const APP_NAME: &str = "組織変更反映バッチ";
