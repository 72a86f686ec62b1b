// ==========================================
// 組織変更反映バッチ - ルールエンジン層
// ==========================================
// 職責: 条件評価・構造マッチング・存在判定・BPR 判定・ディスパッチ
// 方針: エンジンはファイル I/O を持たず、結果はすべて値で返す
// ==========================================

pub mod bpr_flag;
pub mod condition;
pub mod dispatcher;
pub mod editor;
pub mod error;
pub mod existence;
pub mod orchestrator;
pub mod pattern;

pub use bpr_flag::BprAdFlagDeterminer;
pub use condition::{ConditionEvaluator, CONDITION_ANY};
pub use dispatcher::{DecisionTableDispatcher, EditorFactory, EditorRegistry};
pub use editor::{
    AreaEditor, BranchEditor, DefaultEditor, DiscontinueEditor, RecordEditor, SalesDeptEditor,
    SectionGrEditor,
};
pub use error::{RuleError, RuleResult};
pub use existence::{ReferenceExistenceChecker, Section7818Check, SpecialCaseCheck};
pub use orchestrator::{OrgChangeOrchestrator, PipelineRunResult, RowOutcome, RunSummary};
pub use pattern::{JoinValue, MatchingPattern, PatternCondition, PatternMatcher};
