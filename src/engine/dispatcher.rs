// ==========================================
// 組織変更反映バッチ - ディシジョンテーブルディスパッチャ
// ==========================================
// 職責: 条件評価の結果ラベルから編集処理を生成する
// 制約: ルール表の整合性 (非空・キャッチオール行あり) は
//       構築時に 1 回だけ検査する
// 制約: 編集処理の解決は明示的な許可リスト登録のみ。
//       文字列からの動的シンボル解決はしない
// ==========================================

use crate::domain::decision::{DecisionTable, DECISION_RESULT_DEFAULT};
use crate::engine::condition::ConditionEvaluator;
use crate::engine::editor::{
    AreaEditor, BranchEditor, DefaultEditor, DiscontinueEditor, RecordEditor, SalesDeptEditor,
    SectionGrEditor,
};
use crate::engine::error::{RuleError, RuleResult};
use std::collections::HashMap;
use tracing::debug;

/// 編集処理の生成関数
pub type EditorFactory = fn() -> Box<dyn RecordEditor>;

// ==========================================
// EditorRegistry - 許可リスト
// ==========================================
#[derive(Default)]
pub struct EditorRegistry {
    factories: HashMap<String, EditorFactory>,
}

impl EditorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 同梱の編集処理をすべて登録したレジストリ
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(DECISION_RESULT_DEFAULT, || Box::new(DefaultEditor));
        registry.register("DataFrameEditorBranch", || Box::new(BranchEditor));
        registry.register("DataFrameEditorSectionGr", || Box::new(SectionGrEditor));
        registry.register("DataFrameEditorArea", || Box::new(AreaEditor));
        registry.register("DataFrameEditorSalesDept", || Box::new(SalesDeptEditor));
        registry.register("DataFrameEditorDiscontinue", || Box::new(DiscontinueEditor));
        registry
    }

    pub fn register(&mut self, label: &str, factory: EditorFactory) {
        self.factories.insert(label.to_string(), factory);
    }

    pub fn contains(&self, label: &str) -> bool {
        self.factories.contains_key(label)
    }

    pub fn create(&self, label: &str) -> Option<Box<dyn RecordEditor>> {
        self.factories.get(label).map(|f| f())
    }
}

// ==========================================
// DecisionTableDispatcher
// ==========================================
pub struct DecisionTableDispatcher {
    table: DecisionTable,
    registry: EditorRegistry,
    evaluator: ConditionEvaluator,
}

impl DecisionTableDispatcher {
    /// # エラー
    /// - EmptyDecisionTable: ルール表が空
    /// - MissingDefaultRow: キャッチオール行がない
    pub fn new(table: DecisionTable, registry: EditorRegistry) -> RuleResult<Self> {
        if table.is_empty() {
            return Err(RuleError::EmptyDecisionTable);
        }
        if !table.has_default_row() {
            return Err(RuleError::MissingDefaultRow(
                DECISION_RESULT_DEFAULT.to_string(),
            ));
        }

        Ok(Self {
            table,
            registry,
            evaluator: ConditionEvaluator::new(),
        })
    }

    /// 行ビューに対する編集処理名 (生成はしない)
    pub fn editor_name(&self, row: &HashMap<String, String>) -> String {
        self.evaluator.evaluate(row, &self.table)
    }

    /// 行ビューを評価し、一致した編集処理を生成する
    ///
    /// # エラー
    /// - EmptyRequestRow: 行ビューが空
    /// - UnknownEditor: ラベルが許可リストに未登録
    pub fn create_editor(&self, row: &HashMap<String, String>) -> RuleResult<Box<dyn RecordEditor>> {
        if row.is_empty() {
            return Err(RuleError::EmptyRequestRow);
        }

        let name = self.editor_name(row);
        debug!(editor = %name, "編集処理ディスパッチ");
        self.registry
            .create(&name)
            .ok_or(RuleError::UnknownEditor(name))
    }
}
