// ==========================================
// 組織変更反映バッチ - 実行オーケストレータ
// ==========================================
// 職責: 明細ごとの処理フローを束ねる
//       パターン選定 → リファレンス結合 → 存在判定・BPR 判定 →
//       ルール表ディスパッチ → 行編集
// 制約: 単一スレッドの同期バッチ。明細間に順序依存はない
// ==========================================

use crate::domain::reference::ReferenceTable;
use crate::domain::request::RequestRecord;
use crate::domain::types::{Applicant, BprAdFlag};
use crate::engine::bpr_flag::BprAdFlagDeterminer;
use crate::engine::dispatcher::DecisionTableDispatcher;
use crate::engine::existence::ReferenceExistenceChecker;
use crate::engine::pattern::PatternMatcher;
use crate::engine::error::RuleResult;
use crate::importer::validator::{RequestValidator, ValidationReport};
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ===== 派生出力列 =====
pub mod derived_columns {
    pub const REFERENCE_EXISTS: &str = "reference_exists";
    pub const REFERENCE_HIT_COUNT: &str = "reference_hit_count";
    pub const MATCHED_PATTERN: &str = "matched_pattern";
    pub const BPR_AD_FLAG: &str = "bpr_ad_flag";
    pub const ALERT_MESSAGE: &str = "alert_message";
    pub const EDITOR: &str = "editor";
}

// ==========================================
// RowOutcome - 明細 1 件の処理結果
// ==========================================
#[derive(Debug, Clone)]
pub struct RowOutcome {
    pub request_id: String,
    pub row_number: usize,
    /// 該当した構造パターン名。未一致は None
    pub pattern_name: Option<String>,
    /// 結合キーで引き当てたリファレンス行数
    pub reference_hit_count: usize,
    /// プレフィックス単位の存在判定結果
    pub reference_exists: bool,
    pub bpr_ad_flag: Option<BprAdFlag>,
    pub alert_message: Option<String>,
    pub editor_name: String,
    /// 派生列・出力列を書き込んだ行ビュー
    pub output_row: HashMap<String, String>,
}

// ==========================================
// RunSummary - 実行単位の集計
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub total: usize,
    pub pattern_matched: usize,
    pub pattern_unmatched: usize,
    pub reference_found: usize,
    pub alert_count: usize,
}

/// 実行結果一式
#[derive(Debug)]
pub struct PipelineRunResult {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<RowOutcome>,
    pub report: ValidationReport,
    pub summary: RunSummary,
}

// ==========================================
// OrgChangeOrchestrator
// ==========================================
pub struct OrgChangeOrchestrator {
    reference: ReferenceTable,
    matcher: PatternMatcher,
    dispatcher: DecisionTableDispatcher,
    determiner: BprAdFlagDeterminer,
}

impl OrgChangeOrchestrator {
    pub fn new(
        reference: ReferenceTable,
        matcher: PatternMatcher,
        dispatcher: DecisionTableDispatcher,
        determiner: BprAdFlagDeterminer,
    ) -> Self {
        Self {
            reference,
            matcher,
            dispatcher,
            determiner,
        }
    }

    /// 申請明細集合を一括処理する
    ///
    /// # 戻り値
    /// - PipelineRunResult: 明細ごとの結果・検証報告・集計
    ///
    /// # エラー
    /// - 構成不備・入力不正 (即時中断)。明細の不一致は結果値で表す
    #[instrument(skip(self, requests), fields(request_count = requests.len()))]
    pub fn process(&self, requests: &[RequestRecord]) -> RuleResult<PipelineRunResult> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let report = RequestValidator::validate(requests);
        if !report.is_clean() {
            warn!(
                errors = report.error_count(),
                warnings = report.warning_count(),
                "検証違反あり (処理は継続)"
            );
        }

        // プレフィックス単位の存在判定 (同一プレフィックスの明細は同じ結果)
        let existence = self.check_existence_by_prefix(requests)?;

        let mut outcomes = Vec::with_capacity(requests.len());
        let mut summary = RunSummary {
            total: requests.len(),
            ..Default::default()
        };

        for request in requests {
            let outcome = self.process_row(request, &existence)?;

            if outcome.pattern_name.is_some() {
                summary.pattern_matched += 1;
            } else {
                summary.pattern_unmatched += 1;
            }
            if outcome.reference_exists {
                summary.reference_found += 1;
            }
            if outcome.alert_message.is_some() {
                summary.alert_count += 1;
            }

            outcomes.push(outcome);
        }

        let finished_at = Utc::now();
        info!(
            %run_id,
            total = summary.total,
            matched = summary.pattern_matched,
            unmatched = summary.pattern_unmatched,
            alerts = summary.alert_count,
            elapsed_ms = (finished_at - started_at).num_milliseconds(),
            "バッチ処理完了"
        );

        Ok(PipelineRunResult {
            run_id,
            started_at,
            finished_at,
            outcomes,
            report,
            summary,
        })
    }

    /// 明細 1 件の処理
    fn process_row(
        &self,
        request: &RequestRecord,
        existence: &HashMap<String, bool>,
    ) -> RuleResult<RowOutcome> {
        let mut row = request.to_row();

        // 構造パターン選定とリファレンス結合
        let pattern = self.matcher.select(request);
        let (pattern_name, reference_hit_count) = match pattern {
            Some(p) => {
                let conditions = p.build_conditions(request);
                let hits = self.reference.query(&conditions).len();
                (Some(p.name.to_string()), hits)
            }
            None => {
                warn!(
                    request_id = %request.request_id,
                    branch_code = %request.branch_code,
                    "構造パターン未一致 (結合なし)"
                );
                (None, 0)
            }
        };

        let reference_exists = existence
            .get(request.branch_code_prefix4())
            .copied()
            .unwrap_or(false);

        // BPR・AD 判定 (申請種別が解釈できた明細のみ)
        let (bpr_ad_flag, alert_message) = match request.application_type {
            Some(app_type) => {
                let (flag, alert) = self.determiner.determine(
                    app_type.as_str(),
                    request.applicant.unwrap_or(Applicant::Jinji),
                    request.department_code(),
                    request.group_code(),
                    request.group_name(),
                )?;
                (Some(flag), alert)
            }
            None => (None, None),
        };

        // ルール表ディスパッチと行編集
        let editor = self.dispatcher.create_editor(&row)?;
        let editor_name = editor.label().to_string();
        editor.apply(&mut row);

        // 派生列の書き込み (下流ファイル出力用)
        row.insert(
            derived_columns::REFERENCE_EXISTS.to_string(),
            if reference_exists { "1" } else { "0" }.to_string(),
        );
        row.insert(
            derived_columns::REFERENCE_HIT_COUNT.to_string(),
            reference_hit_count.to_string(),
        );
        row.insert(
            derived_columns::MATCHED_PATTERN.to_string(),
            pattern_name.clone().unwrap_or_default(),
        );
        row.insert(
            derived_columns::BPR_AD_FLAG.to_string(),
            bpr_ad_flag.map(|f| f.to_string()).unwrap_or_default(),
        );
        row.insert(
            derived_columns::ALERT_MESSAGE.to_string(),
            alert_message.clone().unwrap_or_default(),
        );
        row.insert(derived_columns::EDITOR.to_string(), editor_name.clone());

        Ok(RowOutcome {
            request_id: request.request_id.clone(),
            row_number: request.row_number,
            pattern_name,
            reference_hit_count,
            reference_exists,
            bpr_ad_flag,
            alert_message,
            editor_name,
            output_row: row,
        })
    }

    /// 部店コード先頭 4 桁ごとに存在判定をまとめて行う
    fn check_existence_by_prefix(
        &self,
        requests: &[RequestRecord],
    ) -> RuleResult<HashMap<String, bool>> {
        let prefixes: BTreeSet<String> = requests
            .iter()
            .map(|r| r.branch_code_prefix4().to_string())
            // 桁数・数字の不正は検証層で報告済み。ここでは判定対象外
            .filter(|p| p.chars().count() == 4 && p.chars().all(|c| c.is_ascii_digit()))
            .collect();

        let mut existence = HashMap::with_capacity(prefixes.len());
        for prefix in prefixes {
            let checker = ReferenceExistenceChecker::new(&prefix, requests)?;
            let exists = checker.check(&self.reference);
            existence.insert(prefix, exists);
        }
        Ok(existence)
    }
}
