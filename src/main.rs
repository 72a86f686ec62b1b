// ==========================================
// 組織変更反映バッチ - 実行エントリ
// ==========================================
// 用法: orgchange-batch [設定ファイルパス]
// 終了コード: 0 = 正常 / 1 = 構成不備・入力不正 (即時中断)
// 検証違反 (ソフト不一致) は結果 CSV と報告ログに集約し、中断しない
// ==========================================

use anyhow::{Context, Result};
use orgchange_batch::config::PipelineConfig;
use orgchange_batch::domain::request::columns as req_columns;
use orgchange_batch::engine::editor::output_columns;
use orgchange_batch::engine::orchestrator::{derived_columns, PipelineRunResult};
use orgchange_batch::engine::{
    BprAdFlagDeterminer, DecisionTableDispatcher, EditorRegistry, OrgChangeOrchestrator,
    PatternMatcher,
};
use orgchange_batch::importer::{DecisionTableLoader, ReferenceLoader, RequestLoader};
use orgchange_batch::logging;
use orgchange_batch::table::TableSearcher;
use std::env;
use std::path::Path;
use tracing::{error, info, warn};

/// 結果 CSV の列順
const OUTPUT_COLUMNS: [&str; 21] = [
    req_columns::REQUEST_ID,
    req_columns::APPLICANT,
    req_columns::APPLICATION_TYPE,
    req_columns::TARGET_ORG,
    req_columns::BRANCH_CODE,
    req_columns::BRANCH_NAME,
    req_columns::SECTION_GR_CODE,
    req_columns::SECTION_GR_NAME,
    req_columns::PARENT_BRANCH_CODE,
    req_columns::RESIDENT_BRANCH_CODE,
    req_columns::BUSINESS_AND_AREA_CODE,
    req_columns::BRANCH_CODE_PREFIX4,
    output_columns::BPR_BRANCH_CODE,
    output_columns::BPR_SECTION_GR_CODE,
    output_columns::BPR_BRANCH_NAME,
    output_columns::BPR_SECTION_GR_NAME,
    output_columns::DELETE_FLAG,
    derived_columns::MATCHED_PATTERN,
    derived_columns::REFERENCE_EXISTS,
    derived_columns::BPR_AD_FLAG,
    derived_columns::ALERT_MESSAGE,
];

fn main() {
    logging::init();

    if let Err(err) = run() {
        // 構成不備・入力不正は中断して非ゼロ終了 (リトライしない)
        error!(error = %err, "バッチ異常終了");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "config/pipeline.json".to_string());
    info!(config = %config_path, "組織変更反映バッチ開始");

    let config = PipelineConfig::load(Path::new(&config_path))?;

    // 入力の読込。スナップショットはキャッシュ付きアクセサ経由
    let reference_path = config.resolve(&config.reference_snapshot);
    let table_name = reference_path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("スナップショットパスが不正: {}", reference_path.display()))?;
    let searcher = TableSearcher::new(table_name, reference_path.parent());
    let reference = ReferenceLoader::from_rows(searcher.table()?.rows());

    let decision_table = DecisionTableLoader::load(&config.resolve(&config.decision_table))?;

    let determiner = match &config.flag_reference {
        Some(path) => BprAdFlagDeterminer::with_reference_data(
            ReferenceLoader::load_flag_reference(&config.resolve(path))?,
        ),
        None => BprAdFlagDeterminer::new(),
    };

    let mut requests = Vec::new();
    for entry in &config.request_files {
        requests.extend(RequestLoader::load(
            &config.resolve(&entry.path),
            entry.applicant,
        )?);
    }

    // 構築時にルール表の整合性を検査する
    let dispatcher = DecisionTableDispatcher::new(decision_table, EditorRegistry::builtin())?;
    let orchestrator = OrgChangeOrchestrator::new(
        reference,
        PatternMatcher::new(),
        dispatcher,
        determiner,
    );

    let result = orchestrator.process(&requests)?;

    for violation in &result.report.violations {
        warn!(
            row = violation.row_number,
            request_id = %violation.request_id,
            level = %violation.level,
            field = %violation.field,
            "{}",
            violation.message
        );
    }

    let output_path = config.resolve(&config.output_path);
    write_output(&output_path, &result)?;

    info!(
        run_id = %result.run_id,
        output = %output_path.display(),
        total = result.summary.total,
        alerts = result.summary.alert_count,
        "組織変更反映バッチ終了"
    );
    Ok(())
}

/// 処理結果を CSV へ書き出す
fn write_output(path: &Path, result: &PipelineRunResult) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("出力ディレクトリ作成失敗: {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("出力ファイル作成失敗: {}", path.display()))?;

    writer.write_record(OUTPUT_COLUMNS)?;
    for outcome in &result.outcomes {
        let record: Vec<&str> = OUTPUT_COLUMNS
            .iter()
            .map(|col| outcome.output_row.get(*col).map_or("", String::as_str))
            .collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
