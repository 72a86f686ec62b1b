// ==========================================
// 組織変更反映バッチ - 申請明細検証
// ==========================================
// 職責: 統一レイアウト明細の構造検証と違反集約
// 制約: 違反は例外にせず集約して報告する (実行は中断しない)。
//       ルール表・演算子等の構成不備は各エンジンが即時エラーにする
// ==========================================

use crate::domain::request::RequestRecord;
use crate::domain::types::ViolationLevel;
use serde::{Deserialize, Serialize};

// ==========================================
// Violation - 検証違反 1 件
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub row_number: usize,
    pub request_id: String,
    pub level: ViolationLevel,
    pub field: String,
    pub message: String,
}

// ==========================================
// ValidationReport - 実行単位の違反集約
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn error_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.level == ViolationLevel::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.level == ViolationLevel::Warning)
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

// ==========================================
// RequestValidator
// ==========================================
pub struct RequestValidator;

impl RequestValidator {
    /// 明細集合を検証し、違反を集約して返す
    pub fn validate(records: &[RequestRecord]) -> ValidationReport {
        let mut report = ValidationReport::default();
        for record in records {
            Self::validate_record(record, &mut report);
        }
        report
    }

    fn validate_record(record: &RequestRecord, report: &mut ValidationReport) {
        let push = |report: &mut ValidationReport, level, field: &str, message: String| {
            report.violations.push(Violation {
                row_number: record.row_number,
                request_id: record.request_id.clone(),
                level,
                field: field.to_string(),
                message,
            });
        };

        // 申請種別・対象区分は写像層で解釈できなかった場合 None になる
        if record.application_type.is_none() {
            push(
                report,
                ViolationLevel::Error,
                "application_type",
                "申請種別が解釈できない".to_string(),
            );
        }
        if record.target_org.is_none() {
            push(
                report,
                ViolationLevel::Error,
                "target_org",
                "対象区分が解釈できない".to_string(),
            );
        }

        // 部店コード: 4 桁 (部店粒度) / 5 桁 (課・エリア粒度) の数字列
        let code = record.branch_code.as_str();
        if code.is_empty() {
            push(
                report,
                ViolationLevel::Error,
                "branch_code",
                "部店コードが空".to_string(),
            );
        } else {
            let len = record.branch_code_len();
            if len != 4 && len != 5 {
                push(
                    report,
                    ViolationLevel::Error,
                    "branch_code",
                    format!("部店コード桁数が不正: {} ({} 桁)", code, len),
                );
            }
            if !code.chars().all(|c| c.is_ascii_digit()) {
                push(
                    report,
                    ViolationLevel::Error,
                    "branch_code",
                    format!("部店コードに数字以外の文字: {}", code),
                );
            }
        }

        // 申請番号欠落は報告のみ (後続処理は行番号で追跡可能)
        if record.request_id.is_empty() {
            push(
                report,
                ViolationLevel::Warning,
                "request_id",
                "申請番号が空".to_string(),
            );
        }

        // 課Gr 名称だけあってコードがない明細は判定に使えない
        if record.group_code().is_none() && record.group_name().is_some() {
            push(
                report,
                ViolationLevel::Warning,
                "section_gr_code",
                "課Gr名称のみでコードがない".to_string(),
            );
        }
    }
}
