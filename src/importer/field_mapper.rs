// ==========================================
// 組織変更反映バッチ - フィールドマッパ
// ==========================================
// 職責: 提出元 (人事部 / 国際事務企画部 / 関連会社) ごとの
//       フォーム列名を統一レイアウト RequestRecord へ写像する
// 備考: 区分値の解釈不能はここでは致命にせず None のまま通し、
//       検証層で違反として報告する
// ==========================================

use crate::domain::request::RequestRecord;
use crate::domain::types::{Applicant, ApplicationType, TargetOrg};
use crate::importer::error::ImportResult;
use std::collections::HashMap;

// ==========================================
// RequestFieldMapper Trait
// ==========================================
// 用途: 提出元レイアウト差の吸収口
pub trait RequestFieldMapper: Send + Sync {
    /// このマッパが担当する提出元
    fn applicant(&self) -> Applicant;

    /// 生の行マップを統一レイアウトへ写像する
    ///
    /// # 引数
    /// - row: 列名 → 値 (ファイル解析層の出力)
    /// - row_number: 取込元ファイル行番号 (検証報告用)
    fn map_to_request(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RequestRecord>;
}

/// 別名を許容した文字列取得。空白のみは空扱い
fn get_string(row: &HashMap<String, String>, aliases: &[&str]) -> String {
    for alias in aliases {
        if let Some(v) = row.get(*alias) {
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }
    String::new()
}

/// 共通列の写像。列名の揺れは各フォーム共通の別名表で吸収する
fn map_common(row: &HashMap<String, String>, applicant: Applicant, row_number: usize) -> RequestRecord {
    let application_type = get_string(row, &["申請種別", "種別", "申請区分"])
        .parse::<ApplicationType>()
        .ok();
    let target_org = get_string(row, &["対象区分", "対象", "変更対象"])
        .parse::<TargetOrg>()
        .ok();

    RequestRecord {
        request_id: get_string(row, &["申請番号", "受付番号"]),
        applicant: Some(applicant),
        application_type,
        target_org,
        branch_code: get_string(row, &["部店コード", "部店CD"]),
        branch_name: get_string(row, &["部店名称", "部店名"]),
        section_gr_code: get_string(row, &["課Grコード", "課GrCD", "課コード"]),
        section_gr_name: get_string(row, &["課Gr名称", "課Gr名", "課名称"]),
        parent_branch_code: get_string(row, &["親部店コード", "親部店CD"]),
        resident_branch_code: get_string(row, &["常駐部店コード", "常駐部店CD"]),
        business_and_area_code: get_string(row, &["部門・エリアコード", "部門エリアコード"]),
        remarks: get_string(row, &["備考", "摘要"]),
        row_number,
    }
}

// ==========================================
// 人事部フォーム
// ==========================================
pub struct JinjiFieldMapper;

impl RequestFieldMapper for JinjiFieldMapper {
    fn applicant(&self) -> Applicant {
        Applicant::Jinji
    }

    fn map_to_request(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RequestRecord> {
        Ok(map_common(row, Applicant::Jinji, row_number))
    }
}

// ==========================================
// 国際事務企画部フォーム
// ==========================================
// 列名は人事部フォームとほぼ共通。拠点コード表記のみ異なる
pub struct KokusaiFieldMapper;

impl RequestFieldMapper for KokusaiFieldMapper {
    fn applicant(&self) -> Applicant {
        Applicant::Kokusai
    }

    fn map_to_request(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RequestRecord> {
        let mut record = map_common(row, Applicant::Kokusai, row_number);
        if record.branch_code.is_empty() {
            record.branch_code = get_string(row, &["拠点コード", "拠点CD"]);
        }
        if record.branch_name.is_empty() {
            record.branch_name = get_string(row, &["拠点名称", "拠点名"]);
        }
        Ok(record)
    }
}

// ==========================================
// 関連会社フォーム
// ==========================================
pub struct KanrenFieldMapper;

impl RequestFieldMapper for KanrenFieldMapper {
    fn applicant(&self) -> Applicant {
        Applicant::Kanren
    }

    fn map_to_request(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<RequestRecord> {
        let mut record = map_common(row, Applicant::Kanren, row_number);
        if record.branch_code.is_empty() {
            record.branch_code = get_string(row, &["会社部店コード", "会社部店CD"]);
        }
        Ok(record)
    }
}

/// 提出元に応じたマッパを返す
pub fn mapper_for(applicant: Applicant) -> Box<dyn RequestFieldMapper> {
    match applicant {
        Applicant::Jinji => Box::new(JinjiFieldMapper),
        Applicant::Kokusai => Box::new(KokusaiFieldMapper),
        Applicant::Kanren => Box::new(KanrenFieldMapper),
    }
}
