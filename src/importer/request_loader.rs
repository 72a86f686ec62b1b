// ==========================================
// 組織変更反映バッチ - 申請ファイル取込
// ==========================================
// 職責: 提出元ごとの申請ファイルを統一レイアウト明細列へ変換
// ==========================================

use crate::domain::request::RequestRecord;
use crate::domain::types::Applicant;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::mapper_for;
use crate::importer::file_parser::UniversalFileParser;
use std::path::Path;
use tracing::info;

pub struct RequestLoader;

impl RequestLoader {
    /// 申請ファイル 1 本を読み込む
    ///
    /// # 引数
    /// - path: 申請ファイル (Excel / CSV)
    /// - applicant: 提出元 (レイアウト選択に使う)
    ///
    /// # 備考
    /// - 行番号はヘッダ行を 1 行目として 2 始まり
    pub fn load(path: &Path, applicant: Applicant) -> ImportResult<Vec<RequestRecord>> {
        let rows = UniversalFileParser.parse(path)?;
        let mapper = mapper_for(applicant);

        let mut records = Vec::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            records.push(mapper.map_to_request(row, idx + 2)?);
        }

        info!(
            path = %path.display(),
            applicant = %applicant,
            records = records.len(),
            "申請ファイル取込完了"
        );
        Ok(records)
    }
}
