// ==========================================
// 組織変更反映バッチ - BPR・AD 判定
// ==========================================
// 職責: 申請 1 件を BPR対象 / ADのみ / 対象外 に分類する
// 方式: 変更・廃止は参照値表の引き当て、新設は部署コード
//       プレフィックスと申請元・グループ名称による段階判定
// ==========================================

use crate::domain::types::{Applicant, ApplicationType, BprAdFlag};
use crate::engine::error::{RuleError, RuleResult};
use std::collections::HashMap;
use std::ops::RangeInclusive;
use tracing::debug;

// ==========================================
// 判定定数 (部署コードプレフィックス)
// ==========================================

/// 本部の部署コード先頭 1 桁
const HEADQUARTERS_PREFIX: char = '6';

/// BPR 対象となる先頭 1 桁 (国内支店 / 法人 / 海外支店)
const TARGET_FIRST_DIGITS: [char; 3] = ['0', '1', '2'];

/// 海外駐在拠点の先頭 1 桁 (AD のみ)
const OVERSEAS_OFFICE_PREFIX: char = '3';

/// MUFG 持株グループの先頭 1 桁 (2 系統)
const MUFG_HOLDING_PREFIXES: [char; 2] = ['8', '9'];

/// MUFG 外関連会社の可能性がある先頭 2 桁の範囲
const NON_MUFG_AFFILIATE_RANGE: RangeInclusive<u32> = 70..=79;

/// 寮・社宅コードの先頭 1 桁
const DORMITORY_PREFIX: char = '4';

/// グループ名称に含まれると要確認となる地域キーワード
const REGION_KEYWORDS: [&str; 6] = ["Americas", "Europe", "Asia", "米州", "欧州", "アジア"];

// ===== 要確認アラート文言 =====
pub const ALERT_REGION_KEYWORD: &str = "review required: region keyword in group name";
pub const ALERT_NON_MUFG: &str = "possible non-MUFG affiliate";
pub const ALERT_SPECIAL_CODE: &str = "special code";

// ==========================================
// BprAdFlagDeterminer
// ==========================================
// 変更・廃止用の参照値表のみを状態として持つ純粋な判定器
#[derive(Debug, Default)]
pub struct BprAdFlagDeterminer {
    reference_values: HashMap<(String, String), BprAdFlag>,
}

impl BprAdFlagDeterminer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 参照値表のエントリ群から構築する
    pub fn with_reference_data(entries: Vec<((String, String), BprAdFlag)>) -> Self {
        Self {
            reference_values: entries.into_iter().collect(),
        }
    }

    /// 参照値表の 1 エントリを更新する (変更・廃止判定で使う)
    pub fn update_reference_data(&mut self, department_code: &str, group_code: &str, flag: BprAdFlag) {
        self.reference_values
            .insert((department_code.to_string(), group_code.to_string()), flag);
    }

    /// 判定本体
    ///
    /// # 引数
    /// - application_type: 申請種別トークン (新設/変更/廃止)。解釈不能は即時エラー
    /// - applicant: 申請元区分
    /// - department_code: 部署コード (部店コード先頭 4 桁)
    /// - group_code: グループコード (課Grコード)。空なら None
    /// - group_name: グループ名称。group_code があるとき必須
    ///
    /// # 戻り値
    /// - (判定区分, 要確認アラート)。アラートなしは None
    pub fn determine(
        &self,
        application_type: &str,
        applicant: Applicant,
        department_code: &str,
        group_code: Option<&str>,
        group_name: Option<&str>,
    ) -> RuleResult<(BprAdFlag, Option<String>)> {
        let app_type = application_type
            .parse::<ApplicationType>()
            .map_err(|_| RuleError::InvalidApplicationType(application_type.to_string()))?;

        match app_type {
            // 変更・廃止: 既登録の判定値を引き当てる。
            // 未登録は「参照情報なし」(アラートなし)
            ApplicationType::Modify | ApplicationType::Discontinue => {
                let key = (
                    department_code.to_string(),
                    group_code.unwrap_or("").to_string(),
                );
                let flag = self
                    .reference_values
                    .get(&key)
                    .copied()
                    .unwrap_or(BprAdFlag::NoReference);
                debug!(department = department_code, flag = %flag, "参照値表引き当て");
                Ok((flag, None))
            }
            ApplicationType::New => {
                Self::determine_new(applicant, department_code, group_code, group_name)
            }
        }
    }

    /// 新設の段階判定
    fn determine_new(
        applicant: Applicant,
        department_code: &str,
        group_code: Option<&str>,
        group_name: Option<&str>,
    ) -> RuleResult<(BprAdFlag, Option<String>)> {
        // 国際事務企画部起票の本部部署は AD のみ
        if applicant.is_international() && department_code.starts_with(HEADQUARTERS_PREFIX) {
            return Ok((BprAdFlag::AdOnly, None));
        }

        // グループコードがある場合は名称必須。本部部署で名称に
        // 地域キーワードを含むものは AD のみ + 要確認
        if group_code.is_some() {
            let name = group_name.ok_or(RuleError::MissingGroupName)?;
            if department_code.starts_with(HEADQUARTERS_PREFIX)
                && REGION_KEYWORDS.iter().any(|k| name.contains(k))
            {
                return Ok((BprAdFlag::AdOnly, Some(ALERT_REGION_KEYWORD.to_string())));
            }
        }

        // 部署コード先頭 1 桁による共通分類
        let first = department_code.chars().next();
        if let Some(digit) = first {
            if TARGET_FIRST_DIGITS.contains(&digit) {
                return Ok((BprAdFlag::Target, None));
            }
            if digit == OVERSEAS_OFFICE_PREFIX {
                return Ok((BprAdFlag::AdOnly, None));
            }
        }

        // グループコードなし (会社単位の申請): 持株・関連会社系の分類
        if group_code.is_none() {
            if first.is_some_and(|d| MUFG_HOLDING_PREFIXES.contains(&d)) {
                return Ok((BprAdFlag::Target, None));
            }

            let first_two = department_code.get(0..2).and_then(|s| s.parse::<u32>().ok());
            if first_two.is_some_and(|n| NON_MUFG_AFFILIATE_RANGE.contains(&n)) {
                return Ok((BprAdFlag::NotTarget, Some(ALERT_NON_MUFG.to_string())));
            }

            if first == Some(DORMITORY_PREFIX) {
                return Ok((BprAdFlag::NotTarget, Some(ALERT_SPECIAL_CODE.to_string())));
            }
        }

        Ok((BprAdFlag::NotTarget, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_domestic_first_digit_is_target() {
        let determiner = BprAdFlagDeterminer::new();
        let (flag, alert) = determiner
            .determine("new", Applicant::Jinji, "0100", None, None)
            .unwrap();
        assert_eq!(flag, BprAdFlag::Target);
        assert_eq!(alert, None);
    }

    #[test]
    fn test_new_headquarters_region_keyword() {
        let determiner = BprAdFlagDeterminer::new();
        let (flag, alert) = determiner
            .determine(
                "new",
                Applicant::Jinji,
                "6100",
                Some("01"),
                Some("Americas Sales"),
            )
            .unwrap();
        assert_eq!(flag, BprAdFlag::AdOnly);
        assert_eq!(alert.as_deref(), Some(ALERT_REGION_KEYWORD));
    }

    #[test]
    fn test_new_group_code_requires_group_name() {
        let determiner = BprAdFlagDeterminer::new();
        let result = determiner.determine("new", Applicant::Jinji, "6100", Some("01"), None);
        assert!(matches!(result, Err(RuleError::MissingGroupName)));
    }

    #[test]
    fn test_new_international_headquarters_is_ad_only() {
        let determiner = BprAdFlagDeterminer::new();
        let (flag, alert) = determiner
            .determine("new", Applicant::Kokusai, "6200", None, None)
            .unwrap();
        assert_eq!(flag, BprAdFlag::AdOnly);
        assert_eq!(alert, None);
    }

    #[test]
    fn test_new_overseas_office_is_ad_only() {
        let determiner = BprAdFlagDeterminer::new();
        let (flag, alert) = determiner
            .determine("new", Applicant::Jinji, "3100", Some("01"), Some("営業課"))
            .unwrap();
        assert_eq!(flag, BprAdFlag::AdOnly);
        assert_eq!(alert, None);
    }

    #[test]
    fn test_new_mufg_holding_is_target() {
        let determiner = BprAdFlagDeterminer::new();
        let (flag, alert) = determiner
            .determine("new", Applicant::Kanren, "8001", None, None)
            .unwrap();
        assert_eq!(flag, BprAdFlag::Target);
        assert_eq!(alert, None);

        let (flag, _) = determiner
            .determine("new", Applicant::Kanren, "9100", None, None)
            .unwrap();
        assert_eq!(flag, BprAdFlag::Target);
    }

    #[test]
    fn test_new_non_mufg_affiliate_range_alerts() {
        let determiner = BprAdFlagDeterminer::new();
        let (flag, alert) = determiner
            .determine("new", Applicant::Kanren, "7501", None, None)
            .unwrap();
        assert_eq!(flag, BprAdFlag::NotTarget);
        assert_eq!(alert.as_deref(), Some(ALERT_NON_MUFG));
    }

    #[test]
    fn test_new_dormitory_prefix_alerts() {
        let determiner = BprAdFlagDeterminer::new();
        let (flag, alert) = determiner
            .determine("new", Applicant::Kanren, "4100", None, None)
            .unwrap();
        assert_eq!(flag, BprAdFlag::NotTarget);
        assert_eq!(alert.as_deref(), Some(ALERT_SPECIAL_CODE));
    }

    #[test]
    fn test_new_group_present_unknown_prefix_is_not_target() {
        let determiner = BprAdFlagDeterminer::new();
        let (flag, alert) = determiner
            .determine("new", Applicant::Jinji, "7100", Some("01"), Some("営業課"))
            .unwrap();
        assert_eq!(flag, BprAdFlag::NotTarget);
        assert_eq!(alert, None);
    }

    #[test]
    fn test_modify_lookup_round_trip() {
        let mut determiner = BprAdFlagDeterminer::new();
        determiner.update_reference_data("6100", "01", BprAdFlag::Target);

        let (flag, alert) = determiner
            .determine("modify", Applicant::Jinji, "6100", Some("01"), None)
            .unwrap();
        assert_eq!(flag, BprAdFlag::Target);
        assert_eq!(alert, None);
    }

    #[test]
    fn test_modify_without_reference_entry() {
        let determiner = BprAdFlagDeterminer::new();
        let (flag, alert) = determiner
            .determine("discontinue", Applicant::Jinji, "6100", Some("01"), None)
            .unwrap();
        assert_eq!(flag, BprAdFlag::NoReference);
        assert_eq!(alert, None);
    }

    #[test]
    fn test_invalid_application_type() {
        let determiner = BprAdFlagDeterminer::new();
        let result = determiner.determine("merge", Applicant::Jinji, "0100", None, None);
        assert!(matches!(result, Err(RuleError::InvalidApplicationType(_))));
    }

    #[test]
    fn test_japanese_application_type_tokens() {
        let determiner = BprAdFlagDeterminer::new();
        let (flag, _) = determiner
            .determine("新設", Applicant::Jinji, "0100", None, None)
            .unwrap();
        assert_eq!(flag, BprAdFlag::Target);
    }
}
