// ==========================================
// 組織変更反映バッチ - 領域型定義
// ==========================================
// 職責: 申請・照合・判定で共有する列挙型
// 入力値: 申請明細の日本語表記と英字トークンの両方を受理
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 申請種別 (Application Type)
// ==========================================
// 新設 / 変更 / 廃止 の 3 区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationType {
    New,         // 新設
    Modify,      // 変更
    Discontinue, // 廃止
}

impl ApplicationType {
    /// 申請明細に出力する標準トークン
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationType::New => "new",
            ApplicationType::Modify => "modify",
            ApplicationType::Discontinue => "discontinue",
        }
    }
}

impl fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "新設" | "new" | "NEW" => Ok(ApplicationType::New),
            "変更" | "modify" | "MODIFY" => Ok(ApplicationType::Modify),
            "廃止" | "discontinue" | "DISCONTINUE" => Ok(ApplicationType::Discontinue),
            other => Err(format!("不正な申請種別: {}", other)),
        }
    }
}

// ==========================================
// 対象組織区分 (Target Organization)
// ==========================================
// 部店 / 課Gr / エリア / 拠点内営業部
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetOrg {
    Branch,            // 部店
    SectionGr,         // 課Gr
    Area,              // エリア
    InternalSalesDept, // 拠点内営業部
}

impl TargetOrg {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetOrg::Branch => "branch",
            TargetOrg::SectionGr => "section_gr",
            TargetOrg::Area => "area",
            TargetOrg::InternalSalesDept => "internal_sales_dept",
        }
    }
}

impl fmt::Display for TargetOrg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetOrg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "部店" | "branch" => Ok(TargetOrg::Branch),
            "課" | "課Gr" | "section_gr" => Ok(TargetOrg::SectionGr),
            "エリア" | "area" => Ok(TargetOrg::Area),
            "拠点内営業部" | "internal_sales_dept" => Ok(TargetOrg::InternalSalesDept),
            other => Err(format!("不正な対象組織区分: {}", other)),
        }
    }
}

// ==========================================
// 申請元区分 (Applicant Source)
// ==========================================
// 提出元フォームのレイアウト差を吸収する際の識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Applicant {
    Jinji,   // 人事部 (国内)
    Kokusai, // 国際事務企画部
    Kanren,  // 関連会社
}

impl Applicant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Applicant::Jinji => "jinji",
            Applicant::Kokusai => "kokusai",
            Applicant::Kanren => "kanren",
        }
    }

    /// 国際事務企画部起票かどうか
    pub fn is_international(&self) -> bool {
        matches!(self, Applicant::Kokusai)
    }
}

impl fmt::Display for Applicant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Applicant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "人事" | "人事部" | "domestic" | "jinji" => Ok(Applicant::Jinji),
            "国際事務企画" | "国際事務企画部" | "international affairs" | "kokusai" => {
                Ok(Applicant::Kokusai)
            }
            "関連" | "関連会社" | "affiliate" | "kanren" => Ok(Applicant::Kanren),
            other => Err(format!("不正な申請元区分: {}", other)),
        }
    }
}

// ==========================================
// BPR・AD 判定区分 (BPR/AD Flag)
// ==========================================
// BPR対象 / ADのみ / 対象外 / 参照情報なし の 4 値
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BprAdFlag {
    Target,      // BPR対象 (BPR・AD 両方へ展開)
    AdOnly,      // AD のみ
    NotTarget,   // 対象外
    NoReference, // 参照情報なし (変更・廃止で参照値未登録)
}

impl BprAdFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            BprAdFlag::Target => "target",
            BprAdFlag::AdOnly => "AD-only",
            BprAdFlag::NotTarget => "not-target",
            BprAdFlag::NoReference => "no reference info",
        }
    }
}

impl fmt::Display for BprAdFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BprAdFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "target" | "BPR対象" => Ok(BprAdFlag::Target),
            "AD-only" | "ADのみ" => Ok(BprAdFlag::AdOnly),
            "not-target" | "対象外" => Ok(BprAdFlag::NotTarget),
            "no reference info" | "参照情報なし" => Ok(BprAdFlag::NoReference),
            other => Err(format!("不正な BPR・AD 判定区分: {}", other)),
        }
    }
}

// ==========================================
// 検証違反レベル (Violation Level)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationLevel {
    Error,   // 処理継続不可の明細
    Warning, // 継続可能だが報告対象
}

impl fmt::Display for ViolationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationLevel::Error => write!(f, "ERROR"),
            ViolationLevel::Warning => write!(f, "WARNING"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_type_from_japanese() {
        assert_eq!("新設".parse::<ApplicationType>().unwrap(), ApplicationType::New);
        assert_eq!("変更".parse::<ApplicationType>().unwrap(), ApplicationType::Modify);
        assert_eq!("廃止".parse::<ApplicationType>().unwrap(), ApplicationType::Discontinue);
    }

    #[test]
    fn test_application_type_invalid() {
        assert!("統合".parse::<ApplicationType>().is_err());
    }

    #[test]
    fn test_target_org_tokens() {
        assert_eq!("部店".parse::<TargetOrg>().unwrap(), TargetOrg::Branch);
        assert_eq!("課Gr".parse::<TargetOrg>().unwrap(), TargetOrg::SectionGr);
        assert_eq!(
            "拠点内営業部".parse::<TargetOrg>().unwrap(),
            TargetOrg::InternalSalesDept
        );
    }

    #[test]
    fn test_bpr_ad_flag_display() {
        assert_eq!(BprAdFlag::Target.to_string(), "target");
        assert_eq!(BprAdFlag::AdOnly.to_string(), "AD-only");
        assert_eq!(BprAdFlag::NoReference.to_string(), "no reference info");
    }
}
