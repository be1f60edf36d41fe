// ==========================================
// 排班生成系统 - 领域类型定义
// ==========================================
// 职责: 申请类型、排班标签（输出词汇表）
// ==========================================

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ==========================================
// 申请类型 (Request Kind)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestKind {
    WorkPreferred,    // 希望出勤
    HolidayPreferred, // 希望休
    PaidLeave,        // 有给休假
    MedicalCheckup,   // 健康诊断
}

impl RequestKind {
    /// 是否为"非出勤"类申请（随机分配器据此排除成员）
    pub fn is_non_work(&self) -> bool {
        !matches!(self, RequestKind::WorkPreferred)
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::WorkPreferred => write!(f, "WORK_PREFERRED"),
            RequestKind::HolidayPreferred => write!(f, "HOLIDAY_PREFERRED"),
            RequestKind::PaidLeave => write!(f, "PAID_LEAVE"),
            RequestKind::MedicalCheckup => write!(f, "MEDICAL_CHECKUP"),
        }
    }
}

// ==========================================
// 排班标签 (Shift Label)
// ==========================================
// 对外以字符串呈现:
// - Unset           => ""
// - Shift(name)     => name
// - PreferredShift  => "◎" + name
// - DayOff          => "休"
// - RequestedDayOff => "希休"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ShiftLabel {
    #[default]
    Unset,
    Shift(String),
    PreferredShift(String),
    DayOff,
    RequestedDayOff,
}

/// 希望出勤达成标记
pub const PREFERRED_PREFIX: &str = "◎";
/// 普通休息
pub const DAY_OFF_LABEL: &str = "休";
/// 希望休
pub const REQUESTED_DAY_OFF_LABEL: &str = "希休";

impl ShiftLabel {
    /// 转换为标签字符串
    pub fn as_label(&self) -> String {
        match self {
            ShiftLabel::Unset => String::new(),
            ShiftLabel::Shift(name) => name.clone(),
            ShiftLabel::PreferredShift(name) => format!("{}{}", PREFERRED_PREFIX, name),
            ShiftLabel::DayOff => DAY_OFF_LABEL.to_string(),
            ShiftLabel::RequestedDayOff => REQUESTED_DAY_OFF_LABEL.to_string(),
        }
    }

    /// 从标签字符串解析（未知字符串视为班次名）
    pub fn from_label(raw: &str) -> Self {
        match raw {
            "" => ShiftLabel::Unset,
            DAY_OFF_LABEL => ShiftLabel::DayOff,
            REQUESTED_DAY_OFF_LABEL => ShiftLabel::RequestedDayOff,
            other => match other.strip_prefix(PREFERRED_PREFIX) {
                Some(name) => ShiftLabel::PreferredShift(name.to_string()),
                None => ShiftLabel::Shift(other.to_string()),
            },
        }
    }

    /// 是否为出勤（含希望出勤达成）
    pub fn is_work(&self) -> bool {
        matches!(self, ShiftLabel::Shift(_) | ShiftLabel::PreferredShift(_))
    }

    /// 是否为休息（普通休息或希望休）
    pub fn is_off(&self) -> bool {
        matches!(self, ShiftLabel::DayOff | ShiftLabel::RequestedDayOff)
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, ShiftLabel::Unset)
    }

    /// 出勤时对应的班次名
    pub fn shift_name(&self) -> Option<&str> {
        match self {
            ShiftLabel::Shift(name) | ShiftLabel::PreferredShift(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for ShiftLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

impl Serialize for ShiftLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_label())
    }
}

impl<'de> Deserialize<'de> for ShiftLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ShiftLabel::from_label(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_strings() {
        assert_eq!(ShiftLabel::Unset.as_label(), "");
        assert_eq!(ShiftLabel::Shift("早番".to_string()).as_label(), "早番");
        assert_eq!(
            ShiftLabel::PreferredShift("早番".to_string()).as_label(),
            "◎早番"
        );
        assert_eq!(ShiftLabel::DayOff.as_label(), "休");
        assert_eq!(ShiftLabel::RequestedDayOff.as_label(), "希休");
    }

    #[test]
    fn test_from_label_recognizes_markers() {
        assert_eq!(ShiftLabel::from_label("休"), ShiftLabel::DayOff);
        assert_eq!(ShiftLabel::from_label("希休"), ShiftLabel::RequestedDayOff);
        assert_eq!(
            ShiftLabel::from_label("◎遅番"),
            ShiftLabel::PreferredShift("遅番".to_string())
        );
        assert_eq!(
            ShiftLabel::from_label("遅番"),
            ShiftLabel::Shift("遅番".to_string())
        );
    }

    #[test]
    fn test_label_json_is_plain_string() {
        let json = serde_json::to_string(&ShiftLabel::RequestedDayOff).unwrap();
        assert_eq!(json, "\"希休\"");
        let back: ShiftLabel = serde_json::from_str("\"◎日勤\"").unwrap();
        assert_eq!(back, ShiftLabel::PreferredShift("日勤".to_string()));
    }

    #[test]
    fn test_request_kind_non_work() {
        assert!(!RequestKind::WorkPreferred.is_non_work());
        assert!(RequestKind::HolidayPreferred.is_non_work());
        assert!(RequestKind::PaidLeave.is_non_work());
        assert!(RequestKind::MedicalCheckup.is_non_work());
    }
}
