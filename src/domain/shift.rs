// ==========================================
// 排班生成系统 - 班次/技能组/申请/需求槽 领域模型
// ==========================================

use crate::domain::types::RequestKind;
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

// ==========================================
// ShiftTimeDefinition - 班次时间定义
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTimeDefinition {
    pub name: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// 显示颜色（如 "#FFCC00"），引擎不使用
    #[serde(default)]
    pub color: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl ShiftTimeDefinition {
    pub fn new(name: impl Into<String>, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            enabled: true,
            color: None,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

// ==========================================
// SkillGroup - 技能组
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub id: String,
    pub name: String,
}

// ==========================================
// ShiftRequest - 成员申请
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRequest {
    pub member_id: String,
    pub date: NaiveDate,
    pub kind: RequestKind,
}

impl ShiftRequest {
    pub fn new(member_id: impl Into<String>, date: NaiveDate, kind: RequestKind) -> Self {
        Self {
            member_id: member_id.into(),
            date,
            kind,
        }
    }
}

// ==========================================
// DemandSlot - 需求槽（日期 × 班次 × 人数）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandSlot {
    pub date: NaiveDate,
    pub shift_name: String,
    pub required: u32,
    pub skill_group: Option<String>,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl DemandSlot {
    /// 班次时长（end < start 视为跨零点）
    pub fn duration(&self) -> Duration {
        let span = self.end.signed_duration_since(self.start);
        if span < Duration::zero() {
            span + Duration::days(1)
        } else {
            span
        }
    }
}

// ==========================================
// SkillQuota - 技能组人数配额（日期 × 技能组 × 人数）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillQuota {
    pub date: NaiveDate,
    pub skill_group: String,
    pub required: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn slot(start: NaiveTime, end: NaiveTime) -> DemandSlot {
        DemandSlot {
            date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            shift_name: "夜勤".to_string(),
            required: 1,
            skill_group: None,
            start,
            end,
        }
    }

    #[test]
    fn test_duration_same_day() {
        assert_eq!(slot(t(9, 0), t(17, 30)).duration(), Duration::minutes(510));
    }

    #[test]
    fn test_duration_over_midnight() {
        assert_eq!(slot(t(22, 0), t(6, 0)).duration(), Duration::hours(8));
    }

    #[test]
    fn test_zero_duration_for_unknown_shift() {
        assert_eq!(slot(NaiveTime::MIN, NaiveTime::MIN).duration(), Duration::zero());
    }
}
