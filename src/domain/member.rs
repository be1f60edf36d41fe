// ==========================================
// 排班生成系统 - 成员领域模型
// ==========================================
// 职责: 成员主数据（出勤可用性、可担当班次、技能组、连续出勤上限）
// 红线: 成员由外部主数据维护，引擎只读
// ==========================================

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

// ==========================================
// Availability - 出勤可用性
// ==========================================
// weekdays 与 can_work_saturday / can_work_sunday 由 setter 保持同步
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub weekdays: HashSet<Weekday>,
    pub can_work_saturday: bool,
    pub can_work_sunday: bool,
}

impl Availability {
    /// 按星期集合构造（周六/周日标志由集合推导）
    pub fn from_weekdays<I>(days: I) -> Self
    where
        I: IntoIterator<Item = Weekday>,
    {
        let weekdays: HashSet<Weekday> = days.into_iter().collect();
        Self {
            can_work_saturday: weekdays.contains(&Weekday::Sat),
            can_work_sunday: weekdays.contains(&Weekday::Sun),
            weekdays,
        }
    }

    /// 周一至周五
    pub fn weekdays_only() -> Self {
        Self::from_weekdays([
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ])
    }

    /// 全周
    pub fn every_day() -> Self {
        Self::from_weekdays([
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ])
    }

    pub fn set_weekday(&mut self, day: Weekday, available: bool) {
        if available {
            self.weekdays.insert(day);
        } else {
            self.weekdays.remove(&day);
        }
        match day {
            Weekday::Sat => self.can_work_saturday = available,
            Weekday::Sun => self.can_work_sunday = available,
            _ => {}
        }
    }

    pub fn set_saturday(&mut self, available: bool) {
        self.set_weekday(Weekday::Sat, available);
    }

    pub fn set_sunday(&mut self, available: bool) {
        self.set_weekday(Weekday::Sun, available);
    }

    /// 判定某日是否可出勤
    ///
    /// 周六/周日看独立标志，其余看星期集合
    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        match date.weekday() {
            Weekday::Sat => self.can_work_saturday,
            Weekday::Sun => self.can_work_sunday,
            day => self.weekdays.contains(&day),
        }
    }
}

impl Default for Availability {
    fn default() -> Self {
        Self::weekdays_only()
    }
}

// ==========================================
// MemberConstraints - 成员个别约束
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberConstraints {
    /// 最大连续出勤天数（None 时使用策略默认值）
    #[serde(default)]
    pub max_consecutive_days: Option<u32>,
}

// ==========================================
// Member - 成员
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub availability: Availability,
    /// 可担当的班次名
    #[serde(default)]
    pub capabilities: BTreeSet<String>,
    #[serde(default)]
    pub skill_group: Option<String>,
    #[serde(default)]
    pub constraints: MemberConstraints,
}

impl Member {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            availability: Availability::default(),
            capabilities: BTreeSet::new(),
            skill_group: None,
            constraints: MemberConstraints::default(),
        }
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    pub fn with_capabilities<I, S>(mut self, shifts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities = shifts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_skill_group(mut self, group: impl Into<String>) -> Self {
        self.skill_group = Some(group.into());
        self
    }

    pub fn with_max_consecutive_days(mut self, days: u32) -> Self {
        self.constraints.max_consecutive_days = Some(days);
        self
    }

    pub fn can_work_on(&self, date: NaiveDate) -> bool {
        self.availability.is_available_on(date)
    }

    pub fn can_work_shift(&self, shift_name: &str) -> bool {
        self.capabilities.contains(shift_name)
    }

    pub fn belongs_to(&self, skill_group: &str) -> bool {
        self.skill_group.as_deref() == Some(skill_group)
    }

    /// 有效连续出勤上限
    pub fn max_consecutive_days_or(&self, default_days: u32) -> u32 {
        self.constraints.max_consecutive_days.unwrap_or(default_days)
    }
}
